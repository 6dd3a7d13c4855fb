//! The `eignung init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("eignung.toml").exists() {
        println!("eignung.toml already exists, skipping.");
    } else {
        std::fs::write("eignung.toml", SAMPLE_CONFIG)?;
        println!("Created eignung.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust difficulty and question count in eignung.toml");
    println!("  2. Run: eignung categories");
    println!("  3. Run: eignung practice --category full-test");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# eignung configuration

default_difficulty = "medium"
default_count = 10
min_count = 5
max_count = 30
# Answers slower than this count as wrong; 0 disables the limit.
seconds_per_question = 60.0

[scoring]
time_bonus_base = 60.0
time_bonus_factor = 0.5
# "zero" counts untimed answers as 0 s, "exclude" leaves them out.
untimed = "zero"
weak_threshold = 0.5
strong_threshold = 0.8
"#;
