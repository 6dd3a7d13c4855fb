//! End-to-end practice sessions driven through stdin.
//!
//! The test is generated first with the same seed, so the correct answers
//! can be piped into `practice`.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use eignung_core::assembler::Assembler;
use eignung_core::model::{Difficulty, Selection};
use eignung_core::report::load_records;
use eignung_core::scoring::ScoreReport;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn eignung(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("eignung").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("EIGNUNG_DIFFICULTY");
    cmd
}

/// Answers that solve the test `practice` builds for `seed`.
fn solutions(category: &str, difficulty: Difficulty, count: usize, seed: u64) -> String {
    let selection: Selection = category.parse().unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    let test = Assembler::default()
        .assemble(selection, difficulty, count, &mut rng)
        .unwrap();
    test.questions()
        .iter()
        .map(|q| format!("{}\n", q.answer()))
        .collect()
}

#[test]
fn e2e_perfect_attempt() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("out").join("report.json");
    let results = dir.path().join("out").join("results.json");

    eignung(dir.path())
        .args([
            "practice",
            "--category",
            "number-sequences",
            "--difficulty",
            "hard",
            "--count",
            "6",
            "--seed",
            "99",
            "--time-limit",
            "600",
        ])
        .arg("--report")
        .arg(&report)
        .arg("--results")
        .arg(&results)
        .write_stdin(solutions("number-sequences", Difficulty::Hard, 6, 99))
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Richtig").count(6))
        .stdout(predicate::str::contains("Sehr gut"));

    let report = ScoreReport::load_json(&report).unwrap();
    assert_eq!(report.correct, 6);
    assert_eq!(report.difficulty, Difficulty::Hard);
    assert!(report.weak.is_empty());
    assert_eq!(load_records(&results).unwrap().len(), 6);
}

#[test]
fn e2e_matrices_with_numbers_and_letters() {
    let dir = TempDir::new().unwrap();
    eignung(dir.path())
        .args([
            "practice",
            "--category",
            "matrices",
            "--difficulty",
            "expert",
            "--count",
            "8",
            "--seed",
            "4",
        ])
        .write_stdin(solutions("matrices", Difficulty::Expert, 8, 4))
        .assert()
        .success()
        .stdout(predicate::str::contains("8 von 8"));
}

#[test]
fn e2e_memory_drills_hide_material_before_asking() {
    let dir = TempDir::new().unwrap();
    // One Enter to dismiss the material, then the answer.
    let input: String = solutions("memory", Difficulty::Medium, 5, 12)
        .lines()
        .map(|answer| format!("\n{answer}\n"))
        .collect();
    eignung(dir.path())
        .args([
            "practice",
            "--category",
            "memory",
            "--difficulty",
            "medium",
            "--count",
            "5",
            "--seed",
            "12",
        ])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Merken Sie sich:"))
        .stdout(predicate::str::contains("\x1b[2J"))
        .stdout(predicate::str::contains("5 von 5"));
}

#[test]
fn e2e_empty_input_scores_zero() {
    let dir = TempDir::new().unwrap();
    eignung(dir.path())
        .args(["practice", "--category", "logic", "--count", "5", "--seed", "1"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 Frage(n) unbeantwortet"))
        .stdout(predicate::str::contains("Weiter üben"))
        .stdout(predicate::str::contains("Logik"));
}

#[test]
fn e2e_results_feed_score_command() {
    let dir = TempDir::new().unwrap();
    let results = dir.path().join("results.json");

    eignung(dir.path())
        .args([
            "practice",
            "--category",
            "language",
            "--difficulty",
            "easy",
            "--count",
            "5",
            "--seed",
            "8",
        ])
        .arg("--results")
        .arg(&results)
        .write_stdin("A\nB\nC\nD\nA\n")
        .assert()
        .success();

    eignung(dir.path())
        .arg("score")
        .arg("--results")
        .arg(&results)
        .args(["--difficulty", "easy", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Auswertung"));
}
