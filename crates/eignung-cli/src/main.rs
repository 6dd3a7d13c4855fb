//! eignung CLI: terminal trainer for the Justizfachwirt aptitude test.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "eignung", version, about = "Aptitude test trainer")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List subject areas, composites and their question kinds
    Categories,

    /// Generate a test and print it
    Generate {
        /// Subject area or composite (e.g. "logic", "Zahlenreihen", "full-test")
        #[arg(long, default_value = "mixed")]
        category: String,

        /// Difficulty tier: easy, medium, hard, expert
        #[arg(long)]
        difficulty: Option<String>,

        /// Number of questions
        #[arg(long)]
        count: Option<usize>,

        /// Seed for reproducible tests
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Print the solution below each question
        #[arg(long)]
        answers: bool,
    },

    /// Take a test interactively on stdin
    Practice {
        /// Subject area or composite
        #[arg(long, default_value = "mixed")]
        category: String,

        /// Difficulty tier: easy, medium, hard, expert
        #[arg(long)]
        difficulty: Option<String>,

        /// Number of questions
        #[arg(long)]
        count: Option<usize>,

        /// Seed for reproducible tests
        #[arg(long)]
        seed: Option<u64>,

        /// Seconds per question before an answer counts as wrong
        #[arg(long)]
        time_limit: Option<f64>,

        /// Write the score report as JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write the attempt records as JSON
        #[arg(long)]
        results: Option<PathBuf>,
    },

    /// Self-check every generator at every tier, or a generated test file
    Validate {
        /// Questions generated per kind and tier
        #[arg(long, default_value = "20")]
        samples: usize,

        /// Seed for the self-check
        #[arg(long)]
        seed: Option<u64>,

        /// Validate a test written by `generate --format json` instead
        #[arg(long)]
        test: Option<PathBuf>,
    },

    /// Score a JSON list of attempt records
    Score {
        /// Attempt records JSON
        #[arg(long)]
        results: PathBuf,

        /// Difficulty tier the attempt was taken at
        #[arg(long)]
        difficulty: Option<String>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter config
    Init,
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("eignung=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Categories => commands::categories::execute(),
        Commands::Generate {
            category,
            difficulty,
            count,
            seed,
            format,
            answers,
        } => commands::generate::execute(
            category, difficulty, count, seed, format, answers, config,
        ),
        Commands::Practice {
            category,
            difficulty,
            count,
            seed,
            time_limit,
            report,
            results,
        } => commands::practice::execute(
            category, difficulty, count, seed, time_limit, report, results, config,
        ),
        Commands::Validate {
            samples,
            seed,
            test,
        } => commands::validate::execute(samples, seed, test),
        Commands::Score {
            results,
            difficulty,
            format,
        } => commands::score::execute(results, difficulty, format, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
