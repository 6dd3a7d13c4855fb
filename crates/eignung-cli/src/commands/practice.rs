//! The `eignung practice` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use eignung_core::assembler::Assembler;
use eignung_core::config::load_config_from;
use eignung_core::model::{Selection, Submission};
use eignung_core::report::save_records;
use eignung_core::session::Session;

use crate::render;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    category: String,
    difficulty: Option<String>,
    count: Option<usize>,
    seed: Option<u64>,
    time_limit: Option<f64>,
    report_path: Option<PathBuf>,
    results_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let difficulty = super::resolve_difficulty(difficulty, &config)?;
    let count = config.clamp_count(count.unwrap_or(config.default_count));
    let selection: Selection = category.parse()?;

    let mut rng = super::make_rng(seed);
    let test = Assembler::default().assemble(selection, difficulty, count, &mut rng)?;

    let mut session = Session::new(test);
    if let Some(limit) = time_limit
        .or(config.seconds_per_question)
        .filter(|s| *s > 0.0)
    {
        session = session.with_time_limit(limit);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(
        &mut session,
        stdin.lock(),
        stdout.lock(),
        config.scoring.time_bonus_base,
    )?;

    let report = session.finish_with(&config.scoring)?;
    println!("{}", render::report(&report));

    if let Some(path) = report_path {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }
    if let Some(path) = results_path {
        save_records(session.records(), &path)?;
        eprintln!("Results saved to: {}", path.display());
    }

    Ok(())
}

/// Clears the terminal and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn read_answer<R: BufRead>(input: &mut R, line: &mut String) -> Result<bool> {
    line.clear();
    let read = input.read_line(line).context("failed to read answer")?;
    Ok(read > 0)
}

fn skip_remaining<W: Write>(session: &mut Session, out: &mut W, unanswered_secs: f64) -> Result<()> {
    writeln!(out)?;
    let mut skipped = 0;
    while !session.is_complete() {
        session.skip(Some(unanswered_secs))?;
        skipped += 1;
    }
    writeln!(out, "Eingabe beendet, {skipped} Frage(n) unbeantwortet.")?;
    Ok(())
}

/// Ask every remaining question of `session` on `input`.
///
/// Recall material is shown on its own and cleared once the user presses
/// Enter. Questions left when the input ends are recorded as unanswered with
/// `unanswered_secs` elapsed.
fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut out: W,
    unanswered_secs: f64,
) -> Result<()> {
    let mut line = String::new();

    while let Some(q) = session.current() {
        let (answered, total) = session.progress();

        if let Some(material) = render::memorize(q) {
            writeln!(out, "Frage {}/{total}\n{material}", answered + 1)?;
            write!(out, "Weiter mit Enter ")?;
            out.flush()?;
            if !read_answer(&mut input, &mut line)? {
                skip_remaining(session, &mut out, unanswered_secs)?;
                break;
            }
            write!(out, "{CLEAR_SCREEN}")?;
        }

        writeln!(out, "{}", render::question(answered, total, q))?;
        write!(out, "Antwort ({}): ", render::input_hint(q))?;
        out.flush()?;
        let solution = render::solution(q);

        let started = Instant::now();
        let more = read_answer(&mut input, &mut line)?;
        let elapsed = started.elapsed().as_secs_f64();

        if !more {
            skip_remaining(session, &mut out, unanswered_secs)?;
            break;
        }

        let raw = line.trim_end_matches(['\r', '\n']).to_string();
        let verdict = session.submit(&Submission::Text(raw), Some(elapsed))?;
        let timed_out = session.time_limit().is_some_and(|limit| elapsed > limit);

        if verdict.is_correct {
            writeln!(out, "✓ Richtig")?;
        } else {
            let mut msg = "✗ Falsch".to_string();
            if timed_out {
                msg.push_str(" (Zeit überschritten)");
            }
            if let Some(solution) = solution {
                msg.push_str(&format!(". Lösung: {solution}"));
            }
            writeln!(out, "{msg}")?;
        }
        writeln!(out, "  {}\n", verdict.explanation)?;
    }

    Ok(())
}
