//! Terminal rendering of questions and reports.

use comfy_table::{Cell, Table};

use eignung_core::evaluator::{rule_for, EvalRule};
use eignung_core::model::{option_letter, Answer, Payload, Question, QuestionKind};
use eignung_core::scoring::ScoreReport;

fn option_lines(options: &[String]) -> Vec<String> {
    options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("  {}) {o}", option_letter(i)))
        .collect()
}

fn payload_lines(payload: &Payload) -> Vec<String> {
    match payload {
        Payload::Sequence { terms, .. } => {
            let mut shown: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
            shown.push("?".to_string());
            vec![format!("  {}", shown.join(", "))]
        }
        Payload::Grid { cells, options, .. } => {
            let mut lines: Vec<String> = cells
                .iter()
                .map(|row| {
                    let row: Vec<String> =
                        row.iter().map(|c| format!("{:>4}", c.to_string())).collect();
                    format!("  {}", row.join(""))
                })
                .collect();
            if !options.is_empty() {
                lines.push(String::new());
                lines.extend(option_lines(options));
            }
            lines
        }
        Payload::Premises { premises, options } => {
            let mut lines: Vec<String> = premises.iter().map(|p| format!("  {p}")).collect();
            lines.push(String::new());
            lines.extend(option_lines(options));
            lines
        }
        Payload::Symbols {
            sequence, options, ..
        } => {
            let mut lines = vec![format!("  {}  ?", sequence.join("  "))];
            lines.extend(option_lines(options));
            lines
        }
        Payload::Net { rows, options, .. } => {
            let mut lines: Vec<String> = rows.iter().map(|r| format!("  {r}")).collect();
            lines.extend(option_lines(options));
            lines
        }
        Payload::Choices { context, options } => {
            let mut lines = Vec::new();
            if let Some(text) = context {
                lines.push(format!("  »{text}«"));
            }
            lines.extend(option_lines(options));
            lines
        }
        Payload::Analogy { options, .. } => option_lines(options),
        Payload::Dictation { text } => vec![format!("  {text}")],
        Payload::Cube { .. }
        | Payload::Folding { .. }
        | Payload::Pieces { .. }
        | Payload::Arithmetic { .. }
        | Payload::Recall { .. }
        | Payload::Count { .. } => Vec::new(),
    }
}

/// Question header, prompt and payload.
pub fn question(index: usize, total: usize, q: &Question) -> String {
    let mut out = format!(
        "Frage {}/{} [{}, {}]\n{}\n",
        index + 1,
        total,
        q.category().label(),
        q.kind(),
        q.prompt()
    );
    for line in payload_lines(q.payload()) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Material to memorize before a recall question is shown.
pub fn memorize(q: &Question) -> Option<String> {
    let Payload::Recall { items, .. } = q.payload() else {
        return None;
    };
    let lines: Vec<String> = match q.kind() {
        QuestionKind::DigitSpan => {
            let digits: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
            vec![format!("  {}", digits.join(" "))]
        }
        QuestionKind::NameRecall => items
            .iter()
            .map(|i| format!("  {} – Raum {}", i.key, i.value))
            .collect(),
        _ => items
            .iter()
            .map(|i| format!("  {}: {}", i.key, i.value))
            .collect(),
    };
    Some(format!("Merken Sie sich:\n{}\n", lines.join("\n")))
}

/// What the user is expected to type.
pub fn input_hint(q: &Question) -> &'static str {
    match rule_for(q.kind()) {
        EvalRule::Numeric { .. } => "Zahl",
        EvalRule::SingleChoice => "Buchstabe",
        EvalRule::MultiChoice => "alle zutreffenden Buchstaben, z. B. A, C",
        EvalRule::TextRecall => "Text",
        EvalRule::OpenEnded => "freier Text",
    }
}

/// The stored solution, or `None` for open-ended questions.
pub fn solution(q: &Question) -> Option<String> {
    match q.answer() {
        Answer::Open => None,
        answer => Some(answer.to_string()),
    }
}

/// Summary and per-category tables of a report.
pub fn report(report: &ScoreReport) -> String {
    if report.is_empty() {
        return "Keine Antworten vorhanden.".to_string();
    }

    let mut summary = Table::new();
    summary.set_header(vec!["Wert", "Ergebnis"]);
    summary.add_row(vec![
        Cell::new("Richtig"),
        Cell::new(format!("{} von {}", report.correct, report.total)),
    ]);
    summary.add_row(vec![Cell::new("Basis"), Cell::new(format!("{:.1}", report.base))]);
    summary.add_row(vec![
        Cell::new("Ø Zeit"),
        Cell::new(
            report
                .average_secs
                .map(|s| format!("{s:.1} s"))
                .unwrap_or_else(|| "–".to_string()),
        ),
    ]);
    summary.add_row(vec![
        Cell::new("Zeitbonus"),
        Cell::new(format!("{:.1}", report.time_bonus)),
    ]);
    summary.add_row(vec![
        Cell::new(format!(
            "Schwierigkeitsbonus ({}, ×{:.1})",
            report.difficulty.label(),
            report.multiplier
        )),
        Cell::new(format!("{:.1}", report.difficulty_bonus)),
    ]);
    summary.add_row(vec![
        Cell::new("Endpunktzahl"),
        Cell::new(format!("{:.1}", report.final_score)),
    ]);
    summary.add_row(vec![
        Cell::new("Note"),
        Cell::new(format!(
            "{} {} ({})",
            report.grade.label(),
            report.grade.symbol(),
            report.grade.school_grade()
        )),
    ]);

    let mut categories = Table::new();
    categories.set_header(vec!["Kategorie", "Richtig", "Quote"]);
    for c in &report.categories {
        categories.add_row(vec![
            Cell::new(c.category.label()),
            Cell::new(format!("{}/{}", c.correct, c.total)),
            Cell::new(format!("{:.0}%", c.rate * 100.0)),
        ]);
    }

    let mut out = format!("{summary}\n\n{categories}\n");
    if !report.strong.is_empty() {
        let names: Vec<&str> = report.strong.iter().map(|c| c.label()).collect();
        out.push_str(&format!("\nStärken: {}\n", names.join(", ")));
    }
    if !report.weak.is_empty() {
        let names: Vec<&str> = report.weak.iter().map(|c| c.label()).collect();
        out.push_str(&format!("Schwächen: {}\n", names.join(", ")));
    }
    out.push_str("\nLernplan:\n");
    for step in &report.study_plan {
        out.push_str(&format!("  - {step}\n"));
    }
    out
}
