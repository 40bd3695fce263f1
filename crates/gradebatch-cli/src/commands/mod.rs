pub mod evaluate;
pub mod init;
pub mod score;
pub mod stats;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use gradebatch_core::report::EvaluationReport;

/// Read the reference answer from the flag or the file, whichever was given.
pub(crate) fn resolve_reference(
    reference: Option<String>,
    reference_file: Option<PathBuf>,
) -> Result<String> {
    match (reference, reference_file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read reference answer: {}", path.display())),
        (None, None) => anyhow::bail!("one of --reference or --reference-file is required"),
    }
}

/// Shorten long answers for table display.
fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

pub(crate) fn print_results(report: &EvaluationReport) {
    let mut table = Table::new();
    table.set_header(vec![
        "Student ID",
        "Answer Preview",
        "Semantic %",
        "Keyword %",
        "Grammar %",
        "Final Score",
        "Band",
    ]);

    for r in &report.results {
        table.add_row(vec![
            Cell::new(&r.identifier),
            Cell::new(preview(&r.answer_text, 40)),
            Cell::new(r.semantic_pct),
            Cell::new(r.keyword_pct),
            Cell::new(r.grammar_pct),
            Cell::new(format!("{}/{}", r.final_score, report.marks_out_of)),
            Cell::new(r.band(report.marks_out_of)),
        ]);
    }

    println!("{table}");
}

pub(crate) fn print_statistics(report: &EvaluationReport) {
    let Some(stats) = report.statistics() else {
        println!("No results to summarize.");
        return;
    };

    let mut table = Table::new();
    table.set_header(vec!["Students", "Average", "Highest", "Lowest", "Above 70%"]);
    table.add_row(vec![
        Cell::new(stats.count),
        Cell::new(format!("{:.1}", stats.average)),
        Cell::new(stats.max),
        Cell::new(stats.min),
        Cell::new(stats.pass_count),
    ]);

    println!("{table}");
}
