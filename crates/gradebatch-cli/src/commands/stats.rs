//! The `gradebatch stats` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebatch_core::report::EvaluationReport;

use super::print_statistics;

pub fn execute(report_path: PathBuf) -> Result<()> {
    let report = EvaluationReport::load_json(&report_path)?;

    if let Some(question) = &report.question {
        println!("Question: {question}");
    }
    println!(
        "Report {} ({}), marks out of {}",
        report.id,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.marks_out_of
    );

    print_statistics(&report);
    Ok(())
}
