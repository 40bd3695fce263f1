//! The `gradebatch evaluate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use gradebatch_core::ingest::read_answers_file;
use gradebatch_core::report::EvaluationReport;
use gradebatch_core::{BulkEvaluationSession, Submission};
use gradebatch_report::csv;
use gradebatch_report::{write_csv_report, write_html_report};
use gradebatch_scoring::{create_service, load_config_from};

use super::{print_results, print_statistics, resolve_reference};

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    csv_path: PathBuf,
    reference: Option<String>,
    reference_file: Option<PathBuf>,
    marks_out_of: Option<u32>,
    question: Option<String>,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    debug!(service = ?config.service, output = %config.output_dir.display(), "config loaded");
    let marks_out_of = marks_out_of.unwrap_or(config.default_marks_out_of);
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let formats = parse_formats(&format)?;
    let reference = resolve_reference(reference, reference_file)?;
    let csv_text = read_answers_file(&csv_path)?;

    let mut submission = Submission::bulk(reference, csv_text).with_marks_out_of(marks_out_of);
    if let Some(q) = question {
        submission = submission.with_question(q);
    }

    let service = create_service(&config.service);
    eprintln!(
        "gradebatch v{} - Evaluating {} via {}",
        env!("CARGO_PKG_VERSION"),
        csv_path.display(),
        service.name()
    );

    let mut session = BulkEvaluationSession::new();
    let report = session.submit(service.as_ref(), &submission).await?;

    eprintln!(
        "Scored {} answers in {:.1}s",
        report.results.len(),
        report.duration_ms as f64 / 1000.0
    );
    print_results(report);
    print_statistics(report);

    save_outputs(report, &output, &formats)
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Json,
    Html,
}

fn parse_formats(format: &str) -> Result<Vec<ExportFormat>> {
    if format.trim() == "all" {
        return Ok(vec![ExportFormat::Csv, ExportFormat::Json, ExportFormat::Html]);
    }

    let mut formats = Vec::new();
    for name in format.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let fmt = match name {
            "csv" => ExportFormat::Csv,
            "json" => ExportFormat::Json,
            "html" => ExportFormat::Html,
            other => anyhow::bail!("unknown output format '{other}' (expected csv, json, html or all)"),
        };
        if !formats.contains(&fmt) {
            formats.push(fmt);
        }
    }
    anyhow::ensure!(!formats.is_empty(), "at least one output format is required");
    Ok(formats)
}

fn save_outputs(report: &EvaluationReport, output: &Path, formats: &[ExportFormat]) -> Result<()> {
    std::fs::create_dir_all(output)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S%.3f").to_string();

    for fmt in formats {
        match fmt {
            ExportFormat::Csv => {
                let path = output.join(csv::file_name(&timestamp));
                write_csv_report(&report.results, &path)?;
                eprintln!("CSV export: {}", path.display());
            }
            ExportFormat::Json => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            ExportFormat::Html => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
        }
    }

    Ok(())
}
