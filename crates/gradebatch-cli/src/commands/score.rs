//! The `gradebatch score` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebatch_core::{evaluate, Submission};
use gradebatch_scoring::{create_service, load_config_from};

use super::resolve_reference;

pub async fn execute(
    answer: String,
    reference: Option<String>,
    reference_file: Option<PathBuf>,
    marks_out_of: Option<u32>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let marks_out_of = marks_out_of.unwrap_or(config.default_marks_out_of);
    let reference = resolve_reference(reference, reference_file)?;

    let submission = Submission::single(reference, answer).with_marks_out_of(marks_out_of);
    let service = create_service(&config.service);
    let report = evaluate(service.as_ref(), &submission).await?;

    let Some(result) = report.results.first() else {
        anyhow::bail!("scoring service returned no result");
    };

    println!("Semantic similarity: {}%", result.semantic_pct);
    println!("Keyword overlap:     {}%", result.keyword_pct);
    println!("Grammar:             {}%", result.grammar_pct);
    println!(
        "Final score:         {}/{} ({})",
        result.final_score,
        marks_out_of,
        result.band(marks_out_of)
    );

    Ok(())
}
