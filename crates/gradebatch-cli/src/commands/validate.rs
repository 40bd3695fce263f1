//! The `gradebatch validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebatch_core::ingest::{duplicate_identifiers, read_answers_file, scan_answers};
use gradebatch_core::InputError;

pub fn execute(csv_path: PathBuf) -> Result<()> {
    let text = read_answers_file(&csv_path)?;
    let scan = scan_answers(&text)?;

    if scan.records.is_empty() {
        return Err(InputError::EmptyDataset.into());
    }

    println!(
        "Answers file: {} ({} usable rows)",
        csv_path.display(),
        scan.records.len()
    );

    let mut total_warnings = 0;

    if scan.skipped_rows > 0 {
        println!(
            "  WARNING: {} row(s) skipped for a missing student ID or answer",
            scan.skipped_rows
        );
        total_warnings += 1;
    }

    for dup in duplicate_identifiers(&scan.records) {
        let rows = dup
            .positions
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  [{}] WARNING: appears {} times (records {rows})",
            dup.identifier,
            dup.positions.len()
        );
        total_warnings += 1;
    }

    if total_warnings == 0 {
        println!("All rows valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
