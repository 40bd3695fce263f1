//! CSV answer ingestion.
//!
//! The header row only establishes that at least two columns exist. Column 0
//! is always the identifier and column 1 the answer text, whatever the header
//! labels say. Further columns are ignored.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::InputError;
use crate::model::AnswerRecord;

/// Outcome of scanning a CSV blob.
#[derive(Debug, Clone, Default)]
pub struct CsvScan {
    /// Usable records in file order.
    pub records: Vec<AnswerRecord>,
    /// Non-empty rows dropped for a blank identifier or answer.
    pub skipped_rows: usize,
}

/// Parse CSV text into answer records, failing if none are usable.
pub fn parse_answers(text: &str) -> std::result::Result<Vec<AnswerRecord>, InputError> {
    let scan = scan_answers(text)?;
    if scan.records.is_empty() {
        return Err(InputError::EmptyDataset);
    }
    Ok(scan.records)
}

/// Parse CSV text leniently, reporting how many rows were dropped.
///
/// Only tokenizer failures are errors here. A header with fewer than two
/// columns produces an empty scan rather than an error.
pub fn scan_answers(text: &str) -> std::result::Result<CsvScan, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let width = reader
        .headers()
        .map_err(|e| InputError::MalformedCsv(e.to_string()))?
        .len();

    let mut scan = CsvScan::default();
    if width < 2 {
        debug!(width, "header has fewer than two columns");
        return Ok(scan);
    }

    for row in reader.records() {
        let row = row.map_err(|e| InputError::MalformedCsv(e.to_string()))?;

        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let identifier = row.get(0).map(str::trim).unwrap_or_default();
        let answer = row.get(1).map(str::trim).unwrap_or_default();

        if identifier.is_empty() || answer.is_empty() {
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            debug!(line, "dropping row with blank identifier or answer");
            scan.skipped_rows += 1;
            continue;
        }

        scan.records.push(AnswerRecord::new(identifier, answer));
    }

    Ok(scan)
}

/// Read an answers CSV from disk.
pub fn read_answers_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(InputError::MissingFile(path.to_path_buf()).into());
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))
}

/// An identifier that occurs on more than one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateIdentifier {
    pub identifier: String,
    /// 1-based positions within the record sequence.
    pub positions: Vec<usize>,
}

/// List identifiers that appear more than once, in order of first appearance.
pub fn duplicate_identifiers(records: &[AnswerRecord]) -> Vec<DuplicateIdentifier> {
    let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut order = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let entry = positions.entry(record.identifier.as_str()).or_default();
        if entry.is_empty() {
            order.push(record.identifier.as_str());
        }
        entry.push(i + 1);
    }

    order
        .into_iter()
        .filter_map(|id| {
            let seen = positions.remove(id)?;
            (seen.len() > 1).then(|| DuplicateIdentifier {
                identifier: id.to_string(),
                positions: seen,
            })
        })
        .collect()
}
