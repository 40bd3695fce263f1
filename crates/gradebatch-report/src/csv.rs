//! CSV export of a cohort's results.
//!
//! The answer field is always wrapped in double quotes and every other field
//! is emitted bare. Embedded double quotes in answers are written as-is;
//! downstream consumers rely on this exact format.

use std::path::Path;

use anyhow::{Context, Result};

use gradebatch_core::model::NormalizedResult;

/// Fixed header row.
pub const HEADER: [&str; 6] = [
    "Student ID",
    "Answer",
    "Semantic Score (%)",
    "Keyword Score (%)",
    "Grammar Score (%)",
    "Final Score",
];

/// Stem of exported results files.
pub const FILE_STEM: &str = "evaluation_results";

/// File name for one run's export, so earlier runs are never overwritten.
pub fn file_name(timestamp: &str) -> String {
    format!("{FILE_STEM}-{timestamp}.csv")
}

/// Render results as CSV text, one row per result in list order.
///
/// Numbers are printed in shortest round-trip form (`80`, `8.4`, `67.89`);
/// no further rounding happens here.
pub fn export_csv(results: &[NormalizedResult]) -> String {
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(HEADER.join(","));

    for r in results {
        lines.push(format!(
            "{},\"{}\",{},{},{},{}",
            r.identifier, r.answer_text, r.semantic_pct, r.keyword_pct, r.grammar_pct, r.final_score
        ));
    }

    lines.join("\n")
}

/// Write the CSV export to a file.
pub fn write_csv_report(results: &[NormalizedResult], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, export_csv(results))
        .with_context(|| format!("failed to write CSV export to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebatch_core::ingest::parse_answers;

    fn result(id: &str, answer: &str, final_score: f64) -> NormalizedResult {
        NormalizedResult {
            identifier: id.into(),
            answer_text: answer.into(),
            semantic_pct: 67.89,
            keyword_pct: 80.0,
            grammar_pct: 20.5,
            final_score,
        }
    }

    #[test]
    fn header_and_rows() {
        let csv = export_csv(&[result("S1", "Paris", 8.42), result("S2", "Lyon", 1.0)]);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Student ID,Answer,Semantic Score (%),Keyword Score (%),Grammar Score (%),Final Score"
        );
        assert_eq!(lines[1], "S1,\"Paris\",67.89,80,20.5,8.42");
        assert_eq!(lines[2], "S2,\"Lyon\",67.89,80,20.5,1");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn answer_is_always_quoted() {
        let csv = export_csv(&[result("S1", "no commas here", 5.0)]);
        assert!(csv.contains(",\"no commas here\","));
    }

    #[test]
    fn embedded_quotes_are_not_escaped() {
        let csv = export_csv(&[result("S1", "he said \"hi\"", 5.0)]);
        assert!(csv.contains(",\"he said \"hi\"\","));
    }

    #[test]
    fn empty_results_is_header_only() {
        assert_eq!(export_csv(&[]), HEADER.join(","));
    }

    #[test]
    fn reingest_reproduces_identifiers_and_answers() {
        let results = vec![
            result("S1", "Paris, the capital", 9.0),
            result("S2", "multi\nline answer", 4.5),
            result("007", "plain", 0.0),
        ];
        let records = parse_answers(&export_csv(&results)).unwrap();
        assert_eq!(records.len(), results.len());
        for (record, original) in records.iter().zip(&results) {
            assert_eq!(record.identifier, original.identifier);
            assert_eq!(record.answer_text, original.answer_text);
        }
    }

    #[test]
    fn file_name_carries_timestamp() {
        assert_eq!(
            file_name("2024-05-01T120000.123"),
            "evaluation_results-2024-05-01T120000.123.csv"
        );
    }

    #[test]
    fn write_to_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join(file_name("2024-05-01T120000.000"));
        write_csv_report(&[result("S1", "Paris", 8.0)], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Student ID,"));
    }
}
