//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use gradebatch_core::report::EvaluationReport;
use gradebatch_core::statistics::CohortStatistics;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from an evaluation report.
pub fn generate_html(report: &EvaluationReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>gradebatch report</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>gradebatch report</h1>\n");
    if let Some(question) = &report.question {
        html.push_str(&format!(
            "<p class=\"question\">{}</p>\n",
            html_escape(question)
        ));
    }
    html.push_str(&format!(
        "<p class=\"meta\">{} students | marks out of {} | {}</p>\n",
        report.results.len(),
        report.marks_out_of,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("<details>\n<summary>Reference answer</summary>\n");
    html.push_str(&format!(
        "<blockquote>{}</blockquote>\n",
        html_escape(&report.reference_answer)
    ));
    html.push_str("</details>\n");
    html.push_str("</header>\n");

    // Cohort dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Cohort</h2>\n");
    match report.statistics() {
        Some(stats) => html.push_str(&stat_cards(&stats, report.marks_out_of)),
        None => html.push_str("<p>No results.</p>\n"),
    }
    html.push_str("</section>\n");

    // Per-student results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Results</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Student ID</th><th onclick=\"sortTable(1)\">Answer</th><th onclick=\"sortTable(2)\">Semantic %</th><th onclick=\"sortTable(3)\">Keyword %</th><th onclick=\"sortTable(4)\">Grammar %</th><th onclick=\"sortTable(5)\">Final Score</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for r in &report.results {
        let band = r.band(report.marks_out_of);
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"answer\">{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}/{}</td></tr>\n",
            html_escape(&r.identifier),
            html_escape(&r.answer_text),
            r.semantic_pct,
            r.keyword_pct,
            r.grammar_pct,
            band.css_class(),
            r.final_score,
            report.marks_out_of
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &EvaluationReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn stat_cards(stats: &CohortStatistics, marks_out_of: u32) -> String {
    let cards = [
        ("Average", format!("{:.1}", stats.average)),
        ("Highest", stats.max.to_string()),
        ("Lowest", stats.min.to_string()),
        (
            "Above 70%",
            format!("{} of {}", stats.pass_count, stats.count),
        ),
    ];

    let mut out = String::from("<div class=\"cards\">\n");
    for (label, value) in cards {
        out.push_str(&format!(
            "  <div class=\"card\"><span class=\"value\">{value}</span><span class=\"label\">{label}</span></div>\n"
        ));
    }
    out.push_str("</div>\n");
    out.push_str(&format!(
        "<p class=\"meta\">Scores out of {marks_out_of}.</p>\n"
    ));
    out
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --excellent: #dcfce7; --good: #dbeafe; --fair: #fef3c7; --needs-work: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --excellent: #064e3b; --good: #1e3a8a; --fair: #78350f; --needs-work: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.question { font-size: 1.2rem; font-weight: 600; }
.cards { display: flex; gap: 1rem; flex-wrap: wrap; }
.card { border: 1px solid var(--border); border-radius: 8px; padding: 1rem 1.5rem; display: flex; flex-direction: column; min-width: 8rem; }
.card .value { font-size: 1.8rem; font-weight: bold; }
.card .label { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background: var(--border); cursor: pointer; }
td.answer { max-width: 40rem; white-space: pre-wrap; }
.excellent { background: var(--excellent); }
.good { background: var(--good); }
.fair { background: var(--fair); }
.needs-work { background: var(--needs-work); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  const key = cell => {
    const n = parseFloat(cell.textContent);
    return isNaN(n) ? cell.textContent : n;
  };
  rows.sort((a, b) => {
    const va = key(a.cells[col]);
    const vb = key(b.cells[col]);
    if (typeof va === 'number' && typeof vb === 'number') {
      return asc ? va - vb : vb - va;
    }
    return asc ? String(va).localeCompare(String(vb)) : String(vb).localeCompare(String(va));
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
