//! gradebatch-report: CSV and HTML export of evaluation reports.

pub mod csv;
pub mod html;

pub use csv::{export_csv, write_csv_report};
pub use html::{generate_html, write_html_report};
