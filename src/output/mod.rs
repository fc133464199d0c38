//! Report output
//!
//! Formats a finished report and hands it to its sink (stdout or a file).

mod formatter;

pub use formatter::{OutputFormat, ReportFormatter};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::models::TestReport;

/// Render the report and write it to the chosen sink.
pub fn emit(report: &TestReport, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let rendered = ReportFormatter::new(format).format_report(report)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
