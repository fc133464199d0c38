//! Report formatters
//!
//! Table, JSON, CSV, and one-line summary renderings of a report.

use anyhow::Result;
use std::fmt::Write;

use crate::models::{TestCaseReport, TestReport};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Renders reports in the selected format
pub struct ReportFormatter {
    format: OutputFormat,
}

impl ReportFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &TestReport) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Table => self.format_table(report),
            OutputFormat::Json => report.to_json()?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(report)?,
            OutputFormat::Csv => self.format_csv(report),
            OutputFormat::Summary => self.format_summary(report),
        })
    }

    fn duration_cell(case: &TestCaseReport) -> String {
        if case.is_measured() {
            format!("{:.0}ms", case.duration_ms)
        } else {
            "-".to_string()
        }
    }

    fn format_table(&self, report: &TestReport) -> String {
        let mut output = String::new();

        writeln!(output, "\n{:=^70}", format!(" {} ", report.info.name)).unwrap();
        writeln!(output, "System: {}", report.system.name).unwrap();
        writeln!(
            output,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
        .unwrap();
        writeln!(output, "{:-<70}", "").unwrap();

        for case in report.cases() {
            writeln!(
                output,
                "{} {:24} {:>9}  {}",
                case.outcome.symbol(),
                case.name,
                Self::duration_cell(case),
                case.message
            )
            .unwrap();
        }

        writeln!(output, "{:-<70}", "").unwrap();
        writeln!(
            output,
            "Total: {} | Pass: {} | Fail: {} | Pass Rate: {:.1}%",
            report.total(),
            report.passed(),
            report.failed(),
            report.pass_rate()
        )
        .unwrap();

        output
    }

    fn format_csv(&self, report: &TestReport) -> String {
        let mut output = String::from("name,outcome,duration_ms,message\n");
        for case in report.cases() {
            writeln!(
                output,
                "\"{}\",{},{},\"{}\"",
                case.name,
                case.outcome,
                case.duration_ms,
                case.message.replace('"', "\"\"")
            )
            .unwrap();
        }
        output
    }

    fn format_summary(&self, report: &TestReport) -> String {
        let verdict = if report.all_passed() { "PASS" } else { "FAIL" };
        format!(
            "{}: {} - {}/{} passed ({:.1}%)",
            verdict,
            report.info.name,
            report.passed(),
            report.total(),
            report.pass_rate()
        )
    }
}
