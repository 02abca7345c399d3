use clint_core::types::CheckResult;
use serde::Serialize;

use crate::{FileReport, OutputFormatter};

pub struct JsonFormatter;

#[derive(Serialize)]
struct ReportSet<'a> {
    success: bool,
    files: &'a [FileReport],
}

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }

    fn format_reports(&self, reports: &[FileReport]) -> String {
        let set = ReportSet {
            success: reports.iter().all(|r| r.result.success()),
            files: reports,
        };
        serde_json::to_string_pretty(&set).unwrap_or_default()
    }
}
