use clint_core::types::{CheckResult, Severity, Violation};

use crate::{FileReport, OutputFormatter};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        let mut out = String::new();
        for v in result.violations() {
            out.push_str(&format_violation(v, None));
        }
        out
    }

    fn format_reports(&self, reports: &[FileReport]) -> String {
        let mut out = String::new();
        let mut failed = 0;
        let mut total = 0;
        for report in reports {
            let violations = report.result.violations();
            if violations.is_empty() {
                continue;
            }
            failed += 1;
            total += violations.len();
            for v in violations {
                out.push_str(&format_violation(v, Some(&report.file)));
            }
        }

        if failed > 0 {
            out.push_str(&format!(
                "\n{} violation(s) in {} of {} file(s)\n",
                total,
                failed,
                reports.len(),
            ));
        }
        out
    }
}

/// `error[S2]: text` followed by a location line. Positions are shown
/// 1-based; module-level findings point at the file alone.
fn format_violation(v: &Violation, file: Option<&str>) -> String {
    let severity = match v.severity {
        Severity::Error => "error",
    };
    let mut out = match split_code(&v.message) {
        Some((code, text)) => format!("{severity}[{code}]: {text}\n"),
        None => format!("{severity}: {}\n", v.message),
    };

    let location = match (file, v.position) {
        (Some(f), Some(p)) => Some(format!("{}:{}:{}", f, p.line + 1, p.column + 1)),
        (Some(f), None) => Some(f.to_string()),
        (None, Some(p)) => Some(format!("line {}, column {}", p.line + 1, p.column + 1)),
        (None, None) => None,
    };
    if let Some(location) = location {
        out.push_str(&format!("  --> {location}\n"));
    }
    out
}

/// Catalog messages look like `S12- text`.
fn split_code(message: &str) -> Option<(&str, &str)> {
    let (code, text) = message.split_once("- ")?;
    let is_code = code.len() >= 2
        && code.starts_with(|c: char| c.is_ascii_uppercase())
        && code[1..].bytes().all(|b| b.is_ascii_digit());
    is_code.then_some((code, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_reports_print_nothing() {
        let reports = vec![FileReport::new("a.py", CheckResult::clean())];
        assert_eq!(HumanFormatter.format_reports(&reports), "");
    }

    #[test]
    fn test_catalog_violation_with_position() {
        let result = CheckResult::single(Violation::at(
            "S2- Illicit use of '_' before or after a name : _temp",
            2,
            4,
        ));
        let out = HumanFormatter.format_reports(&[FileReport::new("token.py", result)]);
        assert!(out.starts_with("error[S2]: Illicit use of '_' before or after a name : _temp\n"));
        assert!(out.contains("  --> token.py:3:5\n"));
        assert!(out.ends_with("1 violation(s) in 1 of 1 file(s)\n"));
    }

    #[test]
    fn test_stage_a_message_has_no_code() {
        let result = CheckResult::single(Violation::at("undefined name 'foo'", 0, 0));
        assert_eq!(
            HumanFormatter.format_check(&result),
            "error: undefined name 'foo'\n  --> line 1, column 1\n"
        );
    }

    #[test]
    fn test_module_level_points_at_file() {
        let result = CheckResult::single(Violation::module_level(
            "S12- No valid contracting decorator found",
        ));
        let out = HumanFormatter.format_reports(&[FileReport::new("a.py", result)]);
        assert!(out.contains("error[S12]: No valid contracting decorator found\n  --> a.py\n"));
    }

    #[test]
    fn test_split_code() {
        assert_eq!(split_code("E1- Syntax error"), Some(("E1", "Syntax error")));
        assert_eq!(split_code("multi- word"), None);
        assert_eq!(split_code("no code here"), None);
    }
}
