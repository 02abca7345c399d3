use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use clint_core::config::ClintConfig;
use clint_core::whitelist::WhitelistConfig;
use clint_enforce::{Linter, PyflakesCommand, RuleEngine};
use clint_output::{FileReport, OutputFormatter};

/// Run `clint check <paths>`.
///
/// Exit codes: 0 when every file passes, 1 when any file has violations,
/// 2 when a path could not be read or the analyzer is misconfigured.
pub fn run(
    formatter: &dyn OutputFormatter,
    config: &ClintConfig,
    paths: &[PathBuf],
    rules_only: bool,
    whitelist: Option<Vec<String>>,
) -> i32 {
    let files = match collect_files(paths) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("clint check: {e}");
            return 2;
        }
    };
    if files.is_empty() {
        eprintln!("clint check: no Python files found");
        return 2;
    }

    let linter = if rules_only {
        Linter::new(
            RuleEngine::with_config(&config.rules),
            Arc::new(PyflakesCommand::default()),
        )
    } else {
        match Linter::from_config(config) {
            Ok(linter) => linter,
            Err(e) => {
                eprintln!("clint check: {e}");
                return 2;
            }
        }
    };
    let whitelist = match whitelist {
        Some(patterns) => WhitelistConfig::from_patterns(patterns),
        None => config.whitelist(),
    };

    let mut reports = Vec::with_capacity(files.len());
    let mut read_errors = 0;
    for file in &files {
        let bytes = match std::fs::read(file) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("clint check: failed to read {}: {e}", file.display());
                read_errors += 1;
                continue;
            }
        };
        let source = String::from_utf8_lossy(&bytes);
        let result = if rules_only {
            linter.lint_rules_only(&source)
        } else {
            linter.lint_blocking(&source, &whitelist)
        };
        tracing::debug!(
            file = %file.display(),
            violations = result.violations().len(),
            "checked"
        );
        reports.push(FileReport::new(file.display().to_string(), result));
    }

    let out = formatter.format_reports(&reports);
    if !out.is_empty() {
        print!("{out}");
        if !out.ends_with('\n') {
            println!();
        }
    }

    if read_errors > 0 {
        2
    } else if reports.iter().any(|r| !r.result.success()) {
        1
    } else {
        0
    }
}

/// Expand `paths` into the Python files to lint, in a stable order.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let entries = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_python(e.path()));
            files.extend(entries.map(|e| e.into_path()));
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(format!("{}: no such file or directory", path.display()));
        }
    }
    Ok(files)
}

fn is_python(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("py")
}
