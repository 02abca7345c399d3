//! Stage A: a general-purpose analyzer run as a black box.
//!
//! The analyzer only ever sees source text and answers with free-text
//! diagnostic lines of the form `marker:line[:column]:message`, 1-based.
//! Those are converted to 0-based violations and filtered through the
//! active whitelist. Whatever goes wrong, the caller gets violations back,
//! never an error.

use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use clint_core::catalog::ViolationKind;
use clint_core::config::AnalyzerConfig;
use clint_core::types::{Position, Violation};
use clint_core::whitelist::WhitelistConfig;

/// Raw analyzer output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerOutput {
    /// Combined diagnostic text, one finding per line.
    pub text: String,
    /// Whether the analyzer itself claims to have found something.
    pub reported_findings: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("no analyzer command configured")]
    NotConfigured,
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("analyzer i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("analyzer exited with {status}: {stderr}")]
    Exited { status: String, stderr: String },
    #[error("analyzer reported findings but no line could be parsed")]
    Unparseable,
    #[error("analyzer killed after {0:?}")]
    TimedOut(Duration),
}

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// An external diagnostic tool (allows mocking in tests).
pub trait DiagnosticSource: Send + Sync {
    fn name(&self) -> &str;
    fn diagnose(&self, source: &str) -> Result<AnalyzerOutput, AnalyzerError>;
}

/// Runs pyflakes (or any tool with the same output shape) as a subprocess,
/// feeding the candidate source on stdin.
#[derive(Debug, Clone)]
pub struct PyflakesCommand {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl PyflakesCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: Duration::from_secs(AnalyzerConfig::default().timeout_seconds),
        }
    }

    /// Kill the analyzer if it is still running after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let (program, args) = config
            .command
            .split_first()
            .ok_or(AnalyzerError::NotConfigured)?;
        Ok(Self::new(program.clone(), args.to_vec())
            .with_timeout(Duration::from_secs(config.timeout_seconds.max(1))))
    }
}

impl Default for PyflakesCommand {
    fn default() -> Self {
        // AnalyzerConfig's default command is never empty.
        Self::from_config(&AnalyzerConfig::default())
            .unwrap_or_else(|_| Self::new("python3", vec!["-m".into(), "pyflakes".into()]))
    }
}

impl DiagnosticSource for PyflakesCommand {
    fn name(&self) -> &str {
        "pyflakes"
    }

    fn diagnose(&self, source: &str) -> Result<AnalyzerOutput, AnalyzerError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| AnalyzerError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let deadline = Instant::now() + self.timeout;

        // Pipes are serviced on their own threads so a full pipe cannot stall
        // the wait loop; killing the child closes them all.
        let (status, write_result, stdout, stderr) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut pipe) => pipe.write_all(source.as_bytes()),
                None => Ok(()),
            });
            let out_reader = scope.spawn(move || drain(stdout));
            let err_reader = scope.spawn(move || drain(stderr));
            let status = wait_until(&mut child, deadline);
            (
                status,
                join_io(writer.join()),
                join_io(out_reader.join()),
                join_io(err_reader.join()),
            )
        });

        let Some(status) = status? else {
            tracing::warn!(program = %self.program, timeout = ?self.timeout, "analyzer killed at deadline");
            return Err(AnalyzerError::TimedOut(self.timeout));
        };
        write_result?;
        let (stdout, stderr) = (stdout?, stderr?);

        let stdout = String::from_utf8_lossy(&stdout);
        let stderr = String::from_utf8_lossy(&stderr);
        match status.code() {
            Some(0) => Ok(AnalyzerOutput::default()),
            Some(1) => Ok(AnalyzerOutput {
                text: format!("{stdout}{stderr}"),
                reported_findings: true,
            }),
            _ => Err(AnalyzerError::Exited {
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            }),
        }
    }
}

fn drain<R: Read>(pipe: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

fn join_io<T>(joined: std::thread::Result<std::io::Result<T>>) -> std::io::Result<T> {
    joined.unwrap_or_else(|_| Err(std::io::Error::other("analyzer pipe thread panicked")))
}

/// Poll `child` until it exits or `deadline` passes. `None` means the child
/// was killed and reaped.
fn wait_until(child: &mut Child, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            // It may have exited since the last poll; kill then reports an error.
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use mock::MockAnalyzer;

#[cfg(any(test, feature = "test-support"))]
mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::{AnalyzerError, AnalyzerOutput, DiagnosticSource};

    /// Scripted analyzer for tests. Unscripted sources produce no findings.
    #[derive(Default)]
    pub struct MockAnalyzer {
        outputs: Mutex<HashMap<String, Result<String, String>>>,
        /// Number of `diagnose` calls so far.
        pub call_count: Mutex<usize>,
    }

    impl MockAnalyzer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Report `lines` (already in `marker:line:col:message` form) for `source`.
        pub fn set_output(&self, source: &str, lines: &str) {
            self.outputs
                .lock()
                .unwrap_or_else(|p| p.into_inner())
                .insert(source.to_string(), Ok(lines.to_string()));
        }

        /// Fail with `message` for `source`.
        pub fn set_failure(&self, source: &str, message: &str) {
            self.outputs
                .lock()
                .unwrap_or_else(|p| p.into_inner())
                .insert(source.to_string(), Err(message.to_string()));
        }

        pub fn calls(&self) -> usize {
            *self.call_count.lock().unwrap_or_else(|p| p.into_inner())
        }
    }

    impl DiagnosticSource for MockAnalyzer {
        fn name(&self) -> &str {
            "mock"
        }

        fn diagnose(&self, source: &str) -> Result<AnalyzerOutput, AnalyzerError> {
            *self.call_count.lock().unwrap_or_else(|p| p.into_inner()) += 1;
            let outputs = self.outputs.lock().unwrap_or_else(|p| p.into_inner());
            match outputs.get(source) {
                Some(Ok(text)) => Ok(AnalyzerOutput {
                    text: text.clone(),
                    reported_findings: !text.trim().is_empty(),
                }),
                Some(Err(message)) => Err(AnalyzerError::Exited {
                    status: "exit status: 2".to_string(),
                    stderr: message.clone(),
                }),
                None => Ok(AnalyzerOutput::default()),
            }
        }
    }
}

/// Parse one `marker:line[:column]:message` line into a 0-based violation.
pub fn parse_diagnostic_line(line: &str) -> Option<Violation> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (_marker, rest) = line.split_once(':')?;
    let (line_no, rest) = rest.split_once(':')?;
    let line_no: u32 = line_no.trim().parse().ok()?;

    let (column, message) = match rest.split_once(':') {
        Some((col, msg)) => match col.trim().parse::<u32>() {
            Ok(col) => (col, msg),
            Err(_) => (1, rest),
        },
        None => (1, rest),
    };
    let message = message.trim();
    if message.is_empty() {
        return None;
    }
    Some(Violation::error(
        message,
        Some(Position::new(line_no.saturating_sub(1), column.saturating_sub(1))),
    ))
}

/// Diagnostics from `output` that survive the whitelist.
pub fn collect_diagnostics(
    output: &AnalyzerOutput,
    whitelist: &WhitelistConfig,
) -> Result<Vec<Violation>, AnalyzerError> {
    let parsed: Vec<Violation> = output.text.lines().filter_map(parse_diagnostic_line).collect();
    if output.reported_findings && parsed.is_empty() {
        return Err(AnalyzerError::Unparseable);
    }
    Ok(parsed
        .into_iter()
        .filter(|v| !whitelist.suppresses(&v.message))
        .collect())
}

/// Run Stage A end to end. Failures become a single module-level violation.
pub fn run(source: &dyn DiagnosticSource, text: &str, whitelist: &WhitelistConfig) -> Vec<Violation> {
    let result = source
        .diagnose(text)
        .and_then(|output| collect_diagnostics(&output, whitelist));
    match result {
        Ok(violations) => {
            tracing::debug!(analyzer = source.name(), findings = violations.len(), "stage A complete");
            violations
        }
        Err(err) => {
            tracing::warn!(analyzer = source.name(), error = %err, "stage A failed");
            let detail = format!("{}: {err}", source.name());
            vec![ViolationKind::AnalyzerFailure.violation(Some(&detail), None)]
        }
    }
}
