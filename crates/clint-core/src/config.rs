//! Configuration file loading for clint.
//!
//! Reads `clint.json` and provides typed access to all settings.
//! Falls back to defaults when the config file is missing or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::vocab::DEFAULT_WHITELIST_PATTERNS;
use crate::whitelist::WhitelistConfig;

pub const CONFIG_FILE_NAME: &str = "clint.json";

/// Top-level clint configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClintConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub whitelist: WhitelistSection,
    #[serde(default)]
    pub rules: RulesConfig,
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on the encoded request body.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Upper bound on the decoded source text handed to the linter.
    #[serde(default = "default_max_source_bytes")]
    pub max_source_bytes: usize,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

/// External analyzer invocation: program followed by its arguments.
/// The candidate source is written to the program's stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_analyzer_command")]
    pub command: Vec<String>,
    /// The analyzer process is killed once this has elapsed.
    #[serde(default = "default_analyzer_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhitelistSection {
    #[serde(default = "default_whitelist_patterns")]
    pub patterns: Vec<String>,
}

/// Rule engine limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}
fn default_max_source_bytes() -> usize {
    1_000_000
}
fn default_request_timeout_seconds() -> u64 {
    30
}
fn default_analyzer_command() -> Vec<String> {
    vec!["python3".into(), "-m".into(), "pyflakes".into()]
}
fn default_analyzer_timeout_seconds() -> u64 {
    20
}
fn default_whitelist_patterns() -> Vec<String> {
    DEFAULT_WHITELIST_PATTERNS.iter().map(|s| s.to_string()).collect()
}
fn default_max_depth() -> usize {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            max_source_bytes: default_max_source_bytes(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            command: default_analyzer_command(),
            timeout_seconds: default_analyzer_timeout_seconds(),
        }
    }
}

impl Default for WhitelistSection {
    fn default() -> Self {
        Self {
            patterns: default_whitelist_patterns(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

impl ClintConfig {
    /// Load the configuration at `path`, surfacing read and parse errors.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load configuration from `path`.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(cfg) => cfg,
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Load `clint.json` from a directory.
    pub fn load_from_dir(dir: &Path) -> Self {
        Self::load(&dir.join(CONFIG_FILE_NAME))
    }

    pub fn whitelist(&self) -> WhitelistConfig {
        WhitelistConfig::from_patterns(&self.whitelist.patterns)
    }
}
