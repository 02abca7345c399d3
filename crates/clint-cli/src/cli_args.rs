use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "clint", version, about = "Admission linter for restricted-Python smart contracts")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, env = "CLINT_LOG_JSON")]
    pub log_json: bool,

    /// Config file (default: ./clint.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Lint contract files; directories are searched for *.py
    Check {
        /// Files or directories to lint
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Skip the external analyzer and run only the rule engine
        #[arg(long)]
        rules_only: bool,
        /// Comma-separated whitelist patterns replacing the configured set
        #[arg(long, value_delimiter = ',')]
        whitelist: Option<Vec<String>>,
    },

    /// Start the HTTP server
    Serve {
        /// Address to bind (default from config: 0.0.0.0)
        #[arg(long, env = "CLINT_HOST")]
        host: Option<String>,
        /// Port to bind (default from config: 8000)
        #[arg(long, env = "CLINT_PORT")]
        port: Option<u16>,
    },

    /// Generate shell completions
    Completion {
        /// Shell: bash, zsh, fish, elvish, powershell
        shell: String,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
