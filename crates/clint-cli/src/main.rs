//! clint CLI: admission linting for restricted-Python smart contracts.
//!
//! `clint check` lints files locally, `clint serve` runs the HTTP transport.
//! See `clint --help` for usage.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stderr only: stdout carries check results.
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let formatter: Box<dyn clint_output::OutputFormatter> = if cli.json {
        Box::new(clint_output::json::JsonFormatter)
    } else {
        Box::new(clint_output::human::HumanFormatter)
    };

    let config = commands::load_config(cli.config.as_deref());

    let exit_code = match cli.command {
        Commands::Check {
            paths,
            rules_only,
            whitelist,
        } => commands::check::run(&*formatter, &config, &paths, rules_only, whitelist),
        Commands::Serve { host, port } => commands::serve::run(config, host, port),
        Commands::Completion { shell } => commands::completion::run(&shell),
    };

    std::process::exit(exit_code);
}
