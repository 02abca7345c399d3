use std::net::{IpAddr, SocketAddr};

use clint_core::config::ClintConfig;
use clint_server::AppState;

/// Run `clint serve`: bind the HTTP transport and block until it exits.
pub fn run(config: ClintConfig, host: Option<String>, port: Option<u16>) -> i32 {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let addr = match bind_addr(&host, port) {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("clint serve: invalid host '{host}': {e}");
            return 2;
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("clint serve: {e}");
            return 2;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("clint serve: failed to start runtime: {e}");
            return 2;
        }
    };

    match runtime.block_on(clint_server::serve(state, addr)) {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, %addr, "server stopped");
            eprintln!("clint serve: {e}");
            2
        }
    }
}

fn bind_addr(host: &str, port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
    let ip: IpAddr = host.parse()?;
    Ok(SocketAddr::new(ip, port))
}
