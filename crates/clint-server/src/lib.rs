//! HTTP transport for clint.
//!
//! A thin layer over [`clint_enforce::Linter`]: decode the request body,
//! bound its size and the time spent on it, and return the `CheckResult`.

pub mod http;

pub use http::{router, serve, AppState, Limits};
