//! Core types, catalogs, and configuration for clint.
//!
//! This crate provides the foundational data structures used across all clint crates:
//! - [`types`]: `Violation`, `Position`, and the `CheckResult` returned to callers
//! - [`catalog`]: The fixed catalog of violation kinds and their messages
//! - [`vocab`]: Static vocabularies of the restricted contract language
//! - [`whitelist`]: Substring whitelist applied to external analyzer output
//! - [`config`]: Configuration loading from `clint.json`

pub mod catalog;
pub mod config;
pub mod types;
pub mod vocab;
pub mod whitelist;
