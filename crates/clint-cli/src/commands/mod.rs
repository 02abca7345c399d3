pub mod check;
pub mod completion;
pub mod serve;

use std::path::Path;

use clint_core::config::{ClintConfig, CONFIG_FILE_NAME};

/// Load `path`, or `./clint.json` when no path is given. Falls back to
/// defaults when the file is missing or malformed.
pub fn load_config(path: Option<&Path>) -> ClintConfig {
    match path {
        Some(p) => ClintConfig::load(p),
        None => ClintConfig::load(Path::new(CONFIG_FILE_NAME)),
    }
}
