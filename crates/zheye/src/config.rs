//! CLI configuration: thin wrapper around `zheye_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--base-url, --timeout, --insecure, --session-file).

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use zheye_config::{Config, config_path, load_config, save_config};

/// Effective config: file + env, then CLI flags on top.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config()?;
    if let Some(ref url) = global.base_url {
        cfg.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }
    if let Some(ref path) = global.session_file {
        cfg.storage_path = Some(path.clone());
    }
    Ok(cfg)
}
