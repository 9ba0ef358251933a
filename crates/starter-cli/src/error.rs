//! Error conversion utilities for CLI.
//!
//! Converts starter-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use starter_core::ScaffoldConfig;
use starter_core::StarterError;

/// Converts `StarterError` to user-friendly anyhow error with context
pub fn convert_starter_error(err: StarterError, config: &ScaffoldConfig) -> anyhow::Error {
    match err {
        StarterError::IllegalPath { .. } => {
            anyhow!(
                "Security violation: template archive from '{}' tried to write outside '{}'\n\
                 {err}\n\
                 HINT: The template archive may be malicious. Do not scaffold from untrusted sources.",
                config.fetch.url,
                config.target_dir.display(),
            )
        }
        StarterError::Network { .. } | StarterError::BadStatus { .. } => {
            let hint = if config.fetch.disable_cache {
                "HINT: Check your network connection, or drop --disable-cache to use a cached template."
            } else {
                "HINT: Check your network connection. No cached template was available to fall back on."
            };
            anyhow!("Failed to fetch template: {err}\n{hint}")
        }
        StarterError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid template archive '{}': {}\n\
                 HINT: The cached file may be corrupted. Delete it or rerun with --disable-cache.",
                config.fetch.cache_path.display(),
                reason
            )
        }
        err @ StarterError::InvalidConfig { .. } => convert_config_error(err),
        StarterError::Io(io_err) => {
            anyhow!(
                "I/O error while scaffolding into '{}': {}",
                config.target_dir.display(),
                io_err
            )
        }
    }
}

/// Converts errors raised while building the configuration, before any
/// target directory is known.
pub fn convert_config_error(err: StarterError) -> anyhow::Error {
    match err {
        StarterError::InvalidConfig { reason } => {
            anyhow!(
                "Invalid configuration: {reason}\n\
                 HINT: Pass the package name with --pkg and the cache location with --cache-file."
            )
        }
        other => anyhow::Error::from(other).context("failed to resolve configuration"),
    }
}
