//! Helper executable discovery
//!
//! Resolution order: explicit override (env-expanded, returned without an
//! existence check so failures surface at invocation time), then a hard stop
//! on the deprecated settings key, then a fixed candidate list probed against
//! the filesystem and the process search path.

use crate::errors::ProviderError;
use getpot_config::{expand_vars, DEPRECATED_SCRIPT_KEY};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bare name of the helper, resolved via PATH when nothing else matches
pub const HELPER_NAME: &str = "bgutil-pot-generate";

/// Settings key users should migrate to
pub const OVERRIDE_KEY: &str = "cli_path";

/// Ways resolution itself can fail. Cloneable so the façade can memoize the
/// outcome and replay it to every later caller without loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// The retired settings key is still set; resolution refuses to guess.
    DeprecatedKey {
        deprecated: String,
        replacement: String,
    },
}

impl From<LocatorError> for ProviderError {
    fn from(err: LocatorError) -> Self {
        match err {
            LocatorError::DeprecatedKey {
                deprecated,
                replacement,
            } => ProviderError::ConfigurationDeprecated {
                deprecated,
                replacement,
            },
        }
    }
}

/// The helper path the locator settled on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutable {
    pub path: PathBuf,
    /// True when no candidate existed and the first default was returned
    /// anyway, so later stages produce a clear "not found" error.
    pub best_effort: bool,
}

/// Inputs to resolution, lifted out of `Settings` by the façade
#[derive(Debug, Clone, Default)]
pub struct LocatorConfig {
    pub override_path: Option<String>,
    pub deprecated_script_path: Option<String>,
}

/// Default locations checked for the helper, in priority order.
pub fn default_candidates() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut candidates = vec![
        PathBuf::from(HELPER_NAME),
        cwd.join("target").join("debug").join(HELPER_NAME),
        cwd.join("target").join("release").join(HELPER_NAME),
    ];
    if let Some(home) = dirs::home_dir() {
        let checkout = home.join("bgutil-ytdlp-pot-provider").join("target");
        candidates.push(checkout.join("debug").join(HELPER_NAME));
        candidates.push(checkout.join("release").join(HELPER_NAME));
    }
    candidates
}

/// Resolve the helper path once. See module docs for the precedence rules.
pub fn resolve(config: &LocatorConfig) -> Result<ResolvedExecutable, LocatorError> {
    if let Some(override_path) = non_empty(config.override_path.as_deref()) {
        let expanded = expand_vars(override_path);
        debug!("Using configured helper path: {}", expanded);
        return Ok(ResolvedExecutable {
            path: PathBuf::from(expanded),
            best_effort: false,
        });
    }

    if non_empty(config.deprecated_script_path.as_deref()).is_some() {
        return Err(LocatorError::DeprecatedKey {
            deprecated: DEPRECATED_SCRIPT_KEY.to_string(),
            replacement: OVERRIDE_KEY.to_string(),
        });
    }

    let candidates = default_candidates();
    for candidate in &candidates {
        if find_runnable(candidate).is_some() {
            debug!("Found {} at: {}", HELPER_NAME, candidate.display());
            return Ok(ResolvedExecutable {
                path: candidate.clone(),
                best_effort: false,
            });
        }
    }

    // Deterministic fallback: first candidate, flagged so later stages report
    // a clear "not found" instead of picking nothing.
    let default_path = candidates
        .first()
        .cloned()
        .unwrap_or_else(|| PathBuf::from(HELPER_NAME));
    debug!(
        "No helper path configured and none found, defaulting to {}",
        default_path.display()
    );
    Ok(ResolvedExecutable {
        path: default_path,
        best_effort: true,
    })
}

/// Map a resolved path to something actually runnable: a PATH hit for bare
/// names, or the path itself when it names an existing file.
pub fn find_runnable(path: &Path) -> Option<PathBuf> {
    if let Ok(hit) = which::which(path) {
        return Some(hit);
    }
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    None
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
