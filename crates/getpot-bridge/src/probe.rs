//! Availability probing
//!
//! One `--version` run under a short timeout decides whether a resolved
//! helper path is usable. Failures here are soft: they become `false`, never
//! an error, since "unavailable" is an expected outcome the framework uses
//! for provider selection. The façade memoizes the verdict per path, which
//! also keeps the warning log to one line per path.

use crate::invoker;
use crate::locator;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Probe `path` (optionally under an interpreter prefix) for availability.
pub fn probe(prefix: &[String], path: &Path, timeout: Duration) -> bool {
    let Some(runnable) = locator::find_runnable(path) else {
        debug!("Executable path doesn't exist: {}", path.display());
        return false;
    };

    let mut command: Vec<String> = prefix.to_vec();
    command.push(runnable.to_string_lossy().into_owned());
    command.push("--version".to_string());

    match invoker::run(&command, timeout) {
        Ok(outcome) if outcome.success() => {
            debug!("helper version: {}", outcome.stdout.trim());
            true
        }
        Ok(outcome) => {
            warn!(
                "Failed to check executable version. Executable returned {} exit status. \
                 stdout: {}; stderr: {}",
                outcome.code.map_or_else(|| "unknown".to_string(), |c| c.to_string()),
                outcome.stdout.trim(),
                outcome.stderr.trim(),
            );
            false
        }
        Err(err) => {
            warn!("Failed to check executable version: {}", err);
            false
        }
    }
}
