//! Uniform error type surfaced to the provider framework
//!
//! Every failure mode of the helper invocation pipeline collapses into
//! `ProviderError`. Lower layers never swallow failures; the only downgrade
//! happens in availability probing, where a failed probe becomes a cached
//! `false` rather than an error.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while obtaining a PO token through the helper executable
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("'{deprecated}' option is deprecated, use '{replacement}' instead")]
    ConfigurationDeprecated {
        deprecated: String,
        replacement: String,
    },

    #[error("Executable not found: {0}")]
    ExecutableNotFound(String),

    #[error("Unable to run executable '{path}': {source}")]
    SpawnFailure {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Timeout expired after {timeout:?} when running '{path}'{}", stderr_tail(.stderr))]
    Timeout {
        path: String,
        timeout: Duration,
        /// Whatever the helper wrote to stderr before it was killed.
        stderr: String,
    },

    #[error("Executable failed with exit status {code}")]
    ProcessFailed {
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Error parsing JSON response from executable (line: {line:?}): {source}")]
    MalformedResponse {
        line: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("The executable did not respond with a poToken")]
    MissingToken,
}

fn stderr_tail(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(" (helper stderr: {trimmed})")
    }
}
