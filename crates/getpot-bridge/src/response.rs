//! Helper stdout parsing
//!
//! The helper prints zero or more free-text diagnostic lines followed by one
//! JSON object carrying the token. Only the last non-empty line is examined
//! structurally; trailing blank lines are tolerated. Everything before it is
//! diagnostic and logged at trace level.

use crate::errors::ProviderError;
use serde::Deserialize;
use tracing::trace;

#[derive(Deserialize)]
struct HelperResponse {
    #[serde(rename = "poToken")]
    po_token: Option<String>,
}

/// Extract the token from raw helper stdout.
pub fn parse_token(stdout: &str) -> Result<String, ProviderError> {
    let mut lines = stdout.lines().rev().filter(|line| !line.trim().is_empty());

    let json_line = lines.next().unwrap_or("");
    trace!("JSON response line: {}", json_line);

    let response: HelperResponse =
        serde_json::from_str(json_line).map_err(|source| ProviderError::MalformedResponse {
            line: json_line.to_string(),
            source,
        })?;

    response.po_token.ok_or(ProviderError::MissingToken)
}

/// Diagnostic portion of stdout: everything before the JSON line, trimmed.
/// Used by the façade to log helper chatter before classifying failures.
pub fn diagnostic_lines(stdout: &str) -> Vec<&str> {
    let trimmed = stdout.trim_end();
    let mut lines: Vec<&str> = trimmed.lines().collect();
    lines.pop();
    lines.retain(|line| !line.trim().is_empty());
    lines
}
