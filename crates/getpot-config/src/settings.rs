//! On-disk settings for the bridge
//!
//! Settings live in a TOML file under the user's config directory
//! (`~/.config/getpot/getpot.toml`; platform config dir on Windows). The
//! `GETPOT_CONFIG` environment variable overrides the file location for
//! tests and isolated runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// The retired settings key. If a user still carries it, loading must not
/// silently honor it; the bridge raises a deprecation error instead.
pub const DEPRECATED_SCRIPT_KEY: &str = "script";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// Explicit helper executable/script path. Environment variables are
    /// expanded when the bridge consumes this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cli_path: Option<String>,
    /// Deprecated predecessor of `cli_path`. Kept deserializable so the
    /// bridge can detect it and direct the user to the new key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// Interpreter prefix for script helpers (e.g. "node", "python3").
    /// Empty/absent means the helper is a native executable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,
    /// Timeout for the `--version` availability probe, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_timeout_secs: Option<u64>,
    /// Timeout for a token-generation run, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error reading settings: {}", e),
            SettingsError::Parse(e) => write!(f, "Failed to parse settings TOML: {}", e),
            SettingsError::Serialize(e) => write!(f, "Failed to serialize settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl Settings {
    /// Resolve the settings file location.
    ///
    /// `GETPOT_CONFIG`, when set and non-empty, wins unconditionally.
    pub fn path() -> PathBuf {
        if let Ok(env_path) = std::env::var("GETPOT_CONFIG") {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        #[cfg(not(target_os = "windows"))]
        let base = dirs::home_dir().map(|h| h.join(".config"));

        #[cfg(target_os = "windows")]
        let base = dirs::config_dir();

        base.map_or_else(
            || PathBuf::from("getpot.toml"),
            |dir| dir.join("getpot").join("getpot.toml"),
        )
    }

    /// Load settings from the resolved path; a missing file yields defaults.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content).map_err(SettingsError::Parse)
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(SettingsError::Serialize)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Set a value by its CLI key name. Unknown keys (including the
    /// deprecated one, which must not be written anew) return false.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "cli-path" => self.cli_path = Some(value),
            "interpreter" => self.interpreter = Some(value),
            "probe-timeout-secs" => match value.parse() {
                Ok(secs) => self.probe_timeout_secs = Some(secs),
                Err(_) => return false,
            },
            "request-timeout-secs" => match value.parse() {
                Ok(secs) => self.request_timeout_secs = Some(secs),
                Err(_) => return false,
            },
            _ => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.cli_path.is_none()
            && self.script.is_none()
            && self.interpreter.is_none()
            && self.probe_timeout_secs.is_none()
            && self.request_timeout_secs.is_none()
    }

    /// Key/value view used by `getpot config show`.
    pub fn values_iter(&self) -> Vec<(&str, String)> {
        let mut values = Vec::new();
        if let Some(ref val) = self.cli_path {
            values.push(("cli-path", val.clone()));
        }
        if let Some(ref val) = self.script {
            values.push(("script (deprecated)", val.clone()));
        }
        if let Some(ref val) = self.interpreter {
            values.push(("interpreter", val.clone()));
        }
        if let Some(val) = self.probe_timeout_secs {
            values.push(("probe-timeout-secs", val.to_string()));
        }
        if let Some(val) = self.request_timeout_secs {
            values.push(("request-timeout-secs", val.to_string()));
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.toml")).unwrap();
        assert!(settings.is_empty());
    }

    #[test]
    fn round_trips_through_toml() {
        let settings = Settings {
            cli_path: Some("/opt/bgutil/bgutil-pot-generate".to_string()),
            interpreter: Some("node".to_string()),
            request_timeout_secs: Some(30),
            ..Settings::default()
        };
        let text = toml::to_string_pretty(&settings).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back.cli_path.as_deref(), Some("/opt/bgutil/bgutil-pot-generate"));
        assert_eq!(back.interpreter.as_deref(), Some("node"));
        assert_eq!(back.request_timeout_secs, Some(30));
        assert!(back.script.is_none());
    }

    #[test]
    fn deprecated_key_still_deserializes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("getpot.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "script = \"/old/location/generate.js\"").unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.script.as_deref(), Some("/old/location/generate.js"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("getpot.toml");
        std::fs::write(&path, "cli_path = [not toml").unwrap();
        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn set_accepts_known_keys_only() {
        let mut settings = Settings::default();
        assert!(settings.set("cli-path", "/opt/helper".to_string()));
        assert!(settings.set("request-timeout-secs", "40".to_string()));
        assert!(!settings.set("request-timeout-secs", "soon".to_string()));
        assert!(!settings.set("script", "/old/generate.js".to_string()));
        assert_eq!(settings.cli_path.as_deref(), Some("/opt/helper"));
        assert_eq!(settings.request_timeout_secs, Some(40));
        assert!(settings.script.is_none());
    }

    #[test]
    fn values_iter_lists_only_set_keys() {
        let settings = Settings {
            probe_timeout_secs: Some(5),
            ..Settings::default()
        };
        let values = settings.values_iter();
        assert_eq!(values, vec![("probe-timeout-secs", "5".to_string())]);
    }
}
