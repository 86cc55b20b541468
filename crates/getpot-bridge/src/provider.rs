//! Bridge façade
//!
//! The one entry point the provider framework talks to. A bridge instance
//! resolves the helper path once, probes availability once per resolved path,
//! and then serves any number of independent token requests. The two
//! historical provider flavors (native executable vs. script under an
//! interpreter) are a single type parameterized by `BridgeOptions`.

use crate::args::{self, BindingFlag};
use crate::errors::ProviderError;
use crate::invoker;
use crate::locator::{self, LocatorConfig, LocatorError, ResolvedExecutable};
use crate::probe;
use crate::request::PoTokenRequest;
use crate::response;
use getpot_config::Settings;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, trace};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Inbound interface exposed to the provider framework
pub trait PoTokenProvider: Send + Sync {
    fn provider_name(&self) -> &str;
    /// Soft availability verdict; never an error.
    fn is_available(&self) -> bool;
    /// Obtain one token. Every failure is a typed `ProviderError`; an empty
    /// token is never returned silently.
    fn request_token(&self, request: &PoTokenRequest) -> Result<String, ProviderError>;
}

/// Everything that distinguishes one bridge flavor from another
#[derive(Debug, Clone)]
pub struct BridgeOptions {
    pub provider_name: String,
    /// Explicit helper path; wins over all default candidates.
    pub override_path: Option<String>,
    /// Value of the retired settings key, if the user still carries it.
    pub deprecated_script_path: Option<String>,
    /// Interpreter (plus any interpreter args) prepended to the helper path.
    /// Empty for native executables.
    pub command_prefix: Vec<String>,
    pub binding_flag: BindingFlag,
    pub probe_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self::native()
    }
}

impl BridgeOptions {
    /// Native helper executable (`bgutil:cli` flavor).
    pub fn native() -> Self {
        BridgeOptions {
            provider_name: "bgutil:cli".to_string(),
            override_path: None,
            deprecated_script_path: None,
            command_prefix: Vec::new(),
            binding_flag: BindingFlag::Content,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Script helper run under an interpreter (`bgutil:script` flavor).
    /// Older script helpers take the binding via the legacy `-v` flag.
    pub fn script(interpreter: impl Into<String>, script_path: impl Into<String>) -> Self {
        BridgeOptions {
            provider_name: "bgutil:script".to_string(),
            override_path: Some(script_path.into()),
            command_prefix: vec![interpreter.into()],
            binding_flag: BindingFlag::Legacy,
            ..Self::native()
        }
    }

    /// Build options from the on-disk settings file. CLI flags and direct
    /// construction take precedence over this.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut options = Self::native();
        options.override_path = settings.cli_path.clone();
        options.deprecated_script_path = settings.script.clone();
        if let Some(interpreter) = settings
            .interpreter
            .as_deref()
            .filter(|i| !i.trim().is_empty())
        {
            options.provider_name = "bgutil:script".to_string();
            options.command_prefix = vec![interpreter.to_string()];
        }
        if let Some(secs) = settings.probe_timeout_secs {
            options.probe_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = settings.request_timeout_secs {
            options.request_timeout = Duration::from_secs(secs);
        }
        options
    }
}

/// Bridge to the bgutil PO token helper
pub struct BgUtilBridge {
    options: BridgeOptions,
    // Both arms are Clone, so the memoized outcome replays losslessly to
    // every later caller.
    resolved: OnceCell<Result<ResolvedExecutable, LocatorError>>,
    runnable: OnceCell<Option<PathBuf>>,
    availability: Mutex<HashMap<PathBuf, bool>>,
}

impl BgUtilBridge {
    pub fn new(options: BridgeOptions) -> Self {
        BgUtilBridge {
            options,
            resolved: OnceCell::new(),
            runnable: OnceCell::new(),
            availability: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(BridgeOptions::from_settings(settings))
    }

    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    /// Resolve the helper path, once per bridge instance. Concurrent first
    /// callers observe the same resolution (single-flight via `OnceCell`).
    pub fn resolved(&self) -> Result<&ResolvedExecutable, ProviderError> {
        self.resolved
            .get_or_init(|| {
                locator::resolve(&LocatorConfig {
                    override_path: self.options.override_path.clone(),
                    deprecated_script_path: self.options.deprecated_script_path.clone(),
                })
            })
            .as_ref()
            .map_err(|err| ProviderError::from(err.clone()))
    }

    /// The concrete runnable form of the resolved path (PATH hit or existing
    /// file), memoized like the resolution itself.
    fn runnable_path(&self) -> Option<&PathBuf> {
        self.runnable
            .get_or_init(|| {
                self.resolved()
                    .ok()
                    .and_then(|resolved| locator::find_runnable(&resolved.path))
            })
            .as_ref()
    }

    fn cached_verdict(&self, path: &PathBuf) -> Option<bool> {
        self.availability
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .copied()
    }

    fn full_command(&self, runnable: &PathBuf, args: Vec<String>) -> Vec<String> {
        let mut command = self.options.command_prefix.clone();
        command.push(runnable.to_string_lossy().into_owned());
        command.extend(args);
        command
    }
}

impl PoTokenProvider for BgUtilBridge {
    fn provider_name(&self) -> &str {
        &self.options.provider_name
    }

    fn is_available(&self) -> bool {
        let Ok(resolved) = self.resolved() else {
            return false;
        };
        let path = resolved.path.clone();

        // Lock held across the probe: concurrent first callers wait for one
        // probe instead of racing their own.
        let mut verdicts = self
            .availability
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(&verdict) = verdicts.get(&path) {
            return verdict;
        }
        let verdict = probe::probe(
            &self.options.command_prefix,
            &path,
            self.options.probe_timeout,
        );
        verdicts.insert(path, verdict);
        verdict
    }

    fn request_token(&self, request: &PoTokenRequest) -> Result<String, ProviderError> {
        let resolved = self.resolved()?;
        trace!(
            "Generating POT via {}: {}",
            self.options.provider_name,
            resolved.path.display()
        );

        // A memoized negative verdict means the helper is known-bad; fail
        // fast instead of spawning it again.
        if self.cached_verdict(&resolved.path) == Some(false) {
            return Err(ProviderError::ExecutableNotFound(
                resolved.path.display().to_string(),
            ));
        }

        let Some(runnable) = self.runnable_path() else {
            return Err(ProviderError::ExecutableNotFound(
                resolved.path.display().to_string(),
            ));
        };

        let command = self.full_command(
            runnable,
            args::build_args(request, self.options.binding_flag),
        );
        info!(
            "Generating a {} PO Token for {} client via {}",
            request.context,
            request.client_label(),
            self.options.provider_name,
        );
        debug!("Executing command to get POT: {}", command.join(" "));

        let outcome = invoker::run(&command, self.options.request_timeout)?;

        // Helper chatter goes to the log before any failure is classified.
        let diagnostics = response::diagnostic_lines(&outcome.stdout);
        if !diagnostics.is_empty() {
            trace!("helper stdout:\n{}", diagnostics.join("\n"));
        }
        let stderr = outcome.stderr.trim();
        if !stderr.is_empty() {
            trace!("helper stderr:\n{}", stderr);
        }

        if !outcome.success() {
            return Err(ProviderError::ProcessFailed {
                code: outcome.code.unwrap_or(-1),
                stdout: outcome.stdout,
                stderr: outcome.stderr,
            });
        }

        response::parse_token(&outcome.stdout)
    }
}
