//! getpot library - expose modules for testing
//!
//! The binary in `main.rs` is a thin clap shell over these modules.

pub mod commands;

use anyhow::Context;
use clap::Args;
use getpot_bridge::BridgeOptions;
use getpot_config::Settings;

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Helper executable/script path (overrides the settings file)
    #[arg(long, global = true, value_name = "PATH")]
    pub cli_path: Option<String>,

    /// Interpreter to run the helper under (e.g. node, python3)
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub interpreter: Option<String>,
}

/// Assemble bridge options: settings file first, then CLI flags on top.
pub fn bridge_options(global: &GlobalOpts) -> anyhow::Result<BridgeOptions> {
    let settings = Settings::load().context("failed to load settings")?;
    let mut options = BridgeOptions::from_settings(&settings);
    if let Some(path) = &global.cli_path {
        options.override_path = Some(path.clone());
        // A flag-supplied path supersedes any stale deprecated key.
        options.deprecated_script_path = None;
    }
    if let Some(interpreter) = &global.interpreter {
        options.provider_name = "bgutil:script".to_string();
        options.command_prefix = vec![interpreter.clone()];
    }
    tracing::debug!(
        "bridge options: provider={} override={:?} prefix={:?}",
        options.provider_name,
        options.override_path,
        options.command_prefix
    );
    Ok(options)
}
