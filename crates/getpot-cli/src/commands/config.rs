//! `getpot config` - inspect the settings file

use anyhow::{bail, Context};
use clap::Subcommand;
use getpot_config::Settings;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the current settings
    Show,
    /// Print the settings file location
    Path,
    /// Set a settings value (cli-path, interpreter, probe-timeout-secs,
    /// request-timeout-secs)
    Set { key: String, value: String },
}

pub fn run(action: &ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let settings = Settings::load().context("failed to load settings")?;
            println!("Configuration:");
            if settings.is_empty() {
                println!("  (empty)");
            }
            for (key, value) in settings.values_iter() {
                println!("  {key} = {value}");
            }
        }
        ConfigAction::Path => {
            println!("{}", Settings::path().display());
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load().context("failed to load settings")?;
            if !settings.set(key, value.clone()) {
                bail!("unknown or invalid setting '{key}'");
            }
            settings.save().context("failed to save settings")?;
            println!("{key} = {value}");
        }
    }
    Ok(())
}
