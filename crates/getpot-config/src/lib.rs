//! Configuration surface for the bgutil GetPOT bridge
//!
//! Holds the on-disk settings file (helper path override, interpreter,
//! timeouts) and the environment-variable expansion applied to user-supplied
//! paths. The bridge crate consumes `Settings`; it never reads the
//! environment directly beyond what is documented here.

pub mod expand;
pub mod settings;

pub use expand::expand_vars;
pub use settings::{Settings, SettingsError, DEPRECATED_SCRIPT_KEY};
