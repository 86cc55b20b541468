//! Bridge to the bgutil PO token helper executable
//!
//! Obtains PO tokens by locating a local helper (`bgutil-pot-generate`,
//! native or script-under-interpreter), invoking it with the request mapped
//! to command-line flags, and parsing the JSON object on the last line of its
//! stdout. The helper's exit code and output shape are the whole contract;
//! no persistent session or network transport lives in this crate.
//!
//! Pipeline per request:
//! locator (once per bridge) → probe (once per path) → args → invoker →
//! response parser, orchestrated by [`BgUtilBridge`].

pub mod args;
pub mod errors;
pub mod invoker;
pub mod locator;
pub mod probe;
pub mod provider;
pub mod request;
pub mod response;

pub use args::BindingFlag;
pub use errors::ProviderError;
pub use provider::{
    BgUtilBridge, BridgeOptions, PoTokenProvider, DEFAULT_PROBE_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
};
pub use request::{PoTokenRequest, TokenContext};
