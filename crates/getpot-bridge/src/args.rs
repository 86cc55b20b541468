//! Request-to-arguments mapping
//!
//! Pure translation of a `PoTokenRequest` into the helper's flag grammar.
//! Nothing here touches the filesystem or the environment.

use crate::request::PoTokenRequest;

/// Which flag carries the content binding. Current helpers take `-c`;
/// the compatibility variant still expects the legacy `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingFlag {
    #[default]
    Content,
    Legacy,
}

impl BindingFlag {
    fn as_str(self) -> &'static str {
        match self {
            BindingFlag::Content => "-c",
            BindingFlag::Legacy => "-v",
        }
    }
}

/// Build the helper argument vector for one request.
pub fn build_args(request: &PoTokenRequest, binding_flag: BindingFlag) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(proxy) = request.proxy.as_deref().filter(|p| !p.is_empty()) {
        args.push("-p".to_string());
        args.push(proxy.to_string());
    }
    args.push(binding_flag.as_str().to_string());
    args.push(request.content_binding.clone());
    if request.bypass_cache {
        args.push("--bypass-cache".to_string());
    }
    if let Some(addr) = request.source_address.as_deref().filter(|a| !a.is_empty()) {
        args.push("--source-address".to_string());
        args.push(addr.to_string());
    }
    if !request.verify_tls {
        args.push("--disable-tls-verification".to_string());
    }
    args
}
