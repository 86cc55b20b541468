//! Token request and response types
//!
//! A `PoTokenRequest` is immutable once built; the builder methods consume
//! and return the value. `context` and `client` never influence the helper
//! invocation, they only show up in log lines.

/// What the token will be bound to on the consumer side. Logging-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenContext {
    #[default]
    Gvs,
    Player,
    Subs,
}

impl TokenContext {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenContext::Gvs => "gvs",
            TokenContext::Player => "player",
            TokenContext::Subs => "subs",
        }
    }
}

impl std::fmt::Display for TokenContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One PO token request handed to the bridge by the host framework
#[derive(Debug, Clone)]
pub struct PoTokenRequest {
    /// Identifier the token is bound to (visitor data, data sync id, ...).
    pub content_binding: String,
    /// Proxy URL the helper should route its own traffic through.
    pub proxy: Option<String>,
    /// Ask the helper to mint a fresh token instead of serving a cached one.
    pub bypass_cache: bool,
    /// Source address for the helper's outbound connections.
    pub source_address: Option<String>,
    /// TLS certificate verification in the helper. Defaults to on.
    pub verify_tls: bool,
    /// Logging-only request context.
    pub context: TokenContext,
    /// Logging-only client name (e.g. "web", "mweb").
    pub client: Option<String>,
}

impl PoTokenRequest {
    pub fn new(content_binding: impl Into<String>) -> Self {
        PoTokenRequest {
            content_binding: content_binding.into(),
            proxy: None,
            bypass_cache: false,
            source_address: None,
            verify_tls: true,
            context: TokenContext::default(),
            client: None,
        }
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_bypass_cache(mut self, bypass: bool) -> Self {
        self.bypass_cache = bypass;
        self
    }

    pub fn with_source_address(mut self, addr: impl Into<String>) -> Self {
        self.source_address = Some(addr.into());
        self
    }

    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn with_context(mut self, context: TokenContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    /// Client name for log lines, with a stable placeholder when unset.
    pub fn client_label(&self) -> &str {
        self.client.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_wire_contract() {
        let req = PoTokenRequest::new("cb1");
        assert_eq!(req.content_binding, "cb1");
        assert!(req.proxy.is_none());
        assert!(!req.bypass_cache);
        assert!(req.verify_tls);
        assert_eq!(req.context, TokenContext::Gvs);
        assert_eq!(req.client_label(), "unknown");
    }

    #[test]
    fn context_labels() {
        assert_eq!(TokenContext::Gvs.to_string(), "gvs");
        assert_eq!(TokenContext::Player.to_string(), "player");
        assert_eq!(TokenContext::Subs.to_string(), "subs");
    }
}
