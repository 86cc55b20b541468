//! `getpot request` - fetch one PO token through the bridge

use clap::Args;
use getpot_bridge::{
    BgUtilBridge, BridgeOptions, PoTokenProvider, PoTokenRequest, TokenContext,
};
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Identifier the token is bound to (visitor data, data sync id, ...)
    #[arg(short, long, value_name = "BINDING")]
    pub content_binding: String,

    /// Proxy URL the helper should route its traffic through
    #[arg(short, long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Ask the helper to mint a fresh token instead of a cached one
    #[arg(long)]
    pub bypass_cache: bool,

    /// Source address for the helper's outbound connections
    #[arg(long, value_name = "ADDR")]
    pub source_address: Option<String>,

    /// Disable TLS certificate verification in the helper
    #[arg(long)]
    pub disable_tls_verification: bool,

    /// Request context, for logging (gvs, player, subs)
    #[arg(long, default_value = "gvs", value_parser = parse_context)]
    pub context: TokenContext,

    /// Client name, for logging (e.g. web, mweb)
    #[arg(long)]
    pub client: Option<String>,

    /// Override the token-generation timeout, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

fn parse_context(value: &str) -> Result<TokenContext, String> {
    match value {
        "gvs" => Ok(TokenContext::Gvs),
        "player" => Ok(TokenContext::Player),
        "subs" => Ok(TokenContext::Subs),
        other => Err(format!(
            "unknown context '{other}' (expected gvs, player or subs)"
        )),
    }
}

pub fn run(mut options: BridgeOptions, args: &RequestArgs) -> anyhow::Result<()> {
    if let Some(secs) = args.timeout {
        options.request_timeout = Duration::from_secs(secs);
    }

    let mut request = PoTokenRequest::new(&args.content_binding)
        .with_bypass_cache(args.bypass_cache)
        .with_verify_tls(!args.disable_tls_verification)
        .with_context(args.context);
    if let Some(proxy) = &args.proxy {
        request = request.with_proxy(proxy);
    }
    if let Some(addr) = &args.source_address {
        request = request.with_source_address(addr);
    }
    if let Some(client) = &args.client {
        request = request.with_client(client);
    }

    let bridge = BgUtilBridge::new(options);
    let token = bridge.request_token(&request)?;
    println!("{token}");
    Ok(())
}
