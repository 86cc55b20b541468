//! `getpot available` - probe the configured helper

use getpot_bridge::{BgUtilBridge, BridgeOptions, PoTokenProvider};

/// Returns the availability verdict; the caller maps it to the exit code.
pub fn run(options: BridgeOptions) -> bool {
    let bridge = BgUtilBridge::new(options);
    let available = bridge.is_available();
    if available {
        println!("{}: available", bridge.provider_name());
    } else {
        println!("{}: unavailable", bridge.provider_name());
    }
    available
}
