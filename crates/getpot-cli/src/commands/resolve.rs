//! `getpot resolve` - show which helper path the bridge would use

use getpot_bridge::{locator, BgUtilBridge, BridgeOptions};

pub fn run(options: BridgeOptions) -> anyhow::Result<()> {
    let bridge = BgUtilBridge::new(options);
    let resolved = bridge.resolved()?;

    if resolved.best_effort {
        println!(
            "{} (default candidate; no helper was found)",
            resolved.path.display()
        );
    } else {
        println!("{}", resolved.path.display());
    }

    match locator::find_runnable(&resolved.path) {
        Some(runnable) if runnable != resolved.path => {
            println!("runs as: {}", runnable.display());
        }
        Some(_) => {}
        None => println!("warning: path is not runnable"),
    }
    Ok(())
}
