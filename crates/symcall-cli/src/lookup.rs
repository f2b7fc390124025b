//! `lookup` subcommand handler

use crate::utils::open_bridge;
use symcall_core::{BridgeConfig, Symbol};

/// Resolve each name and print `name: address kind`
pub fn handle_lookup(names: &[String], config: &BridgeConfig) -> anyhow::Result<()> {
    let bridge = open_bridge(config)?;
    let mut missing = 0;

    for name in names {
        match bridge.lookup(name) {
            Ok(symbol) => println!("{}", format_symbol(name, &symbol)),
            Err(err) => {
                eprintln!("{name}: {err}");
                missing += 1;
            }
        }
    }

    if missing > 0 {
        anyhow::bail!("{missing} of {} name(s) not found", names.len());
    }
    Ok(())
}

pub fn format_symbol(requested: &str, symbol: &Symbol) -> String {
    let mut line = format!(
        "{requested}: {:#0width$x} {}",
        symbol.address,
        symbol.kind.display_name(),
        width = 2 + 2 * size_of::<usize>()
    );
    if symbol.name != requested {
        line.push_str(&format!(" (as {})", symbol.name));
    }
    line
}
