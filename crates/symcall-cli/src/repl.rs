//! `repl` subcommand handler

use crate::utils::{host_error, open_bridge};
use std::io::{self, BufRead, Write};
use symcall_core::BridgeConfig;
use symcall_lua::LuaHost;

/// Run Lua one line at a time with the bridge commands available
pub fn handle_repl(config: &BridgeConfig) -> anyhow::Result<()> {
    let host = LuaHost::start(open_bridge(config)?).map_err(host_error)?;

    println!("symcall {}", env!("CARGO_PKG_VERSION"));
    println!("Each line is run as a Lua chunk. Use Ctrl+D (Unix) or Ctrl+Z (Windows) to exit.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
            None => {
                // EOF reached
                println!();
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        if let Err(err) = host.run_source(&line, "=repl") {
            eprintln!("{err}");
        }
    }

    host.stop();
    Ok(())
}
