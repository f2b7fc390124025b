//! `run` subcommand handler

use crate::utils::{host_error, open_bridge, read_source};
use anyhow::Context;
use std::path::Path;
use symcall_core::BridgeConfig;
use symcall_lua::LuaHost;

/// Execute a Lua script file against the process symbol table
pub fn handle_run(file: &str, config: &BridgeConfig) -> anyhow::Result<()> {
    let bridge = open_bridge(config)?;
    let host = LuaHost::start(bridge).map_err(host_error)?;

    let result = if file == "-" {
        let source = read_source(file).context("cannot read script from stdin")?;
        host.run_source(&source, "=stdin")
    } else {
        host.run_script(Path::new(file))
    };

    host.stop();
    result.map_err(host_error)
}
