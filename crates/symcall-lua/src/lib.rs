//! Lua host for the symcall bridge.
//!
//! Owns a Lua state, registers every entry of a [`CommandTable`] as a
//! global function and runs scripts against it:
//!
//! ```lua
//! invoke("printf", "Displaying a number from printf: %d\n", 300)
//! setVariable("LuaTestVariable", 321)
//! print(getVariable("LuaTestVariable"))
//! ```

pub mod convert;

use convert::{from_lua, to_lua};
use mlua::{Lua, MultiValue};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use symcall_core::{Bridge, CommandTable, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("{0}")]
    Lua(#[from] mlua::Error),
    #[error("cannot read script '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A running Lua interpreter with the bridge commands installed
pub struct LuaHost {
    lua: Lua,
    bridge: Rc<Bridge>,
    commands: CommandTable,
}

impl LuaHost {
    /// Open Lua with its standard libraries and the standard commands
    pub fn start(bridge: Bridge) -> Result<Self, HostError> {
        Self::start_with(bridge, CommandTable::standard())
    }

    /// Open Lua and register `commands`
    pub fn start_with(bridge: Bridge, commands: CommandTable) -> Result<Self, HostError> {
        let lua = Lua::new();
        let bridge = Rc::new(bridge);
        register_commands(&lua, &bridge, &commands)?;
        log::debug!("lua host started with {} commands", commands.len());
        Ok(Self {
            lua,
            bridge,
            commands,
        })
    }

    /// Run the script at `path`
    pub fn run_script(&self, path: &Path) -> Result<(), HostError> {
        let source = fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.run_source(&source, &format!("@{}", path.display()))
    }

    /// Run a chunk of Lua source under the chunk name `name`
    pub fn run_source(&self, source: &str, name: &str) -> Result<(), HostError> {
        log::debug!("running chunk {name}");
        self.lua.load(source).set_name(name).exec()?;
        Ok(())
    }

    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Close the interpreter and release its memory
    pub fn stop(self) {
        log::debug!("lua host stopped");
        drop(self.lua);
    }
}

fn register_commands(lua: &Lua, bridge: &Rc<Bridge>, commands: &CommandTable) -> mlua::Result<()> {
    let globals = lua.globals();
    for command in commands.iter() {
        let bridge = Rc::clone(bridge);
        let handler = command.handler;
        let name = command.name;
        let function = lua.create_function(move |lua, args: MultiValue| {
            let values: Vec<Value> = args.iter().map(from_lua).collect();
            log::trace!("{name} called with {} argument(s)", values.len());
            match handler(&bridge, &values) {
                Some(result) => Ok(MultiValue::from_vec(vec![to_lua(lua, result)?])),
                None => Ok(MultiValue::new()),
            }
        })?;
        globals.set(name, function)?;
    }
    Ok(())
}
