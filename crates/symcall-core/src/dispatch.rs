//! The command table registered with a scripting host.
//!
//! Built once before the host starts and never changed afterwards.

use crate::bridge::Bridge;
use crate::commands;
use crate::value::Value;

/// Handler signature shared by every command
pub type CommandFn = fn(&Bridge, &[Value]) -> Option<Value>;

#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub handler: CommandFn,
}

impl Command {
    pub const fn new(name: &'static str, handler: CommandFn) -> Self {
        Self { name, handler }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Command").field(&self.name).finish()
    }
}

/// Built-in commands, with the `vx*` names older scripts use
pub const STANDARD_COMMANDS: &[Command] = &[
    Command::new("invoke", commands::invoke),
    Command::new("getVariable", commands::get_variable),
    Command::new("setVariable", commands::set_variable),
    Command::new("readLine", commands::read_line),
    Command::new("lookup", commands::lookup),
    Command::new("vxDo", commands::invoke),
    Command::new("vxGet", commands::get_variable),
    Command::new("vxSet", commands::set_variable),
    Command::new("vxReadLine", commands::read_line),
];

#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: Vec<Command>,
}

impl CommandTable {
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_COMMANDS.to_vec(),
        }
    }

    /// Standard commands followed by `extensions`.
    ///
    /// An extension reusing a taken name is skipped.
    pub fn with_extensions(extensions: &[Command]) -> Self {
        let mut table = Self::standard();
        for extension in extensions {
            if table.get(extension.name).is_some() {
                log::warn!("command '{}' already registered, skipping", extension.name);
                continue;
            }
            table.entries.push(*extension);
        }
        table
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.entries.iter().find(|command| command.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the command `name`. Unknown commands yield no value.
    pub fn dispatch(&self, bridge: &Bridge, name: &str, args: &[Value]) -> Option<Value> {
        match self.get(name) {
            Some(command) => (command.handler)(bridge, args),
            None => {
                log::warn!("unknown command '{name}'");
                None
            }
        }
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::standard()
    }
}
