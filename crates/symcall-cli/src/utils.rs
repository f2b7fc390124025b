//! Shared CLI utilities: reading input, bridge options and logging

use anyhow::Context;
use clap::{Args, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use symcall_core::{AdapterKind, Bridge, BridgeConfig, NamingPolicy};
use symcall_lua::HostError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdapterArg {
    Direct,
    Libffi,
}

impl From<AdapterArg> for AdapterKind {
    fn from(arg: AdapterArg) -> Self {
        match arg {
            AdapterArg::Direct => AdapterKind::Direct,
            AdapterArg::Libffi => AdapterKind::Libffi,
        }
    }
}

/// Options shared by every subcommand; they override the config file
#[derive(Debug, Default, Args)]
pub struct BridgeOptions {
    /// RON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Prefix function names with '_' before lookup
    #[arg(long, global = true)]
    pub decorated: bool,
    /// How native calls are made
    #[arg(long, value_enum, global = true)]
    pub adapter: Option<AdapterArg>,
    /// Extra shared library to search (repeatable)
    #[arg(long = "library", short = 'l', global = true)]
    pub libraries: Vec<PathBuf>,
    /// Log marshaling details
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl BridgeOptions {
    /// Config file (or defaults) with command-line overrides applied
    pub fn to_config(&self) -> anyhow::Result<BridgeConfig> {
        let mut config = match &self.config {
            Some(path) => BridgeConfig::load(path)?,
            None => BridgeConfig::default(),
        };
        if self.decorated {
            config.naming = NamingPolicy::Decorated;
        }
        if let Some(adapter) = self.adapter {
            config.adapter = adapter.into();
        }
        config.libraries.extend(self.libraries.iter().cloned());
        config.verbose |= self.verbose;
        Ok(config)
    }
}

/// Build a bridge over the configured libraries and the process table
pub fn open_bridge(config: &BridgeConfig) -> anyhow::Result<Bridge> {
    // Scripts run with the same trust as this process
    let bridge = unsafe { Bridge::from_config(config) }.context("cannot open symbol tables")?;
    Ok(bridge)
}

/// Lua errors are not `Send`, so keep only their rendered message
pub fn host_error(err: HostError) -> anyhow::Error {
    anyhow::anyhow!("{err}")
}

/// Read source code from a file or stdin.
/// If `file` is "-", reads from stdin. Otherwise reads from the specified file.
pub fn read_source(file: &str) -> io::Result<String> {
    if file == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(file)
    }
}

/// Install the logger. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
