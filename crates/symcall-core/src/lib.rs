//! Call native functions and touch native globals by name.
//!
//! The bridge resolves a name in a symbol table, marshals untyped scripting
//! values into fixed-width native words and invokes the target with a fixed
//! arity of [`ARG_CAPACITY`] words. Global variables go straight from the
//! resolver to a single 32-bit memory cell.
//!
//! Nothing here depends on a particular scripting engine: hosts convert their
//! own values into [`Value`] and register the [`CommandTable`] entries.
//!
//! # Safety
//!
//! A resolved function is invoked with the trust of native code. Calling a
//! function with the wrong arity only works on ABIs where surplus word
//! arguments are ignored, and writing a variable that is not a 32-bit scalar
//! corrupts whatever lives at that address.

pub mod abi;
pub mod bridge;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod invoker;
pub mod marshal;
pub mod naming;
pub mod resolver;
pub mod symbols;
pub mod value;
pub mod variables;


pub use abi::{AdapterKind, CallAdapter, DirectAdapter, LibffiAdapter};
pub use bridge::{Bridge, LineSource, StdinLines};
pub use config::BridgeConfig;
pub use dispatch::{Command, CommandFn, CommandTable};
pub use errors::{BridgeError, ConfigError, LoadError, LookupTarget};
pub use invoker::invoke;
pub use marshal::{ARG_CAPACITY, ArgFrame, MarshalContext, Slot, Word, from_word};
pub use naming::NamingPolicy;
pub use resolver::{MAX_NAME_LEN, resolve};
pub use symbols::{
    LibrarySymbols, ProcessSymbols, StaticSymbols, Symbol, SymbolChain, SymbolKind, SymbolTable,
};
pub use value::Value;
pub use variables::{MemoryCell, get_variable, set_variable};
