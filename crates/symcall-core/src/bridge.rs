//! The bridge: a symbol table, a naming policy and an ABI adapter bundled
//! for a scripting host.

use crate::abi::CallAdapter;
use crate::config::BridgeConfig;
use crate::errors::{BridgeError, LoadError, LookupTarget};
use crate::invoker;
use crate::naming::NamingPolicy;
use crate::resolver::{MAX_NAME_LEN, clamp_to, resolve_any};
use crate::symbols::{LibrarySymbols, ProcessSymbols, Symbol, SymbolChain, SymbolTable};
use crate::value::Value;
use crate::variables::{self, CellWord};
use std::io::{self, BufRead, Write};

/// Host line-editing facility behind `readLine`
pub trait LineSource: Send + Sync {
    /// Show `prompt` and read one line. `Ok(None)` on end of input.
    fn read_line(&self, prompt: &str) -> io::Result<Option<String>>;
}

/// Prompt on stdout, read from stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinLines;

impl LineSource for StdinLines {
    fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        read_raw_line(&mut io::stdin().lock())
    }
}

/// Read one line as bytes. Invalid UTF-8 is replaced, not rejected.
pub fn read_raw_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut bytes = Vec::new();
    if reader.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

pub struct Bridge {
    symbols: Box<dyn SymbolTable>,
    naming: NamingPolicy,
    adapter: Box<dyn CallAdapter + Send + Sync>,
    lines: Box<dyn LineSource>,
}

impl Bridge {
    /// Create a bridge over `symbols`.
    ///
    /// # Safety
    ///
    /// Every script given this bridge can call any function and overwrite
    /// any global `symbols` resolves. The caller grants scripts that trust.
    pub unsafe fn new(symbols: impl SymbolTable + 'static, config: &BridgeConfig) -> Self {
        Self {
            symbols: Box::new(symbols),
            naming: config.naming,
            adapter: config.adapter.adapter(),
            lines: Box::new(StdinLines),
        }
    }

    /// Bridge over the configured libraries followed by the process table.
    ///
    /// # Safety
    ///
    /// As for [`Bridge::new`]; loading the libraries also runs their
    /// initialisers.
    pub unsafe fn from_config(config: &BridgeConfig) -> Result<Self, LoadError> {
        let mut chain = SymbolChain::new();
        if !config.libraries.is_empty() {
            let mut libraries = LibrarySymbols::new();
            for path in &config.libraries {
                unsafe { libraries.load(path)? };
            }
            chain.push(libraries);
        }
        chain.push(ProcessSymbols);
        Ok(unsafe { Self::new(chain, config) })
    }

    pub fn with_line_source(mut self, lines: impl LineSource + 'static) -> Self {
        self.lines = Box::new(lines);
        self
    }

    pub fn naming(&self) -> NamingPolicy {
        self.naming
    }

    pub fn symbols(&self) -> &dyn SymbolTable {
        self.symbols.as_ref()
    }

    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, BridgeError> {
        unsafe {
            invoker::invoke(
                self.symbols.as_ref(),
                self.naming,
                self.adapter.as_ref(),
                name,
                args,
            )
        }
    }

    pub fn get_variable(&self, name: &str) -> Result<CellWord, BridgeError> {
        unsafe { variables::get_variable(self.symbols.as_ref(), name) }
    }

    pub fn set_variable(&self, name: &str, value: CellWord) -> Result<(), BridgeError> {
        unsafe { variables::set_variable(self.symbols.as_ref(), name, value) }
    }

    /// Resolve `name` with the variable candidate order, without touching it
    pub fn lookup(&self, name: &str) -> Result<Symbol, BridgeError> {
        let candidates = NamingPolicy::variable_names(name);
        resolve_any(self.symbols.as_ref(), &candidates, LookupTarget::Variable)
    }

    /// Prompt and read one line, both cut to 127 bytes
    pub fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        let prompt = clamp_to(prompt, MAX_NAME_LEN);
        let Some(line) = self.lines.read_line(prompt)? else {
            return Ok(None);
        };
        let line = line.trim_end_matches(['\n', '\r']);
        Ok(Some(clamp_to(line, MAX_NAME_LEN).to_string()))
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("naming", &self.naming)
            .finish_non_exhaustive()
    }
}
