//! Symbol table services the bridge resolves names against.
//!
//! The bridge never owns symbols; it asks a [`SymbolTable`] on every access
//! and keeps nothing between calls.

use crate::errors::LoadError;
use crate::marshal::Word;
use libloading::Library;
use std::collections::HashMap;
use std::ffi::c_void;
use std::path::{Path, PathBuf};

/// Coarse classification of a symbol, as far as the table knows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Code
    Text,
    /// Initialised data
    Data,
    /// Zero-initialised data
    Bss,
    Absolute,
    /// The table cannot classify the symbol
    Unknown,
}

impl SymbolKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SymbolKind::Text => "text",
            SymbolKind::Data => "data",
            SymbolKind::Bss => "bss",
            SymbolKind::Absolute => "abs",
            SymbolKind::Unknown => "unknown",
        }
    }
}

/// A resolved symbol. The address is only meaningful for the current call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub address: Word,
    pub kind: SymbolKind,
}

/// Read-only name lookup. Implementations must tolerate concurrent readers.
pub trait SymbolTable: Send + Sync {
    fn find_by_name(&self, name: &str) -> Option<Symbol>;
}

impl<T: SymbolTable + ?Sized> SymbolTable for Box<T> {
    fn find_by_name(&self, name: &str) -> Option<Symbol> {
        (**self).find_by_name(name)
    }
}

/// The live symbol table of the running process
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSymbols;

impl SymbolTable for ProcessSymbols {
    fn find_by_name(&self, name: &str) -> Option<Symbol> {
        let address = process_symbol(name)?;
        Some(Symbol {
            name: name.to_string(),
            address,
            kind: SymbolKind::Unknown,
        })
    }
}

fn process_symbol(name: &str) -> Option<Word> {
    // On Unix the default lookup scope covers the executable and every
    // library loaded with global visibility
    #[cfg(unix)]
    {
        let name_cstr = std::ffi::CString::new(name).ok()?;
        let ptr = unsafe { libc::dlsym(libc::RTLD_DEFAULT, name_cstr.as_ptr()) };
        if ptr.is_null() { None } else { Some(ptr as Word) }
    }

    // On Windows there is no global scope, so try the C runtime libraries
    #[cfg(windows)]
    {
        let lib_names = [
            "ucrtbase.dll",
            "msvcrt.dll",
            "api-ms-win-crt-stdio-l1-1-0.dll",
        ];

        for lib_name in &lib_names {
            if let Ok(lib) = unsafe { Library::new(lib_name) } {
                if let Ok(symbol) = unsafe { lib.get::<*const c_void>(name.as_bytes()) } {
                    let ptr = *symbol;
                    // Keep the library mapped, the address must stay valid
                    std::mem::forget(lib);
                    if !ptr.is_null() {
                        return Some(ptr as Word);
                    }
                }
            }
        }
        None
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = name;
        None
    }
}

/// Symbols exported by explicitly loaded shared libraries.
///
/// Libraries stay loaded for as long as the table lives.
#[derive(Debug, Default)]
pub struct LibrarySymbols {
    libraries: Vec<(PathBuf, Library)>,
}

impl LibrarySymbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a library by path.
    ///
    /// # Safety
    ///
    /// Loading runs the library's initialisers inside this process. The
    /// caller must trust the library.
    pub unsafe fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        let library = unsafe { Library::new(path) }.map_err(|source| LoadError::LoadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded library {}", path.display());
        self.libraries.push((path.to_path_buf(), library));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

impl SymbolTable for LibrarySymbols {
    fn find_by_name(&self, name: &str) -> Option<Symbol> {
        self.libraries.iter().find_map(|(path, library)| {
            let symbol = unsafe { library.get::<*const c_void>(name.as_bytes()) }.ok()?;
            let ptr = *symbol;
            if ptr.is_null() {
                return None;
            }
            log::trace!("{name} found in {}", path.display());
            Some(Symbol {
                name: name.to_string(),
                address: ptr as Word,
                kind: SymbolKind::Unknown,
            })
        })
    }
}

/// Explicitly registered symbols, for statically linked natives and tests
#[derive(Debug, Default, Clone)]
pub struct StaticSymbols {
    entries: HashMap<String, (Word, SymbolKind)>,
}

impl StaticSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, address: Word, kind: SymbolKind) {
        self.entries.insert(name.into(), (address, kind));
    }

    /// Builder form of [`StaticSymbols::register`]
    pub fn with(mut self, name: impl Into<String>, address: Word, kind: SymbolKind) -> Self {
        self.register(name, address, kind);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SymbolTable for StaticSymbols {
    fn find_by_name(&self, name: &str) -> Option<Symbol> {
        let (address, kind) = *self.entries.get(name)?;
        (address != 0).then(|| Symbol {
            name: name.to_string(),
            address,
            kind,
        })
    }
}

/// Several tables searched in order; the first hit wins
#[derive(Default)]
pub struct SymbolChain {
    tables: Vec<Box<dyn SymbolTable>>,
}

impl SymbolChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, table: impl SymbolTable + 'static) {
        self.tables.push(Box::new(table));
    }

    pub fn with(mut self, table: impl SymbolTable + 'static) -> Self {
        self.push(table);
        self
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl SymbolTable for SymbolChain {
    fn find_by_name(&self, name: &str) -> Option<Symbol> {
        self.tables.iter().find_map(|table| table.find_by_name(name))
    }
}
