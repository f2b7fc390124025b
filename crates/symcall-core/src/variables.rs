//! Direct read/write of native global variables by name.
//!
//! A resolved variable is treated as one [`MemoryCell`]: an untyped, 32-bit
//! unsigned word at the symbol's address. The symbol's kind is not checked.

use crate::errors::{BridgeError, LookupTarget};
use crate::marshal::Word;
use crate::naming::NamingPolicy;
use crate::resolver::resolve_any;
use crate::symbols::SymbolTable;
use std::ptr::NonNull;

/// Raw contents of a variable cell
pub type CellWord = u32;

/// The single place where a resolved address is dereferenced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryCell {
    ptr: NonNull<CellWord>,
}

impl MemoryCell {
    /// Width of the cell in bytes
    pub const WIDTH: usize = size_of::<CellWord>();

    /// # Safety
    ///
    /// `address` must point to at least [`MemoryCell::WIDTH`] readable (and,
    /// for [`MemoryCell::write`], writable) bytes, suitably aligned, for as
    /// long as the cell is used.
    pub unsafe fn at(address: Word) -> Option<Self> {
        NonNull::new(address as *mut CellWord).map(|ptr| Self { ptr })
    }

    pub fn address(&self) -> Word {
        self.ptr.as_ptr() as Word
    }

    pub fn read(&self) -> CellWord {
        // Volatile: the cell aliases memory other native code owns
        unsafe { self.ptr.as_ptr().read_volatile() }
    }

    pub fn write(&self, value: CellWord) {
        unsafe { self.ptr.as_ptr().write_volatile(value) }
    }
}

fn resolve_cell(table: &dyn SymbolTable, name: &str) -> Result<MemoryCell, BridgeError> {
    let candidates = NamingPolicy::variable_names(name);
    let symbol = resolve_any(table, &candidates, LookupTarget::Variable)?;
    log::debug!(
        "variable {name} at {:#x} ({})",
        symbol.address,
        symbol.kind.display_name()
    );
    unsafe { MemoryCell::at(symbol.address) }
        .ok_or_else(|| BridgeError::not_found(symbol.name, LookupTarget::Variable))
}

/// Read the variable `name`, trying the bare then the decorated name.
///
/// # Safety
///
/// `name` must resolve to a live, aligned 32-bit scalar.
pub unsafe fn get_variable(table: &dyn SymbolTable, name: &str) -> Result<CellWord, BridgeError> {
    Ok(resolve_cell(table, name)?.read())
}

/// Overwrite the variable `name`, trying the bare then the decorated name.
///
/// # Safety
///
/// `name` must resolve to a live, aligned, writable 32-bit scalar. Anything
/// else at that address is overwritten all the same.
pub unsafe fn set_variable(
    table: &dyn SymbolTable,
    name: &str,
    value: CellWord,
) -> Result<(), BridgeError> {
    resolve_cell(table, name)?.write(value);
    Ok(())
}
