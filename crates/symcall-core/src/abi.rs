//! ABI adapters presenting a frame of words as a native call.
//!
//! Every target is called as `extern "C" fn(Word x 15) -> Word`, whatever its
//! real signature. That is sound only where the caller owns the argument
//! area and surplus integer arguments are ignored by the callee (System V
//! x86-64, AArch64, Win64, cdecl). Platform differences stay behind
//! [`CallAdapter`]; the marshaler and resolver never see them.

use crate::marshal::{ARG_CAPACITY, Word};
use libffi::middle::{Arg, Builder, CodePtr, Type, arg};
use serde::{Deserialize, Serialize};
use std::ffi::c_void;

pub trait CallAdapter {
    /// Call `address` with all fifteen words and return the result word.
    ///
    /// # Safety
    ///
    /// `address` must be the entry point of a function that is safe to call
    /// with integer-class arguments under the platform C ABI, and every
    /// address inside `words` must stay valid for the whole call.
    unsafe fn call(&self, address: Word, words: &[Word; ARG_CAPACITY]) -> Word;
}

/// Which adapter a bridge uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdapterKind {
    #[default]
    Direct,
    Libffi,
}

impl AdapterKind {
    pub fn adapter(&self) -> Box<dyn CallAdapter + Send + Sync> {
        match self {
            AdapterKind::Direct => Box::new(DirectAdapter),
            AdapterKind::Libffi => Box::new(LibffiAdapter::new()),
        }
    }
}

type FixedArityFn = unsafe extern "C" fn(
    Word,
    Word,
    Word,
    Word,
    Word,
    Word,
    Word,
    Word,
    Word,
    Word,
    Word,
    Word,
    Word,
    Word,
    Word,
) -> Word;

/// Casts the address to a fifteen-word function pointer and calls it
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectAdapter;

impl CallAdapter for DirectAdapter {
    unsafe fn call(&self, address: Word, words: &[Word; ARG_CAPACITY]) -> Word {
        let [a0, a1, a2, a3, a4, a5, a6, a7, a8, a9, a10, a11, a12, a13, a14] = *words;
        unsafe {
            let function: FixedArityFn = std::mem::transmute::<Word, FixedArityFn>(address);
            function(
                a0, a1, a2, a3, a4, a5, a6, a7, a8, a9, a10, a11, a12, a13, a14,
            )
        }
    }
}

/// Builds the call through a libffi CIF with fifteen pointer-sized arguments
pub struct LibffiAdapter {
    cif: libffi::middle::Cif,
}

impl LibffiAdapter {
    pub fn new() -> Self {
        let cif = Builder::new()
            .args(std::iter::repeat_n(Type::usize(), ARG_CAPACITY))
            .res(Type::usize())
            .into_cif();
        Self { cif }
    }
}

impl Default for LibffiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// Safety: the CIF is only read after construction
unsafe impl Send for LibffiAdapter {}
unsafe impl Sync for LibffiAdapter {}

impl CallAdapter for LibffiAdapter {
    unsafe fn call(&self, address: Word, words: &[Word; ARG_CAPACITY]) -> Word {
        let args: Vec<Arg> = words.iter().map(arg).collect();
        let code_ptr = CodePtr::from_ptr(address as *const c_void);
        unsafe { self.cif.call::<Word>(code_ptr, &args) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern "C" fn add_two(a: Word, b: Word) -> Word {
        a.wrapping_add(b)
    }

    extern "C" fn weighted_sum(
        a0: Word,
        a1: Word,
        a2: Word,
        a3: Word,
        a4: Word,
        a5: Word,
        a6: Word,
        a7: Word,
        a8: Word,
        a9: Word,
        a10: Word,
        a11: Word,
        a12: Word,
        a13: Word,
        a14: Word,
    ) -> Word {
        [a0, a1, a2, a3, a4, a5, a6, a7, a8, a9, a10, a11, a12, a13, a14]
            .iter()
            .enumerate()
            .map(|(i, w)| (i + 1) * w)
            .sum()
    }

    fn words(prefix: &[Word]) -> [Word; ARG_CAPACITY] {
        let mut words = [0; ARG_CAPACITY];
        words[..prefix.len()].copy_from_slice(prefix);
        words
    }

    #[test]
    fn test_direct_adapter_short_callee_ignores_extras() {
        let result = unsafe { DirectAdapter.call(add_two as Word, &words(&[40, 2, 99, 99])) };
        assert_eq!(result, 42);
    }

    #[test]
    fn test_direct_adapter_passes_all_fifteen() {
        let all = [1; ARG_CAPACITY];
        let result = unsafe { DirectAdapter.call(weighted_sum as Word, &all) };
        assert_eq!(result, (1..=ARG_CAPACITY).sum::<usize>());
    }

    #[test]
    fn test_libffi_adapter_matches_direct() {
        let adapter = LibffiAdapter::new();
        let frame: [Word; ARG_CAPACITY] = std::array::from_fn(|i| i);
        let direct = unsafe { DirectAdapter.call(weighted_sum as Word, &frame) };
        let via_ffi = unsafe { adapter.call(weighted_sum as Word, &frame) };
        assert_eq!(direct, via_ffi);
    }

    #[test]
    fn test_adapter_kind_builds_both() {
        let frame = words(&[5, 6]);
        for kind in [AdapterKind::Direct, AdapterKind::Libffi] {
            let adapter = kind.adapter();
            assert_eq!(unsafe { adapter.call(add_two as Word, &frame) }, 11);
        }
    }
}
