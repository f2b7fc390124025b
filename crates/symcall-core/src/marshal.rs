//! Value marshaling between scripting values and native words.
//!
//! - [`MarshalContext::frame`]: scripting arguments into a fixed frame of
//!   [`ARG_CAPACITY`] words
//! - [`from_word`]: a returned word back into a scripting number
//!
//! # Memory Safety
//!
//! String arguments are copied into NUL-terminated buffers owned by the
//! [`MarshalContext`]. The [`ArgFrame`] borrows the context, so no address
//! handed to native code can outlive the strings it points at.

use crate::value::Value;
use std::ffi::{CString, c_char};
use std::marker::PhantomData;

/// Native word carried across the bridge in both directions
pub type Word = usize;

/// Number of word arguments every invocation presents to the callee
pub const ARG_CAPACITY: usize = 15;

/// One argument slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Empty,
    Integer(i32),
    Address(*const c_char),
}

impl Slot {
    /// Word presented to the callee. Integers are sign-extended.
    pub fn word(&self) -> Word {
        match self {
            Slot::Empty => 0,
            Slot::Integer(i) => *i as isize as Word,
            Slot::Address(ptr) => *ptr as Word,
        }
    }
}

/// Arguments for a single call, ready for an ABI adapter
#[derive(Debug)]
pub struct ArgFrame<'ctx> {
    slots: [Slot; ARG_CAPACITY],
    count: usize,
    dropped: usize,
    _strings: PhantomData<&'ctx MarshalContext>,
}

impl ArgFrame<'_> {
    pub fn slots(&self) -> &[Slot; ARG_CAPACITY] {
        &self.slots
    }

    /// All fifteen words, unused trailing slots zero
    pub fn words(&self) -> [Word; ARG_CAPACITY] {
        self.slots.map(|slot| slot.word())
    }

    /// Number of slots filled from scripting arguments
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of scripting arguments discarded beyond capacity
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Owns the native copies of string arguments for one call
#[derive(Debug, Default)]
pub struct MarshalContext {
    strings: Vec<CString>,
    unsupported: usize,
}

impl MarshalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert one scripting value into a slot.
    ///
    /// Composite values become [`Slot::Empty`] without complaint, so a zero
    /// word can mean either a real zero or an unsupported argument.
    pub fn to_slot(&mut self, value: &Value) -> Slot {
        match value {
            Value::Nil => Slot::Empty,
            Value::Boolean(b) => Slot::Integer(i32::from(*b)),
            Value::Integer(i) => Slot::Integer(*i as i32),
            Value::Number(n) => Slot::Integer(*n as i64 as i32),
            Value::String(bytes) => {
                // A C reader stops at the first NUL anyway
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                let c_string = CString::new(&bytes[..end]).unwrap_or_default();
                let ptr = c_string.as_ptr();
                self.strings.push(c_string);
                Slot::Address(ptr)
            }
            other => {
                log::debug!("unsupported argument type {}, passing 0", other.type_name());
                self.unsupported += 1;
                Slot::Empty
            }
        }
    }

    /// Marshal up to [`ARG_CAPACITY`] arguments into a frame.
    ///
    /// Arguments past capacity are never inspected.
    pub fn frame(&mut self, args: &[Value]) -> ArgFrame<'_> {
        let count = args.len().min(ARG_CAPACITY);
        let dropped = args.len() - count;
        if dropped > 0 {
            log::debug!("dropping {dropped} argument(s) beyond capacity {ARG_CAPACITY}");
        }

        let mut slots = [Slot::Empty; ARG_CAPACITY];
        for (slot, value) in slots.iter_mut().zip(&args[..count]) {
            log::debug!("argument of type {}", value.type_name());
            *slot = self.to_slot(value);
        }

        ArgFrame {
            slots,
            count,
            dropped,
            _strings: PhantomData,
        }
    }

    /// How many composite arguments were replaced by zero so far
    pub fn unsupported(&self) -> usize {
        self.unsupported
    }
}

/// Convert a returned word into a scripting number.
///
/// Only the low 32 bits are kept and read as a signed `int`, the same width
/// arguments travel at. Callees returning `int` leave the upper half of the
/// register unspecified.
pub fn from_word(word: Word) -> Value {
    Value::Integer(word as u32 as i32 as i64)
}
