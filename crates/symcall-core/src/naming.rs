//! Symbol name decoration.
//!
//! Some object formats prefix every symbol with an underscore, some only
//! decorate certain storage classes. Function calls try exactly one form,
//! picked by configuration. Variable access always tries the bare name first
//! and the decorated name second, because BSS and data symbols in the same
//! image may differ.

use serde::{Deserialize, Serialize};

/// Prefix added by decorating toolchains
pub const DECORATION_PREFIX: &str = "_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NamingPolicy {
    /// Names are looked up verbatim (ELF, and Mach-O through `dlsym`)
    #[default]
    Bare,
    /// Names carry [`DECORATION_PREFIX`] (a.out, COFF on 32-bit x86)
    Decorated,
}

impl NamingPolicy {
    pub fn decorate(name: &str) -> String {
        format!("{DECORATION_PREFIX}{name}")
    }

    /// The single name form tried for a function call
    pub fn call_name(&self, name: &str) -> String {
        match self {
            NamingPolicy::Bare => name.to_string(),
            NamingPolicy::Decorated => Self::decorate(name),
        }
    }

    /// Names tried for variable access, in order. Independent of the policy.
    pub fn variable_names(name: &str) -> [String; 2] {
        [name.to_string(), Self::decorate(name)]
    }
}
