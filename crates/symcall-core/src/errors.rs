//! Error types for symbol lookup, configuration and library loading

use std::path::PathBuf;
use thiserror::Error;

/// What a failed lookup was looking for, used to word the diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget {
    Function,
    Variable,
}

impl std::fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupTarget::Function => write!(f, "function"),
            LookupTarget::Variable => write!(f, "symbol"),
        }
    }
}

/// Errors raised by the bridge operations.
///
/// Only [`BridgeError::SymbolNotFound`] is ever reported to a script, and
/// then only as a diagnostic plus a missing return value. Argument overflow
/// and unsupported argument types are not errors at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// `name` is the last candidate tried, decoration included
    #[error("{target} {name} does not exist")]
    SymbolNotFound { name: String, target: LookupTarget },
    #[error("expected a symbol name as the first argument")]
    MissingName,
    #[error("expected a value to store")]
    MissingValue,
}

impl BridgeError {
    pub fn not_found(name: impl Into<String>, target: LookupTarget) -> Self {
        BridgeError::SymbolNotFound {
            name: name.into(),
            target,
        }
    }
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Shared library loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load library '{}': {source}", path.display())]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_for_function() {
        let err = BridgeError::not_found("doesNotExist", LookupTarget::Function);
        assert_eq!(err.to_string(), "function doesNotExist does not exist");
    }

    #[test]
    fn test_not_found_message_names_decorated_candidate() {
        let err = BridgeError::not_found("_missing", LookupTarget::Variable);
        assert_eq!(err.to_string(), "symbol _missing does not exist");
    }

    #[test]
    fn test_config_parse_error_wraps_ron() {
        let parsed: Result<u32, _> = ron::from_str("(");
        let err: ConfigError = parsed.unwrap_err().into();
        assert!(err.to_string().starts_with("invalid config:"));
    }
}
