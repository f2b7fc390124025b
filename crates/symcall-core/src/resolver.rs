//! Name resolution against a [`SymbolTable`].

use crate::errors::{BridgeError, LookupTarget};
use crate::symbols::{Symbol, SymbolTable};

/// Longest name passed to the table; longer names are cut, not rejected
pub const MAX_NAME_LEN: usize = 127;

/// Cut `name` to at most [`MAX_NAME_LEN`] bytes on a character boundary
pub fn clamp_name(name: &str) -> &str {
    clamp_to(name, MAX_NAME_LEN)
}

pub(crate) fn clamp_to(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Look a single name up verbatim (after clamping)
pub fn resolve(table: &dyn SymbolTable, name: &str) -> Option<Symbol> {
    let name = clamp_name(name);
    let symbol = table.find_by_name(name);
    log::trace!("resolve {name}: {:?}", symbol.as_ref().map(|s| s.address));
    symbol
}

/// Try each candidate in order; the error names the last one tried
pub fn resolve_any<S: AsRef<str>>(
    table: &dyn SymbolTable,
    candidates: &[S],
    target: LookupTarget,
) -> Result<Symbol, BridgeError> {
    let mut last = "";
    for candidate in candidates {
        last = clamp_name(candidate.as_ref());
        if let Some(symbol) = resolve(table, last) {
            return Ok(symbol);
        }
    }
    Err(BridgeError::not_found(last, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{StaticSymbols, SymbolKind};

    #[test]
    fn test_clamp_short_name_untouched() {
        assert_eq!(clamp_name("malloc"), "malloc");
    }

    #[test]
    fn test_clamp_long_name() {
        let long = "a".repeat(200);
        assert_eq!(clamp_name(&long).len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_clamp_respects_char_boundary() {
        let long = format!("{}é", "a".repeat(126));
        // 'é' is two bytes and would straddle the limit
        assert_eq!(clamp_name(&long), "a".repeat(126));
    }

    #[test]
    fn test_long_names_resolve_by_prefix() {
        let stored = "b".repeat(MAX_NAME_LEN);
        let table = StaticSymbols::new().with(stored.clone(), 0x40, SymbolKind::Text);
        let requested = format!("{stored}_tail_that_is_dropped");
        assert_eq!(resolve(&table, &requested).unwrap().address, 0x40);
    }

    #[test]
    fn test_resolve_any_reports_last_candidate() {
        let table = StaticSymbols::new();
        let err = resolve_any(&table, &["var", "_var"], LookupTarget::Variable).unwrap_err();
        assert_eq!(err, BridgeError::not_found("_var", LookupTarget::Variable));
    }

    #[test]
    fn test_resolve_any_stops_at_first_hit() {
        let table = StaticSymbols::new()
            .with("var", 0x10, SymbolKind::Bss)
            .with("_var", 0x20, SymbolKind::Data);
        let symbol = resolve_any(&table, &["var", "_var"], LookupTarget::Variable).unwrap();
        assert_eq!(symbol.address, 0x10);
    }
}
