//! Scripting-side values as seen by the bridge.
//!
//! Hosts translate their own value representation into [`Value`] before
//! dispatching a command. Composite values carry no payload because the
//! bridge never looks inside them; it only needs to know they are composite.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    Number(f64),
    /// Raw string bytes, owned by the host for the duration of a call
    String(Vec<u8>),
    Table,
    Function,
    NativeFunction,
    Userdata,
    LightUserdata,
    Thread,
}

impl Value {
    pub fn string(s: impl Into<Vec<u8>>) -> Self {
        Value::String(s.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) | Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Table => "table",
            Value::Function => "function",
            Value::NativeFunction => "cfunction",
            Value::Userdata => "userdata",
            Value::LightUserdata => "lightuserdata",
            Value::Thread => "thread",
        }
    }

    /// True for values the marshaler cannot express as a word
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Value::Table
                | Value::Function
                | Value::NativeFunction
                | Value::Userdata
                | Value::LightUserdata
                | Value::Thread
        )
    }

    /// Text usable as a symbol name.
    ///
    /// Strings are taken as-is (lossily decoded) and numbers are rendered in
    /// decimal, matching how scripting hosts coerce numbers to strings.
    pub fn as_name(&self) -> Option<String> {
        match self {
            Value::String(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric view using the host's "to number" rule: numeric strings are
    /// parsed, anything else that is not a number becomes 0.
    pub fn coerce_integer(&self) -> i64 {
        match self {
            Value::Integer(i) => *i,
            Value::Number(n) => *n as i64,
            Value::String(bytes) => parse_number(&String::from_utf8_lossy(bytes)).unwrap_or(0),
            _ => 0,
        }
    }
}

/// Parse a numeric string: decimal integers, hex with a `0x` prefix, or floats
fn parse_number(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok().map(|v| v as i64)
    } else if let Ok(i) = digits.parse::<i64>() {
        Some(i)
    } else {
        digits
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64)
    }?;

    Some(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            other => write!(f, "<{}>", other.type_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_name_from_string_and_numbers() {
        assert_eq!(Value::string("printf").as_name().as_deref(), Some("printf"));
        assert_eq!(Value::Integer(42).as_name().as_deref(), Some("42"));
        assert_eq!(Value::Nil.as_name(), None);
        assert_eq!(Value::Table.as_name(), None);
    }

    #[test]
    fn test_coerce_integer_follows_to_number_rule() {
        assert_eq!(Value::Integer(321).coerce_integer(), 321);
        assert_eq!(Value::Number(12.9).coerce_integer(), 12);
        assert_eq!(Value::string("  77 ").coerce_integer(), 77);
        assert_eq!(Value::string("0x10").coerce_integer(), 16);
        assert_eq!(Value::string("-3.5").coerce_integer(), -3);
        assert_eq!(Value::string("abc").coerce_integer(), 0);
        assert_eq!(Value::Boolean(true).coerce_integer(), 0);
        assert_eq!(Value::Nil.coerce_integer(), 0);
    }

    #[test]
    fn test_composite_classification() {
        assert!(Value::Table.is_composite());
        assert!(Value::LightUserdata.is_composite());
        assert!(!Value::Nil.is_composite());
        assert!(!Value::string("x").is_composite());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::string("hi").to_string(), "hi");
        assert_eq!(Value::Function.to_string(), "<function>");
        assert_eq!(Value::Integer(-4).to_string(), "-4");
    }
}
