//! Script-facing command handlers.
//!
//! Each handler takes the raw call arguments and returns the value to hand
//! back to the script, or `None` for "no value". Lookup failures print a
//! diagnostic and yield `None`; they are never raised as script errors.

use crate::bridge::Bridge;
use crate::errors::BridgeError;
use crate::marshal::Word;
use crate::value::Value;

fn report(err: &BridgeError) {
    eprintln!("Error: {err}!");
}

fn name_arg(args: &[Value]) -> Option<String> {
    args.first().and_then(Value::as_name)
}

/// `invoke(name, ...)`: call a native function
pub fn invoke(bridge: &Bridge, args: &[Value]) -> Option<Value> {
    let Some(name) = name_arg(args) else {
        report(&BridgeError::MissingName);
        return None;
    };
    match bridge.invoke(&name, &args[1..]) {
        Ok(value) => Some(value),
        Err(err) => {
            report(&err);
            None
        }
    }
}

/// `getVariable(name)`: read a native global
pub fn get_variable(bridge: &Bridge, args: &[Value]) -> Option<Value> {
    let Some(name) = name_arg(args) else {
        log::debug!("getVariable: {}", BridgeError::MissingName);
        return None;
    };
    match bridge.get_variable(&name) {
        Ok(word) => Some(Value::Integer(i64::from(word))),
        Err(err) => {
            report(&err);
            None
        }
    }
}

/// `setVariable(name, value)`: overwrite a native global; never returns a value
pub fn set_variable(bridge: &Bridge, args: &[Value]) -> Option<Value> {
    let (Some(name), Some(value)) = (name_arg(args), args.get(1)) else {
        log::debug!("setVariable: {}", BridgeError::MissingValue);
        return None;
    };
    // Two's-complement wrap into the 32-bit cell
    let word = value.coerce_integer() as u32;
    if let Err(err) = bridge.set_variable(&name, word) {
        report(&err);
    }
    None
}

/// `readLine(prompt)`: prompt and read one line of input
pub fn read_line(bridge: &Bridge, args: &[Value]) -> Option<Value> {
    let prompt = name_arg(args)?;
    match bridge.read_line(&prompt) {
        Ok(line) => line.map(Value::string),
        Err(err) => {
            eprintln!("Error: cannot read line: {err}");
            None
        }
    }
}

/// Addresses come back whole, unlike call results
fn address_value(address: Word) -> Value {
    Value::Integer(address as i64)
}

/// `lookup(name)`: address of a symbol, bare name first
pub fn lookup(bridge: &Bridge, args: &[Value]) -> Option<Value> {
    let Some(name) = name_arg(args) else {
        report(&BridgeError::MissingName);
        return None;
    };
    match bridge.lookup(&name) {
        Ok(symbol) => Some(address_value(symbol.address)),
        Err(err) => {
            report(&err);
            None
        }
    }
}
