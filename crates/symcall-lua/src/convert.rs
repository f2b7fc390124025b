//! Conversions between Lua values and bridge values

use mlua::{Lua, Value as LuaValue};
use symcall_core::Value;

/// Classify a Lua value for the bridge
pub fn from_lua(value: &LuaValue) -> Value {
    match value {
        LuaValue::Nil => Value::Nil,
        LuaValue::Boolean(b) => Value::Boolean(*b),
        LuaValue::Integer(i) => Value::Integer(*i),
        LuaValue::Number(n) => Value::Number(*n),
        LuaValue::String(s) => Value::String(s.as_bytes().to_vec()),
        LuaValue::Table(_) => Value::Table,
        LuaValue::Function(_) => Value::Function,
        LuaValue::UserData(_) => Value::Userdata,
        LuaValue::LightUserData(_) => Value::LightUserdata,
        LuaValue::Thread(_) => Value::Thread,
        _ => Value::Userdata,
    }
}

/// Turn a command result back into a Lua value
pub fn to_lua(lua: &Lua, value: Value) -> mlua::Result<LuaValue> {
    Ok(match value {
        Value::Nil => LuaValue::Nil,
        Value::Boolean(b) => LuaValue::Boolean(b),
        Value::Integer(i) => LuaValue::Integer(i),
        Value::Number(n) => LuaValue::Number(n),
        Value::String(bytes) => LuaValue::String(lua.create_string(&bytes)?),
        // Commands never produce composites
        _ => LuaValue::Nil,
    })
}
