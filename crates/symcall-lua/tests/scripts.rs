// Lua scripts driving the bridge against natives defined in this file

mod common;

use common::fixture_path;
use std::ffi::{CStr, c_char, c_int};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};
use symcall_core::{
    Bridge, BridgeConfig, Command, CommandTable, ProcessSymbols, StaticSymbols, SymbolChain,
    SymbolKind, Value, Word,
};
use symcall_lua::{HostError, LuaHost};

static DECIMAL_SEEN: AtomicI32 = AtomicI32::new(0);
static STRING_SEEN: Mutex<String> = Mutex::new(String::new());
static PAIR_SEEN: Mutex<(String, i32)> = Mutex::new((String::new(), 0));
static SINK: Mutex<Vec<u8>> = Mutex::new(Vec::new());
static WIDE_SEEN: Mutex<Vec<Word>> = Mutex::new(Vec::new());
static THREE_SEEN: Mutex<[Word; 3]> = Mutex::new([Word::MAX; 3]);
static BOOLS_SEEN: Mutex<[Word; 3]> = Mutex::new([Word::MAX; 3]);
static LUA_TEST_VARIABLE: AtomicU32 = AtomicU32::new(0);

unsafe fn text(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

extern "C" fn lua_string_test(string: *const c_char) {
    *STRING_SEEN.lock().unwrap() = unsafe { text(string) };
}

extern "C" fn lua_decimal_test(value: c_int) -> c_int {
    DECIMAL_SEEN.store(value, Ordering::SeqCst);
    value
}

extern "C" fn lua_string_decimal_test(string: *const c_char, value: c_int) {
    *PAIR_SEEN.lock().unwrap() = (unsafe { text(string) }, value);
}

extern "C" fn copy_into_sink(src: *const c_char, len: c_int) -> c_int {
    let bytes = unsafe { std::slice::from_raw_parts(src as *const u8, len as usize) };
    *SINK.lock().unwrap() = bytes.to_vec();
    len
}

extern "C" fn record_wide(
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
    *WIDE_SEEN.lock().unwrap() = vec![
        a0, a1, a2, a3, a4, a5, a6, a7, a8, a9, a10, a11, a12, a13, a14,
    ];
    0
}

extern "C" fn record_three(a: Word, b: Word, c: Word) {
    *THREE_SEEN.lock().unwrap() = [a, b, c];
}

extern "C" fn minus_one() -> c_int {
    -1
}

extern "C" fn echo_int(value: c_int) -> c_int {
    value
}

extern "C" fn record_bools(a: Word, b: Word, c: Word) {
    *BOOLS_SEEN.lock().unwrap() = [a, b, c];
}

fn natives() -> StaticSymbols {
    StaticSymbols::new()
        .with("LuaStringTest", lua_string_test as Word, SymbolKind::Text)
        .with("LuaDecimalTest", lua_decimal_test as Word, SymbolKind::Text)
        .with(
            "LuaStringDecimalTest",
            lua_string_decimal_test as Word,
            SymbolKind::Text,
        )
        .with("copyIntoSink", copy_into_sink as Word, SymbolKind::Text)
        .with("recordWide", record_wide as Word, SymbolKind::Text)
        .with("recordThree", record_three as Word, SymbolKind::Text)
        .with("recordBools", record_bools as Word, SymbolKind::Text)
        .with("minusOne", minus_one as Word, SymbolKind::Text)
        .with("echoInt", echo_int as Word, SymbolKind::Text)
        .with(
            "_LuaTestVariable",
            LUA_TEST_VARIABLE.as_ptr() as Word,
            SymbolKind::Data,
        )
}

fn host() -> LuaHost {
    let symbols = SymbolChain::new().with(natives()).with(ProcessSymbols);
    let bridge = unsafe { Bridge::new(symbols, &BridgeConfig::default()) };
    LuaHost::start(bridge).unwrap()
}

fn global<T: mlua::FromLua>(host: &LuaHost, name: &str) -> T {
    host.lua().globals().get(name).unwrap()
}

#[test]
fn test_sample_script() {
    let host = host();
    host.run_script(&fixture_path("sample")).unwrap();

    assert_eq!(*STRING_SEEN.lock().unwrap(), "Hello You!");
    assert_eq!(DECIMAL_SEEN.load(Ordering::SeqCst), 25);
    assert_eq!(global::<i64>(&host, "decimal_result") as i32, 25);
    assert_eq!(
        *PAIR_SEEN.lock().unwrap(),
        ("This is a string.".to_string(), 91)
    );
    assert_eq!(SINK.lock().unwrap().as_slice(), b"Just a string.\0");
    assert_eq!(global::<i64>(&host, "after"), 321);
    assert_eq!(LUA_TEST_VARIABLE.load(Ordering::SeqCst), 321);
    host.stop();
}

#[test]
fn test_missing_symbols_yield_no_value() {
    let host = host();
    host.run_script(&fixture_path("missing")).unwrap();

    assert_eq!(global::<i64>(&host, "missing_call"), 0);
    assert_eq!(global::<i64>(&host, "missing_get"), 0);
    assert_eq!(global::<i64>(&host, "missing_set"), 0);
    assert_eq!(global::<i64>(&host, "missing_name"), 0);
    assert!(global::<bool>(&host, "still_running"));
}

#[test]
fn test_argument_marshaling() {
    let host = host();
    host.run_script(&fixture_path("arguments")).unwrap();

    let wide = WIDE_SEEN.lock().unwrap().clone();
    assert_eq!(wide, (1..=15).collect::<Vec<Word>>());
    assert!(!wide.contains(&48879));
    assert_eq!(*THREE_SEEN.lock().unwrap(), [0, 0, 0]);
    assert_eq!(*BOOLS_SEEN.lock().unwrap(), [1, 0, 0]);
}

#[test]
fn test_negative_int_results_stay_negative() {
    let host = host();
    host.run_source(
        r#"
            r = invoke("minusOne")
            failed = r < 0
            wrapped = invoke("echoInt", 2^31 + 5)
            small = invoke("echoInt", -42)
        "#,
        "=negative",
    )
    .unwrap();

    assert_eq!(global::<i64>(&host, "r"), -1);
    assert!(global::<bool>(&host, "failed"));
    assert_eq!(global::<i64>(&host, "wrapped"), -2147483643);
    assert_eq!(global::<i64>(&host, "small"), -42);
}

#[cfg(unix)]
#[test]
fn test_process_symbols_reachable_from_lua() {
    let host = host();
    host.run_source(r#"len = invoke("strlen", "hello")"#, "=strlen")
        .unwrap();
    assert_eq!(global::<i64>(&host, "len"), 5);
}

#[test]
fn test_lookup_returns_address() {
    let host = host();
    host.run_source(r#"where = lookup("LuaTestVariable")"#, "=lookup")
        .unwrap();
    assert_eq!(
        global::<i64>(&host, "where") as Word,
        LUA_TEST_VARIABLE.as_ptr() as Word
    );
}

fn answer(_bridge: &Bridge, args: &[Value]) -> Option<Value> {
    Some(Value::Integer(40 + args.len() as i64))
}

#[test]
fn test_extension_command_is_registered() {
    let symbols = natives();
    let bridge = unsafe { Bridge::new(symbols, &BridgeConfig::default()) };
    let commands = CommandTable::with_extensions(&[Command::new("answer", answer)]);
    let host = LuaHost::start_with(bridge, commands).unwrap();

    host.run_source("value = answer(1, 2)", "=ext").unwrap();
    assert_eq!(global::<i64>(&host, "value"), 42);
    assert!(host.commands().get("answer").is_some());
}

#[test]
fn test_missing_script_file() {
    let host = host();
    let result = host.run_script(Path::new("/nonexistent/script.lua"));
    assert!(matches!(result, Err(HostError::Io { .. })));
}

#[test]
fn test_syntax_error_is_reported() {
    let host = host();
    let result = host.run_source("invoke(", "=broken");
    assert!(matches!(result, Err(HostError::Lua(_))));
}
