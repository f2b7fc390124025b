//! Invoke a native function by name with the fixed-arity convention

use crate::abi::CallAdapter;
use crate::errors::{BridgeError, LookupTarget};
use crate::marshal::{MarshalContext, from_word};
use crate::naming::NamingPolicy;
use crate::resolver::resolve_any;
use crate::symbols::SymbolTable;
use crate::value::Value;

/// Call the function `name` with `args`.
///
/// At most fifteen arguments are marshaled; the rest are dropped without
/// being read. The callee always receives fifteen words, zero past the
/// supplied arguments. A failed lookup returns before anything is called.
///
/// # Safety
///
/// Whatever `name` resolves to is executed as native code. It must be a
/// function that tolerates being called with fifteen word arguments.
pub unsafe fn invoke(
    table: &dyn SymbolTable,
    policy: NamingPolicy,
    adapter: &dyn CallAdapter,
    name: &str,
    args: &[Value],
) -> Result<Value, BridgeError> {
    log::debug!("invoke {name} with {} argument(s)", args.len());

    let mut ctx = MarshalContext::new();
    let frame = ctx.frame(args);

    let symbol = resolve_any(table, &[policy.call_name(name)], LookupTarget::Function)?;

    let words = frame.words();
    let result = unsafe { adapter.call(symbol.address, &words) };
    // String buffers in `ctx` must outlive the call
    drop(frame);
    drop(ctx);

    Ok(from_word(result))
}
