// Common test utilities and fixture loading

use std::path::PathBuf;

/// Path of a Lua fixture script by name
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.lua", name))
}
