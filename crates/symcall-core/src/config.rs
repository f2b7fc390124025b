//! Bridge configuration, read from RON files.
//!
//! ```ron
//! (
//!     naming: Decorated,
//!     adapter: Libffi,
//!     verbose: true,
//!     libraries: ["/opt/app/lib/libdevice.so"],
//! )
//! ```

use crate::abi::AdapterKind;
use crate::errors::ConfigError;
use crate::naming::NamingPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Name form tried when invoking functions
    pub naming: NamingPolicy,
    pub adapter: AdapterKind,
    /// Emit per-argument tracing
    pub verbose: bool,
    /// Shared libraries searched before the process symbol table
    pub libraries: Vec<PathBuf>,
}

impl BridgeConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
