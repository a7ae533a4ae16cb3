//! # Arena Configuration
//!
//! Arena sizing is loaded once at startup from TOML:
//!
//! ```toml
//! capacity = 65536
//! dump_columns = 16
//! ```
//!
//! Missing keys fall back to [`ArenaConfig::default`]. Unknown keys are rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, ArenaResult};

/// Default backing store size in bytes.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Configuration for a single arena.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Size of the backing store in bytes.
    pub capacity: usize,
    /// Bytes per line in memory dumps. 0 writes the whole store on one line.
    pub dump_columns: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            dump_columns: 0,
        }
    }
}

impl ArenaConfig {
    /// Creates a config with the given capacity and default dump layout.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Sets the number of bytes per dump line.
    #[must_use]
    pub fn with_dump_columns(mut self, columns: usize) -> Self {
        self.dump_columns = columns;
        self
    }

    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] on malformed TOML, unknown keys or
    /// a zero capacity.
    pub fn from_toml_str(text: &str) -> ArenaResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ArenaError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if the file cannot be read or
    /// does not hold a valid config.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ArenaResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ArenaError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks the config for values no arena can be built from.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if `capacity` is zero.
    pub fn validate(&self) -> ArenaResult<()> {
        if self.capacity == 0 {
            return Err(ArenaError::InvalidConfig(
                "capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
