//! Formatter configuration.

use serde::{Deserialize, Serialize};

use crate::buffer::DEFAULT_CAPACITY;

/// Settings for [`BasicLineFormatter`](crate::BasicLineFormatter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Capacity of buffers allocated for header lines when the caller does
    /// not supply one.
    pub default_capacity: usize,
}

impl FormatterConfig {
    pub const fn new() -> Self {
        Self {
            default_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self::new()
    }
}
