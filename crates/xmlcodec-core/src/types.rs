//! Common type definitions shared across xmlcodec crates.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// How XML files are read before parsing.
///
/// Both modes run the same parser with the same settings, so they accept and
/// reject exactly the same documents. Neither performs asynchronous I/O.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderMode {
    /// Read the whole file into memory, then parse from the buffer.
    #[default]
    Buffered,
    /// Parse incrementally from a buffered file handle.
    Streaming,
}

impl ReaderMode {
    /// Get the mode as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buffered => "buffered",
            Self::Streaming => "streaming",
        }
    }
}

impl FromStr for ReaderMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buffered" | "buffer" => Ok(Self::Buffered),
            "streaming" | "stream" => Ok(Self::Streaming),
            other => Err(CoreError::Config(format!("unknown reader mode: {other}"))),
        }
    }
}

impl fmt::Display for ReaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
