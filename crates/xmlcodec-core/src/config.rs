//! Codec configuration.
//!
//! Provides [`CodecConfig`]. Values can be built in code or loaded from
//! environment variables via [`CodecConfig::from_env`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::types::ReaderMode;

/// Configuration for an XML codec instance.
///
/// # Examples
///
/// ```
/// use xmlcodec_core::{CodecConfig, ReaderMode};
///
/// let config = CodecConfig::builder()
///     .reader_mode(ReaderMode::Streaming)
///     .indent(0)
///     .build();
/// assert_eq!(config.reader_mode, ReaderMode::Streaming);
/// assert!(config.base_dir.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct CodecConfig {
    /// How files are read before parsing.
    #[builder(default)]
    pub reader_mode: ReaderMode,

    /// Spaces per nesting level in written documents; `0` writes compact XML.
    #[builder(default = 2)]
    pub indent: usize,

    /// Directory that relative paths are resolved against. Falls back to the
    /// process working directory when unset.
    #[builder(default, setter(strip_option))]
    pub base_dir: Option<PathBuf>,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    ///
    /// The codec only emits `tracing` events and never reads this value. It
    /// is carried for embedding applications that install a subscriber from
    /// the same configuration.
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            reader_mode: ReaderMode::default(),
            indent: 2,
            base_dir: None,
            log_level: String::from("info"),
        }
    }
}

impl CodecConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `XMLCODEC_READER_MODE` | `buffered` | `buffered` or `streaming` |
    /// | `XMLCODEC_INDENT` | `2` | Indentation width, `0` for compact output |
    /// | `XMLCODEC_BASE_DIR` | *(unset)* | Base directory for relative paths |
    /// | `LOG_LEVEL` | `info` | Log level filter |
    ///
    /// Unparseable values are ignored with a warning and the default is kept.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("XMLCODEC_READER_MODE") {
            match v.parse() {
                Ok(mode) => config.reader_mode = mode,
                Err(e) => tracing::warn!(value = %v, error = %e, "ignoring XMLCODEC_READER_MODE"),
            }
        }
        if let Ok(v) = std::env::var("XMLCODEC_INDENT") {
            match v.trim().parse() {
                Ok(indent) => config.indent = indent,
                Err(e) => tracing::warn!(value = %v, error = %e, "ignoring XMLCODEC_INDENT"),
            }
        }
        if let Ok(v) = std::env::var("XMLCODEC_BASE_DIR") {
            if !v.is_empty() {
                config.base_dir = Some(PathBuf::from(v));
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
