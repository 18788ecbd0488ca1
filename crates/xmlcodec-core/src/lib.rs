//! Core types, configuration, and path resolution for xmlcodec.
//!
//! This crate holds what the codec needs from its surroundings: the
//! [`CodecConfig`] it is built from, the [`ReaderMode`] choice, and the
//! [`PathResolver`] collaborator that normalizes caller paths.

mod config;
mod error;
mod path;
mod types;

pub use config::CodecConfig;
pub use error::{CoreError, CoreResult};
pub use path::{NormalizingResolver, PathResolver, normalize_lexically};
pub use types::ReaderMode;
