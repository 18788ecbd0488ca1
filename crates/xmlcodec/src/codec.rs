//! The forgiving codec facade.
//!
//! [`XmlCodec`] wraps the mapping layer with string and file operations that
//! always return: failures are reported to an [`ErrorSink`] once and turned
//! into `None`, `false` or the caller's default. Each forgiving operation has
//! a `try_` counterpart that returns the [`CodecError`] instead.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use xmlcodec::{MemorySink, XmlCodec};
//!
//! let sink = Arc::new(MemorySink::new());
//! let codec = XmlCodec::default().with_sink(sink.clone());
//!
//! let xml = codec.serialize(&42_u32).unwrap();
//! assert_eq!(codec.deserialize(&xml, 0_u32), 42);
//!
//! assert_eq!(codec.deserialize("<not valid xml", 7_u32), 7);
//! assert_eq!(sink.len(), 1);
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use xmlcodec_core::{CodecConfig, NormalizingResolver, PathResolver, ReaderMode};

use crate::deserialize::{XmlDeserialize, from_xml_reader, from_xml_slice};
use crate::error::{CodecError, XmlError};
use crate::mapping::XmlRoot;
use crate::serialize::{XmlSerialize, write_document};
use crate::sink::{ErrorSink, TracingSink};

/// Typed XML codec with string and file variants.
///
/// The codec holds only immutable configuration and shared collaborators;
/// it is cheap to clone and safe to use from several threads at once.
#[derive(Debug, Clone)]
pub struct XmlCodec {
    config: CodecConfig,
    sink: Arc<dyn ErrorSink>,
    resolver: Arc<dyn PathResolver>,
}

impl Default for XmlCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl XmlCodec {
    /// Create a codec that logs through `tracing` and resolves paths with a
    /// [`NormalizingResolver`] built from `config`.
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        let resolver = NormalizingResolver::from_config(&config);
        Self {
            config,
            sink: Arc::new(TracingSink),
            resolver: Arc::new(resolver),
        }
    }

    /// Replace the error sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the path resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn PathResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// The configuration this codec was built from.
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Forgiving operations
    // -----------------------------------------------------------------------

    /// Serialize `value` to a complete XML document.
    ///
    /// Returns `None` if the value is absent or cannot be written; the
    /// failure is reported to the sink.
    pub fn serialize<T: XmlSerialize + XmlRoot>(&self, value: &T) -> Option<String> {
        self.settle("serialize", self.try_serialize(value))
    }

    /// Serialize `value` to the file at `path`, replacing any existing file.
    ///
    /// Returns `false` on failure; the failure is reported to the sink. The
    /// existing file is truncated when it is opened, so an I/O failure while
    /// writing can leave it partially written.
    pub fn serialize_to_file<T: XmlSerialize + XmlRoot>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
    ) -> bool {
        self.serialize_to_file_with(path, value, true)
    }

    /// Serialize `value` to the file at `path`.
    ///
    /// With `overwrite` unset an existing file is left untouched and the call
    /// fails. Returns `false` on failure; the failure is reported to the sink.
    pub fn serialize_to_file_with<T: XmlSerialize + XmlRoot>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
        overwrite: bool,
    ) -> bool {
        self.settle(
            "serialize_to_file",
            self.try_serialize_to_file(path, value, overwrite),
        )
        .is_some()
    }

    /// Deserialize `source`, falling back to `default`.
    ///
    /// Empty input, malformed XML and mapping mismatches are reported to the
    /// sink and yield `default`.
    pub fn deserialize<T: XmlDeserialize + XmlRoot>(&self, source: &str, default: T) -> T {
        self.settle("deserialize", self.try_deserialize(source))
            .unwrap_or(default)
    }

    /// Deserialize `source`, falling back to `T::default()`.
    pub fn deserialize_or_default<T>(&self, source: &str) -> T
    where
        T: XmlDeserialize + XmlRoot + Default,
    {
        self.settle("deserialize", self.try_deserialize(source))
            .unwrap_or_default()
    }

    /// Deserialize the file at `path`, falling back to `default`.
    ///
    /// A missing file yields `default` without reporting anything; other
    /// failures are reported to the sink.
    pub fn deserialize_file<T: XmlDeserialize + XmlRoot>(
        &self,
        path: impl AsRef<Path>,
        default: T,
    ) -> T {
        self.settle_file(self.try_deserialize_file(path))
            .unwrap_or(default)
    }

    /// Deserialize the file at `path`, falling back to `T::default()`.
    pub fn deserialize_file_or_default<T>(&self, path: impl AsRef<Path>) -> T
    where
        T: XmlDeserialize + XmlRoot + Default,
    {
        self.settle_file(self.try_deserialize_file(path))
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Fallible operations
    // -----------------------------------------------------------------------

    /// Serialize `value` to a complete XML document.
    pub fn try_serialize<T: XmlSerialize + XmlRoot>(
        &self,
        value: &T,
    ) -> Result<String, CodecError> {
        let buf = self.render(value)?;
        String::from_utf8(buf)
            .map_err(|e| CodecError::Mapping(XmlError::ParseError(e.to_string())))
    }

    /// Serialize `value` to the file at `path` and return the resolved path.
    ///
    /// The document is rendered before the file is opened, so a value that
    /// cannot be serialized never truncates an existing file. With
    /// `overwrite` set the file is truncated on open and written in place: an
    /// I/O failure during the write leaves a partial file behind.
    pub fn try_serialize_to_file<T: XmlSerialize + XmlRoot>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
        overwrite: bool,
    ) -> Result<PathBuf, CodecError> {
        let path = self.resolver.resolve(path.as_ref())?;
        let buf = self.render(value)?;

        let mut options = OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = match options.open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(CodecError::FileConflict { path });
            }
            Err(e) => return Err(CodecError::io(path, e)),
        };
        if let Err(e) = file.write_all(&buf).and_then(|()| file.flush()) {
            return Err(CodecError::io(path, e));
        }

        debug!(path = %path.display(), bytes = buf.len(), overwrite, "wrote XML document");
        Ok(path)
    }

    /// Deserialize `source`.
    ///
    /// Empty input is rejected with [`CodecError::NullOrEmptyInput`] without
    /// being parsed.
    pub fn try_deserialize<T: XmlDeserialize + XmlRoot>(
        &self,
        source: &str,
    ) -> Result<T, CodecError> {
        if source.is_empty() {
            return Err(CodecError::NullOrEmptyInput);
        }
        Ok(from_xml_slice(source.as_bytes())?)
    }

    /// Deserialize the file at `path`.
    ///
    /// A missing file is [`CodecError::NotFound`]. The file is read according
    /// to [`CodecConfig::reader_mode`] and closed once reading is done.
    pub fn try_deserialize_file<T: XmlDeserialize + XmlRoot>(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<T, CodecError> {
        let path = self.resolver.resolve(path.as_ref())?;
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CodecError::NotFound { path });
            }
            Err(e) => return Err(CodecError::io(path, e)),
        };

        let result = match self.config.reader_mode {
            ReaderMode::Buffered => read_buffered(file),
            ReaderMode::Streaming => from_xml_reader(BufReader::new(file)),
        };

        result.map_err(|e| match e {
            XmlError::Io(source) => CodecError::io(&path, source),
            other => other.into(),
        })
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn render<T: XmlSerialize + XmlRoot>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        if value.is_absent() {
            return Err(CodecError::NullOrEmptyInput);
        }
        let mut buf = Vec::with_capacity(512);
        write_document(&mut buf, value, self.config.indent)?;
        Ok(buf)
    }

    fn settle<V>(&self, operation: &str, result: Result<V, CodecError>) -> Option<V> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.sink.report(operation, &e);
                None
            }
        }
    }

    fn settle_file<V>(&self, result: Result<V, CodecError>) -> Option<V> {
        match result {
            Err(CodecError::NotFound { path }) => {
                debug!(path = %path.display(), "XML file not found, using default");
                None
            }
            other => self.settle("deserialize_file", other),
        }
    }
}

/// Read the whole file, release the handle, then parse from memory.
fn read_buffered<T: XmlDeserialize + XmlRoot>(mut file: File) -> Result<T, XmlError> {
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    drop(file);
    from_xml_slice(&buf)
}
