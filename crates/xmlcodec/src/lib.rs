//! Typed XML serialization and deserialization with file helpers.
//!
//! Types describe their XML shape once, through [`XmlRoot`], [`XmlSerialize`]
//! and [`XmlDeserialize`] (usually written by [`xml_mapping!`]), and can then
//! be converted to and from XML text or files.
//!
//! # Key components
//!
//! - [`XmlCodec`]: the forgiving facade. Every operation returns a value:
//!   failures are reported to an [`ErrorSink`] and replaced by `None`, `false`
//!   or a caller-supplied default. `try_*` variants return [`CodecError`].
//! - [`to_xml_string`] / [`from_xml_str`] and friends: the strict free
//!   functions underneath, returning [`XmlError`].
//! - [`xml_mapping!`] and [`xml_scalar!`]: mapping descriptions for structs
//!   and text-valued types.
//!
//! # Document conventions
//!
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`
//! - Root element named after the type unless the mapping overrides it
//! - Booleans: lowercase `true`/`false`
//! - Timestamps: RFC 3339 in UTC (`2006-02-03T16:45:09Z`)

pub mod codec;
pub mod deserialize;
pub mod error;
pub mod mapping;
pub mod reader;
pub mod scalar;
pub mod serialize;
pub mod sink;

pub use codec::XmlCodec;
pub use deserialize::{XmlDeserialize, from_xml_reader, from_xml_slice, from_xml_str};
pub use error::{CodecError, XmlError};
pub use mapping::{Optional, Repeated, Required, XmlElement, XmlRoot, short_type_name};
pub use quick_xml;
pub use reader::{StartTag, Token, XmlReader};
pub use scalar::XmlText;
pub use serialize::{
    DEFAULT_INDENT, XmlSerialize, to_xml_string, to_xml_vec, to_xml_writer, write_document,
    write_text_element,
};
pub use sink::{ErrorSink, MemorySink, Report, TracingSink};
pub use xmlcodec_core::{CodecConfig, NormalizingResolver, PathResolver, ReaderMode};
