//! XML serialization: converting Rust values to XML documents.
//!
//! This module provides the [`XmlSerialize`] trait and the document-level
//! writers. Documents always follow the same conventions:
//!
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`
//! - Root element named by [`XmlRoot::root_name`]
//! - Members as child elements or attributes, as the type's mapping says
//! - Booleans: lowercase `true`/`false`

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::error::XmlError;
use crate::mapping::{XmlElement, XmlRoot};

/// Indentation used by the free functions in this module.
pub const DEFAULT_INDENT: usize = 2;

/// Trait for serializing values to XML.
///
/// Implementors write one element named `name`, including its attributes and
/// children, at the writer's current position. The document declaration and
/// the root name are handled by [`write_document`].
///
/// Uses `io::Result` because `quick_xml::Writer` closures require `io::Result<()>`.
pub trait XmlSerialize {
    /// Serialize this value as an element called `name`.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if writing to the underlying writer fails.
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>, name: &str) -> io::Result<()>;

    /// Whether serializing would write nothing at all.
    ///
    /// Only an empty `Option` is absent; an absent value cannot be a document.
    fn is_absent(&self) -> bool {
        false
    }
}

/// Write a complete XML document for `value` to `sink`.
///
/// `indent` is the number of spaces per nesting level; `0` writes everything
/// on one line.
///
/// # Errors
///
/// Returns `XmlError` if `value` is absent or writing fails.
pub fn write_document<W, T>(sink: W, value: &T, indent: usize) -> Result<(), XmlError>
where
    W: Write,
    T: XmlSerialize + XmlRoot,
{
    let root = T::root_name();
    if value.is_absent() {
        return Err(XmlError::MissingElement(format!("{root} (absent root value)")));
    }

    let mut writer = if indent > 0 {
        Writer::new_with_indent(sink, b' ', indent)
    } else {
        Writer::new(sink)
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    value.serialize_xml(&mut writer, &root)?;
    writer.get_mut().flush()?;

    Ok(())
}

/// Serialize a value to an XML byte vector.
///
/// # Errors
///
/// Returns `XmlError` if serialization fails.
pub fn to_xml_vec<T: XmlSerialize + XmlRoot>(value: &T) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(512);
    write_document(&mut buf, value, DEFAULT_INDENT)?;
    Ok(buf)
}

/// Serialize a value to an XML string.
///
/// # Errors
///
/// Returns `XmlError` if serialization fails.
pub fn to_xml_string<T: XmlSerialize + XmlRoot>(value: &T) -> Result<String, XmlError> {
    let buf = to_xml_vec(value)?;
    String::from_utf8(buf).map_err(|e| XmlError::ParseError(e.to_string()))
}

/// Serialize a value as XML into any writer.
///
/// # Errors
///
/// Returns `XmlError` if serialization or writing fails.
pub fn to_xml_writer<W: Write, T: XmlSerialize + XmlRoot>(
    writer: W,
    value: &T,
) -> Result<(), XmlError> {
    write_document(writer, value, DEFAULT_INDENT)
}

// ---------------------------------------------------------------------------
// Helper functions for writing common XML patterns
// ---------------------------------------------------------------------------

/// Write a simple `<tag>text</tag>` element.
///
/// # Errors
///
/// Returns `io::Error` if writing fails.
pub fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// XmlSerialize implementations for containers
// ---------------------------------------------------------------------------

impl<T: XmlSerialize + XmlElement> XmlSerialize for Option<T> {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>, name: &str) -> io::Result<()> {
        if let Some(ref value) = *self {
            value.serialize_xml(writer, name)?;
        }
        Ok(())
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

/// Each item becomes one element named `name`, in order.
impl<T: XmlSerialize + XmlElement> XmlSerialize for Vec<T> {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>, name: &str) -> io::Result<()> {
        for item in self {
            item.serialize_xml(writer, name)?;
        }
        Ok(())
    }
}
