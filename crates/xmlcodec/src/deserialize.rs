//! XML deserialization: parsing XML documents into Rust values.
//!
//! This module provides the [`XmlDeserialize`] trait and the document-level
//! readers. The root element must carry the name the target type expects
//! ([`XmlRoot::root_name`]) and nothing but whitespace may follow it.

use std::io::BufRead;

use crate::error::XmlError;
use crate::mapping::{XmlElement, XmlRoot};
use crate::reader::{StartTag, XmlReader};

/// Trait for deserializing values from XML.
///
/// Implementors parse the children of an element from the reader and build
/// the value. The element's start tag has already been consumed by the caller
/// and is passed in for its name and attributes; the implementation reads all
/// child content and returns once the matching end tag is consumed.
pub trait XmlDeserialize: Sized {
    /// Deserialize an instance from the element `start`.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the XML is malformed or required members are missing.
    fn deserialize_xml<R: BufRead>(
        reader: &mut XmlReader<R>,
        start: &StartTag,
    ) -> Result<Self, XmlError>;
}

/// Deserialize a typed value from any buffered XML source.
///
/// Reads synchronously to the end of the source.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed, the root element has the
/// wrong name, or deserialization fails.
pub fn from_xml_reader<T, R>(source: R) -> Result<T, XmlError>
where
    T: XmlDeserialize + XmlRoot,
    R: BufRead,
{
    let mut reader = XmlReader::new(source);
    let root = reader.read_root()?;

    let expected = T::root_name();
    if root.local_name() != expected {
        return Err(XmlError::UnexpectedElement(format!(
            "<{}> where <{expected}> was expected",
            root.name()
        )));
    }

    let value = T::deserialize_xml(&mut reader, &root)?;
    reader.expect_end_of_document()?;
    Ok(value)
}

/// Deserialize a typed value from an XML byte slice.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or deserialization fails.
pub fn from_xml_slice<T: XmlDeserialize + XmlRoot>(xml: &[u8]) -> Result<T, XmlError> {
    from_xml_reader(xml)
}

/// Deserialize a typed value from an XML string.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or deserialization fails.
pub fn from_xml_str<T: XmlDeserialize + XmlRoot>(xml: &str) -> Result<T, XmlError> {
    from_xml_slice(xml.as_bytes())
}

/// A present root element always yields `Some`.
impl<T: XmlDeserialize + XmlElement> XmlDeserialize for Option<T> {
    fn deserialize_xml<R: BufRead>(
        reader: &mut XmlReader<R>,
        start: &StartTag,
    ) -> Result<Self, XmlError> {
        T::deserialize_xml(reader, start).map(Some)
    }
}
