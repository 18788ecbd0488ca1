//! Pull reader over quick-xml events.
//!
//! [`XmlReader`] wraps a `quick_xml::Reader` over any [`BufRead`] source and
//! hands out owned [`Token`]s. The same parser configuration is used whether
//! the source is an in-memory slice or a buffered file, so both reject the
//! same malformed input.

use std::borrow::Cow;
use std::io::{self, BufRead};

use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::encoding::Decoder;

use crate::error::XmlError;
use crate::scalar::XmlText;

/// An opened element: its qualified name and unescaped attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    name: String,
    attributes: Vec<(String, String)>,
}

impl StartTag {
    /// Create a start tag from a name and attribute list.
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// The qualified element name, including any namespace prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element name without its namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Look up an attribute value by qualified name.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a required attribute.
    pub fn required_attribute<T: XmlText>(&self, key: &str) -> Result<T, XmlError> {
        let raw = self.attribute(key).ok_or_else(|| {
            XmlError::MissingAttribute(format!("{key} on <{}>", self.name))
        })?;
        T::from_xml_text(raw)
    }

    /// Parse an attribute that may be absent.
    pub fn optional_attribute<T: XmlText>(&self, key: &str) -> Result<Option<T>, XmlError> {
        self.attribute(key).map(T::from_xml_text).transpose()
    }

    fn from_event(e: &BytesStart<'_>, decoder: Decoder) -> Result<Self, XmlError> {
        let name = decode_name(e.name().as_ref())?;
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = decode_name(attr.key.as_ref())?;
            let value = attr
                .decode_and_unescape_value(decoder)
                .map_err(|err| XmlError::Malformed(err.to_string()))?;
            attributes.push((key, value.into_owned()));
        }
        Ok(Self { name, attributes })
    }
}

/// One step of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An element was opened. Self-closing elements yield `Start` then `End`.
    Start(StartTag),
    /// The innermost open element was closed.
    End(String),
    /// Character data with references and CDATA already resolved.
    Text(String),
    /// End of input.
    Eof,
}

/// Owned-token pull reader.
#[derive(Debug)]
pub struct XmlReader<R> {
    inner: Reader<R>,
    buf: Vec<u8>,
}

impl<'a> XmlReader<&'a [u8]> {
    /// Create a reader over an in-memory document.
    #[must_use]
    pub fn from_slice(xml: &'a [u8]) -> Self {
        Self::new(xml)
    }
}

impl<R: BufRead> XmlReader<R> {
    /// Create a reader over a buffered source.
    pub fn new(source: R) -> Self {
        let mut inner = Reader::from_reader(source);
        let config = inner.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = true;
        config.check_end_names = true;
        Self {
            inner,
            buf: Vec::with_capacity(1024),
        }
    }

    /// Read the next token, skipping declarations, comments, processing
    /// instructions and doctypes.
    pub fn next_token(&mut self) -> Result<Token, XmlError> {
        loop {
            self.buf.clear();
            let decoder = self.inner.decoder();
            let event = self
                .inner
                .read_event_into(&mut self.buf)
                .map_err(map_quick_xml_error)?;
            let token = match event {
                Event::Start(e) => Token::Start(StartTag::from_event(&e, decoder)?),
                Event::End(e) => Token::End(decode_name(e.name().as_ref())?),
                Event::Text(e) => {
                    let decoded = e
                        .decode()
                        .map_err(|err| XmlError::Malformed(err.to_string()))?;
                    let unescaped = quick_xml::escape::unescape(&decoded)
                        .map_err(|err| XmlError::Malformed(err.to_string()))?;
                    Token::Text(unescaped.into_owned())
                }
                Event::CData(e) => {
                    let decoded = e
                        .decode()
                        .map_err(|err| XmlError::Malformed(err.to_string()))?;
                    Token::Text(decoded.into_owned())
                }
                Event::GeneralRef(e) => Token::Text(resolve_reference(&e)?.into_owned()),
                Event::Eof => Token::Eof,
                // `Empty` never shows up with `expand_empty_elements` set.
                _ => continue,
            };
            return Ok(token);
        }
    }

    /// Advance to the document's root element.
    ///
    /// Only whitespace may precede it.
    pub fn read_root(&mut self) -> Result<StartTag, XmlError> {
        loop {
            match self.next_token()? {
                Token::Start(tag) => return Ok(tag),
                Token::Text(text) if text.trim().is_empty() => {}
                Token::Text(_) => {
                    return Err(XmlError::Malformed(
                        "text before the root element".to_owned(),
                    ));
                }
                Token::End(name) => {
                    return Err(XmlError::Malformed(format!(
                        "closing tag </{name}> before the root element"
                    )));
                }
                Token::Eof => {
                    return Err(XmlError::Malformed("missing root element".to_owned()));
                }
            }
        }
    }

    /// Consume what follows the root element; only whitespace may remain.
    pub fn expect_end_of_document(&mut self) -> Result<(), XmlError> {
        loop {
            match self.next_token()? {
                Token::Eof => return Ok(()),
                Token::Text(text) if text.trim().is_empty() => {}
                Token::Start(tag) => {
                    return Err(XmlError::Malformed(format!(
                        "second root element <{}>",
                        tag.name()
                    )));
                }
                Token::Text(_) | Token::End(_) => {
                    return Err(XmlError::Malformed(
                        "content after the root element".to_owned(),
                    ));
                }
            }
        }
    }

    /// Return the next child element of `parent`, or `None` once the end tag
    /// of `parent` has been consumed. Text between children is ignored.
    pub fn next_child(&mut self, parent: &str) -> Result<Option<StartTag>, XmlError> {
        loop {
            match self.next_token()? {
                Token::Start(tag) => return Ok(Some(tag)),
                Token::End(_) => return Ok(None),
                Token::Text(_) => {}
                Token::Eof => return Err(eof_inside(parent)),
            }
        }
    }

    /// Read the text content of the current element and consume its end tag.
    ///
    /// Expects the reader to be positioned right after the element's start.
    pub fn read_text(&mut self, element: &str) -> Result<String, XmlError> {
        let mut text = String::new();
        loop {
            match self.next_token()? {
                Token::Text(chunk) => text.push_str(&chunk),
                Token::End(_) => return Ok(text),
                Token::Start(child) => {
                    return Err(XmlError::UnexpectedElement(format!(
                        "<{}> inside text element <{element}>",
                        child.name()
                    )));
                }
                Token::Eof => return Err(eof_inside(element)),
            }
        }
    }

    /// Skip over the current element and all its children.
    pub fn skip_element(&mut self, element: &str) -> Result<(), XmlError> {
        let mut depth: u32 = 1;
        loop {
            match self.next_token()? {
                Token::Start(_) => depth += 1,
                Token::End(_) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Token::Text(_) => {}
                Token::Eof => return Err(eof_inside(element)),
            }
        }
    }
}

fn eof_inside(element: &str) -> XmlError {
    XmlError::Malformed(format!("unexpected end of document inside <{element}>"))
}

fn decode_name(raw: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| XmlError::Malformed(e.to_string()))
}

fn resolve_reference<'a>(e: &'a BytesRef<'_>) -> Result<Cow<'a, str>, XmlError> {
    if let Some(ch) = e
        .resolve_char_ref()
        .map_err(|err| XmlError::Malformed(err.to_string()))?
    {
        return Ok(Cow::Owned(ch.to_string()));
    }
    let name = e
        .decode()
        .map_err(|err| XmlError::Malformed(err.to_string()))?;
    quick_xml::escape::resolve_predefined_entity(&name)
        .map(Cow::Borrowed)
        .ok_or_else(|| XmlError::Malformed(format!("unknown entity &{name};")))
}

/// Surface source I/O failures as I/O errors instead of syntax errors.
fn map_quick_xml_error(err: quick_xml::Error) -> XmlError {
    match err {
        quick_xml::Error::Io(e) => XmlError::Io(io::Error::new(e.kind(), e.to_string())),
        other => XmlError::QuickXml(other),
    }
}
