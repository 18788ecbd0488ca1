//! Scalar values: types that map to element text or attribute values.
//!
//! [`XmlText`] converts a value to and from its textual form. The
//! [`xml_scalar!`](crate::xml_scalar) macro turns any `XmlText` type into a
//! full element mapping (`<name>text</name>`).

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::XmlError;

/// Conversion between a value and its XML text form.
pub trait XmlText: Sized {
    /// Format the value as element text or attribute value (unescaped).
    fn to_xml_text(&self) -> Cow<'_, str>;

    /// Parse the value from unescaped element text or attribute value.
    ///
    /// # Errors
    ///
    /// Returns `XmlError::ParseError` if the text is not a valid value.
    fn from_xml_text(text: &str) -> Result<Self, XmlError>;
}

/// Implement [`XmlSerialize`](crate::XmlSerialize),
/// [`XmlDeserialize`](crate::XmlDeserialize), [`XmlRoot`](crate::XmlRoot) and
/// [`XmlElement`](crate::XmlElement) for types that implement [`XmlText`](crate::XmlText).
///
/// ```
/// use std::borrow::Cow;
/// use xmlcodec::{XmlError, XmlText};
///
/// #[derive(Debug, PartialEq)]
/// enum Level { Low, High }
///
/// impl XmlText for Level {
///     fn to_xml_text(&self) -> Cow<'_, str> {
///         Cow::Borrowed(match self { Level::Low => "low", Level::High => "high" })
///     }
///     fn from_xml_text(text: &str) -> Result<Self, XmlError> {
///         match text {
///             "low" => Ok(Level::Low),
///             "high" => Ok(Level::High),
///             other => Err(XmlError::ParseError(format!("invalid level: {other}"))),
///         }
///     }
/// }
///
/// xmlcodec::xml_scalar!(Level);
///
/// let xml = xmlcodec::to_xml_string(&Level::High).unwrap();
/// assert!(xml.contains("<Level>high</Level>"));
/// ```
#[macro_export]
macro_rules! xml_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::XmlSerialize for $ty {
                fn serialize_xml<W: ::std::io::Write>(
                    &self,
                    writer: &mut $crate::quick_xml::Writer<W>,
                    name: &str,
                ) -> ::std::io::Result<()> {
                    $crate::write_text_element(writer, name, &$crate::XmlText::to_xml_text(self))
                }
            }

            impl $crate::XmlDeserialize for $ty {
                fn deserialize_xml<R: ::std::io::BufRead>(
                    reader: &mut $crate::XmlReader<R>,
                    start: &$crate::StartTag,
                ) -> ::std::result::Result<Self, $crate::XmlError> {
                    let text = reader.read_text(start.name())?;
                    <$ty as $crate::XmlText>::from_xml_text(&text)
                }
            }

            impl $crate::XmlRoot for $ty {}

            impl $crate::XmlElement for $ty {}
        )+
    };
}

/// `FromStr`-based scalars; surrounding whitespace is ignored when parsing.
macro_rules! impl_xml_text_parse {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl XmlText for $ty {
                fn to_xml_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }

                fn from_xml_text(text: &str) -> Result<Self, XmlError> {
                    text.trim().parse::<$ty>().map_err(|e| {
                        XmlError::ParseError(format!(
                            "invalid {} '{text}': {e}",
                            stringify!($ty)
                        ))
                    })
                }
            }
        )+
    };
}

impl_xml_text_parse!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl XmlText for String {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn from_xml_text(text: &str) -> Result<Self, XmlError> {
        Ok(text.to_owned())
    }
}

impl XmlText for bool {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }

    fn from_xml_text(text: &str) -> Result<Self, XmlError> {
        parse_bool(text.trim())
    }
}

impl XmlText for char {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn from_xml_text(text: &str) -> Result<Self, XmlError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(XmlError::ParseError(format!(
                "invalid char '{text}': expected exactly one character"
            ))),
        }
    }
}

impl XmlText for DateTime<Utc> {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Owned(format_timestamp(self))
    }

    fn from_xml_text(text: &str) -> Result<Self, XmlError> {
        parse_timestamp(text.trim())
    }
}

crate::xml_scalar!(
    String,
    bool,
    char,
    DateTime<Utc>,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
);

/// Parse a boolean from XML text (`true`/`false`, or the schema forms `1`/`0`).
fn parse_bool(s: &str) -> Result<bool, XmlError> {
    match s {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(XmlError::ParseError(format!("invalid boolean: {s}"))),
    }
}

/// Format a `DateTime<Utc>` as RFC 3339 with a `Z` suffix, keeping sub-second
/// digits only when present.
fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an RFC 3339 / ISO 8601 timestamp from XML text.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, XmlError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Zone-less form: 2006-02-03T16:45:09.000Z without offset validation.
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
                .map(|ndt| ndt.and_utc())
        })
        .map_err(|e| XmlError::ParseError(format!("invalid timestamp '{s}': {e}")))
}
