//! Per-type mapping descriptions.
//!
//! A type becomes a document root by implementing [`XmlRoot`]; its members are
//! described by [`XmlSerialize`](crate::XmlSerialize) and
//! [`XmlDeserialize`](crate::XmlDeserialize). The [`xml_mapping!`](crate::xml_mapping)
//! macro writes all three from a field list:
//!
//! ```
//! use xmlcodec::xml_mapping;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Server {
//!     id: u32,
//!     name: String,
//!     proxy: Option<String>,
//!     hosts: Vec<String>,
//! }
//!
//! xml_mapping!(Server {
//!     attr id = "id",
//!     elem name = "Name",
//!     opt proxy = "Proxy",
//!     list hosts = "Host",
//! });
//!
//! let server = Server { id: 7, name: "edge".into(), proxy: None, hosts: vec!["a".into(), "b".into()] };
//! let xml = xmlcodec::to_xml_string(&server).unwrap();
//! assert!(xml.contains(r#"<Server id="7">"#));
//! assert_eq!(xmlcodec::from_xml_str::<Server>(&xml).unwrap(), server);
//! ```
//!
//! Field kinds:
//!
//! | Kind | Field type | XML |
//! |------|-----------|-----|
//! | `attr` | `T: XmlText` | required attribute |
//! | `opt_attr` | `Option<T: XmlText>` | attribute, omitted when `None` |
//! | `elem` | `T: XmlElement` | required child element |
//! | `opt` | `Option<T: XmlElement>` | child element, omitted when `None` |
//! | `list` | `Vec<T: XmlElement>` | one child element per item |
//!
//! `Option` and `Vec` are not [`XmlElement`]s, so nested shapes such as
//! `Vec<Option<T>>` or `Option<Option<T>>`, which would lose items on the way
//! out, do not compile.

use std::borrow::Cow;
use std::io::BufRead;

use crate::deserialize::XmlDeserialize;
use crate::error::XmlError;
use crate::reader::{StartTag, XmlReader};

/// A type that can be the root element of a document.
pub trait XmlRoot {
    /// Root element name. Defaults to the type's name without module path
    /// or generic arguments.
    fn root_name() -> Cow<'static, str> {
        Cow::Owned(short_type_name(std::any::type_name::<Self>()).to_owned())
    }
}

impl<T: XmlRoot> XmlRoot for Option<T> {
    fn root_name() -> Cow<'static, str> {
        T::root_name()
    }
}

/// A mapping that always writes exactly one element.
///
/// [`xml_mapping!`](crate::xml_mapping) and [`xml_scalar!`](crate::xml_scalar)
/// implement it; hand-written mappings opt in with an empty impl. Only
/// `XmlElement` types can be `elem`, `opt` or `list` members, the inner value
/// of an `Option`, or the item of a `Vec`.
///
/// A list of optional items is rejected:
///
/// ```compile_fail
/// #[derive(Debug, Default)]
/// struct Queue {
///     items: Vec<Option<String>>,
/// }
///
/// xmlcodec::xml_mapping!(Queue { list items = "Item" });
/// ```
///
/// So is a doubly optional member:
///
/// ```compile_fail
/// #[derive(Debug, Default)]
/// struct Queue {
///     nested: Option<Option<String>>,
/// }
///
/// xmlcodec::xml_mapping!(Queue { opt nested = "Nested" });
/// ```
///
/// And an optional value declared as a required element:
///
/// ```compile_fail
/// #[derive(Debug, Default)]
/// struct Queue {
///     head: Option<String>,
/// }
///
/// xmlcodec::xml_mapping!(Queue { elem head = "Head" });
/// ```
pub trait XmlElement {}

/// `crate::module::Settings<u8>` → `Settings`.
#[must_use]
pub fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Collects a required child element. A repeated element replaces the
/// earlier one.
#[derive(Debug)]
pub struct Required<T>(Option<T>);

impl<T> Required<T> {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self(None)
    }
}

impl<T> Default for Required<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: XmlDeserialize + XmlElement> Required<T> {
    /// Deserialize the element the reader is positioned in.
    pub fn accept<R: BufRead>(
        &mut self,
        reader: &mut XmlReader<R>,
        start: &StartTag,
    ) -> Result<(), XmlError> {
        self.0 = Some(T::deserialize_xml(reader, start)?);
        Ok(())
    }

    /// Return the collected value, or a missing-element error naming `tag`.
    pub fn finish(self, tag: &str) -> Result<T, XmlError> {
        self.0
            .ok_or_else(|| XmlError::MissingElement(tag.to_owned()))
    }
}

/// Collects an optional child element.
#[derive(Debug)]
pub struct Optional<T>(Option<T>);

impl<T> Optional<T> {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self(None)
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: XmlDeserialize + XmlElement> Optional<T> {
    /// Deserialize the element the reader is positioned in.
    pub fn accept<R: BufRead>(
        &mut self,
        reader: &mut XmlReader<R>,
        start: &StartTag,
    ) -> Result<(), XmlError> {
        self.0 = Some(T::deserialize_xml(reader, start)?);
        Ok(())
    }

    /// Return the collected value, if any.
    #[allow(clippy::unnecessary_wraps)]
    pub fn finish(self, _tag: &str) -> Result<Option<T>, XmlError> {
        Ok(self.0)
    }
}

/// Collects every occurrence of a repeated child element.
#[derive(Debug)]
pub struct Repeated<T>(Vec<T>);

impl<T> Repeated<T> {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }
}

impl<T> Default for Repeated<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: XmlDeserialize + XmlElement> Repeated<T> {
    /// Deserialize the element the reader is positioned in and append it.
    pub fn accept<R: BufRead>(
        &mut self,
        reader: &mut XmlReader<R>,
        start: &StartTag,
    ) -> Result<(), XmlError> {
        self.0.push(T::deserialize_xml(reader, start)?);
        Ok(())
    }

    /// Return the collected values in document order.
    #[allow(clippy::unnecessary_wraps)]
    pub fn finish(self, _tag: &str) -> Result<Vec<T>, XmlError> {
        Ok(self.0)
    }
}

/// Implement [`XmlRoot`](crate::XmlRoot), [`XmlSerialize`](crate::XmlSerialize)
/// and [`XmlDeserialize`](crate::XmlDeserialize) for a struct from a field list.
///
/// ```text
/// xml_mapping!(Type { kind field = "Tag", ... });
/// xml_mapping!(Type as "RootName" { kind field = "Tag", ... });
/// ```
///
/// Kinds are `attr`, `opt_attr`, `elem`, `opt` and `list`; see the
/// [`mapping`](crate::mapping) module docs. Unknown child elements are skipped
/// when reading.
#[macro_export]
macro_rules! xml_mapping {
    (@attr attr, $attrs:ident, $value:expr, $tag:literal) => {
        $attrs.push(($tag, $crate::XmlText::to_xml_text(&$value)));
    };
    (@attr opt_attr, $attrs:ident, $value:expr, $tag:literal) => {
        if let ::std::option::Option::Some(value) = &$value {
            $attrs.push(($tag, $crate::XmlText::to_xml_text(value)));
        }
    };
    (@attr elem, $attrs:ident, $value:expr, $tag:literal) => {};
    (@attr opt, $attrs:ident, $value:expr, $tag:literal) => {};
    (@attr list, $attrs:ident, $value:expr, $tag:literal) => {};

    (@child attr, $w:ident, $value:expr, $tag:literal) => {};
    (@child opt_attr, $w:ident, $value:expr, $tag:literal) => {};
    (@child elem, $w:ident, $value:expr, $tag:literal) => {
        $crate::XmlSerialize::serialize_xml(&$value, $w, $tag)?;
    };
    (@child opt, $w:ident, $value:expr, $tag:literal) => {
        $crate::XmlSerialize::serialize_xml(&$value, $w, $tag)?;
    };
    (@child list, $w:ident, $value:expr, $tag:literal) => {
        $crate::XmlSerialize::serialize_xml(&$value, $w, $tag)?;
    };

    (@slot attr, $start:ident, $tag:literal) => { $start.required_attribute($tag)? };
    (@slot opt_attr, $start:ident, $tag:literal) => { $start.optional_attribute($tag)? };
    (@slot elem, $start:ident, $tag:literal) => { $crate::mapping::Required::new() };
    (@slot opt, $start:ident, $tag:literal) => { $crate::mapping::Optional::new() };
    (@slot list, $start:ident, $tag:literal) => { $crate::mapping::Repeated::new() };

    (@accept attr, $slot:ident, $reader:ident, $child:ident, $tag:literal) => { false };
    (@accept opt_attr, $slot:ident, $reader:ident, $child:ident, $tag:literal) => { false };
    (@accept $kind:ident, $slot:ident, $reader:ident, $child:ident, $tag:literal) => {
        ($child.local_name() == $tag && {
            $slot.accept($reader, &$child)?;
            true
        })
    };

    (@finish attr, $slot:ident, $tag:literal) => { $slot };
    (@finish opt_attr, $slot:ident, $tag:literal) => { $slot };
    (@finish $kind:ident, $slot:ident, $tag:literal) => { $slot.finish($tag)? };

    (@impl $ty:ty { $($kind:ident $field:ident = $tag:literal),* }) => {
        impl $crate::XmlElement for $ty {}

        impl $crate::XmlSerialize for $ty {
            #[allow(unused_mut, unused_variables)]
            fn serialize_xml<W: ::std::io::Write>(
                &self,
                writer: &mut $crate::quick_xml::Writer<W>,
                name: &str,
            ) -> ::std::io::Result<()> {
                let mut attributes: ::std::vec::Vec<(&'static str, ::std::borrow::Cow<'_, str>)> =
                    ::std::vec::Vec::new();
                $( $crate::xml_mapping!(@attr $kind, attributes, self.$field, $tag); )*

                let mut element = writer.create_element(name);
                for (key, value) in &attributes {
                    element = element.with_attribute((*key, value.as_ref()));
                }
                element.write_inner_content(|w| {
                    $( $crate::xml_mapping!(@child $kind, w, self.$field, $tag); )*
                    Ok(())
                })?;
                Ok(())
            }
        }

        impl $crate::XmlDeserialize for $ty {
            #[allow(unused_mut)]
            fn deserialize_xml<R: ::std::io::BufRead>(
                reader: &mut $crate::XmlReader<R>,
                start: &$crate::StartTag,
            ) -> ::std::result::Result<Self, $crate::XmlError> {
                $( let mut $field = $crate::xml_mapping!(@slot $kind, start, $tag); )*

                while let ::std::option::Option::Some(child) = reader.next_child(start.name())? {
                    let handled = $( $crate::xml_mapping!(@accept $kind, $field, reader, child, $tag) || )* false;
                    if !handled {
                        reader.skip_element(child.name())?;
                    }
                }

                ::std::result::Result::Ok(Self {
                    $( $field: $crate::xml_mapping!(@finish $kind, $field, $tag), )*
                })
            }
        }
    };

    ($ty:ty as $root:literal { $($kind:ident $field:ident = $tag:literal),* $(,)? }) => {
        impl $crate::XmlRoot for $ty {
            fn root_name() -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed($root)
            }
        }
        $crate::xml_mapping!(@impl $ty { $($kind $field = $tag),* });
    };

    ($ty:ty { $($kind:ident $field:ident = $tag:literal),* $(,)? }) => {
        impl $crate::XmlRoot for $ty {}
        $crate::xml_mapping!(@impl $ty { $($kind $field = $tag),* });
    };
}
