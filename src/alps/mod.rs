//! ALPS (Application-Level Profile Semantics) profiles.
//!
//! Profiles are assembled bottom-up: build the innermost descriptors first,
//! attach them to their parents, and finally hand the top-level descriptors to
//! [`new_profile`]. Every attach checks that no descriptor id is used twice
//! anywhere in the resulting tree.
//!
//! ```ignore
//! let search = new_descriptor("search", None, [Element::Type(Control::Safe)])?;
//! let contacts = new_descriptor("contacts", None, [
//!     Element::from(Doc::new(None, Format::Text, "List of contacts w/ search")),
//!     Element::from(search),
//! ])?;
//! let profile = new_profile([Element::from(contacts)])?;
//! println!("{}", profile.to_json()?);
//! ```

pub mod descriptor;
pub mod index;
pub mod profile;

pub use descriptor::{new_descriptor, Descriptor, DescriptorBuilder};
pub use index::IdIndex;
pub use profile::{new_profile, Profile, ProfileBody, ProfileBuilder};

use crate::document::Version;
use crate::receiver::ElementKind;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use url::Url;

/// Media type of an ALPS document encoded as JSON.
pub const MEDIA_TYPE: &str = "application/alps+json";

/// The format of a [`Doc`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Text,
    Html,
    Asciidoc,
    Markdown,
}

impl Format {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Html => "html",
            Format::Asciidoc => "asciidoc",
            Format::Markdown => "markdown",
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Format> for String {
    fn from(format: Format) -> Self {
        format.as_str().to_string()
    }
}

/// The hypermedia control a descriptor stands for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    #[default]
    Semantic,
    Safe,
    Idempotent,
    Unsafe,
}

impl Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Control::Semantic => "semantic",
            Control::Safe => "safe",
            Control::Idempotent => "idempotent",
            Control::Unsafe => "unsafe",
        };
        write!(f, "{name}")
    }
}

/// Human-readable documentation attached to a profile or descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<Url>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    format: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    value: String,
}

impl Doc {
    pub fn new(href: Option<Url>, format: impl Into<String>, value: impl Into<String>) -> Self {
        Doc {
            href,
            format: format.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn href(&self) -> Option<&Url> {
        self.href.as_ref()
    }

    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An extension element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ext {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<Url>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    value: String,
}

impl Ext {
    pub fn new(id: impl Into<String>, value: impl Into<String>, href: Option<Url>) -> Self {
        Ext {
            id: id.into(),
            href,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn href(&self) -> Option<&Url> {
        self.href.as_ref()
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A link to an external document related by `rel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    href: Url,
    #[serde(default)]
    rel: String,
}

impl Link {
    pub fn new(href: Url, rel: impl Into<String>) -> Self {
        Link {
            href,
            rel: rel.into(),
        }
    }

    #[must_use]
    pub fn href(&self) -> &Url {
        &self.href
    }

    #[must_use]
    pub fn rel(&self) -> &str {
        &self.rel
    }
}

/// One configuration step for a [`ProfileBuilder`] or [`DescriptorBuilder`].
///
/// Elements are plain values, so a list of them can be cloned and reused for
/// any number of constructions.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Profile only.
    Version(Version),
    /// Profile only. Kept on the profile but never serialized.
    Base(Url),
    Doc(Doc),
    Ext(Ext),
    Link(Link),
    Descriptor(Descriptor),
    /// Descriptor only.
    Name(String),
    /// Descriptor only.
    Type(Control),
    /// Descriptor only.
    Rt(String),
}

impl ElementKind for Element {
    fn kind(&self) -> &'static str {
        match self {
            Element::Version(_) => "version",
            Element::Base(_) => "base",
            Element::Doc(_) => "doc",
            Element::Ext(_) => "ext",
            Element::Link(_) => "link",
            Element::Descriptor(_) => "descriptor",
            Element::Name(_) => "name",
            Element::Type(_) => "type",
            Element::Rt(_) => "rt",
        }
    }
}

impl From<Version> for Element {
    fn from(version: Version) -> Self {
        Element::Version(version)
    }
}

impl From<Doc> for Element {
    fn from(doc: Doc) -> Self {
        Element::Doc(doc)
    }
}

impl From<Ext> for Element {
    fn from(ext: Ext) -> Self {
        Element::Ext(ext)
    }
}

impl From<Link> for Element {
    fn from(link: Link) -> Self {
        Element::Link(link)
    }
}

impl From<Descriptor> for Element {
    fn from(descriptor: Descriptor) -> Self {
        Element::Descriptor(descriptor)
    }
}

impl From<Control> for Element {
    fn from(control: Control) -> Self {
        Element::Type(control)
    }
}
