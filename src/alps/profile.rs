use super::descriptor::{collect, Descriptor, DescriptorBuilder};
use super::index::IdIndex;
use super::{Control, Doc, Element, Ext, Link};
use crate::document::{Document, Version, Wrapped};
use crate::error::{BuildError, HyperError, ParseError, Target};
use crate::receiver::Receiver;
use serde::{Deserialize, Serialize, Serializer};
use url::Url;

/// The body of an `alps` document as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileBody {
    version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc: Option<Doc>,
    // An empty profile serializes `"descriptor": null`, never `[]`.
    #[serde(rename = "descriptor", serialize_with = "null_if_empty")]
    descriptors: Vec<Descriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ext: Option<Ext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<Link>,
}

fn null_if_empty<S>(descriptors: &[Descriptor], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if descriptors.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.collect_seq(descriptors)
    }
}

/// An immutable, fully validated ALPS profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    body: ProfileBody,
    base: Option<Url>,
    index: IdIndex,
}

impl Profile {
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.body.version
    }

    /// The base URL given at construction, if any. Not part of the serialized form.
    #[must_use]
    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    #[must_use]
    pub fn doc(&self) -> Option<&Doc> {
        self.body.doc.as_ref()
    }

    #[must_use]
    pub fn ext(&self) -> Option<&Ext> {
        self.body.ext.as_ref()
    }

    #[must_use]
    pub fn link(&self) -> Option<&Link> {
        self.body.link.as_ref()
    }

    /// Every descriptor id used anywhere in the profile.
    #[must_use]
    pub fn ids(&self) -> &IdIndex {
        &self.index
    }

    /// Finds descriptors anywhere in the tree whose id, name or href equals one
    /// of `identifiers`, depth-first. With no identifiers, every descriptor in
    /// the tree is returned.
    #[must_use]
    pub fn descriptors(&self, identifiers: &[&str]) -> Vec<&Descriptor> {
        let mut found = Vec::new();
        collect(&self.body.descriptors, identifiers, &mut found);
        found
    }

    /// Top-level descriptors, in attach order.
    #[must_use]
    pub fn top_level(&self) -> &[Descriptor] {
        &self.body.descriptors
    }

    /// Decodes an `{"alps": {...}}` document and reassembles it through the
    /// builders, so input documents obey the same id rules as built ones.
    ///
    /// # Errors
    /// Returns [`ParseError::MalformedDocument`] if the bytes do not decode,
    /// [`ParseError::InvalidUrl`] for any href (descriptor, doc, ext or link)
    /// that is not an absolute URL, and any [`BuildError`] the reassembly raises.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HyperError> {
        let wrapper: RawWrapper = serde_json::from_slice(bytes)
            .map_err(|err| ParseError::malformed("profile.json", bytes, &err))?;
        let raw = wrapper.alps;

        let mut builder = ProfileBuilder::new().version(raw.version);
        if let Some(doc) = raw.doc {
            builder = builder.doc(doc.rebuild()?);
        }
        if let Some(ext) = raw.ext {
            builder = builder.ext(ext.rebuild()?);
        }
        if let Some(link) = raw.link {
            builder = builder.link(link.rebuild()?);
        }
        for descriptor in raw.descriptors.unwrap_or_default() {
            builder = builder.descriptor(rebuild(descriptor)?)?;
        }
        Ok(builder.build())
    }
}

impl Document for Profile {
    const ROOT: &'static str = "alps";

    type Body = ProfileBody;

    fn body(&self) -> &ProfileBody {
        &self.body
    }
}

impl Serialize for Profile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Wrapped::<Profile>::new(&self.body).serialize(serializer)
    }
}

/// Root builder for a [`Profile`].
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    profile: Profile,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn version(mut self, version: Version) -> Self {
        self.profile.body.version = version;
        self
    }

    #[must_use]
    pub fn base(mut self, base: Url) -> Self {
        self.profile.base = Some(base);
        self
    }

    #[must_use]
    pub fn doc(mut self, doc: Doc) -> Self {
        self.profile.body.doc = Some(doc);
        self
    }

    #[must_use]
    pub fn ext(mut self, ext: Ext) -> Self {
        self.profile.body.ext = Some(ext);
        self
    }

    #[must_use]
    pub fn link(mut self, link: Link) -> Self {
        self.profile.body.link = Some(link);
        self
    }

    /// Attaches a top-level descriptor.
    ///
    /// # Errors
    /// Returns [`BuildError::IdentifierConflict`] if any id in the descriptor's
    /// subtree is already used in the profile.
    pub fn descriptor(mut self, descriptor: Descriptor) -> Result<Self, BuildError> {
        self.attach(descriptor)?;
        Ok(self)
    }

    fn attach(&mut self, descriptor: Descriptor) -> Result<(), BuildError> {
        self.profile.index = IdIndex::merge(&self.profile.index, descriptor.ids())?;
        log::trace!("attached descriptor `{}` to profile", descriptor.id());
        self.profile.body.descriptors.push(descriptor);
        Ok(())
    }

    #[must_use]
    pub fn build(self) -> Profile {
        self.profile
    }
}

impl Receiver<Element> for ProfileBuilder {
    const TARGET: Target = Target::Profile;

    fn receive(&mut self, element: Element) -> Result<(), BuildError> {
        match element {
            Element::Version(version) => self.profile.body.version = version,
            Element::Base(base) => self.profile.base = Some(base),
            Element::Doc(doc) => self.profile.body.doc = Some(doc),
            Element::Ext(ext) => self.profile.body.ext = Some(ext),
            Element::Link(link) => self.profile.body.link = Some(link),
            Element::Descriptor(descriptor) => self.attach(descriptor)?,
            other @ (Element::Name(_) | Element::Type(_) | Element::Rt(_)) => {
                return Err(Self::unsupported(&other))
            }
        }
        Ok(())
    }
}

/// Builds a profile from `elements`, applied in order. The version defaults to
/// `1.0`. On error the partially built profile is dropped.
///
/// # Errors
/// Returns [`BuildError::IdentifierConflict`] when two descriptors anywhere in
/// the profile share an id, and [`BuildError::UnsupportedTarget`] for
/// descriptor-only elements.
pub fn new_profile<I>(elements: I) -> Result<Profile, BuildError>
where
    I: IntoIterator<Item = Element>,
{
    let mut builder = ProfileBuilder::new();
    builder.receive_all(elements)?;
    let profile = builder.build();
    log::debug!("built profile with {} descriptor ids", profile.index.len());
    Ok(profile)
}

#[derive(Deserialize)]
struct RawWrapper {
    alps: RawProfile,
}

#[derive(Deserialize)]
struct RawProfile {
    #[serde(default)]
    version: Version,
    #[serde(default)]
    doc: Option<RawDoc>,
    #[serde(default, rename = "descriptor")]
    descriptors: Option<Vec<RawDescriptor>>,
    #[serde(default)]
    ext: Option<RawExt>,
    #[serde(default)]
    link: Option<RawLink>,
}

#[derive(Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    id: String,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    hypertype: Control,
    #[serde(default, rename = "descriptor")]
    descriptors: Option<Vec<RawDescriptor>>,
    #[serde(default)]
    rt: String,
    #[serde(default)]
    doc: Option<RawDoc>,
    #[serde(default)]
    ext: Option<RawExt>,
    #[serde(default)]
    link: Option<RawLink>,
}

// Hrefs stay strings until reassembly so a bad one surfaces as `InvalidUrl`
// wherever it appears in the document.
#[derive(Deserialize)]
struct RawDoc {
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    format: String,
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct RawExt {
    #[serde(default)]
    id: String,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct RawLink {
    href: String,
    #[serde(default)]
    rel: String,
}

fn parse_href(href: &str) -> Result<Url, ParseError> {
    Url::parse(href).map_err(|err| ParseError::invalid_url(href, err))
}

fn parse_optional_href(href: Option<&str>) -> Result<Option<Url>, ParseError> {
    match href {
        None | Some("") => Ok(None),
        Some(href) => parse_href(href).map(Some),
    }
}

impl RawDoc {
    fn rebuild(self) -> Result<Doc, ParseError> {
        let href = parse_optional_href(self.href.as_deref())?;
        Ok(Doc::new(href, self.format, self.value))
    }
}

impl RawExt {
    fn rebuild(self) -> Result<Ext, ParseError> {
        let href = parse_optional_href(self.href.as_deref())?;
        Ok(Ext::new(self.id, self.value, href))
    }
}

impl RawLink {
    fn rebuild(self) -> Result<Link, ParseError> {
        Ok(Link::new(parse_href(&self.href)?, self.rel))
    }
}

fn rebuild(raw: RawDescriptor) -> Result<Descriptor, HyperError> {
    let href = parse_optional_href(raw.href.as_deref())?;
    let mut builder = DescriptorBuilder::new(raw.id, href)?
        .name(raw.name)
        .hypertype(raw.hypertype)
        .rt(raw.rt);
    if let Some(doc) = raw.doc {
        builder = builder.doc(doc.rebuild()?);
    }
    if let Some(ext) = raw.ext {
        builder = builder.ext(ext.rebuild()?);
    }
    if let Some(link) = raw.link {
        builder = builder.link(link.rebuild()?);
    }
    for child in raw.descriptors.unwrap_or_default() {
        builder = builder.descriptor(rebuild(child)?)?;
    }
    Ok(builder.build())
}
