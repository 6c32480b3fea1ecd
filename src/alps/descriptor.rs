use super::index::IdIndex;
use super::{Control, Doc, Element, Ext, Link};
use crate::error::{BuildError, Target};
use crate::receiver::Receiver;
use serde::Serialize;
use url::Url;

/// A fully assembled descriptor and its subtree.
///
/// Once built, a descriptor's ids are fixed: [`Descriptor::ids`] is the union of
/// its own id and every descendant's id, and is what gets checked when the
/// descriptor is attached to a parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Descriptor {
    #[serde(skip_serializing_if = "String::is_empty")]
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<Url>,
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(rename = "type")]
    hypertype: Control,
    #[serde(rename = "descriptor", skip_serializing_if = "Vec::is_empty")]
    descriptors: Vec<Descriptor>,
    #[serde(skip_serializing_if = "String::is_empty")]
    rt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc: Option<Doc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ext: Option<Ext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<Link>,
    #[serde(skip)]
    index: IdIndex,
}

impl Descriptor {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn href(&self) -> Option<&Url> {
        self.href.as_ref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The control type; `Semantic` unless set otherwise.
    #[must_use]
    pub fn hypertype(&self) -> Control {
        self.hypertype
    }

    #[must_use]
    pub fn rt(&self) -> &str {
        &self.rt
    }

    #[must_use]
    pub fn doc(&self) -> Option<&Doc> {
        self.doc.as_ref()
    }

    #[must_use]
    pub fn ext(&self) -> Option<&Ext> {
        self.ext.as_ref()
    }

    #[must_use]
    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    /// Direct children, in attach order.
    #[must_use]
    pub fn children(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Every id in this subtree, including this descriptor's own.
    #[must_use]
    pub fn ids(&self) -> &IdIndex {
        &self.index
    }

    /// Descriptors in this subtree (excluding `self`) whose id, name or href
    /// equals one of `identifiers`, in depth-first order. With no identifiers,
    /// every descendant is returned.
    #[must_use]
    pub fn descriptors(&self, identifiers: &[&str]) -> Vec<&Descriptor> {
        let mut found = Vec::new();
        collect(&self.descriptors, identifiers, &mut found);
        found
    }

    pub(crate) fn matches(&self, identifier: &str) -> bool {
        (!self.id.is_empty() && self.id == identifier)
            || (!self.name.is_empty() && self.name == identifier)
            || self.href.as_ref().is_some_and(|href| href.as_str() == identifier)
    }
}

/// Depth-first, pre-order walk shared by profile and descriptor lookups.
pub(crate) fn collect<'a>(
    descriptors: &'a [Descriptor],
    identifiers: &[&str],
    found: &mut Vec<&'a Descriptor>,
) {
    for descriptor in descriptors {
        if identifiers.is_empty() || identifiers.iter().any(|i| descriptor.matches(i)) {
            found.push(descriptor);
        }
        collect(&descriptor.descriptors, identifiers, found);
    }
}

/// Assembles one [`Descriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    descriptor: Descriptor,
}

impl DescriptorBuilder {
    /// Starts a descriptor. At least one of `id` and `href` must be given.
    ///
    /// # Errors
    /// Returns [`BuildError::MissingIdentifier`] if `id` is empty and `href` is `None`.
    pub fn new(id: impl Into<String>, href: Option<Url>) -> Result<Self, BuildError> {
        let id = id.into();
        if id.is_empty() && href.is_none() {
            return Err(BuildError::MissingIdentifier);
        }
        let index = IdIndex::for_id(&id);
        Ok(DescriptorBuilder {
            descriptor: Descriptor {
                id,
                href,
                name: String::new(),
                hypertype: Control::default(),
                descriptors: Vec::new(),
                rt: String::new(),
                doc: None,
                ext: None,
                link: None,
                index,
            },
        })
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.descriptor.name = name.into();
        self
    }

    #[must_use]
    pub fn hypertype(mut self, control: Control) -> Self {
        self.descriptor.hypertype = control;
        self
    }

    #[must_use]
    pub fn rt(mut self, rt: impl Into<String>) -> Self {
        self.descriptor.rt = rt.into();
        self
    }

    #[must_use]
    pub fn doc(mut self, doc: Doc) -> Self {
        self.descriptor.doc = Some(doc);
        self
    }

    #[must_use]
    pub fn ext(mut self, ext: Ext) -> Self {
        self.descriptor.ext = Some(ext);
        self
    }

    #[must_use]
    pub fn link(mut self, link: Link) -> Self {
        self.descriptor.link = Some(link);
        self
    }

    /// Attaches a finished child descriptor.
    ///
    /// # Errors
    /// Returns [`BuildError::IdentifierConflict`] if any id in the child's subtree
    /// is already present under this descriptor. Nothing is attached in that case.
    pub fn descriptor(mut self, child: Descriptor) -> Result<Self, BuildError> {
        self.attach(child)?;
        Ok(self)
    }

    fn attach(&mut self, child: Descriptor) -> Result<(), BuildError> {
        self.descriptor.index = IdIndex::merge(&self.descriptor.index, &child.index)?;
        log::trace!(
            "attached descriptor `{}` to descriptor `{}`",
            child.id,
            self.descriptor.id
        );
        self.descriptor.descriptors.push(child);
        Ok(())
    }

    #[must_use]
    pub fn build(self) -> Descriptor {
        self.descriptor
    }
}

impl Receiver<Element> for DescriptorBuilder {
    const TARGET: Target = Target::Descriptor;

    fn receive(&mut self, element: Element) -> Result<(), BuildError> {
        match element {
            Element::Name(name) => self.descriptor.name = name,
            Element::Type(control) => self.descriptor.hypertype = control,
            Element::Rt(rt) => self.descriptor.rt = rt,
            Element::Doc(doc) => self.descriptor.doc = Some(doc),
            Element::Ext(ext) => self.descriptor.ext = Some(ext),
            Element::Link(link) => self.descriptor.link = Some(link),
            Element::Descriptor(child) => self.attach(child)?,
            other @ (Element::Version(_) | Element::Base(_)) => {
                return Err(Self::unsupported(&other))
            }
        }
        Ok(())
    }
}

/// Builds a descriptor identified by `id` and/or `href`, applying `elements`
/// in order. Construction stops at the first failing element.
///
/// # Errors
/// Returns [`BuildError::MissingIdentifier`] when neither identifier is given,
/// [`BuildError::IdentifierConflict`] when two descriptors in the subtree share an
/// id, and [`BuildError::UnsupportedTarget`] for profile-only elements.
pub fn new_descriptor<I>(
    id: impl Into<String>,
    href: Option<Url>,
    elements: I,
) -> Result<Descriptor, BuildError>
where
    I: IntoIterator<Item = Element>,
{
    let mut builder = DescriptorBuilder::new(id, href)?;
    builder.receive_all(elements)?;
    Ok(builder.build())
}
