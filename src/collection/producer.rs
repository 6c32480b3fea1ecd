use crate::document::{Document, Version, Wrapped};
use crate::error::{BuildError, Target};
use crate::receiver::{ElementKind, Receiver};
use serde::{Serialize, Serializer};
use url::Url;

/// A navigational link on a collection or item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    href: Url,
    rel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    render: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    prompt: String,
}

impl Link {
    pub fn new(
        href: Url,
        rel: impl Into<String>,
        name: impl Into<String>,
        render: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Link {
            href,
            rel: rel.into(),
            name: name.into(),
            render: render.into(),
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Datum {
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    prompt: String,
}

impl Datum {
    pub fn new(name: impl Into<String>, value: impl Into<String>, prompt: impl Into<String>) -> Self {
        Datum {
            name: name.into(),
            value: value.into(),
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<Url>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    data: Vec<Datum>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    href: Url,
    rel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    data: Vec<Datum>,
}

impl Item {
    #[must_use]
    pub fn href(&self) -> Option<&Url> {
        self.href.as_ref()
    }

    #[must_use]
    pub fn data(&self) -> &[Datum] {
        &self.data
    }

    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Query {
    #[must_use]
    pub fn rel(&self) -> &str {
        &self.rel
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn data(&self) -> &[Datum] {
        &self.data
    }
}

/// The write template. Its `data` is always emitted, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Template {
    data: Vec<Datum>,
}

impl Template {
    #[must_use]
    pub fn data(&self) -> &[Datum] {
        &self.data
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorObject {
    #[serde(skip_serializing_if = "String::is_empty")]
    title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    message: String,
}

impl ErrorObject {
    pub fn new(title: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorObject {
            title: title.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// One configuration step for a collection, item, query or template builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Collection only.
    Version(Version),
    /// Collection only.
    Href(Url),
    /// Collection or item.
    Link(Link),
    /// Collection only.
    Item(Item),
    /// Collection only.
    Query(Query),
    /// Collection only.
    Template(Template),
    /// Collection only.
    Error(ErrorObject),
    /// Template, item or query.
    Datum(Datum),
}

impl ElementKind for Element {
    fn kind(&self) -> &'static str {
        match self {
            Element::Version(_) => "version",
            Element::Href(_) => "href",
            Element::Link(_) => "link",
            Element::Item(_) => "item",
            Element::Query(_) => "query",
            Element::Template(_) => "template",
            Element::Error(_) => "error",
            Element::Datum(_) => "datum",
        }
    }
}

macro_rules! element_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Element {
                fn from(value: $variant) -> Self {
                    Element::$variant(value)
                }
            }
        )*
    };
}

element_from!(Version, Link, Item, Query, Template, Datum);

impl From<ErrorObject> for Element {
    fn from(error: ErrorObject) -> Self {
        Element::Error(error)
    }
}

/// The body of a `collection` document as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionBody {
    version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<Url>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    items: Vec<Item>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    queries: Vec<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<Template>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorObject>,
}

/// A finished Collection+JSON document, ready to serialize.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    body: CollectionBody,
}

impl Collection {
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.body.version
    }

    #[must_use]
    pub fn href(&self) -> Option<&Url> {
        self.body.href.as_ref()
    }

    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.body.links
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.body.items
    }

    #[must_use]
    pub fn queries(&self) -> &[Query] {
        &self.body.queries
    }

    #[must_use]
    pub fn template(&self) -> Option<&Template> {
        self.body.template.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&ErrorObject> {
        self.body.error.as_ref()
    }
}

impl Document for Collection {
    const ROOT: &'static str = "collection";

    type Body = CollectionBody;

    fn body(&self) -> &CollectionBody {
        &self.body
    }
}

impl Serialize for Collection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Wrapped::<Collection>::new(&self.body).serialize(serializer)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectionBuilder {
    body: CollectionBody,
}

impl CollectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn version(mut self, version: Version) -> Self {
        self.body.version = version;
        self
    }

    #[must_use]
    pub fn href(mut self, href: Url) -> Self {
        self.body.href = Some(href);
        self
    }

    #[must_use]
    pub fn link(mut self, link: Link) -> Self {
        self.body.links.push(link);
        self
    }

    #[must_use]
    pub fn item(mut self, item: Item) -> Self {
        self.body.items.push(item);
        self
    }

    #[must_use]
    pub fn query(mut self, query: Query) -> Self {
        self.body.queries.push(query);
        self
    }

    #[must_use]
    pub fn template(mut self, template: Template) -> Self {
        self.body.template = Some(template);
        self
    }

    #[must_use]
    pub fn error(mut self, error: ErrorObject) -> Self {
        self.body.error = Some(error);
        self
    }

    #[must_use]
    pub fn build(self) -> Collection {
        Collection { body: self.body }
    }
}

impl Receiver<Element> for CollectionBuilder {
    const TARGET: Target = Target::Collection;

    fn receive(&mut self, element: Element) -> Result<(), BuildError> {
        match element {
            Element::Version(version) => self.body.version = version,
            Element::Href(href) => self.body.href = Some(href),
            Element::Link(link) => self.body.links.push(link),
            Element::Item(item) => self.body.items.push(item),
            Element::Query(query) => self.body.queries.push(query),
            Element::Template(template) => self.body.template = Some(template),
            Element::Error(error) => self.body.error = Some(error),
            other @ Element::Datum(_) => return Err(Self::unsupported(&other)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemBuilder {
    item: Item,
}

impl ItemBuilder {
    pub fn new(href: Option<Url>) -> Self {
        ItemBuilder {
            item: Item {
                href,
                ..Item::default()
            },
        }
    }

    #[must_use]
    pub fn datum(mut self, datum: Datum) -> Self {
        self.item.data.push(datum);
        self
    }

    #[must_use]
    pub fn link(mut self, link: Link) -> Self {
        self.item.links.push(link);
        self
    }

    #[must_use]
    pub fn build(self) -> Item {
        self.item
    }
}

impl Receiver<Element> for ItemBuilder {
    const TARGET: Target = Target::Item;

    fn receive(&mut self, element: Element) -> Result<(), BuildError> {
        match element {
            Element::Datum(datum) => self.item.data.push(datum),
            Element::Link(link) => self.item.links.push(link),
            other => return Err(Self::unsupported(&other)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub fn new(
        href: Url,
        rel: impl Into<String>,
        name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        QueryBuilder {
            query: Query {
                href,
                rel: rel.into(),
                name: name.into(),
                prompt: prompt.into(),
                data: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn datum(mut self, datum: Datum) -> Self {
        self.query.data.push(datum);
        self
    }

    #[must_use]
    pub fn build(self) -> Query {
        self.query
    }
}

impl Receiver<Element> for QueryBuilder {
    const TARGET: Target = Target::Query;

    fn receive(&mut self, element: Element) -> Result<(), BuildError> {
        match element {
            Element::Datum(datum) => self.query.data.push(datum),
            other => return Err(Self::unsupported(&other)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    template: Template,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn datum(mut self, datum: Datum) -> Self {
        self.template.data.push(datum);
        self
    }

    #[must_use]
    pub fn build(self) -> Template {
        self.template
    }
}

impl Receiver<Element> for TemplateBuilder {
    const TARGET: Target = Target::Template;

    fn receive(&mut self, element: Element) -> Result<(), BuildError> {
        match element {
            Element::Datum(datum) => self.template.data.push(datum),
            other => return Err(Self::unsupported(&other)),
        }
        Ok(())
    }
}

/// Builds a collection from `elements`, applied in order. Links, items and
/// queries keep their insertion order; a later template or error replaces an
/// earlier one.
///
/// # Errors
/// Returns [`BuildError::UnsupportedTarget`] for a `Datum` element.
pub fn new_collection<I>(elements: I) -> Result<Collection, BuildError>
where
    I: IntoIterator<Item = Element>,
{
    let mut builder = CollectionBuilder::new();
    builder.receive_all(elements)?;
    let collection = builder.build();
    log::debug!(
        "built collection with {} links, {} items, {} queries",
        collection.body.links.len(),
        collection.body.items.len(),
        collection.body.queries.len()
    );
    Ok(collection)
}

/// # Errors
/// Returns [`BuildError::UnsupportedTarget`] for anything but `Datum` and `Link`.
pub fn new_item<I>(href: Option<Url>, elements: I) -> Result<Item, BuildError>
where
    I: IntoIterator<Item = Element>,
{
    let mut builder = ItemBuilder::new(href);
    builder.receive_all(elements)?;
    Ok(builder.build())
}

/// # Errors
/// Returns [`BuildError::UnsupportedTarget`] for anything but `Datum`.
pub fn new_query<I>(
    href: Url,
    rel: impl Into<String>,
    name: impl Into<String>,
    prompt: impl Into<String>,
    elements: I,
) -> Result<Query, BuildError>
where
    I: IntoIterator<Item = Element>,
{
    let mut builder = QueryBuilder::new(href, rel, name, prompt);
    builder.receive_all(elements)?;
    Ok(builder.build())
}

/// # Errors
/// Returns [`BuildError::UnsupportedTarget`] for anything but `Datum`.
pub fn new_template<I>(elements: I) -> Result<Template, BuildError>
where
    I: IntoIterator<Item = Element>,
{
    let mut builder = TemplateBuilder::new();
    builder.receive_all(elements)?;
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn example(host: &str) -> Url {
        Url::parse(&format!("http://{host}")).unwrap()
    }

    fn datum() -> Element {
        Element::from(Datum::new("foo", "bar", "baz"))
    }

    #[test]
    fn test_empty_collection() {
        let c = new_collection([]).unwrap();
        assert_eq!(c.to_json().unwrap(), r#"{"collection":{"version":"1.0"}}"#);
    }

    #[test]
    fn test_datum_rejected_by_collection() {
        let err = new_collection([datum()]).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnsupportedTarget {
                element: "datum",
                target: Target::Collection
            }
        );
    }

    #[test]
    fn test_error_attaches_to_collection_only() {
        let error = Element::from(ErrorObject::new("foo", "bar", "baz"));
        let c = new_collection([error.clone()]).unwrap();
        assert_eq!(c.error(), Some(&ErrorObject::new("foo", "bar", "baz")));

        for err in [
            new_template([error.clone()]).unwrap_err(),
            new_item(None, [error.clone()]).unwrap_err(),
            new_query(example("example.com"), "", "", "", [error]).unwrap_err(),
        ] {
            assert!(matches!(err, BuildError::UnsupportedTarget { element: "error", .. }));
        }
    }

    #[test]
    fn test_datum_attaches_to_template_item_and_query() {
        let template = new_template([datum()]).unwrap();
        assert_eq!(template.data, vec![Datum::new("foo", "bar", "baz")]);
        assert!(new_item(None, [datum()]).is_ok());
        assert!(new_query(example("example.com"), "", "", "", [datum()]).is_ok());
    }

    #[test]
    fn test_template_on_collection() {
        let template = new_template([datum()]).unwrap();
        let c = new_collection([Element::from(template)]).unwrap();
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({"collection": {
                "version": "1.0",
                "template": {"data": [{"name": "foo", "value": "bar", "prompt": "baz"}]}
            }})
        );
    }

    #[test]
    fn test_empty_template_keeps_data_key() {
        let c = new_collection([Element::from(new_template([]).unwrap())]).unwrap();
        assert_eq!(
            c.to_json().unwrap(),
            r#"{"collection":{"version":"1.0","template":{"data":[]}}}"#
        );
    }

    #[test]
    fn test_nested_containers_are_collection_only() {
        let item = Element::from(new_item(None, []).unwrap());
        let template = Element::from(new_template([]).unwrap());
        assert!(matches!(
            new_item(None, [item.clone()]),
            Err(BuildError::UnsupportedTarget { element: "item", target: Target::Item })
        ));
        assert!(matches!(
            new_template([template]),
            Err(BuildError::UnsupportedTarget { element: "template", target: Target::Template })
        ));
        assert!(matches!(
            new_query(example("example.com"), "", "", "", [item]),
            Err(BuildError::UnsupportedTarget { element: "item", target: Target::Query })
        ));
    }

    #[test]
    fn test_link_on_item_and_collection() {
        let link = Element::from(Link::new(example("example.com"), "foo", "bar", "baz", "qux"));
        let item = new_item(Some(example("example.org")), [link.clone()]).unwrap();
        let c = new_collection([link, Element::from(item)]).unwrap();

        let expected_link = json!({
            "href": "http://example.com/", "rel": "foo", "name": "bar", "render": "baz", "prompt": "qux"
        });
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({"collection": {
                "version": "1.0",
                "links": [expected_link],
                "items": [{"href": "http://example.org/", "links": [expected_link]}]
            }})
        );
    }

    #[test]
    fn test_query_fields() {
        let query = new_query(example("example.com"), "foo", "bar", "baz", [datum()]).unwrap();
        let c = new_collection([Element::from(query)]).unwrap();
        assert_eq!(
            serde_json::to_value(&c).unwrap()["collection"]["queries"],
            json!([{
                "href": "http://example.com/",
                "rel": "foo",
                "name": "bar",
                "prompt": "baz",
                "data": [{"name": "foo", "value": "bar", "prompt": "baz"}]
            }])
        );
    }

    #[test]
    fn test_later_template_replaces_earlier() {
        let first = new_template([datum()]).unwrap();
        let second = new_template([]).unwrap();
        let c = new_collection([Element::from(first), Element::from(second.clone())]).unwrap();
        assert_eq!(c.template(), Some(&second));
    }

    #[test]
    fn test_typed_builders() {
        let item = ItemBuilder::new(Some(example("example.com")))
            .datum(Datum::new("full-name", "J. Doe", "Full Name"))
            .build();
        let c = CollectionBuilder::new()
            .href(example("example.com"))
            .version(Version::new("1.0"))
            .item(item.clone())
            .template(TemplateBuilder::new().datum(Datum::new("email", "", "Email")).build())
            .build();
        assert_eq!(c.items(), &[item]);
        assert_eq!(c.href().map(Url::as_str), Some("http://example.com/"));
        assert_eq!(c.template().unwrap().data.len(), 1);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_to_yaml() {
        let c = new_collection([Element::Href(example("example.com"))]).unwrap();
        let yaml = c.to_yaml().unwrap();
        let back: serde_json::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, serde_json::to_value(&c).unwrap());
    }
}
