use super::index::Index;
use crate::document::Version;
use crate::error::ParseError;
use serde::Deserialize;
use url::Url;

/// A Collection+JSON document decoded from bytes and indexed for lookup.
///
/// Queries and links are indexed by both `rel` and `name` once, at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    version: Version,
    href: String,
    links: Vec<Link>,
    items: Vec<Item>,
    queries: Vec<Query>,
    template: Option<Template>,
    error: Option<ErrorObject>,
    query_index: Index,
    link_index: Index,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub name: String,
    pub render: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Item {
    pub href: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub data: Vec<Datum>,
    #[serde(deserialize_with = "null_as_empty")]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Query {
    pub href: String,
    pub rel: String,
    pub name: String,
    pub prompt: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub data: Vec<Datum>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Template {
    #[serde(deserialize_with = "null_as_empty")]
    pub data: Vec<Datum>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Datum {
    pub name: String,
    pub value: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrorObject {
    pub title: String,
    pub code: String,
    pub message: String,
}

#[derive(Deserialize)]
struct RawWrapper {
    collection: RawCollection,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    version: Version,
    #[serde(default)]
    href: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    links: Vec<Link>,
    #[serde(default, deserialize_with = "null_as_empty")]
    items: Vec<Item>,
    #[serde(default, deserialize_with = "null_as_empty")]
    queries: Vec<Query>,
    #[serde(default)]
    template: Option<Template>,
    #[serde(default)]
    error: Option<ErrorObject>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Collection {
    /// Decodes a `{"collection": {...}}` document and builds its indexes.
    ///
    /// # Errors
    /// Returns [`ParseError::MalformedDocument`] if the bytes are not valid JSON,
    /// the `collection` key is missing, or a field has the wrong shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let wrapper: RawWrapper = serde_json::from_slice(bytes)
            .map_err(|err| ParseError::malformed("collection.json", bytes, &err))?;
        let raw = wrapper.collection;

        let query_index = Index::build(raw.queries.iter().map(|q| (q.rel.as_str(), q.name.as_str())));
        let link_index = Index::build(raw.links.iter().map(|l| (l.rel.as_str(), l.name.as_str())));
        log::debug!(
            "indexed {} queries under {} keys, {} links under {} keys",
            raw.queries.len(),
            query_index.len(),
            raw.links.len(),
            link_index.len()
        );

        Ok(Collection {
            version: raw.version,
            href: raw.href,
            links: raw.links,
            items: raw.items,
            queries: raw.queries,
            template: raw.template,
            error: raw.error,
            query_index,
            link_index,
        })
    }

    /// Queries whose relation or name contains every filter as a substring,
    /// without duplicates, in document order. With no filters, every query is
    /// returned.
    #[must_use]
    pub fn query(&self, rels: &[&str]) -> Vec<&Query> {
        self.query_index
            .resolve(rels)
            .into_iter()
            .map(|position| &self.queries[position])
            .collect()
    }

    /// Links matched the same way as [`Collection::query`].
    #[must_use]
    pub fn link(&self, rels: &[&str]) -> Vec<&Link> {
        self.link_index
            .resolve(rels)
            .into_iter()
            .map(|position| &self.links[position])
            .collect()
    }

    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    #[must_use]
    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&ErrorObject> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn query_index(&self) -> &Index {
        &self.query_index
    }

    #[must_use]
    pub fn link_index(&self) -> &Index {
        &self.link_index
    }
}

impl Query {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replaces the value of every datum named `key`, or appends one if none exists.
    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        let mut found = false;
        for datum in self.data.iter_mut().filter(|d| d.name == key) {
            datum.value = value.to_string();
            found = true;
        }
        if !found {
            self.add(key, value);
        }
        self
    }

    /// Appends a datum, keeping any existing ones with the same name.
    pub fn add(&mut self, key: &str, value: &str) -> &mut Self {
        self.data.push(Datum {
            name: key.to_string(),
            value: value.to_string(),
            prompt: String::new(),
        });
        self
    }

    /// The query's href with each named datum appended as a query pair.
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidUrl`] if the href is not an absolute URL.
    pub fn uri(&self) -> Result<Url, ParseError> {
        let mut url = Url::parse(&self.href).map_err(|err| ParseError::invalid_url(&self.href, err))?;
        let pairs: Vec<&Datum> = self.data.iter().filter(|d| !d.name.is_empty()).collect();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for datum in pairs {
                query.append_pair(&datum.name, &datum.value);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"collection":{
        "version":"1.0",
        "href":"http://example.org/friends/",
        "links":[
            {"rel":"feed","href":"http://example.org/friends/rss"},
            {"rel":"profile","name":"alps","href":"http://example.org/profile"}
        ],
        "items":[
            {"href":"http://example.org/friends/jdoe",
             "data":[{"name":"full-name","value":"J. Doe","prompt":"Full Name"}],
             "links":[{"rel":"blog","href":"http://examples.org/blogs/jdoe","prompt":"Blog"}]}
        ],
        "queries":[
            {"rel":"foo-bar","name":"unrelated","href":"http://example.org/friends/search","prompt":"Search",
             "data":[{"name":"search","value":""}]},
            {"rel":"search","name":"by-name","href":"http://example.org/friends/by-name"},
            {"rel":"filter","name":"foo","href":"http://example.org/friends/filter"}
        ],
        "template":{"data":[{"name":"email","value":"","prompt":"Email"}]}
    }}"#;

    fn parsed() -> Collection {
        Collection::from_slice(DOC.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_minimal() {
        let c = Collection::from_slice(br#"{"collection":{"version":"1.0","href":"http://example.com"}}"#)
            .unwrap();
        assert_eq!(c.version(), &Version::V1);
        assert_eq!(c.href(), "http://example.com");
        assert!(c.queries().is_empty());
        assert!(c.template().is_none());
        assert!(c.query(&[]).is_empty());
    }

    #[test]
    fn test_parse_fields() {
        let c = parsed();
        assert_eq!(c.links().len(), 2);
        assert_eq!(c.items()[0].data[0].value, "J. Doe");
        assert_eq!(c.items()[0].links[0].prompt, "Blog");
        assert_eq!(c.template().unwrap().data[0].name, "email");
    }

    #[test]
    fn test_missing_wrapper_is_malformed() {
        let err = Collection::from_slice(br#"{"version":"1.0"}"#).unwrap_err();
        assert!(matches!(err, ParseError::MalformedDocument { .. }));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = Collection::from_slice(b"{\"collection\": [").unwrap_err();
        match err {
            ParseError::MalformedDocument { reason, .. } => assert!(!reason.is_empty()),
            other => panic!("Expected malformed document, got {other:?}"),
        }
    }

    #[test]
    fn test_query_without_filters_returns_all() {
        let c = parsed();
        assert_eq!(c.query(&[]).len(), 3);
    }

    #[test]
    fn test_query_substring_match() {
        let c = parsed();
        let hrefs: Vec<&str> = c.query(&["foo"]).iter().map(|q| q.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec![
                "http://example.org/friends/search",
                "http://example.org/friends/filter"
            ]
        );
        let unrelated = c.query(&["unrel"]);
        assert_eq!(unrelated.len(), 1);
        assert_eq!(unrelated[0].rel, "foo-bar");
    }

    #[test]
    fn test_query_reachable_by_rel_and_name_appears_once() {
        let c = parsed();
        // "by-name" and "search" both point at the second query
        let found = c.query(&["e"]);
        assert_eq!(found.iter().filter(|q| q.name == "by-name").count(), 1);
    }

    #[test]
    fn test_link_lookup() {
        let c = parsed();
        assert_eq!(c.link(&["alps"])[0].rel, "profile");
        assert_eq!(c.link(&["feed"])[0].href, "http://example.org/friends/rss");
        assert_eq!(c.link(&[]).len(), 2);
    }

    #[test]
    fn test_query_set_add_and_uri() {
        let c = parsed();
        let mut query = c.query(&["foo-bar"])[0].clone();
        assert_eq!(query.prompt(), "Search");
        query.set("search", "jdoe").add("tag", "a").add("tag", "b");
        let uri = query.uri().unwrap();
        assert_eq!(
            uri.as_str(),
            "http://example.org/friends/search?search=jdoe&tag=a&tag=b"
        );
        query.set("tag", "c");
        assert_eq!(query.data.iter().filter(|d| d.value == "c").count(), 2);
    }

    #[test]
    fn test_uri_requires_absolute_href() {
        let query = Query {
            href: "/relative".to_string(),
            ..Query::default()
        };
        assert!(matches!(query.uri(), Err(ParseError::InvalidUrl { .. })));
    }

    #[test]
    fn test_nested_null_sequences_are_empty() {
        let json = br#"{"collection":{"version":"1.0",
            "items":[{"href":"http://example.org/i","data":null,"links":null}],
            "queries":[{"href":"http://example.org/q","rel":"search","data":null}],
            "template":{"data":null}}}"#;
        let c = Collection::from_slice(json).unwrap();
        assert!(c.items()[0].data.is_empty());
        assert!(c.items()[0].links.is_empty());
        assert!(c.query(&["search"])[0].data.is_empty());
        assert_eq!(c.template(), Some(&Template::default()));
    }
}
