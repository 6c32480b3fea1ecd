use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt::Display;

/// Version string carried by both ALPS and Collection+JSON documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(Cow<'static, str>);

impl Version {
    pub const V1: Version = Version(Cow::Borrowed("1.0"));

    pub fn new(version: impl Into<String>) -> Self {
        Version(Cow::Owned(version.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::V1
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Version {
    fn from(version: &str) -> Self {
        Version::new(version)
    }
}

/// A finished hypermedia document. On the wire every document is an object
/// with a single key, `ROOT`, wrapping the document body.
pub trait Document {
    /// The wrapper key, `alps` or `collection`.
    const ROOT: &'static str;

    type Body: Serialize;

    fn body(&self) -> &Self::Body;

    /// Serializes the document into a compact JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&Wrapped::<Self>::new(self.body()))
    }

    /// Serializes the document into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Wrapped::<Self>::new(self.body()))
    }

    /// Serializes the document into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    #[cfg(feature = "yaml")]
    fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&Wrapped::<Self>::new(self.body()))
    }
}

/// Serializes a body as `{ D::ROOT: body }`.
pub(crate) struct Wrapped<'a, D: Document + ?Sized> {
    body: &'a D::Body,
}

impl<'a, D: Document + ?Sized> Wrapped<'a, D> {
    pub(crate) fn new(body: &'a D::Body) -> Self {
        Wrapped { body }
    }
}

impl<D: Document + ?Sized> Serialize for Wrapped<'_, D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(D::ROOT, self.body)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_default_is_v1() {
        assert_eq!(Version::default(), Version::V1);
        assert_eq!(Version::V1.as_str(), "1.0");
        assert_eq!(Version::from("1.0"), Version::V1);
    }

    #[test]
    fn test_version_serializes_as_string() {
        let json = serde_json::to_string(&Version::new("2.0")).unwrap();
        assert_eq!(json, "\"2.0\"");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), "2.0");
    }
}
