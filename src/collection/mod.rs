//! Collection+JSON documents.
//!
//! [`producer`] assembles documents for output; [`consumer`] parses incoming
//! documents and answers query and link lookups by relation or name.

pub mod consumer;
pub mod index;
pub mod producer;

pub use consumer::Collection as ParsedCollection;
pub use index::Index;
pub use producer::{
    new_collection, new_item, new_query, new_template, Collection, CollectionBuilder, Datum,
    Element, ErrorObject, Item, ItemBuilder, Link, Query, QueryBuilder, Template,
    TemplateBuilder,
};

/// Media type of a Collection+JSON document.
pub const MEDIA_TYPE: &str = "application/vnd.collection+json";
