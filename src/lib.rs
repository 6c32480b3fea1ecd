pub mod alps;
pub mod api;
pub mod collection;
pub mod document;
pub mod error;
pub mod receiver;
pub mod utils;

pub use api::{parse_collection, parse_profile};
pub use document::{Document, Version};
pub use error::{BuildError, HyperError, ParseError, Target};
pub use receiver::{ElementKind, Receiver};
