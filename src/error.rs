use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt::Display;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum HyperError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// Raised while assembling a document tree. Construction is all-or-nothing,
/// so a caller that sees one of these never also sees a partial tree.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Descriptor is missing both an id and an href")]
    #[diagnostic(
        code(hyperdoc::build::missing_identifier),
        help("Give the descriptor a non-empty id, an href, or both.")
    )]
    MissingIdentifier,

    #[error("Identifier `{id}` is already used in this profile")]
    #[diagnostic(
        code(hyperdoc::build::identifier_conflict),
        help("Descriptor ids must be unique across the whole profile, including nested descriptors.")
    )]
    IdentifierConflict { id: String },

    #[error("A {element} element cannot be attached to a {target}")]
    #[diagnostic(
        code(hyperdoc::build::unsupported_target),
        help("Check which receivers accept this element.")
    )]
    UnsupportedTarget { element: &'static str, target: Target },
}

/// The kinds of receiver an element can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Profile,
    Descriptor,
    Collection,
    Item,
    Query,
    Template,
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Target::Profile => "profile",
            Target::Descriptor => "descriptor",
            Target::Collection => "collection",
            Target::Item => "item",
            Target::Query => "query",
            Target::Template => "template",
        };
        write!(f, "{name}")
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParseError {
    #[error("Malformed document: {reason}")]
    #[diagnostic(
        code(hyperdoc::parse::malformed_document),
        help("The input must be a JSON object wrapped in its root key (`collection` or `alps`).")
    )]
    MalformedDocument {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
        reason: String,
    },

    #[error("`{href}` is not a valid URL")]
    #[diagnostic(
        code(hyperdoc::parse::invalid_url),
        help("Only absolute URLs are accepted here.")
    )]
    InvalidUrl {
        href: String,
        #[source]
        source: url::ParseError,
    },
}

impl ParseError {
    /// Wraps a decode failure, pointing the diagnostic at the position
    /// `serde_json` reported.
    pub(crate) fn malformed(name: &str, bytes: &[u8], err: &serde_json::Error) -> Self {
        let source = String::from_utf8_lossy(bytes).into_owned();
        let offset = crate::utils::get_offset(&source, err.line(), err.column());
        ParseError::MalformedDocument {
            src: NamedSource::new(name, source),
            span: (offset, 0).into(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn invalid_url(href: &str, source: url::ParseError) -> Self {
        ParseError::InvalidUrl {
            href: href.to_string(),
            source,
        }
    }
}
