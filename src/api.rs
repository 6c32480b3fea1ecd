use crate::alps::Profile;
use crate::collection::consumer::Collection;
use crate::error::HyperError;

/// Parses a Collection+JSON document (`application/vnd.collection+json`).
///
/// This is the primary entry point for consuming collections. The returned
/// [`Collection`] already carries its relation and name indexes, so
/// [`Collection::query`] and [`Collection::link`] do no further indexing work.
///
/// # Errors
///
/// Returns [`HyperError::Parse`] with a `MalformedDocument` diagnostic if the
/// bytes do not decode into a document wrapped in a `collection` key.
pub fn parse_collection(bytes: &[u8]) -> Result<Collection, HyperError> {
    log::debug!("parsing collection document ({} bytes)", bytes.len());
    Ok(Collection::from_slice(bytes)?)
}

/// Parses an ALPS profile document (`application/alps+json`), reassembling
/// the descriptor tree so that identifier uniqueness is checked on input.
///
/// # Errors
///
/// Returns [`HyperError::Parse`] for undecodable input or invalid descriptor
/// hrefs, and [`HyperError::Build`] when the document breaks a tree invariant
/// such as duplicate descriptor ids.
pub fn parse_profile(bytes: &[u8]) -> Result<Profile, HyperError> {
    log::debug!("parsing alps document ({} bytes)", bytes.len());
    Profile::from_slice(bytes)
}
