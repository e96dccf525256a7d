//! I extend the utility types of [`rml2ra_statement`] with validating
//! constructors, used by the ingest adapter to reject malformed absolute
//! IRIs at the parse boundary.
#![deny(missing_docs)]

mod _iri;
pub use _iri::*;
