//! I define the triple model and graph utilities shared by the rest of the
//! mapping-to-relational-algebra compilation pipeline: an opaque-string
//! [`NTriple`], the `|||`-encoded wire form used at process boundaries, and
//! the pure pattern queries later phases use to inspect a graph.
//!
//! Node identity throughout this pipeline is purely by string comparison:
//! there is no interning, and no notion of node-object identity.
#![deny(missing_docs)]

mod _iri;
pub use _iri::*;

mod _triple;
pub use _triple::*;

mod _query;
pub use _query::*;
