use thiserror::Error;

/// Failure modes of the RDF ingest adapter.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The mapping text is not well-formed Turtle-family RDF.
    #[error("syntax error parsing mapping document: {0}")]
    Syntax(String),

    /// An expanded term (after prefix/`@base` resolution) is not a valid
    /// absolute IRI.
    #[error("invalid IRI after expansion: {0}")]
    InvalidIri(String),
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, IngestError>;
