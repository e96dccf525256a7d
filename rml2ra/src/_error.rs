use thiserror::Error;

/// Failure modes of the compilation pipeline.
///
/// Parse and structural errors abort compilation of the entire mapping; no
/// partial output is ever produced.
#[derive(Error, Debug)]
pub enum CompileError {
    /// The mapping text is not valid RDF.
    #[error("parse error: {0}")]
    Parse(String),

    /// The mapping graph lacks a node this compiler requires to proceed.
    #[error("structural error: {0}")]
    Structural(String),

    /// A construct this compiler recognises but deliberately does not
    /// translate (subject term type `Literal`, an unrecognised language
    /// subtag).
    #[error("unsupported feature: {0}")]
    Unsupported(String),

    /// A post-normalisation invariant does not hold; this indicates a bug in
    /// the normaliser rather than a malformed input.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl From<rml2ra_ingest::IngestError> for CompileError {
    fn from(err: rml2ra_ingest::IngestError) -> Self {
        CompileError::Parse(err.to_string())
    }
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, CompileError>;
