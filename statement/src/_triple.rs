use std::fmt;

/// A single triple of opaque string terms.
///
/// A term is one of: an absolute IRI (starts with `http://` or `https://`),
/// a blank-node label (`b` followed by a non-negative integer), or a literal
/// lexical form. Node identity is purely by string comparison; there is no
/// node-object identity anywhere in this pipeline.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NTriple {
    /// The triple's subject term.
    pub subject: String,
    /// The triple's predicate term (always an IRI in a well-formed mapping).
    pub predicate: String,
    /// The triple's object term.
    pub object: String,
}

impl NTriple {
    /// Build a new triple from anything convertible to [`String`].
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for NTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|||{}|||{}", self.subject, self.predicate, self.object)
    }
}

/// Serialise a triple sequence to the `|||`-encoded wire form (one triple per
/// newline-terminated line).
///
/// This exchange format is an artefact of a multi-process heritage. A
/// single-process pipeline should pass `&[NTriple]` directly between phases
/// and reserve this encoding for the boundary with external collaborators.
///
/// No escaping of `|||` inside terms is performed; terms containing it are
/// out of contract.
pub fn to_wire_format(triples: &[NTriple]) -> String {
    let mut out = String::new();
    for triple in triples {
        out.push_str(&triple.to_string());
        out.push('\n');
    }
    out
}

/// Parse the `|||`-encoded wire form back into a triple sequence.
///
/// Empty lines are skipped. A line without at least two `|||` separators is
/// dropped rather than treated as an error, mirroring the boundary contract
/// that terms never contain the separator.
pub fn from_wire_format(text: &str) -> Vec<NTriple> {
    text.lines().filter_map(split_line).collect()
}

fn split_line(line: &str) -> Option<NTriple> {
    if line.is_empty() {
        return None;
    }
    let mut parts = line.splitn(3, "|||");
    let subject = parts.next()?;
    let predicate = parts.next()?;
    let object = parts.next()?;
    Some(NTriple::new(subject, predicate, object))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip() {
        let triples = vec![
            NTriple::new("http://ex/s", "http://ex/p", "b1"),
            NTriple::new("b1", "http://ex/p2", "a literal value"),
        ];
        let wire = to_wire_format(&triples);
        assert_eq!(from_wire_format(&wire), triples);
    }

    #[test]
    fn skips_blank_lines() {
        assert!(from_wire_format("\n\n").is_empty());
    }

    #[test]
    fn display_matches_wire_line() {
        let t = NTriple::new("s", "p", "o");
        assert_eq!(t.to_string(), "s|||p|||o");
    }
}
