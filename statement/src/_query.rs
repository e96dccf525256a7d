use crate::NTriple;

/// Objects of every triple matching `subject` and `predicate`.
///
/// An empty filter string acts as a wildcard for that position.
pub fn objects_of<'t>(triples: &'t [NTriple], subject: &str, predicate: &str) -> Vec<&'t str> {
    triples
        .iter()
        .filter(|t| {
            (subject.is_empty() || t.subject == subject)
                && (predicate.is_empty() || t.predicate == predicate)
        })
        .map(|t| t.object.as_str())
        .collect()
}

/// Subjects of every triple matching `predicate` and `object`.
///
/// An empty filter string acts as a wildcard for that position.
pub fn subjects_of<'t>(triples: &'t [NTriple], predicate: &str, object: &str) -> Vec<&'t str> {
    triples
        .iter()
        .filter(|t| {
            (predicate.is_empty() || t.predicate == predicate)
                && (object.is_empty() || t.object == object)
        })
        .map(|t| t.subject.as_str())
        .collect()
}

/// Number of triples carrying the given predicate.
pub fn count_predicate(triples: &[NTriple], predicate: &str) -> usize {
    triples.iter().filter(|t| t.predicate == predicate).count()
}

/// Whether `term` is a blank-node label: `b` followed by a non-negative
/// integer that consumes the entire suffix.
pub fn is_blank_node(term: &str) -> bool {
    match term.strip_prefix('b') {
        Some(rest) if !rest.is_empty() => rest.bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

/// Whether `term` is an absolute IRI (starts with `http://` or `https://`).
pub fn is_iri(term: &str) -> bool {
    term.starts_with("http://") || term.starts_with("https://")
}
