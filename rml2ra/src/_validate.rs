use rml2ra_statement::NTriple;

use crate::_error::{CompileError, Result};
use crate::_normalize::triples_map_roots;
use crate::_vocab::SUBJECT_MAP;

/// Reject a mapping where some triples-map subject has more than one
/// `subjectMap` edge. Run before normalisation, on the raw ingested
/// triples.
pub fn validate_single_subject_map(triples: &[NTriple]) -> Result<()> {
    for tm in triples_map_roots(triples) {
        let count = triples.iter().filter(|t| t.subject == tm && t.predicate == SUBJECT_MAP).count();
        if count > 1 {
            return Err(CompileError::Structural(format!(
                "triples-map {tm} has {count} subjectMap edges, expected at most one"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn t(s: &str, p: &str, o: &str) -> NTriple {
        NTriple::new(s, p, o)
    }

    #[test]
    fn rejects_multiple_subject_maps() {
        let triples = vec![
            t("tm1", "http://www.w3.org/1999/02/22-rdf-syntax-ns#type", "http://www.w3.org/ns/r2rml#TriplesMap"),
            t("tm1", SUBJECT_MAP, "sm1"),
            t("tm1", SUBJECT_MAP, "sm2"),
        ];
        assert!(matches!(validate_single_subject_map(&triples), Err(CompileError::Structural(_))));
    }

    #[test]
    fn accepts_a_single_subject_map() {
        let triples = vec![
            t("tm1", "http://www.w3.org/1999/02/22-rdf-syntax-ns#type", "http://www.w3.org/ns/r2rml#TriplesMap"),
            t("tm1", SUBJECT_MAP, "sm1"),
        ];
        assert!(validate_single_subject_map(&triples).is_ok());
    }
}
