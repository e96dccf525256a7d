use std::collections::HashSet;

use rml2ra_statement::{NTriple, is_blank_node, is_iri};
use tracing::debug;

use crate::_normalize::triples_map_roots;
use crate::_vocab::{OBJECT_MAP, PREDICATE_MAP, PREDICATE_OBJECT_MAP, SUBJECT_MAP};

/// Traverse outgoing edges from `root`, following any subject already
/// visited, with one rule: after crossing the first `predicateObjectMap`
/// edge along the traversal, subsequent `predicateObjectMap` edges are
/// skipped. Only blank-node or IRI objects are enqueued as successors.
pub fn generate_subgraph(triples: &[NTriple], root: &str) -> Vec<NTriple> {
    let mut subgraph = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut stack = vec![root.to_owned()];
    let mut found_first_pom = false;

    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }

        for triple in triples.iter().filter(|t| t.subject == current) {
            if triple.predicate == PREDICATE_OBJECT_MAP {
                if found_first_pom {
                    continue;
                }
                found_first_pom = true;
            }

            subgraph.push(triple.clone());

            if (is_blank_node(&triple.object) || is_iri(&triple.object)) && !visited.contains(&triple.object) {
                stack.push(triple.object.clone());
            }
        }
    }

    subgraph
}

/// Enumerate triples-map roots and build one self-contained subgraph per
/// root, discarding any subgraph missing a required `subjectMap`,
/// `predicateMap`, or `objectMap` edge.
pub fn partition_into_subgraphs(triples: &[NTriple]) -> Vec<Vec<NTriple>> {
    let roots = triples_map_roots(triples);
    let mut subgraphs = Vec::new();

    for root in roots {
        let subgraph = generate_subgraph(triples, &root);
        let has_subject_map = subgraph.iter().any(|t| t.predicate == SUBJECT_MAP);
        let has_predicate_map = subgraph.iter().any(|t| t.predicate == PREDICATE_MAP);
        let has_object_map = subgraph.iter().any(|t| t.predicate == OBJECT_MAP);

        if has_subject_map && has_predicate_map && has_object_map {
            subgraphs.push(subgraph);
        } else {
            debug!(root = %root, "discarding subgraph missing a required term map");
        }
    }

    subgraphs
}

#[cfg(test)]
mod test {
    use super::*;

    fn t(s: &str, p: &str, o: &str) -> NTriple {
        NTriple::new(s, p, o)
    }

    #[test]
    fn stops_following_pom_after_the_first() {
        let triples = vec![
            t("tm", PREDICATE_OBJECT_MAP, "pom1"),
            t("tm", PREDICATE_OBJECT_MAP, "pom2"),
            t("pom1", PREDICATE_MAP, "pm1"),
            t("pom2", PREDICATE_MAP, "pm2"),
        ];
        let sub = generate_subgraph(&triples, "tm");
        assert!(sub.iter().any(|t| t.object == "pom1"));
        assert!(!sub.iter().any(|t| t.object == "pom2"));
        assert!(!sub.iter().any(|t| t.subject == "pom2"));
    }

    #[test]
    fn partition_discards_incomplete_subgraphs() {
        let triples = vec![
            t("tm1", "http://www.w3.org/1999/02/22-rdf-syntax-ns#type", "http://www.w3.org/ns/r2rml#TriplesMap"),
            t("tm1", SUBJECT_MAP, "sm1"),
        ];
        let subgraphs = partition_into_subgraphs(&triples);
        assert!(subgraphs.is_empty());
    }
}
