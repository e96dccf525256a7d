use std::collections::{HashMap, HashSet};

use rml2ra_statement::NTriple;
use tracing::{debug, warn};

use crate::_session::Session;
use crate::_vocab::*;

/// For every `(s, r2rml:class, C)` triple, locate the subject-map node `P`
/// such that some triple has `s` as its object, and rewrite to an explicit
/// predicate-object map producing `rdf:type C`.
///
/// A class triple whose parent subject-map node cannot be found is dropped
/// silently — this is the original implementation's behaviour, preserved
/// rather than treated as an error.
pub fn expand_classes(triples: &[NTriple], session: &mut Session) -> Vec<NTriple> {
    let mut to_remove: HashSet<NTriple> = HashSet::new();
    let mut to_add = Vec::new();

    for triple in triples {
        if triple.predicate != CLASS {
            continue;
        }
        to_remove.insert(triple.clone());

        let parent = triples.iter().find(|t| t.object == triple.subject);
        let Some(parent) = parent else {
            warn!(class_subject = %triple.subject, "class expansion found no parent subject-map node; dropping");
            continue;
        };

        let bn = session.fresh_blank_node();
        to_add.push(NTriple::new(parent.subject.clone(), PREDICATE_OBJECT_MAP, bn.clone()));
        to_add.push(NTriple::new(bn.clone(), PREDICATE, RDF_TYPE));
        to_add.push(NTriple::new(bn, OBJECT, triple.object.clone()));
    }

    apply(triples, &to_remove, to_add)
}

/// For every shortcut predicate (`r2rml:subject/predicate/object/graph/
/// datatype/language`), introduce an explicit map node carrying the value
/// as an `r2rml:constant`.
pub fn expand_constants(triples: &[NTriple], session: &mut Session) -> Vec<NTriple> {
    let map_predicate_for = |shortcut: &str| -> Option<&'static str> {
        Some(match shortcut {
            SUBJECT => SUBJECT_MAP,
            PREDICATE => PREDICATE_MAP,
            OBJECT => OBJECT_MAP,
            GRAPH => GRAPH_MAP,
            DATATYPE => DATATYPE_MAP,
            LANGUAGE => LANGUAGE_MAP,
            _ => return None,
        })
    };

    let mut to_remove: HashSet<NTriple> = HashSet::new();
    let mut to_add = Vec::new();

    for triple in triples {
        let Some(map_predicate) = map_predicate_for(&triple.predicate) else {
            continue;
        };
        let bn = session.fresh_blank_node();
        to_add.push(NTriple::new(triple.subject.clone(), map_predicate, bn.clone()));
        to_add.push(NTriple::new(bn, CONSTANT, triple.object.clone()));
        to_remove.insert(triple.clone());
    }

    apply(triples, &to_remove, to_add)
}

/// For every predicate-object-map node with more than one `predicateMap`
/// or more than one `objectMap` edge, enumerate the Cartesian product of
/// its predicate maps and object maps into fresh, singular POM nodes.
pub fn expand_predicate_object_maps(triples: &[NTriple], session: &mut Session) -> Vec<NTriple> {
    let mut pom_order: Vec<String> = Vec::new();
    let mut seen_poms: HashSet<String> = HashSet::new();
    let mut parents: HashMap<String, Vec<String>> = HashMap::new();
    let mut predicate_maps: HashMap<String, Vec<String>> = HashMap::new();
    let mut object_maps: HashMap<String, Vec<String>> = HashMap::new();

    for triple in triples {
        match triple.predicate.as_str() {
            PREDICATE_OBJECT_MAP => {
                if seen_poms.insert(triple.object.clone()) {
                    pom_order.push(triple.object.clone());
                }
                parents.entry(triple.object.clone()).or_default().push(triple.subject.clone());
            }
            PREDICATE_MAP => {
                predicate_maps.entry(triple.subject.clone()).or_default().push(triple.object.clone());
            }
            OBJECT_MAP => {
                object_maps.entry(triple.subject.clone()).or_default().push(triple.object.clone());
            }
            _ => {}
        }
    }

    let mut result = triples.to_vec();

    for pom_node in pom_order {
        let pms = predicate_maps.get(&pom_node).cloned().unwrap_or_default();
        let oms = object_maps.get(&pom_node).cloned().unwrap_or_default();
        if pms.len() <= 1 && oms.len() <= 1 {
            continue;
        }

        let parent_nodes = parents.get(&pom_node).cloned().unwrap_or_default();
        let to_remove: HashSet<NTriple> = result
            .iter()
            .filter(|t| {
                t.subject == pom_node
                    || (t.predicate == PREDICATE_OBJECT_MAP && t.object == pom_node)
            })
            .cloned()
            .collect();

        let mut to_add = Vec::new();
        for pm in &pms {
            for om in &oms {
                let bn = session.fresh_blank_node();
                for parent in &parent_nodes {
                    to_add.push(NTriple::new(parent.clone(), PREDICATE_OBJECT_MAP, bn.clone()));
                }
                to_add.push(NTriple::new(bn.clone(), PREDICATE_MAP, pm.clone()));
                to_add.push(NTriple::new(bn, OBJECT_MAP, om.clone()));
            }
        }

        result = apply(&result, &to_remove, to_add);
    }

    result
}

/// For every triples-map with more than one attached predicate-object map,
/// split it into one fresh triples-map per POM.
pub fn separate_predicate_object_maps(triples: &[NTriple], session: &mut Session) -> Vec<NTriple> {
    let triple_maps = triples_map_roots(triples);
    let mut result = triples.to_vec();

    for tm in &triple_maps {
        let pom_nodes: Vec<String> = result
            .iter()
            .filter(|t| t.subject == *tm && t.predicate == PREDICATE_OBJECT_MAP)
            .map(|t| t.object.clone())
            .collect();
        if pom_nodes.len() <= 1 {
            continue;
        }

        let original_subject_map = result
            .iter()
            .find(|t| t.subject == *tm && t.predicate == SUBJECT_MAP)
            .map(|t| t.object.clone());
        let original_logical_source = result
            .iter()
            .find(|t| t.subject == *tm && t.predicate == LOGICAL_SOURCE)
            .map(|t| t.object.clone());

        for pom in &pom_nodes {
            let parent_tm = result
                .iter()
                .find(|t| t.subject == *pom && t.predicate == PARENT_TRIPLES_MAP)
                .map(|t| t.object.clone());

            let new_tm = session.fresh_triples_map_iri(tm);
            result.push(NTriple::new(new_tm.clone(), RDF_TYPE, TRIPLES_MAP));

            if let Some(parent_tm) = parent_tm {
                result.push(NTriple::new(new_tm.clone(), PARENT_TRIPLES_MAP, parent_tm.clone()));

                if let Some(parent_logical_source) = result
                    .iter()
                    .find(|t| t.subject == parent_tm && t.predicate == LOGICAL_SOURCE)
                    .map(|t| t.object.clone())
                {
                    result.push(NTriple::new(new_tm.clone(), LOGICAL_SOURCE, parent_logical_source));
                }
                if let Some(parent_subject_map) = result
                    .iter()
                    .find(|t| t.subject == parent_tm && t.predicate == SUBJECT_MAP)
                    .map(|t| t.object.clone())
                {
                    result.push(NTriple::new(new_tm.clone(), SUBJECT_MAP, parent_subject_map));
                }

                let join_conditions: Vec<String> = result
                    .iter()
                    .filter(|t| t.subject == *pom && t.predicate == JOIN_CONDITION)
                    .map(|t| t.object.clone())
                    .collect();
                for jc in join_conditions {
                    result.push(NTriple::new(new_tm.clone(), JOIN_CONDITION, jc));
                }
            } else {
                if let Some(subject_map) = &original_subject_map {
                    result.push(NTriple::new(new_tm.clone(), SUBJECT_MAP, subject_map.clone()));
                }
                if let Some(logical_source) = &original_logical_source {
                    result.push(NTriple::new(new_tm.clone(), LOGICAL_SOURCE, logical_source.clone()));
                }
            }

            result.push(NTriple::new(new_tm, PREDICATE_OBJECT_MAP, pom.clone()));
        }

        for pom in &pom_nodes {
            let to_remove = NTriple::new(tm.clone(), PREDICATE_OBJECT_MAP, pom.clone());
            if let Some(pos) = result.iter().position(|t| *t == to_remove) {
                result.remove(pos);
            }
        }
    }

    result
}

/// Subjects typed `rdf:type r2rml:TriplesMap`, in first-appearance order.
pub(crate) fn triples_map_roots(triples: &[NTriple]) -> Vec<String> {
    let mut seen = HashSet::new();
    triples
        .iter()
        .filter(|t| t.predicate == RDF_TYPE && t.object == TRIPLES_MAP)
        .map(|t| t.subject.clone())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Run the four normalisation passes in order, advancing `session` as it
/// goes.
pub fn normalize(triples: &[NTriple], session: &mut Session) -> Vec<NTriple> {
    let expanded_classes = expand_classes(triples, session);
    debug!(count = expanded_classes.len(), "after class expansion");
    let expanded_constants = expand_constants(&expanded_classes, session);
    debug!(count = expanded_constants.len(), "after constant expansion");
    let expanded_poms = expand_predicate_object_maps(&expanded_constants, session);
    debug!(count = expanded_poms.len(), "after predicate-object-map expansion");
    let separated = separate_predicate_object_maps(&expanded_poms, session);
    debug!(count = separated.len(), "after predicate-object-map separation");
    separated
}

fn apply(triples: &[NTriple], to_remove: &HashSet<NTriple>, to_add: Vec<NTriple>) -> Vec<NTriple> {
    let mut result: Vec<NTriple> = triples.iter().filter(|t| !to_remove.contains(t)).cloned().collect();
    result.extend(to_add);
    result
}
