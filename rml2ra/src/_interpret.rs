use rml2ra_statement::{NTriple, objects_of, subjects_of};

use crate::_error::{CompileError, Result};
use crate::_termmap::{Graph, JoinCondition, JoinType, Object, Predicate, Subject, TermMapType, TermType};
use crate::_vocab::*;

fn one(values: Vec<&str>, what: &str) -> Result<String> {
    match values.as_slice() {
        [v] => Ok((*v).to_owned()),
        [] => Err(CompileError::Structural(format!("no {what} found"))),
        _ => Err(CompileError::Structural(format!("more than one {what} found"))),
    }
}

/// The one triples-map, among those with a `subjectMap`, that has exactly
/// one `predicateObjectMap` edge — the root of a subgraph after
/// normalisation and separation.
pub fn get_root_tm(triples: &[NTriple]) -> Result<String> {
    let candidates = subjects_of(triples, SUBJECT_MAP, "");
    candidates
        .into_iter()
        .find(|tm| objects_of(triples, tm, PREDICATE_OBJECT_MAP).len() == 1)
        .map(str::to_owned)
        .ok_or_else(|| CompileError::Structural("no root subject node with predicateObjectMap found".into()))
}

/// The triples-map's single predicate-object map.
pub fn get_predicate_object_map(triples: &[NTriple], root_tm: &str) -> Result<String> {
    one(objects_of(triples, root_tm, PREDICATE_OBJECT_MAP), "predicateObjectMap")
}

/// Probe `constant`, then `reference`, then `template` on `node`; the
/// first match wins.
fn probe_term_map(triples: &[NTriple], node: &str) -> Option<(TermMapType, String)> {
    if let [v] = objects_of(triples, node, CONSTANT).as_slice() {
        return Some((TermMapType::Constant, (*v).to_owned()));
    }
    if let [v] = objects_of(triples, node, REFERENCE).as_slice() {
        return Some((TermMapType::Reference, (*v).to_owned()));
    }
    if let [v] = objects_of(triples, node, TEMPLATE).as_slice() {
        return Some((TermMapType::Template, (*v).to_owned()));
    }
    None
}

/// Resolve the subject-map descriptor of `root_tm`.
pub fn get_subject(triples: &[NTriple], root_tm: &str) -> Result<Subject> {
    let subject_node = one(objects_of(triples, root_tm, SUBJECT_MAP), "subjectMap")?;

    let mut term_type = TermType::Iri;
    if let [given] = objects_of(triples, &subject_node, TERM_TYPE).as_slice() {
        if *given == BLANK_NODE {
            term_type = TermType::BlankNode;
        } else if *given == LITERAL {
            return Err(CompileError::Unsupported("subject term type Literal is not supported".into()));
        }
    }

    match probe_term_map(triples, &subject_node) {
        Some((term_map_type, term_map)) => Ok(Subject {
            term_map_type: Some(term_map_type),
            term_type,
            term_map,
        }),
        None => Ok(Subject {
            term_map_type: None,
            term_type,
            term_map: String::new(),
        }),
    }
}

/// Resolve the predicate-map descriptor of a predicate-object map.
pub fn get_predicate(triples: &[NTriple], pom: &str) -> Result<Predicate> {
    let predicate_node = one(objects_of(triples, pom, PREDICATE_MAP), "predicateMap")?;

    match probe_term_map(triples, &predicate_node) {
        Some((term_map_type, term_map)) => Ok(Predicate {
            term_map_type: Some(term_map_type),
            term_type: TermType::Iri,
            term_map,
        }),
        None => Ok(Predicate {
            term_map_type: None,
            term_type: TermType::Iri,
            term_map: String::new(),
        }),
    }
}

fn resolve_language_tag(triples: &[NTriple], object_node: &str) -> Result<Option<String>> {
    let lang_map_nodes = objects_of(triples, object_node, LANGUAGE_MAP);
    let [lang_map_node] = lang_map_nodes.as_slice() else {
        return Ok(None);
    };
    let lang_tag = one(objects_of(triples, lang_map_node, CONSTANT), "languageMap constant")?;
    if !VALID_LANGUAGE_SUBTAGS.contains(&lang_tag.as_str()) {
        return Err(CompileError::Unsupported(format!("language tag '{lang_tag}' is not supported")));
    }
    Ok(Some(lang_tag))
}

fn resolve_data_type(triples: &[NTriple], object_node: &str) -> Result<Option<String>> {
    let data_type_map_nodes = objects_of(triples, object_node, DATATYPE_MAP);
    let [data_type_map_node] = data_type_map_nodes.as_slice() else {
        return Ok(None);
    };
    Ok(Some(one(objects_of(triples, data_type_map_node, CONSTANT), "datatypeMap constant")?))
}

/// Resolve the object-map descriptor of a predicate-object map whose
/// object map has no `parentTriplesMap`.
pub fn get_object_wo_join(triples: &[NTriple], pom: &str) -> Result<Object> {
    let object_node = one(objects_of(triples, pom, OBJECT_MAP), "objectMap")?;

    let mut object = Object::empty();
    object.lang_tag = resolve_language_tag(triples, &object_node)?;
    object.data_type = resolve_data_type(triples, &object_node)?;

    let mut term_type_given = false;
    if let [given] = objects_of(triples, &object_node, TERM_TYPE).as_slice() {
        term_type_given = true;
        if *given == IRI {
            object.term_type = TermType::Iri;
        }
    }

    if let [v] = objects_of(triples, &object_node, CONSTANT).as_slice() {
        object.term_map_type = Some(TermMapType::Constant);
        object.term_map = (*v).to_owned();
        if object.term_map.starts_with("http") && !term_type_given {
            object.term_type = TermType::Iri;
        }
        return Ok(object);
    }
    if let [v] = objects_of(triples, &object_node, REFERENCE).as_slice() {
        object.term_map_type = Some(TermMapType::Reference);
        object.term_map = (*v).to_owned();
        return Ok(object);
    }
    if let [v] = objects_of(triples, &object_node, TEMPLATE).as_slice() {
        object.term_map_type = Some(TermMapType::Template);
        object.term_map = (*v).to_owned();
        if !term_type_given {
            object.term_type = TermType::Iri;
        }
        return Ok(object);
    }

    Ok(object)
}

/// Resolve the object-map descriptor of a predicate-object map whose
/// object map has a `parentTriplesMap`, along with the parent's source.
///
/// The resolved value comes from the parent triples-map's subject map,
/// not from the object map's own term map children.
pub fn get_object_w_join(triples: &[NTriple], pom: &str) -> Result<(Object, String)> {
    let object_node = one(objects_of(triples, pom, OBJECT_MAP), "objectMap")?;

    let mut object = Object::empty();
    object.join_type = Some(JoinType::Natural);

    let join_condition_nodes = objects_of(triples, &object_node, JOIN_CONDITION);
    if let [join_condition_node] = join_condition_nodes.as_slice() {
        object.join_type = Some(JoinType::Equi);
        let child = one(objects_of(triples, join_condition_node, CHILD), "joinCondition child")?;
        let parent = one(objects_of(triples, join_condition_node, PARENT), "joinCondition parent")?;
        object.join_condition = Some(JoinCondition { child, parent });
    }

    let parent_tm = one(objects_of(triples, &object_node, PARENT_TRIPLES_MAP), "parentTriplesMap")?;
    let parent_source_node = one(objects_of(triples, &parent_tm, LOGICAL_SOURCE), "parent logicalSource")?;
    let parent_source = one(objects_of(triples, &parent_source_node, SOURCE), "parent source")?;
    let parent_subject_node = one(objects_of(triples, &parent_tm, SUBJECT_MAP), "parent subjectMap")?;

    if let [v] = objects_of(triples, &parent_subject_node, CONSTANT).as_slice() {
        object.term_map_type = Some(TermMapType::Constant);
        object.term_map = (*v).to_owned();
        if object.term_map.starts_with("http") {
            object.term_type = TermType::Iri;
        }
        return Ok((object, parent_source));
    }
    if let [v] = objects_of(triples, &parent_subject_node, REFERENCE).as_slice() {
        object.term_map_type = Some(TermMapType::Reference);
        object.term_map = (*v).to_owned();
        object.term_type = TermType::Literal;
        return Ok((object, parent_source));
    }
    if let [v] = objects_of(triples, &parent_subject_node, TEMPLATE).as_slice() {
        object.term_map_type = Some(TermMapType::Template);
        object.term_map = (*v).to_owned();
        object.term_type = TermType::Iri;
        return Ok((object, parent_source));
    }

    Ok((object, parent_source))
}

fn resolve_graph_descriptor(triples: &[NTriple], graph_node: &str) -> Option<Graph> {
    let (term_map_type, value) = probe_term_map(triples, graph_node)?;
    let term_map = if value == DEFAULT_GRAPH { String::new() } else { value };
    Some(Graph {
        term_map_type: Some(term_map_type),
        term_type: TermType::Iri,
        term_map,
    })
}

/// Resolve up to two graph descriptors: one attached to the subject map,
/// one to the predicate-object map.
///
/// If the subject map has anything other than exactly one `graphMap`
/// edge, a single absent descriptor is returned and the predicate-object
/// map's graph is never consulted — this mirrors the original
/// implementation's early return rather than checking both sides
/// independently.
pub fn get_graph(triples: &[NTriple], root_tm: &str, pom: &str) -> Result<Vec<Graph>> {
    let subject_node = one(objects_of(triples, root_tm, SUBJECT_MAP), "subjectMap")?;
    let graph_nodes = objects_of(triples, &subject_node, GRAPH_MAP);

    let [graph_node] = graph_nodes.as_slice() else {
        return Ok(vec![Graph::absent()]);
    };

    let mut graphs = Vec::new();
    if let Some(graph) = resolve_graph_descriptor(triples, graph_node) {
        graphs.push(graph);
    }

    let pom_graph_nodes = objects_of(triples, pom, GRAPH_MAP);
    let [pom_graph_node] = pom_graph_nodes.as_slice() else {
        return Ok(graphs);
    };
    if let Some(graph) = resolve_graph_descriptor(triples, pom_graph_node) {
        graphs.push(graph);
    }

    Ok(graphs)
}

#[cfg(test)]
mod test {
    use super::*;

    fn t(s: &str, p: &str, o: &str) -> NTriple {
        NTriple::new(s, p, o)
    }

    #[test]
    fn subject_defaults_to_iri() {
        let triples = vec![
            t("tm", SUBJECT_MAP, "sm"),
            t("sm", TEMPLATE, "http://ex/{id}"),
        ];
        let subject = get_subject(&triples, "tm").unwrap();
        assert_eq!(subject.term_type, TermType::Iri);
        assert_eq!(subject.term_map_type, Some(TermMapType::Template));
        assert_eq!(subject.term_map, "http://ex/{id}");
    }

    #[test]
    fn subject_literal_term_type_is_unsupported() {
        let triples = vec![t("tm", SUBJECT_MAP, "sm"), t("sm", TERM_TYPE, LITERAL)];
        assert!(matches!(get_subject(&triples, "tm"), Err(CompileError::Unsupported(_))));
    }

    #[test]
    fn object_constant_starting_with_http_promotes_to_iri() {
        let triples = vec![t("pom", OBJECT_MAP, "om"), t("om", CONSTANT, "http://ex/Person")];
        let object = get_object_wo_join(&triples, "pom").unwrap();
        assert_eq!(object.term_type, TermType::Iri);
    }

    #[test]
    fn object_unknown_language_tag_is_rejected() {
        let triples = vec![
            t("pom", OBJECT_MAP, "om"),
            t("om", REFERENCE, "name"),
            t("om", LANGUAGE_MAP, "lm"),
            t("lm", CONSTANT, "xx"),
        ];
        assert!(matches!(get_object_wo_join(&triples, "pom"), Err(CompileError::Unsupported(_))));
    }

    #[test]
    fn object_join_without_join_condition_is_natural() {
        let triples = vec![
            t("pom", OBJECT_MAP, "om"),
            t("om", PARENT_TRIPLES_MAP, "parent_tm"),
            t("parent_tm", LOGICAL_SOURCE, "ls"),
            t("ls", SOURCE, "b.csv"),
            t("parent_tm", SUBJECT_MAP, "parent_sm"),
            t("parent_sm", TEMPLATE, "http://ex/{ID}"),
        ];
        let (object, parent_source) = get_object_w_join(&triples, "pom").unwrap();
        assert_eq!(object.join_type, Some(JoinType::Natural));
        assert_eq!(parent_source, "b.csv");
        assert_eq!(object.term_type, TermType::Iri);
    }

    #[test]
    fn graph_returns_absent_when_subject_has_no_single_graph_map() {
        let triples = vec![t("tm", SUBJECT_MAP, "sm")];
        let graphs = get_graph(&triples, "tm", "pom").unwrap();
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].term_map_type, None);
    }
}
