//! Translates a single post-normalisation subgraph into a relational-algebra
//! expression string: a projection over one source (simple tree) or a join
//! of two projections (complex tree).

use std::collections::BTreeSet;

use rml2ra_statement::{NTriple, objects_of};

use crate::_error::{CompileError, Result};
use crate::_interpret::{get_graph, get_object_w_join, get_object_wo_join, get_predicate, get_predicate_object_map, get_root_tm, get_subject};
use crate::_termmap::{Graph, JoinType, Object, Predicate, Subject, TermMapType};
use crate::_vocab::{SOURCE, SUBJECT_MAP};

/// Extract every `{...}` placeholder from a template string.
///
/// A `{` preceded by a single backslash is not the start of a placeholder.
/// The matching `}` receives no such treatment: a literal `\}` still closes
/// the placeholder, exactly as in the source this was ported from.
pub(crate) fn extract_substrings(template: &str) -> Vec<String> {
    let chars: Vec<char> = template.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '{' && (i == 0 || chars[i - 1] != '\\') {
            if let Some(end) = chars[i + 1..].iter().position(|&c| c == '}') {
                let end = i + 1 + end;
                out.push(chars[i + 1..end].iter().collect());
                i = end + 1;
                continue;
            } else {
                break;
            }
        }
        i += 1;
    }
    out
}

fn contribute(set: &mut BTreeSet<String>, term_map_type: Option<TermMapType>, term_map: &str) {
    match term_map_type {
        Some(TermMapType::Template) => set.extend(extract_substrings(term_map)),
        Some(TermMapType::Reference) => {
            set.insert(term_map.to_owned());
        }
        _ => {}
    }
}

/// Deduplicated, sorted set of attributes a `Subject`/`Predicate`/`Object`
/// triple reads from its source: every reference and template placeholder,
/// plus the join attribute this side of a join condition contributes.
///
/// `object.term_map_type` being `None` signals a placeholder object
/// carrying only a join condition (the left/child projection); any other
/// object contributes the join condition's parent attribute instead.
pub(crate) fn get_projected_attributes(subject: &Subject, predicate: &Predicate, object: &Object) -> Vec<String> {
    let mut attrs = BTreeSet::new();
    contribute(&mut attrs, subject.term_map_type, &subject.term_map);
    contribute(&mut attrs, predicate.term_map_type, &predicate.term_map);
    contribute(&mut attrs, object.term_map_type, &object.term_map);

    if let Some(jc) = &object.join_condition {
        if object.term_map_type.is_none() {
            attrs.insert(jc.child.clone());
        } else {
            attrs.insert(jc.parent.clone());
        }
    }

    attrs.into_iter().collect()
}

/// Replace the first occurrence of `pattern` in `original` with
/// `replacement`; returns `original` unchanged if `pattern` is not found.
fn replace_first(original: &str, pattern: &str, replacement: &str) -> String {
    match original.find(pattern) {
        Some(pos) => format!("{}{}{}", &original[..pos], replacement, &original[pos + pattern.len()..]),
        None => original.to_owned(),
    }
}

fn qualify_template_or_reference(term_map_type: Option<TermMapType>, term_map: &str, source: &str) -> String {
    match term_map_type {
        Some(TermMapType::Template) => {
            let mut rewritten = term_map.to_owned();
            for attr in extract_substrings(term_map) {
                let replacement = format!("{source}_{attr}");
                rewritten = replace_first(&rewritten, &format!("{{{attr}}}"), &format!("{{{replacement}}}"));
            }
            rewritten
        }
        Some(TermMapType::Reference) => {
            let replacement = format!("{source}_{term_map}");
            replace_first(term_map, &format!("{{{term_map}}}"), &format!("{{{replacement}}}"))
        }
        _ => term_map.to_owned(),
    }
}

fn qualify_graph(graph: &Graph, source: &str) -> Graph {
    if graph.term_map.is_empty() {
        return graph.clone();
    }
    let term_map = match graph.term_map_type {
        Some(TermMapType::Template) => {
            let mut rewritten = graph.term_map.clone();
            for attr in extract_substrings(&graph.term_map) {
                let replacement = format!("{source}_{attr}");
                rewritten = replace_first(&rewritten, &attr, &replacement);
            }
            rewritten
        }
        Some(TermMapType::Reference) => {
            let replacement = format!("{source}_{}", graph.term_map);
            replace_first(&graph.term_map, &graph.term_map.clone(), &replacement)
        }
        _ => graph.term_map.clone(),
    };
    Graph {
        term_map,
        ..graph.clone()
    }
}

/// Rewrite every reference and template placeholder in `subject`,
/// `predicate`, `object`, and `graphs` to be prefixed with its originating
/// source name, per the equi-join qualification rule: `subject`/
/// `predicate`/`graphs` are qualified by `left_source`, `object` by
/// `right_source`.
fn qualify_for_equi_join(subject: &mut Subject, predicate: &mut Predicate, object: &mut Object, graphs: &mut [Graph], left_source: &str, right_source: &str) {
    subject.term_map = qualify_template_or_reference(subject.term_map_type, &subject.term_map, left_source);
    predicate.term_map = qualify_template_or_reference(predicate.term_map_type, &predicate.term_map, left_source);
    object.term_map = qualify_template_or_reference(object.term_map_type, &object.term_map, right_source);
    for graph in graphs.iter_mut() {
        *graph = qualify_graph(graph, left_source);
    }
}

fn create_subject(subject: &Subject) -> String {
    let term_map_type = subject.term_map_type.map(|t| t.to_string()).unwrap_or_default();
    format!("create({},{},{}) -> S", subject.term_map, term_map_type, subject.term_type)
}

fn create_predicate(predicate: &Predicate) -> String {
    let term_map_type = predicate.term_map_type.map(|t| t.to_string()).unwrap_or_default();
    format!("create({},{},{}) -> P", predicate.term_map, term_map_type, predicate.term_type)
}

fn create_object(object: &Object) -> String {
    let term_map_type = object.term_map_type.map(|t| t.to_string()).unwrap_or_default();
    let lang = object.lang_tag.clone().unwrap_or_else(|| "None".to_owned());
    let data_type = object.data_type.clone().unwrap_or_else(|| "None".to_owned());
    format!("create({},{},{},{},{}) -> O", object.term_map, term_map_type, object.term_type, lang, data_type)
}

fn create_graph(graph: &Graph) -> String {
    let term_map_type = graph.term_map_type.map(|t| t.to_string()).unwrap_or_default();
    format!("create({},{},{}) -> G", graph.term_map, term_map_type, graph.term_type)
}

/// Build the `pi[create(...)...]` lines for one resolved (subject,
/// predicate, object) triple given its already-qualified graph descriptors.
///
/// Graph handling is deliberately asymmetric with [`create_complex_tree`]:
/// with exactly two graph descriptors, both are emitted unconditionally
/// here, even if one has an empty (suppressed) `term_map` — matching the
/// source this was ported from rather than unifying the two shapes'
/// graph-presence checks.
fn graph_projection_lines(subject_create: &str, predicate_create: &str, object_create: &str, graphs: &[Graph], body: &str) -> Vec<String> {
    if graphs.len() == 1 && !graphs[0].term_map.is_empty() {
        vec![format!("pi[{subject_create},{predicate_create},{object_create},{}]({body})", create_graph(&graphs[0]))]
    } else if graphs.len() == 2 {
        graphs
            .iter()
            .map(|g| format!("pi[{subject_create},{predicate_create},{object_create},{}]({body})", create_graph(g)))
            .collect()
    } else {
        vec![format!("pi[{subject_create},{predicate_create},{object_create}]({body})")]
    }
}

/// Translate a subgraph whose predicate-object map's object has no
/// `parentTriplesMap`: a single projection over a single source.
fn create_simple_tree(triples: &[NTriple]) -> Result<String> {
    let source = objects_of(triples, "", SOURCE).first().map(|s| (*s).to_owned()).ok_or_else(|| CompileError::Structural("no source found".into()))?;

    let root_tm = get_root_tm(triples)?;
    let pom = get_predicate_object_map(triples, &root_tm)?;
    let subject = get_subject(triples, &root_tm)?;
    let predicate = get_predicate(triples, &pom)?;
    let object = get_object_wo_join(triples, &pom)?;
    let graphs = get_graph(triples, &root_tm, &pom)?;

    let proj_attrs = get_projected_attributes(&subject, &predicate, &object);
    let body = format!("pi[{}]({})", proj_attrs.join(","), source);

    let lines = graph_projection_lines(&create_subject(&subject), &create_predicate(&predicate), &create_object(&object), &graphs, &body);
    Ok(lines.join("\n"))
}

/// Pick `<source1>` per the source-selection rule: when two distinct
/// `rml:source` values are present, drop every occurrence of the parent
/// source and use what remains.
fn select_source1(sources: &[String], parent_source: &str) -> Result<String> {
    let candidates: Vec<&String> = if sources.len() > 1 && sources[0] != sources[1] {
        sources.iter().filter(|s| s.as_str() != parent_source).collect()
    } else {
        sources.iter().collect()
    };
    candidates.first().map(|s| (*s).clone()).ok_or_else(|| CompileError::Structural("no source found".into()))
}

/// Translate a subgraph whose predicate-object map's object has a
/// `parentTriplesMap`: a join of two projections, one per source.
fn create_complex_tree(triples: &[NTriple]) -> Result<String> {
    let sources = objects_of(triples, "", SOURCE).into_iter().map(str::to_owned).collect::<Vec<_>>();

    let root_tm = get_root_tm(triples)?;
    let pom = get_predicate_object_map(triples, &root_tm)?;
    let mut subject = get_subject(triples, &root_tm)?;
    let mut predicate = get_predicate(triples, &pom)?;
    let (mut object, parent_source) = get_object_w_join(triples, &pom)?;
    let mut graphs = get_graph(triples, &root_tm, &pom)?;

    let source1 = select_source1(&sources, &parent_source)?;

    let child_side = Object {
        join_condition: object.join_condition.clone(),
        ..Object::empty()
    };
    let proj_attrs1 = get_projected_attributes(&subject, &predicate, &child_side);
    let proj_attrs2 = get_projected_attributes(&Subject::empty(), &Predicate::empty(), &object);

    let left = format!("pi[{}]({})", proj_attrs1.join(","), source1);
    let right = format!("pi[{}]({})", proj_attrs2.join(","), parent_source);

    let join_type = object.join_type.unwrap_or(JoinType::Natural);
    let join = match join_type {
        JoinType::Natural => format!("({left}) bowtie ({right})"),
        JoinType::Equi => {
            let jc = object.join_condition.clone().ok_or_else(|| CompileError::Invariant("equi-join object has no join condition".into()))?;
            qualify_for_equi_join(&mut subject, &mut predicate, &mut object, &mut graphs, &source1, &parent_source);
            format!("({left}) bowtie [{source1}_{}={parent_source}_{}] ({right})", jc.child, jc.parent)
        }
    };

    let subject_create = create_subject(&subject);
    let predicate_create = create_predicate(&predicate);
    let object_create = create_object(&object);

    let mut lines = Vec::new();
    match graphs.as_slice() {
        [g] if !g.term_map.is_empty() => lines.push(format!("pi[{subject_create},{predicate_create},{object_create},{}]({join})", create_graph(g))),
        [g1, g2] => {
            if !g1.term_map.is_empty() {
                lines.push(format!("pi[{subject_create},{predicate_create},{object_create},{}]({join})", create_graph(g1)));
            }
            if !g2.term_map.is_empty() {
                lines.push(format!("pi[{subject_create},{predicate_create},{object_create},{}]({join})", create_graph(g2)));
            }
        }
        _ => {}
    }
    if lines.is_empty() {
        lines.push(format!("pi[{subject_create},{predicate_create},{object_create}]({join})"));
    }

    Ok(lines.join("\n"))
}

/// Translate one normalised, single-POM subgraph into its RA expression.
///
/// Dispatches on whether the triples-map root has two `subjectMap` edges
/// in scope (the join shape, after a parent triples-map's subject map has
/// been copied alongside the original) or one.
pub fn translate_subgraph(triples: &[NTriple]) -> Result<String> {
    let subject_maps = objects_of(triples, "", SUBJECT_MAP);
    if subject_maps.len() == 2 { create_complex_tree(triples) } else { create_simple_tree(triples) }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extract_substrings_skips_escaped_brace() {
        assert_eq!(extract_substrings("http://ex/{id}"), vec!["id".to_owned()]);
        assert_eq!(extract_substrings(r"\{id}/{a}"), vec!["a".to_owned()]);
    }

    #[test]
    fn extract_substrings_honours_only_backslash_brace_escaping() {
        assert_eq!(extract_substrings(r"{a\}b}"), vec![r"a\".to_owned()]);
    }

    #[test]
    fn projected_attributes_union_template_and_reference() {
        let subject = Subject {
            term_map_type: Some(TermMapType::Template),
            term_type: crate::_termmap::TermType::Iri,
            term_map: "http://ex/{a}/{b}".to_owned(),
        };
        let predicate = Predicate::empty();
        let object = Object {
            term_map_type: Some(TermMapType::Reference),
            term_map: "name".to_owned(),
            ..Object::empty()
        };
        assert_eq!(get_projected_attributes(&subject, &predicate, &object), vec!["a".to_owned(), "b".to_owned(), "name".to_owned()]);
    }

    #[test]
    fn scenario_a_simplest_map() {
        let triples = vec![
            NTriple::new("tm", "http://www.w3.org/ns/rml#logicalSource", "ls"),
            NTriple::new("ls", SOURCE, "people.csv"),
            NTriple::new("tm", "http://www.w3.org/ns/r2rml#subjectMap", "sm"),
            NTriple::new("sm", "http://www.w3.org/ns/r2rml#template", "http://ex/{id}"),
            NTriple::new("tm", "http://www.w3.org/ns/r2rml#predicateObjectMap", "pom"),
            NTriple::new("pom", "http://www.w3.org/ns/r2rml#predicateMap", "pm"),
            NTriple::new("pm", "http://www.w3.org/ns/r2rml#constant", "ex:name"),
            NTriple::new("pom", "http://www.w3.org/ns/r2rml#objectMap", "om"),
            NTriple::new("om", "http://semweb.mmlab.be/ns/rml#reference", "name"),
        ];
        let ra = translate_subgraph(&triples).unwrap();
        assert_eq!(
            ra,
            "pi[create(http://ex/{id},template,iri) -> S,create(ex:name,constant,iri) -> P,create(name,reference,literal,None,None) -> O](pi[id,name](people.csv))"
        );
    }

    #[test]
    fn natural_join_has_no_bracketed_condition() {
        let triples = vec![
            NTriple::new("tm", "http://www.w3.org/ns/rml#logicalSource", "ls"),
            NTriple::new("ls", SOURCE, "a.csv"),
            NTriple::new("tm", "http://www.w3.org/ns/r2rml#subjectMap", "sm"),
            NTriple::new("sm", "http://www.w3.org/ns/r2rml#template", "http://ex/{id}"),
            NTriple::new("tm", "http://www.w3.org/ns/r2rml#predicateObjectMap", "pom"),
            NTriple::new("pom", "http://www.w3.org/ns/r2rml#predicateMap", "pm"),
            NTriple::new("pm", "http://www.w3.org/ns/r2rml#constant", "ex:team"),
            NTriple::new("pom", "http://www.w3.org/ns/r2rml#objectMap", "om"),
            NTriple::new("om", "http://www.w3.org/ns/r2rml#parentTriplesMap", "parent_tm"),
            NTriple::new("parent_tm", "http://www.w3.org/ns/rml#logicalSource", "parent_ls"),
            NTriple::new("parent_ls", SOURCE, "b.csv"),
            NTriple::new("parent_tm", "http://www.w3.org/ns/r2rml#subjectMap", "sm"),
        ];
        let ra = translate_subgraph(&triples).unwrap();
        assert!(ra.contains("bowtie ("));
        assert!(!ra.contains("bowtie ["));
    }

    #[test]
    fn equi_join_qualifies_subject_predicate_and_object() {
        let triples = vec![
            NTriple::new("tm", "http://www.w3.org/ns/rml#logicalSource", "ls"),
            NTriple::new("ls", SOURCE, "a.csv"),
            NTriple::new("tm", "http://www.w3.org/ns/r2rml#subjectMap", "sm"),
            NTriple::new("sm", "http://www.w3.org/ns/r2rml#template", "http://ex/{Sport}"),
            NTriple::new("tm", "http://www.w3.org/ns/r2rml#predicateObjectMap", "pom"),
            NTriple::new("pom", "http://www.w3.org/ns/r2rml#predicateMap", "pm"),
            NTriple::new("pm", "http://www.w3.org/ns/r2rml#constant", "ex:team"),
            NTriple::new("pom", "http://www.w3.org/ns/r2rml#objectMap", "om"),
            NTriple::new("om", "http://www.w3.org/ns/r2rml#parentTriplesMap", "parent_tm"),
            NTriple::new("om", "http://www.w3.org/ns/r2rml#joinCondition", "jc"),
            NTriple::new("jc", "http://www.w3.org/ns/r2rml#child", "Sport"),
            NTriple::new("jc", "http://www.w3.org/ns/r2rml#parent", "ID"),
            NTriple::new("parent_tm", "http://www.w3.org/ns/rml#logicalSource", "parent_ls"),
            NTriple::new("parent_ls", SOURCE, "b.csv"),
            NTriple::new("parent_tm", "http://www.w3.org/ns/r2rml#subjectMap", "parent_sm"),
            NTriple::new("parent_sm", "http://www.w3.org/ns/r2rml#template", "http://ex/{ID}"),
        ];
        let ra = translate_subgraph(&triples).unwrap();
        assert!(ra.contains("bowtie [a.csv_Sport=b.csv_ID]"));
        assert!(ra.contains("{a.csv_Sport}"));
        assert!(ra.contains("{b.csv_ID}"));
    }

    #[test]
    fn equi_join_does_not_qualify_a_bare_reference_subject() {
        // A Reference-typed subject/predicate term_map (e.g. "Sport", with no
        // surrounding braces) is searched for as "{Sport}", which never
        // matches a brace-free string; qualification is a no-op here. This
        // mirrors the source this was ported from rather than papering over
        // it by qualifying references some other way.
        let triples = vec![
            NTriple::new("tm", "http://www.w3.org/ns/rml#logicalSource", "ls"),
            NTriple::new("ls", SOURCE, "a.csv"),
            NTriple::new("tm", "http://www.w3.org/ns/r2rml#subjectMap", "sm"),
            NTriple::new("sm", "http://www.w3.org/ns/r2rml#reference", "Sport"),
            NTriple::new("tm", "http://www.w3.org/ns/r2rml#predicateObjectMap", "pom"),
            NTriple::new("pom", "http://www.w3.org/ns/r2rml#predicateMap", "pm"),
            NTriple::new("pm", "http://www.w3.org/ns/r2rml#constant", "ex:team"),
            NTriple::new("pom", "http://www.w3.org/ns/r2rml#objectMap", "om"),
            NTriple::new("om", "http://www.w3.org/ns/r2rml#parentTriplesMap", "parent_tm"),
            NTriple::new("om", "http://www.w3.org/ns/r2rml#joinCondition", "jc"),
            NTriple::new("jc", "http://www.w3.org/ns/r2rml#child", "Sport"),
            NTriple::new("jc", "http://www.w3.org/ns/r2rml#parent", "ID"),
            NTriple::new("parent_tm", "http://www.w3.org/ns/rml#logicalSource", "parent_ls"),
            NTriple::new("parent_ls", SOURCE, "b.csv"),
            NTriple::new("parent_tm", "http://www.w3.org/ns/r2rml#subjectMap", "parent_sm"),
            NTriple::new("parent_sm", "http://www.w3.org/ns/r2rml#reference", "ID"),
        ];
        let ra = translate_subgraph(&triples).unwrap();
        assert!(ra.contains("create(Sport,reference,iri) -> S"));
    }
}
