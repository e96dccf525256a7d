//! I parse a Turtle-family RDF mapping document into the flat, ordered
//! [`NTriple`](rml2ra_statement::NTriple) sequence the rest of the
//! compilation pipeline works on.
//!
//! Prefix expansion and `@base` resolution happen here; everything
//! downstream of [`parse_mapping`] sees only absolute IRIs, canonical
//! `b<digits>` blank-node labels, and literal lexical forms. A literal's
//! language tag and datatype IRI, if any, are discarded on ingest — the
//! term-map interpreter recovers that information structurally, from
//! `languageMap`/`datatypeMap` edges in the mapping graph itself, rather
//! than from native RDF literal syntax.
#![deny(missing_docs)]

mod _error;
pub use _error::*;

use std::collections::HashMap;

use oxiri::Iri as OxIri;
use oxrdf::{Subject, Term};
use oxttl::TurtleParser;
use rml2ra_statement::{Iri, NTriple};
use rml2ra_statement_validation::IriValidation;
use tracing::{debug, instrument, warn};

/// Parse `mapping_text` into a flat sequence of expanded triples.
///
/// Triple order is preserved as encountered in the source document, which
/// downstream phases rely on for deterministic output.
#[instrument(skip_all)]
pub fn parse_mapping(mapping_text: &str) -> Result<Vec<NTriple>> {
    let mut parser = TurtleParser::new().for_reader(mapping_text.as_bytes());
    let mut blank_node_ids: HashMap<String, u64> = HashMap::new();
    let mut triples = Vec::new();

    for result in &mut parser {
        let triple = result.map_err(|e| IngestError::Syntax(e.to_string()))?;

        let subject = expand_subject(&triple.subject, &mut blank_node_ids);
        let predicate = triple.predicate.into_string();
        let object = expand_term(triple.object, &mut blank_node_ids);

        let subject = if is_iri_term(&subject) {
            validate_absolute_iri(&subject)?.to_string()
        } else {
            subject
        };
        let predicate = validate_absolute_iri(&predicate)?.to_string();
        let object = if is_iri_term(&object) {
            validate_absolute_iri(&object)?.to_string()
        } else {
            object
        };

        triples.push(NTriple::new(subject, predicate, object));
    }

    debug!(count = triples.len(), "ingested mapping triples");
    if triples.is_empty() {
        warn!("mapping document produced no triples");
    }
    Ok(triples)
}

fn expand_subject(subject: &Subject, blank_node_ids: &mut HashMap<String, u64>) -> String {
    match subject {
        Subject::NamedNode(n) => n.as_str().to_owned(),
        Subject::BlankNode(b) => canonicalize_blank_node(b.as_str(), blank_node_ids),
        #[allow(unreachable_patterns)]
        _ => subject.to_string(),
    }
}

fn expand_term(term: Term, blank_node_ids: &mut HashMap<String, u64>) -> String {
    match term {
        Term::NamedNode(n) => n.into_string(),
        Term::BlankNode(b) => canonicalize_blank_node(b.as_str(), blank_node_ids),
        Term::Literal(l) => l.value().to_owned(),
        #[allow(unreachable_patterns)]
        _ => term.to_string(),
    }
}

/// Remap a parser-assigned blank-node label to the pipeline's canonical
/// `b<N>` form, in first-appearance order, so `is_blank_node` holds for
/// every blank node the pipeline ever sees, ingested or synthesised.
fn canonicalize_blank_node(label: &str, blank_node_ids: &mut HashMap<String, u64>) -> String {
    let next_id = blank_node_ids.len() as u64;
    let id = *blank_node_ids.entry(label.to_owned()).or_insert(next_id);
    format!("b{id}")
}

fn is_iri_term(term: &str) -> bool {
    term.starts_with("http://") || term.starts_with("https://")
}

/// Validate an absolute IRI the Turtle parser has already resolved against
/// any `@base`/prefix in scope, returning the [`Iri`] the rest of the
/// pipeline's IRI-aware callers can trust without re-checking.
///
/// `oxiri` is the same IRI-resolution library `oxttl` uses internally to
/// resolve relative references against a base, so parsing the resolved
/// term through it here catches a malformed resolution (bad
/// percent-encoding, an empty authority) before the term ever reaches the
/// rest of the pipeline. [`Iri::new`](IriValidation::new) then applies this
/// pipeline's own RFC 3987 grammar, which `oxiri::Iri::parse` does not fully
/// enforce.
fn validate_absolute_iri(term: &str) -> Result<Iri<'static>> {
    OxIri::parse(term).map_err(|e| IngestError::InvalidIri(format!("{term}: {e}")))?;
    Iri::new(term.to_owned()).ok_or_else(|| IngestError::InvalidIri(term.to_owned()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_simple_mapping() {
        let turtle = r#"
            @prefix rr: <http://www.w3.org/ns/r2rml#> .
            @prefix ex: <http://example.org/> .
            ex:TM1 rr:subjectMap [ rr:template "http://ex.org/{id}" ] .
        "#;
        let triples = parse_mapping(turtle).unwrap();
        assert!(!triples.is_empty());
        assert!(
            triples
                .iter()
                .any(|t| t.predicate == "http://www.w3.org/ns/r2rml#subjectMap")
        );
    }

    #[test]
    fn canonicalizes_blank_nodes_in_first_appearance_order() {
        let turtle = r#"
            @prefix ex: <http://example.org/> .
            _:a ex:p _:b .
            _:b ex:p _:a .
        "#;
        let triples = parse_mapping(turtle).unwrap();
        assert_eq!(triples[0].subject, "b0");
        assert_eq!(triples[0].object, "b1");
        assert_eq!(triples[1].subject, "b1");
        assert_eq!(triples[1].object, "b0");
    }

    #[test]
    fn literal_lang_and_datatype_are_dropped_to_lexical_form() {
        let turtle = r#"
            @prefix ex: <http://example.org/> .
            ex:s ex:p "hello"@en .
        "#;
        let triples = parse_mapping(turtle).unwrap();
        assert_eq!(triples[0].object, "hello");
    }

    #[test]
    fn rejects_syntax_errors() {
        let turtle = "this is not turtle {{{";
        assert!(matches!(
            parse_mapping(turtle),
            Err(IngestError::Syntax(_))
        ));
    }

    #[test]
    fn oxiri_rejects_a_malformed_resolved_iri() {
        assert!(validate_absolute_iri("http://ex ample/").is_err());
    }

    #[test]
    fn oxiri_accepts_a_well_formed_absolute_iri() {
        assert!(validate_absolute_iri("http://example.org/TM1").is_ok());
    }
}
