//! Compiles an RML/R2RML mapping document into one relational-algebra
//! expression per triples-map.
//!
//! The pipeline is ingest ([`rml2ra_ingest`]) → validate → normalise →
//! subgraph partition → per-subgraph translation, all single-threaded and
//! synchronous: every phase is a pure function from a triple sequence to a
//! triple sequence or string, and the only I/O is at the ingest boundary.
#![deny(missing_docs)]

mod _error;
pub use _error::*;

mod _vocab;

mod _session;
pub use _session::*;

mod _termmap;
pub use _termmap::*;

mod _normalize;
pub use _normalize::{expand_classes, expand_constants, expand_predicate_object_maps, separate_predicate_object_maps, normalize};

mod _subgraph;
pub use _subgraph::*;

mod _validate;
pub use _validate::*;

mod _interpret;
pub use _interpret::*;

mod _ra;
pub use _ra::translate_subgraph;

use rml2ra_statement::{NTriple, to_wire_format};
use tracing::{debug, instrument};

/// Separates successive RA-expression blocks in [`compile`]'s output.
pub const BLOCK_SEPARATOR: &str = "====";

/// Compile `mapping_text` into one RA-expression block per triples-map,
/// each terminated by a newline and all blocks concatenated with
/// [`BLOCK_SEPARATOR`].
///
/// `initial_bnode_counter` seeds the blank-node allocator normalisation
/// uses for synthesised `class`/constant/predicate-object-map nodes;
/// given the same input and seed, the sequence of generated blank-node
/// labels is reproducible.
#[instrument(skip_all)]
pub fn compile(mapping_text: &str, initial_bnode_counter: u64) -> Result<String> {
    let triples = rml2ra_ingest::parse_mapping(mapping_text)?;
    validate_single_subject_map(&triples)?;

    let mut session = Session::new(initial_bnode_counter);
    let normalized = normalize(&triples, &mut session);
    let subgraphs = partition_into_subgraphs(&normalized);
    debug!(subgraph_count = subgraphs.len(), "partitioned into subgraphs");

    let mut output = String::new();
    for subgraph in &subgraphs {
        let block = translate_subgraph(subgraph)?;
        output.push_str(&block);
        output.push('\n');
        output.push_str(BLOCK_SEPARATOR);
    }
    Ok(output)
}

/// Parse `mapping_text` and serialise the flat, expanded triple sequence to
/// the `|||`-encoded wire form, without running normalisation or
/// translation.
pub fn parse_to_wire_format(mapping_text: &str) -> Result<String> {
    let triples: Vec<NTriple> = rml2ra_ingest::parse_mapping(mapping_text)?;
    Ok(to_wire_format(&triples))
}

#[cfg(test)]
mod test {
    use super::*;

    const SCENARIO_A: &str = r#"
        @prefix rr: <http://www.w3.org/ns/r2rml#> .
        @prefix rml: <http://semweb.mmlab.be/ns/rml#> .
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
        @prefix ex: <http://ex/> .

        <http://ex/TM1> rdf:type rr:TriplesMap ;
            rml:logicalSource [ rml:source "people.csv" ] ;
            rr:subjectMap [ rr:template "http://ex/{id}" ] ;
            rr:predicateObjectMap [
                rr:predicateMap [ rr:constant ex:name ] ;
                rr:objectMap [ rml:reference "name" ]
            ] .
    "#;

    #[test]
    fn compiles_the_simplest_scenario() {
        let ra = compile(SCENARIO_A, 0).unwrap();
        assert!(ra.contains("create(http://ex/{id},template,iri) -> S"));
        assert!(ra.contains("create(ex:name,constant,iri) -> P"));
        assert!(ra.contains("create(name,reference,literal,None,None) -> O"));
        assert!(ra.ends_with(BLOCK_SEPARATOR));
    }

    #[test]
    fn empty_mapping_produces_no_blocks() {
        let ra = compile("", 0).unwrap();
        assert!(ra.is_empty());
    }

    #[test]
    fn rejects_multiple_subject_maps_before_normalising() {
        let mapping = r#"
            @prefix rr: <http://www.w3.org/ns/r2rml#> .
            @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .

            <http://ex/TM1> a rr:TriplesMap ;
                rr:subjectMap [ rr:constant "a" ] , [ rr:constant "b" ] .
        "#;
        assert!(matches!(compile(mapping, 0), Err(CompileError::Structural(_))));
    }

    #[test]
    fn wire_format_round_trips_through_ingest() {
        let wire = parse_to_wire_format(SCENARIO_A).unwrap();
        assert!(wire.contains("|||"));
        assert!(wire.ends_with('\n'));
    }

    #[test]
    fn logs_subgraph_partitioning_and_orphan_class_drop() {
        tracing_subscriber::fmt().with_test_writer().try_init().ok();

        let mapping = format!(
            "{SCENARIO_A}\n[] rr:class ex:Orphan .\n"
        );
        let ra = compile(&mapping, 0).unwrap();
        assert!(ra.contains("create(http://ex/{id},template,iri) -> S"));
    }
}
