//! IRI constants for the R2RML/RML vocabulary terms this compiler
//! recognises. Everything else in the mapping graph is opaque data.

pub(crate) const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub(crate) const TRIPLES_MAP: &str = "http://www.w3.org/ns/r2rml#TriplesMap";
pub(crate) const BLANK_NODE: &str = "http://www.w3.org/ns/r2rml#BlankNode";
pub(crate) const LITERAL: &str = "http://www.w3.org/ns/r2rml#Literal";
pub(crate) const IRI: &str = "http://www.w3.org/ns/r2rml#IRI";
pub(crate) const DEFAULT_GRAPH: &str = "http://www.w3.org/ns/r2rml#defaultGraph";

pub(crate) const CLASS: &str = "http://www.w3.org/ns/r2rml#class";
pub(crate) const SUBJECT: &str = "http://www.w3.org/ns/r2rml#subject";
pub(crate) const PREDICATE: &str = "http://www.w3.org/ns/r2rml#predicate";
pub(crate) const OBJECT: &str = "http://www.w3.org/ns/r2rml#object";
pub(crate) const GRAPH: &str = "http://www.w3.org/ns/r2rml#graph";
pub(crate) const DATATYPE: &str = "http://www.w3.org/ns/r2rml#datatype";
pub(crate) const LANGUAGE: &str = "http://www.w3.org/ns/r2rml#language";

pub(crate) const SUBJECT_MAP: &str = "http://www.w3.org/ns/r2rml#subjectMap";
pub(crate) const PREDICATE_MAP: &str = "http://www.w3.org/ns/r2rml#predicateMap";
pub(crate) const OBJECT_MAP: &str = "http://www.w3.org/ns/r2rml#objectMap";
pub(crate) const GRAPH_MAP: &str = "http://www.w3.org/ns/r2rml#graphMap";
pub(crate) const DATATYPE_MAP: &str = "http://www.w3.org/ns/r2rml#datatypeMap";
pub(crate) const LANGUAGE_MAP: &str = "http://www.w3.org/ns/r2rml#languageMap";

pub(crate) const PREDICATE_OBJECT_MAP: &str = "http://www.w3.org/ns/r2rml#predicateObjectMap";
pub(crate) const PARENT_TRIPLES_MAP: &str = "http://www.w3.org/ns/r2rml#parentTriplesMap";
pub(crate) const JOIN_CONDITION: &str = "http://www.w3.org/ns/r2rml#joinCondition";
pub(crate) const CHILD: &str = "http://www.w3.org/ns/r2rml#child";
pub(crate) const PARENT: &str = "http://www.w3.org/ns/r2rml#parent";
pub(crate) const TERM_TYPE: &str = "http://www.w3.org/ns/r2rml#termType";

pub(crate) const CONSTANT: &str = "http://www.w3.org/ns/r2rml#constant";
pub(crate) const TEMPLATE: &str = "http://www.w3.org/ns/r2rml#template";
pub(crate) const REFERENCE: &str = "http://semweb.mmlab.be/ns/rml#reference";

pub(crate) const LOGICAL_SOURCE: &str = "http://semweb.mmlab.be/ns/rml#logicalSource";
pub(crate) const SOURCE: &str = "http://semweb.mmlab.be/ns/rml#source";

/// Language subtags this compiler accepts in an `r2rml:languageMap`'s
/// `r2rml:constant`. Not a general BCP-47 grammar check: a fixed allow-list,
/// per the mapping language profile this compiler targets.
pub(crate) const VALID_LANGUAGE_SUBTAGS: &[&str] = &[
    "en", "es", "fr", "de", "zh", "it", "ja", "ko", "no", "pt", "ru", "ar", "cs", "da", "nl", "fi",
    "el", "hi", "hu", "ro",
];
