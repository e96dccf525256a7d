use std::fmt;

/// How a term's value is sourced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TermMapType {
    /// A literal value fixed at compile time.
    Constant,
    /// A bare attribute name read from the current row.
    Reference,
    /// A string with `{attr}` placeholders substituted at execution time.
    Template,
}

impl fmt::Display for TermMapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TermMapType::Constant => "constant",
            TermMapType::Reference => "reference",
            TermMapType::Template => "template",
        };
        write!(f, "{s}")
    }
}

/// What RDF term kind a term map produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TermType {
    /// An absolute IRI.
    Iri,
    /// A blank node.
    BlankNode,
    /// A literal.
    Literal,
}

impl fmt::Display for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TermType::Iri => "iri",
            TermType::BlankNode => "blanknode",
            TermType::Literal => "literal",
        };
        write!(f, "{s}")
    }
}

/// Whether an object map with a `parentTriplesMap` correlates rows by an
/// explicit equality or takes every parent row unconditionally.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JoinType {
    /// No `joinCondition` is present.
    Natural,
    /// At least one `joinCondition` is present.
    Equi,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JoinType::Natural => "natural-join",
            JoinType::Equi => "equi-join",
        };
        write!(f, "{s}")
    }
}

/// A child/parent attribute pair correlating rows across two sources.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JoinCondition {
    /// Attribute name on the child (this triples-map's) source.
    pub child: String,
    /// Attribute name on the parent triples-map's source.
    pub parent: String,
}

/// Resolved descriptor for a triples-map's subject map.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subject {
    /// `None` when the subject map has none of `constant`/`reference`/`template`.
    pub term_map_type: Option<TermMapType>,
    /// Defaults to [`TermType::Iri`].
    pub term_type: TermType,
    /// The constant value, attribute name, or template string. Empty if
    /// `term_map_type` is `None`.
    pub term_map: String,
}

impl Subject {
    /// A placeholder subject descriptor contributing nothing to a
    /// projected-attribute set.
    pub fn empty() -> Self {
        Subject {
            term_map_type: None,
            term_type: TermType::Iri,
            term_map: String::new(),
        }
    }
}

/// Resolved descriptor for a predicate-object map's predicate map.
///
/// Same shape as [`Subject`]; `term_type` is always [`TermType::Iri`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Predicate {
    /// `None` when the predicate map has none of `constant`/`reference`/`template`.
    pub term_map_type: Option<TermMapType>,
    /// Always [`TermType::Iri`].
    pub term_type: TermType,
    /// The constant value, attribute name, or template string.
    pub term_map: String,
}

impl Predicate {
    /// A placeholder predicate descriptor contributing nothing to a
    /// projected-attribute set.
    pub fn empty() -> Self {
        Predicate {
            term_map_type: None,
            term_type: TermType::Iri,
            term_map: String::new(),
        }
    }
}

/// Resolved descriptor for a predicate-object map's object map.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Object {
    /// `None` when the object map has none of `constant`/`reference`/`template`.
    pub term_map_type: Option<TermMapType>,
    /// Defaults to [`TermType::Literal`].
    pub term_type: TermType,
    /// The constant value, attribute name, or template string.
    pub term_map: String,
    /// Resolved from `r2rml:languageMap`, if present. Validated against the
    /// fixed allow-list at resolution time; never an unknown tag.
    pub lang_tag: Option<String>,
    /// Resolved from `r2rml:datatypeMap`, if present. Any IRI is accepted.
    pub data_type: Option<String>,
    /// Present only when this object map has a `parentTriplesMap`.
    pub join_type: Option<JoinType>,
    /// Present only when `join_type` is [`JoinType::Equi`].
    pub join_condition: Option<JoinCondition>,
}

impl Object {
    /// An object descriptor with no value and [`TermType::Literal`], the
    /// shape an object map resolves to before any term map is found.
    pub fn empty() -> Self {
        Object {
            term_map_type: None,
            term_type: TermType::Literal,
            term_map: String::new(),
            lang_tag: None,
            data_type: None,
            join_type: None,
            join_condition: None,
        }
    }
}

/// Resolved descriptor for a named-graph attachment, at the subject map or
/// at the predicate-object map.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Graph {
    /// `None` when the graph map has none of `constant`/`reference`/`template`.
    pub term_map_type: Option<TermMapType>,
    /// Always [`TermType::Iri`].
    pub term_type: TermType,
    /// Empty when the resolved value is the default-graph sentinel IRI;
    /// an empty `term_map` here means "suppress this graph descriptor",
    /// not "the empty string is the graph name".
    pub term_map: String,
}

impl Graph {
    /// A graph descriptor representing "no graph attached here".
    pub fn absent() -> Self {
        Graph {
            term_map_type: None,
            term_type: TermType::Iri,
            term_map: String::new(),
        }
    }
}
