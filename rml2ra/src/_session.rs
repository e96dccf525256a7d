use uuid::Uuid;

/// Compiler-session state threaded through the normaliser by value: the
/// blank-node counter and the fresh triples-map IRI allocator.
///
/// The original implementation keeps both as process-global mutable state
/// (a counter and a seen-set of random suffixes, retried on collision).
/// Here they are reified as an explicit value a caller owns, and the
/// retry-on-collision allocator is replaced by a `uuid` v4 per fresh IRI,
/// which is collision-free without a seen-set.
#[derive(Clone, Copy, Debug, Default)]
pub struct Session {
    bnode_counter: u64,
}

impl Session {
    /// Start a session with the given initial blank-node counter.
    ///
    /// Given the same input and the same initial counter, the sequence of
    /// generated blank-node labels is reproducible; fresh triples-map IRIs
    /// are not, and callers must not depend on them.
    pub fn new(initial_bnode_counter: u64) -> Self {
        Session {
            bnode_counter: initial_bnode_counter,
        }
    }

    /// Allocate the next blank-node label, `b<N>`.
    pub fn fresh_blank_node(&mut self) -> String {
        self.bnode_counter += 1;
        format!("b{}", self.bnode_counter)
    }

    /// Allocate a fresh triples-map IRI derived from `original`, unique
    /// within and across runs.
    pub fn fresh_triples_map_iri(&mut self, original: &str) -> String {
        format!("{original}{}", Uuid::new_v4().simple())
    }
}
