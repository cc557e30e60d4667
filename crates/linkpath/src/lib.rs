//! # linkpath
//!
//! linkpath evaluates XPath-like path expressions over RDF graphs that can
//! grow lazily by dereferencing the IRIs they are queried about.
//!
//! A path is a sequence of steps separated by `/`. Evaluation alternates
//! between arcs (the predicates leaving a resource) and nodes (the values
//! those predicates point at), so `foaf:knows/*/foaf:givenName/text()`
//! reads: follow the `foaf:knows` predicates, accept any value, follow
//! their `foaf:givenName` predicates and keep the literal values.
//!
//! ## Quick start
//!
//! ```rust
//! use linkpath::prelude::*;
//!
//! let mut graph = AggregatingGraph::offline();
//! graph.extend([Triple::new(
//!     Term::iri("http://example.com/res/alice"),
//!     "http://xmlns.com/foaf/0.1/givenName",
//!     Term::literal("Alice"),
//! )]);
//!
//! let mut processor = PathProcessor::with_graph(graph);
//! processor.bind("foaf", "http://xmlns.com/foaf/0.1/");
//!
//! let results = processor
//!     .select("http://example.com/res/alice", "foaf:givenName/text()")
//!     .unwrap();
//! assert_eq!(results, vec![Term::literal("Alice")]);
//! ```
//!
//! ## Architecture
//!
//! The workspace consists of focused crates:
//!
//! - **`linkpath-core`**: RDF terms, triples and the indexed graph store
//! - **`linkpath-graph`**: the aggregating graph, prefix map and
//!   dereferencing seam
//! - **`linkpath-query`**: the path parser and evaluator
//! - **`linkpath-cli`**: command-line interface

pub use linkpath_core as core;
pub use linkpath_graph as graph;
pub use linkpath_query as query;

/// The types most callers need.
pub mod prelude {
    pub use linkpath_core::model::{Term, Triple};
    pub use linkpath_core::store::GraphStore;
    pub use linkpath_graph::{AggregatingGraph, Dereferencer, NTriplesDecoder, PrefixMap};
    pub use linkpath_query::{PathError, PathProcessor};
}
