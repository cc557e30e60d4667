//! Cursors over the graph.
//!
//! Evaluation alternates between nodes (positioned on a term) and arcs
//! (positioned on a predicate leaving a specific subject), so both carry
//! enough context to cross to the other side.

use crate::ast::CompOp;
use crate::value::{numeric_compare, parse_numeric};
use linkpath_core::model::{Term, RDF_TYPE};
use linkpath_graph::AggregatingGraph;
use std::fmt;

/// A position reached while walking a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Positioned on a term.
    Node(Term),
    /// Positioned on one outgoing edge label of `origin`.
    Arc { predicate: String, origin: Term },
}

impl Location {
    pub fn node(term: Term) -> Self {
        Location::Node(term)
    }

    pub fn arc<P: Into<String>>(predicate: P, origin: Term) -> Self {
        Location::Arc {
            predicate: predicate.into(),
            origin,
        }
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, Location::Arc { .. })
    }

    /// Arcs are never literals; a node is a literal when its term is.
    pub fn is_literal(&self) -> bool {
        match self {
            Location::Node(term) => term.is_literal(),
            Location::Arc { .. } => false,
        }
    }

    /// Arcs are always positioned on a predicate IRI.
    pub fn is_uri(&self) -> bool {
        match self {
            Location::Node(term) => term.is_iri(),
            Location::Arc { .. } => true,
        }
    }

    /// The term this location is positioned on. For an arc that is its
    /// predicate IRI; the origin is not part of the position.
    pub fn term(&self) -> Term {
        match self {
            Location::Node(term) => term.clone(),
            Location::Arc { predicate, .. } => Term::iri(predicate.clone()),
        }
    }

    /// The lexical face of the position.
    pub fn lexical(&self) -> &str {
        match self {
            Location::Node(term) => term.lexical(),
            Location::Arc { predicate, .. } => predicate,
        }
    }

    /// Whether the graph types this position's term with the given class.
    pub fn is_type(&self, graph: &mut AggregatingGraph, type_iri: &str) -> bool {
        let subject = self.term();
        graph.has_triple(&subject, RDF_TYPE, &Term::iri(type_iri))
    }

    /// Cross to the other side of the graph: an arc yields the object nodes
    /// of its (origin, predicate) pairs, a node yields its outgoing arcs.
    pub fn expand(&self, graph: &mut AggregatingGraph, distinct: bool) -> Vec<Location> {
        match self {
            Location::Arc { predicate, origin } => graph
                .objects_of(origin, predicate)
                .into_iter()
                .map(Location::Node)
                .collect(),
            Location::Node(term) => graph
                .predicates_of(term, distinct)
                .into_iter()
                .map(|predicate| Location::Arc {
                    predicate,
                    origin: term.clone(),
                })
                .collect(),
        }
    }

    /// Positional equality: locations compare by the term they stand on, so
    /// an arc equals a node positioned on the same predicate IRI.
    pub fn value_eq(&self, other: &Location) -> bool {
        match (self, other) {
            (Location::Node(a), Location::Node(b)) => a == b,
            (Location::Arc { predicate: a, .. }, Location::Arc { predicate: b, .. }) => a == b,
            (Location::Node(Term::Iri(a)), Location::Arc { predicate: b, .. })
            | (Location::Arc { predicate: b, .. }, Location::Node(Term::Iri(a))) => a == b,
            _ => false,
        }
    }

    /// Compare two locations under an operator. Equality is positional;
    /// magnitude comparison requires two literals with numeric lexical
    /// forms and is false otherwise.
    pub fn compare(&self, other: &Location, op: CompOp) -> bool {
        match op {
            CompOp::Eq => self.value_eq(other),
            CompOp::Ne => !self.value_eq(other),
            _ => {
                if !self.is_literal() || !other.is_literal() {
                    return false;
                }
                match (parse_numeric(self.lexical()), parse_numeric(other.lexical())) {
                    (Some(left), Some(right)) => numeric_compare(left, right, op),
                    _ => false,
                }
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Node(term) => write!(f, "{}", term),
            Location::Arc { predicate, origin } => write!(f, "{} -> {}", origin, predicate),
        }
    }
}
