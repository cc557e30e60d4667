//! The processor facade: parse a path, seed the starting candidates, run
//! the evaluator and project distinct result terms.

use crate::ast::LocPath;
use crate::eval::{expand_candidates, EvalContext};
use crate::location::Location;
use crate::parser;
use crate::PathError;
use itertools::Itertools;
use linkpath_core::model::Term;
use linkpath_graph::AggregatingGraph;

/// Evaluates path expressions against an aggregating graph. The graph, its
/// prefix map and its lookup memo live with the processor across calls.
pub struct PathProcessor {
    graph: AggregatingGraph,
}

impl PathProcessor {
    /// A processor over a fresh aggregating graph with HTTP dereferencing.
    pub fn new() -> Self {
        PathProcessor {
            graph: AggregatingGraph::new(),
        }
    }

    /// A processor over a caller-supplied graph.
    pub fn with_graph(graph: AggregatingGraph) -> Self {
        PathProcessor { graph }
    }

    /// Install or overwrite a prefix binding.
    pub fn bind<P: Into<String>, N: Into<String>>(&mut self, prefix: P, namespace: N) {
        self.graph.bind(prefix, namespace);
    }

    pub fn graph(&self) -> &AggregatingGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut AggregatingGraph {
        &mut self.graph
    }

    /// Parse a path expression without evaluating it.
    pub fn parse_path(&self, path: &str) -> Result<LocPath, PathError> {
        parser::parse_path(path)
    }

    /// Evaluate a path from a starting resource and return the distinct
    /// terms it selects, in first-seen order.
    pub fn select(&mut self, start_iri: &str, path: &str) -> Result<Vec<Term>, PathError> {
        self.select_traced(start_iri, path, false)
    }

    /// As [`select`](Self::select), emitting debug-level diagnostics from
    /// every component when `trace` is set.
    pub fn select_traced(
        &mut self,
        start_iri: &str,
        path: &str,
        trace: bool,
    ) -> Result<Vec<Term>, PathError> {
        let parsed = parser::parse_path(path)?;
        let ctx = EvalContext { trace };

        let start = Location::node(Term::iri(start_iri));
        let candidates = expand_candidates(std::slice::from_ref(&start), &mut self.graph, false, &ctx);
        let selected = parsed.select(candidates, &mut self.graph, &ctx);

        Ok(selected
            .into_iter()
            .map(|location| location.term())
            .unique()
            .collect())
    }
}

impl Default for PathProcessor {
    fn default() -> Self {
        Self::new()
    }
}
