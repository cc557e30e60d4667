//! The evaluator: drives candidate propagation through the steps of a
//! location path.
//!
//! Evaluation alternates node and arc candidates. Each step filters the
//! current candidates through its selector and predicate filters; between
//! steps the survivors are crossed to the other side of the graph (arcs to
//! their object nodes, nodes to their outgoing arcs). Literal candidates
//! have no outgoing side and drop out of the expansion.

use crate::ast::{LocPath, PredicateExpr, Selector, Step, ValueExpr};
use crate::location::Location;
use crate::value::{compare_values, Value};
use linkpath_graph::AggregatingGraph;
use tracing::debug;

/// Per-call evaluation state.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalContext {
    /// Emit debug-level diagnostics for every match decision.
    pub trace: bool,
}

impl LocPath {
    /// Drive the candidate set through each step in order and return the
    /// locations selected by the final step. Duplicates are preserved;
    /// callers that need distinct terms project them afterwards.
    pub fn select(
        &self,
        mut candidates: Vec<Location>,
        graph: &mut AggregatingGraph,
        ctx: &EvalContext,
    ) -> Vec<Location> {
        if ctx.trace {
            debug!(path = %self, "evaluating path");
        }

        let mut selected = Vec::new();
        for (i, step) in self.steps.iter().enumerate() {
            if ctx.trace {
                debug!(step = %step, candidates = candidates.len(), "filtering candidates");
            }

            let mut passed = Vec::new();
            for candidate in &candidates {
                if step.matches(candidate, graph, ctx) {
                    passed.push(candidate.clone());
                }
            }
            if ctx.trace {
                debug!(passed = passed.len(), "candidates passed the step");
            }
            selected = passed;

            if i + 1 < self.steps.len() {
                candidates = expand_candidates(&selected, graph, true, ctx);
            }
        }

        selected
    }
}

impl Step {
    /// The selector must match, and then every filter must hold against the
    /// candidate set derived from this candidate alone. Multiple filters
    /// are conjunctive.
    pub fn matches(
        &self,
        candidate: &Location,
        graph: &mut AggregatingGraph,
        ctx: &EvalContext,
    ) -> bool {
        if !self.selector.matches(candidate, graph, ctx) {
            return false;
        }
        if self.filters.is_empty() {
            return true;
        }

        let filter_candidates =
            expand_candidates(std::slice::from_ref(candidate), graph, false, ctx);
        for filter in &self.filters {
            if ctx.trace {
                debug!(filter = %filter, candidate = %candidate, "applying filter");
            }
            if !filter.matches(&filter_candidates, graph, candidate, ctx) {
                return false;
            }
        }
        true
    }
}

impl Selector {
    pub fn matches(
        &self,
        candidate: &Location,
        graph: &mut AggregatingGraph,
        ctx: &EvalContext,
    ) -> bool {
        let matched = match self {
            Selector::Wildcard => true,
            Selector::QName(qname) => match graph.qname_to_uri(qname) {
                Some(uri) => match candidate {
                    // An arc matches on its predicate, a node on its rdf:type
                    Location::Arc { predicate, .. } => predicate == &uri,
                    node => node.is_type(graph, &uri),
                },
                None => false,
            },
            Selector::LiteralExact(text) => {
                candidate.is_literal() && candidate.lexical() == text
            }
            Selector::AnyLiteral => candidate.is_literal(),
        };

        if ctx.trace {
            debug!(selector = %self, candidate = %candidate, matched, "selector test");
        }
        matched
    }
}

impl PredicateExpr {
    /// Evaluate a filter expression against the filter-candidate set.
    /// `context` is the candidate the enclosing step is testing; `.` refers
    /// to it.
    pub fn matches(
        &self,
        candidates: &[Location],
        graph: &mut AggregatingGraph,
        context: &Location,
        ctx: &EvalContext,
    ) -> bool {
        let matched = match self {
            PredicateExpr::Or { left, right } => {
                left.matches(candidates, graph, context, ctx)
                    || right
                        .as_ref()
                        .map_or(false, |r| r.matches(candidates, graph, context, ctx))
            }
            PredicateExpr::And { left, right } => {
                left.matches(candidates, graph, context, ctx)
                    && right
                        .as_ref()
                        .map_or(true, |r| r.matches(candidates, graph, context, ctx))
            }
            PredicateExpr::Comparison { left, op, right } => {
                let left_value = left.evaluate(candidates, graph, Some(context), ctx);
                match (op, right) {
                    (Some(op), Some(right)) => {
                        let right_value = right.evaluate(candidates, graph, Some(context), ctx);
                        compare_values(&left_value, &right_value, *op)
                    }
                    // A bare expression is coerced to boolean
                    _ => left_value.bool_value(),
                }
            }
        };

        if ctx.trace {
            debug!(expr = %self, matched, "predicate test");
        }
        matched
    }
}

impl ValueExpr {
    pub fn evaluate(
        &self,
        candidates: &[Location],
        graph: &mut AggregatingGraph,
        context: Option<&Location>,
        ctx: &EvalContext,
    ) -> Value {
        match self {
            ValueExpr::Literal(text) => Value::Str(text.clone()),
            ValueExpr::Number(n) => Value::Number(*n),
            ValueExpr::Boolean(b) => Value::Bool(*b),
            ValueExpr::SelfRef => Value::Locations(context.cloned().into_iter().collect()),
            ValueExpr::Path(path) => {
                Value::Locations(path.select(candidates.to_vec(), graph, ctx))
            }
            ValueExpr::Call(call) => call.evaluate(candidates, graph, context, ctx),
        }
    }
}

/// Cross every non-literal location to the other side of the graph:
/// arcs to their object nodes, nodes to their outgoing arcs.
pub fn expand_candidates(
    locations: &[Location],
    graph: &mut AggregatingGraph,
    distinct: bool,
    ctx: &EvalContext,
) -> Vec<Location> {
    let mut candidates = Vec::new();
    for location in locations {
        if location.is_literal() {
            continue;
        }
        if ctx.trace {
            debug!(location = %location, "expanding");
        }
        candidates.extend(location.expand(graph, distinct));
    }
    if ctx.trace {
        debug!(count = candidates.len(), "expanded candidate set");
    }
    candidates
}
