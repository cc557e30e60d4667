//! Built-in function evaluation.
//!
//! Arguments are evaluated recursively against the same candidate set and
//! filter context as the enclosing expression. Type mismatches degrade to
//! an empty or falsy value rather than failing; evaluation is total.

use crate::ast::{BuiltinFn, FunctionCall};
use crate::eval::EvalContext;
use crate::location::Location;
use crate::value::{parse_numeric, Value};
use lazy_static::lazy_static;
use linkpath_core::model::Term;
use linkpath_graph::AggregatingGraph;
use regex::Regex;
use tracing::debug;

lazy_static! {
    /// Splits an IRI into the namespace up to and including the last `/` or
    /// `#`, and the local name after it.
    static ref NS_LOCAL: Regex = Regex::new(r"(?i)^(.*[/#])([a-z0-9\-_]+)").unwrap();
}

fn split_ns_local(iri: &str) -> Option<(String, String)> {
    NS_LOCAL
        .captures(iri)
        .map(|c| (c[1].to_string(), c[2].to_string()))
}

impl FunctionCall {
    pub fn evaluate(
        &self,
        candidates: &[Location],
        graph: &mut AggregatingGraph,
        context: Option<&Location>,
        ctx: &EvalContext,
    ) -> Value {
        match self.name {
            BuiltinFn::Count => {
                match self.args[0].evaluate(candidates, graph, context, ctx) {
                    Value::Locations(locations) => {
                        if ctx.trace {
                            debug!(count = locations.len(), "count() over selected locations");
                        }
                        Value::Number(locations.len() as f64)
                    }
                    _ => Value::Number(0.0),
                }
            }

            BuiltinFn::LocalName => {
                if let Value::Locations(locations) =
                    self.args[0].evaluate(candidates, graph, context, ctx)
                {
                    if let Some(first) = locations.first() {
                        if first.is_uri() {
                            if let Some((_, local)) = split_ns_local(first.lexical()) {
                                return Value::Str(local);
                            }
                        }
                    }
                }
                Value::empty_str()
            }

            // Unlike local-name this wraps its result in a location list; the
            // asymmetry is part of the function's contract.
            BuiltinFn::NamespaceUri => {
                if let Value::Locations(locations) =
                    self.args[0].evaluate(candidates, graph, context, ctx)
                {
                    if let Some(first) = locations.first() {
                        if first.is_uri() {
                            if let Some((namespace, _)) = split_ns_local(first.lexical()) {
                                return Value::Locations(vec![Location::node(Term::literal(
                                    namespace,
                                ))]);
                            }
                        }
                    }
                }
                Value::Locations(Vec::new())
            }

            BuiltinFn::Uri => {
                if let Value::Locations(locations) =
                    self.args[0].evaluate(candidates, graph, context, ctx)
                {
                    if let Some(first) = locations.first() {
                        if first.is_uri() {
                            return Value::Str(first.lexical().to_string());
                        }
                    }
                }
                Value::empty_str()
            }

            BuiltinFn::LiteralValue => {
                if let Value::Locations(locations) =
                    self.args[0].evaluate(candidates, graph, context, ctx)
                {
                    if let Some(Location::Arc { predicate, origin }) = locations.first() {
                        let values = graph.objects_of(origin, predicate);
                        if let Some(Term::Literal { lexical, .. }) = values.first() {
                            if ctx.trace {
                                debug!(value = %lexical, "literal-value() selected");
                            }
                            return Value::Str(lexical.clone());
                        }
                    }
                }
                Value::empty_str()
            }

            // Reserved
            BuiltinFn::LiteralDt => Value::empty_str(),

            BuiltinFn::Exp => {
                if let Value::Str(qname) = self.args[0].evaluate(candidates, graph, context, ctx) {
                    if let Some(uri) = graph.qname_to_uri(&qname) {
                        if ctx.trace {
                            debug!(%qname, %uri, "exp() expanded qname");
                        }
                        return Value::Str(uri);
                    }
                }
                Value::empty_str()
            }

            BuiltinFn::StringLength => {
                match self.args[0].evaluate(candidates, graph, context, ctx) {
                    Value::Str(s) => Value::Number(s.chars().count() as f64),
                    _ => Value::Number(0.0),
                }
            }

            BuiltinFn::NormalizeSpace => {
                match self.args[0].evaluate(candidates, graph, context, ctx) {
                    Value::Str(s) => {
                        Value::Str(s.split_whitespace().collect::<Vec<_>>().join(" "))
                    }
                    _ => Value::Number(0.0),
                }
            }

            BuiltinFn::Boolean => Value::Bool(
                self.args[0]
                    .evaluate(candidates, graph, context, ctx)
                    .bool_value(),
            ),

            BuiltinFn::Not => Value::Bool(
                !self.args[0]
                    .evaluate(candidates, graph, context, ctx)
                    .bool_value(),
            ),

            BuiltinFn::StartsWith => {
                let a = self.args[0].evaluate(candidates, graph, context, ctx);
                let b = self.args[1].evaluate(candidates, graph, context, ctx);
                match (a, b) {
                    (Value::Str(a), Value::Str(b)) => Value::Bool(a.starts_with(b.as_str())),
                    _ => Value::Number(0.0),
                }
            }

            BuiltinFn::Contains => {
                let a = self.args[0].evaluate(candidates, graph, context, ctx);
                let b = self.args[1].evaluate(candidates, graph, context, ctx);
                match (a, b) {
                    (Value::Str(a), Value::Str(b)) => Value::Bool(a.contains(b.as_str())),
                    _ => Value::Number(0.0),
                }
            }

            BuiltinFn::SubstringBefore => {
                let a = self.args[0].evaluate(candidates, graph, context, ctx);
                let b = self.args[1].evaluate(candidates, graph, context, ctx);
                match (a, b) {
                    (Value::Str(a), Value::Str(b)) => match a.split_once(b.as_str()) {
                        Some((before, _)) => Value::Str(before.to_string()),
                        None => Value::empty_str(),
                    },
                    _ => Value::empty_str(),
                }
            }

            BuiltinFn::SubstringAfter => {
                let a = self.args[0].evaluate(candidates, graph, context, ctx);
                let b = self.args[1].evaluate(candidates, graph, context, ctx);
                match (a, b) {
                    (Value::Str(a), Value::Str(b)) => match a.split_once(b.as_str()) {
                        Some((_, after)) => Value::Str(after.to_string()),
                        None => Value::empty_str(),
                    },
                    _ => Value::empty_str(),
                }
            }

            BuiltinFn::Concat => {
                let mut out = String::new();
                for arg in &self.args {
                    match arg.evaluate(candidates, graph, context, ctx) {
                        Value::Str(s) => out.push_str(&s),
                        _ => return Value::empty_str(),
                    }
                }
                Value::Str(out)
            }

            BuiltinFn::Number => {
                match self.args[0].evaluate(candidates, graph, context, ctx) {
                    Value::Locations(locations) => locations
                        .first()
                        .and_then(|location| parse_numeric(location.lexical()))
                        .map(Value::Number)
                        .unwrap_or(Value::Missing),
                    Value::Str(s) => parse_numeric(&s).map(Value::Number).unwrap_or(Value::Missing),
                    Value::Number(n) => Value::Number(n),
                    _ => Value::Missing,
                }
            }
        }
    }
}
