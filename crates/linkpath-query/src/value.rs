//! The values produced by predicate expressions, and the type-dispatched
//! comparison rules between them.

use crate::ast::CompOp;
use crate::location::Location;

/// The result of evaluating a [`ValueExpr`](crate::ast::ValueExpr).
///
/// `Missing` is the sentinel produced by `number()` when its argument has no
/// numeric interpretation; it is falsy and compares false against
/// everything, unlike a genuine zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Locations(Vec<Location>),
    Bool(bool),
    Number(f64),
    Str(String),
    Missing,
}

impl Value {
    pub fn empty_str() -> Self {
        Value::Str(String::new())
    }

    /// Truthiness: non-empty for location lists and strings, non-zero for
    /// numbers, identity for booleans, false for the missing sentinel.
    pub fn bool_value(&self) -> bool {
        match self {
            Value::Locations(locations) => !locations.is_empty(),
            Value::Str(s) => !s.is_empty(),
            Value::Number(n) => *n != 0.0,
            Value::Bool(b) => *b,
            Value::Missing => false,
        }
    }
}

/// The numeric interpretation of a lexical form, if it has one.
pub fn parse_numeric(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

pub fn numeric_compare(left: f64, right: f64, op: CompOp) -> bool {
    match op {
        CompOp::Eq => left == right,
        CompOp::Ne => left != right,
        CompOp::Lt => left < right,
        CompOp::Gt => left > right,
        CompOp::Le => left <= right,
        CompOp::Ge => left >= right,
    }
}

/// Dispatch a comparison on the dynamic types of both sides. Pairings with
/// no defined behaviour evaluate to false, as does anything involving the
/// missing sentinel.
pub fn compare_values(left: &Value, right: &Value, op: CompOp) -> bool {
    match (left, right) {
        (Value::Locations(l), Value::Locations(r)) => compare_list_to_list(l, r, op),
        (Value::Locations(l), Value::Bool(b)) | (Value::Bool(b), Value::Locations(l)) => {
            compare_booleans(!l.is_empty(), *b, op)
        }
        // The list side always supplies the left operand, whichever side it
        // appeared on; magnitude tests against a leading number read reversed.
        (Value::Locations(l), Value::Number(n)) | (Value::Number(n), Value::Locations(l)) => {
            compare_list_to_numeric(l, *n, op)
        }
        (Value::Locations(l), Value::Str(s)) | (Value::Str(s), Value::Locations(l)) => {
            compare_list_to_string(l, s, op)
        }
        (Value::Bool(l), Value::Bool(r)) => compare_booleans(*l, *r, op),
        (Value::Bool(b), Value::Str(s)) | (Value::Str(s), Value::Bool(b)) => {
            compare_boolean_to_string(*b, s, op)
        }
        (Value::Number(l), Value::Number(r)) => numeric_compare(*l, *r, op),
        (Value::Str(l), Value::Str(r)) => match op {
            CompOp::Eq => l == r,
            CompOp::Ne => l != r,
            _ => false,
        },
        _ => false,
    }
}

fn compare_booleans(left: bool, right: bool, op: CompOp) -> bool {
    match op {
        CompOp::Eq => left == right,
        CompOp::Ne => left != right,
        _ => false,
    }
}

fn compare_list_to_list(left: &[Location], right: &[Location], op: CompOp) -> bool {
    if left.is_empty() || right.is_empty() {
        return false;
    }
    left.iter()
        .any(|l| right.iter().any(|r| l.compare(r, op)))
}

fn compare_list_to_numeric(list: &[Location], number: f64, op: CompOp) -> bool {
    list.iter().any(|location| {
        location.is_literal()
            && parse_numeric(location.lexical())
                .map(|value| numeric_compare(value, number, op))
                .unwrap_or(false)
    })
}

fn compare_list_to_string(list: &[Location], string: &str, op: CompOp) -> bool {
    if op != CompOp::Eq && op != CompOp::Ne {
        return false;
    }
    list.iter().any(|location| {
        location.is_literal()
            && match op {
                CompOp::Eq => location.lexical() == string,
                _ => location.lexical() != string,
            }
    })
}

fn compare_boolean_to_string(boolean: bool, string: &str, op: CompOp) -> bool {
    if op != CompOp::Eq {
        return false;
    }
    boolean == !string.is_empty()
}
