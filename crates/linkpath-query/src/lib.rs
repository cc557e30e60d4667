//! # linkpath-query
//!
//! An XPath-like path language over linked-data graphs:
//! - regex-backed token scanning (scan)
//! - a recursive-descent parser building an immutable AST (parser, ast)
//! - a tree-walking evaluator that alternates node and arc traversal
//!   (location, value, functions, eval)
//! - the [`PathProcessor`] facade tying parsing and evaluation together.

pub mod ast;
pub mod eval;
pub mod functions;
pub mod location;
pub mod parser;
pub mod processor;
pub mod scan;
pub mod value;

// Re-exports
pub use ast::{Axis, BuiltinFn, CompOp, FunctionCall, LocPath, PredicateExpr, Selector, Step, ValueExpr};
pub use eval::EvalContext;
pub use location::Location;
pub use parser::parse_path;
pub use processor::PathProcessor;
pub use value::Value;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    /// Malformed path text, wrong function arity or a missing argument.
    #[error("parse error: {0}")]
    Parse(String),

    /// Reserved: evaluation is total in the current contract and degrades
    /// type mismatches to false or empty instead of raising.
    #[error("evaluation error: {0}")]
    Evaluation(String),
}
