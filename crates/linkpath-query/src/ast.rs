//! Abstract syntax tree for path expressions.
//!
//! Every node is immutable after parsing and knows how to print itself in
//! canonical form, so a well-formed path survives a print/re-parse cycle.

use std::fmt;

/// A location path: one or more steps separated by `/`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocPath {
    pub steps: Vec<Step>,
}

impl fmt::Display for LocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// One segment of a path: a selector with an axis and predicate filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub selector: Selector,
    pub axis: Axis,
    pub filters: Vec<PredicateExpr>,
}

impl Step {
    pub fn new(selector: Selector) -> Self {
        Step {
            selector,
            axis: Axis::Out,
            filters: Vec::new(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.axis == Axis::In {
            write!(f, "in::")?;
        }
        write!(f, "{}", self.selector)?;
        for filter in &self.filters {
            write!(f, "[{}]", filter)?;
        }
        Ok(())
    }
}

/// Traversal direction of a step. `Out` (the default) follows outgoing
/// edges. `In` is parsed and printed but reserved: evaluation currently
/// treats every step as outgoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    In,
    Out,
}

/// The node or arc test of a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// `*`: matches any candidate.
    Wildcard,
    /// `prefix:local`: matches an arc with that predicate, or a node with
    /// that `rdf:type`.
    QName(String),
    /// A quoted string: matches a literal node with exactly that lexical
    /// form.
    LiteralExact(String),
    /// `text()`: matches any literal node.
    AnyLiteral,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Wildcard => write!(f, "*"),
            Selector::QName(qname) => write!(f, "{}", qname),
            Selector::LiteralExact(text) => write!(f, "{}", quoted(text)),
            Selector::AnyLiteral => write!(f, "text()"),
        }
    }
}

/// A boolean expression inside a predicate filter.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateExpr {
    Or {
        left: Box<PredicateExpr>,
        right: Option<Box<PredicateExpr>>,
    },
    And {
        left: Box<PredicateExpr>,
        right: Option<Box<PredicateExpr>>,
    },
    Comparison {
        left: ValueExpr,
        op: Option<CompOp>,
        right: Option<ValueExpr>,
    },
}

impl fmt::Display for PredicateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateExpr::Or { left, right } => {
                write!(f, "{}", left)?;
                if let Some(right) = right {
                    write!(f, " or {}", right)?;
                }
                Ok(())
            }
            PredicateExpr::And { left, right } => {
                write!(f, "{}", left)?;
                if let Some(right) = right {
                    write!(f, " and {}", right)?;
                }
                Ok(())
            }
            PredicateExpr::Comparison { left, op, right } => {
                write!(f, "{}", left)?;
                if let (Some(op), Some(right)) = (op, right) {
                    write!(f, " {} {}", op, right)?;
                }
                Ok(())
            }
        }
    }
}

/// Comparison operators, longest spelling first in the token alternation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "=" => Some(CompOp::Eq),
            "!=" => Some(CompOp::Ne),
            "<" => Some(CompOp::Lt),
            ">" => Some(CompOp::Gt),
            "<=" => Some(CompOp::Le),
            ">=" => Some(CompOp::Ge),
            _ => None,
        }
    }
}

impl fmt::Display for CompOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompOp::Eq => "=",
            CompOp::Ne => "!=",
            CompOp::Lt => "<",
            CompOp::Gt => ">",
            CompOp::Le => "<=",
            CompOp::Ge => ">=",
        };
        write!(f, "{}", symbol)
    }
}

/// A value-producing expression inside a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpr {
    /// A quoted string constant.
    Literal(String),
    /// A number constant.
    Number(f64),
    /// `true()` or `false()`.
    Boolean(bool),
    /// `.`: the candidate the enclosing filter is testing.
    SelfRef,
    /// A relative location path evaluated against the filter candidates.
    Path(LocPath),
    /// A built-in function call.
    Call(FunctionCall),
}

impl fmt::Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Literal(text) => write!(f, "{}", quoted(text)),
            ValueExpr::Number(n) => write!(f, "{}", n),
            ValueExpr::Boolean(true) => write!(f, "true()"),
            ValueExpr::Boolean(false) => write!(f, "false()"),
            ValueExpr::SelfRef => write!(f, "."),
            ValueExpr::Path(path) => write!(f, "{}", path),
            ValueExpr::Call(call) => write!(f, "{}", call),
        }
    }
}

/// A call to one of the built-in functions.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: BuiltinFn,
    pub args: Vec<ValueExpr>,
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// The closed set of built-in functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFn {
    Count,
    LocalName,
    NamespaceUri,
    Uri,
    LiteralValue,
    LiteralDt,
    Exp,
    StringLength,
    NormalizeSpace,
    Boolean,
    Not,
    Number,
    StartsWith,
    Contains,
    SubstringBefore,
    SubstringAfter,
    Concat,
}

/// How many arguments a built-in accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    One,
    Two,
    AtLeastOne,
}

impl BuiltinFn {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "count" => Some(BuiltinFn::Count),
            "local-name" => Some(BuiltinFn::LocalName),
            "namespace-uri" => Some(BuiltinFn::NamespaceUri),
            "uri" => Some(BuiltinFn::Uri),
            "literal-value" => Some(BuiltinFn::LiteralValue),
            "literal-dt" => Some(BuiltinFn::LiteralDt),
            "exp" => Some(BuiltinFn::Exp),
            "string-length" => Some(BuiltinFn::StringLength),
            "normalize-space" => Some(BuiltinFn::NormalizeSpace),
            "boolean" => Some(BuiltinFn::Boolean),
            "not" => Some(BuiltinFn::Not),
            "number" => Some(BuiltinFn::Number),
            "starts-with" => Some(BuiltinFn::StartsWith),
            "contains" => Some(BuiltinFn::Contains),
            "substring-before" => Some(BuiltinFn::SubstringBefore),
            "substring-after" => Some(BuiltinFn::SubstringAfter),
            "concat" => Some(BuiltinFn::Concat),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinFn::Count => "count",
            BuiltinFn::LocalName => "local-name",
            BuiltinFn::NamespaceUri => "namespace-uri",
            BuiltinFn::Uri => "uri",
            BuiltinFn::LiteralValue => "literal-value",
            BuiltinFn::LiteralDt => "literal-dt",
            BuiltinFn::Exp => "exp",
            BuiltinFn::StringLength => "string-length",
            BuiltinFn::NormalizeSpace => "normalize-space",
            BuiltinFn::Boolean => "boolean",
            BuiltinFn::Not => "not",
            BuiltinFn::Number => "number",
            BuiltinFn::StartsWith => "starts-with",
            BuiltinFn::Contains => "contains",
            BuiltinFn::SubstringBefore => "substring-before",
            BuiltinFn::SubstringAfter => "substring-after",
            BuiltinFn::Concat => "concat",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            BuiltinFn::StartsWith
            | BuiltinFn::Contains
            | BuiltinFn::SubstringBefore
            | BuiltinFn::SubstringAfter => Arity::Two,
            BuiltinFn::Concat => Arity::AtLeastOne,
            _ => Arity::One,
        }
    }
}

impl fmt::Display for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Quote a string constant, preferring single quotes as the parser's
/// examples do.
fn quoted(text: &str) -> String {
    if text.contains('\'') {
        format!("\"{}\"", text)
    } else {
        format!("'{}'", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_display_hides_default_axis() {
        let mut step = Step::new(Selector::QName("foaf:knows".to_string()));
        assert_eq!(step.to_string(), "foaf:knows");
        step.axis = Axis::In;
        assert_eq!(step.to_string(), "in::foaf:knows");
    }

    #[test]
    fn test_selector_display() {
        assert_eq!(Selector::Wildcard.to_string(), "*");
        assert_eq!(Selector::AnyLiteral.to_string(), "text()");
        assert_eq!(Selector::LiteralExact("Roux".to_string()).to_string(), "'Roux'");
    }

    #[test]
    fn test_function_display() {
        let call = FunctionCall {
            name: BuiltinFn::StartsWith,
            args: vec![
                ValueExpr::SelfRef,
                ValueExpr::Literal("Sm".to_string()),
            ],
        };
        assert_eq!(call.to_string(), "starts-with(.,'Sm')");
    }

    #[test]
    fn test_builtin_name_round_trip() {
        for name in [
            "count",
            "local-name",
            "namespace-uri",
            "uri",
            "literal-value",
            "literal-dt",
            "exp",
            "string-length",
            "normalize-space",
            "boolean",
            "not",
            "number",
            "starts-with",
            "contains",
            "substring-before",
            "substring-after",
            "concat",
        ] {
            let builtin = BuiltinFn::from_name(name).unwrap();
            assert_eq!(builtin.name(), name);
        }
        assert_eq!(BuiltinFn::from_name("frobnicate"), None);
    }
}
