//! Recursive-descent parser for path expressions.
//!
//! The grammar, top-down:
//!
//! ```text
//! Path      := Step ('/' Step)*
//! Step      := Test | STRING | 'text()'
//! Test      := Axis? Selector Filter*
//! Axis      := ('in' | 'out') '::'
//! Selector  := '*' | QName
//! Filter    := '[' OrExpr ']'
//! OrExpr    := AndExpr (' or ' AndExpr)?
//! AndExpr   := CompExpr (' and ' AndExpr)?
//! CompExpr  := UnaryExpr (Op UnaryExpr)?
//! UnaryExpr := FuncCall | STRING | NUMBER | 'true()' | 'false()' | '.' | Path
//! FuncCall  := FuncName '(' UnaryExpr (',' UnaryExpr)* ')'
//! ```
//!
//! Each production takes the remaining input and returns the parsed node
//! plus the remainder. Trailing input after a complete path is not an
//! error; callers that care can inspect the canonical printing instead.

use crate::ast::*;
use crate::scan;
use crate::PathError;

/// Parse a path expression. The first step is mandatory; anything left over
/// after the last parsable step is ignored.
pub fn parse_path(input: &str) -> Result<LocPath, PathError> {
    let (path, _rest) = location_path(input)?;
    if path.steps.is_empty() {
        return Err(PathError::Parse(format!(
            "expected a step at '{}'",
            excerpt(input)
        )));
    }
    Ok(path)
}

fn location_path(input: &str) -> Result<(LocPath, &str), PathError> {
    let mut steps = Vec::new();
    let mut rest = input;

    if let Some((first, after)) = step(rest)? {
        steps.push(first);
        rest = after;
        while let Some((_, after_slash)) = scan::consume(&scan::SLASH, rest) {
            match step(after_slash)? {
                Some((next, after)) => {
                    steps.push(next);
                    rest = after;
                }
                None => break,
            }
        }
    }

    Ok((LocPath { steps }, rest))
}

fn step(input: &str) -> Result<Option<(Step, &str)>, PathError> {
    if let Some(result) = test(input)? {
        return Ok(Some(result));
    }
    if let Some((text, rest)) = string(input) {
        return Ok(Some((Step::new(Selector::LiteralExact(text)), rest)));
    }
    if let Some((_, rest)) = scan::consume(&scan::TEXT_DEF, input) {
        return Ok(Some((Step::new(Selector::AnyLiteral), rest)));
    }
    Ok(None)
}

fn test(input: &str) -> Result<Option<(Step, &str)>, PathError> {
    let (axis, rest) = axis(input);

    let (selector, rest) = if let Some((_, rest)) = scan::consume(&scan::WILDCARD, rest) {
        (Selector::Wildcard, rest)
    } else if let Some((qname, rest)) = scan::consume(&scan::QNAME, rest) {
        (Selector::QName(qname.to_string()), rest)
    } else {
        return Ok(None);
    };

    let mut filters = Vec::new();
    let mut cursor = rest;
    while let Some((_, after_open)) = scan::consume(&scan::OPEN_BRACKET, cursor) {
        match or_expr(after_open)? {
            Some((filter, after_expr)) => {
                filters.push(filter);
                // A missing close bracket is tolerated, like other trailing noise
                cursor = match scan::consume(&scan::CLOSE_BRACKET, after_expr) {
                    Some((_, after_close)) => after_close,
                    None => after_expr,
                };
            }
            None => {
                cursor = after_open;
                break;
            }
        }
    }

    Ok(Some((Step { selector, axis, filters }, cursor)))
}

fn axis(input: &str) -> (Axis, &str) {
    match scan::consume(&scan::AXIS, input) {
        Some((token, rest)) => {
            let name = &token[..token.len() - 2];
            if name.eq_ignore_ascii_case("in") {
                (Axis::In, rest)
            } else {
                (Axis::Out, rest)
            }
        }
        None => (Axis::Out, input),
    }
}

fn or_expr(input: &str) -> Result<Option<(PredicateExpr, &str)>, PathError> {
    let Some((left, rest)) = and_expr(input)? else {
        return Ok(None);
    };

    if let Some((_, after_or)) = scan::consume(&scan::OR_SEP, rest) {
        match and_expr(after_or)? {
            Some((right, after)) => {
                return Ok(Some((
                    PredicateExpr::Or {
                        left: Box::new(left),
                        right: Some(Box::new(right)),
                    },
                    after,
                )));
            }
            None => {
                return Err(PathError::Parse(format!(
                    "expected an expression after 'or' at '{}'",
                    excerpt(after_or)
                )));
            }
        }
    }

    Ok(Some((
        PredicateExpr::Or {
            left: Box::new(left),
            right: None,
        },
        rest,
    )))
}

// Right-associative: `a and b and c` parses as `a and (b and c)`.
fn and_expr(input: &str) -> Result<Option<(PredicateExpr, &str)>, PathError> {
    let Some((left, rest)) = comp_expr(input)? else {
        return Ok(None);
    };

    if let Some((_, after_and)) = scan::consume(&scan::AND_SEP, rest) {
        match and_expr(after_and)? {
            Some((right, after)) => {
                return Ok(Some((
                    PredicateExpr::And {
                        left: Box::new(left),
                        right: Some(Box::new(right)),
                    },
                    after,
                )));
            }
            None => {
                return Err(PathError::Parse(format!(
                    "expected an expression after 'and' at '{}'",
                    excerpt(after_and)
                )));
            }
        }
    }

    Ok(Some((
        PredicateExpr::And {
            left: Box::new(left),
            right: None,
        },
        rest,
    )))
}

fn comp_expr(input: &str) -> Result<Option<(PredicateExpr, &str)>, PathError> {
    let Some((left, rest)) = unary_expr(input)? else {
        return Ok(None);
    };

    if let Some((token, after_op)) = scan::consume(&scan::OPERATOR, rest) {
        let op = CompOp::from_token(token).ok_or_else(|| {
            PathError::Parse(format!("unknown operator '{}' at '{}'", token, excerpt(rest)))
        })?;
        match unary_expr(after_op)? {
            Some((right, after)) => {
                return Ok(Some((
                    PredicateExpr::Comparison {
                        left,
                        op: Some(op),
                        right: Some(right),
                    },
                    after,
                )));
            }
            None => {
                return Err(PathError::Parse(format!(
                    "expected an expression after '{}' at '{}'",
                    op,
                    excerpt(after_op)
                )));
            }
        }
    }

    Ok(Some((
        PredicateExpr::Comparison {
            left,
            op: None,
            right: None,
        },
        rest,
    )))
}

fn unary_expr(input: &str) -> Result<Option<(ValueExpr, &str)>, PathError> {
    if let Some(result) = function_call(input)? {
        return Ok(Some(result));
    }
    if let Some((text, rest)) = string(input) {
        return Ok(Some((ValueExpr::Literal(text), rest)));
    }
    if let Some((digits, rest)) = scan::consume(&scan::NUMBER, input) {
        let number = digits.parse::<f64>().map_err(|_| {
            PathError::Parse(format!("invalid number '{}' at '{}'", digits, excerpt(input)))
        })?;
        return Ok(Some((ValueExpr::Number(number), rest)));
    }
    if let Some((_, rest)) = scan::consume(&scan::TRUE_CALL, input) {
        return Ok(Some((ValueExpr::Boolean(true), rest)));
    }
    if let Some((_, rest)) = scan::consume(&scan::FALSE_CALL, input) {
        return Ok(Some((ValueExpr::Boolean(false), rest)));
    }
    if let Some((_, rest)) = scan::consume(&scan::DOT, input) {
        return Ok(Some((ValueExpr::SelfRef, rest)));
    }

    // A sub-path must contain at least one step to count as an expression
    let (path, rest) = location_path(input)?;
    if !path.steps.is_empty() {
        return Ok(Some((ValueExpr::Path(path), rest)));
    }

    Ok(None)
}

fn function_call(input: &str) -> Result<Option<(ValueExpr, &str)>, PathError> {
    let Some((token, mut rest)) = scan::consume(&scan::FUNC_NAME, input) else {
        return Ok(None);
    };
    let name_text = token[..token.len() - 1].to_ascii_lowercase();
    let name = BuiltinFn::from_name(&name_text).ok_or_else(|| {
        PathError::Parse(format!("unknown function '{}' at '{}'", name_text, excerpt(input)))
    })?;

    let mut args = Vec::new();
    match unary_expr(rest)? {
        Some((arg, after)) => {
            args.push(arg);
            rest = after;
        }
        None => {
            return Err(PathError::Parse(format!(
                "expecting at least one argument for {} at '{}'",
                name,
                excerpt(input)
            )));
        }
    }

    loop {
        if let Some((_, after)) = scan::consume(&scan::CLOSE_PAREN, rest) {
            rest = after;
            break;
        }
        if let Some((_, after_comma)) = scan::consume(&scan::COMMA, rest) {
            match unary_expr(after_comma)? {
                Some((arg, after)) => {
                    args.push(arg);
                    rest = after;
                }
                None => {
                    return Err(PathError::Parse(format!(
                        "expected an argument after ',' in call to {} at '{}'",
                        name,
                        excerpt(input)
                    )));
                }
            }
        } else {
            return Err(PathError::Parse(format!(
                "expecting a comma or a closing bracket in call to {} at '{}'",
                name,
                excerpt(rest)
            )));
        }
    }

    match name.arity() {
        Arity::One if args.len() != 1 => Err(PathError::Parse(format!(
            "expecting exactly one argument for {} at '{}'",
            name,
            excerpt(input)
        ))),
        Arity::Two if args.len() != 2 => Err(PathError::Parse(format!(
            "expecting exactly two arguments for {} at '{}'",
            name,
            excerpt(input)
        ))),
        _ => Ok(Some((ValueExpr::Call(FunctionCall { name, args }), rest))),
    }
}

fn string(input: &str) -> Option<(String, &str)> {
    if let Some((token, rest)) = scan::consume(&scan::STRING_DQ, input) {
        return Some((token[1..token.len() - 1].to_string(), rest));
    }
    if let Some((token, rest)) = scan::consume(&scan::STRING_SQ, input) {
        return Some((token[1..token.len() - 1].to_string(), rest));
    }
    None
}

/// A short window of the remaining input for error context.
fn excerpt(input: &str) -> String {
    const LIMIT: usize = 40;
    let trimmed = input.trim_start();
    if trimmed.chars().count() <= LIMIT {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(LIMIT).collect();
        format!("{}...", cut)
    }
}
