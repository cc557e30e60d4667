//! Regex-backed token matchers.
//!
//! Each token is a whitespace-tolerant prefix consumer: it skips leading
//! whitespace, matches its pattern case-insensitively and hands back the
//! matched text together with the remaining input. All parser productions
//! are built from these primitives.

use lazy_static::lazy_static;
use regex::Regex;

/// Compile a token pattern: leading whitespace skipped, case-insensitive,
/// dot matches newline, match captured as group 1.
fn token(pattern: &str) -> Regex {
    Regex::new(&format!(r"(?is)^\s*({})", pattern)).unwrap()
}

lazy_static! {
    pub static ref WILDCARD: Regex = token(r"\*");
    pub static ref QNAME: Regex = token(r"[a-z0-9_]+:[a-z0-9_]+");
    /// Axis qualifier including the `::` marker.
    pub static ref AXIS: Regex = token(r"(?:in|out)::");
    pub static ref SLASH: Regex = token(r"/");
    pub static ref OPEN_BRACKET: Regex = token(r"\[");
    pub static ref CLOSE_BRACKET: Regex = token(r"\]");
    pub static ref CLOSE_PAREN: Regex = token(r"\)");
    pub static ref COMMA: Regex = token(r",");
    pub static ref DOT: Regex = token(r"\.");
    /// Longest operators first so `<=` wins over `<`.
    pub static ref OPERATOR: Regex = token(r">=|<=|!=|=|<|>");
    pub static ref OR_SEP: Regex = token(r"\s+or\s+");
    pub static ref AND_SEP: Regex = token(r"\s+and\s+");
    pub static ref STRING_DQ: Regex = token(r#""[^"]*""#);
    pub static ref STRING_SQ: Regex = token(r"'[^']*'");
    pub static ref NUMBER: Regex = token(r"[0-9]+");
    pub static ref TRUE_CALL: Regex = token(r"true\(\)");
    pub static ref FALSE_CALL: Regex = token(r"false\(\)");
    pub static ref TEXT_DEF: Regex = token(r"text\(\)");
    /// Built-in function name followed by its opening parenthesis. The
    /// alternation keeps names that prefix each other unambiguous because
    /// the parenthesis must follow immediately.
    pub static ref FUNC_NAME: Regex = token(
        r"(?:count|local-name|namespace-uri|uri|literal-value|literal-dt|exp|string-length|normalize-space|boolean|not|starts-with|contains|substring-before|substring-after|concat|number)\("
    );
}

/// Consume a token from the front of the input. Returns the matched text
/// (without the skipped whitespace) and the remainder.
pub fn consume<'a>(re: &Regex, input: &'a str) -> Option<(&'a str, &'a str)> {
    let captures = re.captures(input)?;
    let group = captures.get(1).expect("token patterns capture group 1");
    Some((group.as_str(), &input[group.end()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_skips_leading_whitespace() {
        let (tok, rest) = consume(&WILDCARD, "   * / foo").unwrap();
        assert_eq!(tok, "*");
        assert_eq!(rest, " / foo");
    }

    #[test]
    fn test_consume_requires_prefix_match() {
        assert!(consume(&WILDCARD, "foaf:knows/*").is_none());
    }

    #[test]
    fn test_qname_is_case_insensitive() {
        let (tok, _) = consume(&QNAME, "FOAF:Person").unwrap();
        assert_eq!(tok, "FOAF:Person");
    }

    #[test]
    fn test_operator_prefers_longest_match() {
        let (tok, rest) = consume(&OPERATOR, "<= 32").unwrap();
        assert_eq!(tok, "<=");
        assert_eq!(rest, " 32");

        let (tok, _) = consume(&OPERATOR, "!=32").unwrap();
        assert_eq!(tok, "!=");

        let (tok, rest) = consume(&OPERATOR, "< 5").unwrap();
        assert_eq!(tok, "<");
        assert_eq!(rest, " 5");
    }

    #[test]
    fn test_or_separator_requires_surrounding_whitespace() {
        assert!(consume(&OR_SEP, " or b").is_some());
        assert!(consume(&OR_SEP, "orb").is_none());
    }

    #[test]
    fn test_strings_in_both_quote_styles() {
        let (tok, _) = consume(&STRING_DQ, r#""Smith" = x"#).unwrap();
        assert_eq!(tok, r#""Smith""#);
        let (tok, _) = consume(&STRING_SQ, "'Smith' = x").unwrap();
        assert_eq!(tok, "'Smith'");
    }

    #[test]
    fn test_func_name_needs_parenthesis() {
        let (tok, rest) = consume(&FUNC_NAME, "count(foaf:knows)").unwrap();
        assert_eq!(tok, "count(");
        assert_eq!(rest, "foaf:knows)");
        // A qname that merely starts with a function name is not a call
        assert!(consume(&FUNC_NAME, "counter:thing").is_none());
    }

    #[test]
    fn test_axis_tokens() {
        let (tok, rest) = consume(&AXIS, "in::foaf:knows").unwrap();
        assert_eq!(tok, "in::");
        assert_eq!(rest, "foaf:knows");
        assert!(consume(&AXIS, "foaf:knows").is_none());
    }
}
