//! Line-oriented N-Triples decoder.
//!
//! Turtle and RDF/XML stay behind the [`RdfDecoder`](crate::fetch::RdfDecoder)
//! seam; this module only covers the N-Triples line format, which is enough to
//! seed graphs from fixtures and from servers that offer
//! `application/n-triples`.

use crate::fetch::RdfDecoder;
use crate::GraphError;
use lazy_static::lazy_static;
use linkpath_core::model::{Term, Triple};
use regex::Regex;

lazy_static! {
    /// IRIREF production, angle brackets included.
    static ref IRIREF: Regex = Regex::new(r#"^<([^\x00-\x20<>"\{\}\|\^`\\]*)>"#).unwrap();
    /// BLANK_NODE_LABEL production (ASCII subset).
    static ref BLANK_NODE_LABEL: Regex = Regex::new(r"^_:([A-Za-z0-9][A-Za-z0-9_\-\.]*)").unwrap();
    /// STRING_LITERAL_QUOTE production, quotes included.
    static ref STRING_LITERAL_QUOTE: Regex =
        Regex::new(r#"^"((?:[^"\\\n\r]|\\.)*)""#).unwrap();
    /// LANGTAG production.
    static ref LANGTAG: Regex = Regex::new(r"^@([a-zA-Z]+(?:-[a-zA-Z0-9]+)*)").unwrap();
    /// Datatype marker followed by an IRIREF.
    static ref DATATYPE: Regex =
        Regex::new(r#"^\^\^<([^\x00-\x20<>"\{\}\|\^`\\]*)>"#).unwrap();
}

/// Parse an N-Triples document into triples.
pub fn parse_ntriples(body: &str) -> Result<Vec<Triple>, GraphError> {
    let mut triples = Vec::new();

    for (lineno, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (subject, rest) = parse_subject(line)
            .ok_or_else(|| malformed(lineno, "expected IRI or blank node subject"))?;
        let (predicate, rest) = parse_iri(rest.trim_start())
            .ok_or_else(|| malformed(lineno, "expected IRI predicate"))?;
        let (object, rest) = parse_object(rest.trim_start())
            .ok_or_else(|| malformed(lineno, "expected IRI, blank node or literal object"))?;

        let rest = rest.trim_start();
        if !rest.starts_with('.') {
            return Err(malformed(lineno, "expected terminating '.'"));
        }

        triples.push(Triple::new(subject, predicate, object));
    }

    Ok(triples)
}

fn malformed(lineno: usize, what: &str) -> GraphError {
    GraphError::Decode(format!("line {}: {}", lineno + 1, what))
}

fn parse_subject(input: &str) -> Option<(Term, &str)> {
    if let Some((iri, rest)) = parse_iri(input) {
        return Some((Term::iri(iri), rest));
    }
    parse_blank(input)
}

fn parse_iri(input: &str) -> Option<(String, &str)> {
    let captures = IRIREF.captures(input)?;
    let whole = captures.get(0).unwrap();
    Some((captures[1].to_string(), &input[whole.end()..]))
}

fn parse_blank(input: &str) -> Option<(Term, &str)> {
    let captures = BLANK_NODE_LABEL.captures(input)?;
    let whole = captures.get(0).unwrap();
    Some((Term::blank(&captures[1]), &input[whole.end()..]))
}

fn parse_object(input: &str) -> Option<(Term, &str)> {
    if let Some((iri, rest)) = parse_iri(input) {
        return Some((Term::iri(iri), rest));
    }
    if let Some(result) = parse_blank(input) {
        return Some(result);
    }
    parse_literal(input)
}

fn parse_literal(input: &str) -> Option<(Term, &str)> {
    let captures = STRING_LITERAL_QUOTE.captures(input)?;
    let whole = captures.get(0).unwrap();
    let lexical = unescape(&captures[1]);
    let rest = &input[whole.end()..];

    if let Some(lang) = LANGTAG.captures(rest) {
        let end = lang.get(0).unwrap().end();
        return Some((Term::tagged_literal(lexical, &lang[1]), &rest[end..]));
    }
    if let Some(dt) = DATATYPE.captures(rest) {
        let end = dt.get(0).unwrap().end();
        return Some((Term::typed_literal(lexical, &dt[1]), &rest[end..]));
    }

    Some((Term::literal(lexical), rest))
}

/// Resolve ECHAR and UCHAR escapes within a literal's lexical form.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some('u') => push_codepoint(&mut out, &mut chars, 4),
            Some('U') => push_codepoint(&mut out, &mut chars, 8),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

fn push_codepoint(out: &mut String, chars: &mut std::str::Chars<'_>, digits: usize) {
    let hex: String = chars.by_ref().take(digits).collect();
    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => {
            // Invalid escape, keep the raw text
            out.push_str("\\u");
            out.push_str(&hex);
        }
    }
}

/// [`RdfDecoder`] for `application/n-triples` bodies.
#[derive(Debug, Default)]
pub struct NTriplesDecoder;

impl RdfDecoder for NTriplesDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Triple>, GraphError> {
        parse_ntriples(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iri_triple() {
        let triples = parse_ntriples(
            "<http://example.com/s> <http://example.com/p> <http://example.com/o> .",
        )
        .unwrap();
        assert_eq!(
            triples,
            vec![Triple::new(
                Term::iri("http://example.com/s"),
                "http://example.com/p",
                Term::iri("http://example.com/o"),
            )]
        );
    }

    #[test]
    fn test_parse_literal_objects() {
        let doc = r#"
            <http://example.com/s> <http://example.com/name> "Wilbur" .
            <http://example.com/s> <http://example.com/motto> "salut"@fr .
            <http://example.com/s> <http://example.com/age> "24"^^<http://www.w3.org/2001/XMLSchema#integer> .
        "#;
        let triples = parse_ntriples(doc).unwrap();
        assert_eq!(triples.len(), 3);
        assert_eq!(triples[0].object, Term::literal("Wilbur"));
        assert_eq!(triples[1].object, Term::tagged_literal("salut", "fr"));
        assert_eq!(
            triples[2].object,
            Term::typed_literal("24", "http://www.w3.org/2001/XMLSchema#integer")
        );
    }

    #[test]
    fn test_parse_blank_nodes() {
        let triples =
            parse_ntriples("_:b0 <http://example.com/p> _:b1 .").unwrap();
        assert_eq!(triples[0].subject, Term::blank("b0"));
        assert_eq!(triples[0].object, Term::blank("b1"));
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let doc = "# a comment\n\n<http://a> <http://b> <http://c> .\n";
        assert_eq!(parse_ntriples(doc).unwrap().len(), 1);
    }

    #[test]
    fn test_escapes_resolved() {
        let triples = parse_ntriples(
            r#"<http://a> <http://b> "line\nbreak A" ."#,
        )
        .unwrap();
        assert_eq!(triples[0].object, Term::literal("line\nbreak A"));
    }

    #[test]
    fn test_missing_dot_is_an_error() {
        let result = parse_ntriples("<http://a> <http://b> <http://c>");
        assert!(matches!(result, Err(GraphError::Decode(_))));
    }

    #[test]
    fn test_malformed_subject_is_an_error() {
        let result = parse_ntriples("nonsense <http://b> <http://c> .");
        assert!(result.is_err());
    }
}
