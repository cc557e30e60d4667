use linkpath_query::ast::*;
use linkpath_query::{parse_path, PathError};
use proptest::prelude::*;

fn parse(input: &str) -> LocPath {
    parse_path(input).unwrap()
}

#[test]
fn test_single_qname_step() {
    let path = parse("foaf:givenName");
    assert_eq!(path.steps.len(), 1);
    assert_eq!(path.steps[0].selector, Selector::QName("foaf:givenName".to_string()));
    assert_eq!(path.steps[0].axis, Axis::Out);
    assert!(path.steps[0].filters.is_empty());
}

#[test]
fn test_multi_step_path() {
    let path = parse("foaf:knows/*/foaf:givenName/text()");
    assert_eq!(path.steps.len(), 4);
    assert_eq!(path.steps[1].selector, Selector::Wildcard);
    assert_eq!(path.steps[3].selector, Selector::AnyLiteral);
}

#[test]
fn test_literal_selector_step() {
    let path = parse("foaf:familyName/'Roux'");
    assert_eq!(path.steps.len(), 2);
    assert_eq!(path.steps[1].selector, Selector::LiteralExact("Roux".to_string()));

    let path = parse(r#"foaf:familyName/"Roux""#);
    assert_eq!(path.steps[1].selector, Selector::LiteralExact("Roux".to_string()));
}

#[test]
fn test_axis_qualifiers() {
    assert_eq!(parse("in::foaf:knows").steps[0].axis, Axis::In);
    assert_eq!(parse("out::foaf:knows").steps[0].axis, Axis::Out);
    assert_eq!(parse("foaf:knows").steps[0].axis, Axis::Out);
}

#[test]
fn test_filter_is_attached_to_its_step() {
    let path = parse("foaf:knows/*[foaf:based_near]");
    assert_eq!(path.steps.len(), 2);
    assert!(path.steps[0].filters.is_empty());
    assert_eq!(path.steps[1].filters.len(), 1);
}

#[test]
fn test_multiple_filters_stay_separate() {
    let path = parse("foaf:knows/*[foaf:givenName][foaf:based_near]");
    assert_eq!(path.steps[1].filters.len(), 2);
}

#[test]
fn test_comparison_structure() {
    let path = parse("*[foaf:age/text() >= 32]");
    let filter = &path.steps[0].filters[0];

    // Filters always nest Or(And(Comparison))
    let PredicateExpr::Or { left, right } = filter else {
        panic!("expected or expression");
    };
    assert!(right.is_none());
    let PredicateExpr::And { left, right } = left.as_ref() else {
        panic!("expected and expression");
    };
    assert!(right.is_none());
    let PredicateExpr::Comparison { left, op, right } = left.as_ref() else {
        panic!("expected comparison");
    };
    assert_eq!(*op, Some(CompOp::Ge));
    assert!(matches!(left, ValueExpr::Path(_)));
    assert_eq!(*right, Some(ValueExpr::Number(32.0)));
}

#[test]
fn test_every_operator_parses() {
    for (text, op) in [
        ("=", CompOp::Eq),
        ("!=", CompOp::Ne),
        ("<", CompOp::Lt),
        (">", CompOp::Gt),
        ("<=", CompOp::Le),
        (">=", CompOp::Ge),
    ] {
        let path = parse(&format!("*[foaf:age/text() {} 32]", text));
        let printed = path.to_string();
        assert!(printed.contains(text), "{} missing from {}", text, printed);
        let PredicateExpr::Or { left, .. } = &path.steps[0].filters[0] else {
            panic!()
        };
        let PredicateExpr::And { left, .. } = left.as_ref() else { panic!() };
        let PredicateExpr::Comparison { op: parsed_op, .. } = left.as_ref() else {
            panic!()
        };
        assert_eq!(*parsed_op, Some(op));
    }
}

#[test]
fn test_and_or_combination() {
    let path = parse("*[foaf:a and foaf:b or foaf:c]");
    assert_eq!(path.to_string(), "*[foaf:a and foaf:b or foaf:c]");
}

#[test]
fn test_and_is_right_associative() {
    let path = parse("*[foaf:a and foaf:b and foaf:c]");
    let PredicateExpr::Or { left, .. } = &path.steps[0].filters[0] else { panic!() };
    let PredicateExpr::And { right, .. } = left.as_ref() else { panic!() };
    // The right side is itself an and-chain
    let PredicateExpr::And { right: inner, .. } = right.as_ref().unwrap().as_ref() else {
        panic!("expected nested and");
    };
    assert!(inner.is_some());
}

#[test]
fn test_function_calls() {
    let path = parse("*[count(foaf:knows/*) > 1]");
    assert_eq!(path.to_string(), "*[count(foaf:knows/*) > 1]");

    let path = parse("*[starts-with(literal-value(foaf:familyName),'Sm')]");
    assert_eq!(
        path.to_string(),
        "*[starts-with(literal-value(foaf:familyName),'Sm')]"
    );
}

#[test]
fn test_self_reference_and_booleans() {
    let path = parse("*[uri(.) = 'http://example.com/x']");
    assert_eq!(path.to_string(), "*[uri(.) = 'http://example.com/x']");

    let path = parse("*[foaf:based_near/* != false()]");
    assert_eq!(path.to_string(), "*[foaf:based_near/* != false()]");
}

#[test]
fn test_matching_is_case_insensitive() {
    let path = parse("FOAF:Person");
    assert_eq!(path.steps[0].selector, Selector::QName("FOAF:Person".to_string()));

    assert_eq!(parse("TEXT()").steps[0].selector, Selector::AnyLiteral);
    assert_eq!(parse("IN::foaf:knows").steps[0].axis, Axis::In);
}

#[test]
fn test_whitespace_is_tolerated() {
    let path = parse("  foaf:knows  /  *  [ foaf:age/text() >= 32 ]  ");
    assert_eq!(path.steps.len(), 2);
    assert_eq!(path.steps[1].filters.len(), 1);
}

#[test]
fn test_trailing_input_is_not_an_error() {
    // Unrecognised trailing input after a complete path is ignored
    let path = parse("foaf:knows/* !!! garbage");
    assert_eq!(path.steps.len(), 2);
}

#[test]
fn test_unknown_call_shape_is_an_error() {
    // "foo" is not a known function and not a step either
    assert!(matches!(parse_path("foo(1,)"), Err(PathError::Parse(_))));
}

#[test]
fn test_wrong_arity_is_an_error() {
    // count takes exactly one argument
    let result = parse_path("*[count(., .)]");
    let Err(PathError::Parse(message)) = result else {
        panic!("expected arity error");
    };
    assert!(message.contains("count"), "unhelpful message: {}", message);

    // starts-with takes exactly two
    assert!(parse_path("*[starts-with('a')]").is_err());
}

#[test]
fn test_missing_argument_is_an_error() {
    // concat requires at least one argument
    let result = parse_path("*[concat()]");
    let Err(PathError::Parse(message)) = result else {
        panic!("expected missing argument error");
    };
    assert!(message.contains("concat"), "unhelpful message: {}", message);
}

#[test]
fn test_dangling_argument_comma_is_an_error() {
    assert!(parse_path("*[concat('a',)]").is_err());
}

#[test]
fn test_dangling_boolean_connective_is_an_error() {
    assert!(parse_path("*[foaf:a or ]").is_err());
    assert!(parse_path("*[foaf:a and ]").is_err());
}

#[test]
fn test_missing_comparison_operand_is_an_error() {
    assert!(parse_path("*[foaf:age/text() > ]").is_err());
}

#[test]
fn test_empty_input_is_an_error() {
    assert!(parse_path("").is_err());
    assert!(parse_path("   ").is_err());
}

#[test]
fn test_concat_accepts_one_or_more_arguments() {
    assert!(parse_path("*[concat('a') = 'a']").is_ok());
    assert!(parse_path("*[concat('a','b','c') = 'abc']").is_ok());
}

#[test]
fn test_print_reparse_round_trip() {
    for input in [
        "foaf:givenName/text()",
        "foaf:knows/*/foaf:givenName/text()",
        "foaf:knows/*[foaf:age/text() >= 32]",
        "foaf:knows/*[count(foaf:knows/*) > 1]",
        "foaf:knows/*[not(foaf:based_near)]",
        "foaf:knows/*[starts-with(literal-value(foaf:familyName),'Sm')]",
        "*[namespace-uri(.) = 'http://xmlns.com/foaf/0.1/']",
        "foaf:knows/*[foaf:givenName/text()=foaf:nick/text()]",
        "in::foaf:knows/*",
        "foaf:familyName/'Roux'",
        "*[foaf:a and foaf:b or foaf:c]",
        "foaf:knows/*[concat(literal-value(foaf:givenName),' ',literal-value(foaf:familyName)) = 'Emily Roux']",
    ] {
        let first = parse(input);
        let printed = first.to_string();
        let second = parse(&printed);
        assert_eq!(first, second, "round trip changed the tree for {}", input);
    }
}

// Strategy for paths shaped the way the parser itself would build them.
fn qname_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,5}:[a-z][a-z0-9_]{0,7}"
}

// Only test-selectors (wildcard, qname) can carry filters in the grammar
fn test_selector_strategy() -> impl Strategy<Value = Selector> {
    prop_oneof![
        Just(Selector::Wildcard),
        qname_strategy().prop_map(Selector::QName),
    ]
}

fn filter_strategy() -> impl Strategy<Value = PredicateExpr> {
    (qname_strategy(), proptest::option::of(0u32..1000)).prop_map(|(qname, number)| {
        let path = LocPath {
            steps: vec![Step::new(Selector::QName(qname))],
        };
        let comparison = match number {
            Some(n) => PredicateExpr::Comparison {
                left: ValueExpr::Path(path),
                op: Some(CompOp::Ge),
                right: Some(ValueExpr::Number(n as f64)),
            },
            None => PredicateExpr::Comparison {
                left: ValueExpr::Path(path),
                op: None,
                right: None,
            },
        };
        PredicateExpr::Or {
            left: Box::new(PredicateExpr::And {
                left: Box::new(comparison),
                right: None,
            }),
            right: None,
        }
    })
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (test_selector_strategy(), proptest::collection::vec(filter_strategy(), 0..3)).prop_map(
            |(selector, filters)| Step {
                selector,
                axis: Axis::Out,
                filters,
            },
        ),
        Just(Step::new(Selector::AnyLiteral)),
    ]
}

proptest! {
    #[test]
    fn prop_printed_paths_reparse_identically(
        steps in proptest::collection::vec(step_strategy(), 1..4)
    ) {
        let path = LocPath { steps };
        let printed = path.to_string();
        let reparsed = parse_path(&printed).unwrap();
        prop_assert_eq!(path, reparsed);
    }
}
