use linkpath_core::model::{Term, Triple};
use linkpath_graph::{AggregatingGraph, Dereferencer};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Dereferencer that serves canned triples and records every request.
#[derive(Default)]
struct FakeState {
    payloads: HashMap<String, Vec<Triple>>,
    requests: Vec<String>,
}

struct FakeDereferencer {
    state: Rc<RefCell<FakeState>>,
}

impl FakeDereferencer {
    fn new() -> (Self, Rc<RefCell<FakeState>>) {
        let state = Rc::new(RefCell::new(FakeState::default()));
        (FakeDereferencer { state: Rc::clone(&state) }, state)
    }
}

impl Dereferencer for FakeDereferencer {
    fn dereference(&mut self, iri: &str) -> Vec<Triple> {
        let mut state = self.state.borrow_mut();
        state.requests.push(iri.to_string());
        state.payloads.get(iri).cloned().unwrap_or_default()
    }
}

fn person_triple(subject: &str) -> Triple {
    Triple::new(
        Term::iri(subject),
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
        Term::iri("http://xmlns.com/foaf/0.1/Person"),
    )
}

#[test]
fn test_lookup_populates_graph() {
    let (fake, state) = FakeDereferencer::new();
    state.borrow_mut().payloads.insert(
        "http://example.com/alice".to_string(),
        vec![person_triple("http://example.com/alice")],
    );

    let mut graph = AggregatingGraph::with_dereferencer(Box::new(fake));
    let subject = Term::iri("http://example.com/alice");
    let predicates = graph.predicates_of(&subject, false);

    assert_eq!(predicates, vec!["http://www.w3.org/1999/02/22-rdf-syntax-ns#type".to_string()]);
    assert_eq!(graph.store().len(), 1);
}

#[test]
fn test_lookup_is_at_most_once_per_iri() {
    let (fake, state) = FakeDereferencer::new();
    let mut graph = AggregatingGraph::with_dereferencer(Box::new(fake));
    let subject = Term::iri("http://example.com/alice");

    graph.predicates_of(&subject, false);
    graph.predicates_of(&subject, false);
    graph.objects_of(&subject, "http://example.com/p");
    graph.has_triple(&subject, "http://example.com/p", &Term::literal("x"));

    assert_eq!(state.borrow().requests.len(), 1);
}

#[test]
fn test_lookup_failure_leaves_graph_unchanged_but_counts() {
    let (fake, state) = FakeDereferencer::new();
    let mut graph = AggregatingGraph::with_dereferencer(Box::new(fake));
    let subject = Term::iri("http://example.com/missing");

    graph.predicates_of(&subject, false);
    graph.predicates_of(&subject, false);

    assert_eq!(graph.store().len(), 0);
    // The failed IRI is still memoised
    assert_eq!(state.borrow().requests.len(), 1);
}

#[test]
fn test_non_http_subjects_are_not_dereferenced() {
    let (fake, state) = FakeDereferencer::new();
    let mut graph = AggregatingGraph::with_dereferencer(Box::new(fake));

    graph.predicates_of(&Term::iri("urn:isbn:0451450523"), false);
    graph.predicates_of(&Term::blank("b0"), false);
    graph.predicates_of(&Term::literal("not a resource"), false);

    assert!(state.borrow().requests.is_empty());
}

#[test]
fn test_fragment_is_stripped_from_fetch_url() {
    let (fake, state) = FakeDereferencer::new();
    let mut graph = AggregatingGraph::with_dereferencer(Box::new(fake));

    graph.predicates_of(&Term::iri("http://example.com/doc#me"), false);

    assert_eq!(state.borrow().requests, vec!["http://example.com/doc".to_string()]);
}

#[test]
fn test_fragment_variants_are_memoised_separately() {
    let (fake, state) = FakeDereferencer::new();
    let mut graph = AggregatingGraph::with_dereferencer(Box::new(fake));

    graph.predicates_of(&Term::iri("http://example.com/doc#me"), false);
    graph.predicates_of(&Term::iri("http://example.com/doc#you"), false);

    // Two memo entries, both fetching the same stripped URL
    assert_eq!(
        state.borrow().requests,
        vec![
            "http://example.com/doc".to_string(),
            "http://example.com/doc".to_string(),
        ]
    );
}

#[test]
fn test_distinct_predicates() {
    let mut graph = AggregatingGraph::offline();
    let subject = Term::iri("http://example.com/s");
    graph.extend(vec![
        Triple::new(subject.clone(), "http://example.com/p", Term::iri("http://example.com/a")),
        Triple::new(subject.clone(), "http://example.com/p", Term::iri("http://example.com/b")),
        Triple::new(subject.clone(), "http://example.com/q", Term::iri("http://example.com/c")),
    ]);

    assert_eq!(graph.predicates_of(&subject, false).len(), 3);
    assert_eq!(graph.predicates_of(&subject, true).len(), 2);
}

#[test]
fn test_qname_resolution_uses_bound_prefixes() {
    let mut graph = AggregatingGraph::offline();
    graph.bind("foaf", "http://xmlns.com/foaf/0.1/");

    assert_eq!(
        graph.qname_to_uri("foaf:knows").as_deref(),
        Some("http://xmlns.com/foaf/0.1/knows")
    );
    assert_eq!(graph.qname_to_uri("unbound:thing"), None);
    // rdf is pre-registered
    assert_eq!(
        graph.qname_to_uri("rdf:type").as_deref(),
        Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#type")
    );
}
