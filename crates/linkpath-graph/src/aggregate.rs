//! The aggregating graph: a triple store that can grow by dereferencing the
//! IRIs it is asked about.

use crate::fetch::{Dereferencer, HttpDereferencer, NullDereferencer};
use crate::ntriples::NTriplesDecoder;
use crate::prefixes::PrefixMap;
use linkpath_core::model::{Term, Triple};
use linkpath_core::store::GraphStore;
use std::collections::HashSet;
use tracing::debug;

/// A graph store combined with a prefix map, a lookup memo and a
/// dereferencer. Queries about a subject first give the dereferencer one
/// chance to supply that subject's document; each IRI is submitted at most
/// once per graph lifetime, whether or not the fetch succeeds.
pub struct AggregatingGraph {
    store: GraphStore,
    prefixes: PrefixMap,
    lookups: HashSet<String>,
    dereferencer: Box<dyn Dereferencer>,
}

impl AggregatingGraph {
    /// An aggregating graph backed by an HTTP dereferencer with the
    /// N-Triples decoder registered.
    pub fn new() -> Self {
        let mut dereferencer = HttpDereferencer::new();
        dereferencer.register_decoder("application/n-triples", Box::new(NTriplesDecoder));
        Self::with_dereferencer(Box::new(dereferencer))
    }

    /// An aggregating graph that never fetches; useful for fully seeded data.
    pub fn offline() -> Self {
        Self::with_dereferencer(Box::new(NullDereferencer))
    }

    pub fn with_dereferencer(dereferencer: Box<dyn Dereferencer>) -> Self {
        AggregatingGraph {
            store: GraphStore::new(),
            prefixes: PrefixMap::new(),
            lookups: HashSet::new(),
            dereferencer,
        }
    }

    /// Install or overwrite a prefix binding.
    pub fn bind<P: Into<String>, N: Into<String>>(&mut self, prefix: P, namespace: N) {
        self.prefixes.bind(prefix, namespace);
    }

    /// Expand a `prefix:local` qualified name against the prefix map.
    pub fn qname_to_uri(&self, qname: &str) -> Option<String> {
        self.prefixes.expand(qname)
    }

    /// Submit an IRI for dereferencing. Only `http:` and `https:` IRIs are
    /// eligible; the fragment is stripped from the fetched URL but the memo
    /// records the IRI as given. At most one submission happens per IRI.
    pub fn lookup(&mut self, term: &Term) {
        let iri = match term {
            Term::Iri(iri) => iri.as_str(),
            _ => return,
        };
        if !iri.starts_with("http://") && !iri.starts_with("https://") {
            return;
        }
        if !self.lookups.insert(iri.to_string()) {
            return;
        }

        let fetch_url = match iri.find('#') {
            Some(i) => &iri[..i],
            None => iri,
        };
        debug!(iri, fetch_url, "dereferencing");
        let triples = self.dereferencer.dereference(fetch_url);
        debug!(iri, count = triples.len(), "merged dereferenced triples");
        self.store.extend(triples);
    }

    /// The predicates of the subject's outgoing triples, dereferencing the
    /// subject first. Duplicates are preserved unless `distinct` is set.
    pub fn predicates_of(&mut self, subject: &Term, distinct: bool) -> Vec<String> {
        self.lookup(subject);
        let predicates = self.store.predicates_of(subject);
        if !distinct {
            return predicates;
        }

        let mut seen = HashSet::new();
        predicates
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect()
    }

    /// The objects of (subject, predicate), dereferencing the subject first.
    pub fn objects_of(&mut self, subject: &Term, predicate: &str) -> Vec<Term> {
        self.lookup(subject);
        self.store.objects_of(subject, predicate)
    }

    /// Whether the graph holds the triple, dereferencing the subject first.
    pub fn has_triple(&mut self, subject: &Term, predicate: &str, object: &Term) -> bool {
        self.lookup(subject);
        self.store.contains(subject, predicate, object)
    }

    /// Seed the graph directly, bypassing dereferencing.
    pub fn extend<I: IntoIterator<Item = Triple>>(&mut self, triples: I) {
        self.store.extend(triples);
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }
}

impl Default for AggregatingGraph {
    fn default() -> Self {
        Self::new()
    }
}
