//! In-memory graph store with indexing for fast pattern queries

use crate::model::{Term, Triple};
use smallvec::SmallVec;
use std::collections::HashMap;

/// An in-memory set of triples with subject, predicate and object indexes.
///
/// Inserting a triple that is already present is a no-op, so the store has
/// set semantics per (subject, predicate, object).
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// All triples, in insertion order
    triples: Vec<Triple>,
    /// Subject -> list of triple indices
    subject_index: HashMap<Term, SmallVec<[usize; 8]>>,
    /// Predicate -> list of triple indices
    predicate_index: HashMap<String, SmallVec<[usize; 8]>>,
    /// Object -> list of triple indices
    object_index: HashMap<Term, SmallVec<[usize; 8]>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct triples in the store.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Insert a triple, returning false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.contains(&triple.subject, &triple.predicate, &triple.object) {
            return false;
        }

        let index = self.triples.len();
        self.subject_index
            .entry(triple.subject.clone())
            .or_default()
            .push(index);
        self.predicate_index
            .entry(triple.predicate.clone())
            .or_default()
            .push(index);
        self.object_index
            .entry(triple.object.clone())
            .or_default()
            .push(index);
        self.triples.push(triple);
        true
    }

    /// Insert every triple from an iterator.
    pub fn extend<I: IntoIterator<Item = Triple>>(&mut self, triples: I) {
        for triple in triples {
            self.insert(triple);
        }
    }

    /// Whether the store holds the exact triple.
    pub fn contains(&self, subject: &Term, predicate: &str, object: &Term) -> bool {
        !self
            .find(Some(subject), Some(predicate), Some(object))
            .is_empty()
    }

    /// The predicates of all triples with the given subject, in insertion
    /// order and including duplicates.
    pub fn predicates_of(&self, subject: &Term) -> Vec<String> {
        match self.subject_index.get(subject) {
            Some(indices) => indices
                .iter()
                .map(|&i| self.triples[i].predicate.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// The objects of all triples with the given subject and predicate.
    pub fn objects_of(&self, subject: &Term, predicate: &str) -> Vec<Term> {
        self.find(Some(subject), Some(predicate), None)
            .into_iter()
            .map(|t| t.object.clone())
            .collect()
    }

    /// Find triples matching a pattern, using the most selective index to
    /// minimise the search space.
    pub fn find(
        &self,
        subject: Option<&Term>,
        predicate: Option<&str>,
        object: Option<&Term>,
    ) -> Vec<&Triple> {
        let candidate_indices: SmallVec<[usize; 8]> = match (subject, predicate, object) {
            (Some(s), Some(p), Some(o)) => self.intersect_indices(
                &self.intersect_indices(
                    self.subject_slice(s),
                    self.predicate_index.get(p).map(|v| v.as_slice()).unwrap_or(&[]),
                ),
                self.object_index.get(o).map(|v| v.as_slice()).unwrap_or(&[]),
            ),
            (Some(s), None, None) => self.subject_index.get(s).cloned().unwrap_or_default(),
            (None, Some(p), None) => self.predicate_index.get(p).cloned().unwrap_or_default(),
            (None, None, Some(o)) => self.object_index.get(o).cloned().unwrap_or_default(),
            (Some(s), Some(p), None) => self.intersect_indices(
                self.subject_slice(s),
                self.predicate_index.get(p).map(|v| v.as_slice()).unwrap_or(&[]),
            ),
            (Some(s), None, Some(o)) => self.intersect_indices(
                self.subject_slice(s),
                self.object_index.get(o).map(|v| v.as_slice()).unwrap_or(&[]),
            ),
            (None, Some(p), Some(o)) => self.intersect_indices(
                self.predicate_index.get(p).map(|v| v.as_slice()).unwrap_or(&[]),
                self.object_index.get(o).map(|v| v.as_slice()).unwrap_or(&[]),
            ),
            (None, None, None) => (0..self.triples.len()).collect(),
        };

        candidate_indices
            .iter()
            .filter_map(|&i| self.triples.get(i))
            .collect()
    }

    /// Iterate over every triple in insertion order.
    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Remove every triple and index entry.
    pub fn clear(&mut self) {
        self.triples.clear();
        self.subject_index.clear();
        self.predicate_index.clear();
        self.object_index.clear();
    }

    fn subject_slice(&self, subject: &Term) -> &[usize] {
        self.subject_index
            .get(subject)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Intersect two sorted index vectors.
    fn intersect_indices(&self, a: &[usize], b: &[usize]) -> SmallVec<[usize; 8]> {
        let mut result = SmallVec::new();
        let mut i = 0;
        let mut j = 0;

        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    result.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }

        result
    }
}
