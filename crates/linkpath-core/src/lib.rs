//! # linkpath-core
//!
//! Core RDF data model for the linkpath query processor: terms, triples and
//! an indexed in-memory graph store.

pub mod model;
pub mod store;

pub use model::*;
pub use store::*;
