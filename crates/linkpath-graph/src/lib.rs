//! # linkpath-graph
//!
//! The aggregating graph consumed by the linkpath query processor: an
//! indexed triple store wrapped with a prefix map, a lookup memo and a
//! pluggable dereferencer for lazily fetching remote documents.

pub mod aggregate;
pub mod fetch;
pub mod ntriples;
pub mod prefixes;

pub use aggregate::AggregatingGraph;
pub use fetch::{Dereferencer, HttpDereferencer, NullDereferencer, RdfDecoder};
pub use ntriples::{parse_ntriples, NTriplesDecoder};
pub use prefixes::PrefixMap;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("fetch error: {0}")]
    Fetch(String),
}
