//! # linkpath CLI library
//!
//! Seeds an aggregating graph from N-Triples files, binds prefixes and
//! evaluates one path expression from a starting resource.

pub mod commands;

pub use commands::*;
