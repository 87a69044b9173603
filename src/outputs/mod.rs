//! Snapshot output.
//!
//! The sole interface to the presentation layer is one JSON file holding
//! the sorted record sequence; [`json`] owns sorting, serialization, and
//! the atomic replace of the previous snapshot.

pub mod json;
