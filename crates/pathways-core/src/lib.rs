//! pathways-core
//!
//! Pure domain types shared by the recommendation engine and its HTTP host.
//! No I/O — this is the vocabulary the front end and the engine agree on.

pub mod error;
pub mod models;
