//! `roster-core` -- entities, form validation and the pure list
//! derivations shared by every screen.
//!
//! Nothing in this crate performs I/O; collections are passed in by the
//! caller and results are plain values.

pub mod dashboard;
pub mod error;
pub mod filter;
pub mod models;
pub mod presentation;
pub mod types;
pub mod validation;
