//! `roster-app` library crate.
//!
//! Screen controllers for the personnel/task front end. Each screen owns
//! its own copy of fetched data, reloads it in full whenever it gains
//! focus or after a mutation, and derives what it displays with the pure
//! functions from `roster_core`. The binary entrypoint lives in `main.rs`.

pub mod alert;
pub mod error;
pub mod header;
pub mod list;
pub mod navigation;
pub mod screens;
