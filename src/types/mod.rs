//! Core types.
//!
//! - [`outcome`]: the outcome capability contract and its bindings for
//!   `Option<T>` and `Result<T, E>`

pub mod outcome;

pub use outcome::Outcome;
