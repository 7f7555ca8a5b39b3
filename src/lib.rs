//! Tryframe: short-circuiting outcome propagation for synchronous code.
//!
//! # Overview
//!
//! A computation is an ordinary function body whose result is an *outcome*:
//! a value that is either a success or a failure (`Option<T>`,
//! `Result<T, E>`, or any type implementing [`Outcome`]). Each step the body
//! consumes is unwrapped on success; the first failing step ends the whole
//! computation with that failure as its result. Anything else that goes wrong
//! inside the body (a panic, an error propagated with `?`) is converted into
//! the outcome's failure through a [`FailureConverter`] supplied by the
//! caller.
//!
//! ```
//! use tryframe::{computation, step, Converter};
//!
//! const TO_STRING: Converter<String> = Converter::new(|f| f.message().to_string());
//!
//! fn step_a(ok: bool) -> Result<i32, String> {
//!     if ok { Ok(8) } else { Err("ERROR!".to_string()) }
//! }
//!
//! #[computation(converter = TO_STRING)]
//! fn doubled(ok: bool) -> Result<i32, String> {
//!     let v = step!(step_a(ok));
//!     v * 2
//! }
//!
//! assert_eq!(doubled(true), Ok(16));
//! assert_eq!(doubled(false), Err("ERROR!".to_string()));
//! ```
//!
//! # Restrictions
//!
//! A typed failure payload needs a converter; `Discard` only covers
//! payload-free outcomes:
//!
//! ```compile_fail
//! use tryframe::computation;
//!
//! #[computation]
//! fn typed() -> Result<u8, String> {
//!     1
//! }
//! ```
//!
//! The body's tail expression is the success value, so `return` is rejected:
//!
//! ```compile_fail
//! use tryframe::{computation, step};
//!
//! #[computation]
//! fn early(x: Option<u8>) -> Option<u8> {
//!     if x == Some(0) {
//!         return None;
//!     }
//!     step!(x)
//! }
//! ```
//!
//! `step!(expr)` needs the context of an enclosing `#[computation]`; anywhere
//! else, pass one explicitly with `step!(cx, expr)`:
//!
//! ```compile_fail
//! fn outside(x: Option<u8>) -> Option<u8> {
//!     Some(tryframe::step!(x))
//! }
//! ```
//!
//! # Guarantees
//!
//! - **Synchronous**: a computation runs to completion on the caller's thread.
//!   Nothing is scheduled, suspended or shared.
//! - **Ordered**: steps run in program order; no step after a failing one runs.
//! - **Nearest boundary**: a failure stops only the innermost frame that owns
//!   the failing step.
//! - **Single commit**: every frame commits exactly one outcome, which the
//!   caller reads only after it exists.
//! - **Foreign failures never escape**: panics and errors leaving the body are
//!   converted at the frame boundary. Effects performed before a failure are
//!   not rolled back.
//!
//! # Module Structure
//!
//! - [`types`]: the outcome capability contract
//! - [`error`]: foreign-failure tokens
//! - [`convert`]: failure converters
//! - [`signal`]: propagation signal and the early-return carrier
//! - [`cx`]: the step evaluator
//! - [`frame`]: computation frames and their completion adapter
//! - [`config`]: per-frame configuration
//! - [`tracing_compat`]: logging facade

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// Lets `#[computation]` expansions inside this crate name `::tryframe`.
extern crate self as tryframe;

pub mod config;
pub mod convert;
pub mod cx;
pub mod error;
pub mod frame;
pub mod signal;
pub mod tracing_compat;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::FrameConfig;
pub use convert::{Converter, Discard, FailureConverter};
pub use cx::Cx;
pub use error::{BoxError, FailureOrigin, ForeignFailure};
pub use frame::{compute, Completed, Frame, FrameReport, Resolution};
pub use signal::{Escape, Signal, Step};
pub use types::Outcome;

pub use tryframe_macros::{computation, step};
