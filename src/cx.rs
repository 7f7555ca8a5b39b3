//! Step evaluation context.
//!
//! [`Cx`] is the capability a frame hands to its computation body. Every
//! outcome the body consumes goes through [`Cx::step`], which either yields
//! the success value or returns an [`Escape`] that `?` carries back to the
//! frame.
//!
//! ```
//! use tryframe::{compute, Discard};
//!
//! let doubled: Option<i32> = compute(&Discard, |cx| {
//!     let v = cx.step(Some(8))?;
//!     Ok(v * 2)
//! });
//! assert_eq!(doubled, Some(16));
//! ```
//!
//! Helpers that take `&Cx<O>` and return [`Step<T, O>`](crate::Step) act as
//! intermediate frames: they re-propagate with `?` and never intercept.

use core::cell::Cell;
use core::marker::PhantomData;
use std::borrow::Cow;

use crate::error::ForeignFailure;
use crate::signal::{Escape, Step};
use crate::tracing_compat::{debug, trace};
use crate::types::Outcome;

/// Capability context for one computation invocation.
///
/// Tied to its frame's outcome type `O`, so a step can only escape to the
/// frame that owns it.
pub struct Cx<O> {
    name: Option<Cow<'static, str>>,
    steps: Cell<u64>,
    trace_steps: bool,
    _outcome: PhantomData<fn() -> O>,
}

impl<O: Outcome> Cx<O> {
    pub(crate) fn new(name: Option<Cow<'static, str>>, trace_steps: bool) -> Self {
        Self {
            name,
            steps: Cell::new(0),
            trace_steps,
            _outcome: PhantomData,
        }
    }

    /// Evaluates one step.
    ///
    /// Returns the success value of `outcome`, or an escape carrying its
    /// failure untouched. `outcome` may belong to any member of the
    /// computation's outcome family, so `Result<f64, E>` can be stepped in a
    /// computation returning `Result<i32, E>`.
    pub fn step<S>(&self, outcome: S) -> Step<S::Value, O>
    where
        S: Outcome<Rebind<O::Value> = O>,
    {
        let index = self.steps.get() + 1;
        self.steps.set(index);

        if outcome.has_success() {
            if self.trace_steps {
                trace!(frame = self.name(), step = index, "step succeeded");
            }
            Ok(outcome.take_success())
        } else {
            debug!(frame = self.name(), step = index, "step failed, short-circuiting");
            Err(Escape::propagate(outcome.rebind_failure::<O::Value>()))
        }
    }

    /// Raises a foreign failure with the given message.
    ///
    /// The frame converts it like any other foreign failure.
    ///
    /// ```
    /// use tryframe::{compute, Converter};
    ///
    /// const TO_STRING: Converter<String> = Converter::new(|f| f.message().to_string());
    ///
    /// let out: Result<u8, String> = compute(&TO_STRING, |cx| Err(cx.raise("quota exceeded")));
    /// assert_eq!(out, Err("quota exceeded".to_string()));
    /// ```
    #[must_use]
    pub fn raise(&self, message: impl Into<String>) -> Escape<O> {
        Escape::foreign(ForeignFailure::msg(message))
    }

    /// Returns the number of steps evaluated so far.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps.get()
    }

    /// Returns the frame name, or `"anonymous"`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("anonymous")
    }
}

impl<O> core::fmt::Debug for Cx<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cx")
            .field("name", &self.name)
            .field("steps", &self.steps.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Exit;
    use crate::test_utils::init_test_logging;

    fn cx<O: Outcome>() -> Cx<O> {
        init_test_logging();
        Cx::new(Some(Cow::Borrowed("test")), true)
    }

    #[test]
    fn success_returns_value() {
        let cx = cx::<Option<i32>>();
        assert_eq!(cx.step(Some(8)).unwrap(), 8);
        assert_eq!(cx.steps(), 1);
    }

    #[test]
    fn failure_escapes_with_outcome() {
        let cx = cx::<Result<i32, String>>();
        let escape = cx.step(Err::<i32, String>("ERROR!".into())).unwrap_err();
        assert!(escape.is_propagation());
        match escape.into_exit() {
            Exit::Propagate(signal) => {
                assert_eq!(signal.into_outcome(), Err("ERROR!".to_string()));
            }
            Exit::Foreign(_) => unreachable!("expected propagation"),
        }
    }

    #[test]
    fn step_accepts_other_value_types() {
        let cx = cx::<Result<i32, String>>();
        let text = cx.step(Ok::<&str, String>("twelve")).unwrap();
        assert_eq!(text, "twelve");

        let escape = cx.step(Err::<f64, String>("bad".into())).unwrap_err();
        match escape.into_exit() {
            Exit::Propagate(signal) => assert_eq!(signal.into_outcome(), Err("bad".to_string())),
            Exit::Foreign(_) => unreachable!("expected propagation"),
        }
        assert_eq!(cx.steps(), 2);
    }

    #[test]
    fn raise_builds_foreign_escape() {
        let cx = cx::<Option<u8>>();
        let escape = cx.raise("stop");
        let failure = escape.foreign_failure().expect("foreign");
        assert_eq!(failure.message(), "stop");
        assert_eq!(cx.steps(), 0);
    }

    #[test]
    fn name_defaults_to_anonymous() {
        let cx: Cx<Option<()>> = Cx::new(None, false);
        assert_eq!(cx.name(), "anonymous");
    }
}
