//! Propagation signal and the early-return carrier.
//!
//! A failing step does not unwind. It returns an [`Escape`] that every
//! intermediate call re-propagates with `?` until the body of the nearest
//! frame returns it, where the frame intercepts it exactly once.

use core::fmt;
use std::error::Error as StdError;

use crate::error::ForeignFailure;

/// One-shot carrier of an already-built failure outcome.
///
/// Only the step evaluator creates a signal and only the intercepting frame
/// consumes it. User code never sees the carried outcome in between.
pub struct Signal<O> {
    outcome: O,
}

impl<O> Signal<O> {
    pub(crate) const fn new(outcome: O) -> Self {
        Self { outcome }
    }

    pub(crate) fn into_outcome(self) -> O {
        self.outcome
    }
}

impl<O> fmt::Debug for Signal<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("outcome", &core::any::type_name::<O>())
            .finish()
    }
}

/// Why a computation body stopped early.
pub(crate) enum Exit<O> {
    /// A step yielded a failure outcome.
    Propagate(Signal<O>),
    /// The body failed in a way not expressed as an outcome.
    Foreign(ForeignFailure),
}

/// The abort half of every step-consuming call inside a computation.
///
/// Returned from [`Cx::step`](crate::Cx::step) and [`Cx::raise`](crate::Cx::raise),
/// and produced by `?` from any `std::error::Error`. Only the frame that owns
/// the computation body can open it.
pub struct Escape<O> {
    exit: Exit<O>,
}

/// Result of a step-consuming call: continue with `T` or escape to the frame.
pub type Step<T, O> = Result<T, Escape<O>>;

impl<O> Escape<O> {
    pub(crate) const fn propagate(failure: O) -> Self {
        Self {
            exit: Exit::Propagate(Signal::new(failure)),
        }
    }

    pub(crate) const fn foreign(failure: ForeignFailure) -> Self {
        Self {
            exit: Exit::Foreign(failure),
        }
    }

    pub(crate) fn into_exit(self) -> Exit<O> {
        self.exit
    }

    /// Returns true if this escape carries a failure outcome from a step.
    #[must_use]
    pub const fn is_propagation(&self) -> bool {
        matches!(self.exit, Exit::Propagate(_))
    }

    /// Returns the foreign failure, if this escape carries one.
    #[must_use]
    pub const fn foreign_failure(&self) -> Option<&ForeignFailure> {
        match &self.exit {
            Exit::Foreign(failure) => Some(failure),
            Exit::Propagate(_) => None,
        }
    }
}

impl<O, E> From<E> for Escape<O>
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::foreign(ForeignFailure::from_error(error))
    }
}

impl<O> fmt::Debug for Escape<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.exit {
            Exit::Propagate(signal) => f.debug_tuple("Escape::Propagate").field(signal).finish(),
            Exit::Foreign(failure) => f.debug_tuple("Escape::Foreign").field(failure).finish(),
        }
    }
}
