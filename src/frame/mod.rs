//! Computation frames.
//!
//! A [`Frame`] owns the control-flow boundary of one computation invocation.
//! It runs the body synchronously on the caller's thread and commits exactly
//! one outcome to its result slot:
//!
//! - the body returned `Ok(value)`: `make_success(value)`,
//! - a step short-circuited: the carried failure outcome, unchanged,
//! - the body failed any other way (a panic, an error propagated with `?`, a
//!   [`Cx::raise`]): `make_failure_from_foreign` through the converter.
//!
//! The caller gets the outcome back through [`Completed`], which only exists
//! once the slot is committed.
//!
//! # Example
//!
//! ```
//! use tryframe::{compute, Converter};
//!
//! const TO_STRING: Converter<String> = Converter::new(|f| f.message().to_string());
//!
//! fn read(ok: bool) -> Result<i32, String> {
//!     if ok { Ok(8) } else { Err("ERROR!".to_string()) }
//! }
//!
//! fn doubled(ok: bool) -> Result<i32, String> {
//!     compute(&TO_STRING, |cx| {
//!         let v = cx.step(read(ok))?;
//!         Ok(v * 2)
//!     })
//! }
//!
//! assert_eq!(doubled(true), Ok(16));
//! assert_eq!(doubled(false), Err("ERROR!".to_string()));
//! ```
//!
//! Frames nest. A failure only stops the nearest frame; the caller decides
//! whether to step the returned outcome into its own frame.

mod slot;

use core::fmt;
use core::marker::PhantomData;
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use crate::config::FrameConfig;
use crate::convert::FailureConverter;
use crate::cx::Cx;
use crate::error::{FailureOrigin, ForeignFailure};
use crate::signal::{Exit, Step};
use crate::tracing_compat::{debug, debug_span, warn};
use crate::types::Outcome;

use self::slot::ResultSlot;

/// How a frame reached its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// The body completed normally.
    Success,
    /// A step short-circuited with a failure outcome.
    Propagated,
    /// A foreign failure was converted.
    Foreign {
        /// Where the failure came from.
        origin: FailureOrigin,
    },
}

impl Resolution {
    /// Returns true if the body completed normally.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Summary of one frame invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// Frame name, if configured.
    pub name: Option<Cow<'static, str>>,
    /// Number of steps evaluated, including the failing one.
    pub steps: u64,
    /// How the frame completed.
    pub resolution: Resolution,
}

/// The per-invocation boundary of a computation.
///
/// `C` supplies the conversion from foreign failures into `O`'s failure
/// payload. A frame cannot be built for an outcome type whose payload the
/// converter does not cover.
pub struct Frame<'c, O, C: ?Sized> {
    converter: &'c C,
    config: FrameConfig,
    _outcome: PhantomData<fn() -> O>,
}

impl<'c, O, C> Frame<'c, O, C>
where
    O: Outcome,
    C: FailureConverter<O::Failure> + ?Sized,
{
    /// Creates a frame with the default configuration.
    #[must_use]
    pub fn new(converter: &'c C) -> Self {
        Self::with_config(converter, FrameConfig::new())
    }

    /// Creates a frame with an explicit configuration.
    #[must_use]
    pub fn with_config(converter: &'c C, config: FrameConfig) -> Self {
        Self {
            converter,
            config,
            _outcome: PhantomData,
        }
    }

    /// Sets the frame name.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.config = self.config.name(name);
        self
    }

    /// Runs the body to completion and commits its outcome.
    ///
    /// Panics raised by the body are intercepted and converted. A panic
    /// raised by the converter itself is not.
    pub fn run<F>(self, body: F) -> Completed<O>
    where
        F: FnOnce(&Cx<O>) -> Step<O::Value, O>,
    {
        let Self {
            converter, config, ..
        } = self;
        let cx = Cx::new(config.name.clone(), config.trace_steps);
        let span = debug_span!("computation", frame = cx.name());
        let _guard = span.enter();

        let mut slot = ResultSlot::empty();
        let resolution = match panic::catch_unwind(AssertUnwindSafe(|| body(&cx))) {
            Ok(Ok(value)) => {
                slot.commit(O::make_success(value));
                Resolution::Success
            }
            Ok(Err(escape)) => match escape.into_exit() {
                Exit::Propagate(signal) => {
                    slot.commit(signal.into_outcome());
                    Resolution::Propagated
                }
                Exit::Foreign(failure) => {
                    intercept_foreign(&mut slot, failure, converter, &config)
                }
            },
            Err(payload) => intercept_foreign(
                &mut slot,
                ForeignFailure::from_panic(payload),
                converter,
                &config,
            ),
        };

        debug!(
            frame = cx.name(),
            steps = cx.steps(),
            resolution = ?resolution,
            "computation completed"
        );

        Completed {
            outcome: slot.seal(),
            report: FrameReport {
                name: config.name,
                steps: cx.steps(),
                resolution,
            },
        }
    }
}

// Called inside the frame's `computation` span, which carries the frame name.
fn intercept_foreign<O, C>(
    slot: &mut ResultSlot<O>,
    failure: ForeignFailure,
    converter: &C,
    config: &FrameConfig,
) -> Resolution
where
    O: Outcome,
    C: FailureConverter<O::Failure> + ?Sized,
{
    let origin = failure.origin();
    if config.log_foreign {
        warn!(
            origin = %origin,
            detail = failure.message(),
            "converting foreign failure"
        );
    }
    slot.commit(O::make_failure_from_foreign(failure, converter));
    Resolution::Foreign { origin }
}

impl<O, C: ?Sized> fmt::Debug for Frame<'_, O, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A frame that has committed its outcome.
///
/// This is the only way a caller observes a frame's result, so the outcome
/// can never be read before it exists.
#[derive(Debug, Clone)]
pub struct Completed<O> {
    outcome: O,
    report: FrameReport,
}

impl<O: Outcome> Completed<O> {
    /// Returns the committed outcome. Repeatable.
    #[must_use]
    pub const fn outcome(&self) -> &O {
        &self.outcome
    }

    /// Returns true if the committed outcome is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.has_success()
    }

    /// Returns how the frame completed.
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        self.report.resolution
    }

    /// Returns the invocation summary.
    #[must_use]
    pub const fn report(&self) -> &FrameReport {
        &self.report
    }

    /// Hands the outcome to the caller.
    #[must_use]
    pub fn finish(self) -> O {
        self.outcome
    }

    /// Returns the outcome together with the invocation summary.
    #[must_use]
    pub fn into_parts(self) -> (O, FrameReport) {
        (self.outcome, self.report)
    }
}

/// Runs `body` in a fresh frame and returns its outcome.
pub fn compute<O, C, F>(converter: &C, body: F) -> O
where
    O: Outcome,
    C: FailureConverter<O::Failure> + ?Sized,
    F: FnOnce(&Cx<O>) -> Step<O::Value, O>,
{
    Frame::new(converter).run(body).finish()
}
