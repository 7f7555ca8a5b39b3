//! Outcome capability contract.
//!
//! An outcome is a tagged union that either holds a success value or a
//! failure. Any type implementing [`Outcome`] can serve as the result type of
//! a computation and as the type of each step consumed inside it.
//!
//! Two shapes are bound out of the box:
//!
//! - `Option<T>`: value-or-absent. The failure carries no payload.
//! - `Result<T, E>`: value-or-typed-error. The failure carries an `E`.
//!
//! Eligibility is checked statically. A type without an [`Outcome`] impl
//! cannot be stepped or returned from a frame:
//!
//! ```compile_fail
//! use tryframe::{compute, Discard};
//!
//! struct Flag(bool);
//!
//! let _ = compute(&Discard, |cx| Ok(cx.step(Flag(true))?));
//! ```

use crate::convert::FailureConverter;
use crate::error::ForeignFailure;

/// The capability contract a container type implements to take part in
/// short-circuiting propagation.
///
/// Implementations must uphold two laws:
///
/// - `Self::make_success(v).has_success()` is always `true`.
/// - `Self::make_failure_from_foreign(f, c).has_success()` is always `false`.
pub trait Outcome: Sized {
    /// The success value.
    type Value;

    /// The failure payload. `()` for value-or-absent outcomes.
    type Failure;

    /// The same outcome family carrying a value of type `U`.
    ///
    /// Failures move between members of a family without touching the
    /// payload, which lets a step of `Option<String>` short-circuit a
    /// computation returning `Option<usize>`.
    type Rebind<U>: Outcome<Value = U, Failure = Self::Failure>;

    /// Returns true if this outcome holds a success value.
    fn has_success(&self) -> bool;

    /// Consumes the outcome and returns its success value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a failure. Callers check
    /// [`has_success`](Self::has_success) first.
    fn take_success(self) -> Self::Value;

    /// Wraps a success value.
    fn make_success(value: Self::Value) -> Self;

    /// Builds a failure from a foreign failure, converting it into the
    /// failure payload through `converter`.
    fn make_failure_from_foreign<C>(failure: ForeignFailure, converter: &C) -> Self
    where
        C: FailureConverter<Self::Failure> + ?Sized;

    /// Moves a failure into the same family with value type `U`.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a success.
    fn rebind_failure<U>(self) -> Self::Rebind<U>;

    /// Splits the outcome into its success value or a rebound failure.
    fn into_step<U>(self) -> Result<Self::Value, Self::Rebind<U>> {
        if self.has_success() {
            Ok(self.take_success())
        } else {
            Err(self.rebind_failure())
        }
    }
}

impl<T> Outcome for Option<T> {
    type Value = T;
    type Failure = ();
    type Rebind<U> = Option<U>;

    #[inline]
    fn has_success(&self) -> bool {
        self.is_some()
    }

    #[track_caller]
    fn take_success(self) -> T {
        match self {
            Some(value) => value,
            None => panic!("called `Outcome::take_success()` on an absent outcome"),
        }
    }

    #[inline]
    fn make_success(value: T) -> Self {
        Some(value)
    }

    // Absent outcomes have nothing to synthesize, so the converter is never
    // consulted.
    fn make_failure_from_foreign<C>(_failure: ForeignFailure, _converter: &C) -> Self
    where
        C: FailureConverter<()> + ?Sized,
    {
        None
    }

    #[track_caller]
    fn rebind_failure<U>(self) -> Option<U> {
        match self {
            Some(_) => panic!("called `Outcome::rebind_failure()` on a present outcome"),
            None => None,
        }
    }
}

impl<T, E> Outcome for Result<T, E> {
    type Value = T;
    type Failure = E;
    type Rebind<U> = Result<U, E>;

    #[inline]
    fn has_success(&self) -> bool {
        self.is_ok()
    }

    #[track_caller]
    fn take_success(self) -> T {
        match self {
            Ok(value) => value,
            Err(_) => panic!("called `Outcome::take_success()` on an `Err` outcome"),
        }
    }

    #[inline]
    fn make_success(value: T) -> Self {
        Ok(value)
    }

    fn make_failure_from_foreign<C>(failure: ForeignFailure, converter: &C) -> Self
    where
        C: FailureConverter<E> + ?Sized,
    {
        Err(converter.convert(failure))
    }

    #[track_caller]
    fn rebind_failure<U>(self) -> Result<U, E> {
        match self {
            Ok(_) => panic!("called `Outcome::rebind_failure()` on an `Ok` outcome"),
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Discard;
    use std::cell::Cell;

    fn foreign(message: &str) -> ForeignFailure {
        ForeignFailure::msg(message.to_string())
    }

    // =========================================================================
    // Capability Laws
    // =========================================================================

    #[test]
    fn make_success_has_success() {
        assert!(Option::<i32>::make_success(3).has_success());
        assert!(Result::<i32, String>::make_success(3).has_success());
    }

    #[test]
    fn foreign_failure_never_has_success() {
        let absent = Option::<i32>::make_failure_from_foreign(foreign("boom"), &Discard);
        assert!(!absent.has_success());

        let to_string = |failure: ForeignFailure| failure.message().to_string();
        let err = Result::<i32, String>::make_failure_from_foreign(foreign("boom"), &to_string);
        assert!(!err.has_success());
    }

    #[test]
    fn take_success_returns_value() {
        assert_eq!(Some(8).take_success(), 8);
        assert_eq!(Ok::<_, String>("eight").take_success(), "eight");
    }

    #[test]
    #[should_panic(expected = "absent outcome")]
    fn take_success_on_absent_panics() {
        let _ = None::<i32>.take_success();
    }

    #[test]
    #[should_panic(expected = "`Err` outcome")]
    fn take_success_on_err_panics() {
        let _ = Err::<i32, &str>("nope").take_success();
    }

    // =========================================================================
    // Foreign Conversion
    // =========================================================================

    #[test]
    fn absent_binding_skips_converter() {
        let calls = Cell::new(0);
        let counting = |_failure: ForeignFailure| calls.set(calls.get() + 1);
        let absent = Option::<u8>::make_failure_from_foreign(foreign("ignored"), &counting);
        assert_eq!(absent, None);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn result_binding_uses_converter() {
        let to_len = |failure: ForeignFailure| failure.message().len();
        let err = Result::<(), usize>::make_failure_from_foreign(foreign("four"), &to_len);
        assert_eq!(err, Err(4));
    }

    // =========================================================================
    // Rebinding
    // =========================================================================

    #[test]
    fn rebind_keeps_error_payload() {
        let err: Result<f64, String> = Err("ERROR!".to_string());
        let rebound: Result<i32, String> = err.rebind_failure();
        assert_eq!(rebound, Err("ERROR!".to_string()));
    }

    #[test]
    fn rebind_absent() {
        let rebound: Option<String> = None::<u8>.rebind_failure();
        assert!(rebound.is_none());
    }

    #[test]
    #[should_panic(expected = "`Ok` outcome")]
    fn rebind_success_panics() {
        let _: Result<u8, ()> = Ok::<i32, ()>(1).rebind_failure();
    }

    #[test]
    fn into_step_splits() {
        assert_eq!(Some(5).into_step::<()>(), Ok(5));
        assert_eq!(None::<i32>.into_step::<()>(), Err(None));
        assert_eq!(Err::<i32, &str>("e").into_step::<u8>(), Err(Err("e")));
    }
}
