//! Failure converters.
//!
//! A [`FailureConverter<E>`] maps a [`ForeignFailure`] into the failure
//! payload `E` of an outcome. The converter is passed explicitly when a frame
//! is built, so each computation states which mapping it relies on.
//!
//! The usual way to register one mapping per payload type is a module-level
//! constant, populated at compile time and immutable thereafter:
//!
//! ```
//! use tryframe::{compute, Converter};
//!
//! pub const TO_STRING: Converter<String> = Converter::new(|f| f.message().to_string());
//!
//! let out: Result<i32, String> = compute(&TO_STRING, |_cx| panic!("disk on fire"));
//! assert_eq!(out, Err("disk on fire".to_string()));
//! ```
//!
//! A frame whose failure payload has no converter does not compile. `Discard`
//! only covers payload-free outcomes:
//!
//! ```compile_fail
//! use tryframe::{compute, Discard};
//!
//! let out: Result<i32, String> = compute(&Discard, |_cx| Ok(1));
//! ```

use core::fmt;

use crate::error::ForeignFailure;

/// Maps a foreign failure into an outcome's failure payload.
pub trait FailureConverter<E> {
    /// Converts the failure.
    fn convert(&self, failure: ForeignFailure) -> E;
}

impl<E, F> FailureConverter<E> for F
where
    F: Fn(ForeignFailure) -> E,
{
    #[inline]
    fn convert(&self, failure: ForeignFailure) -> E {
        self(failure)
    }
}

/// Converter for outcomes whose failure carries no payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discard;

impl FailureConverter<()> for Discard {
    #[inline]
    fn convert(&self, _failure: ForeignFailure) {}
}

/// A converter backed by a plain function pointer.
///
/// `Converter::new` is `const`, so converters can live in `const` or
/// `static` items.
pub struct Converter<E> {
    convert: fn(ForeignFailure) -> E,
}

impl<E> Converter<E> {
    /// Wraps a conversion function.
    #[must_use]
    pub const fn new(convert: fn(ForeignFailure) -> E) -> Self {
        Self { convert }
    }
}

impl<E> FailureConverter<E> for Converter<E> {
    #[inline]
    fn convert(&self, failure: ForeignFailure) -> E {
        (self.convert)(failure)
    }
}

impl<E> Clone for Converter<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Converter<E> {}

impl<E> fmt::Debug for Converter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("target", &core::any::type_name::<E>())
            .finish()
    }
}
