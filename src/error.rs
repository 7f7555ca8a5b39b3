//! Foreign failures.
//!
//! A foreign failure is any abrupt termination of a computation body that was
//! not already expressed as an outcome:
//!
//! - a panic unwinding out of the body,
//! - a `std::error::Error` propagated with `?`,
//! - an explicit [`Cx::raise`](crate::Cx::raise).
//!
//! The frame packs each of these into a [`ForeignFailure`] token and hands it
//! to the registered [`FailureConverter`](crate::FailureConverter), exactly
//! once, at the computation boundary.

use core::fmt;
use std::any::Any;
use std::error::Error as StdError;

use parking_lot::Mutex;

/// Boxed error stored as the source of a foreign failure.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Where a foreign failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureOrigin {
    /// A panic unwound through the computation body.
    Panic,
    /// An error was propagated out of the body with `?`.
    Error,
    /// The body raised a failure message explicitly.
    Message,
}

impl fmt::Display for FailureOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Panic => "panic",
            Self::Error => "error",
            Self::Message => "raised",
        };
        f.write_str(name)
    }
}

/// Opaque token describing a foreign failure.
///
/// Carries the diagnostic information the host preserved: a message, the
/// cause chain of an error source, and for panics the raw payload.
///
/// The token is `Send + Sync`, so it can itself travel as the source of
/// another error.
#[derive(thiserror::Error)]
#[error("{origin}: {message}")]
pub struct ForeignFailure {
    origin: FailureOrigin,
    message: String,
    causes: Vec<String>,
    #[source]
    source: Option<BoxError>,
    payload: Option<Mutex<PanicPayload>>,
}

type PanicPayload = Box<dyn Any + Send + 'static>;

impl ForeignFailure {
    /// Creates a failure from a plain message.
    #[must_use]
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            origin: FailureOrigin::Message,
            message: message.into(),
            causes: Vec::new(),
            source: None,
            payload: None,
        }
    }

    /// Creates a failure from an error, recording its cause chain.
    ///
    /// An error that already is a `ForeignFailure` is returned as-is.
    #[must_use]
    pub fn from_error<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(error))
    }

    /// Creates a failure from a caught panic payload.
    ///
    /// `&str` and `String` payloads become the message. A boxed error
    /// payload (raised with [`std::panic::panic_any`]) contributes its
    /// message and cause chain.
    #[must_use]
    pub fn from_panic(payload: PanicPayload) -> Self {
        let (message, causes) = if let Some(s) = payload.downcast_ref::<&str>() {
            ((*s).to_string(), Vec::new())
        } else if let Some(s) = payload.downcast_ref::<String>() {
            (s.clone(), Vec::new())
        } else if let Some(error) = payload.downcast_ref::<BoxError>() {
            (error.to_string(), cause_chain(&**error))
        } else if let Some(failure) = payload.downcast_ref::<Self>() {
            (failure.message.clone(), failure.causes.clone())
        } else {
            ("unknown panic".to_string(), Vec::new())
        };

        Self {
            origin: FailureOrigin::Panic,
            message,
            causes,
            source: None,
            payload: Some(Mutex::new(payload)),
        }
    }

    fn from_boxed(error: BoxError) -> Self {
        match error.downcast::<Self>() {
            Ok(failure) => *failure,
            Err(error) => Self {
                origin: FailureOrigin::Error,
                message: error.to_string(),
                causes: cause_chain(&*error),
                source: Some(error),
                payload: None,
            },
        }
    }

    /// Returns where this failure came from.
    #[must_use]
    pub const fn origin(&self) -> FailureOrigin {
        self.origin
    }

    /// Returns the primary failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the messages of the error's causes, outermost first.
    ///
    /// Empty for panics with string payloads and for raised messages.
    #[must_use]
    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// Returns true if this failure was a panic.
    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self.origin, FailureOrigin::Panic)
    }

    /// Returns the error this failure was built from, if any.
    #[must_use]
    pub fn error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Attempts to downcast the originating error to a concrete type.
    #[must_use]
    pub fn downcast_error_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.as_deref().and_then(|e| e.downcast_ref::<E>())
    }

    /// Returns true if a raw panic payload is attached.
    #[must_use]
    pub const fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Attempts to downcast the panic payload to a concrete type.
    pub fn downcast_payload_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.payload.as_mut()?.get_mut().downcast_mut::<T>()
    }

    /// Takes the raw panic payload, if this failure was a panic.
    #[must_use]
    pub fn into_panic_payload(self) -> Option<PanicPayload> {
        self.payload.map(Mutex::into_inner)
    }

    /// Resumes unwinding with this failure.
    ///
    /// Panics are resumed with their original payload. Other failures panic
    /// with the failure itself as payload.
    pub fn resume(mut self) -> ! {
        match self.payload.take() {
            Some(payload) => std::panic::resume_unwind(payload.into_inner()),
            None => std::panic::panic_any(self),
        }
    }
}

impl fmt::Debug for ForeignFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignFailure")
            .field("origin", &self.origin)
            .field("message", &self.message)
            .field("causes", &self.causes)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

fn cause_chain(error: &(dyn StdError + 'static)) -> Vec<String> {
    let mut causes = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    causes
}
