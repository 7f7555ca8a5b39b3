//! Test utilities.
//!
//! - tracing-based logging initialization
//! - phase/completion macros for readable test output
//! - outcome assertion macros

use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;

static INIT_LOGGING: Once = Once::new();

/// Initialize test logging with trace-level output.
///
/// Safe to call multiple times; only initializes once.
pub fn init_test_logging() {
    init_test_logging_with_level(tracing::Level::TRACE);
}

/// Initialize test logging with a custom level.
///
/// The first call wins; later calls are no-ops.
pub fn init_test_logging_with_level(level: tracing::Level) {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .try_init();
    });
}

/// Log a test phase transition.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(phase = %$name, "========================================");
        tracing::info!(phase = %$name, "TEST PHASE: {}", $name);
        tracing::info!(phase = %$name, "========================================");
    };
}

/// Log test completion.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(test = %$name, "test completed successfully: {}", $name);
    };
}

/// Log before asserting for context.
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {
        tracing::debug!(
            expected = ?$expected,
            actual = ?$actual,
            "Asserting: {}",
            $msg
        );
        assert!($cond, "{}: expected {:?}, got {:?}", $msg, $expected, $actual);
    };
}

/// Assert that a completed frame resolved through a propagated step failure.
#[macro_export]
macro_rules! assert_propagated {
    ($completed:expr) => {
        match $completed.resolution() {
            $crate::Resolution::Propagated => {}
            other => unreachable!("expected Resolution::Propagated, got {:?}", other),
        }
    };
}

/// Assert that a completed frame converted a foreign failure of the given origin.
#[macro_export]
macro_rules! assert_foreign {
    ($completed:expr, $origin:expr) => {
        match $completed.resolution() {
            $crate::Resolution::Foreign { origin } => assert_eq!(origin, $origin),
            other => unreachable!("expected Resolution::Foreign, got {:?}", other),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error::FailureOrigin;
    use crate::{compute, Completed, Converter, Discard, Frame};

    const TO_STRING: Converter<String> = Converter::new(|f| f.message().to_string());

    #[test]
    fn assertion_macros() {
        super::init_test_logging();
        crate::test_phase!("assertion_macros");

        let propagated: Completed<Option<u8>> = Frame::new(&Discard).run(|cx| cx.step(None::<u8>));
        crate::assert_propagated!(propagated);

        let foreign: Completed<Result<u8, String>> =
            Frame::new(&TO_STRING).run(|_cx| panic!("boom"));
        crate::assert_foreign!(foreign, FailureOrigin::Panic);

        let out: Option<u8> = compute(&Discard, |cx| cx.step(Some(1_u8)));
        crate::assert_with_log!(out == Some(1), "stepped value", Some(1_u8), out);
        crate::test_complete!("assertion_macros");
    }
}
