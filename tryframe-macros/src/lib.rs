//! Proc macros for tryframe computations.
//!
//! This crate provides the authoring surface for tryframe: an attribute that
//! turns a function body into a computation frame, and a macro that steps an
//! outcome inside it.
//!
//! # Available Macros
//!
//! - [`computation`] - Mark a function whose body is a computation
//! - [`step!`] - Unwrap a success or short-circuit the computation
//!
//! # Example
//!
//! ```ignore
//! use tryframe::{computation, step, Converter};
//!
//! const TO_STRING: Converter<String> = Converter::new(|f| f.message().to_string());
//!
//! #[computation(converter = TO_STRING)]
//! fn load(path: &str) -> Result<Config, String> {
//!     let text = step!(read(path));
//!     let config = step!(parse(&text));
//!     config
//! }
//! ```

mod computation;
mod step;
mod util;

use proc_macro::TokenStream;

/// Marks a function whose body is a computation.
///
/// The function's declared return type is its outcome type. The body's tail
/// expression becomes the success value; `step!` inside the body unwraps
/// successes and short-circuits on the first failure. Panics and errors
/// propagated with `?` are intercepted and converted into the outcome's
/// failure payload by the converter.
///
/// # Syntax
///
/// ```ignore
/// #[computation]
/// #[computation(converter = EXPR)]
/// #[computation(converter = EXPR, name = "frame_name")]
/// ```
///
/// # Arguments
///
/// - `converter` - Any `FailureConverter` for the outcome's failure type.
///   Defaults to `Discard`, which only covers payload-free outcomes such as
///   `Option<T>`.
/// - `name` - Frame name used in logs and reports. Defaults to the function
///   name.
///
/// # Restrictions
///
/// - The function must declare a return type.
/// - The function must not be `async`.
/// - The body must not use `return`; write the value as the tail expression.
///
/// # Example
///
/// ```ignore
/// #[computation]
/// fn first_even(values: &[u32]) -> Option<u32> {
///     let v = step!(values.iter().copied().find(|v| v % 2 == 0));
///     v
/// }
/// ```
#[proc_macro_attribute]
pub fn computation(args: TokenStream, item: TokenStream) -> TokenStream {
    computation::computation_impl(args, item)
}

/// Steps an outcome inside a computation.
///
/// Evaluates to the success value if the outcome has one. Otherwise the
/// enclosing computation ends immediately with the failure as its result.
///
/// # Syntax
///
/// ```ignore
/// step!(outcome)       // inside a #[computation] body
/// step!(cx, outcome)   // with an explicit `&Cx<O>`
/// ```
///
/// The explicit form works in any function returning `Step<T, O>`, so helpers
/// can take the context as a parameter.
///
/// # Example
///
/// ```ignore
/// fn both(cx: &Cx<Option<u32>>, a: Option<u32>, b: Option<u32>) -> Step<u32, Option<u32>> {
///     Ok(step!(cx, a) + step!(cx, b))
/// }
/// ```
#[proc_macro]
pub fn step(input: TokenStream) -> TokenStream {
    step::step_impl(input)
}
