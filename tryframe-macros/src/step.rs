//! Implementation of the `step!` macro.
//!
//! # Syntax
//!
//! ```ignore
//! // Inside a #[computation] body
//! let v = step!(read(path));
//!
//! // With an explicit context, e.g. in a helper returning `Step<T, O>`
//! let v = step!(cx, read(path));
//! ```
//!
//! Both forms evaluate to the unwrapped success value or leave the enclosing
//! body through `?`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Expr, Token,
};

use crate::util::ambient_cx;

/// Parsed `step!` input.
struct StepInput {
    cx: Option<Expr>,
    outcome: Expr,
}

impl Parse for StepInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let span = input.span();
        let args: Punctuated<Expr, Token![,]> = Punctuated::parse_terminated(input)?;
        let mut args = args.into_iter();

        match (args.next(), args.next(), args.next()) {
            (Some(outcome), None, None) => Ok(Self { cx: None, outcome }),
            (Some(cx), Some(outcome), None) => Ok(Self {
                cx: Some(cx),
                outcome,
            }),
            (None, _, _) => Err(syn::Error::new(
                span,
                "step! requires an outcome expression: `step!(expr)` or `step!(cx, expr)`",
            )),
            (Some(_), _, Some(extra)) => Err(syn::Error::new_spanned(
                extra,
                "step! takes at most two arguments: `step!(cx, expr)`",
            )),
        }
    }
}

/// Entry point for the macro.
pub fn step_impl(input: TokenStream) -> TokenStream {
    match syn::parse::<StepInput>(input) {
        Ok(input) => TokenStream::from(generate_step(input)),
        Err(error) => TokenStream::from(error.to_compile_error()),
    }
}

fn generate_step(input: StepInput) -> TokenStream2 {
    let StepInput { cx, outcome } = input;
    match cx {
        Some(cx) => quote! { (#cx).step(#outcome)? },
        None => {
            let cx = ambient_cx();
            quote! { #cx.step(#outcome)? }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: TokenStream2) -> syn::Result<StepInput> {
        syn::parse2(tokens)
    }

    #[test]
    fn test_parse_single_argument() {
        let input = parse(quote! { read(path) }).unwrap();
        assert!(input.cx.is_none());
        assert!(matches!(input.outcome, Expr::Call(_)));
    }

    #[test]
    fn test_parse_explicit_context() {
        let input = parse(quote! { cx, read(path) }).unwrap();
        assert!(matches!(input.cx, Some(Expr::Path(_))));
        assert!(matches!(input.outcome, Expr::Call(_)));
    }

    #[test]
    fn test_parse_trailing_comma() {
        let input = parse(quote! { read(path), }).unwrap();
        assert!(input.cx.is_none());
    }

    #[test]
    fn test_error_empty() {
        assert!(parse(quote! {}).is_err());
    }

    #[test]
    fn test_error_three_arguments() {
        assert!(parse(quote! { cx, a, b }).is_err());
    }

    #[test]
    fn test_generate_uses_ambient_context() {
        let generated = generate_step(parse(quote! { read(path) }).unwrap()).to_string();
        assert_eq!(generated, "__tryframe_cx . step (read (path)) ?");
    }

    #[test]
    fn test_generate_uses_explicit_context() {
        let generated = generate_step(parse(quote! { outer, lookup() }).unwrap()).to_string();
        assert_eq!(generated, "(outer) . step (lookup ()) ?");
    }
}
