//! Implementation of the `#[computation]` attribute.
//!
//! # Syntax
//!
//! ```ignore
//! // Payload-free outcomes (uses `Discard`)
//! #[computation]
//! fn lookup(id: u32) -> Option<String> { ... }
//!
//! // Typed failures need a converter
//! #[computation(converter = TO_STRING)]
//! fn load(path: &str) -> Result<Config, String> { ... }
//!
//! // Explicit frame name for logs and reports
//! #[computation(converter = TO_STRING, name = "load_config")]
//! fn load(path: &str) -> Result<Config, String> { ... }
//! ```
//!
//! The body's tail expression is the success value. The expansion wraps the
//! body in a frame and exposes the step context to `step!`.
//!
//! Closure converters need an annotated parameter:
//! `converter = |f: ForeignFailure| f.message().len()`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    spanned::Spanned,
    Expr, ExprLit, ItemFn, Lit, LitStr, MetaNameValue, ReturnType, Token,
};

use crate::util::{ambient_cx, return_span};

/// Arguments to `#[computation(...)]`.
#[derive(Default)]
struct ComputationArgs {
    /// Converter expression; borrowed by the frame.
    converter: Option<Expr>,
    /// Frame name override.
    name: Option<LitStr>,
}

impl Parse for ComputationArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();
        let pairs: Punctuated<MetaNameValue, Token![,]> = Punctuated::parse_terminated(input)?;

        for pair in pairs {
            let key = pair.path.get_ident().map(ToString::to_string);
            match key.as_deref() {
                Some("converter") => {
                    if args.converter.is_some() {
                        return Err(syn::Error::new(pair.path.span(), "duplicate `converter`"));
                    }
                    args.converter = Some(pair.value);
                }
                Some("name") => {
                    if args.name.is_some() {
                        return Err(syn::Error::new(pair.path.span(), "duplicate `name`"));
                    }
                    match pair.value {
                        Expr::Lit(ExprLit {
                            lit: Lit::Str(lit), ..
                        }) => args.name = Some(lit),
                        other => {
                            return Err(syn::Error::new(
                                other.span(),
                                "`name` must be a string literal",
                            ))
                        }
                    }
                }
                _ => {
                    return Err(syn::Error::new(
                        pair.path.span(),
                        format!(
                            "unknown computation argument `{}`; expected `converter` or `name`",
                            pair.path.to_token_stream()
                        ),
                    ))
                }
            }
        }

        Ok(args)
    }
}

/// Entry point for the attribute.
pub fn computation_impl(args: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as ComputationArgs);
    let func = parse_macro_input!(item as ItemFn);

    match generate_computation(args, func) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(error) => TokenStream::from(error.to_compile_error()),
    }
}

fn generate_computation(args: ComputationArgs, func: ItemFn) -> syn::Result<TokenStream2> {
    if let Some(asyncness) = &func.sig.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "#[computation] functions run synchronously; remove `async`",
        ));
    }

    let outcome = match &func.sig.output {
        ReturnType::Type(_, ty) => ty.clone(),
        ReturnType::Default => {
            return Err(syn::Error::new(
                func.sig.ident.span(),
                "#[computation] requires a declared outcome return type, e.g. `-> Option<T>`",
            ))
        }
    };

    if let Some(span) = return_span(&func.block) {
        return Err(syn::Error::new(
            span,
            "#[computation] body must not use `return`; \
             the tail expression is the success value and `step!` short-circuits",
        ));
    }

    let converter = args
        .converter
        .map_or_else(|| quote! { ::tryframe::Discard }, |c| quote! { #c });
    let name = args
        .name
        .unwrap_or_else(|| LitStr::new(&func.sig.ident.to_string(), func.sig.ident.span()));
    let cx = ambient_cx();

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = func;

    Ok(quote! {
        #(#attrs)*
        #vis #sig {
            ::tryframe::Frame::<#outcome, _>::with_config(
                &(#converter),
                ::tryframe::FrameConfig::new().name(#name),
            )
            .run(move |#cx| ::core::result::Result::Ok(#block))
            .finish()
        }
    })
}
