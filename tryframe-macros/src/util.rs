//! Shared helpers for the tryframe macros.

use proc_macro2::Span;
use syn::visit::{self, Visit};
use syn::{Block, ExprAsync, ExprClosure, ExprReturn, Ident, Item};

/// Name of the step context a `#[computation]` expansion brings into scope.
///
/// Both macros emit it with call-site hygiene so that `step!` inside the
/// body resolves to the closure parameter introduced by `#[computation]`.
pub fn ambient_cx() -> Ident {
    Ident::new("__tryframe_cx", Span::call_site())
}

/// Returns the span of the first `return` that would leave the computation
/// body. Returns inside nested closures, async blocks and items (fns, impls,
/// traits) belong to those bodies and are ignored.
pub fn return_span(block: &Block) -> Option<Span> {
    let mut finder = ReturnFinder { found: None };
    finder.visit_block(block);
    finder.found
}

struct ReturnFinder {
    found: Option<Span>,
}

impl<'ast> Visit<'ast> for ReturnFinder {
    fn visit_expr_return(&mut self, node: &'ast ExprReturn) {
        if self.found.is_none() {
            self.found = Some(node.return_token.span);
        }
    }

    fn visit_expr_closure(&mut self, _node: &'ast ExprClosure) {}

    fn visit_expr_async(&mut self, _node: &'ast ExprAsync) {}

    fn visit_item(&mut self, _node: &'ast Item) {}

    fn visit_block(&mut self, node: &'ast Block) {
        if self.found.is_none() {
            visit::visit_block(self, node);
        }
    }
}
