//! Expansion of `curry!`.
//!
//! Two input forms are accepted:
//!
//! 1. A closure: `curry!(|a, b| body)`, arity taken from its parameters
//! 2. A function path and an arity: `curry!(function_name, 3)`
//!
//! Both expand to a chain of single-argument closures. Every closure but the
//! last keeps what it has received so far behind an `Rc`, so each stage can
//! be called any number of times and shared between later calls. Captured
//! arguments are handed to the target through `Rc::unwrap_or_clone`, so they
//! must be `Clone`.
//!
//! For `curry!(add, 2)` the expansion is:
//!
//! ```text
//! {
//!     let __xo_function = Rc::new(add);
//!     move |__xo_argument_0| {
//!         let __xo_function = Rc::clone(&__xo_function);
//!         let __xo_argument_0 = Rc::new(__xo_argument_0);
//!         move |__xo_argument_1| {
//!             __xo_function(
//!                 Rc::unwrap_or_clone(Rc::clone(&__xo_argument_0)),
//!                 __xo_argument_1,
//!             )
//!         }
//!     }
//! }
//! ```

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, ExprClosure, ExprLit, ExprPath, Lit, Token};

const TOO_FEW_ARGUMENTS: &str = "curry! requires a function with at least 2 arguments";

#[derive(Debug)]
enum CurryInput {
    Closure(ExprClosure),
    FunctionWithArity { function: ExprPath, arity: usize },
}

pub fn expand(input: TokenStream) -> TokenStream {
    match parse(input) {
        Ok(CurryInput::Closure(closure)) => {
            let arity = closure.inputs.len();
            nested_closures(arity, &quote! { #closure })
        }
        Ok(CurryInput::FunctionWithArity { function, arity }) => {
            nested_closures(arity, &quote! { #function })
        }
        Err(error) => error.to_compile_error(),
    }
}

fn parse(input: TokenStream) -> syn::Result<CurryInput> {
    let parser = Punctuated::<Expr, Token![,]>::parse_terminated;
    let expressions = syn::parse::Parser::parse2(parser, input)?;
    let mut expressions = expressions.into_iter();

    match (expressions.next(), expressions.next(), expressions.next()) {
        (Some(Expr::Closure(closure)), None, None) => {
            if closure.inputs.len() < 2 {
                return Err(syn::Error::new(closure.span(), TOO_FEW_ARGUMENTS));
            }
            Ok(CurryInput::Closure(closure))
        }
        (Some(Expr::Path(path)), None, None) => Err(syn::Error::new(
            path.span(),
            "curry! with a function name requires an arity: curry!(function_name, 2)",
        )),
        (Some(first), Some(second), None) => parse_function_with_arity(first, second),
        (Some(other), None, None) => Err(syn::Error::new(
            other.span(),
            "curry! requires a closure or a function name with an arity",
        )),
        _ => Err(syn::Error::new(
            Span::call_site(),
            "curry! requires a closure or a function name with an arity",
        )),
    }
}

fn parse_function_with_arity(first: Expr, second: Expr) -> syn::Result<CurryInput> {
    let Expr::Path(function) = first else {
        return Err(syn::Error::new(first.span(), "expected a function name or path"));
    };

    let Expr::Lit(ExprLit {
        lit: Lit::Int(literal),
        ..
    }) = second
    else {
        return Err(syn::Error::new(
            second.span(),
            "curry! expected an integer literal for the arity",
        ));
    };
    let arity = literal.base10_parse::<usize>()?;

    if arity < 2 {
        return Err(syn::Error::new(literal.span(), TOO_FEW_ARGUMENTS));
    }

    Ok(CurryInput::FunctionWithArity { function, arity })
}

fn nested_closures(arity: usize, function: &TokenStream) -> TokenStream {
    let arguments: Vec<Ident> = (0..arity)
        .map(|index| format_ident!("__xo_argument_{}", index))
        .collect();

    let (last, captured) = match arguments.split_last() {
        Some(split) => split,
        None => return syn::Error::new(Span::call_site(), TOO_FEW_ARGUMENTS).to_compile_error(),
    };

    let mut body = quote! {
        __xo_function(
            #(::std::rc::Rc::unwrap_or_clone(::std::rc::Rc::clone(&#captured)),)*
            #last
        )
    };
    body = quote! { move |#last| { #body } };

    for (index, argument) in captured.iter().enumerate().rev() {
        let earlier = &captured[..index];
        body = quote! {
            move |#argument| {
                let __xo_function = ::std::rc::Rc::clone(&__xo_function);
                #(let #earlier = ::std::rc::Rc::clone(&#earlier);)*
                let #argument = ::std::rc::Rc::new(#argument);
                #body
            }
        };
    }

    quote! {
        {
            let __xo_function = ::std::rc::Rc::new(#function);
            #body
        }
    }
}
