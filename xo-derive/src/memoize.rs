//! Expansion of `#[memoize]`.
//!
//! The attributed function keeps its name and signature. Its body moves into
//! a nested function, and the outer function looks results up in a
//! thread-local `::xo::memoize::Cache` keyed by `CacheKey::derive` over a
//! tuple of references to the arguments:
//!
//! ```text
//! fn fibonacci(n: u64) -> u64 {
//!     fn __xo_uncached(n: u64) -> u64 { /* original body */ }
//!     thread_local! {
//!         static __XO_CACHE: ::xo::memoize::Cache<u64> = ::xo::memoize::Cache::new();
//!     }
//!     let __xo_key = ::xo::memoize::CacheKey::derive(&(&n,));
//!     match __xo_key {
//!         Ok(key) => __XO_CACHE.with(|cache| cache.get_or_insert_with(key, || __xo_uncached(n))),
//!         Err(_) => __xo_uncached(n),
//!     }
//! }
//! ```
//!
//! Recursive calls in the body name the outer function, so they are cached
//! too. Arguments whose key cannot be derived are passed through uncached.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::spanned::Spanned;
use syn::{FnArg, Ident, ItemFn, Pat, PatIdent};

pub fn expand(attribute: TokenStream, item: TokenStream) -> TokenStream {
    if !attribute.is_empty() {
        return syn::Error::new(attribute.span(), "#[memoize] takes no arguments")
            .to_compile_error();
    }
    match syn::parse2::<ItemFn>(item).and_then(|function| memoized(&function)) {
        Ok(expanded) => expanded,
        Err(error) => error.to_compile_error(),
    }
}

fn memoized(function: &ItemFn) -> syn::Result<TokenStream> {
    let signature = &function.sig;

    if let Some(asyncness) = signature.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "#[memoize] does not support async functions",
        ));
    }
    if !signature.generics.params.is_empty() || signature.generics.where_clause.is_some() {
        return Err(syn::Error::new(
            signature.generics.span(),
            "#[memoize] does not support generic functions",
        ));
    }

    let parameters = parameters(function)?;
    let names: Vec<&Ident> = parameters.iter().map(|parameter| &parameter.ident).collect();

    let mut outer = signature.clone();
    for input in &mut outer.inputs {
        if let FnArg::Typed(typed) = input
            && let Pat::Ident(identifier) = typed.pat.as_mut()
        {
            identifier.mutability = None;
        }
    }

    let mut inner = signature.clone();
    inner.ident = Ident::new("__xo_uncached", Span::call_site());

    let output = match &signature.output {
        syn::ReturnType::Default => quote! { () },
        syn::ReturnType::Type(_, output) => quote! { #output },
    };

    let attributes = &function.attrs;
    let visibility = &function.vis;
    let body = &function.block;

    Ok(quote! {
        #(#attributes)*
        #visibility #outer {
            #inner #body

            ::std::thread_local! {
                static __XO_CACHE: ::xo::memoize::Cache<#output> = ::xo::memoize::Cache::new();
            }

            let __xo_key = ::xo::memoize::CacheKey::derive(&(#(&#names,)*));
            match __xo_key {
                ::std::result::Result::Ok(key) => __XO_CACHE.with(|cache| {
                    cache.get_or_insert_with(key, || __xo_uncached(#(#names),*))
                }),
                ::std::result::Result::Err(_) => __xo_uncached(#(#names),*),
            }
        }
    })
}

fn parameters(function: &ItemFn) -> syn::Result<Vec<&PatIdent>> {
    function
        .sig
        .inputs
        .iter()
        .map(|input| match input {
            FnArg::Receiver(receiver) => Err(syn::Error::new(
                receiver.span(),
                "#[memoize] only supports free functions, not methods",
            )),
            FnArg::Typed(typed) => match typed.pat.as_ref() {
                Pat::Ident(identifier) if identifier.by_ref.is_none() && identifier.subpat.is_none() => {
                    Ok(identifier)
                }
                other => Err(syn::Error::new(
                    other.span(),
                    "#[memoize] requires plain identifiers as parameters",
                )),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn is_error(output: &impl ToString) -> bool {
        output.to_string().contains("compile_error")
    }

    #[rstest]
    fn test_expansion_keeps_the_signature_and_adds_a_cache() {
        let output = expand(
            TokenStream::new(),
            quote! {
                /// Adds.
                pub fn add(left: i64, mut right: i64) -> i64 {
                    right += 0;
                    left + right
                }
            },
        );
        let expanded: ItemFn = syn::parse2(output).unwrap();

        let signature = &expanded.sig;
        assert_eq!(
            quote! { #signature }.to_string(),
            quote! { fn add(left: i64, right: i64) -> i64 }.to_string()
        );
        assert_eq!(expanded.attrs.len(), 1);

        let inner = expanded.block.stmts.iter().find_map(|statement| match statement {
            syn::Stmt::Item(syn::Item::Fn(inner)) => Some(inner),
            _ => None,
        });
        let inner = inner.unwrap();
        let signature = &inner.sig;
        assert_eq!(
            quote! { #signature }.to_string(),
            quote! { fn __xo_uncached(left: i64, mut right: i64) -> i64 }.to_string()
        );
    }

    #[rstest]
    fn test_unit_return_is_cached_as_unit() {
        let output = expand(TokenStream::new(), quote! { fn touch(id: u32) {} }).to_string();
        assert!(!is_error(&output));
        assert!(output.contains(&quote! { Cache<()> }.to_string()));
    }

    #[rstest]
    #[case(quote! { fn method(&self) -> u32 { 0 } })]
    #[case(quote! { fn generic<T>(value: T) -> u32 { 0 } })]
    #[case(quote! { async fn fetch(id: u32) -> u32 { id } })]
    #[case(quote! { fn tuple((a, b): (u32, u32)) -> u32 { a + b } })]
    #[case(quote! { fn by_ref(ref id: u32) -> u32 { *id } })]
    #[case(quote! { struct NotAFunction; })]
    fn test_unsupported_items_are_rejected(#[case] item: TokenStream) {
        assert!(is_error(&expand(TokenStream::new(), item)));
    }

    #[rstest]
    fn test_attribute_arguments_are_rejected() {
        let output = expand(quote! { capacity = 10 }, quote! { fn id(x: u32) -> u32 { x } });
        assert!(is_error(&output));
    }
}
