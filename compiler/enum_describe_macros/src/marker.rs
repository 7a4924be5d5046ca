//! Marker derive implementation.
//!
//! Generates no impls. The lookups come from the build-time generator; the
//! derive only rejects inputs it could never describe.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse_macro_input;

/// Main entry point for the marker derive.
pub fn derive_marker(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    match derive_marker_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_marker_impl(input: &syn::DeriveInput) -> syn::Result<TokenStream2> {
    if !matches!(input.data, syn::Data::Enum(_)) {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "GenerateEnumDescription can only be derived for enums",
        ));
    }

    // Generic enums get a `Self: Debug` bound on the generated impl instead.
    if !input.generics.params.is_empty() {
        return Ok(TokenStream2::new());
    }

    let name = &input.ident;
    Ok(quote! {
        const _: fn() = || {
            fn assert_debug<T: ?::core::marker::Sized + ::core::fmt::Debug>() {}
            assert_debug::<#name>();
        };
    })
}
