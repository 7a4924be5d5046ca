//! Member extractor.
//!
//! Walks the variants of a marked enum in declaration order and pairs each
//! constant-valued (unit) variant with its override text, if it has any.
//! Data-carrying variants are not constants and are left to the catch-all.

use quote::ToTokens;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;

use crate::resolve::MarkedEnumType;
use crate::source::cfg_attributes;

/// One unit variant as the emitter needs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumMember {
    /// Identifier as declared, without any `r#` prefix.
    pub original_name: String,
    /// Override text from the description attribute.
    pub declarative_name: Option<String>,
    /// Identifier as it must be written in a path (keeps `r#`).
    pub pattern: String,
    /// `#[cfg(...)]` attributes on the variant, rendered as source.
    pub cfg: Vec<String>,
}

impl EnumMember {
    /// Text the lookup returns for this member.
    pub fn description(&self) -> &str {
        self.declarative_name
            .as_deref()
            .unwrap_or(&self.original_name)
    }
}

/// Lazy, one-shot sequence of a marked enum's members in declaration order.
pub struct Members<'a> {
    variants: syn::punctuated::Iter<'a, syn::Variant>,
    attribute: &'a str,
}

/// Start extracting the members of `ty`, reading overrides from `#[attribute]`.
pub fn members<'a>(ty: &MarkedEnumType<'a>, attribute: &'a str) -> Members<'a> {
    Members {
        variants: ty.item.variants.iter(),
        attribute,
    }
}

impl Iterator for Members<'_> {
    type Item = EnumMember;

    fn next(&mut self) -> Option<EnumMember> {
        loop {
            let variant = self.variants.next()?;
            if !matches!(variant.fields, syn::Fields::Unit) {
                tracing::trace!(variant = %variant.ident, "skipping data-carrying variant");
                continue;
            }
            return Some(EnumMember {
                original_name: variant.ident.unraw().to_string(),
                declarative_name: override_text(&variant.attrs, self.attribute),
                pattern: variant.ident.to_string(),
                cfg: cfg_attributes(&variant.attrs).collect(),
            });
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.variants.size_hint().1)
    }
}

/// Override text carried by the first `#[attribute(...)]` on a variant.
///
/// Accepts `#[attribute("text")]` and `#[attribute = "text"]`. A bare
/// attribute, an empty argument list or a first argument that is not a
/// string literal all mean "no override".
fn override_text(attrs: &[syn::Attribute], attribute: &str) -> Option<String> {
    let attr = attrs.iter().find(|attr| attr.path().is_ident(attribute))?;
    let first = match &attr.meta {
        syn::Meta::Path(_) => return None,
        syn::Meta::NameValue(nv) => nv.value.clone(),
        syn::Meta::List(list) => {
            let args = list
                .parse_args_with(Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated)
                .ok()?;
            args.into_iter().next()?
        }
    };
    match first {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Str(text),
            ..
        }) => Some(text.value()),
        other => {
            tracing::warn!(
                attribute,
                argument = %other.to_token_stream(),
                "override argument is not a string literal, using the variant name"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests;
