//! Rendering of the support and aggregate units.

use quote::ToTokens;

use super::{Emitter, GeneratedUnit, StringEmitter, GENERATED_HEADER};
use crate::config::{OUTPUT_FILE, SUPPORT_FILE};
use crate::extract::{EnumMember, Members};
use crate::resolve::MarkedEnumType;

/// Integer types allowed in `#[repr(..)]` on a fieldless enum.
const REPR_INTS: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

/// Discriminant type of an enum without an integer `repr`.
const DEFAULT_REPR: &str = "isize";

const SUPPORT_TEXT: &str = r"/// Traits implemented for enums marked with `#[derive(GenerateEnumDescription)]`.
pub mod enum_description {
    use ::std::borrow::Cow;

    /// Human-readable text for every value of an enum.
    pub trait EnumDescription {
        /// Override text of the matching variant, or its name when it has
        /// none. Values without a lookup entry render through `Debug`.
        fn description(&self) -> Cow<'static, str>;
    }

    /// Description lookup over the whole discriminant domain of a fieldless enum.
    pub trait DescribeDiscriminant {
        /// Integer representation of the enum.
        type Repr;

        /// Describe the variant whose discriminant is `raw`, or the number
        /// itself when no variant has it.
        fn describe_discriminant(raw: Self::Repr) -> Cow<'static, str>;
    }
}
";

/// The fixed support unit defining the description traits.
///
/// Independent of any input, so it can be written before scanning starts.
pub fn render_support() -> GeneratedUnit {
    let mut out = StringEmitter::new();
    out.emit_line(0, GENERATED_HEADER);
    out.emit_newline();
    out.emit(SUPPORT_TEXT);
    GeneratedUnit {
        file_name: SUPPORT_FILE,
        text: out.output(),
    }
}

/// Render one container module with the lookups of every marked enum.
///
/// `mount` is the module path where the support unit is included.
pub fn render_descriptions<'t, 'a: 't>(
    mount: &str,
    types: impl IntoIterator<Item = (&'t MarkedEnumType<'a>, Members<'a>)>,
) -> GeneratedUnit {
    let mut out = StringEmitter::new();
    out.emit_line(0, GENERATED_HEADER);
    out.emit_newline();
    out.emit_line(0, "/// Description lookups for every marked enum in this crate.");
    out.emit_line(
        0,
        "#[allow(unreachable_patterns, unused_imports, clippy::all, clippy::pedantic)]",
    );
    out.emit_line(0, "pub mod enum_descriptions {");
    out.emit_line(1, "use ::std::borrow::Cow;");
    out.emit_newline();
    out.emit_line(
        1,
        &format!("use {mount}::enum_description::{{DescribeDiscriminant, EnumDescription}};"),
    );

    let mut count = 0usize;
    for (ty, members) in types {
        let members: Vec<EnumMember> = members.collect();
        let path = ty.path.to_string();
        out.emit_newline();
        render_description_impl(&mut out, ty, &path, &members);
        if let Some(repr) = discriminant_repr(ty.item) {
            out.emit_newline();
            render_discriminant_impl(&mut out, ty, &path, repr, &members);
        }
        count += 1;
    }

    out.emit_line(0, "}");
    tracing::debug!(enums = count, "descriptions rendered");
    GeneratedUnit {
        file_name: OUTPUT_FILE,
        text: out.output(),
    }
}

fn render_description_impl(
    out: &mut StringEmitter,
    ty: &MarkedEnumType<'_>,
    path: &str,
    members: &[EnumMember],
) {
    emit_lines(out, 1, &ty.cfg);
    let generics = &ty.item.generics;
    if generics.params.is_empty() {
        out.emit_line(1, &format!("impl EnumDescription for {path} {{"));
    } else {
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        out.emit_line(
            1,
            &format!(
                "impl{} EnumDescription for {path}{}",
                tokens(&impl_generics),
                tokens(&ty_generics)
            ),
        );
        out.emit_line(1, "where");
        out.emit_line(2, "Self: ::core::fmt::Debug,");
        for predicate in where_clause.iter().flat_map(|w| w.predicates.iter()) {
            out.emit_line(2, &format!("{},", tokens(predicate)));
        }
        out.emit_line(1, "{");
    }
    out.emit_line(2, "fn description(&self) -> Cow<'static, str> {");
    out.emit_line(3, "match self {");
    for member in members {
        emit_lines(out, 4, &member.cfg);
        out.emit_line(
            4,
            &format!(
                "{path}::{} => Cow::Borrowed({}),",
                member.pattern,
                string_literal(member.description())
            ),
        );
    }
    out.emit_line(4, "_ => Cow::Owned(format!(\"{self:?}\")),");
    out.emit_line(3, "}");
    out.emit_line(2, "}");
    out.emit_line(1, "}");
}

fn render_discriminant_impl(
    out: &mut StringEmitter,
    ty: &MarkedEnumType<'_>,
    path: &str,
    repr: &str,
    members: &[EnumMember],
) {
    emit_lines(out, 1, &ty.cfg);
    out.emit_line(1, &format!("impl DescribeDiscriminant for {path} {{"));
    out.emit_line(2, &format!("type Repr = {repr};"));
    out.emit_newline();
    out.emit_line(
        2,
        &format!("fn describe_discriminant(raw: {repr}) -> Cow<'static, str> {{"),
    );
    for (index, member) in members.iter().enumerate() {
        emit_lines(out, 3, &member.cfg);
        out.emit_line(
            3,
            &format!("const D{index}: {repr} = {path}::{} as {repr};", member.pattern),
        );
    }
    out.emit_line(3, "match raw {");
    for (index, member) in members.iter().enumerate() {
        emit_lines(out, 4, &member.cfg);
        out.emit_line(
            4,
            &format!(
                "D{index} => Cow::Borrowed({}),",
                string_literal(member.description())
            ),
        );
    }
    out.emit_line(4, "_ => Cow::Owned(raw.to_string()),");
    out.emit_line(3, "}");
    out.emit_line(2, "}");
    out.emit_line(1, "}");
}

fn emit_lines(out: &mut StringEmitter, level: usize, lines: &[String]) {
    for line in lines {
        out.emit_line(level, line);
    }
}

/// Integer type of the discriminant lookup, or `None` when the enum has
/// generics or data-carrying variants and cannot be cast.
fn discriminant_repr(item: &syn::ItemEnum) -> Option<&'static str> {
    if !item.generics.params.is_empty()
        || !item
            .variants
            .iter()
            .all(|v| matches!(v.fields, syn::Fields::Unit))
    {
        return None;
    }
    let declared = item
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("repr"))
        .filter_map(|attr| {
            attr.parse_args_with(
                syn::punctuated::Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated,
            )
            .ok()
        })
        .flatten()
        .find_map(|meta| {
            let ident = meta.path().get_ident()?.to_string();
            REPR_INTS.iter().copied().find(|int| *int == ident)
        });
    Some(declared.unwrap_or(DEFAULT_REPR))
}

/// A Rust string literal whose value is exactly `text`.
fn string_literal(text: &str) -> String {
    proc_macro2::Literal::string(text).to_string()
}

fn tokens(node: &impl ToTokens) -> String {
    node.to_token_stream().to_string()
}
