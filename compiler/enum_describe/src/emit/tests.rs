#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::config::{OUTPUT_FILE, SUPPORT_FILE};
use crate::extract::members;
use crate::resolve::{MarkOrigin, MarkedEnumType, SymbolPath};
use crate::source::ModulePath;
use pretty_assertions::assert_eq;

// -- StringEmitter --

#[test]
fn string_emitter_indentation() {
    let mut emitter = StringEmitter::new();
    emitter.emit("impl X {");
    emitter.emit_newline();
    emitter.emit_indent(1);
    emitter.emit("body");
    emitter.emit_newline();
    emitter.emit_indent(2);
    emitter.emit("nested");
    assert_eq!(emitter.output(), "impl X {\n    body\n        nested");
}

#[test]
fn emit_line_leaves_blank_lines_unindented() {
    let mut emitter = StringEmitter::new();
    emitter.emit_line(2, "a");
    emitter.emit_line(2, "");
    emitter.emit_line(0, "b");
    assert_eq!(emitter.output(), "        a\n\nb\n");
}

// -- Rendering --

fn parse(source: &str) -> syn::ItemEnum {
    syn::parse_str(source).unwrap()
}

fn mark<'a>(item: &'a syn::ItemEnum, module: &str) -> MarkedEnumType<'a> {
    MarkedEnumType {
        path: SymbolPath::local(&ModulePath::parse(module), item.ident.to_string()),
        item,
        origin: MarkOrigin::Derive,
        cfg: Vec::new(),
    }
}

fn render(types: &[MarkedEnumType<'_>]) -> String {
    render_descriptions(
        "crate",
        types.iter().map(|ty| (ty, members(ty, "description"))),
    )
    .text
}

#[test]
fn renders_interleaved_overrides() {
    let item = parse(
        r#"
        pub enum TestEnum {
            #[description("First Test Enum")]
            FirstTestEnum,
            SecondTestEnum,
            #[description("Third Test Enum")]
            ThirdTestEnum,
        }
        "#,
    );
    let expected = [
        "// @generated by enum_describe. Do not edit by hand.",
        "",
        "/// Description lookups for every marked enum in this crate.",
        "#[allow(unreachable_patterns, unused_imports, clippy::all, clippy::pedantic)]",
        "pub mod enum_descriptions {",
        "    use ::std::borrow::Cow;",
        "",
        "    use crate::enum_description::{DescribeDiscriminant, EnumDescription};",
        "",
        "    impl EnumDescription for crate::TestEnum {",
        "        fn description(&self) -> Cow<'static, str> {",
        "            match self {",
        "                crate::TestEnum::FirstTestEnum => Cow::Borrowed(\"First Test Enum\"),",
        "                crate::TestEnum::SecondTestEnum => Cow::Borrowed(\"SecondTestEnum\"),",
        "                crate::TestEnum::ThirdTestEnum => Cow::Borrowed(\"Third Test Enum\"),",
        "                _ => Cow::Owned(format!(\"{self:?}\")),",
        "            }",
        "        }",
        "    }",
        "",
        "    impl DescribeDiscriminant for crate::TestEnum {",
        "        type Repr = isize;",
        "",
        "        fn describe_discriminant(raw: isize) -> Cow<'static, str> {",
        "            const D0: isize = crate::TestEnum::FirstTestEnum as isize;",
        "            const D1: isize = crate::TestEnum::SecondTestEnum as isize;",
        "            const D2: isize = crate::TestEnum::ThirdTestEnum as isize;",
        "            match raw {",
        "                D0 => Cow::Borrowed(\"First Test Enum\"),",
        "                D1 => Cow::Borrowed(\"SecondTestEnum\"),",
        "                D2 => Cow::Borrowed(\"Third Test Enum\"),",
        "                _ => Cow::Owned(raw.to_string()),",
        "            }",
        "        }",
        "    }",
        "}",
        "",
    ]
    .join("\n");
    assert_eq!(render(&[mark(&item, "crate")]), expected);
}

#[test]
fn every_enum_gets_one_impl_in_input_order() {
    let first = parse("pub enum Second { A }");
    let second = parse("pub enum First { B }");
    let text = render(&[mark(&first, "crate::zed"), mark(&second, "crate::alpha")]);

    let second_at = text.find("EnumDescription for crate::zed::Second").unwrap();
    let first_at = text.find("EnumDescription for crate::alpha::First").unwrap();
    assert!(second_at < first_at);
    assert_eq!(text.matches("impl EnumDescription for").count(), 2);
    assert_eq!(text.matches("pub mod enum_descriptions").count(), 1);
}

#[test]
fn rendering_is_deterministic() {
    let item = parse(r#"pub enum E { #[description("x")] A, B }"#);
    let types = [mark(&item, "crate::m")];
    assert_eq!(render(&types), render(&types));
}

#[test]
fn every_lookup_ends_with_a_catch_all() {
    let item = parse("pub enum Empty {}");
    let text = render(&[mark(&item, "crate")]);
    assert!(text.contains("_ => Cow::Owned(format!(\"{self:?}\")),"));
    assert!(text.contains("_ => Cow::Owned(raw.to_string()),"));
}

#[test]
fn override_text_is_escaped() {
    let item = parse(r#"pub enum E { #[description("Say \"hi\" \\ bye")] A }"#);
    let text = render(&[mark(&item, "crate")]);
    assert!(text.contains(r#"crate::E::A => Cow::Borrowed("Say \"hi\" \\ bye"),"#));
}

#[test]
fn integer_repr_sets_discriminant_type() {
    let item = parse("#[repr(C, u8)] pub enum Currency { Usd = 1, Eur = 2 }");
    let text = render(&[mark(&item, "crate::money")]);
    assert!(text.contains("type Repr = u8;"));
    assert!(text.contains("fn describe_discriminant(raw: u8)"));
    assert!(text.contains("const D0: u8 = crate::money::Currency::Usd as u8;"));
}

#[test]
fn data_variants_fall_back_without_discriminant_lookup() {
    let item = parse(r#"pub enum Shape { #[description("Nothing")] Empty, Circle(f64) }"#);
    let text = render(&[mark(&item, "crate")]);
    assert!(text.contains("crate::Shape::Empty => Cow::Borrowed(\"Nothing\"),"));
    assert!(!text.contains("Circle"));
    assert!(!text.contains("impl DescribeDiscriminant"));
}

#[test]
fn generic_enums_carry_their_bounds() {
    let item = parse("pub enum Wrapper<T> where T: Clone { Nothing, Some(T) }");
    let text = render(&[mark(&item, "crate")]);
    assert!(text.contains("EnumDescription for crate::Wrapper"));
    assert!(text.contains("Self: ::core::fmt::Debug,"));
    assert!(text.contains("Clone,"));
    assert!(!text.contains("impl DescribeDiscriminant"));
}

#[test]
fn cfg_attributes_guard_arms_and_constants() {
    let item = parse(r#"pub enum E { A, #[cfg(feature = "b")] B }"#);
    let text = render(&[mark(&item, "crate")]);
    let guarded = text
        .lines()
        .filter(|line| line.trim_start().starts_with('#') && line.contains("cfg"))
        .count();
    assert_eq!(guarded, 3);
}

#[test]
fn gated_enums_get_gated_impls() {
    let unix = parse("pub enum Platform { Unix }");
    let windows = parse("pub enum Platform { Windows }");
    let mut on_unix = mark(&unix, "crate::os");
    on_unix.cfg = vec!["#[cfg (any ())]".to_string(), "#[cfg (unix)]".to_string()];
    let mut on_windows = mark(&windows, "crate::os");
    on_windows.cfg = vec!["#[cfg (windows)]".to_string()];
    let text = render(&[on_unix, on_windows]);

    for header in [
        "    #[cfg (any ())]\n    #[cfg (unix)]\n    impl EnumDescription for crate::os::Platform {",
        "    #[cfg (any ())]\n    #[cfg (unix)]\n    impl DescribeDiscriminant for crate::os::Platform {",
        "    #[cfg (windows)]\n    impl EnumDescription for crate::os::Platform {",
        "    #[cfg (windows)]\n    impl DescribeDiscriminant for crate::os::Platform {",
    ] {
        assert!(text.contains(header), "missing `{header}` in:\n{text}");
    }
    assert_eq!(text.matches("impl").count(), 4);
}

#[test]
fn raw_identifiers_keep_their_prefix_in_paths() {
    let item = parse("pub enum Keyword { r#type }");
    let text = render(&[mark(&item, "crate")]);
    assert!(text.contains("crate::Keyword::r#type => Cow::Borrowed(\"type\"),"));
}

#[test]
fn nothing_marked_still_yields_the_container() {
    let unit = render_descriptions(
        "crate::generated",
        std::iter::empty::<(&MarkedEnumType<'_>, crate::extract::Members<'_>)>(),
    );
    assert_eq!(unit.file_name, OUTPUT_FILE);
    assert!(unit
        .text
        .contains("use crate::generated::enum_description::{DescribeDiscriminant, EnumDescription};"));
    assert!(!unit.text.contains("impl"));
}

#[test]
fn support_unit_is_fixed() {
    let unit = render_support();
    assert_eq!(unit.file_name, SUPPORT_FILE);
    assert!(unit.text.starts_with(GENERATED_HEADER));
    assert!(unit.text.contains("pub trait EnumDescription"));
    assert!(unit.text.contains("pub trait DescribeDiscriminant"));
    assert_eq!(unit, render_support());
}
