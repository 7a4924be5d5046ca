#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::resolve::{MarkOrigin, SymbolPath};
use crate::source::ModulePath;
use pretty_assertions::assert_eq;

fn extract(source: &str) -> Vec<EnumMember> {
    let item: syn::ItemEnum = syn::parse_str(source).unwrap();
    let ty = MarkedEnumType {
        path: SymbolPath::local(&ModulePath::root(), item.ident.to_string()),
        item: &item,
        origin: MarkOrigin::Derive,
        cfg: Vec::new(),
    };
    members(&ty, "description").collect()
}

fn pairs(members: &[EnumMember]) -> Vec<(&str, Option<&str>)> {
    members
        .iter()
        .map(|m| (m.original_name.as_str(), m.declarative_name.as_deref()))
        .collect()
}

#[test]
fn interleaved_overrides_keep_declaration_order() {
    let members = extract(
        r#"
        enum TestEnum {
            #[description("First Test Enum")]
            FirstTestEnum,
            SecondTestEnum,
            #[description("Third Test Enum")]
            ThirdTestEnum,
        }
        "#,
    );
    assert_eq!(
        pairs(&members),
        vec![
            ("FirstTestEnum", Some("First Test Enum")),
            ("SecondTestEnum", None),
            ("ThirdTestEnum", Some("Third Test Enum")),
        ]
    );
    assert_eq!(members[1].description(), "SecondTestEnum");
}

#[test]
fn empty_or_bare_attribute_means_no_override() {
    let members = extract(
        r#"
        enum Malformed {
            #[description]
            Bare,
            #[description()]
            Empty,
            #[description(42)]
            NotAString,
            #[description("kept", "extra ignored")]
            FirstArgumentWins,
        }
        "#,
    );
    assert_eq!(
        pairs(&members),
        vec![
            ("Bare", None),
            ("Empty", None),
            ("NotAString", None),
            ("FirstArgumentWins", Some("kept")),
        ]
    );
}

#[test]
fn only_first_matching_attribute_counts() {
    let members = extract(
        r#"
        enum Twice {
            #[description()]
            #[description("never read")]
            A,
        }
        "#,
    );
    assert_eq!(pairs(&members), vec![("A", None)]);
}

#[test]
fn name_value_form_is_accepted() {
    let members = extract(r#"enum E { #[description = "Name value"] A }"#);
    assert_eq!(pairs(&members), vec![("A", Some("Name value"))]);
}

#[test]
fn other_attributes_are_ignored() {
    let members = extract(
        r#"
        enum E {
            #[doc = "Documentation is not a description"]
            #[serde(rename = "a")]
            A,
        }
        "#,
    );
    assert_eq!(pairs(&members), vec![("A", None)]);
}

#[test]
fn data_variants_are_not_members() {
    let members = extract(
        r#"
        enum Mixed {
            Unit,
            Tuple(u8),
            Struct { value: u8 },
            #[description("After data")]
            Last,
        }
        "#,
    );
    assert_eq!(pairs(&members), vec![("Unit", None), ("Last", Some("After data"))]);
}

#[test]
fn raw_identifiers_and_cfg_attributes() {
    let members = extract(
        r#"
        enum Keywords {
            r#type,
            #[cfg(feature = "extra")]
            Extra = 7,
        }
        "#,
    );
    assert_eq!(members[0].original_name, "type");
    assert_eq!(members[0].pattern, "r#type");
    assert!(members[0].cfg.is_empty());
    assert_eq!(members[1].cfg.len(), 1);
    assert!(members[1].cfg[0].contains("cfg"));
    assert!(members[1].cfg[0].contains(r#""extra""#));
}

#[test]
fn override_text_is_taken_literally() {
    let members = extract(r#"enum E { #[description("Quote \" and \\ and ünïcode")] A }"#);
    assert_eq!(members[0].description(), "Quote \" and \\ and ünïcode");
}
