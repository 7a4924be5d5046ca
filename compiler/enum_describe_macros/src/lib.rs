//! Opt-in marker for enum description generation.
//!
//! Deriving `GenerateEnumDescription` marks an enum for the `enum_describe`
//! build-time generator, which scans the crate sources and writes the
//! description lookups. The derive itself only validates its input:
//!
//! ```text
//! #[derive(Debug, GenerateEnumDescription)]
//! pub enum TestEnum {
//!     #[description("First Test Enum")]
//!     FirstTestEnum,
//!     SecondTestEnum,
//! }
//!
//! assert_eq!(TestEnum::FirstTestEnum.description(), "First Test Enum");
//! assert_eq!(TestEnum::SecondTestEnum.description(), "SecondTestEnum");
//! ```

mod marker;

use proc_macro::TokenStream;

/// Mark an enum for description generation.
///
/// # Attributes
///
/// ## Variant-level
/// - `#[description("text")]` - Text returned for this variant instead of its name.
///   `#[description = "text"]` is accepted too.
///
/// # Requirements
/// - The input must be an enum.
/// - Non-generic enums must implement `Debug`, which renders values the
///   lookup has no entry for.
#[proc_macro_derive(GenerateEnumDescription, attributes(description))]
pub fn derive_generate_enum_description(input: TokenStream) -> TokenStream {
    marker::derive_marker(input)
}
