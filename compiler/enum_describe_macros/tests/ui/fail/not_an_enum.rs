//! Error: the marker only applies to enums.

use enum_describe_macros::GenerateEnumDescription;

#[derive(GenerateEnumDescription)]
pub struct NotAnEnum;

fn main() {}
