//! Marker on a plain enum with overrides in both forms.

use enum_describe_macros::GenerateEnumDescription;

#[derive(Debug, GenerateEnumDescription)]
pub enum TestEnum {
    #[description("First Test Enum")]
    FirstTestEnum,
    SecondTestEnum,
    #[description = "Third Test Enum"]
    ThirdTestEnum,
}

fn main() {
    let _ = TestEnum::FirstTestEnum;
    let _ = TestEnum::SecondTestEnum;
    let _ = TestEnum::ThirdTestEnum;
}
