//! Enums marked with the derive.

use enum_describe_macros::GenerateEnumDescription;

#[derive(Debug, Clone, Copy, PartialEq, Eq, GenerateEnumDescription)]
pub enum TestEnum {
    #[description("First Test Enum")]
    FirstTestEnum,
    SecondTestEnum,
    #[description("Third Test Enum")]
    ThirdTestEnum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, GenerateEnumDescription)]
pub enum AnotherTestEnum {
    #[description("Value One")]
    ValueOne,
    ValueTwo,
    #[description = "Value Three"]
    ValueThree,
}
