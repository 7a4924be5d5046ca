//! Prints the generated descriptions.

use enum_describe_example::currency::CurrencyType;
use enum_describe_example::days::Weekday;
use enum_describe_example::samples::{AnotherTestEnum, TestEnum};
use enum_describe_example::shapes::Shape;
use enum_describe_example::{DescribeDiscriminant, EnumDescription};

fn main() {
    for value in [
        TestEnum::FirstTestEnum,
        TestEnum::SecondTestEnum,
        TestEnum::ThirdTestEnum,
    ] {
        println!("{value:?}: {}", value.description());
    }

    for value in [
        AnotherTestEnum::ValueOne,
        AnotherTestEnum::ValueTwo,
        AnotherTestEnum::ValueThree,
    ] {
        println!("{value:?}: {}", value.description());
    }

    println!("{:?}: {}", Weekday::Friday, Weekday::Friday.description());

    for shape in [Shape::Empty, Shape::Square(2.0)] {
        println!("{shape:?}: {}", shape.description());
    }

    for raw in 0..=5u8 {
        println!("CurrencyType({raw}): {}", CurrencyType::describe_discriminant(raw));
    }
}
