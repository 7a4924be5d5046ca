use enum_describe_macros::GenerateEnumDescription;

/// Only `Empty` is a constant; the other variants render through `Debug`.
#[derive(Debug, Clone, PartialEq, GenerateEnumDescription)]
pub enum Shape {
    #[description("Nothing at all")]
    Empty,
    Circle { radius: f64 },
    Square(f64),
}
