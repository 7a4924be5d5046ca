//! Data-carrying variants and generic parameters are accepted.

use enum_describe_macros::GenerateEnumDescription;

#[derive(Debug, GenerateEnumDescription)]
pub enum Shape {
    #[description("Nothing at all")]
    Empty,
    Circle(f64),
    Rect { width: f64, height: f64 },
}

// No Debug needed here: the generated impl carries the bound.
#[derive(GenerateEnumDescription)]
pub enum Slot<T> {
    Vacant,
    Taken(T),
}

fn main() {
    let _ = Shape::Circle(1.0);
    let _ = Shape::Rect { width: 1.0, height: 2.0 };
    let _ = Shape::Empty;
    let _: Slot<u8> = Slot::Taken(1);
    let _: Slot<u8> = Slot::Vacant;
}
