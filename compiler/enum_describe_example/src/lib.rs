//! Example consumer of the enum description generator.
//!
//! The build script writes two files into `OUT_DIR`; both are included at
//! the crate root, which is the default mount path.

include!(concat!(env!("OUT_DIR"), "/enum_description_support.rs"));
include!(concat!(env!("OUT_DIR"), "/enum_descriptions.rs"));

pub mod currency;
pub mod days;
pub mod platform;
pub mod samples;
pub mod shapes;

pub use enum_description::{DescribeDiscriminant, EnumDescription};
