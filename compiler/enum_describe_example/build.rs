//! Build script for the example crate.
//!
//! Generates the description lookups into `OUT_DIR`. `Weekday` is described
//! through registration instead of the derive.

fn main() {
    enum_describe::init_tracing();

    let result = enum_describe::Builder::new()
        .register("crate::days::Weekday")
        .generate();

    if let Err(err) = result {
        eprintln!("enum description generation failed: {err}");
        std::process::exit(1);
    }
}
