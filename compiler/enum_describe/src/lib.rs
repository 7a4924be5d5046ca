//! Enum Describe
//!
//! Build-time generator of human-readable description lookups for Rust enums.
//!
//! # Architecture
//!
//! Each pass runs four stages over one parsed crate:
//!
//! 1. **Scanner**: collects every enum declaration with its module
//! 2. **Marker resolver**: keeps the enums whose derive list resolves to the
//!    opt-in marker (or that configuration registers)
//! 3. **Member extractor**: pairs each unit variant with its override text
//! 4. **Emitter**: renders one `match`-based lookup per marked enum into a
//!    single generated module
//!
//! A pass either produces a complete unit or an error; nothing is emitted
//! on failure.
//!
//! # Modules
//!
//! - [`source`]: crate loading and module paths
//! - [`scanner`]: declaration scanner
//! - [`resolve`]: symbol table and marker resolution
//! - [`extract`]: member extraction
//! - [`emit`]: text emission
//! - [`builder`]: `build.rs` driver
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=enum_describe=debug`: stage boundaries and skipped enums.
//! - `RUST_LOG=enum_describe=trace`: every parsed file and rejected candidate.

pub mod builder;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod generator;
pub mod resolve;
pub mod scanner;
pub mod source;

pub use builder::{BuildReport, Builder};
pub use config::GeneratorConfig;
pub use emit::GeneratedUnit;
pub use error::GenerateError;
pub use generator::{DescribedEnum, GenerationOutput, Generator};
pub use resolve::{MarkOrigin, SkipReason, SkippedEnum, SymbolPath};
pub use source::{Compilation, ModulePath};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
