//! Errors that abort a generation pass.
//!
//! Every variant here is fatal: when a pass returns one of them nothing is
//! emitted. Non-fatal conditions (malformed override text, missing module
//! files, enums that generated code cannot name) are logged and reported
//! through [`GenerationOutput`](crate::GenerationOutput) instead.

use std::path::PathBuf;

/// A failure that suppresses all emission for the current pass.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid Rust.
    #[error("{}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The opt-in marker does not resolve in this compilation.
    #[error("marker `{path}` cannot be resolved in crate `{krate}`")]
    UnresolvedMarker { path: String, krate: String },

    /// A configured symbol (override attribute, registered enum) does not resolve.
    #[error("`{path}` does not resolve to {expected}")]
    UnresolvedSymbol { path: String, expected: &'static str },

    /// The configuration itself is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A Cargo build-script variable is absent.
    #[error("environment variable `{0}` is not set (not running inside a build script?)")]
    MissingEnv(&'static str),
}

impl GenerateError {
    /// Wrap an I/O error with the path it concerns.
    #[cold]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }

    /// Convert a `syn` parse error, keeping the first error's location.
    #[cold]
    pub fn parse(path: impl Into<PathBuf>, err: &syn::Error) -> Self {
        let start = err.span().start();
        GenerateError::Parse {
            path: path.into(),
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    }
}
