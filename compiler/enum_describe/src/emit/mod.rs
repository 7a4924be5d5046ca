//! Output emission.
//!
//! Rendering is purely textual and deterministic: identical input yields
//! byte-identical units. The emitter never fails; everything that can go
//! wrong has been rejected by the resolver before it runs.

mod descriptions;

use std::fmt;

pub use descriptions::{render_descriptions, render_support};

/// Header line at the top of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by enum_describe. Do not edit by hand.";

/// Trait for building generated source text.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation (4 spaces per level).
    fn emit_indent(&mut self, level: usize);

    /// Emit one indented line.
    fn emit_line(&mut self, level: usize, text: &str) {
        if !text.is_empty() {
            self.emit_indent(level);
            self.emit(text);
        }
        self.emit_newline();
    }
}

/// String-based emitter for in-memory rendering.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    /// Create a new string emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the rendered output.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level * 4 {
            self.buffer.push(' ');
        }
    }
}

/// One generated file, ready to be written or handed to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// File name inside the output directory.
    pub file_name: &'static str,
    pub text: String,
}

impl fmt::Display for GeneratedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests;
