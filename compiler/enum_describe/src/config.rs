//! Generator configuration.
//!
//! The defaults describe the shipped marker crate: an enum opts in with
//! `#[derive(enum_describe_macros::GenerateEnumDescription)]` and overrides a
//! variant's text with `#[description("...")]`.

use crate::error::GenerateError;

/// Crate that provides the default opt-in marker.
pub const MARKER_CRATE: &str = "enum_describe_macros";

/// Fully-qualified path of the default opt-in marker derive.
pub const DEFAULT_MARKER: &str = "enum_describe_macros::GenerateEnumDescription";

/// Default name of the per-variant override attribute.
pub const DEFAULT_DESCRIPTION_ATTRIBUTE: &str = "description";

/// File name of the fixed support artifact.
pub const SUPPORT_FILE: &str = "enum_description_support.rs";

/// File name of the aggregate artifact produced by each pass.
pub const OUTPUT_FILE: &str = "enum_descriptions.rs";

/// Options for one generation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Fully-qualified path of the marker derive.
    pub marker: String,
    /// Helper attribute carrying override text on variants.
    pub description_attribute: String,
    /// Enums treated as marked without carrying the derive.
    pub registered: Vec<String>,
    /// Module path where both artifacts are `include!`d.
    pub mount: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            marker: DEFAULT_MARKER.to_string(),
            description_attribute: DEFAULT_DESCRIPTION_ATTRIBUTE.to_string(),
            registered: Vec::new(),
            mount: "crate".to_string(),
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_marker(mut self, path: impl Into<String>) -> Self {
        self.marker = path.into();
        self
    }

    #[must_use]
    pub fn with_description_attribute(mut self, name: impl Into<String>) -> Self {
        self.description_attribute = name.into();
        self
    }

    /// Treat the enum at `path` as marked.
    #[must_use]
    pub fn register(mut self, path: impl Into<String>) -> Self {
        self.registered.push(path.into());
        self
    }

    #[must_use]
    pub fn with_mount(mut self, path: impl Into<String>) -> Self {
        self.mount = path.into();
        self
    }

    /// Check that every configured path parses.
    ///
    /// Runs at the start of each pass so a bad configuration fails before
    /// any source is scanned.
    pub fn validate(&self) -> Result<(), GenerateError> {
        parse_path(&self.marker, "marker")?;
        parse_path(&self.mount, "mount")?;
        for path in &self.registered {
            parse_path(path, "registered enum")?;
        }
        Ok(())
    }
}

/// Parse a configured path into a `syn::Path`.
pub(crate) fn parse_path(text: &str, what: &str) -> Result<syn::Path, GenerateError> {
    syn::parse_str::<syn::Path>(text)
        .map_err(|err| GenerateError::InvalidConfig(format!("{what} `{text}` is not a path: {err}")))
}
