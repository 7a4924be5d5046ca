//! Build-script driver.
//!
//! ```no_run
//! // build.rs
//! fn main() {
//!     if let Err(err) = enum_describe::Builder::new().generate() {
//!         panic!("{err}");
//!     }
//! }
//! ```
//!
//! Then, in the crate root:
//!
//! ```ignore
//! include!(concat!(env!("OUT_DIR"), "/enum_description_support.rs"));
//! include!(concat!(env!("OUT_DIR"), "/enum_descriptions.rs"));
//! ```

use std::path::{Path, PathBuf};

use crate::config::{GeneratorConfig, MARKER_CRATE};
use crate::emit::GeneratedUnit;
use crate::error::GenerateError;
use crate::generator::{GenerationOutput, Generator};
use crate::resolve::MarkOrigin;
use crate::source::Compilation;

/// Configures and runs a generation pass from `build.rs`.
///
/// Everything not set explicitly is taken from the variables Cargo sets
/// for build scripts.
#[derive(Clone, Debug)]
pub struct Builder {
    root: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    crate_name: Option<String>,
    externs: Vec<(String, String)>,
    config: GeneratorConfig,
    cargo_directives: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            root: None,
            out_dir: None,
            crate_name: None,
            externs: vec![(MARKER_CRATE.to_string(), MARKER_CRATE.to_string())],
            config: GeneratorConfig::default(),
            cargo_directives: true,
        }
    }
}

/// What a build-script pass produced.
#[derive(Debug)]
pub struct BuildReport {
    pub support_path: PathBuf,
    pub output_path: PathBuf,
    /// Every file the pass read.
    pub inputs: Vec<PathBuf>,
    pub output: GenerationOutput,
    /// Whether the aggregate file was (re)written.
    pub written: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crate root file. Defaults to `src/lib.rs`, or `src/main.rs` when
    /// there is no library target.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Output directory. Defaults to `OUT_DIR`.
    #[must_use]
    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(path.into());
        self
    }

    /// Crate name. Defaults to `CARGO_PKG_NAME`.
    #[must_use]
    pub fn crate_name(mut self, name: impl Into<String>) -> Self {
        self.crate_name = Some(name.into());
        self
    }

    /// Make the extern crate `krate` nameable as `name` in the sources.
    ///
    /// The marker crate is known under its own name by default; call this
    /// when `Cargo.toml` renames it.
    #[must_use]
    pub fn extern_crate(mut self, name: impl Into<String>, krate: impl Into<String>) -> Self {
        self.externs.push((name.into(), krate.into()));
        self
    }

    #[must_use]
    pub fn marker(mut self, path: impl Into<String>) -> Self {
        self.config = self.config.with_marker(path);
        self
    }

    #[must_use]
    pub fn description_attribute(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.with_description_attribute(name);
        self
    }

    /// Describe the enum at `path` even though it does not carry the marker.
    #[must_use]
    pub fn register(mut self, path: impl Into<String>) -> Self {
        self.config = self.config.register(path);
        self
    }

    /// Module where the generated files are included. Defaults to `crate`.
    #[must_use]
    pub fn mount(mut self, path: impl Into<String>) -> Self {
        self.config = self.config.with_mount(path);
        self
    }

    /// Whether to print `cargo:` directives. On by default.
    #[must_use]
    pub fn cargo_directives(mut self, enabled: bool) -> Self {
        self.cargo_directives = enabled;
        self
    }

    /// Write the support file, run one pass and write the aggregate file.
    ///
    /// The support file is written before any source is read. On failure
    /// the aggregate file is left untouched.
    pub fn generate(self) -> Result<BuildReport, GenerateError> {
        let out_dir = match self.out_dir {
            Some(dir) => dir,
            None => env_path("OUT_DIR")?,
        };
        std::fs::create_dir_all(&out_dir).map_err(|err| GenerateError::io(&out_dir, err))?;

        let generator = Generator::new(self.config);
        let support = generator.post_initialization();
        let support_path = out_dir.join(support.file_name);
        write_if_changed(&support_path, &support)?;

        let root = match self.root {
            Some(root) => root,
            None => default_root()?,
        };
        let crate_name = match self.crate_name {
            Some(name) => name,
            None => std::env::var("CARGO_PKG_NAME")
                .map_err(|_| GenerateError::MissingEnv("CARGO_PKG_NAME"))?,
        };

        let mut compilation = Compilation::load(crate_name, &root)?;
        for (name, krate) in self.externs {
            compilation.add_extern(name, krate);
        }
        let inputs: Vec<PathBuf> = compilation.files().iter().map(|f| f.path.clone()).collect();
        if self.cargo_directives {
            for input in &inputs {
                println!("cargo:rerun-if-changed={}", input.display());
            }
        }

        let output = generator.generate(&compilation)?;
        let output_path = out_dir.join(output.unit.file_name);
        let written = write_if_changed(&output_path, &output.unit)?;

        if self.cargo_directives {
            for skipped in &output.skipped {
                println!("cargo:warning=enum `{}` not described: {}", skipped.path, skipped.reason);
            }
        }
        let registered = output
            .described
            .iter()
            .filter(|described| described.origin == MarkOrigin::Registered)
            .count();
        tracing::debug!(
            described = output.described.len(),
            registered,
            skipped = output.skipped.len(),
            written,
            "build pass finished"
        );

        Ok(BuildReport {
            support_path,
            output_path,
            inputs,
            output,
            written,
        })
    }
}

fn env_path(name: &'static str) -> Result<PathBuf, GenerateError> {
    std::env::var_os(name)
        .map(PathBuf::from)
        .ok_or(GenerateError::MissingEnv(name))
}

fn default_root() -> Result<PathBuf, GenerateError> {
    let src = env_path("CARGO_MANIFEST_DIR")?.join("src");
    let lib = src.join("lib.rs");
    if lib.is_file() {
        Ok(lib)
    } else {
        Ok(src.join("main.rs"))
    }
}

/// Write `unit` to `path` unless the file already holds the same bytes.
///
/// Returns whether the file was written.
pub(crate) fn write_if_changed(path: &Path, unit: &GeneratedUnit) -> Result<bool, GenerateError> {
    if std::fs::read(path).is_ok_and(|existing| existing == unit.text.as_bytes()) {
        return Ok(false);
    }
    std::fs::write(path, &unit.text).map_err(|err| GenerateError::io(path, err))?;
    Ok(true)
}
