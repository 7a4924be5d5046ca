//! One generation pass: scan, resolve, extract, emit.

use std::fmt;

use crate::config::GeneratorConfig;
use crate::emit::{render_descriptions, render_support, GeneratedUnit};
use crate::error::GenerateError;
use crate::extract::members;
use crate::resolve::{
    resolve_candidates, resolve_registrations, MarkOrigin, MarkedEnumType, MarkerSymbols,
    SkippedEnum, SymbolPath, SymbolTable,
};
use crate::scanner::scan;
use crate::source::Compilation;

/// Result of a successful pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationOutput {
    /// The aggregate unit, present even when nothing was marked.
    pub unit: GeneratedUnit,
    /// Enums that received a lookup, in emission order.
    pub described: Vec<DescribedEnum>,
    /// Marked enums left out, with the reason.
    pub skipped: Vec<SkippedEnum>,
}

/// An enum that received a lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescribedEnum {
    pub path: SymbolPath,
    pub origin: MarkOrigin,
    /// `cfg` attributes gating its impls.
    pub cfg: Vec<String>,
}

impl From<&MarkedEnumType<'_>> for DescribedEnum {
    fn from(ty: &MarkedEnumType<'_>) -> Self {
        DescribedEnum {
            path: ty.path.clone(),
            origin: ty.origin,
            cfg: ty.cfg.clone(),
        }
    }
}

impl fmt::Display for DescribedEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}

/// Stateless driver for generation passes.
///
/// Passes share nothing, so one generator may run any number of them,
/// from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Generator { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The fixed support unit, available before any source is seen.
    pub fn post_initialization(&self) -> GeneratedUnit {
        render_support()
    }

    /// Run one pass over `compilation`.
    ///
    /// Any error aborts the pass before emission, so there is never a
    /// partial unit.
    #[tracing::instrument(level = "debug", skip_all, fields(krate = compilation.crate_name()))]
    pub fn generate(&self, compilation: &Compilation) -> Result<GenerationOutput, GenerateError> {
        self.config.validate()?;

        let table = SymbolTable::build(compilation);
        let markers = MarkerSymbols::resolve(&table, compilation, &self.config)?;
        let registered = resolve_registrations(&table, &self.config)?;

        let resolved = resolve_candidates(&table, scan(compilation), &markers, &registered)?;

        let attribute = markers.description_attribute.as_str();
        let unit = render_descriptions(
            &self.config.mount,
            resolved
                .marked
                .iter()
                .map(|ty| (ty, members(ty, attribute))),
        );
        let described = resolved.marked.iter().map(DescribedEnum::from).collect();

        Ok(GenerationOutput {
            unit,
            described,
            skipped: resolved.skipped,
        })
    }
}
