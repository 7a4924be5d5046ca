//! Marker resolver.
//!
//! Turns scanned candidates into [`MarkedEnumType`]s. An enum is marked when
//! one of its `#[derive(...)]` paths resolves to the same symbol as the
//! configured marker, or when configuration registers it by path. Symbols
//! are compared by canonical identity, never by display name, so an
//! unrelated `GenerateEnumDescription` from another crate does not match.

mod symbols;

use std::fmt;

use rustc_hash::FxHashSet;
use syn::punctuated::Punctuated;

use crate::config::{parse_path, GeneratorConfig};
use crate::error::GenerateError;
use crate::scanner::EnumCandidate;
use crate::source::Compilation;

pub use symbols::{PathRoot, SymbolPath, SymbolTable};

/// The resolved opt-in marker and override attribute for one pass.
#[derive(Clone, Debug)]
pub struct MarkerSymbols {
    pub marker: SymbolPath,
    pub description_attribute: String,
}

impl MarkerSymbols {
    /// Resolve the configured marker and override attribute.
    ///
    /// Failing here aborts the pass: with an unresolved marker no enum can be
    /// matched correctly.
    pub fn resolve(
        table: &SymbolTable,
        compilation: &Compilation,
        config: &GeneratorConfig,
    ) -> Result<Self, GenerateError> {
        let path = parse_path(&config.marker, "marker")?;
        let marker = table.resolve_qualified(&path).ok_or_else(|| {
            GenerateError::UnresolvedMarker {
                path: config.marker.clone(),
                krate: compilation.crate_name().to_string(),
            }
        })?;

        // Derive helpers are inert names scoped to the derive, so resolving
        // one means checking it is a usable attribute name.
        syn::parse_str::<syn::Ident>(&config.description_attribute).map_err(|_| {
            GenerateError::UnresolvedSymbol {
                path: config.description_attribute.clone(),
                expected: "an attribute name",
            }
        })?;

        tracing::debug!(%marker, attribute = %config.description_attribute, "marker resolved");
        Ok(MarkerSymbols {
            marker,
            description_attribute: config.description_attribute.clone(),
        })
    }
}

/// How an enum opted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkOrigin {
    /// Carries the marker derive.
    Derive,
    /// Listed in the configuration.
    Registered,
}

/// An enum that carries the marker. Checked once here, trusted downstream.
#[derive(Clone)]
pub struct MarkedEnumType<'a> {
    pub path: SymbolPath,
    pub item: &'a syn::ItemEnum,
    pub origin: MarkOrigin,
    /// `cfg` attributes the enum only exists under, including those of its
    /// enclosing modules.
    pub cfg: Vec<String>,
}

/// Why a marked enum produced no lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The enum or one of its modules is not visible from the crate root, so
    /// generated code cannot name it.
    NotNameable,
    /// Another declaration already claimed this path under the same `cfg`.
    Duplicate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotNameable => {
                f.write_str("not visible from the crate root; make it and its modules at least `pub(crate)`")
            }
            SkipReason::Duplicate => {
                f.write_str("declared more than once under the same `cfg`; only the first is described")
            }
        }
    }
}

/// A marked enum left out of the generated unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEnum {
    pub path: SymbolPath,
    pub reason: SkipReason,
}

/// Resolver output: marked enums in scan order, plus what was skipped.
pub struct Resolved<'a> {
    pub marked: Vec<MarkedEnumType<'a>>,
    pub skipped: Vec<SkippedEnum>,
}

/// Resolve configured registrations to canonical enum paths.
pub fn resolve_registrations(
    table: &SymbolTable,
    config: &GeneratorConfig,
) -> Result<Vec<SymbolPath>, GenerateError> {
    config
        .registered
        .iter()
        .map(|text| {
            let path = parse_path(text, "registered enum")?;
            table
                .resolve_qualified(&path)
                .filter(|symbol| *symbol.root() == PathRoot::Local)
                .ok_or_else(|| unresolved_registration(text))
        })
        .collect()
}

/// Keep the candidates that carry the marker or are registered.
///
/// Every registration must match a scanned enum, otherwise the pass fails.
pub fn resolve_candidates<'a>(
    table: &SymbolTable,
    candidates: Vec<EnumCandidate<'a>>,
    markers: &MarkerSymbols,
    registered: &[SymbolPath],
) -> Result<Resolved<'a>, GenerateError> {
    let mut marked = Vec::new();
    let mut skipped = Vec::new();
    let mut seen = FxHashSet::default();
    let mut matched_registrations = FxHashSet::default();

    for candidate in candidates {
        let path = SymbolPath::local(&candidate.module, candidate.item.ident.to_string());
        let is_registered = registered.contains(&path);
        if is_registered {
            matched_registrations.insert(path.clone());
        }

        let origin = if carries_marker(table, &candidate, &markers.marker) {
            MarkOrigin::Derive
        } else if is_registered {
            MarkOrigin::Registered
        } else {
            tracing::trace!(%path, "not marked");
            continue;
        };

        // `cfg` alternatives share a path but never coexist in one build.
        let key = (path.clone(), candidate.cfg.clone());
        let reason = if seen.contains(&key) {
            Some(SkipReason::Duplicate)
        } else if !is_nameable(table, &candidate) {
            Some(SkipReason::NotNameable)
        } else {
            None
        };
        if let Some(reason) = reason {
            tracing::warn!(%path, file = %candidate.file.display(), %reason, "skipping marked enum");
            skipped.push(SkippedEnum { path, reason });
            continue;
        }

        tracing::debug!(%path, ?origin, cfg = ?candidate.cfg, "enum marked");
        seen.insert(key);
        marked.push(MarkedEnumType {
            path,
            item: candidate.item,
            origin,
            cfg: candidate.cfg,
        });
    }

    if let Some(missing) = registered
        .iter()
        .find(|path| !matched_registrations.contains(*path))
    {
        return Err(unresolved_registration(&missing.to_string()));
    }

    Ok(Resolved { marked, skipped })
}

/// Whether any `#[derive(...)]` path on the candidate resolves to `marker`.
fn carries_marker(table: &SymbolTable, candidate: &EnumCandidate<'_>, marker: &SymbolPath) -> bool {
    candidate
        .item
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<syn::Path, syn::Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .any(|path| table.resolve(&candidate.module, &path).as_ref() == Some(marker))
}

/// Whether code included at the crate root can name the candidate.
fn is_nameable(table: &SymbolTable, candidate: &EnumCandidate<'_>) -> bool {
    symbols::is_visible_from_root(&candidate.module, &candidate.item.vis)
        && table.is_reachable_from_root(&candidate.module)
}

fn unresolved_registration(path: &str) -> GenerateError {
    GenerateError::UnresolvedSymbol {
        path: path.to_string(),
        expected: "an enum declared in this crate",
    }
}
