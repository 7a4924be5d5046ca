//! Crate sources: the compilation a pass runs over.
//!
//! A [`Compilation`] is the parsed module tree of one crate plus the extern
//! crates its code may name. It is either loaded from disk by following
//! `mod` declarations from the crate root, the same way rustc finds module
//! files, or assembled in memory file by file.

use std::fmt;
use std::path::{Path, PathBuf};

use quote::ToTokens;
use rustc_hash::FxHashMap;

use crate::error::GenerateError;

/// Path of a module relative to the crate root. Empty for the root itself.
///
/// Segments keep their source spelling, raw identifiers included.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    /// The crate root module.
    pub fn root() -> Self {
        ModulePath::default()
    }

    /// Parse `crate::a::b`, `a::b` or `crate`.
    pub fn parse(text: &str) -> Self {
        let segments = text
            .split("::")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .skip_while(|s| *s == "crate")
            .map(str::to_string)
            .collect();
        ModulePath { segments }
    }

    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        ModulePath { segments }
    }

    /// The enclosing module, or `None` at the crate root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(ModulePath {
            segments: rest.to_vec(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("crate")?;
        for segment in &self.segments {
            write!(f, "::{segment}")?;
        }
        Ok(())
    }
}

/// One parsed file of the crate.
pub struct SourceFile {
    /// Where the text came from (used in diagnostics and rerun directives).
    pub path: PathBuf,
    /// Module this file defines.
    pub module: ModulePath,
    /// `cfg` attributes gating the module, outermost first: those on every
    /// enclosing `mod` declaration, then the file's own `#![cfg(..)]`.
    pub cfg: Vec<String>,
    pub ast: syn::File,
}

/// The parsed crate a generation pass runs over.
pub struct Compilation {
    crate_name: String,
    files: Vec<SourceFile>,
    /// Name visible in source -> crate identity.
    externs: FxHashMap<String, String>,
}

impl Compilation {
    /// An empty compilation for the crate called `crate_name`.
    pub fn new(crate_name: impl Into<String>) -> Self {
        Compilation {
            crate_name: crate_name.into().replace('-', "_"),
            files: Vec::new(),
            externs: FxHashMap::default(),
        }
    }

    /// Load a crate from disk, starting at its root file.
    ///
    /// Out-of-line modules are followed recursively. A module whose file is
    /// missing is skipped with a warning; a file that fails to parse aborts.
    pub fn load(
        crate_name: impl Into<String>,
        root: impl AsRef<Path>,
    ) -> Result<Self, GenerateError> {
        let mut compilation = Compilation::new(crate_name);
        let root = root.as_ref();
        let dir = root.parent().map(Path::to_path_buf).unwrap_or_default();
        compilation.load_file(root.to_path_buf(), ModulePath::root(), dir, Vec::new())?;
        tracing::debug!(
            krate = %compilation.crate_name,
            files = compilation.files.len(),
            "crate loaded"
        );
        Ok(compilation)
    }

    /// Add a file's text as the body of `module`.
    ///
    /// `mod name;` declarations inside it are not followed; add those files
    /// separately. Only the file's own `#![cfg(..)]` attributes gate it.
    pub fn add_source(
        &mut self,
        module: ModulePath,
        path: impl Into<PathBuf>,
        text: &str,
    ) -> Result<(), GenerateError> {
        let path = path.into();
        let ast = syn::parse_file(text).map_err(|err| GenerateError::parse(&path, &err))?;
        let cfg = cfg_attributes(&ast.attrs).collect();
        self.files.push(SourceFile {
            path,
            module,
            cfg,
            ast,
        });
        Ok(())
    }

    /// Make an extern crate nameable as `name`.
    pub fn add_extern(&mut self, name: impl Into<String>, krate: impl Into<String>) {
        self.externs
            .insert(name.into().replace('-', "_"), krate.into().replace('-', "_"));
    }

    /// Builder-style [`add_extern`](Self::add_extern) for a crate under its own name.
    #[must_use]
    pub fn with_extern(mut self, name: &str) -> Self {
        self.add_extern(name, name);
        self
    }

    pub fn crate_name(&self) -> &str {
        &self.crate_name
    }

    /// Files in load order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Crate identity for a name used in source, if it is an extern.
    pub fn extern_crate(&self, name: &str) -> Option<&str> {
        self.externs.get(name).map(String::as_str)
    }

    /// `(name, crate identity)` pairs of every known extern crate.
    pub fn externs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.externs
            .iter()
            .map(|(name, krate)| (name.as_str(), krate.as_str()))
    }

    fn load_file(
        &mut self,
        path: PathBuf,
        module: ModulePath,
        child_dir: PathBuf,
        mut cfg: Vec<String>,
    ) -> Result<(), GenerateError> {
        let text = std::fs::read_to_string(&path).map_err(|err| GenerateError::io(&path, err))?;
        let ast = syn::parse_file(&text).map_err(|err| GenerateError::parse(&path, &err))?;
        cfg.extend(cfg_attributes(&ast.attrs));

        let mut pending = Vec::new();
        collect_out_of_line(&ast.items, &module, &child_dir, &cfg, &mut pending);
        tracing::trace!(path = %path.display(), %module, "parsed module file");
        self.files.push(SourceFile {
            path,
            module,
            cfg,
            ast,
        });

        for PendingModule {
            module,
            candidates,
            cfg,
        } in pending
        {
            let Some(found) = candidates.iter().find(|p| p.is_file()) else {
                tracing::warn!(
                    %module,
                    tried = ?candidates,
                    "module file not found, skipping"
                );
                continue;
            };
            let found = found.clone();
            let child_dir = module_dir(&found, module.segments().last().map(String::as_str));
            self.load_file(found, module, child_dir, cfg)?;
        }
        Ok(())
    }
}

/// An out-of-line `mod name;` awaiting its file.
struct PendingModule {
    module: ModulePath,
    candidates: Vec<PathBuf>,
    /// `cfg` attributes of the declaration and everything enclosing it.
    cfg: Vec<String>,
}

/// Collect `mod name;` declarations, descending into inline modules.
///
/// `dir` is where child module files of `module` live; `cfg` gates `module`.
fn collect_out_of_line(
    items: &[syn::Item],
    module: &ModulePath,
    dir: &Path,
    cfg: &[String],
    out: &mut Vec<PendingModule>,
) {
    for item in items {
        let syn::Item::Mod(item_mod) = item else {
            continue;
        };
        if is_cfg_test(&item_mod.attrs) {
            continue;
        }
        let name = item_mod.ident.to_string();
        let child = module.child(&name);
        let file_name = unraw(&name);
        let path_attr = path_attribute(&item_mod.attrs);
        let mut child_cfg = cfg.to_vec();
        child_cfg.extend(cfg_attributes(&item_mod.attrs));

        match &item_mod.content {
            Some((_, inner)) => {
                let inner_dir = match path_attr {
                    Some(p) => dir.join(p),
                    None => dir.join(&file_name),
                };
                collect_out_of_line(inner, &child, &inner_dir, &child_cfg, out);
            }
            None => {
                let candidates = match path_attr {
                    Some(p) => vec![dir.join(p)],
                    None => vec![
                        dir.join(format!("{file_name}.rs")),
                        dir.join(&file_name).join("mod.rs"),
                    ],
                };
                out.push(PendingModule {
                    module: child,
                    candidates,
                    cfg: child_cfg,
                });
            }
        }
    }
}

/// Directory holding the child modules of the module defined by `file`.
///
/// `mod.rs` files own their directory; any other file `foo.rs` owns `foo/`.
fn module_dir(file: &Path, module_name: Option<&str>) -> PathBuf {
    let parent = file.parent().map(Path::to_path_buf).unwrap_or_default();
    let is_mod_rs = file.file_name().is_some_and(|n| n == "mod.rs");
    match module_name {
        Some(_) if !is_mod_rs => match file.file_stem() {
            Some(stem) => parent.join(stem),
            None => parent,
        },
        _ => parent,
    }
}

/// Value of a `#[path = "..."]` attribute.
fn path_attribute(attrs: &[syn::Attribute]) -> Option<String> {
    attrs.iter().find_map(|attr| {
        if !attr.path().is_ident("path") {
            return None;
        }
        let syn::Meta::NameValue(nv) = &attr.meta else {
            return None;
        };
        match &nv.value {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(s),
                ..
            }) => Some(s.value()),
            _ => None,
        }
    })
}

/// Whether `attrs` contain `#[cfg(test)]`.
pub(crate) fn is_cfg_test(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg")
            && attr
                .parse_args::<syn::Ident>()
                .is_ok_and(|ident| ident == "test")
    })
}

/// `cfg` attributes among `attrs`, rendered as outer attributes.
///
/// Predicates cannot be evaluated here, so they are carried over verbatim
/// onto whatever is generated for the item.
pub(crate) fn cfg_attributes(attrs: &[syn::Attribute]) -> impl Iterator<Item = String> + '_ {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("cfg"))
        .map(|attr| format!("#[{}]", attr.meta.to_token_stream()))
}

/// Identifier text without a leading `r#`.
pub(crate) fn unraw(name: &str) -> String {
    name.strip_prefix("r#").unwrap_or(name).to_string()
}

#[cfg(test)]
mod tests;
