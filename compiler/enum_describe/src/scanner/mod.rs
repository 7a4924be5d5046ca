//! Declaration scanner.
//!
//! Cheap syntactic pre-filter: walks the item tree of every file and yields
//! each enum declaration together with the module it lives in. No name
//! resolution happens here. Every enum is a candidate, since an enum without
//! attributes can still be registered through configuration; the resolver
//! decides what is actually marked.

use std::path::Path;

use crate::source::{cfg_attributes, is_cfg_test, Compilation, ModulePath};

/// An enum declaration found in the sources, not yet resolved.
#[derive(Clone)]
pub struct EnumCandidate<'a> {
    pub item: &'a syn::ItemEnum,
    /// Module the declaration appears in (inline modules included).
    pub module: ModulePath,
    /// File the declaration appears in.
    pub file: &'a Path,
    /// `cfg` attributes of the enclosing modules, then of the enum itself.
    pub cfg: Vec<String>,
}

/// Collect all enum declarations in textual order, file by file.
pub fn scan(compilation: &Compilation) -> Vec<EnumCandidate<'_>> {
    let mut candidates = Vec::new();
    for file in compilation.files() {
        scan_items(&file.ast.items, &file.module, &file.path, &file.cfg, &mut candidates);
    }
    tracing::debug!(candidates = candidates.len(), "scan complete");
    candidates
}

fn scan_items<'a>(
    items: &'a [syn::Item],
    module: &ModulePath,
    file: &'a Path,
    cfg: &[String],
    out: &mut Vec<EnumCandidate<'a>>,
) {
    for item in items {
        match item {
            syn::Item::Enum(item) => out.push(EnumCandidate {
                item,
                module: module.clone(),
                file,
                cfg: cfg.iter().cloned().chain(cfg_attributes(&item.attrs)).collect(),
            }),
            syn::Item::Mod(item_mod) if !is_cfg_test(&item_mod.attrs) => {
                if let Some((_, inner)) = &item_mod.content {
                    let inner_module = module.child(item_mod.ident.to_string());
                    let mut inner_cfg = cfg.to_vec();
                    inner_cfg.extend(cfg_attributes(&item_mod.attrs));
                    scan_items(inner, &inner_module, file, &inner_cfg, out);
                }
            }
            // Function bodies, impls and traits can declare enums too, but
            // nothing outside them can name those.
            _ => {}
        }
    }
}
