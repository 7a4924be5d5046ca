//! Symbol table and path resolution.
//!
//! Paths resolve the way Rust 2018 resolves them: a leading `::` names an
//! extern crate, `crate`/`self`/`super` are anchors, and any other first
//! segment is looked up in the module's scope and then in the extern
//! prelude. Import chains are followed until they reach a declaration, so
//! two spellings of the same item always produce the same [`SymbolPath`].

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::source::{Compilation, ModulePath};

/// Bound on nested import/glob hops. Anything deeper is treated as a cycle.
const MAX_IMPORT_DEPTH: usize = 16;

/// Crate a canonical path starts from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathRoot {
    /// The crate being generated for.
    Local,
    /// An extern crate, by identity (not by the name it is used under).
    Extern(String),
}

/// Canonical identity of an item: its crate plus its path inside it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolPath {
    root: PathRoot,
    segments: Vec<String>,
}

impl SymbolPath {
    /// Path of the item `name` declared in `module` of the local crate.
    pub fn local(module: &ModulePath, name: impl Into<String>) -> Self {
        let mut segments = module.segments().to_vec();
        segments.push(name.into());
        SymbolPath {
            root: PathRoot::Local,
            segments,
        }
    }

    fn extern_root(krate: &str) -> Self {
        SymbolPath {
            root: PathRoot::Extern(krate.to_string()),
            segments: Vec::new(),
        }
    }

    #[must_use]
    fn child(mut self, name: &str) -> Self {
        self.segments.push(name.to_string());
        self
    }

    pub fn root(&self) -> &PathRoot {
        &self.root
    }

    fn is_extern(&self) -> bool {
        matches!(self.root, PathRoot::Extern(_))
    }
}

impl fmt::Display for SymbolPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            PathRoot::Local => f.write_str("crate")?,
            PathRoot::Extern(krate) => f.write_str(krate)?,
        }
        for segment in &self.segments {
            write!(f, "::{segment}")?;
        }
        Ok(())
    }
}

/// What a path resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Target {
    Module(ModulePath),
    Symbol(SymbolPath),
}

/// A `use` path as written, relative to the module declaring it.
#[derive(Clone, Debug)]
struct Import {
    segments: Vec<String>,
    leading_colon: bool,
}

/// Names bound directly in one module.
#[derive(Default)]
struct ModuleScope {
    items: FxHashSet<String>,
    modules: FxHashSet<String>,
    imports: FxHashMap<String, Import>,
    globs: Vec<Import>,
}

/// State threaded through one resolution query.
struct Hop<'q, 'n> {
    /// Import hops taken so far.
    depth: usize,
    /// Import that must not resolve through itself (`use a::b as b;`).
    skip_import: Option<&'n str>,
    /// Module/name pairs whose globs were already searched.
    searched: &'q mut FxHashSet<(ModulePath, String)>,
}

impl<'q> Hop<'q, '_> {
    fn start(searched: &'q mut FxHashSet<(ModulePath, String)>) -> Self {
        Hop {
            depth: 0,
            skip_import: None,
            searched,
        }
    }

    fn next(depth: usize, searched: &'q mut FxHashSet<(ModulePath, String)>) -> Self {
        Hop {
            depth: depth + 1,
            skip_import: None,
            searched,
        }
    }
}

/// Per-pass symbol table over every module of a compilation.
pub struct SymbolTable {
    scopes: FxHashMap<ModulePath, ModuleScope>,
    /// Modules that cannot be named from the crate root.
    private_modules: FxHashSet<ModulePath>,
    externs: FxHashMap<String, String>,
}

impl SymbolTable {
    pub fn build(compilation: &Compilation) -> Self {
        let mut table = SymbolTable {
            scopes: FxHashMap::default(),
            private_modules: FxHashSet::default(),
            externs: compilation
                .externs()
                .map(|(name, krate)| (name.to_string(), krate.to_string()))
                .collect(),
        };
        for file in compilation.files() {
            table.add_items(&file.ast.items, &file.module);
        }
        tracing::trace!(modules = table.scopes.len(), "symbol table built");
        table
    }

    /// Resolve a path written in `module` to a canonical item path.
    ///
    /// Returns `None` for unresolvable paths and for paths naming modules.
    pub fn resolve(&self, module: &ModulePath, path: &syn::Path) -> Option<SymbolPath> {
        let segments: Vec<String> = path
            .segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect();
        let mut searched = FxHashSet::default();
        let target = self.resolve_segments(
            module,
            &segments,
            path.leading_colon.is_some(),
            Hop::start(&mut searched),
        )?;
        match target {
            Target::Symbol(symbol) => Some(symbol),
            Target::Module(_) => None,
        }
    }

    /// Resolve a fully-qualified path from configuration.
    ///
    /// Unlike source paths, these name extern crates by identity, so a crate
    /// renamed in `Cargo.toml` is still found under its real name.
    pub fn resolve_qualified(&self, path: &syn::Path) -> Option<SymbolPath> {
        let (first, rest) = split_first_segment(path)?;
        if self.externs.values().any(|krate| *krate == first) {
            let symbol = rest
                .iter()
                .fold(SymbolPath::extern_root(&first), |symbol, segment| {
                    symbol.child(segment)
                });
            return Some(symbol);
        }
        self.resolve(&ModulePath::root(), path)
    }

    /// Whether generated code at the crate root can name items inside `module`.
    ///
    /// Every module on the way down must be visible from the root.
    pub fn is_reachable_from_root(&self, module: &ModulePath) -> bool {
        let mut current = module.clone();
        while let Some(parent) = current.parent() {
            if self.private_modules.contains(&current) {
                return false;
            }
            current = parent;
        }
        true
    }

    fn add_items(&mut self, items: &[syn::Item], module: &ModulePath) {
        let mut scope = ModuleScope::default();
        for item in items {
            match item {
                syn::Item::Mod(item_mod) => {
                    let name = item_mod.ident.to_string();
                    let child = module.child(&name);
                    if !is_visible_from_root(module, &item_mod.vis) {
                        self.private_modules.insert(child.clone());
                    }
                    if let Some((_, inner)) = &item_mod.content {
                        self.add_items(inner, &child);
                    }
                    scope.modules.insert(name);
                }
                syn::Item::Use(item_use) => {
                    flatten_use(
                        &item_use.tree,
                        &mut Vec::new(),
                        item_use.leading_colon.is_some(),
                        &mut scope,
                    );
                }
                syn::Item::ExternCrate(ext) => {
                    let name = ext.rename.as_ref().map_or(&ext.ident, |(_, r)| r);
                    if ext.ident == "self" {
                        if name != "_" {
                            scope.imports.insert(
                                name.to_string(),
                                Import {
                                    segments: vec!["crate".to_string()],
                                    leading_colon: false,
                                },
                            );
                        }
                        continue;
                    }
                    let krate = ext.ident.to_string();
                    let identity = self
                        .externs
                        .get(&krate)
                        .cloned()
                        .unwrap_or_else(|| krate.clone());
                    // `extern crate` at the root also extends the extern prelude.
                    if module.is_root() && name != "_" {
                        self.externs.insert(name.to_string(), identity.clone());
                    }
                    self.externs.entry(krate.clone()).or_insert(identity);
                    if name != "_" {
                        scope.imports.insert(
                            name.to_string(),
                            Import {
                                segments: vec![krate],
                                leading_colon: true,
                            },
                        );
                    }
                }
                other => {
                    if let Some(ident) = item_ident(other) {
                        scope.items.insert(ident.to_string());
                    }
                }
            }
        }
        // In-memory sources may contribute several files to one module.
        let existing = self.scopes.entry(module.clone()).or_default();
        existing.items.extend(scope.items);
        existing.modules.extend(scope.modules);
        existing.imports.extend(scope.imports);
        existing.globs.extend(scope.globs);
    }

    fn resolve_segments(
        &self,
        from: &ModulePath,
        segments: &[String],
        leading_colon: bool,
        hop: Hop<'_, '_>,
    ) -> Option<Target> {
        if hop.depth > MAX_IMPORT_DEPTH {
            tracing::trace!(%from, ?segments, "import chain too deep, treating as unresolved");
            return None;
        }
        let Hop {
            depth,
            skip_import,
            searched,
        } = hop;
        let (first, rest) = segments.split_first()?;
        let mut current = if leading_colon {
            self.extern_root(first)?
        } else {
            match first.as_str() {
                "crate" => Target::Module(ModulePath::root()),
                "self" => Target::Module(from.clone()),
                "super" => Target::Module(from.parent()?),
                _ => self
                    .lookup(
                        from,
                        first,
                        Hop {
                            depth,
                            skip_import,
                            searched: &mut *searched,
                        },
                    )
                    .or_else(|| self.extern_root(first))?,
            }
        };
        for segment in rest {
            current = match current {
                Target::Module(module) if segment == "super" => Target::Module(module.parent()?),
                Target::Module(module) => self.lookup(
                    &module,
                    segment,
                    Hop {
                        depth,
                        skip_import: None,
                        searched: &mut *searched,
                    },
                )?,
                Target::Symbol(symbol) => Target::Symbol(symbol.child(segment)),
            };
        }
        Some(current)
    }

    /// Look `name` up in one module: items, child modules, imports, globs.
    fn lookup(&self, module: &ModulePath, name: &str, hop: Hop<'_, '_>) -> Option<Target> {
        let scope = self.scopes.get(module)?;
        if scope.items.contains(name) {
            return Some(Target::Symbol(SymbolPath::local(module, name)));
        }
        if scope.modules.contains(name) {
            return Some(Target::Module(module.child(name)));
        }
        let Hop {
            depth,
            skip_import,
            searched,
        } = hop;
        if skip_import != Some(name) {
            if let Some(import) = scope.imports.get(name) {
                return self.resolve_segments(
                    module,
                    &import.segments,
                    import.leading_colon,
                    Hop {
                        depth: depth + 1,
                        skip_import: Some(name),
                        searched,
                    },
                );
            }
        }

        // Each (module, name) pair is glob-searched at most once per query.
        if !searched.insert((module.clone(), name.to_string())) {
            return None;
        }

        // Extern crates cannot be enumerated, so an extern glob can only
        // guess. Known extern crate names win over that guess.
        let mut extern_guess = None;
        for glob in &scope.globs {
            let target = self.resolve_segments(
                module,
                &glob.segments,
                glob.leading_colon,
                Hop::next(depth, &mut *searched),
            );
            match target {
                Some(Target::Module(target)) => {
                    let found = self.lookup(&target, name, Hop::next(depth, &mut *searched));
                    if found.is_some() {
                        return found;
                    }
                }
                Some(Target::Symbol(symbol)) if symbol.is_extern() && extern_guess.is_none() => {
                    extern_guess = Some(symbol.child(name));
                }
                _ => {}
            }
        }
        if self.externs.contains_key(name) {
            return None;
        }
        extern_guess.map(Target::Symbol)
    }

    fn extern_root(&self, name: &str) -> Option<Target> {
        self.externs
            .get(name)
            .map(|krate| Target::Symbol(SymbolPath::extern_root(krate)))
    }
}

/// Flatten a `use` tree into named imports and globs.
fn flatten_use(
    tree: &syn::UseTree,
    prefix: &mut Vec<String>,
    leading_colon: bool,
    scope: &mut ModuleScope,
) {
    match tree {
        syn::UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            flatten_use(&path.tree, prefix, leading_colon, scope);
            prefix.pop();
        }
        syn::UseTree::Name(name) => {
            let (binding, segments) = if name.ident == "self" {
                (prefix.last().cloned(), prefix.clone())
            } else {
                let mut segments = prefix.clone();
                segments.push(name.ident.to_string());
                (Some(name.ident.to_string()), segments)
            };
            if let Some(binding) = binding {
                scope.imports.insert(
                    binding,
                    Import {
                        segments,
                        leading_colon,
                    },
                );
            }
        }
        syn::UseTree::Rename(rename) => {
            if rename.rename == "_" {
                return;
            }
            let mut segments = prefix.clone();
            if rename.ident != "self" {
                segments.push(rename.ident.to_string());
            }
            scope.imports.insert(
                rename.rename.to_string(),
                Import {
                    segments,
                    leading_colon,
                },
            );
        }
        syn::UseTree::Glob(_) => scope.globs.push(Import {
            segments: prefix.clone(),
            leading_colon,
        }),
        syn::UseTree::Group(group) => {
            for tree in &group.items {
                flatten_use(tree, prefix, leading_colon, scope);
            }
        }
    }
}

fn split_first_segment(path: &syn::Path) -> Option<(String, Vec<String>)> {
    let mut segments = path.segments.iter().map(|s| s.ident.to_string());
    let first = segments.next()?;
    Some((first, segments.collect()))
}

/// Name an item binds in its module, if any.
fn item_ident(item: &syn::Item) -> Option<&syn::Ident> {
    match item {
        syn::Item::Const(i) => Some(&i.ident),
        syn::Item::Enum(i) => Some(&i.ident),
        syn::Item::Fn(i) => Some(&i.sig.ident),
        syn::Item::Macro(i) => i.ident.as_ref(),
        syn::Item::Static(i) => Some(&i.ident),
        syn::Item::Struct(i) => Some(&i.ident),
        syn::Item::Trait(i) => Some(&i.ident),
        syn::Item::TraitAlias(i) => Some(&i.ident),
        syn::Item::Type(i) => Some(&i.ident),
        syn::Item::Union(i) => Some(&i.ident),
        _ => None,
    }
}

/// Whether an item declared in `module` with `vis` can be named from the
/// crate root.
///
/// `pub(crate)` always can; `pub(super)`, `pub(in ..)`, `pub(self)` and
/// no visibility only when the module they restrict to is the root.
pub(crate) fn is_visible_from_root(module: &ModulePath, vis: &syn::Visibility) -> bool {
    match vis {
        syn::Visibility::Public(_) => true,
        syn::Visibility::Inherited => module.is_root(),
        syn::Visibility::Restricted(restricted) => {
            restricted_scope(module, &restricted.path).is_some_and(|scope| scope.is_root())
        }
    }
}

/// Module a `pub(in path)` restriction written in `module` refers to.
fn restricted_scope(module: &ModulePath, path: &syn::Path) -> Option<ModulePath> {
    let mut segments = path.segments.iter().map(|s| s.ident.to_string());
    let mut scope = match segments.next()?.as_str() {
        "crate" => ModulePath::root(),
        "self" => module.clone(),
        "super" => module.parent()?,
        _ => return None,
    };
    for segment in segments {
        scope = if segment == "super" {
            scope.parent()?
        } else {
            scope.child(segment)
        };
    }
    Some(scope)
}
