//! Source registry: every parsed module, keyed by its normalized module path.
//!
//! Filesystem modules and ambient typings (`declare module "x" { ... }`)
//! share one key space. Registration is first-write-wins, so the registry
//! only ever grows and a unit, once handed out, stays where it is.

use crate::syntax::{
    parse_module, Declaration, ExportDecl, ImportDecl, NamespaceDecl, Statement,
};
use indexmap::IndexMap;
use tracing::debug;

/// POSIX-style path normalization.
///
/// Backslashes become `/`, empty and `.` segments are dropped, `..` pops the
/// previous named segment, and a leading `/` is kept. An empty relative
/// result is `.`.
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }
    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Module path for a file: normalized, last extension stripped.
///
/// `./foo.ts` is `foo`, `./submodule/index.ts` is `submodule/index`, and
/// `types.d.ts` is `types.d`.
pub fn module_path(file: &str) -> String {
    let normalized = normalize(file);
    let (dir, base) = match normalized.rfind('/') {
        Some(i) => (&normalized[..i], &normalized[i + 1..]),
        None => ("", normalized.as_str()),
    };
    let stem = match base.rfind('.') {
        Some(i) if i > 0 => &base[..i],
        _ => base,
    };
    if normalized.starts_with('/') && dir.is_empty() {
        format!("/{}", stem)
    } else if dir.is_empty() {
        stem.to_string()
    } else {
        format!("{}/{}", dir, stem)
    }
}

/// Directory part of a module path (`""` for a top-level module).
pub fn dir_of(module: &str) -> &str {
    match module.rfind('/') {
        Some(0) => "/",
        Some(i) => &module[..i],
        None => "",
    }
}

/// Join `specifier` against the directory of `module` and normalize.
pub fn join_relative(module: &str, specifier: &str) -> String {
    let dir = dir_of(module);
    if dir.is_empty() {
        normalize(specifier)
    } else {
        normalize(&format!("{}/{}", dir, specifier))
    }
}

/// A parsed filesystem module.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUnit {
    pub path: String,
    pub statements: Vec<Statement>,
}

impl SourceUnit {
    /// Parse `text` as the module registered under `path` (already a module
    /// path, not a file name).
    pub fn parse(path: impl Into<String>, text: &str) -> Self {
        Self {
            path: path.into(),
            statements: parse_module(text),
        }
    }

    /// Top-level class or interface named `name`.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.statements
            .iter()
            .filter_map(Statement::as_declaration)
            .find(|d| d.name() == Some(name))
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Import(i) => Some(i),
            _ => None,
        })
    }

    pub fn exports(&self) -> impl Iterator<Item = &ExportDecl> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Export(e) => Some(e),
            _ => None,
        })
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceDecl> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Namespace(n) => Some(n),
            _ => None,
        })
    }
}

/// Anything a module path can resolve to.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleUnit {
    Source(SourceUnit),
    /// Top-level namespace/module declaration from a typings file.
    Ambient(NamespaceDecl),
}

impl ModuleUnit {
    /// The key this unit would be registered under.
    pub fn key(&self) -> &str {
        match self {
            ModuleUnit::Source(s) => &s.path,
            ModuleUnit::Ambient(n) => &n.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModuleUnit::Source(_) => "source",
            ModuleUnit::Ambient(_) => "ambient",
        }
    }

    /// Class or interface declared directly in this unit.
    pub fn local_declaration(&self, name: &str) -> Option<&Declaration> {
        match self {
            ModuleUnit::Source(s) => s.declaration(name),
            ModuleUnit::Ambient(n) => n.declaration(name),
        }
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    units: IndexMap<String, ModuleUnit>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register a source file. Returns the new unit, or `None` when
    /// `path` is empty or its module path is already registered (directly or
    /// through the `/index` fallback).
    pub fn add_source(&mut self, path: &str, text: &str) -> Option<&SourceUnit> {
        if path.is_empty() {
            return None;
        }
        let key = module_path(path);
        if self.lookup(&key).is_some() {
            debug!(module = %key, "source already registered; skipping");
            return None;
        }
        let unit = SourceUnit::parse(key.clone(), text);
        self.insert_new(key, ModuleUnit::Source(unit))
            .and_then(|u| match u {
                ModuleUnit::Source(s) => Some(s),
                ModuleUnit::Ambient(_) => None,
            })
    }

    /// Register a unit parsed elsewhere (the loader parses in parallel).
    /// Same first-write-wins rule as `add_source`.
    pub fn insert(&mut self, unit: SourceUnit) -> bool {
        if unit.path.is_empty() || self.lookup(&unit.path).is_some() {
            debug!(module = %unit.path, "source already registered; skipping");
            return false;
        }
        let key = unit.path.clone();
        self.insert_new(key, ModuleUnit::Source(unit)).is_some()
    }

    /// Register every top-level namespace/module declaration of a typings
    /// file under its name, quotes removed. Returns how many were new.
    pub fn add_ambient_typings(&mut self, text: &str) -> usize {
        let statements = parse_module(text);
        let mut added = 0;
        for statement in statements {
            let Statement::Namespace(mut namespace) = statement else {
                continue;
            };
            namespace.name = namespace.name.replace(['\'', '"', '`'], "");
            let key = namespace.name.clone();
            if self.units.contains_key(&key) {
                debug!(module = %key, "ambient module already registered; skipping");
                continue;
            }
            if self.insert_new(key, ModuleUnit::Ambient(namespace)).is_some() {
                added += 1;
            }
        }
        added
    }

    fn insert_new(&mut self, key: String, unit: ModuleUnit) -> Option<&ModuleUnit> {
        debug!(module = %key, kind = unit.kind(), "registered");
        let (index, _) = self.units.insert_full(key, unit);
        self.units.get_index(index).map(|(_, u)| u)
    }

    /// Exact key, then `<key>/index`.
    pub fn lookup(&self, module: &str) -> Option<&ModuleUnit> {
        self.units
            .get(module)
            .or_else(|| self.units.get(&format!("{}/index", module)))
    }

    /// Registered keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    pub fn units(&self) -> impl Iterator<Item = &ModuleUnit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("./foo/../bar//baz/./x"), "bar/baz/x");
        assert_eq!(normalize("a\\b\\c"), "a/b/c");
        assert_eq!(normalize("../../x"), "../../x");
        assert_eq!(normalize("/../x"), "/x");
        assert_eq!(normalize("./"), ".");
        assert_eq!(normalize("a/.."), ".");
    }

    #[test]
    fn test_module_path_strips_last_extension() {
        assert_eq!(module_path("./foo.ts"), "foo");
        assert_eq!(module_path("./submodule/index.ts"), "submodule/index");
        assert_eq!(module_path("./exporter"), "exporter");
        assert_eq!(module_path("typings/app.d.ts"), "typings/app.d");
        assert_eq!(module_path("/abs/x.ts"), "/abs/x");
        assert_eq!(module_path("/x.ts"), "/x");
        assert_eq!(module_path("src/.hidden"), "src/.hidden");
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join_relative("foo", "./submodule"), "submodule");
        assert_eq!(join_relative("a/b/foo", "../c"), "a/c");
        assert_eq!(join_relative("/x", "./y"), "/y");
    }

    #[test]
    fn test_add_source_is_first_write_wins() {
        let mut reg = Registry::new();
        assert!(reg.add_source("./foo.ts", "export class A {}").is_some());
        assert!(reg.add_source("foo.js", "export class B {}").is_none());
        assert_eq!(reg.len(), 1);
        let unit = reg.lookup("foo").unwrap();
        assert!(unit.local_declaration("A").is_some());
        assert!(unit.local_declaration("B").is_none());
    }

    #[test]
    fn test_empty_path_is_absent_but_empty_text_is_a_module() {
        let mut reg = Registry::new();
        assert!(reg.add_source("", "class A {}").is_none());
        assert!(reg.is_empty());
        let unit = reg.add_source("empty.ts", "").unwrap();
        assert!(unit.statements.is_empty());
        assert_eq!(reg.keys().collect::<Vec<_>>(), vec!["empty"]);
    }

    #[test]
    fn test_lookup_falls_back_to_directory_index() {
        let mut reg = Registry::new();
        reg.add_source("./submodule/index.ts", "export class Base {}");
        assert_eq!(reg.lookup("submodule").unwrap().key(), "submodule/index");
        assert_eq!(reg.lookup("submodule/index").unwrap().key(), "submodule/index");
        assert!(reg.lookup("sub").is_none());
        // A directory whose index exists counts as registered.
        assert!(reg.add_source("submodule.ts", "").is_none());
    }

    #[test]
    fn test_ambient_typings_register_each_module() {
        let mut reg = Registry::new();
        let added = reg.add_ambient_typings(
            r#"
            declare module "aurelia-binding" { export class Observer {} }
            declare module 'aurelia-templating' { export interface View {} }
            declare namespace Globals { class G {} }
            declare function helper(): void;
            "#,
        );
        assert_eq!(added, 3);
        assert_eq!(
            reg.keys().collect::<Vec<_>>(),
            vec!["aurelia-binding", "aurelia-templating", "Globals"]
        );
        let unit = reg.lookup("aurelia-binding").unwrap();
        assert_eq!(unit.kind(), "ambient");
        assert!(unit.local_declaration("Observer").is_some());

        assert_eq!(
            reg.add_ambient_typings(r#"declare module "aurelia-binding" { class Other {} }"#),
            0
        );
        assert!(reg
            .lookup("aurelia-binding")
            .unwrap()
            .local_declaration("Observer")
            .is_some());
    }

    #[test]
    fn test_insert_preparsed_unit() {
        let mut reg = Registry::new();
        assert!(reg.insert(SourceUnit::parse("src/a", "class A {}")));
        assert!(!reg.insert(SourceUnit::parse("src/a", "class B {}")));
        assert!(!reg.insert(SourceUnit::parse("", "")));
        assert_eq!(reg.len(), 1);
    }
}
