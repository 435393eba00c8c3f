//! Declaration lookup across modules.
//!
//! `Resolver::resolve` answers "which class or interface does this name
//! refer to, seen from this module?". A name declared in the module itself
//! always wins. Otherwise the search depends on the mode:
//!
//! - base search (`is_base = true`) follows the module's own `import`s,
//!   stripping generic arguments and applying path mappings;
//! - export search (`is_base = false`) follows `export * from` and
//!   `export { Name } from` re-exports, first success wins.
//!
//! Every hop into another module continues as an export search.

use crate::alias::PathMappings;
use crate::registry::{join_relative, ModuleUnit, Registry, SourceUnit};
use crate::syntax::{Declaration, ExportClause, Heritage, Member, TypeNode};
use crate::types;
use std::collections::HashSet;
use tracing::trace;

/// A declaration together with the unit it was found in.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'r> {
    pub module: &'r ModuleUnit,
    pub declaration: &'r Declaration,
}

/// A member found on a declaration or one of its bases.
#[derive(Debug, Clone, Copy)]
pub struct FoundMember<'r> {
    pub member: &'r Member,
    /// Declaration that declares the member (may be a base).
    pub owner: Resolved<'r>,
}

type Visited<'r> = HashSet<(&'r str, String, bool)>;

/// Read-only view over a populated registry.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r Registry,
    mappings: &'r PathMappings,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r Registry, mappings: &'r PathMappings) -> Self {
        Self { registry, mappings }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Find the declaration `type_name` refers to from `unit`.
    pub fn resolve(
        &self,
        unit: &'r ModuleUnit,
        type_name: &str,
        is_base: bool,
    ) -> Option<Resolved<'r>> {
        let mut visited = Visited::new();
        self.locate(unit, type_name, is_base, &mut visited)
    }

    /// Look `module` up in the registry and resolve from there.
    pub fn resolve_in(&self, module: &str, type_name: &str) -> Option<Resolved<'r>> {
        let unit = self.registry.lookup(module)?;
        self.resolve(unit, type_name, true)
    }

    fn locate(
        &self,
        unit: &'r ModuleUnit,
        type_name: &str,
        is_base: bool,
        visited: &mut Visited<'r>,
    ) -> Option<Resolved<'r>> {
        if type_name.is_empty() {
            return None;
        }
        if !visited.insert((unit.key(), type_name.to_string(), is_base)) {
            trace!(module = unit.key(), type_name, is_base, "already searched");
            return None;
        }

        if let Some(declaration) = unit.local_declaration(type_name) {
            trace!(module = unit.key(), type_name, "local declaration");
            return Some(Resolved {
                module: unit,
                declaration,
            });
        }

        let ModuleUnit::Source(source) = unit else {
            return None;
        };
        if is_base {
            self.from_imports(source, type_name, visited)
        } else {
            self.from_exports(unit, source, type_name, visited)
        }
    }

    fn from_imports(
        &self,
        source: &'r SourceUnit,
        type_name: &str,
        visited: &mut Visited<'r>,
    ) -> Option<Resolved<'r>> {
        let name = type_name.split_once('<').map_or(type_name, |(head, _)| head);
        let (import, element) = source.imports().find_map(|import| {
            import
                .named_elements()
                .iter()
                .find(|e| e.name == name)
                .map(|e| (import, e))
        })?;

        let target = self
            .mappings
            .apply(&specifier_target(&source.path, &import.specifier));
        let Some(next) = self.registry.lookup(&target) else {
            trace!(module = %source.path, type_name = name, target = %target, "import target not registered");
            return None;
        };
        trace!(module = %source.path, type_name = name, target = next.key(), "following import");
        self.locate(next, element.imported_name(), false, visited)
    }

    fn from_exports(
        &self,
        unit: &'r ModuleUnit,
        source: &'r SourceUnit,
        type_name: &str,
        visited: &mut Visited<'r>,
    ) -> Option<Resolved<'r>> {
        for export in source.exports() {
            let local = match &export.clause {
                None => type_name,
                Some(ExportClause::Named(elements)) => {
                    match elements.iter().find(|e| e.name == type_name) {
                        Some(element) => element.local_name(),
                        None => continue,
                    }
                }
                Some(ExportClause::Namespace(_)) => continue,
            };

            let found = match &export.specifier {
                Some(specifier) => {
                    let target = specifier_target(&source.path, specifier);
                    let Some(next) = self.registry.lookup(&target) else {
                        trace!(module = %source.path, target = %target, "export target not registered");
                        continue;
                    };
                    trace!(module = %source.path, type_name, target = next.key(), "following re-export");
                    self.locate(next, local, false, visited)
                }
                // `export { X };` re-exports a local binding, possibly an import.
                None if export.clause.is_some() => self.locate(unit, local, true, visited),
                None => None,
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Find member `name` on `resolved`, then on its bases in heritage order.
    pub fn find_member(&self, resolved: Resolved<'r>, name: &str) -> Option<FoundMember<'r>> {
        let mut seen = HashSet::new();
        self.member_in(resolved, name, &mut seen)
    }

    fn member_in(
        &self,
        owner: Resolved<'r>,
        name: &str,
        seen: &mut HashSet<*const Declaration>,
    ) -> Option<FoundMember<'r>> {
        if !seen.insert(owner.declaration as *const Declaration) {
            return None;
        }
        let mut named = owner
            .declaration
            .members()
            .iter()
            .filter(|m| m.name.as_deref() == Some(name));
        let first = named.next();
        let typed = first
            .into_iter()
            .chain(named)
            .find(|m| types::member_type(m).is_some());
        if let Some(member) = typed.or(first) {
            return Some(FoundMember { member, owner });
        }

        for heritage in owner.declaration.bases() {
            let Some(base) = self.resolve(owner.module, heritage_name(heritage), true) else {
                trace!(base = %heritage.text, "base type not resolved");
                continue;
            };
            if let Some(found) = self.member_in(base, name, seen) {
                return Some(found);
            }
        }
        None
    }

    /// Every member visible on `resolved`: its own first, then each base's in
    /// heritage order. A name already seen hides later ones; unnamed members
    /// are only taken from `resolved` itself.
    pub fn members(&self, resolved: Resolved<'r>) -> Vec<FoundMember<'r>> {
        let mut out = Vec::new();
        let mut names = HashSet::new();
        let mut seen = HashSet::new();
        self.collect_members(resolved, true, &mut names, &mut seen, &mut out);
        out
    }

    fn collect_members(
        &self,
        owner: Resolved<'r>,
        is_root: bool,
        names: &mut HashSet<&'r str>,
        seen: &mut HashSet<*const Declaration>,
        out: &mut Vec<FoundMember<'r>>,
    ) {
        if !seen.insert(owner.declaration as *const Declaration) {
            return;
        }
        let mut local = HashSet::new();
        for member in owner.declaration.members() {
            match member.name.as_deref() {
                Some(name) if names.contains(name) => {}
                Some(name) => {
                    local.insert(name);
                    out.push(FoundMember { member, owner });
                }
                None if is_root => out.push(FoundMember { member, owner }),
                None => {}
            }
        }
        names.extend(local);
        for heritage in owner.declaration.bases() {
            if let Some(base) = self.resolve(owner.module, heritage_name(heritage), true) {
                self.collect_members(base, false, names, seen, out);
            }
        }
    }

    /// Follow a dotted member path (`value.base`) starting at `type_name`
    /// and return the type name at its end.
    pub fn resolve_path(
        &self,
        unit: &'r ModuleUnit,
        type_name: &str,
        path: &str,
    ) -> Option<&'r str> {
        let mut current = self.resolve(unit, type_name, true)?;
        let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        let Some((last, hops)) = segments.split_last() else {
            return current.declaration.name();
        };
        for segment in hops {
            let found = self.find_member(current, segment)?;
            let next = types::type_name(types::member_type(found.member)?)?;
            current = self.resolve(found.owner.module, next, true)?;
        }
        let found = self.find_member(current, last)?;
        types::type_name(types::member_type(found.member)?)
    }
}

/// Module path an import/export specifier points at, seen from `module`.
fn specifier_target(module: &str, specifier: &str) -> String {
    if specifier.starts_with('.') {
        join_relative(module, specifier)
    } else {
        specifier.to_string()
    }
}

/// Name to resolve for a heritage entry: the reference name without type
/// arguments, or the raw text for anything else.
fn heritage_name(heritage: &Heritage) -> &str {
    match &heritage.ty {
        TypeNode::Reference { name, .. } => name,
        _ => &heritage.text,
    }
}
