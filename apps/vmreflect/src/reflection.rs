//! A reflection session: the registry plus the path mappings used to query
//! it.
//!
//! Ingestion takes `&mut self`; queries go through [`Reflection::resolver`],
//! which borrows immutably, so all ingestion finishes before the first
//! lookup.

use crate::alias::{PathMapping, PathMappings};
use crate::registry::{Registry, SourceUnit};
use crate::resolve::Resolver;

#[derive(Debug, Default)]
pub struct Reflection {
    registry: Registry,
    mappings: PathMappings,
}

impl Reflection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mappings(mappings: PathMappings) -> Self {
        Self {
            registry: Registry::new(),
            mappings,
        }
    }

    /// See [`Registry::add_source`].
    pub fn add_source(&mut self, path: &str, text: &str) -> Option<&SourceUnit> {
        self.registry.add_source(path, text)
    }

    /// See [`Registry::add_ambient_typings`].
    pub fn add_typings(&mut self, text: &str) -> usize {
        self.registry.add_ambient_typings(text)
    }

    pub fn insert(&mut self, unit: SourceUnit) -> bool {
        self.registry.insert(unit)
    }

    /// Replace all path mappings.
    pub fn set_path_mappings(&mut self, mappings: PathMappings) {
        self.mappings = mappings;
    }

    pub fn add_path_mapping(&mut self, mapping: PathMapping) {
        self.mappings.push(mapping);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn mappings(&self) -> &PathMappings {
        &self.mappings
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.registry, &self.mappings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ingest_then_query() {
        let mut reflection = Reflection::new();
        reflection.add_source("src/vm.ts", "import {Base} from '~/base';\nexport class Vm extends Base {}");
        reflection.add_source("src/base.ts", "export class Base { name: string }");
        reflection.add_path_mapping(PathMapping::new("^~/", "src/").unwrap());

        let resolver = reflection.resolver();
        let vm = resolver.resolve_in("src/vm", "Vm").unwrap();
        let found = resolver.find_member(vm, "name").unwrap();
        assert_eq!(found.owner.module.key(), "src/base");
    }

    #[test]
    fn test_replacing_mappings() {
        let mut reflection = Reflection::new();
        reflection.add_path_mapping(PathMapping::new("a", "b").unwrap());
        reflection.set_path_mappings(PathMappings::default());
        assert!(reflection.mappings().is_empty());
        assert_eq!(reflection.add_typings("declare module 'x' {}"), 1);
        assert_eq!(reflection.registry().len(), 1);
    }
}
