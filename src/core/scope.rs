//! Name-to-target mapping used while a descriptor assembles its package.
//!
//! Dependencies are looked up by name, so referring to a target that was
//! never imported or defined is a reported error instead of a silent
//! ordering mistake.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::error::{GraphError, GraphResult};
use crate::core::{Package, Target};

/// Targets visible to a package descriptor, by name.
#[derive(Debug, Default)]
pub struct TargetScope {
    targets: BTreeMap<String, Arc<Target>>,
}

impl TargetScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring a dependency package's main library into scope under the
    /// package name. Packages without a main library contribute nothing.
    pub fn import(&mut self, package: &Package) -> GraphResult<()> {
        match package.main_lib() {
            Some(lib) => self.insert(package.name(), lib.clone()),
            None => {
                tracing::warn!("package {} has no main library to import", package.id());
                Ok(())
            }
        }
    }

    /// Register a target built by the current descriptor.
    pub fn define(&mut self, target: Arc<Target>) -> GraphResult<Arc<Target>> {
        self.insert(target.name(), target.clone())?;
        Ok(target)
    }

    /// Look up a target by name.
    pub fn resolve(&self, name: &str) -> GraphResult<Arc<Target>> {
        self.targets
            .get(name)
            .cloned()
            .ok_or_else(|| GraphError::UnresolvedTarget {
                name: name.to_string(),
                available: self.targets.keys().cloned().collect(),
            })
    }

    /// Look up several targets, preserving order.
    pub fn resolve_all<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> GraphResult<Vec<Arc<Target>>> {
        names.into_iter().map(|n| self.resolve(n)).collect()
    }

    fn insert(&mut self, name: &str, target: Arc<Target>) -> GraphResult<()> {
        if self.targets.contains_key(name) {
            return Err(GraphError::DuplicateTarget {
                name: name.to_string(),
            });
        }
        self.targets.insert(name.to_string(), target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PackageId;

    #[test]
    fn test_import_and_resolve() {
        let mut base = Package::new(PackageId::new("cbase"));
        base.add_main_lib(Target::library("cbase", "cbase")).unwrap();

        let mut scope = TargetScope::new();
        scope.import(&base).unwrap();

        let lib = scope.resolve("cbase").unwrap();
        assert!(Arc::ptr_eq(&lib, base.main_lib().unwrap()));
    }

    #[test]
    fn test_unresolved_lists_available() {
        let mut scope = TargetScope::new();
        scope
            .define(Arc::new(Target::library("cbase", "cbase")))
            .unwrap();

        match scope.resolve("cunittest").unwrap_err() {
            GraphError::UnresolvedTarget { name, available } => {
                assert_eq!(name, "cunittest");
                assert_eq!(available, vec!["cbase".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_define() {
        let mut scope = TargetScope::new();
        scope
            .define(Arc::new(Target::library("cbase", "cbase")))
            .unwrap();
        let err = scope
            .define(Arc::new(Target::library("cbase", "cbase")))
            .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateTarget { .. }));
    }
}
