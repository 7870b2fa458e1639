//! Package registry - named package descriptors and graph construction.
//!
//! Construction never caches: every `get_package` call builds a fresh
//! graph, so two calls never share `Arc<Target>` instances.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::error::{GraphError, GraphResult};
use crate::core::manifest::PackageManifest;
use crate::core::Package;
use crate::packages::{self, BuiltinOptions};

/// Something that knows how to assemble one package.
pub trait PackageDescriptor {
    /// Name the package is registered under.
    fn name(&self) -> &str;

    /// Build the package, pulling dependency packages through `registry`.
    fn get_package(&self, registry: &PackageRegistry) -> GraphResult<Package>;
}

/// Registry of package descriptors.
pub struct PackageRegistry {
    descriptors: BTreeMap<String, Box<dyn PackageDescriptor>>,
    /// Packages currently under construction, outermost first.
    resolving: RefCell<Vec<String>>,
}

impl PackageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        PackageRegistry {
            descriptors: BTreeMap::new(),
            resolving: RefCell::new(Vec::new()),
        }
    }

    /// Create a registry holding the built-in packages.
    pub fn with_builtin(options: BuiltinOptions) -> Self {
        let mut registry = Self::new();
        packages::register_builtin(&mut registry, options);
        registry
    }

    /// Register a descriptor, replacing any with the same name.
    pub fn register(&mut self, descriptor: Box<dyn PackageDescriptor>) {
        let name = descriptor.name().to_string();
        if self.descriptors.insert(name.clone(), descriptor).is_some() {
            tracing::debug!("replaced descriptor for {}", name);
        }
    }

    /// Register every `*.toml` manifest in `dir`. Returns the names added.
    pub fn load_manifests(&mut self, dir: &Path) -> Result<Vec<String>> {
        let pattern = format!(
            "{}/*.toml",
            glob::Pattern::escape(&dir.to_string_lossy())
        );

        let mut names = Vec::new();
        for entry in glob::glob(&pattern)
            .with_context(|| format!("invalid manifest directory: {}", dir.display()))?
        {
            let path = entry.with_context(|| format!("failed to read {}", dir.display()))?;
            let manifest = PackageManifest::load(&path)?;
            tracing::debug!("loaded manifest for {} from {}", manifest.name(), path.display());
            names.push(manifest.name().to_string());
            self.register(Box::new(manifest));
        }

        names.sort();
        Ok(names)
    }

    /// Build the named package graph.
    pub fn get_package(&self, name: &str) -> GraphResult<Package> {
        let descriptor = self
            .descriptors
            .get(name)
            .ok_or_else(|| GraphError::PackageNotFound {
                package: name.to_string(),
                suggestions: self.suggest(name),
            })?;

        {
            let mut resolving = self.resolving.borrow_mut();
            if resolving.iter().any(|n| n == name) {
                let mut chain = resolving.clone();
                chain.push(name.to_string());
                return Err(GraphError::PackageCycle {
                    package: name.to_string(),
                    chain,
                });
            }
            resolving.push(name.to_string());
        }

        tracing::debug!("constructing package {}", name);
        let result = descriptor.get_package(self);
        self.resolving.borrow_mut().pop();
        result
    }

    /// Registered package names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    fn suggest(&self, name: &str) -> Vec<String> {
        self.descriptors
            .keys()
            .filter(|known| edit_distance(known, name) <= 2 || known.contains(name))
            .cloned()
            .collect()
    }
}

impl fmt::Debug for PackageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageRegistry")
            .field("packages", &self.names())
            .field("resolving", &self.resolving.borrow())
            .finish()
    }
}

impl Default for PackageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut row = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            row[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(row[j] + 1);
        }
        prev = row;
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PackageId, Target};

    struct Leaf(&'static str);

    impl PackageDescriptor for Leaf {
        fn name(&self) -> &str {
            self.0
        }

        fn get_package(&self, _registry: &PackageRegistry) -> GraphResult<Package> {
            let mut pkg = Package::new(PackageId::new(self.0));
            pkg.add_main_lib(Target::library(self.0, self.0))?;
            Ok(pkg)
        }
    }

    /// Depends on whatever package it names, which may be itself.
    struct DependsOn(&'static str, &'static str);

    impl PackageDescriptor for DependsOn {
        fn name(&self) -> &str {
            self.0
        }

        fn get_package(&self, registry: &PackageRegistry) -> GraphResult<Package> {
            let dep = registry.get_package(self.1)?;
            let mut pkg = Package::new(PackageId::new(self.0));
            pkg.add_package(dep);
            Ok(pkg)
        }
    }

    #[test]
    fn test_unknown_package_suggests_close_names() {
        let mut registry = PackageRegistry::new();
        registry.register(Box::new(Leaf("cbase")));

        match registry.get_package("cbas").unwrap_err() {
            GraphError::PackageNotFound { suggestions, .. } => {
                assert_eq!(suggestions, vec!["cbase".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut registry = PackageRegistry::new();
        registry.register(Box::new(DependsOn("a", "b")));
        registry.register(Box::new(DependsOn("b", "a")));

        match registry.get_package("a").unwrap_err() {
            GraphError::PackageCycle { chain, .. } => {
                assert_eq!(chain, vec!["a", "b", "a"]);
            }
            other => panic!("unexpected error: {other}"),
        }

        // The resolving stack is unwound after a failure.
        registry.register(Box::new(Leaf("b")));
        assert!(registry.get_package("a").is_ok());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = PackageRegistry::new();
        registry.register(Box::new(Leaf("cbase")));
        registry.register(Box::new(DependsOn("cbase", "missing")));
        assert_eq!(registry.len(), 1);
        assert!(registry.get_package("cbase").is_err());
    }

    #[test]
    fn test_load_manifests_from_directory_with_glob_characters() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("pkgs[1]");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(
            dir.join("cfoo.toml"),
            "schema = 1\n[package]\nname = \"cfoo\"\n",
        )
        .unwrap();

        let mut registry = PackageRegistry::new();
        let names = registry.load_manifests(&dir).unwrap();
        assert_eq!(names, vec!["cfoo".to_string()]);
        assert!(registry.contains("cfoo"));
    }

    #[test]
    fn test_debug_lists_registered_packages() {
        let mut registry = PackageRegistry::new();
        registry.register(Box::new(Leaf("cbase")));
        let text = format!("{:?}", registry);
        assert!(text.contains("PackageRegistry"));
        assert!(text.contains("\"cbase\""));
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("cbase", "cbase"), 0);
        assert_eq!(edit_distance("cbase", "cbas"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }
}
