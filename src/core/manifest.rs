//! Declarative package manifests.
//!
//! A manifest describes a package in TOML instead of code:
//!
//! ```toml
//! schema = 1
//!
//! [package]
//! name = "cfoo"
//! organization = "someone"
//! path = "github.com/someone/cfoo"
//! dependencies = ["cbase", "cunittest"]
//!
//! [library]
//! dependencies = ["cbase"]
//!
//! [test]
//! dependencies = ["cunittest", "cbase"]
//! ```
//!
//! Dependency names refer to packages listed in `package.dependencies`;
//! the test section may also name the package's own library.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::error::{GraphError, GraphResult};
use crate::core::registry::{PackageDescriptor, PackageRegistry};
use crate::core::{Package, PackageId, Target, TargetScope};

/// Newest manifest schema this crate understands.
pub const SCHEMA_VERSION: u32 = 1;

/// A parsed package manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Manifest schema version
    pub schema: u32,

    /// Package metadata
    pub package: PackageSection,

    /// Main library
    #[serde(default)]
    pub library: Option<TargetSection>,

    /// Unit test
    #[serde(default)]
    pub test: Option<TargetSection>,

    /// Where this manifest was loaded from
    #[serde(skip)]
    source_path: Option<PathBuf>,
}

/// The `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    pub name: String,

    #[serde(default)]
    pub organization: Option<String>,

    /// Repository path; defaults to the package name
    #[serde(default)]
    pub path: Option<String>,

    /// Packages whose main libraries this package uses
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// A `[library]` or `[test]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetSection {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl PackageManifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        let mut manifest = Self::parse(&contents, &path.display().to_string())?;
        manifest.source_path = Some(path.to_path_buf());
        Ok(manifest)
    }

    /// Parse and validate manifest text. `origin` is used in errors.
    pub fn parse(contents: &str, origin: &str) -> GraphResult<Self> {
        let manifest: PackageManifest =
            toml::from_str(contents).map_err(|e| GraphError::InvalidManifest {
                path: origin.to_string(),
                message: e.message().to_string(),
            })?;

        manifest.validate(origin)?;
        Ok(manifest)
    }

    fn validate(&self, origin: &str) -> GraphResult<()> {
        let invalid = |message: String| GraphError::InvalidManifest {
            path: origin.to_string(),
            message,
        };

        if self.schema == 0 || self.schema > SCHEMA_VERSION {
            return Err(invalid(format!(
                "unsupported schema version {} (expected {})",
                self.schema, SCHEMA_VERSION
            )));
        }

        if self.package.name.trim().is_empty() {
            return Err(invalid("package name must not be empty".to_string()));
        }

        let sections = [("library", &self.library), ("test", &self.test)];
        for (section, target) in sections {
            let blank = target
                .as_ref()
                .and_then(|t| t.name.as_deref())
                .is_some_and(|name| name.trim().is_empty());
            if blank {
                return Err(invalid(format!("[{}] name must not be empty", section)));
            }
        }

        if self.package.dependencies.iter().any(|d| d == &self.package.name) {
            return Err(invalid(format!(
                "package `{}` lists itself as a dependency",
                self.package.name
            )));
        }

        Ok(())
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// File this manifest was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    fn package_id(&self) -> PackageId {
        match &self.package.organization {
            Some(org) => PackageId::with_organization(org, &self.package.name),
            None => PackageId::new(&self.package.name),
        }
    }

    fn repo_path(&self) -> &str {
        self.package.path.as_deref().unwrap_or(&self.package.name)
    }
}

impl PackageDescriptor for PackageManifest {
    fn name(&self) -> &str {
        &self.package.name
    }

    fn get_package(&self, registry: &PackageRegistry) -> GraphResult<Package> {
        let mut package = Package::new(self.package_id());
        let mut scope = TargetScope::new();

        for dep in &self.package.dependencies {
            let dep_pkg = registry.get_package(dep)?;
            scope.import(&dep_pkg)?;
            package.add_package(dep_pkg);
        }

        if let Some(section) = &self.library {
            let name = section.name.as_deref().unwrap_or(&self.package.name);
            let mut lib = Target::library(name, self.repo_path());
            for dep in scope.resolve_all(section.dependencies.iter().map(String::as_str))? {
                lib.add_dependency(dep);
            }
            let lib = package.add_main_lib(lib)?;
            scope.define(lib)?;
        }

        if let Some(section) = &self.test {
            let name = section
                .name
                .clone()
                .unwrap_or_else(|| format!("{}_test", self.package.name));
            let mut test = Target::test(name, self.repo_path());
            for dep in scope.resolve_all(section.dependencies.iter().map(String::as_str))? {
                test.add_dependency(dep);
            }
            package.add_unittest(test)?;
        }

        Ok(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::BuiltinOptions;

    const CFOO: &str = r#"
schema = 1

[package]
name = "cfoo"
organization = "someone"
path = "github.com/someone/cfoo"
dependencies = ["cbase", "cunittest"]

[library]
dependencies = ["cbase"]

[test]
dependencies = ["cunittest", "cbase"]
"#;

    #[test]
    fn test_manifest_builds_package() {
        let manifest = PackageManifest::parse(CFOO, "cfoo.toml").unwrap();
        let mut registry = PackageRegistry::with_builtin(BuiltinOptions::default());
        registry.register(Box::new(manifest));

        let pkg = registry.get_package("cfoo").unwrap();
        assert_eq!(pkg.id().to_string(), "someone/cfoo");

        let lib = pkg.main_lib().unwrap();
        assert_eq!(lib.name(), "cfoo");
        assert_eq!(lib.path(), "github.com/someone/cfoo");
        assert_eq!(lib.dependency_names(), vec!["cbase"]);

        let test = pkg.unittest().unwrap();
        assert_eq!(test.name(), "cfoo_test");
        let mut deps = test.dependency_names();
        deps.sort();
        assert_eq!(deps, vec!["cbase", "cfoo", "cunittest"]);
    }

    #[test]
    fn test_unknown_dependency_is_unresolved() {
        let text = r#"
schema = 1
[package]
name = "cfoo"
dependencies = ["cbase"]
[library]
dependencies = ["cunittest"]
"#;
        let manifest = PackageManifest::parse(text, "cfoo.toml").unwrap();
        let mut registry = PackageRegistry::with_builtin(BuiltinOptions::default());
        registry.register(Box::new(manifest));

        let err = registry.get_package("cfoo").unwrap_err();
        assert!(matches!(err, GraphError::UnresolvedTarget { ref name, .. } if name == "cunittest"));
    }

    #[test]
    fn test_rejects_future_schema() {
        let err = PackageManifest::parse("schema = 2\n[package]\nname = \"x\"\n", "x.toml")
            .unwrap_err();
        assert!(err.to_string().contains("unsupported schema version 2"));
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = PackageManifest::parse("schema = 1\n[package]\nname = \" \"\n", "x.toml")
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidManifest { .. }));
    }

    #[test]
    fn test_rejects_empty_target_names() {
        let library = "schema = 1\n[package]\nname = \"cfoo\"\n[library]\nname = \"\"\n";
        match PackageManifest::parse(library, "lib.toml").unwrap_err() {
            GraphError::InvalidManifest { message, .. } => {
                assert_eq!(message, "[library] name must not be empty");
            }
            other => panic!("unexpected error: {other}"),
        }

        let test = "schema = 1\n[package]\nname = \"cfoo\"\n[test]\nname = \"  \"\n";
        match PackageManifest::parse(test, "test.toml").unwrap_err() {
            GraphError::InvalidManifest { message, .. } => {
                assert_eq!(message, "[test] name must not be empty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = PackageManifest::parse("schema = \n", "bad.toml").unwrap_err();
        match err {
            GraphError::InvalidManifest { path, .. } => assert_eq!(path, "bad.toml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_records_source_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("cfoo.toml");
        std::fs::write(&path, CFOO).unwrap();

        let manifest = PackageManifest::load(&path).unwrap();
        assert_eq!(manifest.source_path(), Some(path.as_path()));
        assert_eq!(manifest.name(), "cfoo");
    }
}
