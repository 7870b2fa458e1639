//! Package - a named unit owning a main library and a unit test.
//!
//! A Package also records the packages it pulls in, so a generator
//! walking the root package sees every project that takes part in the
//! build.

use std::sync::Arc;

use crate::core::error::{GraphError, GraphResult};
use crate::core::{PackageId, Target};

/// A package with its targets and sub-packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    id: PackageId,
    main_lib: Option<Arc<Target>>,
    unittest: Option<Arc<Target>>,
    packages: Vec<Package>,
}

impl Package {
    /// Create an empty package.
    pub fn new(id: PackageId) -> Self {
        Package {
            id,
            main_lib: None,
            unittest: None,
            packages: Vec::new(),
        }
    }

    /// Get the package ID.
    pub fn id(&self) -> &PackageId {
        &self.id
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// Record a package this one depends on. Packages already present
    /// (by id) are not added twice.
    pub fn add_package(&mut self, package: Package) {
        if self.packages.iter().any(|p| p.id == package.id) {
            tracing::debug!("{} already depends on {}", self.id, package.id);
            return;
        }
        self.packages.push(package);
    }

    /// Register the main library.
    ///
    /// A unit test registered earlier is made to depend on it. Handles to
    /// that test obtained before this call do not see the new edge.
    pub fn add_main_lib(&mut self, lib: Target) -> GraphResult<Arc<Target>> {
        if let Some(existing) = &self.main_lib {
            return Err(GraphError::DuplicateMainLib {
                package: self.id.to_string(),
                existing: existing.name().to_string(),
            });
        }

        let lib = Arc::new(lib);
        if let Some(test) = &mut self.unittest {
            Arc::make_mut(test).add_dependency(lib.clone());
        }
        self.main_lib = Some(lib.clone());
        Ok(lib)
    }

    /// Register the unit-test target.
    ///
    /// If the main library is already registered the test is made to
    /// depend on it.
    pub fn add_unittest(&mut self, mut test: Target) -> GraphResult<Arc<Target>> {
        if let Some(existing) = &self.unittest {
            return Err(GraphError::DuplicateUnittest {
                package: self.id.to_string(),
                existing: existing.name().to_string(),
            });
        }

        if let Some(lib) = &self.main_lib {
            test.add_dependency(lib.clone());
        }

        let test = Arc::new(test);
        self.unittest = Some(test.clone());
        Ok(test)
    }

    /// Get the main library.
    pub fn main_lib(&self) -> Option<&Arc<Target>> {
        self.main_lib.as_ref()
    }

    /// Get the unit-test target.
    pub fn unittest(&self) -> Option<&Arc<Target>> {
        self.unittest.as_ref()
    }

    /// Direct sub-packages.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Find a sub-package by name, searching recursively.
    pub fn find_package(&self, name: &str) -> Option<&Package> {
        if self.name() == name {
            return Some(self);
        }
        self.packages.iter().find_map(|p| p.find_package(name))
    }

    /// Targets owned by this package (main library first).
    pub fn targets(&self) -> impl Iterator<Item = &Arc<Target>> {
        self.main_lib.iter().chain(self.unittest.iter())
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
