//! Target definitions - what gets built.
//!
//! A Target is either the main library of a package or its unit-test
//! executable. Targets are shared through `Arc` once registered, so a
//! library can be a dependency of any number of other targets.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Source file extensions picked up from a target's source directories.
pub const SOURCE_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx", "c"];

/// The kind of target being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Static C++ library
    #[serde(alias = "lib")]
    Library,

    /// Unit-test executable
    #[serde(alias = "unittest")]
    Test,
}

impl TargetKind {
    /// Get the typical file extension for this target kind.
    pub fn extension(&self, os: &str) -> &'static str {
        match self {
            TargetKind::Library => {
                if os == "windows" {
                    "lib"
                } else {
                    "a"
                }
            }
            TargetKind::Test => {
                if os == "windows" {
                    "exe"
                } else {
                    ""
                }
            }
        }
    }

    /// Get the output filename for a target.
    pub fn output_filename(&self, name: &str, os: &str) -> String {
        let prefix = match self {
            TargetKind::Library if os != "windows" => "lib",
            _ => "",
        };
        let ext = self.extension(os);
        if ext.is_empty() {
            format!("{}{}", prefix, name)
        } else {
            format!("{}{}.{}", prefix, name, ext)
        }
    }

    /// Source directories, relative to the project directory.
    pub fn source_dirs(&self) -> &'static [&'static str] {
        match self {
            TargetKind::Library => &["source/main/cpp"],
            TargetKind::Test => &["source/test/cpp"],
        }
    }

    /// Include directories, relative to the project directory.
    pub fn include_dirs(&self) -> &'static [&'static str] {
        match self {
            TargetKind::Library => &["source/main/include"],
            TargetKind::Test => &["source/test/include", "source/main/include"],
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Library => write!(f, "library"),
            TargetKind::Test => write!(f, "test"),
        }
    }
}

/// A build target and the targets it must be linked after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    name: String,
    kind: TargetKind,
    /// Repository path, e.g. `github.com/jurgen-kluft/catomic`
    path: String,
    dependencies: Vec<Arc<Target>>,
}

impl Target {
    /// Create a new target with the given name, kind and repository path.
    ///
    /// Backslash separators are normalized to `/`.
    pub fn new(name: impl Into<String>, kind: TargetKind, path: impl AsRef<str>) -> Self {
        Target {
            name: name.into(),
            kind,
            path: path.as_ref().replace('\\', "/"),
            dependencies: Vec::new(),
        }
    }

    /// Create a new library target.
    pub fn library(name: impl Into<String>, path: impl AsRef<str>) -> Self {
        Self::new(name, TargetKind::Library, path)
    }

    /// Create a new test target.
    pub fn test(name: impl Into<String>, path: impl AsRef<str>) -> Self {
        Self::new(name, TargetKind::Test, path)
    }

    /// Add a dependency. Returns `false` if one with the same name is
    /// already listed.
    pub fn add_dependency(&mut self, dep: Arc<Target>) -> bool {
        if self.depends_on(&dep.name) {
            return false;
        }
        self.dependencies.push(dep);
        true
    }

    /// Builder form of [`Target::add_dependency`].
    pub fn with_dependency(mut self, dep: Arc<Target>) -> Self {
        self.add_dependency(dep);
        self
    }

    /// Target name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target kind.
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Repository path of the project this target is built from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Direct dependencies in declaration order.
    pub fn dependencies(&self) -> &[Arc<Target>] {
        &self.dependencies
    }

    /// Names of the direct dependencies in declaration order.
    pub fn dependency_names(&self) -> Vec<&str> {
        self.dependencies.iter().map(|d| d.name()).collect()
    }

    /// Check whether `name` is a direct dependency.
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d.name == name)
    }

    pub fn is_library(&self) -> bool {
        self.kind == TargetKind::Library
    }

    pub fn is_test(&self) -> bool {
        self.kind == TargetKind::Test
    }

    /// Project directory of this target under a workspace root.
    pub fn project_dir(&self, workspace_root: &Path) -> PathBuf {
        self.path
            .split('/')
            .filter(|c| !c.is_empty())
            .fold(workspace_root.to_path_buf(), |dir, c| dir.join(c))
    }

    /// Absolute source directories under a workspace root.
    pub fn source_dirs(&self, workspace_root: &Path) -> Vec<PathBuf> {
        let dir = self.project_dir(workspace_root);
        self.kind.source_dirs().iter().map(|d| dir.join(d)).collect()
    }

    /// Absolute include directories under a workspace root.
    pub fn include_dirs(&self, workspace_root: &Path) -> Vec<PathBuf> {
        let dir = self.project_dir(workspace_root);
        self.kind.include_dirs().iter().map(|d| dir.join(d)).collect()
    }

    /// Get the output filename for this target.
    pub fn output_filename(&self, os: &str) -> String {
        self.kind.output_filename(&self.name, os)
    }
}
