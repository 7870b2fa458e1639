//! Configuration file support.
//!
//! Two locations are read:
//! - Global: `~/.catomic-gen/config.toml` - user-wide defaults
//! - Project: `catomic-gen.toml` in the working directory
//!
//! Project config takes precedence over global config; command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the project configuration file.
pub const PROJECT_CONFIG_NAME: &str = "catomic-gen.toml";

/// Generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation settings
    pub generate: GenerateConfig,

    /// Package settings
    pub packages: PackagesConfig,
}

/// The `[generate]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Output format (cmake, json)
    pub format: Option<String>,

    /// Directory generated files are written to
    pub output_dir: Option<PathBuf>,

    /// Directory package repository paths are resolved against
    pub workspace_root: Option<PathBuf>,

    /// C++ standard passed to generated projects (e.g. 17)
    pub cxx_standard: Option<u32>,

    /// Build configurations to emit (e.g. Debug, Release)
    pub configurations: Vec<String>,
}

/// The `[packages]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    /// Link unit tests against the entry-point shim
    pub entry_point: Option<bool>,

    /// Directories holding extra package manifests
    pub manifest_dirs: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.generate.format.is_some() {
            self.generate.format = other.generate.format;
        }
        if other.generate.output_dir.is_some() {
            self.generate.output_dir = other.generate.output_dir;
        }
        if other.generate.workspace_root.is_some() {
            self.generate.workspace_root = other.generate.workspace_root;
        }
        if other.generate.cxx_standard.is_some() {
            self.generate.cxx_standard = other.generate.cxx_standard;
        }
        if !other.generate.configurations.is_empty() {
            self.generate.configurations = other.generate.configurations;
        }

        if other.packages.entry_point.is_some() {
            self.packages.entry_point = other.packages.entry_point;
        }
        // Manifest directories accumulate
        self.packages
            .manifest_dirs
            .extend(other.packages.manifest_dirs);
    }

    /// Resolve relative paths in this config against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        if let Some(dir) = self.generate.output_dir.as_mut() {
            resolve(dir);
        }
        if let Some(dir) = self.generate.workspace_root.as_mut() {
            resolve(dir);
        }
        self.packages.manifest_dirs.iter_mut().for_each(resolve);
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Explicit config file, if given
/// 2. Project config (catomic-gen.toml in `project_root`)
/// 3. Global config (~/.catomic-gen/config.toml)
/// 4. Defaults
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_config_path() {
        let mut global = Config::load_or_default(&global_path);
        if let Some(dir) = global_path.parent() {
            global.resolve_paths(dir);
        }
        config.merge(global);
    }

    let mut project = Config::load_or_default(&project_root.join(PROJECT_CONFIG_NAME));
    project.resolve_paths(project_root);
    config.merge(project);

    // An explicitly requested file must exist and parse.
    if let Some(path) = explicit {
        let mut file = Config::load(path)?;
        file.resolve_paths(path.parent().unwrap_or(project_root));
        config.merge(file);
    }

    Ok(config)
}

/// Get the global config directory (~/.catomic-gen).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".catomic-gen"))
}

/// Get the global config path (~/.catomic-gen/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
[generate]
format = "json"
cxx_standard = 20
configurations = ["Debug"]

[packages]
entry_point = false
manifest_dirs = ["packages"]
"#,
        )
        .unwrap();

        assert_eq!(config.generate.format.as_deref(), Some("json"));
        assert_eq!(config.generate.cxx_standard, Some(20));
        assert_eq!(config.packages.entry_point, Some(false));
        assert_eq!(config.packages.manifest_dirs, vec![PathBuf::from("packages")]);
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config::default();
        base.generate.format = Some("cmake".into());
        base.generate.cxx_standard = Some(17);
        base.packages.manifest_dirs.push("a".into());

        let mut other = Config::default();
        other.generate.format = Some("json".into());
        other.packages.manifest_dirs.push("b".into());

        base.merge(other);
        assert_eq!(base.generate.format.as_deref(), Some("json"));
        assert_eq!(base.generate.cxx_standard, Some(17));
        assert_eq!(base.packages.manifest_dirs.len(), 2);
    }

    #[test]
    fn test_invalid_file_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(PROJECT_CONFIG_NAME);
        std::fs::write(&path, "[generate\nformat = ").unwrap();

        let config = Config::load_or_default(&path);
        assert!(config.generate.format.is_none());
    }

    #[test]
    fn test_project_config_paths_are_resolved() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG_NAME),
            "[generate]\noutput_dir = \"out\"\n",
        )
        .unwrap();

        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config.generate.output_dir, Some(tmp.path().join("out")));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(load_config(tmp.path(), Some(&missing)).is_err());
    }
}
