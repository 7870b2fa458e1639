//! Registry assembly from configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::PackageRegistry;
use crate::packages::BuiltinOptions;
use crate::util::Config;

/// Options layered over the configuration when building a registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryOptions {
    /// Override `packages.entry_point`
    pub entry_point: Option<bool>,

    /// Manifest directories in addition to the configured ones
    pub manifest_dirs: Vec<PathBuf>,
}

/// Build the package registry: built-in packages, then every configured
/// manifest directory (later directories win on name clashes).
pub fn load_registry(config: &Config, opts: &RegistryOptions) -> Result<PackageRegistry> {
    let builtin = BuiltinOptions {
        entry_point: opts
            .entry_point
            .or(config.packages.entry_point)
            .unwrap_or(BuiltinOptions::default().entry_point),
    };
    let mut registry = PackageRegistry::with_builtin(builtin);

    for dir in config.packages.manifest_dirs.iter().chain(&opts.manifest_dirs) {
        let added = registry
            .load_manifests(dir)
            .with_context(|| format!("failed to load manifests from {}", dir.display()))?;
        tracing::debug!("{} manifests from {}", added.len(), dir.display());
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entry_point_override_wins() {
        let mut config = Config::default();
        config.packages.entry_point = Some(true);

        let registry = load_registry(
            &config,
            &RegistryOptions {
                entry_point: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

        let pkg = registry.get_package("catomic").unwrap();
        assert!(!pkg.unittest().unwrap().depends_on("centry"));
    }

    #[test]
    fn test_manifest_dirs_are_loaded() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("cfoo.toml"),
            "schema = 1\n[package]\nname = \"cfoo\"\n[library]\n",
        )
        .unwrap();

        let registry = load_registry(
            &Config::default(),
            &RegistryOptions {
                manifest_dirs: vec![tmp.path().to_path_buf()],
                ..Default::default()
            },
        )
        .unwrap();

        assert!(registry.contains("cfoo"));
        assert!(registry.contains("catomic"));
    }

    #[test]
    fn test_bad_manifest_fails_with_context() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("bad.toml"), "schema = 9\n[package]\nname = \"x\"\n")
            .unwrap();

        let err = load_registry(
            &Config::default(),
            &RegistryOptions {
                manifest_dirs: vec![tmp.path().to_path_buf()],
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("unsupported schema version 9"));
    }
}
