//! Implementation of `catomic-gen generate`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::generator::{self, GenContext, GenerateReport, GeneratorKind};
use crate::ops::registry::{load_registry, RegistryOptions};
use crate::packages::catomic;
use crate::util::Config;

/// Options for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Root package to generate
    pub package: String,

    /// Generator override
    pub kind: Option<GeneratorKind>,

    /// Output directory override
    pub output_dir: Option<PathBuf>,

    /// Workspace root override
    pub workspace_root: Option<PathBuf>,

    /// Registry overrides
    pub registry: RegistryOptions,

    /// Render without writing
    pub dry_run: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            package: catomic::NAME.to_string(),
            kind: None,
            output_dir: None,
            workspace_root: None,
            registry: RegistryOptions::default(),
            dry_run: false,
        }
    }
}

/// Build the generation context: configuration first, then options.
pub fn gen_context(config: &Config, cwd: &Path, opts: &GenerateOptions) -> Result<GenContext> {
    let mut ctx = GenContext::from_config(config, cwd)?.with_dry_run(opts.dry_run);

    if let Some(kind) = opts.kind {
        ctx = ctx.with_kind(kind);
    }
    if let Some(dir) = &opts.output_dir {
        ctx = ctx.with_output_dir(cwd.join(dir));
    }
    if let Some(dir) = &opts.workspace_root {
        ctx = ctx.with_workspace_root(cwd.join(dir));
    }

    Ok(ctx)
}

/// Construct the root package and hand it to the generator.
pub fn generate(config: &Config, cwd: &Path, opts: &GenerateOptions) -> Result<GenerateReport> {
    let ctx = gen_context(config, cwd, opts)?;
    let registry = load_registry(config, &opts.registry)?;

    let package = registry.get_package(&opts.package)?;
    tracing::info!("generating {} build files for {}", ctx.kind, package.id());

    generator::generate(&package, &ctx)
}
