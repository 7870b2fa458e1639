//! Generation context - everything a generator needs besides the graph.
//!
//! Built once at startup from the merged configuration and passed to
//! every generator call; there is no process-wide generator state.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::generator::GeneratorKind;
use crate::util::Config;

/// Default C++ standard for generated projects.
pub const DEFAULT_CXX_STANDARD: u32 = 17;

/// Default output directory name, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "target";

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GenContext {
    /// Which generator to run
    pub kind: GeneratorKind,

    /// Directory generated files are written to
    pub output_dir: PathBuf,

    /// Directory target repository paths are resolved against
    pub workspace_root: PathBuf,

    /// C++ standard (e.g. 17)
    pub cxx_standard: u32,

    /// Build configurations (e.g. Debug, Release)
    pub configurations: Vec<String>,

    /// Host operating system, used for output file names
    pub os: String,

    /// Render without writing files
    pub dry_run: bool,
}

impl GenContext {
    /// Create a context with defaults rooted at `cwd`.
    pub fn new(cwd: &Path) -> Self {
        GenContext {
            kind: GeneratorKind::default(),
            output_dir: cwd.join(DEFAULT_OUTPUT_DIR),
            workspace_root: cwd.to_path_buf(),
            cxx_standard: DEFAULT_CXX_STANDARD,
            configurations: vec!["Debug".to_string(), "Release".to_string()],
            os: std::env::consts::OS.to_string(),
            dry_run: false,
        }
    }

    /// Create a context from configuration, falling back to defaults.
    pub fn from_config(config: &Config, cwd: &Path) -> Result<Self> {
        let mut ctx = Self::new(cwd);
        let generate = &config.generate;

        if let Some(format) = &generate.format {
            ctx.kind = format.parse()?;
        }
        if let Some(dir) = &generate.output_dir {
            ctx.output_dir = dir.clone();
        }
        if let Some(dir) = &generate.workspace_root {
            ctx.workspace_root = dir.clone();
        }
        if let Some(std) = generate.cxx_standard {
            ctx.cxx_standard = std;
        }
        if !generate.configurations.is_empty() {
            ctx.configurations = generate.configurations.clone();
        }

        tracing::debug!("generation context: {:?}", ctx);
        Ok(ctx)
    }

    /// Builder method to select a generator.
    pub fn with_kind(mut self, kind: GeneratorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder method to set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder method to set the workspace root.
    pub fn with_workspace_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workspace_root = dir.into();
        self
    }

    /// Builder method to render without writing.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
