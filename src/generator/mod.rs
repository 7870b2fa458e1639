//! Build-file generators.
//!
//! A generator turns a [`TargetGraph`] into the files of some build system.
//! [`generate`] is the single entry point: it flattens the package into a
//! graph, renders with the selected generator and writes whatever changed.

pub mod cmake;
pub mod context;
pub mod plan;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Result};

use crate::core::{Package, TargetGraph};
use crate::util::diagnostic::suggestions;
use crate::util::fs::write_string;
use crate::util::hash::is_up_to_date;

pub use cmake::CMakeGenerator;
pub use context::GenContext;
pub use plan::{BuildPlan, PlanGenerator};

/// Identifies a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratorKind {
    /// CMakeLists.txt
    #[default]
    CMake,
    /// build-plan.json
    Json,
}

impl GeneratorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::CMake => "cmake",
            GeneratorKind::Json => "json",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cmake" => Ok(GeneratorKind::CMake),
            "json" | "plan" => Ok(GeneratorKind::Json),
            other => bail!(
                "unknown generator format `{}`\n{}",
                other,
                suggestions::UNKNOWN_FORMAT
            ),
        }
    }
}

/// A rendered file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        GeneratedFile {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// A build-file generator.
pub trait Generator {
    /// Which generator this is.
    fn kind(&self) -> GeneratorKind;

    /// Render the graph into files. Must not touch the filesystem
    /// beyond reading sources.
    fn render(&self, graph: &TargetGraph, ctx: &GenContext) -> Result<Vec<GeneratedFile>>;
}

/// Get the generator for a kind.
pub fn generator_for(kind: GeneratorKind) -> Box<dyn Generator> {
    match kind {
        GeneratorKind::CMake => Box::new(CMakeGenerator::new()),
        GeneratorKind::Json => Box::new(PlanGenerator::new()),
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Files written (or that would be written in a dry run)
    pub written: Vec<PathBuf>,
    /// Files whose contents were already current
    pub unchanged: Vec<PathBuf>,
    /// Number of targets in the graph
    pub targets: usize,
    pub dry_run: bool,
}

/// Generate build files for `package`.
pub fn generate(package: &Package, ctx: &GenContext) -> Result<GenerateReport> {
    let graph = TargetGraph::from_package(package)?;
    if graph.tests().next().is_none() {
        tracing::warn!("{} has no test target", package.id());
    }

    let generator = generator_for(ctx.kind);
    tracing::debug!("rendering {} with the {} generator", package.id(), generator.kind());
    let files = generator.render(&graph, ctx)?;

    let mut report = GenerateReport {
        targets: graph.len(),
        dry_run: ctx.dry_run,
        ..Default::default()
    };

    for file in files {
        let path = ctx.output_dir.join(&file.path);
        if is_up_to_date(&path, &file.contents) {
            tracing::debug!("{} is up to date", path.display());
            report.unchanged.push(path);
            continue;
        }

        if ctx.dry_run {
            tracing::info!("would write {}", path.display());
        } else {
            write_string(&path, &file.contents)?;
            tracing::info!("wrote {}", path.display());
        }
        report.written.push(path);
    }

    Ok(report)
}
