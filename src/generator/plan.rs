//! Build plan generation.
//!
//! A BuildPlan is a machine-readable description of the graph: every
//! target in build order with its directories, the source files found on
//! disk, and its dependencies. It is written as `build-plan.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::target::SOURCE_EXTENSIONS;
use crate::core::{TargetGraph, TargetKind, TargetNode};
use crate::generator::{GenContext, GeneratedFile, Generator, GeneratorKind};
use crate::util::fs::glob_files;

/// File name of the generated plan.
pub const PLAN_FILE: &str = "build-plan.json";

/// Version of the plan format.
pub const PLAN_SCHEMA: u32 = 1;

/// A complete build plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Plan format version
    pub schema: u32,

    /// Root package id
    pub root: String,

    /// C++ standard
    pub cxx_standard: u32,

    /// Build configurations
    pub configurations: Vec<String>,

    /// Target names, dependencies first
    pub build_order: Vec<String>,

    /// Targets in build order
    pub targets: Vec<PlannedTarget>,
}

/// One target in the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedTarget {
    pub name: String,
    pub kind: TargetKind,
    /// Owning package id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Output file name on the host platform
    pub output: String,
    pub project_dir: PathBuf,
    pub include_dirs: Vec<PathBuf>,
    /// Source files present on disk
    pub sources: Vec<PathBuf>,
    /// Direct dependencies, in declaration order
    pub dependencies: Vec<String>,
}

impl BuildPlan {
    /// Build a plan from a graph.
    pub fn from_graph(graph: &TargetGraph, ctx: &GenContext) -> Result<Self> {
        let targets = graph
            .build_order()
            .map(|node| plan_target(node, ctx))
            .collect::<Result<Vec<_>>>()?;

        Ok(BuildPlan {
            schema: PLAN_SCHEMA,
            root: graph.root().to_string(),
            cxx_standard: ctx.cxx_standard,
            configurations: ctx.configurations.clone(),
            build_order: targets.iter().map(|t| t.name.clone()).collect(),
            targets,
        })
    }

    /// Find a target by name.
    pub fn target(&self, name: &str) -> Option<&PlannedTarget> {
        self.targets.iter().find(|t| t.name == name)
    }
}

fn plan_target(node: &TargetNode, ctx: &GenContext) -> Result<PlannedTarget> {
    let target = &node.target;
    let project_dir = target.project_dir(&ctx.workspace_root);

    let patterns: Vec<String> = target
        .kind()
        .source_dirs()
        .iter()
        .flat_map(|dir| {
            SOURCE_EXTENSIONS
                .iter()
                .map(move |ext| format!("{}/**/*.{}", dir, ext))
        })
        .collect();

    let sources = if project_dir.is_dir() {
        glob_files(&project_dir, &patterns)?
    } else {
        tracing::warn!(
            "project directory for {} not found: {}",
            target.name(),
            project_dir.display()
        );
        Vec::new()
    };

    Ok(PlannedTarget {
        name: target.name().to_string(),
        kind: target.kind(),
        package: node.package.as_ref().map(|p| p.to_string()),
        output: target.output_filename(&ctx.os),
        include_dirs: target.include_dirs(&ctx.workspace_root),
        project_dir,
        sources,
        dependencies: target
            .dependency_names()
            .into_iter()
            .map(String::from)
            .collect(),
    })
}

/// Writes the build plan as JSON.
#[derive(Debug, Default)]
pub struct PlanGenerator;

impl PlanGenerator {
    pub fn new() -> Self {
        PlanGenerator
    }
}

impl Generator for PlanGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Json
    }

    fn render(&self, graph: &TargetGraph, ctx: &GenContext) -> Result<Vec<GeneratedFile>> {
        let plan = BuildPlan::from_graph(graph, ctx)?;
        let mut json = serde_json::to_string_pretty(&plan)?;
        json.push('\n');
        Ok(vec![GeneratedFile::new(PLAN_FILE, json)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PackageRegistry;
    use crate::packages::BuiltinOptions;
    use tempfile::TempDir;

    fn graph() -> TargetGraph {
        let pkg = PackageRegistry::with_builtin(BuiltinOptions::default())
            .get_package("catomic")
            .unwrap();
        TargetGraph::from_package(&pkg).unwrap()
    }

    #[test]
    fn test_plan_lists_sources_on_disk() {
        let tmp = TempDir::new().unwrap();
        let main = tmp.path().join("github.com/jurgen-kluft/catomic/source/main/cpp");
        std::fs::create_dir_all(&main).unwrap();
        std::fs::write(main.join("c_mempool.cpp"), "").unwrap();
        std::fs::write(main.join("c_mbuf.cpp"), "").unwrap();

        let ctx = GenContext::new(tmp.path());
        let plan = BuildPlan::from_graph(&graph(), &ctx).unwrap();

        let lib = plan.target("catomic").unwrap();
        assert_eq!(lib.sources.len(), 2);
        assert_eq!(lib.kind, TargetKind::Library);
        assert_eq!(lib.package.as_deref(), Some("jurgen-kluft/catomic"));
        assert_eq!(lib.dependencies, vec!["cbase"]);

        // No directory on disk: still planned, just without sources
        assert!(plan.target("cbase").unwrap().sources.is_empty());
    }

    #[test]
    fn test_plan_json_round_trips_build_order() {
        let tmp = TempDir::new().unwrap();
        let ctx = GenContext::new(tmp.path()).with_kind(GeneratorKind::Json);

        let files = PlanGenerator::new().render(&graph(), &ctx).unwrap();
        assert_eq!(files[0].path, PathBuf::from(PLAN_FILE));

        let plan: BuildPlan = serde_json::from_str(&files[0].contents).unwrap();
        assert_eq!(plan.schema, PLAN_SCHEMA);
        assert_eq!(plan.root, "jurgen-kluft/catomic");
        assert_eq!(plan.build_order.len(), 5);
        assert_eq!(plan.build_order.last().map(String::as_str), Some("catomic_test"));

        let test = plan.target("catomic_test").unwrap();
        assert_eq!(test.kind, TargetKind::Test);
        assert_eq!(test.dependencies.len(), 4);
    }
}
