//! CMake generator - emits a single CMakeLists.txt for the whole graph.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use crate::core::target::SOURCE_EXTENSIONS;
use crate::core::{TargetGraph, TargetNode};
use crate::generator::{GenContext, GeneratedFile, Generator, GeneratorKind};
use crate::util::fs::{relative_path, to_slash};

/// File name of the generated project.
pub const CMAKE_LISTS: &str = "CMakeLists.txt";

/// Minimum CMake version the generated file requires.
const CMAKE_MINIMUM_VERSION: &str = "3.16";

/// Renders a [`TargetGraph`] as CMake.
#[derive(Debug, Default)]
pub struct CMakeGenerator;

impl CMakeGenerator {
    pub fn new() -> Self {
        CMakeGenerator
    }

    /// Path as seen from the generated file.
    fn cmake_path(&self, ctx: &GenContext, path: &Path) -> String {
        let rel = relative_path(&ctx.output_dir, path);
        if rel.is_absolute() {
            to_slash(&rel)
        } else {
            format!("${{CMAKE_CURRENT_LIST_DIR}}/{}", to_slash(&rel))
        }
    }

    fn write_target(&self, out: &mut String, node: &TargetNode, ctx: &GenContext) -> Result<()> {
        let target = &node.target;
        let name = target.name();
        let var = format!("{}_SOURCES", name.to_ascii_uppercase());

        match &node.package {
            Some(pkg) => writeln!(out, "# {} ({}, {})", name, target.kind(), pkg)?,
            None => writeln!(out, "# {} ({})", name, target.kind())?,
        }

        writeln!(out, "file(GLOB_RECURSE {} CONFIGURE_DEPENDS", var)?;
        for dir in target.source_dirs(&ctx.workspace_root) {
            for ext in SOURCE_EXTENSIONS {
                writeln!(out, "    \"{}/*.{}\"", self.cmake_path(ctx, &dir), ext)?;
            }
        }
        writeln!(out, ")")?;

        let project_dir = target.project_dir(&ctx.workspace_root);
        if !project_dir.is_dir() {
            tracing::warn!(
                "project directory for {} not found: {}",
                name,
                project_dir.display()
            );
        }

        // Libraries without sources become INTERFACE libraries at configure time.
        let visibility = if target.is_library() {
            let usage = format!("{}_USAGE", name.to_ascii_uppercase());
            writeln!(out, "if({})", var)?;
            writeln!(out, "    add_library({} STATIC ${{{}}})", name, var)?;
            writeln!(out, "    set({} PUBLIC)", usage)?;
            writeln!(out, "else()")?;
            writeln!(
                out,
                "    message(WARNING \"{} has no sources, using an INTERFACE library\")",
                name
            )?;
            writeln!(out, "    add_library({} INTERFACE)", name)?;
            writeln!(out, "    set({} INTERFACE)", usage)?;
            writeln!(out, "endif()")?;
            format!("${{{}}}", usage)
        } else {
            writeln!(out, "add_executable({} ${{{}}})", name, var)?;
            "PRIVATE".to_string()
        };

        writeln!(out, "target_include_directories({} {}", name, visibility)?;
        for dir in target.include_dirs(&ctx.workspace_root) {
            writeln!(out, "    \"{}\"", self.cmake_path(ctx, &dir))?;
        }
        writeln!(out, ")")?;

        let deps = target.dependency_names();
        if !deps.is_empty() {
            writeln!(
                out,
                "target_link_libraries({} {} {})",
                name,
                visibility,
                deps.join(" ")
            )?;
        }

        if target.is_test() {
            writeln!(out, "add_test(NAME {} COMMAND {})", name, name)?;
        }

        writeln!(out)?;
        Ok(())
    }
}

impl Generator for CMakeGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::CMake
    }

    fn render(&self, graph: &TargetGraph, ctx: &GenContext) -> Result<Vec<GeneratedFile>> {
        let mut out = String::new();
        let root = graph.root();

        writeln!(out, "# Generated by catomic-gen for {}. Do not edit.", root)?;
        writeln!(out, "cmake_minimum_required(VERSION {})", CMAKE_MINIMUM_VERSION)?;
        writeln!(out, "project({} LANGUAGES C CXX)", root.name())?;
        writeln!(out)?;
        writeln!(out, "set(CMAKE_CXX_STANDARD {})", ctx.cxx_standard)?;
        writeln!(out, "set(CMAKE_CXX_STANDARD_REQUIRED ON)")?;
        writeln!(
            out,
            "set(CMAKE_CONFIGURATION_TYPES \"{}\" CACHE STRING \"\" FORCE)",
            ctx.configurations.join(";")
        )?;
        writeln!(out)?;

        if graph.tests().next().is_some() {
            writeln!(out, "enable_testing()")?;
            writeln!(out)?;
        }

        for node in graph.build_order() {
            self.write_target(&mut out, node, ctx)?;
        }

        Ok(vec![GeneratedFile::new(CMAKE_LISTS, out)])
    }
}
