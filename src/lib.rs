//! catomic-gen - package descriptors and build-file generation for catomic
//!
//! This crate describes the `catomic` C++ library, its unit test and the
//! sibling packages it builds against as an in-memory dependency graph,
//! and turns that graph into build files.

pub mod core;
pub mod generator;
pub mod ops;
pub mod packages;
pub mod util;

pub use crate::core::{
    GraphError, Package, PackageDescriptor, PackageId, PackageRegistry, Target, TargetGraph,
    TargetKind, TargetScope,
};

pub use generator::{generate, GenContext, GeneratorKind};
pub use util::Config;
