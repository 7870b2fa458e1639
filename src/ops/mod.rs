//! High-level operations.
//!
//! This module contains the implementation of catomic-gen commands.

pub mod generate;
pub mod registry;
pub mod tree;

pub use generate::{gen_context, generate, GenerateOptions};
pub use registry::{load_registry, RegistryOptions};
pub use tree::{format_package_tree, format_target_tree};
