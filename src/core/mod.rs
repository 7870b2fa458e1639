//! Core data structures for package descriptors.
//!
//! This module contains the foundational types:
//! - Package identifiers and packages
//! - Library and test targets
//! - Target scopes, the package registry and manifests
//! - The flattened target graph handed to generators

pub mod error;
pub mod graph;
pub mod manifest;
pub mod package;
pub mod package_id;
pub mod registry;
pub mod scope;
pub mod target;

pub use error::{GraphError, GraphResult};
pub use graph::{TargetGraph, TargetNode};
pub use manifest::PackageManifest;
pub use package::Package;
pub use package_id::PackageId;
pub use registry::{PackageDescriptor, PackageRegistry};
pub use scope::TargetScope;
pub use target::{Target, TargetKind};
