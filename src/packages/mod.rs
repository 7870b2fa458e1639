//! Built-in package descriptors.
//!
//! `catomic` is the package this crate exists to describe; `cbase`,
//! `cunittest` and `centry` are the sibling packages it builds against.

pub mod catomic;
pub mod cbase;
pub mod centry;
pub mod cunittest;

use crate::core::PackageRegistry;

/// Organization every built-in package is published under.
pub const ORGANIZATION: &str = "jurgen-kluft";

/// Options for the built-in descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinOptions {
    /// Link unit tests against the `centry` entry-point shim
    pub entry_point: bool,
}

impl Default for BuiltinOptions {
    fn default() -> Self {
        BuiltinOptions { entry_point: true }
    }
}

/// Repository path of a package published under [`ORGANIZATION`].
pub fn repo_path(name: &str) -> String {
    format!("github.com/{}/{}", ORGANIZATION, name)
}

/// Register all built-in descriptors.
pub fn register_builtin(registry: &mut PackageRegistry, options: BuiltinOptions) {
    registry.register(Box::new(cunittest::Cunittest));
    registry.register(Box::new(centry::Centry));
    registry.register(Box::new(cbase::Cbase::new(options)));
    registry.register(Box::new(catomic::Catomic::new(options)));
}
