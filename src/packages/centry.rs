//! `centry` - the entry-point shim providing `main` for test executables.

use crate::core::{GraphResult, Package, PackageDescriptor, PackageId, PackageRegistry, Target};
use crate::packages::{repo_path, ORGANIZATION};

pub const NAME: &str = "centry";

pub struct Centry;

impl PackageDescriptor for Centry {
    fn name(&self) -> &str {
        NAME
    }

    fn get_package(&self, _registry: &PackageRegistry) -> GraphResult<Package> {
        let mut pkg = Package::new(PackageId::with_organization(ORGANIZATION, NAME));
        pkg.add_main_lib(Target::library(NAME, repo_path(NAME)))?;
        Ok(pkg)
    }
}
