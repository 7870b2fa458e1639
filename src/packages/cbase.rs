//! `cbase` - the base library every other package links against.

use crate::core::{
    GraphResult, Package, PackageDescriptor, PackageId, PackageRegistry, Target, TargetScope,
};
use crate::packages::{centry, cunittest, repo_path, BuiltinOptions, ORGANIZATION};

pub const NAME: &str = "cbase";

pub struct Cbase {
    options: BuiltinOptions,
}

impl Cbase {
    pub fn new(options: BuiltinOptions) -> Self {
        Cbase { options }
    }
}

impl PackageDescriptor for Cbase {
    fn name(&self) -> &str {
        NAME
    }

    fn get_package(&self, registry: &PackageRegistry) -> GraphResult<Package> {
        let mut scope = TargetScope::new();
        let mut pkg = Package::new(PackageId::with_organization(ORGANIZATION, NAME));

        let unittestpkg = registry.get_package(cunittest::NAME)?;
        scope.import(&unittestpkg)?;
        pkg.add_package(unittestpkg);

        if self.options.entry_point {
            let entrypkg = registry.get_package(centry::NAME)?;
            scope.import(&entrypkg)?;
            pkg.add_package(entrypkg);
        }

        let mainlib = pkg.add_main_lib(Target::library(NAME, repo_path(NAME)))?;
        scope.define(mainlib)?;

        let mut maintest = Target::test(format!("{}_test", NAME), repo_path(NAME));
        maintest.add_dependency(scope.resolve(cunittest::NAME)?);
        if self.options.entry_point {
            maintest.add_dependency(scope.resolve(centry::NAME)?);
        }
        pkg.add_unittest(maintest)?;

        Ok(pkg)
    }
}
