//! `catomic` - lock-free containers and atomics, and its unit test.

use crate::core::{
    GraphResult, Package, PackageDescriptor, PackageId, PackageRegistry, Target, TargetScope,
};
use crate::packages::{cbase, centry, cunittest, repo_path, BuiltinOptions, ORGANIZATION};

pub const NAME: &str = "catomic";
pub const TEST_NAME: &str = "catomic_test";

pub struct Catomic {
    options: BuiltinOptions,
}

impl Catomic {
    pub fn new(options: BuiltinOptions) -> Self {
        Catomic { options }
    }
}

impl PackageDescriptor for Catomic {
    fn name(&self) -> &str {
        NAME
    }

    fn get_package(&self, registry: &PackageRegistry) -> GraphResult<Package> {
        // Dependencies
        let unittestpkg = registry.get_package(cunittest::NAME)?;
        let entrypkg = if self.options.entry_point {
            Some(registry.get_package(centry::NAME)?)
        } else {
            None
        };
        let basepkg = registry.get_package(cbase::NAME)?;

        let mut scope = TargetScope::new();
        scope.import(&unittestpkg)?;
        scope.import(&basepkg)?;
        if let Some(entrypkg) = &entrypkg {
            scope.import(entrypkg)?;
        }

        let mut mainpkg = Package::new(PackageId::with_organization(ORGANIZATION, NAME));
        mainpkg.add_package(unittestpkg);
        if let Some(entrypkg) = entrypkg {
            mainpkg.add_package(entrypkg);
        }
        mainpkg.add_package(basepkg);

        let mut mainlib = Target::library(NAME, repo_path(NAME));
        mainlib.add_dependency(scope.resolve(cbase::NAME)?);
        let mainlib = scope.define(mainpkg.add_main_lib(mainlib)?)?;

        let mut maintest = Target::test(TEST_NAME, repo_path(NAME));
        maintest.add_dependency(scope.resolve(cunittest::NAME)?);
        if self.options.entry_point {
            maintest.add_dependency(scope.resolve(centry::NAME)?);
        }
        maintest.add_dependency(scope.resolve(cbase::NAME)?);
        maintest.add_dependency(mainlib);
        mainpkg.add_unittest(maintest)?;

        tracing::debug!("assembled {}", mainpkg.id());
        Ok(mainpkg)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use super::*;
    use crate::core::TargetGraph;

    fn build(entry_point: bool) -> Package {
        PackageRegistry::with_builtin(BuiltinOptions { entry_point })
            .get_package(NAME)
            .unwrap()
    }

    fn dependency_set(target: &Target) -> BTreeSet<String> {
        target
            .dependency_names()
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_main_lib_depends_only_on_base() {
        let pkg = build(true);
        let lib = pkg.main_lib().unwrap();

        assert_eq!(lib.name(), "catomic");
        assert_eq!(lib.dependency_names(), vec!["cbase"]);
        assert!(Arc::ptr_eq(
            &lib.dependencies()[0],
            pkg.find_package("cbase").unwrap().main_lib().unwrap()
        ));
    }

    #[test]
    fn test_unittest_dependencies_with_entry_point() {
        let pkg = build(true);
        let test = pkg.unittest().unwrap();

        assert_eq!(test.name(), "catomic_test");
        assert_eq!(test.dependencies().len(), 4);
        assert_eq!(
            dependency_set(test),
            ["catomic", "cbase", "centry", "cunittest"]
                .into_iter()
                .map(String::from)
                .collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_unittest_dependencies_without_entry_point() {
        let pkg = build(false);
        let test = pkg.unittest().unwrap();

        assert_eq!(test.dependencies().len(), 3);
        assert!(!test.depends_on("centry"));
        assert!(pkg.find_package("centry").is_none());
    }

    #[test]
    fn test_package_identity_and_sub_packages() {
        let pkg = build(true);
        assert_eq!(pkg.id().to_string(), "jurgen-kluft/catomic");

        let subs: Vec<&str> = pkg.packages().iter().map(|p| p.name()).collect();
        assert_eq!(subs, vec!["cunittest", "centry", "cbase"]);
        assert_eq!(pkg.targets().count(), 2);
    }

    #[test]
    fn test_repeated_construction_is_structurally_equal() {
        let first = build(true);
        let second = build(true);

        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(
            first.main_lib().unwrap(),
            second.main_lib().unwrap()
        ));
        assert!(!Arc::ptr_eq(
            first.unittest().unwrap(),
            second.unittest().unwrap()
        ));

        let names = |p: &Package| -> Vec<String> {
            p.targets().map(|t| t.name().to_string()).collect()
        };
        assert_eq!(names(&first), names(&second));
        assert_eq!(
            dependency_set(first.unittest().unwrap()),
            dependency_set(second.unittest().unwrap())
        );
    }

    #[test]
    fn test_graph_covers_all_packages() {
        let pkg = build(true);
        let graph = TargetGraph::from_package(&pkg).unwrap();

        let order: Vec<&str> = graph.build_order().map(|n| n.target.name()).collect();
        assert_eq!(order.len(), 5);
        assert_eq!(order.last(), Some(&"catomic_test"));
        assert!(graph.get("cbase_test").is_none());
    }
}
