//! TargetGraph - every target reachable from a root package.
//!
//! Edges point from a target to the targets it depends on. The graph is
//! read-only once built; generators walk it in build order.

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::core::error::{GraphError, GraphResult};
use crate::core::{Package, PackageId, Target};

/// A target node together with the package that declared it.
#[derive(Debug, Clone)]
pub struct TargetNode {
    pub target: Arc<Target>,
    /// Owning package, if the target was registered on one
    pub package: Option<PackageId>,
}

/// The flattened target dependency graph of a package.
#[derive(Debug, Clone)]
pub struct TargetGraph {
    root: PackageId,
    graph: DiGraph<TargetNode, ()>,
    name_to_node: HashMap<String, NodeIndex>,
    /// Dependencies first
    order: Vec<NodeIndex>,
}

impl TargetGraph {
    /// Build the graph for `root`: its own targets, the main libraries of
    /// every package beneath it, and anything those depend on.
    pub fn from_package(root: &Package) -> GraphResult<Self> {
        let mut builder = TargetGraph {
            root: root.id().clone(),
            graph: DiGraph::new(),
            name_to_node: HashMap::new(),
            order: Vec::new(),
        };

        builder.add_package(root)?;

        let topo = toposort(&builder.graph, None).map_err(|cycle| GraphError::CycleDetected {
            target: builder.graph[cycle.node_id()].target.name().to_string(),
        })?;
        builder.order = topo.into_iter().rev().collect();

        tracing::debug!(
            "target graph for {}: {} targets, {} edges",
            builder.root,
            builder.graph.node_count(),
            builder.graph.edge_count()
        );

        Ok(builder)
    }

    fn add_package(&mut self, root: &Package) -> GraphResult<()> {
        for sub in root.packages() {
            self.add_sub_package(sub)?;
        }
        for target in root.targets() {
            self.add_target(target, Some(root.id()))?;
        }
        Ok(())
    }

    /// Dependency packages contribute their main library only; their own
    /// unit tests are not part of the root's build.
    fn add_sub_package(&mut self, package: &Package) -> GraphResult<()> {
        for sub in package.packages() {
            self.add_sub_package(sub)?;
        }
        if let Some(lib) = package.main_lib() {
            self.add_target(lib, Some(package.id()))?;
        }
        Ok(())
    }

    fn add_target(
        &mut self,
        target: &Arc<Target>,
        package: Option<&PackageId>,
    ) -> GraphResult<NodeIndex> {
        if let Some(&node) = self.name_to_node.get(target.name()) {
            let existing = &mut self.graph[node];
            if existing.target != *target {
                return Err(GraphError::ConflictingTarget {
                    name: target.name().to_string(),
                });
            }
            if existing.package.is_none() {
                existing.package = package.cloned();
            }
            return Ok(node);
        }

        let node = self.graph.add_node(TargetNode {
            target: target.clone(),
            package: package.cloned(),
        });
        self.name_to_node.insert(target.name().to_string(), node);

        for dep in target.dependencies() {
            let dep_node = self.add_target(dep, None)?;
            if !self.graph.contains_edge(node, dep_node) {
                self.graph.add_edge(node, dep_node, ());
            }
        }

        Ok(node)
    }

    /// Id of the root package.
    pub fn root(&self) -> &PackageId {
        &self.root
    }

    /// Look up a target node by name.
    pub fn get(&self, name: &str) -> Option<&TargetNode> {
        self.name_to_node.get(name).map(|&n| &self.graph[n])
    }

    /// All targets, dependencies before dependents.
    pub fn build_order(&self) -> impl Iterator<Item = &TargetNode> + '_ {
        self.order.iter().map(|&n| &self.graph[n])
    }

    /// Library targets in build order.
    pub fn libraries(&self) -> impl Iterator<Item = &TargetNode> + '_ {
        self.build_order().filter(|n| n.target.is_library())
    }

    /// Test targets in build order.
    pub fn tests(&self) -> impl Iterator<Item = &TargetNode> + '_ {
        self.build_order().filter(|n| n.target.is_test())
    }

    /// Direct dependencies of a target, in declaration order.
    pub fn dependencies(&self, name: &str) -> Vec<&TargetNode> {
        self.get(name)
            .map(|node| {
                node.target
                    .dependencies()
                    .iter()
                    .filter_map(|d| self.get(d.name()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Targets that depend directly on `name`.
    pub fn dependents(&self, name: &str) -> Vec<&TargetNode> {
        match self.name_to_node.get(name) {
            Some(&node) => {
                let mut dependents: Vec<&TargetNode> = self
                    .graph
                    .neighbors_directed(node, Direction::Incoming)
                    .map(|n| &self.graph[n])
                    .collect();
                dependents.sort_by(|a, b| a.target.name().cmp(b.target.name()));
                dependents
            }
            None => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
