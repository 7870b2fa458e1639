//! Text rendering of package and target trees for `catomic-gen tree`.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::core::{Package, Target};

/// Render the package tree below `root`.
///
/// Packages already printed are marked `(*)` and not expanded again.
pub fn format_package_tree(root: &Package, max_depth: Option<usize>) -> String {
    let mut out = String::new();
    let mut seen = HashSet::new();
    write_package(&mut out, root, 0, max_depth.unwrap_or(usize::MAX), &mut seen);
    out
}

fn write_package(
    out: &mut String,
    pkg: &Package,
    depth: usize,
    max_depth: usize,
    seen: &mut HashSet<String>,
) {
    if depth > max_depth {
        return;
    }

    let id = pkg.id().to_string();
    let is_duplicate = !seen.insert(id.clone());

    let targets: Vec<&str> = pkg.targets().map(|t| t.name()).collect();
    let _ = writeln!(
        out,
        "{}{} [{}]{}",
        prefix(depth),
        id,
        targets.join(", "),
        if is_duplicate { " (*)" } else { "" }
    );

    if is_duplicate {
        return;
    }

    for sub in pkg.packages() {
        write_package(out, sub, depth + 1, max_depth, seen);
    }
}

/// Render the dependency tree of the root package's targets.
pub fn format_target_tree(root: &Package, max_depth: Option<usize>) -> String {
    let mut out = String::new();
    for target in root.targets() {
        write_target(&mut out, target, 0, max_depth.unwrap_or(usize::MAX));
    }
    out
}

fn write_target(out: &mut String, target: &Target, depth: usize, max_depth: usize) {
    if depth > max_depth {
        return;
    }

    let _ = writeln!(out, "{}{} ({})", prefix(depth), target.name(), target.kind());
    for dep in target.dependencies() {
        write_target(out, dep, depth + 1, max_depth);
    }
}

fn prefix(depth: usize) -> String {
    if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", "│   ".repeat(depth - 1))
    }
}
