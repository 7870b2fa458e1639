//! Graph construction errors.
//!
//! These are defects in a package description rather than runtime
//! conditions, but they are still reported as values so the CLI can point
//! at the offending package.

use miette::Diagnostic;
use thiserror::Error;

/// Error raised while assembling a package graph.
#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("package not found: `{package}`")]
    #[diagnostic(
        code(catomic_gen::registry::not_found),
        help("Run `catomic-gen list` to see registered packages")
    )]
    PackageNotFound {
        package: String,
        suggestions: Vec<String>,
    },

    #[error("package `{package}` depends on itself: {}", .chain.join(" -> "))]
    #[diagnostic(
        code(catomic_gen::registry::cycle),
        help("Remove one of the package dependencies in the chain")
    )]
    PackageCycle { package: String, chain: Vec<String> },

    #[error("no target named `{name}` is in scope")]
    #[diagnostic(
        code(catomic_gen::scope::unresolved),
        help("Import the package that provides the target before depending on it")
    )]
    UnresolvedTarget { name: String, available: Vec<String> },

    #[error("target `{name}` is already defined in this scope")]
    #[diagnostic(code(catomic_gen::scope::duplicate))]
    DuplicateTarget { name: String },

    #[error("package `{package}` already has a main library (`{existing}`)")]
    #[diagnostic(code(catomic_gen::package::duplicate_main_lib))]
    DuplicateMainLib { package: String, existing: String },

    #[error("package `{package}` already has a test target (`{existing}`)")]
    #[diagnostic(code(catomic_gen::package::duplicate_unittest))]
    DuplicateUnittest { package: String, existing: String },

    #[error("target `{name}` is defined differently by two packages")]
    #[diagnostic(
        code(catomic_gen::graph::conflict),
        help("Every package must describe a shared target the same way")
    )]
    ConflictingTarget { name: String },

    #[error("cycle detected in target graph at `{target}`")]
    #[diagnostic(code(catomic_gen::graph::cycle))]
    CycleDetected { target: String },

    #[error("invalid package manifest `{path}`: {message}")]
    #[diagnostic(code(catomic_gen::manifest::invalid))]
    InvalidManifest { path: String, message: String },
}

impl GraphError {
    /// Extra context lines for terminal rendering.
    pub fn context(&self) -> Vec<String> {
        match self {
            GraphError::PackageNotFound { suggestions, .. } if !suggestions.is_empty() => {
                vec![format!("did you mean: {}", suggestions.join(", "))]
            }
            GraphError::UnresolvedTarget { available, .. } if !available.is_empty() => {
                vec![format!("in scope: {}", available.join(", "))]
            }
            _ => Vec::new(),
        }
    }
}

/// Result alias for graph construction.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_context_lists_suggestions() {
        let err = GraphError::PackageNotFound {
            package: "cbas".to_string(),
            suggestions: vec!["cbase".to_string()],
        };
        assert_eq!(err.to_string(), "package not found: `cbas`");
        assert_eq!(err.context(), vec!["did you mean: cbase".to_string()]);
        assert!(err.help().is_some());
    }

    #[test]
    fn test_cycle_message_shows_chain() {
        let err = GraphError::PackageCycle {
            package: "a".to_string(),
            chain: vec!["a".into(), "b".into(), "a".into()],
        };
        assert!(err.to_string().contains("a -> b -> a"));
    }
}
