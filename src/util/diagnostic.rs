//! User-friendly diagnostic messages.
//!
//! Every error shown to the user carries its root cause, any context that
//! helps locate it, and a suggested fix when one is known.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;

use crate::core::GraphError;

/// Common suggestion messages.
pub mod suggestions {
    /// Suggestion when a generator format is unknown.
    pub const UNKNOWN_FORMAT: &str = "help: Supported formats are `cmake` and `json`";
}

/// An error message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Diagnostic code, e.g. `catomic_gen::registry::not_found`
    pub code: Option<String>,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            code: None,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Build a diagnostic from a graph error, carrying its code and help.
    pub fn from_graph_error(err: &GraphError) -> Self {
        let mut diag = Diagnostic::error(err.to_string());
        diag.code = err.code().map(|c| c.to_string());
        for line in err.context() {
            diag = diag.with_context(line);
        }
        if let Some(help) = err.help() {
            diag = diag.with_suggestion(help.to_string());
        }
        if let GraphError::InvalidManifest { path, .. } = err {
            diag = diag.with_location(path);
        }
        diag
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        match &self.code {
            Some(code) => output.push_str(&format!("{}[{}]: {}\n", severity_str, code, self.message)),
            None => output.push_str(&format!("{}: {}\n", severity_str, self.message)),
        }

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            for suggestion in &self.suggestions {
                let suggestion = suggestion.strip_prefix("help: ").unwrap_or(suggestion);
                output.push_str(&format!("{}: {}\n", help_prefix, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("package not found: `cbas`")
            .with_context("did you mean: cbase")
            .with_suggestion("help: Run `catomic-gen list` to see registered packages")
            .with_location("packages/cfoo.toml");

        let output = diag.format(false);
        assert!(output.starts_with("error: package not found"));
        assert!(output.contains("--> packages/cfoo.toml"));
        assert!(output.contains("= did you mean: cbase"));
        assert!(output.contains("help: Run `catomic-gen list`"));
        assert!(!output.contains("help: help:"));
    }

    #[test]
    fn test_from_graph_error_carries_code() {
        let err = GraphError::PackageNotFound {
            package: "cbas".into(),
            suggestions: vec!["cbase".into()],
        };
        let diag = Diagnostic::from_graph_error(&err);

        assert_eq!(diag.code.as_deref(), Some("catomic_gen::registry::not_found"));
        assert_eq!(diag.context, vec!["did you mean: cbase".to_string()]);
        assert_eq!(diag.suggestions.len(), 1);
        assert!(diag.format(false).starts_with("error[catomic_gen::registry::not_found]"));
    }

    #[test]
    fn test_invalid_manifest_has_location() {
        let err = GraphError::InvalidManifest {
            path: "packages/bad.toml".into(),
            message: "unsupported schema version 3 (expected 1)".into(),
        };
        let output = Diagnostic::from_graph_error(&err).format(false);
        assert!(output.contains("  --> packages/bad.toml"));
    }
}
