//! Package identification - WHO owns a package and what it is called.
//!
//! Older descriptors only had a bare name; later ones added an
//! organization prefix. Both forms are represented here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a package by name and optional organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    organization: Option<String>,
    name: String,
}

impl PackageId {
    /// Create an id without an organization prefix.
    pub fn new(name: impl Into<String>) -> Self {
        PackageId {
            organization: None,
            name: name.into(),
        }
    }

    /// Create an id scoped to an organization.
    pub fn with_organization(organization: impl Into<String>, name: impl Into<String>) -> Self {
        PackageId {
            organization: Some(organization.into()),
            name: name.into(),
        }
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the organization, if any.
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.organization {
            Some(org) => write!(f, "{}/{}", org, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
