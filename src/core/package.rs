//! Package - a resolved locator plus how it is materialized.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Locator;

/// How a package is linked into the install tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Materialized on disk; can run build steps.
    #[default]
    Hard,
    /// Symlinked or virtual; never built.
    Soft,
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkType::Hard => write!(f, "hard"),
            LinkType::Soft => write!(f, "soft"),
        }
    }
}

/// A resolved package, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Package {
    locator: Locator,
    link_type: LinkType,
}

impl Package {
    /// Create a package from its locator and link type.
    pub fn new(locator: Locator, link_type: LinkType) -> Self {
        Package { locator, link_type }
    }

    /// Create a hard-linked package.
    pub fn hard(locator: Locator) -> Self {
        Self::new(locator, LinkType::Hard)
    }

    /// Create a soft-linked package.
    pub fn soft(locator: Locator) -> Self {
        Self::new(locator, LinkType::Soft)
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    /// Whether the package lives on disk and can run build steps.
    pub fn is_hard_linked(&self) -> bool {
        self.link_type == LinkType::Hard
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.locator)
    }
}
