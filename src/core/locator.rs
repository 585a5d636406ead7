//! Package locators - WHICH package (ident + resolved reference).
//!
//! A locator is the ident of a package (`lodash`, `@types/node`) paired with
//! the reference it resolved to (`npm:4.17.21`, `workspace:.`). It is what
//! diagnostics name and what the report deduplicates on.

use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error produced when a locator or ident string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("invalid ident `{0}`: expected `name` or `@scope/name`")]
    InvalidIdent(String),

    #[error("invalid locator `{0}`: expected `<ident>@<reference>`")]
    MissingReference(String),
}

/// A resolved package identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locator {
    scope: Option<String>,
    name: String,
    reference: String,
}

impl Locator {
    /// Build a locator from an ident (`name` or `@scope/name`) and a reference.
    pub fn from_ident(ident: &str, reference: impl Into<String>) -> Result<Self, LocatorError> {
        let (scope, name) = split_ident(ident)?;
        Ok(Locator {
            scope,
            name,
            reference: reference.into(),
        })
    }

    /// Build a locator for a registry package at a given version.
    pub fn npm(ident: &str, version: &Version) -> Result<Self, LocatorError> {
        Self::from_ident(ident, format!("npm:{}", version))
    }

    /// Parse a full locator string such as `@types/node@npm:20.1.0`.
    pub fn parse(s: &str) -> Result<Self, LocatorError> {
        // The scope's leading `@` is not a separator.
        let search_from = usize::from(s.starts_with('@'));
        let at = s[search_from..]
            .find('@')
            .map(|i| i + search_from)
            .ok_or_else(|| LocatorError::MissingReference(s.to_string()))?;

        let reference = &s[at + 1..];
        if reference.is_empty() {
            return Err(LocatorError::MissingReference(s.to_string()));
        }

        Self::from_ident(&s[..at], reference)
    }

    /// The scope without its `@`, if any.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// The bare package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved reference (`npm:1.0.0`, `workspace:.`, ...).
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The ident, e.g. `@scope/name`.
    pub fn ident(&self) -> String {
        match &self.scope {
            Some(scope) => format!("@{}/{}", scope, self.name),
            None => self.name.clone(),
        }
    }

    /// The semver version behind the reference, when it has one.
    ///
    /// Accepts bare versions and `npm:`-prefixed ones.
    pub fn version(&self) -> Option<Version> {
        let raw = self.reference.strip_prefix("npm:").unwrap_or(&self.reference);
        Version::parse(raw).ok()
    }
}

fn split_ident(ident: &str) -> Result<(Option<String>, String), LocatorError> {
    let invalid = || LocatorError::InvalidIdent(ident.to_string());

    match ident.strip_prefix('@') {
        Some(scoped) => {
            let (scope, name) = scoped.split_once('/').ok_or_else(invalid)?;
            if scope.is_empty() || name.is_empty() || name.contains('/') {
                return Err(invalid());
            }
            Ok((Some(scope.to_string()), name.to_string()))
        }
        None => {
            if ident.is_empty() || ident.contains('/') || ident.contains('@') {
                return Err(invalid());
            }
            Ok((None, ident.to_string()))
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "@{}/{}@{}", scope, self.name, self.reference),
            None => write!(f, "{}@{}", self.name, self.reference),
        }
    }
}

impl FromStr for Locator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locator::parse(s)
    }
}

impl Serialize for Locator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Locator::parse(&s).map_err(serde::de::Error::custom)
    }
}
