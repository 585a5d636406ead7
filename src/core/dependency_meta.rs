//! Per-dependency build overrides (`dependencies-meta`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::Locator;

/// Build override for a single dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyMeta {
    /// `Some(true)` opts back in when scripts are disabled globally,
    /// `Some(false)` disables the build outright.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built: Option<bool>,
}

impl DependencyMeta {
    /// Meta with an explicit `built` flag.
    pub fn built(built: bool) -> Self {
        DependencyMeta { built: Some(built) }
    }

    /// Explicitly allowed to build, even with scripts disabled globally.
    pub fn is_build_forced(&self) -> bool {
        self.built == Some(true)
    }

    /// Explicitly forbidden from building.
    pub fn is_build_disabled(&self) -> bool {
        self.built == Some(false)
    }

    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn merge(&mut self, other: &DependencyMeta) {
        if other.built.is_some() {
            self.built = other.built;
        }
    }
}

/// Dependency metas keyed by ident (`name`, `@scope/name`) or by
/// ident + version (`name@1.2.3`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyMetaMap {
    entries: BTreeMap<String, DependencyMeta>,
}

impl DependencyMetaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the meta for a key, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, meta: DependencyMeta) {
        self.entries.insert(key.into(), meta);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Resolve the effective meta for a locator.
    ///
    /// The ident-wide entry applies first; an entry naming the exact
    /// version (or exact reference) is overlaid on top of it.
    pub fn get(&self, locator: &Locator) -> DependencyMeta {
        let ident = locator.ident();
        let mut meta = DependencyMeta::default();

        if let Some(entry) = self.entries.get(&ident) {
            meta.merge(entry);
        }

        if let Some(version) = locator.version() {
            if let Some(entry) = self.entries.get(&format!("{}@{}", ident, version)) {
                meta.merge(entry);
            }
        }

        if let Some(entry) = self.entries.get(&locator.to_string()) {
            meta.merge(entry);
        }

        meta
    }

    /// Merge another map into this one, key by key (other takes precedence).
    pub fn merge(&mut self, other: &DependencyMetaMap) {
        for (key, meta) in &other.entries {
            self.entries.entry(key.clone()).or_default().merge(meta);
        }
    }
}
