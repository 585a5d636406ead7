//! `package.json` manifest subset.
//!
//! Only the fields that decide whether and how a package builds are read:
//! `os`, `cpu` and `scripts`, plus `name`/`version` so a package can be
//! identified when it is planned straight from disk.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Manifest file name.
pub const MANIFEST_NAME: &str = "package.json";

/// Lifecycle scripts that run at install time, in execution order.
pub const INSTALL_SCRIPTS: [&str; 3] = ["preinstall", "install", "postinstall"];

/// The parsed manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Package ident (`name` or `@scope/name`)
    pub name: Option<String>,

    /// Package version (semver)
    pub version: Option<String>,

    /// Allowed platforms; empty means all
    #[serde(deserialize_with = "rule_list")]
    pub os: Vec<String>,

    /// Allowed CPU architectures; empty means all
    #[serde(deserialize_with = "rule_list")]
    pub cpu: Vec<String>,

    /// Script name -> command
    pub scripts: BTreeMap<String, String>,
}

impl Manifest {
    /// Load a manifest from a `package.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Parse manifest JSON.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Exact, case-sensitive script lookup.
    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    /// Parse the declared version, if any.
    pub fn version(&self) -> Result<Option<Version>> {
        self.version
            .as_deref()
            .map(|v| {
                Version::parse(v).with_context(|| format!("invalid manifest version `{}`", v))
            })
            .transpose()
    }

    /// Whether the `os` field admits the given platform.
    pub fn supports_os(&self, platform: &str) -> bool {
        is_field_compatible(&self.os, platform)
    }

    /// Whether the `cpu` field admits the given architecture.
    pub fn supports_cpu(&self, arch: &str) -> bool {
        is_field_compatible(&self.cpu, arch)
    }
}

/// Read an `os`/`cpu` field. Anything but an array (including `null`)
/// means unrestricted; non-string items are dropped.
fn rule_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(rule) => Some(rule),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Check a value against an `os`/`cpu` style rule list.
///
/// An empty list admits everything. Entries prefixed with `!` exclude a
/// value; if any plain entry is present, the value must match one of them.
/// A matching `!` entry rejects the value wherever it appears in the list,
/// unlike a first-match reading where `["x64", "!x64"]` would admit `x64`.
pub fn is_field_compatible(rules: &[String], actual: &str) -> bool {
    if rules.is_empty() {
        return true;
    }

    let mut has_allow_list = false;
    let mut allowed = false;

    for rule in rules {
        match rule.strip_prefix('!') {
            Some(blocked) => {
                if blocked == actual {
                    return false;
                }
            }
            None => {
                has_allow_list = true;
                allowed |= rule == actual;
            }
        }
    }

    !has_allow_list || allowed
}
