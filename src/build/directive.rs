//! Build directives handed to the executor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One build step. A package's directives run in list order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum BuildDirective {
    /// Run the manifest's lifecycle script with this name.
    Script(String),
    /// Run a literal shell command not taken from the manifest.
    Shellcode(String),
}

impl BuildDirective {
    pub fn script(name: impl Into<String>) -> Self {
        BuildDirective::Script(name.into())
    }

    pub fn shellcode(command: impl Into<String>) -> Self {
        BuildDirective::Shellcode(command.into())
    }
}

impl fmt::Display for BuildDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildDirective::Script(name) => write!(f, "script `{}`", name),
            BuildDirective::Shellcode(command) => write!(f, "shell `{}`", command),
        }
    }
}
