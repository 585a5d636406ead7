//! Runtime platform and architecture identifiers.
//!
//! Manifests name platforms the way the JavaScript ecosystem does
//! (`darwin`, `win32`, `x64`, `arm64`), which differs from Rust's target
//! naming (`macos`, `windows`, `x86_64`, `aarch64`).

use std::fmt;

use serde::Serialize;

/// The platform/arch pair manifests are checked against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HostPlatform {
    /// Platform identifier, e.g. `linux`
    pub os: String,
    /// Architecture identifier, e.g. `x64`
    pub cpu: String,
}

impl HostPlatform {
    pub fn new(os: impl Into<String>, cpu: impl Into<String>) -> Self {
        HostPlatform {
            os: os.into(),
            cpu: cpu.into(),
        }
    }

    /// Detect the platform this process runs on.
    pub fn current() -> Self {
        Self::new(
            node_platform(std::env::consts::OS),
            node_arch(std::env::consts::ARCH),
        )
    }

    /// Replace either identifier, keeping the other.
    pub fn with_overrides(mut self, os: Option<&str>, cpu: Option<&str>) -> Self {
        if let Some(os) = os {
            self.os = os.to_string();
        }
        if let Some(cpu) = cpu {
            self.cpu = cpu.to_string();
        }
        self
    }
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.cpu)
    }
}

/// Map a Rust OS name to its manifest identifier.
///
/// Unknown names pass through unchanged.
pub fn node_platform(os: &str) -> &str {
    match os {
        "macos" | "ios" => "darwin",
        "windows" => "win32",
        "solaris" | "illumos" => "sunos",
        other => other,
    }
}

/// Map a Rust architecture name to its manifest identifier.
///
/// Unknown names pass through unchanged.
pub fn node_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        "powerpc" => "ppc",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        "mips64" => "mips64el",
        other => other,
    }
}
