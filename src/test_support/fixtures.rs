//! Test fixtures for on-disk packages.

use std::collections::BTreeMap;
use std::path::Path;

use tempfile::TempDir;

/// Builder for an unpacked package directory.
#[derive(Debug, Clone)]
pub struct PackageDir {
    name: String,
    version: String,
    os: Vec<String>,
    cpu: Vec<String>,
    scripts: BTreeMap<String, String>,
    binding_gyp: bool,
}

impl PackageDir {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        PackageDir {
            name: name.into(),
            version: version.into(),
            os: Vec::new(),
            cpu: Vec::new(),
            scripts: BTreeMap::new(),
            binding_gyp: false,
        }
    }

    pub fn script(mut self, name: &str, command: &str) -> Self {
        self.scripts.insert(name.to_string(), command.to_string());
        self
    }

    pub fn os(mut self, os: &[&str]) -> Self {
        self.os = os.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn cpu(mut self, cpu: &[&str]) -> Self {
        self.cpu = cpu.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Ship a `binding.gyp` at the package root.
    pub fn binding_gyp(mut self) -> Self {
        self.binding_gyp = true;
        self
    }

    /// The `package.json` contents.
    pub fn manifest_json(&self) -> String {
        serde_json::json!({
            "name": self.name,
            "version": self.version,
            "os": self.os,
            "cpu": self.cpu,
            "scripts": self.scripts,
        })
        .to_string()
    }

    /// Write the package into a fresh temporary directory.
    pub fn write(&self) -> WrittenPackage {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), self.manifest_json()).unwrap();
        if self.binding_gyp {
            std::fs::write(dir.path().join("binding.gyp"), "{\"targets\": []}").unwrap();
        }
        WrittenPackage { dir }
    }
}

/// A package on disk; removed when dropped.
#[derive(Debug)]
pub struct WrittenPackage {
    dir: TempDir,
}

impl WrittenPackage {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
