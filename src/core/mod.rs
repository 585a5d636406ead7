//! Core data structures for scriptgate.
//!
//! This module contains the inputs a build decision is made from:
//! - Package identity (Locator, Package, LinkType)
//! - The manifest subset (os, cpu, scripts)
//! - Dependency-level overrides
//! - The fetched file tree

pub mod dependency_meta;
pub mod fetch;
pub mod locator;
pub mod manifest;
pub mod package;

pub use dependency_meta::{DependencyMeta, DependencyMetaMap};
pub use fetch::{DiskFs, FetchResult, PackageFs};
pub use locator::{Locator, LocatorError};
pub use manifest::{Manifest, INSTALL_SCRIPTS, MANIFEST_NAME};
pub use package::{LinkType, Package};
