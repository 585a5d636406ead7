//! scriptgate - decides which install-time build steps a package runs
//!
//! Given a package, its manifest, its unpacked files and the install's
//! configuration, this crate resolves the ordered build directives an
//! executor should run, or decides that the build is skipped and reports
//! exactly one reason why.

pub mod build;
pub mod core;
pub mod ops;
pub mod report;
pub mod util;

/// Test utilities and mocks for scriptgate unit tests.
///
/// Only compiled for tests. Provides in-memory package filesystems and
/// on-disk package fixtures.
#[cfg(test)]
pub mod test_support;

pub use build::{BuildDecision, BuildDirective, BuildDirectiveResolver, BuildError, HostPlatform};
pub use core::{DependencyMeta, FetchResult, LinkType, Locator, Manifest, Package, PackageFs};
pub use report::{MessageName, Report};
pub use util::context::GlobalContext;
pub use util::Config;
