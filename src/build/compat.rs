//! Manifest `os`/`cpu` compatibility.

use crate::build::platform::HostPlatform;
use crate::core::{Manifest, Package};
use crate::report::{MessageName, Report};

/// Checks a package's declared platforms against the host.
///
/// Incompatibility is an expected outcome: it is reported as a warning and
/// returned as `false`, never as an error.
#[derive(Clone, Copy)]
pub struct CompatibilityChecker<'a> {
    host: &'a HostPlatform,
    report: &'a dyn Report,
}

impl<'a> CompatibilityChecker<'a> {
    pub fn new(host: &'a HostPlatform, report: &'a dyn Report) -> Self {
        CompatibilityChecker { host, report }
    }

    /// Whether `manifest` admits the host. The OS check runs first and
    /// short-circuits, so at most one warning is emitted.
    pub fn is_compatible(&self, package: &Package, manifest: &Manifest) -> bool {
        self.check(package, manifest).is_none()
    }

    /// Like [`is_compatible`](Self::is_compatible), but names the failed
    /// check.
    pub fn check(&self, package: &Package, manifest: &Manifest) -> Option<MessageName> {
        let locator = package.locator();

        if !manifest.supports_os(&self.host.os) {
            tracing::debug!(%locator, os = %self.host.os, "platform not supported by manifest");
            self.report.report_warning_once(
                MessageName::IncompatibleOs,
                locator,
                &format!(
                    "{} The platform {} is incompatible with this module, build skipped.",
                    locator, self.host.os
                ),
            );
            return Some(MessageName::IncompatibleOs);
        }

        if !manifest.supports_cpu(&self.host.cpu) {
            tracing::debug!(%locator, cpu = %self.host.cpu, "architecture not supported by manifest");
            self.report.report_warning_once(
                MessageName::IncompatibleCpu,
                locator,
                &format!(
                    "{} The CPU architecture {} is incompatible with this module, build skipped.",
                    locator, self.host.cpu
                ),
            );
            return Some(MessageName::IncompatibleCpu);
        }

        None
    }
}

/// One-shot form of [`CompatibilityChecker::is_compatible`].
pub fn is_compatible(
    package: &Package,
    manifest: &Manifest,
    host: &HostPlatform,
    report: &dyn Report,
) -> bool {
    CompatibilityChecker::new(host, report).is_compatible(package, manifest)
}
