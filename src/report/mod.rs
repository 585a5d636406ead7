//! Diagnostic sink for build decisions.
//!
//! A report is injected into the resolver and scoped to a single install
//! run. Its "once" semantics are keyed by `(MessageName, Locator)`: the
//! first emission for a key is kept, repeats are dropped. Reports are
//! shared across threads when packages are planned in parallel.

pub mod buffered;
pub mod stream;

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::core::Locator;
use crate::util::diagnostic::{suggestions, Diagnostic, Severity};

pub use buffered::BufferedReport;
pub use stream::{ColorChoice, OutputMode, StreamReport};

/// Kinds of message a build decision can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageName {
    DisabledBuildScripts,
    BuildDisabled,
    SoftLinkBuild,
    IncompatibleOs,
    IncompatibleCpu,
}

impl MessageName {
    /// Stable numeric code.
    pub fn code(&self) -> u16 {
        match self {
            MessageName::DisabledBuildScripts => 4,
            MessageName::BuildDisabled => 5,
            MessageName::SoftLinkBuild => 6,
            MessageName::IncompatibleOs => 7,
            MessageName::IncompatibleCpu => 8,
        }
    }

    /// Printable code, e.g. `SG0004`.
    pub fn code_str(&self) -> String {
        format!("SG{:04}", self.code())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageName::DisabledBuildScripts => "DISABLED_BUILD_SCRIPTS",
            MessageName::BuildDisabled => "BUILD_DISABLED",
            MessageName::SoftLinkBuild => "SOFT_LINK_BUILD",
            MessageName::IncompatibleOs => "INCOMPATIBLE_OS",
            MessageName::IncompatibleCpu => "INCOMPATIBLE_CPU",
        }
    }
}

impl fmt::Display for MessageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-only diagnostic sink.
pub trait Report: Send + Sync {
    /// Emit a warning unless one was already emitted for `(name, locator)`.
    fn report_warning_once(&self, name: MessageName, locator: &Locator, text: &str);

    /// Emit an info message unless one was already emitted for `(name, locator)`.
    fn report_info_once(&self, name: MessageName, locator: &Locator, text: &str);

    /// Dispatch on severity. Errors are reported as warnings; policy
    /// decisions never produce errors.
    fn report_once(&self, severity: Severity, name: MessageName, locator: &Locator, text: &str) {
        match severity {
            Severity::Info => self.report_info_once(name, locator, text),
            Severity::Warning | Severity::Error => self.report_warning_once(name, locator, text),
        }
    }
}

/// The "seen" set behind a report's once semantics.
#[derive(Debug, Default)]
pub struct OnceSet {
    seen: Mutex<HashSet<(MessageName, Locator)>>,
}

impl OnceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the key; true the first time it is seen.
    pub fn first(&self, name: MessageName, locator: &Locator) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        let first = seen.insert((name, locator.clone()));
        if !first {
            tracing::trace!(%name, %locator, "suppressed repeated message");
        }
        first
    }

    /// Forget every key, starting a new run.
    pub fn clear(&self) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// One emitted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub severity: Severity,
    pub name: MessageName,
    pub locator: Locator,
    pub text: String,
}

impl ReportEntry {
    pub fn new(severity: Severity, name: MessageName, locator: &Locator, text: &str) -> Self {
        ReportEntry {
            severity,
            name,
            locator: locator.clone(),
            text: text.to_string(),
        }
    }

    /// Render as a terminal diagnostic, with a fix where one exists.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::new(self.severity, self.text.clone()).with_code(self.name.code_str());
        let ident = self.locator.ident();

        match self.name {
            MessageName::DisabledBuildScripts => diag.with_suggestion(suggestions::force_build(&ident)),
            MessageName::BuildDisabled => {
                diag.with_suggestion(suggestions::remove_build_disable(&ident))
            }
            MessageName::SoftLinkBuild => diag.with_suggestion(suggestions::SOFT_LINK),
            MessageName::IncompatibleOs | MessageName::IncompatibleCpu => diag,
        }
    }
}
