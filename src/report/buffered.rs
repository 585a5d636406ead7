//! In-memory report.

use std::sync::{Mutex, PoisonError};

use crate::core::Locator;
use crate::report::{MessageName, OnceSet, Report, ReportEntry};
use crate::util::diagnostic::Severity;

/// Collects entries in emission order.
#[derive(Debug, Default)]
pub struct BufferedReport {
    once: OnceSet,
    entries: Mutex<Vec<ReportEntry>>,
}

impl BufferedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn entries(&self) -> Vec<ReportEntry> {
        self.lock().clone()
    }

    /// Drain the collected entries. Once-keys are kept.
    pub fn take(&self) -> Vec<ReportEntry> {
        std::mem::take(&mut *self.lock())
    }

    /// Names of the emitted messages, in order.
    pub fn names(&self) -> Vec<MessageName> {
        self.lock().iter().map(|e| e.name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|e| e.severity == Severity::Warning)
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, severity: Severity, name: MessageName, locator: &Locator, text: &str) {
        if self.once.first(name, locator) {
            self.lock()
                .push(ReportEntry::new(severity, name, locator, text));
        }
    }
}

impl Report for BufferedReport {
    fn report_warning_once(&self, name: MessageName, locator: &Locator, text: &str) {
        self.push(Severity::Warning, name, locator, text);
    }

    fn report_info_once(&self, name: MessageName, locator: &Locator, text: &str) {
        self.push(Severity::Info, name, locator, text);
    }
}
