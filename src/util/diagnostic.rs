//! User-facing diagnostic messages.
//!
//! Every skipped build is reported with the reason and, where the user can
//! act on it, the configuration change that would let it run.

use std::fmt;

use serde::Serialize;

/// Common suggestion messages, kept here so wording stays consistent.
pub mod suggestions {
    /// Re-enable a single package while scripts stay disabled globally.
    pub fn force_build(ident: &str) -> String {
        format!(
            "set `built = true` under `[dependencies-meta.\"{}\"]` to allow this package",
            ident
        )
    }

    /// Undo an explicit build disable.
    pub fn remove_build_disable(ident: &str) -> String {
        format!(
            "remove `built = false` from `[dependencies-meta.\"{}\"]` to build it again",
            ident
        )
    }

    /// Soft links have nothing on disk to build.
    pub const SOFT_LINK: &str = "depend on a packed or registry copy if the build must run";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// ANSI color for the severity label.
    fn color_code(&self) -> &'static str {
        match self {
            Severity::Error => "\x1b[1;31m",
            Severity::Warning => "\x1b[1;33m",
            Severity::Info => "\x1b[1;36m",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message with optional code, context and suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Stable message code, e.g. `SG0004`
    pub code: Option<String>,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            code: None,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create a new informational diagnostic.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let label = match &self.code {
            Some(code) => format!("{}[{}]", self.severity, code),
            None => self.severity.to_string(),
        };

        if color {
            output.push_str(&format!(
                "{}{}\x1b[0m: {}\n",
                self.severity.color_code(),
                label,
                self.message
            ));
        } else {
            output.push_str(&format!("{}: {}\n", label, self.message));
        }

        for ctx in &self.context {
            output.push_str(&format!("  → {}\n", ctx));
        }

        for suggestion in &self.suggestions {
            let prefix = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
            output.push_str(&format!("  {}: {}\n", prefix, suggestion));
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}
