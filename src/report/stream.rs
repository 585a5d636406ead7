//! Report that writes straight to a terminal or pipe.
//!
//! Human mode prints one diagnostic block per message. JSON mode prints one
//! event object per line so the output can be consumed by other tools.

use std::io::{self, IsTerminal, Write};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::core::Locator;
use crate::report::{MessageName, OnceSet, Report, ReportEntry};
use crate::util::diagnostic::Severity;

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Output mode - Human and Json are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable diagnostics.
    Human {
        color: bool,
        /// Drop info-level messages.
        quiet: bool,
    },
    /// One JSON object per line.
    Json,
}

impl OutputMode {
    /// Human mode for stderr, resolving `Auto` against the terminal.
    pub fn human(color: ColorChoice, quiet: bool) -> Self {
        let color = match color {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };
        OutputMode::Human { color, quiet }
    }
}

/// JSON event schema. Fields may be added but not renamed.
#[derive(Debug, Serialize)]
#[serde(tag = "reason")]
enum ReportEvent<'a> {
    #[serde(rename = "diagnostic")]
    Diagnostic {
        level: Severity,
        name: MessageName,
        code: String,
        locator: &'a Locator,
        message: &'a str,
    },
}

/// Streams each message as it is emitted.
#[derive(Debug)]
pub struct StreamReport<W: Write + Send = io::Stderr> {
    mode: OutputMode,
    once: OnceSet,
    out: Mutex<W>,
}

impl StreamReport<io::Stderr> {
    /// Report writing to stderr.
    pub fn stderr(mode: OutputMode) -> Self {
        Self::new(io::stderr(), mode)
    }
}

impl<W: Write + Send> StreamReport<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        StreamReport {
            mode,
            once: OnceSet::new(),
            out: Mutex::new(out),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, severity: Severity, name: MessageName, locator: &Locator, text: &str) {
        if !self.once.first(name, locator) {
            return;
        }

        let rendered = match self.mode {
            OutputMode::Human { quiet: true, .. } if severity == Severity::Info => return,
            OutputMode::Human { color, .. } => {
                ReportEntry::new(severity, name, locator, text)
                    .to_diagnostic()
                    .format(color)
            }
            OutputMode::Json => {
                let event = ReportEvent::Diagnostic {
                    level: severity,
                    name,
                    code: name.code_str(),
                    locator,
                    message: text,
                };
                match serde_json::to_string(&event) {
                    Ok(line) => format!("{}\n", line),
                    Err(e) => {
                        tracing::warn!("failed to serialize report event: {}", e);
                        return;
                    }
                }
            }
        };

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_all(rendered.as_bytes()).and_then(|_| out.flush()) {
            tracing::debug!("failed to write report message: {}", e);
        }
    }
}

impl<W: Write + Send> Report for StreamReport<W> {
    fn report_warning_once(&self, name: MessageName, locator: &Locator, text: &str) {
        self.emit(Severity::Warning, name, locator, text);
    }

    fn report_info_once(&self, name: MessageName, locator: &Locator, text: &str) {
        self.emit(Severity::Info, name, locator, text);
    }
}
