//! Build resolution errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::Locator;

/// Environment faults hit while resolving directives.
///
/// Policy decisions (disabled scripts, soft links, incompatible
/// platforms) are not errors; they produce a skipped decision instead.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to check for `{}` in {locator}", path.display())]
    Probe {
        locator: Locator,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
