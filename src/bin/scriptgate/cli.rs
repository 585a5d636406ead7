//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use scriptgate::report::{ColorChoice, OutputMode};

/// scriptgate - decide which install-time build scripts a package runs
#[derive(Parser)]
#[command(name = "scriptgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// When to color diagnostics: auto, always or never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Human output settings derived from the global flags.
    pub fn output(&self) -> OutputMode {
        let color = if self.no_color {
            ColorChoice::Never
        } else {
            self.color
        };
        OutputMode::human(color, self.quiet)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decide which build steps each package runs
    Plan(PlanArgs),

    /// Check a package's os/cpu fields against the host
    Check(CheckArgs),
}

#[derive(Args)]
pub struct PlanArgs {
    /// Unpacked package directories (defaults to current directory)
    pub dirs: Vec<PathBuf>,

    /// Treat the packages as soft-linked
    #[arg(long)]
    pub soft: bool,

    /// Print plans and diagnostics as JSON
    #[arg(long)]
    pub json: bool,

    /// Platform to check manifests against (e.g. linux, darwin, win32)
    #[arg(long)]
    pub platform: Option<String>,

    /// Architecture to check manifests against (e.g. x64, arm64)
    #[arg(long)]
    pub arch: Option<String>,

    /// Override whether build scripts are enabled
    #[arg(long, value_name = "BOOL")]
    pub enable_scripts: Option<bool>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Package directory (defaults to the nearest package.json)
    pub dir: Option<PathBuf>,

    /// Platform to check against
    #[arg(long)]
    pub platform: Option<String>,

    /// Architecture to check against
    #[arg(long)]
    pub arch: Option<String>,
}
