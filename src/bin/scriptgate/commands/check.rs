//! `scriptgate check` command

use anyhow::{bail, Result};

use crate::cli::CheckArgs;
use scriptgate::ops::check_package;
use scriptgate::report::{OutputMode, StreamReport};
use scriptgate::util::fs::find_manifest;
use scriptgate::util::GlobalContext;

pub fn execute(args: CheckArgs, output: OutputMode) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config()?;
    let host = config
        .host()
        .with_overrides(args.platform.as_deref(), args.arch.as_deref());

    let dir = match &args.dir {
        Some(dir) => ctx.resolve_path(dir),
        None => {
            let manifest = find_manifest(ctx.cwd())?;
            manifest
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| ctx.cwd().to_path_buf())
        }
    };

    let report = StreamReport::stderr(output);
    let (locator, compatible) = check_package(&host, &report, &dir)?;

    if !compatible {
        bail!("{} cannot be built on {}", locator, host);
    }

    println!("{} is compatible with {}", locator, host);
    Ok(())
}
