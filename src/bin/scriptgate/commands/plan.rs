//! `scriptgate plan` command

use anyhow::{Context, Result};

use crate::cli::PlanArgs;
use scriptgate::build::BuildDecision;
use scriptgate::core::LinkType;
use scriptgate::ops::{plan_packages, PackagePlan, PlanContext, PlanRequest};
use scriptgate::report::{OutputMode, StreamReport};
use scriptgate::util::GlobalContext;

pub fn execute(args: PlanArgs, output: OutputMode) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let mut config = ctx.load_config()?;

    // CLI overrides config
    if let Some(enable) = args.enable_scripts {
        config.enable_scripts = enable;
    }
    let host = config
        .host()
        .with_overrides(args.platform.as_deref(), args.arch.as_deref());

    let mode = if args.json { OutputMode::Json } else { output };
    let report = StreamReport::stderr(mode);

    let link_type = if args.soft { LinkType::Soft } else { LinkType::Hard };
    let dirs = if args.dirs.is_empty() {
        vec![ctx.cwd().to_path_buf()]
    } else {
        args.dirs.iter().map(|dir| ctx.resolve_path(dir)).collect()
    };
    let requests: Vec<_> = dirs
        .into_iter()
        .map(|dir| PlanRequest::new(dir).with_link_type(link_type))
        .collect();

    let plans = plan_packages(&PlanContext::new(&config, &host, &report), &requests)?;

    if args.json {
        let json = serde_json::to_string_pretty(&plans).context("failed to serialize plans")?;
        println!("{}", json);
    } else {
        for plan in &plans {
            println!("{}", describe(plan));
        }
    }

    Ok(())
}

fn describe(plan: &PackagePlan) -> String {
    match &plan.decision {
        BuildDecision::Run(directives) => {
            let steps: Vec<_> = directives.iter().map(|d| d.to_string()).collect();
            format!("{}: run {}", plan.locator, steps.join(", "))
        }
        BuildDecision::Nothing => format!("{}: nothing to build", plan.locator),
        BuildDecision::Skipped(reason) => format!("{}: skipped ({})", plan.locator, reason),
    }
}
