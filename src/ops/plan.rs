//! Implementation of `scriptgate plan`.
//!
//! Loads unpacked packages from disk and decides, for each one, which build
//! directives an executor should run.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use semver::Version;
use serde::Serialize;

use crate::build::{BuildDecision, BuildDirectiveResolver, HostPlatform};
use crate::core::{FetchResult, LinkType, Locator, Manifest, Package, MANIFEST_NAME};
use crate::report::Report;
use crate::util::fs::normalize_path;
use crate::util::Config;

/// A package directory to plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    /// Directory containing `package.json`
    pub dir: PathBuf,

    /// How the package is linked into the install tree
    pub link_type: LinkType,

    /// Reference to use instead of `npm:<version>`
    pub reference: Option<String>,
}

impl PlanRequest {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PlanRequest {
            dir: dir.into(),
            link_type: LinkType::Hard,
            reference: None,
        }
    }

    pub fn with_link_type(mut self, link_type: LinkType) -> Self {
        self.link_type = link_type;
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Shared inputs of one planning run.
#[derive(Clone, Copy)]
pub struct PlanContext<'a> {
    pub config: &'a Config,
    pub host: &'a HostPlatform,
    pub report: &'a dyn Report,
}

impl<'a> PlanContext<'a> {
    pub fn new(config: &'a Config, host: &'a HostPlatform, report: &'a dyn Report) -> Self {
        PlanContext {
            config,
            host,
            report,
        }
    }

    fn resolver(&self) -> BuildDirectiveResolver<'a> {
        BuildDirectiveResolver::new(self.config, self.host, self.report)
    }
}

/// The decision for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagePlan {
    pub locator: Locator,
    pub dir: PathBuf,
    pub link_type: LinkType,
    pub decision: BuildDecision,
}

/// A package loaded from disk, ready to be evaluated.
#[derive(Debug, Clone)]
pub struct LoadedPackage {
    pub package: Package,
    pub manifest: Manifest,
    pub fetch: FetchResult,
}

/// Load the package in `request.dir`.
pub fn load_package(request: &PlanRequest) -> Result<LoadedPackage> {
    let manifest = Manifest::load(&request.dir.join(MANIFEST_NAME))?;
    let locator = locator_for(&manifest, request)?;

    Ok(LoadedPackage {
        package: Package::new(locator, request.link_type),
        manifest,
        fetch: FetchResult::from_dir(&request.dir),
    })
}

fn locator_for(manifest: &Manifest, request: &PlanRequest) -> Result<Locator> {
    let Some(name) = manifest.name.as_deref() else {
        bail!(
            "manifest in `{}` has no `name`\n\
             help: packages need a name to be identified in reports",
            request.dir.display()
        );
    };

    let locator = match &request.reference {
        Some(reference) => Locator::from_ident(name, reference.clone())?,
        None => {
            let version = manifest.version()?.unwrap_or_else(|| Version::new(0, 0, 0));
            Locator::npm(name, &version)?
        }
    };

    Ok(locator)
}

/// Plan a single package.
pub fn plan_package(ctx: &PlanContext<'_>, request: &PlanRequest) -> Result<PackagePlan> {
    let loaded = load_package(request)
        .with_context(|| format!("failed to load package in {}", request.dir.display()))?;
    let locator = loaded.package.locator();
    let meta = ctx.config.dependency_meta(locator);

    let decision = ctx
        .resolver()
        .evaluate(&loaded.package, &loaded.fetch, &loaded.manifest, &meta)
        .with_context(|| format!("failed to resolve build steps for {}", locator))?;

    Ok(PackagePlan {
        locator: locator.clone(),
        dir: normalize_path(&request.dir),
        link_type: request.link_type,
        decision,
    })
}

/// Plan many packages in parallel. Results keep the order of `requests`;
/// the first failure aborts the run.
pub fn plan_packages(ctx: &PlanContext<'_>, requests: &[PlanRequest]) -> Result<Vec<PackagePlan>> {
    tracing::debug!(packages = requests.len(), host = %ctx.host, "planning builds");

    requests
        .par_iter()
        .map(|request| plan_package(ctx, request))
        .collect()
}

/// Check only the manifest's `os`/`cpu` against the host.
pub fn check_package(host: &HostPlatform, report: &dyn Report, dir: &Path) -> Result<(Locator, bool)> {
    let loaded = load_package(&PlanRequest::new(dir))
        .with_context(|| format!("failed to load package in {}", dir.display()))?;
    let compatible = crate::build::is_compatible(&loaded.package, &loaded.manifest, host, report);

    Ok((loaded.package.locator().clone(), compatible))
}
