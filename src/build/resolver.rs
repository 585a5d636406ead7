//! Build directive resolution.
//!
//! Resolution has two phases. Candidate directives are synthesized from the
//! manifest and the fetched tree, then a fixed sequence of gates decides
//! whether they may run. The first gate that blocks emits exactly one
//! message and the package is skipped; later gates are not consulted.

use serde::Serialize;

use crate::build::compat::CompatibilityChecker;
use crate::build::directive::BuildDirective;
use crate::build::errors::BuildError;
use crate::build::platform::HostPlatform;
use crate::core::{DependencyMeta, FetchResult, Locator, Manifest, Package, INSTALL_SCRIPTS};
use crate::report::{MessageName, Report};
use crate::util::diagnostic::Severity;
use crate::util::Config;

/// Marker file of a node-gyp native addon.
pub const NODE_GYP_FILE: &str = "binding.gyp";

/// Command run for native addons without an `install` script.
pub const NODE_GYP_REBUILD: &str = "node-gyp rebuild";

/// What a gate gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct GateInput<'a> {
    pub package: &'a Package,
    pub meta: &'a DependencyMeta,
    pub config: &'a Config,
}

/// A policy gate: a predicate and the single message it emits when it
/// blocks a build.
pub struct Gate {
    pub name: MessageName,
    pub severity: Severity,
    blocks: fn(&GateInput<'_>) -> bool,
    message: fn(&Locator) -> String,
}

impl Gate {
    /// Whether this gate stops the build.
    pub fn blocks(&self, input: &GateInput<'_>) -> bool {
        (self.blocks)(input)
    }

    /// The message emitted when the gate blocks.
    pub fn message(&self, locator: &Locator) -> String {
        (self.message)(locator)
    }
}

/// Configuration gates, in evaluation order. Manifest compatibility is
/// checked after all of them pass.
pub static POLICY_GATES: [Gate; 3] = [
    Gate {
        name: MessageName::DisabledBuildScripts,
        severity: Severity::Warning,
        blocks: |input| !input.config.enable_scripts && !input.meta.is_build_forced(),
        message: |locator| {
            format!(
                "{} lists build scripts, but all build scripts have been disabled.",
                locator
            )
        },
    },
    Gate {
        name: MessageName::SoftLinkBuild,
        severity: Severity::Warning,
        blocks: |input| !input.package.is_hard_linked(),
        message: |locator| {
            format!(
                "{} lists build scripts, but is referenced through a soft link. Soft links don't support build scripts, so they'll be ignored.",
                locator
            )
        },
    },
    Gate {
        name: MessageName::BuildDisabled,
        severity: Severity::Info,
        blocks: |input| input.meta.is_build_disabled(),
        message: |locator| {
            format!(
                "{} lists build scripts, but its build has been explicitly disabled through configuration.",
                locator
            )
        },
    },
];

/// Outcome of resolving one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "lowercase")]
pub enum BuildDecision {
    /// Run these directives, in order.
    Run(Vec<BuildDirective>),
    /// The package has no build steps.
    Nothing,
    /// The build was suppressed; the message kind says why.
    Skipped(MessageName),
}

impl BuildDecision {
    /// The directives to execute; empty unless the build runs.
    pub fn directives(&self) -> &[BuildDirective] {
        match self {
            BuildDecision::Run(directives) => directives,
            BuildDecision::Nothing | BuildDecision::Skipped(_) => &[],
        }
    }

    pub fn into_directives(self) -> Vec<BuildDirective> {
        match self {
            BuildDecision::Run(directives) => directives,
            BuildDecision::Nothing | BuildDecision::Skipped(_) => Vec::new(),
        }
    }

    pub fn skip_reason(&self) -> Option<MessageName> {
        match self {
            BuildDecision::Skipped(name) => Some(*name),
            _ => None,
        }
    }
}

/// Resolves the build directives of packages within one install run.
#[derive(Clone, Copy)]
pub struct BuildDirectiveResolver<'a> {
    config: &'a Config,
    host: &'a HostPlatform,
    report: &'a dyn Report,
}

impl<'a> BuildDirectiveResolver<'a> {
    pub fn new(config: &'a Config, host: &'a HostPlatform, report: &'a dyn Report) -> Self {
        BuildDirectiveResolver {
            config,
            host,
            report,
        }
    }

    /// Directives the package would run if nothing blocked it.
    ///
    /// Lifecycle scripts come first, in install order. A `binding.gyp`
    /// at the package root adds a node-gyp rebuild, unless the manifest has
    /// its own `install` script.
    pub fn candidates(
        &self,
        package: &Package,
        fetch: &FetchResult,
        manifest: &Manifest,
    ) -> Result<Vec<BuildDirective>, BuildError> {
        let mut directives: Vec<BuildDirective> = INSTALL_SCRIPTS
            .iter()
            .filter(|name| manifest.has_script(name))
            .map(|name| BuildDirective::script(*name))
            .collect();

        if !manifest.has_script("install") {
            let path = fetch.path_of(NODE_GYP_FILE);
            let has_binding = fetch
                .package_fs
                .exists(&path)
                .map_err(|source| BuildError::Probe {
                    locator: package.locator().clone(),
                    path,
                    source,
                })?;

            if has_binding {
                directives.push(BuildDirective::shellcode(NODE_GYP_REBUILD));
            }
        }

        Ok(directives)
    }

    /// Decide whether and how the package builds.
    pub fn evaluate(
        &self,
        package: &Package,
        fetch: &FetchResult,
        manifest: &Manifest,
        meta: &DependencyMeta,
    ) -> Result<BuildDecision, BuildError> {
        let locator = package.locator();
        let candidates = self.candidates(package, fetch, manifest)?;

        if candidates.is_empty() {
            tracing::trace!(%locator, "no build steps");
            return Ok(BuildDecision::Nothing);
        }

        let input = GateInput {
            package,
            meta,
            config: self.config,
        };

        if let Some(gate) = POLICY_GATES.iter().find(|gate| gate.blocks(&input)) {
            tracing::debug!(%locator, gate = %gate.name, "build skipped");
            self.report
                .report_once(gate.severity, gate.name, locator, &gate.message(locator));
            return Ok(BuildDecision::Skipped(gate.name));
        }

        if let Some(name) = CompatibilityChecker::new(self.host, self.report).check(package, manifest) {
            return Ok(BuildDecision::Skipped(name));
        }

        tracing::debug!(%locator, steps = candidates.len(), "build will run");
        Ok(BuildDecision::Run(candidates))
    }

    /// The ordered directives to execute; empty when there is nothing to
    /// build or the build is suppressed.
    pub fn resolve(
        &self,
        package: &Package,
        fetch: &FetchResult,
        manifest: &Manifest,
        meta: &DependencyMeta,
    ) -> Result<Vec<BuildDirective>, BuildError> {
        self.evaluate(package, fetch, manifest, meta)
            .map(BuildDecision::into_directives)
    }
}
