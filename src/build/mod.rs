//! Build decisions for installed packages.
//!
//! Two pieces, evaluated leaf-first:
//! - `compat`: does the package's `os`/`cpu` admit the host?
//! - `resolver`: which build directives run, if the policy gates allow it?
//!
//! Nothing here runs a build; the output is an ordered list of
//! [`BuildDirective`]s for an executor.

pub mod compat;
pub mod directive;
pub mod errors;
pub mod platform;
pub mod resolver;

pub use compat::{is_compatible, CompatibilityChecker};
pub use directive::BuildDirective;
pub use errors::BuildError;
pub use platform::HostPlatform;
pub use resolver::{BuildDecision, BuildDirectiveResolver, Gate, GateInput, POLICY_GATES};
