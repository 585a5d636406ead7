//! High-level operations.
//!
//! This module contains the implementation of scriptgate commands.

pub mod plan;

pub use plan::{
    check_package, load_package, plan_package, plan_packages, LoadedPackage, PackagePlan,
    PlanContext, PlanRequest,
};
