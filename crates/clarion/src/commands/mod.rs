//! CLI command implementations.

pub(crate) mod audit;
pub(crate) mod build;

pub(crate) use audit::AuditArgs;
pub(crate) use build::BuildArgs;
