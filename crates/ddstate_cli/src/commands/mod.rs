//! CLI command handlers.

mod context;
/// Downtime scheduling and cancellation.
pub mod downtime;
/// Host tag management.
pub mod tag;

/// Convenience alias for command return types.
pub type Result<T = ()> = anyhow::Result<T>;
