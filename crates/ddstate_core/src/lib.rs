//! Downtime and host tag reconcilers for ddstate.
//!
//! Each reconciler compares the desired state of one Datadog resource with
//! what the API reports and issues the corrective call. Every run ends with a
//! single [`Report`].
//!
//! # Main Types
//!
//! - [`DowntimeReconciler`] - Schedules or cancels downtimes by scope
//! - [`TagReconciler`] - Adds tags to, or removes tags from, a host
//! - [`Report`] - The `changed`/`failed` outcome of a run
//! - [`Config`] - Connection settings loaded from `.ddstate.toml`
//!
//! # Error Handling
//!
//! Errors raised before a run starts are typed with [`thiserror`]:
//!
//! - [`ParamError`] - Invalid invocation parameters
//! - [`ConfigError`] - Configuration loading and credential resolution failures
//! - [`DdStateError`] - Top-level error enum combining the above
//!
//! Once a reconciler is running, every error is folded into a failed
//! [`Report`] instead of being returned.

/// Connection settings loaded from `.ddstate.toml`.
pub mod config;
/// Downtime reconciliation.
pub mod downtime;
/// Error types.
pub mod error;
/// Desired-state parameters and list parsing.
pub mod params;
/// Common re-exports for internal use.
pub mod prelude;
/// The terminal report of a run.
pub mod report;
/// Host tag reconciliation.
pub mod tag;
#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{Config, ConfigError, Overrides, Settings};
pub use downtime::{DowntimeReconciler, scope_matches};
pub use error::{DdStateError, ParamError, ReconcileError};
pub use params::{DowntimeParams, State, TagParams, split_list};
pub use report::{Report, invoke};
pub use tag::{TagReconciler, merge_tags, user_tags};

/// Default filename for ddstate configuration.
pub const CONFIG_FILENAME: &str = ".ddstate.toml";
