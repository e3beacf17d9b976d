//! Convenience re-exports of the most commonly used types.

pub use crate::config::{Config, ConfigError, Overrides, Settings};
pub use crate::downtime::DowntimeReconciler;
pub use crate::error::{DdStateError, ParamError, ReconcileError};
pub use crate::params::{DowntimeParams, State, TagParams};
pub use crate::report::Report;
pub use crate::tag::TagReconciler;
