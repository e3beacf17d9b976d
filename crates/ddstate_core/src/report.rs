//! The terminal report every run ends with.

use ddstate_api::ApiError;
use serde::Serialize;

/// Outcome of a reconciliation run.
///
/// Serialises to `{"changed": bool, "msg": ...}` on success and
/// `{"failed": true, "msg": "..."}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// The run completed.
    Success {
        /// Whether remote state was modified.
        changed: bool,
        /// The remote object or a confirmation message.
        msg: serde_json::Value,
    },
    /// The run stopped on an error.
    Failure {
        /// Always `true`.
        failed: bool,
        /// The remote error text or the error's string form.
        msg: String,
    },
}

impl Report {
    /// A successful run that modified remote state.
    #[must_use]
    pub fn changed(msg: impl Into<serde_json::Value>) -> Self {
        Self::Success {
            changed: true,
            msg: msg.into(),
        }
    }

    /// A failed run.
    #[must_use]
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failure {
            failed: true,
            msg: msg.into(),
        }
    }

    /// Returns `true` if the run failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Returns `true` if the run modified remote state.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Success { changed: true, .. })
    }

    /// Returns the message as display text, unquoting plain strings.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success {
                msg: serde_json::Value::String(text),
                ..
            } => text.clone(),
            Self::Success { msg, .. } => serde_json::to_string_pretty(msg).unwrap_or_else(|_| msg.to_string()),
            Self::Failure { msg, .. } => msg.clone(),
        }
    }
}

/// Turns the outcome of a mutating API call into a report.
///
/// The payload becomes the message of a `changed` report; an error becomes a
/// failure carrying its string form.
pub fn invoke<T: Serialize>(outcome: Result<T, ApiError>) -> Report {
    match outcome.map_err(|e| e.to_string()).and_then(|payload| {
        serde_json::to_value(payload).map_err(|e| format!("failed to encode response: {e}"))
    }) {
        Ok(msg) => Report::changed(msg),
        Err(msg) => Report::failed(msg),
    }
}
