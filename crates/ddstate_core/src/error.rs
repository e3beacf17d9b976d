use ddstate_api::ApiError;
use thiserror::Error;

/// Invalid invocation parameters, detected before any remote call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    /// The `state` value is neither `present` nor `absent`.
    #[error("invalid state '{0}' (expected 'present' or 'absent')")]
    InvalidState(String),

    /// The downtime scope list is empty after splitting.
    #[error("scope must contain at least one entry")]
    EmptyScope,

    /// The host query is empty.
    #[error("host must not be empty")]
    EmptyHost,

    /// Tags were not supplied for a `present` tag run.
    #[error("tags are required when state is 'present'")]
    MissingTags,

    /// The downtime ends before it starts.
    #[error("downtime end ({end}) must not be before start ({start})")]
    InvalidWindow {
        /// Requested start timestamp.
        start: i64,
        /// Requested end timestamp.
        end: i64,
    },
}

/// Errors that stop a reconciliation run after it has started talking to the API.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A remote call failed; the message is the API or transport error text.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The host search returned no hosts.
    #[error("no host matches query '{query}'")]
    NoMatchingHost {
        /// The free-text query that was searched.
        query: String,
    },
}

/// Top-level error type for callers that drive a full run.
///
/// Unifies parameter validation and configuration loading, the two error
/// kinds that are raised before a reconciler is started.
#[derive(Debug, Error)]
pub enum DdStateError {
    /// Invocation parameters were rejected.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// Configuration could not be read or is incomplete.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}
