//! Desired-state parameters for the downtime and tag reconcilers.

use std::fmt;
use std::str::FromStr;

use ddstate_api::DowntimeRequest;
use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Whether the resource should exist after the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// Create or update the resource.
    Present,
    /// Delete the resource.
    Absent,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Absent => write!(f, "absent"),
        }
    }
}

impl FromStr for State {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            _ => Err(ParamError::InvalidState(s.to_string())),
        }
    }
}

/// Splits a comma-separated parameter into trimmed, non-empty entries.
///
/// Order is preserved and duplicates are kept.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parameters of a downtime run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DowntimeParams {
    /// Desired state of the downtime.
    pub state: State,
    /// Tag scopes the downtime applies to.
    pub scope: Vec<String>,
    /// POSIX timestamp at which the downtime starts.
    pub start: Option<i64>,
    /// POSIX timestamp at which the downtime ends.
    pub end: Option<i64>,
    /// Message included with notifications for the downtime.
    pub message: Option<String>,
    /// Downtime id supplied by the caller. Matching is done by scope; this is not consulted.
    pub id: Option<u64>,
    /// Only consider downtimes that are active when the run starts.
    pub current_only: bool,
}

impl DowntimeParams {
    /// Creates parameters for `scope` (comma-separated) with no schedule or message.
    #[must_use]
    pub fn new(state: State, scope: &str) -> Self {
        Self {
            state,
            scope: split_list(scope),
            start: None,
            end: None,
            message: None,
            id: None,
            current_only: false,
        }
    }

    /// Checks the parameters before any remote call is made.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.scope.is_empty() {
            return Err(ParamError::EmptyScope);
        }

        match (self.start, self.end) {
            (Some(start), Some(end)) if end < start => Err(ParamError::InvalidWindow { start, end }),
            _ => Ok(()),
        }
    }

    /// Returns the scope entries joined by commas.
    #[must_use]
    pub fn scope_label(&self) -> String {
        self.scope.join(",")
    }

    /// Builds the create/update request body for these parameters.
    #[must_use]
    pub fn to_request(&self) -> DowntimeRequest {
        DowntimeRequest {
            scope: self.scope.clone(),
            start: self.start,
            end: self.end,
            message: self.message.clone(),
        }
    }
}

/// Parameters of a host tag run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagParams {
    /// Desired state of the host's tags.
    pub state: State,
    /// Free-text query resolved to a host name through search.
    pub host: String,
    /// Tags to apply.
    pub tags: Vec<String>,
    /// Namespace the tags are grouped under.
    pub source: Option<String>,
    /// Request tags grouped by source when reading the current set.
    pub by_source: bool,
}

impl TagParams {
    /// Creates parameters for `host` with no tags or source.
    #[must_use]
    pub fn new(state: State, host: impl Into<String>) -> Self {
        Self {
            state,
            host: host.into(),
            tags: Vec::new(),
            source: None,
            by_source: false,
        }
    }

    /// Sets the desired tags from a comma-separated list.
    #[must_use]
    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = split_list(tags);
        self
    }

    /// Checks the parameters before any remote call is made.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.host.trim().is_empty() {
            return Err(ParamError::EmptyHost);
        }

        if self.state == State::Present && self.tags.is_empty() {
            return Err(ParamError::MissingTags);
        }

        Ok(())
    }
}
