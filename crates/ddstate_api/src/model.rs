//! Wire models for the Datadog v1 endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A downtime as stored by Datadog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Downtime {
    /// Remote-assigned identifier.
    pub id: u64,
    /// Tag scopes the downtime applies to (e.g. `"env:prod"`).
    #[serde(default)]
    pub scope: Vec<String>,
    /// POSIX timestamp at which the downtime starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// POSIX timestamp at which the downtime ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Message included with notifications for the downtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Remaining fields returned by the API (`active`, `monitor_id`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of a downtime create or update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeRequest {
    /// Tag scopes the downtime applies to.
    pub scope: Vec<String>,
    /// POSIX timestamp at which the downtime starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// POSIX timestamp at which the downtime ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Message included with notifications for the downtime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Tags attached to a host, as returned by tag create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostTags {
    /// Host name the tags belong to.
    #[serde(default)]
    pub host: String,
    /// Tags now attached to the host.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Tags currently attached to a host.
///
/// The API returns a flat list by default and a map keyed by source when
/// `by_source` is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagListing {
    /// All tags in a single list.
    Flat(Vec<String>),
    /// Tags grouped by the source that applied them (`users`, `chef`, ...).
    BySource(BTreeMap<String, Vec<String>>),
}

impl Default for TagListing {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagListingResponse {
    #[serde(default)]
    pub tags: TagListing,
}

#[derive(Debug, Serialize)]
pub(crate) struct TagsBody<'a> {
    pub tags: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: SearchResults,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResults {
    #[serde(default)]
    pub hosts: Vec<String>,
}
