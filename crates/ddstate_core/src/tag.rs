//! Reconciles the tags attached to a host.

use ddstate_api::{DatadogApi, TagListing};
#[cfg(feature = "tracing")]
use tracing::{debug, info, warn};

use crate::error::ReconcileError;
use crate::params::{State, TagParams};
use crate::report::{Report, invoke};

/// Source group holding human-applied tags in a by-source listing.
pub const USERS_SOURCE: &str = "users";

/// Ensures a host carries a set of tags, or carries none from a source.
///
/// Adding is additive: when the host already has tags, the desired tags are
/// prepended to them and the combined list is written back.
pub struct TagReconciler<'a> {
    api: &'a dyn DatadogApi,
}

impl<'a> TagReconciler<'a> {
    /// Creates a reconciler that talks to `api`.
    #[must_use]
    pub const fn new(api: &'a dyn DatadogApi) -> Self {
        Self { api }
    }

    /// Resolves the host and applies the desired state to its tags.
    pub async fn run(&self, params: &TagParams) -> Report {
        match self.observe(params).await {
            Ok((host, existing)) => self.apply(params, &host, existing).await,
            Err(e) => Report::failed(e.to_string()),
        }
    }

    async fn observe(&self, params: &TagParams) -> Result<(String, Vec<String>), ReconcileError> {
        let host = self.resolve_host(&params.host).await?;

        let existing = match params.state {
            State::Present => {
                self.fetch_tags(&host, params.source.as_deref(), params.by_source)
                    .await?
            }
            State::Absent => Vec::new(),
        };

        Ok((host, existing))
    }

    /// Searches for `query` and returns the first matching host name.
    pub async fn resolve_host(&self, query: &str) -> Result<String, ReconcileError> {
        let hosts = self.api.search_hosts(query).await?;

        #[cfg(feature = "tracing")]
        {
            if let [chosen, _, ..] = hosts.as_slice() {
                warn!(
                    query,
                    matches = hosts.len(),
                    chosen = %chosen,
                    "host query is ambiguous; using the first result"
                );
            }
        }

        hosts.into_iter().next().ok_or_else(|| ReconcileError::NoMatchingHost {
            query: query.to_string(),
        })
    }

    /// Returns the human-applied tags currently attached to `host`.
    pub async fn fetch_tags(
        &self,
        host: &str,
        source: Option<&str>,
        by_source: bool,
    ) -> Result<Vec<String>, ReconcileError> {
        let listing = self.api.get_host_tags(host, source, by_source).await?;
        let tags = user_tags(listing);

        #[cfg(feature = "tracing")]
        debug!(host, count = tags.len(), "fetched existing tags");

        Ok(tags)
    }

    /// Drives the host's tags towards `params` given the tags it already has.
    pub async fn apply(&self, params: &TagParams, host: &str, existing: Vec<String>) -> Report {
        let source = params.source.as_deref();

        match params.state {
            State::Present if existing.is_empty() => {
                #[cfg(feature = "tracing")]
                info!(host, tags = ?params.tags, "creating host tags");

                invoke(self.api.create_host_tags(host, &params.tags, source).await)
            }
            State::Present => {
                let tags = merge_tags(&params.tags, existing);

                #[cfg(feature = "tracing")]
                info!(host, tags = ?tags, "updating host tags");

                invoke(self.api.update_host_tags(host, &tags, source).await)
            }
            State::Absent => {
                #[cfg(feature = "tracing")]
                info!(host, source, "deleting host tags");

                match self.api.delete_host_tags(host, source).await {
                    Ok(()) => Report::changed(delete_message(host, source)),
                    Err(e) => Report::failed(e.to_string()),
                }
            }
        }
    }
}

impl std::fmt::Debug for TagReconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagReconciler").finish_non_exhaustive()
    }
}

/// Extracts the human-applied tags from a listing.
///
/// A flat listing is used as-is. A by-source listing yields the `users`
/// group, or nothing if the host has no user tags.
#[must_use]
pub fn user_tags(listing: TagListing) -> Vec<String> {
    match listing {
        TagListing::Flat(tags) => tags,
        TagListing::BySource(mut groups) => groups.remove(USERS_SOURCE).unwrap_or_default(),
    }
}

/// Returns `desired` followed by `existing`, without deduplication.
#[must_use]
pub fn merge_tags(desired: &[String], existing: Vec<String>) -> Vec<String> {
    let mut merged = desired.to_vec();
    merged.extend(existing);
    merged
}

fn delete_message(host: &str, source: Option<&str>) -> String {
    match source {
        Some(source) => format!("Tags from source '{source}' removed from host '{host}'."),
        None => format!("Tags removed from host '{host}'."),
    }
}
