//! The API surface the reconcilers depend on.

use std::pin::Pin;

use crate::error::ApiError;
use crate::model::{Downtime, DowntimeRequest, HostTags, TagListing};

/// A pinned, boxed, `Send` future used as the return type for async API calls.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Operations against the Datadog API needed to reconcile downtimes and host tags.
///
/// Implemented by [`HttpClient`](crate::HttpClient) for real runs; tests
/// substitute in-memory fakes.
pub trait DatadogApi: Send + Sync {
    /// Searches the infrastructure index and returns matching host names in API order.
    fn search_hosts<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<String>, ApiError>>;

    /// Lists all downtimes, or only those active right now when `current_only` is set.
    fn list_downtimes(&self, current_only: bool) -> BoxFuture<'_, Result<Vec<Downtime>, ApiError>>;

    /// Schedules a new downtime.
    fn create_downtime<'a>(&'a self, request: &'a DowntimeRequest) -> BoxFuture<'a, Result<Downtime, ApiError>>;

    /// Replaces the schedule of the downtime with the given id.
    fn update_downtime<'a>(
        &'a self,
        id: u64,
        request: &'a DowntimeRequest,
    ) -> BoxFuture<'a, Result<Downtime, ApiError>>;

    /// Cancels the downtime with the given id.
    fn delete_downtime(&self, id: u64) -> BoxFuture<'_, Result<(), ApiError>>;

    /// Returns the tags attached to a host, optionally limited to one source.
    fn get_host_tags<'a>(
        &'a self,
        host: &'a str,
        source: Option<&'a str>,
        by_source: bool,
    ) -> BoxFuture<'a, Result<TagListing, ApiError>>;

    /// Attaches a fresh tag set to a host.
    fn create_host_tags<'a>(
        &'a self,
        host: &'a str,
        tags: &'a [String],
        source: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HostTags, ApiError>>;

    /// Replaces the tags attached to a host.
    fn update_host_tags<'a>(
        &'a self,
        host: &'a str,
        tags: &'a [String],
        source: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HostTags, ApiError>>;

    /// Removes all tags from a host, optionally limited to one source.
    fn delete_host_tags<'a>(&'a self, host: &'a str, source: Option<&'a str>) -> BoxFuture<'a, Result<(), ApiError>>;
}
