//! Datadog API client for ddstate.
//!
//! This crate exposes the [`DatadogApi`] trait the reconcilers are written
//! against, the wire models for downtimes, host search, and host tags, and an
//! [`HttpClient`] that speaks the Datadog v1 REST API over `reqwest`.

mod client;
mod error;
mod http;
mod model;

pub use client::{BoxFuture, DatadogApi};
pub use error::ApiError;
pub use http::{Credentials, HttpClient};
pub use model::{Downtime, DowntimeRequest, HostTags, TagListing};

/// HTTP `User-Agent` header sent with every API request.
pub(crate) const USER_AGENT: &str = concat!("ddstate/", env!("CARGO_PKG_VERSION"));

/// Datadog site used when none is configured.
pub const DEFAULT_SITE: &str = "datadoghq.com";

/// Returns the API base URL for a Datadog site (e.g. `"datadoghq.eu"`).
#[must_use]
pub fn site_url(site: &str) -> String {
    format!("https://api.{site}")
}
