//! `reqwest`-backed implementation of [`DatadogApi`].

use std::fmt;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::USER_AGENT;
use crate::client::{BoxFuture, DatadogApi};
use crate::error::ApiError;
use crate::model::{
    Downtime, DowntimeRequest, HostTags, SearchResponse, TagListing, TagListingResponse, TagsBody,
};

const API_KEY_HEADER: &str = "DD-API-KEY";
const APP_KEY_HEADER: &str = "DD-APPLICATION-KEY";

/// API and application keys used to authenticate every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    app_key: String,
}

impl Credentials {
    /// Creates credentials from a Datadog API key and application key.
    #[must_use]
    pub fn new(api_key: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            app_key: app_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("app_key", &"<redacted>")
            .finish()
    }
}

/// Datadog v1 REST client.
///
/// One client is built per run from explicit credentials and passed to the
/// reconcilers; nothing is kept in process-wide state.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

#[derive(Debug, Serialize)]
struct TagQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    by_source: bool,
}

impl HttpClient {
    /// Builds a client for the API rooted at `base_url` (e.g. `https://api.datadoghq.com`).
    pub fn new(base_url: &str, credentials: Credentials, timeout: Duration) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            base_url: parsed,
            credentials,
        })
    }

    /// Returns the API base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(APP_KEY_HEADER, &self.credentials.app_key)
            .header("Accept", "application/json")
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl DatadogApi for HttpClient {
    fn search_hosts<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<String>, ApiError>> {
        Box::pin(async move {
            let url = self.endpoint(&["api", "v1", "search"])?;
            let response = self
                .request(Method::GET, url)
                .query(&[("q", format!("hosts:{query}"))])
                .send()
                .await?;

            let body: SearchResponse = read_json(response).await?;
            Ok(body.results.hosts)
        })
    }

    fn list_downtimes(&self, current_only: bool) -> BoxFuture<'_, Result<Vec<Downtime>, ApiError>> {
        Box::pin(async move {
            let url = self.endpoint(&["api", "v1", "downtime"])?;
            let response = self
                .request(Method::GET, url)
                .query(&[("current_only", current_only)])
                .send()
                .await?;

            read_json(response).await
        })
    }

    fn create_downtime<'a>(&'a self, request: &'a DowntimeRequest) -> BoxFuture<'a, Result<Downtime, ApiError>> {
        Box::pin(async move {
            let url = self.endpoint(&["api", "v1", "downtime"])?;
            let response = self.request(Method::POST, url).json(request).send().await?;

            read_json(response).await
        })
    }

    fn update_downtime<'a>(
        &'a self,
        id: u64,
        request: &'a DowntimeRequest,
    ) -> BoxFuture<'a, Result<Downtime, ApiError>> {
        Box::pin(async move {
            let id = id.to_string();
            let url = self.endpoint(&["api", "v1", "downtime", &id])?;
            let response = self.request(Method::PUT, url).json(request).send().await?;

            read_json(response).await
        })
    }

    fn delete_downtime(&self, id: u64) -> BoxFuture<'_, Result<(), ApiError>> {
        Box::pin(async move {
            let id = id.to_string();
            let url = self.endpoint(&["api", "v1", "downtime", &id])?;
            let response = self.request(Method::DELETE, url).send().await?;

            read_body(response).await.map(drop)
        })
    }

    fn get_host_tags<'a>(
        &'a self,
        host: &'a str,
        source: Option<&'a str>,
        by_source: bool,
    ) -> BoxFuture<'a, Result<TagListing, ApiError>> {
        Box::pin(async move {
            let url = self.endpoint(&["api", "v1", "tags", "hosts", host])?;
            let response = self
                .request(Method::GET, url)
                .query(&TagQuery { source, by_source })
                .send()
                .await?;

            let body: TagListingResponse = read_json(response).await?;
            Ok(body.tags)
        })
    }

    fn create_host_tags<'a>(
        &'a self,
        host: &'a str,
        tags: &'a [String],
        source: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HostTags, ApiError>> {
        Box::pin(async move { self.write_host_tags(Method::POST, host, tags, source).await })
    }

    fn update_host_tags<'a>(
        &'a self,
        host: &'a str,
        tags: &'a [String],
        source: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HostTags, ApiError>> {
        Box::pin(async move { self.write_host_tags(Method::PUT, host, tags, source).await })
    }

    fn delete_host_tags<'a>(&'a self, host: &'a str, source: Option<&'a str>) -> BoxFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let url = self.endpoint(&["api", "v1", "tags", "hosts", host])?;
            let response = self
                .request(Method::DELETE, url)
                .query(&TagQuery {
                    source,
                    by_source: false,
                })
                .send()
                .await?;

            read_body(response).await.map(drop)
        })
    }
}

impl HttpClient {
    async fn write_host_tags(
        &self,
        method: Method,
        host: &str,
        tags: &[String],
        source: Option<&str>,
    ) -> Result<HostTags, ApiError> {
        let url = self.endpoint(&["api", "v1", "tags", "hosts", host])?;
        let response = self
            .request(method, url)
            .query(&TagQuery {
                source,
                by_source: false,
            })
            .json(&TagsBody { tags })
            .send()
            .await?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = read_body(response).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Reads the response body, turning `errors` payloads and failure statuses into errors.
///
/// An `errors` field wins over the status code: the API reports rejections
/// that way on both 2xx and 4xx responses.
async fn read_body(response: Response) -> Result<Vec<u8>, ApiError> {
    let status = response.status();
    let body = response.bytes().await?.to_vec();

    if let Some(errors) = remote_errors(&body) {
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            errors,
        });
    }

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    Ok(body)
}

fn remote_errors(body: &[u8]) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let errors = value.get("errors")?;

    let messages = match errors {
        serde_json::Value::Array(items) => items.iter().map(error_text).collect(),
        other => vec![error_text(other)],
    };
    Some(messages)
}

fn error_text(value: &serde_json::Value) -> String {
    value.as_str().map_or_else(|| value.to_string(), str::to_owned)
}
