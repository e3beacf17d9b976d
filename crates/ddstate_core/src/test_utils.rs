//! Test utilities for `ddstate_core` (compiled only during testing).

use std::collections::HashMap;
use std::sync::Mutex;

use ddstate_api::{ApiError, BoxFuture, DatadogApi, Downtime, DowntimeRequest, HostTags, TagListing};

/// A remote call observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SearchHosts(String),
    ListDowntimes { current_only: bool },
    CreateDowntime(DowntimeRequest),
    UpdateDowntime(u64, DowntimeRequest),
    DeleteDowntime(u64),
    GetHostTags {
        host: String,
        source: Option<String>,
        by_source: bool,
    },
    CreateHostTags {
        host: String,
        tags: Vec<String>,
        source: Option<String>,
    },
    UpdateHostTags {
        host: String,
        tags: Vec<String>,
        source: Option<String>,
    },
    DeleteHostTags {
        host: String,
        source: Option<String>,
    },
}

/// In-memory API that records every call and serves canned state.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub hosts: Vec<String>,
    pub downtimes: Vec<Downtime>,
    pub tags: TagListing,
    rejections: HashMap<&'static str, Vec<String>>,
    calls: Mutex<Vec<Call>>,
}

pub const CREATED_DOWNTIME_ID: u64 = 9000;

pub fn downtime(id: u64, scope: &[&str]) -> Downtime {
    Downtime {
        id,
        scope: scope.iter().map(|&s| s.to_owned()).collect(),
        start: None,
        end: None,
        message: None,
        extra: serde_json::Map::new(),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hosts(mut self, hosts: &[&str]) -> Self {
        self.hosts = hosts.iter().map(|&h| h.to_owned()).collect();
        self
    }

    pub fn with_downtimes(mut self, downtimes: Vec<Downtime>) -> Self {
        self.downtimes = downtimes;
        self
    }

    pub fn with_tags(mut self, tags: TagListing) -> Self {
        self.tags = tags;
        self
    }

    /// Makes `operation` (e.g. `"create_downtime"`) fail with an `errors` payload.
    pub fn rejecting(mut self, operation: &'static str, errors: &[&str]) -> Self {
        self.rejections
            .insert(operation, errors.iter().map(|&e| e.to_owned()).collect());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that mutate remote state.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| {
                !matches!(
                    call,
                    Call::SearchHosts(_) | Call::ListDowntimes { .. } | Call::GetHostTags { .. }
                )
            })
            .collect()
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.rejections.get(operation) {
            Some(errors) => Err(ApiError::Rejected {
                status: 400,
                errors: errors.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn stored(id: u64, request: &DowntimeRequest) -> Downtime {
    Downtime {
        id,
        scope: request.scope.clone(),
        start: request.start,
        end: request.end,
        message: request.message.clone(),
        extra: serde_json::Map::new(),
    }
}

impl DatadogApi for FakeApi {
    fn search_hosts<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<String>, ApiError>> {
        Box::pin(async move {
            self.record("search_hosts", Call::SearchHosts(query.to_owned()))?;
            Ok(self.hosts.clone())
        })
    }

    fn list_downtimes(&self, current_only: bool) -> BoxFuture<'_, Result<Vec<Downtime>, ApiError>> {
        Box::pin(async move {
            self.record("list_downtimes", Call::ListDowntimes { current_only })?;
            Ok(self.downtimes.clone())
        })
    }

    fn create_downtime<'a>(&'a self, request: &'a DowntimeRequest) -> BoxFuture<'a, Result<Downtime, ApiError>> {
        Box::pin(async move {
            self.record("create_downtime", Call::CreateDowntime(request.clone()))?;
            Ok(stored(CREATED_DOWNTIME_ID, request))
        })
    }

    fn update_downtime<'a>(
        &'a self,
        id: u64,
        request: &'a DowntimeRequest,
    ) -> BoxFuture<'a, Result<Downtime, ApiError>> {
        Box::pin(async move {
            self.record("update_downtime", Call::UpdateDowntime(id, request.clone()))?;
            Ok(stored(id, request))
        })
    }

    fn delete_downtime(&self, id: u64) -> BoxFuture<'_, Result<(), ApiError>> {
        Box::pin(async move { self.record("delete_downtime", Call::DeleteDowntime(id)) })
    }

    fn get_host_tags<'a>(
        &'a self,
        host: &'a str,
        source: Option<&'a str>,
        by_source: bool,
    ) -> BoxFuture<'a, Result<TagListing, ApiError>> {
        Box::pin(async move {
            self.record(
                "get_host_tags",
                Call::GetHostTags {
                    host: host.to_owned(),
                    source: source.map(str::to_owned),
                    by_source,
                },
            )?;
            Ok(self.tags.clone())
        })
    }

    fn create_host_tags<'a>(
        &'a self,
        host: &'a str,
        tags: &'a [String],
        source: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HostTags, ApiError>> {
        Box::pin(async move {
            self.record(
                "create_host_tags",
                Call::CreateHostTags {
                    host: host.to_owned(),
                    tags: tags.to_vec(),
                    source: source.map(str::to_owned),
                },
            )?;
            Ok(HostTags {
                host: host.to_owned(),
                tags: tags.to_vec(),
            })
        })
    }

    fn update_host_tags<'a>(
        &'a self,
        host: &'a str,
        tags: &'a [String],
        source: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HostTags, ApiError>> {
        Box::pin(async move {
            self.record(
                "update_host_tags",
                Call::UpdateHostTags {
                    host: host.to_owned(),
                    tags: tags.to_vec(),
                    source: source.map(str::to_owned),
                },
            )?;
            Ok(HostTags {
                host: host.to_owned(),
                tags: tags.to_vec(),
            })
        })
    }

    fn delete_host_tags<'a>(&'a self, host: &'a str, source: Option<&'a str>) -> BoxFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            self.record(
                "delete_host_tags",
                Call::DeleteHostTags {
                    host: host.to_owned(),
                    source: source.map(str::to_owned),
                },
            )
        })
    }
}
