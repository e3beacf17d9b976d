//! Reconciles a scheduled downtime against its desired state.

use ddstate_api::{ApiError, DatadogApi, Downtime};
#[cfg(feature = "tracing")]
use tracing::{debug, info, warn};

use crate::params::{DowntimeParams, State};
use crate::report::{Report, invoke};

/// Ensures a downtime exists, or does not exist, for a scope.
///
/// A run lists the existing downtimes, keeps those matching the requested
/// scope, and then issues at most one create or update call (`present`) or
/// one delete per match (`absent`).
pub struct DowntimeReconciler<'a> {
    api: &'a dyn DatadogApi,
}

impl<'a> DowntimeReconciler<'a> {
    /// Creates a reconciler that talks to `api`.
    #[must_use]
    pub const fn new(api: &'a dyn DatadogApi) -> Self {
        Self { api }
    }

    /// Resolves the current matches and applies the desired state.
    pub async fn run(&self, params: &DowntimeParams) -> Report {
        #[cfg(feature = "tracing")]
        {
            if let Some(id) = params.id {
                warn!(id, "downtime id is ignored; downtimes are matched by scope");
            }
        }

        match self.resolve(&params.scope, params.current_only).await {
            Ok(resolved) => self.apply(params, resolved).await,
            Err(e) => Report::failed(e.to_string()),
        }
    }

    /// Returns the existing downtimes whose scope contains any of `scope`, in API order.
    pub async fn resolve(&self, scope: &[String], current_only: bool) -> Result<Vec<Downtime>, ApiError> {
        let downtimes = self.api.list_downtimes(current_only).await?;

        #[cfg(feature = "tracing")]
        debug!(total = downtimes.len(), current_only, "listed downtimes");

        Ok(downtimes
            .into_iter()
            .filter(|downtime| scope_matches(&downtime.scope, scope))
            .collect())
    }

    /// Drives remote state towards `params` given the resolved matches.
    pub async fn apply(&self, params: &DowntimeParams, resolved: Vec<Downtime>) -> Report {
        match params.state {
            State::Present => self.schedule(params, resolved.first()).await,
            State::Absent => self.cancel(params, &resolved).await,
        }
    }

    async fn schedule(&self, params: &DowntimeParams, existing: Option<&Downtime>) -> Report {
        let request = params.to_request();

        #[cfg(feature = "tracing")]
        info!(
            scope = %params.scope_label(),
            start = %describe_timestamp(params.start),
            end = %describe_timestamp(params.end),
            "scheduling downtime"
        );

        match existing {
            None => invoke(self.api.create_downtime(&request).await),
            Some(downtime) => {
                #[cfg(feature = "tracing")]
                debug!(id = downtime.id, "updating first matching downtime");

                invoke(self.api.update_downtime(downtime.id, &request).await)
            }
        }
    }

    async fn cancel(&self, params: &DowntimeParams, resolved: &[Downtime]) -> Report {
        for downtime in resolved {
            #[cfg(feature = "tracing")]
            info!(id = downtime.id, "cancelling downtime");

            if let Err(e) = self.api.delete_downtime(downtime.id).await {
                return Report::failed(e.to_string());
            }
        }

        Report::changed(format!("Downtime for scope '{}' cancelled.", params.scope_label()))
    }
}

impl std::fmt::Debug for DowntimeReconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DowntimeReconciler").finish_non_exhaustive()
    }
}

/// Returns `true` if any requested scope entry appears in the recorded scope.
///
/// Entries are compared whole: `env:prod` matches a downtime scoped to
/// `["env:prod", "team:x"]` but not one scoped to `["env:production"]`.
#[must_use]
pub fn scope_matches(recorded: &[String], requested: &[String]) -> bool {
    requested.iter().any(|entry| recorded.contains(entry))
}

/// Formats an optional POSIX timestamp as RFC 3339 for log output.
#[must_use]
pub fn describe_timestamp(timestamp: Option<i64>) -> String {
    timestamp.map_or_else(
        || "unset".to_string(),
        |ts| {
            chrono::DateTime::from_timestamp(ts, 0)
                .map_or_else(|| ts.to_string(), |dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        },
    )
}
