//! Settings, API client, and runtime shared by every command.

use std::path::Path;

use anyhow::Context as _;
use ddstate_api::{ApiError, HttpClient};
use ddstate_core::prelude::*;

use crate::ConnectionArgs;

/// Resolved settings for one run.
#[derive(Debug)]
pub struct RunContext {
    /// Connection settings for the API client.
    pub settings: Settings,
}

impl RunContext {
    /// Loads the config file and merges command-line and environment values over it.
    pub fn load(args: &ConnectionArgs) -> super::Result<Self> {
        let config = load_config(args.config.as_deref())?;

        let overrides = Overrides {
            api_key: args.api_key.clone(),
            app_key: args.app_key.clone(),
            site: args.site.clone(),
            api_url: args.api_url.clone(),
        };

        let settings = config.resolve(overrides).map_err(DdStateError::from)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(api_url = %settings.api_url, timeout = ?settings.timeout, "resolved settings");

        Ok(Self { settings })
    }

    /// Builds the API client for this run.
    pub fn client(&self) -> Result<HttpClient, ApiError> {
        HttpClient::new(
            &self.settings.api_url,
            self.settings.credentials.clone(),
            self.settings.timeout,
        )
    }
}

/// Drives `future` to completion on a single-threaded runtime.
pub fn block_on<F: Future>(future: F) -> super::Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime")?;

    Ok(rt.block_on(future))
}

fn load_config(explicit: Option<&Path>) -> super::Result<Config> {
    let path = explicit.unwrap_or(Path::new(ddstate_core::CONFIG_FILENAME));

    if explicit.is_some() && !path.exists() {
        anyhow::bail!("config file not found: {}", path.display());
    }

    Ok(Config::load(path).map_err(DdStateError::from)?)
}
