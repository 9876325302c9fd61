use std::time::Duration;

use reqwest::Client;
use tracing::error;

use crate::args::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT, DispatchMode};
use crate::error::ProbeError;

/// Transport settings shared by every request of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub dispatch: DispatchMode,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            dispatch: DispatchMode::Parallel,
        }
    }
}

pub(super) fn build_client(settings: &ProbeSettings) -> Result<Client, ProbeError> {
    Client::builder()
        .timeout(settings.request_timeout)
        .connect_timeout(settings.connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| {
            error!("Failed to build HTTP client: {}", err);
            ProbeError::BuildClient { source: err }
        })
}
