use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("reqprobe/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout enforced by the HTTP client.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
