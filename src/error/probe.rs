use std::path::PathBuf;

use thiserror::Error;

/// Batch-level probe failures. Per-request failures never show up here;
/// they are folded into the status tally instead.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Target URL must not be empty.")]
    EmptyUrl,
    #[error("Concurrency must be >= 1.")]
    ZeroConcurrency,
    #[error("POST probes require a file payload (set --file).")]
    MissingPayload,
    #[error("Payload '{path}' is not readable: {source}")]
    UnreadablePayload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid target '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid target '{url}': unsupported scheme '{scheme}'. Use http or https.")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("Invalid target '{url}': missing host.")]
    MissingHost { url: String },
    #[error("Invalid target '{url}': host does not resolve: {source}")]
    UnresolvableHost {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid target '{url}': {source}")]
    RequestRejected {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
    #[error("Failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

impl ProbeError {
    /// Caller misuse detected before any request is dispatched.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProbeError::EmptyUrl
                | ProbeError::ZeroConcurrency
                | ProbeError::MissingPayload
                | ProbeError::UnreadablePayload { .. }
                | ProbeError::InvalidHeader { .. }
        )
    }

    /// The target URL cannot be routed by the transport.
    #[must_use]
    pub const fn is_invalid_target(&self) -> bool {
        matches!(
            self,
            ProbeError::InvalidUrl { .. }
                | ProbeError::UnsupportedScheme { .. }
                | ProbeError::MissingHost { .. }
                | ProbeError::UnresolvableHost { .. }
                | ProbeError::RequestRejected { .. }
        )
    }
}
