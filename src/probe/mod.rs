//! Concurrent request-timing harness.
//!
//! A probe sends `N` identical requests to one endpoint at once, waits for
//! every one of them, classifies the responses by status code and reports
//! how long the whole batch took. Only setup failures are returned as
//! errors; anything that goes wrong with an individual request is counted
//! in the result instead.
mod client;
mod dispatch;
mod request;
mod result;
mod tally;


use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio::net::lookup_host;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::args::HttpMethod;
use crate::error::ProbeError;

pub use client::ProbeSettings;
pub use request::{ParamValue, ProbeRequest};
pub use result::{LatencyX100, ProbeResult, TIMESTAMP_FORMAT};
pub use tally::{StatusClass, StatusTally};

use client::build_client;
use dispatch::{Payload, RequestOutcome, RequestTemplate, dispatch_batch};

/// Runs one probe batch of `concurrency` requests.
///
/// # Errors
///
/// Returns [`ProbeError`] when the request is misconfigured (empty URL,
/// zero concurrency, POST without a readable payload, bad header) or the
/// target cannot be routed (malformed URL, unsupported scheme, unknown
/// host). No request is sent in either case.
pub async fn run_probe(
    request: &ProbeRequest,
    concurrency: usize,
    settings: &ProbeSettings,
) -> Result<ProbeResult, ProbeError> {
    if request.url().trim().is_empty() {
        return Err(ProbeError::EmptyUrl);
    }
    if concurrency == 0 {
        return Err(ProbeError::ZeroConcurrency);
    }
    let url = validate_target(request.url())?;
    let headers = build_headers(request.header_list())?;
    let payload = load_payload(request).await?;
    resolve_target(&url, request.url()).await?;
    let client = build_client(settings)?;

    let template = Arc::new(RequestTemplate {
        client,
        method: request.method(),
        url,
        query: request.query_pairs(),
        headers,
        payload,
        params_display: request.params_display(),
    });

    debug!(
        "Dispatching {} {} request(s) to {} ({})",
        concurrency,
        request.method().as_str(),
        template.url,
        settings.dispatch.as_str()
    );
    let started_at = Utc::now();
    let start = Instant::now();
    let outcomes = dispatch_batch(Arc::clone(&template), concurrency, settings.dispatch).await;
    let elapsed = start.elapsed();

    let mut tally = StatusTally::default();
    let mut rejected = None;
    for outcome in outcomes {
        match outcome {
            RequestOutcome::Response { status } => {
                let class = StatusClass::from_status(status);
                log_status(class, status, &template);
                tally.record(class);
            }
            RequestOutcome::TransportFailure { timed_out } => {
                if timed_out {
                    warn!(
                        "Request to {} with params {} timed out; counted as other",
                        template.url, template.params_display
                    );
                }
                tally.record(StatusClass::transport_failure());
            }
            RequestOutcome::Rejected(err) => {
                if rejected.is_none() {
                    rejected = Some(err);
                }
            }
        }
    }

    if let Some(err) = rejected {
        error!("Transport rejected target {}: {}", template.url, err);
        return Err(ProbeError::RequestRejected {
            url: request.url().to_owned(),
            source: err,
        });
    }

    Ok(ProbeResult::new(started_at, elapsed, concurrency, tally))
}

fn log_status(class: StatusClass, status: u16, template: &RequestTemplate) {
    match class {
        StatusClass::Success => {}
        StatusClass::ServerError | StatusClass::ServiceUnavailable | StatusClass::GatewayTimeout => {
            warn!(
                "{} error running: {} with params {}",
                status, template.url, template.params_display
            );
        }
        StatusClass::Other(_) => {
            warn!(
                "Unexpected status {} from {} with params {}; counted as other",
                status, template.url, template.params_display
            );
        }
    }
}

fn validate_target(raw: &str) -> Result<Url, ProbeError> {
    let url = Url::parse(raw.trim()).map_err(|err| ProbeError::InvalidUrl {
        url: raw.to_owned(),
        source: err,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProbeError::UnsupportedScheme {
            url: raw.to_owned(),
            scheme: url.scheme().to_owned(),
        });
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ProbeError::MissingHost {
            url: raw.to_owned(),
        });
    }
    Ok(url)
}

/// Fails when the target host has no addresses.
async fn resolve_target(url: &Url, raw: &str) -> Result<(), ProbeError> {
    let unresolvable = |source: std::io::Error| ProbeError::UnresolvableHost {
        url: raw.to_owned(),
        source,
    };
    let host = url.host_str().unwrap_or_default();
    let port = url.port_or_known_default().unwrap_or(80);
    let mut addrs = lookup_host((host.trim_start_matches('[').trim_end_matches(']'), port))
        .await
        .map_err(unresolvable)?;
    if addrs.next().is_none() {
        return Err(unresolvable(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no addresses returned",
        )));
    }
    debug!("Resolved {}:{}", host, port);
    Ok(())
}

fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap, ProbeError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| ProbeError::InvalidHeader {
                name: name.clone(),
                reason: err.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|err| ProbeError::InvalidHeader {
            name: name.clone(),
            reason: err.to_string(),
        })?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

/// Reads the upload once; every worker shares the same bytes.
async fn load_payload(request: &ProbeRequest) -> Result<Option<Payload>, ProbeError> {
    let path = match (request.method(), request.payload_path()) {
        (HttpMethod::Post, Some(path)) => path,
        (HttpMethod::Post, None) => return Err(ProbeError::MissingPayload),
        (HttpMethod::Get, _) => return Ok(None),
    };
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        error!(
            "The payload {} does not exist or is not readable. Please provide a valid file path",
            path.display()
        );
        ProbeError::UnreadablePayload {
            path: path.to_path_buf(),
            source: err,
        }
    })?;
    let file_name = path
        .file_name()
        .and_then(|value| value.to_str())
        .unwrap_or("file")
        .to_owned();
    Ok(Some(Payload {
        file_name,
        bytes: Bytes::from(bytes),
    }))
}
