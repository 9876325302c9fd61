use std::sync::Arc;

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Request, Url};
use tokio::task::JoinSet;
use tracing::error;

use crate::args::{DispatchMode, HttpMethod};

/// Multipart field name the upload is attached under.
pub(super) const PAYLOAD_FIELD: &str = "file_name";

pub(super) struct Payload {
    pub(super) file_name: String,
    pub(super) bytes: Bytes,
}

/// Everything a worker needs to issue one request. Shared read-only by
/// every worker of a batch.
pub(super) struct RequestTemplate {
    pub(super) client: Client,
    pub(super) method: HttpMethod,
    pub(super) url: Url,
    pub(super) query: Vec<(String, String)>,
    pub(super) headers: HeaderMap,
    pub(super) payload: Option<Payload>,
    pub(super) params_display: String,
}

#[derive(Debug)]
pub(super) enum RequestOutcome {
    Response { status: u16 },
    TransportFailure { timed_out: bool },
    /// The transport refused to build or route the request at all.
    Rejected(reqwest::Error),
}

impl RequestTemplate {
    fn build_request(&self) -> Result<Request, reqwest::Error> {
        let builder = match self.method {
            HttpMethod::Get => self.client.get(self.url.clone()),
            HttpMethod::Post => self.client.post(self.url.clone()),
        };
        let mut builder = builder.query(&self.query).headers(self.headers.clone());
        if let Some(payload) = self.payload.as_ref() {
            let length = u64::try_from(payload.bytes.len()).unwrap_or(u64::MAX);
            let part = Part::stream_with_length(Body::from(payload.bytes.clone()), length)
                .file_name(payload.file_name.clone());
            builder = builder.multipart(Form::new().part(PAYLOAD_FIELD, part));
        }
        builder.build()
    }

    pub(super) async fn execute(&self) -> RequestOutcome {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => return RequestOutcome::Rejected(err),
        };
        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status().as_u16();
                match drain_response_body(response).await {
                    Ok(_) => RequestOutcome::Response { status },
                    Err(err) => {
                        error!(
                            "Failed to read response body from {} with params {}: {}",
                            self.url, self.params_display, err
                        );
                        RequestOutcome::TransportFailure {
                            timed_out: err.is_timeout(),
                        }
                    }
                }
            }
            Err(err) if err.is_builder() => RequestOutcome::Rejected(err),
            Err(err) => {
                error!(
                    "Request to {} with params {} failed: {}",
                    self.url, self.params_display, err
                );
                RequestOutcome::TransportFailure {
                    timed_out: err.is_timeout(),
                }
            }
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}

/// Issues `count` copies of the template and returns their outcomes in
/// completion order.
pub(super) async fn dispatch_batch(
    template: Arc<RequestTemplate>,
    count: usize,
    mode: DispatchMode,
) -> Vec<RequestOutcome> {
    match mode {
        DispatchMode::Parallel => dispatch_parallel(template, count).await,
        DispatchMode::Cooperative => dispatch_cooperative(&template, count).await,
    }
}

async fn dispatch_parallel(template: Arc<RequestTemplate>, count: usize) -> Vec<RequestOutcome> {
    let mut workers = JoinSet::new();
    for _ in 0..count {
        let template = Arc::clone(&template);
        workers.spawn(async move { template.execute().await });
    }

    let mut outcomes = Vec::with_capacity(count);
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                error!("Probe worker for {} did not finish: {}", template.url, err);
                outcomes.push(RequestOutcome::TransportFailure { timed_out: false });
            }
        }
    }
    outcomes
}

async fn dispatch_cooperative(template: &RequestTemplate, count: usize) -> Vec<RequestOutcome> {
    let mut pending: FuturesUnordered<_> = (0..count).map(|_| template.execute()).collect();
    let mut outcomes = Vec::with_capacity(count);
    while let Some(outcome) = pending.next().await {
        outcomes.push(outcome);
    }
    outcomes
}
