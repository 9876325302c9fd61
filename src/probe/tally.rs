use std::collections::BTreeMap;

/// Outcome class of one request in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    ServerError,
    ServiceUnavailable,
    GatewayTimeout,
    /// An untracked status code, or `None` when no response arrived
    /// (timeout, reset, refused connection).
    Other(Option<u16>),
}

impl StatusClass {
    #[must_use]
    pub const fn from_status(code: u16) -> Self {
        match code {
            200 => StatusClass::Success,
            500 => StatusClass::ServerError,
            503 => StatusClass::ServiceUnavailable,
            504 => StatusClass::GatewayTimeout,
            other => StatusClass::Other(Some(other)),
        }
    }

    #[must_use]
    pub const fn transport_failure() -> Self {
        StatusClass::Other(None)
    }

    #[must_use]
    pub const fn is_tracked(self) -> bool {
        !matches!(self, StatusClass::Other(_))
    }
}

/// Per-class counts for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    ok: u64,
    server_error: u64,
    service_unavailable: u64,
    gateway_timeout: u64,
    unexpected: BTreeMap<u16, u64>,
    transport_failures: u64,
}

impl StatusTally {
    pub fn record(&mut self, class: StatusClass) {
        match class {
            StatusClass::Success => self.ok = self.ok.saturating_add(1),
            StatusClass::ServerError => self.server_error = self.server_error.saturating_add(1),
            StatusClass::ServiceUnavailable => {
                self.service_unavailable = self.service_unavailable.saturating_add(1);
            }
            StatusClass::GatewayTimeout => {
                self.gateway_timeout = self.gateway_timeout.saturating_add(1);
            }
            StatusClass::Other(Some(code)) => {
                let count = self.unexpected.entry(code).or_insert(0);
                *count = count.saturating_add(1);
            }
            StatusClass::Other(None) => {
                self.transport_failures = self.transport_failures.saturating_add(1);
            }
        }
    }

    #[must_use]
    pub const fn count_200(&self) -> u64 {
        self.ok
    }

    #[must_use]
    pub const fn count_500(&self) -> u64 {
        self.server_error
    }

    #[must_use]
    pub const fn count_503(&self) -> u64 {
        self.service_unavailable
    }

    #[must_use]
    pub const fn count_504(&self) -> u64 {
        self.gateway_timeout
    }

    /// Untracked status codes, each with its count.
    #[must_use]
    pub const fn unexpected_statuses(&self) -> &BTreeMap<u16, u64> {
        &self.unexpected
    }

    #[must_use]
    pub const fn transport_failures(&self) -> u64 {
        self.transport_failures
    }

    /// Everything outside the four tracked codes.
    #[must_use]
    pub fn other(&self) -> u64 {
        self.unexpected
            .values()
            .fold(self.transport_failures, |acc, count| acc.saturating_add(*count))
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.ok
            .saturating_add(self.server_error)
            .saturating_add(self.service_unavailable)
            .saturating_add(self.gateway_timeout)
            .saturating_add(self.other())
    }

    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.ok > 0 && self.ok == self.total()
    }
}
