//! Benchmark rows: one fixed-order record per probe batch.

use serde::{Deserialize, Serialize};

use crate::probe::{LatencyX100, ProbeResult};

/// Column names, in the order rows are written.
pub const FIELD_NAMES: [&str; 16] = [
    "endpoint_name",
    "description",
    "data_schema",
    "num_rows",
    "data_type",
    "output_format",
    "restrict_rules",
    "asset_view",
    "start_timestamp",
    "manifest_record_type",
    "num_concurrent",
    "latency_seconds",
    "count_200",
    "count_500",
    "count_504",
    "count_503",
];

/// Caller metadata describing what a probe measured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RowContext {
    pub endpoint_name: String,
    pub description: String,
    pub data_schema: String,
    pub num_rows: u64,
    pub data_type: String,
    pub output_format: String,
    pub restrict_rules: bool,
    pub asset_view: String,
    pub manifest_record_type: String,
}

impl RowContext {
    #[must_use]
    pub fn new(endpoint_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            endpoint_name: endpoint_name.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkRow {
    endpoint_name: String,
    description: String,
    data_schema: String,
    num_rows: u64,
    data_type: String,
    output_format: String,
    restrict_rules: bool,
    asset_view: String,
    start_timestamp: String,
    manifest_record_type: String,
    num_concurrent: usize,
    latency_seconds: LatencyX100,
    count_200: u64,
    count_500: u64,
    count_504: u64,
    count_503: u64,
}

impl BenchmarkRow {
    /// Status counts come straight from the result's tally.
    #[must_use]
    pub fn from_probe(context: &RowContext, result: &ProbeResult) -> Self {
        let tally = result.tally();
        Self {
            endpoint_name: context.endpoint_name.clone(),
            description: context.description.clone(),
            data_schema: context.data_schema.clone(),
            num_rows: context.num_rows,
            data_type: context.data_type.clone(),
            output_format: context.output_format.clone(),
            restrict_rules: context.restrict_rules,
            asset_view: context.asset_view.clone(),
            start_timestamp: result.timestamp(),
            manifest_record_type: context.manifest_record_type.clone(),
            num_concurrent: result.concurrency(),
            latency_seconds: result.latency(),
            count_200: tally.count_200(),
            count_500: tally.count_500(),
            count_504: tally.count_504(),
            count_503: tally.count_503(),
        }
    }

    /// Field values rendered as text, in [`FIELD_NAMES`] order.
    #[must_use]
    pub fn fields(&self) -> [String; 16] {
        [
            self.endpoint_name.clone(),
            self.description.clone(),
            self.data_schema.clone(),
            self.num_rows.to_string(),
            self.data_type.clone(),
            self.output_format.clone(),
            self.restrict_rules.to_string(),
            self.asset_view.clone(),
            self.start_timestamp.clone(),
            self.manifest_record_type.clone(),
            self.num_concurrent.to_string(),
            self.latency_seconds.to_string(),
            self.count_200.to_string(),
            self.count_500.to_string(),
            self.count_504.to_string(),
            self.count_503.to_string(),
        ]
    }

    #[must_use]
    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }

    #[must_use]
    pub fn start_timestamp(&self) -> &str {
        &self.start_timestamp
    }

    #[must_use]
    pub const fn latency(&self) -> LatencyX100 {
        self.latency_seconds
    }

    #[must_use]
    pub const fn num_concurrent(&self) -> usize {
        self.num_concurrent
    }

    #[must_use]
    pub const fn count_200(&self) -> u64 {
        self.count_200
    }
}
