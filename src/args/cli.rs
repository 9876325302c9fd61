use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::probe::ParamValue;

use super::parsers::{parse_duration_arg, parse_header, parse_param, parse_positive_usize};
use super::types::{DispatchMode, HttpMethod, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent HTTP latency probe - fan out identical requests, tally status codes, time the batch, and record benchmark rows."
)]
pub struct ProbeCliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Send one batch of concurrent requests and report the result
    Probe(ProbeArgs),
    /// Run every case of a benchmark suite file
    Suite(SuiteArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ProbeArgs {
    /// Target URL
    #[arg(long, short)]
    pub url: String,

    /// Number of concurrent requests in the batch
    #[arg(long, short = 'c', default_value = "1", value_parser = parse_positive_usize)]
    pub concurrency: PositiveUsize,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// File attached as the multipart `file_name` field (required for post)
    #[arg(long, short)]
    pub file: Option<String>,

    /// Query parameter in 'key=value' format (repeatable)
    #[arg(long = "param", short = 'p', value_parser = parse_param)]
    pub params: Vec<(String, ParamValue)>,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long, default_value = "30s", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Connection timeout (supports ms/s/m/h)
    #[arg(long = "connect-timeout", default_value = "10s", value_parser = parse_duration_arg)]
    pub connect_timeout: Duration,

    /// How the batch is dispatched
    #[arg(long, default_value = "parallel", ignore_case = true)]
    pub dispatch: DispatchMode,

    /// Send `Authorization: Bearer <token>` using SYNAPSE_AUTH_TOKEN or TOKEN
    #[arg(long = "bearer-auth")]
    pub bearer_auth: bool,

    #[command(flatten)]
    pub row: RowArgs,

    #[command(flatten)]
    pub sinks: SinkArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RowArgs {
    /// Endpoint name recorded in the benchmark row (defaults to the URL path)
    #[arg(long = "endpoint-name")]
    pub endpoint_name: Option<String>,

    /// Free-text description recorded in the benchmark row
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct SinkArgs {
    /// Append benchmark rows to this CSV file
    #[arg(long = "output-csv")]
    pub output_csv: Option<String>,

    /// Append benchmark rows to this JSON lines file
    #[arg(long = "output-jsonl")]
    pub output_jsonl: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct SuiteArgs {
    /// Suite file (.toml or .json)
    #[arg(long, short = 'C')]
    pub config: String,

    /// Only run cases whose endpoint matches (repeatable)
    #[arg(long = "only")]
    pub only: Vec<String>,

    #[command(flatten)]
    pub sinks: SinkArgs,
}
