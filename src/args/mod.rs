//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::{Command, ProbeArgs, ProbeCliArgs, RowArgs, SinkArgs, SuiteArgs};
pub use types::{DispatchMode, HttpMethod, PositiveUsize};

pub(crate) use defaults::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT};
pub(crate) use parsers::parse_header;
#[cfg(test)]
pub(crate) use parsers::{parse_duration_arg, parse_param};
