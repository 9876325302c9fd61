//! Core library for the `reqprobe` CLI.
//!
//! `reqprobe` fans out batches of identical HTTP requests, tallies the
//! status codes that come back, times each batch and records one benchmark
//! row per batch. The [`probe`] module holds the harness itself; [`suite`]
//! drives many probes from a suite file, and [`record`] plus [`sinks`]
//! turn results into CSV and JSON-lines rows.
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod fixtures;
pub mod probe;
pub mod record;
pub mod sinks;
pub mod suite;
pub(crate) mod system;

#[cfg(test)]
pub(crate) mod test_support;
