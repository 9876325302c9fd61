//! Row sinks: append benchmark rows to CSV and JSON-lines files.
pub mod config;
mod format;
pub mod writers;


pub use config::RowSinkConfig;
pub use writers::append_rows;
