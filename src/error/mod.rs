mod app;
mod config;
mod fixture;
mod probe;
mod sink;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use fixture::FixtureError;
pub use probe::ProbeError;
pub use sink::SinkError;
pub use validation::ValidationError;
