use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Fixture provisioning returned an empty {field}.")]
    EmptyId { field: &'static str },
    #[error("Fixture provisioning failed: {message}")]
    Provisioning { message: String },
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
