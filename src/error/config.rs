use super::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Suite must include at least one case.")]
    SuiteMissingCases,
    #[error("Case {index} ('{endpoint}') must define url or path.")]
    CaseMissingUrlOrPath { index: usize, endpoint: String },
    #[error("Case {index} ('{endpoint}') uses a path but the suite has no base_url.")]
    CaseBaseUrlRequired { index: usize, endpoint: String },
    #[error("Case {index} ('{endpoint}') cannot set both url and path.")]
    CaseUrlPathConflict { index: usize, endpoint: String },
    #[error("Case {index} ('{endpoint}') uses method post but has no file.")]
    CaseMissingFile { index: usize, endpoint: String },
    #[error("Case {index} ('{endpoint}'): '{field}' must be >= 1.")]
    CaseFieldMustBePositive {
        index: usize,
        endpoint: String,
        field: &'static str,
    },
    #[error("defaults.{field} must be >= 1.")]
    DefaultMustBePositive { field: &'static str },
    #[error("No case matches the endpoint filter {filters:?}.")]
    NoMatchingCases { filters: Vec<String> },
    #[error("Case {index} ('{endpoint}') variant {variant} must have a label.")]
    VariantMissingLabel {
        index: usize,
        endpoint: String,
        variant: usize,
    },
    #[error("Invalid base_url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to join '{path}' onto base_url: {source}")]
    JoinUrlFailed {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid header in case '{endpoint}': {source}")]
    InvalidHeader {
        endpoint: String,
        #[source]
        source: ValidationError,
    },
    #[error("Unsupported value for param '{name}' in case '{endpoint}'. Use a string, boolean, or number.")]
    UnsupportedParamValue { endpoint: String, name: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
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
