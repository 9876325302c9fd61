use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::args::{DispatchMode, HttpMethod};
use crate::error::ConfigError;
use crate::probe::ParamValue;
use crate::sinks::RowSinkConfig;

use super::parse::parse_duration_value;

#[derive(Debug, Default, Deserialize)]
pub struct SuiteFile {
    pub base_url: Option<String>,
    #[serde(default)]
    pub bearer_auth: bool,
    #[serde(default)]
    pub defaults: SuiteDefaults,
    pub fixtures: Option<FixturesConfig>,
    #[serde(default)]
    pub output: RowSinkConfig,
    #[serde(default)]
    pub cases: Vec<CaseConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuiteDefaults {
    pub concurrency: Option<usize>,
    pub iterations: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub dispatch: Option<DispatchMode>,
}

/// Identifiers substituted into `{{dataset_id}}`, `{{project_id}}` and
/// `{{asset_view}}` placeholders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    pub dataset_id: String,
    pub project_id: String,
    pub asset_view: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CaseConfig {
    pub endpoint: String,
    #[serde(default)]
    pub description: String,
    pub url: Option<String>,
    pub path: Option<String>,
    #[serde(default)]
    pub method: HttpMethod,
    pub file: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub iterations: Option<usize>,
    /// Overrides the suite-level `bearer_auth` for this case.
    pub bearer_auth: Option<bool>,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub params: BTreeMap<String, RawParamValue>,
    #[serde(default)]
    pub record: RecordConfig,
    #[serde(default)]
    pub variants: Vec<VariantConfig>,
}

/// Row metadata for a case. String fields may hold placeholders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecordConfig {
    pub data_schema: String,
    pub num_rows: u64,
    pub data_type: String,
    pub output_format: String,
    pub restrict_rules: bool,
    pub asset_view: String,
    pub manifest_record_type: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct VariantConfig {
    #[serde(default)]
    pub label: String,
    /// Replaces the case description in rows when set.
    pub description: Option<String>,
    pub concurrency: Option<usize>,
    #[serde(default)]
    pub params: BTreeMap<String, RawParamValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawParamValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Unsupported(serde_json::Value),
}

impl RawParamValue {
    pub(crate) fn to_param_value(&self, endpoint: &str, name: &str) -> Result<ParamValue, ConfigError> {
        match self {
            RawParamValue::Bool(value) => Ok(ParamValue::Bool(*value)),
            RawParamValue::Integer(value) => Ok(ParamValue::Number(value.to_string())),
            RawParamValue::Float(value) => Ok(ParamValue::Number(value.to_string())),
            RawParamValue::Text(value) => Ok(ParamValue::Text(value.clone())),
            RawParamValue::Unsupported(_) => Err(ConfigError::UnsupportedParamValue {
                endpoint: endpoint.to_owned(),
                name: name.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ConfigError> {
        match self {
            DurationValue::Seconds(0) => Err(ConfigError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(value) => parse_duration_value(value),
        }
    }
}
