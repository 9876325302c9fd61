use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::args::HttpMethod;

/// A query parameter value. Numbers keep their textual form so the value
/// sent on the wire is exactly what the caller wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Bool(bool),
    Number(String),
    Text(String),
}

impl ParamValue {
    /// Interprets a raw CLI value: `true`/`false` become booleans, integers
    /// and decimals become numbers, everything else stays text.
    #[must_use]
    pub fn from_cli(raw: &str) -> Self {
        match raw {
            "true" => ParamValue::Bool(true),
            "false" => ParamValue::Bool(false),
            _ if is_number(raw) => ParamValue::Number(raw.to_owned()),
            _ => ParamValue::Text(raw.to_owned()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(value) => write!(f, "{}", value),
            ParamValue::Number(value) | ParamValue::Text(value) => f.write_str(value),
        }
    }
}

fn is_number(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() {
        return false;
    }
    let mut seen_dot = false;
    let mut seen_digit = false;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit && !digits.starts_with('.') && !digits.ends_with('.')
}

/// One endpoint plus one parameter set. Cloned into every worker of a
/// batch and never modified after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    url: String,
    method: HttpMethod,
    params: BTreeMap<String, ParamValue>,
    headers: Vec<(String, String)>,
    payload: Option<PathBuf>,
}

impl ProbeRequest {
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            params: BTreeMap::new(),
            headers: Vec::new(),
            payload: None,
        }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (String, ParamValue)>,
    {
        self.params.extend(params);
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.headers.extend(headers);
        self
    }

    #[must_use]
    pub fn payload(mut self, path: impl Into<PathBuf>) -> Self {
        self.payload = Some(path.into());
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    #[must_use]
    pub const fn param_map(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    #[must_use]
    pub fn header_list(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub fn payload_path(&self) -> Option<&Path> {
        self.payload.as_deref()
    }

    /// Query pairs in key order, values rendered for the wire.
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect()
    }

    /// Parameters formatted for log lines.
    pub(crate) fn params_display(&self) -> String {
        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        format!("{{{}}}", pairs.join(", "))
    }
}
