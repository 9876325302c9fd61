use std::collections::BTreeMap;
use std::path::Path;

use url::Url;

use crate::args::{HttpMethod, parse_header};
use crate::config::types::{CaseConfig, RawParamValue, SuiteDefaults, SuiteFile, VariantConfig};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::fixtures::{AccessToken, FixtureIds};
use crate::probe::{ParamValue, ProbeRequest, ProbeSettings};
use crate::record::RowContext;

use super::template::render_template;

/// One case × one variant, fully resolved and ready to probe.
#[derive(Debug, Clone)]
pub struct ProbePlan {
    pub label: String,
    pub request: ProbeRequest,
    pub concurrency: usize,
    pub iterations: usize,
    pub context: RowContext,
}

pub(crate) struct PlanInputs<'a> {
    pub(crate) only: &'a [String],
    pub(crate) fixtures: Option<&'a FixtureIds>,
    pub(crate) token: Option<&'a AccessToken>,
    pub(crate) base_dir: Option<&'a Path>,
}

pub(crate) fn build_plans(suite: &SuiteFile, inputs: &PlanInputs<'_>) -> AppResult<Vec<ProbePlan>> {
    let selected: Vec<(usize, &CaseConfig)> = suite
        .cases
        .iter()
        .enumerate()
        .filter(|(_, case)| inputs.only.is_empty() || inputs.only.contains(&case.endpoint))
        .map(|(position, case)| (position.saturating_add(1), case))
        .collect();
    if selected.is_empty() {
        return Err(AppError::config(ConfigError::NoMatchingCases {
            filters: inputs.only.to_vec(),
        }));
    }

    let mut plans = Vec::new();
    for (index, case) in selected {
        if case.variants.is_empty() {
            plans.push(plan_for(suite, (index, case), None, inputs)?);
        } else {
            for variant in &case.variants {
                plans.push(plan_for(suite, (index, case), Some(variant), inputs)?);
            }
        }
    }
    Ok(plans)
}

pub(crate) fn suite_settings(defaults: &SuiteDefaults) -> Result<ProbeSettings, ConfigError> {
    let mut settings = ProbeSettings::default();
    if let Some(timeout) = defaults.timeout.as_ref() {
        settings.request_timeout = timeout.to_duration()?;
    }
    if let Some(timeout) = defaults.connect_timeout.as_ref() {
        settings.connect_timeout = timeout.to_duration()?;
    }
    if let Some(dispatch) = defaults.dispatch {
        settings.dispatch = dispatch;
    }
    Ok(settings)
}

fn plan_for(
    suite: &SuiteFile,
    (index, case): (usize, &CaseConfig),
    variant: Option<&VariantConfig>,
    inputs: &PlanInputs<'_>,
) -> AppResult<ProbePlan> {
    let fixtures = inputs.fixtures;
    let url = resolve_url(suite.base_url.as_deref(), index, case, fixtures)?;

    let mut params = render_params(&case.endpoint, &case.params, fixtures)?;
    if let Some(variant) = variant {
        params.extend(render_params(&case.endpoint, &variant.params, fixtures)?);
    }

    let mut headers = Vec::with_capacity(case.headers.len().saturating_add(1));
    for header in &case.headers {
        let parsed = parse_header(header).map_err(|err| ConfigError::InvalidHeader {
            endpoint: case.endpoint.clone(),
            source: err,
        })?;
        headers.push(parsed);
    }
    if case.bearer_auth.unwrap_or(suite.bearer_auth) {
        let token = inputs
            .token
            .ok_or_else(|| AppError::validation(ValidationError::MissingAccessToken))?;
        headers.push(token.bearer_header());
    }

    let mut request = ProbeRequest::new(case.method, url)
        .params(params)
        .headers(headers);
    if let (HttpMethod::Post, Some(file)) = (case.method, case.file.as_ref()) {
        let path = match inputs.base_dir {
            Some(base_dir) if file.is_relative() => base_dir.join(file),
            Some(_) | None => file.clone(),
        };
        request = request.payload(path);
    }

    let label = match variant {
        Some(variant) => format!("{} [{}]", case.endpoint, variant.label),
        None => case.endpoint.clone(),
    };
    let description = match variant {
        Some(VariantConfig {
            description: Some(description),
            ..
        }) => render_template(description, fixtures),
        Some(variant) if !case.description.is_empty() => format!(
            "{} [{}]",
            render_template(&case.description, fixtures),
            variant.label
        ),
        Some(_) | None => render_template(&case.description, fixtures),
    };
    let record = &case.record;
    let context = RowContext {
        endpoint_name: case.endpoint.clone(),
        description,
        data_schema: render_template(&record.data_schema, fixtures),
        num_rows: record.num_rows,
        data_type: render_template(&record.data_type, fixtures),
        output_format: render_template(&record.output_format, fixtures),
        restrict_rules: record.restrict_rules,
        asset_view: render_template(&record.asset_view, fixtures),
        manifest_record_type: render_template(&record.manifest_record_type, fixtures),
    };

    let concurrency = variant
        .and_then(|variant| variant.concurrency)
        .or(case.concurrency)
        .or(suite.defaults.concurrency)
        .unwrap_or(1);
    let iterations = case
        .iterations
        .or(suite.defaults.iterations)
        .unwrap_or(1);

    Ok(ProbePlan {
        label,
        request,
        concurrency,
        iterations,
        context,
    })
}

fn resolve_url(
    base_url: Option<&str>,
    index: usize,
    case: &CaseConfig,
    fixtures: Option<&FixtureIds>,
) -> Result<String, ConfigError> {
    if let Some(url) = case.url.as_deref() {
        return Ok(render_template(url, fixtures));
    }
    let path = case
        .path
        .as_deref()
        .ok_or_else(|| ConfigError::CaseMissingUrlOrPath {
            index,
            endpoint: case.endpoint.clone(),
        })?;
    let base_url = base_url.ok_or_else(|| ConfigError::CaseBaseUrlRequired {
        index,
        endpoint: case.endpoint.clone(),
    })?;

    let mut base = Url::parse(base_url).map_err(|err| ConfigError::InvalidBaseUrl {
        url: base_url.to_owned(),
        source: err,
    })?;
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    let rendered = render_template(path, fixtures);
    let joined = base
        .join(rendered.trim_start_matches('/'))
        .map_err(|err| ConfigError::JoinUrlFailed {
            path: rendered.clone(),
            source: err,
        })?;
    Ok(joined.to_string())
}

fn render_params(
    endpoint: &str,
    raw: &BTreeMap<String, RawParamValue>,
    fixtures: Option<&FixtureIds>,
) -> Result<BTreeMap<String, ParamValue>, ConfigError> {
    let mut params = BTreeMap::new();
    for (name, value) in raw {
        let param = match value.to_param_value(endpoint, name)? {
            ParamValue::Text(text) => ParamValue::Text(render_template(&text, fixtures)),
            other @ (ParamValue::Bool(_) | ParamValue::Number(_)) => other,
        };
        params.insert(name.clone(), param);
    }
    Ok(params)
}
