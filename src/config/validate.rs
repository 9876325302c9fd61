use url::Url;

use crate::args::{HttpMethod, parse_header};
use crate::error::ConfigError;

use super::types::{CaseConfig, SuiteFile};

pub(super) fn validate_suite(suite: &SuiteFile) -> Result<(), ConfigError> {
    if suite.cases.is_empty() {
        return Err(ConfigError::SuiteMissingCases);
    }
    if let Some(base_url) = suite.base_url.as_deref() {
        Url::parse(base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source: err,
        })?;
    }

    let defaults = &suite.defaults;
    if defaults.concurrency == Some(0) {
        return Err(ConfigError::DefaultMustBePositive {
            field: "concurrency",
        });
    }
    if defaults.iterations == Some(0) {
        return Err(ConfigError::DefaultMustBePositive {
            field: "iterations",
        });
    }
    if let Some(timeout) = defaults.timeout.as_ref() {
        timeout.to_duration()?;
    }
    if let Some(timeout) = defaults.connect_timeout.as_ref() {
        timeout.to_duration()?;
    }

    for (position, case) in suite.cases.iter().enumerate() {
        validate_case(position.saturating_add(1), case, suite.base_url.is_some())?;
    }
    Ok(())
}

fn validate_case(index: usize, case: &CaseConfig, has_base_url: bool) -> Result<(), ConfigError> {
    let endpoint = || case.endpoint.clone();
    match (case.url.as_ref(), case.path.as_ref()) {
        (Some(_), Some(_)) => {
            return Err(ConfigError::CaseUrlPathConflict {
                index,
                endpoint: endpoint(),
            });
        }
        (None, None) => {
            return Err(ConfigError::CaseMissingUrlOrPath {
                index,
                endpoint: endpoint(),
            });
        }
        (None, Some(_)) if !has_base_url => {
            return Err(ConfigError::CaseBaseUrlRequired {
                index,
                endpoint: endpoint(),
            });
        }
        (Some(_), None) | (None, Some(_)) => {}
    }

    if case.concurrency == Some(0) {
        return Err(ConfigError::CaseFieldMustBePositive {
            index,
            endpoint: endpoint(),
            field: "concurrency",
        });
    }
    if case.iterations == Some(0) {
        return Err(ConfigError::CaseFieldMustBePositive {
            index,
            endpoint: endpoint(),
            field: "iterations",
        });
    }
    if case.method == HttpMethod::Post && case.file.is_none() {
        return Err(ConfigError::CaseMissingFile {
            index,
            endpoint: endpoint(),
        });
    }

    for header in &case.headers {
        parse_header(header).map_err(|err| ConfigError::InvalidHeader {
            endpoint: endpoint(),
            source: err,
        })?;
    }
    for (name, value) in &case.params {
        value.to_param_value(&case.endpoint, name)?;
    }

    for (position, variant) in case.variants.iter().enumerate() {
        if variant.label.trim().is_empty() {
            return Err(ConfigError::VariantMissingLabel {
                index,
                endpoint: endpoint(),
                variant: position.saturating_add(1),
            });
        }
        if variant.concurrency == Some(0) {
            return Err(ConfigError::CaseFieldMustBePositive {
                index,
                endpoint: endpoint(),
                field: "variants.concurrency",
            });
        }
        for (name, value) in &variant.params {
            value.to_param_value(&case.endpoint, name)?;
        }
    }
    Ok(())
}
