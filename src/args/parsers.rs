use std::time::Duration;

use super::types::PositiveUsize;
use crate::config::parse_duration_value;
use crate::error::{AppError, AppResult, ValidationError};
use crate::probe::ParamValue;

pub(crate) fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        Some(_) | None => Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

/// Parses a `key=value` query parameter. Only the first `=` splits, so
/// values may contain `=` themselves.
pub(crate) fn parse_param(s: &str) -> Result<(String, ParamValue), ValidationError> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| ValidationError::InvalidParamFormat {
            value: s.to_owned(),
        })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::ParamNameEmpty {
            value: s.to_owned(),
        });
    }
    Ok((name.to_owned(), ParamValue::from_cli(value)))
}

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

/// Same units as suite files: `500ms`, `30s`, `2m`, `1h` or bare seconds.
pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration_value(s).map_err(AppError::from)
}
