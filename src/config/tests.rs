use super::types::{DurationValue, RawParamValue};
use super::{load_suite, load_suite_file, parse_duration_value};
use crate::args::{DispatchMode, HttpMethod};
use crate::error::{AppError, ConfigError};
use crate::probe::ParamValue;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

const SUITE_TOML: &str = r#"
base_url = "https://schematic.example.org/v1"
bearer_auth = true

[defaults]
concurrency = 2
iterations = 3
timeout = "45s"
connect_timeout = 5
dispatch = "cooperative"

[fixtures]
dataset_id = "syn51"
project_id = "syn23"
asset_view = "syn23643253"

[output]
csv = "rows.csv"

[[cases]]
endpoint = "manifest/generate"
description = "Generate a manifest"
path = "manifest/generate"
headers = ["Accept: application/json"]
params = { data_type = "Patient", dataset_id = "{{dataset_id}}", use_annotations = false, num = 7 }

[cases.record]
data_schema = "example.model.jsonld"
num_rows = 542
asset_view = "{{asset_view}}"

[[cases.variants]]
label = "annotations"
params = { use_annotations = true }

[[cases]]
endpoint = "model/submit"
url = "https://other.example.org/v1/model/submit"
method = "post"
file = "manifest.csv"
iterations = 1
"#;

fn write_suite(dir: &Path, name: &str, content: &str) -> Result<std::path::PathBuf, String> {
    let path = dir.join(name);
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;
    Ok(path)
}

fn expect_config_error<F>(content: &str, matches: F) -> Result<(), String>
where
    F: Fn(&ConfigError) -> bool,
{
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_suite(dir.path(), "suite.toml", content)?;
    let path_str = path.to_str().ok_or_else(|| "Non-UTF8 path".to_owned())?;
    match load_suite(path_str) {
        Err(AppError::Config(err)) if matches(&err) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected suite to be rejected".to_owned()),
    }
}

#[test]
fn parse_toml_suite() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_suite(dir.path(), "suite.toml", SUITE_TOML)?;
    let path_str = path.to_str().ok_or_else(|| "Non-UTF8 path".to_owned())?;

    let suite = load_suite(path_str).map_err(|err| err.to_string())?;

    if !suite.bearer_auth || suite.cases.len() != 2 {
        return Err(format!("Unexpected suite: {:?}", suite));
    }
    if suite.defaults.dispatch != Some(DispatchMode::Cooperative) {
        return Err("Expected cooperative dispatch".to_owned());
    }
    let timeout = suite
        .defaults
        .timeout
        .as_ref()
        .ok_or_else(|| "Missing timeout".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if timeout != Duration::from_secs(45) {
        return Err(format!("Unexpected timeout {:?}", timeout));
    }
    let fixtures = suite.fixtures.as_ref().ok_or_else(|| "Missing fixtures".to_owned())?;
    if fixtures.asset_view != "syn23643253" {
        return Err("Unexpected asset_view".to_owned());
    }
    if suite.output.csv.as_deref() != Some(Path::new("rows.csv")) || suite.output.jsonl.is_some() {
        return Err(format!("Unexpected output {:?}", suite.output));
    }

    let first = suite.cases.first().ok_or_else(|| "Missing case".to_owned())?;
    if first.method != HttpMethod::Get || first.record.num_rows != 542 {
        return Err(format!("Unexpected first case {:?}", first));
    }
    match first.params.get("num") {
        Some(RawParamValue::Integer(7)) => {}
        other => return Err(format!("Unexpected num param {:?}", other)),
    }
    let variant = first.variants.first().ok_or_else(|| "Missing variant".to_owned())?;
    let annotations = variant
        .params
        .get("use_annotations")
        .ok_or_else(|| "Missing variant param".to_owned())?
        .to_param_value(&first.endpoint, "use_annotations")
        .map_err(|err| err.to_string())?;
    if annotations != ParamValue::Bool(true) {
        return Err(format!("Unexpected variant param {:?}", annotations));
    }

    let second = suite.cases.get(1).ok_or_else(|| "Missing second case".to_owned())?;
    if second.method != HttpMethod::Post || second.file.is_none() || second.iterations != Some(1) {
        return Err(format!("Unexpected second case {:?}", second));
    }
    Ok(())
}

#[test]
fn parse_json_suite() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let content = r#"{
        "cases": [
            {
                "endpoint": "storage/assets/tables",
                "url": "http://localhost:3001/v1/storage/assets/tables",
                "params": { "asset_view": "syn23643253", "return_type": "json", "ratio": 0.5 }
            }
        ]
    }"#;
    let path = write_suite(dir.path(), "suite.json", content)?;

    let suite = load_suite_file(&path).map_err(|err| err.to_string())?;

    let case = suite.cases.first().ok_or_else(|| "Missing case".to_owned())?;
    let ratio = case
        .params
        .get("ratio")
        .ok_or_else(|| "Missing ratio".to_owned())?
        .to_param_value(&case.endpoint, "ratio")
        .map_err(|err| err.to_string())?;
    if ratio != ParamValue::Number("0.5".to_owned()) {
        return Err(format!("Unexpected ratio {:?}", ratio));
    }
    if suite.fixtures.is_some() || suite.bearer_auth {
        return Err("Expected no fixtures and no bearer auth".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_suite(dir.path(), "suite.yaml", "cases: []")?;
    match load_suite_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected extension error".to_owned()),
    }
}

#[test]
fn suite_without_cases_is_rejected() -> Result<(), String> {
    expect_config_error("base_url = \"http://localhost\"\n", |err| {
        matches!(err, ConfigError::SuiteMissingCases)
    })
}

#[test]
fn case_needs_url_or_path() -> Result<(), String> {
    expect_config_error("[[cases]]\nendpoint = \"a\"\n", |err| {
        matches!(err, ConfigError::CaseMissingUrlOrPath { index: 1, .. })
    })
}

#[test]
fn case_path_needs_base_url() -> Result<(), String> {
    expect_config_error("[[cases]]\nendpoint = \"a\"\npath = \"a\"\n", |err| {
        matches!(err, ConfigError::CaseBaseUrlRequired { .. })
    })
}

#[test]
fn case_cannot_set_url_and_path() -> Result<(), String> {
    expect_config_error(
        "base_url = \"http://h\"\n[[cases]]\nendpoint = \"a\"\npath = \"a\"\nurl = \"http://h/a\"\n",
        |err| matches!(err, ConfigError::CaseUrlPathConflict { .. }),
    )
}

#[test]
fn post_case_needs_file() -> Result<(), String> {
    expect_config_error(
        "[[cases]]\nendpoint = \"model/submit\"\nurl = \"http://h/submit\"\nmethod = \"post\"\n",
        |err| matches!(err, ConfigError::CaseMissingFile { .. }),
    )
}

#[test]
fn zero_iterations_are_rejected() -> Result<(), String> {
    expect_config_error(
        "[[cases]]\nendpoint = \"a\"\nurl = \"http://h/a\"\niterations = 0\n",
        |err| {
            matches!(
                err,
                ConfigError::CaseFieldMustBePositive {
                    field: "iterations",
                    ..
                }
            )
        },
    )
}

#[test]
fn zero_default_concurrency_is_rejected() -> Result<(), String> {
    expect_config_error(
        "[defaults]\nconcurrency = 0\n[[cases]]\nendpoint = \"a\"\nurl = \"http://h/a\"\n",
        |err| {
            matches!(
                err,
                ConfigError::DefaultMustBePositive {
                    field: "concurrency"
                }
            )
        },
    )
}

#[test]
fn variant_needs_label() -> Result<(), String> {
    expect_config_error(
        "[[cases]]\nendpoint = \"a\"\nurl = \"http://h/a\"\n[[cases.variants]]\nparams = { x = 1 }\n",
        |err| matches!(err, ConfigError::VariantMissingLabel { variant: 1, .. }),
    )
}

#[test]
fn nested_param_values_are_rejected() -> Result<(), String> {
    expect_config_error(
        "[[cases]]\nendpoint = \"a\"\nurl = \"http://h/a\"\nparams = { list = [1, 2] }\n",
        |err| matches!(err, ConfigError::UnsupportedParamValue { name, .. } if name == "list"),
    )
}

#[test]
fn malformed_case_header_is_rejected() -> Result<(), String> {
    expect_config_error(
        "[[cases]]\nendpoint = \"a\"\nurl = \"http://h/a\"\nheaders = [\"no-colon\"]\n",
        |err| matches!(err, ConfigError::InvalidHeader { .. }),
    )
}

#[test]
fn duration_values_accept_units() -> Result<(), String> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("30s", Duration::from_secs(30)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
        ("15", Duration::from_secs(15)),
    ];
    for (raw, expected) in cases {
        let parsed = parse_duration_value(raw).map_err(|err| err.to_string())?;
        if parsed != expected {
            return Err(format!("{}: expected {:?}, got {:?}", raw, expected, parsed));
        }
    }
    for raw in ["", "fast", "10d", "0s"] {
        if parse_duration_value(raw).is_ok() {
            return Err(format!("Expected '{}' to be rejected", raw));
        }
    }
    if DurationValue::Seconds(0).to_duration().is_ok() {
        return Err("Expected zero seconds to be rejected".to_owned());
    }
    Ok(())
}
