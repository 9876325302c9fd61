use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use super::config::RowSinkConfig;
use super::format::{csv_header, csv_line};
use crate::error::SinkError;
use crate::record::BenchmarkRow;

/// Append rows to every configured sink.
///
/// # Errors
///
/// Returns an error if a sink file cannot be opened, a row cannot be
/// serialized, or a write fails.
pub async fn append_rows(config: &RowSinkConfig, rows: &[BenchmarkRow]) -> Result<(), SinkError> {
    if rows.is_empty() {
        return Ok(());
    }
    if let Some(path) = config.csv.as_ref() {
        append_csv(path, rows).await?;
    }
    if let Some(path) = config.jsonl.as_ref() {
        append_jsonl(path, rows).await?;
    }
    Ok(())
}

async fn append_csv(path: &Path, rows: &[BenchmarkRow]) -> Result<(), SinkError> {
    let file = open_append(path).await?;
    let existing_len = file
        .metadata()
        .await
        .map_err(|err| SinkError::Open {
            path: path.to_path_buf(),
            source: err,
        })?
        .len();

    let mut output = String::new();
    if existing_len == 0 {
        output.push_str(&csv_header());
    }
    for row in rows {
        output.push_str(&csv_line(row));
    }
    write_all(path, file, output.as_bytes()).await?;
    debug!("Appended {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

async fn append_jsonl(path: &Path, rows: &[BenchmarkRow]) -> Result<(), SinkError> {
    let mut output = Vec::new();
    for row in rows {
        let line = serde_json::to_vec(row).map_err(|err| SinkError::SerializeRow { source: err })?;
        output.extend_from_slice(&line);
        output.push(b'\n');
    }
    let file = open_append(path).await?;
    write_all(path, file, &output).await?;
    debug!("Appended {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

async fn open_append(path: &Path) -> Result<tokio::fs::File, SinkError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|err| SinkError::Open {
            path: path.to_path_buf(),
            source: err,
        })
}

async fn write_all(path: &Path, file: tokio::fs::File, bytes: &[u8]) -> Result<(), SinkError> {
    let mut writer = BufWriter::new(file);
    let result = match writer.write_all(bytes).await {
        Ok(()) => writer.flush().await,
        Err(err) => Err(err),
    };
    result.map_err(|err| SinkError::Write {
        path: path.to_path_buf(),
        source: err,
    })
}
