use std::path::PathBuf;

use serde::Deserialize;

/// Destinations rows are appended to. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RowSinkConfig {
    pub csv: Option<PathBuf>,
    pub jsonl: Option<PathBuf>,
}

impl RowSinkConfig {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.csv.is_none() && self.jsonl.is_none()
    }

    /// Fills destinations missing here from `fallback`.
    #[must_use]
    pub fn or(self, fallback: &Self) -> Self {
        Self {
            csv: self.csv.or_else(|| fallback.csv.clone()),
            jsonl: self.jsonl.or_else(|| fallback.jsonl.clone()),
        }
    }
}
