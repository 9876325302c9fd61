//! Fixture identifiers and the access token used to reach the API under test.
mod token;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use tracing::debug;

use crate::config::types::FixturesConfig;
use crate::error::FixtureError;

pub use token::AccessToken;

/// Identifiers of the throwaway resources a suite runs against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureIds {
    pub dataset_id: String,
    pub project_id: String,
    pub asset_view: String,
}

impl FixtureIds {
    /// # Errors
    ///
    /// Returns [`FixtureError::EmptyId`] naming the first blank identifier.
    pub fn validate(&self) -> Result<(), FixtureError> {
        for (field, value) in [
            ("dataset_id", &self.dataset_id),
            ("project_id", &self.project_id),
            ("asset_view", &self.asset_view),
        ] {
            if value.trim().is_empty() {
                return Err(FixtureError::EmptyId { field });
            }
        }
        Ok(())
    }

    /// Looks up the value for a `{{name}}` placeholder.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "dataset_id" => Some(&self.dataset_id),
            "project_id" => Some(&self.project_id),
            "asset_view" => Some(&self.asset_view),
            _ => None,
        }
    }
}

impl From<FixturesConfig> for FixtureIds {
    fn from(config: FixturesConfig) -> Self {
        Self {
            dataset_id: config.dataset_id,
            project_id: config.project_id,
            asset_view: config.asset_view,
        }
    }
}

#[async_trait]
pub trait FixtureProvisioner {
    /// Creates or looks up the fixtures a suite needs.
    ///
    /// # Errors
    ///
    /// Returns an error when the fixtures cannot be provisioned.
    async fn provision(&self, token: Option<&AccessToken>) -> Result<FixtureIds, FixtureError>;
}

/// Hands out identifiers that already exist, typically from a suite file.
#[derive(Debug, Clone)]
pub struct StaticFixtures {
    ids: FixtureIds,
}

impl StaticFixtures {
    #[must_use]
    pub const fn new(ids: FixtureIds) -> Self {
        Self { ids }
    }
}

#[async_trait]
impl FixtureProvisioner for StaticFixtures {
    async fn provision(&self, token: Option<&AccessToken>) -> Result<FixtureIds, FixtureError> {
        debug!(
            "Using configured fixtures (dataset {}, project {}, asset view {}, token {})",
            self.ids.dataset_id,
            self.ids.project_id,
            self.ids.asset_view,
            if token.is_some() { "present" } else { "absent" }
        );
        Ok(self.ids.clone())
    }
}
