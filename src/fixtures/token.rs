use std::fmt;

const TOKEN_ENV_VARS: [&str; 2] = ["SYNAPSE_AUTH_TOKEN", "TOKEN"];

/// Bearer token for the API under test. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Returns `None` for a blank value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value.trim().to_owned()))
        }
    }

    /// Reads `SYNAPSE_AUTH_TOKEN`, then `TOKEN`. Blank values are skipped.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        TOKEN_ENV_VARS
            .iter()
            .find_map(|name| lookup(name).and_then(Self::new))
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// `Authorization` header name and value.
    #[must_use]
    pub fn bearer_header(&self) -> (String, String) {
        ("Authorization".to_owned(), format!("Bearer {}", self.0))
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
