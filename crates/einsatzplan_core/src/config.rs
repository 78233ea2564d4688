//! Environment configuration for the optional remote mirror.
//!
//! # Responsibility
//! - Read the remote endpoint configuration from the environment.
//!
//! # Invariants
//! - Missing or blank configuration disables remote sync; it is never an
//!   error.

/// Environment variable holding the remote endpoint URL.
pub const ENV_REMOTE_URL: &str = "PVE_SUPABASE_URL";
/// Environment variable holding the anonymous API key.
pub const ENV_REMOTE_ANON_KEY: &str = "PVE_SUPABASE_ANON_KEY";

/// Remote endpoint configuration. Existence implies sync is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub anon_key: String,
}

impl RemoteConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// Returns `None` (sync disabled) when either variable is unset or
    /// blank.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through an injected lookup, so tests can
    /// avoid touching process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let url = non_blank(lookup(ENV_REMOTE_URL))?;
        let anon_key = non_blank(lookup(ENV_REMOTE_ANON_KEY))?;
        Some(Self { url, anon_key })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
