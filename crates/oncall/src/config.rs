//! Process configuration and backend selection.
//!
//! The environment is read once, at startup, into [`Config`]; nothing
//! deeper in the call paths consults environment state. The factory is the
//! only place that decides between the real and the fake backend.

use std::sync::Arc;

use tracing::info;

use crate::backends::fake::FakeProvider;
use crate::backends::pagerduty::PagerDuty;
use crate::backends::{Provider, ProviderError};

/// Environment variable carrying the API token.
const API_TOKEN_VAR: &str = "PAGERDUTY_API_TOKEN";

/// Flags that select the fake backend when set to the literal `"true"`.
const FAKE_BACKEND_VARS: [&str; 2] = ["RUNNING_IN_CI", "LOCAL_DEV_TESTING"];

/// Backend selection and credentials.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// PagerDuty API token. Ignored when `use_fake` is set.
    pub api_token: String,
    /// Use the offline fake backend instead of the real API.
    pub use_fake: bool,
}

impl Config {
    /// Configuration for the real backend with the given token.
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            use_fake: false,
        }
    }

    /// Read configuration from the environment: the API token from
    /// `PAGERDUTY_API_TOKEN`, and the fake backend when `RUNNING_IN_CI`
    /// or `LOCAL_DEV_TESTING` is set to `"true"`.
    #[must_use]
    pub fn from_env() -> Self {
        let use_fake = FAKE_BACKEND_VARS
            .iter()
            .any(|var| fake_requested(std::env::var(var).ok().as_deref()));

        Self {
            api_token: std::env::var(API_TOKEN_VAR).unwrap_or_default(),
            use_fake,
        }
    }
}

/// Whether a flag value selects the fake backend.
fn fake_requested(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Build the backend selected by the configuration.
///
/// # Errors
/// Returns error if the real backend is selected but no API token is
/// configured, or the HTTP client cannot be created.
pub fn provider_from_config(config: &Config) -> Result<Arc<dyn Provider>, ProviderError> {
    if config.use_fake {
        info!("Using fake backend");
        return Ok(Arc::new(FakeProvider::new()));
    }

    if config.api_token.trim().is_empty() {
        return Err(ProviderError::Config(format!(
            "{API_TOKEN_VAR} is required for the real backend"
        )));
    }

    Ok(Arc::new(PagerDuty::new(&config.api_token)?))
}
