//! Run configuration, resolved once at process start.
//!
//! Every other component receives an [`AgcConfig`] by reference; none of
//! them reads the process environment.
//!
//! | Variable | Required | Meaning |
//! |----------|----------|---------|
//! | `OPENAI_API_KEY` | always | bearer token for the gateway |
//! | `E2B_API_KEY` | `py-fun-tool` | sandbox key pinned into the Python tool descriptor |
//! | `AGC_BASE_URL` | no | gateway base URL (default `http://localhost:6644/v1`) |
//! | `AGC_MODEL` | no | `<provider>@<model-name>` override |
//! | `AGC_HTTP_CONNECT_TIMEOUT_SECS` | no | connect timeout (default 10) |

mod model;

pub use model::ModelRef;

use crate::conversation::Scenario;
use crate::{Error, ErrorContext, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:6644/v1";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const E2B_API_KEY: &str = "E2B_API_KEY";
pub const AGC_BASE_URL: &str = "AGC_BASE_URL";
pub const AGC_MODEL: &str = "AGC_MODEL";
pub const AGC_HTTP_CONNECT_TIMEOUT_SECS: &str = "AGC_HTTP_CONNECT_TIMEOUT_SECS";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct AgcConfig {
    pub api_key: String,
    pub e2b_api_key: Option<String>,
    pub base_url: String,
    pub model: ModelRef,
    pub connect_timeout: Duration,
}

impl AgcConfig {
    /// Resolve from the process environment.
    pub fn from_env(scenario: Scenario) -> Result<Self> {
        Self::resolve(scenario, |key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary key lookup.
    ///
    /// Credentials are checked first, in the order the gateway needs them,
    /// so a missing key is reported before anything else is validated.
    pub fn resolve<F>(scenario: Scenario, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(OPENAI_API_KEY).ok_or_else(|| Error::missing_credential(OPENAI_API_KEY))?;

        let e2b_api_key = non_empty(E2B_API_KEY);
        if scenario.requires_e2b() && e2b_api_key.is_none() {
            return Err(Error::missing_credential(E2B_API_KEY));
        }

        let base_url = normalize_base_url(
            &non_empty(AGC_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )?;

        let model = match non_empty(AGC_MODEL) {
            Some(raw) => ModelRef::parse(&raw)?,
            None => ModelRef::parse(scenario.default_model())?,
        };

        let connect_timeout = Duration::from_secs(
            lookup(AGC_HTTP_CONNECT_TIMEOUT_SECS)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        );

        Ok(Self {
            api_key,
            e2b_api_key,
            base_url,
            model,
            connect_timeout,
        })
    }

    /// Override the base URL (CLI `--base-url`).
    pub fn with_base_url(mut self, raw: &str) -> Result<Self> {
        self.base_url = normalize_base_url(raw)?;
        Ok(self)
    }

    /// Override the model (CLI `--model`).
    pub fn with_model(mut self, raw: &str) -> Result<Self> {
        self.model = ModelRef::parse(raw)?;
        Ok(self)
    }

    /// E2B key as pinned into descriptors; empty when not configured.
    pub fn e2b_api_key_or_empty(&self) -> &str {
        self.e2b_api_key.as_deref().unwrap_or("")
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

// Keys never reach logs.
impl fmt::Debug for AgcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgcConfig")
            .field("api_key", &"<redacted>")
            .field(
                "e2b_api_key",
                &self.e2b_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("base_url", &self.base_url)
            .field("model", &self.model.to_string())
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid base url '{}'", raw),
            ErrorContext::new()
                .with_field_path(AGC_BASE_URL)
                .with_details(e.to_string())
                .with_source("config"),
        )
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            format!("unsupported scheme '{}'", url.scheme()),
            ErrorContext::new()
                .with_field_path(AGC_BASE_URL)
                .with_source("config"),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
