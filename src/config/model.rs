use crate::{Error, ErrorContext, Result};
use std::fmt;
use std::str::FromStr;

/// Compound model identifier understood by the gateway: `<provider>@<model-name>`.
///
/// The gateway routes on the provider half, so both halves must be present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelRef {
    provider: String,
    model: String,
}

impl ModelRef {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        match raw.split_once('@') {
            Some((provider, model)) if !provider.is_empty() && !model.is_empty() => {
                Ok(Self::new(provider, model))
            }
            _ => Err(Error::configuration_with_context(
                format!("invalid model identifier '{}'", raw),
                ErrorContext::new()
                    .with_field_path("model")
                    .with_details("expected <provider>@<model-name>, e.g. openai@gpt-4.1-mini")
                    .with_source("config"),
            )),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.provider, self.model)
    }
}

impl FromStr for ModelRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
