use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::ensure;
use serde::Deserialize;

use crate::error::Error;
use crate::query::Query;
use crate::urls;

const MAX_COUNT: u32 = 30;

fn default_delay() -> Duration {
    Duration::from_millis(5000)
}

fn default_source_base() -> String {
    urls::SOURCE_BASE_URL.to_string()
}

fn default_api_base() -> String {
    urls::API_BASE_URL.to_string()
}

/// Endpoint overrides; the defaults are the public services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EndpointsConfig {
    #[serde(default = "default_source_base")]
    pub source_base: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            source_base: default_source_base(),
            api_base: default_api_base(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BackdropConfig {
    /// What to display. A mapping carrying `access-key` selects the
    /// authorized family; otherwise `by:` selects the anonymous shape.
    pub query: Query,

    /// Time between rotation steps.
    #[serde(default = "default_delay", with = "humantime_serde")]
    pub delay: Duration,

    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

impl BackdropConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.delay.is_zero(), "delay must be non-zero");
        if let Query::Authorized(query) = &self.query {
            ensure!(
                !query.access_key.trim().is_empty(),
                "access-key must not be blank"
            );
            if let Some(count) = query.count {
                ensure!(
                    (1..=MAX_COUNT).contains(&count),
                    "count must be between 1 and {MAX_COUNT}, got {count}"
                );
            }
        }
        Ok(())
    }
}

pub fn from_yaml_file(path: &Path) -> Result<BackdropConfig, Error> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}
