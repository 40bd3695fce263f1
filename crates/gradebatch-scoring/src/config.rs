//! Scoring service configuration and factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gradebatch_core::model::DEFAULT_MARKS_OUT_OF;
use gradebatch_core::traits::ScoringService;

use crate::http::{HttpScoringService, DEFAULT_BASE_URL, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::mock::MockScoringService;

/// Configuration for the scoring service.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServiceConfig {
    Http {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default = "default_endpoint")]
        endpoint: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
        #[serde(default)]
        api_key: Option<String>,
    },
    Mock,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceConfig::Http {
                base_url,
                endpoint,
                timeout_secs,
                api_key,
            } => f
                .debug_struct("Http")
                .field("base_url", base_url)
                .field("endpoint", endpoint)
                .field("timeout_secs", timeout_secs)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .finish(),
            ServiceConfig::Mock => f.write_str("Mock"),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig::Http {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
            api_key: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level gradebatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradebatchConfig {
    /// How to reach the scoring service.
    #[serde(default)]
    pub service: ServiceConfig,
    /// Marks out of, when not given on the command line.
    #[serde(default = "default_marks")]
    pub default_marks_out_of: u32,
    /// Output directory for exported reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_marks() -> u32 {
    DEFAULT_MARKS_OUT_OF
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./gradebatch-results")
}

impl Default for GradebatchConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            default_marks_out_of: default_marks(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_service_config(config: &ServiceConfig) -> ServiceConfig {
    match config {
        ServiceConfig::Http {
            base_url,
            endpoint,
            timeout_secs,
            api_key,
        } => ServiceConfig::Http {
            base_url: resolve_env_vars(base_url),
            endpoint: resolve_env_vars(endpoint),
            timeout_secs: *timeout_secs,
            api_key: api_key
                .as_ref()
                .map(|k| resolve_env_vars(k))
                .filter(|k| !k.is_empty()),
        },
        ServiceConfig::Mock => ServiceConfig::Mock,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradebatch.toml` in the current directory
/// 2. `~/.config/gradebatch/config.toml`
///
/// Environment variable overrides: `GRADEBATCH_SERVICE_URL`, `GRADEBATCH_API_KEY`.
pub fn load_config() -> Result<GradebatchConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebatchConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebatch.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradebatchConfig::default(),
    };

    Ok(apply_overrides(config))
}

fn parse_config(content: &str) -> Result<GradebatchConfig> {
    Ok(toml::from_str::<GradebatchConfig>(content)?)
}

/// Apply env var overrides, then resolve `${VAR}` references.
fn apply_overrides(mut config: GradebatchConfig) -> GradebatchConfig {
    let url_override = std::env::var("GRADEBATCH_SERVICE_URL").ok();
    let key_override = std::env::var("GRADEBATCH_API_KEY").ok();

    if url_override.is_some() && matches!(config.service, ServiceConfig::Mock) {
        config.service = ServiceConfig::default();
    }

    if let ServiceConfig::Http {
        base_url, api_key, ..
    } = &mut config.service
    {
        if let Some(url) = url_override {
            *base_url = url;
        }
        if let Some(key) = key_override {
            *api_key = Some(key);
        }
    }

    config.service = resolve_service_config(&config.service);
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebatch"))
}

/// Create a scoring service from its configuration.
pub fn create_service(config: &ServiceConfig) -> Box<dyn ScoringService> {
    match config {
        ServiceConfig::Http {
            base_url,
            endpoint,
            timeout_secs,
            api_key,
        } => Box::new(HttpScoringService::new(
            base_url,
            endpoint,
            *timeout_secs,
            api_key.clone(),
        )),
        ServiceConfig::Mock => Box::new(MockScoringService::overlap()),
    }
}
