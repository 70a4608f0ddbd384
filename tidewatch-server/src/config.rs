//! Server configuration
//!
//! Bind address, startup seeding and CORS origins, read from environment
//! variables with development-friendly defaults.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the HTTP listener binds to
    pub bind_addr: String,

    /// Load the sample pipeline and jobs at startup
    pub seed_sample_data: bool,

    /// Origins allowed by CORS; a single `*` allows any origin
    pub cors_allow_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            seed_sample_data: true,
            cors_allow_origins: vec!["*".to_string()],
        }
    }
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables:
    /// - TIDEWATCH_BIND_ADDR (optional, default: 0.0.0.0:8000)
    /// - TIDEWATCH_SEED_SAMPLE_DATA (optional, true/false, default: true)
    /// - TIDEWATCH_CORS_ALLOW_ORIGINS (optional, comma-separated or `*`, default: `*`)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = lookup("TIDEWATCH_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let seed_sample_data = match lookup("TIDEWATCH_SEED_SAMPLE_DATA") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                anyhow::anyhow!("TIDEWATCH_SEED_SAMPLE_DATA must be true or false, got '{}'", raw)
            })?,
            None => defaults.seed_sample_data,
        };

        let cors_allow_origins = lookup("TIDEWATCH_CORS_ALLOW_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_allow_origins);

        Ok(Self {
            bind_addr,
            seed_sample_data,
            cors_allow_origins,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.trim().is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.cors_allow_origins.is_empty() {
            anyhow::bail!("cors_allow_origins cannot be empty");
        }

        Ok(())
    }

    /// Build the CORS layer for the configured origins
    pub fn cors_layer(&self) -> anyhow::Result<CorsLayer> {
        let allow_origin = if self.cors_allow_origins.iter().any(|o| o == "*") {
            AllowOrigin::any()
        } else {
            let origins = self
                .cors_allow_origins
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin)
                        .map_err(|_| anyhow::anyhow!("Invalid CORS origin '{}'", origin))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            AllowOrigin::list(origins)
        };

        Ok(CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
