use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::identity::seed::DEFAULT_AVATAR_TEMPLATE;

/// Main configuration structure for AgencyUnison
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AgencyUnisonConfig {
    /// Session store settings
    pub session: SessionConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Start logged in as the first seeded admin (demo convenience)
    pub start_authenticated: bool,
    /// Avatar reference for users created without one; `{name}` is substituted
    pub default_avatar_template: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_authenticated: true,
            default_avatar_template: DEFAULT_AVATAR_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub json_logs: bool,
    /// Log session metrics when the process exits
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: true,
            metrics_enabled: true,
        }
    }
}

impl AgencyUnisonConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (agency-unison.toml, .agency-unison-rc)
    /// 3. Environment variables (prefixed with AGENCY_UNISON_, `__` between sections)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        if Path::new("agency-unison.toml").exists() {
            builder = builder.add_source(File::with_name("agency-unison"));
        }

        if Path::new(".agency-unison-rc").exists() {
            builder = builder.add_source(
                File::with_name(".agency-unison-rc").format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(Self::environment());

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load an explicit configuration file, still honouring environment overrides
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(true))
            .add_source(Self::environment())
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }

    fn environment() -> Environment {
        Environment::with_prefix("AGENCY_UNISON")
            .separator("__")
            .try_parsing(true)
    }
}
