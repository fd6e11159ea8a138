//! Configuration file handling for the CLI.
//!
//! Reads `$XDG_CONFIG_HOME/rgw-console/config.toml` (or the platform
//! equivalent). Command line flags and `RGW_CONSOLE_*` variables win over it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use rgw_business::BusinessConfig;
use serde::{Deserialize, Serialize};

use crate::cli::GatewayArgs;

/// CLI configuration stored on disk
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Dashboard base URL
    pub url: Option<String>,
    /// Bearer token for the dashboard API
    pub token: Option<String>,
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("io", "ceph", "rgw-console")
            .context("Failed to determine config directory")?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Loads the default config file, or an empty config when there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Layers the file and the command line over `base`.
    pub fn resolve(&self, args: &GatewayArgs, mut base: BusinessConfig) -> BusinessConfig {
        if let Some(url) = args.url.as_ref().or(self.gateway.url.as_ref()) {
            base.api_base_url.clone_from(url);
        }
        if let Some(token) = args.token.as_ref().or(self.gateway.token.as_ref()) {
            base.auth_token = Some(token.clone());
        }
        base
    }
}
