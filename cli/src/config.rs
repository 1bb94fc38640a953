//! Configuration file handling for the CLI.
//!
//! Stores the API location in `$XDG_CONFIG_HOME/techops/config.toml`.
//! Resolution order for each setting: command-line flag, `TECHOPS_*`
//! environment variable, config file, built-in default.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use techops_business::BusinessConfig;

const ENV_API_BASE_URL: &str = "TECHOPS_API_BASE_URL";
const ENV_PAGE_SIZE: &str = "TECHOPS_PAGE_SIZE";

/// CLI configuration stored on disk
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the techops service
    pub base_url: Option<String>,
    /// Rows per page
    pub page_size: Option<u32>,
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub page_size: Option<u32>,
}

impl Config {
    /// Returns `$XDG_CONFIG_HOME/techops/config.toml` on Linux,
    /// appropriate paths on other platforms.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "techops", "techops")
            .context("Failed to determine config directory")?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Returns the default configuration if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Combine this file with environment variables and flags.
    pub fn resolve<I>(&self, vars: I, overrides: &Overrides) -> Result<BusinessConfig>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut vars: HashMap<String, String> = vars.into_iter().collect();

        if let Some(url) = &self.api.base_url {
            vars.entry(ENV_API_BASE_URL.to_owned())
                .or_insert_with(|| url.clone());
        }
        if let Some(page_size) = self.api.page_size {
            vars.entry(ENV_PAGE_SIZE.to_owned())
                .or_insert_with(|| page_size.to_string());
        }

        let mut config =
            BusinessConfig::from_vars(vars).context("Invalid TECHOPS_* configuration")?;

        if let Some(url) = &overrides.api_url {
            config = BusinessConfig::new(url.as_str()).with_page_size(config.page_size);
        }
        if let Some(page_size) = overrides.page_size {
            config = config.with_page_size(page_size);
        }

        Ok(config)
    }
}
