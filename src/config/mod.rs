//! Configuration management for vcworkspace
//!
//! Settings come from four layers, highest precedence first:
//! command line / environment, the YAML config file, the Veracode
//! credentials file (`~/.veracode/credentials`), and built-in defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::client::signing::Region;
use crate::error::{ConfigError, Result};
use crate::logging::DEFAULT_LOG_FILE;

mod credentials;

pub use credentials::CredentialsFile;

/// Page size used when listing applications and workspaces
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// On-disk configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Veracode API key id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_id: Option<String>,

    /// Veracode API key secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_secret: Option<String>,

    /// API base URL, e.g. `https://api.veracode.eu`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Event log location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Page size for list requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

/// Values supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key_id: Option<String>,
    pub api_key_secret: Option<String>,
    pub api_host: Option<String>,
    pub log_file: Option<PathBuf>,
    /// Section of the Veracode credentials file
    pub profile: Option<String>,
}

/// API key id and secret used to sign requests
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub id: String,
    pub secret: String,
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: ApiKey,
    pub api_base: String,
    pub log_file: PathBuf,
    pub page_size: usize,
}

impl Config {
    /// Get the default config file path (~/.vcworkspace/config.yaml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".vcworkspace").join("config.yaml"))
    }

    /// Load configuration from an explicit path, or the default location.
    ///
    /// A missing default file yields an empty config; a missing explicit
    /// file is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(Path::new(p)),
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load_from(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Merge this config with overrides and the credentials file.
    pub fn resolve(
        &self,
        overrides: &Overrides,
        credentials_file: Option<&CredentialsFile>,
    ) -> Result<Settings> {
        let profile = overrides.profile.as_deref().unwrap_or("default");
        let from_file = credentials_file.and_then(|f| f.profile(profile));

        let id = overrides
            .api_key_id
            .clone()
            .or_else(|| self.api_key_id.clone())
            .or_else(|| from_file.map(|k| k.id.clone()));
        let secret = overrides
            .api_key_secret
            .clone()
            .or_else(|| self.api_key_secret.clone())
            .or_else(|| from_file.map(|k| k.secret.clone()));

        let api_key = match (id, secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                ApiKey { id, secret }
            }
            _ => return Err(ConfigError::MissingCredentials.into()),
        };

        let api_base = overrides
            .api_host
            .clone()
            .or_else(|| self.api_host.clone())
            .unwrap_or_else(|| format!("https://{}", Region::from_key_id(&api_key.id).host()));
        let api_base = api_base.trim_end_matches('/').to_string();
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "API host must be an http(s) URL, got {}",
                api_base
            ))
            .into());
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".to_string()).into());
        }

        let log_file = overrides
            .log_file
            .clone()
            .or_else(|| self.log_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Settings {
            api_key,
            api_base,
            log_file,
            page_size,
        })
    }
}
