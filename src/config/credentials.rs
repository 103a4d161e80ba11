//! Reader for the shared Veracode credentials file
//!
//! The file is INI-style and shared with the other Veracode tools:
//!
//! ```text
//! [default]
//! veracode_api_key_id = ...
//! veracode_api_key_secret = ...
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use super::ApiKey;
use crate::error::Result;

/// Parsed credentials file, keyed by profile name
#[derive(Debug, Default)]
pub struct CredentialsFile {
    profiles: HashMap<String, ApiKey>,
}

impl CredentialsFile {
    /// Location of the file, `~/.veracode/credentials`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".veracode").join("credentials"))
    }

    /// Read the file from its default location, if it exists.
    pub fn load() -> Result<Option<Self>> {
        let Some(path) = Self::default_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(Self::parse(&contents)))
    }

    pub fn parse(contents: &str) -> Self {
        let mut partial: HashMap<String, (Option<String>, Option<String>)> = HashMap::new();
        let mut section: Option<String> = None;

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = Some(name.trim().to_string());
                continue;
            }
            let (Some(current), Some((key, value))) = (section.as_ref(), line.split_once('='))
            else {
                continue;
            };

            let entry = partial.entry(current.clone()).or_default();
            let value = value.trim().to_string();
            match key.trim() {
                "veracode_api_key_id" => entry.0 = Some(value),
                "veracode_api_key_secret" => entry.1 = Some(value),
                _ => {}
            }
        }

        let profiles = partial
            .into_iter()
            .filter_map(|(name, keys)| match keys {
                (Some(id), Some(secret)) => Some((name, ApiKey { id, secret })),
                _ => None,
            })
            .collect();

        Self { profiles }
    }

    pub fn profile(&self, name: &str) -> Option<&ApiKey> {
        self.profiles.get(name)
    }
}
