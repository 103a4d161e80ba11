//! Command execution context
//!
//! Gathers everything a provisioning run needs before the first remote call:
//! resolved settings, the signed API client and the event log.

use crate::client::VeracodeClient;
use crate::config::{Config, CredentialsFile, Overrides, Settings};
use crate::error::Result;
use crate::logging::EventLog;

use super::Cli;

/// Context for command execution containing settings, client and event log.
pub struct CommandContext {
    /// Settings after merging flags, env, the config file and credentials file
    pub settings: Settings,
    /// Signed Veracode API client
    pub client: VeracodeClient,
    /// Event log opened in append mode
    pub log: EventLog,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// This handles:
    /// - Loading the config from the given path (or default location)
    /// - Reading the Veracode credentials file when present
    /// - Applying CLI/env overrides and validating the API key
    /// - Opening the log file and creating the API client
    ///
    /// # Errors
    /// Returns an error if no credentials are found, the config cannot be
    /// parsed, or the log file cannot be opened.
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = Config::load_at(cli.config.as_deref())?;
        let credentials_file = CredentialsFile::load()?;

        let overrides = Overrides {
            api_key_id: cli.api_key_id.clone(),
            api_key_secret: cli.api_key_secret.clone(),
            api_host: cli.api_host.clone(),
            log_file: cli.log_file.clone(),
            profile: cli.profile.clone(),
        };
        let settings = config.resolve(&overrides, credentials_file.as_ref())?;

        let log = EventLog::open(&settings.log_file, cli.debug)?;
        let client = VeracodeClient::new(&settings)?;

        Ok(Self {
            settings,
            client,
            log,
        })
    }
}
