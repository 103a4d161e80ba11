//! CLI definition and mode dispatch

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser};
use log::Level;

pub mod context;

pub use context::CommandContext;

use crate::client::VeracodeApi;
use crate::error::{Error, Result};
use crate::logging::{EventLog, clean};
use crate::workspace::{
    check_credential_expiry, cleanup_workspaces, create_workspaces_for_all, provision_single_app,
};

const MISSING_MODE: &str = "You must provide an app_id or set --all or --cleanup";

/// vcworkspace - Provision Veracode SCA workspaces from application profiles
#[derive(Parser, Debug)]
#[command(name = "vcworkspace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub mode: ModeArgs,

    /// Override config file location
    #[arg(long, env = "VCWORKSPACE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Credentials file profile to use
    #[arg(long, env = "VERACODE_API_PROFILE", hide_env = true)]
    pub profile: Option<String>,

    /// Veracode API key id
    #[arg(long, env = "VERACODE_API_KEY_ID", hide_env = true)]
    pub api_key_id: Option<String>,

    /// Veracode API key secret
    #[arg(long, env = "VERACODE_API_KEY_SECRET", hide_env_values = true)]
    pub api_key_secret: Option<String>,

    /// Override the API base URL (derived from the key region by default)
    #[arg(long, env = "VCWORKSPACE_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Log file to append events to
    #[arg(long, env = "VCWORKSPACE_LOG_FILE", hide_env = true)]
    pub log_file: Option<PathBuf>,

    /// Also record debug events in the log file
    #[arg(long, env = "VCWORKSPACE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Mutually exclusive run modes
#[derive(Args, Debug)]
#[group(id = "run_mode", multiple = false)]
pub struct ModeArgs {
    /// Application GUID to create a workspace for
    #[arg(short = 'a', long = "app_id", visible_alias = "app-id", value_name = "GUID")]
    pub app_id: Option<String>,

    /// Create workspaces for all applications
    #[arg(short = 'l', long)]
    pub all: bool,

    /// Delete workspaces that contain no projects
    #[arg(short = 'c', long)]
    pub cleanup: bool,
}

/// What a single run does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    SingleApp(String),
    AllApps,
    Cleanup,
}

impl ModeArgs {
    /// Pick the run mode, or fail with a usage error if none was given.
    pub fn mode(&self) -> Result<Mode> {
        if self.all {
            return Ok(Mode::AllApps);
        }
        if self.cleanup {
            return Ok(Mode::Cleanup);
        }
        match self.app_id.as_deref().map(str::trim) {
            Some(guid) if !guid.is_empty() => Ok(Mode::SingleApp(guid.to_string())),
            _ => Err(Error::Usage(MISSING_MODE.to_string())),
        }
    }
}

/// Run the selected mode end to end.
pub async fn run(cli: Cli) -> Result<()> {
    // Reject a missing mode before touching config, credentials or the log file
    let mode = cli.mode.mode()?;

    let ctx = CommandContext::new(&cli)?;
    ctx.log.debug(
        "run",
        &format!(
            "Using API host {} with page size {}",
            ctx.settings.api_base, ctx.settings.page_size
        ),
    );

    let result = execute(&ctx.client, &ctx.log, &mode).await;
    if let Err(ref err) = result {
        ctx.log
            .record(Level::Error, "run", &clean(&err.to_string()));
    }
    ctx.log.flush();
    result
}

/// Check the credentials, then dispatch on the mode.
pub async fn execute<C>(client: &C, log: &EventLog, mode: &Mode) -> Result<()>
where
    C: VeracodeApi + ?Sized,
{
    check_credential_expiry(client, log, Utc::now()).await?;

    match mode {
        Mode::SingleApp(guid) => {
            provision_single_app(client, guid, log).await?;
        }
        Mode::AllApps => {
            create_workspaces_for_all(client, log).await?.into_result()?;
        }
        Mode::Cleanup => {
            cleanup_workspaces(client, log).await?;
        }
    }
    Ok(())
}
