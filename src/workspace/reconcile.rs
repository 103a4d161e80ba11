//! Reconciliation between application profiles and SCA workspaces
//!
//! Creation is idempotent per application: a workspace whose name matches the
//! derived name is left alone. Cleanup only removes workspaces without
//! projects. Team associations are added, never removed.

use log::Level;

use super::naming::{derive_workspace_name, is_valid_workspace_name};
use crate::client::models::{Application, ApplicationTeam, CreateWorkspaceRequest, WorkspaceTeam};
use crate::client::{ApplicationApi, WorkspaceApi};
use crate::error::{Error, Result};
use crate::logging::{EventLog, clean};

/// Result of provisioning one application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created {
        workspace_id: String,
        name: String,
        teams_assigned: usize,
    },
    AlreadyExists {
        workspace_id: String,
        name: String,
    },
}

/// An application whose workspace could not be provisioned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedApp {
    pub guid: String,
    pub name: String,
    pub reason: String,
}

/// Totals for a run over every application
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub evaluated: usize,
    pub created: usize,
    pub existing: usize,
    pub failed: Vec<FailedApp>,
}

impl BatchSummary {
    /// Turn a batch with failures into [`Error::BatchIncomplete`].
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(Error::BatchIncomplete {
                failed: self.failed.len(),
                total: self.evaluated,
            })
        }
    }
}

/// Totals for a cleanup run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupSummary {
    pub evaluated: usize,
    pub deleted: usize,
    pub skipped: usize,
}

/// Create the workspace for one application and assign its teams.
pub async fn create_workspace_for_app<C>(
    client: &C,
    app: &Application,
    log: &EventLog,
) -> Result<CreateOutcome>
where
    C: WorkspaceApi + ?Sized,
{
    const FUNCTION: &str = "create_workspace_for_app";

    let app_name = &app.profile.name;
    let name = derive_workspace_name(app_name);
    log.info(
        FUNCTION,
        &format!(
            "Application name \"{}\" will have workspace name \"{}\" due to workspace naming requirements",
            clean(app_name),
            name
        ),
    );
    if !is_valid_workspace_name(&name) {
        return Err(Error::InvalidWorkspaceName {
            app_name: app_name.clone(),
        });
    }

    let existing = client
        .find_workspaces_by_name(&name)
        .await?
        .into_iter()
        .find(|ws| ws.name == name && !ws.id.is_empty());
    if let Some(workspace) = existing {
        log.announce(
            Level::Info,
            FUNCTION,
            &format!(
                "There is already a workspace named {} for application guid {}",
                name,
                clean(&app.guid)
            ),
        );
        if !workspace.teams.is_empty() {
            let teams: Vec<String> = workspace.teams.iter().map(describe_team).collect();
            log.debug(
                FUNCTION,
                &format!(
                    "Workspace {} already has teams: {}",
                    clean(&workspace.id),
                    clean(&teams.join(", "))
                ),
            );
        }
        return Ok(CreateOutcome::AlreadyExists {
            workspace_id: workspace.id,
            name,
        });
    }

    let payload = serde_json::to_string(&CreateWorkspaceRequest { name: name.clone() })?;
    log.debug(FUNCTION, &format!("Sending payload {}", payload));
    let workspace_id = client.create_workspace(&name).await?;
    log.debug(FUNCTION, &format!("Workspace id is {}", clean(&workspace_id)));

    let teams_assigned = assign_teams(client, &workspace_id, &app.profile.teams, log).await?;

    log.announce(
        Level::Info,
        FUNCTION,
        &format!("Created workspace named {} with {} teams", name, teams_assigned),
    );

    Ok(CreateOutcome::Created {
        workspace_id,
        name,
        teams_assigned,
    })
}

/// Attach each team to the workspace in listing order. Stops at the first failure.
async fn assign_teams<C>(
    client: &C,
    workspace_id: &str,
    teams: &[ApplicationTeam],
    log: &EventLog,
) -> Result<usize>
where
    C: WorkspaceApi + ?Sized,
{
    for team in teams {
        client.add_workspace_team(workspace_id, &team.team_id).await?;
        log.debug(
            "assign_teams",
            &format!(
                "Assigned team {} ({}) to workspace {}",
                clean(team.team_id.as_str()),
                clean(&team.team_name),
                clean(workspace_id)
            ),
        );
    }
    Ok(teams.len())
}

fn describe_team(team: &WorkspaceTeam) -> String {
    match (&team.name, &team.team_id) {
        (Some(name), Some(id)) => format!("{} ({})", name, id),
        (Some(name), None) => name.clone(),
        (None, Some(id)) => id.to_string(),
        (None, None) => "unnamed team".to_string(),
    }
}

/// Fetch one application by GUID and provision its workspace.
pub async fn provision_single_app<C>(client: &C, guid: &str, log: &EventLog) -> Result<CreateOutcome>
where
    C: ApplicationApi + WorkspaceApi + ?Sized,
{
    log.debug(
        "provision_single_app",
        &format!("Getting application info for guid {}", clean(guid)),
    );
    let app = client.get_application(guid).await?;
    create_workspace_for_app(client, &app, log).await
}

/// Provision workspaces for every application, one at a time.
///
/// A failure for one application is logged and the batch continues; only a
/// failure to list the applications aborts the run.
pub async fn create_workspaces_for_all<C>(client: &C, log: &EventLog) -> Result<BatchSummary>
where
    C: ApplicationApi + WorkspaceApi + ?Sized,
{
    const FUNCTION: &str = "create_workspaces_for_all";

    let apps = client.list_applications().await?;
    log.announce(
        Level::Info,
        FUNCTION,
        &format!(
            "Evaluating {} applications for workspace creation",
            apps.len()
        ),
    );

    let mut summary = BatchSummary {
        evaluated: apps.len(),
        ..BatchSummary::default()
    };

    for app in &apps {
        match create_workspace_for_app(client, app, log).await {
            Ok(CreateOutcome::Created { .. }) => summary.created += 1,
            Ok(CreateOutcome::AlreadyExists { .. }) => summary.existing += 1,
            Err(err) => {
                let reason = err.to_string();
                log.announce(
                    Level::Error,
                    FUNCTION,
                    &format!(
                        "Could not provision workspace for application {} (guid {}): {}",
                        clean(&app.profile.name),
                        clean(&app.guid),
                        clean(&reason)
                    ),
                );
                summary.failed.push(FailedApp {
                    guid: app.guid.clone(),
                    name: app.profile.name.clone(),
                    reason,
                });
            }
        }
    }

    log.announce(
        Level::Info,
        FUNCTION,
        &format!(
            "Created {} workspaces, {} already existed, {} failed",
            summary.created,
            summary.existing,
            summary.failed.len()
        ),
    );
    // Recap at the end of the file so failures are easy to find after a long run
    for failure in &summary.failed {
        log.record(
            Level::Warn,
            FUNCTION,
            &format!(
                "Not provisioned: {} (guid {}): {}",
                clean(&failure.name),
                clean(&failure.guid),
                clean(&failure.reason)
            ),
        );
    }

    Ok(summary)
}

/// Delete every workspace that has no projects.
pub async fn cleanup_workspaces<C>(client: &C, log: &EventLog) -> Result<CleanupSummary>
where
    C: WorkspaceApi + ?Sized,
{
    const FUNCTION: &str = "cleanup_workspaces";

    let workspaces = client.list_workspaces().await?;
    log.announce(
        Level::Info,
        FUNCTION,
        &format!("Evaluating {} workspaces for deletion", workspaces.len()),
    );

    let mut summary = CleanupSummary {
        evaluated: workspaces.len(),
        ..CleanupSummary::default()
    };

    for workspace in &workspaces {
        if workspace.projects_count == 0 {
            log.info(
                FUNCTION,
                &format!(
                    "Deleting workspace {} (ID {})",
                    clean(&workspace.name),
                    clean(&workspace.id)
                ),
            );
            client.delete_workspace(&workspace.id).await?;
            summary.deleted += 1;
        } else {
            log.info(
                FUNCTION,
                &format!(
                    "Skipping workspace {} (ID {}) with {} projects",
                    clean(&workspace.name),
                    clean(&workspace.id),
                    workspace.projects_count
                ),
            );
            summary.skipped += 1;
        }
    }

    log.announce(
        Level::Info,
        FUNCTION,
        &format!("Deleted {} workspaces", summary.deleted),
    );
    log.debug(
        FUNCTION,
        &format!(
            "Kept {} of {} workspaces that still have projects",
            summary.skipped, summary.evaluated
        ),
    );

    Ok(summary)
}
