//! Mock Veracode API client for testing
//!
//! Provides an in-memory implementation of the API traits. Workspaces created
//! through the mock become visible to later list and search calls, so
//! multi-step flows can be exercised end to end.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{ApplicationApi, CredentialsApi, WorkspaceApi};
use super::models::{ApiCredentials, Application, TeamId, Workspace, WorkspaceTeam};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockVeracodeClient::new()
///     .with_apps(vec![ApplicationBuilder::new("g1", "Payments").build()]);
///
/// let apps = mock.list_applications().await?;
/// assert_eq!(apps.len(), 1);
/// ```
#[derive(Default)]
pub struct MockVeracodeClient {
    /// Returned from get_api_credentials
    credentials: Mutex<Option<ApiCredentials>>,
    /// Application profiles
    apps: Mutex<Vec<Application>>,
    /// Current workspaces; create/delete mutate this
    workspaces: Mutex<Vec<Workspace>>,
    /// Workspace names whose creation fails
    failing_creates: Mutex<HashSet<String>>,
    /// Error to return on the next API call, consumed on first use
    error: Mutex<Option<ApiError>>,
    call_count: Mutex<CallCounts>,
    team_assignments: Mutex<Vec<TeamAssignment>>,
    deleted: Mutex<Vec<String>>,
    next_id: Mutex<usize>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_api_credentials: usize,
    pub get_application: usize,
    pub list_applications: usize,
    pub list_workspaces: usize,
    pub find_workspaces_by_name: usize,
    pub create_workspace: usize,
    pub delete_workspace: usize,
    pub add_workspace_team: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.get_api_credentials
            + self.get_application
            + self.list_applications
            + self.list_workspaces
            + self.find_workspaces_by_name
            + self.create_workspace
            + self.delete_workspace
            + self.add_workspace_team
    }
}

/// A team assignment the mock received, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamAssignment {
    pub workspace_id: String,
    pub team_id: TeamId,
}

impl MockVeracodeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(mut self, credentials: ApiCredentials) -> Self {
        *self.credentials.get_mut() = Some(credentials);
        self
    }

    pub fn with_apps(mut self, apps: Vec<Application>) -> Self {
        *self.apps.get_mut() = apps;
        self
    }

    pub fn with_workspaces(mut self, workspaces: Vec<Workspace>) -> Self {
        *self.workspaces.get_mut() = workspaces;
        self
    }

    /// Make creating a workspace with this exact name fail.
    pub fn failing_create(mut self, name: impl Into<String>) -> Self {
        self.failing_creates.get_mut().insert(name.into());
        self
    }

    /// Configure an error to return on the next API call.
    pub fn with_error(mut self, error: ApiError) -> Self {
        *self.error.get_mut() = Some(error);
        self
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn team_assignments(&self) -> Vec<TeamAssignment> {
        self.team_assignments.lock().await.clone()
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.lock().await.clone()
    }

    pub async fn workspaces(&self) -> Vec<Workspace> {
        self.workspaces.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialsApi for MockVeracodeClient {
    async fn get_api_credentials(&self) -> Result<ApiCredentials> {
        self.call_count.lock().await.get_api_credentials += 1;
        self.check_error().await?;

        let credentials = self.credentials.lock().await.clone();
        Ok(credentials.unwrap_or_else(|| {
            super::fixtures::credentials_expiring(chrono::Utc::now(), chrono::Duration::days(365))
        }))
    }
}

#[async_trait]
impl ApplicationApi for MockVeracodeClient {
    async fn get_application(&self, guid: &str) -> Result<Application> {
        self.call_count.lock().await.get_application += 1;
        self.check_error().await?;

        self.apps
            .lock()
            .await
            .iter()
            .find(|app| app.guid == guid)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Application {}", guid)).into())
    }

    async fn list_applications(&self) -> Result<Vec<Application>> {
        self.call_count.lock().await.list_applications += 1;
        self.check_error().await?;

        Ok(self.apps.lock().await.clone())
    }
}

#[async_trait]
impl WorkspaceApi for MockVeracodeClient {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        self.call_count.lock().await.list_workspaces += 1;
        self.check_error().await?;

        Ok(self.workspaces.lock().await.clone())
    }

    async fn find_workspaces_by_name(&self, name: &str) -> Result<Vec<Workspace>> {
        self.call_count.lock().await.find_workspaces_by_name += 1;
        self.check_error().await?;

        // Substring match, like the real filter
        Ok(self
            .workspaces
            .lock()
            .await
            .iter()
            .filter(|ws| ws.name.contains(name))
            .cloned()
            .collect())
    }

    async fn create_workspace(&self, name: &str) -> Result<String> {
        self.call_count.lock().await.create_workspace += 1;
        self.check_error().await?;

        if self.failing_creates.lock().await.contains(name) {
            return Err(ApiError::BadRequest(format!("cannot create workspace {}", name)).into());
        }

        let id = {
            let mut next = self.next_id.lock().await;
            *next += 1;
            format!("ws-new-{}", *next)
        };
        self.workspaces.lock().await.push(Workspace {
            id: id.clone(),
            name: name.to_string(),
            projects_count: 0,
            teams: Vec::new(),
        });
        Ok(id)
    }

    async fn delete_workspace(&self, workspace_id: &str) -> Result<()> {
        self.call_count.lock().await.delete_workspace += 1;
        self.check_error().await?;

        let mut workspaces = self.workspaces.lock().await;
        let before = workspaces.len();
        workspaces.retain(|ws| ws.id != workspace_id);
        if workspaces.len() == before {
            return Err(ApiError::NotFound(format!("Workspace {}", workspace_id)).into());
        }
        self.deleted.lock().await.push(workspace_id.to_string());
        Ok(())
    }

    async fn add_workspace_team(&self, workspace_id: &str, team_id: &TeamId) -> Result<()> {
        self.call_count.lock().await.add_workspace_team += 1;
        self.check_error().await?;

        let mut workspaces = self.workspaces.lock().await;
        let workspace = workspaces
            .iter_mut()
            .find(|ws| ws.id == workspace_id)
            .ok_or_else(|| ApiError::NotFound(format!("Workspace {}", workspace_id)))?;
        workspace.teams.push(WorkspaceTeam {
            team_id: Some(team_id.clone()),
            name: None,
        });

        self.team_assignments.lock().await.push(TeamAssignment {
            workspace_id: workspace_id.to_string(),
            team_id: team_id.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{ApplicationBuilder, workspace};

    #[tokio::test]
    async fn test_created_workspace_is_searchable() {
        let mock = MockVeracodeClient::new();
        let id = mock.create_workspace("Payments").await.unwrap();

        let found = mock.find_workspaces_by_name("Pay").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
    }

    #[tokio::test]
    async fn test_one_shot_error() {
        let mock = MockVeracodeClient::new()
            .with_apps(vec![ApplicationBuilder::new("g1", "A").build()])
            .with_error(ApiError::Unauthorized);

        assert!(mock.list_applications().await.is_err());
        assert_eq!(mock.list_applications().await.unwrap().len(), 1);
        assert_eq!(mock.call_counts().await.list_applications, 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_workspace() {
        let mock = MockVeracodeClient::new().with_workspaces(vec![workspace("w1", "One", 0)]);

        assert!(mock.delete_workspace("w2").await.is_err());
        mock.delete_workspace("w1").await.unwrap();
        assert_eq!(mock.deleted().await, vec!["w1".to_string()]);
        assert!(mock.workspaces().await.is_empty());
    }
}
