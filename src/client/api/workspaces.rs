//! SCA workspace API trait

use async_trait::async_trait;

use crate::client::models::{TeamId, Workspace};
use crate::error::Result;

/// Workspace management operations
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// List every workspace, following all pages
    async fn list_workspaces(&self) -> Result<Vec<Workspace>>;

    /// Search workspaces by name.
    ///
    /// The service filters by substring, so results may include workspaces
    /// whose names only contain `name`.
    async fn find_workspaces_by_name(&self, name: &str) -> Result<Vec<Workspace>>;

    /// Create a workspace and return its id
    async fn create_workspace(&self, name: &str) -> Result<String>;

    /// Delete a workspace by id
    async fn delete_workspace(&self, workspace_id: &str) -> Result<()>;

    /// Grant a team access to a workspace
    async fn add_workspace_team(&self, workspace_id: &str, team_id: &TeamId) -> Result<()>;
}
