//! SCA workspace models

use serde::{Deserialize, Serialize};

use super::{TeamId, null_as_default};

/// Workspace resource
#[derive(Debug, Clone, Deserialize)]
pub struct Workspace {
    /// Workspace GUID
    pub id: String,

    /// Workspace name (letters, digits, space, `-`, `_`; at most 20 characters)
    pub name: String,

    /// Number of projects in the workspace; absent means none
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects_count: u64,

    /// Teams with access to the workspace
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<WorkspaceTeam>,
}

/// Team attached to a workspace
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceTeam {
    #[serde(default)]
    pub team_id: Option<TeamId>,

    #[serde(default)]
    pub name: Option<String>,
}

/// Request body for creating a workspace
#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
}
