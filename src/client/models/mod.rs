//! Veracode API data models
//!
//! Models are organized by the API they come from: identity (credentials),
//! application profiles, and SCA workspaces.

use serde::{Deserialize, Deserializer};

mod application;
mod credentials;
mod workspace;

pub use application::{Application, ApplicationTeam, TeamId};
#[cfg(test)]
pub use application::ApplicationProfile;
pub use credentials::ApiCredentials;
pub use workspace::{CreateWorkspaceRequest, Workspace, WorkspaceTeam};

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
