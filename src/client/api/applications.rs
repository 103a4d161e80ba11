//! Application profile API trait

use async_trait::async_trait;

use crate::client::models::Application;
use crate::error::Result;

/// Read-only access to application profiles
#[async_trait]
pub trait ApplicationApi: Send + Sync {
    /// Get one application profile by GUID
    async fn get_application(&self, guid: &str) -> Result<Application>;

    /// List every application visible to the credentials, following all pages.
    ///
    /// Order is the order the API returns them in.
    async fn list_applications(&self) -> Result<Vec<Application>>;
}
