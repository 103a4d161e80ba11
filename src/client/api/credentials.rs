//! Identity API trait

use async_trait::async_trait;

use crate::client::models::ApiCredentials;
use crate::error::Result;

#[async_trait]
pub trait CredentialsApi: Send + Sync {
    /// Get metadata (including expiry) for the credentials signing this request
    async fn get_api_credentials(&self) -> Result<ApiCredentials>;
}
