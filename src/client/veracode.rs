//! Veracode API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header::{AUTHORIZATION, LOCATION};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::{ApplicationApi, CredentialsApi, WorkspaceApi};
use super::models::{ApiCredentials, Application, CreateWorkspaceRequest, TeamId, Workspace};
use super::pagination::{HalPage, PaginationParams};
use super::signing::Signer;
use crate::config::Settings;
use crate::error::{ApiError, ConfigError, Result};

const CREDENTIALS_PATH: &str = "/api/authn/v2/api_credentials";
const APPLICATIONS_PATH: &str = "/appsec/v1/applications";
const WORKSPACES_PATH: &str = "/srcclr/v3/workspaces";

/// Query parameter the workspace search endpoint filters on
const WORKSPACE_NAME_FILTER: &str = "filter[workspace]";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const RATE_LIMIT_PER_SECOND: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// Extract the workspace id from the `Location` of a newly created workspace.
///
/// The id is the final path segment.
pub fn workspace_id_from_location(location: &str) -> Option<&str> {
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
}

/// Veracode REST API client
pub struct VeracodeClient {
    http: HttpClient,
    base_url: String,
    signer: Signer,
    page_size: usize,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl VeracodeClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("vcworkspace/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            RATE_LIMIT_PER_SECOND,
        )));

        Ok(Self {
            http,
            base_url: settings.api_base.clone(),
            signer: Signer::new(&settings.api_key)?,
            page_size: settings.page_size,
            rate_limiter,
        })
    }

    /// Build a URL from a fixed path, escaped path segments and query pairs
    fn endpoint(&self, path: &str, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ConfigError::Invalid(format!("Invalid API URL: {}", e)))?;

        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| ConfigError::Invalid("API host cannot be a base URL".to_string()))?
                .extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// Build a rate-limited, signed request
    async fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.rate_limiter.until_ready().await;

        let host = url.host_str().unwrap_or_default().to_string();
        let signed_url = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        let authorization = self
            .signer
            .authorization(&host, &signed_url, method.as_str());

        self.http
            .request(method, url)
            .header(AUTHORIZATION, authorization)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = send(self.request(Method::GET, url).await).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }

    /// Fetch every page of a HAL collection
    async fn collect_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut params = PaginationParams::new(self.page_size);
        let mut items = Vec::new();

        loop {
            let mut query = filters.to_vec();
            query.extend(params.to_query_params());

            let body: Value = self.get_json(self.endpoint(path, &[], &query)?).await?;
            let page = HalPage::<T>::from_value(body, key)?;
            let has_next = page.has_next_after(params.page);
            if params.page == 0 {
                items.reserve(page.total_elements().unwrap_or_default());
            }
            items.extend(page.items);

            if !has_next {
                break;
            }
            params = params.next();
        }

        Ok(items)
    }
}

/// Send a request and map error statuses
async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(ApiError::from)?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
        StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
        StatusCode::NOT_FOUND => {
            let error_msg = response
                .text()
                .await
                .ok()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Resource not found".to_string());
            Err(ApiError::NotFound(error_msg).into())
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Bad request".to_string());
            Err(ApiError::BadRequest(error_msg).into())
        }
        status if status.is_server_error() => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Server error: {}", status));
            Err(ApiError::ServerError(error_msg).into())
        }
        _ => {
            let error_msg = format!("Unexpected status code: {}", status);
            Err(ApiError::InvalidResponse(error_msg).into())
        }
    }
}

#[async_trait]
impl CredentialsApi for VeracodeClient {
    async fn get_api_credentials(&self) -> Result<ApiCredentials> {
        self.get_json(self.endpoint(CREDENTIALS_PATH, &[], &[])?)
            .await
    }
}

#[async_trait]
impl ApplicationApi for VeracodeClient {
    async fn get_application(&self, guid: &str) -> Result<Application> {
        self.get_json(self.endpoint(APPLICATIONS_PATH, &[guid], &[])?)
            .await
    }

    async fn list_applications(&self) -> Result<Vec<Application>> {
        self.collect_pages(APPLICATIONS_PATH, "applications", &[])
            .await
    }
}

#[async_trait]
impl WorkspaceApi for VeracodeClient {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        self.collect_pages(WORKSPACES_PATH, "workspaces", &[]).await
    }

    async fn find_workspaces_by_name(&self, name: &str) -> Result<Vec<Workspace>> {
        self.collect_pages(
            WORKSPACES_PATH,
            "workspaces",
            &[(WORKSPACE_NAME_FILTER, name.to_string())],
        )
        .await
    }

    async fn create_workspace(&self, name: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct CreatedWorkspace {
            id: String,
        }

        let url = self.endpoint(WORKSPACES_PATH, &[], &[])?;
        let request = self
            .request(Method::POST, url)
            .await
            .json(&CreateWorkspaceRequest {
                name: name.to_string(),
            });
        let response = send(request).await?;

        if let Some(id) = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(workspace_id_from_location)
        {
            return Ok(id.to_string());
        }

        // Some deployments answer with the new workspace in the body instead
        let body = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str::<CreatedWorkspace>(&body)
            .map(|created| created.id)
            .map_err(|_| {
                ApiError::InvalidResponse(
                    "Workspace created but the response carried no Location header or id"
                        .to_string(),
                )
                .into()
            })
    }

    async fn delete_workspace(&self, workspace_id: &str) -> Result<()> {
        let url = self.endpoint(WORKSPACES_PATH, &[workspace_id], &[])?;
        send(self.request(Method::DELETE, url).await).await?;
        Ok(())
    }

    async fn add_workspace_team(&self, workspace_id: &str, team_id: &TeamId) -> Result<()> {
        let url = self.endpoint(
            WORKSPACES_PATH,
            &[workspace_id, "teams", team_id.as_str()],
            &[],
        )?;
        send(self.request(Method::PUT, url).await).await?;
        Ok(())
    }
}
