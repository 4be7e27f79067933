//! Reqwest-backed client for the remote users API.
//!
//! This adapter owns transport details only: URL building, timeout, HTTP
//! status mapping and JSON decoding into domain users.

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use tracing::debug;

use common::{AppError, AppResult, FetchError, HttpClientConfig};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Path of the user collection below the API base URL
const USERS_PATH: &str = "users";

/// Authoritative source of the user collection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the full user collection
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError>;
}

/// HTTP client for `GET {base_url}/users`.
pub struct UsersApiClient {
    client: Client,
    users_url: Url,
}

impl UsersApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or the reqwest client
    /// cannot be constructed.
    pub fn new(config: &HttpClientConfig) -> AppResult<Self> {
        let users_url = users_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, users_url })
    }

    /// Full URL the client fetches from.
    pub fn users_url(&self) -> &Url {
        &self.users_url
    }
}

#[async_trait]
impl RemoteSource for UsersApiClient {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        debug!("Fetching users from {}", self.users_url);

        let response = self
            .client
            .get(self.users_url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::InvalidResponse(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_users(body.as_ref())
    }
}

fn users_url(base_url: &str) -> AppResult<Url> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), USERS_PATH);
    Url::parse(&raw)
        .map_err(|e| AppError::validation(format!("Invalid users API URL '{}': {}", raw, e)))
}

fn parse_users(body: &[u8]) -> Result<Vec<User>, FetchError> {
    serde_json::from_slice(body)
        .map_err(|e| FetchError::decode(format!("invalid users payload: {}", e)))
}

fn map_transport_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::network(format!("request timed out: {}", error))
    } else {
        FetchError::network(error.to_string())
    }
}
