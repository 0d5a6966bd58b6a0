//! Identity provider client
//!
//! Token validation is fully delegated: the access token from the
//! `Authorization` header is resolved to a user via the provider's
//! user-info endpoint. This service never issues or decodes tokens.

use crate::error::{AppError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const USER_PATH: &str = "/auth/v1/user";

/// Identity resolved from an access token
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Client for the hosted identity provider
pub struct AuthClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Resolve an access token to the user it belongs to.
    ///
    /// A token the provider rejects is an `Auth` error (401 at the API
    /// surface); an unreachable provider propagates as a transport error.
    pub async fn resolve_user(&self, token: &str) -> Result<AuthUser> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, USER_PATH))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Auth(format!(
                "Token rejected by identity provider ({})",
                status
            )));
        }

        let user: AuthUser = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Invalid identity response: {}", e)))?;

        debug!("Resolved token to user {}", user.id);
        Ok(user)
    }
}

/// Extract the access token from an `Authorization` header value.
///
/// Clients send the raw token; a `Bearer ` prefix is tolerated and
/// stripped. Empty values count as missing.
pub fn token_from_header(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}
