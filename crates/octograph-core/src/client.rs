//! Shared GitHub HTTP client.
//!
//! One `reqwest::Client` per process; endpoint modules build their own URLs
//! and response structs and go through [`GithubClient`] for headers, auth,
//! and status classification. No timeouts and no automatic retries: a hung
//! call hangs its loading state, and the user re-invokes on failure.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, Result};

pub(crate) const API_BASE: &str = "https://api.github.com";
pub(crate) const GRAPHQL_URL: &str = "https://api.github.com/graphql";

const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("octograph/", env!("CARGO_PKG_VERSION"));

/// Error body GitHub attaches to non-success responses.
#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        let token = token.filter(|t| !t.trim().is_empty());
        Self { http, token }
    }

    /// Whether an elevated-access credential is attached. Absence is never
    /// an error; it routes contribution fetches to the public fallback.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// GET a GitHub REST endpoint and deserialize the JSON payload.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.http.get(url).header("Accept", ACCEPT_HEADER);
        let response = self.authorize(request).send().await.map_err(ApiError::from)?;
        Self::decode(response).await
    }

    /// GET a non-GitHub public endpoint (no auth, no vendor Accept header).
    pub(crate) async fn get_public_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http.get(url).send().await.map_err(ApiError::from)?;
        Self::decode(response).await
    }

    /// POST a GraphQL request body and deserialize the response envelope.
    pub(crate) async fn post_graphql<T: DeserializeOwned>(
        &self,
        body: &serde_json::Value,
    ) -> Result<T> {
        let request = self
            .http
            .post(GRAPHQL_URL)
            .header("Accept", ACCEPT_HEADER)
            .json(body);
        let response = self.authorize(request).send().await.map_err(ApiError::from)?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            // Prefer the API's own message over the bare status line
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(ApiError::from_status(status.as_u16(), message));
        }

        response.json::<T>().await.map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_treated_as_absent() {
        assert!(!GithubClient::new(None).has_token());
        assert!(!GithubClient::new(Some("   ".to_string())).has_token());
        assert!(GithubClient::new(Some("ghp_abc".to_string())).has_token());
    }

    #[test]
    fn test_error_body_shape() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message": "API rate limit exceeded", "documentation_url": "x"}"#)
                .unwrap();
        assert_eq!(body.message, "API rate limit exceeded");
    }
}
