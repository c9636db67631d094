use crate::github::error::GitHubApiError;
use crate::github::graphql::graphql_types::{GraphQLPayload, GraphQLResponse};

use anyhow::{Context, Result};
use octocrab::Octocrab;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::Duration;
use tracing::{debug, error, info, warn};

/// Executes one GraphQL document and decodes its `data` object.
///
/// This is the only network seam of the crate: query builders produce text,
/// the executor sends it, and everything downstream works on the decoded value.
pub trait GraphQLExecutor {
    #[allow(async_fn_in_trait)]
    async fn execute_graphql<T: Serialize, R: DeserializeOwned>(
        &self,
        query_name: &str,
        payload: GraphQLPayload<T>,
    ) -> Result<R, GitHubApiError>;
}

#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) client: octocrab::Octocrab,
}

impl GitHubClient {
    /// Builds a client against api.github.com.
    ///
    /// Without `timeout` no connect/read/write timeouts are set, so a slow API
    /// blocks the command until it answers.
    pub fn new(token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        Self::build(None, token, timeout)
    }

    /// Builds a client against another API root (GitHub Enterprise, test servers)
    pub fn with_base_uri(
        base_uri: &str,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        Self::build(Some(base_uri), token, timeout)
    }

    fn build(
        base_uri: Option<&str>,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Octocrab::builder();

        if let Some(base_uri) = base_uri {
            builder = builder
                .base_uri(base_uri)
                .with_context(|| format!("Invalid GitHub API base URI: {}", base_uri))?;
        }

        if let Some(token) = token {
            builder = builder.personal_token(token);
        }

        if let Some(timeout_duration) = timeout {
            let connection_timeout = if timeout_duration < Duration::from_secs(10) {
                std::cmp::max(timeout_duration, Duration::from_secs(1))
            } else {
                Duration::from_secs(30)
            };
            let read_write_timeout = std::cmp::max(timeout_duration, Duration::from_secs(1));

            builder = builder
                .set_connect_timeout(Some(connection_timeout))
                .set_read_timeout(Some(read_write_timeout))
                .set_write_timeout(Some(read_write_timeout));
        }

        let client = builder.build().context("Failed to build GitHub client")?;

        Ok(Self { client })
    }
}

impl GraphQLExecutor for GitHubClient {
    async fn execute_graphql<T: Serialize, R: DeserializeOwned>(
        &self,
        query_name: &str,
        payload: GraphQLPayload<T>,
    ) -> Result<R, GitHubApiError> {
        debug!(
            "Starting GraphQL {} request with payload: {}",
            query_name,
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "Invalid JSON".to_string())
        );

        let start_time = std::time::Instant::now();

        // Raw POST so the status survives error bodies that are not JSON
        let response = self
            .client
            ._post("/graphql", Some(&payload))
            .await
            .map_err(GitHubApiError::from_octocrab_error)?;
        let status = response.status();
        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(GitHubApiError::from_octocrab_error)?;

        info!(
            "GraphQL {} request completed with {} in {:?}",
            query_name,
            status,
            start_time.elapsed()
        );

        if !status.is_success() {
            let failure = GitHubApiError::from_error_response(
                status.as_u16(),
                status.canonical_reason(),
                &body,
            );
            error!("GraphQL {} request failed: {}", query_name, failure);
            return Err(failure);
        }

        let response: GraphQLResponse<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| GitHubApiError::Decode {
                query_name: query_name.to_string(),
                message: e.to_string(),
            })?;

        decode_graphql_response(query_name, response)
    }
}

/// Turns a raw response envelope into decoded data.
///
/// A non-empty `errors` array wins over any partial `data` that came with it.
pub fn decode_graphql_response<R: DeserializeOwned>(
    query_name: &str,
    response: GraphQLResponse<serde_json::Value>,
) -> Result<R, GitHubApiError> {
    if let Some(errors) = response.errors {
        if !errors.is_empty() {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            warn!("GraphQL {} returned errors: {}", query_name, messages.join("; "));
            return Err(GitHubApiError::GraphQL { messages });
        }
    }

    let data = response
        .data
        .ok_or_else(|| GitHubApiError::MissingData(query_name.to_string()))?;

    serde_json::from_value(data).map_err(|e| GitHubApiError::Decode {
        query_name: query_name.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> GraphQLResponse<serde_json::Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_errors_win_over_partial_data() {
        let response = envelope(json!({
            "data": {"repository": null},
            "errors": [
                {"message": "Could not resolve to a Repository"},
                {"message": "Something else"}
            ]
        }));
        let result: Result<serde_json::Value, _> = decode_graphql_response("repo", response);
        assert_eq!(
            result.unwrap_err(),
            GitHubApiError::GraphQL {
                messages: vec![
                    "Could not resolve to a Repository".to_string(),
                    "Something else".to_string()
                ]
            }
        );
    }

    #[test]
    fn test_empty_errors_array_is_success() {
        let response = envelope(json!({"data": {"viewer": {"login": "x"}}, "errors": []}));
        let result: serde_json::Value = decode_graphql_response("viewer", response).unwrap();
        assert_eq!(result["viewer"]["login"], "x");
    }

    #[test]
    fn test_missing_data() {
        let response = envelope(json!({"data": null}));
        let result: Result<serde_json::Value, _> = decode_graphql_response("org", response);
        assert_eq!(
            result.unwrap_err(),
            GitHubApiError::MissingData("org".to_string())
        );
    }
}
