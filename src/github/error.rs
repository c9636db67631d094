use std::error::Error as _;

use serde_json::Value;
use thiserror::Error;

/// Longest body excerpt kept in a transport error message
const ERROR_BODY_EXCERPT: usize = 200;

/// Failures of a single GraphQL round trip.
///
/// Nothing here is retried. The status code of a [`GitHubApiError::Transport`]
/// is kept so the caller can tell an authentication problem (401) from a
/// permission or rate limit problem (403).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitHubApiError {
    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Transport { status: u16, message: String },

    /// HTTP success, but the body carried an `errors` array
    #[error("GraphQL errors: {}", .messages.join("; "))]
    GraphQL { messages: Vec<String> },

    /// Connection, TLS or timeout failure before any status was received
    #[error("HTTP layer error: {0}")]
    Http(String),

    /// HTTP success without a `data` object
    #[error("No data in GraphQL {0} response")]
    MissingData(String),

    /// The `data` object did not have the expected shape
    #[error("Failed to decode GraphQL {query_name} response: {message}")]
    Decode { query_name: String, message: String },
}

impl GitHubApiError {
    /// HTTP status of a transport failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Failure for a non-success response.
    ///
    /// The message is the `message` field of a JSON body. Bodies that are not
    /// JSON (gateway HTML pages, plain text) fall back to the status reason or
    /// an excerpt of the text.
    pub fn from_error_response(status: u16, reason: Option<&str>, body: &str) -> Self {
        let json_message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value.get("message")?.as_str().map(str::to_string));

        let message = match json_message {
            Some(message) => message,
            None => {
                let text = body.trim();
                if text.is_empty() || text.starts_with('<') {
                    reason.unwrap_or("Unknown error").to_string()
                } else {
                    text.chars().take(ERROR_BODY_EXCERPT).collect()
                }
            }
        };

        Self::Transport { status, message }
    }

    /// Convert octocrab error to the matching failure kind
    pub fn from_octocrab_error(error: octocrab::Error) -> Self {
        tracing::debug!("Raw octocrab error: {:?}", error);

        match &error {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code.as_u16();
                tracing::error!(
                    "GitHub API error - Status: {}, Message: {:?}, Documentation: {:?}",
                    status,
                    source.message,
                    source.documentation_url
                );
                Self::Transport {
                    status,
                    message: source.message.clone(),
                }
            }
            octocrab::Error::Json { .. } | octocrab::Error::Serde { .. } => Self::Decode {
                query_name: "graphql".to_string(),
                message: cause_message(&error),
            },
            _ => Self::Http(cause_message(&error)),
        }
    }
}

/// Text of the underlying cause. octocrab's own `Display` appends a backtrace.
fn cause_message(error: &octocrab::Error) -> String {
    match error.source() {
        Some(source) => source.to_string(),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_json_message() {
        let error = GitHubApiError::from_error_response(
            401,
            Some("Unauthorized"),
            r#"{"message": "Bad credentials", "documentation_url": "https://docs.github.com"}"#,
        );
        assert_eq!(
            error,
            GitHubApiError::Transport {
                status: 401,
                message: "Bad credentials".to_string()
            }
        );
        assert!(error.is_unauthorized());
    }

    #[test]
    fn test_error_response_html_body_uses_reason() {
        let error = GitHubApiError::from_error_response(
            502,
            Some("Bad Gateway"),
            "<html><body><h1>502 Bad Gateway</h1></body></html>",
        );
        assert_eq!(error.status(), Some(502));
        assert_eq!(error.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_error_response_plain_text_excerpt() {
        let body = format!("upstream timed out {}", "x".repeat(500));
        let error = GitHubApiError::from_error_response(504, Some("Gateway Timeout"), &body);
        let GitHubApiError::Transport { status, message } = error else {
            panic!("expected a transport error");
        };
        assert_eq!(status, 504);
        assert!(message.starts_with("upstream timed out"));
        assert_eq!(message.chars().count(), ERROR_BODY_EXCERPT);

        let error = GitHubApiError::from_error_response(503, None, "  ");
        assert_eq!(error.to_string(), "HTTP 503: Unknown error");
    }
}
