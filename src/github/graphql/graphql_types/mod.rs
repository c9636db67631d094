pub mod commit;
pub mod compare;
pub mod pager;

use serde::{Deserialize, Serialize};

pub use commit::*;
pub use compare::*;
pub use pager::*;

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLQuery(pub String);

impl GraphQLQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLPayload<T: serde::Serialize> {
    pub query: GraphQLQuery,
    pub variables: Option<T>,
}

/// Raw response envelope. `errors` may be present alongside HTTP 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLError {
    #[serde(default = "unknown_error_message")]
    pub message: String,
    #[serde(default)]
    pub locations: Vec<serde_json::Value>,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

fn unknown_error_message() -> String {
    "Unknown error".to_string()
}
