pub mod client;
pub mod error;
pub mod graphql;

pub use client::{GitHubClient, GraphQLExecutor};
pub use error::GitHubApiError;
pub use graphql::graphql_types;
