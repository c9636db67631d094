//! Commit history pagination
//!
//! The primary repository query returns the first page of the HEAD history.
//! The remaining pages are fetched one after another with the cursor of the
//! previous page, and appended in fetch order.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::github::GitHubApiError;
use crate::github::client::GraphQLExecutor;
use crate::github::graphql::graphql_types::{
    CommitHistoryConnection, CommitHistoryPageResponse, GraphQLPayload, GraphQLQuery,
};
use crate::github::graphql::repository::{
    CommitHistoryVariable, RepositoryQueryLimitSize, commit_history_page_query,
};
use crate::types::{CommitRecord, RepositoryId};

/// A later page could not be fetched. Not fatal: the records collected so far
/// are still returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error fetching additional commits after {pages_fetched} page(s): {source}")]
pub struct PartialPaginationFailure {
    pub pages_fetched: usize,
    pub records_collected: usize,
    #[source]
    pub source: GitHubApiError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedHistory {
    /// Commit records of all fetched pages, in server order
    pub records: Vec<CommitRecord>,
    /// `totalCount` reported with the first page
    pub total_count: Option<u64>,
    pub pages_fetched: usize,
    pub failure: Option<PartialPaginationFailure>,
}

impl PaginatedHistory {
    pub fn is_partial(&self) -> bool {
        self.failure.is_some()
    }
}

/// First history page embedded in a repository result tree
pub fn first_history_page(tree: &Value) -> Option<CommitHistoryConnection> {
    let history = tree.pointer("/repository/object/history")?;
    if history.is_null() {
        return None;
    }
    match serde_json::from_value(history.clone()) {
        Ok(connection) => Some(connection),
        Err(e) => {
            warn!("Unexpected commit history shape: {}", e);
            None
        }
    }
}

/// Follows `first_page` until the server reports no further page.
///
/// Pagination only happens when an `executor` is supplied; without one the
/// first page is returned as-is. A failed fetch ends pagination and is kept in
/// [`PaginatedHistory::failure`].
pub async fn paginate_commit_history<E: GraphQLExecutor>(
    first_page: CommitHistoryConnection,
    repository_id: &RepositoryId,
    executor: Option<&E>,
) -> PaginatedHistory {
    let mut records = first_page.records();
    let mut page_info = first_page.page_info.clone();
    let mut pages_fetched = 1;
    let mut failure = None;

    let Some(executor) = executor else {
        return PaginatedHistory {
            records,
            total_count: first_page.total_count,
            pages_fetched,
            failure,
        };
    };

    let query = commit_history_page_query(RepositoryQueryLimitSize::default().commit_history_limit);

    while let Some(cursor) = page_info.next_cursor().map(str::to_string) {
        debug!("Fetching commit page {} of {}", pages_fetched + 1, repository_id);

        let payload = GraphQLPayload {
            query: GraphQLQuery(query.clone()),
            variables: Some(CommitHistoryVariable {
                owner: repository_id.owner().clone(),
                repository_name: repository_id.repo_name().clone(),
                cursor,
            }),
        };

        match executor
            .execute_graphql::<_, CommitHistoryPageResponse>("commit_history_page", payload)
            .await
        {
            Ok(response) => match response.into_history() {
                Some(history) => {
                    records.extend(history.records());
                    page_info = history.page_info;
                    pages_fetched += 1;
                }
                None => {
                    debug!("Commit history page without history object, stopping");
                    break;
                }
            },
            Err(e) => {
                let partial = PartialPaginationFailure {
                    pages_fetched,
                    records_collected: records.len(),
                    source: e,
                };
                warn!("{}", partial);
                failure = Some(partial);
                break;
            }
        }
    }

    info!(
        "Collected {} commits in {} page(s) for {}",
        records.len(),
        pages_fetched,
        repository_id
    );

    PaginatedHistory {
        records,
        total_count: first_page.total_count,
        pages_fetched,
        failure,
    }
}
