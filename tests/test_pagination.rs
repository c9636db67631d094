//! Tests for commit history pagination

use serde_json::json;

use gitsome::github::client::GitHubClient;
use gitsome::github::GitHubApiError;
use gitsome::github::graphql::graphql_types::CommitHistoryConnection;
use gitsome::services::{enumerate_repository, first_history_page, paginate_commit_history};
use gitsome::types::{RepositoryId, RepositoryOptions};
use test_util::{FakeExecutor, commits, history_page, history_page_response, repository_response};

fn first_page(nodes: usize, cursor: Option<&str>, has_next_page: bool) -> CommitHistoryConnection {
    serde_json::from_value(history_page(commits("p1", nodes), cursor, has_next_page)).unwrap()
}

#[tokio::test]
async fn test_pages_are_appended_in_fetch_order() {
    let executor = FakeExecutor::new([
        Ok(history_page_response(commits("p2", 100), Some("c2"), true)),
        Ok(history_page_response(commits("p3", 40), Some("c3"), false)),
    ]);
    let repository_id = RepositoryId::new("octo", "hello");

    let history = paginate_commit_history(
        first_page(100, Some("c1"), true),
        &repository_id,
        Some(&executor),
    )
    .await;

    assert_eq!(history.records.len(), 240);
    assert_eq!(history.pages_fetched, 3);
    assert_eq!(history.total_count, Some(240));
    assert!(history.failure.is_none());

    // Page boundaries keep server order
    assert_eq!(history.records[0].login.as_ref().unwrap(), "p1-0");
    assert_eq!(history.records[100].login.as_ref().unwrap(), "p2-0");
    assert_eq!(history.records[200].login.as_ref().unwrap(), "p3-0");

    let requests = executor.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].variables,
        json!({"owner": "octo", "repository_name": "hello", "cursor": "c1"})
    );
    assert_eq!(requests[1].variables["cursor"], "c2");
    assert!(requests[0].query.contains("after: $cursor"));
}

#[tokio::test]
async fn test_failed_page_returns_partial_history() {
    let executor = FakeExecutor::new([Err(GitHubApiError::Transport {
        status: 502,
        message: "Bad Gateway".to_string(),
    })]);

    let history = paginate_commit_history(
        first_page(100, Some("c1"), true),
        &RepositoryId::new("octo", "hello"),
        Some(&executor),
    )
    .await;

    assert_eq!(history.records.len(), 100);
    assert_eq!(history.pages_fetched, 1);
    assert!(history.is_partial());

    let failure = history.failure.unwrap();
    assert_eq!(failure.records_collected, 100);
    assert_eq!(failure.source.status(), Some(502));
    assert!(failure.to_string().contains("Bad Gateway"));
}

#[tokio::test]
async fn test_failure_after_some_pages_keeps_them() {
    let executor = FakeExecutor::new([
        Ok(history_page_response(commits("p2", 100), Some("c2"), true)),
        Err(GitHubApiError::GraphQL {
            messages: vec!["Something went wrong".to_string()],
        }),
    ]);

    let history = paginate_commit_history(
        first_page(100, Some("c1"), true),
        &RepositoryId::new("octo", "hello"),
        Some(&executor),
    )
    .await;

    assert_eq!(history.records.len(), 200);
    assert_eq!(history.pages_fetched, 2);
    assert_eq!(history.failure.unwrap().pages_fetched, 2);
}

#[tokio::test]
async fn test_without_executor_only_first_page() {
    let history = paginate_commit_history::<GitHubClient>(
        first_page(100, Some("c1"), true),
        &RepositoryId::new("octo", "hello"),
        None,
    )
    .await;

    assert_eq!(history.records.len(), 100);
    assert_eq!(history.pages_fetched, 1);
    assert!(history.failure.is_none());
}

#[tokio::test]
async fn test_last_page_needs_no_request() {
    let executor = FakeExecutor::default();

    // hasNextPage false, even with a cursor
    let history = paginate_commit_history(
        first_page(40, Some("c1"), false),
        &RepositoryId::new("octo", "hello"),
        Some(&executor),
    )
    .await;

    assert_eq!(history.records.len(), 40);
    assert!(executor.requests().is_empty());

    // hasNextPage true without a cursor
    let history = paginate_commit_history(
        first_page(40, None, true),
        &RepositoryId::new("octo", "hello"),
        Some(&executor),
    )
    .await;

    assert_eq!(history.records.len(), 40);
    assert!(executor.requests().is_empty());
}

#[tokio::test]
async fn test_missing_history_object_stops() {
    let executor = FakeExecutor::new([Ok(json!({"repository": {"object": null}}))]);

    let history = paginate_commit_history(
        first_page(100, Some("c1"), true),
        &RepositoryId::new("octo", "hello"),
        Some(&executor),
    )
    .await;

    assert_eq!(history.records.len(), 100);
    assert_eq!(history.pages_fetched, 1);
    assert!(history.failure.is_none());
}

#[tokio::test]
async fn test_repository_enumeration_paginates_and_ranks() {
    let executor = FakeExecutor::new([
        Ok(repository_response(
            false,
            "main",
            &["main"],
            history_page(commits("p1", 100), Some("c1"), true),
        )),
        Ok(history_page_response(commits("p2", 100), Some("c2"), true)),
        Ok(history_page_response(commits("p3", 40), None, false)),
    ]);

    let report = enumerate_repository(
        &executor,
        &RepositoryId::new("octo", "hello"),
        RepositoryOptions::default(),
    )
    .await
    .unwrap();

    let history = report.history.unwrap();
    assert_eq!(history.records.len(), 240);
    assert_eq!(report.ranking.commit_count(), 240);
    // commits() cycles through 3 authors per page prefix
    assert_eq!(report.ranking.len(), 9);
    assert_eq!(
        executor.request_names(),
        vec!["repository", "commit_history_page", "commit_history_page"]
    );
    assert_eq!(executor.remaining(), 0);
}

#[tokio::test]
async fn test_repository_enumeration_without_pagination() {
    let executor = FakeExecutor::new([Ok(repository_response(
        false,
        "main",
        &["main"],
        history_page(commits("p1", 100), Some("c1"), true),
    ))]);

    let report = enumerate_repository(
        &executor,
        &RepositoryId::new("octo", "hello"),
        RepositoryOptions {
            include_stargazers: false,
            paginate_commits: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(report.history.unwrap().records.len(), 100);
    assert_eq!(report.ranking.commit_count(), 100);
    assert_eq!(executor.request_names(), vec!["repository"]);
}

#[test]
fn test_first_history_page_of_empty_repository() {
    let tree = json!({"repository": {"object": null, "refs": {"nodes": []}}});
    assert!(first_history_page(&tree).is_none());

    let tree = repository_response(false, "main", &["main"], history_page(vec![], None, false));
    let page = first_history_page(&tree).unwrap();
    assert!(page.nodes.is_empty());
}

#[tokio::test]
async fn test_primary_failure_aborts() {
    let executor = FakeExecutor::new([Err(GitHubApiError::Transport {
        status: 401,
        message: "Bad credentials".to_string(),
    })]);

    let result = enumerate_repository(
        &executor,
        &RepositoryId::new("octo", "hello"),
        RepositoryOptions::default(),
    )
    .await;

    let error = result.unwrap_err();
    assert!(error.is_unauthorized());
    assert_eq!(executor.request_names(), vec!["repository"]);
}
