//! Live tests against api.github.com
//!
//! The GraphQL API requires authentication, so these read GITHUB_TOKEN (or
//! GITSOME_GITHUB_TOKEN) and only run with the feature enabled:
//! cargo test --features integration-tests

#[cfg(feature = "integration-tests")]
use serial_test::serial;

#[cfg(feature = "integration-tests")]
use gitsome::services::{ComparisonOutcome, Report, enumerate};
#[cfg(feature = "integration-tests")]
use gitsome::types::{Login, QuerySpec, RepositoryId, RepositoryOptions};
#[cfg(feature = "integration-tests")]
use test_util::create_test_github_client;

#[tokio::test]
#[serial]
#[cfg(feature = "integration-tests")]
async fn test_enumerate_public_user() {
    let client = create_test_github_client();
    let spec = QuerySpec::User {
        login: Login::from("octocat"),
    };

    let report = enumerate(&client, &spec).await;
    assert!(report.is_ok(), "Failed to enumerate user: {:?}", report);

    let report = report.unwrap();
    assert_eq!(report.tree()["user"]["login"], "octocat");
}

#[tokio::test]
#[serial]
#[cfg(feature = "integration-tests")]
async fn test_enumerate_repository() {
    let client = create_test_github_client();
    let spec = QuerySpec::Repository {
        repository_id: RepositoryId::new("octocat", "Spoon-Knife"),
        options: RepositoryOptions {
            include_stargazers: false,
            paginate_commits: false,
        },
    };

    let report = enumerate(&client, &spec).await.unwrap();
    let Report::Repository(report) = report else {
        panic!("expected a repository report");
    };

    assert!(!report.ranking.is_empty());
    // Spoon-Knife itself is not a fork
    assert_eq!(report.comparison, ComparisonOutcome::NotAttempted);
}

#[tokio::test]
#[serial]
#[cfg(feature = "integration-tests")]
async fn test_enumerate_missing_organization() {
    let client = create_test_github_client();
    let spec = QuerySpec::Organization {
        login: Login::from("this-organization-should-not-exist-8f3a2c"),
    };

    // Unknown owners come back as a null repositoryOwner or a GraphQL error
    match enumerate(&client, &spec).await {
        Ok(report) => assert!(report.tree()["repositoryOwner"].is_null()),
        Err(error) => assert_eq!(error.status(), None, "unexpected error: {}", error),
    }
}
