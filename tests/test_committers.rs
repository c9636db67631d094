//! Tests for committer aggregation and ranking

use serde_json::json;

use gitsome::github::GitHubApiError;
use gitsome::github::graphql::graphql_types::CommitHistoryConnection;
use gitsome::services::{CommitterProfile, fetch_committer_profiles};
use gitsome::types::{CommitRecord, CommitterIdentity, Login, aggregate_committers};

use test_util::{FakeExecutor, commit_by_email, commit_by_login, history_page};

fn ranked_pairs(records: Vec<CommitRecord>) -> Vec<(String, usize)> {
    aggregate_committers(records)
        .iter()
        .map(|ranked| (ranked.identity.to_string(), ranked.stat.count))
        .collect()
}

#[test]
fn test_ties_keep_first_encounter_order() {
    let mut records = Vec::new();
    records.extend((0..3).map(|_| CommitRecord::with_login("a")));
    records.extend((0..5).map(|_| CommitRecord::with_login("b")));
    records.extend((0..5).map(|_| CommitRecord::with_login("c")));

    assert_eq!(
        ranked_pairs(records),
        vec![
            ("b".to_string(), 5),
            ("c".to_string(), 5),
            ("a".to_string(), 3)
        ]
    );
}

#[test]
fn test_ties_are_stable_across_identity_kinds() {
    let mut records = Vec::new();
    records.extend((0..3).map(|_| CommitRecord::with_login("a")));
    records.extend((0..5).map(|_| CommitRecord::with_login("b")));
    records.extend((0..5).map(|_| CommitRecord::with_name_email("c", "c@x")));

    assert_eq!(
        ranked_pairs(records),
        vec![
            ("b".to_string(), 5),
            ("c <c@x>".to_string(), 5),
            ("a".to_string(), 3)
        ]
    );
}

#[test]
fn test_interleaved_records_are_counted_per_identity() {
    let records = vec![
        CommitRecord::with_login("c"),
        CommitRecord::with_login("a"),
        CommitRecord::with_login("c"),
        CommitRecord::with_name_email("Jane", "jane@example.com"),
        CommitRecord::with_login("a"),
    ];

    assert_eq!(
        ranked_pairs(records),
        vec![
            ("c".to_string(), 2),
            ("a".to_string(), 2),
            ("Jane <jane@example.com>".to_string(), 1)
        ]
    );
}

#[test]
fn test_identity_prefers_login() {
    let with_login = CommitRecord::new(
        Some(Login::from("octocat")),
        Some("The Octocat".to_string()),
        Some("octo@example.com".to_string()),
    );
    assert_eq!(
        with_login.identity(),
        CommitterIdentity::Login(Login::from("octocat"))
    );

    let without_login = CommitRecord::new(
        None,
        Some("Jane".to_string()),
        Some("jane@example.com".to_string()),
    );
    assert_eq!(
        without_login.identity(),
        CommitterIdentity::NameEmail {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string()
        }
    );

    // An empty login is no login
    let empty_login = CommitRecord::new(Some(Login::from("")), None, None);
    assert_eq!(empty_login.login, None);
    assert_eq!(empty_login.identity().to_string(), "Unknown <>");
}

#[test]
fn test_login_and_name_email_never_collide() {
    // A login that happens to look like a "name <email>" display string
    let records = vec![
        CommitRecord::with_login("Jane <jane@example.com>"),
        CommitRecord::with_name_email("Jane", "jane@example.com"),
    ];

    let ranking = aggregate_committers(records);
    assert_eq!(ranking.len(), 2);
    assert!(ranking.iter().all(|ranked| ranked.stat.count == 1));
}

#[test]
fn test_first_seen_email_wins() {
    let records = vec![
        CommitRecord::new(
            Some(Login::from("octocat")),
            Some("Octo".to_string()),
            Some("first@example.com".to_string()),
        ),
        CommitRecord::new(
            Some(Login::from("octocat")),
            Some("Octo".to_string()),
            Some("second@example.com".to_string()),
        ),
    ];

    let ranking = aggregate_committers(records);
    assert_eq!(ranking.len(), 1);
    let entry = &ranking.0[0];
    assert_eq!(entry.stat.count, 2);
    assert_eq!(entry.stat.email, "first@example.com");
    assert_eq!(entry.stat.login, Some(Login::from("octocat")));
}

#[test]
fn test_records_from_history_nodes() {
    let page = history_page(
        vec![
            commit_by_login("octocat"),
            commit_by_email("Jane", "jane@example.com"),
            serde_json::json!({"author": null}),
            serde_json::Value::Null,
            commit_by_login("octocat"),
        ],
        None,
        false,
    );
    let connection: CommitHistoryConnection = serde_json::from_value(page).unwrap();
    let records = connection.records();

    // Commits without author data still count, as "Unknown <>"
    assert_eq!(records.len(), 5);
    assert_eq!(records[2].identity().to_string(), "Unknown <>");
    assert_eq!(records[3].identity().to_string(), "Unknown <>");

    let ranking = aggregate_committers(records);
    assert_eq!(ranking.0[0].identity.to_string(), "octocat");
    assert_eq!(ranking.0[0].stat.count, 2);
    assert_eq!(ranking.0[1].identity.to_string(), "Unknown <>");
    assert_eq!(ranking.commit_count(), 5);
}

#[test]
fn test_top_is_presentation_only() {
    let records: Vec<CommitRecord> = (0..15)
        .map(|n| CommitRecord::with_login(&format!("user-{}", n)))
        .collect();
    let ranking = aggregate_committers(records);

    assert_eq!(ranking.len(), 15);
    assert_eq!(ranking.top(10).len(), 10);
    assert_eq!(ranking.top(100).len(), 15);
}

#[test]
fn test_empty_input() {
    let ranking = aggregate_committers(Vec::<CommitRecord>::new());
    assert!(ranking.is_empty());
    assert_eq!(ranking.commit_count(), 0);
}

#[tokio::test]
async fn test_committer_profiles_follow_ranking() {
    let ranking = aggregate_committers(vec![
        CommitRecord::with_login("busy"),
        CommitRecord::with_login("busy"),
        CommitRecord::with_name_email("Jane", "jane@example.com"),
        CommitRecord::with_login("ghost"),
    ]);
    let executor = FakeExecutor::new([
        Ok(json!({"user": {"login": "busy", "company": "Acme"}})),
        Err(GitHubApiError::GraphQL {
            messages: vec!["Could not resolve to a User with the login of 'ghost'.".to_string()],
        }),
    ]);

    let profiles = fetch_committer_profiles(&executor, &ranking).await;

    assert_eq!(profiles.len(), 3);
    assert!(matches!(
        &profiles[0],
        CommitterProfile::Found { login, tree } if login == "busy" && tree["user"]["company"] == "Acme"
    ));
    assert!(matches!(
        &profiles[1],
        CommitterProfile::EmailOnly(CommitterIdentity::NameEmail { name, .. }) if name == "Jane"
    ));
    // A failed lookup does not stop the rest
    assert!(matches!(
        &profiles[2],
        CommitterProfile::Failed { login, .. } if login == "ghost"
    ));

    let requests = executor.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].query_name, "user");
    assert_eq!(requests[0].variables, json!({"login": "busy"}));
    assert_eq!(requests[1].variables, json!({"login": "ghost"}));
}
