//! Tests for the GraphQL query builders
//!
//! Covers alias generation and the 50-branch cap of the comparison query, and
//! the optional stargazer section of the repository query.

use std::collections::HashSet;

use gitsome::github::graphql::organization::organization_query;
use gitsome::github::graphql::repository::{
    MAX_BRANCH_COMPARISONS, RepositoryQueryLimitSize, build_branch_comparison_query,
    commit_history_page_query, repository_query,
};
use gitsome::github::graphql::user::{UserQueryLimitSize, user_query};
use gitsome::types::Branch;

fn branches(names: &[&str]) -> Vec<Branch> {
    names.iter().map(|name| Branch::from(*name)).collect()
}

fn numbered_branches(count: usize) -> Vec<Branch> {
    (0..count)
        .map(|n| Branch::new(format!("feature-{}.x", n)))
        .collect()
}

#[test]
fn test_alias_count_is_capped() {
    let base = Branch::from("main");

    for count in [1, 3, 49, 50, 51, 120] {
        let candidates = numbered_branches(count);
        let query = build_branch_comparison_query(&base, &candidates).unwrap();

        let expected = count.min(MAX_BRANCH_COMPARISONS);
        assert_eq!(query.aliases.len(), expected, "candidates: {}", count);
        assert_eq!(query.query.matches("ref(qualifiedName:").count(), expected);
    }
}

#[test]
fn test_alias_map_is_bijection_over_prefix() {
    let base = Branch::from("main");
    let candidates = numbered_branches(60);
    let query = build_branch_comparison_query(&base, &candidates).unwrap();

    let aliases: Vec<&str> = query.aliases.aliases().collect();
    let unique: HashSet<&str> = aliases.iter().copied().collect();
    assert_eq!(unique.len(), aliases.len());

    for (index, (alias, branch)) in query.aliases.iter().enumerate() {
        assert_eq!(branch, &candidates[index]);
        assert_eq!(query.aliases.branch_for(alias), Some(&candidates[index]));
    }

    // Branches past the cap are not referenced at all
    assert!(!query.query.contains("feature-50.x"));
    assert!(query.aliases.iter().all(|(_, b)| b != &candidates[55]));
}

#[test]
fn test_aliases_are_sanitized_and_deterministic() {
    let base = Branch::from("main");
    let candidates = branches(&["release-1.0", "fix.typo", "user/feature-x", "plain"]);

    let first = build_branch_comparison_query(&base, &candidates).unwrap();
    let second = build_branch_comparison_query(&base, &candidates).unwrap();

    for alias in first.aliases.aliases() {
        assert!(!alias.contains('-'), "alias {} contains '-'", alias);
        assert!(!alias.contains('.'), "alias {} contains '.'", alias);
        assert!(
            alias
                .chars()
                .all(|c| c == '_' || c.is_ascii_alphanumeric())
        );
    }

    assert_eq!(first, second);
    assert_eq!(
        first.aliases.aliases().collect::<Vec<_>>(),
        vec!["ref_0", "ref_1", "ref_2", "ref_3"]
    );
}

#[test]
fn test_comparison_selection_shape() {
    let base = Branch::from("main");
    let candidates = branches(&["dev", "refs/heads/already-qualified"]);
    let query = build_branch_comparison_query(&base, &candidates).unwrap();

    assert!(query.query.contains(
        r#"ref_0: ref(qualifiedName: "refs/heads/dev") { compare(headRef: "refs/heads/main") { aheadBy behindBy } }"#
    ));
    assert!(query.query.contains(r#"qualifiedName: "refs/heads/already-qualified""#));
    assert!(!query.query.contains("refs/heads/refs/heads"));
    assert!(query.query.contains("repository(owner: $owner, name: $repository_name)"));
}

#[test]
fn test_branch_names_are_escaped() {
    let base = Branch::from("main");
    let candidates = branches(&[r#"weird"name\x"#]);
    let query = build_branch_comparison_query(&base, &candidates).unwrap();

    assert!(query.query.contains(r#""refs/heads/weird\"name\\x""#));
}

#[test]
fn test_empty_branch_list_produces_no_query() {
    let base = Branch::from("main");
    assert!(build_branch_comparison_query(&base, &[]).is_none());
}

#[test]
fn test_stargazer_section_is_optional() {
    let without = repository_query(RepositoryQueryLimitSize::default(), false);
    assert!(!without.contains("stargazerCount"));
    assert!(!without.contains("stargazers("));

    let with = repository_query(RepositoryQueryLimitSize::default(), true);
    assert!(with.contains("stargazerCount"));
    assert!(with.contains("stargazers(last: 10)"));
}

#[test]
fn test_repository_query_page_sizes() {
    let query = repository_query(RepositoryQueryLimitSize::default(), false);

    assert!(query.contains("query($owner: String!, $repository_name: String!)"));
    assert!(query.contains("pullRequests(last: 100)"));
    assert!(query.contains("assignableUsers(last: 100)"));
    assert!(query.contains("issues(last: 25)"));
    assert!(query.contains("packages(last: 100)"));
    assert!(query.contains("releases(last: 100)"));
    assert!(query.contains("history(first: 100)"));
    assert!(query.contains(r#"refs(refPrefix: "refs/heads/", first: 100)"#));
    assert!(query.contains("hasNextPage"));
    assert!(query.contains("endCursor"));

    let limits = RepositoryQueryLimitSize {
        commit_history_limit: 20,
        branch_limit: 5,
        ..Default::default()
    };
    let query = repository_query(limits, false);
    assert!(query.contains("history(first: 20)"));
    assert!(query.contains(r#"refs(refPrefix: "refs/heads/", first: 5)"#));
}

#[test]
fn test_assignable_users_carry_repositories_and_gists() {
    let query = repository_query(RepositoryQueryLimitSize::default(), false);
    assert!(query.contains(
        "topRepositories(last: 100, orderBy: {field: UPDATED_AT, direction: DESC})"
    ));
    assert!(query.contains("repositories(first: 100, orderBy: {field: UPDATED_AT, direction: DESC})"));
    assert!(query.contains("gists(last: 100, orderBy: {field: CREATED_AT, direction: DESC})"));
    assert!(query.contains("encodedName"));

    let limits = RepositoryQueryLimitSize {
        assignable_user_limit: 30,
        assignable_user_detail_limit: 5,
        ..Default::default()
    };
    let query = repository_query(limits, false);
    assert!(query.contains("assignableUsers(last: 30)"));
    assert!(query.contains("topRepositories(last: 5,"));
    assert!(query.contains("gists(last: 5,"));
    // Braces stay balanced with the nested section spliced in
    assert_eq!(query.matches('{').count(), query.matches('}').count());
}

#[test]
fn test_commit_history_page_query_uses_cursor_variable() {
    let query = commit_history_page_query(100);
    assert!(query.contains("$cursor: String!"));
    assert!(query.contains("history(first: 100, after: $cursor)"));
    assert!(query.contains(r#"object(expression: "HEAD")"#));
    assert!(query.contains("login"));
}

#[test]
fn test_identifiers_are_variables() {
    let org = organization_query();
    assert!(org.contains("repositoryOwner(login: $login)"));
    assert!(org.contains("repositories(first: 100)"));

    let user = user_query(UserQueryLimitSize::default());
    assert!(user.contains("user(login: $login)"));
    assert!(user.contains("gistComments(first: 100)"));
}
