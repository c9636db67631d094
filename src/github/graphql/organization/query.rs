const DEFAULT_REPOSITORY_LIMIT: u8 = 100;

/// Repositories of an organization with their star, fork, commit and branch
/// counts. Takes `$login`
/// ([`LoginVariable`](crate::github::graphql::user::LoginVariable)).
pub fn organization_query() -> String {
    organization_query_with_limit(DEFAULT_REPOSITORY_LIMIT)
}

pub fn organization_query_with_limit(repository_limit: u8) -> String {
    format!(
        r#"
        query($login: String!) {{
            repositoryOwner(login: $login) {{
                ... on Organization {{
                    repositories(first: {}) {{
                        totalCount
                        pageInfo {{
                            endCursor
                            hasNextPage
                        }}
                        nodes {{
                            id
                            name
                            stars: stargazerCount
                            forks: forkCount
                            created_at: createdAt
                            organization: owner {{
                                login
                            }}
                            repo_url: url
                            defaultBranchRef {{
                                target {{
                                    ... on Commit {{
                                        history {{
                                            totalCount
                                        }}
                                    }}
                                }}
                            }}
                            refs(refPrefix: "refs/heads/", first: 1) {{
                                totalCount
                            }}
                        }}
                    }}
                }}
            }}
        }}
    "#,
        repository_limit
    )
}
