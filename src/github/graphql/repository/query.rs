use crate::types::{Owner, RepositoryName};
use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: u8 = 100;
const DEFAULT_ISSUE_LIMIT: u8 = 25;
const DEFAULT_STARGAZER_LIMIT: u8 = 10;

/// Page size of every paginated connection in the repository query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepositoryQueryLimitSize {
    pub pull_request_limit: u8,
    pub assignable_user_limit: u8,
    /// Repositories and gists listed per assignable user
    pub assignable_user_detail_limit: u8,
    pub issue_limit: u8,
    pub package_limit: u8,
    pub release_limit: u8,
    pub commit_history_limit: u8,
    pub branch_limit: u8,
    pub stargazer_limit: u8,
}

impl Default for RepositoryQueryLimitSize {
    fn default() -> Self {
        Self {
            pull_request_limit: DEFAULT_LIMIT,
            assignable_user_limit: DEFAULT_LIMIT,
            assignable_user_detail_limit: DEFAULT_LIMIT,
            issue_limit: DEFAULT_ISSUE_LIMIT,
            package_limit: DEFAULT_LIMIT,
            release_limit: DEFAULT_LIMIT,
            commit_history_limit: DEFAULT_LIMIT,
            branch_limit: DEFAULT_LIMIT,
            stargazer_limit: DEFAULT_STARGAZER_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryVariable {
    pub owner: Owner,
    pub repository_name: RepositoryName,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitHistoryVariable {
    pub owner: Owner,
    pub repository_name: RepositoryName,
    pub cursor: String,
}

/// Author selection shared by the first history page and its continuations
fn commit_author_fields() -> &'static str {
    r#"author {
                    name
                    email
                    user {
                      login
                    }
                  }"#
}

fn stargazers_section(limit: u8) -> String {
    format!(
        r#"
                stargazerCount
                stargazers(last: {}) {{
                  totalCount
                  nodes {{
                    name
                    login
                    email
                    company
                    url
                  }}
                }}"#,
        limit
    )
}

/// Assignable users with their recent repositories and gists
fn assignable_users_section(limit: u8, detail_limit: u8) -> String {
    format!(
        r#"assignableUsers(last: {limit}) {{
                  totalCount
                  nodes {{
                    name
                    login
                    company
                    location
                    pronouns
                    status {{
                      message
                      emoji
                    }}
                    topRepositories(last: {detail_limit}, orderBy: {{field: UPDATED_AT, direction: DESC}}) {{
                      totalCount
                      edges {{
                        node {{
                          name
                          description
                          url
                        }}
                      }}
                    }}
                    repositories(first: {detail_limit}, orderBy: {{field: UPDATED_AT, direction: DESC}}) {{
                      totalCount
                      edges {{
                        node {{
                          name
                        }}
                      }}
                    }}
                    gists(last: {detail_limit}, orderBy: {{field: CREATED_AT, direction: DESC}}) {{
                      totalCount
                      edges {{
                        node {{
                          name
                          description
                          url
                          files {{
                            encodedName
                            language {{
                              name
                            }}
                            size
                          }}
                          updatedAt
                        }}
                      }}
                    }}
                  }}
                }}"#
    )
}

pub fn repository_query(limit_size: RepositoryQueryLimitSize, include_stargazers: bool) -> String {
    let RepositoryQueryLimitSize {
        pull_request_limit,
        assignable_user_limit,
        assignable_user_detail_limit,
        issue_limit,
        package_limit,
        release_limit,
        commit_history_limit,
        branch_limit,
        stargazer_limit,
    } = limit_size;

    let assignable_users =
        assignable_users_section(assignable_user_limit, assignable_user_detail_limit);

    let stargazers = if include_stargazers {
        stargazers_section(stargazer_limit)
    } else {
        String::new()
    };

    format!(
        r#"
        query($owner: String!, $repository_name: String!) {{
            repository(owner: $owner, name: $repository_name) {{
                id
                nameWithOwner
                description
                url
                homepageUrl
                mirrorUrl
                projectsUrl
                projectsV2(first: 100) {{
                  totalCount
                }}
                contactLinks {{
                  name
                  url
                  about
                }}
                diskUsage
                hasWikiEnabled
                codeOfConduct {{
                  name
                  url
                }}
                isArchived
                isBlankIssuesEnabled
                isDisabled
                isEmpty
                isInOrganization
                isLocked
                isMirror
                isPrivate
                isSecurityPolicyEnabled
                isTemplate
                isUserConfigurationRepository
                isFork
                hasProjectsEnabled
                hasIssuesEnabled
                forkCount
                pullRequests(last: {}) {{
                  totalCount
                  nodes {{
                    number
                    author {{
                      login
                      url
                      resourcePath
                    }}
                    bodyText
                    permalink
                  }}
                }}
                {}
                issues(last: {}) {{
                  totalCount
                  edges {{
                    node {{
                      number
                      title
                      author {{
                        login
                      }}
                      bodyText
                      bodyUrl
                      createdAt
                      lastEditedAt
                      closed
                    }}
                  }}
                }}
                packages(last: {}) {{
                  totalCount
                }}
                releases(last: {}) {{
                  totalCount
                  nodes {{
                    name
                    url
                    author {{
                      name
                      login
                      email
                    }}
                    createdAt
                    description
                    isDraft
                    isLatest
                    isPrerelease
                    databaseId
                    resourcePath
                  }}
                }}{}
                defaultBranchRef {{
                  name
                  target {{
                    ... on Commit {{
                      history {{
                        totalCount
                      }}
                    }}
                  }}
                }}
                object(expression: "HEAD") {{
                  ... on Commit {{
                    history(first: {}) {{
                      totalCount
                      pageInfo {{
                        endCursor
                        hasNextPage
                      }}
                      nodes {{
                        {}
                      }}
                    }}
                  }}
                }}
                refs(refPrefix: "refs/heads/", first: {}) {{
                  totalCount
                  nodes {{
                    name
                    target {{
                      ... on Commit {{
                        oid
                      }}
                    }}
                  }}
                }}
            }}
        }}
    "#,
        pull_request_limit,
        assignable_users,
        issue_limit,
        package_limit,
        release_limit,
        stargazers,
        commit_history_limit,
        commit_author_fields(),
        branch_limit,
    )
}

/// Next page of the HEAD history after `$cursor`
pub fn commit_history_page_query(commit_history_limit: u8) -> String {
    format!(
        r#"
        query($owner: String!, $repository_name: String!, $cursor: String!) {{
            repository(owner: $owner, name: $repository_name) {{
                object(expression: "HEAD") {{
                  ... on Commit {{
                    history(first: {}, after: $cursor) {{
                      pageInfo {{
                        endCursor
                        hasNextPage
                      }}
                      nodes {{
                        {}
                      }}
                    }}
                  }}
                }}
            }}
        }}
    "#,
        commit_history_limit,
        commit_author_fields(),
    )
}
