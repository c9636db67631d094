use serde::{Deserialize, Serialize};

use crate::types::Login;

const DEFAULT_LIMIT: u8 = 100;

/// Variables of the queries addressed by login (users and organizations)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginVariable {
    pub login: Login,
}

/// Page sizes of the user query connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserQueryLimitSize {
    pub following_limit: u8,
    pub gist_limit: u8,
    pub gist_detail_limit: u8,
    pub gist_comment_limit: u8,
    pub repository_limit: u8,
}

impl Default for UserQueryLimitSize {
    fn default() -> Self {
        Self {
            following_limit: DEFAULT_LIMIT,
            gist_limit: DEFAULT_LIMIT,
            gist_detail_limit: DEFAULT_LIMIT,
            gist_comment_limit: DEFAULT_LIMIT,
            repository_limit: DEFAULT_LIMIT,
        }
    }
}

/// Profile, followed users, gists (with files, comments, stargazers and forks),
/// gist comments and owned repositories of one user. Takes `$login`.
pub fn user_query(limit_size: UserQueryLimitSize) -> String {
    let UserQueryLimitSize {
        following_limit,
        gist_limit,
        gist_detail_limit,
        gist_comment_limit,
        repository_limit,
    } = limit_size;

    format!(
        r#"
        query GetUserDetails($login: String!) {{
            user(login: $login) {{
                login
                company
                email
                location
                followers {{
                  totalCount
                }}
                following(first: {following_limit}) {{
                  totalCount
                  nodes {{
                    login
                    name
                    email
                    url
                    company
                    location
                  }}
                }}
                gists(first: {gist_limit}, orderBy: {{ field: CREATED_AT, direction: DESC }}) {{
                  totalCount
                  edges {{
                    node {{
                      id
                      name
                      description
                      url
                      resourcePath
                      isPublic
                      isFork
                      pushedAt
                      createdAt
                      updatedAt
                      stargazerCount
                      viewerHasStarred
                      owner {{
                        login
                        id
                      }}
                      files {{
                        name
                        encodedName
                        encoding
                        extension
                        isImage
                        isTruncated
                        language {{
                          name
                        }}
                        size
                        text
                      }}
                      comments(first: {gist_detail_limit}) {{
                        totalCount
                        nodes {{
                          id
                          author {{
                            login
                            url
                          }}
                          bodyText
                          createdAt
                          updatedAt
                        }}
                      }}
                      stargazers(first: {gist_detail_limit}) {{
                        totalCount
                        nodes {{
                          login
                          name
                          email
                          url
                        }}
                      }}
                      forks(first: {gist_detail_limit}) {{
                        totalCount
                        nodes {{
                          name
                          url
                          owner {{
                            login
                          }}
                        }}
                      }}
                    }}
                  }}
                }}
                gistComments(first: {gist_comment_limit}) {{
                  totalCount
                  nodes {{
                    author {{
                      login
                      url
                    }}
                    id
                    body
                    createdAt
                    updatedAt
                    gist {{
                      id
                      url
                    }}
                  }}
                }}
                repositories(first: {repository_limit}, orderBy: {{ field: CREATED_AT, direction: DESC }}) {{
                  totalCount
                  pageInfo {{
                    endCursor
                    hasNextPage
                  }}
                  edges {{
                    node {{
                      name
                      owner {{
                        login
                      }}
                      id
                      description
                      diskUsage
                      url
                      sshUrl
                      forkCount
                      hasWikiEnabled
                      homepageUrl
                      isInOrganization
                      isEmpty
                      stargazerCount
                      visibility
                      isFork
                      openGraphImageUrl
                    }}
                  }}
                }}
            }}
        }}
    "#
    )
}
