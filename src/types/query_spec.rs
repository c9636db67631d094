use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{Login, RepositoryId};

/// Entity kinds the enumerator knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Org,
    Repo,
    User,
}

/// Optional sections of a repository enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOptions {
    /// Adds `stargazerCount` and the latest stargazers to the primary query
    pub include_stargazers: bool,
    /// Follows the HEAD history cursor past the first page
    pub paginate_commits: bool,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            include_stargazers: false,
            paginate_commits: true,
        }
    }
}

/// What a single command invocation asks for. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuerySpec {
    Organization {
        login: Login,
    },
    Repository {
        repository_id: RepositoryId,
        options: RepositoryOptions,
    },
    User {
        login: Login,
    },
}

impl QuerySpec {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Organization { .. } => EntityKind::Org,
            Self::Repository { .. } => EntityKind::Repo,
            Self::User { .. } => EntityKind::User,
        }
    }

    /// Base file name (without extension) for persisted snapshots and reports
    pub fn snapshot_name(&self) -> String {
        match self {
            Self::Organization { login } => format!("{}-{}", login, self.kind()),
            Self::Repository { repository_id, .. } => format!(
                "{}-{}-{}",
                repository_id.owner,
                repository_id.repository_name,
                self.kind()
            ),
            Self::User { login } => format!("{}-{}", login, self.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_snapshot_names() {
        let org = QuerySpec::Organization {
            login: Login::from("rust-lang"),
        };
        assert_eq!(org.snapshot_name(), "rust-lang-org");

        let repo = QuerySpec::Repository {
            repository_id: RepositoryId::new("octo", "hello"),
            options: RepositoryOptions::default(),
        };
        assert_eq!(repo.snapshot_name(), "octo-hello-repo");

        let user = QuerySpec::User {
            login: Login::from("octocat"),
        };
        assert_eq!(user.snapshot_name(), "octocat-user");
    }

    #[test]
    fn test_entity_kind_parse() {
        assert_eq!(EntityKind::from_str("repo").unwrap(), EntityKind::Repo);
        assert_eq!(EntityKind::Org.to_string(), "org");
        assert!(EntityKind::from_str("gist").is_err());
    }
}
