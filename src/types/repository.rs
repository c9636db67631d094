//! Repository identity types
//!
//! Owner, repository name and branch wrappers used by the query builders and the
//! enumeration service. Branch names are kept verbatim; qualification to
//! `refs/heads/...` happens only when a query document is rendered.

use serde::{Deserialize, Serialize};

const HEADS_PREFIX: &str = "refs/heads/";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Branch(pub String);

impl Branch {
    pub fn new<T: Into<String>>(branch: T) -> Self {
        Self(branch.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully qualified ref name. Names already under `refs/` are returned as-is.
    pub fn qualified_name(&self) -> String {
        if self.0.starts_with("refs/") {
            self.0.clone()
        } else {
            format!("{}{}", HEADS_PREFIX, self.0)
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Branch {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Branch {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Owner name wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Owner(pub String);

impl Owner {
    pub fn new(owner: String) -> Self {
        Self(owner)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Owner {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Owner {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Repository name wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RepositoryName(pub String);

impl RepositoryName {
    pub fn new(repo_name: String) -> Self {
        Self(repo_name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RepositoryName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepositoryName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Owner/name pair identifying one GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RepositoryId {
    pub owner: Owner,
    pub repository_name: RepositoryName,
}

impl RepositoryId {
    pub fn new<T1: Into<String>, T2: Into<String>>(owner: T1, name: T2) -> Self {
        Self {
            owner: Owner::new(owner.into()),
            repository_name: RepositoryName::new(name.into()),
        }
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn repo_name(&self) -> &RepositoryName {
        &self.repository_name
    }

    /// Returns the repository URL
    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repository_name)
    }

    /// Download link for a branch snapshot archive
    pub fn archive_url(&self, branch: &Branch) -> String {
        format!("{}/archive/refs/heads/{}.zip", self.url(), branch)
    }

    pub fn tree_url(&self, branch: &Branch) -> String {
        format!("{}/tree/{}", self.url(), branch)
    }

    pub fn compare_url(&self, base: &Branch, head: &Branch) -> String {
        format!("{}/compare/{}...{}", self.url(), base, head)
    }

    pub fn branches_url(&self) -> String {
        format!("{}/branches/all", self.url())
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repository_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        assert_eq!(Branch::new("main").qualified_name(), "refs/heads/main");
        assert_eq!(
            Branch::new("feature/x.y").qualified_name(),
            "refs/heads/feature/x.y"
        );
        assert_eq!(
            Branch::new("refs/tags/v1").qualified_name(),
            "refs/tags/v1"
        );
    }

    #[test]
    fn test_repository_urls() {
        let repo = RepositoryId::new("octo", "hello");
        let main = Branch::new("main");
        assert_eq!(repo.url(), "https://github.com/octo/hello");
        assert_eq!(
            repo.archive_url(&main),
            "https://github.com/octo/hello/archive/refs/heads/main.zip"
        );
        assert_eq!(
            repo.compare_url(&main, &Branch::new("dev")),
            "https://github.com/octo/hello/compare/main...dev"
        );
        assert_eq!(repo.to_string(), "octo/hello");
    }
}
