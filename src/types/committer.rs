//! Commit authorship identity and committer ranking
//!
//! Commits authored by a GitHub account are grouped by login; commits without an
//! associated account fall back to the `name`/`email` pair recorded in the commit.
//! The two namespaces are kept apart as variants of [`CommitterIdentity`] and are
//! only flattened to text at display time, so a `name <email>` string can never
//! collide with a login.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Login;

const UNKNOWN_AUTHOR_NAME: &str = "Unknown";

/// Author identity of one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub login: Option<Login>,
    pub name: String,
    pub email: String,
}

impl CommitRecord {
    pub fn new(login: Option<Login>, name: Option<String>, email: Option<String>) -> Self {
        Self {
            login: login.filter(|login| !login.as_str().is_empty()),
            name: name.unwrap_or_else(|| UNKNOWN_AUTHOR_NAME.to_string()),
            email: email.unwrap_or_default(),
        }
    }

    /// Commit authored by a GitHub account
    pub fn with_login(login: &str) -> Self {
        Self::new(Some(Login::from(login)), None, None)
    }

    /// Commit without an associated GitHub account
    pub fn with_name_email(name: &str, email: &str) -> Self {
        Self::new(None, Some(name.to_string()), Some(email.to_string()))
    }

    pub fn identity(&self) -> CommitterIdentity {
        match &self.login {
            Some(login) => CommitterIdentity::Login(login.clone()),
            None => CommitterIdentity::NameEmail {
                name: self.name.clone(),
                email: self.email.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommitterIdentity {
    Login(Login),
    NameEmail { name: String, email: String },
}

impl CommitterIdentity {
    pub fn login(&self) -> Option<&Login> {
        match self {
            Self::Login(login) => Some(login),
            Self::NameEmail { .. } => None,
        }
    }
}

impl std::fmt::Display for CommitterIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login(login) => write!(f, "{}", login),
            Self::NameEmail { name, email } => write!(f, "{} <{}>", name, email),
        }
    }
}

/// Accumulated statistics of one identity. Email and login are taken from the
/// first commit seen for the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitterStat {
    pub count: usize,
    pub email: String,
    pub login: Option<Login>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCommitter {
    pub identity: CommitterIdentity,
    pub stat: CommitterStat,
}

/// Committers ordered by commit count, highest first. Equal counts keep the order
/// in which the identities were first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking(pub Vec<RankedCommitter>);

impl Ranking {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedCommitter> {
        self.0.iter()
    }

    /// Leading entries for summary views
    pub fn top(&self, n: usize) -> &[RankedCommitter] {
        &self.0[..n.min(self.0.len())]
    }

    /// Total number of commits the ranking was built from
    pub fn commit_count(&self) -> usize {
        self.0.iter().map(|entry| entry.stat.count).sum()
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a RankedCommitter;
    type IntoIter = std::slice::Iter<'a, RankedCommitter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Folds commit records into a [`Ranking`] in a single pass.
pub fn aggregate_committers<I>(records: I) -> Ranking
where
    I: IntoIterator<Item = CommitRecord>,
{
    let mut positions: HashMap<CommitterIdentity, usize> = HashMap::new();
    let mut entries: Vec<RankedCommitter> = Vec::new();

    for record in records {
        let identity = record.identity();
        match positions.get(&identity) {
            Some(&index) => entries[index].stat.count += 1,
            None => {
                positions.insert(identity.clone(), entries.len());
                entries.push(RankedCommitter {
                    identity,
                    stat: CommitterStat {
                        count: 1,
                        email: record.email,
                        login: record.login,
                    },
                });
            }
        }
    }

    // sort_by is stable
    entries.sort_by(|a, b| b.stat.count.cmp(&a.stat.count));
    Ranking(entries)
}
