use serde::{Deserialize, Serialize};

use super::PageInfo;
use crate::types::{CommitRecord, Login};

/// `history` connection of a commit object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitHistoryConnection {
    #[serde(rename = "totalCount")]
    pub total_count: Option<u64>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub nodes: Vec<Option<CommitNode>>,
}

impl CommitHistoryConnection {
    /// Commit records of this page in server order
    pub fn records(&self) -> Vec<CommitRecord> {
        self.nodes
            .iter()
            .map(|node| match node {
                Some(node) => CommitRecord::from(node.clone()),
                None => CommitRecord::new(None, None, None),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitNode {
    pub author: Option<CommitAuthorNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthorNode {
    pub name: Option<String>,
    pub email: Option<String>,
    pub user: Option<CommitUserNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitUserNode {
    pub login: Option<String>,
}

impl From<CommitNode> for CommitRecord {
    fn from(node: CommitNode) -> Self {
        match node.author {
            Some(author) => CommitRecord::new(
                author.user.and_then(|user| user.login).map(Login::from),
                author.name,
                author.email,
            ),
            None => CommitRecord::new(None, None, None),
        }
    }
}

/// Response of the history continuation query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitHistoryPageResponse {
    pub repository: Option<CommitHistoryRepository>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitHistoryRepository {
    pub object: Option<CommitHistoryObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitHistoryObject {
    pub history: Option<CommitHistoryConnection>,
}

impl CommitHistoryPageResponse {
    pub fn into_history(self) -> Option<CommitHistoryConnection> {
        self.repository?.object?.history
    }
}
