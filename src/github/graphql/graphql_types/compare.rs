use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `Ref.compare` result for one branch against the base branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchComparison {
    pub ahead_by: u64,
    pub behind_by: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefComparisonNode {
    pub compare: Option<BranchComparison>,
}

/// Response of the aliased branch comparison query. Keys are the synthetic
/// aliases; a `null` value means the ref could not be resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchComparisonResponse {
    pub repository: Option<BranchComparisonRepository>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchComparisonRepository {
    #[serde(flatten)]
    pub refs: HashMap<String, Option<RefComparisonNode>>,
}

impl BranchComparisonResponse {
    /// Comparison returned under `alias`, if the ref resolved and compared
    pub fn comparison(&self, alias: &str) -> Option<&BranchComparison> {
        self.repository
            .as_ref()?
            .refs
            .get(alias)?
            .as_ref()?
            .compare
            .as_ref()
    }
}
