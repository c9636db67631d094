//! Branch comparison round trip and merge
//!
//! For forks, every non-default branch is compared against the default branch
//! with one aliased query. The results are spliced into the primary repository
//! tree as a `compare` object on the matching `refs.nodes[*]` entry. A branch
//! without a `compare` key was never compared, which is different from a
//! comparison of zero commits.

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::github::GitHubApiError;
use crate::github::client::GraphQLExecutor;
use crate::github::graphql::graphql_types::{
    BranchComparisonResponse, GraphQLPayload, GraphQLQuery,
};
use crate::github::graphql::repository::{
    AliasMap, MAX_BRANCH_COMPARISONS, RepositoryVariable, build_branch_comparison_query,
};
use crate::types::{Branch, RepositoryId};

/// Used when the repository reports no default branch (empty repositories)
pub const DEFAULT_BRANCH_FALLBACK: &str = "main";

/// What happened to the supplementary comparison step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// Not a fork, or no branch besides the default one
    NotAttempted,
    Merged {
        /// Branches sent in the comparison query
        compared: usize,
        /// Branches that received a `compare` entry
        merged: usize,
        /// Candidates dropped by [`MAX_BRANCH_COMPARISONS`]
        skipped: usize,
    },
    /// The comparison query failed; the tree carries no comparison data
    Failed(GitHubApiError),
}

fn branch_nodes(tree: &Value) -> &[Value] {
    tree.pointer("/repository/refs/nodes")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn is_fork(tree: &Value) -> bool {
    tree.pointer("/repository/isFork")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

pub fn default_branch(tree: &Value) -> Branch {
    tree.pointer("/repository/defaultBranchRef/name")
        .and_then(Value::as_str)
        .map(Branch::from)
        .unwrap_or_else(|| Branch::from(DEFAULT_BRANCH_FALLBACK))
}

/// Branch names of the primary result in server order, without `base`
pub fn comparison_candidates(tree: &Value, base: &Branch) -> Vec<Branch> {
    branch_nodes(tree)
        .iter()
        .filter_map(|node| node.get("name").and_then(Value::as_str))
        .filter(|name| *name != base.as_str())
        .map(Branch::from)
        .collect()
}

/// Attaches each aliased comparison to the branch node it was built for.
///
/// Aliases missing from the response, refs that resolved to `null` and
/// comparisons without a `compare` object leave the branch untouched. Merging
/// the same response again rewrites the same values. Returns the number of
/// branch nodes updated.
pub fn merge_branch_comparisons(
    tree: &mut Value,
    comparisons: &BranchComparisonResponse,
    aliases: &AliasMap,
) -> usize {
    let Some(nodes) = tree
        .pointer_mut("/repository/refs/nodes")
        .and_then(Value::as_array_mut)
    else {
        return 0;
    };

    let mut merged = 0;
    for (alias, branch) in aliases.iter() {
        let Some(comparison) = comparisons.comparison(alias) else {
            debug!("No comparison returned for {} ({})", branch, alias);
            continue;
        };

        let node = nodes
            .iter_mut()
            .find(|node| node.get("name").and_then(Value::as_str) == Some(branch.as_str()));

        if let Some(Value::Object(node)) = node {
            node.insert(
                "compare".to_string(),
                json!({
                    "aheadBy": comparison.ahead_by,
                    "behindBy": comparison.behind_by,
                }),
            );
            merged += 1;
        }
    }

    merged
}

/// Runs the comparison query for a fork and merges it into `tree`.
///
/// Failures are not propagated: comparison data is supplementary, so an error
/// is logged and reported as [`ComparisonOutcome::Failed`].
pub async fn compare_fork_branches<E: GraphQLExecutor>(
    executor: &E,
    repository_id: &RepositoryId,
    tree: &mut Value,
) -> ComparisonOutcome {
    if !is_fork(tree) {
        return ComparisonOutcome::NotAttempted;
    }

    let base = default_branch(tree);
    let candidates = comparison_candidates(tree, &base);
    let Some(comparison_query) = build_branch_comparison_query(&base, &candidates) else {
        debug!("No branches besides {} to compare in {}", base, repository_id);
        return ComparisonOutcome::NotAttempted;
    };

    let compared = comparison_query.aliases.len();
    let skipped = candidates.len().saturating_sub(MAX_BRANCH_COMPARISONS);
    if skipped > 0 {
        info!(
            "Comparing the first {} of {} branches in {}",
            MAX_BRANCH_COMPARISONS,
            candidates.len(),
            repository_id
        );
    }

    let payload = GraphQLPayload {
        query: GraphQLQuery(comparison_query.query),
        variables: Some(RepositoryVariable {
            owner: repository_id.owner().clone(),
            repository_name: repository_id.repo_name().clone(),
        }),
    };

    match executor
        .execute_graphql::<_, BranchComparisonResponse>("branch_comparison", payload)
        .await
    {
        Ok(response) => {
            let merged = merge_branch_comparisons(tree, &response, &comparison_query.aliases);
            info!(
                "Merged {} of {} branch comparisons for {}",
                merged, compared, repository_id
            );
            ComparisonOutcome::Merged {
                compared,
                merged,
                skipped,
            }
        }
        Err(e) => {
            warn!("Error fetching branch comparisons for {}: {}", repository_id, e);
            ComparisonOutcome::Failed(e)
        }
    }
}
