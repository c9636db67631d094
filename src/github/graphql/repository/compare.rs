//! Aliased multi-branch comparison query
//!
//! One `ref(...) { compare(...) }` selection per branch, each under a synthetic
//! alias, so every branch of a fork is compared against the default branch in a
//! single round trip. The [`AliasMap`] built alongside the query is the only way
//! to map the response back to branch names.

use std::sync::LazyLock;

use regex::Regex;

use crate::github::graphql::graphql_string_literal;
use crate::types::Branch;

/// Upper bound on comparisons in one query. Branches past this many candidates
/// are not compared and carry no `compare` entry afterwards.
pub const MAX_BRANCH_COMPARISONS: usize = 50;

const ALIAS_PREFIX: &str = "ref_";

/// Anything outside the GraphQL name alphabet `[_0-9A-Za-z]`
static DISALLOWED_ALIAS_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^_0-9A-Za-z]").expect("Failed to compile alias regex"));

/// Replaces every character outside `[_0-9A-Za-z]` (hyphens, periods, ...) with `_`.
pub fn sanitize_alias(raw: &str) -> String {
    DISALLOWED_ALIAS_CHARS.replace_all(raw, "_").into_owned()
}

/// Alias of the candidate at zero-based `index`
pub fn comparison_alias(index: usize) -> String {
    sanitize_alias(&format!("{}{}", ALIAS_PREFIX, index))
}

/// Alias tokens in emission order, each paired with the branch it stands for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    entries: Vec<(String, Branch)>,
}

impl AliasMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn branch_for(&self, alias: &str) -> Option<&Branch> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == alias)
            .map(|(_, branch)| branch)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(alias, _)| alias.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Branch)> {
        self.entries
            .iter()
            .map(|(alias, branch)| (alias.as_str(), branch))
    }

    fn push(&mut self, alias: String, branch: Branch) {
        self.entries.push((alias, branch));
    }
}

/// Query text plus the alias map needed to read its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchComparisonQuery {
    pub query: String,
    pub aliases: AliasMap,
}

/// Builds the comparison query for `candidates` against `base`.
///
/// Returns `None` for an empty candidate list: there is nothing to send.
/// Only the first [`MAX_BRANCH_COMPARISONS`] candidates are used.
pub fn build_branch_comparison_query(
    base: &Branch,
    candidates: &[Branch],
) -> Option<BranchComparisonQuery> {
    if candidates.is_empty() {
        return None;
    }

    let base_ref = graphql_string_literal(&base.qualified_name());
    let mut aliases = AliasMap::default();
    let mut selections = Vec::with_capacity(candidates.len().min(MAX_BRANCH_COMPARISONS));

    for (index, branch) in candidates.iter().take(MAX_BRANCH_COMPARISONS).enumerate() {
        let alias = comparison_alias(index);
        selections.push(format!(
            "{}: ref(qualifiedName: {}) {{ compare(headRef: {}) {{ aheadBy behindBy }} }}",
            alias,
            graphql_string_literal(&branch.qualified_name()),
            base_ref,
        ));
        aliases.push(alias, branch.clone());
    }

    let query = format!(
        r#"
             query($owner: String!, $repository_name: String!) {{
                 repository(owner: $owner, name: $repository_name) {{
                     {}
                 }}
             }}"#,
        selections.join("\n                     ")
    );

    Some(BranchComparisonQuery { query, aliases })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_alias() {
        assert_eq!(sanitize_alias("ref_0"), "ref_0");
        assert_eq!(sanitize_alias("ref-1.2"), "ref_1_2");
        assert_eq!(sanitize_alias("feature/x y"), "feature_x_y");
    }

    #[test]
    fn test_comparison_alias_is_index_based() {
        assert_eq!(comparison_alias(0), "ref_0");
        assert_eq!(comparison_alias(49), "ref_49");
    }
}
