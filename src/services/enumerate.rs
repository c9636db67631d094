//! Enumeration of organizations, repositories and users
//!
//! Each entity kind runs one primary query. Repositories additionally go
//! through branch comparison (forks only), commit pagination and committer
//! aggregation. Only a failing primary query is returned as an error.

use serde_json::Value;
use tracing::{info, warn};

use crate::github::GitHubApiError;
use crate::github::client::GraphQLExecutor;
use crate::github::graphql::graphql_types::{GraphQLPayload, GraphQLQuery};
use crate::github::graphql::organization::organization_query;
use crate::github::graphql::repository::{
    RepositoryQueryLimitSize, RepositoryVariable, repository_query,
};
use crate::github::graphql::user::{LoginVariable, UserQueryLimitSize, user_query};
use crate::services::comparison::{ComparisonOutcome, compare_fork_branches};
use crate::services::pagination::{
    PaginatedHistory, first_history_page, paginate_commit_history,
};
use crate::types::{
    CommitterIdentity, Login, QuerySpec, Ranking, RepositoryId, RepositoryOptions,
    aggregate_committers,
};

#[derive(Debug, Clone)]
pub struct OrganizationReport {
    pub login: Login,
    pub tree: Value,
}

#[derive(Debug, Clone)]
pub struct UserReport {
    pub login: Login,
    pub tree: Value,
}

#[derive(Debug, Clone)]
pub struct RepositoryReport {
    pub repository_id: RepositoryId,
    pub options: RepositoryOptions,
    /// Primary result with `compare` merged into the branch nodes
    pub tree: Value,
    pub comparison: ComparisonOutcome,
    /// `None` when the repository has no HEAD history (empty repositories)
    pub history: Option<PaginatedHistory>,
    pub ranking: Ranking,
}

#[derive(Debug, Clone)]
pub enum Report {
    Organization(OrganizationReport),
    Repository(RepositoryReport),
    User(UserReport),
}

impl Report {
    pub fn tree(&self) -> &Value {
        match self {
            Report::Organization(report) => &report.tree,
            Report::Repository(report) => &report.tree,
            Report::User(report) => &report.tree,
        }
    }
}

/// Profile lookup result of one ranked committer
#[derive(Debug, Clone)]
pub enum CommitterProfile {
    Found { login: Login, tree: Value },
    Failed { login: Login, error: GitHubApiError },
    /// The committer has no GitHub account linked to its commits
    EmailOnly(CommitterIdentity),
}

/// Runs the enumeration described by `spec`
pub async fn enumerate<E: GraphQLExecutor>(
    executor: &E,
    spec: &QuerySpec,
) -> Result<Report, GitHubApiError> {
    match spec {
        QuerySpec::Organization { login } => enumerate_organization(executor, login)
            .await
            .map(Report::Organization),
        QuerySpec::Repository {
            repository_id,
            options,
        } => enumerate_repository(executor, repository_id, *options)
            .await
            .map(Report::Repository),
        QuerySpec::User { login } => enumerate_user(executor, login).await.map(Report::User),
    }
}

pub async fn enumerate_organization<E: GraphQLExecutor>(
    executor: &E,
    login: &Login,
) -> Result<OrganizationReport, GitHubApiError> {
    let payload = GraphQLPayload {
        query: GraphQLQuery(organization_query()),
        variables: Some(LoginVariable {
            login: login.clone(),
        }),
    };
    let tree: Value = executor.execute_graphql("organization", payload).await?;

    Ok(OrganizationReport {
        login: login.clone(),
        tree,
    })
}

pub async fn enumerate_user<E: GraphQLExecutor>(
    executor: &E,
    login: &Login,
) -> Result<UserReport, GitHubApiError> {
    let payload = GraphQLPayload {
        query: GraphQLQuery(user_query(UserQueryLimitSize::default())),
        variables: Some(LoginVariable {
            login: login.clone(),
        }),
    };
    let tree: Value = executor.execute_graphql("user", payload).await?;

    Ok(UserReport {
        login: login.clone(),
        tree,
    })
}

pub async fn enumerate_repository<E: GraphQLExecutor>(
    executor: &E,
    repository_id: &RepositoryId,
    options: RepositoryOptions,
) -> Result<RepositoryReport, GitHubApiError> {
    let payload = GraphQLPayload {
        query: GraphQLQuery(repository_query(
            RepositoryQueryLimitSize::default(),
            options.include_stargazers,
        )),
        variables: Some(RepositoryVariable {
            owner: repository_id.owner().clone(),
            repository_name: repository_id.repo_name().clone(),
        }),
    };
    let mut tree: Value = executor.execute_graphql("repository", payload).await?;

    if tree.get("repository").is_none_or(Value::is_null) {
        return Err(GitHubApiError::MissingData(format!(
            "repository {}",
            repository_id
        )));
    }

    let comparison = compare_fork_branches(executor, repository_id, &mut tree).await;

    let history = match first_history_page(&tree) {
        Some(first_page) => {
            let executor = options.paginate_commits.then_some(executor);
            Some(paginate_commit_history(first_page, repository_id, executor).await)
        }
        None => {
            info!("{} has no commit history", repository_id);
            None
        }
    };

    let ranking = history
        .as_ref()
        .map(|history| aggregate_committers(history.records.iter().cloned()))
        .unwrap_or_default();

    Ok(RepositoryReport {
        repository_id: repository_id.clone(),
        options,
        tree,
        comparison,
        history,
        ranking,
    })
}

/// Looks up the user profile of every ranked committer, in ranking order.
///
/// Lookups run one after another; a failed lookup is kept and the rest still
/// run.
pub async fn fetch_committer_profiles<E: GraphQLExecutor>(
    executor: &E,
    ranking: &Ranking,
) -> Vec<CommitterProfile> {
    let mut profiles = Vec::with_capacity(ranking.len());

    for ranked in ranking {
        let login = match ranked.identity.login() {
            Some(login) => login.clone(),
            None => {
                profiles.push(CommitterProfile::EmailOnly(ranked.identity.clone()));
                continue;
            }
        };

        match enumerate_user(executor, &login).await {
            Ok(report) => profiles.push(CommitterProfile::Found {
                login,
                tree: report.tree,
            }),
            Err(error) => {
                warn!("Error fetching details for user {}: {}", login, error);
                profiles.push(CommitterProfile::Failed { login, error });
            }
        }
    }

    profiles
}
