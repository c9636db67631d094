use serde_json::Value;

use crate::formatter::{
    MarkdownContent, array_field, count_field, field, flag_field, optional_text_field, preview,
    table_cell, text_field,
};
use crate::services::comparison::{ComparisonOutcome, default_branch, is_fork};
use crate::services::enumerate::RepositoryReport;
use crate::types::{Branch, RankedCommitter, Ranking, RepositoryId};

/// Committers listed in the Markdown report
const MARKDOWN_COMMITTER_LIMIT: usize = 10;
const PULL_REQUEST_BODY_PREVIEW: usize = 200;

/// A fork branch the comparison reported commits for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AheadBranch {
    pub branch: Branch,
    pub ahead_by: u64,
    pub behind_by: u64,
}

/// Branches of a fork with `aheadBy > 0`, most commits ahead first.
/// Branches without comparison data are left out.
pub fn branches_ahead(tree: &Value) -> Vec<AheadBranch> {
    if !is_fork(tree) {
        return Vec::new();
    }
    let base = default_branch(tree);

    let mut branches: Vec<AheadBranch> = array_field(tree, "/repository/refs/nodes")
        .iter()
        .filter_map(|node| {
            let name = optional_text_field(node, "/name")?;
            if name == base.as_str() {
                return None;
            }
            let compare = field(node, "/compare")?;
            Some(AheadBranch {
                branch: Branch::from(name),
                ahead_by: count_field(compare, "/aheadBy"),
                behind_by: count_field(compare, "/behindBy"),
            })
        })
        .filter(|branch| branch.ahead_by > 0)
        .collect();

    branches.sort_by(|a, b| b.ahead_by.cmp(&a.ahead_by));
    branches
}

fn committer_markdown_cell(ranked: &RankedCommitter) -> String {
    let email = if ranked.stat.email.is_empty() {
        String::new()
    } else {
        format!(" ({})", ranked.stat.email)
    };
    match &ranked.stat.login {
        Some(login) => format!("[{}]({}){}", login, login.profile_url(), email),
        None => format!("{}{}", table_cell(&ranked.identity.to_string()), email),
    }
}

fn commit_statistics_markdown(content: &mut String, tree: &Value, report: &RepositoryReport) {
    let total_commits = count_field(tree, "/repository/defaultBranchRef/target/history/totalCount");
    let fetched = report
        .history
        .as_ref()
        .map(|history| history.records.len())
        .unwrap_or(0);

    content.push_str("## Commit Statistics\n\n");
    content.push_str(&format!(
        "| Total Commits | Total Committers (from {} fetched commits) |\n",
        fetched
    ));
    content.push_str("|---------------|------------------------------------------|\n");
    content.push_str(&format!(
        "| {} | {} |\n\n",
        total_commits,
        report.ranking.len()
    ));

    if report.ranking.is_empty() {
        return;
    }

    content.push_str("### Committers (ranked by commit count)\n\n");
    content.push_str("| Rank | Committer | Commits |\n");
    content.push_str("|------|-----------|---------|\n");
    for (rank, ranked) in report
        .ranking
        .top(MARKDOWN_COMMITTER_LIMIT)
        .iter()
        .enumerate()
    {
        content.push_str(&format!(
            "| {} | {} | {} |\n",
            rank + 1,
            committer_markdown_cell(ranked),
            ranked.stat.count
        ));
    }
    content.push('\n');
}

fn branch_analysis_markdown(content: &mut String, tree: &Value, repository_id: &RepositoryId) {
    content.push_str("## Branch Information\n\n");
    content.push_str(&format!(
        "**Total Branches:** [{}]({})\n\n",
        count_field(tree, "/repository/refs/totalCount"),
        repository_id.branches_url()
    ));

    let ahead = branches_ahead(tree);
    if ahead.is_empty() {
        return;
    }

    let base = default_branch(tree);
    content.push_str(&format!(
        "### Branch Analysis - Branches ahead of \"{}\"\n\n",
        base
    ));
    content.push_str("| Rank | Branch | Commits Ahead | Commits Behind |\n");
    content.push_str("|------|--------|---------------|----------------|\n");
    for (rank, branch) in ahead.iter().enumerate() {
        let behind = if branch.behind_by > 0 {
            branch.behind_by.to_string()
        } else {
            "-".to_string()
        };
        content.push_str(&format!(
            "| {} | [{}]({}) ([compare]({})) | {} | {} |\n",
            rank + 1,
            branch.branch,
            repository_id.tree_url(&branch.branch),
            repository_id.compare_url(&base, &branch.branch),
            branch.ahead_by,
            behind
        ));
    }
    content.push('\n');
}

/// Repository report. Empty when the tree carries no repository.
pub fn repository_markdown(report: &RepositoryReport) -> MarkdownContent {
    let tree = &report.tree;
    let Some(repo) = field(tree, "/repository") else {
        return MarkdownContent::default();
    };
    let repository_id = &report.repository_id;
    let owner = repository_id.owner();

    let mut content = String::new();
    content.push_str(&format!("# Repository: {}\n", repository_id.repo_name()));
    content.push_str(&format!(
        "**Owner:** [{}](https://github.com/{})\n\n",
        owner, owner
    ));

    content.push_str("## Repository Information\n\n");
    content.push_str("| Field | Value |\n");
    content.push_str("|-------|-------|\n");
    let url = text_field(repo, "/url");
    let rows: Vec<(&str, String)> = vec![
        ("Name (with Owner)", text_field(repo, "/nameWithOwner")),
        ("ID", format!("`{}`", text_field(repo, "/id"))),
        ("Description", table_cell(&text_field(repo, "/description"))),
        ("URL", format!("[{}]({})", url, url)),
        ("Homepage", text_field(repo, "/homepageUrl")),
        ("Mirror URL", text_field(repo, "/mirrorUrl")),
        (
            "Projects Count",
            count_field(repo, "/projectsV2/totalCount").to_string(),
        ),
        ("Disk Usage", text_field(repo, "/diskUsage")),
        ("Has Wiki", flag_field(repo, "/hasWikiEnabled").to_string()),
        ("Is in Org", flag_field(repo, "/isInOrganization").to_string()),
        ("Is Empty", flag_field(repo, "/isEmpty").to_string()),
        ("Is Mirror", flag_field(repo, "/isMirror").to_string()),
        ("Is Fork", flag_field(repo, "/isFork").to_string()),
        (
            "Has Projects Enabled",
            flag_field(repo, "/hasProjectsEnabled").to_string(),
        ),
        (
            "Has Issues Enabled",
            flag_field(repo, "/hasIssuesEnabled").to_string(),
        ),
    ];
    for (name, value) in rows {
        content.push_str(&format!("| {} | {} |\n", name, value));
    }
    if report.options.include_stargazers {
        content.push_str(&format!(
            "| Total Stargazers | {} |\n",
            count_field(repo, "/stargazerCount")
        ));
    }
    let zip_url = repository_id.archive_url(&default_branch(tree));
    content.push_str(&format!("| Download ZIP | [{}]({}) |\n\n", zip_url, zip_url));

    commit_statistics_markdown(&mut content, tree, report);
    branch_analysis_markdown(&mut content, tree, repository_id);

    MarkdownContent(content)
}

fn ranking_console(content: &mut String, ranking: &Ranking) {
    content.push_str(&format!(
        "  Total Committers (from fetched commits): {}\n",
        ranking.len()
    ));
    if ranking.is_empty() {
        return;
    }

    content.push_str("\n  Committers (ranked by commit count):\n");
    for (rank, ranked) in ranking.iter().enumerate() {
        let email = match (&ranked.stat.login, ranked.stat.email.is_empty()) {
            // name <email> identities already carry the address
            (None, _) | (_, true) => String::new(),
            (Some(_), false) => format!(" <{}>", ranked.stat.email),
        };
        content.push_str(&format!(
            "    {}. {}{}: {} commits\n",
            rank + 1,
            ranked.identity,
            email,
            ranked.stat.count
        ));
    }
}

/// Console summary of a repository enumeration
pub fn repository_console(report: &RepositoryReport) -> String {
    let tree = &report.tree;
    let repository_id = &report.repository_id;

    let mut content = format!(
        "[+] Repository: {}\n  Owner: {}\n\n",
        repository_id.repo_name(),
        repository_id.owner()
    );

    let Some(repo) = field(tree, "/repository") else {
        content.push_str("Error: Repository not found or not accessible\n");
        return content;
    };

    let homepage = optional_text_field(repo, "/homepageUrl").unwrap_or("None");
    let mirror_url = optional_text_field(repo, "/mirrorUrl").unwrap_or("None");
    content.push_str(&format!(
        "  Name (with Owner): {} | ID: {}\n",
        text_field(repo, "/nameWithOwner"),
        text_field(repo, "/id")
    ));
    content.push_str(&format!(
        "  Description: {}\n",
        text_field(repo, "/description")
    ));
    content.push_str(&format!("  URL: {}\n", text_field(repo, "/url")));
    content.push_str(&format!(
        "  Homepage: {} | Mirror URL: {}\n",
        homepage, mirror_url
    ));
    content.push_str(&format!(
        "  Projects Count: {} | Disk Usage: {} | Has Wiki: {} | Is in Org: {}\n",
        count_field(repo, "/projectsV2/totalCount"),
        text_field(repo, "/diskUsage"),
        flag_field(repo, "/hasWikiEnabled"),
        flag_field(repo, "/isInOrganization")
    ));
    content.push_str(&format!(
        "  Is Empty: {} | Is Mirror: {} | Is Fork: {}\n",
        flag_field(repo, "/isEmpty"),
        flag_field(repo, "/isMirror"),
        flag_field(repo, "/isFork")
    ));
    content.push_str(&format!(
        "  Has Projects Enabled: {} | Has Issues Enabled: {}\n",
        flag_field(repo, "/hasProjectsEnabled"),
        flag_field(repo, "/hasIssuesEnabled")
    ));

    if report.options.include_stargazers {
        content.push_str(&format!(
            "\n  Total Stargazers: {}\n\n",
            count_field(repo, "/stargazerCount")
        ));
        let stargazers = array_field(repo, "/stargazers/nodes");
        if !stargazers.is_empty() {
            content.push_str("  Stargazers:\n");
            for stargazer in stargazers {
                content.push_str(&format!(
                    "    Login: {} Name: {}\n",
                    text_field(stargazer, "/login"),
                    text_field(stargazer, "/name")
                ));
                content.push_str(&format!(
                    "    Email: {} URL: {}\n\n",
                    optional_text_field(stargazer, "/email").unwrap_or(""),
                    text_field(stargazer, "/url")
                ));
            }
        }
    }

    content.push_str(&format!(
        "\n  [*] Pull Requests: {}\n\n",
        count_field(repo, "/pullRequests/totalCount")
    ));
    for pr in array_field(repo, "/pullRequests/nodes") {
        content.push_str(&format!("  [+] PR #{}\n", text_field(pr, "/number")));
        content.push_str(&format!("    Permalink: {}\n", text_field(pr, "/permalink")));
        content.push_str(&format!("    Author: {}\n", text_field(pr, "/author/login")));
        content.push_str(&format!(
            "    Body: {}...\n    ---\n\n",
            preview(&text_field(pr, "/bodyText"), PULL_REQUEST_BODY_PREVIEW)
        ));
    }

    content.push_str("\n  [+] Commit Statistics\n");
    content.push_str(&format!(
        "  Total Commits: {}\n",
        count_field(repo, "/defaultBranchRef/target/history/totalCount")
    ));
    if let Some(failure) = report
        .history
        .as_ref()
        .and_then(|history| history.failure.as_ref())
    {
        content.push_str(&format!("  [Warning] {}\n", failure));
    }
    ranking_console(&mut content, &report.ranking);

    content.push_str("\n  [+] Branch Information\n");
    content.push_str(&format!(
        "  Total Branches: {}\n",
        count_field(repo, "/refs/totalCount")
    ));
    if let ComparisonOutcome::Failed(error) = &report.comparison {
        content.push_str(&format!("  [Warning] Branch comparison unavailable: {}\n", error));
    }

    let ahead = branches_ahead(tree);
    if !ahead.is_empty() {
        let base = default_branch(tree);
        content.push_str(&format!(
            "\n  [*] Fork Analysis - Branches ahead of \"{}\":\n",
            base
        ));
        content.push_str(&format!(
            "  Branches AHEAD of {} (ranked by commits ahead):\n",
            base
        ));
        for (rank, branch) in ahead.iter().enumerate() {
            let behind = if branch.behind_by > 0 {
                format!(" ({} commits behind)", branch.behind_by)
            } else {
                String::new()
            };
            content.push_str(&format!(
                "    {}. {}: {} commits ahead{}\n",
                rank + 1,
                branch.branch,
                branch.ahead_by,
                behind
            ));
        }
    }

    content
}
