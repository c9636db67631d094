use serde_json::Value;

use crate::formatter::{
    MarkdownContent, array_field, count_field, field, table_cell, text_field, timestamp_field,
};
use crate::types::Login;

fn repositories(tree: &Value) -> Option<&Value> {
    field(tree, "/repositoryOwner/repositories")
}

/// Repository table of an organization. Empty when the organization was not
/// found.
pub fn organization_markdown(tree: &Value, login: &Login) -> MarkdownContent {
    let Some(repositories) = repositories(tree) else {
        return MarkdownContent::default();
    };

    let mut content = String::new();
    content.push_str(&format!("# Organization: {}\n", login));
    content.push_str(&format!(
        "**GitHub Profile:** [{}]({})\n\n",
        login,
        login.profile_url()
    ));
    content.push_str(&format!(
        "**Total Repositories:** {}\n\n",
        count_field(repositories, "/totalCount")
    ));

    let nodes = array_field(repositories, "/nodes");
    if !nodes.is_empty() {
        content.push_str("## Repositories\n\n");
        content.push_str("| Repository Name | Stars | Forks | Created | URL |\n");
        content.push_str("|----------------|-------|-------|---------|-----|\n");
        for repo in nodes {
            let url = text_field(repo, "/repo_url");
            content.push_str(&format!(
                "| [{}]({}) | {} | {} | {} | [{}]({}) |\n",
                table_cell(&text_field(repo, "/name")),
                url,
                count_field(repo, "/stars"),
                count_field(repo, "/forks"),
                timestamp_field(repo, "/created_at"),
                url,
                url
            ));
        }
        content.push('\n');
    }

    MarkdownContent(content)
}

pub fn organization_console(tree: &Value, login: &Login) -> String {
    let mut content = format!("[+] Org: {}\n\n", login);

    let Some(repositories) = repositories(tree) else {
        content.push_str("Error: Organization not found or not accessible\n");
        return content;
    };

    content.push_str(&format!(
        "Total Repositories: {}\n\n",
        count_field(repositories, "/totalCount")
    ));

    for repo in array_field(repositories, "/nodes") {
        content.push_str(&format!(
            "Repository: {} ID: {}\n",
            text_field(repo, "/name"),
            text_field(repo, "/id")
        ));
        content.push_str(&format!(
            "  Stars: {} Forks: {} Commits: {} Branches: {}\n",
            count_field(repo, "/stars"),
            count_field(repo, "/forks"),
            count_field(repo, "/defaultBranchRef/target/history/totalCount"),
            count_field(repo, "/refs/totalCount")
        ));
        content.push_str(&format!(
            "  Created: {} URL: {}\n\n",
            timestamp_field(repo, "/created_at"),
            text_field(repo, "/repo_url")
        ));
    }

    content
}
