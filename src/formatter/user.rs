use serde_json::Value;

use crate::formatter::{
    MarkdownContent, NOT_AVAILABLE, array_field, count_field, field, flag_field,
    optional_text_field, preview, table_cell, text_field, timestamp_field,
};
use crate::services::enumerate::CommitterProfile;
use crate::types::Login;

const DESCRIPTION_PREVIEW: usize = 50;
const COMMENT_PREVIEW: usize = 100;
const GIST_DETAIL_ROWS: usize = 20;
const CONSOLE_FOLLOWING_LIMIT: usize = 20;
const CONSOLE_GIST_COMMENT_LIMIT: usize = 5;
const CONSOLE_GIST_FORK_LIMIT: usize = 5;
const CONSOLE_GIST_STARGAZER_LIMIT: usize = 10;
const CONSOLE_FILE_LINE_LIMIT: usize = 100;

fn user(tree: &Value) -> Option<&Value> {
    field(tree, "/user")
}

fn gist_nodes(user: &Value) -> impl Iterator<Item = &Value> {
    array_field(user, "/gists/edges")
        .iter()
        .filter_map(|edge| field(edge, "/node"))
}

fn repository_nodes(user: &Value) -> impl Iterator<Item = &Value> {
    array_field(user, "/repositories/edges")
        .iter()
        .filter_map(|edge| field(edge, "/node"))
}

/// `<gist url>/archive/main.zip`, only for gist.github.com URLs
fn gist_zip_url(gist: &Value) -> Option<String> {
    optional_text_field(gist, "/url")
        .filter(|url| url.contains("/gist.github.com/"))
        .map(|url| format!("{}/archive/main.zip", url))
}

fn login_link(login: &str) -> String {
    if login == NOT_AVAILABLE {
        NOT_AVAILABLE.to_string()
    } else {
        format!("[{}](https://github.com/{})", login, login)
    }
}

fn gist_details_markdown(content: &mut String, gist: &Value) {
    let url = text_field(gist, "/url");
    content.push_str(&format!(
        "### [{}]({}) - Details\n\n",
        text_field(gist, "/name"),
        url
    ));

    content.push_str("| Field | Value |\n");
    content.push_str("|-------|-------|\n");
    content.push_str(&format!("| ID | `{}` |\n", text_field(gist, "/id")));
    content.push_str(&format!("| Name | {} |\n", text_field(gist, "/name")));
    content.push_str(&format!(
        "| Description | {} |\n",
        table_cell(&text_field(gist, "/description"))
    ));
    content.push_str(&format!("| Public | {} |\n", flag_field(gist, "/isPublic")));
    content.push_str(&format!("| Is Fork | {} |\n", flag_field(gist, "/isFork")));
    content.push_str(&format!(
        "| Resource Path | {} |\n",
        text_field(gist, "/resourcePath")
    ));
    content.push_str(&format!("| Created | {} |\n", timestamp_field(gist, "/createdAt")));
    content.push_str(&format!("| Updated | {} |\n", timestamp_field(gist, "/updatedAt")));
    content.push_str(&format!("| Pushed | {} |\n", timestamp_field(gist, "/pushedAt")));
    content.push_str(&format!(
        "| Stargazer Count | {} |\n",
        count_field(gist, "/stargazerCount")
    ));
    content.push_str(&format!(
        "| Viewer Has Starred | {} |\n",
        flag_field(gist, "/viewerHasStarred")
    ));
    if field(gist, "/owner").is_some() {
        content.push_str(&format!(
            "| Owner | {} |\n",
            login_link(&text_field(gist, "/owner/login"))
        ));
    }
    if let Some(zip_url) = gist_zip_url(gist) {
        content.push_str(&format!("| Download ZIP | [{}]({}) |\n", zip_url, zip_url));
    }
    content.push('\n');

    let files = array_field(gist, "/files");
    if !files.is_empty() {
        content.push_str("#### Files\n\n");
        content.push_str(
            "| Name | Encoded Name | Extension | Language | Size | Encoding | Is Image | Truncated |\n",
        );
        content.push_str(
            "|------|--------------|-----------|----------|------|----------|----------|-----------|\n",
        );
        for file in files {
            content.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                table_cell(&text_field(file, "/name")),
                text_field(file, "/encodedName"),
                text_field(file, "/extension"),
                text_field(file, "/language/name"),
                count_field(file, "/size"),
                text_field(file, "/encoding"),
                flag_field(file, "/isImage"),
                flag_field(file, "/isTruncated")
            ));
        }
        content.push('\n');
    }

    let comment_count = count_field(gist, "/comments/totalCount");
    if comment_count > 0 {
        content.push_str(&format!("#### Comments ({})\n\n", comment_count));
        let comments = array_field(gist, "/comments/nodes");
        if !comments.is_empty() {
            content.push_str("| Author | Created | Updated | Preview |\n");
            content.push_str("|--------|--------|---------|---------|\n");
            for comment in comments.iter().take(GIST_DETAIL_ROWS) {
                let author = match optional_text_field(comment, "/author/login") {
                    Some(login) => {
                        format!("[{}]({})", login, text_field(comment, "/author/url"))
                    }
                    None => NOT_AVAILABLE.to_string(),
                };
                content.push_str(&format!(
                    "| {} | {} | {} | {}... |\n",
                    author,
                    timestamp_field(comment, "/createdAt"),
                    timestamp_field(comment, "/updatedAt"),
                    table_cell(&preview(&text_field(comment, "/bodyText"), COMMENT_PREVIEW))
                ));
            }
        }
        content.push('\n');
    }

    let star_count = count_field(gist, "/stargazers/totalCount");
    if star_count > 0 {
        content.push_str(&format!("#### Stargazers ({})\n\n", star_count));
        let stargazers = array_field(gist, "/stargazers/nodes");
        if !stargazers.is_empty() {
            content.push_str("| Login | Name | Email | URL |\n");
            content.push_str("|-------|------|-------|-----|\n");
            for star in stargazers.iter().take(GIST_DETAIL_ROWS) {
                let star_url = text_field(star, "/url");
                let star_link = match optional_text_field(star, "/login") {
                    Some(login) => format!("[{}]({})", login, star_url),
                    None => NOT_AVAILABLE.to_string(),
                };
                content.push_str(&format!(
                    "| {} | {} | {} | [{}]({}) |\n",
                    star_link,
                    table_cell(&text_field(star, "/name")),
                    text_field(star, "/email"),
                    star_url,
                    star_url
                ));
            }
        }
        content.push('\n');
    }

    let fork_count = count_field(gist, "/forks/totalCount");
    if fork_count > 0 {
        content.push_str(&format!("#### Forks ({})\n\n", fork_count));
        let forks = array_field(gist, "/forks/nodes");
        if !forks.is_empty() {
            content.push_str("| Name | Owner | URL |\n");
            content.push_str("|------|-------|-----|\n");
            for fork in forks.iter().take(GIST_DETAIL_ROWS) {
                let fork_url = text_field(fork, "/url");
                content.push_str(&format!(
                    "| {} | {} | [{}]({}) |\n",
                    text_field(fork, "/name"),
                    login_link(&text_field(fork, "/owner/login")),
                    fork_url,
                    fork_url
                ));
            }
        }
        content.push('\n');
    }

    content.push_str("---\n\n");
}

/// User report. Empty when the user was not found.
pub fn user_markdown(tree: &Value, login: &Login) -> MarkdownContent {
    let Some(user) = user(tree) else {
        return MarkdownContent::default();
    };

    let mut content = String::new();
    content.push_str(&format!("# User: {}\n", login));
    content.push_str(&format!(
        "**GitHub Profile:** [{}]({})\n\n",
        login,
        login.profile_url()
    ));

    content.push_str("## User Information\n\n");
    content.push_str("| Field | Value |\n");
    content.push_str("|-------|-------|\n");
    content.push_str(&format!("| Login | {} |\n", text_field(user, "/login")));
    content.push_str(&format!("| Email | {} |\n", text_field(user, "/email")));
    content.push_str(&format!(
        "| Location | {} |\n",
        table_cell(&text_field(user, "/location"))
    ));
    content.push_str(&format!(
        "| Company | {} |\n",
        table_cell(&text_field(user, "/company"))
    ));
    content.push_str(&format!(
        "| Following | {} |\n",
        count_field(user, "/following/totalCount")
    ));
    content.push_str(&format!(
        "| Followers | {} |\n",
        count_field(user, "/followers/totalCount")
    ));
    content.push_str(&format!(
        "| Total Repositories | {} |\n",
        count_field(user, "/repositories/totalCount")
    ));
    content.push_str(&format!(
        "| Total Gists | {} |\n",
        count_field(user, "/gists/totalCount")
    ));
    content.push_str(&format!(
        "| Total Gist Comments | {} |\n\n",
        count_field(user, "/gistComments/totalCount")
    ));

    let following = array_field(user, "/following/nodes");
    if !following.is_empty() {
        content.push_str("### Following Users\n\n");
        content.push_str("| Login | Name | Email | Company | Location |\n");
        content.push_str("|-------|------|-------|---------|----------|\n");
        for followed in following {
            content.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                login_link(&text_field(followed, "/login")),
                table_cell(&text_field(followed, "/name")),
                text_field(followed, "/email"),
                table_cell(&text_field(followed, "/company")),
                table_cell(&text_field(followed, "/location"))
            ));
        }
        content.push('\n');
    }

    let repositories: Vec<&Value> = repository_nodes(user).collect();
    if !repositories.is_empty() {
        content.push_str("## Repositories\n\n");
        content.push_str("| Repository Name | Description | Stars | Forks | Is Fork | URL |\n");
        content.push_str("|----------------|-------------|-------|-------|---------|-----|\n");
        for repo in &repositories {
            let url = text_field(repo, "/url");
            content.push_str(&format!(
                "| [{}]({}) | {} | {} | {} | {} | [{}]({}) |\n",
                text_field(repo, "/name"),
                url,
                table_cell(&preview(&text_field(repo, "/description"), DESCRIPTION_PREVIEW)),
                count_field(repo, "/stargazerCount"),
                count_field(repo, "/forkCount"),
                flag_field(repo, "/isFork"),
                url,
                url
            ));
        }
        content.push('\n');

        content.push_str("### Repository Clone URLs (HTTPS)\n\n");
        for url in repositories
            .iter()
            .filter_map(|repo| optional_text_field(repo, "/url"))
        {
            content.push_str(&format!("- `{}.git`\n", url));
        }
        content.push('\n');
    }

    let gists: Vec<&Value> = gist_nodes(user).collect();
    if !gists.is_empty() {
        content.push_str("## Gists\n\n");
        content.push_str(
            "| ID | Name | Description | Public | Fork | Stars | Created | Updated | Pushed | URL |\n",
        );
        content.push_str(
            "|----|------|-------------|--------|------|-------|---------|---------|--------|-----|\n",
        );
        for gist in &gists {
            let url = text_field(gist, "/url");
            content.push_str(&format!(
                "| `{}` | [{}]({}) | {} | {} | {} | {} | {} | {} | {} | [{}]({}) |\n",
                preview(&text_field(gist, "/id"), 8),
                text_field(gist, "/name"),
                url,
                table_cell(&preview(&text_field(gist, "/description"), DESCRIPTION_PREVIEW)),
                flag_field(gist, "/isPublic"),
                flag_field(gist, "/isFork"),
                count_field(gist, "/stargazerCount"),
                timestamp_field(gist, "/createdAt"),
                timestamp_field(gist, "/updatedAt"),
                timestamp_field(gist, "/pushedAt"),
                url,
                url
            ));
        }
        content.push('\n');

        for gist in &gists {
            gist_details_markdown(&mut content, gist);
        }
    }

    let gist_comments = array_field(user, "/gistComments/nodes");
    if !gist_comments.is_empty() {
        content.push_str("## Gist Comments\n\n");
        content.push_str("| Gist URL | Created | Updated | Preview |\n");
        content.push_str("|----------|--------|---------|---------|\n");
        for comment in gist_comments {
            let gist_url = text_field(comment, "/gist/url");
            content.push_str(&format!(
                "| [{}]({}) | {} | {} | {}... |\n",
                gist_url,
                gist_url,
                timestamp_field(comment, "/createdAt"),
                timestamp_field(comment, "/updatedAt"),
                table_cell(&preview(&text_field(comment, "/body"), COMMENT_PREVIEW))
            ));
        }
        content.push('\n');
    }

    MarkdownContent(content)
}

fn repository_stats(repo: &Value) -> String {
    let mut parts = Vec::new();
    let stars = count_field(repo, "/stargazerCount");
    if stars > 0 {
        parts.push(format!("Stars: {}", stars));
    }
    let forks = count_field(repo, "/forkCount");
    if forks > 0 {
        parts.push(format!("Forks: {}", forks));
    }
    if flag_field(repo, "/isFork") {
        parts.push("Fork".to_string());
    }
    if flag_field(repo, "/isEmpty") {
        parts.push("Empty".to_string());
    }

    if parts.is_empty() {
        "No stats".to_string()
    } else {
        parts.join(" | ")
    }
}

fn gist_details_console(content: &mut String, gist: &Value) {
    content.push_str(&format!("\n[+] Gist: {}\n", text_field(gist, "/name")));
    content.push_str(&format!("  ID: {}\n", text_field(gist, "/id")));
    content.push_str(&format!("  Description: {}\n", text_field(gist, "/description")));
    content.push_str(&format!("  URL: {}\n", text_field(gist, "/url")));
    content.push_str(&format!("  Resource Path: {}\n", text_field(gist, "/resourcePath")));
    content.push_str(&format!("  Public: {}\n", flag_field(gist, "/isPublic")));
    content.push_str(&format!("  Is Fork: {}\n", flag_field(gist, "/isFork")));
    content.push_str(&format!("  Created: {}\n", timestamp_field(gist, "/createdAt")));
    content.push_str(&format!("  Updated: {}\n", timestamp_field(gist, "/updatedAt")));
    content.push_str(&format!("  Pushed: {}\n", timestamp_field(gist, "/pushedAt")));
    content.push_str(&format!(
        "  Stargazer Count: {}\n",
        count_field(gist, "/stargazerCount")
    ));
    content.push_str(&format!(
        "  Viewer Has Starred: {}\n",
        flag_field(gist, "/viewerHasStarred")
    ));
    if field(gist, "/owner").is_some() {
        content.push_str(&format!(
            "  Owner: {} ({})\n",
            text_field(gist, "/owner/login"),
            text_field(gist, "/owner/id")
        ));
    }

    let files = array_field(gist, "/files");
    if !files.is_empty() {
        content.push_str(&format!("  Files ({}):\n", files.len()));
        content.push_str(&format!(
            "    {:<30} {:<12} {:<15} {:<10} {:<10} {:<8} {:<10}\n",
            "Name", "Extension", "Language", "Size", "Encoding", "Image", "Truncated"
        ));
        for file in files {
            let name = optional_text_field(file, "/name")
                .map(str::to_string)
                .unwrap_or_else(|| text_field(file, "/encodedName"));
            content.push_str(&format!(
                "    {:<30} {:<12} {:<15} {:<10} {:<10} {:<8} {:<10}\n",
                preview(&name, 28),
                preview(&text_field(file, "/extension"), 10),
                preview(&text_field(file, "/language/name"), 13),
                count_field(file, "/size"),
                preview(&text_field(file, "/encoding"), 8),
                flag_field(file, "/isImage"),
                flag_field(file, "/isTruncated")
            ));

            let printable = !flag_field(file, "/isImage") && !flag_field(file, "/isTruncated");
            if let Some(text) = optional_text_field(file, "/text").filter(|_| printable) {
                content.push_str("    Content:\n");
                let lines: Vec<&str> = text.split('\n').collect();
                for line in lines.iter().take(CONSOLE_FILE_LINE_LIMIT) {
                    content.push_str(&format!("      {}\n", line));
                }
                if lines.len() > CONSOLE_FILE_LINE_LIMIT {
                    content.push_str(&format!(
                        "      ... ({} more lines)\n",
                        lines.len() - CONSOLE_FILE_LINE_LIMIT
                    ));
                }
                content.push('\n');
            }
        }
    }

    if field(gist, "/comments").is_some() {
        content.push_str(&format!(
            "  Comments: {}\n",
            count_field(gist, "/comments/totalCount")
        ));
        for comment in array_field(gist, "/comments/nodes")
            .iter()
            .take(CONSOLE_GIST_COMMENT_LIMIT)
        {
            content.push_str(&format!(
                "    - {}: {}... ({})\n",
                text_field(comment, "/author/login"),
                preview(&text_field(comment, "/bodyText"), 60),
                timestamp_field(comment, "/createdAt")
            ));
        }
    }

    if field(gist, "/stargazers").is_some() {
        content.push_str(&format!(
            "  Stargazers: {}\n",
            count_field(gist, "/stargazers/totalCount")
        ));
        let logins: Vec<String> = array_field(gist, "/stargazers/nodes")
            .iter()
            .take(CONSOLE_GIST_STARGAZER_LIMIT)
            .map(|star| optional_text_field(star, "/login").unwrap_or("").to_string())
            .collect();
        if !logins.is_empty() {
            content.push_str(&format!("    Top: {}\n", logins.join(", ")));
        }
    }

    if field(gist, "/forks").is_some() {
        content.push_str(&format!("  Forks: {}\n", count_field(gist, "/forks/totalCount")));
        for fork in array_field(gist, "/forks/nodes")
            .iter()
            .take(CONSOLE_GIST_FORK_LIMIT)
        {
            content.push_str(&format!(
                "    - {}/{}: {}\n",
                text_field(fork, "/owner/login"),
                text_field(fork, "/name"),
                text_field(fork, "/url")
            ));
        }
    }

    if let Some(zip_url) = gist_zip_url(gist) {
        content.push_str(&format!("  Download ZIP: {}\n", zip_url));
    }
    content.push_str("---\n");
}

/// Console summary of a user. Gist details are included with `print_gists`.
pub fn user_console(tree: &Value, login: &Login, print_gists: bool) -> String {
    let Some(user) = user(tree) else {
        return "Error: User not found or not accessible\n".to_string();
    };

    let mut content = format!("\n[+] User Enumeration: {}\n", login);
    content.push_str(&format!("Login: {}\n", text_field(user, "/login")));
    content.push_str(&format!("Email: {}\n", text_field(user, "/email")));
    content.push_str(&format!("Location: {}\n", text_field(user, "/location")));
    content.push_str(&format!("Company: {}\n", text_field(user, "/company")));
    content.push_str(&format!(
        "Following: {}\n",
        count_field(user, "/following/totalCount")
    ));
    let following = array_field(user, "/following/nodes");
    if !following.is_empty() {
        content.push_str("  Users being followed:\n");
        for followed in following.iter().take(CONSOLE_FOLLOWING_LIMIT) {
            content.push_str(&format!(
                "    - {} ({})\n",
                text_field(followed, "/login"),
                text_field(followed, "/url")
            ));
        }
    }
    content.push_str(&format!(
        "Followers: {}\n",
        count_field(user, "/followers/totalCount")
    ));
    content.push_str(&format!(
        "Total Repositories: {}\n",
        count_field(user, "/repositories/totalCount")
    ));
    content.push_str(&format!(
        "Total Gists: {}\n",
        count_field(user, "/gists/totalCount")
    ));
    content.push_str(&format!(
        "Total Gist Comments: {}\n",
        count_field(user, "/gistComments/totalCount")
    ));

    content.push_str(&format!(
        "\n[+] Repositories for {}: {}\n",
        login,
        count_field(user, "/repositories/totalCount")
    ));
    for repo in repository_nodes(user) {
        content.push_str(&format!("  {}\n", text_field(repo, "/name")));
        content.push_str(&format!(
            "    Description: {}\n",
            optional_text_field(repo, "/description").unwrap_or("None")
        ));
        content.push_str(&format!("    URL: {}\n", text_field(repo, "/url")));
        if let Some(homepage) = optional_text_field(repo, "/homepageUrl") {
            content.push_str(&format!("    Homepage: {}\n", homepage));
        }
        content.push_str(&format!(
            "    Disk: {} | Wiki: {} | Org: {} | {}\n",
            text_field(repo, "/diskUsage"),
            flag_field(repo, "/hasWikiEnabled"),
            flag_field(repo, "/isInOrganization"),
            repository_stats(repo)
        ));
    }

    content.push_str(&format!(
        "\n[+] Gists from {}: {}\n",
        login,
        count_field(user, "/gists/totalCount")
    ));
    let gists: Vec<&Value> = gist_nodes(user).collect();
    if !gists.is_empty() {
        content.push_str(&format!(
            "\n{:<12} {:<30} {:<8} {:<6} {:<6} {:<20} {:<50}\n",
            "ID", "Name", "Public", "Fork", "Stars", "Created", "URL"
        ));
        content.push_str(&format!("{}\n", "-".repeat(150)));
        for gist in &gists {
            content.push_str(&format!(
                "{:<12} {:<30} {:<8} {:<6} {:<6} {:<20} {:<50}\n",
                preview(&text_field(gist, "/id"), 12),
                preview(&text_field(gist, "/name"), 28),
                flag_field(gist, "/isPublic"),
                flag_field(gist, "/isFork"),
                count_field(gist, "/stargazerCount"),
                preview(&text_field(gist, "/createdAt"), 18),
                preview(&text_field(gist, "/url"), 48)
            ));
        }

        if print_gists {
            for gist in &gists {
                gist_details_console(&mut content, gist);
            }
        }
    }

    content.push_str(&format!(
        "\n[+] Gist Comments from {}: {}\n\n",
        login,
        count_field(user, "/gistComments/totalCount")
    ));
    for comment in array_field(user, "/gistComments/nodes") {
        content.push_str(&format!(
            "Gist Comment: {}\n",
            text_field(comment, "/gist/url")
        ));
        content.push_str(&format!("Created: {}\n", timestamp_field(comment, "/createdAt")));
        content.push_str(&format!("Updated: {}\n", timestamp_field(comment, "/updatedAt")));
        content.push_str(&format!(
            "Body: {}...\n---\n",
            preview(&text_field(comment, "/body"), 200)
        ));
    }

    content.push_str(&format!("\n[+] END {}\n", login));
    content
}

/// Console section listing the looked-up profile of every ranked committer
pub fn committer_profiles_console(profiles: &[CommitterProfile], print_gists: bool) -> String {
    let separator = "=".repeat(80);
    let mut content = format!("\nDetailed Committer Information\n{}\n\n", separator);

    for (rank, profile) in profiles.iter().enumerate() {
        let rank = rank + 1;
        match profile {
            CommitterProfile::Found { login, tree } => {
                content.push_str(&format!("Committer #{}: {}\n{}\n", rank, login, separator));
                content.push_str(&user_console(tree, login, print_gists));
            }
            CommitterProfile::Failed { login, error } => {
                content.push_str(&format!("Committer #{}: {}\n{}\n", rank, login, separator));
                content.push_str(&format!("Error querying user {}: {}\n\n", login, error));
            }
            CommitterProfile::EmailOnly(identity) => {
                content.push_str(&format!(
                    "Committer #{}: {}\n{}\n",
                    rank, identity, separator
                ));
                content.push_str(
                    "Note: No GitHub user account found for this committer (email-based commit)\n\n",
                );
            }
        }
    }

    content
}
