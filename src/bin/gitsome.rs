use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use gitsome::formatter::{
    MarkdownContent, committer_profiles_console, organization_console, organization_markdown,
    repository_console, repository_markdown, user_console, user_markdown,
};
use gitsome::github::{GitHubApiError, GitHubClient};
use gitsome::services::{
    DEFAULT_OUTPUT_DIR, OutputWriter, Report, enumerate, fetch_committer_profiles,
};
use gitsome::types::{EntityKind, Login, QuerySpec, RepositoryId, RepositoryOptions};

#[derive(Parser)]
#[command(name = "gitsome")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "GitHub info enumerator - query organizations, repositories and users via the GraphQL API")]
#[command(after_help = "Examples:\n  gitsome org rust-lang\n  gitsome repo facebook graphql\n  gitsome user octocat")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// GitHub personal access token (can also be set via GITHUB_TOKEN or GITSOME_GITHUB_TOKEN environment variables)
    #[arg(long, global = true)]
    github_token: Option<String>,
    /// Request timeout in seconds for GitHub API calls (no timeout when omitted)
    #[arg(long, global = true)]
    request_timeout: Option<u64>,
    /// Directory receiving the JSON snapshots and Markdown reports
    #[arg(long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// Do not save JSON and Markdown output to files
    #[arg(long, global = true)]
    no_save: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Query organization repositories
    Org {
        /// Organization login
        org_name: String,
    },
    /// Query repository details, commit statistics and fork branch analysis
    Repo {
        /// Repository owner
        owner: String,
        /// Repository name
        repo_name: String,
        /// Include the stargazer count and the latest stargazers
        #[arg(long)]
        stargazers: bool,
        /// Look up the user profile of every committer
        #[arg(long)]
        committers: bool,
        /// Print detailed gist information of looked-up committers
        #[arg(long)]
        print_gists: bool,
        /// Only use the first page of the commit history
        #[arg(long)]
        no_commit_pagination: bool,
    },
    /// Query user details
    User {
        /// GitHub login
        username: String,
        /// Print detailed gist information
        #[arg(long)]
        print_gists: bool,
    },
}

struct RunOptions {
    committers: bool,
    print_gists: bool,
}

impl Commands {
    fn into_query(self) -> (QuerySpec, RunOptions) {
        match self {
            Commands::Org { org_name } => (
                QuerySpec::Organization {
                    login: Login::from(org_name),
                },
                RunOptions {
                    committers: false,
                    print_gists: false,
                },
            ),
            Commands::Repo {
                owner,
                repo_name,
                stargazers,
                committers,
                print_gists,
                no_commit_pagination,
            } => (
                QuerySpec::Repository {
                    repository_id: RepositoryId::new(owner, repo_name),
                    options: RepositoryOptions {
                        include_stargazers: stargazers,
                        paginate_commits: !no_commit_pagination,
                    },
                },
                RunOptions {
                    committers,
                    print_gists,
                },
            ),
            Commands::User {
                username,
                print_gists,
            } => (
                QuerySpec::User {
                    login: Login::from(username),
                },
                RunOptions {
                    committers: false,
                    print_gists,
                },
            ),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Must happen before any TLS connection is built
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gitsome=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        report_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let github_token = cli
        .github_token
        .or_else(|| env::var("GITHUB_TOKEN").ok())
        .or_else(|| env::var("GITSOME_GITHUB_TOKEN").ok())
        .filter(|token| !token.is_empty())
        .context("Must provide a GitHub token via --github-token or GITHUB_TOKEN in environment")?;

    let client = GitHubClient::new(
        Some(github_token),
        cli.request_timeout.map(Duration::from_secs),
    )
    .context("Failed to create GitHub client")?;

    let (spec, run_options) = cli.command.into_query();
    print_module_header(spec.kind());

    let report = enumerate(&client, &spec)
        .await
        .with_context(|| format!("Failed to enumerate {}", spec.snapshot_name()))?;

    let (markdown, console) = render(&report, run_options.print_gists);

    if !cli.no_save {
        let writer = OutputWriter::new(cli.output_dir.clone());
        let saved = writer
            .save(&spec.snapshot_name(), report.tree(), &markdown)
            .context("Failed to save output")?;
        println!("[*] Saved JSON output to: {}", saved.json_path.display());
        if let Some(markdown_path) = saved.markdown_path {
            println!("[*] Saved Markdown report to: {}", markdown_path.display());
        }
        println!();
    }

    print!("{}", console);

    if let Report::Repository(repository_report) = &report {
        if run_options.committers && !repository_report.ranking.is_empty() {
            let profiles = fetch_committer_profiles(&client, &repository_report.ranking).await;
            print!(
                "{}",
                committer_profiles_console(&profiles, run_options.print_gists)
            );
        }
    }

    Ok(())
}

fn render(report: &Report, print_gists: bool) -> (MarkdownContent, String) {
    match report {
        Report::Organization(org) => (
            organization_markdown(&org.tree, &org.login),
            organization_console(&org.tree, &org.login),
        ),
        Report::Repository(repo) => (repository_markdown(repo), repository_console(repo)),
        Report::User(user) => (
            user_markdown(&user.tree, &user.login),
            user_console(&user.tree, &user.login, print_gists),
        ),
    }
}

fn print_module_header(kind: EntityKind) {
    match kind {
        EntityKind::Org => println!("Organization Enumeration Module\n"),
        EntityKind::Repo => println!("Repository Enumeration Module\n"),
        EntityKind::User => {
            println!(
                "gitsome - GitHub info enumerator - {}\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            println!("User Enumeration Module");
        }
    }
}

fn report_error(error: &anyhow::Error) {
    eprintln!("Error: {:#}", error);

    let api_error = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<GitHubApiError>());

    match api_error {
        Some(e) if e.is_unauthorized() => {
            eprintln!("Authentication failed. Check your GITHUB_TOKEN.");
        }
        Some(e) if e.is_forbidden() => {
            eprintln!("Rate limit exceeded or forbidden. Check your token permissions.");
        }
        Some(GitHubApiError::GraphQL { messages }) => {
            eprintln!("GraphQL errors:");
            for message in messages {
                eprintln!("  {}", message);
            }
        }
        _ => {}
    }
}
