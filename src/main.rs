use anyhow::Result;
use clap::Parser;
use relstat::config::Config;
use relstat::github::{GitHub, GitHubRepo};
use relstat::{report, tracker};
use std::path::PathBuf;

/// relstat - GitHub release download statistics
///
/// Track per-asset download counts for a repository's releases and render
/// summary charts from the collected history.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for
/// authentication. This is useful for avoiding rate limits.
///
/// Examples:
///   relstat track owner/repo --prefix v1.0.0   # Record today's counts
///   relstat report                             # Render charts and summary
#[derive(Parser, Debug)]
#[command(author, version = env!("RELSTAT_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for history files and rendered charts (also via RELSTAT_DATA_DIR)
    #[arg(
        long = "data-dir",
        short = 'd',
        env = "RELSTAT_DATA_DIR",
        value_name = "PATH",
        global = true
    )]
    pub data_dir: Option<PathBuf>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch release download counts and append them to the history
    Track(TrackArgs),

    /// Render charts and a summary from the collected history
    Report(ReportArgs),
}

#[derive(clap::Args, Debug)]
pub struct TrackArgs {
    /// The GitHub repository in the format "owner/repo"
    #[arg(value_name = "OWNER/REPO")]
    pub repo: String,

    /// Only track releases whose tag starts with this prefix (e.g. "v1.0.0")
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Track(args) => {
            let repo: GitHubRepo = args.repo.parse()?;
            let config = Config::new(repo, args.prefix, cli.data_dir, cli.api_url)?;
            let github = GitHub::new(config.client.clone(), Some(config.api_url.clone()));
            tracker::track(&github, &config).await?;
        }
        Commands::Report(_args) => {
            let data_dir = cli.data_dir.unwrap_or_else(|| PathBuf::from("."));
            report::run_report(&data_dir)?;
        }
    }
    Ok(())
}
