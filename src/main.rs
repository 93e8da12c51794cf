use clap::Parser;
use colored::*;
use github_repo_finder::cli::{Cli, Command};
use github_repo_finder::error::Result;
use github_repo_finder::finder::Finder;
use github_repo_finder::github::GitHubClient;
use github_repo_finder::output::{write_page, Controls};
use github_repo_finder::query::SortKey;
use github_repo_finder::server::start_server;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = GitHubClient::new(cli.api_url.clone())?;
    let show_counts = !cli.hide_counts;

    match cli.command {
        Command::Search { language, sort, format } => {
            let finder = Finder::new(client, show_counts);
            let outcome = finder.search(language.as_deref(), sort).await;
            debug!(?outcome, "Search finished");

            let controls = Controls { language, sort, show_counts };
            write_page(&mut std::io::stdout().lock(), &finder.page().await, format, &controls)?;
        }
        Command::Random { language, format } => {
            let finder = Finder::new(client, show_counts);
            let outcome = finder.discover(language.as_deref()).await;
            debug!(?outcome, "Discovery finished");

            let controls = Controls { language, sort: SortKey::Stars, show_counts };
            write_page(&mut std::io::stdout().lock(), &finder.page().await, format, &controls)?;
        }
        Command::Serve { port } => {
            println!("{}", "GitHub Repo Finder".bold().green());
            println!("{}\n", "=".repeat(50).dimmed());
            println!("📡 Serving on http://localhost:{}", port);
            println!("\nPress Ctrl+C to stop the server\n");

            tokio::select! {
                result = start_server(client, port) => result?,
                _ = tokio::signal::ctrl_c() => {
                    println!("\n🛑 Shutting down server...");
                }
            }
        }
    }

    Ok(())
}
