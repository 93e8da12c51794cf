use clap::{Parser, Subcommand};

use crate::github::API_BASE_URL;
use crate::output::OutputFormat;
use crate::query::SortKey;

#[derive(Parser)]
#[command(name = "github-repo-finder")]
#[command(about = "GitHub Repo Finder - Search repositories or discover random recent ones")]
#[command(version)]
pub struct Cli {
    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL, global = true)]
    pub api_url: String,

    /// Hide star and fork counts on result cards
    #[arg(long, global = true)]
    pub hide_counts: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search repositories with more than 10 stars
    Search {
        /// Only repositories written in this language
        #[arg(short, long)]
        language: Option<String>,

        /// Sort order (always descending)
        #[arg(short, long, value_enum, default_value_t = SortKey::Stars)]
        sort: SortKey,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the most starred repositories created after a random date in the last year
    Random {
        /// Only repositories written in this language
        #[arg(short, long)]
        language: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Serve the finder page over HTTP
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
}
