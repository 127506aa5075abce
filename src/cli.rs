use crate::config::DEFAULT_API_BASE_URL;
use clap::Parser;

#[derive(Parser)]
#[command(name = "random-repo-finder")]
#[command(about = "Random Repository Finder - Discover a random GitHub repository by language and stars")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub access token used for search requests (unauthenticated if unset)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,
}
