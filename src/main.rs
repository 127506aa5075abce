use clap::Parser;
use colored::*;
use random_repo_finder::app::{self, AppState};
use random_repo_finder::cli::Cli;
use random_repo_finder::config::FinderConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();
    let config = FinderConfig::from_cli(&cli)?;

    println!("{}", "GitHub Random Repository Finder".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    if config.is_authenticated() {
        println!("🔑 Using GitHub token for search requests");
    } else {
        println!(
            "{}",
            "No GITHUB_TOKEN set - search requests are unauthenticated and rate limited".yellow()
        );
    }
    println!("🌐 Search API: {}", config.api_base_url);
    println!("📡 Serving on http://{}", config.bind_addr());
    println!("\nPress Ctrl+C to stop the server\n");

    let state = AppState::from_config(config)?;
    app::serve(state).await?;

    println!("✅ Server stopped");
    Ok(())
}
