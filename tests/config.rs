use clap::Parser;
use random_repo_finder::cli::Cli;
use random_repo_finder::config::{parse_base_url, FinderConfig};
use random_repo_finder::error::FinderError;

#[test]
fn test_parse_base_url_adds_trailing_slash() {
    let url = parse_base_url("https://ghe.example.com/api/v3").unwrap();
    assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/");
    assert_eq!(
        url.join("search/repositories").unwrap().as_str(),
        "https://ghe.example.com/api/v3/search/repositories"
    );

    let url = parse_base_url("https://api.github.com").unwrap();
    assert_eq!(url.as_str(), "https://api.github.com/");
}

#[test]
fn test_parse_base_url_rejects_garbage() {
    assert!(matches!(parse_base_url("not a url"), Err(FinderError::Url(_))));
    assert!(matches!(parse_base_url("mailto:someone@example.com"), Err(FinderError::Config(_))));
}

#[test]
fn test_config_from_cli_flags() {
    let cli = Cli::try_parse_from([
        "random-repo-finder",
        "--github-token",
        "  abc123  ",
        "--api-base-url",
        "http://localhost:8080",
        "--host",
        "127.0.0.1",
        "--port",
        "8081",
    ])
    .unwrap();

    let config = FinderConfig::from_cli(&cli).unwrap();

    assert_eq!(config.github_token.as_deref(), Some("abc123"));
    assert!(config.is_authenticated());
    assert_eq!(config.api_base_url.as_str(), "http://localhost:8080/");
    assert_eq!(config.bind_addr(), "127.0.0.1:8081");
}

#[test]
fn test_config_debug_redacts_token() {
    let config = FinderConfig::new(
        parse_base_url("https://api.github.com/").unwrap(),
        Some("super-secret".to_string()),
    );

    let debug = format!("{:?}", config);
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn test_config_without_token() {
    let config = FinderConfig::new(parse_base_url("https://api.github.com/").unwrap(), None);
    assert!(!config.is_authenticated());
    assert_eq!(config.bind_addr(), "0.0.0.0:3000");
}
