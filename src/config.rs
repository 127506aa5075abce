use crate::cli::Cli;
use crate::error::{FinderError, Result};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com/";

/// Process-wide settings, resolved once at startup and handed to the app.
#[derive(Clone)]
pub struct FinderConfig {
    pub github_token: Option<String>,
    pub api_base_url: Url,
    pub host: String,
    pub port: u16,
}

impl FinderConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(FinderConfig {
            github_token: normalize_token(cli.github_token.as_deref()),
            api_base_url: parse_base_url(&cli.api_base_url)?,
            host: cli.host.clone(),
            port: cli.port,
        })
    }

    /// Config for a server on the default address talking to `api_base_url`.
    pub fn new(api_base_url: Url, github_token: Option<String>) -> Self {
        FinderConfig {
            github_token: normalize_token(github_token.as_deref()),
            api_base_url,
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_authenticated(&self) -> bool {
        self.github_token.is_some()
    }
}

// Keep the token out of Debug output.
impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url.as_str())
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

fn normalize_token(token: Option<&str>) -> Option<String> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Parse the API base URL, forcing a trailing slash so relative joins
/// append to the path instead of replacing its last segment.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(FinderError::Config(format!("API base URL cannot be a base: {}", raw)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
