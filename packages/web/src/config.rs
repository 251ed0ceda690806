use anyhow::{Context, Result};
use dotenvy::dotenv;
use listing_scraper::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub marketplace_base_url: Url,
    /// Directory export files are written to and served from
    pub export_dir: PathBuf,
    pub max_pages: u32,
    /// Server-side cap on the form's result count
    pub max_results: usize,
    /// Outbound request timeout; `None` keeps the HTTP client default
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
    pub open_browser: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::from_secs(
                secs.parse()
                    .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            )),
            None => None,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            marketplace_base_url: Url::parse(
                &lookup("MARKETPLACE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            )
            .context("MARKETPLACE_BASE_URL must be an absolute URL")?,
            export_dir: lookup("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            max_pages: lookup("MAX_PAGES")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .context("MAX_PAGES must be a valid number")?,
            max_results: lookup("MAX_RESULTS")
                .unwrap_or_else(|| "100".to_string())
                .parse()
                .context("MAX_RESULTS must be a valid number")?,
            request_timeout,
            user_agent: lookup("USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            open_browser: parse_flag(lookup("OPEN_BROWSER").as_deref(), true)
                .context("OPEN_BROWSER must be true or false")?,
        })
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL of the search form, opened in a browser on startup
    pub fn form_url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

fn parse_flag(value: Option<&str>, default: bool) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => anyhow::bail!("unrecognised flag value: {}", other),
        },
    }
}
