//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;
use url::Url;

/// Home page of the site; also used as the fallback link for items that
/// carry none.
pub const DEFAULT_BASE_URL: &str = "https://www.gamekult.com";

#[derive(Parser, Debug, Clone)]
#[command(name = "gamekult-news")]
#[command(about = "Browse the latest Gamekult news in the terminal")]
#[command(version)]
pub struct Config {
    /// Site base URL; the feed is read from `<base-url>/feed.xml`
    #[arg(long, env = "GAMEKULT_BASE_URL", default_value = DEFAULT_BASE_URL, value_parser = parse_base_url)]
    pub base_url: Url,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long, env = "GAMEKULT_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Site URL without a trailing slash.
    pub fn site_url(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    pub fn feed_url(&self) -> String {
        format!("{}/feed.xml", self.site_url())
    }
}

fn parse_base_url(s: &str) -> Result<Url, String> {
    let url = Url::parse(s).map_err(|e| format!("invalid URL '{s}': {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}', expected http or https")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_gamekult() {
        let config = Config::try_parse_from(["gamekult-news"]).unwrap();
        assert_eq!(config.site_url(), "https://www.gamekult.com");
        assert_eq!(config.feed_url(), "https://www.gamekult.com/feed.xml");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let config =
            Config::try_parse_from(["gamekult-news", "--base-url", "http://localhost:8080/"])
                .unwrap();
        assert_eq!(config.feed_url(), "http://localhost:8080/feed.xml");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let res = Config::try_parse_from(["gamekult-news", "--base-url", "ftp://example.com"]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_garbage_url() {
        let res = Config::try_parse_from(["gamekult-news", "--base-url", "not a url"]);
        assert!(res.is_err());
    }
}
