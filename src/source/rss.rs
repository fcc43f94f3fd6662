//! RSS feed source.
//!
//! Fetches the site's `feed.xml` with [`reqwest`] and converts each
//! `<item>` into a [`FeedItem`] using the [`rss`] crate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::debug;

use super::{DataSource, FeedItem, UNTITLED};
use crate::error::{FetchError, FetchResult};

/// An RSS 2.0 feed served over HTTP.
pub struct RssSource {
    client: Client,
    /// Full URL of the feed document.
    pub url: String,
    /// Site home page, used when an item carries no link.
    pub site_url: String,
}

impl RssSource {
    /// Create a source reading `feed_url`, with `site_url` as the fallback
    /// link for items.
    pub fn new(feed_url: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), feed_url, site_url)
    }

    /// Like [`RssSource::new`], with a preconfigured HTTP client.
    pub fn with_client(
        client: Client,
        feed_url: impl Into<String>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: feed_url.into(),
            site_url: site_url.into(),
        }
    }

    /// Parse an already-fetched [`rss::Channel`] into [`FeedItem`]s.
    ///
    /// Pure, so tests can exercise the mapping without the network.
    pub fn parse_channel(channel: &rss::Channel, site_url: &str) -> Vec<FeedItem> {
        channel
            .items()
            .iter()
            .map(|item| {
                let link = item
                    .link()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .unwrap_or(site_url)
                    .to_string();

                let id = item
                    .guid()
                    .map(|g| g.value().to_string())
                    .or_else(|| item.link().map(String::from))
                    .unwrap_or_default();

                let title = item
                    .title()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .unwrap_or(UNTITLED)
                    .to_string();

                let body_html = item
                    .content()
                    .or_else(|| item.description())
                    .unwrap_or_default()
                    .to_string();

                // dc:creator is what most WordPress-style feeds use.
                let author = item
                    .dublin_core_ext()
                    .and_then(|dc| dc.creators().first().cloned())
                    .or_else(|| item.author().map(String::from))
                    .filter(|a| !a.trim().is_empty());

                FeedItem {
                    id,
                    title,
                    link,
                    published: item.pub_date().and_then(parse_date),
                    body_html,
                    author,
                    media_url: item.enclosure().map(|e| e.url().to_string()),
                }
            })
            .collect()
    }
}

/// Parse a feed date: RFC 2822 as RSS mandates, RFC 3339 as seen in the wild.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl DataSource for RssSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> FetchResult<Vec<FeedItem>> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), url = %self.url, "feed downloaded");

        let channel = rss::Channel::read_from(body.as_ref())?;
        Ok(Self::parse_channel(&channel, &self.site_url))
    }
}
