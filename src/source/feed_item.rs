//! The feed entry type shared by every layer of the application.
//!
//! Sources normalise their native entries into [`FeedItem`] once, at parse
//! time, so bucketing and presentation never see missing titles or links.

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Shown in place of an empty or missing `<title>`.
pub const UNTITLED: &str = "No Title...";

/// A single feed entry.
///
/// Items are immutable after parsing and are replaced wholesale on every
/// fetch.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FeedItem {
    /// Stable identifier: the `<guid>`, falling back to the `<link>`.
    pub id: String,

    /// Trimmed headline, never empty.
    pub title: String,

    /// Article URL. Falls back to the site home page when the entry has none.
    pub link: String,

    /// Publication instant.
    ///
    /// `None` when the entry has no date or it could not be parsed; such
    /// items always classify as "earlier".
    pub published: Option<DateTime<Utc>>,

    /// Raw body content (HTML), shown as-is in the detail view.
    pub body_html: String,

    /// Author attribution, if the feed provides one.
    pub author: Option<String>,

    /// URL of the media enclosure (usually a cover image).
    pub media_url: Option<String>,
}

impl FeedItem {
    /// Day of the month of the publication instant, seen from `tz`.
    pub fn day_of_month<Tz: TimeZone>(&self, tz: &Tz) -> Option<u32> {
        self.published.map(|dt| dt.with_timezone(tz).day())
    }
}
