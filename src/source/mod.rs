//! Data source abstraction layer.
//!
//! This module defines the [`DataSource`] trait and the common [`FeedItem`]
//! type. The only concrete source is the RSS feed in [`rss`].

mod feed_item;
mod rss;

pub use feed_item::{FeedItem, UNTITLED};
pub use rss::RssSource;

#[cfg(test)]
pub(crate) use feed_item::tests::make_item;
#[cfg(test)]
pub(crate) use rss::tests::{closed_port, local_source};

use async_trait::async_trait;

use crate::error::FetchResult;

/// Something that can produce the current list of feed items.
///
/// The fetch task calls [`fetch()`](DataSource::fetch) exactly once per run
/// on the tokio runtime, so implementations must be `Send + Sync`.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable label used in logs.
    fn name(&self) -> &str;

    /// Fetch and parse every item, in feed order.
    ///
    /// Any failure aborts the whole fetch; there are no partial results.
    async fn fetch(&self) -> FetchResult<Vec<FeedItem>>;
}
