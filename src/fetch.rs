//! Background feed fetch.
//!
//! The feed is fetched exactly once, on a tokio task spawned at startup. The
//! outcome is sent to the UI loop over an [`mpsc`] channel and applied there
//! as a single state replacement. There is no refresh timer and no retry.

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::bucket::{BucketedFeed, DayReference};
use crate::error::FetchResult;
use crate::source::DataSource;

/// Outcome of the fetch, sent from the fetch task to the UI loop.
#[derive(Debug)]
pub enum FetchMsg {
    /// Items fetched and bucketed.
    Loaded(BucketedFeed),
    /// The fetch or parse failed with this description.
    Failed(String),
}

impl From<FetchResult<BucketedFeed>> for FetchMsg {
    fn from(result: FetchResult<BucketedFeed>) -> Self {
        match result {
            Ok(feed) => FetchMsg::Loaded(feed),
            Err(e) => FetchMsg::Failed(e.describe()),
        }
    }
}

/// Fetch every item from `source` and bucket it against `days`, reading
/// publication days in local time.
pub async fn load_news<S>(source: &S, days: DayReference) -> FetchResult<BucketedFeed>
where
    S: DataSource + ?Sized,
{
    let items = source.fetch().await?;
    Ok(BucketedFeed::build(items, days, &Local))
}

/// Spawn the single fetch task.
///
/// Returns a receiver that the main loop should drain on every tick. Exactly
/// one message is sent; if the receiver is already gone it is dropped.
pub fn spawn(source: Box<dyn DataSource>) -> mpsc::Receiver<FetchMsg> {
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        info!(source = source.name(), "fetching feed");
        let days = DayReference::at(&Local::now());

        let result = load_news(source.as_ref(), days).await;
        match &result {
            Ok(feed) => info!(items = feed.len(), "feed loaded"),
            Err(e) => warn!(error = %e.describe(), "feed fetch failed"),
        }

        let _ = tx.send(FetchMsg::from(result)).await;
    });

    rx
}
