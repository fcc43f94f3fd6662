//! Recency bucketing.
//!
//! Items are sorted into "today", "yesterday" and "earlier" by comparing the
//! **day of the month** only. Month and year are ignored, so an item from the
//! 15th of last month lands in "today" on the 15th. This is a known quirk,
//! kept so the grouping stays the same as the launcher plugin's.

use chrono::{DateTime, Datelike, Duration, TimeZone};

use crate::source::FeedItem;

/// The three list sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecencyBucket {
    Today,
    Yesterday,
    Earlier,
}

impl RecencyBucket {
    pub const ALL: [RecencyBucket; 3] = [Self::Today, Self::Yesterday, Self::Earlier];

    /// Section heading.
    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Aujourd'hui",
            Self::Yesterday => "Hier",
            Self::Earlier => "Précédent",
        }
    }
}

/// Days of the month for "today" and "yesterday", captured once per fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayReference {
    pub today: u32,
    pub yesterday: u32,
}

impl DayReference {
    pub fn new(today: u32, yesterday: u32) -> Self {
        Self { today, yesterday }
    }

    /// Reference days for the wall-clock instant `now`; "yesterday" is the
    /// day of `now - 24h`.
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let yesterday = now.clone() - Duration::hours(24);
        Self::new(now.day(), yesterday.day())
    }

    /// Place an item published on day-of-month `day` into a bucket.
    ///
    /// `None` (missing or unparsable date) is always [`RecencyBucket::Earlier`].
    pub fn classify(self, day: Option<u32>) -> RecencyBucket {
        let Some(day) = day else {
            return RecencyBucket::Earlier;
        };

        if day == self.today {
            RecencyBucket::Today
        } else if (self.today > 1 && day + 1 == self.today)
            || (self.today == 1 && day == self.yesterday)
        {
            RecencyBucket::Yesterday
        } else {
            RecencyBucket::Earlier
        }
    }
}

/// Feed items grouped by [`RecencyBucket`], each group in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketedFeed {
    today: Vec<FeedItem>,
    yesterday: Vec<FeedItem>,
    earlier: Vec<FeedItem>,
}

impl BucketedFeed {
    /// Classify every item in one pass. Each item lands in exactly one
    /// bucket; days are read in `tz`.
    pub fn build<Tz: TimeZone>(items: Vec<FeedItem>, days: DayReference, tz: &Tz) -> Self {
        let mut feed = Self::default();
        for item in items {
            let bucket = days.classify(item.day_of_month(tz));
            feed.bucket_mut(bucket).push(item);
        }
        feed
    }

    pub fn get(&self, bucket: RecencyBucket) -> &[FeedItem] {
        match bucket {
            RecencyBucket::Today => &self.today,
            RecencyBucket::Yesterday => &self.yesterday,
            RecencyBucket::Earlier => &self.earlier,
        }
    }

    fn bucket_mut(&mut self, bucket: RecencyBucket) -> &mut Vec<FeedItem> {
        match bucket {
            RecencyBucket::Today => &mut self.today,
            RecencyBucket::Yesterday => &mut self.yesterday,
            RecencyBucket::Earlier => &mut self.earlier,
        }
    }

    /// Buckets in display order, including empty ones.
    pub fn sections(&self) -> impl Iterator<Item = (RecencyBucket, &[FeedItem])> + '_ {
        RecencyBucket::ALL.into_iter().map(move |b| (b, self.get(b)))
    }

    pub fn len(&self) -> usize {
        self.today.len() + self.yesterday.len() + self.earlier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
