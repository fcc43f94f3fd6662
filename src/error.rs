//! Errors raised while fetching and parsing the feed.

use std::error::Error as _;
use std::fmt::Write as _;

use thiserror::Error;

/// Failure to fetch or parse the feed.
///
/// All variants are handled the same way by the UI: the fetch is abandoned,
/// the list is left empty, and [`FetchError::describe`] is shown once in a
/// failure toast.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Feed parsing failed")]
    Parse(#[from] rss::Error),
}

impl FetchError {
    /// The message followed by every underlying cause, `: `-separated.
    pub fn describe(&self) -> String {
        let mut msg = self.to_string();
        let mut cause = self.source();
        while let Some(err) = cause {
            let _ = write!(msg, ": {err}");
            cause = err.source();
        }
        msg
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
