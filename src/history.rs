//! Per-user play history.

use crate::error::Result;
use crate::record::{self, RawRecord};
use crate::track::{Play, TrackIdentity};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Ordered plays of one listener.
///
/// Plays keep the order they were delivered in, which for the listening
/// service is newest first. The engine only ever reads a history; date
/// filters hand back a new value.
///
/// Not `PartialEq`: plays compare by identity alone, so a derived equality
/// would call two histories with different timestamps equal.
#[derive(Debug, Clone)]
pub struct PlayHistory {
    username: String,
    plays: Vec<Play>,
}

impl PlayHistory {
    pub fn new(username: impl Into<String>, plays: Vec<Play>) -> Self {
        Self {
            username: username.into(),
            plays,
        }
    }

    /// Normalize every record, failing on the first malformed one.
    pub fn from_records(username: impl Into<String>, records: &[RawRecord]) -> Result<Self> {
        let plays = records.iter().map(record::normalize).collect::<Result<Vec<_>>>()?;
        Ok(Self::new(username, plays))
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// Earliest timestamp in the history.
    #[must_use]
    pub fn oldest(&self) -> Option<DateTime<Utc>> {
        self.plays.iter().map(|p| p.timestamp).min()
    }

    /// Latest timestamp in the history.
    #[must_use]
    pub fn newest(&self) -> Option<DateTime<Utc>> {
        self.plays.iter().map(|p| p.timestamp).max()
    }

    #[must_use]
    pub fn distinct_tracks(&self) -> HashSet<&TrackIdentity> {
        self.plays.iter().map(|p| &p.identity).collect()
    }

    /// Plays sorted oldest first. Plays sharing a timestamp keep their
    /// relative order.
    #[must_use]
    pub fn chronological(&self) -> Vec<&Play> {
        let mut sorted: Vec<&Play> = self.plays.iter().collect();
        sorted.sort_by_key(|p| p.timestamp);
        sorted
    }

    /// Play count per track.
    #[must_use]
    pub fn frequency(&self) -> HashMap<TrackIdentity, usize> {
        frequency(self)
    }
}

/// Count every play of each distinct track.
///
/// The counts always sum to `history.len()`.
#[must_use]
pub fn frequency(history: &PlayHistory) -> HashMap<TrackIdentity, usize> {
    history.plays.iter().fold(HashMap::new(), |mut counts, play| {
        *counts.entry(play.identity.clone()).or_insert(0) += 1;
        counts
    })
}

/// Keep plays with `from <= timestamp <= to`.
///
/// A missing bound falls back to the oldest (`from`) or newest (`to`)
/// timestamp of `history`, so passing neither keeps every play. The input is
/// left untouched and the result owns its own copy of the plays.
#[must_use]
pub fn filter_by_date(history: &PlayHistory, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> PlayHistory {
    let (Some(oldest), Some(newest)) = (history.oldest(), history.newest()) else {
        return PlayHistory::new(history.username.clone(), Vec::new());
    };

    let from = from.unwrap_or(oldest);
    let to = to.unwrap_or(newest);

    let plays: Vec<Play> = history
        .plays
        .iter()
        .filter(|play| from <= play.timestamp && play.timestamp <= to)
        .cloned()
        .collect();

    debug!(
        "Date filter {from} ..= {to} kept {} of {} plays for `{}`",
        plays.len(),
        history.len(),
        history.username
    );

    PlayHistory::new(history.username.clone(), plays)
}
