//! Track identity and play events.
//!
//! A [`Play`] is one scrobble: a track heard at a specific instant. Two plays
//! belong to the same track when their [`TrackIdentity`] matches, no matter
//! when they happened or which tags they carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The (title, album, artist) triple that deduplicates plays into tracks.
///
/// Comparison is case-sensitive and exact; no whitespace or casing
/// normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackIdentity {
    pub title: String,
    pub album: String,
    pub artist: String,
}

impl TrackIdentity {
    pub fn new(title: impl Into<String>, album: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            album: album.into(),
            artist: artist.into(),
        }
    }
}

impl fmt::Display for TrackIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.artist, self.title, self.album)
    }
}

/// A weighted tag attached to a play by the listening service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub label: String,
    pub weight: u32,
}

/// One recorded listen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Play {
    pub identity: TrackIdentity,
    /// Ordered (label, weight) pairs. Usually empty.
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub timestamp: DateTime<Utc>,
}

impl Play {
    #[must_use]
    pub fn new(identity: TrackIdentity, timestamp: DateTime<Utc>) -> Self {
        Self {
            identity,
            tags: Vec::new(),
            timestamp,
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }
}

// Equality and hashing only look at the identity.
impl PartialEq for Play {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Play {}

impl Hash for Play {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.identity.title, self.identity.album, self.identity.artist, self.timestamp
        )
    }
}
