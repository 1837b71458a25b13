//! Normalization of raw listening records.
//!
//! The ingestion side hands over loosely typed records. Every field is
//! optional here so a missing value can be reported as
//! [`ProximityError::MalformedRecord`] instead of failing deserialization
//! for the whole file.

use crate::error::{ProximityError, Result};
use crate::history::PlayHistory;
use crate::track::{Play, Tag, TrackIdentity};
use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Timestamp format used by the listening service for playback dates.
pub const SCROBBLE_TIMESTAMP_FORMAT: &str = "%d %b %Y, %H:%M";

/// Separator between artist and title in the service's track strings.
const TRACK_SEPARATOR: &str = " - ";

/// A play record as delivered by the ingestion collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub title: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub timestamp: Option<String>,
}

impl RawRecord {
    /// Build a record from the service's scrobble shape, where the track is
    /// a single `"Artist - Title"` string.
    ///
    /// Titles may themselves contain `" - "`; only the first occurrence
    /// splits.
    pub fn from_scrobble(track: &str, album: &str, playback_date: &str) -> Result<Self> {
        let (artist, title) = track
            .split_once(TRACK_SEPARATOR)
            .ok_or_else(|| ProximityError::malformed("track", format!("`{track}` is not of the form `Artist - Title`")))?;

        Ok(Self {
            title: Some(title.to_string()),
            album: Some(album.to_string()),
            artist: Some(artist.to_string()),
            tags: Vec::new(),
            timestamp: Some(playback_date.to_string()),
        })
    }
}

/// Parse a timestamp in RFC 3339 or the service's playback date format.
///
/// Playback dates carry no offset and are taken as UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(text, SCROBBLE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| ProximityError::malformed("timestamp", format!("`{text}` could not be parsed: {e}")))
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    match value.as_deref() {
        None => Err(ProximityError::malformed(field, "is missing")),
        Some(v) if v.trim().is_empty() => Err(ProximityError::malformed(field, "is empty")),
        Some(v) => Ok(v),
    }
}

/// Turn a raw record into a [`Play`].
///
/// Title, artist and timestamp must be present and non-empty. Album must be
/// present but may be empty, since singles often have no album.
pub fn normalize(raw: &RawRecord) -> Result<Play> {
    let title = required(&raw.title, "title")?;
    let artist = required(&raw.artist, "artist")?;
    let album = raw
        .album
        .as_deref()
        .ok_or_else(|| ProximityError::malformed("album", "is missing"))?;
    let timestamp = parse_timestamp(required(&raw.timestamp, "timestamp")?)?;

    Ok(Play::new(TrackIdentity::new(title, album, artist), timestamp).with_tags(raw.tags.clone()))
}

/// Load a JSON array of raw records from `path` into a history for `username`.
pub fn load_history(path: &Path, username: &str) -> anyhow::Result<PlayHistory> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read listening history from {}", path.display()))?;

    let records: Vec<RawRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Listening history at {} is not a JSON array of records", path.display()))?;

    if records.is_empty() {
        warn!("Listening history at {} contains no records", path.display());
    }

    let history = PlayHistory::from_records(username, &records)
        .with_context(|| format!("Failed to normalize listening history from {}", path.display()))?;

    debug!("Loaded {} plays for `{}` from {}", history.len(), username, path.display());
    Ok(history)
}
