//! Song-level listening overlap between two users.

use crate::history::PlayHistory;
use log::debug;

/// Sum, over every track both users played, of each user's share of plays
/// on that track.
///
/// Two identical histories score `2.0`; no shared track, or an empty
/// history on either side, scores `0.0`.
#[must_use]
pub fn overlap(a: &PlayHistory, b: &PlayHistory) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let freq_a = a.frequency();
    let freq_b = b.frequency();
    let total_a = a.len() as f64;
    let total_b = b.len() as f64;

    let mut shared = 0usize;
    let score: f64 = freq_a
        .iter()
        .filter_map(|(track, &plays_a)| freq_b.get(track).map(|&plays_b| (plays_a, plays_b)))
        .inspect(|_| shared += 1)
        .map(|(plays_a, plays_b)| plays_a as f64 / total_a + plays_b as f64 / total_b)
        .sum();

    debug!("`{}` and `{}` share {shared} tracks", a.username(), b.username());
    score
}
