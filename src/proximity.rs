//! Time-proximity scoring between tracks.
//!
//! Two tracks are associated when their plays happen close together in
//! time. For a window `W`, every play `b` of the history is compared with
//! every play `a` falling strictly inside `(b - W, b + W)`; plays of the same
//! track are skipped. The absolute gaps and the number of contributing play
//! pairs are summed per directed pair `(track(b), track(a))`, then normalized:
//!
//! ```text
//! proximity(B, A) = N * gap_sum(B, A) / (plays(A) * count(B, A))
//! ```
//!
//! with `N` the total number of plays. The result is expressed in seconds and
//! divided by a scale constant. Lower means the tracks tend to be played
//! closer together; this is an average normalized gap, not a similarity, and
//! `proximity(B, A)` is generally different from `proximity(A, B)`.
//!
//! # Strategies
//!
//! - [`Strategy::Naive`] compares every play against the whole history,
//!   O(n²).
//! - [`Strategy::SlidingWindow`] binary-searches the window bounds in a
//!   time-sorted index, O(n log n + k) for k proximal pairs.
//!
//! Large histories split the outer loop over rayon workers. Gap sums are
//! integer durations and floats only appear once per pair, so all strategies
//! return bit-identical tables.

use crate::error::{ProximityError, Result};
use crate::history::PlayHistory;
use crate::track::{Play, TrackIdentity};
use chrono::{DateTime, Duration, Utc};
use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Divisor applied to the proximity in seconds.
pub const DEFAULT_SCALE: f64 = 10_000.0;

/// History length from which aggregation runs on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// A validated, strictly positive window width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProximityWindow(Duration);

impl ProximityWindow {
    pub fn new(width: Duration) -> Result<Self> {
        if width <= Duration::zero() {
            return Err(ProximityError::InvalidWindow(format!("{width}")));
        }
        Ok(Self(width))
    }

    pub fn from_minutes(minutes: i64) -> Result<Self> {
        let width = Duration::try_minutes(minutes)
            .ok_or_else(|| ProximityError::InvalidWindow(format!("{minutes} minutes is out of range")))?;
        Self::new(width)
    }

    #[must_use]
    pub const fn width(self) -> Duration {
        self.0
    }
}

impl fmt::Display for ProximityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How phase one finds the plays inside each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Naive,
    #[default]
    SlidingWindow,
}

/// Engine tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub strategy: Strategy,
    pub scale: f64,
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            scale: DEFAULT_SCALE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Running sums for one directed track pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairStats {
    pub time_diff_sum: Duration,
    pub count: u64,
}

impl Default for PairStats {
    fn default() -> Self {
        Self {
            time_diff_sum: Duration::zero(),
            count: 0,
        }
    }
}

fn sum_overflow() -> ProximityError {
    ProximityError::InternalInvariantViolation("time difference sum overflowed".to_string())
}

impl PairStats {
    #[inline]
    fn record(&mut self, gap: Duration) -> Result<()> {
        self.time_diff_sum = self.time_diff_sum.checked_add(&gap).ok_or_else(sum_overflow)?;
        self.count += 1;
        Ok(())
    }

    /// Combine two partial sums. Associative and commutative.
    pub fn merge(self, other: Self) -> Result<Self> {
        Ok(Self {
            time_diff_sum: self
                .time_diff_sum
                .checked_add(&other.time_diff_sum)
                .ok_or_else(sum_overflow)?,
            count: self.count + other.count,
        })
    }
}

/// Interned track indices: `(b, a)`.
type PairMap = HashMap<(usize, usize), PairStats>;

fn merge_pair_maps(left: PairMap, right: PairMap) -> Result<PairMap> {
    // Fold the smaller map into the larger one.
    let (mut into, from) = if left.len() >= right.len() { (left, right) } else { (right, left) };
    for (key, stats) in from {
        let slot = into.entry(key).or_default();
        *slot = slot.merge(stats)?;
    }
    Ok(into)
}

/// Absolute gap between two plays.
#[inline]
#[must_use]
pub fn time_diff(a: &Play, b: &Play) -> Duration {
    (a.timestamp - b.timestamp).abs()
}

/// Whether two plays are at most `window` apart.
///
/// This check is inclusive, while aggregation excludes plays exactly
/// `window` apart.
#[must_use]
pub fn is_proximal(a: &Play, b: &Play, window: Duration) -> bool {
    time_diff(a, b) <= window
}

/// One directed score, as listed by [`ProximityTable::sorted_pairs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityEntry {
    pub from: TrackIdentity,
    pub to: TrackIdentity,
    pub score: f64,
}

/// Scores keyed by `B` then `A`. Only observed pairs are present and a track
/// is never paired with itself.
///
/// Serializes as the list of [`ProximityEntry`] values from
/// [`ProximityTable::sorted_pairs`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProximityTable {
    scores: HashMap<TrackIdentity, HashMap<TrackIdentity, f64>>,
}

impl Serialize for ProximityTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted_pairs())
    }
}

impl ProximityTable {
    #[must_use]
    pub fn get(&self, b: &TrackIdentity, a: &TrackIdentity) -> Option<f64> {
        self.scores.get(b).and_then(|row| row.get(a)).copied()
    }

    #[must_use]
    pub fn scores_for(&self, b: &TrackIdentity) -> Option<&HashMap<TrackIdentity, f64>> {
        self.scores.get(b)
    }

    /// Number of directed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// All `(b, a, score)` triples in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&TrackIdentity, &TrackIdentity, f64)> + '_ {
        self.scores
            .iter()
            .flat_map(|(b, row)| row.iter().map(move |(a, &score)| (b, a, score)))
    }

    /// Every pair, lowest score first. Ties are ordered by track identity.
    #[must_use]
    pub fn sorted_pairs(&self) -> Vec<ProximityEntry> {
        let mut entries: Vec<ProximityEntry> = self
            .iter()
            .map(|(b, a, score)| ProximityEntry {
                from: b.clone(),
                to: a.clone(),
                score,
            })
            .collect();
        entries.sort_by(|x, y| {
            x.score
                .total_cmp(&y.score)
                .then_with(|| x.from.cmp(&y.from))
                .then_with(|| x.to.cmp(&y.to))
        });
        entries
    }

    /// The `n` tracks with the lowest score relative to `b`.
    #[must_use]
    pub fn nearest(&self, b: &TrackIdentity, n: usize) -> Vec<(&TrackIdentity, f64)> {
        let Some(row) = self.scores.get(b) else {
            return Vec::new();
        };
        let mut ranked: Vec<(&TrackIdentity, f64)> = row.iter().map(|(a, &score)| (a, score)).collect();
        ranked.sort_by(|x, y| x.1.total_cmp(&y.1).then_with(|| x.0.cmp(y.0)));
        ranked.truncate(n);
        ranked
    }
}

/// Dense view of a history: every play mapped to an interned track index.
struct Interned<'h> {
    identities: Vec<&'h TrackIdentity>,
    plays_per_track: Vec<usize>,
    track_of: Vec<usize>,
    timestamps: Vec<DateTime<Utc>>,
}

impl<'h> Interned<'h> {
    fn new(history: &'h PlayHistory) -> Self {
        let mut index: HashMap<&'h TrackIdentity, usize> = HashMap::new();
        let mut identities = Vec::new();
        let mut plays_per_track = Vec::new();
        let mut track_of = Vec::with_capacity(history.len());
        let mut timestamps = Vec::with_capacity(history.len());

        for play in history.plays() {
            let track = *index.entry(&play.identity).or_insert_with(|| {
                identities.push(&play.identity);
                plays_per_track.push(0);
                identities.len() - 1
            });
            plays_per_track[track] += 1;
            track_of.push(track);
            timestamps.push(play.timestamp);
        }

        Self {
            identities,
            plays_per_track,
            track_of,
            timestamps,
        }
    }

    fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[inline]
    fn record(&self, b: usize, a: usize, pairs: &mut PairMap) -> Result<()> {
        let (track_b, track_a) = (self.track_of[b], self.track_of[a]);
        if track_b == track_a {
            return Ok(());
        }
        let gap = (self.timestamps[a] - self.timestamps[b]).abs();
        pairs.entry((track_b, track_a)).or_default().record(gap)
    }
}

/// Stateless proximity calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityEngine {
    config: EngineConfig,
}

impl ProximityEngine {
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Compute the full table for `history`.
    ///
    /// Either the whole table is returned or an error; never a partial table.
    pub fn compute(&self, history: &PlayHistory, window: ProximityWindow) -> Result<ProximityTable> {
        let interned = Interned::new(history);
        let parallel = interned.len() >= self.config.parallel_threshold;

        debug!(
            "Computing proximities for `{}`: {} plays, {} tracks, window {}, {:?}{}",
            history.username(),
            interned.len(),
            interned.identities.len(),
            window,
            self.config.strategy,
            if parallel { " (parallel)" } else { "" }
        );

        let pairs = self.aggregate(&interned, window.width(), parallel)?;
        let table = self.normalize(&interned, pairs)?;

        debug!("Proximity table for `{}` holds {} pairs", history.username(), table.len());
        Ok(table)
    }

    /// Phase one: directed gap sums and counts over every play instance.
    fn aggregate(&self, interned: &Interned<'_>, width: Duration, parallel: bool) -> Result<PairMap> {
        let n = interned.len();
        let timestamps = &interned.timestamps;

        // Time-sorted play indices, only needed for the sliding window.
        let order: Vec<usize> = match self.config.strategy {
            Strategy::Naive => Vec::new(),
            Strategy::SlidingWindow => {
                let mut order: Vec<usize> = (0..n).collect();
                order.sort_by_key(|&i| timestamps[i]);
                order
            }
        };

        let visit = |mut pairs: PairMap, b: usize| -> Result<PairMap> {
            // A bound past the representable range leaves that side open.
            let low = timestamps[b].checked_sub_signed(width);
            let high = timestamps[b].checked_add_signed(width);
            match self.config.strategy {
                Strategy::Naive => {
                    for a in 0..n {
                        let t = timestamps[a];
                        if low.map_or(true, |low| t > low) && high.map_or(true, |high| t < high) {
                            interned.record(b, a, &mut pairs)?;
                        }
                    }
                }
                Strategy::SlidingWindow => {
                    let start = low.map_or(0, |low| order.partition_point(|&i| timestamps[i] <= low));
                    let end = high.map_or(n, |high| order.partition_point(|&i| timestamps[i] < high));
                    for &a in &order[start..end] {
                        interned.record(b, a, &mut pairs)?;
                    }
                }
            }
            Ok(pairs)
        };

        if parallel {
            (0..n)
                .into_par_iter()
                .try_fold(PairMap::new, visit)
                .try_reduce(PairMap::new, merge_pair_maps)
        } else {
            (0..n).try_fold(PairMap::new(), visit)
        }
    }

    /// Phase two: turn sums into scores.
    fn normalize(&self, interned: &Interned<'_>, pairs: PairMap) -> Result<ProximityTable> {
        let total_plays = interned.len() as f64;
        let mut scores: HashMap<TrackIdentity, HashMap<TrackIdentity, f64>> = HashMap::new();

        for ((b, a), stats) in pairs {
            let (Some(&track_b), Some(&track_a), Some(&plays_of_a)) = (
                interned.identities.get(b),
                interned.identities.get(a),
                interned.plays_per_track.get(a),
            ) else {
                debug_assert!(false, "pair ({b}, {a}) references an unknown track");
                return Err(ProximityError::InternalInvariantViolation(format!(
                    "aggregated pair ({b}, {a}) references a track missing from the history"
                )));
            };

            if plays_of_a == 0 || stats.count == 0 {
                debug_assert!(false, "empty counts for pair {track_b} -> {track_a}");
                return Err(ProximityError::InternalInvariantViolation(format!(
                    "pair {track_b} -> {track_a} has {plays_of_a} plays and {} co-occurrences",
                    stats.count
                )));
            }

            let score =
                total_plays * seconds(stats.time_diff_sum) / (plays_of_a as f64 * stats.count as f64) / self.config.scale;
            trace!("{track_b} -> {track_a}: {} pairs, score {score}", stats.count);

            scores.entry(track_b.clone()).or_default().insert(track_a.clone(), score);
        }

        Ok(ProximityTable { scores })
    }
}

fn seconds(duration: Duration) -> f64 {
    duration.num_seconds() as f64 + f64::from(duration.subsec_nanos()) / 1e9
}

/// Compute proximities with the default engine configuration.
pub fn compute_proximities(history: &PlayHistory, window: Duration) -> Result<ProximityTable> {
    ProximityEngine::default().compute(history, ProximityWindow::new(window)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn track(name: &str) -> TrackIdentity {
        TrackIdentity::new(name, "Album", "Artist")
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 3, hour, minute, 0).unwrap()
    }

    fn history_of(plays: &[(&str, DateTime<Utc>)]) -> PlayHistory {
        PlayHistory::new(
            "listener",
            plays.iter().map(|(name, ts)| Play::new(track(name), *ts)).collect(),
        )
    }

    fn engine(strategy: Strategy, parallel_threshold: usize) -> ProximityEngine {
        ProximityEngine::new(EngineConfig {
            strategy,
            scale: DEFAULT_SCALE,
            parallel_threshold,
        })
    }

    fn random_history(seed: u64, plays: usize, tracks: usize) -> PlayHistory {
        let mut rng = StdRng::seed_from_u64(seed);
        let start = at(0, 0);
        let plays = (0..plays)
            .map(|_| {
                let name = format!("T{}", rng.gen_range(0..tracks));
                let offset = Duration::seconds(rng.gen_range(0..6 * 3600));
                Play::new(track(&name), start + offset)
            })
            .collect();
        PlayHistory::new("random", plays)
    }

    #[test]
    fn test_three_play_scenario() {
        let history = history_of(&[("T1", at(10, 10)), ("T2", at(10, 5)), ("T1", at(10, 0))]);
        let table = compute_proximities(&history, Duration::minutes(10)).unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.get(&track("T1"), &track("T1")).is_none());

        // (T1, T2): gaps 300s + 300s over 2 pairs, T2 played once: 3 * 600 / (1 * 2).
        let t1_t2 = table.get(&track("T1"), &track("T2")).unwrap();
        assert!((t1_t2 - 900.0 / DEFAULT_SCALE).abs() < 1e-12);

        // (T2, T1): gaps 300s + 300s over 2 pairs, T1 played twice: 3 * 600 / (2 * 2).
        let t2_t1 = table.get(&track("T2"), &track("T1")).unwrap();
        assert!((t2_t1 - 450.0 / DEFAULT_SCALE).abs() < 1e-12);
    }

    #[test]
    fn test_directions_are_computed_independently() {
        let history = history_of(&[("T1", at(10, 10)), ("T2", at(10, 5)), ("T1", at(10, 0))]);
        let table = compute_proximities(&history, Duration::minutes(10)).unwrap();

        let forward = table.get(&track("T1"), &track("T2")).unwrap();
        let backward = table.get(&track("T2"), &track("T1")).unwrap();
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_window_boundary_asymmetry() {
        let history = history_of(&[("T1", at(10, 0)), ("T2", at(10, 10))]);
        let window = Duration::minutes(10);

        let table = compute_proximities(&history, window).unwrap();
        assert!(table.is_empty(), "plays exactly one window apart must not aggregate");

        let plays = history.plays();
        assert!(is_proximal(&plays[0], &plays[1], window));
        assert_eq!(time_diff(&plays[0], &plays[1]), window);
    }

    #[test]
    fn test_small_window_yields_empty_table() {
        let history = history_of(&[("T1", at(10, 0)), ("T2", at(10, 5)), ("T3", at(10, 12))]);
        let table = compute_proximities(&history, Duration::minutes(4)).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_empty_history_yields_empty_table() {
        let history = PlayHistory::new("nobody", vec![]);
        let table = compute_proximities(&history, Duration::minutes(30)).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_repeated_plays_of_one_track_produce_nothing() {
        let history = history_of(&[("T1", at(10, 0)), ("T1", at(10, 1)), ("T1", at(10, 2))]);
        let table = compute_proximities(&history, Duration::minutes(30)).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_simultaneous_plays_score_zero() {
        let history = history_of(&[("T1", at(10, 0)), ("T2", at(10, 0))]);
        let table = compute_proximities(&history, Duration::minutes(1)).unwrap();
        assert_eq!(table.get(&track("T1"), &track("T2")), Some(0.0));
        assert_eq!(table.get(&track("T2"), &track("T1")), Some(0.0));
    }

    #[test]
    fn test_invalid_windows_are_rejected() {
        let history = history_of(&[("T1", at(10, 0))]);
        assert!(matches!(
            compute_proximities(&history, Duration::zero()),
            Err(ProximityError::InvalidWindow(_))
        ));
        assert!(matches!(
            compute_proximities(&history, Duration::minutes(-5)),
            Err(ProximityError::InvalidWindow(_))
        ));
        assert!(ProximityWindow::from_minutes(0).is_err());
        assert_eq!(ProximityWindow::from_minutes(15).unwrap().width(), Duration::minutes(15));
    }

    #[test]
    fn test_no_self_pairs_on_random_history() {
        let history = random_history(7, 400, 12);
        let table = compute_proximities(&history, Duration::minutes(20)).unwrap();

        assert!(!table.is_empty());
        for (b, a, score) in table.iter() {
            assert_ne!(b, a);
            assert!(score.is_finite() && score >= 0.0);
        }
    }

    #[test]
    fn test_computation_is_idempotent() {
        let history = random_history(11, 300, 8);
        let window = Duration::minutes(15);
        let first = compute_proximities(&history, window).unwrap();
        let second = compute_proximities(&history, window).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_strategies_agree_exactly() {
        let window = ProximityWindow::from_minutes(25).unwrap();
        for seed in [1, 2, 3] {
            let history = random_history(seed, 350, 15);

            let naive = engine(Strategy::Naive, usize::MAX).compute(&history, window).unwrap();
            let sliding = engine(Strategy::SlidingWindow, usize::MAX).compute(&history, window).unwrap();
            let parallel_sliding = engine(Strategy::SlidingWindow, 1).compute(&history, window).unwrap();
            let parallel_naive = engine(Strategy::Naive, 1).compute(&history, window).unwrap();

            assert_eq!(naive, sliding, "seed {seed}");
            assert_eq!(naive, parallel_sliding, "seed {seed}");
            assert_eq!(naive, parallel_naive, "seed {seed}");
        }
    }

    #[test]
    fn test_scale_divides_score() {
        let history = history_of(&[("T1", at(10, 0)), ("T2", at(10, 5))]);
        let window = ProximityWindow::from_minutes(10).unwrap();
        let unscaled = ProximityEngine::new(EngineConfig {
            scale: 1.0,
            ..EngineConfig::default()
        })
        .compute(&history, window)
        .unwrap();

        // 2 plays * 300s / (1 * 1)
        assert_eq!(unscaled.get(&track("T1"), &track("T2")), Some(600.0));
    }

    #[test]
    fn test_pair_stats_merge_is_associative() {
        let a = PairStats {
            time_diff_sum: Duration::seconds(10),
            count: 1,
        };
        let b = PairStats {
            time_diff_sum: Duration::seconds(20),
            count: 2,
        };
        let c = PairStats {
            time_diff_sum: Duration::milliseconds(1500),
            count: 4,
        };
        assert_eq!(a.merge(b).unwrap().merge(c), a.merge(b.merge(c).unwrap()));
        assert_eq!(a.merge(b), b.merge(a));
    }

    #[test]
    fn test_pair_stats_overflow_is_an_invariant_violation() {
        let full = PairStats {
            time_diff_sum: Duration::MAX,
            count: 1,
        };
        let one = PairStats {
            time_diff_sum: Duration::seconds(1),
            count: 1,
        };
        assert!(matches!(full.merge(one), Err(ProximityError::InternalInvariantViolation(_))));

        let mut stats = full;
        assert!(matches!(
            stats.record(Duration::seconds(1)),
            Err(ProximityError::InternalInvariantViolation(_))
        ));
    }

    #[test]
    fn test_window_wider_than_calendar_covers_everything() {
        let history = history_of(&[("T1", at(10, 0)), ("T2", at(10, 5)), ("T1", at(10, 10))]);
        let huge = ProximityWindow::from_minutes(100_000_000_000_000).unwrap();
        let bounded = ProximityWindow::from_minutes(60).unwrap();

        for strategy in [Strategy::Naive, Strategy::SlidingWindow] {
            for threshold in [usize::MAX, 1] {
                let wide = engine(strategy, threshold).compute(&history, huge).unwrap();
                let narrow = engine(strategy, threshold).compute(&history, bounded).unwrap();
                assert_eq!(wide, narrow, "{strategy:?}, threshold {threshold}");
            }
        }

        let widest = compute_proximities(&history, Duration::MAX).unwrap();
        assert_eq!(widest.len(), 2);
    }

    #[test]
    fn test_table_serializes_as_sorted_entries() {
        let history = history_of(&[("T1", at(10, 10)), ("T2", at(10, 5)), ("T1", at(10, 0))]);
        let table = compute_proximities(&history, Duration::minutes(10)).unwrap();

        let json = serde_json::to_value(&table).unwrap();
        let entries: Vec<ProximityEntry> = serde_json::from_value(json).unwrap();
        assert_eq!(entries, table.sorted_pairs());
        assert_eq!(entries[0].from, track("T2"));
    }

    #[test]
    fn test_merge_pair_maps_sums_matching_keys() {
        let stats = |secs, count| PairStats {
            time_diff_sum: Duration::seconds(secs),
            count,
        };
        let left: PairMap = [((0, 1), stats(5, 1)), ((1, 0), stats(3, 1))].into_iter().collect();
        let right: PairMap = [((0, 1), stats(7, 2))].into_iter().collect();

        let merged = merge_pair_maps(left, right).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[&(0, 1)], stats(12, 3));
        assert_eq!(merged[&(1, 0)], stats(3, 1));
    }

    #[test]
    fn test_sorted_pairs_and_nearest() {
        let history = history_of(&[("T1", at(10, 0)), ("T2", at(10, 2)), ("T3", at(10, 9))]);
        let table = compute_proximities(&history, Duration::minutes(30)).unwrap();

        let sorted = table.sorted_pairs();
        assert_eq!(sorted.len(), table.len());
        assert!(sorted.windows(2).all(|w| w[0].score <= w[1].score));

        let nearest = table.nearest(&track("T1"), 1);
        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].0, &track("T2"));
        assert!(table.nearest(&track("missing"), 3).is_empty());
    }
}
