//! Time-proximity track associations from listening history.
//!
//! Core modules:
//! - [`track`] - Track identity and play events
//! - [`history`] - Per-user play history, date filters and frequencies
//! - [`proximity`] - Time-proximity scoring engine
//! - [`overlap`] - Listening overlap between two users
//!
//! ### Supporting Modules
//!
//! - [`record`] - Normalization of raw records handed over by ingestion
//! - [`error`] - Library error type
//! - [`config`] - Engine configuration file
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```
//! use autoplay::history::PlayHistory;
//! use autoplay::proximity::compute_proximities;
//! use autoplay::track::{Play, TrackIdentity};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let first = TrackIdentity::new("Blue in Green", "Kind of Blue", "Miles Davis");
//! let second = TrackIdentity::new("So What", "Kind of Blue", "Miles Davis");
//! let start = Utc.with_ymd_and_hms(2021, 3, 3, 10, 0, 0).unwrap();
//!
//! let history = PlayHistory::new(
//!     "listener",
//!     vec![
//!         Play::new(second.clone(), start + Duration::minutes(6)),
//!         Play::new(first.clone(), start),
//!     ],
//! );
//!
//! let table = compute_proximities(&history, Duration::minutes(10))?;
//! assert!(table.get(&first, &second).is_some());
//! assert!(table.get(&first, &first).is_none());
//! # Ok::<(), autoplay::error::ProximityError>(())
//! ```
//!
//! ## Scores
//!
//! A proximity is an average, normalized time gap: lower means the two
//! tracks are played closer together. It is directed, so
//! `proximity(B, A)` and `proximity(A, B)` are computed and stored
//! separately. See [`proximity`] for the formula.
//!
//! ## Error Handling
//!
//! Library operations return [`error::ProximityError`]; file loading,
//! configuration and the binary use `anyhow::Result` for context.

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod history;
pub mod overlap;
pub mod proximity;
pub mod record;
pub mod track;

pub use error::{ProximityError, Result};
pub use history::{filter_by_date, frequency, PlayHistory};
pub use overlap::overlap;
pub use proximity::{compute_proximities, is_proximal, time_diff, ProximityEngine, ProximityTable, ProximityWindow};
pub use track::{Play, Tag, TrackIdentity};
