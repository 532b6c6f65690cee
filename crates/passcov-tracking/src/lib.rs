//! Typed player-tracking data for pass-coverage analysis
//!
//! This crate turns the tabular tracking exports into typed, ordered
//! structures that the analysis crate can query without label-based lookups.
//!
//! # Data Structure
//!
//! ```text
//! TrackingFile (one week*.csv)
//! └─ games: BTreeMap<GameId, GameFrames>
//!     └─ plays: BTreeMap<PlayId, PlayFrames>
//!         └─ frames: Vec<TrackedFrame> (stable-sorted by frameId)
//!
//! PlayMetadata (plays.csv ⟕ games.csv on gameId)
//! └─ (GameId, PlayId) → Possession → PlayContext { offense, defense }
//! ```
//!
//! # Modules
//!
//! - [`ids`]: identifier newtypes
//! - [`frame`]: a single tracking sample ([`TrackedFrame`](frame::TrackedFrame))
//! - [`play`]: per-play and per-file grouping
//! - [`metadata`]: game/play metadata and the possession resolver
//! - [`load`]: CSV readers for the three input tables

pub mod frame;
pub mod ids;
pub mod load;
pub mod metadata;
pub mod play;
