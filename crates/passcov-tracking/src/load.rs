//! CSV readers for tracking, game and play tables
//!
//! Readers take any [`io::Read`] so they can be driven from files or from
//! in-memory strings in tests. Extra columns are ignored.
//!
//! Rows that fail to decode are skipped with a warning; only errors that make
//! the rest of the input unreadable (I/O failures, a broken header) are
//! returned.

use std::io;

use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    frame::{Team, TrackedFrame},
    ids::{FrameId, GameId, NflId, PlayId},
    metadata::{GameRecord, PlayRecord},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("failed to read {table} CSV: {source}")]
pub struct LoadError {
    pub table: &'static str,
    pub source: csv::Error,
}

/// Label used in tracking exports for frames without an event.
const NO_EVENT: &str = "None";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrackedFrame {
    game_id: GameId,
    play_id: PlayId,
    frame_id: FrameId,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    nfl_id: Option<NflId>,
    team: Team,
    #[serde(default)]
    position: Option<String>,
    x: f64,
    y: f64,
    #[serde(default, rename = "s", deserialize_with = "csv::invalid_option")]
    speed: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    dir: Option<f64>,
    #[serde(default)]
    event: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty() && v != NO_EVENT)
}

impl From<RawTrackedFrame> for TrackedFrame {
    fn from(raw: RawTrackedFrame) -> Self {
        TrackedFrame {
            game_id: raw.game_id,
            play_id: raw.play_id,
            frame_id: raw.frame_id,
            nfl_id: raw.nfl_id,
            team: raw.team,
            position: non_empty(raw.position),
            x: raw.x,
            y: raw.y,
            speed: raw.speed,
            dir: raw.dir,
            event: non_empty(raw.event),
        }
    }
}

fn read_records<T, R>(table: &'static str, reader: R) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned,
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    reader
        .headers()
        .map_err(|source| LoadError { table, source })?;

    let mut records = Vec::new();
    let mut skipped = 0_usize;
    for result in reader.deserialize::<T>() {
        match result {
            Ok(record) => records.push(record),
            Err(source) if source.is_io_error() => return Err(LoadError { table, source }),
            Err(e) => {
                skipped += 1;
                tracing::warn!(table, "skipping malformed row: {e}");
            }
        }
    }
    if skipped > 0 {
        tracing::warn!(table, skipped, loaded = records.len(), "some rows were skipped");
    }
    Ok(records)
}

/// Reads a `week*.csv` tracking table.
pub fn read_tracking<R>(reader: R) -> Result<Vec<TrackedFrame>, LoadError>
where
    R: io::Read,
{
    let raw = read_records::<RawTrackedFrame, _>("tracking", reader)?;
    Ok(raw.into_iter().map(TrackedFrame::from).collect())
}

/// Reads `games.csv`.
pub fn read_games<R>(reader: R) -> Result<Vec<GameRecord>, LoadError>
where
    R: io::Read,
{
    read_records("games", reader)
}

/// Reads `plays.csv`.
pub fn read_plays<R>(reader: R) -> Result<Vec<PlayRecord>, LoadError>
where
    R: io::Read,
{
    read_records("plays", reader)
}
