//! Flat output records of the receiver workflow
//!
//! One [`ReceiverRow`] is emitted per ranked candidate. Defenders are flattened
//! into indexed keys, and keys for missing defenders are omitted:
//!
//! ```json
//! {
//!   "gameId": 2018090600,
//!   "playId": 75,
//!   "line_a": 0.12,
//!   "line_b": -1.0,
//!   "line_c": 14.9,
//!   "rank": 0,
//!   "receiver": 2495454,
//!   "diff": 0.31,
//!   "def_0": 2552315,
//!   "def_dist_0": 1.84
//! }
//! ```

use passcov_math::geometry::Line;
use passcov_tracking::ids::{GameId, NflId, PlayId};
use serde::{Serialize, ser::SerializeMap as _};

use crate::defender::NearestDefender;

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverRow {
    pub game_id: GameId,
    pub play_id: PlayId,
    pub line: Line,
    pub rank: usize,
    pub receiver: NflId,
    pub match_score: f64,
    pub defenders: Vec<NearestDefender>,
}

impl Serialize for ReceiverRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(8 + 2 * self.defenders.len()))?;
        map.serialize_entry("gameId", &self.game_id)?;
        map.serialize_entry("playId", &self.play_id)?;
        map.serialize_entry("line_a", &self.line.a)?;
        map.serialize_entry("line_b", &self.line.b)?;
        map.serialize_entry("line_c", &self.line.c)?;
        map.serialize_entry("rank", &self.rank)?;
        map.serialize_entry("receiver", &self.receiver)?;
        map.serialize_entry("diff", &self.match_score)?;
        for (i, defender) in self.defenders.iter().enumerate() {
            map.serialize_entry(&format!("def_{i}"), &defender.nfl_id)?;
            map.serialize_entry(&format!("def_dist_{i}"), &defender.average_distance)?;
        }
        map.end()
    }
}
