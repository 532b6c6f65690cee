//! A single player (or football) position sample.

use passcov_math::geometry::Point;
use serde::{Deserialize, Serialize};

use crate::ids::{FrameId, GameId, NflId, PlayId};

/// Which entity a tracking row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
    Football,
}

impl Team {
    /// The side this row plays for, or `None` for the football.
    #[must_use]
    pub fn side(self) -> Option<Side> {
        match self {
            Team::Home => Some(Side::Home),
            Team::Away => Some(Side::Away),
            Team::Football => None,
        }
    }
}

/// One of the two teams on the field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[display("home")]
    Home,
    #[display("away")]
    Away,
}

impl Side {
    #[must_use]
    pub fn opposite(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// One tracking sample, immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedFrame {
    pub game_id: GameId,
    pub play_id: PlayId,
    pub frame_id: FrameId,
    /// Absent for the football.
    pub nfl_id: Option<NflId>,
    pub team: Team,
    /// Roster position label such as `"CB"`.
    pub position: Option<String>,
    pub x: f64,
    pub y: f64,
    /// Speed in yards/second.
    pub speed: Option<f64>,
    /// Direction of motion in degrees.
    pub dir: Option<f64>,
    /// Event label tagged on this frame, e.g. `"pass_forward"`.
    pub event: Option<String>,
}

impl TrackedFrame {
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn is_on(&self, side: Side) -> bool {
        self.team.side() == Some(side)
    }

    #[must_use]
    pub fn has_event(&self, label: &str) -> bool {
        self.event.as_deref() == Some(label)
    }

    #[must_use]
    pub fn has_position(&self, position: &str) -> bool {
        self.position.as_deref() == Some(position)
    }
}
