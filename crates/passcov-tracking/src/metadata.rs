//! Game and play metadata, and the possession resolver
//!
//! Which tracking `team` is on offense is not stored per sample. It follows
//! from comparing the play's `possessionTeam` abbreviation to the game's home
//! and visitor abbreviations.
//!
//! The comparison only checks the home side: a possession team matching
//! neither abbreviation is classified as the away offense. This is a known
//! data-quality assumption and is reported with a warning, not an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    frame::Side,
    ids::{GameId, PlayId},
};

/// One row of `games.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub game_id: GameId,
    pub home_team_abbr: String,
    pub visitor_team_abbr: String,
}

/// One row of `plays.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRecord {
    pub game_id: GameId,
    pub play_id: PlayId,
    #[serde(default)]
    pub possession_team: String,
}

/// A play row joined with its game row.
///
/// The team abbreviations are absent when the play's game is missing from
/// `games.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Possession {
    pub game_id: GameId,
    pub play_id: PlayId,
    pub possession_team: String,
    pub home_team_abbr: Option<String>,
    pub visitor_team_abbr: Option<String>,
}

impl Possession {
    fn is_home(&self) -> bool {
        self.home_team_abbr.as_deref() == Some(self.possession_team.as_str())
    }

    fn is_visitor(&self) -> bool {
        self.visitor_team_abbr.as_deref() == Some(self.possession_team.as_str())
    }
}

/// Offense and defense sides for one play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayContext {
    pub offense: Side,
    pub defense: Side,
}

impl PlayContext {
    #[must_use]
    pub fn with_offense(offense: Side) -> Self {
        Self {
            offense,
            defense: offense.opposite(),
        }
    }

    /// Resolves sides from possession metadata.
    ///
    /// The offense is `home` when the possession team equals the home
    /// abbreviation and `away` otherwise, including when it matches neither.
    #[must_use]
    pub fn resolve(possession: &Possession) -> Self {
        if possession.is_home() {
            return Self::with_offense(Side::Home);
        }
        if !possession.is_visitor() {
            tracing::warn!(
                game_id = %possession.game_id,
                play_id = %possession.play_id,
                possession_team = %possession.possession_team,
                "possession team matches neither home nor visitor, assuming away offense"
            );
        }
        Self::with_offense(Side::Away)
    }
}

/// `plays.csv` left-joined with `games.csv` on `gameId`.
#[derive(Debug, Clone, Default)]
pub struct PlayMetadata {
    plays: HashMap<(GameId, PlayId), Possession>,
}

impl PlayMetadata {
    /// Joins play rows with game rows. The first row wins on duplicate keys.
    #[must_use]
    pub fn join(games: &[GameRecord], plays: &[PlayRecord]) -> Self {
        let mut games_by_id = HashMap::new();
        for game in games {
            games_by_id.entry(game.game_id).or_insert(game);
        }

        let mut joined = HashMap::new();
        for play in plays {
            let game = games_by_id.get(&play.game_id);
            joined
                .entry((play.game_id, play.play_id))
                .or_insert_with(|| Possession {
                    game_id: play.game_id,
                    play_id: play.play_id,
                    possession_team: play.possession_team.clone(),
                    home_team_abbr: game.map(|g| g.home_team_abbr.clone()),
                    visitor_team_abbr: game.map(|g| g.visitor_team_abbr.clone()),
                });
        }
        Self { plays: joined }
    }

    #[must_use]
    pub fn possession(&self, game_id: GameId, play_id: PlayId) -> Option<&Possession> {
        self.plays.get(&(game_id, play_id))
    }

    /// Resolved sides for a play, or `None` when the play has no metadata row.
    #[must_use]
    pub fn context(&self, game_id: GameId, play_id: PlayId) -> Option<PlayContext> {
        self.possession(game_id, play_id).map(PlayContext::resolve)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }
}
