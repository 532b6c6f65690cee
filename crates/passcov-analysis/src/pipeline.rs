//! Play, game and file orchestration of the receiver workflow
//!
//! Every play is independent: it reads only its own samples plus the shared
//! read-only metadata, so plays are analysed in parallel and merged afterwards.

use std::collections::BTreeMap;

use passcov_math::geometry::Line;
use passcov_tracking::{
    ids::{GameId, PlayId},
    metadata::PlayMetadata,
    play::{PlayFrames, TrackingFile},
};
use rayon::prelude::*;

use crate::{
    SkipReason,
    defender::{NearestDefender, nearest_defenders},
    params::AnalysisParams,
    receiver::{Candidate, rank_candidates},
    row::ReceiverRow,
    trajectory::Trajectory,
};

/// A ranked candidate together with its nearest defenders.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedReceiver {
    pub candidate: Candidate,
    pub defenders: Vec<NearestDefender>,
}

/// The complete result for one analysed play.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayReceivers {
    pub game_id: GameId,
    pub play_id: PlayId,
    pub line: Line,
    /// Non-empty, ascending by rank.
    pub receivers: Vec<RankedReceiver>,
}

impl PlayReceivers {
    pub fn rows(&self) -> impl Iterator<Item = ReceiverRow> + '_ {
        self.receivers.iter().map(|r| ReceiverRow {
            game_id: self.game_id,
            play_id: self.play_id,
            line: self.line,
            rank: r.candidate.rank,
            receiver: r.candidate.nfl_id,
            match_score: r.candidate.match_score,
            defenders: r.defenders.clone(),
        })
    }
}

/// Runs the receiver workflow on a single play.
pub fn analyze_play(
    play: &PlayFrames,
    metadata: &PlayMetadata,
    params: &AnalysisParams,
) -> Result<PlayReceivers, SkipReason> {
    let ctx = metadata
        .context(play.game_id(), play.play_id())
        .ok_or(SkipReason::MissingMetadata)?;
    let trajectory = Trajectory::estimate(play, params)?;
    let candidates = rank_candidates(play, ctx, &trajectory, params)?;

    let receivers = candidates
        .into_iter()
        .map(|candidate| RankedReceiver {
            candidate,
            defenders: nearest_defenders(
                play,
                ctx,
                candidate.nfl_id,
                params.max_defenders,
            ),
        })
        .collect();

    Ok(PlayReceivers {
        game_id: play.game_id(),
        play_id: play.play_id(),
        line: trajectory.line,
        receivers,
    })
}

/// Counts of analysed and skipped plays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub plays: usize,
    pub plays_with_rows: usize,
    pub rows: usize,
    /// Skipped plays by [`SkipReason::kind`].
    pub skipped: BTreeMap<&'static str, usize>,
}

impl AnalysisSummary {
    fn record(&mut self, outcome: &Result<PlayReceivers, SkipReason>) {
        self.plays += 1;
        match outcome {
            Ok(result) => {
                self.plays_with_rows += 1;
                self.rows += result.receivers.len();
            }
            Err(reason) => *self.skipped.entry(reason.kind()).or_default() += 1,
        }
    }
}

pub(crate) fn log_skip(play: &PlayFrames, reason: SkipReason) {
    let (game_id, play_id) = (play.game_id(), play.play_id());
    if reason == SkipReason::MissingMetadata {
        tracing::warn!(%game_id, %play_id, "skipping play: {reason}");
    } else {
        tracing::debug!(%game_id, %play_id, "skipping play: {reason}");
    }
}

/// Rows of one tracking file, ordered by `(gameId, playId, rank)`.
#[derive(Debug, Clone, Default)]
pub struct FileReceivers {
    pub rows: Vec<ReceiverRow>,
    pub summary: AnalysisSummary,
}

/// Runs the receiver workflow over every play of a tracking file.
#[must_use]
pub fn analyze_file(
    file: &TrackingFile,
    metadata: &PlayMetadata,
    params: &AnalysisParams,
) -> FileReceivers {
    let mut output = FileReceivers::default();
    for game in file.games.values() {
        tracing::info!(game_id = %game.game_id, plays = game.plays.len(), "processing game");

        let plays = game.plays.values().collect::<Vec<_>>();
        // indexed collect keeps play order
        let outcomes = plays
            .par_iter()
            .map(|play| analyze_play(play, metadata, params))
            .collect::<Vec<_>>();

        for (play, outcome) in plays.iter().zip(&outcomes) {
            output.summary.record(outcome);
            match outcome {
                Ok(result) => output.rows.extend(result.rows()),
                Err(reason) => log_skip(play, *reason),
            }
        }
    }
    output
        .rows
        .sort_by_key(|row| (row.game_id, row.play_id, row.rank));
    output
}
