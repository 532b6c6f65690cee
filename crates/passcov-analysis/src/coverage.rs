//! Cornerback coverage statistics
//!
//! For every frame of a play, each cornerback on the defense is paired with
//! the nearest offensive player and the nearest other defender. The resulting
//! per-frame series are summarized per `(gameId, playId, cornerback)` as
//! population mean and variance, following the coverage metrics of
//! "Unsupervised Methods for Identifying Pass Coverage Among Defensive Backs
//! with NFL Player Tracking Data" (arXiv:1906.11373).
//!
//! Samples that cannot be computed (no opponent on the field, missing speed or
//! direction) are absent and excluded from the summaries.

use std::collections::HashMap;

use passcov_math::{
    descriptive::MeanVariance,
    geometry::{Point, distance_between},
};
use passcov_tracking::{
    frame::TrackedFrame,
    ids::{GameId, NflId, PlayId},
    metadata::{PlayContext, PlayMetadata},
    play::{PlayFrames, TrackingFile},
};
use rayon::prelude::*;
use serde::Serialize;

use crate::{SkipReason, pipeline::log_skip};

/// Roster position label of a cornerback.
pub const CORNERBACK: &str = "CB";

/// Summary of one cornerback over one play.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRow {
    #[serde(rename = "gameId")]
    pub game_id: GameId,
    #[serde(rename = "playId")]
    pub play_id: PlayId,
    #[serde(rename = "nflId")]
    pub nfl_id: NflId,
    pub mean_x: f64,
    pub var_x: f64,
    pub mean_y: f64,
    pub var_y: f64,
    pub mean_speed: f64,
    pub var_speed: f64,
    pub mean_dist_off: f64,
    pub var_dist_off: f64,
    pub mean_dist_def: f64,
    pub var_dist_def: f64,
    pub mean_dir_off: f64,
    pub var_dir_off: f64,
    pub mean_ratio: f64,
    pub var_ratio: f64,
    pub closest_frames: usize,
}

/// Per-frame samples of one cornerback.
#[derive(Debug, Clone, Default)]
struct CoverageSeries {
    x: Vec<f64>,
    y: Vec<f64>,
    speed: Vec<Option<f64>>,
    dist_off: Vec<Option<f64>>,
    dist_def: Vec<Option<f64>>,
    dist_off_def: Vec<Option<f64>>,
    dir_off: Vec<Option<f64>>,
    closest_frames: usize,
}

impl CoverageSeries {
    fn push(
        &mut self,
        cb: &TrackedFrame,
        nearest_off: Option<&TrackedFrame>,
        nearest_def: Option<&TrackedFrame>,
        closest_to_football: bool,
    ) {
        let off = nearest_off.map(TrackedFrame::point);
        let def = nearest_def.map(TrackedFrame::point);
        self.x.push(cb.x);
        self.y.push(cb.y);
        self.speed.push(cb.speed);
        self.dist_off.push(distance_between(Some(cb.point()), off));
        self.dist_def.push(distance_between(Some(cb.point()), def));
        self.dist_off_def.push(distance_between(off, def));
        self.dir_off
            .push(nearest_off.and_then(|o| Some(o.dir? - cb.dir?)));
        if closest_to_football {
            self.closest_frames += 1;
        }
    }

    /// `dist_off / dist_off_def` over frames where both are present and the
    /// denominator is nonzero.
    fn ratios(&self) -> impl Iterator<Item = f64> + '_ {
        self.dist_off
            .iter()
            .zip(&self.dist_off_def)
            .filter_map(|(num, den)| match (num, den) {
                (Some(n), Some(d)) if *d != 0.0 && n.is_finite() && d.is_finite() => Some(n / d),
                _ => None,
            })
    }

    fn summarize(&self, game_id: GameId, play_id: PlayId, nfl_id: NflId) -> CoverageRow {
        let x = MeanVariance::new(self.x.iter().copied());
        let y = MeanVariance::new(self.y.iter().copied());
        let speed = MeanVariance::from_optional(self.speed.iter().copied());
        let dist_off = MeanVariance::from_optional(self.dist_off.iter().copied());
        let dist_def = MeanVariance::from_optional(self.dist_def.iter().copied());
        let dir_off = MeanVariance::from_optional(self.dir_off.iter().copied());
        let ratio = MeanVariance::new(self.ratios());
        CoverageRow {
            game_id,
            play_id,
            nfl_id,
            mean_x: x.mean,
            var_x: x.variance,
            mean_y: y.mean,
            var_y: y.variance,
            mean_speed: speed.mean,
            var_speed: speed.variance,
            mean_dist_off: dist_off.mean,
            var_dist_off: dist_off.variance,
            mean_dist_def: dist_def.mean,
            var_dist_def: dist_def.variance,
            mean_dir_off: dir_off.mean,
            var_dir_off: dir_off.variance,
            mean_ratio: ratio.mean,
            var_ratio: ratio.variance,
            closest_frames: self.closest_frames,
        }
    }
}

/// The sample closest to `target`; the first one wins on ties.
fn nearest<'a, I>(target: Point, candidates: I) -> Option<&'a TrackedFrame>
where
    I: IntoIterator<Item = &'a TrackedFrame>,
{
    let mut best: Option<(&TrackedFrame, f64)> = None;
    for candidate in candidates {
        let d = target.distance(candidate.point());
        if best.is_none_or(|(_, min)| d < min) {
            best = Some((candidate, d));
        }
    }
    best.map(|(frame, _)| frame)
}

/// Coverage summaries for every cornerback of the defense, in order of first
/// appearance in the play.
#[must_use]
pub fn analyze_play_coverage(play: &PlayFrames, ctx: PlayContext) -> Vec<CoverageRow> {
    let mut order = Vec::<NflId>::new();
    let mut series = HashMap::<NflId, CoverageSeries>::new();

    for frame_id in play.frame_ids() {
        let offense = play.side_at(frame_id, ctx.offense).collect::<Vec<_>>();
        let defense = play.side_at(frame_id, ctx.defense).collect::<Vec<_>>();
        let cornerbacks = defense
            .iter()
            .copied()
            .filter(|f| f.has_position(CORNERBACK) && f.nfl_id.is_some())
            .collect::<Vec<_>>();
        let closest_to_ball = play
            .football_at(frame_id)
            .and_then(|ball| nearest(ball, cornerbacks.iter().copied()))
            .and_then(|cb| cb.nfl_id);

        for cb in &cornerbacks {
            let Some(cb_id) = cb.nfl_id else {
                continue;
            };
            let nearest_off = nearest(cb.point(), offense.iter().copied());
            let nearest_def = nearest(
                cb.point(),
                defense.iter().copied().filter(|d| d.nfl_id != cb.nfl_id),
            );
            series
                .entry(cb_id)
                .or_insert_with(|| {
                    order.push(cb_id);
                    CoverageSeries::default()
                })
                .push(cb, nearest_off, nearest_def, closest_to_ball == Some(cb_id));
        }
    }

    order
        .into_iter()
        .filter_map(|cb_id| {
            let s = series.get(&cb_id)?;
            Some(s.summarize(play.game_id(), play.play_id(), cb_id))
        })
        .collect()
}

/// Coverage summaries for every play of a tracking file, ordered by
/// `(gameId, playId)`.
#[must_use]
pub fn analyze_file(file: &TrackingFile, metadata: &PlayMetadata) -> Vec<CoverageRow> {
    let mut rows = Vec::new();
    for game in file.games.values() {
        tracing::info!(game_id = %game.game_id, plays = game.plays.len(), "processing game");

        let plays = game.plays.values().collect::<Vec<_>>();
        let per_play = plays
            .par_iter()
            .map(|play| {
                let ctx = metadata
                    .context(play.game_id(), play.play_id())
                    .ok_or(SkipReason::MissingMetadata)?;
                Ok::<_, SkipReason>(analyze_play_coverage(play, ctx))
            })
            .collect::<Vec<_>>();

        for (play, result) in plays.iter().zip(per_play) {
            match result {
                Ok(play_rows) => rows.extend(play_rows),
                Err(reason) => log_skip(play, reason),
            }
        }
    }
    rows
}
