//! Pass receiver and coverage analysis over player-tracking data
//!
//! This crate derives, for every pass play, which offensive players most
//! plausibly received the ball and which defenders were closest to them, and
//! summarizes how cornerbacks covered the field over each play.
//!
//! # Overview
//!
//! ## Receiver Workflow
//!
//! Each play is processed independently:
//!
//! 1. **Resolve Sides** ([`passcov_tracking::metadata::PlayContext`]): offense and defense
//! 2. **Estimate Trajectory** ([`trajectory::Trajectory`]): find the release frame and fit
//!    the ball's line of travel over a short window
//! 3. **Rank Candidates** ([`receiver::rank_candidates`]): match each offensive player's net
//!    approach to the ball against the ball's own displacement
//! 4. **Locate Defenders** ([`defender::nearest_defenders`]): average defender distances to
//!    each candidate over the play
//! 5. **Assemble Rows** ([`row::ReceiverRow`]): one flat record per ranked candidate
//!
//! [`pipeline::analyze_file`] runs the workflow over every play of a tracking
//! file in parallel and merges the rows in `(gameId, playId, rank)` order.
//!
//! ## Coverage Workflow
//!
//! [`coverage::analyze_file`] walks every frame of every play and aggregates,
//! per cornerback, positional and relative-distance statistics.
//!
//! # Skipped Plays
//!
//! Sparse or unusual data is expected. A play that cannot be analysed yields a
//! [`SkipReason`] and contributes no rows; it never aborts the run.

use passcov_math::{geometry::DegenerateLineError, regression::FitLineError};

pub mod coverage;
pub mod defender;
pub mod params;
pub mod pipeline;
pub mod receiver;
pub mod row;
pub mod trajectory;

#[cfg(test)]
mod testing;

/// Why a play produced no receiver rows.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SkipReason {
    #[display("play has no metadata row")]
    MissingMetadata,
    #[display("no pass event found")]
    NoPassEvent,
    #[display("only {count} football samples in the trajectory window")]
    TooFewBallSamples { count: usize },
    #[display("trajectory cannot be fitted: {_0}")]
    UnfittableTrajectory(FitLineError),
    #[display("trajectory line is degenerate: {_0}")]
    DegenerateLine(DegenerateLineError),
    #[display("no football sample at the release frame")]
    NoBallAtRelease,
    #[display("no offensive player qualifies as a receiver")]
    NoCandidates,
}

impl SkipReason {
    /// Short stable label used for summary counts.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::MissingMetadata => "missing_metadata",
            SkipReason::NoPassEvent => "no_pass_event",
            SkipReason::TooFewBallSamples { .. } => "too_few_ball_samples",
            SkipReason::UnfittableTrajectory(_) => "unfittable_trajectory",
            SkipReason::DegenerateLine(_) => "degenerate_line",
            SkipReason::NoBallAtRelease => "no_ball_at_release",
            SkipReason::NoCandidates => "no_candidates",
        }
    }
}
