//! Ball trajectory estimation after release
//!
//! The release frame is the first frame tagged with a pass event. Events are
//! tried in priority order, so a `pass_forward` anywhere in the play wins over
//! an earlier `pass_shovel`.
//!
//! The trajectory window covers `frame_count` consecutive frame ids starting
//! at the release frame. Frames without a football sample are skipped; at
//! least two samples are needed to fit the line of travel.

use passcov_math::{
    geometry::{Line, Point},
    regression::{LineFit, fit_line},
};
use passcov_tracking::{ids::FrameId, play::PlayFrames};

use crate::{SkipReason, params::AnalysisParams};

/// Finds the release frame of a play.
#[must_use]
pub fn find_pass_frame<S>(play: &PlayFrames, pass_events: &[S]) -> Option<FrameId>
where
    S: AsRef<str>,
{
    pass_events
        .iter()
        .find_map(|event| play.first_frame_with_event(event.as_ref()))
}

/// The ball's fitted line of travel over the trajectory window.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Frame tagged with the pass event.
    pub pass_frame: FrameId,
    /// Football samples inside the window, ascending by frame.
    pub samples: Vec<(FrameId, Point)>,
    pub fit: LineFit,
    pub line: Line,
}

impl Trajectory {
    /// Locates the release and fits the ball's path over the window.
    pub fn estimate(play: &PlayFrames, params: &AnalysisParams) -> Result<Self, SkipReason> {
        let pass_frame =
            find_pass_frame(play, &params.pass_events).ok_or(SkipReason::NoPassEvent)?;

        let samples = (0..params.frame_count)
            .map(|offset| pass_frame.offset(offset))
            .filter_map(|frame_id| play.football_at(frame_id).map(|p| (frame_id, p)))
            .collect::<Vec<_>>();
        if samples.len() < 2 {
            return Err(SkipReason::TooFewBallSamples {
                count: samples.len(),
            });
        }

        let points = samples.iter().map(|&(_, p)| p).collect::<Vec<_>>();
        let fit = fit_line(&points).map_err(SkipReason::UnfittableTrajectory)?;
        Ok(Self {
            pass_frame,
            samples,
            fit,
            line: fit.line(),
        })
    }

    /// Ball position at the release frame, if the football was sampled there.
    #[must_use]
    pub fn release_position(&self) -> Option<Point> {
        self.samples
            .first()
            .filter(|(frame_id, _)| *frame_id == self.pass_frame)
            .map(|&(_, p)| p)
    }

    /// Last frame of the window with a football sample, and the ball there.
    #[must_use]
    pub fn last_sample(&self) -> Option<(FrameId, Point)> {
        self.samples.last().copied()
    }
}
