//! Receiver candidate ranking by displacement matching
//!
//! Proximity to the ball at release is a poor receiver signal: linemen and
//! the passer crowd the ball. Instead, each offensive player's net approach
//! towards the ball over the trajectory window is compared to the ball's own
//! displacement:
//!
//! ```text
//! diff        = |player - ball(release)| - |player' - ball(last)|
//! match score = | diff - |ball(last) - ball(release)| |
//! ```
//!
//! Players moving away (`diff < 0`) are discarded. A score near zero means the
//! player closed on the ball exactly as far as the ball travelled.
//!
//! Only players within `yards_around` of the fitted trajectory line are
//! considered, checked independently at the release frame and at the last
//! sampled frame; a player must qualify at both.

use std::collections::HashMap;

use passcov_math::geometry::{Line, Point};
use passcov_tracking::{
    ids::{FrameId, NflId},
    metadata::PlayContext,
    play::PlayFrames,
};

use crate::{SkipReason, params::AnalysisParams, trajectory::Trajectory};

/// A ranked offensive player for one play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// 0-based, ascending by match score.
    pub rank: usize,
    pub nfl_id: NflId,
    /// Non-negative; smaller is a better match.
    pub match_score: f64,
}

/// Distances from the ball to offensive players near the trajectory line at
/// one frame, in the frame's row order.
///
/// A player sampled more than once keeps its first position in the order and
/// the last sample's distance.
fn distances_near_line(
    play: &PlayFrames,
    ctx: PlayContext,
    frame_id: FrameId,
    line: &Line,
    ball: Point,
    yards_around: f64,
) -> Result<Vec<(NflId, f64)>, SkipReason> {
    let mut distances = Vec::<(NflId, f64)>::new();
    for sample in play.side_at(frame_id, ctx.offense) {
        let Some(nfl_id) = sample.nfl_id else {
            continue;
        };
        let point = sample.point();
        let line_distance = line
            .distance_to(point)
            .map_err(SkipReason::DegenerateLine)?;
        if line_distance.is_nan() || line_distance > yards_around {
            continue;
        }
        let distance = ball.distance(point);
        match distances.iter_mut().find(|(id, _)| *id == nfl_id) {
            Some(entry) => entry.1 = distance,
            None => distances.push((nfl_id, distance)),
        }
    }
    Ok(distances)
}

/// Ranks offensive players by how well their approach matches the ball's travel.
///
/// Ties keep the row order of the release frame. At most
/// `params.max_receivers` candidates are returned.
///
/// # Errors
///
/// - [`SkipReason::NoBallAtRelease`] when the release frame has no football sample
/// - [`SkipReason::TooFewBallSamples`] when the trajectory holds no samples
/// - [`SkipReason::DegenerateLine`] when the trajectory line has no direction
/// - [`SkipReason::NoCandidates`] when no player qualifies
pub fn rank_candidates(
    play: &PlayFrames,
    ctx: PlayContext,
    trajectory: &Trajectory,
    params: &AnalysisParams,
) -> Result<Vec<Candidate>, SkipReason> {
    let start_ball = trajectory
        .release_position()
        .ok_or(SkipReason::NoBallAtRelease)?;
    let (end_frame, end_ball) = trajectory
        .last_sample()
        .ok_or(SkipReason::TooFewBallSamples {
            count: trajectory.samples.len(),
        })?;
    let line = &trajectory.line;

    let start = distances_near_line(
        play,
        ctx,
        trajectory.pass_frame,
        line,
        start_ball,
        params.yards_around,
    )?;
    let end = distances_near_line(play, ctx, end_frame, line, end_ball, params.yards_around)?
        .into_iter()
        .collect::<HashMap<_, _>>();

    let ball_displacement = start_ball.distance(end_ball);

    let mut scored = start
        .into_iter()
        .filter_map(|(nfl_id, start_distance)| {
            let end_distance = end.get(&nfl_id)?;
            let diff = start_distance - end_distance;
            (diff >= 0.0).then(|| (nfl_id, (diff - ball_displacement).abs()))
        })
        .collect::<Vec<_>>();
    // stable: equal scores keep release-frame order
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    scored.truncate(params.max_receivers);

    if scored.is_empty() {
        return Err(SkipReason::NoCandidates);
    }
    Ok(scored
        .into_iter()
        .enumerate()
        .map(|(rank, (nfl_id, match_score))| Candidate {
            rank,
            nfl_id,
            match_score,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use passcov_tracking::frame::{Side, Team};

    use super::*;
    use crate::testing::PlayBuilder;

    const EPS: f64 = 1e-9;

    fn rank(play: &PlayFrames) -> Result<Vec<Candidate>, SkipReason> {
        let params = AnalysisParams::default();
        let trajectory = Trajectory::estimate(play, &params)?;
        rank_candidates(play, PlayContext::with_offense(Side::Home), &trajectory, &params)
    }

    /// Ball travels (0,0) → (0,4) along the y axis over frames 1..=5.
    fn ball_along_y(builder: PlayBuilder) -> PlayBuilder {
        (1..=5)
            .fold(builder, |b, f| b.ball(f, 0.0, f64::from(f - 1)))
            .event(1, "pass_forward")
    }

    #[test]
    fn test_lockstep_player_ranks_first_with_zero_score() {
        // closes from 9 yards to 5 yards while the ball travels 4
        let play = (1..=5)
            .fold(ball_along_y(PlayBuilder::new(1)), |b, f| {
                let step = f64::from(f - 1);
                b.player(f, 100, Team::Home, 9.0 - step, step)
            })
            .build();
        let candidates = rank(&play).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].rank, 0);
        assert_eq!(candidates[0].nfl_id, NflId(100));
        assert!(candidates[0].match_score.abs() < EPS);
    }

    #[test]
    fn test_player_far_from_line_is_excluded() {
        // perfect displacement match, but 15 yards off the line
        let play = (1..=5)
            .fold(ball_along_y(PlayBuilder::new(1)), |b, f| {
                let step = f64::from(f - 1);
                b.player(f, 100, Team::Home, 15.0, 10.0 - step)
            })
            .build();
        assert_eq!(rank(&play), Err(SkipReason::NoCandidates));
    }

    #[test]
    fn test_player_must_qualify_at_both_frames() {
        let play = ball_along_y(PlayBuilder::new(1))
            .player(1, 100, Team::Home, 5.0, 0.0)
            .player(5, 100, Team::Home, 12.0, 4.0)
            .player(1, 101, Team::Home, 3.0, 0.0)
            .player(5, 101, Team::Home, 1.0, 4.0)
            .build();
        let candidates = rank(&play).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].nfl_id, NflId(101));
        // diff = 3 - 1 = 2, ball moved 4
        assert!((candidates[0].match_score - 2.0).abs() < EPS);
    }

    #[test]
    fn test_player_moving_away_is_discarded() {
        let play = ball_along_y(PlayBuilder::new(1))
            .player(1, 100, Team::Home, 1.0, 0.0)
            .player(5, 100, Team::Home, 8.0, 4.0)
            .build();
        assert_eq!(rank(&play), Err(SkipReason::NoCandidates));
    }

    #[test]
    fn test_defense_and_football_are_not_candidates() {
        let play = ball_along_y(PlayBuilder::new(1))
            .player(1, 200, Team::Away, 4.0, 0.0)
            .player(5, 200, Team::Away, 0.0, 4.0)
            .build();
        assert_eq!(rank(&play), Err(SkipReason::NoCandidates));
    }

    #[test]
    fn test_ranking_order_ties_and_truncation() {
        // scores: 101 → 2, 102 → 0, 103 → 1, 104 → 1, 105 → 3
        let play = ball_along_y(PlayBuilder::new(1))
            .player(1, 101, Team::Home, 6.0, 0.0)
            .player(1, 102, Team::Home, 8.0, 0.0)
            .player(1, 103, Team::Home, 7.0, 0.0)
            .player(1, 104, Team::Home, -7.0, 0.0)
            .player(1, 105, Team::Home, 9.0, 0.0)
            .player(5, 105, Team::Home, 8.0, 4.0)
            .player(5, 104, Team::Home, -4.0, 4.0)
            .player(5, 103, Team::Home, 4.0, 4.0)
            .player(5, 102, Team::Home, 4.0, 4.0)
            .player(5, 101, Team::Home, 4.0, 4.0)
            .build();
        let candidates = rank(&play).unwrap();
        let ids = candidates.iter().map(|c| c.nfl_id.0).collect::<Vec<_>>();
        assert_eq!(ids, vec![102, 103, 104]);
        assert_eq!(
            candidates.iter().map(|c| c.rank).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(
            candidates
                .windows(2)
                .all(|w| w[0].match_score <= w[1].match_score)
        );
    }

    #[test]
    fn test_identical_scores_keep_iteration_order() {
        let play = ball_along_y(PlayBuilder::new(1))
            .player(1, 300, Team::Home, -6.0, 0.0)
            .player(1, 200, Team::Home, 6.0, 0.0)
            .player(5, 200, Team::Home, 2.0, 4.0)
            .player(5, 300, Team::Home, -2.0, 4.0)
            .build();
        let candidates = rank(&play).unwrap();
        assert_eq!(candidates[0].nfl_id, NflId(300));
        assert_eq!(candidates[1].nfl_id, NflId(200));
        assert_eq!(candidates[0].match_score, candidates[1].match_score);
    }

    #[test]
    fn test_duplicate_sample_in_frame_uses_later_distance() {
        // 100 is sampled twice at release: 9 yards, then 6; 101 sits between
        let play = ball_along_y(PlayBuilder::new(1))
            .player(1, 100, Team::Home, 9.0, 0.0)
            .player(1, 101, Team::Home, 6.0, 0.0)
            .player(1, 100, Team::Home, 6.0, 0.0)
            .player(5, 101, Team::Home, 2.0, 4.0)
            .player(5, 100, Team::Home, 2.0, 4.0)
            .build();
        let candidates = rank(&play).unwrap();
        assert_eq!(
            candidates.iter().map(|c| c.nfl_id.0).collect::<Vec<_>>(),
            vec![100, 101],
            "first occurrence fixes the tie order"
        );
        assert!(candidates[0].match_score.abs() < EPS);
        assert!(candidates[1].match_score.abs() < EPS);
    }

    #[test]
    fn test_missing_ball_at_release() {
        let play = PlayBuilder::new(1)
            .player(1, 100, Team::Home, 1.0, 0.0)
            .ball(2, 0.0, 1.0)
            .ball(3, 0.0, 2.0)
            .event(1, "pass_forward")
            .build();
        assert_eq!(rank(&play), Err(SkipReason::NoBallAtRelease));
    }
}
