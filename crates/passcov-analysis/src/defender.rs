//! Nearest defenders to a receiver candidate
//!
//! Distances are averaged over every offensive sample of the candidate in the
//! play, before and after the release alike. A defender is only kept when it
//! was sampled alongside the candidate in at least half of those frames, which
//! filters out players that flicker in and out of the tracking data.

use std::collections::HashMap;

use passcov_tracking::{
    ids::NflId,
    metadata::PlayContext,
    play::PlayFrames,
};

/// A defender and its average distance to the candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestDefender {
    pub nfl_id: NflId,
    pub average_distance: f64,
}

#[derive(Debug, Clone, Copy)]
struct DistanceSum {
    nfl_id: NflId,
    total: f64,
    count: usize,
}

/// Up to `max_defenders` defenders closest to `receiver`, ascending by average
/// distance. Ties keep first-encounter order.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn nearest_defenders(
    play: &PlayFrames,
    ctx: PlayContext,
    receiver: NflId,
    max_defenders: usize,
) -> Vec<NearestDefender> {
    let track = play
        .player_track(receiver)
        .filter(|sample| sample.is_on(ctx.offense));

    let mut sums = Vec::<DistanceSum>::new();
    let mut index = HashMap::<NflId, usize>::new();
    let mut receiver_frames = 0_usize;
    for sample in track {
        receiver_frames += 1;
        let position = sample.point();
        for defender in play.side_at(sample.frame_id, ctx.defense) {
            let Some(nfl_id) = defender.nfl_id else {
                continue;
            };
            let i = *index.entry(nfl_id).or_insert_with(|| {
                sums.push(DistanceSum {
                    nfl_id,
                    total: 0.0,
                    count: 0,
                });
                sums.len() - 1
            });
            sums[i].total += position.distance(defender.point());
            sums[i].count += 1;
        }
    }

    let min_frames = receiver_frames as f64 / 2.0;
    let mut nearest = sums
        .into_iter()
        .filter(|sum| sum.count as f64 >= min_frames)
        .map(|sum| NearestDefender {
            nfl_id: sum.nfl_id,
            average_distance: sum.total / sum.count as f64,
        })
        .collect::<Vec<_>>();
    nearest.sort_by(|a, b| a.average_distance.total_cmp(&b.average_distance));
    nearest.truncate(max_defenders);
    nearest
}

#[cfg(test)]
mod tests {
    use passcov_tracking::frame::{Side, Team};

    use super::*;
    use crate::testing::PlayBuilder;

    const EPS: f64 = 1e-9;

    fn home_offense() -> PlayContext {
        PlayContext::with_offense(Side::Home)
    }

    #[test]
    fn test_defender_moving_with_receiver() {
        let play = (1..=5)
            .fold(PlayBuilder::new(1), |b, f| {
                let step = f64::from(f - 1);
                b.player(f, 100, Team::Home, 9.0 - step, step)
                    .player(f, 200, Team::Away, 12.0 - step, step)
            })
            .build();
        let nearest = nearest_defenders(&play, home_offense(), NflId(100), 2);
        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].nfl_id, NflId(200));
        assert!((nearest[0].average_distance - 3.0).abs() < EPS);
    }

    #[test]
    fn test_ordering_and_limit() {
        let play = PlayBuilder::new(1)
            .player(1, 100, Team::Home, 0.0, 0.0)
            .player(1, 201, Team::Away, 5.0, 0.0)
            .player(1, 202, Team::Away, 1.0, 0.0)
            .player(1, 203, Team::Away, 3.0, 0.0)
            .player(1, 204, Team::Away, 0.0, 3.0)
            .build();
        let nearest = nearest_defenders(&play, home_offense(), NflId(100), 2);
        assert_eq!(
            nearest.iter().map(|d| d.nfl_id.0).collect::<Vec<_>>(),
            vec![202, 203]
        );

        let nearest = nearest_defenders(&play, home_offense(), NflId(100), 4);
        assert_eq!(
            nearest.iter().map(|d| d.nfl_id.0).collect::<Vec<_>>(),
            vec![202, 203, 204, 201],
            "203 and 204 tie, first encountered wins"
        );
    }

    #[test]
    fn test_sparse_defender_is_dropped() {
        // receiver sampled in 4 frames; 201 appears in 2 (kept), 202 in 1 (dropped)
        let play = (1..=4)
            .fold(PlayBuilder::new(1), |b, f| b.player(f, 100, Team::Home, 0.0, 0.0))
            .player(1, 201, Team::Away, 4.0, 0.0)
            .player(2, 201, Team::Away, 6.0, 0.0)
            .player(3, 202, Team::Away, 1.0, 0.0)
            .build();
        let nearest = nearest_defenders(&play, home_offense(), NflId(100), 2);
        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].nfl_id, NflId(201));
        assert!((nearest[0].average_distance - 5.0).abs() < EPS);
    }

    #[test]
    fn test_frames_before_release_count() {
        // receiver sampled in frames 1..=4 with the pass at frame 3; 201 is
        // close before the release only, 202 is further away after it
        let play = (1..=4)
            .fold(PlayBuilder::new(1), |b, f| b.player(f, 100, Team::Home, 0.0, 0.0))
            .player(1, 201, Team::Away, 1.0, 0.0)
            .player(2, 201, Team::Away, 1.0, 0.0)
            .player(3, 202, Team::Away, 2.0, 0.0)
            .player(4, 202, Team::Away, 2.0, 0.0)
            .event(3, "pass_forward")
            .build();
        let nearest = nearest_defenders(&play, home_offense(), NflId(100), 2);
        assert_eq!(
            nearest.iter().map(|d| d.nfl_id.0).collect::<Vec<_>>(),
            vec![201, 202]
        );
        assert!((nearest[0].average_distance - 1.0).abs() < EPS);
        assert!((nearest[1].average_distance - 2.0).abs() < EPS);
    }

    #[test]
    fn test_no_defenders() {
        let play = PlayBuilder::new(1)
            .player(1, 100, Team::Home, 0.0, 0.0)
            .player(1, 101, Team::Home, 1.0, 0.0)
            .build();
        assert!(nearest_defenders(&play, home_offense(), NflId(100), 2).is_empty());
    }
}
