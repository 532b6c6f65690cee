//! Per-play and per-file grouping of tracking samples
//!
//! A tracking file holds every sample of every play of a week, in no
//! particular order. [`TrackingFile::from_frames`] partitions them by
//! `(gameId, playId)` and sorts each play by `frameId`. The sort is stable, so
//! samples inside one frame keep their input order; ranking tie-breaks rely on
//! that order.

use std::collections::BTreeMap;

use passcov_math::geometry::Point;

use crate::{
    frame::{Side, Team, TrackedFrame},
    ids::{FrameId, GameId, NflId, PlayId},
};

/// All samples of one play, ordered by frame.
#[derive(Debug, Clone)]
pub struct PlayFrames {
    game_id: GameId,
    play_id: PlayId,
    frames: Vec<TrackedFrame>,
}

impl PlayFrames {
    /// Groups `frames` as one play, sorting them stably by `frameId`.
    ///
    /// Samples whose ids do not match `(game_id, play_id)` are kept; callers
    /// are expected to have partitioned beforehand.
    #[must_use]
    pub fn new(game_id: GameId, play_id: PlayId, mut frames: Vec<TrackedFrame>) -> Self {
        frames.sort_by_key(|f| f.frame_id);
        Self {
            game_id,
            play_id,
            frames,
        }
    }

    #[must_use]
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    #[must_use]
    pub fn play_id(&self) -> PlayId {
        self.play_id
    }

    #[must_use]
    pub fn frames(&self) -> &[TrackedFrame] {
        &self.frames
    }

    /// Distinct frame ids in ascending order.
    pub fn frame_ids(&self) -> impl Iterator<Item = FrameId> + '_ {
        let mut last = None;
        self.frames.iter().filter_map(move |f| {
            if last == Some(f.frame_id) {
                return None;
            }
            last = Some(f.frame_id);
            last
        })
    }

    /// Samples belonging to `frame_id`, in input order.
    #[must_use]
    pub fn at_frame(&self, frame_id: FrameId) -> &[TrackedFrame] {
        let start = self.frames.partition_point(|f| f.frame_id < frame_id);
        let end = self.frames.partition_point(|f| f.frame_id <= frame_id);
        &self.frames[start..end]
    }

    /// Position of the football at `frame_id`, if sampled.
    #[must_use]
    pub fn football_at(&self, frame_id: FrameId) -> Option<Point> {
        self.at_frame(frame_id)
            .iter()
            .find(|f| f.team == Team::Football)
            .map(TrackedFrame::point)
    }

    /// Samples of `side` at `frame_id`, in input order.
    pub fn side_at(&self, frame_id: FrameId, side: Side) -> impl Iterator<Item = &TrackedFrame> {
        self.at_frame(frame_id).iter().filter(move |f| f.is_on(side))
    }

    /// Every sample of one player, ordered by frame.
    pub fn player_track(&self, nfl_id: NflId) -> impl Iterator<Item = &TrackedFrame> {
        self.frames.iter().filter(move |f| f.nfl_id == Some(nfl_id))
    }

    /// The earliest frame tagged with `label`.
    #[must_use]
    pub fn first_frame_with_event(&self, label: &str) -> Option<FrameId> {
        self.frames
            .iter()
            .find(|f| f.has_event(label))
            .map(|f| f.frame_id)
    }
}

/// All plays of one game, ordered by play id.
#[derive(Debug, Clone)]
pub struct GameFrames {
    pub game_id: GameId,
    pub plays: BTreeMap<PlayId, PlayFrames>,
}

/// Every play found in one tracking file.
#[derive(Debug, Clone, Default)]
pub struct TrackingFile {
    pub games: BTreeMap<GameId, GameFrames>,
}

impl TrackingFile {
    /// Partitions loaded samples by game and play.
    #[must_use]
    pub fn from_frames<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = TrackedFrame>,
    {
        let mut grouped = BTreeMap::<GameId, BTreeMap<PlayId, Vec<TrackedFrame>>>::new();
        for frame in frames {
            grouped
                .entry(frame.game_id)
                .or_default()
                .entry(frame.play_id)
                .or_default()
                .push(frame);
        }

        let games = grouped
            .into_iter()
            .map(|(game_id, plays)| {
                let plays = plays
                    .into_iter()
                    .map(|(play_id, frames)| (play_id, PlayFrames::new(game_id, play_id, frames)))
                    .collect();
                (game_id, GameFrames { game_id, plays })
            })
            .collect();
        Self { games }
    }

    /// Plays in ascending `(gameId, playId)` order.
    pub fn plays(&self) -> impl Iterator<Item = &PlayFrames> {
        self.games.values().flat_map(|game| game.plays.values())
    }

    #[must_use]
    pub fn num_plays(&self) -> usize {
        self.games.values().map(|game| game.plays.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(game: u64, play: u32, frame: u32, nfl_id: Option<u32>, team: Team) -> TrackedFrame {
        TrackedFrame {
            game_id: GameId(game),
            play_id: PlayId(play),
            frame_id: FrameId(frame),
            nfl_id: nfl_id.map(NflId),
            team,
            position: None,
            x: f64::from(frame),
            y: 0.0,
            speed: None,
            dir: None,
            event: None,
        }
    }

    #[test]
    fn test_grouping_orders_games_and_plays() {
        let file = TrackingFile::from_frames(vec![
            sample(2, 10, 1, Some(1), Team::Home),
            sample(1, 20, 1, Some(1), Team::Home),
            sample(1, 5, 1, Some(1), Team::Home),
        ]);
        let keys = file
            .plays()
            .map(|p| (p.game_id(), p.play_id()))
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                (GameId(1), PlayId(5)),
                (GameId(1), PlayId(20)),
                (GameId(2), PlayId(10)),
            ]
        );
        assert_eq!(file.num_plays(), 3);
    }

    #[test]
    fn test_frames_sorted_stably() {
        let play = PlayFrames::new(
            GameId(1),
            PlayId(1),
            vec![
                sample(1, 1, 2, Some(7), Team::Home),
                sample(1, 1, 1, Some(8), Team::Away),
                sample(1, 1, 2, Some(3), Team::Home),
                sample(1, 1, 1, None, Team::Football),
            ],
        );
        let order = play
            .frames()
            .iter()
            .map(|f| (f.frame_id.0, f.nfl_id.map(|id| id.0)))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![(1, Some(8)), (1, None), (2, Some(7)), (2, Some(3))]
        );
        assert_eq!(play.frame_ids().collect::<Vec<_>>(), vec![FrameId(1), FrameId(2)]);
    }

    #[test]
    fn test_frame_queries() {
        let play = PlayFrames::new(
            GameId(1),
            PlayId(1),
            vec![
                sample(1, 1, 1, None, Team::Football),
                sample(1, 1, 1, Some(7), Team::Home),
                sample(1, 1, 1, Some(8), Team::Away),
                sample(1, 1, 2, Some(7), Team::Home),
            ],
        );
        assert_eq!(play.at_frame(FrameId(1)).len(), 3);
        assert!(play.at_frame(FrameId(3)).is_empty());
        assert_eq!(play.football_at(FrameId(1)), Some(Point::new(1.0, 0.0)));
        assert_eq!(play.football_at(FrameId(2)), None);
        assert_eq!(play.side_at(FrameId(1), Side::Away).count(), 1);
        assert_eq!(play.player_track(NflId(7)).count(), 2);
    }

    #[test]
    fn test_first_frame_with_event() {
        let mut frames = vec![
            sample(1, 1, 3, None, Team::Football),
            sample(1, 1, 5, None, Team::Football),
        ];
        frames[0].event = Some("pass_forward".to_owned());
        frames[1].event = Some("pass_forward".to_owned());
        let play = PlayFrames::new(GameId(1), PlayId(1), frames);
        assert_eq!(play.first_frame_with_event("pass_forward"), Some(FrameId(3)));
        assert_eq!(play.first_frame_with_event("pass_shovel"), None);
    }
}
