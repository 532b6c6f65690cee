use std::collections::BTreeMap;

use passcov_tracking::{
    frame::{Team, TrackedFrame},
    ids::{FrameId, GameId, NflId, PlayId},
    metadata::{GameRecord, PlayMetadata, PlayRecord},
    play::PlayFrames,
};

pub(crate) const GAME: GameId = GameId(2_018_090_600);
pub(crate) const HOME: &str = "PHI";
pub(crate) const AWAY: &str = "ATL";

/// Builds synthetic plays frame by frame. Rows keep insertion order.
#[derive(Debug)]
pub(crate) struct PlayBuilder {
    play_id: PlayId,
    rows: Vec<TrackedFrame>,
    events: BTreeMap<u32, String>,
}

impl PlayBuilder {
    pub(crate) fn new(play_id: u32) -> Self {
        Self {
            play_id: PlayId(play_id),
            rows: vec![],
            events: BTreeMap::new(),
        }
    }

    fn row(
        &mut self,
        frame: u32,
        nfl_id: Option<u32>,
        team: Team,
        x: f64,
        y: f64,
    ) -> &mut TrackedFrame {
        self.rows.push(TrackedFrame {
            game_id: GAME,
            play_id: self.play_id,
            frame_id: FrameId(frame),
            nfl_id: nfl_id.map(NflId),
            team,
            position: None,
            x,
            y,
            speed: None,
            dir: None,
            event: None,
        });
        self.rows.last_mut().unwrap()
    }

    pub(crate) fn ball(mut self, frame: u32, x: f64, y: f64) -> Self {
        self.row(frame, None, Team::Football, x, y);
        self
    }

    pub(crate) fn player(mut self, frame: u32, id: u32, team: Team, x: f64, y: f64) -> Self {
        self.row(frame, Some(id), team, x, y);
        self
    }

    pub(crate) fn player_with(
        mut self,
        frame: u32,
        id: u32,
        team: Team,
        (x, y): (f64, f64),
        position: &str,
        (speed, dir): (f64, f64),
    ) -> Self {
        let row = self.row(frame, Some(id), team, x, y);
        row.position = Some(position.to_owned());
        row.speed = Some(speed);
        row.dir = Some(dir);
        self
    }

    /// Tags every row of `frame` with `label`, as tracking exports do.
    pub(crate) fn event(mut self, frame: u32, label: &str) -> Self {
        self.events.insert(frame, label.to_owned());
        self
    }

    pub(crate) fn build(mut self) -> PlayFrames {
        for row in &mut self.rows {
            if let Some(label) = self.events.get(&row.frame_id.0) {
                row.event = Some(label.clone());
            }
        }
        PlayFrames::new(GAME, self.play_id, self.rows)
    }

    pub(crate) fn into_rows(self) -> Vec<TrackedFrame> {
        self.build().frames().to_vec()
    }
}

/// Metadata in which `HOME` (team `home`) has possession on every listed play.
pub(crate) fn home_offense(play_ids: &[u32]) -> PlayMetadata {
    let games = [GameRecord {
        game_id: GAME,
        home_team_abbr: HOME.to_owned(),
        visitor_team_abbr: AWAY.to_owned(),
    }];
    let plays = play_ids
        .iter()
        .map(|&play_id| PlayRecord {
            game_id: GAME,
            play_id: PlayId(play_id),
            possession_team: HOME.to_owned(),
        })
        .collect::<Vec<_>>();
    PlayMetadata::join(&games, &plays)
}
