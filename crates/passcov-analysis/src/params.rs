use serde::{Deserialize, Serialize};

/// Tunable constants of the receiver workflow.
///
/// Missing fields in a serialized parameter file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Frames in the trajectory window, starting at the release frame.
    pub frame_count: u32,
    /// Maximum perpendicular distance (yards) from the trajectory line for a
    /// player to be considered.
    pub yards_around: f64,
    /// Ranked candidates kept per play.
    pub max_receivers: usize,
    /// Nearest defenders kept per candidate.
    pub max_defenders: usize,
    /// Release events, in priority order.
    pub pass_events: Vec<String>,
}

impl AnalysisParams {
    pub const DEFAULT_FRAME_COUNT: u32 = 5;
    pub const DEFAULT_YARDS_AROUND: f64 = 10.0;
    pub const DEFAULT_MAX_RECEIVERS: usize = 3;
    pub const DEFAULT_MAX_DEFENDERS: usize = 2;
    pub const DEFAULT_PASS_EVENTS: [&str; 2] = ["pass_forward", "pass_shovel"];
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            frame_count: Self::DEFAULT_FRAME_COUNT,
            yards_around: Self::DEFAULT_YARDS_AROUND,
            max_receivers: Self::DEFAULT_MAX_RECEIVERS,
            max_defenders: Self::DEFAULT_MAX_DEFENDERS,
            pass_events: Self::DEFAULT_PASS_EVENTS.map(String::from).to_vec(),
        }
    }
}
