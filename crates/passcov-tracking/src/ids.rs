use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);
    };
}

id_type! {
    /// Identifies a game, e.g. `2018090600`.
    GameId(u64)
}

id_type! {
    /// Identifies a play within a game.
    PlayId(u32)
}

id_type! {
    /// Identifies a sampled timestep within a play. Increases with time.
    FrameId(u32)
}

id_type! {
    /// Identifies a player across the whole dataset.
    NflId(u32)
}

impl FrameId {
    /// The frame `offset` steps after this one.
    #[must_use]
    pub fn offset(self, offset: u32) -> FrameId {
        FrameId(self.0.saturating_add(offset))
    }
}
