use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// A game-mode bucket with its own current/peak rating and games-played count.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Playlist {
    Ones,
    Twos,
    Threes,
    Fours
}
