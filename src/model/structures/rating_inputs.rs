use serde::{Deserialize, Serialize};

use super::playlist::Playlist;

/// Current and highest-ever rating in one playlist.
///
/// `peak >= current` is expected but not enforced; historical data can be inconsistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistRating {
    #[serde(default)]
    pub current: f64,
    #[serde(default)]
    pub peak: f64
}

impl PlaylistRating {
    pub fn new(current: f64, peak: f64) -> PlaylistRating {
        PlaylistRating { current, peak }
    }
}

/// Per-calculation snapshot of one player's ratings and games played.
///
/// Total games is not stored; [`RatingInputs::total_games`] derives it from the
/// per-playlist counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingInputs {
    #[serde(default)]
    pub ones: PlaylistRating,
    #[serde(default)]
    pub twos: PlaylistRating,
    #[serde(default)]
    pub threes: PlaylistRating,
    #[serde(default)]
    pub fours: PlaylistRating,
    #[serde(default)]
    pub ones_games: u32,
    #[serde(default)]
    pub twos_games: u32,
    #[serde(default)]
    pub threes_games: u32,
    #[serde(default)]
    pub fours_games: u32
}

impl RatingInputs {
    pub fn rating(&self, playlist: Playlist) -> PlaylistRating {
        match playlist {
            Playlist::Ones => self.ones,
            Playlist::Twos => self.twos,
            Playlist::Threes => self.threes,
            Playlist::Fours => self.fours
        }
    }

    pub fn games(&self, playlist: Playlist) -> u32 {
        match playlist {
            Playlist::Ones => self.ones_games,
            Playlist::Twos => self.twos_games,
            Playlist::Threes => self.threes_games,
            Playlist::Fours => self.fours_games
        }
    }

    pub fn total_games(&self) -> u64 {
        self.ones_games as u64 + self.twos_games as u64 + self.threes_games as u64 + self.fours_games as u64
    }
}
