use crate::model::structures::rating_inputs::{PlaylistRating, RatingInputs};

// Formula limits
pub const MAX_FORMULA_LENGTH: usize = 2_000;
pub const MAX_FORMULA_DEPTH: usize = 64;
pub const MAX_FORMULA_NODES: usize = 512;
// Ascendancy defaults
pub const DEFAULT_ASCENDANCY_CURRENT_WEIGHT: f64 = 0.25;
pub const DEFAULT_ASCENDANCY_PEAK_WEIGHT: f64 = 0.75;

/// A typical active player, used to preview formulas before any real data is at hand.
pub fn sample_inputs() -> RatingInputs {
    RatingInputs {
        ones: PlaylistRating::new(1050.0, 1180.0),
        twos: PlaylistRating::new(1320.0, 1410.0),
        threes: PlaylistRating::new(1255.0, 1300.0),
        fours: PlaylistRating::new(980.0, 1020.0),
        ones_games: 45,
        twos_games: 210,
        threes_games: 160,
        fours_games: 12
    }
}
