use strum::IntoEnumIterator;

use super::finite;
use crate::model::{
    error::RatingError,
    structures::{playlist::Playlist, rating_inputs::RatingInputs}
};

/// Highest peak rating among the playlists the player has actually played.
pub fn peak_mmr(inputs: &RatingInputs) -> Result<f64, RatingError> {
    Playlist::iter()
        .filter(|p| inputs.games(*p) > 0)
        .map(|p| inputs.rating(p).peak)
        .max_by(|a, b| a.total_cmp(b))
        .ok_or(RatingError::NoData)
        .and_then(finite)
}
