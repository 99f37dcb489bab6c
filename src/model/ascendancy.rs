use strum::IntoEnumIterator;

use super::finite;
use crate::model::{
    error::RatingError,
    structures::{
        playlist::Playlist,
        rating_config::AscendancyWeights,
        rating_inputs::{PlaylistRating, RatingInputs}
    }
};

/// Blends current and peak rating of the playlist with the highest current rating:
/// `weights.current * current + weights.peak * peak`.
///
/// Both values come from that one playlist; they are not maximized independently.
/// Ties go to the earlier playlist (ones before twos, and so on).
pub fn ascendancy(weights: &AscendancyWeights, inputs: &RatingInputs) -> Result<f64, RatingError> {
    if !weights.current.is_finite() || !weights.peak.is_finite() || weights.current < 0.0 || weights.peak < 0.0 {
        return Err(RatingError::InvalidWeights(format!(
            "ascendancy weights must be finite and non-negative (got current {}, peak {})",
            weights.current, weights.peak
        )));
    }
    if weights.current + weights.peak == 0.0 {
        return Err(RatingError::InvalidWeights(
            "ascendancy weights must not sum to 0".to_string()
        ));
    }

    let best = leading_playlist(inputs);
    finite(weights.current * best.current + weights.peak * best.peak)
}

fn leading_playlist(inputs: &RatingInputs) -> PlaylistRating {
    Playlist::iter()
        .map(|p| inputs.rating(p))
        .reduce(|best, candidate| {
            if candidate.current > best.current {
                candidate
            } else {
                best
            }
        })
        .unwrap_or_default()
}
