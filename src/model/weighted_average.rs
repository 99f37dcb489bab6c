use strum::IntoEnumIterator;

use super::finite;
use crate::model::{
    error::RatingError,
    structures::{
        playlist::Playlist,
        rating_config::{MinGamesPlayed, PlaylistWeights},
        rating_inputs::RatingInputs
    }
};

/// Weighted mean of current ratings over the playlists that meet their games-played
/// threshold. A playlist below its threshold is left out of both the sum and the
/// normalizing weight total, so the remaining weights are rescaled to sum to one.
pub fn weighted_average(
    weights: &PlaylistWeights,
    min_games_played: &MinGamesPlayed,
    inputs: &RatingInputs
) -> Result<f64, RatingError> {
    let mut qualifying = Vec::with_capacity(4);

    for playlist in Playlist::iter() {
        let weight = weights.get(playlist);
        if !weight.is_finite() || weight < 0.0 {
            return Err(RatingError::InvalidWeights(format!(
                "weight for {} must be a finite, non-negative number (got {})",
                playlist, weight
            )));
        }

        if inputs.games(playlist) >= min_games_played.get(playlist) {
            qualifying.push((weight, inputs.rating(playlist).current));
        }
    }

    // Scaled by the largest weight so that sums of huge weights cannot overflow
    let largest = qualifying.iter().map(|(weight, _)| *weight).fold(0.0, f64::max);
    if largest == 0.0 {
        return Err(RatingError::NoQualifyingPlaylists);
    }

    let (sum, weight_total) = qualifying
        .iter()
        .fold((0.0, 0.0), |(sum, total), (weight, current)| {
            let scaled = weight / largest;
            (sum + scaled * current, total + scaled)
        });

    finite(sum / weight_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::inputs;
    use approx::assert_abs_diff_eq;

    fn weights(ones: f64, twos: f64, threes: f64, fours: f64) -> PlaylistWeights {
        PlaylistWeights {
            ones: Some(ones),
            twos: Some(twos),
            threes: Some(threes),
            fours: Some(fours)
        }
    }

    #[test]
    fn test_basic_weighted_average() {
        let inputs = inputs([(1000.0, 1000.0, 0), (1200.0, 1200.0, 0), (0.0, 0.0, 0), (0.0, 0.0, 0)]);
        let result = weighted_average(
            &PlaylistWeights {
                ones: Some(0.6),
                twos: Some(0.4),
                ..Default::default()
            },
            &MinGamesPlayed::default(),
            &inputs
        );
        assert_abs_diff_eq!(result.unwrap(), 1080.0, epsilon = 1e-9);
    }

    #[test]
    fn test_normalization_is_scale_free() {
        for scale in [1.0, 10.0, 1_000.0, 100_000.0] {
            let inputs = inputs([
                (13.0 * scale, 0.0, 5),
                (29.0 * scale, 0.0, 5),
                (0.0, 0.0, 0),
                (0.0, 0.0, 0)
            ]);
            let result = weighted_average(&weights(0.5, 0.5, 0.0, 0.0), &MinGamesPlayed::default(), &inputs).unwrap();
            assert_abs_diff_eq!(result, (13.0 * scale + 29.0 * scale) / 2.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let inputs = inputs([(1000.0, 0.0, 1), (2000.0, 0.0, 1), (0.0, 0.0, 0), (0.0, 0.0, 0)]);
        let result = weighted_average(&weights(3.0, 1.0, 0.0, 0.0), &MinGamesPlayed::default(), &inputs).unwrap();
        assert_abs_diff_eq!(result, 1250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_threshold_excludes_playlist_from_both_sides() {
        let inputs = inputs([(1000.0, 0.0, 50), (2000.0, 0.0, 4), (1500.0, 0.0, 20), (0.0, 0.0, 0)]);
        let thresholds = MinGamesPlayed {
            twos: Some(5),
            ..Default::default()
        };
        let result = weighted_average(&weights(0.25, 0.5, 0.25, 0.0), &thresholds, &inputs).unwrap();

        // twos is ignored entirely: (0.25 * 1000 + 0.25 * 1500) / 0.5
        assert_abs_diff_eq!(result, 1250.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let inputs = inputs([(1000.0, 0.0, 10), (0.0, 0.0, 0), (0.0, 0.0, 0), (0.0, 0.0, 0)]);
        let thresholds = MinGamesPlayed {
            ones: Some(10),
            ..Default::default()
        };
        let result = weighted_average(&weights(1.0, 0.0, 0.0, 0.0), &thresholds, &inputs).unwrap();
        assert_abs_diff_eq!(result, 1000.0);
    }

    #[test]
    fn test_no_qualifying_playlists() {
        let inputs = inputs([(1000.0, 0.0, 1), (1200.0, 0.0, 1), (0.0, 0.0, 0), (0.0, 0.0, 0)]);
        let thresholds = MinGamesPlayed {
            ones: Some(10),
            twos: Some(10),
            ..Default::default()
        };
        assert_eq!(
            weighted_average(&weights(0.5, 0.5, 0.0, 0.0), &thresholds, &inputs),
            Err(RatingError::NoQualifyingPlaylists)
        );
    }

    #[test]
    fn test_all_weights_zero() {
        let inputs = inputs([(1000.0, 0.0, 1), (1200.0, 0.0, 1), (0.0, 0.0, 0), (0.0, 0.0, 0)]);
        assert_eq!(
            weighted_average(&PlaylistWeights::default(), &MinGamesPlayed::default(), &inputs),
            Err(RatingError::NoQualifyingPlaylists)
        );
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let inputs = inputs([(1000.0, 0.0, 1), (2000.0, 0.0, 1), (0.0, 0.0, 0), (0.0, 0.0, 0)]);
        let result = weighted_average(&weights(1e308, 1e308, 0.0, 0.0), &MinGamesPlayed::default(), &inputs);
        assert_abs_diff_eq!(result.unwrap(), 1500.0);

        let result = weighted_average(&weights(f64::MAX, 0.5, 0.0, 0.0), &MinGamesPlayed::default(), &inputs);
        assert_abs_diff_eq!(result.unwrap(), 1000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_overflowing_ratings_are_not_returned() {
        let inputs = inputs([(f64::MAX, 0.0, 1), (f64::MAX, 0.0, 1), (0.0, 0.0, 0), (0.0, 0.0, 0)]);
        assert_eq!(
            weighted_average(&weights(1.0, 1.0, 0.0, 0.0), &MinGamesPlayed::default(), &inputs),
            Err(RatingError::NonFiniteRating)
        );
    }

    #[test]
    fn test_negative_weight() {
        let inputs = inputs([(1000.0, 0.0, 1), (1200.0, 0.0, 1), (0.0, 0.0, 0), (0.0, 0.0, 0)]);
        assert!(matches!(
            weighted_average(&weights(1.0, -0.5, 0.0, 0.0), &MinGamesPlayed::default(), &inputs),
            Err(RatingError::InvalidWeights(_))
        ));
    }
}
