use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::{algorithm::Algorithm, playlist::Playlist};
use crate::{
    formula::validate_formula,
    model::{
        constants::{DEFAULT_ASCENDANCY_CURRENT_WEIGHT, DEFAULT_ASCENDANCY_PEAK_WEIGHT},
        error::ConfigError
    }
};

/// One optional value per playlist. Missing entries read as the type's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerPlaylist<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ones: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twos: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threes: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fours: Option<T>
}

impl<T: Copy + Default> PerPlaylist<T> {
    pub fn get(&self, playlist: Playlist) -> T {
        match playlist {
            Playlist::Ones => self.ones,
            Playlist::Twos => self.twos,
            Playlist::Threes => self.threes,
            Playlist::Fours => self.fours
        }
        .unwrap_or_default()
    }
}

/// Fraction of the weighted average each playlist contributes.
pub type PlaylistWeights = PerPlaylist<f64>;

/// Games a player needs in a playlist before it counts towards the weighted average.
pub type MinGamesPlayed = PerPlaylist<u32>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AscendancyWeights {
    pub current: f64,
    pub peak: f64
}

impl Default for AscendancyWeights {
    fn default() -> Self {
        AscendancyWeights {
            current: DEFAULT_ASCENDANCY_CURRENT_WEIGHT,
            peak: DEFAULT_ASCENDANCY_PEAK_WEIGHT
        }
    }
}

/// A guild's rating configuration, persisted by the caller and passed in whole.
///
/// Only the fields of the active `algorithm` are read; the others are kept so that stored
/// configurations survive switching algorithms back and forth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingConfig {
    pub algorithm: Algorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<PlaylistWeights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_games_played: Option<MinGamesPlayed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascendancy_weights: Option<AscendancyWeights>,
    /// Set by the settings UI after a successful validation. A display hint only:
    /// formulas are re-validated before every evaluation regardless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula_validated: Option<bool>
}

impl RatingConfig {
    fn with_algorithm(algorithm: Algorithm) -> RatingConfig {
        RatingConfig {
            algorithm,
            weights: None,
            min_games_played: None,
            custom_formula: None,
            ascendancy_weights: None,
            formula_validated: None
        }
    }

    pub fn weighted_average(weights: PlaylistWeights, min_games_played: Option<MinGamesPlayed>) -> RatingConfig {
        RatingConfig {
            weights: Some(weights),
            min_games_played,
            ..RatingConfig::with_algorithm(Algorithm::WeightedAverage)
        }
    }

    pub fn peak_mmr() -> RatingConfig {
        RatingConfig::with_algorithm(Algorithm::PeakMmr)
    }

    pub fn ascendancy(weights: Option<AscendancyWeights>) -> RatingConfig {
        RatingConfig {
            ascendancy_weights: weights,
            ..RatingConfig::with_algorithm(Algorithm::Ascendancy)
        }
    }

    pub fn custom(formula: impl Into<String>) -> RatingConfig {
        RatingConfig {
            custom_formula: Some(formula.into()),
            ..RatingConfig::with_algorithm(Algorithm::Custom)
        }
    }

    pub fn weights(&self) -> PlaylistWeights {
        self.weights.unwrap_or_default()
    }

    pub fn min_games_played(&self) -> MinGamesPlayed {
        self.min_games_played.unwrap_or_default()
    }

    /// Falls back to `{current: 0.25, peak: 0.75}` when unset.
    pub fn ascendancy_weights(&self) -> AscendancyWeights {
        self.ascendancy_weights.unwrap_or_default()
    }

    /// The custom formula, if one is set and is not blank.
    pub fn custom_formula(&self) -> Option<&str> {
        self.custom_formula.as_deref().filter(|f| !f.trim().is_empty())
    }

    /// Checks made before a configuration is persisted. Only the active algorithm's
    /// fields are inspected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.algorithm {
            Algorithm::WeightedAverage => {
                let weights = self.weights();
                for playlist in Playlist::iter() {
                    check_weight(&format!("weights.{}", playlist), weights.get(playlist))?;
                }
                if Playlist::iter().all(|p| weights.get(p) == 0.0) {
                    return Err(ConfigError::NoWeights);
                }
                Ok(())
            }
            Algorithm::PeakMmr => Ok(()),
            Algorithm::Ascendancy => {
                let weights = self.ascendancy_weights();
                check_weight("ascendancyWeights.current", weights.current)?;
                check_weight("ascendancyWeights.peak", weights.peak)?;
                if weights.current + weights.peak == 0.0 {
                    return Err(ConfigError::ZeroAscendancyWeights);
                }
                Ok(())
            }
            Algorithm::Custom => {
                let formula = self.custom_formula().ok_or(ConfigError::MissingFormula)?;
                let result = validate_formula(formula);
                if !result.valid {
                    return Err(ConfigError::InvalidFormula(result.error.unwrap_or_default()));
                }
                Ok(())
            }
        }
    }
}

fn check_weight(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidWeight {
            field: field.to_string(),
            value
        });
    }
    Ok(())
}
