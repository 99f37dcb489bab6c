use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The rating algorithm a guild has chosen. Exactly one is active per configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    WeightedAverage,
    PeakMmr,
    Custom,
    Ascendancy
}
