//! Rates many players across many guilds in one run.
//!
//! Each guild is rated with its own configuration. Players are rated in parallel and
//! custom formulas are compiled once per run through a shared [`FormulaCache`].

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    formula::FormulaCache,
    model::{
        calculate_rating_cached,
        error::RatingError,
        structures::{algorithm::Algorithm, rating_config::RatingConfig, rating_inputs::RatingInputs}
    },
    utils::progress_utils::progress_bar
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchInput {
    pub guilds: Vec<GuildBatch>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildBatch {
    pub guild_id: String,
    pub config: RatingConfig,
    #[serde(default)]
    pub players: Vec<PlayerEntry>
}

/// One player's inputs, keyed by an id the caller chooses. The rating fields sit next
/// to `playerId` in the JSON rather than under a nested object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEntry {
    pub player_id: String,
    #[serde(flatten)]
    pub inputs: RatingInputs
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>
}

impl From<Result<f64, RatingError>> for PlayerOutcome {
    fn from(result: Result<f64, RatingError>) -> Self {
        match result {
            Ok(rating) => PlayerOutcome {
                rating: Some(rating),
                error: None
            },
            Err(e) => PlayerOutcome {
                rating: None,
                error: Some(e.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildReport {
    pub algorithm: Algorithm,
    /// Set when the configuration would be refused on save. Players are still rated
    /// so the report shows how each one is affected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_error: Option<String>,
    pub rated: usize,
    pub failed: usize,
    pub ratings: IndexMap<String, PlayerOutcome>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub run_id: Uuid,
    pub calculated_at: DateTime<Utc>,
    pub guilds: IndexMap<String, GuildReport>
}

impl BatchReport {
    pub fn rated(&self) -> usize {
        self.guilds.values().map(|g| g.rated).sum()
    }

    pub fn failed(&self) -> usize {
        self.guilds.values().map(|g| g.failed).sum()
    }
}

pub fn run_batch(input: &BatchInput) -> BatchReport {
    run_batch_with_cache(input, &FormulaCache::new())
}

/// Rates every player of every guild in `input`. Guilds and players keep their input
/// order in the report; a repeated id replaces the earlier entry.
pub fn run_batch_with_cache(input: &BatchInput, cache: &FormulaCache) -> BatchReport {
    let run_id = Uuid::new_v4();
    let total_players: usize = input.guilds.iter().map(|g| g.players.len()).sum();
    info!(
        "Starting batch {} ({} guilds, {} players)",
        run_id,
        input.guilds.len(),
        total_players
    );

    let bar = progress_bar(total_players as u64, "Rating players");
    let mut guilds = IndexMap::with_capacity(input.guilds.len());

    for guild in &input.guilds {
        let config_error = guild.config.validate().err().map(|e| e.to_string());
        if let Some(e) = &config_error {
            warn!("Guild {} has an invalid configuration: {}", guild.guild_id, e);
        }

        let outcomes: Vec<(String, PlayerOutcome)> = guild
            .players
            .par_iter()
            .map(|player| {
                let outcome = PlayerOutcome::from(calculate_rating_cached(&guild.config, &player.inputs, cache));
                bar.inc(1);
                (player.player_id.clone(), outcome)
            })
            .collect();

        let mut ratings = IndexMap::with_capacity(outcomes.len());
        for (player_id, outcome) in outcomes {
            if ratings.insert(player_id.clone(), outcome).is_some() {
                warn!("Guild {}: duplicate player {}, keeping the last entry", guild.guild_id, player_id);
            }
        }

        let failed = ratings.values().filter(|o| o.error.is_some()).count();
        let report = GuildReport {
            algorithm: guild.config.algorithm,
            config_error,
            rated: ratings.len() - failed,
            failed,
            ratings
        };
        debug!(
            "Guild {} rated with {}: {} ok, {} failed",
            guild.guild_id, report.algorithm, report.rated, report.failed
        );

        if guilds.insert(guild.guild_id.clone(), report).is_some() {
            warn!("Duplicate guild {}, keeping the last entry", guild.guild_id);
        }
    }

    bar.finish_with_message("Players rated");

    let report = BatchReport {
        run_id,
        calculated_at: Utc::now(),
        guilds
    };
    info!(
        "Batch {} complete: {} rated, {} failed, {} formulas compiled",
        run_id,
        report.rated(),
        report.failed(),
        cache.len()
    );

    report
}
