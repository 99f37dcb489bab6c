use approx::assert_abs_diff_eq;
use guild_mmr::{
    calculate_rating,
    formula::{formula_reference, FormulaCache},
    model::calculate_rating_cached,
    test_formula,
    utils::test_utils::{generate_inputs, inputs},
    validate_formula, Algorithm, ConfigError, RatingConfig, RatingError, RatingInputs
};
use strum::IntoEnumIterator;

use crate::common::init_test_env;

fn config(json: &str) -> RatingConfig {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_stored_weighted_average_config() {
    init_test_env();
    let config = config(r#"{ "algorithm": "WEIGHTED_AVERAGE", "weights": { "ones": 0.6, "twos": 0.4 } }"#);
    let inputs = inputs([(1000.0, 1000.0, 0), (1200.0, 1200.0, 0), (0.0, 0.0, 0), (0.0, 0.0, 0)]);

    assert!(config.validate().is_ok());
    assert_abs_diff_eq!(calculate_rating(&config, &inputs).unwrap(), 1080.0, epsilon = 1e-9);
}

#[test]
fn test_stored_peak_config() {
    init_test_env();
    let config = config(r#"{ "algorithm": "PEAK_MMR" }"#);
    let inputs = inputs([(1400.0, 1500.0, 20), (1700.0, 1800.0, 35), (0.0, 0.0, 0), (0.0, 0.0, 0)]);

    assert_abs_diff_eq!(calculate_rating(&config, &inputs).unwrap(), 1800.0);
}

#[test]
fn test_stored_custom_config() {
    init_test_env();
    let config = config(
        r#"{ "algorithm": "CUSTOM", "customFormula": "(ones + twos) / 2 * 1.1", "formulaValidated": true }"#
    );
    let inputs = inputs([(800.0, 800.0, 1), (1000.0, 1000.0, 1), (0.0, 0.0, 0), (0.0, 0.0, 0)]);

    assert_abs_diff_eq!(calculate_rating(&config, &inputs).unwrap(), 990.0, epsilon = 1e-9);
}

#[test]
fn test_custom_max_formula() {
    init_test_env();
    let config = config(r#"{ "algorithm": "CUSTOM", "customFormula": "max(ones, twos) * 0.9" }"#);
    let inputs = inputs([(1000.0, 1000.0, 5), (1100.0, 1100.0, 5), (0.0, 0.0, 0), (0.0, 0.0, 0)]);

    assert_abs_diff_eq!(calculate_rating(&config, &inputs).unwrap(), 990.0, epsilon = 1e-9);
}

#[test]
fn test_evaluation_is_deterministic() {
    init_test_env();
    let config = RatingConfig::custom("sqrt(pow(ones, 2) + pow(twos, 2)) / (totalGames + 1) % 7 + round(threes / 3)");

    for seed in 0..50 {
        let inputs = generate_inputs(seed);
        let first = calculate_rating(&config, &inputs).unwrap();
        let second = calculate_rating(&config, &inputs).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

#[test]
fn test_stored_ascendancy_config_without_weights() {
    init_test_env();
    let config = config(r#"{ "algorithm": "ASCENDANCY" }"#);
    let inputs = inputs([(1000.0, 1400.0, 10), (900.0, 2000.0, 10), (950.0, 1000.0, 10), (0.0, 0.0, 0)]);

    assert_abs_diff_eq!(calculate_rating(&config, &inputs).unwrap(), 1300.0);
}

#[test]
fn test_unknown_variable_is_rejected_before_saving() {
    init_test_env();
    let result = validate_formula("ones + unknownVar");
    assert!(!result.valid);
    assert!(result.error.unwrap().contains("unknownVar"));

    let config = RatingConfig::custom("ones + unknownVar");
    assert!(matches!(config.validate(), Err(ConfigError::InvalidFormula(_))));
    assert!(matches!(
        calculate_rating(&config, &RatingInputs::default()),
        Err(RatingError::FormulaError(_))
    ));
}

#[test]
fn test_custom_weighted_sum_matches_weighted_average() {
    init_test_env();
    let custom = RatingConfig::custom("0.1 * ones + 0.2 * twos + 0.3 * threes + 0.4 * fours");
    let builtin = config(
        r#"{ "algorithm": "WEIGHTED_AVERAGE", "weights": { "ones": 0.1, "twos": 0.2, "threes": 0.3, "fours": 0.4 } }"#
    );

    for seed in 0..100 {
        let inputs = generate_inputs(seed);
        assert_abs_diff_eq!(
            calculate_rating(&custom, &inputs).unwrap(),
            calculate_rating(&builtin, &inputs).unwrap(),
            epsilon = 1e-6
        );
    }
}

#[test]
fn test_weighted_average_stays_within_qualifying_ratings() {
    init_test_env();
    let config = config(
        r#"{
            "algorithm": "WEIGHTED_AVERAGE",
            "weights": { "ones": 1, "twos": 2, "threes": 3, "fours": 4 },
            "minGamesPlayed": { "ones": 50, "twos": 50, "threes": 50, "fours": 50 }
        }"#
    );

    for seed in 0..200 {
        let inputs = generate_inputs(seed);
        let qualifying: Vec<f64> = [
            (inputs.ones.current, inputs.ones_games),
            (inputs.twos.current, inputs.twos_games),
            (inputs.threes.current, inputs.threes_games),
            (inputs.fours.current, inputs.fours_games)
        ]
        .iter()
        .filter(|(_, games)| *games >= 50)
        .map(|(current, _)| *current)
        .collect();

        match calculate_rating(&config, &inputs) {
            Ok(rating) => {
                let min = qualifying.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = qualifying.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                assert!(rating >= min - 1e-9 && rating <= max + 1e-9);
            }
            Err(e) => {
                assert_eq!(e, RatingError::NoQualifyingPlaylists);
                assert!(qualifying.is_empty());
            }
        }
    }
}

#[test]
fn test_every_algorithm_agrees_with_cached_path() {
    init_test_env();
    let cache = FormulaCache::new();
    let configs: Vec<RatingConfig> = Algorithm::iter()
        .map(|algorithm| match algorithm {
            Algorithm::WeightedAverage => config(r#"{ "algorithm": "WEIGHTED_AVERAGE", "weights": { "twos": 1 } }"#),
            Algorithm::PeakMmr => RatingConfig::peak_mmr(),
            Algorithm::Custom => RatingConfig::custom("totalGames >= 300 ? max(ones, twos) : round(ones * 0.9)"),
            Algorithm::Ascendancy => RatingConfig::ascendancy(None)
        })
        .collect();

    for seed in 0..25 {
        let inputs = generate_inputs(seed);
        for config in &configs {
            assert_eq!(
                calculate_rating(config, &inputs),
                calculate_rating_cached(config, &inputs, &cache)
            );
        }
    }
}

#[test]
fn test_preview_uses_sample_player() {
    init_test_env();
    let preview = test_formula("max(ones, twos, threes, fours)", None);

    assert!(preview.validation.valid);
    assert_abs_diff_eq!(preview.result.unwrap(), preview.inputs.twos.current);
}

#[test]
fn test_reference_lists_every_variable() {
    init_test_env();
    let reference = formula_reference();
    let names: Vec<&str> = reference.variables.iter().map(|v| v.name).collect();

    for name in [
        "ones",
        "twos",
        "threes",
        "fours",
        "onesGames",
        "twosGames",
        "threesGames",
        "foursGames",
        "totalGames"
    ] {
        assert!(names.contains(&name), "missing {}", name);
        assert!(validate_formula(name).valid);
    }
}
