use crate::{
    batch::PlayerEntry,
    model::structures::rating_inputs::{PlaylistRating, RatingInputs}
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Builds inputs from `(current, peak, games)` for ones, twos, threes and fours, in that order.
pub fn inputs(values: [(f64, f64, u32); 4]) -> RatingInputs {
    let [ones, twos, threes, fours] = values;
    RatingInputs {
        ones: PlaylistRating::new(ones.0, ones.1),
        twos: PlaylistRating::new(twos.0, twos.1),
        threes: PlaylistRating::new(threes.0, threes.1),
        fours: PlaylistRating::new(fours.0, fours.1),
        ones_games: ones.2,
        twos_games: twos.2,
        threes_games: threes.2,
        fours_games: fours.2
    }
}

/// Plausible random inputs, reproducible for a given seed. Peak is never below current
/// and roughly one playlist in five is left unplayed.
pub fn generate_inputs(seed: u64) -> RatingInputs {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let playlist = |rng: &mut ChaCha8Rng| {
        let current = rng.random_range(600.0..=2200.0);
        let peak = current + rng.random_range(0.0..=300.0);
        let games = if rng.random_bool(0.2) {
            0
        } else {
            rng.random_range(1..200)
        };
        (current, peak, games)
    };

    inputs([
        playlist(&mut rng),
        playlist(&mut rng),
        playlist(&mut rng),
        playlist(&mut rng)
    ])
}

pub fn generate_players(n: usize, seed: u64) -> Vec<PlayerEntry> {
    (0..n)
        .map(|i| PlayerEntry {
            player_id: format!("player-{}", i + 1),
            inputs: generate_inputs(seed.wrapping_add(i as u64))
        })
        .collect()
}
