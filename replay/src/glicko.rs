//! Glicko-1 ratings for players seen in battle results
//!
//! Results accumulate over a rating period. [`Glicko::update`] then moves
//! every player's rating at once, using the ratings from the start of the
//! period for their opponents.

use std::collections::HashMap;
use std::f64::consts::{LN_10, PI};

use tracing::debug;

use crate::result::{BattleResult, Winner};

const Q: f64 = LN_10 / 400.0;

pub const INITIAL_VALUE: f64 = 1500.0;
pub const MAX_DEVIATION: f64 = 350.0;
pub const MIN_DEVIATION: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub value: f64,
    pub deviation: f64,
}

impl Rating {
    pub const INITIAL: Rating = Rating {
        value: INITIAL_VALUE,
        deviation: MAX_DEVIATION,
    };
}

impl Default for Rating {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Weight that shrinks the impact of an uncertain opponent
fn g(deviation: f64) -> f64 {
    1.0 / (1.0 + 3.0 * Q * Q * deviation * deviation / (PI * PI)).sqrt()
}

fn expected_score(rating: Rating, opponent: Rating) -> f64 {
    1.0 / (1.0 + 10f64.powf(-g(opponent.deviation) * (rating.value - opponent.value) / 400.0))
}

/// Probability that `rating` beats `opponent`, counting the uncertainty of
/// both
pub fn chance_to_win(rating: Rating, opponent: Rating) -> f64 {
    let deviation = rating.deviation.hypot(opponent.deviation);
    1.0 / (1.0 + 10f64.powf(-g(deviation) * (rating.value - opponent.value) / 400.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Game {
    opponent: u64,
    score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Glicko {
    ratings: HashMap<u64, Rating>,
    period: HashMap<u64, Vec<Game>>,
}

impl Glicko {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rating, or the initial rating for an unseen player
    pub fn get(&self, id: u64) -> Rating {
        self.ratings.get(&id).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn add_game(&mut self, side1: u64, side2: u64, winner: Winner) {
        let score = winner.side1_score();
        self.period.entry(side1).or_default().push(Game {
            opponent: side2,
            score,
        });
        self.period.entry(side2).or_default().push(Game {
            opponent: side1,
            score: 1.0 - score,
        });
    }

    pub fn add_result(&mut self, result: &BattleResult) {
        self.add_game(result.side1.id, result.side2.id, result.winner);
    }

    /// Close the rating period, updating everyone who played in it
    pub fn update(&mut self) {
        let period = std::mem::take(&mut self.period);
        let updated: Vec<(u64, Rating)> = period
            .iter()
            .map(|(id, games)| (*id, self.rate(self.get(*id), games)))
            .collect();
        debug!("Updated ratings for {} players", updated.len());
        self.ratings.extend(updated);
    }

    fn rate(&self, rating: Rating, games: &[Game]) -> Rating {
        let mut variance_inverse = 0.0;
        let mut improvement = 0.0;
        for game in games {
            let opponent = self.get(game.opponent);
            let weight = g(opponent.deviation);
            let expected = expected_score(rating, opponent);
            variance_inverse += weight * weight * expected * (1.0 - expected);
            improvement += weight * (game.score - expected);
        }
        // d^-2 = q^2 * sum(g^2 * E * (1 - E))
        let precision = 1.0 / (rating.deviation * rating.deviation) + Q * Q * variance_inverse;
        Rating {
            value: rating.value + Q / precision * improvement,
            deviation: (1.0 / precision).sqrt().clamp(MIN_DEVIATION, MAX_DEVIATION),
        }
    }
}
