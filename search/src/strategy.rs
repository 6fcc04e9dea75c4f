//! Ways of picking a selection, for the AI or as a model of the foe

use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tactician_battle::engine::{self, ActualDamage, OtherAction, UsedMove};
use tactician_battle::{AnyPokemon, Environment, Selection, Team};
use tracing::{debug, info};

use crate::depth::Depth;
use crate::evaluate::AllEvaluate;
use crate::expectiminimax::{Searcher, State};
use crate::predict::{GENERAL_SWITCH_PROBABILITY, WeightedSelection, predict_random_selection, remove_unlikely_foe_selections};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionProbability {
    pub selection: Selection,
    pub probability: f64,
}

/// Normalized distribution over a side's selections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionProbabilities(Vec<SelectionProbability>);

impl SelectionProbabilities {
    pub fn certain(selection: Selection) -> Self {
        Self(vec![SelectionProbability {
            selection,
            probability: 1.0,
        }])
    }

    /// Scale weights to sum to 1. All-zero weights become uniform.
    pub fn from_weighted(weighted: &[WeightedSelection]) -> Self {
        let total: f64 = weighted.iter().map(|weighted| weighted.weight).sum();
        let uniform = 1.0 / weighted.len() as f64;
        Self(
            weighted
                .iter()
                .map(|weighted| SelectionProbability {
                    selection: weighted.selection,
                    probability: if total > 0.0 {
                        weighted.weight / total
                    } else {
                        uniform
                    },
                })
                .collect(),
        )
    }

    pub fn to_weighted(&self) -> Vec<WeightedSelection> {
        self.0
            .iter()
            .map(|value| WeightedSelection::new(value.selection, value.probability))
            .collect()
    }

    /// Most likely selection; the earliest wins ties
    pub fn best(&self) -> Option<Selection> {
        self.0
            .iter()
            .copied()
            .reduce(|best, candidate| {
                if candidate.probability > best.probability {
                    candidate
                } else {
                    best
                }
            })
            .map(|best| best.selection)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionProbability> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The user's distribution, plus the other side's as the strategy
/// predicted it. `predicted_other` is empty for strategies that do not
/// model the other side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BothSelectionProbabilities {
    pub user: SelectionProbabilities,
    pub predicted_other: SelectionProbabilities,
}

pub trait Strategy: Send + Sync {
    /// Weigh `user_selections`. Only called with more than one selection.
    fn weigh(
        &self,
        user: &Team,
        user_selections: &[Selection],
        other: &Team,
        other_selections: &[Selection],
        environment: &Environment,
    ) -> BothSelectionProbabilities;

    fn select(
        &self,
        user: &Team,
        user_selections: &[Selection],
        other: &Team,
        other_selections: &[Selection],
        environment: &Environment,
    ) -> BothSelectionProbabilities {
        assert!(!user_selections.is_empty(), "a side always has a selection");
        if let [only] = user_selections {
            return BothSelectionProbabilities {
                user: SelectionProbabilities::certain(*only),
                predicted_other: SelectionProbabilities::default(),
            };
        }
        self.weigh(user, user_selections, other, other_selections, environment)
    }
}

fn pick_best(scored: impl IntoIterator<Item = (Selection, f64)>) -> SelectionProbabilities {
    let best = scored
        .into_iter()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best });
    best.map(|(selection, _)| SelectionProbabilities::certain(selection))
        .unwrap_or_default()
}

/// Searches ahead with expectiminimax, predicting the foe with
/// `foe_strategy`
pub struct Expectimax {
    evaluate: AllEvaluate,
    depth: Depth,
    foe_strategy: Box<dyn Strategy>,
}

impl Expectimax {
    pub fn new(evaluate: AllEvaluate, depth: Depth, foe_strategy: Box<dyn Strategy>) -> Self {
        Self {
            evaluate,
            depth,
            foe_strategy,
        }
    }
}

impl Strategy for Expectimax {
    fn weigh(
        &self,
        ai: &Team,
        ai_selections: &[Selection],
        foe: &Team,
        foe_selections: &[Selection],
        environment: &Environment,
    ) -> BothSelectionProbabilities {
        // Unrevealed members cannot be searched
        let mut foe = foe.clone();
        foe.forget_hidden();

        let predicted = self
            .foe_strategy
            .select(&foe, foe_selections, ai, ai_selections, environment)
            .user;
        for value in predicted.iter() {
            debug!(
                "Predicted {:.1}% chance of {}",
                value.probability * 100.0,
                describe(&foe, value.selection)
            );
        }

        let searcher = Searcher::new(self.evaluate.get(ai.generation()), self.foe_strategy.as_ref());
        let state = State::new(ai.clone(), foe, *environment, self.depth);
        let ranked = searcher.expectiminimax(
            &state,
            ai_selections,
            &remove_unlikely_foe_selections(&predicted.to_weighted()),
        );
        for scored in &ranked {
            info!(
                "{} for an expected score of {}",
                describe(ai, scored.selection),
                scored.score as i64
            );
        }

        BothSelectionProbabilities {
            user: pick_best(ranked.iter().map(|scored| (scored.selection, scored.score))),
            predicted_other: predicted,
        }
    }
}

fn describe(team: &Team, selection: Selection) -> String {
    match selection {
        Selection::Move(name) => format!("Use {name}"),
        Selection::Switch(switch) => match team.get(switch.index()) {
            Some(pokemon) => format!("Switch to {}", pokemon.species),
            None => format!("Switch to slot {}", switch.index()),
        },
        Selection::Pass => "Pass".to_string(),
    }
}

/// Prior with no knowledge of the position: switches share
/// `switch_probability`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomSelection {
    switch_probability: f64,
}

impl RandomSelection {
    pub fn new(switch_probability: f64) -> Self {
        Self { switch_probability }
    }
}

impl Default for RandomSelection {
    fn default() -> Self {
        Self::new(GENERAL_SWITCH_PROBABILITY)
    }
}

impl Strategy for RandomSelection {
    fn weigh(
        &self,
        _user: &Team,
        user_selections: &[Selection],
        _other: &Team,
        _other_selections: &[Selection],
        _environment: &Environment,
    ) -> BothSelectionProbabilities {
        BothSelectionProbabilities {
            user: SelectionProbabilities::from_weighted(&predict_random_selection(
                user_selections,
                self.switch_probability,
            )),
            predicted_other: SelectionProbabilities::default(),
        }
    }
}

/// Expected damage of a plain hit this turn. Switching scores nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxDamage;

impl Strategy for MaxDamage {
    fn weigh(
        &self,
        user: &Team,
        user_selections: &[Selection],
        other: &Team,
        _other_selections: &[Selection],
        environment: &Environment,
    ) -> BothSelectionProbabilities {
        let scored = user_selections.iter().map(|selection| {
            let score = match selection {
                Selection::Move(name) => {
                    f64::from(engine::calculate_damage(user, *name, false, other, environment))
                        * engine::chance_to_hit(user, *name, other, environment)
                }
                Selection::Switch(_) | Selection::Pass => 0.0,
            };
            (*selection, score)
        });
        BothSelectionProbabilities {
            user: pick_best(scored),
            predicted_other: SelectionProbabilities::default(),
        }
    }
}

/// Greedy one-ply lookahead on the difference in summed HP fractions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetHp;

fn total_hp(team: &Team) -> f64 {
    team.members().iter().map(|pokemon| pokemon.hp_ratio()).sum()
}

impl NetHp {
    fn score(user: &Team, selection: Selection, other: &Team, environment: &Environment) -> f64 {
        let mut user = user.clone();
        let mut other = other.clone();
        let mut environment = *environment;
        match selection {
            Selection::Move(name) => {
                let side_effect = engine::possible_side_effects(name, &user, &other, &environment)
                    .into_iter()
                    .reduce(|best, candidate| {
                        if candidate.probability > best.probability {
                            candidate
                        } else {
                            best
                        }
                    });
                let mut used = UsedMove::plain(selection);
                if let Some(side_effect) = side_effect {
                    used.side_effect = side_effect.effect;
                }
                // Acting as if the other side already moved means Sucker
                // Punch never looks useful
                engine::call_move(
                    &mut user,
                    used,
                    &mut other,
                    OtherAction::Moved,
                    &mut environment,
                    false,
                    ActualDamage::Unknown,
                    false,
                );
            }
            Selection::Switch(switch) => {
                engine::switch_pokemon(&mut user, &mut other, &mut environment, switch.index());
            }
            Selection::Pass => return 0.0,
        }
        total_hp(&user) - total_hp(&other)
    }
}

impl Strategy for NetHp {
    fn weigh(
        &self,
        user: &Team,
        user_selections: &[Selection],
        other: &Team,
        _other_selections: &[Selection],
        environment: &Environment,
    ) -> BothSelectionProbabilities {
        let scored = user_selections
            .iter()
            .map(|selection| (*selection, Self::score(user, *selection, other, environment)));
        BothSelectionProbabilities {
            user: pick_best(scored),
            predicted_other: SelectionProbabilities::default(),
        }
    }
}

/// Uniformly random selection
#[derive(Debug)]
pub struct Random {
    rng: Mutex<SmallRng>,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Random {
    fn weigh(
        &self,
        _user: &Team,
        user_selections: &[Selection],
        _other: &Team,
        _other_selections: &[Selection],
        _environment: &Environment,
    ) -> BothSelectionProbabilities {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        BothSelectionProbabilities {
            user: user_selections
                .choose(&mut *rng)
                .map(|selection| SelectionProbabilities::certain(*selection))
                .unwrap_or_default(),
            predicted_other: SelectionProbabilities::default(),
        }
    }
}

/// Strategy as named in a settings file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategySettings {
    Expectimax {
        depth: u32,
        #[serde(default)]
        single_depth: u32,
    },
    RandomSelection {
        #[serde(default = "default_switch_probability")]
        switch_probability: f64,
    },
    MaxDamage,
    NetHp,
    Random,
}

fn default_switch_probability() -> f64 {
    GENERAL_SWITCH_PROBABILITY
}

impl Default for StrategySettings {
    fn default() -> Self {
        StrategySettings::Expectimax {
            depth: 1,
            single_depth: 0,
        }
    }
}

impl StrategySettings {
    /// Build the strategy. Expectimax models the foe with the switch-biased
    /// random prior.
    pub fn build(self, evaluate: AllEvaluate) -> Box<dyn Strategy> {
        match self {
            StrategySettings::Expectimax { depth, single_depth } => Box::new(Expectimax::new(
                evaluate,
                Depth::turns(depth).with_single_turns(single_depth),
                Box::new(RandomSelection::default()),
            )),
            StrategySettings::RandomSelection { switch_probability } => {
                Box::new(RandomSelection::new(switch_probability))
            }
            StrategySettings::MaxDamage => Box::new(MaxDamage),
            StrategySettings::NetHp => Box::new(NetHp),
            StrategySettings::Random => Box::new(Random::new()),
        }
    }
}
