//! Position evaluation and expectiminimax search.
//!
//! Given the AI's team, the foe's team as far as it is known and the
//! field, this crate scores every legal selection for the AI by searching
//! ahead a fixed number of turns. The foe's selections are not minimized
//! over but weighted by a prediction, so the search is an expectiminimax
//! with the foe treated as another chance node.
//!
//! # Main Types
//!
//! - [`Evaluate`] - linear score of a position, loaded per generation from
//!   a settings file
//! - [`Depth`] - how many turns to search, and how many more in one-on-one
//!   matchups after that
//! - [`Searcher`] - runs the search for one position
//! - [`Strategy`] - anything that picks a selection: [`Expectimax`],
//!   [`RandomSelection`], [`MaxDamage`], [`NetHp`] or [`Random`]
//!
//! # Example Usage
//!
//! ```ignore
//! use tactician_search::{AllEvaluate, StrategySettings};
//!
//! let strategy = StrategySettings::Expectimax { depth: 2, single_depth: 0 }
//!     .build(AllEvaluate::load("settings/evaluate.json")?);
//! let chosen = strategy
//!     .select(&ai, &ai_selections, &foe, &foe_selections, &environment)
//!     .user
//!     .best();
//! ```

pub mod depth;
pub mod error;
pub mod evaluate;
pub mod expectiminimax;
pub mod predict;
pub mod strategy;

#[cfg(test)]
mod testing;

pub use depth::{DEPTH_COST, Depth};
pub use error::SettingsError;
pub use evaluate::{AllEvaluate, Evaluate, EvaluateSettings, VICTORY, win};
pub use expectiminimax::{ScoredSelection, Searcher, State, reorder};
pub use predict::{
    GENERAL_SWITCH_PROBABILITY, WeightedSelection, predict_random_selection, remove_unlikely_foe_selections,
};
pub use strategy::{
    BothSelectionProbabilities, Expectimax, MaxDamage, NetHp, Random, RandomSelection, SelectionProbabilities,
    SelectionProbability, Strategy, StrategySettings,
};
