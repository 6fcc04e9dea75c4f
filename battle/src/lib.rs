//! Battle model and simulation engine for singles Pokemon battles.
//!
//! This crate holds everything the AI needs to reason about one battle:
//! per-generation game data, the battle state, move legality, the turn
//! engine, and a tracker that rebuilds state from server messages.
//!
//! # Overview
//!
//! ```text
//! tactician-protocol (wire format)
//!        │
//!        ▼
//! tactician-battle (data + state + engine + tracking) ← THIS CRATE
//!        │
//!        ├─> tactician-search (evaluation and expectiminimax)
//!        ├─> tactician-team (team files)
//!        └─> tactician-client (battles on a live server)
//! ```
//!
//! # Main Types
//!
//! ## Game data
//! - [`Species`], [`MoveName`], [`Item`], [`Ability`], [`Nature`] - named
//!   game data, parsed from display names or ids
//! - [`Generation`] - selects the rules every operation follows
//!
//! ## Battle state
//! - [`Pokemon`] and [`Team`] - the engine's fully specified view
//! - [`KnownTeam`] - the AI's own team, loaded from a team file
//! - [`SeenTeam`] - the foe's team as far as it has been revealed
//! - [`Environment`] - weather and field-wide effects
//!
//! ## Tracking
//! - [`Battle`] - state rebuilt from server events
//!
//! # Example Usage
//!
//! ```ignore
//! use tactician_battle::{Battle, event_from_message, legal_selections};
//!
//! let mut battle = Battle::new(team);
//! battle.set_perspective(Player::P1)?;
//!
//! if let Some(event) = event_from_message(&message)? {
//!     battle.apply(&event)?;
//! }
//!
//! let snapshot = battle.snapshot()?;
//! let choices = legal_selections(&snapshot.ai, &snapshot.foe, &snapshot.environment);
//! ```

pub mod compress;
pub mod data;
pub mod engine;
pub mod error;
pub mod generation;
pub mod known;
pub mod legality;
pub mod rational;
pub mod seen;
pub mod selection;
pub mod stat;
pub mod tracking;
pub mod types;

#[cfg(test)]
mod testing;

pub use compress::Compress;
pub use data::{Ability, Item, MoveName, Nature, Species};
pub use error::BattleError;
pub use generation::Generation;
pub use known::{KnownPokemon, KnownTeam};
pub use legality::legal_selections;
pub use seen::{SeenPokemon, SeenTeam};
pub use selection::{Action, Choice, Selection, Switch};
pub use stat::{Spread, StatValues};
pub use tracking::{Battle, Event, Outcome, Snapshot, event_from_message};
pub use types::{
    AnyPokemon, AnyTeam, Environment, Gender, GenericTeam, Move, Pokemon, SideCondition, Status, Team, Type,
    Weather,
};

// Protocol types that appear in this crate's API
pub use tactician_protocol::{Player, Stat};
