//! Battle state: Pokemon, teams, field conditions and the pieces they are
//! made of

mod active;
mod conditions;
mod field;
mod pokemon;
mod pokemon_type;
mod side;
mod stats;
mod status;

pub use active::{ActiveFlags, DamageReceived, Disable, LastUsedMove, LockIn};
pub use conditions::{Countdown, EntryHazards, Screens, SideCondition, Weather, Wish};
pub use field::{Environment, WeatherDuration};
pub use pokemon::{AnyPokemon, Gender, HeldItem, Hp, ItemState, Move, Pokemon, RegularMoves};
pub use pokemon_type::{TYPE_CHART, Type};
pub use side::{AnyTeam, GenericTeam};
pub use stats::StatStages;
pub use status::{Status, StatusName};

/// The engine's team: every member fully specified
pub type Team = GenericTeam<Pokemon>;
