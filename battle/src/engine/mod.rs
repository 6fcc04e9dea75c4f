//! The transition function: turn order, move execution, switching and the
//! end of the turn.
//!
//! Everything here works on concrete engine [`Team`](crate::types::Team)s.
//! Random outcomes (hits, critical hits, side effects, status clearing) are
//! decided by the caller and passed in, so the search can weight each
//! branch and the tracker can replay what the server reported.

mod accuracy;
mod call_move;
mod damage;
mod effects;
mod end_of_turn;
mod hp;
mod side_effects;
mod stats;
mod switching;

pub use accuracy::{chance_to_hit, critical_hit_probability};
pub use call_move::{ActualDamage, OtherAction, UsedMove, call_move};
pub use damage::{calculate_damage, confusion_damage, effectiveness, move_power};
pub use effects::apply_move_effects;
pub use end_of_turn::{EndOfTurnFlags, end_of_turn};
pub use hp::{damage, heal, indirect_damage};
pub use side_effects::{
    Effect, SideEffect, Target, apply_boost, apply_side_effect, inflict_status, possible_side_effects, set_status,
};
pub use stats::{Order, calculate_attacking_stat, calculate_defending_stat, calculate_speed, order, weather};
pub use switching::{activate_ability_on_switch, apply_entry_hazards, switch_pokemon};
