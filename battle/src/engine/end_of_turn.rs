//! Residual effects once both sides have acted

use tactician_protocol::Stat;

use crate::data::{Ability, Item};
use crate::generation::Generation;
use crate::types::{AnyPokemon, Environment, Status, StatusName, Team, Type, Weather};

use super::hp::{heal, indirect_damage};
use super::side_effects::{apply_boost, set_status};
use super::stats::weather;

/// Random outcomes of the end of turn for one side, decided by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EndOfTurnFlags {
    /// Shed Skin cures the status
    pub shed_skin: bool,
    /// A rampage that may end does end
    pub lock_in_ends: bool,
    /// Gen 2 frozen Pokemon thaw at the end of the turn
    pub thaws: bool,
}

impl EndOfTurnFlags {
    pub fn new(shed_skin: bool, lock_in_ends: bool, thaws: bool) -> Self {
        Self {
            shed_skin,
            lock_in_ends,
            thaws,
        }
    }
}

fn is_weather_immune(team: &Team, weather: Weather) -> bool {
    let generation = team.generation();
    let pokemon = team.active();
    match weather {
        Weather::Sand => {
            [Type::Rock, Type::Ground, Type::Steel]
                .iter()
                .any(|kind| pokemon.is_type(generation, *kind))
                || matches!(pokemon.ability, Ability::SandVeil)
        }
        Weather::Hail => pokemon.is_type(generation, Type::Ice) || matches!(pokemon.ability, Ability::IceBody | Ability::SnowCloak),
        _ => true,
    }
}

fn weather_damage(team: &mut Team, weather: Weather) {
    if !is_weather_immune(team, weather) {
        indirect_damage(team, 1, 16);
    }
}

/// Dry Skin, Hydration, Rain Dish, Ice Body and Solar Power
fn weather_ability(team: &mut Team, weather: Weather) {
    match (team.active().ability, weather) {
        (Ability::DrySkin, Weather::Rain) => heal(team, 1, 8),
        (Ability::DrySkin | Ability::SolarPower, Weather::Sun) => indirect_damage(team, 1, 8),
        (Ability::Hydration, Weather::Rain) => team.active_mut().status = Status::Clear,
        (Ability::RainDish, Weather::Rain) | (Ability::IceBody, Weather::Hail) => heal(team, 1, 16),
        _ => {}
    }
}

/// Burn, poison and toxic damage
fn status_damage(team: &mut Team) {
    let generation = team.generation();
    let ability = team.active().ability;
    match team.active().status {
        Status::Burn => {
            let denominator = if generation == Generation::One || generation >= Generation::Seven {
                16
            } else {
                8
            };
            let denominator = if ability == Ability::Heatproof {
                denominator * 2
            } else {
                denominator
            };
            indirect_damage(team, 1, denominator);
        }
        Status::Poison | Status::Toxic { .. } if ability == Ability::PoisonHeal => heal(team, 1, 8),
        Status::Poison => {
            let denominator = if generation == Generation::One { 16 } else { 8 };
            indirect_damage(team, 1, denominator);
        }
        Status::Toxic { counter } => {
            let counter = (counter + 1).min(15);
            team.active_mut().status = Status::Toxic { counter };
            indirect_damage(team, i32::from(counter), 16);
        }
        _ => {}
    }
}

/// Leech Seed moves HP from the seeded Pokemon to the foe's active one
fn leech_seed(team: &mut Team, other: &mut Team) {
    if !team.flags.leech_seeded || other.active().is_fainted() {
        return;
    }
    let before = team.active().hp.current();
    let denominator = if team.generation() == Generation::One { 16 } else { 8 };
    indirect_damage(team, 1, denominator);
    let drained = before - team.active().hp.current();
    if drained > 0 && !other.flags.heal_block.is_active() {
        other.active_mut().hp.heal(drained);
    }
}

fn item_residual(team: &mut Team, environment: &Environment, weather: Weather) {
    let generation = team.generation();
    match team.active().item(generation, environment.magic_room()) {
        Item::Leftovers => heal(team, 1, 16),
        Item::BlackSludge => {
            if team.active().is_type(generation, Type::Poison) {
                heal(team, 1, 16);
            } else {
                indirect_damage(team, 1, 8);
            }
        }
        Item::FlameOrb => {
            set_status(team, StatusName::Burn, weather);
        }
        Item::ToxicOrb => {
            set_status(team, StatusName::Toxic, weather);
        }
        _ => {}
    }
}

fn residual(team: &mut Team, flags: EndOfTurnFlags, other: &mut Team, environment: &Environment, weather: Weather) {
    if team.active().is_fainted() {
        return;
    }
    if team.flags.ingrained {
        heal(team, 1, 16);
    }
    if team.flags.aqua_ring {
        heal(team, 1, 16);
    }
    match team.active().ability {
        Ability::SpeedBoost if !team.flags.last_used_move.switched_in_this_turn => {
            apply_boost(team, Stat::Spe, 1, false);
        }
        Ability::ShedSkin if flags.shed_skin => team.active_mut().status = Status::Clear,
        _ => {}
    }
    item_residual(team, environment, weather);
    leech_seed(team, other);
    status_damage(team);
    if team.flags.cursed {
        indirect_damage(team, 1, 4);
    }
    if team.flags.partial_trap.is_active() {
        let denominator = if team.generation() >= Generation::Six { 8 } else { 16 };
        indirect_damage(team, 1, denominator);
        team.flags.partial_trap.decrement();
    }
}

/// Counters that tick once per turn whether or not anything else
/// happened
fn advance_counters(team: &mut Team, flags: EndOfTurnFlags, weather: Weather) {
    if team.active().is_fainted() {
        return;
    }
    if team.flags.advance_lock_in(flags.lock_in_ends) {
        team.flags.confuse();
    }
    team.flags.advance_disable();
    team.flags.encore.decrement();
    team.flags.taunt.decrement();
    team.flags.magnet_rise.decrement();
    team.flags.heal_block.decrement();
    if team.flags.advance_yawn() {
        set_status(team, StatusName::Sleep, weather);
    }
    if team.flags.advance_perish_song() {
        team.active_mut().faint();
    }
}

fn wish(team: &mut Team) {
    if team.wish.decrement() {
        heal(team, 1, 2);
    }
}

/// Truant loafs on the turn after every turn it acts
fn truant(team: &mut Team) {
    if team.active().ability == Ability::Truant {
        team.flags.loafing = !team.flags.loafing && team.flags.moved();
    }
}

fn finish(team: &mut Team, flags: EndOfTurnFlags, weather: Weather) {
    team.screens.decrement();
    advance_counters(team, flags, weather);
    truant(team);
    team.reset_end_of_turn();
}

fn early_residual(team: &mut Team, other: &mut Team) {
    if team.active().is_fainted() {
        return;
    }
    status_damage(team);
    leech_seed(team, other);
    if team.flags.cursed {
        indirect_damage(team, 1, 4);
    }
}

fn early_late_residual(team: &mut Team, flags: EndOfTurnFlags, environment: &Environment, weather: Weather) {
    if team.active().is_fainted() {
        return;
    }
    if weather == Weather::Sand {
        weather_damage(team, weather);
    }
    if team.flags.partial_trap.is_active() {
        indirect_damage(team, 1, 16);
        team.flags.partial_trap.decrement();
    }
    if team.active().item(team.generation(), environment.magic_room()) == Item::Leftovers {
        heal(team, 1, 16);
    }
    if flags.thaws && team.active().status == Status::Freeze {
        team.active_mut().status = Status::Clear;
    }
}

/// Gens 1 and 2: per-Pokemon residual damage, then sandstorm, partial
/// trapping, Leftovers and thawing
fn early_generations(
    first: &mut Team,
    first_flags: EndOfTurnFlags,
    last: &mut Team,
    last_flags: EndOfTurnFlags,
    environment: &mut Environment,
) {
    early_residual(first, last);
    early_residual(last, first);
    environment.advance_one_turn();
    let weather = weather(first, last, environment);
    early_late_residual(first, first_flags, environment, weather);
    early_late_residual(last, last_flags, environment, weather);
    finish(first, first_flags, weather);
    finish(last, last_flags, weather);
}

/// Gen 3 onward: weather, Wish, each side's residual effects, then
/// counters
fn later_generations(
    first: &mut Team,
    first_flags: EndOfTurnFlags,
    last: &mut Team,
    last_flags: EndOfTurnFlags,
    environment: &mut Environment,
) {
    environment.advance_one_turn();
    let weather = weather(first, last, environment);
    for team in [&mut *first, &mut *last] {
        if !team.active().is_fainted() {
            weather_damage(team, weather);
            weather_ability(team, weather);
        }
        wish(team);
    }
    residual(first, first_flags, last, environment, weather);
    residual(last, last_flags, first, environment, weather);
    finish(first, first_flags, weather);
    finish(last, last_flags, weather);
}

/// Apply the end of turn to both sides. `first` is the side that moved
/// first this turn.
pub fn end_of_turn(
    first: &mut Team,
    first_flags: EndOfTurnFlags,
    last: &mut Team,
    last_flags: EndOfTurnFlags,
    environment: &mut Environment,
) {
    if first.generation() <= Generation::Two {
        early_generations(first, first_flags, last, last_flags, environment);
    } else {
        later_generations(first, first_flags, last, last_flags, environment);
    }
}
