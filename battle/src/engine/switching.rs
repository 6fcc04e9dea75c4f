//! Bringing a Pokemon in: hazards on entry and abilities that trigger on
//! switch in

use tactician_protocol::Stat;

use crate::data::{Ability, Item};
use crate::generation::Generation;
use crate::types::{AnyPokemon, Environment, StatusName, Team, Type, Weather};

use crate::legality::is_grounded;

use super::hp::indirect_damage;
use super::side_effects::{apply_boost, set_status};
use super::stats::{scale, stage_fraction, weather};

/// Spikes, Toxic Spikes and Stealth Rock on the switcher's side hit the
/// Pokemon that just came in
pub fn apply_entry_hazards(team: &mut Team, environment: &Environment, weather: Weather) {
    let generation = team.generation();
    let hazards = team.hazards;
    if hazards.is_empty() || team.active().item(generation, environment.magic_room()) == Item::HeavyDutyBoots {
        return;
    }
    if is_grounded(team, environment) {
        if hazards.toxic_spikes() > 0 {
            let pokemon = team.active();
            if pokemon.is_type(generation, Type::Poison) {
                team.hazards.clear_toxic_spikes();
            } else {
                let status = if hazards.toxic_spikes() == 1 {
                    StatusName::Poison
                } else {
                    StatusName::Toxic
                };
                set_status(team, status, weather);
            }
        }
        match hazards.spikes() {
            0 => {}
            1 => indirect_damage(team, 1, 8),
            2 => indirect_damage(team, 1, 6),
            _ => indirect_damage(team, 1, 4),
        }
    }
    if hazards.stealth_rock() {
        let types = team.active().active_types(generation, false);
        let quarters = (Type::Rock.effectiveness_multi(&types, generation) * 4.0).round() as i32;
        indirect_damage(team, quarters, 32);
    }
}

fn intimidate(other: &mut Team, environment: &Environment) {
    let generation = other.generation();
    if other.active().is_fainted()
        || other.flags.has_substitute()
        || other.active().ability.blocks_intimidate(generation)
    {
        return;
    }
    let lowered = apply_boost(other, Stat::Atk, -1, true);
    if lowered != 0 && other.active().item(generation, environment.magic_room()) == Item::AdrenalineOrb {
        apply_boost(other, Stat::Spe, 1, false);
        other.active_mut().item.remove();
    }
}

fn staged(value: u16, stage: i8) -> u32 {
    let (numerator, denominator) = stage_fraction(stage);
    scale(u32::from(value), numerator, denominator)
}

/// Download raises whichever attacking stat targets the foe's weaker
/// defense
fn download(switcher: &mut Team, other: &Team) {
    let target = other.active();
    let defense = staged(target.stats.def, other.flags.stages.def);
    let special_defense = staged(target.stats.spd, other.flags.stages.spd);
    let stat = if defense < special_defense {
        Stat::Atk
    } else {
        Stat::Spa
    };
    apply_boost(switcher, stat, 1, false);
}

/// Abilities that act as soon as their holder enters the field
pub fn activate_ability_on_switch(switcher: &mut Team, other: &mut Team, environment: &mut Environment) {
    let generation = switcher.generation();
    let ability = switcher.active().ability;
    if let Some(weather) = ability.sets_weather() {
        let item = switcher.active().item(generation, environment.magic_room());
        environment.activate_weather_from_ability(generation, weather, item.extends_weather() == Some(weather));
        return;
    }
    match ability {
        Ability::Intimidate => intimidate(other, environment),
        Ability::Download => download(switcher, other),
        Ability::Trace => {
            let traced = other.active().ability;
            if traced.is_traceable() && !other.active().is_fainted() {
                switcher.active_mut().ability = traced;
                activate_ability_on_switch(switcher, other, environment);
            }
        }
        _ => {}
    }
}

/// Replace `switcher`'s active Pokemon with the member at `index`. A
/// partial trap the outgoing Pokemon held on the foe ends, then the
/// newcomer takes hazards and its ability activates.
pub fn switch_pokemon(switcher: &mut Team, other: &mut Team, environment: &mut Environment, index: usize) -> usize {
    let generation = switcher.generation();
    let baton_pass = switcher.flags.last_used_move.baton_passing;
    if generation == Generation::One {
        switcher.screens.shatter();
    }
    let incoming = switcher.switch_to(index, baton_pass);
    other.flags.partial_trap.deactivate();
    other.flags.trapped = false;

    let weather = weather(switcher, other, environment);
    apply_entry_hazards(switcher, environment, weather);
    if !switcher.active().is_fainted() {
        activate_ability_on_switch(switcher, other, environment);
    }
    incoming
}
