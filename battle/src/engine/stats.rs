//! Stats as modified by stages, abilities, items and the field, and the
//! resulting turn order

use tactician_protocol::Stat;

use crate::data::{Ability, Item, MoveName, Species};
use crate::generation::Generation;
use crate::selection::Action;
use crate::types::{Environment, Status, Team, Type, Weather};

/// `value * numerator / denominator`
pub(crate) fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    value * numerator / denominator
}

/// Stage multiplier as a fraction: `(2 + s) / 2` up, `2 / (2 - s)` down
pub(crate) fn stage_fraction(stage: i8) -> (u32, u32) {
    let magnitude = u32::from(stage.unsigned_abs().min(6));
    if stage >= 0 {
        (2 + magnitude, 2)
    } else {
        (2, 2 + magnitude)
    }
}

fn apply_stage(value: u32, stage: i8) -> u32 {
    let (numerator, denominator) = stage_fraction(stage);
    scale(value, numerator, denominator)
}

/// Effective weather for the active Pokemon on both sides
pub fn weather(user: &Team, other: &Team, environment: &Environment) -> Weather {
    environment.effective_weather(user.active().ability, other.active().ability)
}

/// Stage an attacker uses. Critical hits ignore unfavorable stages, and
/// every stage before gen 3. Unaware on the defender ignores them all.
fn attacking_stage(attacker: &Team, stat: Stat, defender_ability: Ability, critical_hit: bool) -> i8 {
    let stage = attacker.flags.stages.get(stat);
    if defender_ability == Ability::Unaware {
        return 0;
    }
    match (critical_hit, attacker.generation() <= Generation::Two) {
        (true, true) => 0,
        (true, false) => stage.max(0),
        (false, _) => stage,
    }
}

fn defending_stage(defender: &Team, stat: Stat, attacker_ability: Ability, critical_hit: bool) -> i8 {
    let stage = defender.flags.stages.get(stat);
    if attacker_ability == Ability::Unaware {
        return 0;
    }
    match (critical_hit, defender.generation() <= Generation::Two) {
        (true, true) => 0,
        (true, false) => stage.min(0),
        (false, _) => stage,
    }
}

fn is_boosted_by_soul_dew(generation: Generation, species: Species) -> bool {
    generation <= Generation::Six && matches!(species, Species::Latias | Species::Latios)
}

/// Attack or special attack, depending on the move's category
pub fn calculate_attacking_stat(
    attacker: &Team,
    physical: bool,
    defender_ability: Ability,
    environment: &Environment,
    weather: Weather,
    critical_hit: bool,
) -> u32 {
    let generation = attacker.generation();
    let pokemon = attacker.active();
    let item = pokemon.item(generation, environment.magic_room());
    let stat = if physical { Stat::Atk } else { Stat::Spa };
    let mut value = apply_stage(
        u32::from(pokemon.stats.get(stat)),
        attacking_stage(attacker, stat, defender_ability, critical_hit),
    );
    if physical {
        value = match pokemon.ability {
            Ability::Guts if !pokemon.status.is_clear() => scale(value, 3, 2),
            Ability::Hustle => scale(value, 3, 2),
            Ability::HugePower | Ability::PurePower => value * 2,
            _ => value,
        };
        value = match item {
            Item::ChoiceBand => scale(value, 3, 2),
            Item::LightBall if pokemon.species == Species::Pikachu && generation >= Generation::Four => {
                value * 2
            }
            _ => value,
        };
    } else {
        if pokemon.ability == Ability::SolarPower && weather == Weather::Sun {
            value = scale(value, 3, 2);
        }
        value = match item {
            Item::ChoiceSpecs => scale(value, 3, 2),
            Item::LightBall if pokemon.species == Species::Pikachu => value * 2,
            Item::SoulDew if is_boosted_by_soul_dew(generation, pokemon.species) => scale(value, 3, 2),
            _ => value,
        };
    }
    value.max(1)
}

/// Defense or special defense against a move
#[allow(clippy::too_many_arguments)]
pub fn calculate_defending_stat(
    defender: &Team,
    physical: bool,
    move_name: MoveName,
    attacker_ability: Ability,
    environment: &Environment,
    weather: Weather,
    critical_hit: bool,
) -> u32 {
    let generation = defender.generation();
    let pokemon = defender.active();
    let item = pokemon.item(generation, environment.magic_room());
    // Special is a single stat in gen 1
    let stat = match (physical, generation) {
        (true, _) => Stat::Def,
        (false, Generation::One) => Stat::Spa,
        (false, _) => Stat::Spd,
    };
    let mut value = apply_stage(
        u32::from(pokemon.stats.get(stat)),
        defending_stage(defender, stat, attacker_ability, critical_hit),
    );
    if physical {
        if pokemon.ability == Ability::MarvelScale && !pokemon.status.is_clear() {
            value = scale(value, 3, 2);
        }
        if item == Item::MetalPowder {
            value *= 2;
        }
        if move_name.is_self_destruct() && generation <= Generation::Four {
            value = (value / 2).max(1);
        }
    } else {
        value = match item {
            Item::SoulDew if is_boosted_by_soul_dew(generation, pokemon.species) => scale(value, 3, 2),
            Item::AssaultVest => scale(value, 3, 2),
            _ => value,
        };
        if weather == Weather::Sand
            && generation >= Generation::Four
            && pokemon.is_type(generation, Type::Rock)
        {
            value = scale(value, 3, 2);
        }
    }
    value.max(1)
}

pub fn calculate_speed(team: &Team, other_ability: Ability, environment: &Environment) -> u32 {
    let generation = team.generation();
    let pokemon = team.active();
    let weather = environment.effective_weather(pokemon.ability, other_ability);
    let item = pokemon.item(generation, environment.magic_room());
    let mut value = apply_stage(u32::from(pokemon.stats.spe), team.flags.stages.spe);
    value = match pokemon.ability {
        Ability::Chlorophyll if weather == Weather::Sun => value * 2,
        Ability::SwiftSwim if weather == Weather::Rain => value * 2,
        Ability::SandRush if weather == Weather::Sand => value * 2,
        Ability::Unburden if pokemon.item.was_lost() => value * 2,
        Ability::QuickFeet if !pokemon.status.is_clear() => scale(value, 3, 2),
        _ => value,
    };
    value = match item {
        Item::ChoiceScarf => scale(value, 3, 2),
        Item::IronBall => value / 2,
        _ => value,
    };
    if pokemon.status == Status::Paralysis && pokemon.ability != Ability::QuickFeet {
        value /= if generation >= Generation::Seven { 2 } else { 4 };
    }
    if team.screens.tailwind.is_active() {
        value *= 2;
    }
    value.max(1)
}

/// Which side acts first this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    First,
    Second,
    /// Equal priority and speed: either may go first
    Tie,
}

/// Switches go before every move
const SWITCH_PRIORITY: i8 = 7;

fn priority(generation: Generation, action: Action) -> i8 {
    match action {
        Action::Switch(_) => SWITCH_PRIORITY,
        Action::Move(name) => name.priority(generation),
        Action::HitSelf | Action::Pass => 0,
    }
}

/// Order of `team1` relative to `team2`: higher priority first, then the
/// faster Pokemon (the slower under Trick Room)
pub fn order(
    team1: &Team,
    action1: Action,
    team2: &Team,
    action2: Action,
    environment: &Environment,
) -> Order {
    let generation = team1.generation();
    let priority1 = priority(generation, action1);
    let priority2 = priority(generation, action2);
    if priority1 != priority2 {
        return if priority1 > priority2 {
            Order::First
        } else {
            Order::Second
        };
    }
    let speed1 = calculate_speed(team1, team2.active().ability, environment);
    let speed2 = calculate_speed(team2, team1.active().ability, environment);
    let (faster, slower) = if environment.trick_room() {
        (speed2, speed1)
    } else {
        (speed1, speed2)
    };
    match faster.cmp(&slower) {
        std::cmp::Ordering::Greater => Order::First,
        std::cmp::Ordering::Less => Order::Second,
        std::cmp::Ordering::Equal => Order::Tie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{pokemon, single, team};

    #[test]
    fn test_stage_fraction() {
        assert_eq!(stage_fraction(0), (2, 2));
        assert_eq!(stage_fraction(2), (4, 2));
        assert_eq!(stage_fraction(-1), (2, 3));
        assert_eq!(stage_fraction(-6), (2, 8));
    }

    #[test]
    fn test_paralysis_and_tailwind() {
        let generation = Generation::Four;
        let mut jolteon = single(generation, true, Species::Jolteon, &[MoveName::Thunderbolt]);
        let environment = Environment::new();
        let base = calculate_speed(&jolteon, Ability::None, &environment);
        jolteon.active_mut().status = Status::Paralysis;
        assert_eq!(calculate_speed(&jolteon, Ability::None, &environment), base / 4);
        jolteon.screens.tailwind.activate(3);
        assert_eq!(calculate_speed(&jolteon, Ability::None, &environment), base / 4 * 2);
    }

    #[test]
    fn test_choice_scarf_and_swift_swim() {
        let generation = Generation::Four;
        let scarfed = team(
            generation,
            true,
            vec![pokemon(generation, Species::Gyarados, Ability::Intimidate, Item::ChoiceScarf, &[])],
        );
        let plain = single(generation, true, Species::Gyarados, &[]);
        let environment = Environment::new();
        let base = calculate_speed(&plain, Ability::None, &environment);
        assert_eq!(calculate_speed(&scarfed, Ability::None, &environment), base * 3 / 2);

        let swimmer = team(
            generation,
            true,
            vec![pokemon(generation, Species::Gyarados, Ability::SwiftSwim, Item::None, &[])],
        );
        let mut rain = Environment::new();
        rain.activate_weather_from_move(Weather::Rain, false);
        assert_eq!(calculate_speed(&swimmer, Ability::None, &rain), base * 2);
        assert_eq!(calculate_speed(&swimmer, Ability::CloudNine, &rain), base);
    }

    #[test]
    fn test_order() {
        let generation = Generation::Four;
        let fast = single(generation, true, Species::Jolteon, &[MoveName::Thunderbolt]);
        let slow = single(generation, false, Species::Snorlax, &[MoveName::BodySlam, MoveName::QuickAttack]);
        let environment = Environment::new();
        let thunderbolt = Action::Move(MoveName::Thunderbolt);
        assert_eq!(
            order(&fast, thunderbolt, &slow, Action::Move(MoveName::BodySlam), &environment),
            Order::First
        );
        assert_eq!(
            order(&fast, thunderbolt, &slow, Action::Move(MoveName::QuickAttack), &environment),
            Order::Second
        );
        let mut trick_room = Environment::new();
        trick_room.toggle_trick_room();
        assert_eq!(
            order(&fast, thunderbolt, &slow, Action::Move(MoveName::BodySlam), &trick_room),
            Order::Second
        );
        let mirror = single(generation, false, Species::Jolteon, &[MoveName::Thunderbolt]);
        assert_eq!(order(&fast, thunderbolt, &mirror, thunderbolt, &environment), Order::Tie);
    }

    #[test]
    fn test_critical_hit_ignores_unfavorable_stages() {
        let generation = Generation::Four;
        let mut attacker = single(generation, true, Species::Gyarados, &[MoveName::Waterfall]);
        let environment = Environment::new();
        let neutral = calculate_attacking_stat(&attacker, true, Ability::None, &environment, Weather::Clear, false);
        attacker.flags.stages.boost(Stat::Atk, -2);
        let lowered = calculate_attacking_stat(&attacker, true, Ability::None, &environment, Weather::Clear, false);
        let critical = calculate_attacking_stat(&attacker, true, Ability::None, &environment, Weather::Clear, true);
        assert_eq!(lowered, neutral / 2);
        assert_eq!(critical, neutral);
    }

    #[test]
    fn test_sandstorm_boosts_rock_special_defense() {
        let generation = Generation::Four;
        let tyranitar = single(generation, false, Species::Tyranitar, &[]);
        let environment = Environment::new();
        let clear = calculate_defending_stat(
            &tyranitar,
            false,
            MoveName::Surf,
            Ability::None,
            &environment,
            Weather::Clear,
            false,
        );
        let sand = calculate_defending_stat(
            &tyranitar,
            false,
            MoveName::Surf,
            Ability::None,
            &environment,
            Weather::Sand,
            false,
        );
        assert_eq!(sand, clear * 3 / 2);
    }
}
