//! Damage of a single hit. Random rolls always take the maximum, so the
//! result is deterministic for a given state.

use crate::data::{Ability, Item, MoveCategory, MoveName};
use crate::generation::Generation;
use crate::types::{Environment, Status, Team, Type, Weather};

use super::stats::{calculate_attacking_stat, calculate_defending_stat, scale, weather};

/// Type effectiveness of `move_type` against the defender's active
/// Pokemon. Scrappy and Foresight let Normal and Fighting hit Ghosts.
pub fn effectiveness(attacker: &Team, move_type: Type, defender: &Team) -> f64 {
    let generation = attacker.generation();
    let types = defender
        .active()
        .active_types(generation, defender.flags.roosting);
    let ignores_ghost = (attacker.active().ability == Ability::Scrappy || defender.flags.identified)
        && matches!(move_type, Type::Normal | Type::Fighting);
    types
        .iter()
        .filter(|t| !(ignores_ghost && **t == Type::Ghost))
        .map(|t| move_type.effectiveness(*t, generation))
        .product()
}

/// Damage of moves that ignore attack and defense, `None` for everything
/// else
fn fixed_damage(attacker: &Team, move_name: MoveName, defender: &Team) -> Option<u16> {
    let user = attacker.active();
    let target = defender.active();
    let reflected = |category: MoveCategory| match attacker.flags.damage_received {
        Some(received) if received.category == category => received.amount.saturating_mul(2),
        _ => 0,
    };
    Some(match move_name {
        MoveName::SeismicToss | MoveName::NightShade => u16::from(user.level),
        MoveName::DragonRage => 40,
        MoveName::SonicBoom => 20,
        MoveName::SuperFang => (target.hp.current() / 2).max(1),
        MoveName::Endeavor => target.hp.current().saturating_sub(user.hp.current()),
        MoveName::Counter => reflected(MoveCategory::Physical),
        MoveName::MirrorCoat => reflected(MoveCategory::Special),
        MoveName::Bide => 0,
        name if name.is_ohko() => {
            if target.ability == Ability::Sturdy {
                0
            } else {
                target.hp.max()
            }
        }
        _ => return None,
    })
}

fn is_pinch_boosted(ability: Ability, move_type: Type) -> bool {
    matches!(
        (ability, move_type),
        (Ability::Blaze, Type::Fire)
            | (Ability::Torrent, Type::Water)
            | (Ability::Overgrow, Type::Grass)
            | (Ability::Swarm, Type::Bug)
    )
}

/// Base power after everything that modifies power rather than damage
pub fn move_power(attacker: &Team, move_name: MoveName, defender: &Team, environment: &Environment) -> u32 {
    let generation = attacker.generation();
    let user = attacker.active();
    let target = defender.active();
    let item = user.item(generation, environment.magic_room());
    let move_type = user.move_type(generation, move_name);

    let mut power = match move_name {
        MoveName::HiddenPower => user.hidden_power.map_or(0, |hidden_power| u32::from(hidden_power.power)),
        MoveName::Return => 102,
        MoveName::SpitUp => 100 * u32::from(attacker.flags.stockpile),
        MoveName::Facade if !user.status.is_clear() => 140,
        MoveName::KnockOff if generation >= Generation::Six && target.item.held().is_some() => 97,
        _ => u32::from(move_name.power(generation)),
    };

    if user.ability == Ability::Technician && power <= 60 {
        power = scale(power, 3, 2);
    }
    if user.ability == Ability::IronFist && move_name.is_punch() {
        power = scale(power, 6, 5);
    }
    if is_pinch_boosted(user.ability, move_type) && user.hp.current() <= user.hp.max() / 3 {
        power = scale(power, 3, 2);
    }
    if item.boosted_type() == Some(move_type) {
        power = if generation >= Generation::Four {
            scale(power, 6, 5)
        } else {
            scale(power, 11, 10)
        };
    }
    match item {
        Item::MuscleBand if move_name.is_physical(generation) => power = scale(power, 11, 10),
        Item::WiseGlasses if !move_name.is_physical(generation) => power = scale(power, 11, 10),
        _ => {}
    }
    if attacker.flags.charged && move_type == Type::Electric {
        power *= 2;
    }
    match move_type {
        Type::Electric if environment.mud_sport.is_active() => power /= 2,
        Type::Fire if environment.water_sport.is_active() => power /= 2,
        _ => {}
    }
    match (target.ability, move_type) {
        (Ability::Heatproof, Type::Fire) => power /= 2,
        (Ability::ThickFat, Type::Fire | Type::Ice) => power /= 2,
        (Ability::DrySkin, Type::Fire) => power = scale(power, 5, 4),
        _ => {}
    }
    power.max(1)
}

fn weather_modifier(move_type: Type, weather: Weather) -> (u32, u32) {
    match (weather, move_type) {
        (Weather::Rain, Type::Water) | (Weather::Sun, Type::Fire) => (3, 2),
        (Weather::Rain, Type::Fire) | (Weather::Sun, Type::Water) => (1, 2),
        _ => (1, 1),
    }
}

fn critical_hit_modifier(generation: Generation, ability: Ability) -> (u32, u32) {
    let sniper = ability == Ability::Sniper;
    match (generation >= Generation::Six, sniper) {
        (true, true) => (9, 4),
        (true, false) => (3, 2),
        (false, true) => (3, 1),
        (false, false) => (2, 1),
    }
}

fn screen_is_active(defender: &Team, physical: bool) -> bool {
    if physical {
        defender.screens.reflect.is_active()
    } else {
        defender.screens.light_screen.is_active()
    }
}

/// Damage `attacker` deals to `defender` with `move_name`, before it is
/// capped by the defender's remaining HP or a substitute
pub fn calculate_damage(
    attacker: &Team,
    move_name: MoveName,
    critical_hit: bool,
    defender: &Team,
    environment: &Environment,
) -> u16 {
    let generation = attacker.generation();
    let user = attacker.active();
    let target = defender.active();
    let move_type = user.move_type(generation, move_name);
    let type_multiplier = effectiveness(attacker, move_type, defender);
    if !move_name.is_damaging() || type_multiplier == 0.0 {
        return 0;
    }
    if let Some(damage) = fixed_damage(attacker, move_name, defender) {
        return damage;
    }

    let weather = weather(attacker, defender, environment);
    let physical = move_name.is_physical(generation);
    let attack = calculate_attacking_stat(attacker, physical, target.ability, environment, weather, critical_hit);
    let defense = calculate_defending_stat(
        defender,
        physical,
        move_name,
        user.ability,
        environment,
        weather,
        critical_hit,
    );
    let power = move_power(attacker, move_name, defender, environment);

    let level_factor = 2 * u32::from(user.level) / 5 + 2;
    let mut damage = level_factor * power * attack / defense / 50;
    if !critical_hit && screen_is_active(defender, physical) {
        damage /= 2;
    }
    let (numerator, denominator) = weather_modifier(move_type, weather);
    damage = scale(damage, numerator, denominator);
    if attacker.flags.flash_fire && move_type == Type::Fire {
        damage = scale(damage, 3, 2);
    }
    damage += 2;

    if critical_hit {
        let (numerator, denominator) = critical_hit_modifier(generation, user.ability);
        damage = scale(damage, numerator, denominator);
    }
    let item = user.item(generation, environment.magic_room());
    if item == Item::LifeOrb {
        damage = scale(damage, 13, 10);
    }
    if move_type != Type::Typeless && user.active_types(generation, attacker.flags.roosting).contains(&move_type) {
        damage = if user.ability == Ability::Adaptability {
            damage * 2
        } else {
            scale(damage, 3, 2)
        };
    }
    // Every product of chart entries is a whole number of quarters
    let quarters = (type_multiplier * 4.0).round() as u32;
    damage = scale(damage, quarters, 4);

    let super_effective = type_multiplier > 1.0;
    if super_effective && matches!(target.ability, Ability::Filter | Ability::SolidRock) {
        damage = scale(damage, 3, 4);
    }
    if super_effective && item == Item::ExpertBelt {
        damage = scale(damage, 6, 5);
    }
    if type_multiplier < 1.0 && user.ability == Ability::TintedLens {
        damage *= 2;
    }
    if physical && user.status == Status::Burn && user.ability != Ability::Guts {
        damage /= 2;
    }
    if target.ability == Ability::Multiscale && target.hp.is_full() {
        damage /= 2;
    }
    u16::try_from(damage.max(1)).unwrap_or(u16::MAX)
}

/// Hurting itself in confusion: a typeless 40 power physical hit with no
/// critical hit and no modifiers beyond stats
pub fn confusion_damage(team: &Team, environment: &Environment) -> u16 {
    let pokemon = team.active();
    let weather = environment.weather();
    let attack = calculate_attacking_stat(team, true, Ability::None, environment, weather, false);
    let defense = calculate_defending_stat(team, true, MoveName::Tackle, Ability::None, environment, weather, false);
    let level_factor = 2 * u32::from(pokemon.level) / 5 + 2;
    let damage = level_factor * 40 * attack / defense / 50 + 2;
    u16::try_from(damage).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Species;
    use crate::testing::{pokemon, single, team};
    use crate::types::{DamageReceived, Screens};

    #[test]
    fn test_fixed_damage() {
        let generation = Generation::Four;
        let user = single(generation, true, Species::Blissey, &[MoveName::SeismicToss]);
        let mut target = single(generation, false, Species::Snorlax, &[]);
        let environment = Environment::new();
        assert_eq!(calculate_damage(&user, MoveName::SeismicToss, false, &target, &environment), 100);
        assert_eq!(calculate_damage(&user, MoveName::DragonRage, false, &target, &environment), 40);
        let half = target.active().hp.current() / 2;
        assert_eq!(calculate_damage(&user, MoveName::SuperFang, false, &target, &environment), half);
        target.active_mut().hp.set_current(1);
        assert_eq!(calculate_damage(&user, MoveName::SuperFang, false, &target, &environment), 1);
    }

    #[test]
    fn test_immunity_deals_nothing() {
        let generation = Generation::Four;
        let user = single(generation, true, Species::Snorlax, &[MoveName::BodySlam]);
        let target = single(generation, false, Species::Gengar, &[]);
        let environment = Environment::new();
        assert_eq!(calculate_damage(&user, MoveName::BodySlam, false, &target, &environment), 0);
        assert_eq!(calculate_damage(&user, MoveName::SeismicToss, false, &target, &environment), 0);
        let scrappy = team(
            generation,
            true,
            vec![pokemon(generation, Species::Snorlax, Ability::Scrappy, Item::None, &[MoveName::BodySlam])],
        );
        assert!(calculate_damage(&scrappy, MoveName::BodySlam, false, &target, &environment) > 0);
    }

    #[test]
    fn test_counter_doubles_physical_damage() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Wobbuffet, &[MoveName::Counter]);
        let target = single(generation, false, Species::Snorlax, &[]);
        let environment = Environment::new();
        user.flags.damage_received = Some(DamageReceived {
            amount: 120,
            category: MoveCategory::Physical,
        });
        assert_eq!(calculate_damage(&user, MoveName::Counter, false, &target, &environment), 240);
        assert_eq!(calculate_damage(&user, MoveName::MirrorCoat, false, &target, &environment), 0);
    }

    #[test]
    fn test_reflect_halves_unless_critical() {
        let generation = Generation::Four;
        let user = single(generation, true, Species::Snorlax, &[MoveName::BodySlam]);
        let mut target = single(generation, false, Species::Blissey, &[]);
        let environment = Environment::new();
        let normal = calculate_damage(&user, MoveName::BodySlam, false, &target, &environment);
        target.screens.reflect.activate(Screens::STANDARD);
        let screened = calculate_damage(&user, MoveName::BodySlam, false, &target, &environment);
        assert!(screened < normal);
        let critical = calculate_damage(&user, MoveName::BodySlam, true, &target, &environment);
        assert!(critical > normal);
    }

    #[test]
    fn test_stab_and_effectiveness() {
        let generation = Generation::Four;
        let user = single(generation, true, Species::Jolteon, &[MoveName::Thunderbolt]);
        let water = single(generation, false, Species::Vaporeon, &[]);
        let ground = single(generation, false, Species::Hippowdon, &[]);
        let environment = Environment::new();
        let super_effective = calculate_damage(&user, MoveName::Thunderbolt, false, &water, &environment);
        assert!(super_effective > 0);
        assert_eq!(calculate_damage(&user, MoveName::Thunderbolt, false, &ground, &environment), 0);
    }

    #[test]
    fn test_burn_halves_physical_damage() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Snorlax, &[MoveName::BodySlam]);
        let target = single(generation, false, Species::Blissey, &[]);
        let environment = Environment::new();
        let healthy = calculate_damage(&user, MoveName::BodySlam, false, &target, &environment);
        user.active_mut().status = Status::Burn;
        let burned = calculate_damage(&user, MoveName::BodySlam, false, &target, &environment);
        assert!(burned < healthy);
    }

    #[test]
    fn test_weather_modifies_water() {
        let generation = Generation::Four;
        let user = single(generation, true, Species::Vaporeon, &[MoveName::Surf]);
        let target = single(generation, false, Species::Snorlax, &[]);
        let mut environment = Environment::new();
        let clear = calculate_damage(&user, MoveName::Surf, false, &target, &environment);
        environment.activate_weather_from_move(Weather::Rain, false);
        let rain = calculate_damage(&user, MoveName::Surf, false, &target, &environment);
        environment.activate_weather_from_move(Weather::Sun, false);
        let sun = calculate_damage(&user, MoveName::Surf, false, &target, &environment);
        assert!(rain > clear);
        assert!(sun < clear);
    }

    #[test]
    fn test_confusion_damage_is_positive() {
        let team = single(Generation::Four, true, Species::Snorlax, &[]);
        assert!(confusion_damage(&team, &Environment::new()) > 0);
    }
}
