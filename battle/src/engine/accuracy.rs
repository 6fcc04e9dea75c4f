//! Chance to hit and chance of a critical hit

use crate::data::{Ability, Item, MoveName};
use crate::generation::Generation;
use crate::types::{Environment, StatStages, Team, Weather};

use super::stats::weather;

/// Moves whose accuracy changes with the weather
fn weather_accuracy(generation: Generation, move_name: MoveName, weather: Weather) -> Option<Option<u8>> {
    match (move_name, weather) {
        (MoveName::Thunder, Weather::Rain) if generation >= Generation::Two => Some(None),
        (MoveName::Hurricane, Weather::Rain) => Some(None),
        (MoveName::Thunder | MoveName::Hurricane, Weather::Sun) if generation >= Generation::Two => Some(Some(50)),
        (MoveName::Blizzard, Weather::Hail) if generation >= Generation::Four => Some(None),
        _ => None,
    }
}

/// One-hit KO moves ignore stages: 30% plus the level difference, and
/// never hit a higher level target
fn ohko_chance(user: &Team, target: &Team) -> f64 {
    let user_level = i32::from(user.active().level);
    let target_level = i32::from(target.active().level);
    if target_level > user_level || target.active().ability == Ability::Sturdy {
        return 0.0;
    }
    (f64::from(30 + user_level - target_level) / 100.0).min(1.0)
}

/// Probability that `move_name` hits `target`. For Protect and friends
/// this is the chance the chain continues.
pub fn chance_to_hit(user: &Team, move_name: MoveName, target: &Team, environment: &Environment) -> f64 {
    let generation = user.generation();
    if move_name.is_protect() {
        return user
            .flags
            .last_used_move
            .protect_success_probability(generation, move_name);
    }
    let attacker = user.active();
    let defender = target.active();
    if attacker.ability == Ability::NoGuard || defender.ability == Ability::NoGuard {
        return 1.0;
    }
    if move_name.is_ohko() {
        return ohko_chance(user, target);
    }
    let weather = weather(user, target, environment);
    let accuracy = weather_accuracy(generation, move_name, weather)
        .unwrap_or_else(|| move_name.accuracy(generation));
    let Some(accuracy) = accuracy else {
        return 1.0;
    };

    let evasion = if target.flags.identified {
        target.flags.stages.evasion.min(0)
    } else {
        target.flags.stages.evasion
    };
    let mut chance = f64::from(accuracy) / 100.0
        * StatStages::accuracy_multiplier(user.flags.stages.accuracy)
        / StatStages::accuracy_multiplier(evasion);

    if attacker.ability == Ability::CompoundEyes {
        chance *= 1.3;
    }
    if attacker.ability == Ability::Hustle && move_name.is_physical(generation) {
        chance *= 0.8;
    }
    match defender.item(generation, environment.magic_room()) {
        Item::BrightPowder => chance *= 0.9,
        Item::LaxIncense => chance *= if generation <= Generation::Three { 0.95 } else { 0.9 },
        _ => {}
    }
    match (defender.ability, weather) {
        (Ability::SandVeil, Weather::Sand) | (Ability::SnowCloak, Weather::Hail) => chance *= 0.8,
        _ => {}
    }
    if environment.gravity() {
        chance *= 5.0 / 3.0;
    }
    let cap = if generation == Generation::One { 255.0 / 256.0 } else { 1.0 };
    chance.clamp(0.0, cap)
}

fn critical_hit_rate_from_stage(generation: Generation, stage: u8) -> f64 {
    match generation {
        Generation::One | Generation::Two | Generation::Three | Generation::Four | Generation::Five => {
            match stage {
                0 => 1.0 / 16.0,
                1 => 1.0 / 8.0,
                2 => 1.0 / 4.0,
                3 => 1.0 / 3.0,
                _ => 1.0 / 2.0,
            }
        }
        Generation::Six => match stage {
            0 => 1.0 / 16.0,
            1 => 1.0 / 8.0,
            2 => 1.0 / 2.0,
            _ => 1.0,
        },
        Generation::Seven | Generation::Eight => match stage {
            0 => 1.0 / 24.0,
            1 => 1.0 / 8.0,
            2 => 1.0 / 2.0,
            _ => 1.0,
        },
    }
}

/// Gen 1 rates come from base speed. Focus Energy famously quarters the
/// rate instead of raising it.
fn gen_one_critical_hit(user: &Team, move_name: MoveName) -> f64 {
    let initial = u32::from(user.active().species.base_stats(Generation::One).spe) / 2;
    let focused = if user.flags.focus_energy {
        initial / 2
    } else {
        initial * 2
    };
    let adjusted = if move_name.is_high_crit() {
        focused * 4
    } else {
        focused / 2
    };
    f64::from(adjusted.min(255)) / 256.0
}

/// Probability of a critical hit. Battle Armor, Shell Armor and Lucky
/// Chant prevent them; fixed damage moves never land one.
pub fn critical_hit_probability(user: &Team, move_name: MoveName, target: &Team, environment: &Environment) -> f64 {
    let generation = user.generation();
    if !move_name.is_damaging()
        || move_name.power(generation) == 0
        || target.active().ability.blocks_critical_hits()
        || target.screens.lucky_chant.is_active()
    {
        return 0.0;
    }
    if generation == Generation::One {
        return gen_one_critical_hit(user, move_name);
    }
    let attacker = user.active();
    let move_stage = match (move_name.is_high_crit(), generation) {
        (false, _) => 0,
        (true, Generation::Two) => 2,
        (true, _) => 1,
    };
    let item_stage = match attacker.item(generation, environment.magic_room()) {
        Item::ScopeLens | Item::RazorClaw => 1,
        _ => 0,
    };
    let ability_stage = u8::from(attacker.ability == Ability::SuperLuck);
    let focus_stage = match (user.flags.focus_energy, generation) {
        (false, _) => 0,
        (true, Generation::Two) => 1,
        (true, _) => 2,
    };
    critical_hit_rate_from_stage(generation, move_stage + item_stage + ability_stage + focus_stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Species;
    use crate::testing::{pokemon, single, team};

    #[test]
    fn test_never_miss_and_stages() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Jolteon, &[MoveName::Swift, MoveName::Thunder]);
        let target = single(generation, false, Species::Gyarados, &[]);
        let environment = Environment::new();
        assert_eq!(chance_to_hit(&user, MoveName::Swift, &target, &environment), 1.0);
        assert_eq!(chance_to_hit(&user, MoveName::Thunder, &target, &environment), 0.7);
        user.flags.stages.accuracy = -1;
        let lowered = chance_to_hit(&user, MoveName::Thunder, &target, &environment);
        assert!((lowered - 0.7 * 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_thunder_in_rain() {
        let generation = Generation::Four;
        let user = single(generation, true, Species::Jolteon, &[MoveName::Thunder]);
        let target = single(generation, false, Species::Gyarados, &[]);
        let mut environment = Environment::new();
        environment.activate_weather_from_move(Weather::Rain, false);
        assert_eq!(chance_to_hit(&user, MoveName::Thunder, &target, &environment), 1.0);
    }

    #[test]
    fn test_ohko_level_rules() {
        let generation = Generation::Four;
        let user = single(generation, true, Species::Lapras, &[MoveName::SheerCold]);
        let target = single(generation, false, Species::Gyarados, &[]);
        assert_eq!(chance_to_hit(&user, MoveName::SheerCold, &target, &Environment::new()), 0.3);
    }

    #[test]
    fn test_protect_chain_halves() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Blissey, &[MoveName::Protect]);
        let target = single(generation, false, Species::Snorlax, &[]);
        let environment = Environment::new();
        assert_eq!(chance_to_hit(&user, MoveName::Protect, &target, &environment), 1.0);
        user.flags.last_used_move.record(MoveName::Protect, true);
        assert_eq!(chance_to_hit(&user, MoveName::Protect, &target, &environment), 0.5);
    }

    #[test]
    fn test_gen_one_cap() {
        let user = single(Generation::One, true, Species::Jolteon, &[MoveName::BodySlam]);
        let target = single(Generation::One, false, Species::Snorlax, &[]);
        let chance = chance_to_hit(&user, MoveName::BodySlam, &target, &Environment::new());
        assert_eq!(chance, 255.0 / 256.0);
    }

    #[test]
    fn test_critical_hit_stages() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Scizor, &[MoveName::XScissor]);
        let target = single(generation, false, Species::Gyarados, &[]);
        let environment = Environment::new();
        assert_eq!(critical_hit_probability(&user, MoveName::XScissor, &target, &environment), 1.0 / 16.0);
        assert_eq!(critical_hit_probability(&user, MoveName::StoneEdge, &target, &environment), 1.0 / 8.0);
        user.flags.focus_energy = true;
        assert_eq!(critical_hit_probability(&user, MoveName::StoneEdge, &target, &environment), 1.0 / 3.0);
        assert_eq!(critical_hit_probability(&user, MoveName::SwordsDance, &target, &environment), 0.0);
    }

    #[test]
    fn test_shell_armor_blocks_critical_hits() {
        let generation = Generation::Four;
        let user = single(generation, true, Species::Scizor, &[MoveName::XScissor]);
        let target = team(
            generation,
            false,
            vec![pokemon(generation, Species::Lapras, Ability::ShellArmor, Item::None, &[])],
        );
        assert_eq!(critical_hit_probability(&user, MoveName::XScissor, &target, &Environment::new()), 0.0);
    }

    #[test]
    fn test_gen_one_uses_base_speed() {
        let user = single(Generation::One, true, Species::Jolteon, &[MoveName::BodySlam]);
        let target = single(Generation::One, false, Species::Snorlax, &[]);
        let environment = Environment::new();
        let normal = critical_hit_probability(&user, MoveName::BodySlam, &target, &environment);
        assert_eq!(normal, f64::from(130 / 2) / 256.0);
        let high = critical_hit_probability(&user, MoveName::Slash, &target, &environment);
        assert_eq!(high, 255.0 / 256.0);
    }
}
