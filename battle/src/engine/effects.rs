//! What each move does beyond its damage

use tactician_protocol::Stat;

use crate::data::{Ability, Item, MoveName};
use crate::generation::Generation;
use crate::types::{ActiveFlags, AnyPokemon, Environment, Screens, Status, StatusName, Team, Type, Weather};

use super::hp::{self, heal};
use super::side_effects::{apply_boost, inflict_status};
use super::stats::weather;

fn boost_self(user: &mut Team, changes: &[(Stat, i8)]) {
    for (stat, stages) in changes {
        apply_boost(user, *stat, *stages, false);
    }
}

fn screen_duration(user: &Team, environment: &Environment) -> u8 {
    if user.active().item(user.generation(), environment.magic_room()) == Item::LightClay {
        Screens::EXTENDED
    } else {
        Screens::STANDARD
    }
}

fn set_weather(user: &Team, weather: Weather, environment: &mut Environment) {
    let item = user.active().item(user.generation(), environment.magic_room());
    environment.activate_weather_from_move(weather, item.extends_weather() == Some(weather));
}

/// Morning Sun and friends heal more in sun and less in any other weather
fn weather_heal(user: &mut Team, weather: Weather) {
    match weather {
        Weather::Clear => heal(user, 1, 2),
        Weather::Sun => heal(user, 2, 3),
        Weather::Rain | Weather::Sand | Weather::Hail => heal(user, 1, 4),
    }
}

fn rest(user: &mut Team) {
    let pokemon = user.active();
    let blocked = matches!(pokemon.ability, Ability::Insomnia | Ability::VitalSpirit)
        || pokemon.hp.is_full()
        || matches!(pokemon.status, Status::Rest { .. })
        || user.flags.heal_block.is_active();
    if blocked {
        return;
    }
    let pokemon = user.active_mut();
    pokemon.status = Status::new(StatusName::Rest);
    let max = pokemon.hp.max();
    pokemon.hp.set_current(max);
}

fn belly_drum(user: &mut Team) {
    let max = user.active().hp.max();
    if user.active().hp.current() <= max / 2 {
        return;
    }
    hp::damage(user, max / 2);
    apply_boost(user, Stat::Atk, 12, false);
}

fn curse(user: &mut Team, other: &mut Team) {
    let generation = user.generation();
    if generation >= Generation::Two && user.active().is_type(generation, Type::Ghost) {
        if other.flags.cursed || other.flags.has_substitute() {
            return;
        }
        let max = user.active().hp.max();
        hp::damage(user, max / 2);
        other.flags.cursed = true;
    } else {
        boost_self(user, &[(Stat::Atk, 1), (Stat::Def, 1), (Stat::Spe, -1)]);
    }
}

fn substitute(user: &mut Team) {
    let max = user.active().hp.max();
    let cost = max / 4;
    if user.flags.has_substitute() || user.active().hp.current() <= cost {
        return;
    }
    hp::damage(user, cost);
    user.flags.substitute = cost;
}

fn swallow(user: &mut Team) {
    match user.flags.release_stockpile() {
        0 => {}
        1 => heal(user, 1, 4),
        2 => heal(user, 1, 2),
        _ => heal(user, 1, 1),
    }
}

fn pain_split(user: &mut Team, other: &mut Team) {
    let total = u32::from(user.active().hp.current()) + u32::from(other.active().hp.current());
    let shared = u16::try_from(total / 2).unwrap_or(u16::MAX);
    user.active_mut().hp.set_current(shared);
    other.active_mut().hp.set_current(shared);
}

fn cure_team(user: &mut Team) {
    for member in user.members_mut() {
        if !member.is_fainted() {
            member.status = Status::Clear;
        }
    }
}

fn rapid_spin(user: &mut Team) {
    user.hazards.clear();
    user.flags.leech_seeded = false;
    user.flags.partial_trap.deactivate();
}

fn defog(user: &mut Team, other: &mut Team) {
    if user.generation() >= Generation::Six {
        user.hazards.clear();
    }
    other.hazards.clear();
    other.screens.shatter();
    other.screens.safeguard.deactivate();
    other.screens.mist.deactivate();
    apply_boost(other, Stat::Evasion, -1, true);
}

fn trick(user: &mut Team, other: &mut Team) {
    if other.flags.has_substitute() {
        return;
    }
    std::mem::swap(&mut user.active_mut().item, &mut other.active_mut().item);
}

fn encore(other: &mut Team) {
    let last = other.flags.last_used_move.move_name;
    if last.is_some_and(MoveName::is_regular) {
        other.flags.encore.activate(ActiveFlags::ENCORE_TURNS);
    }
}

fn disable(other: &mut Team) {
    if let Some(last) = other.flags.last_used_move.move_name {
        if last.is_regular() {
            other.flags.disable(last);
        }
    }
}

fn perish_song(user: &mut Team, other: &mut Team) {
    for team in [user, other] {
        if team.active().ability != Ability::Soundproof {
            team.flags.activate_perish_song();
        }
    }
}

fn status_move(user: &mut Team, other: &mut Team, status: StatusName, environment: &Environment) {
    if other.flags.has_substitute() {
        return;
    }
    inflict_status(user, other, status, environment);
}

/// Effects of a move that hit (or, for moves on the user's side, was
/// used). `damage_dealt` is what the move took off the target.
pub fn apply_move_effects(
    move_name: MoveName,
    user: &mut Team,
    other: &mut Team,
    environment: &mut Environment,
    damage_dealt: u16,
) {
    use MoveName::*;
    let generation = user.generation();
    let weather = weather(user, other, environment);
    match move_name {
        Spikes => {
            other.hazards.add_spikes();
        }
        ToxicSpikes => {
            other.hazards.add_toxic_spikes();
        }
        StealthRock => {
            other.hazards.add_stealth_rock();
        }
        Reflect => {
            let turns = screen_duration(user, environment);
            user.screens.reflect.activate(turns);
        }
        LightScreen => {
            let turns = screen_duration(user, environment);
            user.screens.light_screen.activate(turns);
        }
        Safeguard => {
            user.screens.safeguard.activate(Screens::STANDARD);
        }
        Mist => {
            user.screens.mist.activate(Screens::STANDARD);
        }
        LuckyChant => {
            user.screens.lucky_chant.activate(Screens::STANDARD);
        }
        Tailwind => {
            user.screens.tailwind.activate(Screens::tailwind_duration(generation));
        }
        RainDance => set_weather(user, Weather::Rain, environment),
        SunnyDay => set_weather(user, Weather::Sun, environment),
        Sandstorm => set_weather(user, Weather::Sand, environment),
        Hail => set_weather(user, Weather::Hail, environment),

        SwordsDance => boost_self(user, &[(Stat::Atk, 2)]),
        NastyPlot => boost_self(user, &[(Stat::Spa, 2)]),
        Agility => boost_self(user, &[(Stat::Spe, 2)]),
        Amnesia => boost_self(user, &[(Stat::Spd, 2)]),
        IronDefense => boost_self(user, &[(Stat::Def, 2)]),
        CalmMind => boost_self(user, &[(Stat::Spa, 1), (Stat::Spd, 1)]),
        BulkUp => boost_self(user, &[(Stat::Atk, 1), (Stat::Def, 1)]),
        CosmicPower => boost_self(user, &[(Stat::Def, 1), (Stat::Spd, 1)]),
        DragonDance => boost_self(user, &[(Stat::Atk, 1), (Stat::Spe, 1)]),
        QuiverDance => boost_self(user, &[(Stat::Spa, 1), (Stat::Spd, 1), (Stat::Spe, 1)]),
        ShellSmash => boost_self(
            user,
            &[
                (Stat::Def, -1),
                (Stat::Spd, -1),
                (Stat::Atk, 2),
                (Stat::Spa, 2),
                (Stat::Spe, 2),
            ],
        ),
        Growl => {
            apply_boost(other, Stat::Atk, -1, true);
        }
        Charm => {
            apply_boost(other, Stat::Atk, -2, true);
        }
        Swagger => {
            apply_boost(other, Stat::Atk, 2, true);
            if other.active().ability != Ability::OwnTempo {
                other.flags.confuse();
            }
        }
        ConfuseRay => {
            if other.active().ability != Ability::OwnTempo && !other.flags.has_substitute() {
                other.flags.confuse();
            }
        }
        FocusEnergy => user.flags.focus_energy = true,

        Recover | SoftBoiled | MilkDrink | SlackOff | HealOrder => heal(user, 1, 2),
        Roost => {
            heal(user, 1, 2);
            user.flags.roosting = true;
        }
        MorningSun | Moonlight | Synthesis => weather_heal(user, weather),
        Rest => rest(user),
        BellyDrum => belly_drum(user),
        Curse => curse(user, other),
        Substitute => substitute(user),
        Protect | Detect => user.flags.protecting = true,
        Endure => user.flags.enduring = true,
        Stockpile => {
            if user.flags.increment_stockpile() && generation >= Generation::Four {
                boost_self(user, &[(Stat::Def, 1), (Stat::Spd, 1)]);
            }
        }
        SpitUp => {
            user.flags.release_stockpile();
        }
        Swallow => swallow(user),
        Wish => {
            user.wish.activate();
        }

        LeechSeed => {
            if !other.active().is_type(generation, Type::Grass) && !other.flags.has_substitute() {
                other.flags.leech_seeded = true;
            }
        }
        PerishSong => perish_song(user, other),
        Yawn => {
            if other.active().status.is_clear() && !other.flags.has_substitute() {
                other.flags.hit_with_yawn();
            }
        }
        Taunt => {
            other.flags.taunt.activate(ActiveFlags::TAUNT_TURNS);
        }
        Encore => encore(other),
        Disable => disable(other),
        Torment => other.flags.tormented = true,
        Imprison => user.flags.used_imprison = true,
        HealBlock => {
            other.flags.heal_block.activate(ActiveFlags::HEAL_BLOCK_TURNS);
        }
        MeanLook => other.flags.trapped = true,
        Gravity => {
            environment.gravity.activate(5);
        }
        TrickRoom => environment.toggle_trick_room(),
        MagicRoom => {
            environment.magic_room.activate(5);
        }
        MudSport => {
            environment.mud_sport.activate(5);
        }
        WaterSport => {
            environment.water_sport.activate(5);
        }
        MagnetRise => {
            if !user.flags.ingrained {
                user.flags.magnet_rise.activate(ActiveFlags::MAGNET_RISE_TURNS);
            }
        }
        Ingrain => user.flags.ingrained = true,
        AquaRing => user.flags.aqua_ring = true,
        Trick => trick(user, other),
        Haze => {
            user.flags.stages.clear();
            other.flags.stages.clear();
        }
        HealBell | Aromatherapy => cure_team(user),
        PainSplit => pain_split(user, other),
        RapidSpin => rapid_spin(user),
        Defog => defog(user, other),
        KnockOff => {
            if damage_dealt > 0 && !other.active().is_fainted() {
                other.active_mut().item.remove();
            }
        }

        ThunderWave => {
            if !other.active().is_type(generation, Type::Ground) {
                status_move(user, other, StatusName::Paralysis, environment);
            }
        }
        StunSpore => status_move(user, other, StatusName::Paralysis, environment),
        Toxic => status_move(user, other, StatusName::Toxic, environment),
        WillOWisp => status_move(user, other, StatusName::Burn, environment),
        Spore | SleepPowder | Hypnosis => status_move(user, other, StatusName::Sleep, environment),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Species;
    use crate::testing::{pokemon, single, team};

    #[test]
    fn test_light_clay_extends_screens() {
        let generation = Generation::Four;
        let mut user = team(
            generation,
            true,
            vec![pokemon(generation, Species::Bronzong, Ability::Levitate, Item::LightClay, &[MoveName::Reflect])],
        );
        let mut other = single(generation, false, Species::Snorlax, &[]);
        let mut environment = Environment::new();
        apply_move_effects(MoveName::Reflect, &mut user, &mut other, &mut environment, 0);
        assert_eq!(user.screens.reflect.turns_remaining(), Screens::EXTENDED);
    }

    #[test]
    fn test_substitute_costs_a_quarter() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Gengar, &[MoveName::Substitute]);
        let mut other = single(generation, false, Species::Snorlax, &[]);
        let mut environment = Environment::new();
        let max = user.active().hp.max();
        apply_move_effects(MoveName::Substitute, &mut user, &mut other, &mut environment, 0);
        assert_eq!(user.flags.substitute, max / 4);
        assert_eq!(user.active().hp.current(), max - max / 4);
        apply_move_effects(MoveName::Substitute, &mut user, &mut other, &mut environment, 0);
        assert_eq!(user.active().hp.current(), max - max / 4);
    }

    #[test]
    fn test_rest_heals_and_sleeps() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Snorlax, &[MoveName::Rest]);
        let mut other = single(generation, false, Species::Snorlax, &[]);
        let mut environment = Environment::new();
        user.active_mut().status = Status::Burn;
        hp::damage(&mut user, 100);
        apply_move_effects(MoveName::Rest, &mut user, &mut other, &mut environment, 0);
        assert!(user.active().hp.is_full());
        assert_eq!(user.active().status, Status::Rest { turns_slept: 0 });
    }

    #[test]
    fn test_belly_drum_maximizes_attack() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Snorlax, &[MoveName::BellyDrum]);
        let mut other = single(generation, false, Species::Snorlax, &[]);
        let mut environment = Environment::new();
        apply_move_effects(MoveName::BellyDrum, &mut user, &mut other, &mut environment, 0);
        assert_eq!(user.flags.stages.atk, 6);
    }

    #[test]
    fn test_ghost_curse() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Gengar, &[MoveName::Curse]);
        let mut other = single(generation, false, Species::Snorlax, &[]);
        let mut environment = Environment::new();
        apply_move_effects(MoveName::Curse, &mut user, &mut other, &mut environment, 0);
        assert!(other.flags.cursed);
        assert!(!user.active().hp.is_full());

        let mut normal = single(generation, true, Species::Snorlax, &[MoveName::Curse]);
        apply_move_effects(MoveName::Curse, &mut normal, &mut other, &mut environment, 0);
        assert_eq!(normal.flags.stages.atk, 1);
        assert_eq!(normal.flags.stages.spe, -1);
    }

    #[test]
    fn test_weather_moves_and_rocks() {
        let generation = Generation::Four;
        let mut user = team(
            generation,
            true,
            vec![pokemon(generation, Species::Tyranitar, Ability::None, Item::DampRock, &[MoveName::RainDance])],
        );
        let mut other = single(generation, false, Species::Snorlax, &[]);
        let mut environment = Environment::new();
        apply_move_effects(MoveName::RainDance, &mut user, &mut other, &mut environment, 0);
        assert_eq!(environment.weather(), Weather::Rain);
        assert_eq!(
            environment.weather_duration(),
            crate::types::WeatherDuration::Turns(Environment::WEATHER_EXTENDED)
        );
    }

    #[test]
    fn test_rapid_spin_and_defog() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Forretress, &[MoveName::RapidSpin]);
        let mut other = single(generation, false, Species::Skarmory, &[]);
        let mut environment = Environment::new();
        user.hazards.add_spikes();
        user.flags.leech_seeded = true;
        apply_move_effects(MoveName::RapidSpin, &mut user, &mut other, &mut environment, 10);
        assert!(user.hazards.is_empty());
        assert!(!user.flags.leech_seeded);

        other.hazards.add_stealth_rock();
        other.screens.reflect.activate(Screens::STANDARD);
        apply_move_effects(MoveName::Defog, &mut user, &mut other, &mut environment, 0);
        assert!(other.hazards.is_empty());
        assert!(!other.screens.reflect.is_active());
        assert_eq!(other.flags.stages.evasion, -1);
    }

    #[test]
    fn test_thunder_wave_misses_ground() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Jolteon, &[MoveName::ThunderWave]);
        let mut ground = single(generation, false, Species::Hippowdon, &[]);
        let mut environment = Environment::new();
        apply_move_effects(MoveName::ThunderWave, &mut user, &mut ground, &mut environment, 0);
        assert!(ground.active().status.is_clear());
        let mut target = single(generation, false, Species::Snorlax, &[]);
        apply_move_effects(MoveName::ThunderWave, &mut user, &mut target, &mut environment, 0);
        assert_eq!(target.active().status, Status::Paralysis);
    }

    #[test]
    fn test_trick_swaps_items() {
        let generation = Generation::Four;
        let mut user = team(
            generation,
            true,
            vec![pokemon(generation, Species::Latios, Ability::Levitate, Item::ChoiceScarf, &[MoveName::Trick])],
        );
        let mut other = team(
            generation,
            false,
            vec![pokemon(generation, Species::Blissey, Ability::NaturalCure, Item::Leftovers, &[])],
        );
        let mut environment = Environment::new();
        apply_move_effects(MoveName::Trick, &mut user, &mut other, &mut environment, 0);
        assert_eq!(user.active().item(generation, false), Item::Leftovers);
        assert_eq!(other.active().item(generation, false), Item::ChoiceScarf);
    }
}
