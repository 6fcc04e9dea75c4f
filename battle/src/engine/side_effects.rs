//! Secondary effects of moves: each move has a list of outcomes whose
//! probabilities sum to 1, and the search branches over them

use tactician_protocol::Stat;

use crate::data::{Ability, MoveName};
use crate::generation::Generation;
use crate::types::{AnyPokemon, Environment, Status, StatusName, Team, Type, Weather};

use super::stats::weather;
use super::switching::switch_pokemon;

/// Which side an effect lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    User,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    None,
    Status { target: Target, status: StatusName },
    Boost { target: Target, changes: &'static [(Stat, i8)] },
    Flinch,
    Confuse,
    /// Force the target out in favor of this team index
    Phaze(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideEffect {
    pub probability: f64,
    pub effect: Effect,
}

impl SideEffect {
    pub fn certain(effect: Effect) -> Self {
        Self {
            probability: 1.0,
            effect,
        }
    }
}

fn no_effect() -> Vec<SideEffect> {
    vec![SideEffect::certain(Effect::None)]
}

/// `effect` with `probability`, otherwise nothing
fn chance_of(probability: f64, effect: Effect) -> Vec<SideEffect> {
    if probability >= 1.0 {
        return vec![SideEffect::certain(effect)];
    }
    vec![
        SideEffect { probability, effect },
        SideEffect {
            probability: 1.0 - probability,
            effect: Effect::None,
        },
    ]
}

fn status(target: Target, status: StatusName) -> Effect {
    Effect::Status { target, status }
}

fn lower(changes: &'static [(Stat, i8)]) -> Effect {
    Effect::Boost {
        target: Target::Other,
        changes,
    }
}

fn raise_self(changes: &'static [(Stat, i8)]) -> Effect {
    Effect::Boost {
        target: Target::User,
        changes,
    }
}

/// Chance of a secondary effect on the target, before Serene Grace
fn secondary(generation: Generation, move_name: MoveName) -> Option<(f64, Effect)> {
    use MoveName::*;
    use StatusName::{Burn, Freeze, Paralysis, Poison};
    let other = Target::Other;
    Some(match move_name {
        BodySlam | Discharge => (0.3, status(other, Paralysis)),
        Thunder if generation == Generation::One => (0.1, status(other, Paralysis)),
        Thunder => (0.3, status(other, Paralysis)),
        Thunderbolt | ThunderPunch => (0.1, status(other, Paralysis)),
        FireBlast if generation == Generation::One => (0.3, status(other, Burn)),
        Flamethrower | FireBlast | FirePunch | FlameWheel | FlareBlitz => (0.1, status(other, Burn)),
        SacredFire => (0.5, status(other, Burn)),
        Scald => (0.3, status(other, Burn)),
        IceBeam | IcePunch | Blizzard => (0.1, status(other, Freeze)),
        SludgeBomb | PoisonJab | GunkShot => (0.3, status(other, Poison)),
        Psychic if generation == Generation::One => (0.33, lower(&[(Stat::Spa, -1), (Stat::Spd, -1)])),
        Psychic | EnergyBall | BugBuzz | EarthPower | FocusBlast | FlashCannon => {
            (0.1, lower(&[(Stat::Spd, -1)]))
        }
        ShadowBall => (0.2, lower(&[(Stat::Spd, -1)])),
        Crunch if generation <= Generation::Three => (0.2, lower(&[(Stat::Spd, -1)])),
        Crunch => (0.2, lower(&[(Stat::Def, -1)])),
        Moonblast => (0.3, lower(&[(Stat::Spa, -1)])),
        PlayRough => (0.1, lower(&[(Stat::Atk, -1)])),
        DarkPulse | ZenHeadbutt => (0.2, Effect::Flinch),
        Waterfall if generation >= Generation::Four => (0.2, Effect::Flinch),
        AirSlash | RockSlide | IronHead => (0.3, Effect::Flinch),
        FakeOut => (1.0, Effect::Flinch),
        Hurricane => (0.3, Effect::Confuse),
        _ => return None,
    })
}

/// Effects on the user that always happen when the move hits
fn self_effect(move_name: MoveName) -> Option<Effect> {
    use MoveName::*;
    Some(match move_name {
        Overheat | DracoMeteor | LeafStorm => raise_self(&[(Stat::Spa, -2)]),
        CloseCombat => raise_self(&[(Stat::Def, -1), (Stat::Spd, -1)]),
        Superpower => raise_self(&[(Stat::Atk, -1), (Stat::Def, -1)]),
        _ => return None,
    })
}

/// Roar and Whirlwind pick any other living member with equal chance. Gen 1
/// versions do nothing; in gen 2 they fail unless the target already moved.
fn phaze_effects(user: &Team, other: &Team) -> Vec<SideEffect> {
    let generation = user.generation();
    let fails = match generation {
        Generation::One => true,
        Generation::Two => !other.flags.moved(),
        _ => false,
    };
    if fails || other.flags.ingrained {
        return no_effect();
    }
    let targets: Vec<usize> = other.bench().map(|(index, _)| index).collect();
    if targets.is_empty() {
        return no_effect();
    }
    let probability = 1.0 / targets.len() as f64;
    targets
        .into_iter()
        .map(|index| SideEffect {
            probability,
            effect: Effect::Phaze(index),
        })
        .collect()
}

/// Whether `status` could land on `team` at all, so impossible branches
/// are never generated
fn could_receive_status(team: &Team, status: StatusName, weather: Weather) -> bool {
    team.active().status.is_clear()
        && !team.screens.safeguard.is_active()
        && !is_immune_to_status(team.generation(), team, status, weather)
}

/// Every outcome of the move's secondary effect. Probabilities sum to 1.
pub fn possible_side_effects(
    move_name: MoveName,
    user: &Team,
    other: &Team,
    environment: &Environment,
) -> Vec<SideEffect> {
    let generation = user.generation();
    let weather = weather(user, other, environment);
    if move_name.is_phazing() {
        return phaze_effects(user, other);
    }
    if let Some(effect) = self_effect(move_name) {
        return vec![SideEffect::certain(effect)];
    }
    if move_name == MoveName::MeteorMash {
        let probability = serene_grace(user, 0.2);
        return chance_of(probability, raise_self(&[(Stat::Atk, 1)]));
    }
    if other.active().ability == Ability::ShieldDust || other.flags.has_substitute() {
        return no_effect();
    }
    if move_name == MoveName::TriAttack && generation >= Generation::Two {
        let each = serene_grace(user, 0.2) / 3.0;
        return vec![
            SideEffect {
                probability: each,
                effect: status(Target::Other, StatusName::Burn),
            },
            SideEffect {
                probability: each,
                effect: status(Target::Other, StatusName::Paralysis),
            },
            SideEffect {
                probability: each,
                effect: status(Target::Other, StatusName::Freeze),
            },
            SideEffect {
                probability: 1.0 - 3.0 * each,
                effect: Effect::None,
            },
        ];
    }
    match secondary(generation, move_name) {
        Some((_, Effect::Status { status, .. })) if !could_receive_status(other, status, weather) => no_effect(),
        Some((_, Effect::Confuse)) if other.flags.is_confused() => no_effect(),
        Some((probability, effect)) => chance_of(serene_grace(user, probability), effect),
        None => no_effect(),
    }
}

fn serene_grace(user: &Team, probability: f64) -> f64 {
    if user.active().ability == Ability::SereneGrace {
        (probability * 2.0).min(1.0)
    } else {
        probability
    }
}

fn is_immune_to_status(generation: Generation, team: &Team, status: StatusName, weather: Weather) -> bool {
    let pokemon = team.active();
    let is_type = |t: Type| pokemon.active_types(generation, team.flags.roosting).contains(&t);
    let by_type = match status {
        StatusName::Burn => is_type(Type::Fire),
        StatusName::Freeze => is_type(Type::Ice) || weather == Weather::Sun,
        StatusName::Paralysis => generation >= Generation::Six && is_type(Type::Electric),
        StatusName::Poison | StatusName::Toxic => is_type(Type::Poison) || is_type(Type::Steel),
        StatusName::Sleep | StatusName::Rest | StatusName::Clear => false,
    };
    let by_ability = matches!(
        (pokemon.ability, status),
        (Ability::WaterVeil, StatusName::Burn)
            | (Ability::MagmaArmor, StatusName::Freeze)
            | (Ability::Immunity, StatusName::Poison | StatusName::Toxic)
            | (Ability::Limber, StatusName::Paralysis)
            | (Ability::Insomnia | Ability::VitalSpirit, StatusName::Sleep)
    );
    by_type || by_ability
}

/// Give `team`'s active Pokemon a status from an opponent's move. Fails on
/// an existing status, immunities and Safeguard.
pub fn set_status(team: &mut Team, status: StatusName, weather: Weather) -> bool {
    let generation = team.generation();
    if !team.active().status.is_clear()
        || team.screens.safeguard.is_active()
        || is_immune_to_status(generation, team, status, weather)
    {
        return false;
    }
    team.active_mut().status = Status::new(status);
    true
}

/// Statuses Synchronize passes back to the attacker
fn synchronized(generation: Generation, status: StatusName) -> Option<StatusName> {
    match status {
        StatusName::Burn | StatusName::Paralysis | StatusName::Poison => Some(status),
        StatusName::Toxic if generation <= Generation::Four => Some(StatusName::Poison),
        StatusName::Toxic => Some(StatusName::Toxic),
        _ => None,
    }
}

/// Status from `user` onto `target`, with Synchronize reflecting it back
pub fn inflict_status(user: &mut Team, target: &mut Team, status: StatusName, environment: &Environment) -> bool {
    let weather = weather(user, target, environment);
    if !set_status(target, status, weather) {
        return false;
    }
    if target.active().ability == Ability::Synchronize {
        if let Some(reflected) = synchronized(target.generation(), status) {
            set_status(user, reflected, weather);
        }
    }
    true
}

/// Change stat stages. Drops caused by the opponent are stopped by Clear
/// Body and friends, and by Mist. Returns the change actually applied.
pub fn apply_boost(team: &mut Team, stat: Stat, stages: i8, from_opponent: bool) -> i8 {
    let blocked = from_opponent
        && stages < 0
        && (team.active().ability.blocks_stat_drops() || team.screens.mist.is_active());
    if blocked {
        return 0;
    }
    team.flags.stages.boost(stat, stages)
}

/// Carry out one chosen outcome of `possible_side_effects`
pub fn apply_side_effect(effect: Effect, user: &mut Team, other: &mut Team, environment: &mut Environment) {
    match effect {
        Effect::None => {}
        Effect::Status {
            target: Target::Other,
            status,
        } => {
            inflict_status(user, other, status, environment);
        }
        Effect::Status {
            target: Target::User,
            status,
        } => {
            let weather = weather(user, other, environment);
            set_status(user, status, weather);
        }
        Effect::Boost { target, changes } => {
            for (stat, stages) in changes {
                match target {
                    Target::User => apply_boost(user, *stat, *stages, false),
                    Target::Other => apply_boost(other, *stat, *stages, true),
                };
            }
        }
        Effect::Flinch => {
            if other.active().ability != Ability::InnerFocus {
                other.flags.flinched = true;
            }
        }
        Effect::Confuse => {
            if other.active().ability != Ability::OwnTempo {
                other.flags.confuse();
            }
        }
        Effect::Phaze(index) => {
            assert_ne!(index, other.active_index(), "cannot phaze into the active Pokemon");
            if other.active().is_fainted() {
                return;
            }
            switch_pokemon(other, user, environment, index);
        }
    }
}
