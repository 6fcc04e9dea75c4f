//! Which selections are legal, and whether a selected move still gets to
//! run once the turn is underway

use crate::data::{Ability, Item, MoveName};
use crate::generation::Generation;
use crate::selection::{Action, Selection, Switch};
use crate::types::{AnyPokemon, Environment, Move, Status, Team, Type};

/// Touching the ground: hit by Spikes and Ground moves, held by Arena Trap
pub fn is_grounded(team: &Team, environment: &Environment) -> bool {
    let generation = team.generation();
    let pokemon = team.active();
    let item = pokemon.item(generation, environment.magic_room());
    if environment.gravity() || team.flags.ingrained || item == Item::IronBall {
        return true;
    }
    let flying = pokemon
        .active_types(generation, team.flags.roosting)
        .contains(&Type::Flying);
    !(flying
        || pokemon.ability == Ability::Levitate
        || item == Item::AirBalloon
        || team.flags.magnet_rise.is_active())
}

/// Blocks both selecting a regular move and attempting to run it: no PP,
/// disabled, Heal Block on a healing move, or the foe's Imprison
pub fn blocks_selection_and_execution_attempt(user: &Team, move_: &Move, other: &Team) -> bool {
    if !move_.name.is_regular() {
        return false;
    }
    let imprisoned = other.flags.used_imprison && other.active().moves.find(move_.name).is_some();
    !move_.has_pp()
        || user.flags.is_disabled(move_.name)
        || (user.flags.heal_block.is_active() && move_.name.is_healing())
        || imprisoned
}

/// Blocks both selecting a move and running it after a flinch check:
/// Taunt on status moves and Gravity on airborne moves
pub fn blocks_selection_and_execution(user: &Team, move_name: MoveName, environment: &Environment) -> bool {
    (user.flags.is_taunted() && !move_name.is_damaging())
        || (environment.gravity() && move_name.is_blocked_by_gravity())
}

fn is_blocked_by_freeze(status: Status, move_name: MoveName) -> bool {
    status == Status::Freeze && !move_name.thaws_user()
}

/// Sleeping Pokemon may only use Sleep Talk and Snore, and only sleeping
/// Pokemon may use them. In gen 1 waking up uses up the turn.
fn is_blocked_by_sleep(generation: Generation, status: Status, move_name: MoveName, was_asleep: bool) -> bool {
    let sleeping = status.is_sleeping();
    if generation == Generation::One && was_asleep && !sleeping {
        return true;
    }
    move_name.usable_while_sleeping() != sleeping
}

/// Checked after status has advanced for the turn
pub fn can_attempt_move_execution(user: &Team, move_name: MoveName, other: &Team, user_was_asleep: bool) -> bool {
    let pokemon = user.active();
    if pokemon.hp.current() == 0 {
        return false;
    }
    let blocked_by_status = is_blocked_by_freeze(pokemon.status, move_name)
        || is_blocked_by_sleep(user.generation(), pokemon.status, move_name, user_was_asleep);
    let blocked_by_attempt = pokemon
        .moves
        .find(move_name)
        .is_some_and(|move_| blocks_selection_and_execution_attempt(user, move_, other));
    !(blocked_by_status || blocked_by_attempt || user.flags.loafing)
}

pub fn can_execute_move(
    user: &Team,
    action: Action,
    environment: &Environment,
    is_recharging: bool,
    is_fully_paralyzed: bool,
) -> bool {
    match action {
        Action::Switch(_) | Action::Pass => true,
        Action::HitSelf => {
            assert!(!is_recharging, "cannot hit itself while recharging");
            true
        }
        Action::Move(name) => {
            !user.flags.flinched
                && !blocks_selection_and_execution(user, name, environment)
                && !is_fully_paralyzed
                && !is_recharging
        }
    }
}

/// Whether a Pokemon is immune to a move because of its ability
pub fn ability_blocks_move(
    generation: Generation,
    ability: Ability,
    move_name: MoveName,
    move_type: Type,
    target_status: Status,
    target_types: &[Type],
) -> bool {
    match ability {
        Ability::FlashFire => {
            move_type == Type::Fire && (generation >= Generation::Four || target_status != Status::Freeze)
        }
        Ability::VoltAbsorb | Ability::MotorDrive => move_type == Type::Electric,
        Ability::LightningRod => generation >= Generation::Five && move_type == Type::Electric,
        Ability::WaterAbsorb | Ability::DrySkin => move_type == Type::Water,
        Ability::Levitate => move_type == Type::Ground && move_name.is_damaging(),
        Ability::Soundproof => move_name.is_sound(),
        Ability::WonderGuard if move_name.is_damaging() => {
            wonder_guard_blocks(generation, move_name, move_type, target_types)
        }
        _ => false,
    }
}

/// Only super effective hits get through. Struggle and typeless moves
/// always do.
fn wonder_guard_blocks(generation: Generation, move_name: MoveName, move_type: Type, target_types: &[Type]) -> bool {
    assert!(move_name.is_damaging(), "Wonder Guard only checks damaging moves, got {move_name}");
    if move_name == MoveName::Struggle || move_type == Type::Typeless {
        return false;
    }
    move_type.effectiveness_multi(target_types, generation) <= 1.0
}

/// Whether `ability` on the foe stops `switcher` from leaving
pub fn ability_blocks_switching(ability: Ability, switcher: &Team, environment: &Environment) -> bool {
    match ability {
        Ability::ShadowTag => switcher.active().ability != Ability::ShadowTag,
        Ability::ArenaTrap => is_grounded(switcher, environment),
        Ability::MagnetPull => {
            let generation = switcher.generation();
            switcher
                .active()
                .active_types(generation, switcher.flags.roosting)
                .contains(&Type::Steel)
        }
        _ => false,
    }
}

/// Shed Shell lets its holder leave regardless of trapping
pub fn allows_switching(item: Item) -> bool {
    item == Item::ShedShell
}

fn is_blocked_from_switching(user: &Team, other: &Team, environment: &Environment) -> bool {
    let generation = user.generation();
    if generation >= Generation::Six && user.active().is_type(generation, Type::Ghost) {
        return false;
    }
    let attempted = ability_blocks_switching(other.active().ability, user, environment)
        || user.flags.trapped
        || user.flags.partial_trap.is_active();
    attempted && !allows_switching(user.active().item(generation, environment.magic_room()))
}

pub fn blocked_by_torment(user: &Team, move_name: MoveName) -> bool {
    user.flags.tormented
        && move_name != MoveName::Struggle
        && user.flags.last_used_move.move_name == Some(move_name)
}

fn is_locked_in(user: &Team, environment: &Environment) -> bool {
    let item = user.active().item(user.generation(), environment.magic_room());
    user.flags.is_encored() || user.flags.is_locked_in_by_move() || item.is_choice()
}

/// Encore, a multi-turn move or a choice item keep regular moves to the
/// last one used. Struggle is only blocked by a multi-turn move.
pub fn is_blocked_due_to_lock_in(user: &Team, move_name: MoveName, environment: &Environment) -> bool {
    if !move_name.is_regular() {
        return user.flags.is_locked_in_by_move();
    }
    if !is_locked_in(user, environment) {
        return false;
    }
    user.flags
        .last_used_move
        .move_name
        .is_some_and(|last| last != move_name)
}

fn switch_selections(user: &Team) -> Vec<Selection> {
    let size = user.members().len();
    user.bench()
        .filter_map(|(index, _)| Switch::new(index, size).ok())
        .map(Selection::Switch)
        .collect()
}

/// Every selection `user` may make this turn. Never empty.
pub fn legal_selections(user: &Team, other: &Team, environment: &Environment) -> Vec<Selection> {
    if user.flags.last_used_move.switch_decision_required || user.active().is_fainted() {
        let switches = switch_selections(user);
        assert!(!switches.is_empty(), "replacement required without a replacement");
        return switches;
    }
    if other.flags.last_used_move.switch_decision_required || other.active().is_fainted() {
        return vec![Selection::Pass];
    }
    if user.flags.moved() {
        return vec![Selection::Pass];
    }
    if let Some(locked) = user.flags.locked_move() {
        return vec![Selection::Move(locked)];
    }

    let mut result: Vec<Selection> = user
        .active()
        .moves
        .iter()
        .filter(|move_| {
            !is_blocked_due_to_lock_in(user, move_.name, environment)
                && !blocks_selection_and_execution_attempt(user, move_, other)
                && !blocks_selection_and_execution(user, move_.name, environment)
                && !blocked_by_torment(user, move_.name)
        })
        .map(|move_| Selection::Move(move_.name))
        .collect();
    if result.is_empty() {
        result.push(Selection::Move(MoveName::Struggle));
    }
    if !is_blocked_from_switching(user, other, environment) {
        result.extend(switch_selections(user));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Species;
    use crate::testing::{pokemon, single, team};
    use crate::types::LockIn;

    fn two_member(generation: Generation, moves: &[MoveName]) -> Team {
        team(
            generation,
            true,
            vec![
                pokemon(generation, Species::Jolteon, Ability::None, Item::None, moves),
                pokemon(generation, Species::Snorlax, Ability::None, Item::None, &[MoveName::BodySlam]),
            ],
        )
    }

    fn foe(generation: Generation) -> Team {
        single(generation, false, Species::Gyarados, &[MoveName::Waterfall])
    }

    #[test]
    fn test_moves_and_switches() {
        let generation = Generation::Four;
        let user = two_member(generation, &[MoveName::Thunderbolt, MoveName::Substitute]);
        let selections = legal_selections(&user, &foe(generation), &Environment::new());
        assert_eq!(selections.len(), 3);
        assert_eq!(selections[0], Selection::Move(MoveName::Thunderbolt));
        assert!(selections[2].is_switch());
    }

    #[test]
    fn test_taunt_blocks_status_moves() {
        let generation = Generation::Four;
        let mut user = two_member(generation, &[MoveName::Thunderbolt, MoveName::Substitute]);
        user.flags.taunt.activate(3);
        let selections = legal_selections(&user, &foe(generation), &Environment::new());
        assert!(!selections.contains(&Selection::Move(MoveName::Substitute)));
    }

    #[test]
    fn test_struggle_when_nothing_else() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Jolteon, &[MoveName::Thunderbolt]);
        if let Some(move_) = user.active_mut().moves.find_mut(MoveName::Thunderbolt) {
            move_.set_pp(0);
        }
        let selections = legal_selections(&user, &foe(generation), &Environment::new());
        assert_eq!(selections, vec![Selection::Move(MoveName::Struggle)]);
    }

    #[test]
    fn test_choice_item_locks_in() {
        let generation = Generation::Four;
        let mut user = team(
            generation,
            true,
            vec![pokemon(
                generation,
                Species::Jolteon,
                Ability::None,
                Item::ChoiceSpecs,
                &[MoveName::Thunderbolt, MoveName::ShadowBall],
            )],
        );
        user.flags.last_used_move.record(MoveName::ShadowBall, true);
        user.flags.last_used_move.moved_this_turn = false;
        let selections = legal_selections(&user, &foe(generation), &Environment::new());
        assert_eq!(selections, vec![Selection::Move(MoveName::ShadowBall)]);
    }

    #[test]
    fn test_rampage_allows_only_that_move() {
        let generation = Generation::Four;
        let mut user = two_member(generation, &[MoveName::Outrage, MoveName::Earthquake]);
        user.flags.lock_in = LockIn::Rampage {
            move_name: MoveName::Outrage,
            turns: 1,
        };
        let selections = legal_selections(&user, &foe(generation), &Environment::new());
        assert_eq!(selections, vec![Selection::Move(MoveName::Outrage)]);
    }

    #[test]
    fn test_switch_decision_required() {
        let generation = Generation::Four;
        let mut user = two_member(generation, &[MoveName::UTurn]);
        user.flags.last_used_move.switch_decision_required = true;
        let selections = legal_selections(&user, &foe(generation), &Environment::new());
        assert_eq!(selections.len(), 1);
        assert!(selections[0].is_switch());

        let other = legal_selections(&foe(generation), &user, &Environment::new());
        assert_eq!(other, vec![Selection::Pass]);
    }

    #[test]
    fn test_shadow_tag_traps_unless_shed_shell() {
        let generation = Generation::Four;
        let user = two_member(generation, &[MoveName::Thunderbolt]);
        let other = team(
            generation,
            false,
            vec![pokemon(generation, Species::Wobbuffet, Ability::ShadowTag, Item::None, &[MoveName::Counter])],
        );
        let selections = legal_selections(&user, &other, &Environment::new());
        assert!(selections.iter().all(|selection| !selection.is_switch()));

        let mut shelled = user.clone();
        shelled.active_mut().item.set(Item::ShedShell);
        let selections = legal_selections(&shelled, &other, &Environment::new());
        assert!(selections.iter().any(|selection| selection.is_switch()));
    }

    #[test]
    fn test_ghosts_escape_from_gen_six() {
        let generation = Generation::Six;
        let user = team(
            generation,
            true,
            vec![
                pokemon(generation, Species::Gengar, Ability::Levitate, Item::None, &[MoveName::ShadowBall]),
                pokemon(generation, Species::Snorlax, Ability::None, Item::None, &[MoveName::BodySlam]),
            ],
        );
        let other = team(
            generation,
            false,
            vec![pokemon(generation, Species::Wobbuffet, Ability::ShadowTag, Item::None, &[MoveName::Counter])],
        );
        let selections = legal_selections(&user, &other, &Environment::new());
        assert!(selections.iter().any(|selection| selection.is_switch()));
    }

    #[test]
    fn test_ability_blocks_move() {
        let generation = Generation::Four;
        assert!(ability_blocks_move(
            generation,
            Ability::Levitate,
            MoveName::Earthquake,
            Type::Ground,
            Status::Clear,
            &[Type::Ghost, Type::Poison],
        ));
        assert!(ability_blocks_move(
            generation,
            Ability::WonderGuard,
            MoveName::Surf,
            Type::Water,
            Status::Clear,
            &[Type::Bug, Type::Ghost],
        ));
        assert!(!ability_blocks_move(
            generation,
            Ability::WonderGuard,
            MoveName::Flamethrower,
            Type::Fire,
            Status::Clear,
            &[Type::Bug, Type::Ghost],
        ));
        assert!(!ability_blocks_move(
            generation,
            Ability::WonderGuard,
            MoveName::Toxic,
            Type::Poison,
            Status::Clear,
            &[Type::Bug, Type::Ghost],
        ));
    }

    #[test]
    fn test_frozen_pokemon_can_only_thaw() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Scizor, &[MoveName::UTurn]);
        user.active_mut().status = Status::Freeze;
        let other = foe(generation);
        assert!(!can_attempt_move_execution(&user, MoveName::UTurn, &other, false));
        assert!(can_attempt_move_execution(&user, MoveName::FlareBlitz, &other, false));
    }

    #[test]
    fn test_gen1_waking_uses_the_turn() {
        let user = single(Generation::One, true, Species::Snorlax, &[MoveName::BodySlam]);
        let other = foe(Generation::One);
        assert!(!can_attempt_move_execution(&user, MoveName::BodySlam, &other, true));
        let later = single(Generation::Two, true, Species::Snorlax, &[MoveName::BodySlam]);
        assert!(can_attempt_move_execution(&later, MoveName::BodySlam, &foe(Generation::Two), true));
    }

    #[test]
    fn test_can_execute_move() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Jolteon, &[MoveName::Thunderbolt]);
        let environment = Environment::new();
        let thunderbolt = Action::Move(MoveName::Thunderbolt);
        assert!(can_execute_move(&user, thunderbolt, &environment, false, false));
        assert!(!can_execute_move(&user, thunderbolt, &environment, false, true));
        assert!(!can_execute_move(&user, thunderbolt, &environment, true, false));
        assert!(can_execute_move(&user, Action::HitSelf, &environment, false, false));
        user.flags.flinched = true;
        assert!(!can_execute_move(&user, thunderbolt, &environment, false, false));
    }

    #[test]
    fn test_torment() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Jolteon, &[MoveName::Thunderbolt]);
        user.flags.tormented = true;
        user.flags.last_used_move.record(MoveName::Thunderbolt, true);
        assert!(blocked_by_torment(&user, MoveName::Thunderbolt));
        assert!(!blocked_by_torment(&user, MoveName::Struggle));
    }
}
