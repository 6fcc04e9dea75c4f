//! Running one side's action for the turn

use tactician_protocol::Stat;

use crate::data::{Ability, Item, MoveName, MoveTarget};
use crate::generation::Generation;
use crate::legality::{ability_blocks_move, can_attempt_move_execution, can_execute_move};
use crate::selection::{Action, Selection};
use crate::types::{ActiveFlags, AnyPokemon, Environment, LockIn, Status, Team, Type, Weather};

use super::damage::{calculate_damage, confusion_damage};
use super::effects::apply_move_effects;
use super::hp::{self, heal, indirect_damage};
use super::side_effects::{Effect, Target, apply_boost, apply_side_effect};
use super::stats::weather;
use super::switching::switch_pokemon;

/// Damage the server reported for a move, when it reported it at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActualDamage {
    #[default]
    Unknown,
    Known(u16),
}

/// One side's move as it resolves: what was picked, what ran, and how the
/// random parts came out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsedMove {
    pub selected: Selection,
    pub executed: Action,
    pub critical_hit: bool,
    pub miss: bool,
    pub side_effect: Effect,
}

impl UsedMove {
    /// The selection runs as picked, hits, and has no extra effect
    pub fn plain(selection: Selection) -> Self {
        Self {
            selected: selection,
            executed: Action::from(selection),
            critical_hit: false,
            miss: false,
            side_effect: Effect::None,
        }
    }
}

/// What the foe is doing this turn, from the mover's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherAction {
    /// The foe has yet to act
    Pending(Action),
    Moved,
}

fn crash_damage(user: &mut Team) {
    let max = user.active().hp.max();
    let amount = match user.generation() {
        Generation::One => 1,
        generation if generation >= Generation::Five => max / 2,
        _ => max / 8,
    };
    hp::damage(user, amount.max(1));
}

/// Moves that run but do nothing this time
fn fails(move_name: MoveName, user: &Team, other: &Team, other_action: OtherAction) -> bool {
    let targets_foe = move_name.data().target == MoveTarget::Opponent;
    match move_name {
        MoveName::Explosion | MoveName::SelfDestruct if other.active().ability == Ability::Damp => return true,
        MoveName::SuckerPunch if !matches!(other_action, OtherAction::Pending(action) if action.is_damaging()) => {
            return true;
        }
        MoveName::FakeOut if user.flags.last_used_move.move_name.is_some() => return true,
        _ => {}
    }
    if targets_foe && other.active().is_fainted() {
        return true;
    }
    other.flags.protecting && !move_name.bypasses_protect()
}

/// Moves that take more than one turn. Returns false when the move does
/// nothing else this turn.
fn start_lock_in(move_name: MoveName, user: &mut Team, weather: Weather, damage: &mut ActualDamage) -> bool {
    if move_name.is_charging() {
        if user.flags.lock_in == LockIn::ChargingUp(move_name) {
            user.flags.lock_in = LockIn::None;
        } else if !(move_name == MoveName::SolarBeam && weather == Weather::Sun) {
            user.flags.lock_in = LockIn::ChargingUp(move_name);
            return false;
        }
    }
    if move_name.is_rampage() && !matches!(user.flags.lock_in, LockIn::Rampage { .. }) {
        user.flags.lock_in = LockIn::Rampage { move_name, turns: 1 };
    }
    if move_name == MoveName::Bide {
        match user.flags.use_bide() {
            Some(stored) => *damage = ActualDamage::Known(stored),
            None => return false,
        }
    }
    true
}

/// Flash Fire and the absorbing abilities turn a blocked move into a
/// benefit for the target
fn absorb(move_type: Type, other: &mut Team) {
    match other.active().ability {
        Ability::FlashFire if move_type == Type::Fire => other.flags.flash_fire = true,
        Ability::VoltAbsorb | Ability::WaterAbsorb | Ability::DrySkin => heal(other, 1, 4),
        Ability::MotorDrive => {
            apply_boost(other, Stat::Spe, 1, false);
        }
        Ability::LightningRod => {
            apply_boost(other, Stat::Spa, 1, false);
        }
        _ => {}
    }
}

/// Damage that would knock out a target at full HP leaves it at 1 HP with
/// a Focus Sash or (from gen 5) Sturdy. Endure does the same at any HP.
fn survive(other: &mut Team, environment: &Environment, damage: u16) -> u16 {
    let generation = other.generation();
    let pokemon = other.active();
    let current = pokemon.hp.current();
    if damage < current {
        return damage;
    }
    let full = pokemon.hp.is_full();
    let item = pokemon.item(generation, environment.magic_room());
    if full && item == Item::FocusSash {
        other.active_mut().item.destroy();
        return current - 1;
    }
    let sturdy = full && generation >= Generation::Five && pokemon.ability == Ability::Sturdy;
    if sturdy || other.flags.enduring {
        return current - 1;
    }
    damage
}

fn recoil(move_name: MoveName, user: &mut Team, dealt: u16) {
    let generation = user.generation();
    if move_name == MoveName::Struggle && generation >= Generation::Four {
        let max = user.active().hp.max();
        hp::damage(user, (max / 4).max(1));
        return;
    }
    if user.active().ability.ignores_recoil() {
        return;
    }
    if let Some(fraction) = move_name.recoil(generation) {
        let amount = u16::try_from(fraction.apply(dealt).max(1)).unwrap_or(u16::MAX);
        hp::damage(user, amount);
    }
}

fn drain(move_name: MoveName, user: &mut Team, dealt: u16) {
    let Some(fraction) = move_name.drain() else {
        return;
    };
    if user.flags.heal_block.is_active() || user.active().is_fainted() {
        return;
    }
    let amount = u16::try_from(fraction.apply(dealt).max(1)).unwrap_or(u16::MAX);
    user.active_mut().hp.heal(amount);
}

/// Rough Skin, Iron Barbs and Rocky Helmet punish contact
fn contact(user: &mut Team, other: &Team, environment: &Environment) {
    let generation = other.generation();
    if matches!(other.active().ability, Ability::RoughSkin | Ability::IronBarbs) {
        indirect_damage(user, 1, 8);
    }
    if other.active().item(generation, environment.magic_room()) == Item::RockyHelmet {
        indirect_damage(user, 1, 6);
    }
}

fn hits_other(effect: Effect) -> bool {
    match effect {
        Effect::None => false,
        Effect::Boost { target, .. } | Effect::Status { target, .. } => target == Target::Other,
        Effect::Flinch | Effect::Confuse | Effect::Phaze(_) => true,
    }
}

/// The move connected: deal damage and apply everything that follows
#[allow(clippy::too_many_arguments)]
fn use_move(
    move_name: MoveName,
    user: &mut Team,
    other: &mut Team,
    environment: &mut Environment,
    critical_hit: bool,
    side_effect: Effect,
    actual_damage: ActualDamage,
) {
    let generation = user.generation();
    let move_type = user.active().move_type(generation, move_name);
    if move_name.thaws_user() && user.active().status == Status::Freeze {
        user.active_mut().status = Status::Clear;
    }

    let mut dealt = 0;
    if move_name.is_damaging() {
        if move_name == MoveName::BrickBreak {
            other.screens.shatter();
        }
        let damage = match actual_damage {
            ActualDamage::Known(damage) => damage,
            ActualDamage::Unknown => calculate_damage(user, move_name, critical_hit, other, environment),
        };
        let bypasses_substitute = move_name.is_sound() && generation >= Generation::Six;
        if other.flags.has_substitute() && !bypasses_substitute {
            dealt = other.flags.damage_substitute(damage);
        } else if damage > 0 {
            let damage = survive(other, environment, damage);
            dealt = hp::damage(other, damage);
            let category = move_name.category(generation);
            other.flags.direct_damage(dealt, category);
            if move_type == Type::Fire && other.active().status == Status::Freeze {
                other.active_mut().status = Status::Clear;
            }
            if move_name.makes_contact() && dealt > 0 {
                contact(user, other, environment);
            }
        }
        if dealt > 0 {
            recoil(move_name, user, dealt);
            drain(move_name, user, dealt);
            let item = user.active().item(generation, environment.magic_room());
            if item == Item::LifeOrb {
                indirect_damage(user, 1, 10);
            }
        }
    }

    if !(hits_other(side_effect) && other.active().is_fainted()) {
        apply_side_effect(side_effect, user, other, environment);
    }
    apply_move_effects(move_name, user, other, environment, dealt);

    if move_name.is_switching() && !user.active().is_fainted() && user.bench().next().is_some() {
        let last = &mut user.flags.last_used_move;
        last.switch_decision_required = true;
        last.baton_passing = move_name == MoveName::BatonPass;
    }
    let knocked_out = other.active().is_fainted();
    if move_name.requires_recharge() && !(generation == Generation::One && knocked_out) {
        user.flags.lock_in = LockIn::Recharging;
    }
    if move_name.is_partial_trap() && dealt > 0 && !knocked_out && !other.flags.partial_trap.is_active() {
        other.flags.partial_trap.activate(ActiveFlags::PARTIAL_TRAP_TURNS);
    }
}

/// Resolve `user`'s action. `clear_status` says whether a sleeping or
/// frozen user wakes up or thaws before acting; `actual_damage` carries
/// the damage the server reported, if known.
#[allow(clippy::too_many_arguments)]
pub fn call_move(
    user: &mut Team,
    used_move: UsedMove,
    other: &mut Team,
    other_action: OtherAction,
    environment: &mut Environment,
    clear_status: bool,
    actual_damage: ActualDamage,
    is_fully_paralyzed: bool,
) {
    let selected = match used_move.executed {
        Action::Pass => return,
        Action::Switch(switch) => {
            switch_pokemon(user, other, environment, switch.index());
            return;
        }
        Action::Move(_) | Action::HitSelf => match used_move.selected {
            Selection::Move(name) => name,
            Selection::Switch(_) | Selection::Pass => unreachable!("a move runs only when one was selected"),
        },
    };
    assert!(!user.active().is_fainted(), "a fainted Pokemon cannot use {selected}");

    let was_asleep = user.active().status.is_sleeping();
    let ability = user.active().ability;
    user.active_mut().status.advance_from_move(ability, clear_status);
    if !can_attempt_move_execution(user, selected, other, was_asleep) {
        return;
    }

    let recharging = user.flags.is_recharging();
    if recharging {
        user.flags.lock_in = LockIn::None;
    }
    if !can_execute_move(user, used_move.executed, environment, recharging, is_fully_paralyzed) {
        if user.flags.flinched && user.active().ability == Ability::Steadfast {
            apply_boost(user, Stat::Spe, 1, false);
        }
        if !recharging {
            user.flags.last_used_move.record(selected, false);
        }
        return;
    }

    let still_confused = user.flags.advance_confusion(false);
    let move_name = match used_move.executed {
        Action::HitSelf if still_confused => {
            let damage = confusion_damage(user, environment);
            hp::damage(user, damage);
            user.flags.last_used_move.moved_this_turn = true;
            return;
        }
        Action::Move(name) => name,
        _ => selected,
    };

    let continuing = user.flags.is_locked_in_by_move();
    if !continuing {
        let pressure = other.active().ability == Ability::Pressure;
        if let Some(move_) = user.active_mut().moves.find_mut(selected) {
            move_.reduce_pp(if pressure { 2 } else { 1 });
        }
    }

    let mut actual_damage = actual_damage;
    let weather = weather(user, other, environment);
    if !start_lock_in(move_name, user, weather, &mut actual_damage) {
        user.flags.last_used_move.record(selected, true);
        return;
    }

    if move_name.is_self_destruct() && other.active().ability != Ability::Damp {
        user.active_mut().faint();
    }
    if used_move.miss {
        user.flags.last_used_move.record(selected, false);
        if matches!(move_name, MoveName::HighJumpKick | MoveName::JumpKick) {
            crash_damage(user);
        }
        return;
    }
    if fails(move_name, user, other, other_action) {
        user.flags.last_used_move.record(selected, false);
        return;
    }
    user.flags.last_used_move.record(selected, true);

    if move_name.data().target == MoveTarget::Opponent {
        let generation = user.generation();
        let move_type = user.active().move_type(generation, move_name);
        let target = other.active();
        let target_types = target.active_types(generation, other.flags.roosting);
        if ability_blocks_move(generation, target.ability, move_name, move_type, target.status, &target_types) {
            absorb(move_type, other);
            return;
        }
    }

    use_move(
        move_name,
        user,
        other,
        environment,
        used_move.critical_hit,
        used_move.side_effect,
        actual_damage,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Species;
    use crate::selection::Switch;
    use crate::testing::{pokemon, single, team};

    fn attack(user: &mut Team, move_name: MoveName, other: &mut Team, environment: &mut Environment) {
        call_move(
            user,
            UsedMove::plain(Selection::Move(move_name)),
            other,
            OtherAction::Moved,
            environment,
            false,
            ActualDamage::Unknown,
            false,
        );
    }

    #[test]
    fn test_known_damage_and_pp() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Snorlax, &[MoveName::BodySlam]);
        let mut other = single(generation, false, Species::Blissey, &[]);
        let mut environment = Environment::new();
        let pp = user.active().moves.find(MoveName::BodySlam).map(|move_| move_.pp());
        call_move(
            &mut user,
            UsedMove::plain(Selection::Move(MoveName::BodySlam)),
            &mut other,
            OtherAction::Moved,
            &mut environment,
            false,
            ActualDamage::Known(100),
            false,
        );
        let hp = other.active().hp;
        assert_eq!(hp.max() - hp.current(), 100);
        let after = user.active().moves.find(MoveName::BodySlam).map(|move_| move_.pp());
        assert_eq!(after, pp.map(|pp| pp - 1));
        assert_eq!(user.flags.last_used_move.move_name, Some(MoveName::BodySlam));
    }

    #[test]
    fn test_pressure_costs_two_pp() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Snorlax, &[MoveName::Return]);
        let mut other = team(
            generation,
            false,
            vec![pokemon(generation, Species::Skarmory, Ability::Pressure, Item::None, &[])],
        );
        let mut environment = Environment::new();
        let pp = user.active().moves.find(MoveName::Return).map(|move_| move_.pp());
        attack(&mut user, MoveName::Return, &mut other, &mut environment);
        let after = user.active().moves.find(MoveName::Return).map(|move_| move_.pp());
        assert_eq!(after, pp.map(|pp| pp - 2));
    }

    #[test]
    fn test_protect_blocks() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Snorlax, &[MoveName::Return]);
        let mut other = single(generation, false, Species::Blissey, &[MoveName::Protect]);
        let mut environment = Environment::new();
        attack(&mut other, MoveName::Protect, &mut user, &mut environment);
        assert!(other.flags.protecting);
        attack(&mut user, MoveName::Return, &mut other, &mut environment);
        assert!(other.active().hp.is_full());
        assert_eq!(user.flags.last_used_move.consecutive_successes, 0);
    }

    #[test]
    fn test_miss_crashes() {
        let generation = Generation::Five;
        let mut user = single(generation, true, Species::Infernape, &[MoveName::HighJumpKick]);
        let mut other = single(generation, false, Species::Blissey, &[]);
        let mut environment = Environment::new();
        let mut used_move = UsedMove::plain(Selection::Move(MoveName::HighJumpKick));
        used_move.miss = true;
        call_move(
            &mut user,
            used_move,
            &mut other,
            OtherAction::Moved,
            &mut environment,
            false,
            ActualDamage::Unknown,
            false,
        );
        assert!(other.active().hp.is_full());
        let hp = user.active().hp;
        assert_eq!(hp.max() - hp.current(), hp.max() / 2);
    }

    #[test]
    fn test_sucker_punch_needs_an_attack() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Tyranitar, &[MoveName::SuckerPunch]);
        let mut other = single(generation, false, Species::Gengar, &[]);
        let mut environment = Environment::new();
        call_move(
            &mut user,
            UsedMove::plain(Selection::Move(MoveName::SuckerPunch)),
            &mut other,
            OtherAction::Pending(Action::Move(MoveName::SwordsDance)),
            &mut environment,
            false,
            ActualDamage::Unknown,
            false,
        );
        assert!(other.active().hp.is_full());
        call_move(
            &mut user,
            UsedMove::plain(Selection::Move(MoveName::SuckerPunch)),
            &mut other,
            OtherAction::Pending(Action::Move(MoveName::ShadowBall)),
            &mut environment,
            false,
            ActualDamage::Unknown,
            false,
        );
        assert!(!other.active().hp.is_full());
    }

    #[test]
    fn test_substitute_absorbs() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Snorlax, &[MoveName::Return]);
        let mut other = single(generation, false, Species::Gengar, &[MoveName::Substitute]);
        let mut environment = Environment::new();
        attack(&mut other, MoveName::Substitute, &mut user, &mut environment);
        let after_substitute = other.active().hp.current();
        call_move(
            &mut user,
            UsedMove::plain(Selection::Move(MoveName::Return)),
            &mut other,
            OtherAction::Moved,
            &mut environment,
            false,
            ActualDamage::Known(10),
            false,
        );
        assert_eq!(other.active().hp.current(), after_substitute);
        assert!(other.flags.has_substitute());
    }

    #[test]
    fn test_focus_sash() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Garchomp, &[MoveName::Earthquake]);
        let mut other = team(
            generation,
            false,
            vec![pokemon(generation, Species::Infernape, Ability::Blaze, Item::FocusSash, &[])],
        );
        let mut environment = Environment::new();
        call_move(
            &mut user,
            UsedMove::plain(Selection::Move(MoveName::Earthquake)),
            &mut other,
            OtherAction::Moved,
            &mut environment,
            false,
            ActualDamage::Known(1000),
            false,
        );
        assert_eq!(other.active().hp.current(), 1);
        assert_eq!(other.active().item(generation, false), Item::None);
    }

    #[test]
    fn test_volt_absorb_heals() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Jolteon, &[MoveName::Thunderbolt]);
        let mut other = team(
            generation,
            false,
            vec![pokemon(generation, Species::Jolteon, Ability::VoltAbsorb, Item::None, &[])],
        );
        let mut environment = Environment::new();
        hp::damage(&mut other, 100);
        let hurt = other.active().hp.current();
        attack(&mut user, MoveName::Thunderbolt, &mut other, &mut environment);
        assert!(other.active().hp.current() > hurt);
    }

    #[test]
    fn test_recoil_and_rock_head() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Snorlax, &[MoveName::DoubleEdge]);
        let mut other = single(generation, false, Species::Blissey, &[]);
        let mut environment = Environment::new();
        call_move(
            &mut user,
            UsedMove::plain(Selection::Move(MoveName::DoubleEdge)),
            &mut other,
            OtherAction::Moved,
            &mut environment,
            false,
            ActualDamage::Known(99),
            false,
        );
        let hp = user.active().hp;
        assert_eq!(hp.max() - hp.current(), 33);

        let mut head = team(
            generation,
            true,
            vec![pokemon(generation, Species::Golem, Ability::RockHead, Item::None, &[MoveName::DoubleEdge])],
        );
        call_move(
            &mut head,
            UsedMove::plain(Selection::Move(MoveName::DoubleEdge)),
            &mut other,
            OtherAction::Moved,
            &mut environment,
            false,
            ActualDamage::Known(99),
            false,
        );
        assert!(head.active().hp.is_full());
    }

    #[test]
    fn test_solar_beam_charges() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Venusaur, &[MoveName::SolarBeam]);
        let mut other = single(generation, false, Species::Blissey, &[]);
        let mut environment = Environment::new();
        attack(&mut user, MoveName::SolarBeam, &mut other, &mut environment);
        assert!(user.flags.is_charging_up());
        assert!(other.active().hp.is_full());
        attack(&mut user, MoveName::SolarBeam, &mut other, &mut environment);
        assert!(!user.flags.is_charging_up());
        assert!(!other.active().hp.is_full());
    }

    #[test]
    fn test_u_turn_requires_switch() {
        let generation = Generation::Four;
        let mut user = team(
            generation,
            true,
            vec![
                pokemon(generation, Species::Scizor, Ability::Technician, Item::None, &[MoveName::UTurn]),
                pokemon(generation, Species::Blissey, Ability::NaturalCure, Item::None, &[]),
            ],
        );
        let mut other = single(generation, false, Species::Snorlax, &[]);
        let mut environment = Environment::new();
        attack(&mut user, MoveName::UTurn, &mut other, &mut environment);
        assert!(user.flags.last_used_move.switch_decision_required);
        call_move(
            &mut user,
            UsedMove::plain(Selection::Switch(Switch::new(1, 2).unwrap())),
            &mut other,
            OtherAction::Moved,
            &mut environment,
            false,
            ActualDamage::Unknown,
            false,
        );
        assert_eq!(user.active().species, Species::Blissey);
        assert!(!user.flags.last_used_move.switch_decision_required);
    }

    #[test]
    fn test_explosion_faints_user() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Gengar, &[MoveName::Explosion]);
        let mut other = single(generation, false, Species::Snorlax, &[]);
        let mut environment = Environment::new();
        attack(&mut user, MoveName::Explosion, &mut other, &mut environment);
        assert!(user.active().is_fainted());
    }

    #[test]
    fn test_hyper_beam_recharge() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Snorlax, &[MoveName::HyperBeam]);
        let mut other = single(generation, false, Species::Blissey, &[]);
        let mut environment = Environment::new();
        attack(&mut user, MoveName::HyperBeam, &mut other, &mut environment);
        assert!(user.flags.is_recharging());
        let hp = other.active().hp.current();
        attack(&mut user, MoveName::HyperBeam, &mut other, &mut environment);
        assert!(!user.flags.is_recharging());
        assert_eq!(other.active().hp.current(), hp);
    }

    #[test]
    fn test_confusion_hit() {
        let generation = Generation::Four;
        let mut user = single(generation, true, Species::Snorlax, &[MoveName::Return]);
        let mut other = single(generation, false, Species::Blissey, &[]);
        let mut environment = Environment::new();
        user.flags.confuse();
        let used_move = UsedMove {
            executed: Action::HitSelf,
            ..UsedMove::plain(Selection::Move(MoveName::Return))
        };
        call_move(
            &mut user,
            used_move,
            &mut other,
            OtherAction::Moved,
            &mut environment,
            false,
            ActualDamage::Unknown,
            false,
        );
        assert!(!user.active().hp.is_full());
        assert!(other.active().hp.is_full());
    }
}
