//! HP changes that go through the battle rules rather than straight to
//! `Hp`

use crate::types::Team;

/// Direct damage to the active Pokemon. Reaching 0 HP faints it.
pub fn damage(team: &mut Team, amount: u16) -> u16 {
    let pokemon = team.active_mut();
    let dealt = pokemon.hp.damage(amount);
    if pokemon.hp.current() == 0 {
        pokemon.faint();
    }
    dealt
}

/// Damage as a fraction of max HP from weather, status, hazards and
/// items. Magic Guard ignores all of it.
pub fn indirect_damage(team: &mut Team, numerator: i32, denominator: i32) {
    if team.active().ability.blocks_indirect_damage() || team.active().hp.current() == 0 {
        return;
    }
    let pokemon = team.active_mut();
    pokemon.hp.change_by_fraction(-numerator, denominator);
    if pokemon.hp.current() == 0 {
        pokemon.faint();
    }
}

/// Heal a fraction of max HP. Heal Block stops it and fainted Pokemon
/// stay fainted.
pub fn heal(team: &mut Team, numerator: i32, denominator: i32) {
    if team.flags.heal_block.is_active() || team.active().hp.current() == 0 {
        return;
    }
    team.active_mut().hp.change_by_fraction(numerator, denominator);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Ability, Item, Species};
    use crate::generation::Generation;
    use crate::testing::{pokemon, single, team};
    use crate::types::Status;

    #[test]
    fn test_fainting_clears_status() {
        let mut team = single(Generation::Four, true, Species::Snorlax, &[]);
        team.active_mut().status = Status::Burn;
        let max = team.active().hp.max();
        assert_eq!(damage(&mut team, max + 10), max);
        assert_eq!(team.active().status, Status::Clear);
    }

    #[test]
    fn test_magic_guard_ignores_indirect_damage() {
        let generation = Generation::Four;
        let mut team = team(
            generation,
            true,
            vec![pokemon(generation, Species::Clefable, Ability::MagicGuard, Item::LifeOrb, &[])],
        );
        indirect_damage(&mut team, 1, 8);
        assert!(team.active().hp.is_full());
    }

    #[test]
    fn test_heal_block() {
        let mut team = single(Generation::Four, true, Species::Snorlax, &[]);
        indirect_damage(&mut team, 1, 2);
        let hurt = team.active().hp.current();
        team.flags.heal_block.activate(5);
        heal(&mut team, 1, 4);
        assert_eq!(team.active().hp.current(), hurt);
        team.flags.heal_block.deactivate();
        heal(&mut team, 1, 4);
        assert!(team.active().hp.current() > hurt);
    }
}
