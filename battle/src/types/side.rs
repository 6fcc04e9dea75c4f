//! One player's side of the battle

use crate::error::BattleError;
use crate::generation::Generation;
use crate::types::active::ActiveFlags;
use crate::types::conditions::{EntryHazards, Screens, Wish};
use crate::types::pokemon::AnyPokemon;

/// A team of up to six Pokemon plus everything bound to its side of the
/// field. `P` decides how much is known about each member.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericTeam<P> {
    pokemon: Vec<P>,
    active: usize,
    /// Team size as announced; members not yet revealed are counted here
    /// but absent from `pokemon`
    size: usize,
    is_me: bool,
    generation: Generation,
    pub flags: ActiveFlags,
    pub screens: Screens,
    pub wish: Wish,
    pub hazards: EntryHazards,
}

impl<P: AnyPokemon> GenericTeam<P> {
    pub const MAX_SIZE: usize = 6;

    pub fn new(generation: Generation, is_me: bool) -> Self {
        Self {
            pokemon: Vec::new(),
            active: 0,
            size: 0,
            is_me,
            generation,
            flags: ActiveFlags::new(),
            screens: Screens::default(),
            wish: Wish::default(),
            hazards: EntryHazards::new(generation),
        }
    }

    /// Record the announced team size (foe teams start mostly unrevealed)
    pub fn set_size(&mut self, size: usize) -> Result<(), BattleError> {
        if size > Self::MAX_SIZE {
            return Err(BattleError::TeamFull {
                max: Self::MAX_SIZE,
            });
        }
        self.size = size;
        Ok(())
    }

    /// Add a member, returning its index
    pub fn add(&mut self, pokemon: P) -> Result<usize, BattleError> {
        if self.pokemon.len() >= Self::MAX_SIZE {
            return Err(BattleError::TeamFull {
                max: Self::MAX_SIZE,
            });
        }
        self.pokemon.push(pokemon);
        Ok(self.pokemon.len() - 1)
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_me(&self) -> bool {
        self.is_me
    }

    /// Number of members, seen or not
    pub fn size(&self) -> usize {
        self.size.max(self.pokemon.len())
    }

    /// Stop counting members that have not been revealed
    pub fn forget_hidden(&mut self) {
        self.size = self.pokemon.len();
    }

    /// Members the opponent has not revealed yet
    pub fn hidden(&self) -> usize {
        self.size() - self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active Pokemon. Teams in play always have one.
    pub fn active(&self) -> &P {
        &self.pokemon[self.active]
    }

    pub fn active_mut(&mut self) -> &mut P {
        &mut self.pokemon[self.active]
    }

    pub fn get(&self, index: usize) -> Option<&P> {
        self.pokemon.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut P> {
        self.pokemon.get_mut(index)
    }

    pub fn members(&self) -> &[P] {
        &self.pokemon
    }

    pub fn members_mut(&mut self) -> impl Iterator<Item = &mut P> {
        self.pokemon.iter_mut()
    }

    pub fn position(&self, predicate: impl Fn(&P) -> bool) -> Option<usize> {
        self.pokemon.iter().position(predicate)
    }

    /// Living members other than the active one
    pub fn bench(&self) -> impl Iterator<Item = (usize, &P)> {
        let active = self.active;
        self.pokemon
            .iter()
            .enumerate()
            .filter(move |(index, pokemon)| *index != active && !pokemon.is_fainted())
    }

    /// Living members, counting unrevealed ones as alive
    pub fn alive(&self) -> usize {
        self.pokemon.iter().filter(|pokemon| !pokemon.is_fainted()).count() + self.hidden()
    }

    /// No member left to fight
    pub fn is_defeated(&self) -> bool {
        !self.pokemon.is_empty() && self.alive() == 0
    }

    /// Set the first member to lead without any switch effects
    pub fn set_lead(&mut self, index: usize) {
        assert!(index < self.pokemon.len(), "lead {index} out of range");
        self.active = index;
        self.flags = ActiveFlags::switched_in();
        self.pokemon[index].switch_in();
    }

    /// Bring in `index`. A fainted active Pokemon leaves the team for good,
    /// which shifts later indices down by one. Returns the new active
    /// index.
    pub fn switch_to(&mut self, index: usize, baton_pass: bool) -> usize {
        assert_ne!(index, self.active, "cannot switch to the active Pokemon");
        assert!(index < self.pokemon.len(), "switch {index} out of range");
        let flags = if baton_pass {
            self.flags.baton_pass()
        } else {
            ActiveFlags::switched_in()
        };
        let generation = self.generation;
        let outgoing = self.active;
        self.pokemon[outgoing].switch_out(generation);
        let mut incoming = index;
        if self.pokemon[outgoing].is_fainted() {
            self.pokemon.remove(outgoing);
            if self.size > 0 {
                self.size -= 1;
            }
            if incoming > outgoing {
                incoming -= 1;
            }
        }
        self.active = incoming;
        self.flags = flags;
        self.pokemon[incoming].switch_in();
        incoming
    }

    /// Turn-scoped cleanup at the end of every turn
    pub fn reset_end_of_turn(&mut self) {
        self.flags.reset_end_of_turn();
    }

    /// Drop every member but the active one
    pub fn isolate_active(&mut self) {
        let active = self.pokemon.swap_remove(self.active);
        self.pokemon = vec![active];
        self.active = 0;
        self.size = 1;
    }

    /// Same side state with every member converted
    pub fn map_members<Q: AnyPokemon>(&self, convert: impl Fn(&P) -> Q) -> GenericTeam<Q> {
        GenericTeam {
            pokemon: self.pokemon.iter().map(convert).collect(),
            active: self.active,
            size: self.size,
            is_me: self.is_me,
            generation: self.generation,
            flags: self.flags,
            screens: self.screens,
            wish: self.wish,
            hazards: self.hazards,
        }
    }
}

/// Read access shared by every team variant, used by evaluation and the
/// win check
pub trait AnyTeam {
    type Member: AnyPokemon;

    fn generation(&self) -> Generation;
    fn is_me(&self) -> bool;
    fn members(&self) -> &[Self::Member];
    fn active_index(&self) -> usize;
    fn size(&self) -> usize;
    fn hazards(&self) -> &EntryHazards;
    fn flags(&self) -> &ActiveFlags;

    fn hidden(&self) -> usize {
        self.size() - self.members().len()
    }
}

impl<P: AnyPokemon> AnyTeam for GenericTeam<P> {
    type Member = P;

    fn generation(&self) -> Generation {
        self.generation
    }

    fn is_me(&self) -> bool {
        self.is_me
    }

    fn members(&self) -> &[P] {
        &self.pokemon
    }

    fn active_index(&self) -> usize {
        self.active
    }

    fn size(&self) -> usize {
        GenericTeam::size(self)
    }

    fn hazards(&self) -> &EntryHazards {
        &self.hazards
    }

    fn flags(&self) -> &ActiveFlags {
        &self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Ability, Item, Nature, Species};
    use crate::stat::Spread;
    use crate::types::pokemon::{Gender, Pokemon};
    use tactician_protocol::Stat;

    fn member(species: Species) -> Pokemon {
        let generation = Generation::Four;
        Pokemon::new(
            generation,
            species,
            100,
            Gender::Genderless,
            Nature::Hardy,
            &Spread::neutral(generation),
            Ability::None,
            Item::None,
        )
    }

    fn create_test_team() -> GenericTeam<Pokemon> {
        let mut team = GenericTeam::new(Generation::Four, true);
        team.add(member(Species::Jolteon)).unwrap();
        team.add(member(Species::Snorlax)).unwrap();
        team.add(member(Species::Swampert)).unwrap();
        team.set_lead(0);
        team
    }

    #[test]
    fn test_team_full() {
        let mut team = create_test_team();
        for _ in 0..3 {
            team.add(member(Species::Mew)).unwrap();
        }
        assert!(team.add(member(Species::Mew)).is_err());
        assert!(team.set_size(7).is_err());
    }

    #[test]
    fn test_switch_resets_flags() {
        let mut team = create_test_team();
        team.flags.stages.boost(Stat::Atk, 2);
        team.flags.leech_seeded = true;
        assert_eq!(team.switch_to(1, false), 1);
        assert!(team.flags.stages.is_clear());
        assert!(!team.flags.leech_seeded);
        assert!(team.active().has_been_seen);
    }

    #[test]
    fn test_baton_pass_keeps_boosts() {
        let mut team = create_test_team();
        team.flags.stages.boost(Stat::Spe, 1);
        team.switch_to(2, true);
        assert_eq!(team.flags.stages.get(Stat::Spe), 1);
    }

    #[test]
    fn test_fainted_member_is_removed_on_replacement() {
        let mut team = create_test_team();
        team.active_mut().faint();
        assert_eq!(team.switch_to(2, false), 1);
        assert_eq!(team.members().len(), 2);
        assert_eq!(team.active().species, Species::Swampert);
    }

    #[test]
    fn test_hidden_members() {
        let mut team: GenericTeam<Pokemon> = GenericTeam::new(Generation::Four, false);
        team.set_size(6).unwrap();
        team.add(member(Species::Gyarados)).unwrap();
        assert_eq!(team.size(), 6);
        assert_eq!(team.hidden(), 5);
        assert_eq!(team.alive(), 6);
        assert!(!team.is_defeated());
        team.forget_hidden();
        assert_eq!(team.size(), 1);
        assert_eq!(team.hidden(), 0);
    }

    #[test]
    fn test_defeated() {
        let mut team: GenericTeam<Pokemon> = GenericTeam::new(Generation::Four, true);
        team.add(member(Species::Mew)).unwrap();
        team.set_lead(0);
        assert!(!team.is_defeated());
        team.active_mut().faint();
        assert!(team.is_defeated());
    }

    #[test]
    fn test_isolate_active() {
        let mut team = create_test_team();
        team.switch_to(1, false);
        team.isolate_active();
        assert_eq!(team.size(), 1);
        assert_eq!(team.active_index(), 0);
        assert_eq!(team.active().species, Species::Snorlax);
    }
}
