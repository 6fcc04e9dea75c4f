//! The foe's team as far as it has been revealed

use crate::data::{Ability, Item, MoveName, Nature, Species};
use crate::error::BattleError;
use crate::generation::Generation;
use crate::stat::Spread;
use crate::types::{AnyPokemon, Gender, GenericTeam, HeldItem, Hp, Pokemon, RegularMoves, Status, Team};

/// A foe Pokemon. HP is only known as a percentage, and moves, item and
/// ability only once the battle shows them.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenPokemon {
    pub species: Species,
    pub nickname: String,
    pub level: u8,
    pub gender: Gender,
    /// Out of `SeenPokemon::HP_RESOLUTION`
    pub hp: Hp,
    pub status: Status,
    pub moves: RegularMoves,
    /// `None` until revealed
    pub item: Option<HeldItem>,
    /// `None` until revealed
    pub ability: Option<Ability>,
    has_been_seen: bool,
}

impl SeenPokemon {
    pub const HP_RESOLUTION: u16 = 100;

    pub fn new(species: Species, nickname: impl Into<String>, level: u8, gender: Gender) -> Self {
        Self {
            species,
            nickname: nickname.into(),
            level,
            gender,
            hp: Hp::new(Self::HP_RESOLUTION),
            status: Status::Clear,
            moves: RegularMoves::new(),
            item: None,
            ability: None,
            has_been_seen: false,
        }
    }

    /// Record a move the foe used
    pub fn reveal_move(&mut self, name: MoveName) -> Result<(), BattleError> {
        self.moves.reveal(name)
    }

    pub fn reveal_item(&mut self, item: Item) {
        self.item = Some(HeldItem::new(item));
    }

    pub fn reveal_ability(&mut self, ability: Ability) {
        self.ability = Some(ability);
    }

    /// Set HP from a reported `current/max` pair, scaled to a percentage
    pub fn set_hp(&mut self, current: u16, max: u16) {
        let scaled = if max == 0 {
            0
        } else {
            let percent = u32::from(current) * u32::from(Self::HP_RESOLUTION) / u32::from(max);
            // A sliver of HP never rounds down to fainted
            if percent == 0 && current > 0 { 1 } else { percent as u16 }
        };
        self.hp.set_current(scaled);
    }

    /// Engine view with a neutral spread and everything unrevealed left out
    pub fn to_pokemon(&self, generation: Generation) -> Pokemon {
        let spread = Spread::neutral(generation);
        let held = self.item.unwrap_or_default();
        let mut pokemon = Pokemon::new(
            generation,
            self.species,
            self.level,
            self.gender,
            Nature::Hardy,
            &spread,
            self.ability.unwrap_or(Ability::None),
            Item::None,
        );
        pokemon.item = held;
        let max = u32::from(pokemon.hp.max());
        let current = (max * u32::from(self.hp.current())).div_ceil(u32::from(Self::HP_RESOLUTION));
        pokemon.hp.set_current(u16::try_from(current).unwrap_or(u16::MAX));
        pokemon.status = self.status;
        pokemon.moves = self.moves.clone();
        pokemon.has_been_seen = self.has_been_seen;
        pokemon
    }
}

impl AnyPokemon for SeenPokemon {
    fn species(&self) -> Species {
        self.species
    }

    fn level(&self) -> u8 {
        self.level
    }

    fn hp_ratio(&self) -> f64 {
        self.hp.ratio()
    }

    fn status(&self) -> Status {
        self.status
    }

    fn has_been_seen(&self) -> bool {
        self.has_been_seen
    }

    fn switch_in(&mut self) {
        self.has_been_seen = true;
    }

    fn switch_out(&mut self, generation: Generation) {
        if let Status::Toxic { .. } = self.status {
            self.status = if generation <= Generation::Two {
                Status::Poison
            } else {
                Status::Toxic { counter: 0 }
            };
        }
        if self.ability == Some(Ability::NaturalCure) {
            self.status = Status::Clear;
        }
    }

    fn is_fainted(&self) -> bool {
        self.hp.current() == 0
    }
}

/// The foe's team
pub type SeenTeam = GenericTeam<SeenPokemon>;

impl From<&SeenTeam> for Team {
    fn from(team: &SeenTeam) -> Self {
        let generation = team.generation();
        team.map_members(|member| member.to_pokemon(generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnyTeam;

    #[test]
    fn test_percent_hp() {
        let mut pokemon = SeenPokemon::new(Species::Tyranitar, "Tyranitar", 100, Gender::Male);
        pokemon.set_hp(1, 404);
        assert_eq!(pokemon.hp.current(), 1);
        pokemon.set_hp(202, 404);
        assert_eq!(pokemon.hp.current(), 50);
        pokemon.set_hp(0, 404);
        assert!(pokemon.is_fainted());
    }

    #[test]
    fn test_engine_view_uses_revealed_information() {
        let mut pokemon = SeenPokemon::new(Species::Tyranitar, "Tyranitar", 100, Gender::Male);
        pokemon.reveal_move(MoveName::Crunch).unwrap();
        pokemon.reveal_item(Item::Leftovers);
        pokemon.hp.set_current(50);

        let engine = pokemon.to_pokemon(Generation::Four);
        assert_eq!(engine.moves.len(), 1);
        assert_eq!(engine.item(Generation::Four, false), Item::Leftovers);
        assert_eq!(engine.ability, Ability::None);
        assert_eq!(engine.hp.current(), engine.hp.max().div_ceil(2));
    }

    #[test]
    fn test_hidden_members_survive_conversion() {
        let mut team = SeenTeam::new(Generation::Four, false);
        team.set_size(6).unwrap();
        team.add(SeenPokemon::new(Species::Gengar, "Gengar", 100, Gender::Male))
            .unwrap();
        team.set_lead(0);

        let engine = Team::from(&team);
        assert_eq!(engine.hidden(), 5);
        assert!(!engine.is_me());
        assert!(engine.active().has_been_seen);
    }
}
