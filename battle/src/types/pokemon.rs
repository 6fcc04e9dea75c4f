//! Pokemon state used by the engine

use crate::compress::{Compress, compress_combine, part};
use crate::data::{Ability, Item, MoveName, Nature, Species};
use crate::error::BattleError;
use crate::generation::Generation;
use crate::stat::{HiddenPower, Spread, Stats};
use crate::types::pokemon_type::Type;
use crate::types::status::Status;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gender {
    Male,
    Female,
    #[default]
    Genderless,
}

impl Gender {
    /// Parse from protocol details ('M', 'F', or absent)
    pub fn from_protocol(gender: Option<char>) -> Self {
        match gender {
            Some('M') => Gender::Male,
            Some('F') => Gender::Female,
            _ => Gender::Genderless,
        }
    }
}

/// Current and maximum HP. `current` never exceeds `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hp {
    current: u16,
    max: u16,
}

impl Hp {
    pub fn new(max: u16) -> Self {
        Self { current: max, max }
    }

    pub fn current(self) -> u16 {
        self.current
    }

    pub fn max(self) -> u16 {
        self.max
    }

    /// Set current HP, clamped to `[0, max]`
    pub fn set_current(&mut self, value: u16) {
        self.current = value.min(self.max);
    }

    /// Returns the HP actually removed
    pub fn damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.current);
        self.current -= dealt;
        dealt
    }

    /// Returns the HP actually restored
    pub fn heal(&mut self, amount: u16) -> u16 {
        let healed = amount.min(self.max - self.current);
        self.current += healed;
        healed
    }

    pub fn is_full(self) -> bool {
        self.current == self.max
    }

    pub fn ratio(self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            f64::from(self.current) / f64::from(self.max)
        }
    }

    /// Apply a signed fraction of max HP (negative damages). At least 1 HP
    /// changes hands for any nonzero fraction.
    pub fn change_by_fraction(&mut self, numerator: i32, denominator: i32) -> i32 {
        let raw = i32::from(self.max) * numerator / denominator;
        let amount = if raw == 0 && numerator != 0 {
            numerator.signum()
        } else {
            raw
        };
        if amount >= 0 {
            i32::from(self.heal(u16::try_from(amount).unwrap_or(u16::MAX)))
        } else {
            -i32::from(self.damage(u16::try_from(-amount).unwrap_or(u16::MAX)))
        }
    }
}

impl Compress for Hp {
    /// HP is compressed as a percentage bucket
    const CARDINALITY: u128 = 101;

    fn compress(&self) -> u128 {
        (self.ratio() * 100.0).round() as u128
    }
}

/// Whether a held item can come back with Recycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ItemState {
    #[default]
    Active,
    /// Consumed (berries, gems); Recycle restores it
    Removed,
    /// Knocked off or stolen; gone for good
    Destroyed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HeldItem {
    item: Item,
    state: ItemState,
}

impl HeldItem {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            state: ItemState::Active,
        }
    }

    /// The item in effect. Nothing before gen 2 or while Magic Room is up.
    pub fn get(self, generation: Generation, magic_room: bool) -> Item {
        if !generation.has_held_items() || magic_room || self.state != ItemState::Active {
            Item::None
        } else {
            self.item
        }
    }

    /// The item regardless of field effects, if still held
    pub fn held(self) -> Option<Item> {
        (self.state == ItemState::Active && self.item != Item::None).then_some(self.item)
    }

    pub fn state(self) -> ItemState {
        self.state
    }

    /// Consume the item. Returns it if one was held.
    pub fn remove(&mut self) -> Option<Item> {
        let item = self.held()?;
        self.state = ItemState::Removed;
        Some(item)
    }

    /// Knock Off, Trick and friends
    pub fn destroy(&mut self) -> Option<Item> {
        let item = self.held()?;
        self.state = ItemState::Destroyed;
        Some(item)
    }

    pub fn recycle(&mut self) -> bool {
        if self.state != ItemState::Removed {
            return false;
        }
        self.state = ItemState::Active;
        true
    }

    /// Replace the item outright (Trick)
    pub fn set(&mut self, item: Item) {
        *self = Self::new(item);
    }

    /// True once a held item is gone (Unburden)
    pub fn was_lost(self) -> bool {
        self.item != Item::None && self.state != ItemState::Active
    }
}

/// A regular move and its PP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub name: MoveName,
    current_pp: u8,
    max_pp: u8,
}

impl Move {
    pub const MAX_PP_UPS: u8 = 3;

    /// Each PP Up adds a fifth of the base PP
    pub fn new(name: MoveName, pp_ups: u8) -> Self {
        let base = u16::from(name.base_pp());
        let max = base * (5 + u16::from(pp_ups.min(Self::MAX_PP_UPS))) / 5;
        let max_pp = u8::try_from(max).unwrap_or(u8::MAX);
        Self {
            name,
            current_pp: max_pp,
            max_pp,
        }
    }

    pub fn pp(&self) -> u8 {
        self.current_pp
    }

    pub fn max_pp(&self) -> u8 {
        self.max_pp
    }

    pub fn has_pp(&self) -> bool {
        self.current_pp > 0
    }

    pub fn reduce_pp(&mut self, amount: u8) {
        self.current_pp = self.current_pp.saturating_sub(amount);
    }

    pub fn set_pp(&mut self, pp: u8) {
        self.current_pp = pp.min(self.max_pp);
    }
}

/// Up to four regular moves
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RegularMoves(Vec<Move>);

impl RegularMoves {
    pub const MAX: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, move_: Move) -> Result<(), BattleError> {
        if self.0.len() >= Self::MAX {
            return Err(BattleError::TooManyMoves {
                pokemon: move_.name.to_string(),
                max: Self::MAX,
            });
        }
        self.0.push(move_);
        Ok(())
    }

    /// Add a move revealed in battle if not already known
    pub fn reveal(&mut self, name: MoveName) -> Result<(), BattleError> {
        if !name.is_regular() || self.find(name).is_some() {
            return Ok(());
        }
        self.add(Move::new(name, Move::MAX_PP_UPS))
    }

    pub fn find(&self, name: MoveName) -> Option<&Move> {
        self.0.iter().find(|move_| move_.name == name)
    }

    pub fn find_mut(&mut self, name: MoveName) -> Option<&mut Move> {
        self.0.iter_mut().find(|move_| move_.name == name)
    }

    /// 0-based slot of a move
    pub fn index_of(&self, name: MoveName) -> Option<usize> {
        self.0.iter().position(|move_| move_.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = MoveName> + '_ {
        self.0.iter().map(|move_| move_.name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Interface shared by the engine, known and seen Pokemon
pub trait AnyPokemon: Clone {
    fn species(&self) -> Species;
    fn level(&self) -> u8;
    fn hp_ratio(&self) -> f64;
    fn status(&self) -> Status;
    /// Whether the opponent knows this Pokemon is on the team
    fn has_been_seen(&self) -> bool;
    fn switch_in(&mut self);
    fn switch_out(&mut self, generation: Generation);

    fn is_fainted(&self) -> bool {
        self.hp_ratio() == 0.0
    }

    fn types(&self, generation: Generation) -> &'static [Type] {
        self.species().types(generation)
    }
}

/// A Pokemon as the engine simulates it: every value is concrete, even when
/// some of it was inferred
#[derive(Debug, Clone, PartialEq)]
pub struct Pokemon {
    pub species: Species,
    pub level: u8,
    pub gender: Gender,
    pub nature: Nature,
    pub stats: Stats,
    pub hidden_power: Option<HiddenPower>,
    pub ability: Ability,
    /// Ability at the start of the battle; Trace changes `ability`
    pub initial_ability: Ability,
    pub item: HeldItem,
    pub hp: Hp,
    pub status: Status,
    pub moves: RegularMoves,
    pub has_been_seen: bool,
}

impl Pokemon {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        generation: Generation,
        species: Species,
        level: u8,
        gender: Gender,
        nature: Nature,
        spread: &Spread,
        ability: Ability,
        item: Item,
    ) -> Self {
        let stats = Stats::calculate(generation, species, level, nature, spread);
        let ability = if generation.has_abilities() {
            ability
        } else {
            Ability::None
        };
        Self {
            species,
            level,
            gender,
            nature,
            stats,
            hidden_power: (generation >= Generation::Two)
                .then(|| HiddenPower::new(generation, &spread.ivs)),
            ability,
            initial_ability: ability,
            item: HeldItem::new(item),
            hp: Hp::new(stats.hp),
            status: Status::Clear,
            moves: RegularMoves::new(),
            has_been_seen: false,
        }
    }

    pub fn with_moves(mut self, moves: impl IntoIterator<Item = Move>) -> Result<Self, BattleError> {
        for move_ in moves {
            self.moves.add(move_)?;
        }
        Ok(self)
    }

    /// Types while active; Roost removes Flying for the turn
    pub fn active_types(&self, generation: Generation, roosting: bool) -> Vec<Type> {
        let types = self.species.types(generation);
        let filtered: Vec<Type> = types
            .iter()
            .copied()
            .filter(|t| !(roosting && *t == Type::Flying))
            .collect();
        if filtered.is_empty() {
            vec![Type::Typeless]
        } else {
            filtered
        }
    }

    pub fn is_type(&self, generation: Generation, t: Type) -> bool {
        self.species.types(generation).contains(&t)
    }

    /// Type of a move when this Pokemon uses it
    pub fn move_type(&self, generation: Generation, move_name: MoveName) -> Type {
        match (move_name, self.hidden_power) {
            (MoveName::HiddenPower, Some(hidden_power)) => hidden_power.move_type,
            _ => move_name.move_type(generation),
        }
    }

    pub fn item(&self, generation: Generation, magic_room: bool) -> Item {
        self.item.get(generation, magic_room)
    }

    /// Effects of leaving the field that persist on the Pokemon itself
    pub fn switch_out(&mut self, generation: Generation) {
        if let Status::Toxic { .. } = self.status {
            // The toxic counter restarts; gen 1-2 revert to regular poison
            self.status = if generation <= Generation::Two {
                Status::Poison
            } else {
                Status::Toxic { counter: 0 }
            };
        }
        match self.ability {
            Ability::NaturalCure => self.status = Status::Clear,
            Ability::Regenerator if generation >= Generation::Five && !self.hp.is_full() => {
                if self.hp.current() > 0 {
                    self.hp.change_by_fraction(1, 3);
                }
            }
            _ => {}
        }
        self.ability = self.initial_ability;
    }

    pub fn faint(&mut self) {
        self.hp.set_current(0);
        self.status = Status::Clear;
    }
}

impl AnyPokemon for Pokemon {
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
        Pokemon::switch_out(self, generation);
    }

    fn is_fainted(&self) -> bool {
        self.hp.current() == 0
    }
}

impl Pokemon {
    /// Compressed HP bucket, status, item presence and species
    pub fn compress(&self) -> u128 {
        compress_combine(&[
            part(&self.species),
            part(&self.hp),
            part(&self.status),
            part(&(self.item.held().is_some())),
        ])
    }

    pub fn cardinality() -> u128 {
        Species::CARDINALITY * Hp::CARDINALITY * Status::CARDINALITY * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chansey(generation: Generation) -> Pokemon {
        Pokemon::new(
            generation,
            Species::Chansey,
            100,
            Gender::Female,
            Nature::Bold,
            &Spread::neutral(generation),
            Ability::NaturalCure,
            Item::Leftovers,
        )
    }

    #[test]
    fn test_hp_is_clamped() {
        let mut hp = Hp::new(100);
        assert_eq!(hp.damage(30), 30);
        assert_eq!(hp.heal(50), 30);
        assert!(hp.is_full());
        assert_eq!(hp.damage(500), 100);
        assert_eq!(hp.current(), 0);
        hp.set_current(1000);
        assert_eq!(hp.current(), 100);
    }

    #[test]
    fn test_fraction_moves_at_least_one_hp() {
        let mut hp = Hp::new(10);
        assert_eq!(hp.change_by_fraction(-1, 16), -1);
        assert_eq!(hp.current(), 9);
        assert_eq!(hp.change_by_fraction(1, 2), 1);
    }

    #[test]
    fn test_recycle_restores_only_consumed_items() {
        let mut berry = HeldItem::new(Item::SitrusBerry);
        assert_eq!(berry.remove(), Some(Item::SitrusBerry));
        assert_eq!(berry.get(Generation::Four, false), Item::None);
        assert!(berry.was_lost());
        assert!(berry.recycle());
        assert_eq!(berry.get(Generation::Four, false), Item::SitrusBerry);

        let mut knocked = HeldItem::new(Item::Leftovers);
        assert_eq!(knocked.destroy(), Some(Item::Leftovers));
        assert!(!knocked.recycle());
    }

    #[test]
    fn test_magic_room_suppresses_items() {
        let item = HeldItem::new(Item::Leftovers);
        assert_eq!(item.get(Generation::Five, true), Item::None);
        assert_eq!(item.get(Generation::One, false), Item::None);
    }

    #[test]
    fn test_pp_ups() {
        let tackle = Move::new(MoveName::Tackle, 3);
        assert_eq!(tackle.max_pp(), 56);
        let mut hyper_beam = Move::new(MoveName::HyperBeam, 0);
        assert_eq!(hyper_beam.pp(), 5);
        hyper_beam.reduce_pp(10);
        assert!(!hyper_beam.has_pp());
    }

    #[test]
    fn test_at_most_four_moves() {
        let mut moves = RegularMoves::new();
        for name in [
            MoveName::Tackle,
            MoveName::Thunderbolt,
            MoveName::IceBeam,
            MoveName::Toxic,
        ] {
            moves.add(Move::new(name, 3)).unwrap();
        }
        assert!(moves.add(Move::new(MoveName::Surf, 3)).is_err());
        assert!(moves.reveal(MoveName::Tackle).is_ok());
        assert_eq!(moves.len(), 4);
        assert_eq!(moves.index_of(MoveName::IceBeam), Some(2));
    }

    #[test]
    fn test_natural_cure_on_switch_out() {
        let mut pokemon = chansey(Generation::Four);
        pokemon.status = Status::Toxic { counter: 3 };
        pokemon.switch_out(Generation::Four);
        assert_eq!(pokemon.status, Status::Clear);
    }

    #[test]
    fn test_toxic_counter_resets_on_switch_out() {
        let mut pokemon = chansey(Generation::Four);
        pokemon.ability = Ability::None;
        pokemon.initial_ability = Ability::None;
        pokemon.status = Status::Toxic { counter: 3 };
        pokemon.switch_out(Generation::Four);
        assert_eq!(pokemon.status, Status::Toxic { counter: 0 });
    }

    #[test]
    fn test_no_abilities_before_gen3() {
        let pokemon = chansey(Generation::Two);
        assert_eq!(pokemon.ability, Ability::None);
        assert!(pokemon.hidden_power.is_some());
    }
}
