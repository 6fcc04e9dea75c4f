//! The AI's own team, where every detail is known

use crate::data::{Ability, Item, Nature, Species};
use crate::error::BattleError;
use crate::generation::Generation;
use crate::stat::Spread;
use crate::types::{AnyPokemon, Gender, GenericTeam, Move, Pokemon, Status, Team};

/// A member of the AI's team, loaded from a team file
#[derive(Debug, Clone, PartialEq)]
pub struct KnownPokemon {
    pub nickname: Option<String>,
    pub spread: Spread,
    pokemon: Pokemon,
}

impl KnownPokemon {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        generation: Generation,
        species: Species,
        nickname: Option<String>,
        level: u8,
        gender: Gender,
        nature: Nature,
        spread: Spread,
        ability: Ability,
        item: Item,
        moves: Vec<Move>,
    ) -> Result<Self, BattleError> {
        if !species.exists_in(generation) {
            return Err(BattleError::NotAvailable(species.to_string(), generation));
        }
        for move_ in &moves {
            if !move_.name.exists_in(generation) {
                return Err(BattleError::NotAvailable(move_.name.to_string(), generation));
            }
        }
        let pokemon = Pokemon::new(generation, species, level, gender, nature, &spread, ability, item)
            .with_moves(moves)
            .map_err(|_| BattleError::TooManyMoves {
                pokemon: species.to_string(),
                max: crate::types::RegularMoves::MAX,
            })?;
        Ok(Self {
            nickname,
            spread,
            pokemon,
        })
    }

    /// Name the server uses for this Pokemon
    pub fn name(&self) -> String {
        self.nickname
            .clone()
            .unwrap_or_else(|| self.pokemon.species.to_string())
    }

    pub fn pokemon(&self) -> &Pokemon {
        &self.pokemon
    }

    pub fn pokemon_mut(&mut self) -> &mut Pokemon {
        &mut self.pokemon
    }
}

impl AnyPokemon for KnownPokemon {
    fn species(&self) -> Species {
        self.pokemon.species
    }

    fn level(&self) -> u8 {
        self.pokemon.level
    }

    fn hp_ratio(&self) -> f64 {
        self.pokemon.hp.ratio()
    }

    fn status(&self) -> Status {
        self.pokemon.status
    }

    fn has_been_seen(&self) -> bool {
        self.pokemon.has_been_seen
    }

    fn switch_in(&mut self) {
        self.pokemon.switch_in();
    }

    fn switch_out(&mut self, generation: Generation) {
        self.pokemon.switch_out(generation);
    }

    fn is_fainted(&self) -> bool {
        self.pokemon.is_fainted()
    }
}

/// The AI's team
pub type KnownTeam = GenericTeam<KnownPokemon>;

impl From<&KnownTeam> for Team {
    fn from(team: &KnownTeam) -> Self {
        team.map_members(|member| member.pokemon.clone())
    }
}
