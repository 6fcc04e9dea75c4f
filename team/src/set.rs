//! A Pokemon as a team file describes it, before names are resolved

use serde::{Deserialize, Serialize};
use tactician_battle::{
    Ability, AnyPokemon, Gender, Generation, Item, KnownPokemon, Move, MoveName, Nature, Species, Spread, StatValues,
};

use tactician_battle::data::to_id;

use crate::error::TeamError;

const DEFAULT_LEVEL: u8 = 100;

/// Per-stat values where a missing entry takes the format's default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atk: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub def: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spa: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spd: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spe: Option<u8>,
}

impl StatSet {
    /// Showdown's stat labels, in order
    pub const LABELS: [&'static str; 6] = ["HP", "Atk", "Def", "SpA", "SpD", "Spe"];

    fn slots(&mut self) -> [&mut Option<u8>; 6] {
        [
            &mut self.hp,
            &mut self.atk,
            &mut self.def,
            &mut self.spa,
            &mut self.spd,
            &mut self.spe,
        ]
    }

    pub fn values(&self) -> [Option<u8>; 6] {
        [self.hp, self.atk, self.def, self.spa, self.spd, self.spe]
    }

    /// Set a stat by its Showdown label. Returns false for an unknown label.
    pub fn set(&mut self, label: &str, value: u8) -> bool {
        let index = Self::LABELS
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(label));
        match index {
            Some(index) => {
                *self.slots()[index] = Some(value);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values().iter().all(Option::is_none)
    }

    fn resolve(&self, default: u8) -> StatValues {
        let value = |stat: Option<u8>| stat.unwrap_or(default);
        StatValues {
            hp: value(self.hp),
            atk: value(self.atk),
            def: value(self.def),
            spa: value(self.spa),
            spd: value(self.spd),
            spe: value(self.spe),
        }
    }

    /// Only the stats that differ from `default`
    fn from_values(values: &StatValues, default: u8) -> Self {
        let keep = |value: u8| (value != default).then_some(value);
        Self {
            hp: keep(values.hp),
            atk: keep(values.atk),
            def: keep(values.def),
            spa: keep(values.spa),
            spd: keep(values.spd),
            spe: keep(values.spe),
        }
    }
}

/// Defaults a team file leaves implicit: IVs are maxed, and EVs are maxed in
/// the DV generations but empty otherwise
fn default_iv(generation: Generation) -> u8 {
    if generation.uses_dvs() {
        Spread::MAX_IV - 1
    } else {
        Spread::MAX_IV
    }
}

fn default_ev(generation: Generation) -> u8 {
    if generation.uses_dvs() { Spread::MAX_EV } else { 0 }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokemonSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub species: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// "M", "F" or absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nature: Option<String>,
    #[serde(skip_serializing_if = "StatSet::is_empty")]
    pub evs: StatSet,
    #[serde(skip_serializing_if = "StatSet::is_empty")]
    pub ivs: StatSet,
    pub moves: Vec<String>,
}

/// "Hidden Power [Fire]" and "hiddenpowerfire" name the type, which stats
/// already decide
fn parse_move(name: &str) -> Result<MoveName, tactician_battle::BattleError> {
    let name = name.trim();
    let name = match name.find('[') {
        Some(bracket) => name[..bracket].trim(),
        None => name,
    };
    if to_id(name).starts_with("hiddenpower") {
        return Ok(MoveName::HiddenPower);
    }
    name.parse()
}

fn gender_from_str(gender: Option<&str>) -> Gender {
    Gender::from_protocol(gender.and_then(|gender| gender.trim().chars().next()))
}

pub(crate) fn gender_to_str(gender: Gender) -> Option<&'static str> {
    match gender {
        Gender::Male => Some("M"),
        Gender::Female => Some("F"),
        Gender::Genderless => None,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

impl PokemonSet {
    pub fn to_known(&self, generation: Generation) -> Result<KnownPokemon, TeamError> {
        let invalid = |source| TeamError::Invalid {
            pokemon: self.species.clone(),
            source,
        };
        let species: Species = self.species.trim().parse().map_err(invalid)?;
        let item = match non_empty(&self.item) {
            Some(item) => item.parse().map_err(invalid)?,
            None => Item::None,
        };
        let ability = match non_empty(&self.ability) {
            Some(ability) => ability.parse().map_err(invalid)?,
            None => Ability::None,
        };
        let nature = match non_empty(&self.nature) {
            Some(nature) => nature.parse().map_err(invalid)?,
            None => Nature::Serious,
        };
        let moves = self
            .moves
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| parse_move(name).map(|name| Move::new(name, Move::MAX_PP_UPS)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;
        if moves.is_empty() {
            return Err(TeamError::NoMoves(species.to_string()));
        }

        KnownPokemon::new(
            generation,
            species,
            non_empty(&self.nickname).map(str::to_string),
            self.level.unwrap_or(DEFAULT_LEVEL),
            gender_from_str(self.gender.as_deref()),
            nature,
            self.spread(generation),
            ability,
            item,
            moves,
        )
        .map_err(invalid)
    }

    fn spread(&self, generation: Generation) -> Spread {
        let ivs = self.ivs.resolve(default_iv(generation));
        let evs = self.evs.resolve(default_ev(generation));
        if generation.uses_dvs() {
            // Special shares the SpA DV and HP is derived from the others
            let mut spread = Spread::from_dvs(ivs.atk / 2, ivs.def / 2, ivs.spe / 2, ivs.spa / 2);
            spread.evs = evs;
            spread
        } else {
            Spread { ivs, evs }
        }
    }

    pub fn from_known(known: &KnownPokemon, generation: Generation) -> Self {
        let pokemon = known.pokemon();
        let species = pokemon.species();
        Self {
            nickname: known.nickname.clone().filter(|nickname| *nickname != species.to_string()),
            species: species.to_string(),
            item: pokemon.item.held().map(|item| item.to_string()),
            ability: (pokemon.initial_ability != Ability::None).then(|| pokemon.initial_ability.to_string()),
            level: (pokemon.level != DEFAULT_LEVEL).then_some(pokemon.level),
            gender: gender_to_str(pokemon.gender).map(str::to_string),
            nature: Some(pokemon.nature.to_string()),
            evs: StatSet::from_values(&known.spread.evs, default_ev(generation)),
            ivs: StatSet::from_values(&known.spread.ivs, default_iv(generation)),
            moves: pokemon.moves.names().map(|name| name.to_string()).collect(),
        }
    }

    /// Name shown first in the export format
    pub fn display_name(&self) -> &str {
        non_empty(&self.nickname).unwrap_or(&self.species)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jolteon() -> PokemonSet {
        PokemonSet {
            species: "Jolteon".to_string(),
            item: Some("Leftovers".to_string()),
            ability: Some("Volt Absorb".to_string()),
            nature: Some("Timid".to_string()),
            moves: vec!["Thunderbolt".to_string(), "Hidden Power [Ice]".to_string()],
            ..PokemonSet::default()
        }
    }

    #[test]
    fn test_defaults() {
        let known = jolteon().to_known(Generation::Four).unwrap();
        let pokemon = known.pokemon();
        assert_eq!(pokemon.species, Species::Jolteon);
        assert_eq!(pokemon.level, 100);
        assert_eq!(pokemon.item.held(), Some(Item::Leftovers));
        assert_eq!(known.spread.ivs, StatValues::uniform(31));
        assert_eq!(known.spread.evs, StatValues::uniform(0));
        assert_eq!(
            pokemon.moves.names().collect::<Vec<_>>(),
            vec![MoveName::Thunderbolt, MoveName::HiddenPower]
        );
    }

    #[test]
    fn test_dv_generations() {
        let mut set = jolteon();
        set.item = None;
        set.ability = None;
        set.moves = vec!["Thunderbolt".to_string()];
        set.ivs.set("Atk", 0);
        let known = set.to_known(Generation::One).unwrap();
        assert_eq!(known.spread.ivs.atk, 0);
        assert_eq!(known.spread.ivs.spe, 30);
        assert_eq!(known.spread.evs, StatValues::uniform(Spread::MAX_EV));
    }

    #[test]
    fn test_unknown_names() {
        let mut set = jolteon();
        set.item = Some("Shiny Rock".to_string());
        assert!(matches!(
            set.to_known(Generation::Four),
            Err(TeamError::Invalid { pokemon, .. }) if pokemon == "Jolteon"
        ));

        let mut set = jolteon();
        set.moves.clear();
        assert!(matches!(set.to_known(Generation::Four), Err(TeamError::NoMoves(_))));
    }

    #[test]
    fn test_stat_labels() {
        let mut stats = StatSet::default();
        assert!(stats.set("spe", 252));
        assert!(stats.set("SpA", 4));
        assert!(!stats.set("Spc", 4));
        assert_eq!(stats.spe, Some(252));
        assert_eq!(stats.spa, Some(4));
    }

    #[test]
    fn test_from_known_skips_defaults() {
        let known = jolteon().to_known(Generation::Four).unwrap();
        let set = PokemonSet::from_known(&known, Generation::Four);
        assert_eq!(set.nickname, None);
        assert_eq!(set.level, None);
        assert!(set.ivs.is_empty());
        assert_eq!(set.moves, vec!["Thunderbolt", "Hidden Power"]);
    }
}
