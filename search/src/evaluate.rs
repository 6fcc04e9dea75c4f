//! Static scoring of a battle position

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactician_battle::types::EntryHazards;
use tactician_battle::{Ability, AnyPokemon, AnyTeam, Generation, Pokemon, Team, Type};

use crate::error::SettingsError;

/// Weights are clamped to this magnitude
pub const MAX_WEIGHT: i32 = 4096;

const MAX_POKEMON_PER_TEAM: i32 = 6;

// hp + hidden + three layers of Spikes + 4x Stealth Rock + two layers of
// Toxic Spikes, each at the largest weight
const MAX_POKEMON_SCORE: i32 = MAX_WEIGHT * (1 + 1 + 3 + 4 + 2);

/// Score of a won battle. Larger than any position `Evaluate` can return.
pub const VICTORY: f64 = (2 * MAX_POKEMON_SCORE * MAX_POKEMON_PER_TEAM + 1) as f64;

/// Weights as they appear in the settings file. Missing fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluateSettings {
    pub hp: i64,
    pub hidden: i64,
    pub spikes: i64,
    #[serde(rename = "stealth rock")]
    pub stealth_rock: i64,
    #[serde(rename = "toxic spikes")]
    pub toxic_spikes: i64,
}

#[derive(Debug, Deserialize)]
struct EvaluateFile {
    score: EvaluateSettings,
}

impl EvaluateSettings {
    /// Parse `{"score": {...}}`
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let file: EvaluateFile = serde_json::from_str(json)?;
        file.score.validate()?;
        Ok(file.score)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("hp", self.hp),
            ("hidden", self.hidden),
            ("spikes", self.spikes),
            ("stealth rock", self.stealth_rock),
            ("toxic spikes", self.toxic_spikes),
        ] {
            checked_weight(field, value)?;
        }
        Ok(())
    }
}

fn checked_weight(field: &'static str, value: i64) -> Result<i32, SettingsError> {
    let max = i64::from(MAX_WEIGHT);
    if !(-max..=max).contains(&value) {
        return Err(SettingsError::OutOfRange {
            field,
            value,
            min: -max,
            max,
        });
    }
    Ok(value as i32)
}

/// Linear scoring function for one generation. Weights for features the
/// generation does not have are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluate {
    generation: Generation,
    hp: i32,
    hidden: i32,
    spikes: i32,
    stealth_rock: i32,
    toxic_spikes: i32,
}

impl Evaluate {
    pub fn new(generation: Generation, settings: EvaluateSettings) -> Result<Self, SettingsError> {
        let weight = |field, value, exists: bool| -> Result<i32, SettingsError> {
            let checked = checked_weight(field, value)?;
            Ok(if exists { checked } else { 0 })
        };
        Ok(Self {
            generation,
            hp: weight("hp", settings.hp, true)?,
            hidden: weight("hidden", settings.hidden, generation <= Generation::Four)?,
            spikes: weight("spikes", settings.spikes, generation >= Generation::Two)?,
            stealth_rock: weight("stealth rock", settings.stealth_rock, generation >= Generation::Four)?,
            toxic_spikes: weight("toxic spikes", settings.toxic_spikes, generation >= Generation::Four)?,
        })
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Positive when the position favors `ai`
    pub fn evaluate(&self, ai: &Team, foe: &Team) -> i32 {
        self.score_team(ai) - self.score_team(foe)
    }

    fn score_team(&self, team: &Team) -> i32 {
        team.members()
            .iter()
            .filter(|pokemon| !pokemon.is_fainted())
            .map(|pokemon| self.score_pokemon(pokemon, &team.hazards))
            .sum()
    }

    fn score_pokemon(&self, pokemon: &Pokemon, hazards: &EntryHazards) -> i32 {
        let types = pokemon.species.types(self.generation);
        let grounded = !types.contains(&Type::Flying) && pokemon.ability != Ability::Levitate;

        let hp = (pokemon.hp_ratio() * f64::from(self.hp)) as i32;
        let hidden = if pokemon.has_been_seen() { 0 } else { self.hidden };
        let spikes = if grounded {
            i32::from(hazards.spikes()) * self.spikes
        } else {
            0
        };
        let stealth_rock = if hazards.stealth_rock() {
            (Type::Rock.effectiveness_multi(types, self.generation) * f64::from(self.stealth_rock)) as i32
        } else {
            0
        };
        let toxic_spikes = if grounded {
            i32::from(hazards.toxic_spikes()) * self.toxic_spikes
        } else {
            0
        };
        hp + hidden + spikes + stealth_rock + toxic_spikes
    }
}

/// One `Evaluate` per generation, all from the same settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllEvaluate {
    evaluates: Vec<Evaluate>,
}

impl AllEvaluate {
    pub fn new(settings: EvaluateSettings) -> Result<Self, SettingsError> {
        let evaluates = Generation::ALL
            .iter()
            .map(|generation| Evaluate::new(*generation, settings))
            .collect::<Result<_, _>>()?;
        Ok(Self { evaluates })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Self::new(EvaluateSettings::load(path)?)
    }

    pub fn get(&self, generation: Generation) -> Evaluate {
        let index = Generation::ALL
            .iter()
            .position(|candidate| *candidate == generation)
            .unwrap_or_default();
        self.evaluates[index]
    }
}

/// `Some(±VICTORY)` once a team is down to a single fainted Pokemon.
/// Losing is scored from the AI's side; a double knockout sums to zero.
pub fn win<T: AnyTeam>(team1: &T, team2: &T) -> Option<f64> {
    fn single_team_win<T: AnyTeam>(team: &T) -> f64 {
        assert_ne!(team.size(), 0, "a team in play has at least one member");
        let lost = team.size() == 1 && team.members()[team.active_index()].is_fainted();
        match (lost, team.is_me()) {
            (false, _) => 0.0,
            (true, true) => -VICTORY,
            (true, false) => VICTORY,
        }
    }
    let win1 = single_team_win(team1);
    let win2 = single_team_win(team2);
    if win1 != 0.0 || win2 != 0.0 {
        Some(win1 + win2)
    } else {
        None
    }
}
