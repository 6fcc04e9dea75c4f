//! Teams as a JSON document
//!
//! ```json
//! {"pokemon": [{"species": "Jolteon", "item": "Leftovers", "moves": ["Thunderbolt"]}]}
//! ```
//!
//! Field names and defaults match [`PokemonSet`].

use serde::{Deserialize, Serialize};
use tactician_battle::{Generation, KnownTeam};

use crate::error::TeamError;
use crate::set::PokemonSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDocument {
    pub pokemon: Vec<PokemonSet>,
}

impl TeamDocument {
    pub fn from_team(team: &KnownTeam) -> Self {
        let generation = team.generation();
        Self {
            pokemon: team
                .members()
                .iter()
                .map(|known| PokemonSet::from_known(known, generation))
                .collect(),
        }
    }

    pub fn to_team(&self, generation: Generation) -> Result<KnownTeam, TeamError> {
        crate::build_team(&self.pokemon, generation)
    }
}

pub fn parse_json(text: &str, generation: Generation) -> Result<KnownTeam, TeamError> {
    let document: TeamDocument = serde_json::from_str(text)?;
    document.to_team(generation)
}

pub fn to_json(team: &KnownTeam) -> Result<String, TeamError> {
    Ok(serde_json::to_string_pretty(&TeamDocument::from_team(team))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactician_battle::{Item, Species};

    #[test]
    fn test_parse_json() {
        let team = parse_json(
            r#"{"pokemon": [
                {"species": "Jolteon", "item": "Leftovers", "evs": {"spa": 252, "spe": 252}, "moves": ["Thunderbolt"]},
                {"nickname": "Lax", "species": "Snorlax", "level": 90, "moves": ["Body Slam"]}
            ]}"#,
            Generation::Four,
        )
        .unwrap();
        assert_eq!(team.members().len(), 2);
        let jolteon = &team.members()[0];
        assert_eq!(jolteon.pokemon().item.held(), Some(Item::Leftovers));
        assert_eq!(jolteon.spread.evs.spa, 252);
        assert_eq!(jolteon.spread.evs.hp, 0);
        let snorlax = &team.members()[1];
        assert_eq!(snorlax.pokemon().species, Species::Snorlax);
        assert_eq!(snorlax.nickname.as_deref(), Some("Lax"));
        assert_eq!(snorlax.pokemon().level, 90);
    }

    #[test]
    fn test_bad_documents() {
        assert!(matches!(
            parse_json(r#"{"pokemon": "Jolteon"}"#, Generation::Four),
            Err(TeamError::Json(_))
        ));
        assert!(matches!(
            parse_json(r#"{"pokemon": []}"#, Generation::Four),
            Err(TeamError::EmptyTeam)
        ));
        assert!(matches!(
            parse_json(r#"{"pokemon": [{"species": "Agumon", "moves": ["Tackle"]}]}"#, Generation::Four),
            Err(TeamError::Invalid { .. })
        ));
    }

    #[test]
    fn test_json_reads_back() {
        let team = parse_json(
            r#"{"pokemon": [{"species": "Gengar", "ability": "Levitate", "moves": ["Shadow Ball"]}]}"#,
            Generation::Four,
        )
        .unwrap();
        let text = to_json(&team).unwrap();
        assert!(text.contains("\"species\": \"Gengar\""));
        assert!(!text.contains("\"evs\""));
        assert_eq!(parse_json(&text, Generation::Four).unwrap(), team);
    }
}
