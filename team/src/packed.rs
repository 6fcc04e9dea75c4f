//! Showdown's packed team format
//!
//! One line, Pokemon separated by `]`, fields by `|`:
//!
//! ```text
//! NICKNAME|SPECIES|ITEM|ABILITY|MOVES|NATURE|EVS|GENDER|IVS|SHINY|LEVEL|HAPPINESS,...
//! ```
//!
//! Names are ids (`leftovers`, `thunderbolt`). An empty species means the
//! nickname is the species. Stat lists are comma separated in
//! HP/Atk/Def/SpA/SpD/Spe order, and blank entries take the default.

use tactician_battle::data::to_id;
use tactician_battle::{Generation, KnownTeam};

use crate::error::TeamError;
use crate::set::{PokemonSet, StatSet};

const MIN_FIELDS: usize = 9;

pub fn parse_packed(text: &str, generation: Generation) -> Result<KnownTeam, TeamError> {
    let sets = parse_sets(text)?;
    crate::build_team(&sets, generation)
}

pub fn parse_sets(text: &str) -> Result<Vec<PokemonSet>, TeamError> {
    text.trim()
        .split(']')
        .filter(|entry| !entry.trim().is_empty())
        .enumerate()
        .map(|(index, entry)| parse_entry(entry, index + 1))
        .collect()
}

fn invalid(entry: usize, message: impl Into<String>) -> TeamError {
    TeamError::Packed {
        entry,
        message: message.into(),
    }
}

fn optional(field: &str) -> Option<String> {
    let field = field.trim();
    (!field.is_empty()).then(|| field.to_string())
}

fn parse_entry(entry: &str, number: usize) -> Result<PokemonSet, TeamError> {
    let fields: Vec<&str> = entry.split('|').collect();
    if fields.len() < MIN_FIELDS {
        return Err(invalid(
            number,
            format!("expected at least {MIN_FIELDS} fields, found {}", fields.len()),
        ));
    }
    let nickname = optional(fields[0]);
    let (nickname, species) = match optional(fields[1]) {
        Some(species) => (nickname, species),
        None => match nickname {
            Some(nickname) => (None, nickname),
            None => return Err(invalid(number, "missing species")),
        },
    };
    // Slot numbers ("0", "1", "H") stand for an ability the format derives
    let ability = optional(fields[3]).filter(|ability| !matches!(ability.as_str(), "0" | "1" | "H"));
    let gender = optional(fields[7]).filter(|gender| matches!(gender.as_str(), "M" | "F"));
    let level = match fields.get(10).and_then(|level| optional(level)) {
        Some(level) => Some(
            level
                .parse()
                .map_err(|_| invalid(number, format!("invalid level {level:?}")))?,
        ),
        None => None,
    };

    Ok(PokemonSet {
        nickname,
        species,
        item: optional(fields[2]),
        ability,
        level,
        gender,
        nature: optional(fields[5]),
        evs: parse_stats(fields[6], number)?,
        ivs: parse_stats(fields[8], number)?,
        moves: fields[4]
            .split(',')
            .filter_map(optional)
            .collect(),
    })
}

fn parse_stats(field: &str, number: usize) -> Result<StatSet, TeamError> {
    let mut stats = StatSet::default();
    if field.trim().is_empty() {
        return Ok(stats);
    }
    let values: Vec<&str> = field.split(',').collect();
    if values.len() > StatSet::LABELS.len() {
        return Err(invalid(number, format!("too many stats in {field:?}")));
    }
    for (label, value) in StatSet::LABELS.iter().zip(values) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let value = value
            .parse()
            .map_err(|_| invalid(number, format!("invalid stat value {value:?}")))?;
        stats.set(label, value);
    }
    Ok(stats)
}

fn write_stats(stats: &StatSet) -> String {
    if stats.is_empty() {
        return String::new();
    }
    stats
        .values()
        .iter()
        .map(|value| value.map(|value| value.to_string()).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
}

fn id(name: &Option<String>) -> String {
    name.as_deref().map(to_id).unwrap_or_default()
}

pub fn to_packed(team: &KnownTeam) -> String {
    let generation = team.generation();
    team.members()
        .iter()
        .map(|known| {
            let set = PokemonSet::from_known(known, generation);
            let (nickname, species) = match &set.nickname {
                Some(nickname) => (nickname.clone(), set.species.clone()),
                None => (set.species.clone(), String::new()),
            };
            let moves: Vec<_> = set.moves.iter().map(|name| to_id(name)).collect();
            [
                nickname,
                species,
                id(&set.item),
                id(&set.ability),
                moves.join(","),
                set.nature.clone().unwrap_or_default(),
                write_stats(&set.evs),
                set.gender.clone().unwrap_or_default(),
                write_stats(&set.ivs),
                String::new(),
                set.level.map(|level| level.to_string()).unwrap_or_default(),
                String::new(),
            ]
            .join("|")
        })
        .collect::<Vec<_>>()
        .join("]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactician_battle::{Ability, Gender, Item, MoveName, Nature, Species};

    const TEAM: &str = "Sparky|Jolteon|leftovers|voltabsorb|thunderbolt,hiddenpowerice|Timid|4,,,252,,252|M|,0,,,,|||]\
                        Snorlax||leftovers|H|bodyslam,earthquake|Careful|||||88|";

    #[test]
    fn test_parse_packed() {
        let team = parse_packed(TEAM, Generation::Four).unwrap();
        assert_eq!(team.members().len(), 2);

        let sparky = &team.members()[0];
        assert_eq!(sparky.nickname.as_deref(), Some("Sparky"));
        let pokemon = sparky.pokemon();
        assert_eq!(pokemon.species, Species::Jolteon);
        assert_eq!(pokemon.gender, Gender::Male);
        assert_eq!(pokemon.ability, Ability::VoltAbsorb);
        assert_eq!(pokemon.nature, Nature::Timid);
        assert_eq!(sparky.spread.evs.hp, 4);
        assert_eq!(sparky.spread.evs.spe, 252);
        assert_eq!(sparky.spread.ivs.atk, 0);
        assert_eq!(sparky.spread.ivs.hp, 31);
        assert_eq!(
            pokemon.moves.names().collect::<Vec<_>>(),
            vec![MoveName::Thunderbolt, MoveName::HiddenPower]
        );

        let snorlax = &team.members()[1];
        assert_eq!(snorlax.nickname, None);
        assert_eq!(snorlax.pokemon().species, Species::Snorlax);
        assert_eq!(snorlax.pokemon().ability, Ability::None);
        assert_eq!(snorlax.pokemon().level, 88);
        assert_eq!(snorlax.pokemon().item.held(), Some(Item::Leftovers));
    }

    #[test]
    fn test_errors_name_the_entry() {
        let error = parse_packed("Jolteon||leftovers", Generation::Four).unwrap_err();
        assert!(matches!(error, TeamError::Packed { entry: 1, .. }));

        let text = format!("{}]Jolteon|||||||||||", TEAM.split(']').next().unwrap_or_default());
        let error = parse_packed(&text, Generation::Four).unwrap_err();
        assert!(matches!(error, TeamError::NoMoves(_)));

        let error = parse_packed("Jolteon||||thunderbolt||||||level|", Generation::Four).unwrap_err();
        assert_eq!(error.to_string(), "Packed team entry 1: invalid level \"level\"");
    }

    #[test]
    fn test_packed_reads_back() {
        let team = parse_packed(TEAM, Generation::Four).unwrap();
        let text = to_packed(&team);
        assert!(text.starts_with("Sparky|Jolteon|leftovers|voltabsorb|thunderbolt,hiddenpower|Timid|"));
        assert_eq!(text.matches(']').count(), 1);
        assert_eq!(parse_packed(&text, Generation::Four).unwrap(), team);
    }
}
