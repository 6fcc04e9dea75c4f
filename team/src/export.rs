//! Showdown's human-readable export format
//!
//! ```text
//! Sparky (Jolteon) (M) @ Leftovers
//! Ability: Volt Absorb
//! Level: 100
//! EVs: 252 SpA / 4 SpD / 252 Spe
//! Timid Nature
//! IVs: 0 Atk
//! - Thunderbolt
//! - Hidden Power [Ice]
//! ```
//!
//! Pokemon are separated by blank lines.

use std::fmt::Write;

use tactician_battle::{Generation, KnownTeam};

use crate::error::TeamError;
use crate::set::{PokemonSet, StatSet};

/// Lines Showdown writes that do not affect the battle
const IGNORED_KEYS: [&str; 6] = ["Shiny:", "Happiness:", "Pokeball:", "Tera Type:", "Gigantamax:", "Dynamax Level:"];

pub fn parse_export(text: &str, generation: Generation) -> Result<KnownTeam, TeamError> {
    let sets = parse_sets(text)?;
    crate::build_team(&sets, generation)
}

pub fn parse_sets(text: &str) -> Result<Vec<PokemonSet>, TeamError> {
    let mut sets = Vec::new();
    let mut current: Option<PokemonSet> = None;
    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        let line = line.trim();
        if line.is_empty() {
            sets.extend(current.take());
            continue;
        }
        // Team headers from the teambuilder
        if line.starts_with("===") {
            continue;
        }
        match current.as_mut() {
            None => current = Some(parse_header(line, number)?),
            Some(set) => parse_line(set, line, number)?,
        }
    }
    sets.extend(current);
    Ok(sets)
}

fn syntax(line: usize, message: impl Into<String>) -> TeamError {
    TeamError::Export {
        line,
        message: message.into(),
    }
}

/// `Nickname (Species) (G) @ Item`, where everything but the species is
/// optional
fn parse_header(line: &str, number: usize) -> Result<PokemonSet, TeamError> {
    let (names, item) = match line.split_once(" @ ") {
        Some((names, item)) => (names.trim(), Some(item.trim().to_string())),
        None => (line, None),
    };
    let mut names = names;
    let mut gender = None;
    for marker in ["(M)", "(F)"] {
        if let Some(rest) = names.strip_suffix(marker) {
            gender = Some(marker[1..2].to_string());
            names = rest.trim_end();
        }
    }
    let (nickname, species) = match names.strip_suffix(')').and_then(|rest| rest.rsplit_once(" (")) {
        Some((nickname, species)) => (Some(nickname.trim().to_string()), species.trim()),
        None => (None, names),
    };
    if species.is_empty() {
        return Err(syntax(number, "missing species"));
    }
    Ok(PokemonSet {
        nickname,
        species: species.to_string(),
        item,
        gender,
        ..PokemonSet::default()
    })
}

fn parse_line(set: &mut PokemonSet, line: &str, number: usize) -> Result<(), TeamError> {
    if let Some(name) = line.strip_prefix('-') {
        set.moves.push(name.trim().to_string());
    } else if let Some(ability) = line.strip_prefix("Ability:") {
        set.ability = Some(ability.trim().to_string());
    } else if let Some(level) = line.strip_prefix("Level:") {
        let level = level
            .trim()
            .parse()
            .map_err(|_| syntax(number, format!("invalid level {}", level.trim())))?;
        set.level = Some(level);
    } else if let Some(evs) = line.strip_prefix("EVs:") {
        parse_stats(evs, &mut set.evs, number)?;
    } else if let Some(ivs) = line.strip_prefix("IVs:") {
        parse_stats(ivs, &mut set.ivs, number)?;
    } else if let Some(nature) = line.strip_suffix(" Nature") {
        set.nature = Some(nature.trim().to_string());
    } else if !IGNORED_KEYS.iter().any(|key| line.starts_with(key)) {
        return Err(syntax(number, format!("unrecognized line {line:?}")));
    }
    Ok(())
}

/// `252 SpA / 4 SpD / 252 Spe`
fn parse_stats(text: &str, stats: &mut StatSet, number: usize) -> Result<(), TeamError> {
    for part in text.split('/') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (value, label) = part
            .split_once(char::is_whitespace)
            .ok_or_else(|| syntax(number, format!("invalid stat {part:?}")))?;
        let value = value
            .parse()
            .map_err(|_| syntax(number, format!("invalid stat value {value:?}")))?;
        if !stats.set(label.trim(), value) {
            return Err(syntax(number, format!("unknown stat {:?}", label.trim())));
        }
    }
    Ok(())
}

fn write_stats(output: &mut String, label: &str, stats: &StatSet) {
    if stats.is_empty() {
        return;
    }
    let parts: Vec<_> = stats
        .values()
        .iter()
        .zip(StatSet::LABELS)
        .filter_map(|(value, name)| value.map(|value| format!("{value} {name}")))
        .collect();
    let _ = writeln!(output, "{label}: {}", parts.join(" / "));
}

pub fn to_export(team: &KnownTeam) -> String {
    let generation = team.generation();
    let mut output = String::new();
    for (index, known) in team.members().iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        let set = PokemonSet::from_known(known, generation);
        match &set.nickname {
            Some(nickname) => {
                let _ = write!(output, "{nickname} ({})", set.species);
            }
            None => output.push_str(&set.species),
        }
        if let Some(gender) = &set.gender {
            let _ = write!(output, " ({gender})");
        }
        if let Some(item) = &set.item {
            let _ = write!(output, " @ {item}");
        }
        output.push('\n');
        if let Some(ability) = &set.ability {
            let _ = writeln!(output, "Ability: {ability}");
        }
        if let Some(level) = set.level {
            let _ = writeln!(output, "Level: {level}");
        }
        write_stats(&mut output, "EVs", &set.evs);
        if let Some(nature) = &set.nature {
            let _ = writeln!(output, "{nature} Nature");
        }
        write_stats(&mut output, "IVs", &set.ivs);
        for name in &set.moves {
            let _ = writeln!(output, "- {name}");
        }
    }
    output
}
