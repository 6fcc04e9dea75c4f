//! Values shared by the battle messages

use crate::ParseError;

/// Side of a singles battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    /// Parse `p1`/`p2`, also accepting identifiers that continue after the
    /// side (`p1a`, `p2: Name`)
    pub fn parse(s: &str) -> Option<Self> {
        if s.starts_with("p1") {
            Some(Player::P1)
        } else if s.starts_with("p2") {
            Some(Player::P2)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }
}

/// A Pokemon as the protocol names it: `p1a: Nickname`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub player: Player,
    /// Active slot letter; absent when the Pokemon is named from the bench
    pub position: Option<char>,
    pub name: String,
}

impl Ident {
    pub fn parse(s: &str) -> Option<Self> {
        let (side, name) = s.split_once(": ")?;
        let player = Player::parse(side)?;
        Some(Ident {
            player,
            position: side.chars().nth(2),
            name: name.to_string(),
        })
    }
}

/// `Species, L50, M, shiny`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PokemonDetails {
    pub species: String,
    pub level: Option<u8>,
    pub gender: Option<char>,
    pub shiny: bool,
}

impl PokemonDetails {
    pub fn parse(s: &str) -> Self {
        let mut parts = s.split(", ");
        let mut details = PokemonDetails {
            species: parts.next().unwrap_or_default().to_string(),
            ..Default::default()
        };
        for part in parts {
            match part {
                "M" => details.gender = Some('M'),
                "F" => details.gender = Some('F'),
                "shiny" => details.shiny = true,
                _ => {
                    if let Some(level) = part.strip_prefix('L') {
                        details.level = level.parse().ok();
                    }
                }
            }
        }
        details
    }

    /// Level 100 is left out of the details string
    pub fn level(&self) -> u8 {
        self.level.unwrap_or(100)
    }
}

/// `HP/MAX STATUS`, or `0 fnt`. The foe's HP is out of 100 (or 48 in some
/// formats); the player's own is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HpStatus {
    pub current: u16,
    pub max: Option<u16>,
    pub status: Option<StatusCode>,
}

impl HpStatus {
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let hp = parts.next()?;
        let status = parts.next().and_then(StatusCode::parse);
        let (current, max) = match hp.split_once('/') {
            Some((current, max)) => (current.parse().ok()?, Some(max.parse().ok()?)),
            None => (hp.parse().ok()?, None),
        };
        Some(HpStatus { current, max, status })
    }

    pub fn is_fainted(&self) -> bool {
        self.status == Some(StatusCode::Faint) || self.current == 0
    }
}

/// Status abbreviations used in HP strings and `-status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    Toxic,
    Sleep,
    Faint,
}

impl StatusCode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "brn" => Some(StatusCode::Burn),
            "frz" => Some(StatusCode::Freeze),
            "par" => Some(StatusCode::Paralysis),
            "psn" => Some(StatusCode::Poison),
            "tox" => Some(StatusCode::Toxic),
            "slp" => Some(StatusCode::Sleep),
            "fnt" => Some(StatusCode::Faint),
            _ => None,
        }
    }
}

/// Single-player game types only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    Singles,
    Doubles,
    Triples,
    Other,
}

impl GameType {
    pub fn parse(s: &str) -> Self {
        match s {
            "singles" => GameType::Singles,
            "doubles" => GameType::Doubles,
            "triples" => GameType::Triples,
            _ => GameType::Other,
        }
    }
}

/// Boostable stat as abbreviated on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }
}

/// Effects are sometimes prefixed with their kind (`move: Taunt`,
/// `ability: Intimidate`, `item: Leftovers`)
pub fn effect_name(effect: &str) -> &str {
    effect
        .split_once(": ")
        .filter(|(kind, _)| matches!(*kind, "move" | "ability" | "item"))
        .map_or(effect, |(_, name)| name)
}

pub fn parse_ident(parts: &[&str], index: usize) -> Result<Ident, anyhow::Error> {
    parts
        .get(index)
        .and_then(|s| Ident::parse(s))
        .ok_or_else(|| ParseError::MissingField("pokemon".to_string()).into())
}

pub fn parse_player(parts: &[&str], index: usize) -> Result<Player, anyhow::Error> {
    parts
        .get(index)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| ParseError::MissingField("player".to_string()).into())
}

pub fn parse_details(parts: &[&str], index: usize) -> PokemonDetails {
    parts.get(index).map(|s| PokemonDetails::parse(s)).unwrap_or_default()
}

pub fn parse_hp_status(parts: &[&str], index: usize) -> Option<HpStatus> {
    parts.get(index).and_then(|s| HpStatus::parse(s))
}

pub fn field(parts: &[&str], index: usize) -> String {
    parts.get(index).map(|s| s.to_string()).unwrap_or_default()
}

/// Value of a trailing `[tag] value` part at or after `start`
pub fn tag(parts: &[&str], start: usize, name: &str) -> Option<String> {
    parts
        .iter()
        .skip(start)
        .find_map(|part| part.strip_prefix(name))
        .map(|value| value.trim().to_string())
}

/// Whether a bare `[tag]` appears at or after `start`
pub fn has_tag(parts: &[&str], start: usize, name: &str) -> bool {
    parts.iter().skip(start).any(|part| *part == name)
}
