//! Messages sent once while a battle is being set up

use super::ServerMessage;
use super::battle::{GameType, field, parse_details, parse_player as player_at};
use crate::ParseError;
use anyhow::Result;

/// |player|PLAYER|USERNAME|AVATAR|RATING
///
/// The server repeats this line with an empty username when a player leaves.
pub fn parse_player(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Player {
        player: player_at(parts, 2)?,
        username: field(parts, 3),
        rating: parts.get(5).and_then(|s| s.parse().ok()),
    })
}

/// |teamsize|PLAYER|NUMBER
pub fn parse_teamsize(parts: &[&str]) -> Result<ServerMessage> {
    let player = player_at(parts, 2)?;
    let size = parts
        .get(3)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ParseError::InvalidField {
            field: "team size",
            value: field(parts, 3),
        })?;
    Ok(ServerMessage::TeamSize { player, size })
}

pub fn parse_gametype(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::GameType(GameType::parse(&field(parts, 2))))
}

/// |gen|GENNUM
pub fn parse_gen(parts: &[&str]) -> Result<ServerMessage> {
    parts
        .get(2)
        .and_then(|s| s.parse().ok())
        .map(ServerMessage::Gen)
        .ok_or_else(|| {
            ParseError::InvalidField {
                field: "generation",
                value: field(parts, 2),
            }
            .into()
        })
}

pub fn parse_tier(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Tier(field(parts, 2)))
}

pub fn parse_rule(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Rule(parts.get(2..).map(|p| p.join("|")).unwrap_or_default()))
}

/// |poke|PLAYER|DETAILS|ITEM
pub fn parse_poke(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Poke {
        player: player_at(parts, 2)?,
        details: parse_details(parts, 3),
    })
}
