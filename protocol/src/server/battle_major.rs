//! Major battle actions: moves, switches and faints

use super::ServerMessage;
use super::battle::{Ident, field, has_tag, parse_details, parse_hp_status, parse_ident, tag};
use anyhow::Result;

/// |move|POKEMON|MOVE|TARGET with optional `[miss]` and `[from]` tags
pub fn parse_move(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Move {
        pokemon: parse_ident(parts, 2)?,
        move_name: field(parts, 3),
        target: parts.get(4).and_then(|s| Ident::parse(s)),
        miss: has_tag(parts, 5, "[miss]"),
        from: tag(parts, 5, "[from]"),
    })
}

/// |switch|POKEMON|DETAILS|HP STATUS
pub fn parse_switch(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Switch {
        pokemon: parse_ident(parts, 2)?,
        details: parse_details(parts, 3),
        hp_status: parse_hp_status(parts, 4),
    })
}

/// |drag|POKEMON|DETAILS|HP STATUS, a switch forced by the foe
pub fn parse_drag(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Drag {
        pokemon: parse_ident(parts, 2)?,
        details: parse_details(parts, 3),
        hp_status: parse_hp_status(parts, 4),
    })
}

/// |cant|POKEMON|REASON|MOVE
pub fn parse_cant(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Cant {
        pokemon: parse_ident(parts, 2)?,
        reason: field(parts, 3),
        move_name: parts.get(4).filter(|s| !s.is_empty()).map(|s| s.to_string()),
    })
}

pub fn parse_faint(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Faint(parse_ident(parts, 2)?))
}
