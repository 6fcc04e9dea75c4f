//! Minor battle actions: HP changes, status, boosts and field conditions

use super::ServerMessage;
use super::battle::{
    Ident, Stat, StatusCode, effect_name, field, has_tag, parse_hp_status, parse_ident, parse_player, tag,
};
use crate::ParseError;
use anyhow::Result;

fn parse_stat(parts: &[&str], index: usize) -> Result<Stat> {
    parts.get(index).and_then(|s| Stat::parse(s)).ok_or_else(|| {
        ParseError::InvalidField {
            field: "stat",
            value: field(parts, index),
        }
        .into()
    })
}

fn parse_amount(parts: &[&str], index: usize) -> Result<i8> {
    parts.get(index).and_then(|s| s.parse().ok()).ok_or_else(|| {
        ParseError::InvalidField {
            field: "boost amount",
            value: field(parts, index),
        }
        .into()
    })
}

fn parse_status_code(parts: &[&str], index: usize) -> Result<StatusCode> {
    parts.get(index).and_then(|s| StatusCode::parse(s)).ok_or_else(|| {
        ParseError::InvalidField {
            field: "status",
            value: field(parts, index),
        }
        .into()
    })
}

/// |-fail|POKEMON|ACTION
pub fn parse_fail(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Fail {
        pokemon: parse_ident(parts, 2)?,
        action: parts.get(3).filter(|s| !s.starts_with('[')).map(|s| s.to_string()),
    })
}

/// |-miss|SOURCE|TARGET
pub fn parse_miss(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Miss {
        source: parse_ident(parts, 2)?,
        target: parts.get(3).and_then(|s| Ident::parse(s)),
    })
}

/// |-damage|POKEMON|HP STATUS with an optional `[from] EFFECT`
pub fn parse_damage(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Damage {
        pokemon: parse_ident(parts, 2)?,
        hp_status: parse_hp_status(parts, 3),
        from: tag(parts, 4, "[from]"),
    })
}

pub fn parse_heal(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Heal {
        pokemon: parse_ident(parts, 2)?,
        hp_status: parse_hp_status(parts, 3),
        from: tag(parts, 4, "[from]"),
    })
}

pub fn parse_sethp(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::SetHp {
        pokemon: parse_ident(parts, 2)?,
        hp_status: parse_hp_status(parts, 3),
    })
}

/// |-status|POKEMON|STATUS
pub fn parse_status(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Status {
        pokemon: parse_ident(parts, 2)?,
        status: parse_status_code(parts, 3)?,
    })
}

pub fn parse_curestatus(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::CureStatus {
        pokemon: parse_ident(parts, 2)?,
        status: parse_status_code(parts, 3)?,
    })
}

pub fn parse_cureteam(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::CureTeam(parse_ident(parts, 2)?))
}

/// |-boost|POKEMON|STAT|AMOUNT
pub fn parse_boost(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Boost {
        pokemon: parse_ident(parts, 2)?,
        stat: parse_stat(parts, 3)?,
        amount: parse_amount(parts, 4)?,
    })
}

pub fn parse_unboost(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Unboost {
        pokemon: parse_ident(parts, 2)?,
        stat: parse_stat(parts, 3)?,
        amount: parse_amount(parts, 4)?,
    })
}

pub fn parse_setboost(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::SetBoost {
        pokemon: parse_ident(parts, 2)?,
        stat: parse_stat(parts, 3)?,
        amount: parse_amount(parts, 4)?,
    })
}

pub fn parse_clearnegativeboost(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::ClearNegativeBoost(parse_ident(parts, 2)?))
}

/// |-weather|WEATHER with `[upkeep]` while it continues and `[from]` when
/// an ability set it
pub fn parse_weather(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Weather {
        weather: field(parts, 2),
        upkeep: has_tag(parts, 3, "[upkeep]"),
        from: tag(parts, 3, "[from]"),
    })
}

pub fn parse_fieldstart(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::FieldStart(effect_name(&field(parts, 2)).to_string()))
}

pub fn parse_fieldend(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::FieldEnd(effect_name(&field(parts, 2)).to_string()))
}

/// |-sidestart|SIDE|CONDITION where SIDE is `p1: Username`
pub fn parse_sidestart(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::SideStart {
        player: parse_player(parts, 2)?,
        condition: effect_name(&field(parts, 3)).to_string(),
    })
}

pub fn parse_sideend(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::SideEnd {
        player: parse_player(parts, 2)?,
        condition: effect_name(&field(parts, 3)).to_string(),
    })
}

/// |-start|POKEMON|EFFECT
pub fn parse_volatile_start(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::VolatileStart {
        pokemon: parse_ident(parts, 2)?,
        effect: effect_name(&field(parts, 3)).to_string(),
    })
}

pub fn parse_volatile_end(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::VolatileEnd {
        pokemon: parse_ident(parts, 2)?,
        effect: effect_name(&field(parts, 3)).to_string(),
    })
}

pub fn parse_crit(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Crit(parse_ident(parts, 2)?))
}

pub fn parse_supereffective(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::SuperEffective(parse_ident(parts, 2)?))
}

pub fn parse_resisted(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Resisted(parse_ident(parts, 2)?))
}

pub fn parse_immune(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Immune(parse_ident(parts, 2)?))
}

/// |-item|POKEMON|ITEM
pub fn parse_item(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Item {
        pokemon: parse_ident(parts, 2)?,
        item: field(parts, 3),
        from: tag(parts, 4, "[from]"),
    })
}

/// |-enditem|POKEMON|ITEM, for consumed, knocked off or stolen items
pub fn parse_enditem(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::EndItem {
        pokemon: parse_ident(parts, 2)?,
        item: field(parts, 3),
        from: tag(parts, 4, "[from]"),
    })
}

pub fn parse_ability(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Ability {
        pokemon: parse_ident(parts, 2)?,
        ability: field(parts, 3),
        from: tag(parts, 4, "[from]"),
    })
}

/// |-activate|EFFECT with an optional POKEMON before it
pub fn parse_activate(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parts.get(2).and_then(|s| Ident::parse(s));
    let effect = if pokemon.is_some() { field(parts, 3) } else { field(parts, 2) };
    Ok(ServerMessage::Activate {
        pokemon,
        effect: effect_name(&effect).to_string(),
    })
}

/// |-prepare|POKEMON|MOVE, the first turn of a charging move
pub fn parse_prepare(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Prepare {
        pokemon: parse_ident(parts, 2)?,
        move_name: field(parts, 3),
    })
}

pub fn parse_mustrecharge(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::MustRecharge(parse_ident(parts, 2)?))
}

/// |-singleturn|POKEMON|MOVE, for Protect and friends
pub fn parse_singleturn(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::SingleTurn {
        pokemon: parse_ident(parts, 2)?,
        effect: effect_name(&field(parts, 3)).to_string(),
    })
}
