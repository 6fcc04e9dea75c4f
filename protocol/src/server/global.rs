use super::ServerMessage;
use crate::ParseError;
use anyhow::Result;

pub fn parse_challstr(parts: &[&str]) -> Result<ServerMessage> {
    if parts.len() < 3 {
        return Err(ParseError::MissingField("challstr value".to_string()).into());
    }

    // CHALLSTR can contain | characters
    let challstr = parts[2..].join("|");
    if challstr.is_empty() {
        return Err(ParseError::InvalidFormat("challstr cannot be empty".to_string()).into());
    }

    Ok(ServerMessage::Challstr(challstr))
}

/// |updateuser|USER|NAMED|AVATAR|SETTINGS
pub fn parse_updateuser(parts: &[&str]) -> Result<ServerMessage> {
    if parts.len() < 4 {
        return Err(ParseError::MissingField("updateuser fields".to_string()).into());
    }

    // The first character of USER is the rank symbol (a space for none)
    let user = parts[2];
    let username = match user.chars().next() {
        Some(rank) if !rank.is_alphanumeric() => user[rank.len_utf8()..].to_string(),
        _ => user.to_string(),
    };

    Ok(ServerMessage::UpdateUser {
        username,
        named: parts[3] == "1",
    })
}

pub fn parse_nametaken(parts: &[&str]) -> Result<ServerMessage> {
    if parts.len() < 4 {
        return Err(ParseError::MissingField("nametaken fields".to_string()).into());
    }

    Ok(ServerMessage::NameTaken {
        username: parts[2].to_string(),
        message: parts[3..].join("|"),
    })
}

pub fn parse_popup(parts: &[&str]) -> Result<ServerMessage> {
    if parts.len() < 3 {
        return Err(ParseError::MissingField("popup message".to_string()).into());
    }

    Ok(ServerMessage::Popup(parts[2..].join("|")))
}
