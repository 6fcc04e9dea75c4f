use super::ServerMessage;
use crate::ParseError;
use anyhow::Result;

/// |init|ROOMTYPE
pub fn parse_init(parts: &[&str]) -> Result<ServerMessage> {
    let room_type = parts
        .get(2)
        .ok_or_else(|| ParseError::MissingField("room type".to_string()))?;
    Ok(ServerMessage::Init(room_type.to_string()))
}

pub fn parse_title(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Title(parts.get(2..).map(|p| p.join("|")).unwrap_or_default()))
}

/// |error|MESSAGE, also sent for invalid `/choose` commands
pub fn parse_error(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Error(parts.get(2..).map(|p| p.join("|")).unwrap_or_default()))
}
