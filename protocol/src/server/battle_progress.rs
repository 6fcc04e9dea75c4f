use super::ServerMessage;
use super::battle::field;
use super::request::BattleRequest;
use crate::ParseError;
use anyhow::{Context, Result};

/// |request|JSON
///
/// An empty body is sent between decisions and clears the pending request.
pub fn parse_request(parts: &[&str]) -> Result<ServerMessage> {
    // The JSON itself may contain | characters
    let json = parts.get(2..).map(|p| p.join("|")).unwrap_or_default();
    if json.trim().is_empty() {
        return Ok(ServerMessage::Request(None));
    }

    let request: BattleRequest = serde_json::from_str(&json).context("Invalid request JSON")?;
    Ok(ServerMessage::Request(Some(Box::new(request))))
}

pub fn parse_turn(parts: &[&str]) -> Result<ServerMessage> {
    parts
        .get(2)
        .and_then(|s| s.parse().ok())
        .map(ServerMessage::Turn)
        .ok_or_else(|| {
            ParseError::InvalidField {
                field: "turn",
                value: field(parts, 2),
            }
            .into()
        })
}

pub fn parse_win(parts: &[&str]) -> Result<ServerMessage> {
    Ok(ServerMessage::Win(field(parts, 2)))
}
