/// Commands the client sends to the server
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    /// /leave ROOMID
    LeaveRoom(String),

    /// /utm TEAM, with the team in packed format
    UpdateTeam(String),

    /// /search FORMAT
    Search(String),

    /// /choose CHOICE|RQID, e.g. `move 2` or `switch 4`
    Choose { choice: String, rqid: Option<u64> },

    /// /forfeit
    Forfeit,
}

impl ClientCommand {
    /// Serialize command to protocol format
    pub fn to_protocol_string(&self) -> String {
        match self {
            Self::LeaveRoom(room) => format!("/leave {}", room),
            Self::UpdateTeam(team) => format!("/utm {}", team),
            Self::Search(format) => format!("/search {}", format),
            Self::Choose { choice, rqid } => match rqid {
                Some(rqid) => format!("/choose {}|{}", choice, rqid),
                None => format!("/choose {}", choice),
            },
            Self::Forfeit => "/forfeit".to_string(),
        }
    }
}

/// Client message with optional room context
#[derive(Debug, Clone, PartialEq)]
pub struct ClientMessage {
    pub room_id: Option<String>,
    pub command: ClientCommand,
}

impl ClientMessage {
    pub fn new(room_id: impl Into<String>, command: ClientCommand) -> Self {
        Self {
            room_id: Some(room_id.into()),
            command,
        }
    }

    pub fn global(command: ClientCommand) -> Self {
        Self { room_id: None, command }
    }

    /// Serialize to wire format: ROOMID|TEXT or |TEXT
    pub fn to_wire_format(&self) -> String {
        let text = self.command.to_protocol_string();
        match &self.room_id {
            Some(room) => format!("{}|{}", room, text),
            None => format!("|{}", text),
        }
    }
}
