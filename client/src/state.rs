/// What the client has learned about its own connection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    pub challstr: Option<String>,
    pub username: Option<String>,
    pub logged_in: bool,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }
}
