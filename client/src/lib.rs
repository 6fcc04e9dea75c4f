//! Glue between a battle server and the search
//!
//! The client reads raw server frames from a channel, keeps a tracked
//! [`Battle`](tactician_battle::Battle) per battle room, and answers each
//! decision request with the configured strategy's pick. It never opens a
//! socket itself: whatever owns the connection forwards frames in and wire
//! commands out.
//!
//! Logging in is left to the transport. Once the server reports a named
//! user, the client uploads its team and searches for a battle in the
//! configured format, and searches again whenever a battle ends.

mod connection;
mod manager;
mod sender;
mod settings;
mod state;

use anyhow::{Context, Result};
use tactician_protocol::{ClientCommand, ClientMessage, ServerMessage, parse_server_frame};
use tactician_search::{AllEvaluate, Strategy};
use tactician_team::to_packed;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub use connection::{ReconnectPolicy, Transport, run_with_reconnect};
pub use manager::BattleManager;
pub use sender::Sender;
pub use settings::{ClientSettings, TeamSource};
pub use state::ClientState;

const BATTLE_ROOM_PREFIX: &str = "battle-";

pub struct Client {
    settings: ClientSettings,
    manager: BattleManager,
    teams: TeamSource,
    state: ClientState,
}

impl Client {
    /// Load the evaluate weights and team named by `settings`
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let generation = settings.generation()?;
        let evaluate = AllEvaluate::load(&settings.evaluate)
            .with_context(|| format!("Failed to load {}", settings.evaluate.display()))?;
        let strategy = settings.strategy.build(evaluate);
        let teams = TeamSource::from_path(&settings.team, generation)
            .with_context(|| format!("Failed to load teams from {}", settings.team.display()))?;
        Self::with_parts(settings, strategy, teams)
    }

    pub fn with_parts(settings: ClientSettings, strategy: Box<dyn Strategy>, mut teams: TeamSource) -> Result<Self> {
        let team = teams.next_team().context("Failed to pick a team")?;
        Ok(Self {
            settings,
            manager: BattleManager::new(strategy, team),
            teams,
            state: ClientState::new(),
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn manager(&self) -> &BattleManager {
        &self.manager
    }

    /// Forget the session, for a fresh connection
    pub fn reset(&mut self) {
        self.manager.clear();
        self.state = ClientState::new();
    }

    /// Process frames until the server side of `incoming` closes
    pub async fn run(&mut self, mut incoming: mpsc::Receiver<String>, outgoing: mpsc::Sender<String>) -> Result<()> {
        let sender = Sender::new(outgoing);
        while let Some(raw) = incoming.recv().await {
            for message in self.handle_raw(&raw)? {
                sender.send(&message).await?;
            }
        }
        Ok(())
    }

    pub async fn run_with_reconnect<F, Fut>(&mut self, connect: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<Transport>>,
    {
        let policy = ReconnectPolicy::from_settings(&self.settings);
        run_with_reconnect(self, policy, connect).await
    }

    /// Handle one raw frame, returning the commands to send
    pub fn handle_raw(&mut self, raw: &str) -> Result<Vec<ClientMessage>> {
        let frame = match parse_server_frame(raw) {
            Ok(frame) => frame,
            Err(e) => {
                let room = raw.lines().next().and_then(|line| line.strip_prefix('>')).map(str::trim);
                return match room {
                    Some(room) if self.manager.is_battling(room) => {
                        error!("Unreadable frame in {}: {:#}", room, e);
                        let mut commands = self.manager.abandon(room);
                        commands.extend(self.search_again()?);
                        Ok(commands)
                    }
                    _ => {
                        warn!("Skipping unreadable frame: {:#}", e);
                        Ok(Vec::new())
                    }
                };
            }
        };

        match frame.room_id.as_deref() {
            Some(room) if room.starts_with(BATTLE_ROOM_PREFIX) => {
                let was_battling = self.manager.is_battling(room);
                let mut commands = self.manager.handle_frame(room, &frame.messages);
                if was_battling && !self.manager.is_battling(room) {
                    commands.extend(self.search_again()?);
                }
                Ok(commands)
            }
            _ => self.handle_global(&frame.messages),
        }
    }

    fn handle_global(&mut self, messages: &[ServerMessage]) -> Result<Vec<ClientMessage>> {
        let mut commands = Vec::new();
        for message in messages {
            match message {
                ServerMessage::Challstr(challstr) => self.state.challstr = Some(challstr.clone()),
                ServerMessage::UpdateUser { username, named } => {
                    self.state.username = Some(username.clone());
                    if *named && !self.state.logged_in {
                        info!("Logged in as {}", username);
                        self.state.logged_in = true;
                        if self.settings.search {
                            commands.extend(self.search()?);
                        }
                    }
                }
                ServerMessage::NameTaken { username, message } => warn!("Name {} taken: {}", username, message),
                ServerMessage::Popup(text) => info!("Popup: {}", text),
                _ => debug!("Ignoring {:?}", message),
            }
        }
        Ok(commands)
    }

    fn search_again(&mut self) -> Result<Vec<ClientMessage>> {
        if self.settings.search && self.state.logged_in {
            self.search()
        } else {
            Ok(Vec::new())
        }
    }

    /// Upload the next team and queue for a battle
    fn search(&mut self) -> Result<Vec<ClientMessage>> {
        let team = self.teams.next_team().context("Failed to pick a team")?;
        let packed = to_packed(&team);
        self.manager.set_team(team);
        info!("Searching for a {} battle", self.settings.format);
        Ok(vec![
            ClientMessage::global(ClientCommand::UpdateTeam(packed)),
            ClientMessage::global(ClientCommand::Search(self.settings.format.clone())),
        ])
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tactician_battle::{
        Ability, Gender, Generation, Item, KnownPokemon, KnownTeam, Move, MoveName, Nature, Species, Spread,
    };
    use tactician_search::MaxDamage;

    fn create_test_team() -> KnownTeam {
        let mut team = KnownTeam::new(Generation::Four, true);
        team.add(
            KnownPokemon::new(
                Generation::Four,
                Species::Jolteon,
                None,
                100,
                Gender::Male,
                Nature::Timid,
                Spread::neutral(Generation::Four),
                Ability::VoltAbsorb,
                Item::Leftovers,
                vec![Move::new(MoveName::Thunderbolt, Move::MAX_PP_UPS)],
            )
            .unwrap(),
        )
        .unwrap();
        team
    }

    pub(crate) fn create_test_client() -> Client {
        let settings =
            ClientSettings::from_json(r#"{"format": "gen4ou", "team": "t", "evaluate": "e", "reconnect_delay": 0}"#)
                .unwrap();
        Client::with_parts(settings, Box::new(MaxDamage), TeamSource::Fixed(create_test_team())).unwrap()
    }

    fn wire(commands: &[ClientMessage]) -> Vec<String> {
        commands.iter().map(ClientMessage::to_wire_format).collect()
    }

    #[test]
    fn test_login_starts_search() {
        let mut client = create_test_client();
        assert!(client.handle_raw("|challstr|4|abc").unwrap().is_empty());
        assert_eq!(client.state().challstr.as_deref(), Some("4|abc"));

        assert!(client.handle_raw("|updateuser| Guest 12|0|1").unwrap().is_empty());
        assert!(!client.state().logged_in);

        let sent = wire(&client.handle_raw("|updateuser| Tactician|1|1").unwrap());
        assert_eq!(sent.len(), 2);
        assert!(sent[0].starts_with("|/utm Jolteon||leftovers|voltabsorb|thunderbolt|Timid|"));
        assert_eq!(sent[1], "|/search gen4ou");
        assert_eq!(client.state().username.as_deref(), Some("Tactician"));

        // Already logged in
        assert!(client.handle_raw("|updateuser| Tactician|1|2").unwrap().is_empty());
    }

    #[test]
    fn test_finished_battle_searches_again() {
        let mut client = create_test_client();
        client.handle_raw("|updateuser| Tactician|1|1").unwrap();
        client.handle_raw(">battle-gen4ou-7\n|init|battle").unwrap();
        assert!(client.manager().is_battling("battle-gen4ou-7"));

        let sent = wire(&client.handle_raw(">battle-gen4ou-7\n|tie").unwrap());
        assert_eq!(sent, vec!["|/leave battle-gen4ou-7", sent[1].as_str(), "|/search gen4ou"]);
        assert!(sent[1].starts_with("|/utm "));
        assert_eq!(client.manager().active_battles(), 0);
    }

    #[test]
    fn test_unreadable_battle_frame_is_abandoned() {
        let mut client = create_test_client();
        client.handle_raw(">battle-gen4ou-7\n|init|battle").unwrap();
        let sent = wire(&client.handle_raw(">battle-gen4ou-7\n|turn|soon").unwrap());
        assert_eq!(sent, vec!["battle-gen4ou-7|/forfeit", "|/leave battle-gen4ou-7"]);

        // Frames for rooms without a battle are skipped
        assert!(client.handle_raw(">lobby\n|turn|soon").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_until_closed() {
        let mut client = create_test_client();
        let (frames, incoming) = mpsc::channel(4);
        let (outgoing, mut sent) = mpsc::channel(4);
        frames.send("|updateuser| Tactician|1|1".to_string()).await.unwrap();
        drop(frames);

        client.run(incoming, outgoing).await.unwrap();
        assert!(sent.recv().await.unwrap().starts_with("|/utm "));
        assert_eq!(sent.recv().await.as_deref(), Some("|/search gen4ou"));
        assert_eq!(sent.recv().await, None);

        client.reset();
        assert!(!client.state().logged_in);
    }
}
