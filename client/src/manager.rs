//! Tracks every battle room the client is in and answers decision requests

use std::collections::HashMap;

use anyhow::{Context, Result};
use tactician_battle::data::to_id;
use tactician_battle::{
    Battle, BattleError, Choice, KnownTeam, MoveName, Outcome, Selection, Switch, Team, event_from_message,
    legal_selections,
};
use tactician_protocol::{BattleRequest, ClientCommand, ClientMessage, ServerMessage};
use tactician_search::Strategy;
use tracing::{debug, error, info, warn};

struct BattleRoom {
    battle: Battle,
    /// Latest request, kept until the log that follows it arrives
    request: Option<BattleRequest>,
}

pub struct BattleManager {
    strategy: Box<dyn Strategy>,
    /// Team used for the next battle that starts
    team: KnownTeam,
    battles: HashMap<String, BattleRoom>,
}

impl BattleManager {
    pub fn new(strategy: Box<dyn Strategy>, team: KnownTeam) -> Self {
        Self {
            strategy,
            team,
            battles: HashMap::new(),
        }
    }

    pub fn team(&self) -> &KnownTeam {
        &self.team
    }

    pub fn set_team(&mut self, team: KnownTeam) {
        self.team = team;
    }

    pub fn is_battling(&self, room: &str) -> bool {
        self.battles.contains_key(room)
    }

    pub fn battle(&self, room: &str) -> Option<&Battle> {
        self.battles.get(room).map(|state| &state.battle)
    }

    pub fn active_battles(&self) -> usize {
        self.battles.len()
    }

    /// Forget every battle, e.g. after losing the connection
    pub fn clear(&mut self) {
        self.battles.clear();
    }

    /// Feed one frame of room messages. Returns the commands to send back.
    ///
    /// A battle that fails is forfeited and left; other battles carry on.
    pub fn handle_frame(&mut self, room: &str, messages: &[ServerMessage]) -> Vec<ClientMessage> {
        match self.process(room, messages) {
            Ok(commands) => commands,
            Err(e) => {
                error!("Abandoning {}: {:#}", room, e);
                self.abandon(room)
            }
        }
    }

    /// Drop the battle in `room`, forfeiting it on the server
    pub fn abandon(&mut self, room: &str) -> Vec<ClientMessage> {
        self.battles.remove(room);
        vec![
            ClientMessage::new(room, ClientCommand::Forfeit),
            ClientMessage::global(ClientCommand::LeaveRoom(room.to_string())),
        ]
    }

    fn process(&mut self, room: &str, messages: &[ServerMessage]) -> Result<Vec<ClientMessage>> {
        let mut logged = false;
        let mut turn_ended = false;
        for message in messages {
            match message {
                ServerMessage::Init(kind) if kind == "battle" => {
                    if !self.battles.contains_key(room) {
                        info!("Joined {}", room);
                        let battle = Battle::new(self.team.clone());
                        self.battles.insert(room.to_string(), BattleRoom { battle, request: None });
                    }
                    continue;
                }
                ServerMessage::Deinit => {
                    debug!("Left {}", room);
                    self.battles.remove(room);
                    return Ok(Vec::new());
                }
                _ => {}
            }

            // Rooms we did not join as a player, e.g. spectated battles
            let Some(state) = self.battles.get_mut(room) else {
                continue;
            };
            match message {
                ServerMessage::Request(Some(request)) => {
                    // Switches can only be placed once the AI's side is known
                    if state.battle.perspective().is_none() {
                        if let Some(player) = request.side.as_ref().and_then(|side| side.player()) {
                            state.battle.set_perspective(player)?;
                        }
                    }
                    state.request = Some(request.as_ref().clone());
                    continue;
                }
                ServerMessage::Request(None) => continue,
                ServerMessage::Error(text) => warn!("{}: {}", room, text),
                ServerMessage::Turn(_) => turn_ended = true,
                _ => {}
            }
            logged = true;
            if let Some(event) = event_from_message(message)? {
                state
                    .battle
                    .apply(&event)
                    .with_context(|| format!("Could not apply {message:?}"))?;
            }
        }

        let Some(state) = self.battles.get_mut(room) else {
            return Ok(Vec::new());
        };
        if let Some(outcome) = state.battle.outcome() {
            match outcome {
                Outcome::Winner(name) => info!("{} won {} on turn {}", name, room, state.battle.turn()),
                Outcome::Tie => info!("{} ended in a tie", room),
            }
            self.battles.remove(room);
            return Ok(vec![ClientMessage::global(ClientCommand::LeaveRoom(room.to_string()))]);
        }

        let ready = match &state.request {
            Some(request) if !request.needs_decision() => {
                state.request = None;
                false
            }
            Some(request) => logged && (turn_ended || request.team_preview || request.is_force_switch()),
            None => false,
        };
        if !ready {
            return Ok(Vec::new());
        }
        let Some(request) = state.request.take() else {
            return Ok(Vec::new());
        };
        let choice = decide(self.strategy.as_ref(), &mut state.battle, &request)?;
        info!("{} turn {}: {}", room, state.battle.turn(), choice);
        Ok(vec![ClientMessage::new(
            room,
            ClientCommand::Choose {
                choice,
                rqid: request.rqid,
            },
        )])
    }
}

/// Pick a selection for `request` and write it the way the server expects
fn decide(strategy: &dyn Strategy, battle: &mut Battle, request: &BattleRequest) -> Result<String> {
    if request.team_preview {
        // Lead with the team in file order
        let size = request.side.as_ref().map_or(0, |side| side.pokemon.len());
        if size == 0 {
            return Ok("default".to_string());
        }
        let order: String = (1..=size).map(|slot| slot.to_string()).collect();
        return Ok(format!("team {order}"));
    }
    battle.apply_request(request)?;
    let snapshot = battle.snapshot()?;
    let (ai_selections, foe_selections) = if request.is_force_switch() {
        (replacements(&snapshot.ai)?, vec![Selection::Pass])
    } else {
        let mut ai_selections = legal_selections(&snapshot.ai, &snapshot.foe, &snapshot.environment);
        // The server knows about trapping abilities the foe has not revealed
        if request.is_trapped() && ai_selections.iter().any(|selection| !selection.is_switch()) {
            ai_selections.retain(|selection| !selection.is_switch());
        }
        (
            ai_selections,
            legal_selections(&snapshot.foe, &snapshot.ai, &snapshot.environment),
        )
    };
    debug!("Selections {:?} against {:?}", ai_selections, foe_selections);
    let selection = strategy
        .select(
            &snapshot.ai,
            &ai_selections,
            &snapshot.foe,
            &foe_selections,
            &snapshot.environment,
        )
        .user
        .best()
        .context("Strategy gave no selection")?;
    Ok(to_choice(selection, battle, request)?.to_string())
}

fn replacements(team: &Team) -> Result<Vec<Selection>, BattleError> {
    let selections = team
        .bench()
        .map(|(index, _)| Switch::new(index, team.size()).map(Selection::Switch))
        .collect::<Result<Vec<_>, _>>()?;
    if selections.is_empty() {
        return Err(BattleError::InvalidSelection("nothing left to switch in".to_string()));
    }
    Ok(selections)
}

fn slot_matches(slot: &str, name: MoveName) -> bool {
    let id = to_id(slot);
    match name {
        MoveName::HiddenPower => id.starts_with("hiddenpower"),
        _ => id == to_id(name.as_str()),
    }
}

/// Server slots are 1-based and follow the request, not the team file
fn to_choice(selection: Selection, battle: &Battle, request: &BattleRequest) -> Result<Choice, BattleError> {
    match selection {
        Selection::Pass => Ok(Choice::Pass),
        Selection::Move(name) => {
            let slots = request.active_moves();
            match slots.iter().position(|slot| slot_matches(&slot.name, name)) {
                Some(index) => Ok(Choice::Move(index + 1)),
                // Struggle and recharge turns are offered as the only slot
                None if name == MoveName::Struggle && !slots.is_empty() => Ok(Choice::Move(1)),
                None => Err(BattleError::InvalidSelection(format!("{name} is not in the request"))),
            }
        }
        Selection::Switch(switch) => {
            let member = battle
                .ai()
                .get(switch.index())
                .ok_or_else(|| BattleError::InvalidSelection(format!("no member at {}", switch.index())))?;
            let name = member.name();
            let side = request
                .side
                .as_ref()
                .ok_or_else(|| BattleError::InvalidSelection("request has no side".to_string()))?;
            side.pokemon
                .iter()
                .position(|reported| reported.ident.split_once(": ").map(|(_, ident)| ident) == Some(name.as_str()))
                .map(|index| Choice::Switch(index + 1))
                .ok_or(BattleError::UnknownPokemon(name))
        }
    }
}
