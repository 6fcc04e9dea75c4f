//! The JSON body of `|request|`: what the server needs decided next and
//! the exact state of the player's own team

use super::battle::{HpStatus, Player, PokemonDetails};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    /// Echoed back with `/choose` so stale decisions are rejected
    pub rqid: Option<u64>,

    #[serde(default)]
    pub active: Option<Vec<ActivePokemon>>,

    pub side: Option<SideInfo>,

    #[serde(default)]
    pub force_switch: Option<Vec<bool>>,

    #[serde(default)]
    pub team_preview: bool,

    #[serde(default)]
    pub wait: bool,
}

impl BattleRequest {
    pub fn needs_decision(&self) -> bool {
        !self.wait && (self.team_preview || self.is_force_switch() || self.active.is_some())
    }

    pub fn is_force_switch(&self) -> bool {
        self.force_switch.as_ref().is_some_and(|slots| slots.iter().any(|&b| b))
    }

    /// The single active Pokemon's move slots
    pub fn active_moves(&self) -> &[MoveSlot] {
        self.active
            .as_ref()
            .and_then(|active| active.first())
            .map(|active| active.moves.as_slice())
            .unwrap_or_default()
    }

    pub fn is_trapped(&self) -> bool {
        self.active
            .as_ref()
            .and_then(|active| active.first())
            .is_some_and(|active| active.trapped || active.maybe_trapped)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePokemon {
    #[serde(default)]
    pub moves: Vec<MoveSlot>,

    #[serde(default)]
    pub trapped: bool,

    #[serde(default)]
    pub maybe_trapped: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub name: String,

    pub id: String,

    /// Missing for locked-in moves such as Outrage or Struggle
    #[serde(default)]
    pub pp: Option<u8>,

    #[serde(default, rename = "maxpp")]
    pub max_pp: Option<u8>,

    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SideInfo {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub pokemon: Vec<SidePokemon>,
}

impl SideInfo {
    pub fn player(&self) -> Option<Player> {
        Player::parse(&self.id)
    }
}

/// A member of the player's own team, in the server's team order
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePokemon {
    pub ident: String,
    pub details: String,
    pub condition: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub stats: PokemonStats,
    /// Move ids, lowercase without spaces
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub base_ability: String,
    #[serde(default)]
    pub item: String,
}

impl SidePokemon {
    pub fn details(&self) -> PokemonDetails {
        PokemonDetails::parse(&self.details)
    }

    pub fn condition(&self) -> Option<HpStatus> {
        HpStatus::parse(&self.condition)
    }

    pub fn is_fainted(&self) -> bool {
        self.condition().is_some_and(|hp| hp.is_fainted())
    }
}

/// Calculated stats other than HP, which comes from the condition
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct PokemonStats {
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}
