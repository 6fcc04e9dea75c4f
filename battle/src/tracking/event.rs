//! What the server reported, with names resolved into game data

use tactician_protocol::{Player, Stat};

use crate::data::{Ability, Item, MoveName, Species};
use crate::types::{Gender, SideCondition, Status, Weather};

/// HP as reported: exact for the player's own Pokemon, a percentage of
/// `max` for the foe's
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HpReport {
    pub current: u16,
    pub max: u16,
}

/// A Pokemon entering the field
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchIn {
    pub player: Player,
    pub nickname: String,
    pub species: Species,
    pub level: u8,
    pub gender: Gender,
    pub hp: Option<HpReport>,
    pub status: Status,
}

/// Field-wide effects that start and end with their own messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEffect {
    Gravity,
    TrickRoom,
    MagicRoom,
    MudSport,
    WaterSport,
}

impl FieldEffect {
    pub fn from_protocol(name: &str) -> Option<Self> {
        match crate::data::to_id(name).as_str() {
            "gravity" => Some(FieldEffect::Gravity),
            "trickroom" => Some(FieldEffect::TrickRoom),
            "magicroom" => Some(FieldEffect::MagicRoom),
            "mudsport" => Some(FieldEffect::MudSport),
            "watersport" => Some(FieldEffect::WaterSport),
            _ => None,
        }
    }
}

/// Volatile conditions the tracker follows on the active Pokemon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Volatile {
    Confusion,
    Substitute,
    LeechSeed,
    Taunt,
    Encore,
    Yawn,
    PerishSong,
    Curse,
    Ingrain,
    AquaRing,
    MagnetRise,
    HealBlock,
    Torment,
    FocusEnergy,
    FlashFire,
    Stockpile,
}

impl Volatile {
    pub fn from_protocol(name: &str) -> Option<Self> {
        let id = crate::data::to_id(name);
        // perish3, stockpile2 and friends carry a count
        let id = id.trim_end_matches(|c: char| c.is_ascii_digit());
        match id {
            "confusion" => Some(Volatile::Confusion),
            "substitute" => Some(Volatile::Substitute),
            "leechseed" => Some(Volatile::LeechSeed),
            "taunt" => Some(Volatile::Taunt),
            "encore" => Some(Volatile::Encore),
            "yawn" => Some(Volatile::Yawn),
            "perish" => Some(Volatile::PerishSong),
            "curse" => Some(Volatile::Curse),
            "ingrain" => Some(Volatile::Ingrain),
            "aquaring" => Some(Volatile::AquaRing),
            "magnetrise" => Some(Volatile::MagnetRise),
            "healblock" => Some(Volatile::HealBlock),
            "torment" => Some(Volatile::Torment),
            "focusenergy" => Some(Volatile::FocusEnergy),
            "flashfire" => Some(Volatile::FlashFire),
            "stockpile" => Some(Volatile::Stockpile),
            _ => None,
        }
    }
}

/// Where a weather report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherSource {
    Move,
    Ability,
    /// The weather continues at the end of the turn
    Upkeep,
}

/// Where an HP change came from, for revealing the foe's item or ability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpSource {
    Direct,
    Item(Item),
    Ability(Ability),
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TeamSize { player: Player, size: usize },
    /// Generation announced by the server
    Generation(u8),
    /// Team preview lists a member before the battle starts
    TeamRevealed { player: Player, species: Species, level: u8, gender: Gender },
    Switch { switch_in: SwitchIn, dragged: bool },
    Move {
        player: Player,
        /// Move the server names; differs from the selection when Sleep
        /// Talk or a similar move calls another
        move_name: MoveName,
        called: bool,
        miss: bool,
    },
    /// Could not act this turn (sleep, paralysis, recharging)
    Cant(Player),
    CriticalHit(Player),
    Miss(Player),
    MoveFailed(Player),
    Hp { player: Player, hp: HpReport, source: HpSource },
    Status { player: Player, status: Status },
    CureStatus(Player),
    CureTeam(Player),
    Boost { player: Player, stat: Stat, amount: i8 },
    SetBoost { player: Player, stat: Stat, amount: i8 },
    ClearAllBoosts,
    ClearNegativeBoosts(Player),
    VolatileStart { player: Player, volatile: Volatile },
    VolatileEnd { player: Player, volatile: Volatile },
    SideStart { player: Player, condition: SideCondition },
    SideEnd { player: Player, condition: SideCondition },
    Weather { weather: Weather, source: WeatherSource },
    FieldStart(FieldEffect),
    FieldEnd(FieldEffect),
    ItemRevealed { player: Player, item: Item, tricked: bool },
    /// Consumed, or destroyed by Knock Off
    ItemLost { player: Player, item: Item, destroyed: bool },
    AbilityRevealed { player: Player, ability: Ability },
    Protect(Player),
    Charging { player: Player, move_name: MoveName },
    MustRecharge(Player),
    Faint(Player),
    /// All end-of-turn messages have been sent
    Upkeep,
    Turn(u32),
    Win(String),
    Tie,
}
