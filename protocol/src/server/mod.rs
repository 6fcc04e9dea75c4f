mod battle;
mod battle_init;
mod battle_major;
mod battle_minor;
mod battle_progress;
mod global;
mod request;
mod room;

pub use battle::{GameType, HpStatus, Ident, Player, PokemonDetails, Stat, StatusCode, effect_name};
pub use request::{ActivePokemon, BattleRequest, MoveSlot, PokemonStats, SideInfo, SidePokemon};

use anyhow::{Context, Result};

/// One `|`-separated server line. Only the messages a battling client acts
/// on are structured; everything else is kept as `Raw`.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    // Global
    Challstr(String),
    UpdateUser { username: String, named: bool },
    NameTaken { username: String, message: String },
    Popup(String),

    // Room
    Init(String),
    Title(String),
    Deinit,
    Error(String),

    // Battle initialization
    Player { player: Player, username: String, rating: Option<u32> },
    TeamSize { player: Player, size: u8 },
    GameType(GameType),
    Gen(u8),
    Tier(String),
    Rule(String),
    ClearPoke,
    Poke { player: Player, details: PokemonDetails },
    TeamPreview,
    Start,

    // Battle progress
    Request(Option<Box<BattleRequest>>),
    Upkeep,
    Turn(u32),
    Win(String),
    Tie,

    // Major actions
    Move {
        pokemon: Ident,
        move_name: String,
        target: Option<Ident>,
        miss: bool,
        /// Set when another effect called the move (`[from] Sleep Talk`)
        from: Option<String>,
    },
    Switch { pokemon: Ident, details: PokemonDetails, hp_status: Option<HpStatus> },
    Drag { pokemon: Ident, details: PokemonDetails, hp_status: Option<HpStatus> },
    Cant { pokemon: Ident, reason: String, move_name: Option<String> },
    Faint(Ident),

    // Minor actions
    Fail { pokemon: Ident, action: Option<String> },
    Miss { source: Ident, target: Option<Ident> },
    Damage { pokemon: Ident, hp_status: Option<HpStatus>, from: Option<String> },
    Heal { pokemon: Ident, hp_status: Option<HpStatus>, from: Option<String> },
    SetHp { pokemon: Ident, hp_status: Option<HpStatus> },
    Status { pokemon: Ident, status: StatusCode },
    CureStatus { pokemon: Ident, status: StatusCode },
    CureTeam(Ident),
    Boost { pokemon: Ident, stat: Stat, amount: i8 },
    Unboost { pokemon: Ident, stat: Stat, amount: i8 },
    SetBoost { pokemon: Ident, stat: Stat, amount: i8 },
    ClearAllBoost,
    ClearNegativeBoost(Ident),
    Weather { weather: String, upkeep: bool, from: Option<String> },
    FieldStart(String),
    FieldEnd(String),
    SideStart { player: Player, condition: String },
    SideEnd { player: Player, condition: String },
    VolatileStart { pokemon: Ident, effect: String },
    VolatileEnd { pokemon: Ident, effect: String },
    Crit(Ident),
    SuperEffective(Ident),
    Resisted(Ident),
    Immune(Ident),
    Item { pokemon: Ident, item: String, from: Option<String> },
    EndItem { pokemon: Ident, item: String, from: Option<String> },
    Ability { pokemon: Ident, ability: String, from: Option<String> },
    Activate { pokemon: Option<Ident>, effect: String },
    Prepare { pokemon: Ident, move_name: String },
    MustRecharge(Ident),
    SingleTurn { pokemon: Ident, effect: String },

    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerFrame {
    pub room_id: Option<String>,
    pub messages: Vec<ServerMessage>,
}

/// Parse a complete frame: an optional `>ROOMID` line followed by messages
pub fn parse_server_frame(frame: &str) -> Result<ServerFrame> {
    let mut lines = frame.lines().peekable();
    let room_id = lines
        .next_if(|line| line.starts_with('>'))
        .map(|line| line[1..].trim().to_string());

    let messages = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_server_message(line).with_context(|| format!("Failed to parse line {line:?}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(ServerFrame { room_id, messages })
}

/// Parse a single line from the server into a ServerMessage
pub fn parse_server_message(line: &str) -> Result<ServerMessage> {
    let line = line.trim();
    if !line.starts_with('|') {
        return Ok(ServerMessage::Raw(line.to_string()));
    }

    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 2 {
        return Ok(ServerMessage::Raw(line.to_string()));
    }

    match parts[1] {
        "challstr" => global::parse_challstr(&parts),
        "updateuser" => global::parse_updateuser(&parts),
        "nametaken" => global::parse_nametaken(&parts),
        "popup" => global::parse_popup(&parts),

        "init" => room::parse_init(&parts),
        "title" => room::parse_title(&parts),
        "deinit" => Ok(ServerMessage::Deinit),
        "error" => room::parse_error(&parts),

        "player" => battle_init::parse_player(&parts),
        "teamsize" => battle_init::parse_teamsize(&parts),
        "gametype" => battle_init::parse_gametype(&parts),
        "gen" => battle_init::parse_gen(&parts),
        "tier" => battle_init::parse_tier(&parts),
        "rule" => battle_init::parse_rule(&parts),
        "clearpoke" => Ok(ServerMessage::ClearPoke),
        "poke" => battle_init::parse_poke(&parts),
        "teampreview" => Ok(ServerMessage::TeamPreview),
        "start" => Ok(ServerMessage::Start),

        "request" => battle_progress::parse_request(&parts),
        "upkeep" => Ok(ServerMessage::Upkeep),
        "turn" => battle_progress::parse_turn(&parts),
        "win" => battle_progress::parse_win(&parts),
        "tie" => Ok(ServerMessage::Tie),

        "move" => battle_major::parse_move(&parts),
        "switch" => battle_major::parse_switch(&parts),
        "drag" => battle_major::parse_drag(&parts),
        "cant" => battle_major::parse_cant(&parts),
        "faint" => battle_major::parse_faint(&parts),

        "-fail" => battle_minor::parse_fail(&parts),
        "-miss" => battle_minor::parse_miss(&parts),
        "-damage" => battle_minor::parse_damage(&parts),
        "-heal" => battle_minor::parse_heal(&parts),
        "-sethp" => battle_minor::parse_sethp(&parts),
        "-status" => battle_minor::parse_status(&parts),
        "-curestatus" => battle_minor::parse_curestatus(&parts),
        "-cureteam" => battle_minor::parse_cureteam(&parts),
        "-boost" => battle_minor::parse_boost(&parts),
        "-unboost" => battle_minor::parse_unboost(&parts),
        "-setboost" => battle_minor::parse_setboost(&parts),
        "-clearallboost" => Ok(ServerMessage::ClearAllBoost),
        "-clearnegativeboost" => battle_minor::parse_clearnegativeboost(&parts),
        "-weather" => battle_minor::parse_weather(&parts),
        "-fieldstart" => battle_minor::parse_fieldstart(&parts),
        "-fieldend" => battle_minor::parse_fieldend(&parts),
        "-sidestart" => battle_minor::parse_sidestart(&parts),
        "-sideend" => battle_minor::parse_sideend(&parts),
        "-start" => battle_minor::parse_volatile_start(&parts),
        "-end" => battle_minor::parse_volatile_end(&parts),
        "-crit" => battle_minor::parse_crit(&parts),
        "-supereffective" => battle_minor::parse_supereffective(&parts),
        "-resisted" => battle_minor::parse_resisted(&parts),
        "-immune" => battle_minor::parse_immune(&parts),
        "-item" => battle_minor::parse_item(&parts),
        "-enditem" => battle_minor::parse_enditem(&parts),
        "-ability" => battle_minor::parse_ability(&parts),
        "-activate" => battle_minor::parse_activate(&parts),
        "-prepare" => battle_minor::parse_prepare(&parts),
        "-mustrecharge" => battle_minor::parse_mustrecharge(&parts),
        "-singleturn" => battle_minor::parse_singleturn(&parts),

        _ => Ok(ServerMessage::Raw(line.to_string())),
    }
}
