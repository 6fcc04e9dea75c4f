//! Translation from parsed server messages into tracker events

use std::str::FromStr;

use tactician_protocol::server::StatusCode;
use tactician_protocol::{HpStatus, PokemonDetails, ServerMessage, effect_name};

use super::event::{Event, FieldEffect, HpReport, HpSource, SwitchIn, Volatile, WeatherSource};
use crate::data::{Ability, Item, MoveName, Species};
use crate::error::BattleError;
use crate::types::{Gender, SideCondition, Status, Weather};

fn lookup<T: FromStr<Err = BattleError>>(name: &str) -> Result<T, BattleError> {
    effect_name(name).parse()
}

fn hp_report(hp_status: &HpStatus) -> HpReport {
    HpReport {
        current: hp_status.current,
        max: hp_status.max.unwrap_or(100),
    }
}

fn status_of(hp_status: Option<&HpStatus>) -> Status {
    hp_status
        .and_then(|hp| hp.status)
        .and_then(Status::from_protocol)
        .unwrap_or_default()
}

fn hp_source(from: Option<&str>) -> HpSource {
    let Some(from) = from else {
        return HpSource::Direct;
    };
    if let Some(item) = from.strip_prefix("item: ") {
        return Item::from_name(item).map_or(HpSource::Other, HpSource::Item);
    }
    if let Some(ability) = from.strip_prefix("ability: ") {
        return Ability::from_name(ability).map_or(HpSource::Other, HpSource::Ability);
    }
    HpSource::Other
}

fn switch_in(
    pokemon: &tactician_protocol::Ident,
    details: &PokemonDetails,
    hp_status: Option<&HpStatus>,
) -> Result<SwitchIn, BattleError> {
    Ok(SwitchIn {
        player: pokemon.player,
        nickname: pokemon.name.clone(),
        species: lookup(&details.species)?,
        level: details.level(),
        gender: Gender::from_protocol(details.gender),
        hp: hp_status.map(hp_report),
        status: status_of(hp_status),
    })
}

/// The event a message reports, if the tracker follows it. Messages about
/// effects the battle model does not track produce `None`.
pub fn event_from_message(message: &ServerMessage) -> Result<Option<Event>, BattleError> {
    let event = match message {
        ServerMessage::TeamSize { player, size } => Event::TeamSize {
            player: *player,
            size: usize::from(*size),
        },
        ServerMessage::Gen(generation) => Event::Generation(*generation),
        ServerMessage::Poke { player, details } => Event::TeamRevealed {
            player: *player,
            species: lookup::<Species>(&details.species)?,
            level: details.level(),
            gender: Gender::from_protocol(details.gender),
        },

        ServerMessage::Switch {
            pokemon,
            details,
            hp_status,
        } => Event::Switch {
            switch_in: switch_in(pokemon, details, hp_status.as_ref())?,
            dragged: false,
        },
        ServerMessage::Drag {
            pokemon,
            details,
            hp_status,
        } => Event::Switch {
            switch_in: switch_in(pokemon, details, hp_status.as_ref())?,
            dragged: true,
        },
        ServerMessage::Move {
            pokemon,
            move_name,
            miss,
            from,
            ..
        } => Event::Move {
            player: pokemon.player,
            move_name: lookup::<MoveName>(move_name)?,
            called: from.is_some(),
            miss: *miss,
        },
        ServerMessage::Cant { pokemon, .. } => Event::Cant(pokemon.player),
        ServerMessage::Faint(pokemon) => Event::Faint(pokemon.player),

        ServerMessage::Fail { pokemon, .. } => Event::MoveFailed(pokemon.player),
        ServerMessage::Miss { source, .. } => Event::Miss(source.player),
        ServerMessage::Crit(pokemon) => Event::CriticalHit(pokemon.player),
        ServerMessage::Damage {
            pokemon,
            hp_status,
            from,
        }
        | ServerMessage::Heal {
            pokemon,
            hp_status,
            from,
        } => match hp_status {
            Some(hp_status) => Event::Hp {
                player: pokemon.player,
                hp: hp_report(hp_status),
                source: hp_source(from.as_deref()),
            },
            None => return Ok(None),
        },
        ServerMessage::SetHp { pokemon, hp_status } => match hp_status {
            Some(hp_status) => Event::Hp {
                player: pokemon.player,
                hp: hp_report(hp_status),
                source: HpSource::Other,
            },
            None => return Ok(None),
        },
        ServerMessage::Status { pokemon, status } => match Status::from_protocol(*status) {
            Some(status) => Event::Status {
                player: pokemon.player,
                status,
            },
            None => return Ok(None),
        },
        ServerMessage::CureStatus { pokemon, status } if *status != StatusCode::Faint => {
            Event::CureStatus(pokemon.player)
        }
        ServerMessage::CureTeam(pokemon) => Event::CureTeam(pokemon.player),
        ServerMessage::Boost { pokemon, stat, amount } => Event::Boost {
            player: pokemon.player,
            stat: *stat,
            amount: *amount,
        },
        ServerMessage::Unboost { pokemon, stat, amount } => Event::Boost {
            player: pokemon.player,
            stat: *stat,
            amount: -*amount,
        },
        ServerMessage::SetBoost { pokemon, stat, amount } => Event::SetBoost {
            player: pokemon.player,
            stat: *stat,
            amount: *amount,
        },
        ServerMessage::ClearAllBoost => Event::ClearAllBoosts,
        ServerMessage::ClearNegativeBoost(pokemon) => Event::ClearNegativeBoosts(pokemon.player),

        ServerMessage::VolatileStart { pokemon, effect } => match Volatile::from_protocol(effect) {
            Some(volatile) => Event::VolatileStart {
                player: pokemon.player,
                volatile,
            },
            None => return Ok(None),
        },
        ServerMessage::VolatileEnd { pokemon, effect } => match Volatile::from_protocol(effect) {
            Some(volatile) => Event::VolatileEnd {
                player: pokemon.player,
                volatile,
            },
            None => return Ok(None),
        },
        ServerMessage::SideStart { player, condition } => match SideCondition::from_protocol(condition) {
            Some(condition) => Event::SideStart {
                player: *player,
                condition,
            },
            None => return Ok(None),
        },
        ServerMessage::SideEnd { player, condition } => match SideCondition::from_protocol(condition) {
            Some(condition) => Event::SideEnd {
                player: *player,
                condition,
            },
            None => return Ok(None),
        },
        ServerMessage::Weather { weather, upkeep, from } => {
            let parsed = Weather::from_protocol(weather).ok_or_else(|| BattleError::UnknownName {
                kind: "Weather",
                value: weather.clone(),
            })?;
            let source = if *upkeep {
                WeatherSource::Upkeep
            } else if from.as_deref().is_some_and(|from| from.starts_with("ability:")) {
                WeatherSource::Ability
            } else {
                WeatherSource::Move
            };
            Event::Weather {
                weather: parsed,
                source,
            }
        }
        ServerMessage::FieldStart(effect) => match FieldEffect::from_protocol(effect) {
            Some(effect) => Event::FieldStart(effect),
            None => return Ok(None),
        },
        ServerMessage::FieldEnd(effect) => match FieldEffect::from_protocol(effect) {
            Some(effect) => Event::FieldEnd(effect),
            None => return Ok(None),
        },

        ServerMessage::Item { pokemon, item, from } => Event::ItemRevealed {
            player: pokemon.player,
            item: lookup(item)?,
            tricked: from
                .as_deref()
                .is_some_and(|from| matches!(effect_name(from), "Trick" | "Switcheroo")),
        },
        ServerMessage::EndItem { pokemon, item, from } => Event::ItemLost {
            player: pokemon.player,
            item: lookup(item)?,
            destroyed: from.as_deref().is_some_and(|from| effect_name(from) == "Knock Off"),
        },
        ServerMessage::Ability { pokemon, ability, .. } => Event::AbilityRevealed {
            player: pokemon.player,
            ability: lookup(ability)?,
        },
        ServerMessage::SingleTurn { pokemon, effect }
            if matches!(effect.as_str(), "Protect" | "Detect" | "Endure") =>
        {
            Event::Protect(pokemon.player)
        }
        ServerMessage::Prepare { pokemon, move_name } => Event::Charging {
            player: pokemon.player,
            move_name: lookup(move_name)?,
        },
        ServerMessage::MustRecharge(pokemon) => Event::MustRecharge(pokemon.player),

        ServerMessage::Upkeep => Event::Upkeep,
        ServerMessage::Turn(turn) => Event::Turn(*turn),
        ServerMessage::Win(winner) => Event::Win(winner.clone()),
        ServerMessage::Tie => Event::Tie,

        _ => return Ok(None),
    };
    Ok(Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactician_protocol::{Player, parse_server_message};

    fn event(line: &str) -> Option<Event> {
        event_from_message(&parse_server_message(line).unwrap()).unwrap()
    }

    #[test]
    fn test_switch_event() {
        let Some(Event::Switch { switch_in, dragged }) = event("|switch|p2a: Ttar|Tyranitar, L80, M|75/100 par") else {
            panic!("expected a switch");
        };
        assert!(!dragged);
        assert_eq!(switch_in.player, Player::P2);
        assert_eq!(switch_in.nickname, "Ttar");
        assert_eq!(switch_in.species, Species::Tyranitar);
        assert_eq!(switch_in.level, 80);
        assert_eq!(switch_in.hp, Some(HpReport { current: 75, max: 100 }));
        assert_eq!(switch_in.status, Status::Paralysis);
    }

    #[test]
    fn test_unboost_is_negative() {
        assert_eq!(
            event("|-unboost|p1a: Gyarados|atk|1"),
            Some(Event::Boost {
                player: Player::P1,
                stat: tactician_protocol::Stat::Atk,
                amount: -1,
            })
        );
    }

    #[test]
    fn test_hp_source_reveals_item() {
        assert_eq!(
            event("|-heal|p2a: Snorlax|56/100|[from] item: Leftovers"),
            Some(Event::Hp {
                player: Player::P2,
                hp: HpReport { current: 56, max: 100 },
                source: HpSource::Item(Item::Leftovers),
            })
        );
    }

    #[test]
    fn test_called_move() {
        assert_eq!(
            event("|move|p2a: Snorlax|Body Slam|p1a: Gyarados|[from]Sleep Talk"),
            Some(Event::Move {
                player: Player::P2,
                move_name: MoveName::BodySlam,
                called: true,
                miss: false,
            })
        );
    }

    #[test]
    fn test_weather_sources() {
        assert_eq!(
            event("|-weather|Sandstorm|[upkeep]"),
            Some(Event::Weather {
                weather: Weather::Sand,
                source: WeatherSource::Upkeep,
            })
        );
        assert_eq!(
            event("|-weather|RainDance|[from] ability: Drizzle|[of] p1a: Politoed"),
            Some(Event::Weather {
                weather: Weather::Rain,
                source: WeatherSource::Ability,
            })
        );
        assert_eq!(
            event("|-weather|none"),
            Some(Event::Weather {
                weather: Weather::Clear,
                source: WeatherSource::Move,
            })
        );
    }

    #[test]
    fn test_untracked_messages() {
        assert_eq!(event("|-activate|p1a: Skarmory|move: Protect"), None);
        assert_eq!(event("|-start|p1a: Skarmory|typechange|Fire"), None);
        assert_eq!(event("|j|someone"), None);
    }

    #[test]
    fn test_unknown_move_is_an_error() {
        let message = parse_server_message("|move|p1a: Mew|Splash Dance Deluxe|").unwrap();
        assert!(matches!(
            event_from_message(&message),
            Err(BattleError::UnknownName { kind: "MoveName", .. })
        ));
    }
}
