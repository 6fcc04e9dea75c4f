//! Field-wide state shared by both sides

use crate::compress::{Compress, compress_combine, part};
use crate::data::Ability;
use crate::generation::Generation;
use crate::types::conditions::{Countdown, Weather};

/// How long a weather lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherDuration {
    Turns(u8),
    Permanent,
}

/// Weather and field-wide countdowns for one battle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Environment {
    weather: Weather,
    weather_turns: Option<u8>,
    pub gravity: Countdown,
    pub trick_room: Countdown,
    pub magic_room: Countdown,
    pub mud_sport: Countdown,
    pub water_sport: Countdown,
}

impl Environment {
    pub const WEATHER_STANDARD: u8 = 5;
    /// Damp Rock, Heat Rock, Smooth Rock, Icy Rock
    pub const WEATHER_EXTENDED: u8 = 8;

    pub fn new() -> Self {
        Self::default()
    }

    /// Raw weather, ignoring Cloud Nine and Air Lock
    pub fn weather(&self) -> Weather {
        self.weather
    }

    /// Weather as it affects the battle: suppressed entirely while either
    /// active Pokemon has Cloud Nine or Air Lock
    pub fn effective_weather(&self, ability1: Ability, ability2: Ability) -> Weather {
        let blocks = |ability: Ability| matches!(ability, Ability::CloudNine | Ability::AirLock);
        if blocks(ability1) || blocks(ability2) {
            Weather::Clear
        } else {
            self.weather
        }
    }

    pub fn weather_duration(&self) -> WeatherDuration {
        match self.weather_turns {
            Some(turns) => WeatherDuration::Turns(turns),
            None => WeatherDuration::Permanent,
        }
    }

    /// Set weather from a move. Fails if that weather is already up.
    pub fn activate_weather_from_move(&mut self, weather: Weather, extended: bool) -> bool {
        if self.weather == weather {
            return false;
        }
        let turns = if extended {
            Self::WEATHER_EXTENDED
        } else {
            Self::WEATHER_STANDARD
        };
        self.set_weather(weather, WeatherDuration::Turns(turns));
        true
    }

    /// Weather from Drizzle and friends is permanent before gen 6
    pub fn activate_weather_from_ability(
        &mut self,
        generation: Generation,
        weather: Weather,
        extended: bool,
    ) {
        let duration = if generation <= Generation::Five {
            WeatherDuration::Permanent
        } else if extended {
            WeatherDuration::Turns(Self::WEATHER_EXTENDED)
        } else {
            WeatherDuration::Turns(Self::WEATHER_STANDARD)
        };
        if self.weather == weather && duration != WeatherDuration::Permanent {
            return;
        }
        self.set_weather(weather, duration);
    }

    pub fn set_weather(&mut self, weather: Weather, duration: WeatherDuration) {
        if let WeatherDuration::Turns(turns) = duration {
            assert!(turns <= Self::WEATHER_EXTENDED, "weather of {turns} turns");
        }
        self.weather = weather;
        self.weather_turns = match (weather, duration) {
            (Weather::Clear, _) => Some(0),
            (_, WeatherDuration::Turns(turns)) => Some(turns),
            (_, WeatherDuration::Permanent) => None,
        };
    }

    /// Count down weather and field effects at the end of the turn
    pub fn advance_one_turn(&mut self) {
        if let Some(turns) = self.weather_turns.as_mut() {
            *turns = turns.saturating_sub(1);
            if *turns == 0 {
                self.weather = Weather::Clear;
            }
        }
        self.gravity.decrement();
        self.trick_room.decrement();
        self.magic_room.decrement();
        self.mud_sport.decrement();
        self.water_sport.decrement();
    }

    pub fn gravity(&self) -> bool {
        self.gravity.is_active()
    }

    pub fn trick_room(&self) -> bool {
        self.trick_room.is_active()
    }

    pub fn magic_room(&self) -> bool {
        self.magic_room.is_active()
    }

    /// Trick Room toggles: using it while active ends it
    pub fn toggle_trick_room(&mut self) {
        if self.trick_room.is_active() {
            self.trick_room.deactivate();
        } else {
            self.trick_room.activate(5);
        }
    }
}

impl Environment {
    /// Turn counts 0 through the extended duration, plus permanent
    const WEATHER_TURNS: u128 = Self::WEATHER_EXTENDED as u128 + 2;
}

impl Compress for Environment {
    const CARDINALITY: u128 = Countdown::CARDINALITY.pow(5) * Weather::CARDINALITY * Self::WEATHER_TURNS;

    fn compress(&self) -> u128 {
        // Permanent weather takes the key past the longest duration
        let weather_turns = match self.weather_turns {
            None => Self::WEATHER_TURNS - 1,
            Some(turns) => u128::from(turns),
        };
        compress_combine(&[
            part(&self.trick_room),
            part(&self.gravity),
            part(&self.magic_room),
            part(&self.mud_sport),
            part(&self.water_sport),
            part(&self.weather),
            (weather_turns, Self::WEATHER_TURNS),
        ])
    }
}
