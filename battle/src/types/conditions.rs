//! Weather, entry hazards, screens and Wish

use crate::compress::{Compress, compress_combine};
use crate::generation::Generation;

/// Weather conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Sun,
    Sand,
    Hail,
}

impl Weather {
    /// Parse from protocol string
    pub fn from_protocol(s: &str) -> Option<Self> {
        let normalized = s.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "sunnyday" | "sun" | "harshsunlight" => Some(Weather::Sun),
            "raindance" | "rain" => Some(Weather::Rain),
            "sandstorm" | "sand" => Some(Weather::Sand),
            "hail" => Some(Weather::Hail),
            "none" | "" => Some(Weather::Clear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Sun => "Sun",
            Weather::Rain => "Rain",
            Weather::Sand => "Sandstorm",
            Weather::Hail => "Hail",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Compress for Weather {
    const CARDINALITY: u128 = 5;

    fn compress(&self) -> u128 {
        *self as u128
    }
}

/// Spikes, Toxic Spikes and Stealth Rock on one side of the field. Which
/// hazards exist, and how many layers they stack to, depends on the
/// generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHazards {
    generation: Generation,
    spikes: u8,
    toxic_spikes: u8,
    stealth_rock: bool,
}

impl EntryHazards {
    pub fn new(generation: Generation) -> Self {
        Self {
            generation,
            spikes: 0,
            toxic_spikes: 0,
            stealth_rock: false,
        }
    }

    pub fn max_spikes(generation: Generation) -> u8 {
        match generation {
            Generation::One => 0,
            Generation::Two => 1,
            _ => 3,
        }
    }

    pub fn max_toxic_spikes(generation: Generation) -> u8 {
        if generation >= Generation::Four { 2 } else { 0 }
    }

    pub fn has_stealth_rock_move(generation: Generation) -> bool {
        generation >= Generation::Four
    }

    pub fn spikes(&self) -> u8 {
        self.spikes
    }

    pub fn toxic_spikes(&self) -> u8 {
        self.toxic_spikes
    }

    pub fn stealth_rock(&self) -> bool {
        self.stealth_rock
    }

    /// Returns whether a layer was added
    pub fn add_spikes(&mut self) -> bool {
        if self.spikes < Self::max_spikes(self.generation) {
            self.spikes += 1;
            true
        } else {
            false
        }
    }

    pub fn add_toxic_spikes(&mut self) -> bool {
        if self.toxic_spikes < Self::max_toxic_spikes(self.generation) {
            self.toxic_spikes += 1;
            true
        } else {
            false
        }
    }

    pub fn add_stealth_rock(&mut self) -> bool {
        if Self::has_stealth_rock_move(self.generation) && !self.stealth_rock {
            self.stealth_rock = true;
            true
        } else {
            false
        }
    }

    pub fn clear_spikes(&mut self) {
        self.spikes = 0;
    }

    pub fn clear_toxic_spikes(&mut self) {
        self.toxic_spikes = 0;
    }

    pub fn clear_stealth_rock(&mut self) {
        self.stealth_rock = false;
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.generation);
    }

    pub fn is_empty(&self) -> bool {
        self.spikes == 0 && self.toxic_spikes == 0 && !self.stealth_rock
    }

    /// Size of the compressed range for this generation's hazards
    pub fn cardinality(generation: Generation) -> u128 {
        let stealth_rock = if Self::has_stealth_rock_move(generation) { 2 } else { 1 };
        (u128::from(Self::max_spikes(generation)) + 1)
            * (u128::from(Self::max_toxic_spikes(generation)) + 1)
            * stealth_rock
    }

    pub fn compress(&self) -> u128 {
        let stealth_rock = if Self::has_stealth_rock_move(self.generation) { 2 } else { 1 };
        compress_combine(&[
            (
                u128::from(self.spikes),
                u128::from(Self::max_spikes(self.generation)) + 1,
            ),
            (
                u128::from(self.toxic_spikes),
                u128::from(Self::max_toxic_spikes(self.generation)) + 1,
            ),
            (u128::from(self.stealth_rock), stealth_rock),
        ])
    }
}

/// Countdown of a side-wide effect; 0 means inactive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Countdown(u8);

impl Countdown {
    /// Longest duration any effect starts with (Light Clay screens)
    pub const MAX: u8 = 8;

    pub fn activate(&mut self, turns: u8) -> bool {
        assert!(turns <= Self::MAX, "countdown of {turns} turns");
        if self.is_active() {
            return false;
        }
        self.0 = turns;
        true
    }

    pub fn is_active(self) -> bool {
        self.0 > 0
    }

    pub fn turns_remaining(self) -> u8 {
        self.0
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn deactivate(&mut self) {
        self.0 = 0;
    }
}

impl Compress for Countdown {
    const CARDINALITY: u128 = Countdown::MAX as u128 + 1;

    fn compress(&self) -> u128 {
        u128::from(self.0)
    }
}

/// Screens and other countdown effects protecting one side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Screens {
    pub light_screen: Countdown,
    pub reflect: Countdown,
    pub mist: Countdown,
    pub safeguard: Countdown,
    pub lucky_chant: Countdown,
    pub tailwind: Countdown,
}

impl Screens {
    pub const STANDARD: u8 = 5;
    /// Light Clay
    pub const EXTENDED: u8 = 8;

    pub fn tailwind_duration(generation: Generation) -> u8 {
        if generation == Generation::Four { 3 } else { 4 }
    }

    pub fn decrement(&mut self) {
        self.light_screen.decrement();
        self.reflect.decrement();
        self.mist.decrement();
        self.safeguard.decrement();
        self.lucky_chant.decrement();
        self.tailwind.decrement();
    }

    /// Brick Break, Defog and the gen 1 switch-out rule
    pub fn shatter(&mut self) {
        self.light_screen.deactivate();
        self.reflect.deactivate();
    }
}

impl Compress for Screens {
    const CARDINALITY: u128 = Countdown::CARDINALITY.pow(6);

    fn compress(&self) -> u128 {
        compress_combine(&[
            crate::compress::part(&self.light_screen),
            crate::compress::part(&self.reflect),
            crate::compress::part(&self.mist),
            crate::compress::part(&self.safeguard),
            crate::compress::part(&self.lucky_chant),
            crate::compress::part(&self.tailwind),
        ])
    }
}

/// A pending Wish. It heals whoever is active on the user's side at the
/// end of the turn after it was used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Wish(u8);

impl Wish {
    pub fn activate(&mut self) -> bool {
        if self.0 > 0 {
            return false;
        }
        self.0 = 2;
        true
    }

    pub fn is_active(self) -> bool {
        self.0 > 0
    }

    /// Returns true on the turn the wish comes true
    pub fn decrement(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        self.0 == 0
    }
}

/// Side conditions as named by the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideCondition {
    Spikes,
    ToxicSpikes,
    StealthRock,
    Reflect,
    LightScreen,
    Safeguard,
    Mist,
    Tailwind,
    LuckyChant,
}

impl SideCondition {
    /// Parse from protocol string, with or without a `move: ` prefix
    pub fn from_protocol(s: &str) -> Option<Self> {
        let clean = s.strip_prefix("move: ").unwrap_or(s);
        let normalized = clean.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "spikes" => Some(SideCondition::Spikes),
            "toxicspikes" => Some(SideCondition::ToxicSpikes),
            "stealthrock" => Some(SideCondition::StealthRock),
            "reflect" => Some(SideCondition::Reflect),
            "lightscreen" => Some(SideCondition::LightScreen),
            "safeguard" => Some(SideCondition::Safeguard),
            "mist" => Some(SideCondition::Mist),
            "tailwind" => Some(SideCondition::Tailwind),
            "luckychant" => Some(SideCondition::LuckyChant),
            _ => None,
        }
    }

    pub fn is_hazard(&self) -> bool {
        matches!(
            self,
            SideCondition::Spikes | SideCondition::ToxicSpikes | SideCondition::StealthRock
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_from_protocol() {
        assert_eq!(Weather::from_protocol("RainDance"), Some(Weather::Rain));
        assert_eq!(Weather::from_protocol("SunnyDay"), Some(Weather::Sun));
        assert_eq!(Weather::from_protocol("Sandstorm"), Some(Weather::Sand));
        assert_eq!(Weather::from_protocol("none"), Some(Weather::Clear));
        assert_eq!(Weather::from_protocol("Snow"), None);
    }

    #[test]
    fn test_spikes_bounded_by_generation() {
        let mut hazards = EntryHazards::new(Generation::Two);
        assert!(hazards.add_spikes());
        assert!(!hazards.add_spikes());
        assert_eq!(hazards.spikes(), 1);
        assert!(!hazards.add_toxic_spikes());
        assert!(!hazards.add_stealth_rock());

        let mut hazards = EntryHazards::new(Generation::Four);
        for _ in 0..5 {
            hazards.add_spikes();
            hazards.add_toxic_spikes();
        }
        assert_eq!(hazards.spikes(), 3);
        assert_eq!(hazards.toxic_spikes(), 2);
        assert!(hazards.add_stealth_rock());
        assert!(!hazards.add_stealth_rock());
    }

    #[test]
    fn test_no_spikes_in_generation_one() {
        let mut hazards = EntryHazards::new(Generation::One);
        assert!(!hazards.add_spikes());
        assert!(hazards.is_empty());
    }

    #[test]
    fn test_generation_two_hazards_compress_injectively() {
        let generation = Generation::Two;
        let mut seen = Vec::new();
        for layers in 0..=EntryHazards::max_spikes(generation) {
            let mut hazards = EntryHazards::new(generation);
            for _ in 0..layers {
                hazards.add_spikes();
            }
            let value = hazards.compress();
            assert!(value < 4);
            assert!(value < EntryHazards::cardinality(generation));
            assert!(!seen.contains(&value));
            seen.push(value);
        }
        assert_eq!(seen.len() as u128, EntryHazards::cardinality(generation));
    }

    #[test]
    fn test_generation_four_hazards_compress_injectively() {
        let generation = Generation::Four;
        let mut seen = Vec::new();
        for spikes in 0..=3 {
            for toxic_spikes in 0..=2 {
                for stealth_rock in [false, true] {
                    let mut hazards = EntryHazards::new(generation);
                    for _ in 0..spikes {
                        hazards.add_spikes();
                    }
                    for _ in 0..toxic_spikes {
                        hazards.add_toxic_spikes();
                    }
                    if stealth_rock {
                        hazards.add_stealth_rock();
                    }
                    seen.push(hazards.compress());
                }
            }
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len() as u128, EntryHazards::cardinality(generation));
        assert_eq!(seen.last().copied(), Some(EntryHazards::cardinality(generation) - 1));
    }

    #[test]
    fn test_countdown() {
        let mut screens = Screens::default();
        assert!(screens.reflect.activate(Screens::STANDARD));
        assert!(!screens.reflect.activate(Screens::EXTENDED));
        for _ in 0..4 {
            screens.decrement();
        }
        assert!(screens.reflect.is_active());
        screens.decrement();
        assert!(!screens.reflect.is_active());
    }

    #[test]
    fn test_countdown_compress_is_injective() {
        let keys: Vec<u128> = (0..=Countdown::MAX)
            .map(|turns| {
                let mut countdown = Countdown::default();
                countdown.activate(turns);
                countdown.compress()
            })
            .collect();
        let mut distinct = keys.clone();
        distinct.dedup();
        assert_eq!(distinct, keys);
        assert_eq!(keys.last().copied(), Some(Countdown::CARDINALITY - 1));
    }

    #[test]
    #[should_panic(expected = "countdown of 9 turns")]
    fn test_countdown_longer_than_max() {
        Countdown::default().activate(Countdown::MAX + 1);
    }

    #[test]
    fn test_shatter() {
        let mut screens = Screens::default();
        screens.light_screen.activate(Screens::STANDARD);
        screens.safeguard.activate(Screens::STANDARD);
        screens.shatter();
        assert!(!screens.light_screen.is_active());
        assert!(screens.safeguard.is_active());
    }

    #[test]
    fn test_wish_comes_true_next_turn() {
        let mut wish = Wish::default();
        assert!(wish.activate());
        assert!(!wish.activate());
        assert!(!wish.decrement());
        assert!(wish.decrement());
        assert!(!wish.is_active());
    }

    #[test]
    fn test_side_condition_from_protocol() {
        assert_eq!(
            SideCondition::from_protocol("move: Stealth Rock"),
            Some(SideCondition::StealthRock)
        );
        assert_eq!(SideCondition::from_protocol("Spikes"), Some(SideCondition::Spikes));
        assert!(SideCondition::ToxicSpikes.is_hazard());
        assert!(!SideCondition::Reflect.is_hazard());
    }
}
