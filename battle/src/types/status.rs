//! Major status conditions

use std::fmt;

use crate::compress::Compress;
use crate::data::Ability;
use crate::generation::Generation;
use tactician_protocol::server::StatusCode;

/// Non-volatile status. Only one is active at a time and it persists across
/// switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Clear,
    Burn,
    Freeze,
    Paralysis,
    Poison,
    /// `counter` is the number of turns of toxic damage taken so far
    Toxic { counter: u8 },
    /// `turns_slept` counts completed turns asleep (0..=4)
    Sleep { turns_slept: u8 },
    /// Self-inflicted sleep from Rest (0..=2)
    Rest { turns_slept: u8 },
}

/// Status without its counters, for applying effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusName {
    Clear,
    Burn,
    Freeze,
    Paralysis,
    Poison,
    Toxic,
    Sleep,
    Rest,
}

impl Status {
    pub fn new(name: StatusName) -> Self {
        match name {
            StatusName::Clear => Status::Clear,
            StatusName::Burn => Status::Burn,
            StatusName::Freeze => Status::Freeze,
            StatusName::Paralysis => Status::Paralysis,
            StatusName::Poison => Status::Poison,
            StatusName::Toxic => Status::Toxic { counter: 0 },
            StatusName::Sleep => Status::Sleep { turns_slept: 0 },
            StatusName::Rest => Status::Rest { turns_slept: 0 },
        }
    }

    pub fn name(&self) -> StatusName {
        match self {
            Status::Clear => StatusName::Clear,
            Status::Burn => StatusName::Burn,
            Status::Freeze => StatusName::Freeze,
            Status::Paralysis => StatusName::Paralysis,
            Status::Poison => StatusName::Poison,
            Status::Toxic { .. } => StatusName::Toxic,
            Status::Sleep { .. } => StatusName::Sleep,
            Status::Rest { .. } => StatusName::Rest,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Status::Clear)
    }

    pub fn is_sleeping(&self) -> bool {
        matches!(self, Status::Sleep { .. } | Status::Rest { .. })
    }

    pub fn is_poisoned(&self) -> bool {
        matches!(self, Status::Poison | Status::Toxic { .. })
    }

    /// Chance that this status clears before the Pokemon acts this turn.
    ///
    /// Sleep uses a per-turn wake chance that rises with the number of
    /// turns slept; Early Bird uses its own faster table. Gen 1 counts one
    /// turn fewer. Rest always lasts two turns (one in gen 1). Freeze thaws
    /// 20% of the time, except in gen 1 where it never thaws on its own.
    pub fn probability_of_clearing(&self, generation: Generation, ability: Ability) -> f64 {
        match *self {
            Status::Sleep { turns_slept } => {
                if ability == Ability::EarlyBird && generation.has_abilities() {
                    return match turns_slept {
                        0 => 1.0 / 4.0,
                        1 => 1.0 / 2.0,
                        2 => 2.0 / 3.0,
                        _ => 1.0,
                    };
                }
                let adjusted = if generation == Generation::One {
                    i32::from(turns_slept) - 1
                } else {
                    i32::from(turns_slept)
                };
                if adjusted <= 0 {
                    0.0
                } else if adjusted >= 4 {
                    1.0
                } else {
                    1.0 / f64::from(5 - adjusted)
                }
            }
            Status::Rest { turns_slept } => {
                let length = if generation == Generation::One { 1 } else { 2 };
                if turns_slept >= length { 1.0 } else { 0.0 }
            }
            Status::Freeze => {
                if generation == Generation::One {
                    0.0
                } else {
                    0.2
                }
            }
            _ => 0.0,
        }
    }

    /// Update the status at the start of an attempted move: either it
    /// clears, or sleep counters advance (twice as fast with Early Bird)
    pub fn advance_from_move(&mut self, ability: Ability, clear: bool) {
        if clear {
            *self = Status::Clear;
            return;
        }
        let step = if ability == Ability::EarlyBird { 2 } else { 1 };
        match self {
            Status::Sleep { turns_slept } => *turns_slept = (*turns_slept + step).min(4),
            Status::Rest { turns_slept } => *turns_slept = (*turns_slept + step).min(2),
            _ => {}
        }
    }

    /// Status named by `-status` or an HP string; `None` for fainted
    pub fn from_protocol(code: StatusCode) -> Option<Self> {
        match code {
            StatusCode::Burn => Some(Status::Burn),
            StatusCode::Freeze => Some(Status::Freeze),
            StatusCode::Paralysis => Some(Status::Paralysis),
            StatusCode::Poison => Some(Status::Poison),
            StatusCode::Toxic => Some(Status::Toxic { counter: 0 }),
            StatusCode::Sleep => Some(Status::Sleep { turns_slept: 0 }),
            StatusCode::Faint => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Clear => "",
            Status::Burn => "brn",
            Status::Freeze => "frz",
            Status::Paralysis => "par",
            Status::Poison => "psn",
            Status::Toxic { .. } => "tox",
            Status::Sleep { .. } | Status::Rest { .. } => "slp",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Clear => write!(f, "clear"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl Compress for Status {
    // Clear, Burn, Freeze, Paralysis, Poison, Toxic 0..=15, Sleep 0..=4, Rest 0..=2
    const CARDINALITY: u128 = 5 + 16 + 5 + 3;

    fn compress(&self) -> u128 {
        match *self {
            Status::Clear => 0,
            Status::Burn => 1,
            Status::Freeze => 2,
            Status::Paralysis => 3,
            Status::Poison => 4,
            Status::Toxic { counter } => 5 + u128::from(counter.min(15)),
            Status::Sleep { turns_slept } => 21 + u128::from(turns_slept.min(4)),
            Status::Rest { turns_slept } => 26 + u128::from(turns_slept.min(2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_wake_chance() {
        let asleep = |turns_slept| Status::Sleep { turns_slept };
        let generation = Generation::Four;
        assert_eq!(asleep(0).probability_of_clearing(generation, Ability::None), 0.0);
        assert_eq!(asleep(1).probability_of_clearing(generation, Ability::None), 0.25);
        assert_eq!(asleep(2).probability_of_clearing(generation, Ability::None), 1.0 / 3.0);
        assert_eq!(asleep(3).probability_of_clearing(generation, Ability::None), 0.5);
        assert_eq!(asleep(4).probability_of_clearing(generation, Ability::None), 1.0);
    }

    #[test]
    fn test_sleep_wake_chance_generation_one() {
        let asleep = Status::Sleep { turns_slept: 1 };
        assert_eq!(asleep.probability_of_clearing(Generation::One, Ability::None), 0.0);
        let asleep = Status::Sleep { turns_slept: 2 };
        assert_eq!(asleep.probability_of_clearing(Generation::One, Ability::None), 0.25);
    }

    #[test]
    fn test_early_bird() {
        let asleep = Status::Sleep { turns_slept: 0 };
        assert_eq!(asleep.probability_of_clearing(Generation::Four, Ability::EarlyBird), 0.25);
        let asleep = Status::Sleep { turns_slept: 2 };
        assert_eq!(asleep.probability_of_clearing(Generation::Four, Ability::EarlyBird), 2.0 / 3.0);
    }

    #[test]
    fn test_rest() {
        let rest = Status::Rest { turns_slept: 1 };
        assert_eq!(rest.probability_of_clearing(Generation::Three, Ability::None), 0.0);
        assert_eq!(rest.probability_of_clearing(Generation::One, Ability::None), 1.0);
        let rest = Status::Rest { turns_slept: 2 };
        assert_eq!(rest.probability_of_clearing(Generation::Three, Ability::None), 1.0);
    }

    #[test]
    fn test_freeze() {
        assert_eq!(Status::Freeze.probability_of_clearing(Generation::One, Ability::None), 0.0);
        assert_eq!(Status::Freeze.probability_of_clearing(Generation::Two, Ability::None), 0.2);
        assert_eq!(Status::Burn.probability_of_clearing(Generation::Two, Ability::None), 0.0);
    }

    #[test]
    fn test_advance_from_move() {
        let mut status = Status::Rest { turns_slept: 2 };
        status.advance_from_move(Ability::None, false);
        assert_eq!(status, Status::Rest { turns_slept: 2 });
        let mut status = Status::Sleep { turns_slept: 0 };
        status.advance_from_move(Ability::None, false);
        assert_eq!(status, Status::Sleep { turns_slept: 1 });
        status.advance_from_move(Ability::EarlyBird, false);
        assert_eq!(status, Status::Sleep { turns_slept: 3 });
        status.advance_from_move(Ability::None, true);
        assert_eq!(status, Status::Clear);
    }

    #[test]
    fn test_compress_distinct() {
        let all = [
            Status::Clear,
            Status::Burn,
            Status::Freeze,
            Status::Paralysis,
            Status::Poison,
            Status::Toxic { counter: 15 },
            Status::Sleep { turns_slept: 4 },
            Status::Rest { turns_slept: 2 },
        ];
        let mut values: Vec<u128> = all.iter().map(Compress::compress).collect();
        assert!(values.iter().all(|value| *value < Status::CARDINALITY));
        values.sort();
        values.dedup();
        assert_eq!(values.len(), all.len());
    }
}
