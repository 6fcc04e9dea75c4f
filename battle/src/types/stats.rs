//! Stat stages

use tactician_protocol::Stat;

use crate::compress::{Compress, compress_combine};

/// Stat stages (-6 to +6)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StatStages {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl StatStages {
    pub const MIN: i8 = -6;
    pub const MAX: i8 = 6;

    pub const ALL_STATS: [Stat; 7] = [
        Stat::Atk,
        Stat::Def,
        Stat::Spa,
        Stat::Spd,
        Stat::Spe,
        Stat::Accuracy,
        Stat::Evasion,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    /// Set stage for a stat (clamped to -6..+6)
    pub fn set(&mut self, stat: Stat, value: i8) {
        let clamped = value.clamp(Self::MIN, Self::MAX);
        match stat {
            Stat::Atk => self.atk = clamped,
            Stat::Def => self.def = clamped,
            Stat::Spa => self.spa = clamped,
            Stat::Spd => self.spd = clamped,
            Stat::Spe => self.spe = clamped,
            Stat::Accuracy => self.accuracy = clamped,
            Stat::Evasion => self.evasion = clamped,
        }
    }

    /// Apply a boost to a stat, returns actual change applied
    pub fn boost(&mut self, stat: Stat, amount: i8) -> i8 {
        let current = self.get(stat);
        let new_value = current.saturating_add(amount).clamp(Self::MIN, Self::MAX);
        self.set(stat, new_value);
        new_value - current
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Reset only negative stages to 0 (White Herb)
    pub fn clear_negative(&mut self) -> bool {
        let mut changed = false;
        for stat in Self::ALL_STATS {
            if self.get(stat) < 0 {
                self.set(stat, 0);
                changed = true;
            }
        }
        changed
    }

    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }

    /// Sum of positive stages, used by moves that scale with boosts
    pub fn positive_total(&self) -> u8 {
        Self::ALL_STATS
            .iter()
            .map(|stat| self.get(*stat).max(0) as u8)
            .sum()
    }

    /// Multiplier for atk/def/spa/spd/spe.
    /// +1 = 1.5x, +6 = 4x, -1 = 2/3x, -6 = 1/4x
    pub fn multiplier(stage: i8) -> f64 {
        let stage = f64::from(stage.clamp(Self::MIN, Self::MAX));
        if stage >= 0.0 {
            (2.0 + stage) / 2.0
        } else {
            2.0 / (2.0 - stage)
        }
    }

    /// Multiplier for accuracy and evasion, 3-based
    pub fn accuracy_multiplier(stage: i8) -> f64 {
        let stage = f64::from(stage.clamp(Self::MIN, Self::MAX));
        if stage >= 0.0 {
            (3.0 + stage) / 3.0
        } else {
            3.0 / (3.0 - stage)
        }
    }
}

impl Compress for StatStages {
    const CARDINALITY: u128 = 13u128.pow(7);

    fn compress(&self) -> u128 {
        let parts: Vec<(u128, u128)> = Self::ALL_STATS
            .iter()
            .map(|stat| ((self.get(*stat) - Self::MIN) as u128, 13))
            .collect();
        compress_combine(&parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stages_are_zero() {
        let stages = StatStages::new();
        assert!(stages.is_clear());
        assert_eq!(stages.compress(), compress_combine(&[(6, 13); 7]));
    }

    #[test]
    fn test_boost_returns_actual_change() {
        let mut stages = StatStages::new();
        assert_eq!(stages.boost(Stat::Atk, 2), 2);
        assert_eq!(stages.boost(Stat::Atk, 6), 4);
        // Already maxed
        assert_eq!(stages.boost(Stat::Atk, 1), 0);
        assert_eq!(stages.atk, 6);
        assert_eq!(stages.boost(Stat::Spe, -12), -6);
        assert_eq!(stages.spe, -6);
    }

    #[test]
    fn test_set_clamps() {
        let mut stages = StatStages::new();
        stages.set(Stat::Def, 10);
        assert_eq!(stages.def, 6);
        stages.set(Stat::Evasion, -10);
        assert_eq!(stages.evasion, -6);
    }

    #[test]
    fn test_clear_negative() {
        let mut stages = StatStages::new();
        stages.atk = -2;
        stages.spa = 3;
        assert!(stages.clear_negative());
        assert_eq!(stages.atk, 0);
        assert_eq!(stages.spa, 3);
        assert!(!stages.clear_negative());
    }

    #[test]
    fn test_multiplier() {
        assert_eq!(StatStages::multiplier(0), 1.0);
        assert_eq!(StatStages::multiplier(1), 1.5);
        assert_eq!(StatStages::multiplier(6), 4.0);
        assert_eq!(StatStages::multiplier(-2), 0.5);
        assert_eq!(StatStages::multiplier(-6), 0.25);
    }

    #[test]
    fn test_accuracy_multiplier() {
        assert_eq!(StatStages::accuracy_multiplier(0), 1.0);
        assert_eq!(StatStages::accuracy_multiplier(3), 2.0);
        assert_eq!(StatStages::accuracy_multiplier(-3), 0.5);
        assert_eq!(StatStages::accuracy_multiplier(6), 3.0);
    }

    #[test]
    fn test_positive_total() {
        let mut stages = StatStages::new();
        stages.atk = 2;
        stages.spe = 1;
        stages.def = -1;
        assert_eq!(stages.positive_total(), 3);
    }
}
