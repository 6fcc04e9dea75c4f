//! Initial stat calculation and Hidden Power

use tactician_protocol::Stat;

use crate::data::{Nature, Species};
use crate::generation::Generation;
use crate::types::Type;

/// One value per permanent stat. Used for IVs (0-31) and EVs (0-252).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatValues {
    pub hp: u8,
    pub atk: u8,
    pub def: u8,
    pub spa: u8,
    pub spd: u8,
    pub spe: u8,
}

impl StatValues {
    pub const fn uniform(value: u8) -> Self {
        Self {
            hp: value,
            atk: value,
            def: value,
            spa: value,
            spd: value,
            spe: value,
        }
    }

    pub fn total(&self) -> u16 {
        [self.hp, self.atk, self.def, self.spa, self.spd, self.spe]
            .into_iter()
            .map(u16::from)
            .sum()
    }
}

/// IVs and EVs. Generations one and two store DVs, which are kept here as
/// `iv = 2 * dv` so every generation shares one formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spread {
    pub ivs: StatValues,
    pub evs: StatValues,
}

impl Spread {
    pub const MAX_IV: u8 = 31;
    pub const MAX_EV: u8 = 252;
    pub const MAX_EV_TOTAL: u16 = 510;

    /// Spread assumed for a Pokemon whose investment is unknown
    pub fn neutral(generation: Generation) -> Self {
        if generation.uses_dvs() {
            Self::from_dvs(15, 15, 15, 15)
        } else {
            Self {
                ivs: StatValues::uniform(Self::MAX_IV),
                evs: StatValues::uniform(84),
            }
        }
    }

    /// Build a spread from gen 1-2 DVs. The HP DV is made of the low bit of
    /// each other DV and special is shared by both special stats.
    pub fn from_dvs(atk: u8, def: u8, spe: u8, special: u8) -> Self {
        let hp = ((atk & 1) << 3) | ((def & 1) << 2) | ((spe & 1) << 1) | (special & 1);
        Self {
            ivs: StatValues {
                hp: hp * 2,
                atk: atk * 2,
                def: def * 2,
                spa: special * 2,
                spd: special * 2,
                spe: spe * 2,
            },
            evs: StatValues::uniform(Self::MAX_EV),
        }
    }

    fn dv(iv: u8) -> u8 {
        iv / 2
    }
}

/// Calculated stats before any in-battle modifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Stats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl Stats {
    pub fn calculate(
        generation: Generation,
        species: Species,
        level: u8,
        nature: Nature,
        spread: &Spread,
    ) -> Self {
        let base = species.base_stats(generation);
        let ivs = &spread.ivs;
        let evs = &spread.evs;
        // No natures before gen 3
        let tenths = |stat: Stat| {
            if generation.uses_dvs() {
                10
            } else {
                nature.tenths(stat)
            }
        };
        // The special DV covers both special stats
        let spd_iv = if generation.uses_dvs() { ivs.spa } else { ivs.spd };
        Self {
            hp: calculate_hp(species, base.hp, level, ivs.hp, evs.hp),
            atk: calculate_stat(base.atk, level, ivs.atk, evs.atk, tenths(Stat::Atk)),
            def: calculate_stat(base.def, level, ivs.def, evs.def, tenths(Stat::Def)),
            spa: calculate_stat(base.spa, level, ivs.spa, evs.spa, tenths(Stat::Spa)),
            spd: calculate_stat(base.spd, level, spd_iv, evs.spd, tenths(Stat::Spd)),
            spe: calculate_stat(base.spe, level, ivs.spe, evs.spe, tenths(Stat::Spe)),
        }
    }

    /// Non-HP stat by name. Accuracy and evasion have no base value.
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Accuracy | Stat::Evasion => {
                unreachable!("{stat:?} is not a calculated stat")
            }
        }
    }
}

fn core(base: u8, level: u8, iv: u8, ev: u8) -> u32 {
    (2 * u32::from(base) + u32::from(iv) + u32::from(ev) / 4) * u32::from(level) / 100
}

/// `(2 * base + iv + ev / 4) * level / 100 + level + 10`. Shedinja always
/// has 1 HP.
pub fn calculate_hp(species: Species, base: u8, level: u8, iv: u8, ev: u8) -> u16 {
    if species == Species::Shedinja {
        return 1;
    }
    let hp = core(base, level, iv, ev) + u32::from(level) + 10;
    u16::try_from(hp).unwrap_or(u16::MAX)
}

/// `((2 * base + iv + ev / 4) * level / 100 + 5) * nature`, where `nature` is
/// a multiplier in tenths
pub fn calculate_stat(base: u8, level: u8, iv: u8, ev: u8, nature_tenths: u32) -> u16 {
    let stat = (core(base, level, iv, ev) + 5) * nature_tenths / 10;
    u16::try_from(stat).unwrap_or(u16::MAX)
}

/// Type and power of Hidden Power, derived from the user's IVs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HiddenPower {
    pub move_type: Type,
    pub power: u8,
}

const HIDDEN_POWER_TYPES: [Type; 16] = [
    Type::Fighting,
    Type::Flying,
    Type::Poison,
    Type::Ground,
    Type::Rock,
    Type::Bug,
    Type::Ghost,
    Type::Steel,
    Type::Fire,
    Type::Water,
    Type::Grass,
    Type::Electric,
    Type::Psychic,
    Type::Ice,
    Type::Dragon,
    Type::Dark,
];

impl HiddenPower {
    pub fn new(generation: Generation, ivs: &StatValues) -> Self {
        if generation.uses_dvs() {
            return Self::from_dvs(ivs);
        }
        // Bit order is hp, atk, def, spe, spa, spd
        let ordered = [ivs.hp, ivs.atk, ivs.def, ivs.spe, ivs.spa, ivs.spd];
        let sum_of_bits = |bit: u8| -> u32 {
            ordered
                .iter()
                .enumerate()
                .map(|(index, iv)| u32::from((iv >> bit) & 1) << index)
                .sum()
        };
        let move_type = HIDDEN_POWER_TYPES[(sum_of_bits(0) * 15 / 63) as usize];
        let power = if generation >= Generation::Six {
            60
        } else {
            (sum_of_bits(1) * 40 / 63 + 30) as u8
        };
        Self { move_type, power }
    }

    fn from_dvs(ivs: &StatValues) -> Self {
        let atk = Spread::dv(ivs.atk);
        let def = Spread::dv(ivs.def);
        let spe = Spread::dv(ivs.spe);
        let special = Spread::dv(ivs.spa);
        let move_type = HIDDEN_POWER_TYPES[usize::from(4 * (atk % 4) + def % 4)];
        let top_bit = |dv: u8| u32::from(dv >> 3);
        let bits = top_bit(special) + 2 * top_bit(spe) + 4 * top_bit(def) + 8 * top_bit(atk);
        let power = (5 * bits + u32::from(special % 4)) / 2 + 31;
        Self {
            move_type,
            power: power as u8,
        }
    }
}
