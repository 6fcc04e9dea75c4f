//! Types and generation-aware effectiveness

use std::fmt;

use crate::compress::Compress;
use crate::generation::Generation;

/// Elemental types. `Typeless` is only ever an attacking type (Curse,
/// Struggle from gen 5, Beat Up in gen 5+) and is neutral against everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Type {
    Normal = 0,
    Fire = 1,
    Water = 2,
    Electric = 3,
    Grass = 4,
    Ice = 5,
    Fighting = 6,
    Poison = 7,
    Ground = 8,
    Flying = 9,
    Psychic = 10,
    Bug = 11,
    Rock = 12,
    Ghost = 13,
    Dragon = 14,
    Dark = 15,
    Steel = 16,
    Fairy = 17,
    Typeless = 18,
}

impl Type {
    /// Every type that can appear on a Pokemon
    pub const ALL: [Type; 18] = [
        Type::Normal,
        Type::Fire,
        Type::Water,
        Type::Electric,
        Type::Grass,
        Type::Ice,
        Type::Fighting,
        Type::Poison,
        Type::Ground,
        Type::Flying,
        Type::Psychic,
        Type::Bug,
        Type::Rock,
        Type::Ghost,
        Type::Dragon,
        Type::Dark,
        Type::Steel,
        Type::Fairy,
    ];

    pub fn exists_in(self, generation: Generation) -> bool {
        match self {
            Type::Dark | Type::Steel => generation >= Generation::Two,
            Type::Fairy => generation >= Generation::Six,
            _ => true,
        }
    }

    /// Multiplier of this attacking type against one defending type
    pub fn effectiveness(self, defender: Type, generation: Generation) -> f64 {
        if self == Type::Typeless || defender == Type::Typeless {
            return 1.0;
        }
        match (generation, self, defender) {
            (Generation::One, Type::Ghost, Type::Psychic) => 0.0,
            (Generation::One, Type::Bug, Type::Poison) => 2.0,
            (Generation::One, Type::Poison, Type::Bug) => 2.0,
            (Generation::One, Type::Ice, Type::Fire) => 1.0,
            (generation, Type::Ghost | Type::Dark, Type::Steel) if generation <= Generation::Five => 0.5,
            _ => TYPE_CHART[self as usize][defender as usize],
        }
    }

    /// Product over all defending types
    pub fn effectiveness_multi(self, defenders: &[Type], generation: Generation) -> f64 {
        defenders
            .iter()
            .map(|defender| self.effectiveness(*defender, generation))
            .product()
    }

    /// Parse from protocol string (case-insensitive)
    pub fn from_protocol(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(Type::Normal),
            "fire" => Some(Type::Fire),
            "water" => Some(Type::Water),
            "electric" => Some(Type::Electric),
            "grass" => Some(Type::Grass),
            "ice" => Some(Type::Ice),
            "fighting" => Some(Type::Fighting),
            "poison" => Some(Type::Poison),
            "ground" => Some(Type::Ground),
            "flying" => Some(Type::Flying),
            "psychic" => Some(Type::Psychic),
            "bug" => Some(Type::Bug),
            "rock" => Some(Type::Rock),
            "ghost" => Some(Type::Ghost),
            "dragon" => Some(Type::Dragon),
            "dark" => Some(Type::Dark),
            "steel" => Some(Type::Steel),
            "fairy" => Some(Type::Fairy),
            "???" | "typeless" => Some(Type::Typeless),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Electric => "Electric",
            Type::Grass => "Grass",
            Type::Ice => "Ice",
            Type::Fighting => "Fighting",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Flying => "Flying",
            Type::Psychic => "Psychic",
            Type::Bug => "Bug",
            Type::Rock => "Rock",
            Type::Ghost => "Ghost",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Steel => "Steel",
            Type::Fairy => "Fairy",
            Type::Typeless => "???",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Compress for Type {
    const CARDINALITY: u128 = 19;

    fn compress(&self) -> u128 {
        *self as u128
    }
}

/// Gen 6+ chart. Row = attacking type, column = defending type, in
/// [`Type::ALL`] order. Older generations patch individual cells in
/// [`Type::effectiveness`].
#[rustfmt::skip]
pub static TYPE_CHART: [[f64; 18]; 18] = [
    // Normal
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 0.0, 1.0, 1.0, 0.5, 1.0],
    // Fire
    [1.0, 0.5, 0.5, 1.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 0.5, 1.0, 2.0, 1.0],
    // Water
    [1.0, 2.0, 0.5, 1.0, 0.5, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 1.0, 1.0],
    // Electric
    [1.0, 1.0, 2.0, 0.5, 0.5, 1.0, 1.0, 1.0, 0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0],
    // Grass
    [1.0, 0.5, 2.0, 1.0, 0.5, 1.0, 1.0, 0.5, 2.0, 0.5, 1.0, 0.5, 2.0, 1.0, 0.5, 1.0, 0.5, 1.0],
    // Ice
    [1.0, 0.5, 0.5, 1.0, 2.0, 0.5, 1.0, 1.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0],
    // Fighting
    [2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 0.5, 0.5, 0.5, 2.0, 0.0, 1.0, 2.0, 2.0, 0.5],
    // Poison
    [1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 0.5, 0.5, 1.0, 1.0, 1.0, 0.5, 0.5, 1.0, 1.0, 0.0, 2.0],
    // Ground
    [1.0, 2.0, 1.0, 2.0, 0.5, 1.0, 1.0, 2.0, 1.0, 0.0, 1.0, 0.5, 2.0, 1.0, 1.0, 1.0, 2.0, 1.0],
    // Flying
    [1.0, 1.0, 1.0, 0.5, 2.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 1.0, 1.0, 0.5, 1.0],
    // Psychic
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 1.0, 0.0, 0.5, 1.0],
    // Bug
    [1.0, 0.5, 1.0, 1.0, 2.0, 1.0, 0.5, 0.5, 1.0, 0.5, 2.0, 1.0, 1.0, 0.5, 1.0, 2.0, 0.5, 0.5],
    // Rock
    [1.0, 2.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 0.5, 2.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0],
    // Ghost
    [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 1.0],
    // Dragon
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 0.0],
    // Dark
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 0.5],
    // Steel
    [1.0, 0.5, 0.5, 0.5, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 0.5, 2.0],
    // Fairy
    [1.0, 0.5, 1.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 0.5, 1.0],
];

#[cfg(test)]
mod tests {
    use super::*;

    const MODERN: Generation = Generation::Eight;

    #[test]
    fn test_super_effective() {
        assert_eq!(Type::Fire.effectiveness(Type::Grass, MODERN), 2.0);
        assert_eq!(Type::Water.effectiveness(Type::Fire, MODERN), 2.0);
        assert_eq!(Type::Fighting.effectiveness(Type::Normal, MODERN), 2.0);
    }

    #[test]
    fn test_immune() {
        assert_eq!(Type::Normal.effectiveness(Type::Ghost, MODERN), 0.0);
        assert_eq!(Type::Electric.effectiveness(Type::Ground, MODERN), 0.0);
        assert_eq!(Type::Dragon.effectiveness(Type::Fairy, MODERN), 0.0);
    }

    #[test]
    fn test_multi() {
        // Fire vs Grass/Steel = 4x
        assert_eq!(Type::Fire.effectiveness_multi(&[Type::Grass, Type::Steel], MODERN), 4.0);
        // Fire vs Water/Rock = 0.25x
        assert_eq!(Type::Fire.effectiveness_multi(&[Type::Water, Type::Rock], MODERN), 0.25);
        // Ground vs Flying/Steel = 0x
        assert_eq!(Type::Ground.effectiveness_multi(&[Type::Flying, Type::Steel], MODERN), 0.0);
    }

    #[test]
    fn test_generation_one_quirks() {
        assert_eq!(Type::Ghost.effectiveness(Type::Psychic, Generation::One), 0.0);
        assert_eq!(Type::Ghost.effectiveness(Type::Psychic, Generation::Two), 2.0);
        assert_eq!(Type::Bug.effectiveness(Type::Poison, Generation::One), 2.0);
        assert_eq!(Type::Ice.effectiveness(Type::Fire, Generation::One), 1.0);
    }

    #[test]
    fn test_steel_resists_ghost_before_six() {
        assert_eq!(Type::Ghost.effectiveness(Type::Steel, Generation::Four), 0.5);
        assert_eq!(Type::Dark.effectiveness(Type::Steel, Generation::Five), 0.5);
        assert_eq!(Type::Ghost.effectiveness(Type::Steel, Generation::Six), 1.0);
    }

    #[test]
    fn test_typeless() {
        assert_eq!(Type::Typeless.effectiveness_multi(&[Type::Ghost], MODERN), 1.0);
    }

    #[test]
    fn test_exists_in() {
        assert!(!Type::Steel.exists_in(Generation::One));
        assert!(!Type::Fairy.exists_in(Generation::Five));
        assert!(Type::Fairy.exists_in(Generation::Six));
    }

    #[test]
    fn test_from_protocol() {
        assert_eq!(Type::from_protocol("FIRE"), Some(Type::Fire));
        assert_eq!(Type::from_protocol("???"), Some(Type::Typeless));
        assert_eq!(Type::from_protocol("unknown"), None);
    }
}
