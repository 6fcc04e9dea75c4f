//! Static game data: species, moves, abilities, items and natures.
//!
//! The tables carry a representative competitive subset of each
//! generation rather than every entry in the games.

/// Declares a name enum with a display string per variant, name lookup,
/// parsing and compression
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $display:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $display,)*
                }
            }

            /// Lookup ignoring case, spaces and punctuation
            pub fn from_name(name: &str) -> Option<Self> {
                let wanted = crate::data::to_id(name);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| crate::data::to_id(value.as_str()) == wanted)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::BattleError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s).ok_or_else(|| crate::error::BattleError::UnknownName {
                    kind: stringify!($name),
                    value: s.to_string(),
                })
            }
        }

        impl crate::compress::Compress for $name {
            const CARDINALITY: u128 = $name::ALL.len() as u128;

            fn compress(&self) -> u128 {
                *self as u128
            }
        }
    };
}

mod ability;
mod item;
mod moves;
mod nature;
mod species;

pub use ability::Ability;
pub use item::Item;
pub use moves::{MoveCategory, MoveData, MoveName, MoveTarget};
pub use nature::Nature;
pub use species::{BaseStats, Species};

/// Showdown-style id: lowercase ASCII letters and digits only
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_id() {
        assert_eq!(to_id("Will-O-Wisp"), "willowisp");
        assert_eq!(to_id("Mr. Mime"), "mrmime");
        assert_eq!(to_id("Tapu Koko"), "tapukoko");
    }

    #[test]
    fn test_from_name_ignores_formatting() {
        assert_eq!(MoveName::from_name("will-o-wisp"), Some(MoveName::WillOWisp));
        assert_eq!(MoveName::from_name("U-turn"), Some(MoveName::UTurn));
        assert_eq!(Species::from_name("TAPU KOKO"), Some(Species::TapuKoko));
        assert_eq!(Item::from_name("choicescarf"), Some(Item::ChoiceScarf));
        assert_eq!(Ability::from_name("Shadow Tag"), Some(Ability::ShadowTag));
        assert_eq!(Nature::from_name("adamant"), Some(Nature::Adamant));
    }

    #[test]
    fn test_from_str_error() {
        let error = "Splishy Splash".parse::<MoveName>().unwrap_err();
        assert_eq!(error.to_string(), "Unknown MoveName: Splishy Splash");
    }
}
