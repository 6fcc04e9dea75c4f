//! Team files for tactician
//!
//! Three formats load into a [`KnownTeam`] for a given generation:
//!
//! - Showdown's export text ([`export`])
//! - Showdown's packed single-line format ([`packed`])
//! - a JSON document ([`json`])
//!
//! ```ignore
//! use tactician_battle::Generation;
//! use tactician_team::load_team;
//!
//! let team = load_team("teams/gen4/rain.txt", Generation::Four)?;
//! ```

pub mod error;
pub mod export;
pub mod json;
pub mod load;
pub mod packed;
pub mod set;

pub use error::TeamError;
pub use export::{parse_export, to_export};
pub use json::{TeamDocument, parse_json, to_json};
pub use load::{TeamFormat, load_team, parse_as, parse_team, random_team};
pub use packed::{parse_packed, to_packed};
pub use set::{PokemonSet, StatSet};

use tactician_battle::{Generation, KnownTeam};

pub(crate) fn build_team(sets: &[PokemonSet], generation: Generation) -> Result<KnownTeam, TeamError> {
    if sets.is_empty() {
        return Err(TeamError::EmptyTeam);
    }
    let mut team = KnownTeam::new(generation, true);
    for set in sets {
        team.add(set.to_known(generation)?)?;
    }
    team.set_size(sets.len())?;
    Ok(team)
}
