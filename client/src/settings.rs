//! Client configuration, read from a JSON file
//!
//! ```json
//! {
//!     "format": "gen4ou",
//!     "team": "teams/gen4ou",
//!     "evaluate": "settings/evaluate.json",
//!     "strategy": {"type": "expectimax", "depth": 2, "single_depth": 0},
//!     "reconnect_delay": 10
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tactician_battle::{Generation, KnownTeam};
use tactician_search::StrategySettings;
use tactician_team::{TeamError, load_team, random_team};

fn default_reconnect_delay() -> u64 {
    10
}

fn default_search() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Battle format to search for, e.g. `gen4ou`
    pub format: String,
    /// A team file, or a directory to pick a random team from for each battle
    pub team: PathBuf,
    /// Evaluate weights (`{"score": {...}}`)
    pub evaluate: PathBuf,
    #[serde(default)]
    pub strategy: StrategySettings,
    /// Seconds to wait before reconnecting
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay: u64,
    /// Give up after this many reconnects; never when absent
    #[serde(default)]
    pub max_reconnects: Option<usize>,
    /// Search for a new battle after logging in and after each battle
    #[serde(default = "default_search")]
    pub search: bool,
}

impl ClientSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).context("Invalid client settings")?;
        settings.generation()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn generation(&self) -> Result<Generation> {
        Generation::from_format(&self.format).with_context(|| format!("No generation in format {:?}", self.format))
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay)
    }
}

/// Where the team for the next battle comes from
#[derive(Debug)]
pub enum TeamSource {
    Fixed(KnownTeam),
    Directory {
        dir: PathBuf,
        generation: Generation,
        rng: SmallRng,
    },
}

impl TeamSource {
    pub fn from_path(path: impl AsRef<Path>, generation: Generation) -> Result<Self, TeamError> {
        let path = path.as_ref();
        if path.is_dir() {
            Ok(Self::Directory {
                dir: path.to_path_buf(),
                generation,
                rng: SmallRng::from_entropy(),
            })
        } else {
            load_team(path, generation).map(Self::Fixed)
        }
    }

    pub fn next_team(&mut self) -> Result<KnownTeam, TeamError> {
        match self {
            Self::Fixed(team) => Ok(team.clone()),
            Self::Directory { dir, generation, rng } => random_team(dir, *generation, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = ClientSettings::from_json(
            r#"{"format": "gen4ou", "team": "teams/rain.txt", "evaluate": "settings/evaluate.json"}"#,
        )
        .unwrap();
        assert_eq!(settings.generation().unwrap(), Generation::Four);
        assert_eq!(settings.strategy, StrategySettings::default());
        assert_eq!(settings.reconnect_delay(), Duration::from_secs(10));
        assert_eq!(settings.max_reconnects, None);
        assert!(settings.search);
    }

    #[test]
    fn test_settings_strategy() {
        let settings = ClientSettings::from_json(
            r#"{"format": "gen3ou", "team": "t", "evaluate": "e",
                "strategy": {"type": "expectimax", "depth": 3, "single_depth": 1},
                "reconnect_delay": 0, "search": false}"#,
        )
        .unwrap();
        assert_eq!(
            settings.strategy,
            StrategySettings::Expectimax {
                depth: 3,
                single_depth: 1
            }
        );
        assert_eq!(settings.reconnect_delay(), Duration::ZERO);
        assert!(!settings.search);
    }

    #[test]
    fn test_bad_settings() {
        let error = ClientSettings::from_json(r#"{"format": "ou", "team": "t", "evaluate": "e"}"#).unwrap_err();
        assert!(error.to_string().contains("No generation"));
        assert!(ClientSettings::from_json(r#"{"format": "gen4ou"}"#).is_err());

        let missing = std::env::temp_dir().join("tactician_missing_settings.json");
        let error = ClientSettings::load(&missing).unwrap_err();
        assert!(error.to_string().contains("tactician_missing_settings.json"));
    }

    #[test]
    fn test_team_source() {
        let dir = std::env::temp_dir().join(format!("tactician_client_teams_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("jolteon.txt");
        std::fs::write(&file, "Jolteon\n- Thunderbolt\n").unwrap();

        let mut fixed = TeamSource::from_path(&file, Generation::Four).unwrap();
        assert!(matches!(fixed, TeamSource::Fixed(_)));
        assert_eq!(fixed.next_team().unwrap().members().len(), 1);

        let mut directory = TeamSource::from_path(&dir, Generation::Four).unwrap();
        assert!(matches!(directory, TeamSource::Directory { .. }));
        assert_eq!(directory.next_team().unwrap().members().len(), 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
