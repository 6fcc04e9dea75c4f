//! Reading team files from disk

use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use tactician_battle::{Generation, KnownTeam};
use tracing::debug;

use crate::error::TeamError;
use crate::{export, json, packed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamFormat {
    Export,
    Packed,
    Json,
}

impl TeamFormat {
    /// Guess the format from the text itself
    pub fn detect(text: &str) -> Self {
        let text = text.trim();
        if text.starts_with('{') {
            Self::Json
        } else if !text.contains('\n') && text.contains('|') {
            Self::Packed
        } else {
            Self::Export
        }
    }

    fn from_path(path: &Path, text: &str) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::detect(text),
        }
    }
}

pub fn parse_team(text: &str, generation: Generation) -> Result<KnownTeam, TeamError> {
    parse_as(TeamFormat::detect(text), text, generation)
}

pub fn parse_as(format: TeamFormat, text: &str, generation: Generation) -> Result<KnownTeam, TeamError> {
    match format {
        TeamFormat::Export => export::parse_export(text, generation),
        TeamFormat::Packed => packed::parse_packed(text, generation),
        TeamFormat::Json => json::parse_json(text, generation),
    }
}

pub fn load_team(path: impl AsRef<Path>, generation: Generation) -> Result<KnownTeam, TeamError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| TeamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = TeamFormat::from_path(path, &text);
    debug!("Loading {:?} team from {}", format, path.display());
    parse_as(format, &text, generation)
}

/// Files directly inside `dir`, sorted so a seeded `rng` picks reproducibly
fn team_files(dir: &Path) -> Result<Vec<PathBuf>, TeamError> {
    let io_error = |source| TeamError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load one team chosen uniformly from the files in `dir`
pub fn random_team<R: Rng + ?Sized>(
    dir: impl AsRef<Path>,
    generation: Generation,
    rng: &mut R,
) -> Result<KnownTeam, TeamError> {
    let dir = dir.as_ref();
    let files = team_files(dir)?;
    let path = files
        .choose(rng)
        .ok_or_else(|| TeamError::NoTeamFiles(dir.to_path_buf()))?;
    load_team(path, generation)
}
