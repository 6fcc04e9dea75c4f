//! Completed battles as fixed-size little-endian records
//!
//! Every record has the same length ([`RECORD_SIZE`]) so a file of results
//! can be appended to and read back sequentially:
//!
//! ```text
//! side1 | side2 | winner: u8
//!
//! side   = id: u64 | has_rating: u8 | value: f64 | deviation: f64
//!        | members: u8 | 6 member slots
//! member = species: u16 | gender: u8 | item: u16 | ability: u16
//!        | hp, atk, def, spa, spd, spe: u16
//!        | moves: u8 | 4 move slots: u16
//! ```
//!
//! Names are stored as their index in the data tables. Unused slots are
//! zero-filled.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tactician_battle::stat::Stats;
use tactician_battle::{Ability, Compress, Gender, Item, KnownPokemon, KnownTeam, MoveName, Species};

use crate::error::ReplayError;
use crate::glicko::Rating;

const MAX_MEMBERS: usize = 6;
const MAX_MOVES: usize = 4;

const MEMBER_SIZE: usize = 2 + 1 + 2 + 2 + 6 * 2 + 1 + MAX_MOVES * 2;
const SIDE_SIZE: usize = 8 + 1 + 8 + 8 + 1 + MAX_MEMBERS * MEMBER_SIZE;

/// Length in bytes of one encoded [`BattleResult`]
pub const RECORD_SIZE: usize = 2 * SIDE_SIZE + 1;

/// What a side brought to the battle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideMember {
    pub species: Species,
    pub gender: Gender,
    pub item: Item,
    pub ability: Ability,
    pub stats: Stats,
    pub moves: Vec<MoveName>,
}

impl SideMember {
    pub fn from_known(known: &KnownPokemon) -> Self {
        let pokemon = known.pokemon();
        Self {
            species: pokemon.species,
            gender: pokemon.gender,
            item: pokemon.item.held().unwrap_or(Item::None),
            ability: pokemon.initial_ability,
            stats: pokemon.stats,
            moves: pokemon.moves.names().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    pub team: Vec<SideMember>,
    /// Player identifier, stable across battles
    pub id: u64,
    /// Rating reported by the server, if any
    pub rating: Option<Rating>,
}

impl Side {
    pub fn from_team(team: &KnownTeam, id: u64, rating: Option<Rating>) -> Self {
        Self {
            team: team.members().iter().map(SideMember::from_known).collect(),
            id,
            rating,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Side1,
    Side2,
    Tie,
}

impl Winner {
    /// Glicko score of side 1
    pub fn side1_score(self) -> f64 {
        match self {
            Winner::Side1 => 1.0,
            Winner::Side2 => 0.0,
            Winner::Tie => 0.5,
        }
    }

    fn to_byte(self) -> u8 {
        match self {
            Winner::Side1 => 0,
            Winner::Side2 => 1,
            Winner::Tie => 2,
        }
    }

    fn from_byte(byte: u8) -> Result<Self, ReplayError> {
        match byte {
            0 => Ok(Winner::Side1),
            1 => Ok(Winner::Side2),
            2 => Ok(Winner::Tie),
            _ => Err(ReplayError::InvalidField {
                field: "winner",
                value: u64::from(byte),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BattleResult {
    pub side1: Side,
    pub side2: Side,
    pub winner: Winner,
}

impl BattleResult {
    pub fn encode(&self) -> Result<Vec<u8>, ReplayError> {
        let mut encoder = Encoder(Vec::with_capacity(RECORD_SIZE));
        encoder.side(&self.side1)?;
        encoder.side(&self.side2)?;
        encoder.u8(self.winner.to_byte());
        debug_assert_eq!(encoder.0.len(), RECORD_SIZE);
        Ok(encoder.0)
    }

    pub fn decode(bytes: &[u8; RECORD_SIZE]) -> Result<Self, ReplayError> {
        let mut decoder = Decoder { bytes, position: 0 };
        let side1 = decoder.side()?;
        let side2 = decoder.side()?;
        let winner = Winner::from_byte(decoder.u8())?;
        Ok(Self { side1, side2, winner })
    }
}

struct Encoder(Vec<u8>);

impl Encoder {
    fn u8(&mut self, value: u8) {
        self.0.push(value);
    }

    fn u16(&mut self, value: u16) {
        self.0.extend_from_slice(&value.to_le_bytes());
    }

    fn u64(&mut self, value: u64) {
        self.0.extend_from_slice(&value.to_le_bytes());
    }

    fn f64(&mut self, value: f64) {
        self.0.extend_from_slice(&value.to_le_bytes());
    }

    fn zeros(&mut self, count: usize) {
        self.0.resize(self.0.len() + count, 0);
    }

    fn name<T: Compress>(&mut self, name: &T) {
        self.u16(name.compress() as u16);
    }

    fn side(&mut self, side: &Side) -> Result<(), ReplayError> {
        if side.team.len() > MAX_MEMBERS {
            return Err(ReplayError::TeamTooLarge(side.team.len()));
        }
        self.u64(side.id);
        match side.rating {
            Some(rating) => {
                self.u8(1);
                self.f64(rating.value);
                self.f64(rating.deviation);
            }
            None => {
                self.u8(0);
                self.zeros(16);
            }
        }
        self.u8(side.team.len() as u8);
        for member in &side.team {
            self.member(member)?;
        }
        self.zeros((MAX_MEMBERS - side.team.len()) * MEMBER_SIZE);
        Ok(())
    }

    fn member(&mut self, member: &SideMember) -> Result<(), ReplayError> {
        if member.moves.len() > MAX_MOVES {
            return Err(ReplayError::InvalidField {
                field: "move count",
                value: member.moves.len() as u64,
            });
        }
        self.name(&member.species);
        self.u8(match member.gender {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Genderless => 2,
        });
        self.name(&member.item);
        self.name(&member.ability);
        let stats = &member.stats;
        for stat in [stats.hp, stats.atk, stats.def, stats.spa, stats.spd, stats.spe] {
            self.u16(stat);
        }
        self.u8(member.moves.len() as u8);
        for name in &member.moves {
            self.name(name);
        }
        self.zeros((MAX_MOVES - member.moves.len()) * 2);
        Ok(())
    }
}

struct Decoder<'a> {
    bytes: &'a [u8; RECORD_SIZE],
    position: usize,
}

impl Decoder<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0; N];
        out.copy_from_slice(&self.bytes[self.position..self.position + N]);
        self.position += N;
        out
    }

    fn skip(&mut self, count: usize) {
        self.position += count;
    }

    fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn u64(&mut self) -> u64 {
        u64::from_le_bytes(self.take())
    }

    fn f64(&mut self) -> f64 {
        f64::from_le_bytes(self.take())
    }

    fn name<T: Copy>(&mut self, all: &[T], field: &'static str) -> Result<T, ReplayError> {
        let index = self.u16();
        all.get(usize::from(index)).copied().ok_or(ReplayError::InvalidField {
            field,
            value: u64::from(index),
        })
    }

    fn side(&mut self) -> Result<Side, ReplayError> {
        let id = self.u64();
        let has_rating = self.u8();
        let value = self.f64();
        let deviation = self.f64();
        let rating = match has_rating {
            0 => None,
            1 => Some(Rating { value, deviation }),
            other => {
                return Err(ReplayError::InvalidField {
                    field: "rating flag",
                    value: u64::from(other),
                });
            }
        };
        let members = usize::from(self.u8());
        if members > MAX_MEMBERS {
            return Err(ReplayError::InvalidField {
                field: "team size",
                value: members as u64,
            });
        }
        let team = (0..members).map(|_| self.member()).collect::<Result<_, _>>()?;
        self.skip((MAX_MEMBERS - members) * MEMBER_SIZE);
        Ok(Side { team, id, rating })
    }

    fn member(&mut self) -> Result<SideMember, ReplayError> {
        let species = self.name(Species::ALL, "species")?;
        let gender = match self.u8() {
            0 => Gender::Male,
            1 => Gender::Female,
            2 => Gender::Genderless,
            other => {
                return Err(ReplayError::InvalidField {
                    field: "gender",
                    value: u64::from(other),
                });
            }
        };
        let item = self.name(Item::ALL, "item")?;
        let ability = self.name(Ability::ALL, "ability")?;
        let stats = Stats {
            hp: self.u16(),
            atk: self.u16(),
            def: self.u16(),
            spa: self.u16(),
            spd: self.u16(),
            spe: self.u16(),
        };
        let count = usize::from(self.u8());
        if count > MAX_MOVES {
            return Err(ReplayError::InvalidField {
                field: "move count",
                value: count as u64,
            });
        }
        let moves = (0..count)
            .map(|_| self.name(MoveName::ALL, "move"))
            .collect::<Result<_, _>>()?;
        self.skip((MAX_MOVES - count) * 2);
        Ok(SideMember {
            species,
            gender,
            item,
            ability,
            stats,
            moves,
        })
    }
}

/// Appends encoded results to a stream
pub struct BattleResultWriter<W: Write> {
    writer: W,
}

impl<W: Write> BattleResultWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, result: &BattleResult) -> Result<(), ReplayError> {
        self.writer.write_all(&result.encode()?)?;
        Ok(())
    }

    pub fn into_inner(mut self) -> Result<W, ReplayError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Reads results until the end of the stream. A partial record at the end is
/// an error.
pub struct BattleResultReader<R: Read> {
    reader: R,
    done: bool,
}

impl<R: Read> BattleResultReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, done: false }
    }

    fn read_record(&mut self) -> Result<Option<BattleResult>, ReplayError> {
        let mut buffer = [0; RECORD_SIZE];
        let mut read = 0;
        while read < RECORD_SIZE {
            match self.reader.read(&mut buffer[read..]) {
                Ok(0) => break,
                Ok(count) => read += count,
                Err(error) if error.kind() == std::io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error.into()),
            }
        }
        match read {
            0 => Ok(None),
            RECORD_SIZE => BattleResult::decode(&buffer).map(Some),
            _ => Err(ReplayError::Truncated { read }),
        }
    }
}

impl<R: Read> Iterator for BattleResultReader<R> {
    type Item = Result<BattleResult, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let record = self.read_record().transpose();
        if !matches!(record, Some(Ok(_))) {
            self.done = true;
        }
        record
    }
}

/// Append `results` to the file at `path`, creating it if needed
pub fn write_results(path: impl AsRef<Path>, results: &[BattleResult]) -> Result<(), ReplayError> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let mut writer = BattleResultWriter::new(BufWriter::new(file));
    for result in results {
        writer.write(result)?;
    }
    writer.into_inner()?;
    Ok(())
}

pub fn open_results(path: impl AsRef<Path>) -> Result<BattleResultReader<BufReader<File>>, ReplayError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BattleResultReader::new(BufReader::new(file)))
}

/// Every result in the file at `path`, in the order written
pub fn read_results(path: impl AsRef<Path>) -> Result<Vec<BattleResult>, ReplayError> {
    open_results(path)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactician_battle::{Generation, Move, Nature, Spread, StatValues};

    fn member(species: Species, item: Item, ability: Ability, moves: &[MoveName]) -> SideMember {
        let spread = Spread {
            ivs: StatValues::uniform(Spread::MAX_IV),
            evs: StatValues::uniform(0),
        };
        let known = KnownPokemon::new(
            Generation::Four,
            species,
            None,
            100,
            Gender::Male,
            Nature::Hardy,
            spread,
            ability,
            item,
            moves.iter().map(|name| Move::new(*name, Move::MAX_PP_UPS)).collect(),
        )
        .unwrap();
        SideMember::from_known(&known)
    }

    fn sample() -> BattleResult {
        let team = vec![
            member(
                Species::Snorlax,
                Item::Leftovers,
                Ability::ThickFat,
                &[MoveName::BodySlam, MoveName::Earthquake],
            ),
            member(Species::Jolteon, Item::None, Ability::VoltAbsorb, &[MoveName::Thunderbolt]),
        ];
        BattleResult {
            side1: Side {
                team: team.clone(),
                id: 0,
                rating: None,
            },
            side2: Side {
                team,
                id: 1,
                rating: Some(Rating {
                    value: 1.0,
                    deviation: 1.0,
                }),
            },
            winner: Winner::Tie,
        }
    }

    fn scratch_file(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("tactician_replay_{name}_{}.tmbr", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_record_size_is_fixed() {
        let mut small = sample();
        small.side1.team.truncate(1);
        assert_eq!(small.encode().unwrap().len(), RECORD_SIZE);
        assert_eq!(sample().encode().unwrap().len(), RECORD_SIZE);
    }

    #[test]
    fn test_file_reads_back_in_order() {
        let path = scratch_file("order");
        let first = sample();
        let mut second = sample();
        second.winner = Winner::Side2;
        second.side1.id = 42;

        write_results(&path, std::slice::from_ref(&first)).unwrap();
        write_results(&path, std::slice::from_ref(&second)).unwrap();
        let results = read_results(&path).unwrap();
        assert_eq!(results, vec![first, second]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_truncated_and_invalid_records() {
        let bytes = sample().encode().unwrap();
        let mut reader = BattleResultReader::new(&bytes[..RECORD_SIZE - 3]);
        assert!(matches!(reader.next(), Some(Err(ReplayError::Truncated { read })) if read == RECORD_SIZE - 3));
        assert!(reader.next().is_none());

        let mut bad = bytes.clone();
        bad[RECORD_SIZE - 1] = 7;
        let mut reader = BattleResultReader::new(&bad[..]);
        assert!(matches!(
            reader.next(),
            Some(Err(ReplayError::InvalidField { field: "winner", value: 7 }))
        ));

        assert!(BattleResultReader::new(std::io::empty()).next().is_none());
    }

    #[test]
    fn test_oversized_team() {
        let mut result = sample();
        let extra = result.side1.team[0].clone();
        result.side1.team.extend(std::iter::repeat_n(extra, 5));
        assert!(matches!(result.encode(), Err(ReplayError::TeamTooLarge(7))));
    }

    #[test]
    fn test_missing_file() {
        let path = scratch_file("missing");
        assert!(matches!(read_results(&path), Err(ReplayError::Io { .. })));
    }
}
