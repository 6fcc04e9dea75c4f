//! Builders shared by the unit tests

use tactician_battle::{Ability, Gender, Generation, Item, Move, MoveName, Nature, Pokemon, Species, Spread, Team};

use crate::evaluate::EvaluateSettings;

pub fn evaluate_settings() -> EvaluateSettings {
    EvaluateSettings {
        hp: 1024,
        hidden: 80,
        spikes: -150,
        stealth_rock: -200,
        toxic_spikes: -100,
    }
}

pub fn pokemon(
    generation: Generation,
    species: Species,
    ability: Ability,
    item: Item,
    moves: &[MoveName],
) -> Pokemon {
    Pokemon::new(
        generation,
        species,
        100,
        Gender::Male,
        Nature::Hardy,
        &Spread::neutral(generation),
        ability,
        item,
    )
    .with_moves(moves.iter().map(|name| Move::new(*name, Move::MAX_PP_UPS)))
    .unwrap()
}

/// Team with the first member leading
pub fn team(generation: Generation, is_me: bool, members: Vec<Pokemon>) -> Team {
    let mut team = Team::new(generation, is_me);
    for member in members {
        team.add(member).unwrap();
    }
    team.set_lead(0);
    team
}

pub fn single(generation: Generation, is_me: bool, species: Species, moves: &[MoveName]) -> Team {
    team(
        generation,
        is_me,
        vec![pokemon(generation, species, Ability::None, Item::None, moves)],
    )
}
