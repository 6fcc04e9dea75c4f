//! Expectiminimax over both sides' selections.
//!
//! The AI maximizes. The foe does not minimize: its selections are weighted
//! by the foe strategy's prediction and averaged. Every random part of a turn
//! (hits, critical hits, side effects, status clearing, move order ties, end
//! of turn rolls) becomes a chance node averaged by its probability.
//!
//! A turn is searched in this order:
//!
//! 1. Order the two selections. Ties average both orderings.
//! 2. The first mover acts.
//! 3. The first mover picks a replacement if its move sent it out (U-turn,
//!    Baton Pass), otherwise it passes.
//! 4. The last mover acts, unless it was phazed out or fainted.
//! 5. The last mover picks a replacement if its move sent it out.
//! 6. End of turn, then faint replacements.
//! 7. Recurse, fall back to single matchups, or evaluate.

use rayon::prelude::*;
use tactician_battle::engine::{self, ActualDamage, Effect, EndOfTurnFlags, Order, OtherAction, UsedMove};
use tactician_battle::types::StatusName;
use tactician_battle::{
    Ability, Action, AnyPokemon, Environment, Generation, MoveName, Selection, Species, Team, legal_selections,
};

use crate::depth::Depth;
use crate::evaluate::{Evaluate, VICTORY, win};
use crate::predict::{WeightedSelection, most_likely, remove_unlikely_foe_selections};
use crate::strategy::Strategy;

const FULL_PARALYSIS: f64 = 0.25;
const SHED_SKIN: f64 = 0.3;
const GENERATION_TWO_THAW: f64 = 0.1;
const MAX_POKEMON_PER_TEAM: f64 = 6.0;

/// Everything the search needs about a position
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub ai: Team,
    pub foe: Team,
    pub environment: Environment,
    pub depth: Depth,
}

impl State {
    pub fn new(ai: Team, foe: Team, environment: Environment, depth: Depth) -> Self {
        Self {
            ai,
            foe,
            environment,
            depth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredSelection {
    pub selection: Selection,
    pub score: f64,
}

/// Which side is acting in the branch being searched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mover {
    Ai,
    Foe,
}

impl Mover {
    fn other(self) -> Self {
        match self {
            Mover::Ai => Mover::Foe,
            Mover::Foe => Mover::Ai,
        }
    }

    /// (mover, other)
    fn view(self, state: &State) -> (&Team, &Team) {
        match self {
            Mover::Ai => (&state.ai, &state.foe),
            Mover::Foe => (&state.foe, &state.ai),
        }
    }

    fn split(self, state: &mut State) -> (&mut Team, &mut Team, &mut Environment) {
        let State {
            ai, foe, environment, ..
        } = state;
        match self {
            Mover::Ai => (ai, foe, environment),
            Mover::Foe => (foe, ai, environment),
        }
    }

    /// Put values given as (mover, other) in (ai, foe) order
    fn sort<T>(self, mover: T, other: T) -> (T, T) {
        match self {
            Mover::Ai => (mover, other),
            Mover::Foe => (other, mover),
        }
    }
}

type Branch<'a> = dyn Fn(&State, Selection, Selection) -> f64 + Sync + 'a;
type Continuation<'a> = dyn Fn(&State) -> f64 + Sync + 'a;

/// Average `next` over a flag that is set with `probability`
fn flag_branch(probability: f64, next: impl Fn(bool) -> f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&probability), "probability {probability}");
    let mut score = 0.0;
    for flag in [false, true] {
        let weight = if flag { probability } else { 1.0 - probability };
        if weight != 0.0 {
            score += weight * next(flag);
        }
    }
    score
}

/// Two independent flags, one per side
fn paired_flag_branch(ai: f64, foe: f64, next: impl Fn(bool, bool) -> f64) -> f64 {
    flag_branch(ai, |ai_flag| flag_branch(foe, |foe_flag| next(ai_flag, foe_flag)))
}

fn max_score(scored: &[ScoredSelection]) -> f64 {
    scored
        .iter()
        .map(|scored| scored.score)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Weighted terms are computed in parallel and added in a fixed order, so
/// the same search always produces the same bits
fn parallel_sum(terms: impl IndexedParallelIterator<Item = f64>) -> f64 {
    terms.collect::<Vec<_>>().iter().sum()
}

fn win_score(state: &State) -> Option<f64> {
    let mut depth = state.depth;
    depth.one_level_deeper();
    win(&state.ai, &state.foe).map(|won| won + f64::from(depth.remaining_turns()))
}

fn hit_self_probability(generation: Generation) -> f64 {
    if generation >= Generation::Seven {
        1.0 / 3.0
    } else {
        0.5
    }
}

/// What could run when `user` uses `selected`, with probabilities summing
/// to 1
fn possible_executed_actions(selected: MoveName, user: &Team) -> Vec<(Action, f64)> {
    let pokemon = user.active();
    let mut executed = Vec::new();
    if selected == MoveName::SleepTalk && pokemon.status.is_sleeping() {
        executed.extend(pokemon.moves.names().filter(|name| *name != MoveName::SleepTalk).map(Action::Move));
    }
    if executed.is_empty() {
        executed.push(Action::Move(selected));
    }
    let each = 1.0 / executed.len() as f64;
    let mut actions: Vec<_> = executed.into_iter().map(|action| (action, each)).collect();
    if user.flags.is_confused() {
        let hit_self = hit_self_probability(user.generation());
        for (_, probability) in &mut actions {
            *probability *= 1.0 - hit_self;
        }
        actions.push((Action::HitSelf, hit_self));
    }
    actions
}

/// Runs the search for one generation's `Evaluate`, predicting the foe with
/// `foe_strategy` at every node
pub struct Searcher<'a> {
    evaluate: Evaluate,
    foe_strategy: &'a dyn Strategy,
}

impl<'a> Searcher<'a> {
    pub fn new(evaluate: Evaluate, foe_strategy: &'a dyn Strategy) -> Self {
        Self {
            evaluate,
            foe_strategy,
        }
    }

    /// Rank `ai_selections` against the weighted foe selections, best first
    pub fn expectiminimax(
        &self,
        state: &State,
        ai_selections: &[Selection],
        foe_selections: &[WeightedSelection],
    ) -> Vec<ScoredSelection> {
        assert!(!ai_selections.is_empty(), "the AI always has a selection");
        let scored = self.score_selections(state, ai_selections, foe_selections);
        reorder(ai_selections, &scored, true)
            .into_iter()
            .filter_map(|selection| scored.iter().find(|scored| scored.selection == selection).copied())
            .collect()
    }

    /// Expected score of each AI selection, in the order given
    pub fn score_selections(
        &self,
        state: &State,
        ai_selections: &[Selection],
        foe_selections: &[WeightedSelection],
    ) -> Vec<ScoredSelection> {
        self.score_with(state, ai_selections, foe_selections, &|state, ai, foe| {
            self.order_branch(state, ai, foe)
        })
    }

    fn score_with(
        &self,
        state: &State,
        ai_selections: &[Selection],
        foe_selections: &[WeightedSelection],
        branch: &Branch<'_>,
    ) -> Vec<ScoredSelection> {
        ai_selections
            .iter()
            .map(|ai_selection| ScoredSelection {
                selection: *ai_selection,
                score: parallel_sum(
                    foe_selections
                        .par_iter()
                        .map(|predicted| predicted.weight * branch(state, *ai_selection, predicted.selection)),
                ),
            })
            .collect()
    }

    /// Score with the foe's selections weighted by the foe strategy
    fn respond_to_foe(
        &self,
        state: &State,
        ai_selections: &[Selection],
        foe_selections: &[Selection],
        branch: &Branch<'_>,
    ) -> f64 {
        let predicted = self
            .foe_strategy
            .select(&state.foe, foe_selections, &state.ai, ai_selections, &state.environment)
            .user
            .to_weighted();
        let predicted = if state.depth.general() == 0 {
            most_likely(&predicted)
        } else {
            remove_unlikely_foe_selections(&predicted)
        };
        max_score(&self.score_with(state, ai_selections, &predicted, branch))
    }

    fn select_type_of_action(&self, state: &State) -> f64 {
        let ai_selections = legal_selections(&state.ai, &state.foe, &state.environment);
        let foe_selections = legal_selections(&state.foe, &state.ai, &state.environment);
        self.respond_to_foe(state, &ai_selections, &foe_selections, &|state, ai, foe| {
            self.order_branch(state, ai, foe)
        })
    }

    fn order_branch(&self, state: &State, ai: Selection, foe: Selection) -> f64 {
        let order = engine::order(
            &state.ai,
            Action::from(ai),
            &state.foe,
            Action::from(foe),
            &state.environment,
        );
        match order {
            Order::First => self.use_action_branch(state, Mover::Ai, ai, foe),
            Order::Second => self.use_action_branch(state, Mover::Foe, foe, ai),
            Order::Tie => {
                (self.use_action_branch(state, Mover::Ai, ai, foe) + self.use_action_branch(state, Mover::Foe, foe, ai))
                    / 2.0
            }
        }
    }

    fn use_action_branch(&self, state: &State, first: Mover, first_selection: Selection, last_selection: Selection) -> f64 {
        let last_species = first.other().view(state).0.active().species;
        let other_action = OtherAction::Pending(Action::from(last_selection));
        self.execute_selection(state, first, first_selection, other_action, &|updated| {
            let (first_team, last_team) = first.view(updated);
            let first_selections = if first_team.flags.last_used_move.switch_decision_required {
                legal_selections(first_team, last_team, &updated.environment)
            } else {
                vec![Selection::Pass]
            };
            let last_selections = [last_selection];
            let (ai_selections, foe_selections) = first.sort(&first_selections[..], &last_selections[..]);
            self.respond_to_foe(updated, ai_selections, foe_selections, &|updated, ai, foe| {
                let (replacement, last) = first.sort(ai, foe);
                self.use_action_branch_outer(updated, first, replacement, last, last_species)
            })
        })
    }

    /// The first mover's replacement, then the last mover's action
    fn use_action_branch_outer(
        &self,
        state: &State,
        first: Mover,
        replacement: Selection,
        last_selection: Selection,
        last_species: Species,
    ) -> f64 {
        let last = first.other();
        self.execute_selection(state, first, replacement, OtherAction::Pending(Action::from(last_selection)), &|replaced| {
            let last_active = last.view(replaced).0.active();
            let still_in = last_active.species == last_species && !last_active.is_fainted();
            let last_selection = if still_in { last_selection } else { Selection::Pass };
            self.execute_selection(replaced, last, last_selection, OtherAction::Moved, &|updated| {
                let (last_team, first_team) = last.view(updated);
                let last_selections = if last_team.active().is_fainted() {
                    vec![Selection::Pass]
                } else {
                    legal_selections(last_team, first_team, &updated.environment)
                };
                let first_selections = [Selection::Pass];
                let (ai_selections, foe_selections) = last.sort(&last_selections[..], &first_selections[..]);
                self.respond_to_foe(updated, ai_selections, foe_selections, &|updated, ai, foe| {
                    let (replacement, _) = last.sort(ai, foe);
                    self.use_action_branch_inner(updated, last, replacement)
                })
            })
        })
    }

    /// The last mover's replacement, then the end of the turn
    fn use_action_branch_inner(&self, state: &State, last: Mover, replacement: Selection) -> f64 {
        self.execute_selection(state, last, replacement, OtherAction::Moved, &|updated| {
            self.end_of_turn_flag_branches(updated)
        })
    }

    fn execute_selection(
        &self,
        state: &State,
        mover: Mover,
        selection: Selection,
        other_action: OtherAction,
        continuation: &Continuation<'_>,
    ) -> f64 {
        let Selection::Move(selected) = selection else {
            let mut next = state.clone();
            let (user, other, environment) = mover.split(&mut next);
            engine::call_move(
                user,
                UsedMove::plain(selection),
                other,
                other_action,
                environment,
                false,
                ActualDamage::Unknown,
                false,
            );
            return win_score(&next).unwrap_or_else(|| continuation(&next));
        };
        let (user, _) = mover.view(state);
        possible_executed_actions(selected, user)
            .into_iter()
            .map(|(executed, probability)| {
                probability * self.execute_move(state, mover, selected, executed, other_action, continuation)
            })
            .sum()
    }

    fn execute_move(
        &self,
        state: &State,
        mover: Mover,
        selected: MoveName,
        executed: Action,
        other_action: OtherAction,
        continuation: &Continuation<'_>,
    ) -> f64 {
        let (user, other) = mover.view(state);
        let environment = &state.environment;
        let pokemon = user.active();
        let (side_effects, hit_chance, critical_hit_chance) = match executed {
            Action::Move(name) => (
                engine::possible_side_effects(name, user, other, environment),
                engine::chance_to_hit(user, name, other, environment),
                engine::critical_hit_probability(user, name, other, environment),
            ),
            Action::HitSelf | Action::Switch(_) | Action::Pass => {
                (vec![engine::SideEffect::certain(Effect::None)], 1.0, 0.0)
            }
        };
        let clear_status = pokemon.status.probability_of_clearing(user.generation(), pokemon.ability);
        let full_paralysis = if pokemon.status.name() == StatusName::Paralysis {
            FULL_PARALYSIS
        } else {
            0.0
        };

        flag_branch(clear_status, |clear_status| {
            flag_branch(hit_chance, |hits| {
                flag_branch(full_paralysis, |is_fully_paralyzed| {
                    side_effects
                        .iter()
                        .map(|side_effect| {
                            side_effect.probability
                                * flag_branch(if hits { critical_hit_chance } else { 0.0 }, |critical_hit| {
                                    let mut next = state.clone();
                                    let (user, other, environment) = mover.split(&mut next);
                                    engine::call_move(
                                        user,
                                        UsedMove {
                                            selected: Selection::Move(selected),
                                            executed,
                                            critical_hit,
                                            miss: !hits,
                                            side_effect: side_effect.effect,
                                        },
                                        other,
                                        other_action,
                                        environment,
                                        clear_status,
                                        ActualDamage::Unknown,
                                        is_fully_paralyzed,
                                    );
                                    win_score(&next).unwrap_or_else(|| continuation(&next))
                                })
                        })
                        .sum()
                })
            })
        })
    }

    fn end_of_turn_flag_branches(&self, state: &State) -> f64 {
        let shed_skin = |team: &Team| {
            let pokemon = team.active();
            if pokemon.ability == Ability::ShedSkin && !pokemon.status.is_clear() {
                SHED_SKIN
            } else {
                0.0
            }
        };
        let thaws = |team: &Team| {
            if team.generation() == Generation::Two && team.active().status.name() == StatusName::Freeze {
                GENERATION_TWO_THAW
            } else {
                0.0
            }
        };
        paired_flag_branch(shed_skin(&state.ai), shed_skin(&state.foe), |ai_shed_skin, foe_shed_skin| {
            paired_flag_branch(thaws(&state.ai), thaws(&state.foe), |ai_thaws, foe_thaws| {
                // Rampages are assumed to end as soon as they can
                let ai_flags = EndOfTurnFlags::new(ai_shed_skin, true, ai_thaws);
                let foe_flags = EndOfTurnFlags::new(foe_shed_skin, true, foe_thaws);
                self.end_of_turn_order_branch(state, ai_flags, foe_flags)
            })
        })
    }

    fn end_of_turn_order_branch(&self, state: &State, ai_flags: EndOfTurnFlags, foe_flags: EndOfTurnFlags) -> f64 {
        match engine::order(&state.ai, Action::Pass, &state.foe, Action::Pass, &state.environment) {
            Order::First => self.end_of_turn_branch(state, Mover::Ai, ai_flags, foe_flags),
            Order::Second => self.end_of_turn_branch(state, Mover::Foe, foe_flags, ai_flags),
            Order::Tie => {
                (self.end_of_turn_branch(state, Mover::Ai, ai_flags, foe_flags)
                    + self.end_of_turn_branch(state, Mover::Foe, foe_flags, ai_flags))
                    / 2.0
            }
        }
    }

    fn end_of_turn_branch(
        &self,
        state: &State,
        first: Mover,
        first_flags: EndOfTurnFlags,
        last_flags: EndOfTurnFlags,
    ) -> f64 {
        let mut next = state.clone();
        let (first_team, last_team, environment) = first.split(&mut next);
        engine::end_of_turn(first_team, first_flags, last_team, last_flags, environment);
        next.depth.one_level_deeper();
        if let Some(won) = win(&next.ai, &next.foe) {
            return won + f64::from(next.depth.remaining_turns());
        }
        if next.ai.active().is_fainted() || next.foe.active().is_fainted() {
            let ai_selections = legal_selections(&next.ai, &next.foe, &next.environment);
            let foe_selections = legal_selections(&next.foe, &next.ai, &next.environment);
            return self.respond_to_foe(&next, &ai_selections, &foe_selections, &|updated, ai, foe| {
                self.handle_replacing(updated, first, ai, foe)
            });
        }
        self.finish_end_of_turn(&next)
    }

    fn handle_replacing(&self, state: &State, first: Mover, ai: Selection, foe: Selection) -> f64 {
        let mut next = state.clone();
        let (first_selection, last_selection) = first.sort(ai, foe);
        for (mover, selection) in [(first, first_selection), (first.other(), last_selection)] {
            if let Selection::Switch(switch) = selection {
                let (switcher, other, environment) = mover.split(&mut next);
                engine::switch_pokemon(switcher, other, environment, switch.index());
            }
        }
        if let Some(won) = win(&next.ai, &next.foe) {
            return won + f64::from(next.depth.remaining_turns());
        }
        self.finish_end_of_turn(&next)
    }

    fn finish_end_of_turn(&self, state: &State) -> f64 {
        if state.depth.general() > 0 {
            self.select_type_of_action(state)
        } else if state.depth.single() > 0 {
            self.generate_single_matchups(state)
        } else {
            f64::from(self.evaluate.evaluate(&state.ai, &state.foe))
        }
    }

    /// Average of every one-on-one matchup, plus a bonus for having more
    /// members left
    fn generate_single_matchups(&self, state: &State) -> f64 {
        let ai_size = state.ai.members().len();
        let foe_size = state.foe.members().len();
        let mut score = 0.0;
        for ai_index in 0..ai_size {
            for foe_index in 0..foe_size {
                score += self.evaluate_single_matchup(state, ai_index, foe_index);
            }
        }
        let difference = ai_size as f64 - foe_size as f64;
        score += difference * VICTORY * ai_size.max(foe_size) as f64;
        score / (MAX_POKEMON_PER_TEAM * MAX_POKEMON_PER_TEAM)
    }

    fn evaluate_single_matchup(&self, state: &State, ai_index: usize, foe_index: usize) -> f64 {
        let mut next = state.clone();
        for (mover, index) in [(Mover::Ai, ai_index), (Mover::Foe, foe_index)] {
            let (team, other, environment) = mover.split(&mut next);
            if index != team.active_index() {
                engine::switch_pokemon(team, other, environment, index);
            }
            team.isolate_active();
        }
        win_score(&next).unwrap_or_else(|| self.select_type_of_action(&next))
    }
}

/// Sort `selections` by scores from an earlier pass: best first for the
/// AI, worst first for the foe. Selections without a score go last. The
/// sort is stable, so ties keep their original order.
pub fn reorder(selections: &[Selection], previous: &[ScoredSelection], is_ai: bool) -> Vec<Selection> {
    let score_of = |selection: &Selection| {
        previous
            .iter()
            .find(|scored| scored.selection == *selection)
            .map(|scored| scored.score)
    };
    let mut keyed: Vec<_> = selections.iter().map(|selection| (*selection, score_of(selection))).collect();
    keyed.sort_by(|(_, lhs), (_, rhs)| match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => {
            if is_ai {
                rhs.total_cmp(lhs)
            } else {
                lhs.total_cmp(rhs)
            }
        }
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    keyed.into_iter().map(|(selection, _)| selection).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::{GENERAL_SWITCH_PROBABILITY, predict_random_selection};
    use crate::strategy::RandomSelection;
    use crate::testing::{evaluate_settings, pokemon, single, team};
    use tactician_battle::{Item, Status, Switch};

    fn searcher(generation: Generation, foe_strategy: &dyn Strategy) -> Searcher<'_> {
        Searcher::new(Evaluate::new(generation, evaluate_settings()).unwrap(), foe_strategy)
    }

    fn foe_prior(state: &State) -> Vec<WeightedSelection> {
        let selections = legal_selections(&state.foe, &state.ai, &state.environment);
        predict_random_selection(&selections, GENERAL_SWITCH_PROBABILITY)
    }

    fn jolteon_against_gyarados(depth: Depth) -> State {
        let generation = Generation::Four;
        State::new(
            single(generation, true, Species::Jolteon, &[MoveName::Thunderbolt, MoveName::Growl]),
            single(generation, false, Species::Gyarados, &[MoveName::Waterfall]),
            Environment::new(),
            depth,
        )
    }

    #[test]
    fn test_super_effective_move_ranks_first() {
        let strategy = RandomSelection::default();
        let state = jolteon_against_gyarados(Depth::turns(1));
        let ai_selections = legal_selections(&state.ai, &state.foe, &state.environment);
        let ranked = searcher(Generation::Four, &strategy).expectiminimax(&state, &ai_selections, &foe_prior(&state));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].selection, Selection::Move(MoveName::Thunderbolt));
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_search_is_deterministic() {
        let strategy = RandomSelection::default();
        let state = jolteon_against_gyarados(Depth::turns(1));
        let ai_selections = legal_selections(&state.ai, &state.foe, &state.environment);
        let search = searcher(Generation::Four, &strategy);
        let first = search.score_selections(&state, &ai_selections, &foe_prior(&state));
        let second = search.score_selections(&state, &ai_selections, &foe_prior(&state));
        assert_eq!(first, second);
    }

    #[test]
    fn test_knockout_scores_as_victory() {
        let strategy = RandomSelection::default();
        let mut state = jolteon_against_gyarados(Depth::turns(1));
        state.foe.active_mut().hp.set_current(1);
        let scored = searcher(Generation::Four, &strategy).score_selections(
            &state,
            &[Selection::Move(MoveName::Thunderbolt)],
            &foe_prior(&state),
        );
        assert!((scored[0].score - VICTORY).abs() < 1e-6);
    }

    #[test]
    fn test_exhausted_depth_evaluates() {
        let strategy = RandomSelection::default();
        let generation = Generation::Four;
        let state = jolteon_against_gyarados(Depth::default());
        let search = searcher(generation, &strategy);
        let evaluate = Evaluate::new(generation, evaluate_settings()).unwrap();
        assert_eq!(
            search.finish_end_of_turn(&state),
            f64::from(evaluate.evaluate(&state.ai, &state.foe))
        );
    }

    #[test]
    fn test_single_matchups_reward_more_members() {
        let strategy = RandomSelection::default();
        let generation = Generation::Four;
        let ai = team(
            generation,
            true,
            vec![
                pokemon(generation, Species::Jolteon, Ability::VoltAbsorb, Item::None, &[MoveName::Thunderbolt]),
                pokemon(generation, Species::Snorlax, Ability::ThickFat, Item::None, &[MoveName::BodySlam]),
            ],
        );
        let foe = single(generation, false, Species::Gyarados, &[MoveName::Waterfall]);
        let state = State::new(ai, foe, Environment::new(), Depth::default().with_single_turns(1));
        let score = searcher(generation, &strategy).finish_end_of_turn(&state);
        assert!(score > 0.0);
    }

    #[test]
    fn test_possible_executed_actions() {
        let generation = Generation::Four;
        let mut user = single(
            generation,
            true,
            Species::Snorlax,
            &[MoveName::SleepTalk, MoveName::BodySlam, MoveName::Earthquake],
        );
        assert_eq!(
            possible_executed_actions(MoveName::SleepTalk, &user),
            vec![(Action::Move(MoveName::SleepTalk), 1.0)]
        );

        user.active_mut().status = Status::Sleep { turns_slept: 0 };
        assert_eq!(
            possible_executed_actions(MoveName::SleepTalk, &user),
            vec![
                (Action::Move(MoveName::BodySlam), 0.5),
                (Action::Move(MoveName::Earthquake), 0.5),
            ]
        );

        user.active_mut().status = Status::Clear;
        user.flags.confuse();
        assert_eq!(
            possible_executed_actions(MoveName::BodySlam, &user),
            vec![(Action::Move(MoveName::BodySlam), 0.5), (Action::HitSelf, 0.5)]
        );
    }

    #[test]
    fn test_flag_branch_skips_impossible_outcomes() {
        assert_eq!(flag_branch(0.0, |flag| if flag { f64::NAN } else { 2.0 }), 2.0);
        assert_eq!(flag_branch(1.0, |flag| if flag { 3.0 } else { f64::NAN }), 3.0);
        assert_eq!(flag_branch(0.25, |flag| if flag { 4.0 } else { 0.0 }), 1.0);
    }

    #[test]
    fn test_reorder() {
        let tackle = Selection::Move(MoveName::Tackle);
        let thunder = Selection::Move(MoveName::Thunder);
        let switch = Selection::Switch(Switch::new(1, 2).unwrap());
        let previous = [
            ScoredSelection {
                selection: tackle,
                score: 10.0,
            },
            ScoredSelection {
                selection: thunder,
                score: 20.0,
            },
        ];
        let selections = [switch, tackle, thunder];
        assert_eq!(reorder(&selections, &previous, true), vec![thunder, tackle, switch]);
        assert_eq!(reorder(&selections, &previous, false), vec![tackle, thunder, switch]);
    }
}
