//! Probability distributions over a side's legal selections

use tactician_battle::Selection;

/// Share of the time a foe is assumed to switch when it has the option.
/// An empirical constant measured from ladder games.
pub const GENERAL_SWITCH_PROBABILITY: f64 = 0.164;

/// Foe selections at or below this weight are not searched
const UNLIKELY: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSelection {
    pub selection: Selection,
    pub weight: f64,
}

impl WeightedSelection {
    pub fn new(selection: Selection, weight: f64) -> Self {
        Self { selection, weight }
    }
}

/// Prior for a side we know nothing about. Switches share
/// `general_switch_probability` and moves share the rest, unless only one
/// kind is available, in which case every selection is equally likely.
pub fn predict_random_selection(selections: &[Selection], general_switch_probability: f64) -> Vec<WeightedSelection> {
    let switches = selections.iter().filter(|selection| selection.is_switch()).count();
    let others = selections.len() - switches;
    if switches == 0 || others == 0 {
        let weight = 1.0 / selections.len() as f64;
        return selections
            .iter()
            .map(|selection| WeightedSelection::new(*selection, weight))
            .collect();
    }
    let switch_weight = general_switch_probability / switches as f64;
    let other_weight = (1.0 - general_switch_probability) / others as f64;
    selections
        .iter()
        .map(|selection| {
            let weight = if selection.is_switch() {
                switch_weight
            } else {
                other_weight
            };
            WeightedSelection::new(*selection, weight)
        })
        .collect()
}

/// Drop foe selections too unlikely to be worth searching and renormalise
/// what is left. A distribution with nothing above the cutoff is kept
/// whole.
pub fn remove_unlikely_foe_selections(selections: &[WeightedSelection]) -> Vec<WeightedSelection> {
    let kept: Vec<_> = selections
        .iter()
        .filter(|selection| selection.weight > UNLIKELY)
        .copied()
        .collect();
    let total: f64 = kept.iter().map(|selection| selection.weight).sum();
    if kept.is_empty() || total <= 0.0 {
        return selections.to_vec();
    }
    kept.into_iter()
        .map(|selection| WeightedSelection::new(selection.selection, selection.weight / total))
        .collect()
}

/// The single most likely selection at full weight. Ties go to the
/// earlier selection.
pub fn most_likely(selections: &[WeightedSelection]) -> Vec<WeightedSelection> {
    let best = selections
        .iter()
        .copied()
        .reduce(|best, candidate| if candidate.weight > best.weight { candidate } else { best });
    best.map(|best| vec![WeightedSelection::new(best.selection, 1.0)])
        .unwrap_or_default()
}
