//! What a player chooses each turn, and what actually runs

use std::fmt;

use crate::data::MoveName;
use crate::error::BattleError;

/// Switch target, already checked against the team size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Switch(usize);

impl Switch {
    pub fn new(index: usize, team_size: usize) -> Result<Self, BattleError> {
        if index >= team_size {
            return Err(BattleError::InvalidSelection(format!(
                "switch to {index} on a team of {team_size}"
            )));
        }
        Ok(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A player's declared choice for the turn. Confusion damage is not
/// something a player can pick, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Move(MoveName),
    Switch(Switch),
    Pass,
}

impl Selection {
    pub fn is_switch(self) -> bool {
        matches!(self, Selection::Switch(_))
    }

    pub fn move_name(self) -> Option<MoveName> {
        match self {
            Selection::Move(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Move(name) => write!(f, "{name}"),
            Selection::Switch(switch) => write!(f, "Switch {}", switch.index()),
            Selection::Pass => write!(f, "Pass"),
        }
    }
}

/// What runs once the turn is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(MoveName),
    Switch(Switch),
    Pass,
    /// Hurting itself in confusion
    HitSelf,
}

impl From<Selection> for Action {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Move(name) => Action::Move(name),
            Selection::Switch(switch) => Action::Switch(switch),
            Selection::Pass => Action::Pass,
        }
    }
}

impl Action {
    pub fn is_damaging(self) -> bool {
        match self {
            Action::Move(name) => name.is_damaging(),
            Action::HitSelf => true,
            Action::Switch(_) | Action::Pass => false,
        }
    }
}

/// A selection in server terms. Slots are 1-based: `move` counts the
/// Pokemon's move slots and `switch` counts team positions as the server
/// lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Move(usize),
    Switch(usize),
    Pass,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Move(slot) => write!(f, "move {slot}"),
            Choice::Switch(slot) => write!(f, "switch {slot}"),
            Choice::Pass => write!(f, "pass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_bounds() {
        assert!(Switch::new(5, 6).is_ok());
        assert!(matches!(Switch::new(6, 6), Err(BattleError::InvalidSelection(_))));
    }

    #[test]
    fn test_choice_wire_form() {
        assert_eq!(Choice::Move(2).to_string(), "move 2");
        assert_eq!(Choice::Switch(4).to_string(), "switch 4");
        assert_eq!(Choice::Pass.to_string(), "pass");
    }

    #[test]
    fn test_action_from_selection() {
        let switch = Switch::new(1, 2).unwrap();
        assert_eq!(Action::from(Selection::Switch(switch)), Action::Switch(switch));
        assert!(Action::HitSelf.is_damaging());
        assert!(!Action::from(Selection::Pass).is_damaging());
    }
}
