//! Volatile state of the active Pokemon. Everything here is lost on switch
//! out, except the subset Baton Pass hands to the replacement.

use crate::data::{MoveCategory, MoveName};
use crate::generation::Generation;
use crate::types::conditions::Countdown;
use crate::types::stats::StatStages;

/// A move locked in for more than one turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LockIn {
    #[default]
    None,
    /// Must spend the next turn recharging (Hyper Beam)
    Recharging,
    /// Used the first turn of a two-turn move
    ChargingUp(MoveName),
    /// Outrage and friends; `turns` counts turns used, starting at 1
    Rampage { move_name: MoveName, turns: u8 },
    /// Storing damage; released after two turns
    Bide { damage: u16, turns: u8 },
}

/// Which move is disabled and for how long
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Disable {
    pub move_name: MoveName,
    pub turns: u8,
}

/// Damage from a direct attack taken this turn, for Counter and Mirror Coat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DamageReceived {
    pub amount: u16,
    pub category: MoveCategory,
}

/// What the active Pokemon last did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LastUsedMove {
    pub move_name: Option<MoveName>,
    /// Consecutive successful uses of the same move (Protect chains)
    pub consecutive_successes: u8,
    pub moved_this_turn: bool,
    pub switched_in_this_turn: bool,
    /// U-turn, Volt Switch, Flip Turn or Baton Pass hit and the user must
    /// now choose a replacement
    pub switch_decision_required: bool,
    pub baton_passing: bool,
}

impl LastUsedMove {
    pub fn record(&mut self, move_name: MoveName, successful: bool) {
        if successful && self.move_name == Some(move_name) {
            self.consecutive_successes = self.consecutive_successes.saturating_add(1);
        } else {
            self.consecutive_successes = u8::from(successful);
        }
        self.move_name = Some(move_name);
        self.moved_this_turn = true;
    }

    /// Chance that Protect, Detect or Endure succeeds given the previous
    /// chain: halves (thirds from gen 6) with each consecutive success
    pub fn protect_success_probability(&self, generation: Generation, move_name: MoveName) -> f64 {
        let chained = match self.move_name {
            Some(previous) if previous.is_protect() && move_name.is_protect() => {
                self.consecutive_successes
            }
            _ => 0,
        };
        let base: f64 = if generation >= Generation::Six { 3.0 } else { 2.0 };
        1.0 / base.powi(i32::from(chained))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActiveFlags {
    pub stages: StatStages,
    /// Turns spent confused, `None` when not confused
    pub confusion: Option<u8>,
    /// Remaining substitute HP; 0 means no substitute
    pub substitute: u16,
    pub disable: Option<Disable>,
    pub encore: Countdown,
    pub taunt: Countdown,
    pub heal_block: Countdown,
    pub magnet_rise: Countdown,
    pub partial_trap: Countdown,
    /// Perish Song count; fainting happens when it reaches zero
    pub perish_song: Option<u8>,
    /// Turns until Yawn puts the Pokemon to sleep
    pub yawn: Countdown,
    pub stockpile: u8,
    pub lock_in: LockIn,
    pub last_used_move: LastUsedMove,
    pub damage_received: Option<DamageReceived>,
    pub tormented: bool,
    /// Mean Look
    pub trapped: bool,
    pub leech_seeded: bool,
    pub cursed: bool,
    pub ingrained: bool,
    pub aqua_ring: bool,
    pub protecting: bool,
    pub enduring: bool,
    pub flinched: bool,
    pub focus_energy: bool,
    pub flash_fire: bool,
    pub charged: bool,
    pub identified: bool,
    pub used_imprison: bool,
    pub roosting: bool,
    /// Truant skips every other turn
    pub loafing: bool,
}

impl ActiveFlags {
    pub const CONFUSION_MAX_TURNS: u8 = 4;
    pub const DISABLE_TURNS: u8 = 4;
    pub const ENCORE_TURNS: u8 = 3;
    pub const TAUNT_TURNS: u8 = 3;
    pub const HEAL_BLOCK_TURNS: u8 = 5;
    pub const MAGNET_RISE_TURNS: u8 = 5;
    pub const PARTIAL_TRAP_TURNS: u8 = 5;
    pub const PERISH_SONG_COUNT: u8 = 3;
    pub const YAWN_TURNS: u8 = 2;
    pub const MAX_STOCKPILE: u8 = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Flags for a Pokemon just switched in
    pub fn switched_in() -> Self {
        let mut flags = Self::default();
        flags.last_used_move.switched_in_this_turn = true;
        flags
    }

    /// What the replacement keeps when this Pokemon uses Baton Pass
    pub fn baton_pass(&self) -> Self {
        let mut flags = Self::switched_in();
        flags.stages = self.stages;
        flags.substitute = self.substitute;
        flags.confusion = self.confusion;
        flags.leech_seeded = self.leech_seeded;
        flags.cursed = self.cursed;
        flags.perish_song = self.perish_song;
        flags.ingrained = self.ingrained;
        flags.aqua_ring = self.aqua_ring;
        flags.magnet_rise = self.magnet_rise;
        flags.focus_energy = self.focus_energy;
        flags
    }

    /// Clear what only lasts for the turn
    pub fn reset_end_of_turn(&mut self) {
        self.damage_received = None;
        self.protecting = false;
        self.enduring = false;
        self.flinched = false;
        self.roosting = false;
        self.last_used_move.moved_this_turn = false;
        self.last_used_move.switched_in_this_turn = false;
    }

    pub fn moved(&self) -> bool {
        self.last_used_move.moved_this_turn
    }

    pub fn is_confused(&self) -> bool {
        self.confusion.is_some()
    }

    /// Confuse unless already confused
    pub fn confuse(&mut self) -> bool {
        if self.confusion.is_some() {
            return false;
        }
        self.confusion = Some(0);
        true
    }

    /// Advance confusion before a move attempt. Returns whether the
    /// Pokemon is still confused afterwards.
    pub fn advance_confusion(&mut self, ends: bool) -> bool {
        match self.confusion {
            Some(turns) if !ends && turns + 1 < Self::CONFUSION_MAX_TURNS => {
                self.confusion = Some(turns + 1);
                true
            }
            Some(_) => {
                self.confusion = None;
                false
            }
            None => false,
        }
    }

    pub fn is_disabled(&self, move_name: MoveName) -> bool {
        self.disable
            .is_some_and(|disable| disable.move_name == move_name && disable.turns > 0)
    }

    pub fn disable(&mut self, move_name: MoveName) -> bool {
        assert!(move_name.is_regular(), "cannot disable {move_name}");
        if self.disable.is_some() {
            return false;
        }
        self.disable = Some(Disable {
            move_name,
            turns: Self::DISABLE_TURNS,
        });
        true
    }

    pub fn advance_disable(&mut self) {
        if let Some(disable) = self.disable.as_mut() {
            disable.turns = disable.turns.saturating_sub(1);
            if disable.turns == 0 {
                self.disable = None;
            }
        }
    }

    pub fn is_encored(&self) -> bool {
        self.encore.is_active()
    }

    pub fn is_taunted(&self) -> bool {
        self.taunt.is_active()
    }

    pub fn has_substitute(&self) -> bool {
        self.substitute > 0
    }

    /// Damage dealt to the substitute; returns the damage absorbed
    pub fn damage_substitute(&mut self, damage: u16) -> u16 {
        let absorbed = damage.min(self.substitute);
        self.substitute -= absorbed;
        absorbed
    }

    pub fn is_recharging(&self) -> bool {
        self.lock_in == LockIn::Recharging
    }

    pub fn is_charging_up(&self) -> bool {
        matches!(self.lock_in, LockIn::ChargingUp(_))
    }

    /// Locked in by the move itself, as opposed to Encore or a choice item
    pub fn is_locked_in_by_move(&self) -> bool {
        self.lock_in != LockIn::None
    }

    /// The only move that can be selected while locked in by a move
    pub fn locked_move(&self) -> Option<MoveName> {
        match self.lock_in {
            LockIn::ChargingUp(move_name) | LockIn::Rampage { move_name, .. } => Some(move_name),
            LockIn::Bide { .. } => Some(MoveName::Bide),
            LockIn::Recharging => self.last_used_move.move_name,
            LockIn::None => None,
        }
    }

    /// A rampage lasts 2 or 3 turns, so it may end after its second turn
    pub fn lock_in_may_end(&self) -> bool {
        matches!(self.lock_in, LockIn::Rampage { turns, .. } if turns >= 2)
    }

    /// End of turn: returns true when a rampage ends and confuses the user
    pub fn advance_lock_in(&mut self, ending: bool) -> bool {
        match self.lock_in {
            LockIn::Rampage { move_name, turns } => {
                if (ending && turns >= 2) || turns >= 3 {
                    self.lock_in = LockIn::None;
                    true
                } else {
                    self.lock_in = LockIn::Rampage {
                        move_name,
                        turns: turns + 1,
                    };
                    false
                }
            }
            _ => false,
        }
    }

    /// Use Bide. Returns the damage to release on the final turn.
    pub fn use_bide(&mut self) -> Option<u16> {
        match self.lock_in {
            LockIn::Bide { damage, turns } if turns >= 1 => {
                self.lock_in = LockIn::None;
                Some(damage.saturating_mul(2))
            }
            LockIn::Bide { damage, turns } => {
                self.lock_in = LockIn::Bide {
                    damage,
                    turns: turns + 1,
                };
                None
            }
            _ => {
                self.lock_in = LockIn::Bide {
                    damage: 0,
                    turns: 0,
                };
                None
            }
        }
    }

    /// Record direct damage; Bide stores it
    pub fn direct_damage(&mut self, amount: u16, category: MoveCategory) {
        if let LockIn::Bide { damage, turns } = self.lock_in {
            self.lock_in = LockIn::Bide {
                damage: damage.saturating_add(amount),
                turns,
            };
        }
        self.damage_received = Some(DamageReceived { amount, category });
    }

    pub fn increment_stockpile(&mut self) -> bool {
        if self.stockpile >= Self::MAX_STOCKPILE {
            return false;
        }
        self.stockpile += 1;
        true
    }

    /// Spit Up and Swallow use up every level
    pub fn release_stockpile(&mut self) -> u8 {
        std::mem::take(&mut self.stockpile)
    }

    pub fn activate_perish_song(&mut self) -> bool {
        if self.perish_song.is_some() {
            return false;
        }
        self.perish_song = Some(Self::PERISH_SONG_COUNT);
        true
    }

    /// Returns true when the count reaches zero and the Pokemon faints
    pub fn advance_perish_song(&mut self) -> bool {
        match self.perish_song {
            Some(0) | Some(1) => {
                self.perish_song = None;
                true
            }
            Some(count) => {
                self.perish_song = Some(count - 1);
                false
            }
            None => false,
        }
    }

    pub fn hit_with_yawn(&mut self) -> bool {
        self.yawn.activate(Self::YAWN_TURNS)
    }

    /// Returns true on the turn the Pokemon falls asleep
    pub fn advance_yawn(&mut self) -> bool {
        if !self.yawn.is_active() {
            return false;
        }
        self.yawn.decrement();
        !self.yawn.is_active()
    }
}
