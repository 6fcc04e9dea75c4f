//! How far the search still looks ahead

/// Cost of searching one more full turn
pub const DEPTH_COST: u32 = 3;

/// Remaining search budget. `general` covers full turns with both teams;
/// once it runs out, `single` covers one-on-one matchups between every
/// pair of members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Depth {
    general: u32,
    single: u32,
}

impl Depth {
    pub fn new(general: u32, single: u32) -> Self {
        Self { general, single }
    }

    /// Look `turns` full turns ahead
    pub fn turns(turns: u32) -> Self {
        Self::new(turns * DEPTH_COST, 0)
    }

    /// Then `turns` more in each single matchup
    pub fn with_single_turns(self, turns: u32) -> Self {
        Self {
            single: turns * DEPTH_COST,
            ..self
        }
    }

    pub fn general(&self) -> u32 {
        self.general
    }

    pub fn single(&self) -> u32 {
        self.single
    }

    pub fn one_level_deeper(&mut self) {
        if self.general > 0 {
            self.general = self.general.saturating_sub(DEPTH_COST);
        } else {
            self.single = self.single.saturating_sub(DEPTH_COST);
        }
    }

    /// Full turns left. Wins found earlier score higher by this much.
    pub fn remaining_turns(&self) -> u32 {
        self.general / DEPTH_COST
    }

    pub fn is_exhausted(&self) -> bool {
        self.general == 0 && self.single == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_before_single() {
        let mut depth = Depth::turns(2).with_single_turns(1);
        assert_eq!(depth.remaining_turns(), 2);
        depth.one_level_deeper();
        assert_eq!(depth, Depth::new(DEPTH_COST, DEPTH_COST));
        depth.one_level_deeper();
        assert_eq!(depth, Depth::new(0, DEPTH_COST));
        assert!(!depth.is_exhausted());
        depth.one_level_deeper();
        assert!(depth.is_exhausted());
    }

    #[test]
    fn test_partial_cost_saturates() {
        let mut depth = Depth::new(2, 1);
        depth.one_level_deeper();
        assert_eq!(depth, Depth::new(0, 1));
        assert_eq!(depth.remaining_turns(), 0);
        depth.one_level_deeper();
        depth.one_level_deeper();
        assert!(depth.is_exhausted());
    }
}
