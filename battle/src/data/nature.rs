use tactician_protocol::Stat;

named_enum! {
    pub enum Nature {
        Hardy => "Hardy",
        Lonely => "Lonely",
        Brave => "Brave",
        Adamant => "Adamant",
        Naughty => "Naughty",
        Bold => "Bold",
        Docile => "Docile",
        Relaxed => "Relaxed",
        Impish => "Impish",
        Lax => "Lax",
        Timid => "Timid",
        Hasty => "Hasty",
        Serious => "Serious",
        Jolly => "Jolly",
        Naive => "Naive",
        Modest => "Modest",
        Mild => "Mild",
        Quiet => "Quiet",
        Bashful => "Bashful",
        Rash => "Rash",
        Calm => "Calm",
        Gentle => "Gentle",
        Sassy => "Sassy",
        Careful => "Careful",
        Quirky => "Quirky",
    }
}

const ORDER: [Stat; 5] = [Stat::Atk, Stat::Def, Stat::Spe, Stat::Spa, Stat::Spd];

impl Nature {
    /// Natures are laid out in a 5x5 grid: row is the boosted stat, column
    /// the lowered one (atk, def, spe, spa, spd). The diagonal is neutral.
    pub fn boosted(self) -> Option<Stat> {
        let index = self as usize;
        let (row, column) = (index / 5, index % 5);
        (row != column).then_some(ORDER[row])
    }

    pub fn lowered(self) -> Option<Stat> {
        let index = self as usize;
        let (row, column) = (index / 5, index % 5);
        (row != column).then_some(ORDER[column])
    }

    /// Multiplier as a numerator over 10
    pub fn tenths(self, stat: Stat) -> u32 {
        if self.boosted() == Some(stat) {
            11
        } else if self.lowered() == Some(stat) {
            9
        } else {
            10
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nature_grid() {
        assert_eq!(Nature::Adamant.boosted(), Some(Stat::Atk));
        assert_eq!(Nature::Adamant.lowered(), Some(Stat::Spa));
        assert_eq!(Nature::Timid.boosted(), Some(Stat::Spe));
        assert_eq!(Nature::Timid.lowered(), Some(Stat::Atk));
        assert_eq!(Nature::Modest.boosted(), Some(Stat::Spa));
        assert_eq!(Nature::Modest.lowered(), Some(Stat::Atk));
        assert_eq!(Nature::Calm.boosted(), Some(Stat::Spd));
        assert_eq!(Nature::Jolly.lowered(), Some(Stat::Spa));
        assert_eq!(Nature::Bold.lowered(), Some(Stat::Atk));
        assert_eq!(Nature::Impish.lowered(), Some(Stat::Spa));
        assert_eq!(Nature::Brave.lowered(), Some(Stat::Spe));
    }

    #[test]
    fn test_neutral_natures() {
        for nature in [
            Nature::Hardy,
            Nature::Docile,
            Nature::Serious,
            Nature::Bashful,
            Nature::Quirky,
        ] {
            assert_eq!(nature.boosted(), None);
            assert_eq!(nature.tenths(Stat::Atk), 10);
        }
    }
}
