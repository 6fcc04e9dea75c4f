use crate::types::Type;

named_enum! {
    pub enum Item {
        None => "No Item",
        AdrenalineOrb => "Adrenaline Orb",
        AirBalloon => "Air Balloon",
        AssaultVest => "Assault Vest",
        BlackSludge => "Black Sludge",
        BrightPowder => "Bright Powder",
        ChestoBerry => "Chesto Berry",
        ChoiceBand => "Choice Band",
        ChoiceScarf => "Choice Scarf",
        ChoiceSpecs => "Choice Specs",
        DampRock => "Damp Rock",
        ExpertBelt => "Expert Belt",
        FlameOrb => "Flame Orb",
        FocusBand => "Focus Band",
        FocusSash => "Focus Sash",
        HeatRock => "Heat Rock",
        HeavyDutyBoots => "Heavy-Duty Boots",
        IcyRock => "Icy Rock",
        IronBall => "Iron Ball",
        KingsRock => "King's Rock",
        LaxIncense => "Lax Incense",
        Leftovers => "Leftovers",
        LifeOrb => "Life Orb",
        LightBall => "Light Ball",
        LightClay => "Light Clay",
        LumBerry => "Lum Berry",
        MentalHerb => "Mental Herb",
        MetalPowder => "Metal Powder",
        MintBerry => "Mint Berry",
        MiracleBerry => "Miracle Berry",
        MuscleBand => "Muscle Band",
        QuickClaw => "Quick Claw",
        RazorClaw => "Razor Claw",
        RockyHelmet => "Rocky Helmet",
        ScopeLens => "Scope Lens",
        ShedShell => "Shed Shell",
        SitrusBerry => "Sitrus Berry",
        SmoothRock => "Smooth Rock",
        SoulDew => "Soul Dew",
        StickyBarb => "Sticky Barb",
        ThickClub => "Thick Club",
        ToxicOrb => "Toxic Orb",
        TwistedSpoon => "Twisted Spoon",
        WhiteHerb => "White Herb",
        WiseGlasses => "Wise Glasses",
        Charcoal => "Charcoal",
        MysticWater => "Mystic Water",
        Magnet => "Magnet",
        MiracleSeed => "Miracle Seed",
        NeverMeltIce => "Never-Melt Ice",
        BlackBelt => "Black Belt",
        PoisonBarb => "Poison Barb",
        SoftSand => "Soft Sand",
        SharpBeak => "Sharp Beak",
        SilverPowder => "Silver Powder",
        HardStone => "Hard Stone",
        SpellTag => "Spell Tag",
        DragonFang => "Dragon Fang",
        BlackGlasses => "Black Glasses",
        MetalCoat => "Metal Coat",
        SilkScarf => "Silk Scarf",
    }
}

impl Item {
    pub fn is_choice(self) -> bool {
        matches!(self, Item::ChoiceBand | Item::ChoiceScarf | Item::ChoiceSpecs)
    }

    pub fn is_berry(self) -> bool {
        matches!(
            self,
            Item::ChestoBerry
                | Item::LumBerry
                | Item::MintBerry
                | Item::MiracleBerry
                | Item::SitrusBerry
        )
    }

    /// Type boosted by a type-enhancing held item
    pub fn boosted_type(self) -> Option<Type> {
        Some(match self {
            Item::Charcoal => Type::Fire,
            Item::MysticWater => Type::Water,
            Item::Magnet => Type::Electric,
            Item::MiracleSeed => Type::Grass,
            Item::NeverMeltIce => Type::Ice,
            Item::BlackBelt => Type::Fighting,
            Item::PoisonBarb => Type::Poison,
            Item::SoftSand => Type::Ground,
            Item::SharpBeak => Type::Flying,
            Item::TwistedSpoon => Type::Psychic,
            Item::SilverPowder => Type::Bug,
            Item::HardStone => Type::Rock,
            Item::SpellTag => Type::Ghost,
            Item::DragonFang => Type::Dragon,
            Item::BlackGlasses => Type::Dark,
            Item::MetalCoat => Type::Steel,
            Item::SilkScarf => Type::Normal,
            _ => return None,
        })
    }

    /// Weather-extending rocks and the weather they extend
    pub fn extends_weather(self) -> Option<crate::types::Weather> {
        use crate::types::Weather;
        match self {
            Item::DampRock => Some(Weather::Rain),
            Item::HeatRock => Some(Weather::Sun),
            Item::SmoothRock => Some(Weather::Sand),
            Item::IcyRock => Some(Weather::Hail),
            _ => None,
        }
    }
}

impl Default for Item {
    fn default() -> Self {
        Item::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Weather;

    #[test]
    fn test_choice() {
        assert!(Item::ChoiceScarf.is_choice());
        assert!(!Item::Leftovers.is_choice());
    }

    #[test]
    fn test_weather_rocks() {
        assert_eq!(Item::DampRock.extends_weather(), Some(Weather::Rain));
        assert_eq!(Item::IcyRock.extends_weather(), Some(Weather::Hail));
        assert_eq!(Item::LifeOrb.extends_weather(), None);
    }

    #[test]
    fn test_boosted_type() {
        assert_eq!(Item::Charcoal.boosted_type(), Some(Type::Fire));
        assert_eq!(Item::Leftovers.boosted_type(), None);
    }

    #[test]
    fn test_default_is_no_item() {
        assert_eq!(Item::default(), Item::None);
        assert_eq!(crate::types::HeldItem::default().held(), None);
    }
}
