use crate::generation::Generation;

named_enum! {
    pub enum Ability {
        None => "No Ability",
        Adaptability => "Adaptability",
        AirLock => "Air Lock",
        ArenaTrap => "Arena Trap",
        BattleArmor => "Battle Armor",
        Blaze => "Blaze",
        Chlorophyll => "Chlorophyll",
        ClearBody => "Clear Body",
        CloudNine => "Cloud Nine",
        CompoundEyes => "Compound Eyes",
        CursedBody => "Cursed Body",
        Damp => "Damp",
        Download => "Download",
        Drizzle => "Drizzle",
        Drought => "Drought",
        DrySkin => "Dry Skin",
        EarlyBird => "Early Bird",
        EffectSpore => "Effect Spore",
        Filter => "Filter",
        FlameBody => "Flame Body",
        FlashFire => "Flash Fire",
        Guts => "Guts",
        Heatproof => "Heatproof",
        HugePower => "Huge Power",
        Hustle => "Hustle",
        Hydration => "Hydration",
        HyperCutter => "Hyper Cutter",
        IceBody => "Ice Body",
        Immunity => "Immunity",
        InnerFocus => "Inner Focus",
        Insomnia => "Insomnia",
        Intimidate => "Intimidate",
        IronBarbs => "Iron Barbs",
        IronFist => "Iron Fist",
        Justified => "Justified",
        KeenEye => "Keen Eye",
        Levitate => "Levitate",
        LightningRod => "Lightning Rod",
        Limber => "Limber",
        MagicGuard => "Magic Guard",
        MagmaArmor => "Magma Armor",
        MagnetPull => "Magnet Pull",
        MarvelScale => "Marvel Scale",
        Merciless => "Merciless",
        MirrorArmor => "Mirror Armor",
        MoldBreaker => "Mold Breaker",
        MotorDrive => "Motor Drive",
        Multiscale => "Multiscale",
        NaturalCure => "Natural Cure",
        NoGuard => "No Guard",
        Oblivious => "Oblivious",
        Overgrow => "Overgrow",
        OwnTempo => "Own Tempo",
        Pixilate => "Pixilate",
        PoisonHeal => "Poison Heal",
        Pressure => "Pressure",
        PurePower => "Pure Power",
        QuickFeet => "Quick Feet",
        RainDish => "Rain Dish",
        Regenerator => "Regenerator",
        RockHead => "Rock Head",
        RoughSkin => "Rough Skin",
        SandForce => "Sand Force",
        SandRush => "Sand Rush",
        SandStream => "Sand Stream",
        SandVeil => "Sand Veil",
        Scrappy => "Scrappy",
        SereneGrace => "Serene Grace",
        ShadowTag => "Shadow Tag",
        ShedSkin => "Shed Skin",
        ShellArmor => "Shell Armor",
        ShieldDust => "Shield Dust",
        Sniper => "Sniper",
        SnowCloak => "Snow Cloak",
        SnowWarning => "Snow Warning",
        SolarPower => "Solar Power",
        SolidRock => "Solid Rock",
        Soundproof => "Soundproof",
        SpeedBoost => "Speed Boost",
        Static => "Static",
        Steadfast => "Steadfast",
        Sturdy => "Sturdy",
        SuperLuck => "Super Luck",
        Swarm => "Swarm",
        SwiftSwim => "Swift Swim",
        Synchronize => "Synchronize",
        Technician => "Technician",
        ThickFat => "Thick Fat",
        TintedLens => "Tinted Lens",
        Torrent => "Torrent",
        Trace => "Trace",
        Truant => "Truant",
        Unaware => "Unaware",
        Unburden => "Unburden",
        VitalSpirit => "Vital Spirit",
        VoltAbsorb => "Volt Absorb",
        WaterAbsorb => "Water Absorb",
        WaterVeil => "Water Veil",
        WeakArmor => "Weak Armor",
        WhiteSmoke => "White Smoke",
        WonderGuard => "Wonder Guard",
        Libero => "Libero",
        Infiltrator => "Infiltrator",
        ElectricSurge => "Electric Surge",
    }
}

impl Ability {
    /// Abilities that stop Intimidate from lowering attack
    pub fn blocks_intimidate(self, generation: Generation) -> bool {
        match self {
            Ability::ClearBody | Ability::HyperCutter | Ability::WhiteSmoke => true,
            Ability::InnerFocus
            | Ability::Oblivious
            | Ability::OwnTempo
            | Ability::Scrappy
            | Ability::MirrorArmor => generation >= Generation::Eight,
            _ => false,
        }
    }

    /// Abilities that prevent stat drops from the opponent
    pub fn blocks_stat_drops(self) -> bool {
        matches!(
            self,
            Ability::ClearBody | Ability::WhiteSmoke | Ability::MirrorArmor
        )
    }

    pub fn ignores_recoil(self) -> bool {
        matches!(self, Ability::RockHead | Ability::MagicGuard)
    }

    /// Magic Guard prevents all indirect damage
    pub fn blocks_indirect_damage(self) -> bool {
        self == Ability::MagicGuard
    }

    pub fn blocks_critical_hits(self) -> bool {
        matches!(self, Ability::BattleArmor | Ability::ShellArmor)
    }

    /// Trace cannot copy these
    pub fn is_traceable(self) -> bool {
        !matches!(
            self,
            Ability::None | Ability::Trace | Ability::WonderGuard
        )
    }

    pub fn can_clear_status(self) -> bool {
        matches!(self, Ability::ShedSkin | Ability::Hydration | Ability::NaturalCure)
    }

    /// Weather summoned on switch-in
    pub fn sets_weather(self) -> Option<crate::types::Weather> {
        use crate::types::Weather;
        match self {
            Ability::Drizzle => Some(Weather::Rain),
            Ability::Drought => Some(Weather::Sun),
            Ability::SandStream => Some(Weather::Sand),
            Ability::SnowWarning => Some(Weather::Hail),
            _ => None,
        }
    }
}
