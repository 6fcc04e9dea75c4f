use crate::generation::Generation;
use crate::rational::Rational;
use crate::types::Type;

named_enum! {
    pub enum MoveName {
        // Normal
        Tackle => "Tackle",
        BodySlam => "Body Slam",
        DoubleEdge => "Double-Edge",
        Return => "Return",
        Facade => "Facade",
        HyperBeam => "Hyper Beam",
        GigaImpact => "Giga Impact",
        Explosion => "Explosion",
        SelfDestruct => "Self-Destruct",
        QuickAttack => "Quick Attack",
        ExtremeSpeed => "Extreme Speed",
        FakeOut => "Fake Out",
        Slash => "Slash",
        HyperVoice => "Hyper Voice",
        SuperFang => "Super Fang",
        SonicBoom => "Sonic Boom",
        Endeavor => "Endeavor",
        RapidSpin => "Rapid Spin",
        Snore => "Snore",
        Struggle => "Struggle",
        Swift => "Swift",
        HiddenPower => "Hidden Power",
        TriAttack => "Tri Attack",
        Thrash => "Thrash",
        Wrap => "Wrap",
        Bind => "Bind",
        Bide => "Bide",
        SpitUp => "Spit Up",
        Guillotine => "Guillotine",
        HornDrill => "Horn Drill",
        SwordsDance => "Swords Dance",
        BellyDrum => "Belly Drum",
        Substitute => "Substitute",
        Protect => "Protect",
        Endure => "Endure",
        Encore => "Encore",
        Disable => "Disable",
        Roar => "Roar",
        Whirlwind => "Whirlwind",
        BatonPass => "Baton Pass",
        Recover => "Recover",
        SoftBoiled => "Soft-Boiled",
        MilkDrink => "Milk Drink",
        SlackOff => "Slack Off",
        MorningSun => "Morning Sun",
        Moonlight => "Moonlight",
        Wish => "Wish",
        SleepTalk => "Sleep Talk",
        Yawn => "Yawn",
        PerishSong => "Perish Song",
        MeanLook => "Mean Look",
        FocusEnergy => "Focus Energy",
        Charm => "Charm",
        Growl => "Growl",
        Stockpile => "Stockpile",
        Swallow => "Swallow",
        Splash => "Splash",
        Safeguard => "Safeguard",
        LuckyChant => "Lucky Chant",
        Swagger => "Swagger",
        PainSplit => "Pain Split",
        HealBell => "Heal Bell",
        ShellSmash => "Shell Smash",
        // Fire
        Flamethrower => "Flamethrower",
        FireBlast => "Fire Blast",
        FirePunch => "Fire Punch",
        FlareBlitz => "Flare Blitz",
        Overheat => "Overheat",
        FireSpin => "Fire Spin",
        FlameWheel => "Flame Wheel",
        SacredFire => "Sacred Fire",
        WillOWisp => "Will-O-Wisp",
        SunnyDay => "Sunny Day",
        // Water
        Surf => "Surf",
        HydroPump => "Hydro Pump",
        Waterfall => "Waterfall",
        Scald => "Scald",
        AquaJet => "Aqua Jet",
        FlipTurn => "Flip Turn",
        Crabhammer => "Crabhammer",
        RainDance => "Rain Dance",
        AquaRing => "Aqua Ring",
        WaterSport => "Water Sport",
        // Electric
        Thunderbolt => "Thunderbolt",
        Thunder => "Thunder",
        ThunderPunch => "Thunder Punch",
        VoltSwitch => "Volt Switch",
        Discharge => "Discharge",
        VoltTackle => "Volt Tackle",
        ThunderWave => "Thunder Wave",
        MagnetRise => "Magnet Rise",
        // Grass
        GigaDrain => "Giga Drain",
        LeafStorm => "Leaf Storm",
        EnergyBall => "Energy Ball",
        SolarBeam => "Solar Beam",
        PowerWhip => "Power Whip",
        SeedBomb => "Seed Bomb",
        WoodHammer => "Wood Hammer",
        PetalDance => "Petal Dance",
        LeechSeed => "Leech Seed",
        Spore => "Spore",
        SleepPowder => "Sleep Powder",
        StunSpore => "Stun Spore",
        Synthesis => "Synthesis",
        Ingrain => "Ingrain",
        Aromatherapy => "Aromatherapy",
        // Ice
        IceBeam => "Ice Beam",
        Blizzard => "Blizzard",
        IcePunch => "Ice Punch",
        IceShard => "Ice Shard",
        SheerCold => "Sheer Cold",
        Haze => "Haze",
        Mist => "Mist",
        Hail => "Hail",
        // Fighting
        CloseCombat => "Close Combat",
        DrainPunch => "Drain Punch",
        BrickBreak => "Brick Break",
        CrossChop => "Cross Chop",
        HighJumpKick => "High Jump Kick",
        JumpKick => "Jump Kick",
        FocusBlast => "Focus Blast",
        MachPunch => "Mach Punch",
        Superpower => "Superpower",
        AuraSphere => "Aura Sphere",
        SeismicToss => "Seismic Toss",
        Counter => "Counter",
        Detect => "Detect",
        BulkUp => "Bulk Up",
        // Poison
        SludgeBomb => "Sludge Bomb",
        PoisonJab => "Poison Jab",
        GunkShot => "Gunk Shot",
        Toxic => "Toxic",
        ToxicSpikes => "Toxic Spikes",
        // Ground
        Earthquake => "Earthquake",
        EarthPower => "Earth Power",
        Fissure => "Fissure",
        Spikes => "Spikes",
        MudSport => "Mud Sport",
        // Flying
        Fly => "Fly",
        Bounce => "Bounce",
        BraveBird => "Brave Bird",
        AirSlash => "Air Slash",
        DrillPeck => "Drill Peck",
        Hurricane => "Hurricane",
        Roost => "Roost",
        Tailwind => "Tailwind",
        Defog => "Defog",
        // Psychic
        Psychic => "Psychic",
        Psyshock => "Psyshock",
        ZenHeadbutt => "Zen Headbutt",
        MirrorCoat => "Mirror Coat",
        CalmMind => "Calm Mind",
        Agility => "Agility",
        Amnesia => "Amnesia",
        CosmicPower => "Cosmic Power",
        Reflect => "Reflect",
        LightScreen => "Light Screen",
        Rest => "Rest",
        Hypnosis => "Hypnosis",
        TrickRoom => "Trick Room",
        MagicRoom => "Magic Room",
        Gravity => "Gravity",
        HealBlock => "Heal Block",
        Imprison => "Imprison",
        Trick => "Trick",
        // Bug
        UTurn => "U-turn",
        XScissor => "X-Scissor",
        Megahorn => "Megahorn",
        BugBuzz => "Bug Buzz",
        HealOrder => "Heal Order",
        QuiverDance => "Quiver Dance",
        // Rock
        StoneEdge => "Stone Edge",
        RockSlide => "Rock Slide",
        HeadSmash => "Head Smash",
        StealthRock => "Stealth Rock",
        Sandstorm => "Sandstorm",
        // Ghost
        ShadowBall => "Shadow Ball",
        ShadowSneak => "Shadow Sneak",
        ShadowClaw => "Shadow Claw",
        NightShade => "Night Shade",
        ConfuseRay => "Confuse Ray",
        Curse => "Curse",
        // Dragon
        Outrage => "Outrage",
        DracoMeteor => "Draco Meteor",
        DragonPulse => "Dragon Pulse",
        DragonClaw => "Dragon Claw",
        DragonTail => "Dragon Tail",
        DragonRage => "Dragon Rage",
        DragonDance => "Dragon Dance",
        // Dark
        Crunch => "Crunch",
        KnockOff => "Knock Off",
        SuckerPunch => "Sucker Punch",
        DarkPulse => "Dark Pulse",
        Taunt => "Taunt",
        Torment => "Torment",
        NastyPlot => "Nasty Plot",
        // Steel
        IronHead => "Iron Head",
        FlashCannon => "Flash Cannon",
        MeteorMash => "Meteor Mash",
        BulletPunch => "Bullet Punch",
        IronDefense => "Iron Defense",
        // Fairy
        Moonblast => "Moonblast",
        PlayRough => "Play Rough",
        DazzlingGleam => "Dazzling Gleam",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Who a move acts on, as far as Protect and Substitute are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveTarget {
    Opponent,
    User,
    UserSide,
    OpponentSide,
    Field,
}

/// Static per-move data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveData {
    pub move_type: Type,
    pub category: MoveCategory,
    /// 0 for status moves and moves with computed damage
    pub power: u8,
    /// `None` never misses
    pub accuracy: Option<u8>,
    pub pp: u8,
    pub priority: i8,
    pub target: MoveTarget,
    pub contact: bool,
}

impl MoveData {
    const fn physical(move_type: Type, power: u8, accuracy: u8, pp: u8) -> Self {
        Self {
            move_type,
            category: MoveCategory::Physical,
            power,
            accuracy: Some(accuracy),
            pp,
            priority: 0,
            target: MoveTarget::Opponent,
            contact: false,
        }
    }

    const fn special(move_type: Type, power: u8, accuracy: u8, pp: u8) -> Self {
        Self {
            category: MoveCategory::Special,
            ..Self::physical(move_type, power, accuracy, pp)
        }
    }

    /// Status move aimed at the opponent
    const fn status(move_type: Type, accuracy: u8, pp: u8) -> Self {
        Self {
            category: MoveCategory::Status,
            ..Self::physical(move_type, 0, accuracy, pp)
        }
    }

    /// Status move that does not target the opponent directly
    const fn self_status(move_type: Type, pp: u8, target: MoveTarget) -> Self {
        Self {
            category: MoveCategory::Status,
            accuracy: None,
            target,
            ..Self::physical(move_type, 0, 0, pp)
        }
    }

    const fn contact(self) -> Self {
        Self {
            contact: true,
            ..self
        }
    }

    const fn priority(self, priority: i8) -> Self {
        Self { priority, ..self }
    }

    const fn never_miss(self) -> Self {
        Self {
            accuracy: None,
            ..self
        }
    }
}

const PHYSICAL_TYPES: [Type; 10] = [
    Type::Normal,
    Type::Fighting,
    Type::Flying,
    Type::Poison,
    Type::Ground,
    Type::Rock,
    Type::Bug,
    Type::Ghost,
    Type::Steel,
    Type::Typeless,
];

impl MoveName {
    pub fn data(self) -> MoveData {
        use MoveName::*;
        use MoveTarget::*;
        use Type as T;
        match self {
            Tackle => MoveData::physical(T::Normal, 40, 100, 35).contact(),
            BodySlam => MoveData::physical(T::Normal, 85, 100, 15).contact(),
            DoubleEdge => MoveData::physical(T::Normal, 120, 100, 15).contact(),
            Return => MoveData::physical(T::Normal, 102, 100, 20).contact(),
            Facade => MoveData::physical(T::Normal, 70, 100, 20).contact(),
            HyperBeam => MoveData::special(T::Normal, 150, 90, 5),
            GigaImpact => MoveData::physical(T::Normal, 150, 90, 5).contact(),
            Explosion => MoveData::physical(T::Normal, 250, 100, 5),
            SelfDestruct => MoveData::physical(T::Normal, 200, 100, 5),
            QuickAttack => MoveData::physical(T::Normal, 40, 100, 30).contact().priority(1),
            ExtremeSpeed => MoveData::physical(T::Normal, 80, 100, 5).contact().priority(2),
            FakeOut => MoveData::physical(T::Normal, 40, 100, 10).contact().priority(3),
            Slash => MoveData::physical(T::Normal, 70, 100, 20).contact(),
            HyperVoice => MoveData::special(T::Normal, 90, 100, 10),
            SuperFang => MoveData::physical(T::Normal, 0, 90, 10).contact(),
            SonicBoom => MoveData::special(T::Normal, 0, 90, 20),
            Endeavor => MoveData::physical(T::Normal, 0, 100, 5).contact(),
            RapidSpin => MoveData::physical(T::Normal, 50, 100, 40).contact(),
            Snore => MoveData::special(T::Normal, 50, 100, 15),
            Struggle => MoveData::physical(T::Normal, 50, 100, 1).contact().never_miss(),
            Swift => MoveData::special(T::Normal, 60, 100, 20).never_miss(),
            HiddenPower => MoveData::special(T::Normal, 60, 100, 15),
            TriAttack => MoveData::special(T::Normal, 80, 100, 10),
            Thrash => MoveData::physical(T::Normal, 120, 100, 10).contact(),
            Wrap => MoveData::physical(T::Normal, 15, 90, 20).contact(),
            Bind => MoveData::physical(T::Normal, 15, 85, 20).contact(),
            Bide => MoveData::physical(T::Normal, 0, 100, 10).contact().never_miss().priority(1),
            SpitUp => MoveData::special(T::Normal, 0, 100, 10),
            Guillotine => MoveData::physical(T::Normal, 0, 30, 5).contact(),
            HornDrill => MoveData::physical(T::Normal, 0, 30, 5).contact(),
            SwordsDance => MoveData::self_status(T::Normal, 20, User),
            BellyDrum => MoveData::self_status(T::Normal, 10, User),
            Substitute => MoveData::self_status(T::Normal, 10, User),
            Protect => MoveData::self_status(T::Normal, 10, User).priority(4),
            Endure => MoveData::self_status(T::Normal, 10, User).priority(4),
            Encore => MoveData::status(T::Normal, 100, 5),
            Disable => MoveData::status(T::Normal, 100, 20),
            Roar => MoveData::status(T::Normal, 100, 20).never_miss().priority(-6),
            Whirlwind => MoveData::status(T::Normal, 100, 20).never_miss().priority(-6),
            BatonPass => MoveData::self_status(T::Normal, 40, User),
            Recover => MoveData::self_status(T::Normal, 10, User),
            SoftBoiled => MoveData::self_status(T::Normal, 10, User),
            MilkDrink => MoveData::self_status(T::Normal, 10, User),
            SlackOff => MoveData::self_status(T::Normal, 10, User),
            MorningSun => MoveData::self_status(T::Normal, 5, User),
            Moonlight => MoveData::self_status(T::Normal, 5, User),
            Wish => MoveData::self_status(T::Normal, 10, UserSide),
            SleepTalk => MoveData::self_status(T::Normal, 10, User),
            Yawn => MoveData::status(T::Normal, 100, 10).never_miss(),
            PerishSong => MoveData::self_status(T::Normal, 5, Field),
            MeanLook => MoveData::status(T::Normal, 100, 5).never_miss(),
            FocusEnergy => MoveData::self_status(T::Normal, 30, User),
            Charm => MoveData::status(T::Normal, 100, 20),
            Growl => MoveData::status(T::Normal, 100, 40),
            Stockpile => MoveData::self_status(T::Normal, 20, User),
            Swallow => MoveData::self_status(T::Normal, 10, User),
            Splash => MoveData::self_status(T::Normal, 40, User),
            Safeguard => MoveData::self_status(T::Normal, 25, UserSide),
            LuckyChant => MoveData::self_status(T::Normal, 30, UserSide),
            Swagger => MoveData::status(T::Normal, 85, 15),
            PainSplit => MoveData::status(T::Normal, 100, 20).never_miss(),
            HealBell => MoveData::self_status(T::Normal, 5, UserSide),
            ShellSmash => MoveData::self_status(T::Normal, 15, User),

            Flamethrower => MoveData::special(T::Fire, 90, 100, 15),
            FireBlast => MoveData::special(T::Fire, 110, 85, 5),
            FirePunch => MoveData::physical(T::Fire, 75, 100, 15).contact(),
            FlareBlitz => MoveData::physical(T::Fire, 120, 100, 15).contact(),
            Overheat => MoveData::special(T::Fire, 130, 90, 5),
            FireSpin => MoveData::special(T::Fire, 35, 85, 15),
            FlameWheel => MoveData::physical(T::Fire, 60, 100, 25).contact(),
            SacredFire => MoveData::physical(T::Fire, 100, 95, 5),
            WillOWisp => MoveData::status(T::Fire, 85, 15),
            SunnyDay => MoveData::self_status(T::Fire, 5, Field),

            Surf => MoveData::special(T::Water, 90, 100, 15),
            HydroPump => MoveData::special(T::Water, 110, 80, 5),
            Waterfall => MoveData::physical(T::Water, 80, 100, 15).contact(),
            Scald => MoveData::special(T::Water, 80, 100, 15),
            AquaJet => MoveData::physical(T::Water, 40, 100, 20).contact().priority(1),
            FlipTurn => MoveData::physical(T::Water, 60, 100, 20).contact(),
            Crabhammer => MoveData::physical(T::Water, 100, 90, 10).contact(),
            RainDance => MoveData::self_status(T::Water, 5, Field),
            AquaRing => MoveData::self_status(T::Water, 20, User),
            WaterSport => MoveData::self_status(T::Water, 15, Field),

            Thunderbolt => MoveData::special(T::Electric, 90, 100, 15),
            Thunder => MoveData::special(T::Electric, 110, 70, 10),
            ThunderPunch => MoveData::physical(T::Electric, 75, 100, 15).contact(),
            VoltSwitch => MoveData::special(T::Electric, 70, 100, 20),
            Discharge => MoveData::special(T::Electric, 80, 100, 15),
            VoltTackle => MoveData::physical(T::Electric, 120, 100, 15).contact(),
            ThunderWave => MoveData::status(T::Electric, 90, 20),
            MagnetRise => MoveData::self_status(T::Electric, 10, User),

            GigaDrain => MoveData::special(T::Grass, 75, 100, 10),
            LeafStorm => MoveData::special(T::Grass, 130, 90, 5),
            EnergyBall => MoveData::special(T::Grass, 90, 100, 10),
            SolarBeam => MoveData::special(T::Grass, 120, 100, 10),
            PowerWhip => MoveData::physical(T::Grass, 120, 85, 10).contact(),
            SeedBomb => MoveData::physical(T::Grass, 80, 100, 15),
            WoodHammer => MoveData::physical(T::Grass, 120, 100, 15).contact(),
            PetalDance => MoveData::special(T::Grass, 120, 100, 10).contact(),
            LeechSeed => MoveData::status(T::Grass, 90, 10),
            Spore => MoveData::status(T::Grass, 100, 15),
            SleepPowder => MoveData::status(T::Grass, 75, 15),
            StunSpore => MoveData::status(T::Grass, 75, 30),
            Synthesis => MoveData::self_status(T::Grass, 5, User),
            Ingrain => MoveData::self_status(T::Grass, 20, User),
            Aromatherapy => MoveData::self_status(T::Grass, 5, UserSide),

            IceBeam => MoveData::special(T::Ice, 90, 100, 10),
            Blizzard => MoveData::special(T::Ice, 110, 70, 5),
            IcePunch => MoveData::physical(T::Ice, 75, 100, 15).contact(),
            IceShard => MoveData::physical(T::Ice, 40, 100, 30).priority(1),
            SheerCold => MoveData::special(T::Ice, 0, 30, 5),
            Haze => MoveData::self_status(T::Ice, 30, Field),
            Mist => MoveData::self_status(T::Ice, 30, UserSide),
            Hail => MoveData::self_status(T::Ice, 10, Field),

            CloseCombat => MoveData::physical(T::Fighting, 120, 100, 5).contact(),
            DrainPunch => MoveData::physical(T::Fighting, 75, 100, 10).contact(),
            BrickBreak => MoveData::physical(T::Fighting, 75, 100, 15).contact(),
            CrossChop => MoveData::physical(T::Fighting, 100, 80, 5).contact(),
            HighJumpKick => MoveData::physical(T::Fighting, 130, 90, 10).contact(),
            JumpKick => MoveData::physical(T::Fighting, 100, 95, 10).contact(),
            FocusBlast => MoveData::special(T::Fighting, 120, 70, 5),
            MachPunch => MoveData::physical(T::Fighting, 40, 100, 30).contact().priority(1),
            Superpower => MoveData::physical(T::Fighting, 120, 100, 5).contact(),
            AuraSphere => MoveData::special(T::Fighting, 80, 100, 20).never_miss(),
            SeismicToss => MoveData::physical(T::Fighting, 0, 100, 20).contact(),
            Counter => MoveData::physical(T::Fighting, 0, 100, 20).contact().priority(-5),
            Detect => MoveData::self_status(T::Fighting, 5, User).priority(4),
            BulkUp => MoveData::self_status(T::Fighting, 20, User),

            SludgeBomb => MoveData::special(T::Poison, 90, 100, 10),
            PoisonJab => MoveData::physical(T::Poison, 80, 100, 20).contact(),
            GunkShot => MoveData::physical(T::Poison, 120, 80, 5),
            Toxic => MoveData::status(T::Poison, 90, 10),
            ToxicSpikes => MoveData::self_status(T::Poison, 20, OpponentSide),

            Earthquake => MoveData::physical(T::Ground, 100, 100, 10),
            EarthPower => MoveData::special(T::Ground, 90, 100, 10),
            Fissure => MoveData::physical(T::Ground, 0, 30, 5),
            Spikes => MoveData::self_status(T::Ground, 20, OpponentSide),
            MudSport => MoveData::self_status(T::Ground, 15, Field),

            Fly => MoveData::physical(T::Flying, 90, 95, 15).contact(),
            Bounce => MoveData::physical(T::Flying, 85, 85, 5).contact(),
            BraveBird => MoveData::physical(T::Flying, 120, 100, 15).contact(),
            AirSlash => MoveData::special(T::Flying, 75, 95, 15),
            DrillPeck => MoveData::physical(T::Flying, 80, 100, 20).contact(),
            Hurricane => MoveData::special(T::Flying, 110, 70, 10),
            Roost => MoveData::self_status(T::Flying, 10, User),
            Tailwind => MoveData::self_status(T::Flying, 15, UserSide),
            Defog => MoveData::status(T::Flying, 100, 15).never_miss(),

            Psychic => MoveData::special(T::Psychic, 90, 100, 10),
            Psyshock => MoveData::special(T::Psychic, 80, 100, 10),
            ZenHeadbutt => MoveData::physical(T::Psychic, 80, 90, 15).contact(),
            MirrorCoat => MoveData::special(T::Psychic, 0, 100, 20).priority(-5),
            CalmMind => MoveData::self_status(T::Psychic, 20, User),
            Agility => MoveData::self_status(T::Psychic, 30, User),
            Amnesia => MoveData::self_status(T::Psychic, 20, User),
            CosmicPower => MoveData::self_status(T::Psychic, 20, User),
            Reflect => MoveData::self_status(T::Psychic, 20, UserSide),
            LightScreen => MoveData::self_status(T::Psychic, 30, UserSide),
            Rest => MoveData::self_status(T::Psychic, 10, User),
            Hypnosis => MoveData::status(T::Psychic, 60, 20),
            TrickRoom => MoveData::self_status(T::Psychic, 5, Field).priority(-7),
            MagicRoom => MoveData::self_status(T::Psychic, 10, Field).priority(-7),
            Gravity => MoveData::self_status(T::Psychic, 5, Field),
            HealBlock => MoveData::status(T::Psychic, 100, 15),
            Imprison => MoveData::self_status(T::Psychic, 10, User),
            Trick => MoveData::status(T::Psychic, 100, 10),

            UTurn => MoveData::physical(T::Bug, 70, 100, 20).contact(),
            XScissor => MoveData::physical(T::Bug, 80, 100, 15).contact(),
            Megahorn => MoveData::physical(T::Bug, 120, 85, 10).contact(),
            BugBuzz => MoveData::special(T::Bug, 90, 100, 10),
            HealOrder => MoveData::self_status(T::Bug, 10, User),
            QuiverDance => MoveData::self_status(T::Bug, 20, User),

            StoneEdge => MoveData::physical(T::Rock, 100, 80, 5),
            RockSlide => MoveData::physical(T::Rock, 75, 90, 10),
            HeadSmash => MoveData::physical(T::Rock, 150, 80, 5).contact(),
            StealthRock => MoveData::self_status(T::Rock, 20, OpponentSide),
            Sandstorm => MoveData::self_status(T::Rock, 10, Field),

            ShadowBall => MoveData::special(T::Ghost, 80, 100, 15),
            ShadowSneak => MoveData::physical(T::Ghost, 40, 100, 30).contact().priority(1),
            ShadowClaw => MoveData::physical(T::Ghost, 70, 100, 15).contact(),
            NightShade => MoveData::special(T::Ghost, 0, 100, 15),
            ConfuseRay => MoveData::status(T::Ghost, 100, 10),
            Curse => MoveData::self_status(T::Ghost, 10, User),

            Outrage => MoveData::physical(T::Dragon, 120, 100, 10).contact(),
            DracoMeteor => MoveData::special(T::Dragon, 130, 90, 5),
            DragonPulse => MoveData::special(T::Dragon, 85, 100, 10),
            DragonClaw => MoveData::physical(T::Dragon, 80, 100, 15).contact(),
            DragonTail => MoveData::physical(T::Dragon, 60, 90, 10).contact().priority(-6),
            DragonRage => MoveData::special(T::Dragon, 0, 100, 10),
            DragonDance => MoveData::self_status(T::Dragon, 20, User),

            Crunch => MoveData::physical(T::Dark, 80, 100, 15).contact(),
            KnockOff => MoveData::physical(T::Dark, 65, 100, 20).contact(),
            SuckerPunch => MoveData::physical(T::Dark, 70, 100, 5).contact().priority(1),
            DarkPulse => MoveData::special(T::Dark, 80, 100, 15),
            Taunt => MoveData::status(T::Dark, 100, 20),
            Torment => MoveData::status(T::Dark, 100, 15),
            NastyPlot => MoveData::self_status(T::Dark, 20, User),

            IronHead => MoveData::physical(T::Steel, 80, 100, 15).contact(),
            FlashCannon => MoveData::special(T::Steel, 80, 100, 10),
            MeteorMash => MoveData::physical(T::Steel, 90, 90, 10).contact(),
            BulletPunch => MoveData::physical(T::Steel, 40, 100, 30).contact().priority(1),
            IronDefense => MoveData::self_status(T::Steel, 15, User),

            Moonblast => MoveData::special(T::Fairy, 95, 100, 15),
            PlayRough => MoveData::physical(T::Fairy, 90, 90, 10).contact(),
            DazzlingGleam => MoveData::special(T::Fairy, 80, 100, 10),
        }
    }

    /// Type of the move in a generation, before anything that depends on the
    /// user (Hidden Power)
    pub fn move_type(self, generation: Generation) -> Type {
        match self {
            MoveName::Curse if generation <= Generation::Four => Type::Typeless,
            MoveName::Struggle if generation >= Generation::Five => Type::Typeless,
            MoveName::Charm | MoveName::Moonlight if generation >= Generation::Six => Type::Fairy,
            _ => self.data().move_type,
        }
    }

    /// Before gen 4 a damaging move is physical or special by its type
    pub fn category(self, generation: Generation) -> MoveCategory {
        let data = self.data();
        if data.category == MoveCategory::Status || !generation.category_by_type() {
            return data.category;
        }
        if PHYSICAL_TYPES.contains(&self.move_type(generation)) {
            MoveCategory::Physical
        } else {
            MoveCategory::Special
        }
    }

    pub fn is_damaging(self) -> bool {
        self.data().category != MoveCategory::Status
    }

    pub fn is_physical(self, generation: Generation) -> bool {
        self.category(generation) == MoveCategory::Physical
    }

    /// Struggle is selected by the engine, never from the move list
    pub fn is_regular(self) -> bool {
        self != MoveName::Struggle
    }

    pub fn priority(self, generation: Generation) -> i8 {
        match self {
            MoveName::ExtremeSpeed | MoveName::FakeOut if generation <= Generation::Four => 1,
            MoveName::Protect | MoveName::Detect | MoveName::Endure if generation <= Generation::Four => 3,
            _ => self.data().priority,
        }
    }

    pub fn base_pp(self) -> u8 {
        self.data().pp
    }

    pub fn accuracy(self, generation: Generation) -> Option<u8> {
        match self {
            MoveName::ThunderWave if generation <= Generation::Six => Some(100),
            MoveName::Roar | MoveName::Whirlwind if generation <= Generation::Five => Some(100),
            _ => self.data().accuracy,
        }
    }

    pub fn power(self, generation: Generation) -> u8 {
        use MoveName::*;
        match self {
            Tackle if generation <= Generation::Four => 35,
            DoubleEdge if generation == Generation::One => 100,
            Explosion if generation <= Generation::Four => 250,
            RapidSpin if generation <= Generation::Seven => 20,
            KnockOff if generation <= Generation::Five => 20,
            Thrash | PetalDance if generation <= Generation::Four => 90,
            Outrage if generation <= Generation::Three => 90,
            HighJumpKick if generation <= Generation::Four => 100,
            JumpKick if generation <= Generation::Four => 85,
            SuckerPunch if generation <= Generation::Six => 80,
            Flamethrower | Thunderbolt | IceBeam | Surf if generation <= Generation::Five => 95,
            FireBlast | Blizzard | Thunder | HydroPump if generation <= Generation::Five => 120,
            _ => self.data().power,
        }
    }

    pub fn is_healing(self) -> bool {
        use MoveName::*;
        matches!(
            self,
            HealOrder
                | MilkDrink
                | Moonlight
                | MorningSun
                | Recover
                | Rest
                | Roost
                | SlackOff
                | SoftBoiled
                | Swallow
                | Synthesis
                | Wish
        )
    }

    pub fn is_blocked_by_gravity(self) -> bool {
        use MoveName::*;
        matches!(
            self,
            Bounce | Fly | HighJumpKick | JumpKick | MagnetRise | Splash
        )
    }

    pub fn thaws_user(self) -> bool {
        use MoveName::*;
        matches!(self, FlameWheel | SacredFire | Scald | FlareBlitz)
    }

    pub fn usable_while_sleeping(self) -> bool {
        matches!(self, MoveName::SleepTalk | MoveName::Snore)
    }

    pub fn is_high_crit(self) -> bool {
        use MoveName::*;
        matches!(
            self,
            Slash | CrossChop | StoneEdge | ShadowClaw | Crabhammer
        )
    }

    pub fn is_sound(self) -> bool {
        use MoveName::*;
        matches!(
            self,
            BugBuzz | HyperVoice | PerishSong | Roar | Snore | Growl
        )
    }

    pub fn is_punch(self) -> bool {
        use MoveName::*;
        matches!(
            self,
            FirePunch | IcePunch | ThunderPunch | DrainPunch | MachPunch | BulletPunch | MeteorMash
        )
    }

    pub fn is_ohko(self) -> bool {
        use MoveName::*;
        matches!(self, Fissure | Guillotine | HornDrill | SheerCold)
    }

    /// Fraction of damage dealt returned to the user as recoil
    pub fn recoil(self, generation: Generation) -> Option<Rational> {
        use MoveName::*;
        match self {
            DoubleEdge if generation <= Generation::Three => Some(Rational::new(1, 4)),
            DoubleEdge | BraveBird | FlareBlitz | VoltTackle | WoodHammer => Some(Rational::new(1, 3)),
            HeadSmash => Some(Rational::new(1, 2)),
            Struggle if generation <= Generation::Three => Some(Rational::new(1, 4)),
            _ => None,
        }
    }

    /// Fraction of damage dealt healed by the user
    pub fn drain(self) -> Option<Rational> {
        match self {
            MoveName::GigaDrain | MoveName::DrainPunch => Some(Rational::new(1, 2)),
            _ => None,
        }
    }

    pub fn is_phazing(self) -> bool {
        matches!(
            self,
            MoveName::Roar | MoveName::Whirlwind | MoveName::DragonTail
        )
    }

    /// Moves that let the user switch out after they hit
    pub fn is_switching(self) -> bool {
        matches!(
            self,
            MoveName::UTurn | MoveName::VoltSwitch | MoveName::FlipTurn | MoveName::BatonPass
        )
    }

    /// Two-turn moves that charge on the first turn
    pub fn is_charging(self) -> bool {
        matches!(self, MoveName::SolarBeam | MoveName::Fly | MoveName::Bounce)
    }

    pub fn requires_recharge(self) -> bool {
        matches!(self, MoveName::HyperBeam | MoveName::GigaImpact)
    }

    /// Moves that lock the user in for 2-3 turns and then confuse it
    pub fn is_rampage(self) -> bool {
        matches!(
            self,
            MoveName::Outrage | MoveName::Thrash | MoveName::PetalDance
        )
    }

    pub fn is_partial_trap(self) -> bool {
        matches!(self, MoveName::Wrap | MoveName::Bind | MoveName::FireSpin)
    }

    pub fn is_self_destruct(self) -> bool {
        matches!(self, MoveName::Explosion | MoveName::SelfDestruct)
    }

    pub fn makes_contact(self) -> bool {
        self.data().contact
    }

    pub fn is_protect(self) -> bool {
        matches!(self, MoveName::Protect | MoveName::Detect | MoveName::Endure)
    }

    /// Whether a status move passes through Protect
    pub fn bypasses_protect(self) -> bool {
        self.data().target != MoveTarget::Opponent || (self.is_phazing() && !self.is_damaging())
    }

    pub fn introduced(self) -> Generation {
        use MoveName::*;
        match self {
            FlipTurn => Generation::Eight,
            Moonblast | PlayRough | DazzlingGleam => Generation::Six,
            Scald | VoltSwitch | Psyshock | QuiverDance | ShellSmash | Hurricane | DragonTail
            | MagicRoom => Generation::Five,
            GigaImpact | FlareBlitz | AquaJet | Discharge | MagnetRise | LeafStorm
            | EnergyBall | PowerWhip | SeedBomb | WoodHammer | IceShard | CloseCombat
            | DrainPunch | FocusBlast | AuraSphere | PoisonJab | GunkShot | ToxicSpikes
            | EarthPower | BraveBird | AirSlash | Roost | Tailwind | Defog | ZenHeadbutt
            | TrickRoom | Gravity | HealBlock | UTurn | XScissor | BugBuzz | HealOrder
            | StoneEdge | HeadSmash | StealthRock | ShadowSneak | ShadowClaw | DracoMeteor
            | DragonPulse | NastyPlot | IronHead | FlashCannon | BulletPunch | DarkPulse
            | SuckerPunch | LuckyChant | AquaRing => Generation::Four,
            Facade | FakeOut | HyperVoice | Endeavor | SpitUp | Stockpile | Swallow | Yawn
            | Wish | Overheat | WillOWisp | Hail | SlackOff | Ingrain | Aromatherapy
            | SheerCold | BulkUp | CalmMind | CosmicPower | IronDefense | DragonDance
            | DragonClaw | MeteorMash | Taunt | Torment | Imprison | Trick | MudSport
            | WaterSport | VoltTackle | Superpower | BrickBreak | KnockOff => Generation::Three,
            Snore | Curse | Protect | Endure | Encore | SleepTalk | PerishSong | MeanLook
            | Charm | Safeguard | Swagger | PainSplit | HealBell | FlameWheel | SacredFire
            | SunnyDay | RainDance | Spikes | Sandstorm | RapidSpin | MilkDrink | MorningSun
            | Moonlight | Synthesis | BatonPass | BellyDrum | CrossChop | MachPunch | Detect
            | MirrorCoat | Crunch | HiddenPower | Return | ShadowBall | Megahorn | GigaDrain
            | ExtremeSpeed | SludgeBomb => Generation::Two,
            _ => Generation::One,
        }
    }

    pub fn exists_in(self, generation: Generation) -> bool {
        self.introduced() <= generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_by_type_before_gen4() {
        assert_eq!(MoveName::ShadowBall.category(Generation::Three), MoveCategory::Physical);
        assert_eq!(MoveName::ShadowBall.category(Generation::Four), MoveCategory::Special);
        assert_eq!(MoveName::Crunch.category(Generation::Three), MoveCategory::Special);
        assert_eq!(MoveName::HyperBeam.category(Generation::Two), MoveCategory::Physical);
        assert_eq!(MoveName::Toxic.category(Generation::Two), MoveCategory::Status);
    }

    #[test]
    fn test_generation_dependent_type() {
        assert_eq!(MoveName::Curse.move_type(Generation::Four), Type::Typeless);
        assert_eq!(MoveName::Curse.move_type(Generation::Five), Type::Ghost);
        assert_eq!(MoveName::Struggle.move_type(Generation::Four), Type::Normal);
        assert_eq!(MoveName::Struggle.move_type(Generation::Five), Type::Typeless);
    }

    #[test]
    fn test_priority() {
        assert_eq!(MoveName::ExtremeSpeed.priority(Generation::Four), 1);
        assert_eq!(MoveName::ExtremeSpeed.priority(Generation::Five), 2);
        assert_eq!(MoveName::Roar.priority(Generation::Four), -6);
        assert_eq!(MoveName::TrickRoom.priority(Generation::Four), -7);
        assert_eq!(MoveName::Tackle.priority(Generation::Four), 0);
    }

    #[test]
    fn test_move_lists() {
        assert!(MoveName::Wish.is_healing());
        assert!(!MoveName::Protect.is_healing());
        assert!(MoveName::Splash.is_blocked_by_gravity());
        assert!(MoveName::Scald.thaws_user());
        assert!(!MoveName::Flamethrower.thaws_user());
        assert!(!MoveName::Struggle.is_regular());
    }

    #[test]
    fn test_introduced() {
        assert!(MoveName::Tackle.exists_in(Generation::One));
        assert!(!MoveName::StealthRock.exists_in(Generation::Three));
        assert!(MoveName::StealthRock.exists_in(Generation::Four));
        assert!(!MoveName::Moonblast.exists_in(Generation::Five));
    }

    #[test]
    fn test_recoil() {
        assert_eq!(MoveName::DoubleEdge.recoil(Generation::Three), Some(Rational::new(1, 4)));
        assert_eq!(MoveName::DoubleEdge.recoil(Generation::Four), Some(Rational::new(1, 3)));
        assert_eq!(MoveName::Tackle.recoil(Generation::Four), None);
    }
}
