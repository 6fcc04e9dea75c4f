use crate::generation::Generation;
use crate::types::Type;

named_enum! {
    pub enum Species {
        Venusaur => "Venusaur",
        Charizard => "Charizard",
        Blastoise => "Blastoise",
        Pikachu => "Pikachu",
        Clefable => "Clefable",
        Alakazam => "Alakazam",
        Machamp => "Machamp",
        Golem => "Golem",
        Slowbro => "Slowbro",
        Gengar => "Gengar",
        Cloyster => "Cloyster",
        Exeggutor => "Exeggutor",
        Rhydon => "Rhydon",
        Chansey => "Chansey",
        Starmie => "Starmie",
        Tauros => "Tauros",
        Gyarados => "Gyarados",
        Lapras => "Lapras",
        Vaporeon => "Vaporeon",
        Jolteon => "Jolteon",
        Snorlax => "Snorlax",
        Zapdos => "Zapdos",
        Dragonite => "Dragonite",
        Mewtwo => "Mewtwo",
        Mew => "Mew",
        Umbreon => "Umbreon",
        Forretress => "Forretress",
        Steelix => "Steelix",
        Scizor => "Scizor",
        Heracross => "Heracross",
        Skarmory => "Skarmory",
        Smeargle => "Smeargle",
        Blissey => "Blissey",
        Suicune => "Suicune",
        Tyranitar => "Tyranitar",
        Celebi => "Celebi",
        Wobbuffet => "Wobbuffet",
        Swampert => "Swampert",
        Breloom => "Breloom",
        Slaking => "Slaking",
        Shedinja => "Shedinja",
        Salamence => "Salamence",
        Metagross => "Metagross",
        Latias => "Latias",
        Latios => "Latios",
        Jirachi => "Jirachi",
        Infernape => "Infernape",
        Garchomp => "Garchomp",
        Lucario => "Lucario",
        Hippopotas => "Hippopotas",
        Hippowdon => "Hippowdon",
        Weavile => "Weavile",
        Magnezone => "Magnezone",
        Gliscor => "Gliscor",
        Bronzong => "Bronzong",
        RotomWash => "Rotom-Wash",
        Ferrothorn => "Ferrothorn",
        Excadrill => "Excadrill",
        Volcarona => "Volcarona",
        Talonflame => "Talonflame",
        Sylveon => "Sylveon",
        Toxapex => "Toxapex",
        TapuKoko => "Tapu Koko",
        Corviknight => "Corviknight",
        Dragapult => "Dragapult",
        Cinderace => "Cinderace",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseStats {
    pub hp: u8,
    pub atk: u8,
    pub def: u8,
    pub spa: u8,
    pub spd: u8,
    pub spe: u8,
}

const fn base(stats: [u8; 6]) -> BaseStats {
    BaseStats {
        hp: stats[0],
        atk: stats[1],
        def: stats[2],
        spa: stats[3],
        spd: stats[4],
        spe: stats[5],
    }
}

impl Species {
    /// Generation the species first appears in
    pub fn introduced(self) -> Generation {
        use Species::*;
        match self {
            Venusaur | Charizard | Blastoise | Pikachu | Clefable | Alakazam | Machamp | Golem
            | Slowbro | Gengar | Cloyster | Exeggutor | Rhydon | Chansey | Starmie | Tauros
            | Gyarados | Lapras | Vaporeon | Jolteon | Snorlax | Zapdos | Dragonite | Mewtwo
            | Mew => Generation::One,
            Umbreon | Forretress | Steelix | Scizor | Heracross | Skarmory | Smeargle | Blissey
            | Suicune | Tyranitar | Celebi | Wobbuffet => Generation::Two,
            Swampert | Breloom | Slaking | Shedinja | Salamence | Metagross | Latias | Latios
            | Jirachi => Generation::Three,
            Infernape | Garchomp | Lucario | Hippopotas | Hippowdon | Weavile | Magnezone
            | Gliscor | Bronzong | RotomWash => Generation::Four,
            Ferrothorn | Excadrill | Volcarona => Generation::Five,
            Talonflame | Sylveon => Generation::Six,
            Toxapex | TapuKoko => Generation::Seven,
            Corviknight | Dragapult | Cinderace => Generation::Eight,
        }
    }

    pub fn exists_in(self, generation: Generation) -> bool {
        self.introduced() <= generation
    }

    pub fn types(self, generation: Generation) -> &'static [Type] {
        use Species::*;
        use Type::*;
        match self {
            Venusaur => &[Grass, Poison],
            Charizard => &[Fire, Flying],
            Blastoise | Vaporeon | Suicune => &[Water],
            Pikachu | Jolteon => &[Electric],
            Clefable if generation >= Generation::Six => &[Fairy],
            Clefable | Chansey | Tauros | Snorlax | Smeargle | Blissey | Slaking => &[Normal],
            Alakazam | Mewtwo | Mew | Wobbuffet => &[Psychic],
            Machamp => &[Fighting],
            Golem => &[Rock, Ground],
            Slowbro | Starmie => &[Water, Psychic],
            Gengar => &[Ghost, Poison],
            Cloyster | Lapras => &[Water, Ice],
            Exeggutor => &[Grass, Psychic],
            Rhydon => &[Ground, Rock],
            Gyarados => &[Water, Flying],
            Zapdos => &[Electric, Flying],
            Dragonite | Salamence => &[Dragon, Flying],
            Umbreon => &[Dark],
            Forretress | Scizor => &[Bug, Steel],
            Steelix => &[Steel, Ground],
            Heracross => &[Bug, Fighting],
            Skarmory => &[Steel, Flying],
            Tyranitar => &[Rock, Dark],
            Celebi => &[Psychic, Grass],
            Swampert => &[Water, Ground],
            Breloom => &[Grass, Fighting],
            Shedinja => &[Bug, Ghost],
            Metagross | Jirachi | Bronzong => &[Steel, Psychic],
            Latias | Latios => &[Dragon, Psychic],
            Infernape => &[Fire, Fighting],
            Garchomp => &[Dragon, Ground],
            Lucario => &[Fighting, Steel],
            Hippopotas | Hippowdon => &[Ground],
            Weavile => &[Dark, Ice],
            Magnezone => &[Electric, Steel],
            Gliscor => &[Ground, Flying],
            RotomWash => &[Electric, Water],
            Ferrothorn => &[Grass, Steel],
            Excadrill => &[Ground, Steel],
            Volcarona => &[Bug, Fire],
            Talonflame => &[Fire, Flying],
            Sylveon => &[Fairy],
            Toxapex => &[Poison, Water],
            TapuKoko => &[Electric, Fairy],
            Corviknight => &[Flying, Steel],
            Dragapult => &[Dragon, Ghost],
            Cinderace => &[Fire],
        }
    }

    /// Base stats for a generation. Gen 1 has a single Special stat, which
    /// is reported as both special attack and special defense.
    pub fn base_stats(self, generation: Generation) -> BaseStats {
        let stats = self.modern_base_stats();
        match self.generation_one_special() {
            Some(special) if generation == Generation::One => BaseStats {
                spa: special,
                spd: special,
                ..stats
            },
            _ => stats,
        }
    }

    fn generation_one_special(self) -> Option<u8> {
        use Species::*;
        Some(match self {
            Venusaur | Starmie | Gyarados | Dragonite | Mew => 100,
            Charizard | Blastoise | Cloyster => 85,
            Pikachu => 50,
            Clefable => 85,
            Alakazam => 135,
            Machamp | Snorlax => 65,
            Golem => 55,
            Slowbro => 80,
            Gengar => 130,
            Exeggutor | Zapdos => 125,
            Rhydon => 45,
            Chansey => 105,
            Tauros => 70,
            Lapras => 95,
            Vaporeon | Jolteon => 110,
            Mewtwo => 154,
            _ => return None,
        })
    }

    fn modern_base_stats(self) -> BaseStats {
        use Species::*;
        match self {
            Venusaur => base([80, 82, 83, 100, 100, 80]),
            Charizard => base([78, 84, 78, 109, 85, 100]),
            Blastoise => base([79, 83, 100, 85, 105, 78]),
            Pikachu => base([35, 55, 40, 50, 50, 90]),
            Clefable => base([95, 70, 73, 95, 90, 60]),
            Alakazam => base([55, 50, 45, 135, 95, 120]),
            Machamp => base([90, 130, 80, 65, 85, 55]),
            Golem => base([80, 120, 130, 55, 65, 45]),
            Slowbro => base([95, 75, 110, 100, 80, 30]),
            Gengar => base([60, 65, 60, 130, 75, 110]),
            Cloyster => base([50, 95, 180, 85, 45, 70]),
            Exeggutor => base([95, 95, 85, 125, 65, 55]),
            Rhydon => base([105, 130, 120, 45, 45, 40]),
            Chansey => base([250, 5, 5, 35, 105, 50]),
            Starmie => base([60, 75, 85, 100, 85, 115]),
            Tauros => base([75, 100, 95, 40, 70, 110]),
            Gyarados => base([95, 125, 79, 60, 100, 81]),
            Lapras => base([130, 85, 80, 85, 95, 60]),
            Vaporeon => base([130, 65, 60, 110, 95, 65]),
            Jolteon => base([65, 65, 60, 110, 95, 130]),
            Snorlax => base([160, 110, 65, 65, 110, 30]),
            Zapdos => base([90, 90, 85, 125, 90, 100]),
            Dragonite => base([91, 134, 95, 100, 100, 80]),
            Mewtwo => base([106, 110, 90, 154, 90, 130]),
            Mew => base([100, 100, 100, 100, 100, 100]),
            Umbreon => base([95, 65, 110, 60, 130, 65]),
            Forretress => base([75, 90, 140, 60, 60, 40]),
            Steelix => base([75, 85, 200, 55, 65, 30]),
            Scizor => base([70, 130, 100, 55, 80, 65]),
            Heracross => base([80, 125, 75, 40, 95, 85]),
            Skarmory => base([65, 80, 140, 40, 70, 70]),
            Smeargle => base([55, 20, 35, 20, 45, 75]),
            Blissey => base([255, 10, 10, 75, 135, 55]),
            Suicune => base([100, 75, 115, 90, 115, 85]),
            Tyranitar => base([100, 134, 110, 95, 100, 61]),
            Celebi => base([100, 100, 100, 100, 100, 100]),
            Wobbuffet => base([190, 33, 58, 33, 58, 33]),
            Swampert => base([100, 110, 90, 85, 90, 60]),
            Breloom => base([60, 130, 80, 60, 60, 70]),
            Slaking => base([150, 160, 100, 95, 65, 100]),
            Shedinja => base([1, 90, 45, 30, 30, 40]),
            Salamence => base([95, 135, 80, 110, 80, 100]),
            Metagross => base([80, 135, 130, 95, 90, 70]),
            Latias => base([80, 80, 90, 110, 130, 110]),
            Latios => base([80, 90, 80, 130, 110, 110]),
            Jirachi => base([100, 100, 100, 100, 100, 100]),
            Infernape => base([76, 104, 71, 104, 71, 108]),
            Garchomp => base([108, 130, 95, 80, 85, 102]),
            Lucario => base([70, 110, 70, 115, 70, 90]),
            Hippopotas => base([68, 72, 78, 38, 42, 32]),
            Hippowdon => base([108, 112, 118, 68, 72, 47]),
            Weavile => base([70, 120, 65, 45, 85, 125]),
            Magnezone => base([70, 70, 115, 130, 90, 60]),
            Gliscor => base([75, 95, 125, 45, 75, 95]),
            Bronzong => base([67, 89, 116, 79, 116, 33]),
            RotomWash => base([50, 65, 107, 105, 107, 86]),
            Ferrothorn => base([74, 94, 131, 54, 116, 20]),
            Excadrill => base([110, 135, 60, 50, 65, 88]),
            Volcarona => base([85, 60, 65, 135, 105, 100]),
            Talonflame => base([78, 81, 71, 74, 69, 126]),
            Sylveon => base([95, 65, 65, 110, 130, 60]),
            Toxapex => base([50, 63, 152, 53, 142, 35]),
            TapuKoko => base([70, 115, 85, 95, 75, 130]),
            Corviknight => base([98, 87, 105, 53, 85, 67]),
            Dragapult => base([88, 120, 75, 100, 75, 142]),
            Cinderace => base([80, 116, 75, 65, 75, 119]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_one_special() {
        let stats = Species::Alakazam.base_stats(Generation::One);
        assert_eq!(stats.spa, 135);
        assert_eq!(stats.spd, 135);
        let stats = Species::Alakazam.base_stats(Generation::Two);
        assert_eq!(stats.spd, 95);
    }

    #[test]
    fn test_clefable_becomes_fairy() {
        assert_eq!(Species::Clefable.types(Generation::Five), &[Type::Normal]);
        assert_eq!(Species::Clefable.types(Generation::Six), &[Type::Fairy]);
    }

    #[test]
    fn test_exists_in() {
        assert!(Species::Mew.exists_in(Generation::One));
        assert!(!Species::Garchomp.exists_in(Generation::Three));
        assert!(Species::Dragapult.exists_in(Generation::Eight));
    }

    #[test]
    fn test_types_exist_in_introducing_generation() {
        for species in Species::ALL {
            let generation = species.introduced();
            for t in species.types(generation) {
                assert!(t.exists_in(generation), "{species} {t}");
            }
        }
    }
}
