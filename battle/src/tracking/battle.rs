//! Battle - the AI's view of one battle, rebuilt from server events

use tactician_protocol::{BattleRequest, Player};
use tracing::debug;

use super::event::{Event, FieldEffect, HpReport, HpSource, SwitchIn, Volatile, WeatherSource};
use crate::data::{Ability, Item, MoveName};
use crate::error::BattleError;
use crate::generation::Generation;
use crate::known::KnownTeam;
use crate::seen::{SeenPokemon, SeenTeam};
use crate::types::{
    ActiveFlags, AnyPokemon, Countdown, EntryHazards, Environment, LockIn, Screens, SideCondition, Status,
    Team, Weather, WeatherDuration,
};

/// Which team an event concerns, relative to the AI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Ai,
    Foe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Winner(String),
    Tie,
}

/// Engine state for the search to start from
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub ai: Team,
    pub foe: Team,
    pub environment: Environment,
}

/// A battle being tracked from the AI's perspective
///
/// The AI team is known in full from its team file; the foe's team fills
/// in as the battle reveals it.
#[derive(Debug, Clone)]
pub struct Battle {
    generation: Generation,
    perspective: Option<Player>,
    ai: KnownTeam,
    foe: SeenTeam,
    environment: Environment,
    /// Team sizes announced before the perspective is known
    pending_sizes: Vec<(Player, usize)>,
    ai_on_field: bool,
    foe_on_field: bool,
    turn: u32,
    outcome: Option<Outcome>,
}

impl Battle {
    pub fn new(ai: KnownTeam) -> Self {
        let generation = ai.generation();
        Self {
            generation,
            perspective: None,
            ai,
            foe: SeenTeam::new(generation, false),
            environment: Environment::new(),
            pending_sizes: Vec::new(),
            ai_on_field: false,
            foe_on_field: false,
            turn: 0,
            outcome: None,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn perspective(&self) -> Option<Player> {
        self.perspective
    }

    pub fn set_perspective(&mut self, player: Player) -> Result<(), BattleError> {
        debug!("AI plays as {:?}", player);
        self.perspective = Some(player);
        for (player, size) in std::mem::take(&mut self.pending_sizes) {
            self.apply(&Event::TeamSize { player, size })?;
        }
        Ok(())
    }

    pub fn ai(&self) -> &KnownTeam {
        &self.ai
    }

    pub fn foe(&self) -> &SeenTeam {
        &self.foe
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Both sides have a Pokemon out
    pub fn has_started(&self) -> bool {
        self.ai_on_field && self.foe_on_field
    }

    /// Engine teams for the search. The foe's unrevealed details are left
    /// at their defaults.
    pub fn snapshot(&self) -> Result<Snapshot, BattleError> {
        if !self.has_started() {
            return Err(BattleError::NotStarted("snapshot"));
        }
        Ok(Snapshot {
            ai: Team::from(&self.ai),
            foe: Team::from(&self.foe),
            environment: self.environment,
        })
    }

    fn side(&self, player: Player) -> Result<Side, BattleError> {
        match self.perspective {
            Some(me) if me == player => Ok(Side::Ai),
            Some(_) => Ok(Side::Foe),
            None => Err(BattleError::NotStarted("battle event")),
        }
    }

    /// Side of an event about the active Pokemon, which must be out
    fn active_side(&self, player: Player) -> Result<Side, BattleError> {
        let side = self.side(player)?;
        let on_field = match side {
            Side::Ai => self.ai_on_field,
            Side::Foe => self.foe_on_field,
        };
        if on_field {
            Ok(side)
        } else {
            Err(BattleError::NotActive(player.as_str().to_string()))
        }
    }

    fn flags_mut(&mut self, side: Side) -> &mut ActiveFlags {
        match side {
            Side::Ai => &mut self.ai.flags,
            Side::Foe => &mut self.foe.flags,
        }
    }

    fn screens_mut(&mut self, side: Side) -> &mut Screens {
        match side {
            Side::Ai => &mut self.ai.screens,
            Side::Foe => &mut self.foe.screens,
        }
    }

    fn hazards_mut(&mut self, side: Side) -> &mut EntryHazards {
        match side {
            Side::Ai => &mut self.ai.hazards,
            Side::Foe => &mut self.foe.hazards,
        }
    }

    fn status_mut(&mut self, side: Side) -> &mut Status {
        match side {
            Side::Ai => &mut self.ai.active_mut().pokemon_mut().status,
            Side::Foe => &mut self.foe.active_mut().status,
        }
    }

    /// Item of the active Pokemon, as far as it is known
    fn active_item(&self, side: Side) -> Option<Item> {
        match side {
            Side::Ai if self.ai_on_field => self.ai.active().pokemon().item.held(),
            Side::Foe if self.foe_on_field => self.foe.active().item.and_then(|item| item.held()),
            _ => None,
        }
    }

    fn active_ability(&self, side: Side) -> Option<Ability> {
        match side {
            Side::Ai if self.ai_on_field => Some(self.ai.active().pokemon().ability),
            Side::Foe if self.foe_on_field => self.foe.active().ability,
            _ => None,
        }
    }

    /// Update state from one event
    pub fn apply(&mut self, event: &Event) -> Result<(), BattleError> {
        match event {
            Event::TeamSize { player, size } => match self.perspective {
                None => self.pending_sizes.push((*player, *size)),
                Some(_) => {
                    if self.side(*player)? == Side::Foe {
                        self.foe.set_size(*size)?;
                    }
                }
            },
            Event::Generation(number) => {
                let actual = Generation::from_number(*number).ok_or_else(|| BattleError::UnknownName {
                    kind: "Generation",
                    value: number.to_string(),
                })?;
                if actual != self.generation {
                    return Err(BattleError::GenerationMismatch {
                        expected: self.generation,
                        actual,
                    });
                }
            }
            Event::TeamRevealed {
                player,
                species,
                level,
                gender,
            } => {
                if self.side(*player)? == Side::Foe && self.foe.position(|member| member.species == *species).is_none()
                {
                    self.foe
                        .add(SeenPokemon::new(*species, species.as_str(), *level, *gender))?;
                }
            }
            Event::Switch { switch_in, dragged } => self.switch(switch_in, *dragged)?,
            Event::Move {
                player,
                move_name,
                called,
                miss,
            } => self.use_move(*player, *move_name, *called, *miss)?,
            Event::Cant(player) => {
                let side = self.active_side(*player)?;
                self.advance_sleep(side);
                let flags = self.flags_mut(side);
                if flags.is_recharging() {
                    flags.lock_in = LockIn::None;
                }
                flags.last_used_move.moved_this_turn = true;
            }
            Event::CriticalHit(player) => {
                self.active_side(*player)?;
            }
            Event::Miss(player) | Event::MoveFailed(player) => {
                let side = self.active_side(*player)?;
                self.flags_mut(side).last_used_move.consecutive_successes = 0;
            }
            Event::Hp { player, hp, source } => self.set_hp(*player, *hp, *source)?,
            Event::Status { player, status } => {
                let side = self.active_side(*player)?;
                let rested = self.flags_mut(side).last_used_move.move_name == Some(MoveName::Rest);
                let status = match status {
                    Status::Sleep { .. } if rested => Status::Rest { turns_slept: 0 },
                    other => *other,
                };
                *self.status_mut(side) = status;
            }
            Event::CureStatus(player) => {
                let side = self.active_side(*player)?;
                *self.status_mut(side) = Status::Clear;
            }
            Event::CureTeam(player) => match self.side(*player)? {
                Side::Ai => {
                    for member in self.ai.members_mut() {
                        member.pokemon_mut().status = Status::Clear;
                    }
                }
                Side::Foe => {
                    for member in self.foe.members_mut() {
                        member.status = Status::Clear;
                    }
                }
            },
            Event::Boost { player, stat, amount } => {
                let side = self.active_side(*player)?;
                self.flags_mut(side).stages.boost(*stat, *amount);
            }
            Event::SetBoost { player, stat, amount } => {
                let side = self.active_side(*player)?;
                self.flags_mut(side).stages.set(*stat, *amount);
            }
            Event::ClearAllBoosts => {
                self.ai.flags.stages.clear();
                self.foe.flags.stages.clear();
            }
            Event::ClearNegativeBoosts(player) => {
                let side = self.active_side(*player)?;
                self.flags_mut(side).stages.clear_negative();
            }
            Event::VolatileStart { player, volatile } => {
                let side = self.active_side(*player)?;
                self.start_volatile(side, *volatile);
            }
            Event::VolatileEnd { player, volatile } => {
                let side = self.active_side(*player)?;
                end_volatile(self.flags_mut(side), *volatile);
            }
            Event::SideStart { player, condition } => {
                let side = self.side(*player)?;
                self.start_side_condition(side, *condition);
            }
            Event::SideEnd { player, condition } => {
                let side = self.side(*player)?;
                self.end_side_condition(side, *condition);
            }
            Event::Weather { weather, source } => self.weather(*weather, *source)?,
            Event::FieldStart(effect) => {
                let countdown = self.field_countdown(*effect);
                if !countdown.is_active() {
                    countdown.activate(5);
                }
            }
            Event::FieldEnd(effect) => self.field_countdown(*effect).deactivate(),
            Event::ItemRevealed { player, item, tricked } => match self.active_side(*player)? {
                Side::Ai => {
                    if *tricked {
                        self.ai.active_mut().pokemon_mut().item.set(*item);
                    }
                }
                Side::Foe => {
                    if *tricked || self.foe.active().item.is_none() {
                        self.foe.active_mut().reveal_item(*item);
                    }
                }
            },
            Event::ItemLost {
                player,
                item,
                destroyed,
            } => {
                let held = match self.active_side(*player)? {
                    Side::Ai => &mut self.ai.active_mut().pokemon_mut().item,
                    Side::Foe => {
                        let foe = self.foe.active_mut();
                        if foe.item.is_none() {
                            foe.reveal_item(*item);
                        }
                        foe.item.get_or_insert_default()
                    }
                };
                if *destroyed {
                    held.destroy();
                } else {
                    held.remove();
                }
            }
            Event::AbilityRevealed { player, ability } => {
                if self.active_side(*player)? == Side::Foe {
                    self.foe.active_mut().reveal_ability(*ability);
                }
            }
            Event::Protect(player) => {
                let side = self.active_side(*player)?;
                self.flags_mut(side).protecting = true;
            }
            Event::Charging { player, move_name } => {
                let side = self.active_side(*player)?;
                self.flags_mut(side).lock_in = LockIn::ChargingUp(*move_name);
            }
            Event::MustRecharge(player) => {
                let side = self.active_side(*player)?;
                self.flags_mut(side).lock_in = LockIn::Recharging;
            }
            Event::Faint(player) => match self.active_side(*player)? {
                Side::Ai => self.ai.active_mut().pokemon_mut().faint(),
                Side::Foe => {
                    let foe = self.foe.active_mut();
                    foe.hp.set_current(0);
                    foe.status = Status::Clear;
                }
            },
            Event::Upkeep => self.upkeep(),
            Event::Turn(turn) => {
                debug!("Turn {} begins", turn);
                self.turn = *turn;
            }
            Event::Win(winner) => self.outcome = Some(Outcome::Winner(winner.clone())),
            Event::Tie => self.outcome = Some(Outcome::Tie),
        }
        Ok(())
    }

    fn switch(&mut self, switch_in: &SwitchIn, dragged: bool) -> Result<(), BattleError> {
        let side = self.side(switch_in.player)?;
        let baton_pass = !dragged && self.flags_mut(side).last_used_move.baton_passing;
        match side {
            Side::Ai => {
                let index = self
                    .ai
                    .position(|member| member.name() == switch_in.nickname)
                    .or_else(|| self.ai.position(|member| member.species() == switch_in.species))
                    .ok_or_else(|| BattleError::UnknownPokemon(switch_in.nickname.clone()))?;
                if !self.ai_on_field {
                    self.ai.set_lead(index);
                    self.ai_on_field = true;
                } else if index != self.ai.active_index() {
                    self.ai.switch_to(index, baton_pass);
                }
                if let Some(hp) = switch_in.hp {
                    self.ai.active_mut().pokemon_mut().hp.set_current(hp.current);
                }
            }
            Side::Foe => {
                let known = self.foe.position(|member| member.nickname == switch_in.nickname);
                // Team preview names members by species until they appear
                let previewed = || {
                    self.foe.position(|member| {
                        member.species == switch_in.species && member.nickname == member.species.as_str()
                    })
                };
                let index = match known.or_else(previewed) {
                    Some(index) => index,
                    None => self.foe.add(SeenPokemon::new(
                        switch_in.species,
                        switch_in.nickname.clone(),
                        switch_in.level,
                        switch_in.gender,
                    ))?,
                };
                if let Some(member) = self.foe.get_mut(index) {
                    member.nickname = switch_in.nickname.clone();
                }
                if !self.foe_on_field {
                    self.foe.set_lead(index);
                    self.foe_on_field = true;
                } else if index != self.foe.active_index() {
                    self.foe.switch_to(index, baton_pass);
                }
                if let Some(hp) = switch_in.hp {
                    self.foe.active_mut().set_hp(hp.current, hp.max);
                }
                // The status in the switch line is authoritative; keep the
                // toxic counter the switch just reset
                if switch_in.status.name() != self.foe.active().status.name() {
                    self.foe.active_mut().status = switch_in.status;
                }
            }
        }
        Ok(())
    }

    fn advance_sleep(&mut self, side: Side) {
        let ability = self.active_ability(side).unwrap_or(Ability::None);
        self.status_mut(side).advance_from_move(ability, false);
    }

    fn use_move(&mut self, player: Player, move_name: MoveName, called: bool, miss: bool) -> Result<(), BattleError> {
        let side = self.active_side(player)?;
        if !called {
            self.advance_sleep(side);
            let other = match side {
                Side::Ai => Side::Foe,
                Side::Foe => Side::Ai,
            };
            let cost = if self.active_ability(other) == Some(Ability::Pressure) { 2 } else { 1 };
            match side {
                Side::Ai => {
                    let locked = self.ai.flags.is_locked_in_by_move();
                    if let Some(move_) = self.ai.active_mut().pokemon_mut().moves.find_mut(move_name) {
                        if !locked {
                            move_.reduce_pp(cost);
                        }
                    }
                }
                Side::Foe => {
                    if move_name != MoveName::Struggle {
                        self.foe.active_mut().reveal_move(move_name)?;
                    }
                }
            }
        }

        let flags = self.flags_mut(side);
        if flags.lock_in == LockIn::ChargingUp(move_name) {
            flags.lock_in = LockIn::None;
        }
        flags.last_used_move.record(move_name, !miss);
        if move_name == MoveName::BatonPass && !miss {
            flags.last_used_move.baton_passing = true;
        }
        if move_name == MoveName::Wish && !miss {
            match side {
                Side::Ai => self.ai.wish.activate(),
                Side::Foe => self.foe.wish.activate(),
            };
        }
        Ok(())
    }

    fn set_hp(&mut self, player: Player, hp: HpReport, source: HpSource) -> Result<(), BattleError> {
        match self.active_side(player)? {
            Side::Ai => self.ai.active_mut().pokemon_mut().hp.set_current(hp.current),
            Side::Foe => {
                let foe = self.foe.active_mut();
                foe.set_hp(hp.current, hp.max);
                match source {
                    HpSource::Item(item) if foe.item.is_none() => foe.reveal_item(item),
                    HpSource::Ability(ability) => foe.reveal_ability(ability),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn start_volatile(&mut self, side: Side, volatile: Volatile) {
        let substitute = match side {
            Side::Ai => self.ai.active().pokemon().hp.max() / 4,
            Side::Foe => self.foe.active().to_pokemon(self.generation).hp.max() / 4,
        };
        let flags = self.flags_mut(side);
        match volatile {
            Volatile::Confusion => {
                flags.confuse();
            }
            Volatile::Substitute => flags.substitute = substitute,
            Volatile::LeechSeed => flags.leech_seeded = true,
            Volatile::Taunt => {
                flags.taunt.activate(ActiveFlags::TAUNT_TURNS);
            }
            Volatile::Encore => {
                flags.encore.activate(ActiveFlags::ENCORE_TURNS);
            }
            Volatile::Yawn => {
                flags.hit_with_yawn();
            }
            Volatile::PerishSong => {
                flags.activate_perish_song();
            }
            Volatile::Curse => flags.cursed = true,
            Volatile::Ingrain => flags.ingrained = true,
            Volatile::AquaRing => flags.aqua_ring = true,
            Volatile::MagnetRise => {
                flags.magnet_rise.activate(ActiveFlags::MAGNET_RISE_TURNS);
            }
            Volatile::HealBlock => {
                flags.heal_block.activate(ActiveFlags::HEAL_BLOCK_TURNS);
            }
            Volatile::Torment => flags.tormented = true,
            Volatile::FocusEnergy => flags.focus_energy = true,
            Volatile::FlashFire => flags.flash_fire = true,
            Volatile::Stockpile => {
                flags.increment_stockpile();
            }
        }
    }

    fn start_side_condition(&mut self, side: Side, condition: SideCondition) {
        let screen_turns = if self.active_item(side) == Some(Item::LightClay) {
            Screens::EXTENDED
        } else {
            Screens::STANDARD
        };
        let tailwind = Screens::tailwind_duration(self.generation);
        match condition {
            SideCondition::Spikes => self.hazards_mut(side).add_spikes(),
            SideCondition::ToxicSpikes => self.hazards_mut(side).add_toxic_spikes(),
            SideCondition::StealthRock => self.hazards_mut(side).add_stealth_rock(),
            SideCondition::Reflect => self.screens_mut(side).reflect.activate(screen_turns),
            SideCondition::LightScreen => self.screens_mut(side).light_screen.activate(screen_turns),
            SideCondition::Safeguard => self.screens_mut(side).safeguard.activate(Screens::STANDARD),
            SideCondition::Mist => self.screens_mut(side).mist.activate(Screens::STANDARD),
            SideCondition::LuckyChant => self.screens_mut(side).lucky_chant.activate(Screens::STANDARD),
            SideCondition::Tailwind => self.screens_mut(side).tailwind.activate(tailwind),
        };
    }

    fn end_side_condition(&mut self, side: Side, condition: SideCondition) {
        match condition {
            SideCondition::Spikes => self.hazards_mut(side).clear_spikes(),
            SideCondition::ToxicSpikes => self.hazards_mut(side).clear_toxic_spikes(),
            SideCondition::StealthRock => self.hazards_mut(side).clear_stealth_rock(),
            SideCondition::Reflect => self.screens_mut(side).reflect.deactivate(),
            SideCondition::LightScreen => self.screens_mut(side).light_screen.deactivate(),
            SideCondition::Safeguard => self.screens_mut(side).safeguard.deactivate(),
            SideCondition::Mist => self.screens_mut(side).mist.deactivate(),
            SideCondition::LuckyChant => self.screens_mut(side).lucky_chant.deactivate(),
            SideCondition::Tailwind => self.screens_mut(side).tailwind.deactivate(),
        }
    }

    fn weather(&mut self, weather: Weather, source: WeatherSource) -> Result<(), BattleError> {
        match source {
            WeatherSource::Upkeep => {
                let expected = self.environment.weather();
                if expected != weather {
                    return Err(BattleError::WeatherMismatch {
                        reported: weather.to_string(),
                        expected: expected.to_string(),
                    });
                }
            }
            WeatherSource::Ability => {
                let extended = [Side::Ai, Side::Foe].into_iter().any(|side| {
                    self.active_ability(side).and_then(Ability::sets_weather) == Some(weather)
                        && self.active_item(side).and_then(Item::extends_weather) == Some(weather)
                });
                self.environment
                    .activate_weather_from_ability(self.generation, weather, extended);
            }
            WeatherSource::Move if weather == Weather::Clear => {
                self.environment.set_weather(Weather::Clear, WeatherDuration::Turns(0));
            }
            WeatherSource::Move => {
                let extended = [Side::Ai, Side::Foe].into_iter().any(|side| {
                    let flags = match side {
                        Side::Ai => &self.ai.flags,
                        Side::Foe => &self.foe.flags,
                    };
                    flags.moved() && self.active_item(side).and_then(Item::extends_weather) == Some(weather)
                });
                self.environment.activate_weather_from_move(weather, extended);
            }
        }
        Ok(())
    }

    fn field_countdown(&mut self, effect: FieldEffect) -> &mut Countdown {
        match effect {
            FieldEffect::Gravity => &mut self.environment.gravity,
            FieldEffect::TrickRoom => &mut self.environment.trick_room,
            FieldEffect::MagicRoom => &mut self.environment.magic_room,
            FieldEffect::MudSport => &mut self.environment.mud_sport,
            FieldEffect::WaterSport => &mut self.environment.water_sport,
        }
    }

    /// The end of the turn has been reported: count everything down the
    /// way the engine does, leaving what the server reports explicitly
    fn upkeep(&mut self) {
        self.environment.advance_one_turn();
        for side in [Side::Ai, Side::Foe] {
            let on_field = match side {
                Side::Ai => self.ai_on_field,
                Side::Foe => self.foe_on_field,
            };
            self.screens_mut(side).decrement();
            if !on_field {
                continue;
            }
            if let Status::Toxic { counter } = self.status_mut(side) {
                *counter = (*counter + 1).min(15);
            }
            let flags = self.flags_mut(side);
            flags.advance_disable();
            for countdown in [
                &mut flags.taunt,
                &mut flags.encore,
                &mut flags.magnet_rise,
                &mut flags.heal_block,
            ] {
                countdown.decrement();
            }
            flags.advance_perish_song();
            flags.reset_end_of_turn();
        }
        self.ai.wish.decrement();
        self.foe.wish.decrement();
    }

    /// Take exact HP, status and PP for the AI's team from a decision
    /// request
    pub fn apply_request(&mut self, request: &BattleRequest) -> Result<(), BattleError> {
        let Some(side) = &request.side else {
            return Ok(());
        };
        if self.perspective.is_none() {
            if let Some(player) = side.player() {
                self.set_perspective(player)?;
            }
        }

        for reported in &side.pokemon {
            let name = reported
                .ident
                .split_once(": ")
                .map_or(reported.ident.as_str(), |(_, name)| name);
            let species = reported.details().species;
            let index = self
                .ai
                .position(|member| member.name() == name)
                .or_else(|| self.ai.position(|member| member.species().as_str() == species))
                .ok_or_else(|| BattleError::UnknownPokemon(name.to_string()))?;
            let Some(member) = self.ai.get_mut(index) else {
                continue;
            };
            let pokemon = member.pokemon_mut();
            let Some(condition) = reported.condition() else {
                continue;
            };
            if condition.is_fainted() {
                pokemon.faint();
                continue;
            }
            pokemon.hp.set_current(condition.current);
            match condition.status.and_then(Status::from_protocol) {
                // Keep counters the request does not report
                Some(status) if status.name() == pokemon.status.name() => {}
                Some(Status::Sleep { .. }) if matches!(pokemon.status, Status::Rest { .. }) => {}
                Some(status) => pokemon.status = status,
                None => pokemon.status = Status::Clear,
            }
            if reported.active && self.ai_on_field && index == self.ai.active_index() {
                for slot in request.active_moves() {
                    let (Some(pp), Some(move_name)) = (slot.pp, MoveName::from_name(&slot.name)) else {
                        continue;
                    };
                    if let Some(move_) = self.ai.active_mut().pokemon_mut().moves.find_mut(move_name) {
                        move_.set_pp(pp);
                    }
                }
            }
        }
        Ok(())
    }
}

fn end_volatile(flags: &mut ActiveFlags, volatile: Volatile) {
    match volatile {
        Volatile::Confusion => flags.confusion = None,
        Volatile::Substitute => flags.substitute = 0,
        Volatile::LeechSeed => flags.leech_seeded = false,
        Volatile::Taunt => flags.taunt.deactivate(),
        Volatile::Encore => flags.encore.deactivate(),
        Volatile::Yawn => flags.yawn.deactivate(),
        Volatile::PerishSong => flags.perish_song = None,
        Volatile::Curse => flags.cursed = false,
        Volatile::Ingrain => flags.ingrained = false,
        Volatile::AquaRing => flags.aqua_ring = false,
        Volatile::MagnetRise => flags.magnet_rise.deactivate(),
        Volatile::HealBlock => flags.heal_block.deactivate(),
        Volatile::Torment => flags.tormented = false,
        Volatile::FocusEnergy => flags.focus_energy = false,
        Volatile::FlashFire => flags.flash_fire = false,
        Volatile::Stockpile => {
            flags.release_stockpile();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Nature, Species};
    use crate::known::KnownPokemon;
    use crate::stat::Spread;
    use crate::tracking::event_from_message;
    use crate::types::{Gender, Move};
    use tactician_protocol::parse_server_message;

    fn known(species: Species, ability: Ability, item: Item, moves: &[MoveName]) -> KnownPokemon {
        KnownPokemon::new(
            Generation::Four,
            species,
            None,
            100,
            Gender::Male,
            Nature::Adamant,
            Spread::neutral(Generation::Four),
            ability,
            item,
            moves.iter().map(|name| Move::new(*name, 3)).collect(),
        )
        .unwrap()
    }

    fn create_test_battle() -> Battle {
        let mut team = KnownTeam::new(Generation::Four, true);
        team.add(known(
            Species::Gyarados,
            Ability::Intimidate,
            Item::Leftovers,
            &[MoveName::Waterfall, MoveName::DragonDance, MoveName::Rest],
        ))
        .unwrap();
        team.add(known(
            Species::Jolteon,
            Ability::VoltAbsorb,
            Item::LightClay,
            &[MoveName::Thunderbolt, MoveName::Reflect],
        ))
        .unwrap();
        Battle::new(team)
    }

    fn feed(battle: &mut Battle, lines: &[&str]) -> Result<(), BattleError> {
        for line in lines {
            let message = parse_server_message(line).unwrap();
            if let Some(event) = event_from_message(&message)? {
                battle.apply(&event)?;
            }
        }
        Ok(())
    }

    fn started_battle() -> Battle {
        let mut battle = create_test_battle();
        feed(&mut battle, &["|teamsize|p1|2", "|teamsize|p2|6", "|gen|4"]).unwrap();
        battle.set_perspective(Player::P1).unwrap();
        feed(
            &mut battle,
            &[
                "|switch|p1a: Gyarados|Gyarados, M|331/331",
                "|switch|p2a: Ttar|Tyranitar, M|100/100",
                "|turn|1",
            ],
        )
        .unwrap();
        battle
    }

    #[test]
    fn test_events_before_perspective() {
        let mut battle = create_test_battle();
        let result = feed(&mut battle, &["|switch|p1a: Gyarados|Gyarados, M|331/331"]);
        assert_eq!(result, Err(BattleError::NotStarted("battle event")));
    }

    #[test]
    fn test_switch_in_and_snapshot() {
        let battle = started_battle();
        assert!(battle.has_started());
        assert_eq!(battle.turn(), 1);
        assert_eq!(battle.foe().size(), 6);
        assert_eq!(battle.foe().active().nickname, "Ttar");

        let snapshot = battle.snapshot().unwrap();
        assert_eq!(snapshot.ai.active().species, Species::Gyarados);
        assert_eq!(snapshot.foe.active().species, Species::Tyranitar);
        assert_eq!(snapshot.foe.hidden(), 5);
        assert!(snapshot.ai.is_me());
    }

    #[test]
    fn test_snapshot_needs_both_leads() {
        let battle = create_test_battle();
        assert_eq!(battle.snapshot(), Err(BattleError::NotStarted("snapshot")));
    }

    #[test]
    fn test_moves_reveal_and_spend_pp() {
        let mut battle = started_battle();
        feed(
            &mut battle,
            &[
                "|move|p1a: Gyarados|Waterfall|p2a: Ttar",
                "|-damage|p2a: Ttar|62/100",
                "|move|p2a: Ttar|Crunch|p1a: Gyarados",
                "|-damage|p1a: Gyarados|250/331",
            ],
        )
        .unwrap();

        let waterfall = battle.ai().active().pokemon().moves.find(MoveName::Waterfall).unwrap();
        assert_eq!(waterfall.pp(), waterfall.max_pp() - 1);
        assert_eq!(battle.ai().active().pokemon().hp.current(), 250);
        assert_eq!(battle.foe().active().hp.current(), 62);
        assert!(battle.foe().active().moves.find(MoveName::Crunch).is_some());
    }

    #[test]
    fn test_pressure_costs_two_pp() {
        let mut battle = started_battle();
        feed(
            &mut battle,
            &[
                "|-ability|p2a: Ttar|Pressure|[from] ability: Pressure",
                "|move|p1a: Gyarados|Dragon Dance|p1a: Gyarados",
            ],
        )
        .unwrap();
        let dance = battle.ai().active().pokemon().moves.find(MoveName::DragonDance).unwrap();
        assert_eq!(dance.pp(), dance.max_pp() - 2);
    }

    #[test]
    fn test_weather_upkeep_must_match() {
        let mut battle = started_battle();
        feed(
            &mut battle,
            &["|move|p2a: Ttar|Sandstorm|p2a: Ttar", "|-weather|Sandstorm", "|-weather|Sandstorm|[upkeep]", "|upkeep"],
        )
        .unwrap();
        assert_eq!(battle.environment().weather(), Weather::Sand);

        let result = feed(&mut battle, &["|-weather|RainDance|[upkeep]"]);
        assert!(matches!(result, Err(BattleError::WeatherMismatch { .. })));
    }

    #[test]
    fn test_side_conditions() {
        let mut battle = started_battle();
        feed(
            &mut battle,
            &[
                "|-sidestart|p1: Tactician|move: Stealth Rock",
                "|-sidestart|p2: Opponent|Spikes",
                "|-sidestart|p2: Opponent|Spikes",
            ],
        )
        .unwrap();
        let snapshot = battle.snapshot().unwrap();
        assert!(snapshot.ai.hazards.stealth_rock());
        assert_eq!(snapshot.foe.hazards.spikes(), 2);

        feed(&mut battle, &["|-sideend|p1: Tactician|Stealth Rock|[from] move: Rapid Spin"]).unwrap();
        assert!(!battle.ai().hazards.stealth_rock());
    }

    #[test]
    fn test_light_clay_screens() {
        let mut battle = started_battle();
        feed(
            &mut battle,
            &[
                "|switch|p1a: Jolteon|Jolteon, M|271/271",
                "|move|p1a: Jolteon|Reflect|p1a: Jolteon",
                "|-sidestart|p1: Tactician|Reflect",
            ],
        )
        .unwrap();
        assert_eq!(battle.ai().screens.reflect.turns_remaining(), Screens::EXTENDED);
        assert_eq!(battle.ai().active().pokemon().species, Species::Jolteon);
    }

    #[test]
    fn test_rest_sleep() {
        let mut battle = started_battle();
        feed(
            &mut battle,
            &[
                "|move|p1a: Gyarados|Rest|p1a: Gyarados",
                "|-status|p1a: Gyarados|slp|[from] move: Rest",
                "|-heal|p1a: Gyarados|331/331 slp|[silent]",
            ],
        )
        .unwrap();
        assert_eq!(battle.ai().active().status(), Status::Rest { turns_slept: 0 });
    }

    #[test]
    fn test_foe_item_from_heal() {
        let mut battle = started_battle();
        feed(&mut battle, &["|-heal|p2a: Ttar|68/100|[from] item: Leftovers"]).unwrap();
        let foe = battle.foe().active();
        assert_eq!(foe.item.and_then(|item| item.held()), Some(Item::Leftovers));

        feed(&mut battle, &["|-enditem|p2a: Ttar|Leftovers|[from] move: Knock Off"]).unwrap();
        assert_eq!(battle.foe().active().item.and_then(|item| item.held()), None);
    }

    #[test]
    fn test_generation_mismatch() {
        let mut battle = create_test_battle();
        let result = feed(&mut battle, &["|gen|3"]);
        assert_eq!(
            result,
            Err(BattleError::GenerationMismatch {
                expected: Generation::Four,
                actual: Generation::Three,
            })
        );
    }

    #[test]
    fn test_faint_and_outcome() {
        let mut battle = started_battle();
        feed(&mut battle, &["|faint|p2a: Ttar", "|win|Tactician"]).unwrap();
        assert!(battle.foe().active().is_fainted());
        assert_eq!(battle.outcome(), Some(&Outcome::Winner("Tactician".to_string())));
    }

    #[test]
    fn test_request_sets_exact_state() {
        let mut battle = started_battle();
        let json = r#"{"active":[{"moves":[{"move":"Waterfall","id":"waterfall","pp":7,"maxpp":24,"target":"normal","disabled":false}]}],"side":{"name":"Tactician","id":"p1","pokemon":[{"ident":"p1: Gyarados","details":"Gyarados, M","condition":"120/331 brn","active":true,"stats":{"atk":286,"def":194,"spa":140,"spd":236,"spe":258},"moves":["waterfall"],"baseAbility":"intimidate","item":"leftovers"},{"ident":"p1: Jolteon","details":"Jolteon, M","condition":"0 fnt","active":false,"stats":{"atk":166,"def":156,"spa":256,"spd":226,"spe":296},"moves":["thunderbolt"],"baseAbility":"voltabsorb","item":"lightclay"}]},"rqid":4}"#;
        let request: BattleRequest = serde_json::from_str(json).unwrap();
        battle.apply_request(&request).unwrap();

        let gyarados = battle.ai().active().pokemon();
        assert_eq!(gyarados.hp.current(), 120);
        assert_eq!(gyarados.status, Status::Burn);
        assert_eq!(gyarados.moves.find(MoveName::Waterfall).unwrap().pp(), 7);
        assert!(battle.ai().get(1).unwrap().is_fainted());
    }
}
