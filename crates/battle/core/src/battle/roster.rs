//! Roster arena: every combatant of a battle, addressed by stable handle.

use core::fmt;

use strum::Display;

use super::Tick;
use crate::entity::{Entity, EntityCheckpoint};

/// Stable reference to a combatant. Handles are never reused within a battle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityHandle(u32);

impl EntityHandle {
    /// Placeholder carried by entities that have not joined a roster.
    pub const DETACHED: Self = Self(u32::MAX);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::DETACHED {
            f.write_str("#detached")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Battle side. Players conventionally fight as `Blue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Blue => Self::Red,
            Self::Red => Self::Blue,
        }
    }
}

/// Roster entry: a team, an entity and its scheduling timestamps.
#[derive(Debug)]
pub struct Combatant {
    team: Team,
    entity: Entity,
    last_turn: Tick,
    next_turn: Tick,
}

impl Combatant {
    pub fn team(&self) -> Team {
        self.team
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn handle(&self) -> EntityHandle {
        self.entity.handle()
    }

    pub fn last_turn_time(&self) -> Tick {
        self.last_turn
    }

    pub fn next_turn_time(&self) -> Tick {
        self.next_turn
    }

    /// Delay until the next turn at the entity's current effective speed.
    pub fn turn_delay(&self) -> Tick {
        Tick::delay_for_speed(self.entity.stats().speed)
    }

    /// Advances the timestamps after a turn: `last = next`, `next += delay`.
    pub(crate) fn advance(&mut self) -> Tick {
        self.last_turn = self.next_turn;
        self.next_turn = self.last_turn + self.turn_delay();
        self.next_turn
    }
}

/// Pools and status effects of every combatant, for rollback.
#[derive(Clone, Debug)]
pub(crate) struct RosterCheckpoint(Vec<EntityCheckpoint>);

#[derive(Debug, Default)]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entity` to `team`; its first turn is one delay after `now`.
    pub fn insert(&mut self, team: Team, mut entity: Entity, now: Tick) -> EntityHandle {
        let handle = EntityHandle::new(self.combatants.len() as u32);
        entity.bind(handle);
        let delay = Tick::delay_for_speed(entity.stats().speed);
        self.combatants.push(Combatant {
            team,
            entity,
            last_turn: now,
            next_turn: now + delay,
        });
        handle
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    pub fn combatant(&self, handle: EntityHandle) -> Option<&Combatant> {
        self.combatants.get(handle.index())
    }

    pub(crate) fn combatant_mut(&mut self, handle: EntityHandle) -> Option<&mut Combatant> {
        self.combatants.get_mut(handle.index())
    }

    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.combatant(handle).map(|c| &c.entity)
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.combatant_mut(handle).map(|c| &mut c.entity)
    }

    pub fn team_of(&self, handle: EntityHandle) -> Option<Team> {
        self.combatant(handle).map(|c| c.team)
    }

    /// Every member of `team`, in insertion order.
    pub fn members(&self, team: Team) -> impl Iterator<Item = EntityHandle> + '_ {
        self.combatants
            .iter()
            .filter(move |c| c.team == team)
            .map(Combatant::handle)
    }

    /// Members of `team` that are still standing.
    pub fn living(&self, team: Team) -> impl Iterator<Item = EntityHandle> + '_ {
        self.combatants
            .iter()
            .filter(move |c| c.team == team && !c.entity.is_dead())
            .map(Combatant::handle)
    }

    /// Members of `team` that have been defeated.
    pub fn fallen(&self, team: Team) -> impl Iterator<Item = EntityHandle> + '_ {
        self.combatants
            .iter()
            .filter(move |c| c.team == team && c.entity.is_dead())
            .map(Combatant::handle)
    }

    /// Every living combatant on either side.
    pub fn living_combatants(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        self.combatants
            .iter()
            .filter(|c| !c.entity.is_dead())
            .map(Combatant::handle)
    }

    /// True when `team` has no standing member.
    pub fn is_wiped(&self, team: Team) -> bool {
        self.living(team).next().is_none()
    }

    pub(crate) fn checkpoint(&self) -> RosterCheckpoint {
        RosterCheckpoint(self.combatants.iter().map(|c| c.entity.checkpoint()).collect())
    }

    pub(crate) fn rollback(&mut self, checkpoint: RosterCheckpoint) {
        for (combatant, saved) in self.combatants.iter_mut().zip(checkpoint.0) {
            combatant.entity.rollback(saved);
        }
    }
}
