use super::{EntityHandle, Roster, Team};
use crate::entity::Entity;

/// Read-only picture of the battlefield from one combatant's side.
pub struct BattleView<'a> {
    actor: EntityHandle,
    team: Team,
    roster: &'a Roster,
}

impl<'a> BattleView<'a> {
    pub fn new(roster: &'a Roster, actor: EntityHandle, team: Team) -> Self {
        Self {
            actor,
            team,
            roster,
        }
    }

    pub fn actor(&self) -> EntityHandle {
        self.actor
    }

    pub fn team(&self) -> Team {
        self.team
    }

    /// The deciding entity.
    pub fn me(&self) -> Option<&'a Entity> {
        self.roster.get(self.actor)
    }

    pub fn entity(&self, handle: EntityHandle) -> Option<&'a Entity> {
        self.roster.get(handle)
    }

    /// Every member of the actor's team, the actor included.
    pub fn allies(&self) -> Vec<EntityHandle> {
        self.roster.members(self.team).collect()
    }

    pub fn enemies(&self) -> Vec<EntityHandle> {
        self.roster.members(self.team.opponent()).collect()
    }

    pub fn living_allies(&self) -> Vec<EntityHandle> {
        self.roster.living(self.team).collect()
    }

    pub fn living_enemies(&self) -> Vec<EntityHandle> {
        self.roster.living(self.team.opponent()).collect()
    }
}
