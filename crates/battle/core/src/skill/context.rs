//! Execution contexts handed to hooks and behaviors.

use super::{BehaviorError, Multiplier, Skill, SkillError};
use crate::battle::{EntityHandle, Roster, Team};
use crate::config::BattleConfig;
use crate::entity::Entity;
use crate::message::{Message, MessageLog};
use crate::rng::BattleRng;
use crate::stats::{Pool, PoolChange, Stats};
use crate::status::StatusEffect;

/// Mutable view of the battle for one (source, target) pair.
///
/// Entities are addressed by handle; the context borrows the roster for the
/// duration of a single hook call.
pub struct HookContext<'a> {
    source: EntityHandle,
    target: EntityHandle,
    skill: &'a Skill,
    roster: &'a mut Roster,
    rng: &'a mut dyn BattleRng,
    log: &'a mut MessageLog,
    config: &'a BattleConfig,
    evaded: bool,
}

impl<'a> HookContext<'a> {
    pub(crate) fn new(
        source: EntityHandle,
        skill: &'a Skill,
        roster: &'a mut Roster,
        rng: &'a mut dyn BattleRng,
        log: &'a mut MessageLog,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            source,
            target: source,
            skill,
            roster,
            rng,
            log,
            config,
            evaded: false,
        }
    }

    pub(crate) fn retarget(&mut self, target: EntityHandle) {
        self.target = target;
        self.evaded = false;
    }

    /// Marks the current target as missed after the check stage, logging
    /// `Miss`. The pipeline then reports it with the missed targets.
    pub fn evade(&mut self) {
        self.evaded = true;
        self.log.push(Message::Miss {
            target: self.target,
        });
    }

    pub(crate) fn evaded(&self) -> bool {
        self.evaded
    }

    pub fn source(&self) -> EntityHandle {
        self.source
    }

    pub fn target(&self) -> EntityHandle {
        self.target
    }

    pub fn skill(&self) -> &Skill {
        self.skill
    }

    pub fn config(&self) -> &BattleConfig {
        self.config
    }

    pub fn roster(&self) -> &Roster {
        self.roster
    }

    pub fn entity(&self, handle: EntityHandle) -> Option<&Entity> {
        self.roster.get(handle)
    }

    pub fn source_entity(&self) -> Result<&Entity, SkillError> {
        self.roster
            .get(self.source)
            .ok_or(SkillError::SourceNotFound(self.source))
    }

    pub fn target_entity(&self) -> Result<&Entity, SkillError> {
        self.roster
            .get(self.target)
            .ok_or(SkillError::TargetNotFound(self.target))
    }

    pub fn rng(&mut self) -> &mut dyn BattleRng {
        self.rng
    }

    pub fn log(&mut self) -> &mut MessageLog {
        self.log
    }

    pub fn drain(
        &mut self,
        handle: EntityHandle,
        pool: Pool,
        amount: i32,
    ) -> Result<PoolChange, SkillError> {
        let entity = self
            .roster
            .get_mut(handle)
            .ok_or(SkillError::TargetNotFound(handle))?;
        Ok(entity.drain(pool, amount, self.log))
    }

    pub fn restore(
        &mut self,
        handle: EntityHandle,
        pool: Pool,
        amount: i32,
    ) -> Result<PoolChange, SkillError> {
        let entity = self
            .roster
            .get_mut(handle)
            .ok_or(SkillError::TargetNotFound(handle))?;
        Ok(entity.restore(pool, amount, self.log))
    }

    /// Attaches `effect`, replacing effects of the same kind when `refresh`
    /// is set and stacking otherwise.
    pub fn apply_status(
        &mut self,
        handle: EntityHandle,
        effect: StatusEffect,
        refresh: bool,
    ) -> Result<(), SkillError> {
        let entity = self
            .roster
            .get_mut(handle)
            .ok_or(SkillError::TargetNotFound(handle))?;
        if refresh {
            entity.replace_status_effect(effect, self.log);
        } else {
            entity.apply_status_effect(effect, self.log);
        }
        Ok(())
    }
}

/// Narrow, handle-based surface exposed to [`SkillBehavior`](super::SkillBehavior)
/// implementations.
pub struct ScriptContext<'c, 'a> {
    hook: &'c mut HookContext<'a>,
    multiplier: Multiplier,
}

impl<'c, 'a> ScriptContext<'c, 'a> {
    pub(crate) fn new(hook: &'c mut HookContext<'a>, multiplier: Multiplier) -> Self {
        Self { hook, multiplier }
    }

    pub fn source(&self) -> EntityHandle {
        self.hook.source()
    }

    pub fn target(&self) -> EntityHandle {
        self.hook.target()
    }

    /// Combined magnitude for the current target.
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    pub fn skill_name(&self) -> &str {
        self.hook.skill().name()
    }

    pub fn skill_level(&self) -> u32 {
        self.hook.skill().level()
    }

    fn entity(&self, handle: EntityHandle) -> Result<&Entity, BehaviorError> {
        self.hook
            .entity(handle)
            .ok_or(BehaviorError::UnknownEntity(handle))
    }

    pub fn name(&self, handle: EntityHandle) -> Result<String, BehaviorError> {
        Ok(self.entity(handle)?.name().to_owned())
    }

    pub fn level(&self, handle: EntityHandle) -> Result<u32, BehaviorError> {
        Ok(self.entity(handle)?.level())
    }

    pub fn stats(&self, handle: EntityHandle) -> Result<Stats, BehaviorError> {
        Ok(self.entity(handle)?.stats())
    }

    pub fn pool(&self, handle: EntityHandle, pool: Pool) -> Result<i32, BehaviorError> {
        Ok(self.entity(handle)?.pool(pool))
    }

    pub fn pool_max(&self, handle: EntityHandle, pool: Pool) -> Result<i32, BehaviorError> {
        Ok(self.entity(handle)?.pool_max(pool))
    }

    pub fn is_dead(&self, handle: EntityHandle) -> Result<bool, BehaviorError> {
        Ok(self.entity(handle)?.is_dead())
    }

    pub fn drain(
        &mut self,
        handle: EntityHandle,
        pool: Pool,
        amount: i32,
    ) -> Result<PoolChange, BehaviorError> {
        self.hook
            .drain(handle, pool, amount)
            .map_err(|_| BehaviorError::UnknownEntity(handle))
    }

    pub fn restore(
        &mut self,
        handle: EntityHandle,
        pool: Pool,
        amount: i32,
    ) -> Result<PoolChange, BehaviorError> {
        self.hook
            .restore(handle, pool, amount)
            .map_err(|_| BehaviorError::UnknownEntity(handle))
    }

    pub fn apply_status(
        &mut self,
        handle: EntityHandle,
        effect: StatusEffect,
        refresh: bool,
    ) -> Result<(), BehaviorError> {
        self.hook
            .apply_status(handle, effect, refresh)
            .map_err(|_| BehaviorError::UnknownEntity(handle))
    }

    fn team_of(&self, handle: EntityHandle) -> Result<Team, BehaviorError> {
        self.hook
            .roster()
            .team_of(handle)
            .ok_or(BehaviorError::UnknownEntity(handle))
    }

    /// Living members of `handle`'s team, in roster order.
    pub fn team(&self, handle: EntityHandle) -> Result<Vec<EntityHandle>, BehaviorError> {
        let team = self.team_of(handle)?;
        Ok(self.hook.roster().living(team).collect())
    }

    /// Defeated members of `handle`'s team, in roster order.
    pub fn dead_team(&self, handle: EntityHandle) -> Result<Vec<EntityHandle>, BehaviorError> {
        let team = self.team_of(handle)?;
        Ok(self.hook.roster().fallen(team).collect())
    }

    /// Living members of the opposing team.
    pub fn enemies(&self, handle: EntityHandle) -> Result<Vec<EntityHandle>, BehaviorError> {
        let team = self.team_of(handle)?;
        Ok(self.hook.roster().living(team.opponent()).collect())
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.hook.log().notify(text);
    }

    pub fn miss(&mut self, target: EntityHandle) {
        self.hook.log().push(Message::Miss { target });
    }

    pub fn critical(&mut self, target: EntityHandle) {
        self.hook.log().push(Message::Critical { target });
    }

    pub fn roll(&mut self, percent: i32) -> bool {
        self.hook.rng().chance(percent)
    }

    pub fn rng(&mut self) -> &mut dyn BattleRng {
        self.hook.rng()
    }
}
