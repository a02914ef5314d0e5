//! Combatants: identity, pools, status effects, skills and a controller.
mod identity;

pub use identity::EntityIdentity;

use core::fmt;
use std::sync::Arc;

use crate::battle::EntityHandle;
use crate::controller::{Controller, NestedController, NullController};
use crate::message::{Message, MessageLog};
use crate::skill::{Skill, SkillSlot};
use crate::stats::{Pool, PoolChange, PoolValues, Stats, compute_effective};
use crate::status::{StatusEffect, StatusEffects, StatusKind};

/// An actor taking part in a battle.
///
/// Pool values observed through the entity are always within
/// `[0, effective max]`. Maxima are derived from effective stats on every
/// query, so attaching or removing a status effect that changes a max takes
/// effect immediately.
pub struct Entity {
    identity: EntityIdentity,
    level: u32,
    base_stats: Stats,
    pools: PoolValues,
    status_effects: StatusEffects,
    skills: Vec<Arc<Skill>>,
    controller: Box<dyn Controller>,
    handle: EntityHandle,
}

/// Snapshot of the mutable combat state of one entity.
#[derive(Clone, Debug)]
pub(crate) struct EntityCheckpoint {
    pools: PoolValues,
    status_effects: StatusEffects,
}

impl Entity {
    /// Creates an entity with full pools, no skills and a [`NullController`].
    pub fn new(identity: EntityIdentity, level: u32, base_stats: Stats) -> Self {
        Self {
            identity,
            level,
            pools: PoolValues::full(&base_stats),
            base_stats,
            status_effects: StatusEffects::new(),
            skills: Vec::new(),
            controller: Box::new(NullController),
            handle: EntityHandle::DETACHED,
        }
    }

    #[must_use]
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.learn_skill(skill);
        self
    }

    #[must_use]
    pub fn with_controller(mut self, controller: impl Controller + 'static) -> Self {
        self.controller = Box::new(controller);
        self
    }

    // ===== identity =====

    pub fn identity(&self) -> &EntityIdentity {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Roster handle, or [`EntityHandle::DETACHED`] before the entity joins a
    /// battle.
    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    pub(crate) fn bind(&mut self, handle: EntityHandle) {
        self.handle = handle;
    }

    // ===== stats & pools =====

    pub fn base_stats(&self) -> &Stats {
        &self.base_stats
    }

    /// Base stats combined with the modifiers of every attached effect.
    pub fn stats(&self) -> Stats {
        compute_effective(&self.base_stats, self.status_effects.modifiers())
    }

    pub fn pool(&self, pool: Pool) -> i32 {
        self.pools.current(pool, &self.stats())
    }

    pub fn pool_max(&self, pool: Pool) -> i32 {
        pool.maximum(&self.stats())
    }

    pub fn health(&self) -> i32 {
        self.pool(Pool::Health)
    }

    pub fn mana(&self) -> i32 {
        self.pool(Pool::Mana)
    }

    pub fn tech(&self) -> i32 {
        self.pool(Pool::Tech)
    }

    pub fn is_dead(&self) -> bool {
        self.health() <= 0
    }

    /// Removes `amount` from a pool. Negative amounts count as zero.
    pub fn drain(&mut self, pool: Pool, amount: i32, log: &mut MessageLog) -> PoolChange {
        self.adjust(pool, -i64::from(amount.max(0)), log)
    }

    /// Adds `amount` to a pool. Negative amounts count as zero.
    pub fn restore(&mut self, pool: Pool, amount: i32, log: &mut MessageLog) -> PoolChange {
        self.adjust(pool, i64::from(amount.max(0)), log)
    }

    fn adjust(&mut self, pool: Pool, delta: i64, log: &mut MessageLog) -> PoolChange {
        let stats = self.stats();
        let max = pool.maximum(&stats);
        let old = self.pools.current(pool, &stats);
        let new = (i64::from(old) + delta).clamp(0, i64::from(max)) as i32;
        self.pools.set(pool, new);

        let change = PoolChange { pool, old, new };
        log.push(Message::PoolChanged {
            entity: self.handle,
            pool,
            old,
            new,
        });
        if change.is_fatal() {
            tracing::info!("{} ({:?}) died", self.identity.name, self.handle);
            log.push(Message::Died {
                entity: self.handle,
            });
        }
        change
    }

    // ===== status effects =====

    pub fn status_effects(&self) -> &[StatusEffect] {
        self.status_effects.as_slice()
    }

    pub fn has_status(&self, kind: &StatusKind) -> bool {
        self.status_effects.contains(kind)
    }

    /// Attaches an effect. Effects of the same kind stack.
    pub fn apply_status_effect(&mut self, effect: StatusEffect, log: &mut MessageLog) {
        log.push(Message::StatusApplied {
            entity: self.handle,
            effect: effect.kind.clone(),
        });
        self.status_effects.push(effect);
    }

    /// Detaches every effect of the same kind, then attaches `effect`.
    pub fn replace_status_effect(&mut self, effect: StatusEffect, log: &mut MessageLog) {
        self.remove_status(&effect.kind, log);
        self.apply_status_effect(effect, log);
    }

    /// Detaches every effect of `kind`. Returns how many were removed.
    pub fn remove_status(&mut self, kind: &StatusKind, log: &mut MessageLog) -> usize {
        let removed = self.status_effects.remove_kind(kind);
        self.log_removed(&removed, log);
        removed.len()
    }

    /// End-of-turn bookkeeping: ticks turn-counted effects and detaches the
    /// expired ones.
    pub fn process_turn_end(&mut self, log: &mut MessageLog) {
        let expired = self.status_effects.tick_all();
        if !expired.is_empty() {
            tracing::debug!(
                "{}: {} status effect(s) expired",
                self.identity.name,
                expired.len()
            );
        }
        self.log_removed(&expired, log);
    }

    /// Clears battle-scoped and turn-counted effects. Permanent effects stay.
    pub fn end_battle(&mut self, log: &mut MessageLog) {
        let cleared = self.status_effects.clear_battle_scoped();
        self.log_removed(&cleared, log);
    }

    fn log_removed(&self, removed: &[StatusEffect], log: &mut MessageLog) {
        for effect in removed {
            log.push(Message::StatusRemoved {
                entity: self.handle,
                effect: effect.kind.clone(),
            });
        }
    }

    // ===== skills =====

    pub fn skills(&self) -> &[Arc<Skill>] {
        &self.skills
    }

    pub fn skill(&self, slot: SkillSlot) -> Option<&Arc<Skill>> {
        self.skills.get(slot.index())
    }

    /// Mutable access for hook editing. Clones the skill first if it is
    /// shared with an in-flight resolution.
    pub fn skill_mut(&mut self, slot: SkillSlot) -> Option<&mut Skill> {
        self.skills.get_mut(slot.index()).map(Arc::make_mut)
    }

    pub fn learn_skill(&mut self, skill: Skill) -> SkillSlot {
        self.skills.push(Arc::new(skill));
        SkillSlot::new(self.skills.len() - 1)
    }

    pub fn find_skill(&self, name: &str) -> Option<SkillSlot> {
        self.skills
            .iter()
            .position(|skill| skill.name() == name)
            .map(SkillSlot::new)
    }

    /// Slots of every skill whose costs the entity can currently pay.
    pub fn usable_skills(&self) -> Vec<SkillSlot> {
        self.skills
            .iter()
            .enumerate()
            .filter(|(_, skill)| skill.is_usable_by(self))
            .map(|(index, _)| SkillSlot::new(index))
            .collect()
    }

    // ===== controller =====

    pub fn controller(&self) -> &dyn Controller {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> &mut dyn Controller {
        self.controller.as_mut()
    }

    /// Installs `controller`, returning the one it replaces.
    pub fn set_controller(&mut self, controller: Box<dyn Controller>) -> Box<dyn Controller> {
        core::mem::replace(&mut self.controller, controller)
    }

    /// Overrides the current controller while keeping it for
    /// [`restore_controller`](Self::restore_controller).
    pub fn nest_controller(&mut self, controller: Box<dyn Controller>) {
        let saved = self.take_controller();
        self.controller = Box::new(NestedController::new(controller, saved));
    }

    /// Undoes the most recent [`nest_controller`](Self::nest_controller).
    /// Returns false when no override is active.
    pub fn restore_controller(&mut self) -> bool {
        match self.controller.take_saved() {
            Some(saved) => {
                self.controller = saved;
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_controller(&mut self) -> Box<dyn Controller> {
        core::mem::replace(&mut self.controller, Box::new(NullController))
    }

    pub(crate) fn put_controller(&mut self, controller: Box<dyn Controller>) {
        self.controller = controller;
    }

    // ===== rollback =====

    pub(crate) fn checkpoint(&self) -> EntityCheckpoint {
        EntityCheckpoint {
            pools: self.pools,
            status_effects: self.status_effects.clone(),
        }
    }

    pub(crate) fn rollback(&mut self, checkpoint: EntityCheckpoint) {
        self.pools = checkpoint.pools;
        self.status_effects = checkpoint.status_effects;
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("identity", &self.identity)
            .field("handle", &self.handle)
            .field("level", &self.level)
            .field("pools", &self.pools)
            .field("status_effects", &self.status_effects)
            .field("skills", &self.skills.len())
            .field("controller", &self.controller.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::BattleView;
    use crate::controller::Action;
    use crate::stats::{StatKind, StatModifier};
    use crate::status::EffectDuration;

    fn knight() -> Entity {
        let stats = Stats::default()
            .with(StatKind::MaxHealth, 50)
            .with(StatKind::MaxMana, 20)
            .with(StatKind::Speed, 10);
        Entity::new(EntityIdentity::new("human", "knight", "Aria"), 1, stats)
    }

    fn died_count(log: &MessageLog) -> usize {
        log.messages()
            .iter()
            .filter(|m| matches!(m, Message::Died { .. }))
            .count()
    }

    #[test]
    fn pools_start_full_and_stay_bounded() {
        let mut entity = knight();
        let mut log = MessageLog::new();
        assert_eq!(entity.health(), 50);

        let change = entity.restore(Pool::Health, 100, &mut log);
        assert_eq!((change.old, change.new), (50, 50));

        let change = entity.drain(Pool::Mana, 500, &mut log);
        assert_eq!(change.new, 0);
        assert_eq!(entity.mana(), 0);

        // Unchanged writes are still reported.
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn negative_drain_never_heals() {
        let mut entity = knight();
        let mut log = MessageLog::new();
        entity.drain(Pool::Health, 10, &mut log);

        let change = entity.drain(Pool::Health, -25, &mut log);
        assert_eq!(change.new, 40);

        let change = entity.restore(Pool::Health, -25, &mut log);
        assert_eq!(change.new, 40);
    }

    #[test]
    fn death_is_reported_once_per_crossing() {
        let mut entity = knight();
        let mut log = MessageLog::new();

        entity.drain(Pool::Health, 30, &mut log);
        entity.drain(Pool::Health, 30, &mut log);
        entity.drain(Pool::Health, 30, &mut log);
        assert!(entity.is_dead());
        assert_eq!(died_count(&log), 1);

        entity.restore(Pool::Health, 5, &mut log);
        entity.drain(Pool::Health, 5, &mut log);
        assert_eq!(died_count(&log), 2);
    }

    #[test]
    fn lowered_max_clamps_observed_pool() {
        let mut entity = knight();
        let mut log = MessageLog::new();
        let shrink = StatusEffect::new(StatusKind::Named("wither".into()), EffectDuration::Turns(1))
            .with_modifier(StatModifier::multiplicative(StatKind::MaxHealth, -50));

        entity.apply_status_effect(shrink, &mut log);
        assert_eq!(entity.pool_max(Pool::Health), 25);
        assert_eq!(entity.health(), 25);

        entity.process_turn_end(&mut log);
        assert_eq!(entity.health(), 50);
    }

    #[test]
    fn status_expires_with_single_removal_message() {
        let mut entity = knight();
        let mut log = MessageLog::new();
        entity.apply_status_effect(StatusEffect::preset(StatusKind::Haste).unwrap(), &mut log);
        assert_eq!(entity.stats().speed, 15);
        log.drain();

        entity.process_turn_end(&mut log);
        entity.process_turn_end(&mut log);
        assert!(log.is_empty());
        assert!(entity.has_status(&StatusKind::Haste));

        entity.process_turn_end(&mut log);
        assert_eq!(
            log.drain(),
            vec![Message::StatusRemoved {
                entity: EntityHandle::DETACHED,
                effect: StatusKind::Haste,
            }]
        );
        assert_eq!(entity.stats().speed, 10);
    }

    #[test]
    fn reapplication_stacks_but_replace_refreshes() {
        let mut entity = knight();
        let mut log = MessageLog::new();
        let slow = || StatusEffect::preset(StatusKind::Slow).unwrap();

        entity.apply_status_effect(slow(), &mut log);
        entity.apply_status_effect(slow(), &mut log);
        assert_eq!(entity.status_effects().len(), 2);
        // 10 * (100 - 100) / 100 = 0 → floored to 1
        assert_eq!(entity.stats().speed, 1);

        entity.replace_status_effect(slow(), &mut log);
        assert_eq!(entity.status_effects().len(), 1);
        assert_eq!(entity.stats().speed, 5);
    }

    #[test]
    fn end_battle_keeps_permanent_effects() {
        let mut entity = knight();
        let mut log = MessageLog::new();
        let blessing = StatusEffect::new(StatusKind::Named("blessing".into()), EffectDuration::Permanent);
        entity.apply_status_effect(blessing, &mut log);
        entity.apply_status_effect(StatusEffect::preset(StatusKind::AttackBoost).unwrap(), &mut log);

        entity.end_battle(&mut log);
        assert_eq!(entity.status_effects().len(), 1);
        assert!(entity.has_status(&StatusKind::Named("blessing".into())));
    }

    struct Coward;

    impl Controller for Coward {
        fn name(&self) -> &str {
            "coward"
        }

        fn decide(&mut self, _view: &BattleView<'_>) -> Action {
            Action::Flee
        }
    }

    #[test]
    fn nested_controller_restores_the_saved_one() {
        let mut entity = knight().with_controller(Coward);
        assert!(!entity.restore_controller());

        entity.nest_controller(Box::new(NullController));
        assert!(entity.controller().name().contains("null"));

        assert!(entity.restore_controller());
        assert_eq!(entity.controller().name(), "coward");
    }
}
