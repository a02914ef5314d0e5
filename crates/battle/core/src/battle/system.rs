use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{
    AlwaysFlee, BattleError, BattleView, Combatant, EntityHandle, FleePolicy, Roster, Team, Tick,
    TurnOutcome,
};
use crate::config::BattleConfig;
use crate::controller::{Action, ControlError, UserOptions};
use crate::entity::Entity;
use crate::message::{Message, MessageLog};
use crate::rng::BattleRng;
use crate::skill::{SkillSlot, pipeline};

/// Heap entry. Handles are assigned in insertion order, so ordering by
/// `(ready_at, handle)` breaks ties by insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ScheduledTurn {
    ready_at: Tick,
    handle: EntityHandle,
}

/// Readiness-ordered turn scheduler owning the roster.
pub struct BattleSystem {
    roster: Roster,
    schedule: BinaryHeap<Reverse<ScheduledTurn>>,
    clock: Tick,
    config: BattleConfig,
    rng: Box<dyn BattleRng>,
    flee_policy: Box<dyn FleePolicy>,
    turns_taken: u64,
}

impl BattleSystem {
    pub fn new(config: BattleConfig, rng: impl BattleRng + 'static) -> Self {
        Self {
            roster: Roster::new(),
            schedule: BinaryHeap::new(),
            clock: Tick::ZERO,
            config,
            rng: Box::new(rng),
            flee_policy: Box::new(AlwaysFlee),
            turns_taken: 0,
        }
    }

    #[must_use]
    pub fn with_flee_policy(mut self, policy: impl FleePolicy + 'static) -> Self {
        self.flee_policy = Box::new(policy);
        self
    }

    /// Adds `entity` to `team` and schedules its first turn one delay from
    /// now.
    pub fn add_combatant(&mut self, team: Team, entity: Entity) -> EntityHandle {
        let handle = self.roster.insert(team, entity, self.clock);
        if let Some(combatant) = self.roster.combatant(handle) {
            tracing::debug!(
                "{} joins {} as {:?}, first turn at {:?}",
                combatant.entity().name(),
                team,
                handle,
                combatant.next_turn_time()
            );
            self.schedule.push(Reverse(ScheduledTurn {
                ready_at: combatant.next_turn_time(),
                handle,
            }));
        }
        handle
    }

    // ===== queries =====

    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Completed turns, skipped turns of defeated combatants included.
    pub fn turns_taken(&self) -> u64 {
        self.turns_taken
    }

    pub fn entity(&self, handle: EntityHandle) -> Option<&Entity> {
        self.roster.get(handle)
    }

    pub fn entity_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.roster.get_mut(handle)
    }

    pub fn combatant(&self, handle: EntityHandle) -> Option<&Combatant> {
        self.roster.combatant(handle)
    }

    pub fn list_team(&self, team: Team) -> Vec<EntityHandle> {
        self.roster.members(team).collect()
    }

    pub fn team_of(&self, handle: EntityHandle) -> Result<Team, BattleError> {
        self.roster
            .team_of(handle)
            .ok_or(BattleError::UnknownEntity(handle))
    }

    /// Combatant that will be up on the next call to
    /// [`advance_one_turn`](Self::advance_one_turn).
    pub fn peek_next(&self) -> Option<EntityHandle> {
        self.schedule.peek().map(|Reverse(turn)| turn.handle)
    }

    /// True once every member of either team is defeated.
    pub fn is_battle_over(&self) -> bool {
        self.roster.is_wiped(Team::Blue) || self.roster.is_wiped(Team::Red)
    }

    /// The surviving side, if exactly one side is still standing.
    pub fn winner(&self) -> Option<Team> {
        match (self.roster.is_wiped(Team::Blue), self.roster.is_wiped(Team::Red)) {
            (false, true) => Some(Team::Blue),
            (true, false) => Some(Team::Red),
            _ => None,
        }
    }

    // ===== turn loop =====

    /// Runs the turn of the most ready combatant.
    ///
    /// ## Execution Flow
    /// 1. Pop the entry with the smallest `(next turn time, insertion order)`
    /// 2. Defeated combatants are rescheduled with no action taken
    /// 3. The controller decides against a read-only [`BattleView`]
    /// 4. Defend / Flee / UseSkill finish the turn; Delegate leaves the
    ///    schedule untouched and reports who needs input
    /// 5. End-of-turn processing, then the combatant is rescheduled
    ///
    /// ## Error Handling
    /// On error the combatant is put back unchanged and every pool and status
    /// effect is rolled back to its state before the call.
    pub fn advance_one_turn(&mut self) -> Result<TurnOutcome, BattleError> {
        let Reverse(scheduled) = self.schedule.pop().ok_or(BattleError::NoCombatants)?;
        let actor = scheduled.handle;

        let Some(combatant) = self.roster.combatant(actor) else {
            return Err(BattleError::UnknownEntity(actor));
        };
        let team = combatant.team();
        self.clock = scheduled.ready_at;

        if combatant.entity().is_dead() {
            tracing::trace!("{:?} is down, skipping its turn", actor);
            self.reschedule(actor)?;
            self.turns_taken += 1;
            return Ok(TurnOutcome::skipped(actor));
        }

        tracing::debug!(
            "turn of {} ({:?}) at {:?}",
            combatant.entity().name(),
            actor,
            self.clock
        );

        let action = self.decide(actor, team)?;
        let mut log = MessageLog::new();

        match action {
            Action::Delegate => {
                tracing::debug!("{:?} is waiting for input", actor);
                self.schedule.push(Reverse(scheduled));
                return Ok(TurnOutcome::awaiting_input(actor));
            }
            Action::Defend => log.push(Message::Defended { entity: actor }),
            Action::Flee => {
                let succeeded = self.attempt_flee(actor, team)?;
                log.push(Message::Fled {
                    entity: actor,
                    succeeded,
                });
            }
            Action::UseSkill { skill, target } => {
                if let Err(error) = self.use_skill(actor, skill, target, &mut log) {
                    self.schedule.push(Reverse(scheduled));
                    return Err(error);
                }
            }
        }

        self.roster
            .get_mut(actor)
            .ok_or(BattleError::UnknownEntity(actor))?
            .process_turn_end(&mut log);
        self.reschedule(actor)?;
        self.turns_taken += 1;

        Ok(TurnOutcome::finished(actor, log.drain()))
    }

    /// Asks the actor's controller for an action.
    ///
    /// The controller is lifted out of the entity while it decides so the
    /// view can borrow the whole roster.
    fn decide(&mut self, actor: EntityHandle, team: Team) -> Result<Action, BattleError> {
        let mut controller = self
            .roster
            .get_mut(actor)
            .ok_or(BattleError::UnknownEntity(actor))?
            .take_controller();

        let action = controller.decide(&BattleView::new(&self.roster, actor, team));

        if let Some(entity) = self.roster.get_mut(actor) {
            entity.put_controller(controller);
        }
        tracing::debug!("{:?} chose {:?}", actor, action);
        Ok(action)
    }

    fn attempt_flee(&mut self, actor: EntityHandle, team: Team) -> Result<bool, BattleError> {
        let runner = self
            .roster
            .get(actor)
            .ok_or(BattleError::UnknownEntity(actor))?;
        let view = BattleView::new(&self.roster, actor, team);
        Ok(self.flee_policy.attempt(runner, &view, self.rng.as_mut()))
    }

    fn use_skill(
        &mut self,
        actor: EntityHandle,
        slot: SkillSlot,
        target: EntityHandle,
        log: &mut MessageLog,
    ) -> Result<(), BattleError> {
        let skill = self
            .roster
            .get(actor)
            .and_then(|entity| entity.skill(slot))
            .cloned()
            .ok_or(BattleError::UnknownSkill { actor, slot })?;
        if self.roster.get(target).is_none() {
            return Err(BattleError::TargetNotFound { actor, target });
        }

        let checkpoint = self.roster.checkpoint();
        let resolved = pipeline::resolve(
            &mut self.roster,
            self.rng.as_mut(),
            log,
            &self.config,
            actor,
            &skill,
            target,
        );

        match resolved {
            Ok(resolution) => {
                tracing::debug!(
                    "{} resolved: {} hit, {} missed{}",
                    skill.name(),
                    resolution.hit.len(),
                    resolution.missed.len(),
                    if resolution.interrupted {
                        ", interrupted"
                    } else {
                        ""
                    }
                );
                Ok(())
            }
            Err(error) => {
                tracing::warn!("{} failed, rolling back: {}", skill.name(), error);
                self.roster.rollback(checkpoint);
                Err(error.into())
            }
        }
    }

    fn reschedule(&mut self, handle: EntityHandle) -> Result<(), BattleError> {
        let combatant = self
            .roster
            .combatant_mut(handle)
            .ok_or(BattleError::UnknownEntity(handle))?;
        let ready_at = combatant.advance();
        self.schedule.push(Reverse(ScheduledTurn { ready_at, handle }));
        Ok(())
    }

    // ===== interactive control =====

    /// Choices open to `handle` right now.
    pub fn available_options(&self, handle: EntityHandle) -> Result<UserOptions, BattleError> {
        let entity = self
            .roster
            .get(handle)
            .ok_or(BattleError::UnknownEntity(handle))?;
        Ok(UserOptions::for_entity(entity))
    }

    /// Feeds a choice to the interactive controller of `handle`.
    pub fn supply_choice(&mut self, handle: EntityHandle, action: Action) -> Result<(), BattleError> {
        let entity = self
            .roster
            .get_mut(handle)
            .ok_or(BattleError::UnknownEntity(handle))?;
        let player = entity
            .controller_mut()
            .as_player_mut()
            .ok_or(ControlError::NotInteractive(handle))?;
        player.choose(action)?;
        Ok(())
    }

    /// Clears battle-scoped and turn-counted effects from every combatant.
    pub fn end_battle(&mut self) -> Vec<Message> {
        let mut log = MessageLog::new();
        for handle in self.roster.combatants().map(Combatant::handle).collect::<Vec<_>>() {
            if let Some(entity) = self.roster.get_mut(handle) {
                entity.end_battle(&mut log);
            }
        }
        tracing::info!("battle ended after {} turns", self.turns_taken);
        log.drain()
    }
}
