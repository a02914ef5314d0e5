use super::{Action, ControlError, Controller};
use crate::battle::BattleView;
use crate::entity::Entity;
use crate::skill::SkillSlot;

/// Choices a human can make for an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserOptions {
    pub can_defend: bool,
    pub can_flee: bool,
    /// Only skills whose costs are currently payable.
    pub usable_skills: Vec<SkillSlot>,
}

impl UserOptions {
    pub fn for_entity(entity: &Entity) -> Self {
        Self {
            can_defend: true,
            can_flee: true,
            usable_skills: entity.usable_skills(),
        }
    }
}

/// Interactive controller: delegates until the driver supplies a choice,
/// then plays it once.
#[derive(Clone, Debug, Default)]
pub struct PlayerController {
    pending: Option<Action>,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self, entity: &Entity) -> UserOptions {
        UserOptions::for_entity(entity)
    }

    /// Queues `action` for the next decision, replacing any earlier choice.
    pub fn choose(&mut self, action: Action) -> Result<(), ControlError> {
        if action == Action::Delegate {
            return Err(ControlError::DelegateChoice);
        }
        self.pending = Some(action);
        Ok(())
    }

    pub fn pending(&self) -> Option<&Action> {
        self.pending.as_ref()
    }
}

impl Controller for PlayerController {
    fn name(&self) -> &str {
        "player"
    }

    fn decide(&mut self, _view: &BattleView<'_>) -> Action {
        self.pending.take().unwrap_or(Action::Delegate)
    }

    fn as_player_mut(&mut self) -> Option<&mut PlayerController> {
        Some(self)
    }

    fn as_player(&self) -> Option<&PlayerController> {
        Some(self)
    }
}
