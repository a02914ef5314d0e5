//! Decision makers.
//!
//! Every entity owns exactly one [`Controller`]. The scheduler lends it a
//! read-only [`BattleView`] and asks for an [`Action`].
//!
//! - [`NpcController`]: randomized AI
//! - [`PlayerController`]: waits for a choice supplied by the driver
//! - [`NestedController`]: temporary override that remembers the original
//! - [`NullController`]: always defends
mod nested;
mod npc;
mod player;

pub use nested::NestedController;
pub use npc::NpcController;
pub use player::{PlayerController, UserOptions};

use thiserror::Error;

use crate::battle::{BattleView, EntityHandle};
use crate::error::{EngineError, ErrorSeverity};
use crate::skill::SkillSlot;

/// What a combatant does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Defend,
    Flee,
    UseSkill {
        skill: SkillSlot,
        target: EntityHandle,
    },
    /// No decision yet: the driver must supply one and retry the turn.
    Delegate,
}

pub trait Controller: Send {
    /// Short label for logs.
    fn name(&self) -> &str;

    fn decide(&mut self, view: &BattleView<'_>) -> Action;

    /// Interactive controller reachable through this one, if any.
    fn as_player_mut(&mut self) -> Option<&mut PlayerController> {
        None
    }

    fn as_player(&self) -> Option<&PlayerController> {
        None
    }

    /// Hands back the controller saved by an override.
    fn take_saved(&mut self) -> Option<Box<dyn Controller>> {
        None
    }
}

/// Always defends.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullController;

impl Controller for NullController {
    fn name(&self) -> &str {
        "null"
    }

    fn decide(&mut self, _view: &BattleView<'_>) -> Action {
        Action::Defend
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("controller of {0:?} does not accept choices")]
    NotInteractive(EntityHandle),

    #[error("delegate cannot be supplied as a choice")]
    DelegateChoice,
}

impl EngineError for ControlError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInteractive(_) => "CONTROL_NOT_INTERACTIVE",
            Self::DelegateChoice => "CONTROL_DELEGATE_CHOICE",
        }
    }
}
