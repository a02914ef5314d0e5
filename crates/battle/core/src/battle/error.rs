use thiserror::Error;

use super::EntityHandle;
use crate::controller::ControlError;
use crate::error::{EngineError, ErrorSeverity};
use crate::skill::{SkillError, SkillSlot};

/// Errors returned by the scheduler to the driver.
///
/// A failed turn leaves the battle exactly as it was before the call: the
/// combatant stays scheduled and no pool or status change survives.
#[derive(Debug, Error)]
pub enum BattleError {
    #[error("no combatants are scheduled")]
    NoCombatants,

    #[error("entity {0:?} is not in the roster")]
    UnknownEntity(EntityHandle),

    #[error("{actor:?} targeted {target:?}, which is not in the roster")]
    TargetNotFound {
        actor: EntityHandle,
        target: EntityHandle,
    },

    #[error("{actor:?} has no skill in slot {slot:?}")]
    UnknownSkill {
        actor: EntityHandle,
        slot: SkillSlot,
    },

    #[error(transparent)]
    Skill(#[from] SkillError),

    #[error(transparent)]
    Control(#[from] ControlError),
}

impl EngineError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoCombatants
            | Self::UnknownEntity(_)
            | Self::TargetNotFound { .. }
            | Self::UnknownSkill { .. } => ErrorSeverity::Validation,
            Self::Skill(error) => error.severity(),
            Self::Control(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoCombatants => "BATTLE_NO_COMBATANTS",
            Self::UnknownEntity(_) => "BATTLE_UNKNOWN_ENTITY",
            Self::TargetNotFound { .. } => "BATTLE_TARGET_NOT_FOUND",
            Self::UnknownSkill { .. } => "BATTLE_UNKNOWN_SKILL",
            Self::Skill(error) => error.error_code(),
            Self::Control(error) => error.error_code(),
        }
    }
}
