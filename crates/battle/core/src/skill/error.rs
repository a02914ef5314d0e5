use thiserror::Error;

use crate::battle::EntityHandle;
use crate::error::{EngineError, ErrorSeverity};

/// Errors raised while resolving a skill.
///
/// Any of these aborts the whole skill; the scheduler rolls pools and status
/// effects back to their state before the skill started.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("source {0:?} is not in the roster")]
    SourceNotFound(EntityHandle),

    #[error("target {0:?} is not in the roster")]
    TargetNotFound(EntityHandle),

    #[error("{source_name} cannot pay the cost of {skill}")]
    CostUnpayable { skill: String, source_name: String },

    #[error("behavior of {skill} failed: {error}")]
    Behavior {
        skill: String,
        #[source]
        error: BehaviorError,
    },
}

impl EngineError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SourceNotFound(_) => ErrorSeverity::Internal,
            Self::TargetNotFound(_) | Self::CostUnpayable { .. } | Self::Behavior { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SourceNotFound(_) => "SKILL_SOURCE_NOT_FOUND",
            Self::TargetNotFound(_) => "SKILL_TARGET_NOT_FOUND",
            Self::CostUnpayable { .. } => "SKILL_COST_UNPAYABLE",
            Self::Behavior { .. } => "SKILL_BEHAVIOR_FAILED",
        }
    }
}

/// Errors reported by a [`SkillBehavior`](super::SkillBehavior).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BehaviorError {
    #[error("entity {0:?} is not in the roster")]
    UnknownEntity(EntityHandle),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Failed(String),
}

impl EngineError for BehaviorError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEntity(_) => ErrorSeverity::Internal,
            Self::InvalidArgument(_) | Self::Failed(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntity(_) => "BEHAVIOR_UNKNOWN_ENTITY",
            Self::InvalidArgument(_) => "BEHAVIOR_INVALID_ARGUMENT",
            Self::Failed(_) => "BEHAVIOR_FAILED",
        }
    }
}

/// Errors raised when looking up or materializing catalog content.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    #[error("skill {name} has no level {level} (max {max_level})")]
    InvalidLevel {
        name: String,
        level: u32,
        max_level: u32,
    },

    #[error("unknown entity template: {kind}/{variant}")]
    UnknownTemplate { kind: String, variant: String },

    #[error("malformed entry {name}: {reason}")]
    Malformed { name: String, reason: String },
}

impl EngineError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSkill(_) => "CATALOG_UNKNOWN_SKILL",
            Self::InvalidLevel { .. } => "CATALOG_INVALID_LEVEL",
            Self::UnknownTemplate { .. } => "CATALOG_UNKNOWN_TEMPLATE",
            Self::Malformed { .. } => "CATALOG_MALFORMED",
        }
    }
}
