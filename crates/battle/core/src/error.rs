//! Common error infrastructure for battle-core.
//!
//! Concern-specific errors (`SkillError`, `BattleError`, ...) live next to the
//! code that raises them. They all implement [`EngineError`] so drivers can
//! classify failures without matching on every variant.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input from the driver or content (unknown target, bad data).
    ///
    /// The battle is untouched; the caller should fix the request.
    Validation,

    /// Unexpected state inconsistency inside the engine.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// The battle cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common interface for all battle-core error types.
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Stable, machine-readable code (e.g. `"BATTLE_TARGET_NOT_FOUND"`).
    fn error_code(&self) -> &'static str;

    fn is_internal(&self) -> bool {
        self.severity().is_internal()
    }
}
