/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Chance (0-100) that an AI controller defends instead of using a skill.
    pub npc_defend_percent: u32,

    /// Magnitude applied to the non-primary targets of a semi-area skill.
    pub semi_area_percent: u32,

    /// Percentage delta contributed by a critical hit.
    pub critical_bonus_percent: i32,
}

impl BattleConfig {
    // ===== compile-time constants =====
    /// Time units between two turns of a speed-1 combatant.
    pub const TIME_UNIT: u64 = 100;
    /// Fixed-point resolution of the scheduler clock.
    pub const TICKS_PER_UNIT: u64 = 10_000;
    /// Floor for every non-resistance stat touched by a modifier.
    pub const MIN_STAT: i32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_NPC_DEFEND_PERCENT: u32 = 20;
    pub const DEFAULT_SEMI_AREA_PERCENT: u32 = 50;
    pub const DEFAULT_CRITICAL_BONUS_PERCENT: i32 = 50;

    pub fn new() -> Self {
        Self {
            npc_defend_percent: Self::DEFAULT_NPC_DEFEND_PERCENT,
            semi_area_percent: Self::DEFAULT_SEMI_AREA_PERCENT,
            critical_bonus_percent: Self::DEFAULT_CRITICAL_BONUS_PERCENT,
        }
    }

    #[must_use]
    pub fn with_npc_defend_percent(mut self, percent: u32) -> Self {
        self.npc_defend_percent = percent.min(100);
        self
    }

    #[must_use]
    pub fn with_semi_area_percent(mut self, percent: u32) -> Self {
        self.semi_area_percent = percent;
        self
    }

    #[must_use]
    pub fn with_critical_bonus_percent(mut self, percent: i32) -> Self {
        self.critical_bonus_percent = percent;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
