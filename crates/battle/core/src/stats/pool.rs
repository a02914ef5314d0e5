use strum::{Display, EnumCount, EnumIter};

use super::{StatKind, Stats};

/// Depletable resource pools. Each is bounded by a max stat.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumCount, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pool {
    Health,
    Mana,
    Tech,
}

impl Pool {
    /// Stat that bounds this pool.
    pub const fn max_stat(self) -> StatKind {
        match self {
            Self::Health => StatKind::MaxHealth,
            Self::Mana => StatKind::MaxMana,
            Self::Tech => StatKind::MaxTech,
        }
    }

    #[inline]
    pub fn maximum(self, stats: &Stats) -> i32 {
        stats.get(self.max_stat()).max(0)
    }
}

/// Stored pool values.
///
/// Values are kept as written and clamped on read, so a temporarily lowered
/// maximum never destroys the underlying value. Writes always store an
/// already-clamped value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolValues {
    pub health: i32,
    pub mana: i32,
    pub tech: i32,
}

impl PoolValues {
    /// All pools filled to the maxima of `stats`.
    pub fn full(stats: &Stats) -> Self {
        Self {
            health: Pool::Health.maximum(stats),
            mana: Pool::Mana.maximum(stats),
            tech: Pool::Tech.maximum(stats),
        }
    }

    pub fn raw(&self, pool: Pool) -> i32 {
        match pool {
            Pool::Health => self.health,
            Pool::Mana => self.mana,
            Pool::Tech => self.tech,
        }
    }

    /// Current value clamped to `[0, max]` under `stats`.
    pub fn current(&self, pool: Pool, stats: &Stats) -> i32 {
        self.raw(pool).clamp(0, pool.maximum(stats))
    }

    pub fn set(&mut self, pool: Pool, value: i32) {
        match pool {
            Pool::Health => self.health = value,
            Pool::Mana => self.mana = value,
            Pool::Tech => self.tech = value,
        }
    }
}

/// Before/after record of one pool mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolChange {
    pub pool: Pool,
    pub old: i32,
    pub new: i32,
}

impl PoolChange {
    /// True when this change took health from positive to zero.
    pub fn is_fatal(&self) -> bool {
        self.pool == Pool::Health && self.old > 0 && self.new <= 0
    }

    pub fn delta(&self) -> i32 {
        self.new - self.old
    }
}
