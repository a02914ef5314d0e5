use core::fmt;
use core::ops::Add;

use crate::config::BattleConfig;

/// Scheduler clock in fixed-point ticks ([`BattleConfig::TICKS_PER_UNIT`]
/// ticks per time unit).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    /// Delay between two turns: `TIME_UNIT / speed` time units, at least one
    /// tick. Speeds below 1 count as 1.
    pub fn delay_for_speed(speed: i32) -> Self {
        let speed = speed.max(1) as u64;
        let ticks = BattleConfig::TIME_UNIT * BattleConfig::TICKS_PER_UNIT / speed;
        Self(ticks.max(1))
    }

    /// Whole time units elapsed, truncated.
    pub const fn units(self) -> u64 {
        self.0 / BattleConfig::TICKS_PER_UNIT
    }
}

impl Add for Tick {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Debug for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / BattleConfig::TICKS_PER_UNIT;
        let frac = self.0 % BattleConfig::TICKS_PER_UNIT;
        write!(f, "t{whole}.{frac:04}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_inverse_to_speed() {
        // 100 / 20 = 5 units
        assert_eq!(Tick::delay_for_speed(20).units(), 5);
        // 100 / 10 = 10 units
        assert_eq!(Tick::delay_for_speed(10).units(), 10);
        // 100 / 3 = 33.3333 units, kept to the tick
        assert_eq!(Tick::delay_for_speed(3), Tick(333_333));
    }

    #[test]
    fn delay_is_never_zero() {
        assert_eq!(Tick::delay_for_speed(i32::MAX), Tick(1));
        assert_eq!(Tick::delay_for_speed(0), Tick::delay_for_speed(1));
        assert_eq!(Tick::delay_for_speed(-5), Tick::delay_for_speed(1));
    }
}
