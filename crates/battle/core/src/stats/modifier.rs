//! Modifier stack: Flat → %Inc → Clamp.
//!
//! Additive modifiers are summed and applied first, multiplicative modifiers
//! are summed as percentages and applied to the post-additive value. The
//! order in which modifiers were attached does not matter.

use strum::EnumCount;

use super::{Element, StatKind, Stats};
use crate::config::BattleConfig;

/// How a modifier's magnitude combines with the stat it targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierMode {
    /// Flat amount added to the base value.
    Additive,
    /// Percentage delta (50 = ×1.5, -25 = ×0.75).
    Multiplicative,
}

/// Which slot of the stat block a modifier touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatTarget {
    Stat(StatKind),
    Resistance(Element),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub target: StatTarget,
    pub magnitude: i32,
    pub mode: ModifierMode,
}

impl StatModifier {
    pub const fn additive(stat: StatKind, magnitude: i32) -> Self {
        Self {
            target: StatTarget::Stat(stat),
            magnitude,
            mode: ModifierMode::Additive,
        }
    }

    pub const fn multiplicative(stat: StatKind, percent: i32) -> Self {
        Self {
            target: StatTarget::Stat(stat),
            magnitude: percent,
            mode: ModifierMode::Multiplicative,
        }
    }

    pub const fn resistance(element: Element, magnitude: i32, mode: ModifierMode) -> Self {
        Self {
            target: StatTarget::Resistance(element),
            magnitude,
            mode,
        }
    }
}

/// Per-slot running sums.
#[derive(Clone, Copy, Default)]
struct Totals {
    flat: i64,
    percent: i64,
    touched: bool,
}

impl Totals {
    fn add(&mut self, modifier: &StatModifier) {
        self.touched = true;
        match modifier.mode {
            ModifierMode::Additive => self.flat += i64::from(modifier.magnitude),
            ModifierMode::Multiplicative => self.percent += i64::from(modifier.magnitude),
        }
    }

    fn apply(&self, base: i32) -> i64 {
        let after_flat = i64::from(base) + self.flat;
        if self.percent == 0 {
            after_flat
        } else {
            // Truncates toward zero.
            after_flat * (100 + self.percent) / 100
        }
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Combines `base` with `modifiers` into an effective stat block.
///
/// Non-resistance stats touched by at least one modifier are floored at
/// [`BattleConfig::MIN_STAT`]; untouched stats and every resistance pass
/// through unclamped.
///
/// ```
/// # use battle_core::stats::{compute_effective, StatKind, StatModifier, Stats};
/// let base = Stats::default().with(StatKind::PhysicalAttack, 10);
/// let modifiers = [
///     StatModifier::multiplicative(StatKind::PhysicalAttack, 50),
///     StatModifier::additive(StatKind::PhysicalAttack, 5),
/// ];
/// // (10 + 5) × 1.5 = 22.5 → 22
/// assert_eq!(compute_effective(&base, &modifiers).physical_attack, 22);
/// ```
pub fn compute_effective<'a>(
    base: &Stats,
    modifiers: impl IntoIterator<Item = &'a StatModifier>,
) -> Stats {
    let mut stats = [Totals::default(); StatKind::COUNT];
    let mut resistances = [Totals::default(); Element::COUNT];

    for modifier in modifiers {
        match modifier.target {
            StatTarget::Stat(kind) => stats[kind.index()].add(modifier),
            StatTarget::Resistance(element) => resistances[element.index()].add(modifier),
        }
    }

    let mut effective = *base;

    for kind in <StatKind as strum::IntoEnumIterator>::iter() {
        let totals = &stats[kind.index()];
        if totals.touched {
            let value = totals.apply(base.get(kind)).max(i64::from(BattleConfig::MIN_STAT));
            effective.set(kind, saturate(value));
        }
    }

    for element in <Element as strum::IntoEnumIterator>::iter() {
        let totals = &resistances[element.index()];
        if totals.touched {
            let value = totals.apply(base.resistances.get(element));
            effective.resistances.set(element, saturate(value));
        }
    }

    effective
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack(value: i32) -> Stats {
        Stats::default().with(StatKind::PhysicalAttack, value)
    }

    #[test]
    fn additive_applies_before_multiplicative_regardless_of_order() {
        let add = StatModifier::additive(StatKind::PhysicalAttack, 5);
        let mul = StatModifier::multiplicative(StatKind::PhysicalAttack, 50);

        // (10 + 5) * 150 / 100 = 22
        assert_eq!(compute_effective(&attack(10), [&add, &mul]).physical_attack, 22);
        assert_eq!(compute_effective(&attack(10), [&mul, &add]).physical_attack, 22);
    }

    #[test]
    fn multiplicative_percentages_are_summed() {
        let modifiers = [
            StatModifier::multiplicative(StatKind::Speed, 20),
            StatModifier::multiplicative(StatKind::Speed, 30),
        ];
        let base = Stats::default().with(StatKind::Speed, 10);

        // 10 * (100 + 50) / 100 = 15, not 10 * 1.2 * 1.3 = 15.6
        assert_eq!(compute_effective(&base, &modifiers).speed, 15);
    }

    #[test]
    fn touched_stats_floor_at_one() {
        let modifiers = [StatModifier::additive(StatKind::PhysicalDefense, -50)];
        let base = Stats::default().with(StatKind::PhysicalDefense, 8);
        assert_eq!(compute_effective(&base, &modifiers).physical_defense, 1);

        let modifiers = [StatModifier::multiplicative(StatKind::PhysicalDefense, -200)];
        assert_eq!(compute_effective(&base, &modifiers).physical_defense, 1);
    }

    #[test]
    fn untouched_stats_pass_through() {
        let base = Stats::default().with(StatKind::Evade, 0);
        let modifiers = [StatModifier::additive(StatKind::Skill, 3)];
        let effective = compute_effective(&base, &modifiers);

        assert_eq!(effective.evade, 0);
        assert_eq!(effective.skill, 3);
    }

    #[test]
    fn resistances_are_not_clamped() {
        let base = Stats::default().with_resistance(Element::Fire, 10);
        let modifiers = [
            StatModifier::resistance(Element::Fire, -40, ModifierMode::Additive),
            StatModifier::resistance(Element::Fire, 50, ModifierMode::Multiplicative),
        ];
        let effective = compute_effective(&base, &modifiers);

        // (10 - 40) * 150 / 100 = -45
        assert_eq!(effective.resistances.get(Element::Fire), -45);
        assert_eq!(effective.resistances.get(Element::Water), 0);
    }

    #[test]
    fn empty_modifier_list_is_identity() {
        let base = attack(7).with(StatKind::MaxHealth, 40);
        assert_eq!(compute_effective(&base, &[] as &[StatModifier]), base);
    }
}
