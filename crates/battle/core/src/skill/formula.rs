//! Damage and healing formulas shared by built-in hooks and data-driven
//! behaviors.
//!
//! All arithmetic is integer; fractional results truncate toward zero unless
//! noted otherwise.

use super::SkillMethod;
use super::hook::Multiplier;
use crate::stats::Stats;

/// Unscaled damage of one hit: `power * max(4*atk - 2*def, 0)`.
///
/// `Mixed` averages the physical and magical rolls; `None` deals `power`
/// flat, ignoring stats.
pub fn damage(method: SkillMethod, power: i32, source: &Stats, target: &Stats) -> i32 {
    let physical = || raw_damage(source.physical_attack, target.physical_defense);
    let magical = || raw_damage(source.magical_attack, target.magical_defense);

    let raw = match method {
        SkillMethod::Physical => physical(),
        SkillMethod::Magical => magical(),
        SkillMethod::Mixed => ((i64::from(physical()) + i64::from(magical())) / 2) as i32,
        SkillMethod::None => return power.max(0),
    };
    saturating_mul(power.max(0), raw)
}

fn raw_damage(attack: i32, defense: i32) -> i32 {
    let value = 4 * i64::from(attack) - 2 * i64::from(defense);
    value.clamp(0, i64::from(i32::MAX)) as i32
}

/// Healing scaled by `multiplier`:
/// `multiplier * power * (0.8 * m_atk + 1.2 * m_def)`, rounded up once at
/// the end.
pub fn healing(power: i32, source: &Stats, multiplier: Multiplier) -> i32 {
    let weighted = 8 * i64::from(source.magical_attack) + 12 * i64::from(source.magical_defense);
    let total = i128::from(power.max(0))
        * i128::from(weighted.max(0))
        * i128::from(multiplier.as_percent());
    // Weights are tenths and the multiplier is a percent.
    let healed = (total + 999) / 1000;
    healed.clamp(0, i128::from(i32::MAX)) as i32
}

/// Hit chance of an accuracy check, in percent.
pub fn hit_chance(accuracy: i32, source: &Stats, target: &Stats) -> i32 {
    accuracy.saturating_add(source.skill).saturating_sub(target.evade)
}

fn saturating_mul(a: i32, b: i32) -> i32 {
    (i64::from(a) * i64::from(b)).clamp(0, i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatKind;

    fn stats(atk: i32, def: i32) -> Stats {
        Stats::default()
            .with(StatKind::PhysicalAttack, atk)
            .with(StatKind::PhysicalDefense, def)
            .with(StatKind::MagicalAttack, atk * 2)
            .with(StatKind::MagicalDefense, def * 2)
    }

    #[test]
    fn damage_uses_attack_and_defense_by_method() {
        let source = stats(10, 0);
        let target = stats(0, 5);

        // 2 * (4*10 - 2*5) = 60
        assert_eq!(damage(SkillMethod::Physical, 2, &source, &target), 60);
        // 2 * (4*20 - 2*10) = 120
        assert_eq!(damage(SkillMethod::Magical, 2, &source, &target), 120);
        // 2 * ((30 + 60) / 2) = 90
        assert_eq!(damage(SkillMethod::Mixed, 2, &source, &target), 90);
        assert_eq!(damage(SkillMethod::None, 7, &source, &target), 7);
    }

    #[test]
    fn damage_never_goes_negative() {
        let weak = stats(1, 0);
        let wall = stats(0, 50);
        assert_eq!(damage(SkillMethod::Physical, 3, &weak, &wall), 0);
    }

    #[test]
    fn healing_rounds_up() {
        let healer = Stats::default()
            .with(StatKind::MagicalAttack, 3)
            .with(StatKind::MagicalDefense, 1);
        // 1 * (0.8*3 + 1.2*1) = 3.6 → 4
        assert_eq!(healing(1, &healer, Multiplier::FULL), 4);
    }

    #[test]
    fn healing_scales_before_rounding() {
        let healer = Stats::default()
            .with(StatKind::MagicalAttack, 3)
            .with(StatKind::MagicalDefense, 1);
        // 0.5 * 3 * 3.6 = 5.4 → 6, not floor(0.5 * ceil(10.8)) = 5
        assert_eq!(healing(1, &healer, Multiplier::percent(50)), 2);
        assert_eq!(healing(3, &healer, Multiplier::percent(50)), 6);
        assert_eq!(healing(3, &healer, Multiplier::ZERO), 0);
    }

    #[test]
    fn mixed_damage_with_huge_stats_saturates() {
        let titan = Stats::default()
            .with(StatKind::PhysicalAttack, 600_000_000)
            .with(StatKind::MagicalAttack, 600_000_000);
        assert_eq!(
            damage(SkillMethod::Mixed, 1, &titan, &Stats::default()),
            i32::MAX
        );
    }

    #[test]
    fn hit_chance_adds_skill_and_subtracts_evade() {
        let source = Stats::default().with(StatKind::Skill, 10);
        let target = Stats::default().with(StatKind::Evade, 25);
        assert_eq!(hit_chance(90, &source, &target), 75);
    }
}
