use crate::entity::Entity;
use crate::rng::BattleRng;

use super::BattleView;

/// Decides whether a flee attempt succeeds.
pub trait FleePolicy: Send {
    fn attempt(
        &mut self,
        runner: &Entity,
        view: &BattleView<'_>,
        rng: &mut dyn BattleRng,
    ) -> bool;
}

/// Every attempt succeeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysFlee;

impl FleePolicy for AlwaysFlee {
    fn attempt(&mut self, _: &Entity, _: &BattleView<'_>, _: &mut dyn BattleRng) -> bool {
        true
    }
}

/// Succeeds with a chance that grows with the runner's speed advantage over
/// the fastest living enemy: `base + (speed - fastest)`, capped to [5, 95].
#[derive(Clone, Copy, Debug)]
pub struct SpeedFlee {
    pub base_percent: i32,
}

impl Default for SpeedFlee {
    fn default() -> Self {
        Self { base_percent: 50 }
    }
}

impl FleePolicy for SpeedFlee {
    fn attempt(
        &mut self,
        runner: &Entity,
        view: &BattleView<'_>,
        rng: &mut dyn BattleRng,
    ) -> bool {
        let fastest = view
            .living_enemies()
            .into_iter()
            .filter_map(|enemy| view.entity(enemy))
            .map(|enemy| enemy.stats().speed)
            .max();
        let Some(fastest) = fastest else {
            return true;
        };
        let gap = i64::from(runner.stats().speed) - i64::from(fastest);
        let chance = (i64::from(self.base_percent) + gap).clamp(5, 95) as i32;
        rng.chance(chance)
    }
}
