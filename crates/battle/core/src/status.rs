//! Status effects: modifier bundles with a lifetime.
//!
//! Effects are stored on the entity in application order. Turn-counted
//! effects tick once per end of the owner's turn and expire on the tick that
//! reaches zero.

use core::fmt;

use crate::stats::{StatKind, StatModifier};

/// Identity of a status effect. Presets carry their own modifier bundles,
/// `Named` effects are authored by content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    AttackBoost,
    DefenseBreak,
    Haste,
    Slow,
    Named(String),
}

impl StatusKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::AttackBoost => "attack_boost",
            Self::DefenseBreak => "defense_break",
            Self::Haste => "haste",
            Self::Slow => "slow",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long an effect stays attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectDuration {
    /// Survives turn ends and battle end.
    Permanent,
    /// Survives turn ends, removed when the battle ends.
    Battle,
    /// Remaining owner turn ends before expiry.
    Turns(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub duration: EffectDuration,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<StatModifier>,
}

impl StatusEffect {
    /// Turns granted to presets.
    pub const PRESET_TURNS: u32 = 3;

    pub fn new(kind: StatusKind, duration: EffectDuration) -> Self {
        Self {
            kind,
            duration,
            modifiers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_modifier(mut self, modifier: StatModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Built-in effect for a preset kind. `Named` kinds have no preset.
    pub fn preset(kind: StatusKind) -> Option<Self> {
        let turns = EffectDuration::Turns(Self::PRESET_TURNS);
        let effect = match kind {
            StatusKind::AttackBoost => Self::new(kind, turns)
                .with_modifier(StatModifier::multiplicative(StatKind::PhysicalAttack, 50))
                .with_modifier(StatModifier::multiplicative(StatKind::MagicalAttack, 50)),
            StatusKind::DefenseBreak => Self::new(kind, turns)
                .with_modifier(StatModifier::multiplicative(StatKind::PhysicalDefense, -50))
                .with_modifier(StatModifier::multiplicative(StatKind::MagicalDefense, -50)),
            StatusKind::Haste => Self::new(kind, turns)
                .with_modifier(StatModifier::multiplicative(StatKind::Speed, 50)),
            StatusKind::Slow => Self::new(kind, turns)
                .with_modifier(StatModifier::multiplicative(StatKind::Speed, -50)),
            StatusKind::Named(_) => return None,
        };
        Some(effect)
    }

    pub fn remaining_turns(&self) -> Option<u32> {
        match self.duration {
            EffectDuration::Turns(turns) => Some(turns),
            _ => None,
        }
    }

    /// Consumes one owner turn. Returns true when the effect has expired.
    pub fn tick(&mut self) -> bool {
        match &mut self.duration {
            EffectDuration::Turns(turns) => {
                *turns = turns.saturating_sub(1);
                *turns == 0
            }
            _ => false,
        }
    }

    /// True for effects cleared at battle end.
    pub fn is_battle_scoped(&self) -> bool {
        !matches!(self.duration, EffectDuration::Permanent)
    }
}

/// Ordered collection of attached effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[StatusEffect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn contains(&self, kind: &StatusKind) -> bool {
        self.effects.iter().any(|effect| &effect.kind == kind)
    }

    pub fn push(&mut self, effect: StatusEffect) {
        self.effects.push(effect);
    }

    /// Modifiers of every attached effect, in attachment order.
    pub fn modifiers(&self) -> impl Iterator<Item = &StatModifier> {
        self.effects.iter().flat_map(|effect| effect.modifiers.iter())
    }

    /// Ticks every effect and detaches the expired ones, preserving the order
    /// of the survivors.
    pub fn tick_all(&mut self) -> Vec<StatusEffect> {
        for effect in &mut self.effects {
            effect.tick();
        }
        self.extract(|effect| effect.remaining_turns() == Some(0))
    }

    pub fn remove_kind(&mut self, kind: &StatusKind) -> Vec<StatusEffect> {
        self.extract(|effect| &effect.kind == kind)
    }

    pub fn clear_battle_scoped(&mut self) -> Vec<StatusEffect> {
        self.extract(StatusEffect::is_battle_scoped)
    }

    fn extract(&mut self, predicate: impl Fn(&StatusEffect) -> bool) -> Vec<StatusEffect> {
        let (removed, kept) = core::mem::take(&mut self.effects)
            .into_iter()
            .partition(|effect| predicate(effect));
        self.effects = kept;
        removed
    }
}
