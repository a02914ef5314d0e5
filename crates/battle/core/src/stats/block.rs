use strum::{Display, EnumCount, EnumIter};

use super::Element;

/// Named, non-resistance attributes of a stat block.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumCount, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    MaxHealth,
    MaxMana,
    MaxTech,
    PhysicalAttack,
    PhysicalDefense,
    MagicalAttack,
    MagicalDefense,
    /// Accuracy contribution of the attacker.
    Skill,
    /// Accuracy penalty imposed on attackers.
    Evade,
    Speed,
}

impl StatKind {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Per-element resistance table, in percent. Negative values are weaknesses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resistances([i32; Element::COUNT]);

impl Resistances {
    pub const fn new() -> Self {
        Self([0; Element::COUNT])
    }

    #[inline]
    pub const fn get(&self, element: Element) -> i32 {
        self.0[element.index()]
    }

    #[inline]
    pub fn set(&mut self, element: Element, value: i32) {
        self.0[element.index()] = value;
    }

    #[must_use]
    pub fn with(mut self, element: Element, value: i32) -> Self {
        self.set(element, value);
        self
    }
}

/// Complete stat block: pool maxima, attack/defense pairs, accuracy scalars,
/// speed and elemental resistances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Stats {
    pub max_health: i32,
    pub max_mana: i32,
    pub max_tech: i32,
    pub physical_attack: i32,
    pub physical_defense: i32,
    pub magical_attack: i32,
    pub magical_defense: i32,
    pub skill: i32,
    pub evade: i32,
    pub speed: i32,
    pub resistances: Resistances,
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::MaxHealth => self.max_health,
            StatKind::MaxMana => self.max_mana,
            StatKind::MaxTech => self.max_tech,
            StatKind::PhysicalAttack => self.physical_attack,
            StatKind::PhysicalDefense => self.physical_defense,
            StatKind::MagicalAttack => self.magical_attack,
            StatKind::MagicalDefense => self.magical_defense,
            StatKind::Skill => self.skill,
            StatKind::Evade => self.evade,
            StatKind::Speed => self.speed,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut i32 {
        match kind {
            StatKind::MaxHealth => &mut self.max_health,
            StatKind::MaxMana => &mut self.max_mana,
            StatKind::MaxTech => &mut self.max_tech,
            StatKind::PhysicalAttack => &mut self.physical_attack,
            StatKind::PhysicalDefense => &mut self.physical_defense,
            StatKind::MagicalAttack => &mut self.magical_attack,
            StatKind::MagicalDefense => &mut self.magical_defense,
            StatKind::Skill => &mut self.skill,
            StatKind::Evade => &mut self.evade,
            StatKind::Speed => &mut self.speed,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: i32) {
        *self.get_mut(kind) = value;
    }

    #[must_use]
    pub fn with(mut self, kind: StatKind, value: i32) -> Self {
        self.set(kind, value);
        self
    }

    #[must_use]
    pub fn with_resistance(mut self, element: Element, value: i32) -> Self {
        self.resistances.set(element, value);
        self
    }
}
