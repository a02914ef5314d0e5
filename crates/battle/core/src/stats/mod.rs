//! Stat blocks and the modifier engine.
//!
//! Base stats are authored per entity and never mutated by combat. Effective
//! stats are recomputed on every query from the base block plus the modifiers
//! of all active status effects, so there is no cache to invalidate.
mod block;
mod element;
mod modifier;
mod pool;

pub use block::{Resistances, StatKind, Stats};
pub use element::Element;
pub use modifier::{ModifierMode, StatModifier, StatTarget, compute_effective};
pub use pool::{Pool, PoolChange, PoolValues};
