//! Roster and turn scheduling.
//!
//! [`BattleSystem`] owns every combatant and orders them by readiness. Each
//! call to [`BattleSystem::advance_one_turn`] runs exactly one decision and
//! its resolution, or reports that a controller is waiting for input.
mod error;
mod flee;
mod outcome;
mod roster;
mod system;
mod timeline;
mod view;

pub use error::BattleError;
pub use flee::{AlwaysFlee, FleePolicy, SpeedFlee};
pub use outcome::TurnOutcome;
pub use roster::{Combatant, EntityHandle, Roster, Team};
pub use system::BattleSystem;
pub use timeline::Tick;
pub use view::BattleView;
