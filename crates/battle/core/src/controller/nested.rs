use super::{Action, Controller, PlayerController};
use crate::battle::BattleView;

/// Temporary override (charm, confusion, autopilot) that keeps the original
/// controller for later restoration.
pub struct NestedController {
    active: Box<dyn Controller>,
    saved: Option<Box<dyn Controller>>,
    name: String,
}

impl NestedController {
    pub fn new(active: Box<dyn Controller>, saved: Box<dyn Controller>) -> Self {
        let name = format!("{} over {}", active.name(), saved.name());
        Self {
            active,
            saved: Some(saved),
            name,
        }
    }

    pub fn saved(&self) -> Option<&dyn Controller> {
        self.saved.as_deref()
    }
}

impl Controller for NestedController {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, view: &BattleView<'_>) -> Action {
        self.active.decide(view)
    }

    fn as_player_mut(&mut self) -> Option<&mut PlayerController> {
        self.active.as_player_mut()
    }

    fn as_player(&self) -> Option<&PlayerController> {
        self.active.as_player()
    }

    fn take_saved(&mut self) -> Option<Box<dyn Controller>> {
        self.saved.take()
    }
}
