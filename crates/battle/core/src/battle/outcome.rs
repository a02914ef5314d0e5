use super::EntityHandle;
use crate::message::Message;

/// Result record of one scheduler step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Combatant that was up.
    pub actor: EntityHandle,
    /// False only when the controller delegated and the turn is pending.
    pub turn_finished: bool,
    pub needs_user_input: bool,
    /// Entity whose controller must be fed a choice before the turn resumes.
    pub controller_needing_input: Option<EntityHandle>,
    pub messages: Vec<Message>,
}

impl TurnOutcome {
    /// Turn of a defeated combatant: nothing happened.
    pub fn skipped(actor: EntityHandle) -> Self {
        Self::finished(actor, Vec::new())
    }

    pub fn finished(actor: EntityHandle, messages: Vec<Message>) -> Self {
        Self {
            actor,
            turn_finished: true,
            needs_user_input: false,
            controller_needing_input: None,
            messages,
        }
    }

    pub fn awaiting_input(actor: EntityHandle) -> Self {
        Self {
            actor,
            turn_finished: false,
            needs_user_input: true,
            controller_needing_input: Some(actor),
            messages: Vec::new(),
        }
    }
}
