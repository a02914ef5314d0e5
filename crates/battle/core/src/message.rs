//! Structured battle events.
//!
//! The engine never formats text for players. Every observable effect is
//! appended to a [`MessageLog`] as a [`Message`]; the driver drains the log
//! after each turn and renders it however it likes.

use crate::battle::EntityHandle;
use crate::stats::Pool;
use crate::status::StatusKind;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    SkillUsed {
        skill: String,
        source: EntityHandle,
        target: EntityHandle,
    },
    Miss {
        target: EntityHandle,
    },
    Critical {
        target: EntityHandle,
    },
    PoolChanged {
        entity: EntityHandle,
        pool: Pool,
        old: i32,
        new: i32,
    },
    StatusApplied {
        entity: EntityHandle,
        effect: StatusKind,
    },
    StatusRemoved {
        entity: EntityHandle,
        effect: StatusKind,
    },
    Defended {
        entity: EntityHandle,
    },
    Fled {
        entity: EntityHandle,
        succeeded: bool,
    },
    Died {
        entity: EntityHandle,
    },
    Notification {
        text: String,
    },
}

/// The skill most recently announced on a log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillUse {
    pub skill: String,
    pub source: EntityHandle,
    pub target: EntityHandle,
}

/// Append-only event sink, drained destructively by the driver.
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
    last_skill: Option<SkillUse>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        if let Message::SkillUsed {
            skill,
            source,
            target,
        } = &message
        {
            self.last_skill = Some(SkillUse {
                skill: skill.clone(),
                source: *source,
                target: *target,
            });
        }
        self.messages.push(message);
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.push(Message::Notification { text: text.into() });
    }

    /// Skill currently being resolved, if any has been announced.
    ///
    /// Survives [`drain`](Self::drain) so hooks can still discover it after
    /// the driver has consumed the messages.
    pub fn last_skill_used(&self) -> Option<&SkillUse> {
        self.last_skill.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Takes every pending message, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Message> {
        core::mem::take(&mut self.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_log() {
        let mut log = MessageLog::new();
        log.notify("first");
        log.push(Message::Defended {
            entity: EntityHandle::new(0),
        });

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
        assert!(log.drain().is_empty());
    }

    #[test]
    fn tracks_last_skill_used_across_drains() {
        let mut log = MessageLog::new();
        assert!(log.last_skill_used().is_none());

        for name in ["slash", "fireball"] {
            log.push(Message::SkillUsed {
                skill: name.into(),
                source: EntityHandle::new(1),
                target: EntityHandle::new(2),
            });
        }
        log.drain();

        let last = log.last_skill_used().unwrap();
        assert_eq!(last.skill, "fireball");
        assert_eq!(last.target, EntityHandle::new(2));
    }
}
