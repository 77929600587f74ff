use serde::{Deserialize, Serialize};

use crate::model::ids::TurnId;
use crate::time::Clock;

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Bot,
    User,
}

/// One line of the rendered conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: TurnId,
    pub text: String,
    pub sender: Sender,
    /// Set on the "typing" turn shown while a classification is outstanding.
    #[serde(default)]
    pub is_placeholder: bool,
}

/// Append-only conversation log for one quiz session.
///
/// Turn ids come from the clock in milliseconds and are bumped so that they stay
/// strictly increasing even when several turns share a millisecond.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatLog {
    turns: Vec<ChatTurn>,
    last_id: Option<TurnId>,
}

impl ChatLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bot(&mut self, clock: &Clock, text: impl Into<String>) -> TurnId {
        self.push(clock, text.into(), Sender::Bot, false)
    }

    pub fn push_user(&mut self, clock: &Clock, text: impl Into<String>) -> TurnId {
        self.push(clock, text.into(), Sender::User, false)
    }

    pub fn push_placeholder(&mut self, clock: &Clock) -> TurnId {
        self.push(clock, String::new(), Sender::Bot, true)
    }

    /// Drop every placeholder turn, returning how many were removed.
    pub fn remove_placeholders(&mut self) -> usize {
        let before = self.turns.len();
        self.turns.retain(|turn| !turn.is_placeholder);
        before - self.turns.len()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
        self.last_id = None;
    }

    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.turns.iter().any(|turn| turn.is_placeholder)
    }

    fn next_id(&mut self, clock: &Clock) -> TurnId {
        let now = clock.now_millis();
        let id = match self.last_id {
            Some(last) if now <= last.value() => last.value().saturating_add(1),
            _ => now,
        };
        let id = TurnId::new(id);
        self.last_id = Some(id);
        id
    }

    fn push(&mut self, clock: &Clock, text: String, sender: Sender, is_placeholder: bool) -> TurnId {
        let id = self.next_id(clock);
        self.turns.push(ChatTurn {
            id,
            text,
            sender,
            is_placeholder,
        });
        id
    }
}
