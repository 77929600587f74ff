use serde::{Deserialize, Serialize};

/// The user's chosen answers, one per question, in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSequence(Vec<String>);

impl AnswerSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, answer: impl Into<String>) {
        self.0.push(answer.into());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for AnswerSequence {
    fn from(answers: Vec<String>) -> Self {
        Self(answers)
    }
}

impl AsRef<[String]> for AnswerSequence {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}
