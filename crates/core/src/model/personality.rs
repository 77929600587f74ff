use serde::{Deserialize, Serialize};

/// Final classification shown on the result card.
///
/// Serialized with the remote service's field names (`type`, `message`, `traits`, `color`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityResult {
    #[serde(rename = "type")]
    pub personality_type: String,
    pub message: String,
    pub traits: Vec<String>,
    pub color: String,
}

impl PersonalityResult {
    #[must_use]
    pub fn new(
        personality_type: impl Into<String>,
        message: impl Into<String>,
        traits: Vec<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            personality_type: personality_type.into(),
            message: message.into(),
            traits,
            color: color.into(),
        }
    }
}
