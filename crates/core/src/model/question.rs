use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("question catalog is empty")]
    Empty,

    #[error("question {id} has empty text")]
    EmptyText { id: QuestionId },

    #[error("question {id} has no answer options")]
    NoOptions { id: QuestionId },

    #[error("question {id} has a blank answer option")]
    BlankOption { id: QuestionId },

    #[error("question ids must be unique and ascending ({previous} then {id})")]
    OutOfOrder { previous: QuestionId, id: QuestionId },

    #[error("invalid catalog json: {0}")]
    Json(String),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single quiz question with its fixed answer choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    emoji: Option<String>,
}

impl Question {
    /// Build a question, trimming text and rejecting blank content.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the text or any option is blank, or no options are given.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        emoji: Option<String>,
    ) -> Result<Self, CatalogError> {
        let question = Self {
            id,
            text: text.into().trim().to_owned(),
            options,
            emoji: emoji.filter(|glyph| !glyph.trim().is_empty()),
        };
        question.validate()?;
        Ok(question)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.text.trim().is_empty() {
            return Err(CatalogError::EmptyText { id: self.id });
        }
        if self.options.is_empty() {
            return Err(CatalogError::NoOptions { id: self.id });
        }
        if self.options.iter().any(|option| option.trim().is_empty()) {
            return Err(CatalogError::BlankOption { id: self.id });
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn emoji(&self) -> Option<&str> {
        self.emoji.as_deref()
    }
}

#[derive(Deserialize)]
struct RawQuestion {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    #[serde(default)]
    emoji: Option<String>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = CatalogError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.text, raw.options, raw.emoji)
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Ordered, immutable list of quiz questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Build a catalog from questions in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for an empty list, `CatalogError::OutOfOrder` when
    /// ids are not strictly ascending, or the first per-question validation failure.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }
        for question in &questions {
            question.validate()?;
        }
        for pair in questions.windows(2) {
            if pair[1].id <= pair[0].id {
                return Err(CatalogError::OutOfOrder {
                    previous: pair[0].id,
                    id: pair[1].id,
                });
            }
        }
        Ok(Self { questions })
    }

    /// Parse a catalog from the `[{ id, text, options, emoji }]` JSON shape.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed input, or any validation error.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let questions: Vec<Question> =
            serde_json::from_str(raw).map_err(|err| CatalogError::Json(err.to_string()))?;
        Self::new(questions)
    }

    /// The five questions shipped with the app.
    #[must_use]
    pub fn builtin() -> Self {
        let questions = BUILTIN_QUESTIONS
            .iter()
            .map(|(id, text, options, emoji)| Question {
                id: QuestionId::new(*id),
                text: (*text).to_owned(),
                options: options.iter().map(|option| (*option).to_owned()).collect(),
                emoji: Some((*emoji).to_owned()),
            })
            .collect();
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

type BuiltinQuestion = (u32, &'static str, [&'static str; 4], &'static str);

const BUILTIN_QUESTIONS: [BuiltinQuestion; 5] = [
    (
        1,
        "Pick your favorite tech gadget!",
        [
            "Smartphone - Always connected",
            "Laptop - Power and versatility",
            "Smart Watch - Health and efficiency",
            "VR Headset - Immersive experiences",
        ],
        "📱",
    ),
    (
        2,
        "Choose your favorite color palette!",
        [
            "Blue & Purple - Calm and creative",
            "Red & Orange - Bold and energetic",
            "Green & Yellow - Fresh and optimistic",
            "Black & Gold - Elegant and sophisticated",
        ],
        "🎨",
    ),
    (
        3,
        "Which skill excites you the most?",
        [
            "Problem Solving - Finding solutions",
            "Creative Design - Making things beautiful",
            "Communication - Connecting with people",
            "Technical Skills - Building & coding",
        ],
        "⚡",
    ),
    (
        4,
        "How do you spend your free time?",
        [
            "Learning new things",
            "Creating art or content",
            "Hanging out with friends",
            "Gaming or watching movies",
        ],
        "🎯",
    ),
    (
        5,
        "What's your dream work environment?",
        [
            "Startup - Fast-paced and innovative",
            "Creative Studio - Artistic and flexible",
            "Tech Giant - Structured and resourceful",
            "Remote - Freedom and independence",
        ],
        "🚀",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, options: &[&str]) -> Question {
        Question {
            id: QuestionId::new(id),
            text: format!("Q{id}"),
            options: options.iter().map(|o| (*o).to_owned()).collect(),
            emoji: None,
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = QuestionCatalog::builtin();
        let rebuilt = QuestionCatalog::new(builtin.questions().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 5);
        assert!(builtin.questions().iter().all(|q| q.options().len() == 4));
    }

    #[test]
    fn rejects_duplicate_and_descending_ids() {
        let err = QuestionCatalog::new(vec![question(2, &["a"]), question(2, &["b"])]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::OutOfOrder {
                previous: QuestionId::new(2),
                id: QuestionId::new(2)
            }
        );

        let err = QuestionCatalog::new(vec![question(3, &["a"]), question(1, &["b"])]).unwrap_err();
        assert!(matches!(err, CatalogError::OutOfOrder { .. }));
    }

    #[test]
    fn rejects_empty_catalog_and_blank_options() {
        assert_eq!(QuestionCatalog::new(Vec::new()), Err(CatalogError::Empty));
        let err = QuestionCatalog::new(vec![question(1, &["ok", "  "])]).unwrap_err();
        assert_eq!(err, CatalogError::BlankOption { id: QuestionId::new(1) });
        let err = QuestionCatalog::new(vec![question(1, &[])]).unwrap_err();
        assert_eq!(err, CatalogError::NoOptions { id: QuestionId::new(1) });
    }

    #[test]
    fn parses_json_catalog() {
        let raw = r#"[
            {"id": 1, "text": "Tea or coffee?", "options": ["Tea", "Coffee"], "emoji": "☕"},
            {"id": 2, "text": "Cats or dogs?", "options": ["Cats", "Dogs"]}
        ]"#;
        let catalog = QuestionCatalog::from_json(raw).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).and_then(Question::emoji), Some("☕"));
        assert_eq!(catalog.get(1).and_then(Question::emoji), None);
    }

    #[test]
    fn json_questions_are_normalized_like_constructed_ones() {
        let raw = r#"[{"id": 1, "text": "  Tea?  ", "options": ["Tea"], "emoji": ""}]"#;
        let catalog = QuestionCatalog::from_json(raw).unwrap();

        let expected =
            Question::new(QuestionId::new(1), "Tea?", vec!["Tea".into()], None).unwrap();
        assert_eq!(catalog.get(0), Some(&expected));
        assert_eq!(catalog.get(0).and_then(Question::emoji), None);
    }

    #[test]
    fn json_question_validation_errors_are_reported() {
        let raw = r#"[{"id": 1, "text": "   ", "options": ["Tea"]}]"#;
        let err = QuestionCatalog::from_json(raw).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = QuestionCatalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }
}
