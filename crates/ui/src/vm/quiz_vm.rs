use fortune_core::model::{ChatTurn, Sender};
use tracing::warn;
use services::{
    Advance, AnswerStep, Classification, ClassificationTicket, QuizError, QuizLoopService,
    QuizPhase, QuizSession,
};

use super::card_vm::{ResultCardVm, map_result_card};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatBubbleVm {
    pub key: u64,
    pub text: String,
    pub from_user: bool,
    pub typing: bool,
}

impl From<&ChatTurn> for ChatBubbleVm {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            key: turn.id.value(),
            text: turn.text.clone(),
            from_user: turn.sender == Sender::User,
            typing: turn.is_placeholder,
        }
    }
}

#[must_use]
pub fn map_chat_bubbles(turns: &[ChatTurn]) -> Vec<ChatBubbleVm> {
    turns.iter().map(ChatBubbleVm::from).collect()
}

/// UI wrapper around the quiz session.
pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    /// Create a session on `quiz_loop` and ask the first question.
    #[must_use]
    pub fn start(quiz_loop: &QuizLoopService) -> Self {
        let session = match quiz_loop.start_session() {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "could not start quiz session");
                quiz_loop.new_session()
            }
        };
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn bubbles(&self) -> Vec<ChatBubbleVm> {
        map_chat_bubbles(self.session.chat().turns())
    }

    /// Answer choices for the question on screen, empty when answering is closed.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        if !self.session.accepts_answers() {
            return Vec::new();
        }
        self.session
            .current_question()
            .map(|question| question.options().to_vec())
            .unwrap_or_default()
    }

    /// Emoji decorating the question on screen, if the catalog provides one.
    #[must_use]
    pub fn current_emoji(&self) -> Option<String> {
        self.session
            .current_question()
            .and_then(|question| question.emoji())
            .map(str::to_owned)
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let total = self.session.catalog().len();
        let answered = self.session.answers().len();
        format!("{answered} / {total}")
    }

    #[must_use]
    pub fn result_card(&self) -> Option<ResultCardVm> {
        self.session
            .result()
            .map(|result| map_result_card(result, self.session.is_degraded()))
    }

    /// # Errors
    ///
    /// Returns `QuizError` when the session is not waiting for an answer.
    pub fn record_answer(&mut self, answer: &str) -> Result<AnswerStep, QuizError> {
        self.session.record_answer(answer)
    }

    /// # Errors
    ///
    /// Returns `QuizError::NothingToAdvance` when no answer is pending.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        self.session.advance()
    }

    pub fn finish(
        &mut self,
        quiz_loop: &QuizLoopService,
        ticket: &ClassificationTicket,
        classification: Classification,
    ) -> bool {
        quiz_loop.finish(&mut self.session, ticket, classification)
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }
}
