use std::sync::Arc;
use std::time::Duration;

use fortune_core::Clock;
use fortune_core::model::QuestionCatalog;
use tokio::time::sleep;
use tracing::debug;

use super::session::{Advance, AnswerStep, ClassificationTicket, QuizSession};
use crate::classifier::{Classification, ClassificationClient};
use crate::error::QuizError;

/// Conversational pause between an answer and the next bot turn.
pub const DEFAULT_PACING: Duration = Duration::from_millis(800);

/// Result of submitting one answer through the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Continue { next_index: usize },
    Completed,
}

/// Orchestrates a quiz session: pacing, classification and completion.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    catalog: Arc<QuestionCatalog>,
    classifier: Arc<ClassificationClient>,
    pacing: Duration,
    surface_degraded: bool,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<QuestionCatalog>,
        classifier: Arc<ClassificationClient>,
    ) -> Self {
        Self {
            clock,
            catalog,
            classifier,
            pacing: DEFAULT_PACING,
            surface_degraded: false,
        }
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_surface_degraded(mut self, surface_degraded: bool) -> Self {
        self.surface_degraded = surface_degraded;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<QuestionCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// A fresh, not yet started session over this loop's catalog.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new(Arc::clone(&self.catalog), self.clock)
            .with_surface_degraded(self.surface_degraded)
    }

    /// Create a session and ask the first question.
    ///
    /// # Errors
    ///
    /// Never fails for a freshly created session; the signature mirrors `QuizSession::begin`.
    pub fn start_session(&self) -> Result<QuizSession, QuizError> {
        let mut session = self.new_session();
        session.begin()?;
        Ok(session)
    }

    /// Record an answer, pause, then either ask the next question or classify and finish.
    ///
    /// Holds the session for the whole call, including the classification.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the session is not waiting for an answer.
    pub async fn answer_current(
        &self,
        session: &mut QuizSession,
        answer: &str,
    ) -> Result<AnswerOutcome, QuizError> {
        session.record_answer(answer)?;
        self.pause().await;

        match session.advance()? {
            Advance::Question(next_index) => Ok(AnswerOutcome::Continue { next_index }),
            Advance::Classify(ticket) => {
                let classification = self.classify(&ticket).await;
                session.complete(&ticket, classification)?;
                Ok(AnswerOutcome::Completed)
            }
        }
    }

    /// Wait out the pacing delay after `step`.
    pub async fn pace(&self, step: AnswerStep) {
        debug!(?step, pacing = ?self.pacing, "pacing before next turn");
        self.pause().await;
    }

    /// Run the classification for `ticket` without holding the session.
    pub async fn classify(&self, ticket: &ClassificationTicket) -> Classification {
        self.classifier.classify(ticket.answers()).await
    }

    /// Apply a classification that may have outlived its session.
    ///
    /// Returns whether the result was applied; stale results are dropped.
    pub fn finish(
        &self,
        session: &mut QuizSession,
        ticket: &ClassificationTicket,
        classification: Classification,
    ) -> bool {
        match session.complete(ticket, classification) {
            Ok(()) => true,
            Err(err) => {
                debug!(
                    error = %err,
                    ticket_generation = ticket.generation(),
                    session_generation = session.generation(),
                    "discarding classification"
                );
                false
            }
        }
    }

    async fn pause(&self) {
        if !self.pacing.is_zero() {
            sleep(self.pacing).await;
        }
    }
}
