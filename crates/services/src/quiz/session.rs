use std::sync::Arc;

use fortune_core::Clock;
use fortune_core::model::{AnswerSequence, ChatLog, PersonalityResult, Question, QuestionCatalog};

use crate::classifier::{Classification, ResultSource};
use crate::error::QuizError;

pub const INTRO_TEXT: &str = "Hey there! 👋 Welcome to Fun Fortune! I'm here to discover your unique personality type. Answer a few fun questions, and I'll reveal what makes you special. Ready to begin? Let's go! ✨";
pub const COMPLETION_TEXT: &str = "✨ Amazing! I've analyzed your responses and discovered something special about you. Check out your personality profile below! 🎉";
pub const DEGRADED_COMPLETION_TEXT: &str = "✨ I couldn't reach my analysis service, so this reading was made offline from your answers. Check out your personality profile below!";

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where the quiz currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    AwaitingAnswer(usize),
    Classifying,
    Completed,
}

/// What has to happen after an answer was recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerStep {
    /// Another question follows once the session advances.
    NextQuestion(usize),
    /// That was the last answer; advancing starts the classification.
    ReadyToClassify,
}

/// Claim on the outstanding classification of one session generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassificationTicket {
    generation: u64,
    answers: Vec<String>,
}

impl ClassificationTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }
}

/// Result of advancing past a recorded answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    Question(usize),
    Classify(ClassificationTicket),
}

/// Render-facing view of the session, comparable across sessions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    pub current_index: usize,
    pub chat: ChatLog,
    pub answers: AnswerSequence,
    pub result: Option<PersonalityResult>,
    pub in_flight: bool,
    pub degraded: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Owned state of one quiz session and the transitions between its phases.
///
/// Answer recording and advancing are separate steps so callers can insert a pacing
/// delay in between. Every restart bumps the generation, which invalidates tickets
/// handed out for earlier classifications.
#[derive(Clone, Debug)]
pub struct QuizSession {
    catalog: Arc<QuestionCatalog>,
    clock: Clock,
    surface_degraded: bool,
    phase: QuizPhase,
    current: usize,
    chat: ChatLog,
    answers: AnswerSequence,
    result: Option<PersonalityResult>,
    source: Option<ResultSource>,
    in_flight: bool,
    generation: u64,
}

impl QuizSession {
    #[must_use]
    pub fn new(catalog: Arc<QuestionCatalog>, clock: Clock) -> Self {
        Self {
            catalog,
            clock,
            surface_degraded: false,
            phase: QuizPhase::NotStarted,
            current: 0,
            chat: ChatLog::new(),
            answers: AnswerSequence::new(),
            result: None,
            source: None,
            in_flight: false,
            generation: 0,
        }
    }

    /// Tell the user when the result came from the offline classifier.
    #[must_use]
    pub fn with_surface_degraded(mut self, surface_degraded: bool) -> Self {
        self.surface_degraded = surface_degraded;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSequence {
        &self.answers
    }

    #[must_use]
    pub fn result(&self) -> Option<&PersonalityResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn result_source(&self) -> Option<ResultSource> {
        self.source
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Completed
    }

    /// True when the result is an offline reading and the user should be told.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.surface_degraded && self.source == Some(ResultSource::Fallback)
    }

    /// The question waiting for an answer, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::AwaitingAnswer(index) if self.answers.len() == index => {
                self.catalog.get(index)
            }
            _ => None,
        }
    }

    /// Whether an answer submitted now would be accepted.
    #[must_use]
    pub fn accepts_answers(&self) -> bool {
        !self.in_flight && self.current_question().is_some()
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            phase: self.phase,
            current_index: self.current,
            chat: self.chat.clone(),
            answers: self.answers.clone(),
            result: self.result.clone(),
            in_flight: self.in_flight,
            degraded: self.is_degraded(),
        }
    }

    /// Greet the user and ask the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` unless the session is `NotStarted`.
    pub fn begin(&mut self) -> Result<(), QuizError> {
        if self.phase != QuizPhase::NotStarted {
            return Err(QuizError::AlreadyStarted);
        }
        self.chat.push_bot(&self.clock, INTRO_TEXT);
        self.ask(0);
        Ok(())
    }

    /// Record the user's answer to the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotStarted` before `begin`, and `QuizError::NotAcceptingAnswers`
    /// while the previous answer has not been advanced past or a classification is running.
    pub fn record_answer(&mut self, answer: &str) -> Result<AnswerStep, QuizError> {
        if self.phase == QuizPhase::NotStarted {
            return Err(QuizError::NotStarted);
        }
        if !self.accepts_answers() {
            return Err(QuizError::NotAcceptingAnswers);
        }

        self.chat.push_user(&self.clock, answer);
        self.answers.push(answer);

        let next = self.current + 1;
        if next < self.catalog.len() {
            Ok(AnswerStep::NextQuestion(next))
        } else {
            Ok(AnswerStep::ReadyToClassify)
        }
    }

    /// Present the next question, or start classifying after the final answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NothingToAdvance` when no recorded answer is pending.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        let QuizPhase::AwaitingAnswer(index) = self.phase else {
            return Err(QuizError::NothingToAdvance);
        };
        if self.answers.len() != index + 1 {
            return Err(QuizError::NothingToAdvance);
        }

        let next = index + 1;
        if next < self.catalog.len() {
            self.ask(next);
            return Ok(Advance::Question(next));
        }

        self.chat.push_placeholder(&self.clock);
        self.current = self.catalog.len();
        self.phase = QuizPhase::Classifying;
        self.in_flight = true;
        Ok(Advance::Classify(ClassificationTicket {
            generation: self.generation,
            answers: self.answers.as_slice().to_vec(),
        }))
    }

    /// Apply the classification for `ticket` and finish the session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleResult` for tickets from before the latest restart, and
    /// `QuizError::NotClassifying` when no classification is outstanding. The session
    /// is left untouched in both cases.
    pub fn complete(
        &mut self,
        ticket: &ClassificationTicket,
        classification: Classification,
    ) -> Result<(), QuizError> {
        if ticket.generation != self.generation {
            return Err(QuizError::StaleResult);
        }
        if self.phase != QuizPhase::Classifying {
            return Err(QuizError::NotClassifying);
        }

        self.chat.remove_placeholders();
        self.source = Some(classification.source);
        let text = if self.is_degraded() {
            DEGRADED_COMPLETION_TEXT
        } else {
            COMPLETION_TEXT
        };
        self.chat.push_bot(&self.clock, text);
        self.result = Some(classification.result);
        self.in_flight = false;
        self.phase = QuizPhase::Completed;
        Ok(())
    }

    /// Drop everything and return to `NotStarted`. Allowed from any phase.
    pub fn restart(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.phase = QuizPhase::NotStarted;
        self.current = 0;
        self.chat.clear();
        self.answers.clear();
        self.result = None;
        self.source = None;
        self.in_flight = false;
    }

    fn ask(&mut self, index: usize) {
        if let Some(question) = self.catalog.get(index) {
            self.chat.push_bot(&self.clock, question.text());
        }
        self.current = index;
        self.phase = QuizPhase::AwaitingAnswer(index);
    }
}

#[cfg(test)]
mod tests {
    use fortune_core::model::{QuestionId, Sender};
    use fortune_core::time::fixed_clock;

    use super::*;

    fn two_question_catalog() -> Arc<QuestionCatalog> {
        let questions = vec![
            Question::new(QuestionId::new(1), "Tea or coffee?", vec!["Tea".into(), "Coffee".into()], None)
                .unwrap(),
            Question::new(QuestionId::new(2), "Cats or dogs?", vec!["Cats".into(), "Dogs".into()], None)
                .unwrap(),
        ];
        Arc::new(QuestionCatalog::new(questions).unwrap())
    }

    fn session() -> QuizSession {
        QuizSession::new(two_question_catalog(), fixed_clock())
    }

    fn remote(result_type: &str) -> Classification {
        Classification {
            result: PersonalityResult::new(result_type, "msg", vec!["t".into()], "#fbbf24"),
            source: ResultSource::Remote,
            attempts: 1,
        }
    }

    fn run_to_classifying(session: &mut QuizSession) -> ClassificationTicket {
        session.begin().unwrap();
        session.record_answer("Tea").unwrap();
        session.advance().unwrap();
        session.record_answer("Dogs").unwrap();
        match session.advance().unwrap() {
            Advance::Classify(ticket) => ticket,
            other => panic!("expected classification, got {other:?}"),
        }
    }

    #[test]
    fn begin_greets_and_asks_first_question() {
        let mut session = session();
        session.begin().unwrap();

        assert_eq!(session.phase(), QuizPhase::AwaitingAnswer(0));
        let turns = session.chat().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text, INTRO_TEXT);
        assert_eq!(turns[1].text, "Tea or coffee?");
        assert!(session.accepts_answers());
        assert_eq!(session.begin(), Err(QuizError::AlreadyStarted));
    }

    #[test]
    fn answers_are_rejected_before_begin() {
        let mut session = session();
        assert_eq!(session.record_answer("Tea"), Err(QuizError::NotStarted));
        assert_eq!(session.advance(), Err(QuizError::NothingToAdvance));
    }

    #[test]
    fn a_question_cannot_be_answered_twice() {
        let mut session = session();
        session.begin().unwrap();
        assert_eq!(session.record_answer("Tea"), Ok(AnswerStep::NextQuestion(1)));
        assert!(!session.accepts_answers());
        assert_eq!(session.record_answer("Coffee"), Err(QuizError::NotAcceptingAnswers));
        assert_eq!(session.answers().len(), 1);

        assert_eq!(session.advance(), Ok(Advance::Question(1)));
        assert_eq!(session.advance(), Err(QuizError::NothingToAdvance));
        assert_eq!(session.current_question().map(Question::text), Some("Cats or dogs?"));
    }

    #[test]
    fn final_answer_starts_classification_with_placeholder() {
        let mut session = session();
        let ticket = run_to_classifying(&mut session);

        assert_eq!(session.phase(), QuizPhase::Classifying);
        assert!(session.in_flight());
        assert_eq!(session.current_index(), 2);
        assert!(session.chat().has_placeholder());
        assert_eq!(ticket.answers(), ["Tea".to_string(), "Dogs".to_string()]);
        assert_eq!(session.record_answer("late"), Err(QuizError::NotAcceptingAnswers));
    }

    #[test]
    fn completion_replaces_placeholder_and_sets_result() {
        let mut session = session();
        let ticket = run_to_classifying(&mut session);

        session.complete(&ticket, remote("The Tester")).unwrap();

        assert_eq!(session.phase(), QuizPhase::Completed);
        assert!(!session.in_flight());
        assert!(!session.chat().has_placeholder());
        let last = session.chat().turns().last().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.text, COMPLETION_TEXT);
        assert_eq!(session.result().map(|r| r.personality_type.as_str()), Some("The Tester"));
        assert_eq!(session.complete(&ticket, remote("Again")), Err(QuizError::NotClassifying));
    }

    #[test]
    fn results_from_abandoned_sessions_are_discarded() {
        let mut session = session();
        let stale = run_to_classifying(&mut session);

        session.restart();
        let fresh = run_to_classifying(&mut session);

        assert_eq!(session.complete(&stale, remote("Ghost")), Err(QuizError::StaleResult));
        assert!(session.in_flight());
        assert!(session.result().is_none());

        session.complete(&fresh, remote("Current")).unwrap();
        assert_eq!(session.result().map(|r| r.personality_type.as_str()), Some("Current"));
    }

    #[test]
    fn restart_matches_a_fresh_session() {
        let mut session = session();
        let ticket = run_to_classifying(&mut session);
        session.complete(&ticket, remote("Done")).unwrap();

        session.restart();

        assert_eq!(session.snapshot(), QuizSession::new(two_question_catalog(), fixed_clock()).snapshot());
        assert_eq!(session.phase(), QuizPhase::NotStarted);
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn strict_mode_surfaces_offline_readings() {
        let mut session = session().with_surface_degraded(true);
        let ticket = run_to_classifying(&mut session);
        let offline = Classification {
            source: ResultSource::Fallback,
            ..remote("Offline")
        };

        session.complete(&ticket, offline).unwrap();

        assert!(session.is_degraded());
        assert!(session.snapshot().degraded);
        assert_eq!(session.chat().turns().last().unwrap().text, DEGRADED_COMPLETION_TEXT);
    }

    #[test]
    fn silent_mode_hides_offline_readings() {
        let mut session = session();
        let ticket = run_to_classifying(&mut session);
        let offline = Classification {
            source: ResultSource::Fallback,
            ..remote("Offline")
        };

        session.complete(&ticket, offline).unwrap();

        assert!(!session.is_degraded());
        assert_eq!(session.result_source(), Some(ResultSource::Fallback));
        assert_eq!(session.chat().turns().last().unwrap().text, COMPLETION_TEXT);
    }
}
