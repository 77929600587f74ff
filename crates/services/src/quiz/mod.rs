mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use session::{
    Advance, AnswerStep, COMPLETION_TEXT, ClassificationTicket, DEGRADED_COMPLETION_TEXT,
    INTRO_TEXT, QuizPhase, QuizSession, QuizSnapshot,
};
pub use workflow::{AnswerOutcome, DEFAULT_PACING, QuizLoopService};
