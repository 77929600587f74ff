#![forbid(unsafe_code)]

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod quiz;

pub use fortune_core::Clock;

pub use classifier::{
    Classification, ClassificationClient, ClassificationTransport, HttpTransport, ResultSource,
};
pub use config::{ClassifierConfig, RetryPolicy};
pub use error::{CatalogLoadError, ConfigError, ExportError, QuizError, TransportError};
pub use export::CardExportService;
pub use quiz::{
    Advance, AnswerOutcome, AnswerStep, ClassificationTicket, QuizLoopService, QuizPhase,
    QuizSession, QuizSnapshot,
};
