mod answers;
mod chat;
mod ids;
mod personality;
mod question;

pub use answers::AnswerSequence;
pub use chat::{ChatLog, ChatTurn, Sender};
pub use ids::{QuestionId, TurnId};
pub use personality::PersonalityResult;
pub use question::{CatalogError, Question, QuestionCatalog};
