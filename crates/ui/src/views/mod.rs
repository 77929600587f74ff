mod chat;
mod result_card;
mod state;
mod welcome;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use chat::ChatView;
pub use result_card::ResultCard;
pub use state::{ExportNotice, ViewError};
pub use welcome::WelcomeView;
