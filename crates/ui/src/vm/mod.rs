mod card_vm;
mod quiz_vm;

pub use card_vm::{ResultCardVm, map_result_card};
pub use quiz_vm::{ChatBubbleVm, QuizVm, map_chat_bubbles};
