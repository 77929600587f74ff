use fortune_core::export::card_file_stem;
use fortune_core::model::PersonalityResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultCardVm {
    pub title: String,
    pub message: String,
    pub traits: Vec<String>,
    pub color: String,
    pub file_name: String,
    /// Shown when the reading was produced offline and strict mode is on.
    pub degraded: bool,
}

#[must_use]
pub fn map_result_card(result: &PersonalityResult, degraded: bool) -> ResultCardVm {
    ResultCardVm {
        title: result.personality_type.clone(),
        message: result.message.clone(),
        traits: result.traits.clone(),
        color: result.color.clone(),
        file_name: format!("{}.svg", card_file_stem(&result.personality_type)),
        degraded,
    }
}
