//! Offline personality selection used when the analysis service cannot be reached.

use thiserror::Error;

use crate::model::PersonalityResult;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FallbackError {
    #[error("fallback catalog must contain at least one result")]
    EmptyCatalog,
}

/// Deterministic, network-free classifier over a fixed set of canned results.
///
/// The selection hashes nothing more than the total length of the concatenated answers,
/// so answer sets of equal total length always land on the same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackClassifier {
    catalog: Vec<PersonalityResult>,
}

impl FallbackClassifier {
    /// Classifier over the three built-in results.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            catalog: builtin_results(),
        }
    }

    /// Classifier over a custom result set.
    ///
    /// # Errors
    ///
    /// Returns `FallbackError::EmptyCatalog` when `catalog` is empty.
    pub fn with_catalog(catalog: Vec<PersonalityResult>) -> Result<Self, FallbackError> {
        if catalog.is_empty() {
            return Err(FallbackError::EmptyCatalog);
        }
        Ok(Self { catalog })
    }

    #[must_use]
    pub fn catalog(&self) -> &[PersonalityResult] {
        &self.catalog
    }

    /// Index of the catalog entry selected for `answers`.
    #[must_use]
    pub fn index_for<S: AsRef<str>>(&self, answers: &[S]) -> usize {
        concatenated_len(answers) % self.catalog.len()
    }

    /// Select the canned result for `answers`. Accepts any length, including zero.
    #[must_use]
    pub fn classify<S: AsRef<str>>(&self, answers: &[S]) -> PersonalityResult {
        self.catalog[self.index_for(answers)].clone()
    }
}

impl Default for FallbackClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Length of the concatenated answers in UTF-16 code units.
///
/// Equal to the character count for text inside the Basic Multilingual Plane.
#[must_use]
pub fn concatenated_len<S: AsRef<str>>(answers: &[S]) -> usize {
    answers
        .iter()
        .map(|answer| answer.as_ref().encode_utf16().count())
        .sum()
}

fn builtin_results() -> Vec<PersonalityResult> {
    vec![
        PersonalityResult::new(
            "The Innovative Dreamer",
            "This is my message for you: Your creative spirit and love for technology make you a natural innovator. Keep dreaming big and turning those dreams into reality!",
            traits(&[
                "Highly creative and imaginative",
                "Tech-savvy problem solver",
                "Embraces new possibilities",
                "Inspires others with ideas",
            ]),
            "#667eea",
        ),
        PersonalityResult::new(
            "The Bold Trailblazer",
            "This is my message for you: Your energy and confidence are your superpowers! Don't be afraid to take the lead and show the world what you're made of.",
            traits(&[
                "Passionate and driven",
                "Goal-oriented achiever",
                "Natural leader",
                "Takes initiative fearlessly",
            ]),
            "#f5576c",
        ),
        PersonalityResult::new(
            "The Thoughtful Builder",
            "This is my message for you: Your attention to detail and methodical approach will help you build amazing things. Trust your process and keep creating!",
            traits(&[
                "Systematic and organized",
                "Analytical thinker",
                "Loves deep learning",
                "Excellent problem solver",
            ]),
            "#4ade80",
        ),
    ]
}

fn traits(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_owned()).collect()
    }

    #[test]
    fn empty_answers_select_first_entry() {
        let fallback = FallbackClassifier::builtin();
        let empty: [&str; 0] = [];
        assert_eq!(fallback.index_for(&empty), 0);
        assert_eq!(fallback.classify(&empty).personality_type, "The Innovative Dreamer");
    }

    #[test]
    fn identical_answers_select_identical_results() {
        let fallback = FallbackClassifier::builtin();
        let seq = answers(&[
            "Laptop - Power and versatility",
            "Blue & Purple - Calm and creative",
            "Communication - Connecting with people",
            "Learning new things",
            "Startup - Fast-paced and innovative",
        ]);
        let first = fallback.classify(&seq);
        for _ in 0..10 {
            assert_eq!(fallback.classify(&seq.clone()), first);
        }
    }

    #[test]
    fn congruent_lengths_collide() {
        let fallback = FallbackClassifier::builtin();
        // 4 and 7 characters: both congruent to 1 modulo 3.
        let short = answers(&["ab", "cd"]);
        let long = answers(&["abcdefg"]);
        assert_eq!(fallback.classify(&short), fallback.classify(&long));
        assert_eq!(fallback.index_for(&short), 1);
    }

    #[test]
    fn selection_walks_the_catalog_by_length() {
        let fallback = FallbackClassifier::builtin();
        assert_eq!(fallback.classify(&["xyz"]).color, "#667eea");
        assert_eq!(fallback.classify(&["x"]).color, "#f5576c");
        assert_eq!(fallback.classify(&["xy"]).color, "#4ade80");
    }

    #[test]
    fn lengths_are_counted_in_utf16_units() {
        assert_eq!(concatenated_len(&["é"]), 1);
        assert_eq!(concatenated_len(&["🚀"]), 2);
    }

    #[test]
    fn custom_catalog_must_not_be_empty() {
        assert_eq!(
            FallbackClassifier::with_catalog(Vec::new()),
            Err(FallbackError::EmptyCatalog)
        );
        let single = PersonalityResult::new("Only", "msg", Vec::new(), "#000000");
        let fallback = FallbackClassifier::with_catalog(vec![single.clone()]).unwrap();
        assert_eq!(fallback.classify(&["anything at all"]), single);
    }
}
