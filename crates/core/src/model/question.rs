use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Number of options every generated question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("expected {expected} options, got {actual}")]
    OptionCount { expected: usize, actual: usize },

    #[error("options must be distinct, duplicate: {0}")]
    DuplicateOption(String),

    #[error("correct option index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

/// A single multiple-choice question.
///
/// `options[correct_option_index]` is the subject's meaning and all options are
/// pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    prompt: String,
    options: Vec<String>,
    correct_option_index: usize,
    explanation: String,
}

impl QuizQuestion {
    /// # Errors
    ///
    /// Returns `QuestionError` if there are not exactly four options, if two
    /// options are textually identical, or if `correct_option_index` does not
    /// point into `options`.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        if options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::OptionCount {
                expected: OPTIONS_PER_QUESTION,
                actual: options.len(),
            });
        }
        if correct_option_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_option_index,
                len: options.len(),
            });
        }
        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(option.trim()) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }

        Ok(Self {
            prompt: prompt.into(),
            options,
            correct_option_index,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_option_index]
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_option_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn accepts_well_formed_question() {
        let q = QuizQuestion::new("cat", options(&["狗", "貓", "鳥", "魚"]), 1, "A cat.").unwrap();
        assert_eq!(q.correct_option(), "貓");
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn rejects_wrong_option_count() {
        let err = QuizQuestion::new("cat", options(&["貓", "狗"]), 0, "").unwrap_err();
        assert_eq!(
            err,
            QuestionError::OptionCount {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn rejects_duplicate_options() {
        let err = QuizQuestion::new("cat", options(&["貓", "狗", "貓 ", "魚"]), 0, "").unwrap_err();
        assert!(matches!(err, QuestionError::DuplicateOption(_)));
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let err = QuizQuestion::new("cat", options(&["貓", "狗", "鳥", "魚"]), 4, "").unwrap_err();
        assert_eq!(err, QuestionError::CorrectIndexOutOfRange { index: 4, len: 4 });
    }
}
