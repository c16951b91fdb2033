use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the number of questions in one session.
pub const MAX_SESSION_QUESTIONS: usize = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question count must be between 1 and {max}, got {provided}")]
    InvalidQuestionCount { provided: usize, max: usize },

    #[error("speech language cannot be empty")]
    EmptySpeechLanguage,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Configuration for quiz generation and presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    question_count: usize,
    speech_language: String,
    auto_speak: bool,
    reveal_answers: bool,
}

impl Default for QuizSettings {
    /// Ten questions, spoken prompts in `en-US`, answers revealed after selection.
    fn default() -> Self {
        Self {
            question_count: MAX_SESSION_QUESTIONS,
            speech_language: "en-US".to_owned(),
            auto_speak: true,
            reveal_answers: true,
        }
    }
}

impl QuizSettings {
    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidQuestionCount` if `question_count` is 0 or
    /// above `MAX_SESSION_QUESTIONS`, and `SettingsError::EmptySpeechLanguage`
    /// for a blank language tag.
    pub fn new(
        question_count: usize,
        speech_language: impl Into<String>,
        auto_speak: bool,
        reveal_answers: bool,
    ) -> Result<Self, SettingsError> {
        if question_count == 0 || question_count > MAX_SESSION_QUESTIONS {
            return Err(SettingsError::InvalidQuestionCount {
                provided: question_count,
                max: MAX_SESSION_QUESTIONS,
            });
        }
        let speech_language = speech_language.into();
        if speech_language.trim().is_empty() {
            return Err(SettingsError::EmptySpeechLanguage);
        }

        Ok(Self {
            question_count,
            speech_language,
            auto_speak,
            reveal_answers,
        })
    }

    /// Returns a copy with a different question count.
    ///
    /// # Errors
    ///
    /// Same bounds as `QuizSettings::new`.
    pub fn with_question_count(self, question_count: usize) -> Result<Self, SettingsError> {
        Self::new(
            question_count,
            self.speech_language,
            self.auto_speak,
            self.reveal_answers,
        )
    }

    #[must_use]
    pub fn with_auto_speak(mut self, auto_speak: bool) -> Self {
        self.auto_speak = auto_speak;
        self
    }

    #[must_use]
    pub fn with_reveal_answers(mut self, reveal_answers: bool) -> Self {
        self.reveal_answers = reveal_answers;
        self
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn speech_language(&self) -> &str {
        &self.speech_language
    }

    #[must_use]
    pub fn auto_speak(&self) -> bool {
        self.auto_speak
    }

    #[must_use]
    pub fn reveal_answers(&self) -> bool {
        self.reveal_answers
    }
}
