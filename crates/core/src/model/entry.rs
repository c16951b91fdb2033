use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("word cannot be empty")]
    EmptyWord,

    #[error("meaning cannot be empty")]
    EmptyMeaning,
}

/// One vocabulary item of a tier's catalog.
///
/// Immutable once constructed. `word` is expected to be unique within a
/// catalog but this is not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    word: String,
    part_of_speech: String,
    meaning: String,
    example_sentence: String,
}

impl VocabularyEntry {
    /// Creates a validated entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::EmptyWord` or `EntryError::EmptyMeaning` when the
    /// respective field is blank.
    pub fn new(
        word: impl Into<String>,
        part_of_speech: impl Into<String>,
        meaning: impl Into<String>,
        example_sentence: impl Into<String>,
    ) -> Result<Self, EntryError> {
        let word = word.into();
        let meaning = meaning.into();
        if word.trim().is_empty() {
            return Err(EntryError::EmptyWord);
        }
        if meaning.trim().is_empty() {
            return Err(EntryError::EmptyMeaning);
        }

        Ok(Self {
            word,
            part_of_speech: part_of_speech.into(),
            meaning,
            example_sentence: example_sentence.into(),
        })
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn part_of_speech(&self) -> &str {
        &self.part_of_speech
    }

    #[must_use]
    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    #[must_use]
    pub fn example_sentence(&self) -> &str {
        &self.example_sentence
    }
}
