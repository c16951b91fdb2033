mod entry;
mod question;
mod settings;
mod tier;

pub use entry::{EntryError, VocabularyEntry};
pub use question::{OPTIONS_PER_QUESTION, QuestionError, QuizQuestion};
pub use settings::{MAX_SESSION_QUESTIONS, QuizSettings, SettingsError};
pub use tier::{Tier, TierParseError};
