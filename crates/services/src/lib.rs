#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod quiz;
pub mod shelf;
pub mod snapshot;
pub mod speech;
pub mod workflow;

pub use vocab_core::{Clock, RandomSource};

pub use error::{LoadError, QuizError, SessionError};
pub use loader::{CatalogLoader, LoadRequest, LoadedCatalog};
pub use quiz::{
    AnswerReview, GradeBand, QuizOutcome, QuizSession, SessionProgress, SessionState,
};
pub use shelf::VocabularyShelf;
pub use snapshot::{
    ErrorView, OptionState, OptionView, QuestionView, QuizPhase, QuizSnapshot, SubscriptionId,
};
pub use speech::{SilentSpeaker, Speaker};
pub use workflow::QuizWorkflow;
