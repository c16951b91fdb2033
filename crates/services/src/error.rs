//! Shared error types for the services crate.

use thiserror::Error;

use storage::CatalogError;
use vocab_core::generator::GenerateError;
use vocab_core::model::Tier;

use crate::loader::LoadRequest;

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("a session holds at most {max} questions, got {len}")]
    TooManyQuestions { len: usize, max: usize },
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("session already completed")]
    Completed,
}

/// Errors emitted by `CatalogLoader::fetch`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("load of tier {} was superseded by a newer request", .request.tier())]
    Superseded { request: LoadRequest },
    #[error("{source}")]
    Catalog {
        request: LoadRequest,
        #[source]
        source: CatalogError,
    },
}

impl LoadError {
    #[must_use]
    pub fn request(&self) -> LoadRequest {
        match self {
            LoadError::Superseded { request } | LoadError::Catalog { request, .. } => *request,
        }
    }
}

/// Errors surfaced to the presentation layer by `QuizWorkflow`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("load of tier {tier} is stale and was discarded")]
    StaleLoad { tier: Tier },
    #[error("no quiz is in progress")]
    NoActiveSession,
    #[error("no tier has been selected")]
    NoTierSelected,
}

impl QuizError {
    /// Human-readable text for the error state of the quiz screen.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            QuizError::Catalog(CatalogError::NotFound { resource, .. }) => {
                format!("Could not find the word list {resource}.")
            }
            QuizError::Catalog(CatalogError::Decode { tier, .. }) => {
                format!("The {tier} word list is damaged and could not be read.")
            }
            QuizError::Catalog(CatalogError::Unreadable { tier, reason }) => {
                format!("The {tier} word list could not be opened ({reason}).")
            }
            QuizError::Catalog(err) => format!("Loading the word list failed: {err}."),
            QuizError::Generate(err) if err.is_insufficient_data() => {
                "This word list does not have enough distinct words to build a quiz.".to_owned()
            }
            QuizError::Generate(err) => format!("Could not build the quiz: {err}."),
            QuizError::Session(SessionError::OutOfRange { .. }) => {
                "That answer is not available for this question.".to_owned()
            }
            QuizError::Session(err) => format!("The quiz cannot do that right now: {err}."),
            QuizError::StaleLoad { .. } => "A newer word list was requested.".to_owned(),
            QuizError::NoActiveSession => "Start a quiz first.".to_owned(),
            QuizError::NoTierSelected => "Choose a level first.".to_owned(),
        }
    }

    /// Whether the presentation should offer a retry action.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, QuizError::Catalog(_) | QuizError::Generate(_))
    }
}
