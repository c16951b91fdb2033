use serde::Serialize;
use std::fmt;

use vocab_core::model::{QuizQuestion, Tier};

use crate::error::QuizError;
use crate::quiz::{QuizOutcome, SessionProgress};

//
// ─── VIEW TYPES ────────────────────────────────────────────────────────────────
//

/// Coarse screen state of the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuizPhase {
    Idle,
    Loading,
    InProgress,
    Completed,
    Failed,
}

/// How an option should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionState {
    Idle,
    /// Chosen, correctness not revealed.
    Selected,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub text: String,
    pub state: OptionState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub explanation: String,
    pub chosen: Option<usize>,
}

impl QuestionView {
    /// With `reveal`, a recorded answer marks the correct option as `Correct`
    /// and a wrong choice as `Wrong`; otherwise only the choice is marked.
    #[must_use]
    pub fn new(index: usize, question: &QuizQuestion, chosen: Option<usize>, reveal: bool) -> Self {
        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(i, text)| OptionView {
                text: text.clone(),
                state: option_state(i, question.correct_option_index(), chosen, reveal),
            })
            .collect();

        Self {
            index,
            prompt: question.prompt().to_owned(),
            options,
            explanation: question.explanation().to_owned(),
            chosen,
        }
    }
}

fn option_state(index: usize, correct: usize, chosen: Option<usize>, reveal: bool) -> OptionState {
    let Some(chosen) = chosen else {
        return OptionState::Idle;
    };
    if !reveal {
        return if index == chosen {
            OptionState::Selected
        } else {
            OptionState::Idle
        };
    }
    if index == correct {
        OptionState::Correct
    } else if index == chosen {
        OptionState::Wrong
    } else {
        OptionState::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub message: String,
    pub retryable: bool,
}

impl From<&QuizError> for ErrorView {
    fn from(err: &QuizError) -> Self {
        Self {
            message: err.message(),
            retryable: err.is_retryable(),
        }
    }
}

/// Immutable picture of the quiz handed to the presentation layer after every
/// change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSnapshot {
    pub revision: u64,
    pub tier: Option<Tier>,
    pub phase: QuizPhase,
    pub question: Option<QuestionView>,
    pub progress: Option<SessionProgress>,
    pub score: usize,
    pub outcome: Option<QuizOutcome>,
    pub error: Option<ErrorView>,
    pub is_speaking: bool,
}

impl QuizSnapshot {
    #[must_use]
    pub fn idle() -> Self {
        Self {
            revision: 0,
            tier: None,
            phase: QuizPhase::Idle,
            question: None,
            progress: None,
            score: 0,
            outcome: None,
            error: None,
            is_speaking: false,
        }
    }
}

//
// ─── SUBSCRIPTIONS ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&QuizSnapshot) + Send + Sync>;

/// Registry of snapshot listeners.
#[derive(Default)]
pub struct SnapshotHub {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl SnapshotHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&QuizSnapshot) + Send + Sync + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    pub fn publish(&self, snapshot: &QuizSnapshot) {
        for (_, listener) in &self.listeners {
            listener(snapshot);
        }
    }
}

impl fmt::Debug for SnapshotHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotHub")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
