use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use std::fmt;

use vocab_core::Clock;
use vocab_core::model::{MAX_SESSION_QUESTIONS, QuizQuestion};

use super::outcome::{AnswerReview, QuizOutcome};
use super::progress::SessionProgress;
use crate::error::SessionError;

/// Lifecycle of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    InProgress,
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One pass through a generated question sequence.
///
/// The session is `InProgress` while `current_index < questions.len()` and
/// `Completed` once the final question has been advanced past (or `finish` was
/// called). Answers may be changed freely until the session completes.
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current: usize,
    answers: Vec<Option<usize>>,
    score: usize,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session over `questions`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for no questions and
    /// `SessionError::TooManyQuestions` above `MAX_SESSION_QUESTIONS`.
    pub fn new(questions: Vec<QuizQuestion>, clock: Clock) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        if questions.len() > MAX_SESSION_QUESTIONS {
            return Err(SessionError::TooManyQuestions {
                len: questions.len(),
                max: MAX_SESSION_QUESTIONS,
            });
        }

        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            current: 0,
            answers,
            score: 0,
            clock,
            started_at: clock.now(),
            completed_at: None,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    /// Answer recorded for the current question, if any.
    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.current).copied().flatten()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.current < self.questions.len() {
            SessionState::InProgress
        } else {
            SessionState::Completed
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Completed
    }

    /// Score recorded at completion; 0 while in progress or after `reset`.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            answered: self.answers.iter().filter(|a| a.is_some()).count(),
            current_index: self.current,
            is_complete: self.is_complete(),
        }
    }

    /// Record `option_index` as the answer to the current question,
    /// replacing any earlier answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfRange` if the session has no current
    /// question (it is completed) or if `option_index` is not one of the
    /// current question's options.
    pub fn select_answer(&mut self, option_index: usize) -> Result<(), SessionError> {
        let Some(question) = self.questions.get(self.current) else {
            return Err(SessionError::OutOfRange {
                index: self.current,
                len: self.questions.len(),
            });
        };
        let option_count = question.options().len();
        if option_index >= option_count {
            return Err(SessionError::OutOfRange {
                index: option_index,
                len: option_count,
            });
        }

        self.answers[self.current] = Some(option_index);
        Ok(())
    }

    /// Advance to the next question, completing the session when called on
    /// the last one. Does nothing once completed.
    pub fn next(&mut self) -> SessionState {
        if self.is_complete() {
            return SessionState::Completed;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            self.complete();
        }
        self.state()
    }

    /// Step back one question; a no-op on the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session has completed.
    pub fn previous(&mut self) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        self.current = self.current.saturating_sub(1);
        Ok(())
    }

    /// Complete the session immediately, whatever the current question.
    pub fn finish(&mut self) {
        if !self.is_complete() {
            self.complete();
        }
    }

    /// Number of recorded answers that match the correct option.
    #[must_use]
    pub fn compute_score(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| {
                answer.is_some_and(|chosen| question.is_correct(chosen))
            })
            .count()
    }

    /// Back to the first question with every answer cleared. The questions
    /// themselves are kept.
    pub fn reset(&mut self) {
        self.current = 0;
        self.answers.iter_mut().for_each(|a| *a = None);
        self.score = 0;
        self.started_at = self.clock.now();
        self.completed_at = None;
    }

    /// Result summary, available once the session has completed.
    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        let completed_at = self.completed_at?;
        let answers = self
            .questions
            .iter()
            .zip(&self.answers)
            .map(|(question, chosen)| AnswerReview {
                prompt: question.prompt().to_owned(),
                chosen: *chosen,
                chosen_option: chosen.and_then(|i| question.options().get(i).cloned()),
                correct: question.correct_option_index(),
                correct_option: question.correct_option().to_owned(),
                is_correct: chosen.is_some_and(|i| question.is_correct(i)),
            })
            .collect();
        Some(QuizOutcome::new(answers, self.started_at, completed_at))
    }

    fn complete(&mut self) {
        self.current = self.questions.len();
        self.score = self.compute_score();
        self.completed_at = Some(self.clock.now());
        debug!(
            "quiz completed with {}/{} correct",
            self.score,
            self.questions.len()
        );
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers", &self.answers)
            .field("score", &self.score)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
