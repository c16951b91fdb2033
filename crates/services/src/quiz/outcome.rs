use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

//
// ─── GRADE BAND ────────────────────────────────────────────────────────────────
//

/// Coarse rating of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GradeBand {
    /// 90 % or more.
    Excellent,
    /// 70 % or more.
    Good,
    KeepPracticing,
}

impl GradeBand {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            GradeBand::Excellent
        } else if percentage >= 70.0 {
            GradeBand::Good
        } else {
            GradeBand::KeepPracticing
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GradeBand::Excellent => "Excellent!",
            GradeBand::Good => "Well done!",
            GradeBand::KeepPracticing => "Keep practicing!",
        }
    }
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Per-question row of the answer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerReview {
    pub prompt: String,
    pub chosen: Option<usize>,
    pub chosen_option: Option<String>,
    pub correct: usize,
    pub correct_option: String,
    pub is_correct: bool,
}

/// Result of a completed quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizOutcome {
    pub total: usize,
    pub correct: usize,
    pub percentage: f64,
    pub band: GradeBand,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub answers: Vec<AnswerReview>,
}

impl QuizOutcome {
    #[must_use]
    pub fn new(
        answers: Vec<AnswerReview>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let total = answers.len();
        let correct = answers.iter().filter(|a| a.is_correct).count();
        let percentage = percentage(correct, total);
        Self {
            total,
            correct,
            percentage,
            band: GradeBand::from_percentage(percentage),
            started_at,
            completed_at,
            answers,
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> TimeDelta {
        self.completed_at - self.started_at
    }

    /// Rows answered wrongly or skipped.
    pub fn mistakes(&self) -> impl Iterator<Item = &AnswerReview> {
        self.answers.iter().filter(|a| !a.is_correct)
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_core::time::fixed_now;

    fn review(is_correct: bool) -> AnswerReview {
        AnswerReview {
            prompt: "cat".into(),
            chosen: Some(if is_correct { 0 } else { 1 }),
            chosen_option: None,
            correct: 0,
            correct_option: "貓".into(),
            is_correct,
        }
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(GradeBand::from_percentage(100.0), GradeBand::Excellent);
        assert_eq!(GradeBand::from_percentage(90.0), GradeBand::Excellent);
        assert_eq!(GradeBand::from_percentage(70.0), GradeBand::Good);
        assert_eq!(GradeBand::from_percentage(69.9), GradeBand::KeepPracticing);
    }

    #[test]
    fn outcome_counts_correct_answers() {
        let now = fixed_now();
        let outcome = QuizOutcome::new(
            vec![review(true), review(true), review(false), review(true)],
            now,
            now + TimeDelta::seconds(42),
        );
        assert_eq!(outcome.total, 4);
        assert_eq!(outcome.correct, 3);
        assert!((outcome.percentage - 75.0).abs() < f64::EPSILON);
        assert_eq!(outcome.band, GradeBand::Good);
        assert_eq!(outcome.elapsed(), TimeDelta::seconds(42));
        assert_eq!(outcome.mistakes().count(), 1);
    }

    #[test]
    fn empty_outcome_scores_zero() {
        let outcome = QuizOutcome::new(Vec::new(), fixed_now(), fixed_now());
        assert!(outcome.percentage.abs() < f64::EPSILON);
        assert_eq!(outcome.band, GradeBand::KeepPracticing);
    }
}
