mod outcome;
mod progress;
mod session;

pub use outcome::{AnswerReview, GradeBand, QuizOutcome};
pub use progress::SessionProgress;
pub use session::{QuizSession, SessionState};
