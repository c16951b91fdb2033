#![forbid(unsafe_code)]

pub mod generator;
pub mod model;
pub mod random;
pub mod time;

pub use generator::{GenerateError, QuizGenerator};
pub use random::RandomSource;
pub use time::Clock;
