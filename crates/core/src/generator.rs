use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::{
    MAX_SESSION_QUESTIONS, OPTIONS_PER_QUESTION, QuestionError, QuizQuestion, QuizSettings,
    VocabularyEntry,
};

/// Smallest catalog that can yield four distinct options.
pub const MIN_CATALOG_ENTRIES: usize = OPTIONS_PER_QUESTION;

const DISTRACTORS_PER_QUESTION: usize = OPTIONS_PER_QUESTION - 1;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerateError {
    #[error("question count must be > 0")]
    InvalidCount,

    #[error("catalog has {available} entries, at least {required} are needed")]
    TooFewEntries { available: usize, required: usize },

    #[error("only {available} distinct distractors available for \"{word}\", {required} are needed")]
    TooFewDistractors {
        word: String,
        available: usize,
        required: usize,
    },

    #[error(transparent)]
    Question(#[from] QuestionError),
}

impl GenerateError {
    /// True for the failures caused by a catalog too small or too repetitive
    /// to build four distinct options.
    #[must_use]
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            GenerateError::TooFewEntries { .. } | GenerateError::TooFewDistractors { .. }
        )
    }
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Turns a vocabulary catalog into a randomized multiple-choice quiz.
///
/// Subjects are sampled without replacement, so no word is asked twice in a
/// set. Each question gets the subject's meaning plus three distinct
/// distractor meanings taken from other entries, in random order.
///
/// The random source is always supplied by the caller:
///
/// ```
/// # use vocab_core::generator::QuizGenerator;
/// # use vocab_core::model::VocabularyEntry;
/// use rand::SeedableRng;
///
/// let catalog: Vec<VocabularyEntry> = [("cat", "貓"), ("dog", "狗"), ("bird", "鳥"), ("fish", "魚")]
///     .into_iter()
///     .map(|(w, m)| VocabularyEntry::new(w, "n.", m, "").unwrap())
///     .collect();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let questions = QuizGenerator::new().generate(&catalog, &mut rng)?;
/// assert_eq!(questions.len(), 4);
/// # Ok::<(), vocab_core::generator::GenerateError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizGenerator {
    count: usize,
}

impl Default for QuizGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: MAX_SESSION_QUESTIONS,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &QuizSettings) -> Self {
        Self {
            count: settings.question_count(),
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Generates `min(count, catalog.len())` questions.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::InvalidCount` for a zero count,
    /// `GenerateError::TooFewEntries` for catalogs under four entries, and
    /// `GenerateError::TooFewDistractors` when a subject's meaning cannot be
    /// paired with three other distinct meanings.
    pub fn generate<R>(
        &self,
        catalog: &[VocabularyEntry],
        rng: &mut R,
    ) -> Result<Vec<QuizQuestion>, GenerateError>
    where
        R: Rng + ?Sized,
    {
        if self.count == 0 {
            return Err(GenerateError::InvalidCount);
        }
        if catalog.len() < MIN_CATALOG_ENTRIES {
            return Err(GenerateError::TooFewEntries {
                available: catalog.len(),
                required: MIN_CATALOG_ENTRIES,
            });
        }

        let amount = self.count.min(catalog.len());
        let subjects = rand::seq::index::sample(rng, catalog.len(), amount);

        let mut questions = Vec::with_capacity(amount);
        for subject in subjects.iter() {
            questions.push(build_question(catalog, subject, rng)?);
        }

        debug!(
            "generated {} questions from a catalog of {}",
            questions.len(),
            catalog.len()
        );
        Ok(questions)
    }
}

fn build_question<R>(
    catalog: &[VocabularyEntry],
    subject_index: usize,
    rng: &mut R,
) -> Result<QuizQuestion, GenerateError>
where
    R: Rng + ?Sized,
{
    let subject = &catalog[subject_index];
    let correct = subject.meaning();

    // Distinct meanings of every other entry, minus anything that reads like
    // the correct answer.
    let mut seen = HashSet::new();
    seen.insert(correct.trim());
    let candidates: Vec<&str> = catalog
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != subject_index)
        .map(|(_, entry)| entry.meaning())
        .filter(|meaning| seen.insert(meaning.trim()))
        .collect();

    if candidates.len() < DISTRACTORS_PER_QUESTION {
        return Err(GenerateError::TooFewDistractors {
            word: subject.word().to_owned(),
            available: candidates.len(),
            required: DISTRACTORS_PER_QUESTION,
        });
    }

    let mut options: Vec<String> = candidates
        .choose_multiple(rng, DISTRACTORS_PER_QUESTION)
        .map(|meaning| (*meaning).to_owned())
        .collect();
    options.shuffle(rng);
    let correct_index = rng.random_range(0..=options.len());
    options.insert(correct_index, correct.to_owned());

    Ok(QuizQuestion::new(
        subject.word(),
        options,
        correct_index,
        subject.example_sentence(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog(pairs: &[(&str, &str)]) -> Vec<VocabularyEntry> {
        pairs
            .iter()
            .map(|(word, meaning)| {
                VocabularyEntry::new(*word, "n.", *meaning, format!("Example for {word}.")).unwrap()
            })
            .collect()
    }

    fn animals() -> Vec<VocabularyEntry> {
        catalog(&[("cat", "貓"), ("dog", "狗"), ("bird", "鳥"), ("fish", "魚")])
    }

    fn twelve_words() -> Vec<VocabularyEntry> {
        let pairs: Vec<(String, String)> = (0..12)
            .map(|i| (format!("word{i}"), format!("meaning{i}")))
            .collect();
        pairs
            .iter()
            .map(|(w, m)| VocabularyEntry::new(w.as_str(), "n.", m.as_str(), "").unwrap())
            .collect()
    }

    fn assert_well_formed(questions: &[QuizQuestion], source: &[VocabularyEntry]) {
        let mut prompts = HashSet::new();
        for q in questions {
            assert!(prompts.insert(q.prompt().to_owned()), "repeated subject");
            assert_eq!(q.options().len(), 4);
            let distinct: HashSet<_> = q.options().iter().collect();
            assert_eq!(distinct.len(), 4);
            let subject = source.iter().find(|e| e.word() == q.prompt()).unwrap();
            assert_eq!(q.correct_option(), subject.meaning());
            assert_eq!(q.explanation(), subject.example_sentence());
        }
    }

    #[test]
    fn four_entry_catalog_uses_every_other_meaning() {
        let source = animals();
        let mut rng = StdRng::seed_from_u64(42);
        let questions = QuizGenerator::new()
            .with_count(10)
            .generate(&source, &mut rng)
            .unwrap();

        assert_eq!(questions.len(), 4);
        assert_well_formed(&questions, &source);
        for q in &questions {
            let mut options: Vec<&str> = q.options().iter().map(String::as_str).collect();
            options.sort_unstable();
            let mut all: Vec<&str> = source.iter().map(VocabularyEntry::meaning).collect();
            all.sort_unstable();
            assert_eq!(options, all);
        }
    }

    #[test]
    fn question_count_is_capped_by_count() {
        let source = twelve_words();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = QuizGenerator::new().generate(&source, &mut rng).unwrap();
            assert_eq!(questions.len(), 10);
            assert_well_formed(&questions, &source);
        }
    }

    #[test]
    fn three_entries_are_insufficient() {
        let source = catalog(&[("cat", "貓"), ("dog", "狗"), ("bird", "鳥")]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = QuizGenerator::new().generate(&source, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GenerateError::TooFewEntries {
                available: 3,
                required: 4
            }
        );
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn duplicate_meanings_do_not_count_as_distractors() {
        let source = catalog(&[
            ("cat", "貓"),
            ("kitty", "貓"),
            ("dog", "狗"),
            ("hound", "狗"),
            ("bird", "鳥"),
        ]);
        let mut rng = StdRng::seed_from_u64(3);
        let err = QuizGenerator::new().generate(&source, &mut rng).unwrap_err();
        assert!(matches!(err, GenerateError::TooFewDistractors { available: 2, .. }));
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = QuizGenerator::new()
            .with_count(0)
            .generate(&animals(), &mut rng)
            .unwrap_err();
        assert_eq!(err, GenerateError::InvalidCount);
    }

    #[test]
    fn same_seed_same_quiz() {
        let source = twelve_words();
        let generator = QuizGenerator::new().with_count(5);
        let a = generator
            .generate(&source, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = generator
            .generate(&source, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn correct_position_varies_across_seeds() {
        let source = twelve_words();
        let positions: HashSet<usize> = (0..40)
            .flat_map(|seed| {
                QuizGenerator::new()
                    .generate(&source, &mut StdRng::seed_from_u64(seed))
                    .unwrap()
                    .into_iter()
                    .map(|q| q.correct_option_index())
            })
            .collect();
        assert_eq!(positions.len(), 4);
    }
}
