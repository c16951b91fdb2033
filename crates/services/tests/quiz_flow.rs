use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use services::{
    CatalogLoader, QuizError, QuizPhase, QuizSession, QuizWorkflow, RandomSource, SessionState,
};
use storage::{CatalogError, CatalogRepository, InMemoryCatalogRepository, Storage};
use tokio::sync::Notify;
use vocab_core::QuizGenerator;
use vocab_core::model::{QuizSettings, Tier, VocabularyEntry};
use vocab_core::time::fixed_clock;

use rand::SeedableRng;
use rand::rngs::StdRng;

fn animals() -> Vec<VocabularyEntry> {
    [("cat", "貓"), ("dog", "狗"), ("bird", "鳥"), ("fish", "魚")]
        .into_iter()
        .map(|(w, m)| VocabularyEntry::new(w, "n.", m, format!("I see a {w}.")).unwrap())
        .collect()
}

/// Holds loads of one tier until released.
struct GatedRepository {
    inner: InMemoryCatalogRepository,
    gated: Tier,
    gate: Arc<Notify>,
}

#[async_trait]
impl CatalogRepository for GatedRepository {
    async fn load(&self, tier: Tier) -> Result<Vec<VocabularyEntry>, CatalogError> {
        if tier == self.gated {
            self.gate.notified().await;
        }
        self.inner.load(tier).await
    }
}

#[test]
fn four_animals_give_four_questions_with_forced_distractors() {
    let catalog = animals();
    let questions = QuizGenerator::new()
        .with_count(10)
        .generate(&catalog, &mut StdRng::seed_from_u64(2024))
        .unwrap();

    assert_eq!(questions.len(), 4);
    let prompts: HashSet<_> = questions.iter().map(|q| q.prompt()).collect();
    assert_eq!(prompts.len(), 4);

    let all: HashSet<&str> = catalog.iter().map(VocabularyEntry::meaning).collect();
    for q in &questions {
        let options: HashSet<&str> = q.options().iter().map(String::as_str).collect();
        assert_eq!(options, all);
    }
}

#[test]
fn two_question_session_scores_one() {
    let questions = QuizGenerator::new()
        .with_count(2)
        .generate(&animals(), &mut StdRng::seed_from_u64(5))
        .unwrap();
    let mut session = QuizSession::new(questions, fixed_clock()).unwrap();

    let correct = session.current_question().unwrap().correct_option_index();
    session.select_answer(correct).unwrap();
    session.next();
    let wrong = (session.current_question().unwrap().correct_option_index() + 1) % 4;
    session.select_answer(wrong).unwrap();
    session.next();

    assert_eq!(session.state(), SessionState::Completed);
    assert_eq!(session.compute_score(), 1);
}

#[tokio::test]
async fn late_result_of_superseded_tier_is_discarded() {
    let gate = Arc::new(Notify::new());
    let repo = GatedRepository {
        inner: InMemoryCatalogRepository::new()
            .with_catalog(Tier::B1, animals())
            .with_catalog(Tier::B2, animals()),
        gated: Tier::B1,
        gate: Arc::clone(&gate),
    };
    let loader = Arc::new(CatalogLoader::new(Arc::new(repo)));
    let mut wf = QuizWorkflow::new(Arc::clone(&loader), QuizSettings::default())
        .with_random(RandomSource::seeded(1))
        .with_clock(fixed_clock());

    let slow_request = wf.select_tier(Tier::B1);
    let slow = loader.fetch(slow_request);
    let fast = async {
        let request = wf.select_tier(Tier::B2);
        let result = loader.fetch(request).await;
        gate.notify_one();
        result
    };
    let (slow_result, fast_result) = tokio::join!(slow, fast);

    let snapshot = wf.complete_load(fast_result).unwrap();
    assert_eq!(snapshot.tier, Some(Tier::B2));

    let err = wf.complete_load(slow_result).unwrap_err();
    assert_eq!(err, QuizError::StaleLoad { tier: Tier::B1 });
    assert_eq!(wf.snapshot().tier, Some(Tier::B2));
    assert_eq!(wf.snapshot().phase, QuizPhase::InProgress);
}

#[tokio::test]
async fn bundled_catalogs_produce_full_quizzes() {
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let storage = Storage::files(data_dir);
    let loader = Arc::new(CatalogLoader::new(Arc::clone(&storage.catalogs)));
    let mut wf = QuizWorkflow::new(loader, QuizSettings::default())
        .with_random(RandomSource::seeded(99))
        .with_clock(fixed_clock());

    for tier in Tier::ALL {
        let snapshot = wf.load_tier(tier).await.unwrap();
        let total = snapshot.progress.unwrap().total;
        let catalog_len = wf.catalog().unwrap().len();
        assert_eq!(total, catalog_len.min(10));
    }
}

#[tokio::test]
async fn retry_after_missing_catalog_recovers() {
    let repo = InMemoryCatalogRepository::new();
    let loader = Arc::new(CatalogLoader::new(Arc::new(repo.clone())));
    let mut wf = QuizWorkflow::new(loader, QuizSettings::default()).with_clock(fixed_clock());

    let err = wf.load_tier(Tier::C1).await.unwrap_err();
    assert!(err.is_retryable());
    let failed = wf.snapshot();
    assert_eq!(failed.phase, QuizPhase::Failed);
    assert!(failed.error.unwrap().message.contains("C1Level.json"));

    repo.insert(Tier::C1, animals());
    let snapshot = wf.retry().await.unwrap();
    assert_eq!(snapshot.phase, QuizPhase::InProgress);
    assert!(snapshot.error.is_none());
}
