use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;

use vocab_core::generator::QuizGenerator;
use vocab_core::model::{QuizSettings, Tier, VocabularyEntry};
use vocab_core::{Clock, RandomSource};

use crate::error::{LoadError, QuizError};
use crate::loader::{CatalogLoader, LoadRequest, LoadedCatalog};
use crate::quiz::{QuizSession, SessionState};
use crate::snapshot::{
    ErrorView, QuestionView, QuizPhase, QuizSnapshot, SnapshotHub, SubscriptionId,
};
use crate::speech::{SilentSpeaker, Speaker};

/// Presentation-facing controller for one quiz screen.
///
/// Owns the selected tier, the loaded catalog and the active `QuizSession`.
/// Every mutation publishes a fresh `QuizSnapshot` to the registered
/// listeners and also returns it.
pub struct QuizWorkflow {
    loader: Arc<CatalogLoader>,
    settings: QuizSettings,
    random: RandomSource,
    clock: Clock,
    speaker: Arc<dyn Speaker>,
    hub: SnapshotHub,
    revision: u64,
    tier: Option<Tier>,
    pending: Option<LoadRequest>,
    catalog: Option<Arc<[VocabularyEntry]>>,
    session: Option<QuizSession>,
    error: Option<ErrorView>,
}

impl QuizWorkflow {
    #[must_use]
    pub fn new(loader: Arc<CatalogLoader>, settings: QuizSettings) -> Self {
        Self {
            loader,
            settings,
            random: RandomSource::default(),
            clock: Clock::default(),
            speaker: Arc::new(SilentSpeaker),
            hub: SnapshotHub::new(),
            revision: 0,
            tier: None,
            pending: None,
            catalog: None,
            session: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_random(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_speaker(mut self, speaker: Arc<dyn Speaker>) -> Self {
        self.speaker = speaker;
        self
    }

    #[must_use]
    pub fn loader(&self) -> Arc<CatalogLoader> {
        Arc::clone(&self.loader)
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn catalog(&self) -> Option<&[VocabularyEntry]> {
        self.catalog.as_deref()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&QuizSnapshot) + Send + Sync + 'static,
    {
        self.hub.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.hub.unsubscribe(id)
    }

    //
    // ─── LOADING ───────────────────────────────────────────────────────────────
    //

    /// Switch to `tier` and issue a load request for it. Any earlier request
    /// becomes stale.
    pub fn select_tier(&mut self, tier: Tier) -> LoadRequest {
        let request = self.loader.request(tier);
        self.tier = Some(tier);
        self.pending = Some(request);
        self.catalog = None;
        self.session = None;
        self.error = None;
        self.speaker.stop();
        self.publish();
        request
    }

    /// Apply the result of `CatalogLoader::fetch`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleLoad` (state untouched) if the request is no
    /// longer the newest one, otherwise the catalog or generation error that
    /// moved the screen into the failed state.
    pub fn complete_load(
        &mut self,
        result: Result<LoadedCatalog, LoadError>,
    ) -> Result<QuizSnapshot, QuizError> {
        let request = match &result {
            Ok(loaded) => loaded.request(),
            Err(err) => err.request(),
        };
        if self.pending != Some(request) || !self.loader.is_current(request) {
            debug!("ignoring stale load {} for tier {}", request.id(), request.tier());
            return Err(QuizError::StaleLoad {
                tier: request.tier(),
            });
        }
        self.pending = None;

        match result {
            Ok(loaded) => {
                info!(
                    "tier {} loaded with {} entries",
                    loaded.tier(),
                    loaded.entries().len()
                );
                self.catalog = Some(loaded.shared_entries());
                self.start_session()
            }
            Err(LoadError::Catalog { source, .. }) => Err(self.fail(source.into())),
            Err(LoadError::Superseded { request }) => Err(QuizError::StaleLoad {
                tier: request.tier(),
            }),
        }
    }

    /// Select `tier`, load it and start a quiz.
    ///
    /// # Errors
    ///
    /// Same as `complete_load`.
    pub async fn load_tier(&mut self, tier: Tier) -> Result<QuizSnapshot, QuizError> {
        let request = self.select_tier(tier);
        let result = self.loader.fetch(request).await;
        self.complete_load(result)
    }

    /// Reload the current tier after a failure.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoTierSelected` before any tier was chosen, or the
    /// errors of `load_tier`.
    pub async fn retry(&mut self) -> Result<QuizSnapshot, QuizError> {
        let tier = self.tier.ok_or(QuizError::NoTierSelected)?;
        self.load_tier(tier).await
    }

    /// Build a fresh session from the loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoTierSelected` without a loaded catalog, or the
    /// generation error.
    pub fn restart(&mut self) -> Result<QuizSnapshot, QuizError> {
        if self.catalog.is_none() {
            return Err(QuizError::NoTierSelected);
        }
        self.start_session()
    }

    fn start_session(&mut self) -> Result<QuizSnapshot, QuizError> {
        let Some(catalog) = self.catalog.clone() else {
            return Err(QuizError::NoTierSelected);
        };

        let generator = QuizGenerator::from_settings(&self.settings);
        let mut rng = self.random.rng();
        let session = generator
            .generate(&catalog, &mut rng)
            .map_err(QuizError::from)
            .and_then(|questions| {
                QuizSession::new(questions, self.clock).map_err(QuizError::from)
            });

        match session {
            Ok(session) => {
                self.session = Some(session);
                self.error = None;
                self.auto_speak();
                Ok(self.publish())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&mut self, err: QuizError) -> QuizError {
        warn!("quiz failed: {err}");
        self.session = None;
        self.error = Some(ErrorView::from(&err));
        self.publish();
        err
    }

    //
    // ─── SESSION OPERATIONS ────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSession` without a session, or
    /// `SessionError::OutOfRange` for an invalid option or a completed quiz.
    pub fn select_answer(&mut self, option_index: usize) -> Result<QuizSnapshot, QuizError> {
        self.session_mut()?.select_answer(option_index)?;
        Ok(self.publish())
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSession` without a session.
    pub fn next(&mut self) -> Result<QuizSnapshot, QuizError> {
        let session = self.session_mut()?;
        let was_complete = session.is_complete();
        match session.next() {
            SessionState::Completed if !was_complete => {
                info!(
                    "quiz finished: {}/{}",
                    session.score(),
                    session.questions().len()
                );
            }
            SessionState::Completed => {}
            SessionState::InProgress => self.auto_speak(),
        }
        Ok(self.publish())
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSession` without a session and
    /// `SessionError::Completed` once the quiz has completed.
    pub fn previous(&mut self) -> Result<QuizSnapshot, QuizError> {
        let session = self.session_mut()?;
        let before = session.current_index();
        session.previous()?;
        if session.current_index() != before {
            self.auto_speak();
        }
        Ok(self.publish())
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSession` without a session.
    pub fn finish(&mut self) -> Result<QuizSnapshot, QuizError> {
        self.session_mut()?.finish();
        self.speaker.stop();
        Ok(self.publish())
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSession` without a session.
    pub fn reset(&mut self) -> Result<QuizSnapshot, QuizError> {
        self.session_mut()?.reset();
        self.auto_speak();
        Ok(self.publish())
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSession` without a session.
    pub fn compute_score(&self) -> Result<usize, QuizError> {
        self.session
            .as_ref()
            .map(QuizSession::compute_score)
            .ok_or(QuizError::NoActiveSession)
    }

    /// Speak the current prompt regardless of `auto_speak`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSession` if there is no current question.
    pub fn speak_current(&mut self) -> Result<QuizSnapshot, QuizError> {
        let prompt = self
            .session
            .as_ref()
            .and_then(QuizSession::current_question)
            .map(|q| q.prompt().to_owned())
            .ok_or(QuizError::NoActiveSession)?;
        self.speaker.speak(&prompt, self.settings.speech_language());
        Ok(self.publish())
    }

    fn session_mut(&mut self) -> Result<&mut QuizSession, QuizError> {
        self.session.as_mut().ok_or(QuizError::NoActiveSession)
    }

    fn auto_speak(&self) {
        if !self.settings.auto_speak() {
            return;
        }
        if let Some(question) = self.session.as_ref().and_then(QuizSession::current_question) {
            self.speaker
                .speak(question.prompt(), self.settings.speech_language());
        }
    }

    //
    // ─── SNAPSHOTS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        let phase = if self.pending.is_some() {
            QuizPhase::Loading
        } else if self.error.is_some() {
            QuizPhase::Failed
        } else {
            match self.session.as_ref().map(QuizSession::state) {
                Some(SessionState::InProgress) => QuizPhase::InProgress,
                Some(SessionState::Completed) => QuizPhase::Completed,
                None => QuizPhase::Idle,
            }
        };

        let session = self.session.as_ref();
        let question = session.and_then(|s| {
            s.current_question().map(|q| {
                QuestionView::new(
                    s.current_index(),
                    q,
                    s.current_answer(),
                    self.settings.reveal_answers(),
                )
            })
        });

        QuizSnapshot {
            revision: self.revision,
            tier: self.tier,
            phase,
            question,
            progress: session.map(QuizSession::progress),
            score: session.map_or(0, QuizSession::compute_score),
            outcome: session.and_then(QuizSession::outcome),
            error: self.error.clone(),
            is_speaking: self.speaker.is_speaking(),
        }
    }

    fn publish(&mut self) -> QuizSnapshot {
        self.revision += 1;
        let snapshot = self.snapshot();
        self.hub.publish(&snapshot);
        snapshot
    }
}

impl fmt::Debug for QuizWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizWorkflow")
            .field("tier", &self.tier)
            .field("pending", &self.pending)
            .field("catalog_len", &self.catalog.as_ref().map(|c| c.len()))
            .field("session", &self.session)
            .field("error", &self.error)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
