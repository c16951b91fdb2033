use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use storage::CatalogRepository;
use vocab_core::model::{Tier, VocabularyEntry};

use crate::error::LoadError;

/// Ticket for one catalog load. Only the newest ticket issued by a loader may
/// be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadRequest {
    id: u64,
    tier: Tier,
}

impl LoadRequest {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }
}

/// A catalog that finished loading for a specific request.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCatalog {
    request: LoadRequest,
    entries: Arc<[VocabularyEntry]>,
}

impl LoadedCatalog {
    #[must_use]
    pub fn request(&self) -> LoadRequest {
        self.request
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.request.tier
    }

    #[must_use]
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    #[must_use]
    pub fn shared_entries(&self) -> Arc<[VocabularyEntry]> {
        Arc::clone(&self.entries)
    }
}

/// Loads tier catalogs with last-request-wins ordering.
///
/// Every `request` supersedes the ones before it. `fetch` still performs the
/// read for an old ticket, but reports it as `LoadError::Superseded` instead of
/// handing back entries, and callers re-check `is_current` before applying.
pub struct CatalogLoader {
    catalogs: Arc<dyn CatalogRepository>,
    latest: AtomicU64,
}

impl CatalogLoader {
    #[must_use]
    pub fn new(catalogs: Arc<dyn CatalogRepository>) -> Self {
        Self {
            catalogs,
            latest: AtomicU64::new(0),
        }
    }

    /// Issue a new ticket for `tier`, superseding every earlier ticket.
    pub fn request(&self, tier: Tier) -> LoadRequest {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("load request {id} for tier {tier}");
        LoadRequest { id, tier }
    }

    #[must_use]
    pub fn is_current(&self, request: LoadRequest) -> bool {
        self.latest.load(Ordering::SeqCst) == request.id
    }

    /// Read the catalog for `request`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Superseded` if a newer request was issued while the
    /// read was in flight, or `LoadError::Catalog` if the read itself failed.
    pub async fn fetch(&self, request: LoadRequest) -> Result<LoadedCatalog, LoadError> {
        let result = self.catalogs.load(request.tier).await;

        if !self.is_current(request) {
            warn!(
                "discarding load {} for tier {}: superseded",
                request.id, request.tier
            );
            return Err(LoadError::Superseded { request });
        }

        let entries = result.map_err(|source| LoadError::Catalog { request, source })?;
        Ok(LoadedCatalog {
            request,
            entries: entries.into(),
        })
    }

    /// Convenience for `request` followed by `fetch`.
    ///
    /// # Errors
    ///
    /// Same as `fetch`.
    pub async fn load(&self, tier: Tier) -> Result<LoadedCatalog, LoadError> {
        let request = self.request(tier);
        self.fetch(request).await
    }
}

impl std::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("latest", &self.latest.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
