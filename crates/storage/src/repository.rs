use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use vocab_core::model::{Tier, VocabularyEntry};

use crate::file::FileCatalogRepository;

/// Errors surfaced by catalog sources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog {resource} not found")]
    NotFound { tier: Tier, resource: String },

    #[error("catalog {tier} is malformed: {reason}")]
    Decode { tier: Tier, reason: String },

    #[error("catalog {tier} could not be read: {reason}")]
    Unreadable { tier: Tier, reason: String },
}

impl CatalogError {
    #[must_use]
    pub fn tier(&self) -> Tier {
        match self {
            CatalogError::NotFound { tier, .. }
            | CatalogError::Decode { tier, .. }
            | CatalogError::Unreadable { tier, .. } => *tier,
        }
    }

    pub(crate) fn not_found(tier: Tier) -> Self {
        CatalogError::NotFound {
            tier,
            resource: tier.file_name(),
        }
    }
}

/// Read-only access to the per-tier vocabulary catalogs.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Load every entry of the given tier.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the tier has no backing resource and
    /// `CatalogError::Decode` if the resource exists but cannot be parsed.
    async fn load(&self, tier: Tier) -> Result<Vec<VocabularyEntry>, CatalogError>;
}

/// In-memory catalogs for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryCatalogRepository {
    catalogs: Arc<Mutex<HashMap<Tier, Vec<VocabularyEntry>>>>,
}

impl InMemoryCatalogRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog stored for `tier`.
    pub fn insert(&self, tier: Tier, entries: Vec<VocabularyEntry>) {
        let mut guard = self
            .catalogs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.insert(tier, entries);
    }

    #[must_use]
    pub fn with_catalog(self, tier: Tier, entries: Vec<VocabularyEntry>) -> Self {
        self.insert(tier, entries);
        self
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn load(&self, tier: Tier) -> Result<Vec<VocabularyEntry>, CatalogError> {
        let guard = self
            .catalogs
            .lock()
            .map_err(|e| CatalogError::Unreadable {
                tier,
                reason: e.to_string(),
            })?;
        guard
            .get(&tier)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(tier))
    }
}

/// Catalog source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub catalogs: Arc<dyn CatalogRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(repo: InMemoryCatalogRepository) -> Self {
        Self {
            catalogs: Arc::new(repo),
        }
    }

    /// Catalogs read from `<dir>/<Tier>Level.json`.
    #[must_use]
    pub fn files(dir: impl Into<PathBuf>) -> Self {
        Self {
            catalogs: Arc::new(FileCatalogRepository::new(dir)),
        }
    }
}
