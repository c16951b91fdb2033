use std::sync::Arc;

use vocab_core::model::{Tier, VocabularyEntry};

use crate::error::{LoadError, QuizError};
use crate::loader::CatalogLoader;

/// Word-list browser for one tier with a local search query.
#[derive(Debug, Clone)]
pub struct VocabularyShelf {
    tier: Tier,
    entries: Arc<[VocabularyEntry]>,
    query: String,
}

impl VocabularyShelf {
    #[must_use]
    pub fn new(tier: Tier, entries: Arc<[VocabularyEntry]>) -> Self {
        Self {
            tier,
            entries,
            query: String::new(),
        }
    }

    /// Load `tier` through the shelf's own loader.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleLoad` if another tier was requested from
    /// `loader` meanwhile, or the catalog error.
    pub async fn open(loader: &CatalogLoader, tier: Tier) -> Result<Self, QuizError> {
        match loader.load(tier).await {
            Ok(loaded) => Ok(Self::new(tier, loaded.shared_entries())),
            Err(LoadError::Superseded { request }) => Err(QuizError::StaleLoad {
                tier: request.tier(),
            }),
            Err(LoadError::Catalog { source, .. }) => Err(source.into()),
        }
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching the query: the word contains it ignoring case, or the
    /// meaning contains it verbatim. A blank query matches everything.
    #[must_use]
    pub fn filtered(&self) -> Vec<&VocabularyEntry> {
        let query = self.query.trim();
        if query.is_empty() {
            return self.entries.iter().collect();
        }
        let lowered = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry.word().to_lowercase().contains(&lowered) || entry.meaning().contains(query)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{CatalogError, InMemoryCatalogRepository};

    fn shelf() -> VocabularyShelf {
        let entries: Vec<VocabularyEntry> = [
            ("Accept", "接受"),
            ("achieve", "達成"),
            ("advice", "建議"),
            ("decide", "決定"),
        ]
        .into_iter()
        .map(|(w, m)| VocabularyEntry::new(w, "v.", m, "").unwrap())
        .collect();
        VocabularyShelf::new(Tier::B1, entries.into())
    }

    fn words(entries: &[&VocabularyEntry]) -> Vec<String> {
        entries.iter().map(|e| e.word().to_owned()).collect()
    }

    #[test]
    fn blank_query_lists_everything() {
        let mut shelf = shelf();
        shelf.set_query("   ");
        assert_eq!(shelf.filtered().len(), 4);
    }

    #[test]
    fn word_match_ignores_case() {
        let mut shelf = shelf();
        shelf.set_query("AC");
        assert_eq!(words(&shelf.filtered()), vec!["Accept", "achieve"]);
    }

    #[test]
    fn meaning_match() {
        let mut shelf = shelf();
        shelf.set_query("決");
        assert_eq!(words(&shelf.filtered()), vec!["decide"]);
    }

    #[tokio::test]
    async fn open_reports_missing_tier() {
        let loader = CatalogLoader::new(Arc::new(InMemoryCatalogRepository::new()));
        let err = VocabularyShelf::open(&loader, Tier::C1).await.unwrap_err();
        assert!(matches!(err, QuizError::Catalog(CatalogError::NotFound { .. })));
    }
}
