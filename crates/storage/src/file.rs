use async_trait::async_trait;
use log::{info, warn};
use std::io::ErrorKind;
use std::path::PathBuf;
use vocab_core::model::{Tier, VocabularyEntry};

use crate::records::decode_catalog;
use crate::repository::{CatalogError, CatalogRepository};

/// Catalogs stored as `<dir>/<Tier>Level.json`.
///
/// `load` reads the file with blocking I/O on the calling task. Catalogs are
/// small bundled files, so the read is short and bounded.
#[derive(Debug, Clone)]
pub struct FileCatalogRepository {
    dir: PathBuf,
}

impl FileCatalogRepository {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path_for(&self, tier: Tier) -> PathBuf {
        self.dir.join(tier.file_name())
    }
}

#[async_trait]
impl CatalogRepository for FileCatalogRepository {
    async fn load(&self, tier: Tier) -> Result<Vec<VocabularyEntry>, CatalogError> {
        let path = self.path_for(tier);
        let bytes = std::fs::read(&path).map_err(|e| {
            warn!("reading {} failed: {e}", path.display());
            match e.kind() {
                ErrorKind::NotFound => CatalogError::not_found(tier),
                _ => CatalogError::Unreadable {
                    tier,
                    reason: e.to_string(),
                },
            }
        })?;

        let entries = decode_catalog(tier, &bytes)?;
        info!(
            "loaded {} entries for tier {tier} from {}",
            entries.len(),
            path.display()
        );
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FileCatalogRepository>();
    }

    #[test]
    fn path_uses_tier_file_name() {
        let repo = FileCatalogRepository::new("/tmp/catalogs");
        assert_eq!(
            repo.path_for(Tier::C1),
            PathBuf::from("/tmp/catalogs/C1Level.json")
        );
    }
}
