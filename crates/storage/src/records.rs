use serde::{Deserialize, Serialize};
use vocab_core::model::{EntryError, Tier, VocabularyEntry};

use crate::repository::CatalogError;

/// On-disk shape of one catalog record.
///
/// Field names follow the bundled JSON resources; the domain type uses its own
/// names so the resource layout does not leak past this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabRecord {
    pub english_word: String,
    pub part_of_speech: String,
    pub chinese_meaning: String,
    pub example_sentence: String,
}

impl VocabRecord {
    #[must_use]
    pub fn from_entry(entry: &VocabularyEntry) -> Self {
        Self {
            english_word: entry.word().to_owned(),
            part_of_speech: entry.part_of_speech().to_owned(),
            chinese_meaning: entry.meaning().to_owned(),
            example_sentence: entry.example_sentence().to_owned(),
        }
    }

    /// # Errors
    ///
    /// Returns `EntryError` if the word or meaning is blank.
    pub fn into_entry(self) -> Result<VocabularyEntry, EntryError> {
        VocabularyEntry::new(
            self.english_word,
            self.part_of_speech,
            self.chinese_meaning,
            self.example_sentence,
        )
    }
}

/// Decode a catalog resource into domain entries.
///
/// # Errors
///
/// Returns `CatalogError::Decode` when the bytes are not a JSON array of
/// records or when a record fails entry validation.
pub fn decode_catalog(tier: Tier, bytes: &[u8]) -> Result<Vec<VocabularyEntry>, CatalogError> {
    let records: Vec<VocabRecord> =
        serde_json::from_slice(bytes).map_err(|e| CatalogError::Decode {
            tier,
            reason: e.to_string(),
        })?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record.into_entry().map_err(|e| CatalogError::Decode {
                tier,
                reason: format!("record {index}: {e}"),
            })
        })
        .collect()
}

/// Encode entries in the catalog resource format.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn encode_catalog(entries: &[VocabularyEntry]) -> Result<String, serde_json::Error> {
    let records: Vec<VocabRecord> = entries.iter().map(VocabRecord::from_entry).collect();
    serde_json::to_string_pretty(&records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_records_and_ignores_extra_fields() {
        let json = r#"[
            {"english_word": "cat", "part_of_speech": "n.", "chinese_meaning": "貓",
             "example_sentence": "The cat sleeps.", "id": 7}
        ]"#;
        let entries = decode_catalog(Tier::B1, json.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].meaning(), "貓");
        assert_eq!(entries[0].example_sentence(), "The cat sleeps.");
    }

    #[test]
    fn wrong_shape_is_decode_error() {
        let err = decode_catalog(Tier::B2, br#"{"english_word": "cat"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Decode { tier: Tier::B2, .. }));

        let err = decode_catalog(Tier::B2, br#"[{"english_word": "cat"}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Decode { .. }));
    }

    #[test]
    fn blank_meaning_names_the_record() {
        let json = r#"[
            {"english_word": "cat", "part_of_speech": "n.", "chinese_meaning": "貓", "example_sentence": ""},
            {"english_word": "dog", "part_of_speech": "n.", "chinese_meaning": " ", "example_sentence": ""}
        ]"#;
        let err = decode_catalog(Tier::C1, json.as_bytes()).unwrap_err();
        let CatalogError::Decode { reason, .. } = err else {
            panic!("expected decode error");
        };
        assert!(reason.starts_with("record 1"));
    }

    #[test]
    fn encoded_catalog_decodes_back() {
        let entries = vec![VocabularyEntry::new("cat", "n.", "貓", "The cat sleeps.").unwrap()];
        let json = encode_catalog(&entries).unwrap();
        assert!(json.contains("chinese_meaning"));
        assert_eq!(decode_catalog(Tier::B1, json.as_bytes()).unwrap(), entries);
    }
}
