//! Binary images of prebuilt tables.

use std::sync::Arc;

use hal_ir::Vocabulary;

use super::{fingerprint, Compact, ParseTables, TableError};

impl ParseTables {
    /// Encode the tables. The vocabulary is not included; it must be
    /// supplied again when the image is loaded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TableError> {
        bincode::serialize(&self.compact).map_err(|e| TableError::Encode(e.to_string()))
    }

    /// Load an image written by [`ParseTables::to_bytes`] and validate it.
    pub fn from_bytes(bytes: &[u8], vocabulary: Arc<Vocabulary>) -> Result<Self, TableError> {
        let compact: Compact =
            bincode::deserialize(bytes).map_err(|e| TableError::Decode(e.to_string()))?;
        if compact.fingerprint != fingerprint(&vocabulary) {
            return Err(TableError::VocabularyMismatch);
        }
        let tables = ParseTables {
            vocabulary,
            compact,
        };
        tables.validate()?;
        Ok(tables)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reference;

    #[test]
    fn image_round_trips() {
        let language = reference::hal_language().unwrap();
        let bytes = language.tables.to_bytes().unwrap();
        let loaded =
            ParseTables::from_bytes(&bytes, Arc::clone(language.tables.vocabulary())).unwrap();
        assert_eq!(&loaded, language.tables.as_ref());
    }

    #[test]
    fn rejects_foreign_vocabulary() {
        let language = reference::hal_language().unwrap();
        let bytes = language.tables.to_bytes().unwrap();
        let other = Arc::new(hal_ir::hal::terminals().build().unwrap());
        assert_eq!(
            ParseTables::from_bytes(&bytes, other).unwrap_err(),
            TableError::VocabularyMismatch
        );
    }

    #[test]
    fn rejects_truncated_image() {
        let language = reference::hal_language().unwrap();
        let bytes = language.tables.to_bytes().unwrap();
        let err = ParseTables::from_bytes(&bytes[..bytes.len() / 2], Arc::clone(language.tables.vocabulary()))
            .unwrap_err();
        assert!(matches!(err, TableError::Decode(_)));
    }
}
