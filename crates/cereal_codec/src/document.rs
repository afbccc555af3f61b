//! Decoding a stream without knowing its top-level shape in advance.

use crate::catalog::{Catalog, CATALOG_MAGIC};
use crate::collection::Collection;
use crate::cursor::ByteCursor;
use crate::error::CodecResult;
use std::path::Path;

/// A decoded top-level value: a catalog or a bare collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// The stream started with [`CATALOG_MAGIC`].
    Catalog(Catalog),
    /// Anything else, decoded as a single collection.
    Collection(Collection),
}

impl Document {
    /// Sniffs the first two bytes and decodes accordingly.
    ///
    /// # Errors
    ///
    /// Returns whatever [`Catalog::read`] or [`Collection::read`] returns.
    pub fn read(cursor: &mut ByteCursor) -> CodecResult<Self> {
        let head = cursor.peek_bytes(2)?;
        if head == CATALOG_MAGIC.to_be_bytes() {
            Catalog::read(cursor).map(Self::Catalog)
        } else {
            Collection::read(cursor).map(Self::Collection)
        }
    }

    /// Reads a whole file and decodes it.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors or anything [`Document::read`] rejects.
    pub fn load(path: impl AsRef<Path>) -> CodecResult<Self> {
        let path = path.as_ref();
        let mut cursor = ByteCursor::open(path)?;
        tracing::debug!(path = %path.display(), bytes = cursor.len(), "loaded document");
        Self::read(&mut cursor)
    }

    /// Decodes a document from the start of `bytes`.
    ///
    /// # Errors
    ///
    /// See [`Document::read`].
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        Self::read(&mut ByteCursor::from_bytes(bytes))
    }

    /// Returns every collection in the document, in order.
    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        match self {
            Self::Catalog(catalog) => catalog.collections(),
            Self::Collection(collection) => std::slice::from_ref(collection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodecError, Entity, Version};

    #[test]
    fn sniffs_catalog() {
        let catalog = Catalog::new().with_collection(Collection::new("c"));
        let doc = Document::from_bytes(&catalog.to_bytes().unwrap()).unwrap();
        assert_eq!(doc, Document::Catalog(catalog));
    }

    #[test]
    fn sniffs_bare_collection() {
        for version in [Version::V1_0, Version::V2_0] {
            let collection = Collection::with_version("solo", version).with_entity(Entity::new("e"));
            let doc = Document::from_bytes(&collection.to_bytes().unwrap()).unwrap();
            assert_eq!(doc.collections(), std::slice::from_ref(&collection));
            assert_eq!(doc, Document::Collection(collection));
        }
    }

    #[test]
    fn garbage_is_not_a_collection() {
        assert!(matches!(
            Document::from_bytes(&[0x00, 0x07, 0, 0]),
            Err(CodecError::InvalidVersion(7))
        ));
        assert!(matches!(
            Document::from_bytes(&[0x52]),
            Err(CodecError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.db");
        let collection = Collection::new("disk");
        collection.save(&path).unwrap();
        assert_eq!(
            Document::load(&path).unwrap(),
            Document::Collection(collection)
        );
        assert!(matches!(
            Document::load(dir.path().join("missing.db")),
            Err(CodecError::Io(_))
        ));
    }
}
