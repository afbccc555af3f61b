//! Top-level catalog of collections.
//!
//! ```text
//! | magic "RM" (2) | count (1) | count x offset (4) | collections... |
//! ```
//!
//! Each offset is the cursor position at which the matching collection
//! starts. Collections are laid out back to back right after the offset
//! table, so the offsets are fully determined by the collection sizes.

use crate::collection::Collection;
use crate::cursor::ByteCursor;
use crate::error::{check_count, CodecError, CodecResult};
use crate::MAX_COLLECTIONS;
use std::path::Path;

/// Magic number at the start of every catalog (`"RM"`).
pub const CATALOG_MAGIC: u16 = 0x524D;

/// An ordered list of at most 255 collections.
///
/// # Example
///
/// ```rust
/// use cereal_codec::{Catalog, Collection, Entity, Field};
///
/// let catalog = Catalog::new().with_collection(
///     Collection::new("Test").with_entity(Entity::new("Obj").with_field(Field::new("n", 7_i32))),
/// );
/// let bytes = catalog.to_bytes().unwrap();
/// assert_eq!(&bytes[..2], b"RM");
///
/// let decoded = Catalog::from_bytes(&bytes).unwrap();
/// let obj = decoded.get_collection("Test").unwrap().get_entity("Obj").unwrap();
/// assert_eq!(obj.get_field("n").unwrap().as_int().unwrap(), 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    collections: Vec<Collection>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a collection.
    pub fn add_collection(&mut self, collection: Collection) {
        self.collections.push(collection);
    }

    /// Builder-style [`Catalog::add_collection`].
    #[must_use]
    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.add_collection(collection);
        self
    }

    /// Returns all collections in order.
    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Returns the first collection with the given name.
    #[must_use]
    pub fn get_collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name() == name)
    }

    /// Returns the first collection with the given name, mutably.
    pub fn get_collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.name() == name)
    }

    fn header_len(&self) -> usize {
        2 + 1 + 4 * self.collections.len()
    }

    /// Returns the exact number of bytes [`Catalog::write`] produces.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidVersion`] if any collection has an
    /// invalid version.
    pub fn size(&self) -> CodecResult<usize> {
        let mut total = self.header_len();
        for collection in &self.collections {
            total += collection.size()?;
        }
        Ok(total)
    }

    /// Checks the collection count and every collection.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CountOverflow`] for more than 255 collections,
    /// or the first error any collection reports.
    pub fn validate(&self) -> CodecResult<()> {
        check_count("collections", self.collections.len(), MAX_COLLECTIONS)?;
        self.collections.iter().try_for_each(Collection::validate)
    }

    /// Serializes the catalog at the cursor's current position.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CountOverflow`], [`CodecError::InvalidVersion`]
    /// or [`CodecError::InsufficientSpace`]. Nothing is written on failure.
    pub fn write(&self, cursor: &mut ByteCursor) -> CodecResult<()> {
        self.validate()?;
        let sizes = self
            .collections
            .iter()
            .map(Collection::size)
            .collect::<CodecResult<Vec<_>>>()?;
        let total = self.header_len() + sizes.iter().sum::<usize>();
        cursor.ensure_space(total)?;

        let base = cursor.position();
        let mut offset = base + self.header_len();
        check_count("catalog offset", base + total, u32::MAX as usize)?;

        cursor.write_u16(CATALOG_MAGIC)?;
        // Fits: validate() ran first.
        cursor.write_u8(self.collections.len() as u8)?;
        for size in &sizes {
            cursor.write_u32(offset as u32)?;
            offset += size;
        }
        for (collection, size) in self.collections.iter().zip(sizes) {
            collection.emit(cursor, size)?;
        }

        tracing::debug!(
            collections = self.collections.len(),
            bytes = total,
            "wrote catalog"
        );
        Ok(())
    }

    /// Deserializes a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::BadMagic`] if the stream does not start with
    /// [`CATALOG_MAGIC`], [`CodecError::OffsetMismatch`] if the offset table
    /// disagrees with where the collections actually start, or any error
    /// raised while reading a collection.
    pub fn read(cursor: &mut ByteCursor) -> CodecResult<Self> {
        let magic = cursor.read_u16()?;
        if magic != CATALOG_MAGIC {
            return Err(CodecError::BadMagic(magic));
        }

        let count = cursor.read_u8()?;
        let mut offsets = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            offsets.push(cursor.read_u32()? as usize);
        }

        let mut collections = Vec::with_capacity(offsets.len());
        for expected in offsets {
            let actual = cursor.position();
            if actual != expected {
                return Err(CodecError::OffsetMismatch { expected, actual });
            }
            collections.push(Collection::read(cursor)?);
        }

        tracing::debug!(collections = count, "read catalog");
        Ok(Self { collections })
    }

    /// Encodes the catalog into an exactly-sized buffer.
    ///
    /// # Errors
    ///
    /// See [`Catalog::write`].
    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut cursor = ByteCursor::with_capacity(self.size()?);
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Decodes a catalog from the start of `bytes`.
    ///
    /// # Errors
    ///
    /// See [`Catalog::read`].
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        Self::read(&mut ByteCursor::from_bytes(bytes))
    }

    /// Writes the catalog to a file.
    ///
    /// # Errors
    ///
    /// See [`Catalog::write`]; also fails on I/O errors.
    pub fn save(&self, path: impl AsRef<Path>) -> CodecResult<()> {
        let mut cursor = ByteCursor::with_capacity(self.size()?);
        self.write(&mut cursor)?;
        cursor.save_to_file(path)
    }

    /// Reads a catalog from a file.
    ///
    /// # Errors
    ///
    /// See [`Catalog::read`]; also fails on I/O errors.
    pub fn load(path: impl AsRef<Path>) -> CodecResult<Self> {
        Self::read(&mut ByteCursor::open(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayField, Entity, Field, Version};

    fn three() -> Catalog {
        Catalog::new()
            .with_collection(
                Collection::new("a")
                    .with_entity(Entity::new("x").with_field(Field::new("n", 1_u8))),
            )
            .with_collection(Collection::with_version("bb", Version::V1_0))
            .with_collection(
                Collection::new("ccc")
                    .with_entity(Entity::new("y"))
                    .with_entity(Entity::new("z").with_field(Field::new("s", "long text"))),
            )
    }

    #[test]
    fn offsets_match_collection_starts() {
        let catalog = three();
        let bytes = catalog.to_bytes().unwrap();
        assert_eq!(&bytes[..3], &[0x52, 0x4D, 3]);

        let mut expected = 3 + 3 * 4;
        for (i, collection) in catalog.collections().iter().enumerate() {
            let at = 3 + i * 4;
            let offset = u32::from_be_bytes(bytes[at..at + 4].try_into().unwrap()) as usize;
            assert_eq!(offset, expected);
            let decoded = Collection::from_bytes(&bytes[offset..]).unwrap();
            assert_eq!(&decoded, collection);
            expected += collection.size().unwrap();
        }
        assert_eq!(expected, bytes.len());
    }

    #[test]
    fn end_to_end() {
        let catalog = Catalog::new().with_collection(
            Collection::new("Test").with_entity(
                Entity::new("Obj")
                    .with_field(Field::new("pi", 3.141_592_65_f64))
                    .with_array(ArrayField::from_strs("words", &["alpha", "beta"]).unwrap()),
            ),
        );
        let mut cursor = ByteCursor::with_capacity(catalog.size().unwrap());
        catalog.write(&mut cursor).unwrap();

        cursor.set_position(0).unwrap();
        let fresh = Catalog::read(&mut cursor).unwrap();
        let collection = fresh.get_collection("Test").unwrap();
        assert_eq!(collection.version(), Version::LATEST);
        let obj = collection.get_entity("Obj").unwrap();
        assert_eq!(obj.get_field("pi").unwrap().as_double().unwrap(), 3.141_592_65);
        assert_eq!(
            obj.get_array("words").unwrap().as_strings().unwrap(),
            vec!["alpha", "beta"]
        );
        assert_eq!(fresh, catalog);
    }

    #[test]
    fn empty_catalog() {
        let bytes = Catalog::new().to_bytes().unwrap();
        assert_eq!(bytes, vec![0x52, 0x4D, 0]);
        assert!(Catalog::from_bytes(&bytes).unwrap().collections().is_empty());
    }

    #[test]
    fn bad_magic() {
        let mut bytes = three().to_bytes().unwrap();
        bytes[0] = 0;
        assert!(matches!(
            Catalog::from_bytes(&bytes),
            Err(CodecError::BadMagic(0x004D))
        ));
    }

    #[test]
    fn edited_offset_is_rejected() {
        let mut bytes = three().to_bytes().unwrap();
        // Second offset entry.
        bytes[10] = bytes[10].wrapping_add(1);
        assert!(matches!(
            Catalog::from_bytes(&bytes),
            Err(CodecError::OffsetMismatch { .. })
        ));
    }

    #[test]
    fn written_after_a_prefix() {
        let catalog = three();
        let mut cursor = ByteCursor::with_capacity(8 + catalog.size().unwrap());
        cursor.write_u64(0xDEAD_BEEF).unwrap();
        catalog.write(&mut cursor).unwrap();

        cursor.set_position(8).unwrap();
        assert_eq!(Catalog::read(&mut cursor).unwrap(), catalog);
    }

    #[test]
    fn too_many_collections_fails_before_writing() {
        let mut catalog = Catalog::new();
        for i in 0..=MAX_COLLECTIONS {
            catalog.add_collection(Collection::new(format!("c{i}")));
        }
        let mut cursor = ByteCursor::with_capacity(catalog.size().unwrap());
        assert!(matches!(
            catalog.write(&mut cursor),
            Err(CodecError::CountOverflow {
                what: "collections",
                ..
            })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn max_collections_round_trip() {
        let mut catalog = Catalog::new();
        for i in 0..MAX_COLLECTIONS {
            catalog.add_collection(Collection::with_version(format!("c{i}"), Version::V1_0));
        }
        let decoded = Catalog::from_bytes(&catalog.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.collections().len(), MAX_COLLECTIONS);
    }

    #[test]
    fn insufficient_space_writes_nothing() {
        let catalog = three();
        let mut cursor = ByteCursor::with_capacity(catalog.size().unwrap() - 1);
        assert!(matches!(
            catalog.write(&mut cursor),
            Err(CodecError::InsufficientSpace { .. })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn corrupt_collection_surfaces_checksum_error() {
        let catalog = three();
        let mut bytes = catalog.to_bytes().unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x40;
        assert!(matches!(
            Catalog::from_bytes(&bytes),
            Err(CodecError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn first_match_lookup_and_mutation() {
        let mut catalog = Catalog::new()
            .with_collection(Collection::new("dup"))
            .with_collection(Collection::with_version("dup", Version::V1_0));
        assert_eq!(catalog.get_collection("dup").unwrap().version(), Version::V2_0);
        catalog.get_collection_mut("dup").unwrap().set_name("first");
        assert_eq!(catalog.get_collection("dup").unwrap().version(), Version::V1_0);
        assert!(catalog.get_collection("missing").is_none());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");
        let catalog = three();
        catalog.save(&path).unwrap();
        assert_eq!(
            std::fs::metadata(&path).unwrap().len() as usize,
            catalog.size().unwrap()
        );
        assert_eq!(Catalog::load(&path).unwrap(), catalog);
    }
}
