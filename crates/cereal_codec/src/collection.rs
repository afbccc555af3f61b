//! Versioned collections of entities.
//!
//! Two wire versions exist:
//!
//! ```text
//! V1_0: | version=1 (2) | name (2 + n) | size (4) | entity count (2) | entities... |
//! V2_0: | version=2 (2) | name (2 + n) | crc32 (4) | size (4) | entity count (2) | entities... |
//! ```
//!
//! `size` is the total encoded size of the collection, including the version
//! tag and the size field itself. In V2_0 the CRC-32 covers everything from
//! the size field to the end of the last entity; the version tag, name and
//! checksum field are outside the covered range.
//!
//! V1_0 has no integrity check: its size field is written but only skipped
//! on read.

use crate::checksum::crc32;
use crate::cursor::{encoded_string_len, string_len, ByteCursor};
use crate::entity::Entity;
use crate::error::{check_count, CodecError, CodecResult};
use crate::MAX_ENTITIES;
use std::fmt;
use std::path::Path;

/// Collection wire version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u16)]
pub enum Version {
    /// Never valid on the wire.
    #[default]
    Invalid = 0,
    /// No checksum.
    V1_0 = 1,
    /// CRC-32 over the payload.
    V2_0 = 2,
}

impl Version {
    /// The newest supported version.
    pub const LATEST: Self = Self::V2_0;

    /// Converts a wire value to a usable version.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidVersion`] for `0` and anything newer than
    /// [`Version::LATEST`].
    pub fn from_wire(value: u16) -> CodecResult<Self> {
        match value {
            1 => Ok(Self::V1_0),
            2 => Ok(Self::V2_0),
            other => Err(CodecError::InvalidVersion(other)),
        }
    }

    /// Converts the version to its wire value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Fails with [`CodecError::InvalidVersion`] for [`Version::Invalid`].
    fn ensure_valid(self) -> CodecResult<()> {
        match self {
            Self::Invalid => Err(CodecError::InvalidVersion(self.as_u16())),
            Self::V1_0 | Self::V2_0 => Ok(()),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => f.write_str("invalid"),
            Self::V1_0 => f.write_str("1.0"),
            Self::V2_0 => f.write_str("2.0"),
        }
    }
}

/// A named, versioned, ordered list of entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    name: String,
    version: Version,
    entities: Vec<Entity>,
}

impl Collection {
    /// Creates an empty collection at [`Version::LATEST`].
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_version(name, Version::LATEST)
    }

    /// Creates an empty collection at the given version.
    pub fn with_version(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            entities: Vec::new(),
        }
    }

    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the collection. Empty names are ignored.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() {
            self.name = name;
        }
    }

    /// Returns the wire version.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Changes the wire version used by the next write.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Appends an entity.
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Builder-style [`Collection::add_entity`].
    #[must_use]
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.add_entity(entity);
        self
    }

    /// Returns all entities in order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns the first entity with the given name.
    #[must_use]
    pub fn get_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name() == name)
    }

    /// Returns the first entity with the given name, mutably.
    pub fn get_entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.name() == name)
    }

    /// Bytes between the start of the collection and its size field.
    fn prefix_len(&self) -> usize {
        let checksum = match self.version {
            Version::V2_0 => 4,
            Version::V1_0 | Version::Invalid => 0,
        };
        2 + encoded_string_len(&self.name) + checksum
    }

    /// Returns the exact number of bytes [`Collection::write`] produces.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidVersion`] if the version is `Invalid`.
    pub fn size(&self) -> CodecResult<usize> {
        self.version.ensure_valid()?;
        Ok(self.prefix_len()
            + 4
            + 2
            + self.entities.iter().map(Entity::size).sum::<usize>())
    }

    /// Checks version, counts and lengths of the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidVersion`] or [`CodecError::CountOverflow`].
    pub fn validate(&self) -> CodecResult<()> {
        self.version.ensure_valid()?;
        string_len(&self.name)?;
        check_count("entities", self.entities.len(), MAX_ENTITIES)?;
        self.entities.iter().try_for_each(Entity::validate)?;
        check_count("collection bytes", self.size()?, u32::MAX as usize)
    }

    /// Serializes the collection.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidVersion`], [`CodecError::CountOverflow`]
    /// or [`CodecError::InsufficientSpace`]. Nothing is written on failure.
    pub fn write(&self, cursor: &mut ByteCursor) -> CodecResult<()> {
        self.validate()?;
        let size = self.size()?;
        cursor.ensure_space(size)?;
        self.emit(cursor, size)
    }

    pub(crate) fn emit(&self, cursor: &mut ByteCursor, size: usize) -> CodecResult<()> {
        // Both fit: validate() ran first.
        let total = size as u32;
        let count = self.entities.len() as u16;

        cursor.write_u16(self.version.as_u16())?;
        cursor.write_string(&self.name)?;

        match self.version {
            Version::V1_0 => {
                cursor.write_u32(total)?;
                cursor.write_u16(count)?;
                for entity in &self.entities {
                    entity.emit(cursor)?;
                }
            }
            Version::V2_0 => {
                let mut scratch = ByteCursor::with_capacity(size - self.prefix_len());
                scratch.write_u32(total)?;
                scratch.write_u16(count)?;
                for entity in &self.entities {
                    entity.emit(&mut scratch)?;
                }
                let checksum = crc32(scratch.written());
                cursor.write_u32(checksum)?;
                cursor.copy_from_cursor(&scratch)?;
            }
            Version::Invalid => return Err(CodecError::InvalidVersion(self.version.as_u16())),
        }

        tracing::debug!(
            collection = %self.name,
            version = %self.version,
            entities = count,
            bytes = size,
            "wrote collection"
        );
        Ok(())
    }

    /// Deserializes a collection.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidVersion`] for an unknown version,
    /// [`CodecError::ChecksumMismatch`] if a V2_0 payload is corrupt, or
    /// [`CodecError::UnexpectedEof`] on truncated input.
    pub fn read(cursor: &mut ByteCursor) -> CodecResult<Self> {
        let start = cursor.position();
        let version = Version::from_wire(cursor.read_u16()?)?;
        let name = cursor.read_string()?;

        if version == Version::V2_0 {
            let stored = cursor.read_u32()?;
            verify_checksum(cursor, start, stored)?;
        }

        // Informational only; V2_0 has already used it to bound the checksum.
        let _size = cursor.read_u32()?;
        let count = cursor.read_u16()?;
        let mut entities = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            entities.push(Entity::read(cursor)?);
        }

        tracing::debug!(
            collection = %name,
            version = %version,
            entities = count,
            bytes = cursor.position() - start,
            "read collection"
        );
        Ok(Self {
            name,
            version,
            entities,
        })
    }

    /// Encodes the collection into an exactly-sized buffer.
    ///
    /// # Errors
    ///
    /// See [`Collection::write`].
    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut cursor = ByteCursor::with_capacity(self.size()?);
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Decodes a collection from the start of `bytes`.
    ///
    /// # Errors
    ///
    /// See [`Collection::read`].
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        Self::read(&mut ByteCursor::from_bytes(bytes))
    }

    /// Writes the collection to a file.
    ///
    /// # Errors
    ///
    /// See [`Collection::write`]; also fails on I/O errors.
    pub fn save(&self, path: impl AsRef<Path>) -> CodecResult<()> {
        let mut cursor = ByteCursor::with_capacity(self.size()?);
        self.write(&mut cursor)?;
        cursor.save_to_file(path)
    }
}

/// Recomputes the V2_0 checksum. The cursor sits on the size field, which is
/// where the covered range begins; it is left there.
fn verify_checksum(cursor: &mut ByteCursor, start: usize, stored: u32) -> CodecResult<()> {
    let covered_start = cursor.position();
    let total = cursor.read_u32()? as usize;
    cursor.set_position(covered_start)?;

    let prefix = covered_start - start;
    let covered_len = total.checked_sub(prefix).ok_or_else(|| {
        CodecError::invalid_structure(format!(
            "collection size {total} is smaller than its {prefix}-byte header"
        ))
    })?;
    let computed = crc32(cursor.peek_bytes(covered_len)?);
    if computed != stored {
        tracing::warn!(stored, computed, "collection checksum mismatch");
        return Err(CodecError::ChecksumMismatch { stored, computed });
    }
    Ok(())
}
