//! # Cereal Codec
//!
//! Compact, versioned, integrity-checked binary encoding for a four-level
//! document model.
//!
//! ```text
//! Catalog ── up to 255 Collections (offset table, "RM" magic)
//!   Collection ── name, version, up to 65 535 Entities (CRC-32 in V2_0)
//!     Entity ── name, Fields, then ArrayFields
//!       Field      ── name + one scalar
//!       ArrayField ── name + homogeneous scalar array
//! ```
//!
//! ## Wire rules
//!
//! - All multi-byte integers are big-endian; floats are their IEEE-754 bits.
//! - Strings are a `u16` length followed by one byte per character
//!   (U+0000 to U+00FF).
//! - Every container can report its exact encoded `size()` up front, and
//!   every `write` checks counts and available space before emitting a byte.
//! - Every `read` is bounds checked and fails with
//!   [`CodecError::UnexpectedEof`] on truncated input.
//! - Version 2 collections carry a CRC-32 over their size, count and
//!   entities; a mismatch fails with [`CodecError::ChecksumMismatch`].
//!
//! ## Usage
//!
//! ```
//! use cereal_codec::{ArrayField, Catalog, Collection, Decode, Encode, Entity, Field};
//!
//! let catalog = Catalog::new().with_collection(
//!     Collection::new("Test").with_entity(
//!         Entity::new("Obj")
//!             .with_field(Field::new("pi", 3.14159265_f64))
//!             .with_array(ArrayField::from_strs("words", &["alpha", "beta"]).unwrap()),
//!     ),
//! );
//!
//! let bytes = catalog.encode().unwrap();
//! let decoded = Catalog::decode(&bytes).unwrap();
//!
//! let obj = decoded.get_collection("Test").unwrap().get_entity("Obj").unwrap();
//! assert_eq!(obj.get_field("pi").unwrap().as_double().unwrap(), 3.14159265);
//! assert_eq!(obj.get_array("words").unwrap().as_strings().unwrap(), ["alpha", "beta"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod array;
mod catalog;
mod checksum;
mod collection;
mod cursor;
mod document;
mod entity;
mod error;
mod field;
mod scalar;

pub use array::{ArrayField, ArrayItem};
pub use catalog::{Catalog, CATALOG_MAGIC};
pub use checksum::crc32;
pub use collection::{Collection, Version};
pub use cursor::{encoded_string_len, ByteCursor};
pub use document::Document;
pub use entity::Entity;
pub use error::{CodecError, CodecResult};
pub use field::Field;
pub use scalar::{Scalar, ScalarType};

/// Longest string (name or value) in characters.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Most fields one entity can hold.
pub const MAX_FIELDS: usize = u16::MAX as usize;

/// Most arrays one entity can hold.
pub const MAX_ARRAYS: usize = u16::MAX as usize;

/// Most entities one collection can hold.
pub const MAX_ENTITIES: usize = u16::MAX as usize;

/// Most collections one catalog can hold.
pub const MAX_COLLECTIONS: usize = u8::MAX as usize;

/// Most items one array can hold.
pub const MAX_ARRAY_ITEMS: usize = u32::MAX as usize;

/// Types that encode to a standalone byte vector.
pub trait Encode {
    /// Encode this value into an exactly-sized buffer.
    fn encode(&self) -> CodecResult<Vec<u8>>;
}

/// Types that decode from a standalone byte slice.
pub trait Decode: Sized {
    /// Decode a value from the start of `bytes`.
    fn decode(bytes: &[u8]) -> CodecResult<Self>;
}

impl Encode for Catalog {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        self.to_bytes()
    }
}

impl Decode for Catalog {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        Self::from_bytes(bytes)
    }
}

impl Encode for Collection {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        self.to_bytes()
    }
}

impl Decode for Collection {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        Self::from_bytes(bytes)
    }
}

impl Encode for Document {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        match self {
            Self::Catalog(catalog) => catalog.to_bytes(),
            Self::Collection(collection) => collection.to_bytes(),
        }
    }
}

impl Decode for Document {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_match_wire_slots() {
        assert_eq!(MAX_STRING_LEN, 65_535);
        assert_eq!(MAX_ENTITIES, 65_535);
        assert_eq!(MAX_COLLECTIONS, 255);
        assert_eq!(CATALOG_MAGIC.to_be_bytes(), *b"RM");
    }

    #[test]
    fn document_encode_matches_inner() {
        let collection = Collection::with_version("c", Version::V1_0);
        let doc = Document::Collection(collection.clone());
        assert_eq!(doc.encode().unwrap(), collection.encode().unwrap());
        assert_eq!(Document::decode(&doc.encode().unwrap()).unwrap(), doc);
    }

    #[test]
    fn traits_round_trip() {
        let catalog = Catalog::new().with_collection(Collection::new("a"));
        assert_eq!(Catalog::decode(&catalog.encode().unwrap()).unwrap(), catalog);
    }
}
