//! Test fixtures and file helpers.
//!
//! Provides the sample documents used across the workspace tests and a
//! temporary directory wrapper for load/save scenarios.

use cereal_codec::{
    ArrayField, Catalog, CodecResult, Collection, Decode, Encode, Entity, Field, Version,
};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The sample entity: `"Obj"` with `pi = 3.14159265` and
/// `words = ["alpha", "beta"]`.
pub fn sample_entity() -> Entity {
    Entity::new("Obj")
        .with_field(Field::new("pi", 3.141_592_65_f64))
        .with_array(
            ArrayField::from_strs("words", &["alpha", "beta"]).expect("Sample array is valid"),
        )
}

/// A collection named `"Test"` holding [`sample_entity`].
pub fn sample_collection(version: Version) -> Collection {
    Collection::with_version("Test", version).with_entity(sample_entity())
}

/// A catalog holding one [`sample_collection`] at the latest version.
pub fn sample_catalog() -> Catalog {
    Catalog::new().with_collection(sample_collection(Version::LATEST))
}

/// An entity with one field and one array of every value type.
pub fn every_type_entity() -> Entity {
    Entity::new("AllTypes")
        .with_field(Field::new("bool", true))
        .with_field(Field::new("byte", b'c'))
        .with_field(Field::new("short", i16::MIN))
        .with_field(Field::new("int", -1_i32))
        .with_field(Field::new("long", i64::MAX))
        .with_field(Field::new("float", 0.5_f32))
        .with_field(Field::new("double", -2.25_f64))
        .with_field(Field::new("string", "héllo"))
        .with_array(ArrayField::new("bools", &[true, false, true]).expect("valid"))
        .with_array(ArrayField::new("bytes", b"xyz".as_slice()).expect("valid"))
        .with_array(ArrayField::new("shorts", &[1_i16, -1]).expect("valid"))
        .with_array(ArrayField::new("ints", &[i32::MIN, 0, i32::MAX]).expect("valid"))
        .with_array(ArrayField::new("longs", &[7_i64]).expect("valid"))
        .with_array(ArrayField::new("floats", &[1.5_f32, -0.0]).expect("valid"))
        .with_array(ArrayField::new("doubles", &[f64::MAX, f64::MIN_POSITIVE]).expect("valid"))
        .with_array(ArrayField::from_strs("strings", &["", "a", "ünï"]).expect("valid"))
}

/// A catalog with three collections: V2_0, V1_0 and an empty V2_0.
pub fn three_collection_catalog() -> Catalog {
    Catalog::new()
        .with_collection(sample_collection(Version::V2_0))
        .with_collection(
            Collection::with_version("Legacy", Version::V1_0).with_entity(every_type_entity()),
        )
        .with_collection(Collection::new("Empty"))
}

/// Encodes, decodes and asserts equality. Returns the encoded bytes.
pub fn assert_roundtrip<T>(value: &T) -> Vec<u8>
where
    T: Encode + Decode + PartialEq + Debug,
{
    let bytes = value.encode().expect("Encoding failed");
    let decoded = T::decode(&bytes).expect("Decoding failed");
    assert_eq!(&decoded, value, "Round trip changed the value");
    bytes
}

/// A temporary directory for file-based tests, removed on drop.
pub struct TempFiles {
    dir: TempDir,
}

impl TempFiles {
    /// Creates a new temporary directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the path of a file inside the directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes raw bytes to a file inside the directory and returns its path.
    pub fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.file(name);
        std::fs::write(&path, bytes).expect("Failed to write temp file");
        path
    }

    /// Saves a catalog to a file inside the directory and returns its path.
    pub fn save_catalog(&self, name: &str, catalog: &Catalog) -> CodecResult<PathBuf> {
        let path = self.file(name);
        catalog.save(&path)?;
        Ok(path)
    }
}

impl Default for TempFiles {
    fn default() -> Self {
        Self::new()
    }
}
