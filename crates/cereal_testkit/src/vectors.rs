//! Hand-checked byte vectors for the cereal wire format.
//!
//! Other implementations of the format can load [`all_vectors_json`] and
//! check they produce and reject the same bytes.

use serde::{Deserialize, Serialize};

/// A wire-format test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Top-level shape to decode as: `catalog`, `collection` or `document`.
    pub decode_as: String,
    /// Encoded bytes (hex).
    pub input_hex: String,
    /// Expected error variant name, if decoding must fail.
    pub expected_error: Option<String>,
}

fn vector(id: &str, description: &str, decode_as: &str, hex: &str, error: Option<&str>) -> TestVector {
    TestVector {
        id: id.into(),
        description: description.into(),
        decode_as: decode_as.into(),
        input_hex: hex.into(),
        expected_error: error.map(Into::into),
    }
}

/// Valid encodings that must decode and re-encode to the same bytes.
pub fn valid_vectors() -> Vec<TestVector> {
    vec![
        vector(
            "collection_v1_empty",
            "Empty V1_0 collection \"db\"",
            "collection",
            "0001000264620000000c0000",
            None,
        ),
        vector(
            "collection_v2_empty",
            "Empty V2_0 collection \"db\"",
            "collection",
            "000200026462ade402d3000000100000",
            None,
        ),
        vector(
            "collection_v2_int_field",
            "V2_0 collection \"c\" with entity \"e\" holding int n = 5",
            "collection",
            "0002000163cf27f7c60000002000010900016500010b00016e04000000050000",
            None,
        ),
        vector("catalog_empty", "Catalog with no collections", "catalog", "524d00", None),
        vector(
            "catalog_one_collection",
            "Catalog holding the empty V2_0 collection \"db\" at offset 7",
            "catalog",
            "524d0100000007000200026462ade402d3000000100000",
            None,
        ),
    ]
}

/// Malformed encodings that must be rejected with a specific error.
pub fn invalid_vectors() -> Vec<TestVector> {
    vec![
        vector(
            "collection_v2_payload_flip",
            "Last entity byte altered; the checksum no longer matches",
            "collection",
            "0002000163cf27f7c60000002000010900016500010b00016e04000000050001",
            Some("ChecksumMismatch"),
        ),
        vector(
            "collection_v2_truncated",
            "Empty V2_0 collection missing its last byte",
            "collection",
            "000200026462ade402d30000001000",
            Some("UnexpectedEof"),
        ),
        vector(
            "collection_version_3",
            "Version newer than the latest supported",
            "collection",
            "0003000264620000000c0000",
            Some("InvalidVersion"),
        ),
        vector(
            "document_version_0",
            "A document that is neither a catalog nor a valid collection",
            "document",
            "0000000264620000000c0000",
            Some("InvalidVersion"),
        ),
        vector(
            "catalog_bad_magic",
            "Catalog header with the wrong magic",
            "catalog",
            "524e00",
            Some("BadMagic"),
        ),
        vector(
            "catalog_offset_mismatch",
            "Offset table points one byte past the collection",
            "catalog",
            "524d0100000008000200026462ade402d3000000100000",
            Some("OffsetMismatch"),
        ),
    ]
}

/// Returns all vectors as JSON.
pub fn all_vectors_json() -> String {
    let all: Vec<_> = valid_vectors().into_iter().chain(invalid_vectors()).collect();
    serde_json::to_string_pretty(&all).expect("Vectors serialize")
}

/// Decodes a lowercase or uppercase hex string.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    assert!(hex.len() % 2 == 0, "Odd-length hex string");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex digit"))
        .collect()
}

/// Encodes bytes as lowercase hex.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
