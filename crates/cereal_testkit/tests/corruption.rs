//! Corrupted and truncated input is rejected, never misread.

use cereal_codec::{crc32, Catalog, CodecError, Collection, Document, Version};
use cereal_testkit::prelude::*;

/// First byte covered by the checksum of a V2_0 collection named `name`.
fn covered_start(name: &str) -> usize {
    2 + 2 + name.len() + 4
}

#[test]
fn every_single_bit_flip_in_a_v2_payload_is_caught() {
    let bytes = sample_collection(Version::V2_0).to_bytes().unwrap();
    for i in covered_start("Test")..bytes.len() {
        for bit in 0..8 {
            let mut corrupt = bytes.clone();
            corrupt[i] ^= 1 << bit;
            assert!(
                Collection::from_bytes(&corrupt).is_err(),
                "flip of bit {bit} at byte {i} decoded"
            );
        }
    }
}

#[test]
fn checksum_covers_only_size_count_and_entities() {
    let bytes = sample_collection(Version::V2_0).to_bytes().unwrap();
    let start = covered_start("Test");
    let stored = u32::from_be_bytes(bytes[start - 4..start].try_into().unwrap());
    assert_eq!(stored, crc32(&bytes[start..]));
}

#[test]
fn every_truncation_fails_cleanly() {
    for bytes in [
        sample_catalog().to_bytes().unwrap(),
        sample_collection(Version::V1_0).to_bytes().unwrap(),
        three_collection_catalog().to_bytes().unwrap(),
    ] {
        for len in 0..bytes.len() {
            assert!(
                Document::from_bytes(&bytes[..len]).is_err(),
                "prefix of {len} bytes decoded"
            );
        }
    }
}

#[test]
fn corrupt_file_on_disk_reports_checksum_mismatch() {
    let files = TempFiles::new();
    let mut bytes = sample_catalog().to_bytes().unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x10;
    let path = files.write("corrupt.cereal", &bytes);

    assert!(matches!(
        Catalog::load(&path),
        Err(CodecError::ChecksumMismatch { .. })
    ));
}

#[test]
fn unknown_versions_are_rejected() {
    let mut bytes = sample_collection(Version::V2_0).to_bytes().unwrap();
    bytes[1] = Version::LATEST.as_u16() as u8 + 1;
    assert!(matches!(
        Collection::from_bytes(&bytes),
        Err(CodecError::InvalidVersion(3))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_random_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = Document::from_bytes(&bytes);
        let _ = Catalog::from_bytes(&bytes);
    }

    #[test]
    fn prop_payload_flip_is_detected(
        collection in collection_strategy().prop_filter("V2_0 only", |c| c.version() == Version::V2_0),
        index in any::<prop::sample::Index>(),
        bit in 0_u8..8,
    ) {
        let bytes = collection.to_bytes().unwrap();
        let start = covered_start(collection.name());
        let i = start + index.index(bytes.len() - start);
        let mut corrupt = bytes;
        corrupt[i] ^= 1 << bit;
        prop_assert!(Collection::from_bytes(&corrupt).is_err());
    }
}
