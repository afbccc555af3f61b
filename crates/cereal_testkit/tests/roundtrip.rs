//! End-to-end round trips across the whole document model.

use cereal_codec::{ByteCursor, Catalog, Collection, Document, Version};
use cereal_testkit::prelude::*;

#[test]
fn sample_catalog_end_to_end() {
    let catalog = sample_catalog();
    let mut cursor = ByteCursor::with_capacity(catalog.size().unwrap());
    catalog.write(&mut cursor).unwrap();
    assert_eq!(cursor.remaining(), 0);

    cursor.set_position(0).unwrap();
    let fresh = Catalog::read(&mut cursor).unwrap();
    let obj = fresh
        .get_collection("Test")
        .and_then(|c| c.get_entity("Obj"))
        .unwrap();
    assert_eq!(obj.get_field("pi").unwrap().as_double().unwrap(), 3.141_592_65);
    assert_eq!(
        obj.get_array("words").unwrap().as_strings().unwrap(),
        ["alpha", "beta"]
    );
}

#[test]
fn every_type_survives_both_versions() {
    for version in [Version::V1_0, Version::V2_0] {
        let collection = Collection::with_version("types", version).with_entity(every_type_entity());
        assert_roundtrip(&collection);
    }
}

#[test]
fn three_collections_land_on_their_offsets() {
    let catalog = three_collection_catalog();
    let bytes = assert_roundtrip(&catalog);

    let mut start = 3 + 4 * catalog.collections().len();
    for (i, collection) in catalog.collections().iter().enumerate() {
        let at = 3 + 4 * i;
        let offset = u32::from_be_bytes(bytes[at..at + 4].try_into().unwrap()) as usize;
        assert_eq!(offset, start);

        let mut cursor = ByteCursor::from_bytes(bytes.clone());
        cursor.set_position(offset).unwrap();
        assert_eq!(&Collection::read(&mut cursor).unwrap(), collection);
        start += collection.size().unwrap();
    }
}

#[test]
fn files_round_trip_and_sniff() {
    let files = TempFiles::new();

    let catalog_path = files.save_catalog("catalog.cereal", &sample_catalog()).unwrap();
    assert_eq!(
        Document::load(&catalog_path).unwrap(),
        Document::Catalog(sample_catalog())
    );

    let legacy = sample_collection(Version::V1_0);
    let legacy_path = files.file("legacy.cereal");
    legacy.save(&legacy_path).unwrap();
    assert_eq!(
        Document::load(&legacy_path).unwrap(),
        Document::Collection(legacy)
    );
}

#[test]
fn saved_file_is_exactly_the_written_prefix() {
    let files = TempFiles::new();
    let catalog = sample_catalog();
    let mut cursor = ByteCursor::with_capacity(catalog.size().unwrap() + 64);
    catalog.write(&mut cursor).unwrap();
    let path = files.file("prefix.cereal");
    cursor.save_to_file(&path).unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk.len(), catalog.size().unwrap());
    assert_eq!(Catalog::from_bytes(&on_disk).unwrap(), catalog);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_catalog_round_trip(catalog in catalog_strategy()) {
        let bytes = catalog.to_bytes().unwrap();
        prop_assert_eq!(bytes.len(), catalog.size().unwrap());
        prop_assert_eq!(Catalog::from_bytes(&bytes).unwrap(), catalog);
    }

    #[test]
    fn prop_collection_round_trip(collection in collection_strategy()) {
        let decoded = Collection::from_bytes(&collection.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(decoded, collection);
    }
}
