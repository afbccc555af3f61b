//! Property-based test generators using proptest.
//!
//! Every strategy produces values that are valid to write: names and strings
//! stay well under the length limit and counts stay small. Float values are
//! never NaN so generated documents compare equal to their decoded copies.

use cereal_codec::{ArrayField, Catalog, Collection, Entity, Field, Scalar, Version};
use proptest::prelude::*;

/// Strategy for generating names, including the empty name.
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_]{0,16}").expect("Invalid regex")
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[\\x20-\\x7E\\xA0-\\xFF]{0,24}").expect("Invalid regex")
}

fn f32_strategy() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("NaN", |v| !v.is_nan())
}

fn f64_strategy() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("NaN", |v| !v.is_nan())
}

/// Strategy for generating scalar values of every type.
pub fn scalar_strategy() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<bool>().prop_map(Scalar::Bool),
        any::<u8>().prop_map(Scalar::Byte),
        any::<i16>().prop_map(Scalar::Short),
        any::<i32>().prop_map(Scalar::Int),
        any::<i64>().prop_map(Scalar::Long),
        f32_strategy().prop_map(Scalar::Float),
        f64_strategy().prop_map(Scalar::Double),
        text_strategy().prop_map(Scalar::Str),
    ]
}

/// Strategy for generating fields.
pub fn field_strategy() -> impl Strategy<Value = Field> {
    (name_strategy(), scalar_strategy()).prop_map(|(name, value)| Field::new(name, value))
}

fn items<T: std::fmt::Debug>(
    element: impl Strategy<Value = T>,
) -> impl Strategy<Value = Vec<T>> {
    prop::collection::vec(element, 0..12)
}

/// Strategy for generating arrays of every item type.
pub fn array_strategy() -> impl Strategy<Value = ArrayField> {
    fn build<T: cereal_codec::ArrayItem>(name: String, items: Vec<T>) -> ArrayField {
        ArrayField::new(name, &items).expect("Generated array is within limits")
    }

    prop_oneof![
        (name_strategy(), items(any::<bool>())).prop_map(|(n, v)| build(n, v)),
        (name_strategy(), items(any::<u8>())).prop_map(|(n, v)| build(n, v)),
        (name_strategy(), items(any::<i16>())).prop_map(|(n, v)| build(n, v)),
        (name_strategy(), items(any::<i32>())).prop_map(|(n, v)| build(n, v)),
        (name_strategy(), items(any::<i64>())).prop_map(|(n, v)| build(n, v)),
        (name_strategy(), items(f32_strategy())).prop_map(|(n, v)| build(n, v)),
        (name_strategy(), items(f64_strategy())).prop_map(|(n, v)| build(n, v)),
        (name_strategy(), items(text_strategy())).prop_map(|(n, v)| build(n, v)),
    ]
}

/// Strategy for generating entities with a few fields and arrays.
pub fn entity_strategy() -> impl Strategy<Value = Entity> {
    (
        name_strategy(),
        prop::collection::vec(field_strategy(), 0..6),
        prop::collection::vec(array_strategy(), 0..4),
    )
        .prop_map(|(name, fields, arrays)| {
            let mut entity = Entity::new(name);
            fields.into_iter().for_each(|f| entity.add_field(f));
            arrays.into_iter().for_each(|a| entity.add_array(a));
            entity
        })
}

/// Strategy for generating a valid wire version.
pub fn version_strategy() -> impl Strategy<Value = Version> {
    prop_oneof![Just(Version::V1_0), Just(Version::V2_0)]
}

/// Strategy for generating collections of either version.
pub fn collection_strategy() -> impl Strategy<Value = Collection> {
    (
        name_strategy(),
        version_strategy(),
        prop::collection::vec(entity_strategy(), 0..4),
    )
        .prop_map(|(name, version, entities)| {
            let mut collection = Collection::with_version(name, version);
            entities.into_iter().for_each(|e| collection.add_entity(e));
            collection
        })
}

/// Strategy for generating catalogs.
pub fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(collection_strategy(), 0..4).prop_map(|collections| {
        let mut catalog = Catalog::new();
        collections
            .into_iter()
            .for_each(|c| catalog.add_collection(c));
        catalog
    })
}
