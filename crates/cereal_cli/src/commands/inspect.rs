//! Inspect command implementation.

use cereal_codec::{ArrayField, CodecResult, Collection, Document, Entity, Field};
use serde::Serialize;
use std::path::Path;

/// Document inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// File path.
    pub path: String,
    /// File size in bytes.
    pub file_size: usize,
    /// `catalog` or `collection`.
    pub kind: &'static str,
    /// Decoded collections, in file order.
    pub collections: Vec<CollectionReport>,
}

/// One collection in the report.
#[derive(Debug, Serialize)]
pub struct CollectionReport {
    /// Collection name.
    pub name: String,
    /// Wire version, e.g. `2.0`.
    pub version: String,
    /// Encoded size in bytes.
    pub size: usize,
    /// Entities in order.
    pub entities: Vec<EntityReport>,
}

/// One entity in the report.
#[derive(Debug, Serialize)]
pub struct EntityReport {
    /// Entity name.
    pub name: String,
    /// Fields in order.
    pub fields: Vec<FieldReport>,
    /// Arrays in order.
    pub arrays: Vec<ArrayReport>,
}

/// One field in the report.
#[derive(Debug, Serialize)]
pub struct FieldReport {
    /// Field name.
    pub name: String,
    /// Value type name.
    #[serde(rename = "type")]
    pub ty: &'static str,
    /// Rendered value.
    pub value: String,
}

/// One array in the report.
#[derive(Debug, Serialize)]
pub struct ArrayReport {
    /// Array name.
    pub name: String,
    /// Item type name.
    #[serde(rename = "type")]
    pub ty: &'static str,
    /// Number of items.
    pub count: u32,
    /// Rendered items.
    pub values: Vec<String>,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No file found at {:?}", path).into());
    }

    let file_size = std::fs::metadata(path)?.len() as usize;
    let document = Document::load(path)?;
    tracing::debug!(path = %path.display(), file_size, "decoded document");
    let result = build_report(path, file_size, &document)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

/// Builds the report for an already decoded document.
pub fn build_report(
    path: &Path,
    file_size: usize,
    document: &Document,
) -> CodecResult<InspectResult> {
    let kind = match document {
        Document::Catalog(_) => "catalog",
        Document::Collection(_) => "collection",
    };
    let collections = document
        .collections()
        .iter()
        .map(collection_report)
        .collect::<CodecResult<Vec<_>>>()?;

    Ok(InspectResult {
        path: path.display().to_string(),
        file_size,
        kind,
        collections,
    })
}

fn collection_report(collection: &Collection) -> CodecResult<CollectionReport> {
    Ok(CollectionReport {
        name: collection.name().to_string(),
        version: collection.version().to_string(),
        size: collection.size()?,
        entities: collection
            .entities()
            .iter()
            .map(entity_report)
            .collect::<CodecResult<Vec<_>>>()?,
    })
}

fn entity_report(entity: &Entity) -> CodecResult<EntityReport> {
    Ok(EntityReport {
        name: entity.name().to_string(),
        fields: entity.fields().iter().map(field_report).collect(),
        arrays: entity
            .arrays()
            .iter()
            .map(array_report)
            .collect::<CodecResult<Vec<_>>>()?,
    })
}

fn field_report(field: &Field) -> FieldReport {
    FieldReport {
        name: field.name().to_string(),
        ty: field.scalar_type().name(),
        value: field.value().to_string(),
    }
}

fn array_report(array: &ArrayField) -> CodecResult<ArrayReport> {
    Ok(ArrayReport {
        name: array.name().to_string(),
        ty: array.item_type().name(),
        count: array.item_count(),
        values: array.values()?.iter().map(ToString::to_string).collect(),
    })
}

fn print_text_output(result: &InspectResult) {
    println!("Cereal Document Inspection");
    println!("==========================");
    println!();
    println!("Path: {}", result.path);
    println!("Size: {} bytes", result.file_size);
    println!("Kind: {}", result.kind);

    for collection in &result.collections {
        println!();
        println!(
            "Collection {:?} (v{}, {} bytes, {} entities)",
            collection.name,
            collection.version,
            collection.size,
            collection.entities.len()
        );
        for entity in &collection.entities {
            println!(
                "  Entity {:?} ({} fields, {} arrays)",
                entity.name,
                entity.fields.len(),
                entity.arrays.len()
            );
            for field in &entity.fields {
                println!("    {} {} = {}", field.ty, field.name, field.value);
            }
            for array in &entity.arrays {
                println!(
                    "    {}[{}] {} = [{}]",
                    array.ty,
                    array.count,
                    array.name,
                    array.values.join(", ")
                );
            }
        }
    }
}
