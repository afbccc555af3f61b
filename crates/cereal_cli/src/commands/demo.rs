//! Demo command implementation.

use cereal_codec::{ArrayField, Catalog, CodecResult, Collection, Entity, Field, Version};
use std::path::Path;

/// Builds the sample document: one collection "Test" holding entity "Obj"
/// with a double field and a string array.
pub fn sample_catalog(version: Version) -> CodecResult<Catalog> {
    let obj = Entity::new("Obj")
        .with_field(Field::new("pi", 3.141_592_65_f64))
        .with_array(ArrayField::from_strs("words", &["alpha", "beta"])?);
    Ok(Catalog::new().with_collection(Collection::with_version("Test", version).with_entity(obj)))
}

/// Runs the demo command.
pub fn run(out: Option<&Path>, wire_version: u16) -> Result<(), Box<dyn std::error::Error>> {
    let version = Version::from_wire(wire_version)?;
    let catalog = sample_catalog(version)?;

    let bytes = catalog.to_bytes()?;
    println!("Encoded {} bytes (collection version {})", bytes.len(), version);

    if let Some(path) = out {
        catalog.save(path)?;
        println!("Saved to {}", path.display());
    }

    let decoded = match out {
        Some(path) => Catalog::load(path)?,
        None => Catalog::from_bytes(&bytes)?,
    };
    if decoded != catalog {
        return Err("Decoded catalog differs from the original".into());
    }

    let obj = decoded
        .get_collection("Test")
        .and_then(|c| c.get_entity("Obj"))
        .ok_or("Sample entity missing after decode")?;
    let pi = obj.get_field("pi").ok_or("Field \"pi\" missing")?;
    let words = obj.get_array("words").ok_or("Array \"words\" missing")?;

    println!();
    println!("Test/Obj");
    println!("  pi    = {}", pi.as_double()?);
    println!("  words = {:?}", words.as_strings()?);
    Ok(())
}
