//! Verify command implementation.

use cereal_codec::{CodecResult, Document};
use std::path::Path;

/// Verification result.
#[derive(Debug, Default)]
pub struct VerifyResult {
    /// Number of collections decoded.
    pub collections: usize,
    /// Number of entities decoded.
    pub entities: usize,
    /// Number of version 2 collections whose checksum was checked.
    pub checksummed: usize,
}

/// Decodes a document and tallies what was checked.
pub fn verify_file(path: &Path) -> CodecResult<VerifyResult> {
    let document = Document::load(path)?;
    let mut result = VerifyResult::default();
    for collection in document.collections() {
        result.collections += 1;
        result.entities += collection.entities().len();
        if collection.version() == cereal_codec::Version::V2_0 {
            result.checksummed += 1;
        }
    }
    Ok(result)
}

/// Runs the verify command.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Verifying {:?}", path);
    println!();

    match verify_file(path) {
        Ok(result) => {
            println!(
                "  collections: {}, entities: {}, checksummed: {}",
                result.collections, result.entities, result.checksummed
            );
            println!();
            println!("✓ Verification passed");
            Ok(())
        }
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "verification failed");
            println!("    ERROR: {}", error);
            println!();
            println!("✗ Verification failed");
            Err("Verification failed".into())
        }
    }
}
