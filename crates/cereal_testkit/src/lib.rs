//! # Cereal Testkit
//!
//! Test utilities for cereal.
//!
//! This crate provides:
//! - Sample documents and temporary-file helpers
//! - Property-based test generators using proptest
//! - Hand-checked byte vectors for the wire format
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cereal_testkit::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn catalogs_round_trip(catalog in catalog_strategy()) {
//!         assert_roundtrip(&catalog);
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
    pub use proptest::prelude::*;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
