//! Data-driven catalog loading for the flow calculator.
//!
//! JSON datasets are deserialized via [`schema`] structs and resolved by
//! name into an immutable catalog via [`loader`]. The refinery dataset the
//! calculator ships with lives in `data/refinery.json`.

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, load_catalog_json, refinery_catalog};
