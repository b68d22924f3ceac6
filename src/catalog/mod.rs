//! @ai:module:intent Algorithm catalog model, payload validation and seed loading
//! @ai:module:layer domain
//! @ai:module:public_api AlgorithmCategory, CategoryFilter, Algorithm, ExecutionRecord, CatalogLoader

pub mod algorithm;
pub mod category;
pub mod fields;
pub mod loader;

pub use algorithm::{Algorithm, AlgorithmDraft, ExecutionDraft, ExecutionRecord};
pub use category::{AlgorithmCategory, CategoryFilter, KNOWN_CATEGORIES};
pub use loader::{CatalogLoader, CatalogLoaderTrait, SeedIssue};
