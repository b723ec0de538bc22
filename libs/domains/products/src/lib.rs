//! Products Domain Library
//!
//! Product catalog model and the import pipeline that feeds the vector
//! collection: XML catalog → validated products → embedded documents →
//! upserted points. Products have no store of record beyond their vector
//! payloads.

pub mod catalog;
pub mod error;
pub mod import;
pub mod models;

pub use catalog::{Catalog, CatalogProduct};
pub use error::{ProductError, ProductResult};
pub use import::{EMBED_BATCH_SIZE, ImportService};
pub use models::{ImportSummary, Product};
