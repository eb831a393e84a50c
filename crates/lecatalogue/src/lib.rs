//! lecatalogue - Endpoint Catalog
//!
//! *Le Catalogue* (The Catalog) - Known AI-service endpoint profiles, cloud and local,
//! held in a validated registry keyed by server key.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Built-in endpoint table.
pub mod builtin;
/// Endpoint descriptor data model.
pub mod descriptor;
/// Validated registry, curated recommendations and overrides.
pub mod registry;

pub use builtin::builtin_descriptors;
pub use descriptor::{Category, Difficulty, EndpointDescriptor};
pub use registry::{CatalogOverrides, EndpointCatalog, RecommendedSet};

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading or querying a catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Lookup or override referenced a key the catalog does not know
    #[error("Unknown server key: {0}")]
    UnknownServer(String),

    /// Two descriptors share a server key
    #[error("Duplicate server key: {0}")]
    DuplicateKey(String),

    /// Descriptor with an empty server key
    #[error("Server key must not be empty")]
    EmptyKey,

    /// Default port is not an integer in 1..=65535
    #[error("Invalid default port '{port}' for {key}: expected an integer in 1..=65535")]
    InvalidPort {
        /// Offending server key
        key: String,
        /// Port string as declared
        port: String,
    },

    /// A curated recommendation names a server of the other category
    #[error("Server {key} is {actual}, cannot be recommended as {expected}")]
    CategoryMismatch {
        /// Offending server key
        key: String,
        /// Category of the recommended list
        expected: Category,
        /// Category of the descriptor
        actual: Category,
    },
}

/// Catalog library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
