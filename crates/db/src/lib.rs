//! In-memory portal data store.
//!
//! Holds the identities, organizations, reports, messages and assignments
//! the portal works with. Data comes from the built-in demo seed or a JSON
//! seed file; nothing is written back.

use std::sync::Arc;

use tokio::sync::RwLock;

pub mod dataset;
pub mod repositories;
pub mod seed;

pub use dataset::Dataset;

/// Shared handle to the portal data. Cheap to clone.
pub type DataStore = Arc<RwLock<Dataset>>;

/// Wrap a dataset in a shareable store.
pub fn create_store(dataset: Dataset) -> DataStore {
    tracing::debug!(
        identities = dataset.identities.len(),
        organizations = dataset.organizations.len(),
        reports = dataset.reports.len(),
        "Portal data store created"
    );
    Arc::new(RwLock::new(dataset))
}
