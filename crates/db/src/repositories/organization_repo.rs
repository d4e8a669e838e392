//! Repository for host organizations.

use siwes_core::organization::Organization;

use crate::DataStore;

pub struct OrganizationRepo;

impl OrganizationRepo {
    pub async fn list(store: &DataStore) -> Vec<Organization> {
        store.read().await.organizations.clone()
    }

    pub async fn find_by_id(store: &DataStore, id: &str) -> Option<Organization> {
        let data = store.read().await;
        data.organizations.iter().find(|o| o.id == id).cloned()
    }
}
