//! Repository for portal identities.

use siwes_core::identity::{Identity, IdentityUpdate};
use siwes_core::roles::Role;

use crate::DataStore;

/// Provides lookups and updates for identities.
pub struct IdentityRepo;

impl IdentityRepo {
    pub async fn find_by_id(store: &DataStore, id: &str) -> Option<Identity> {
        let data = store.read().await;
        data.identities.iter().find(|i| i.id == id).cloned()
    }

    /// Find an identity by email (case-insensitive, surrounding whitespace ignored).
    pub async fn find_by_email(store: &DataStore, email: &str) -> Option<Identity> {
        let email = email.trim();
        let data = store.read().await;
        data.identities
            .iter()
            .find(|i| i.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub async fn list_by_role(store: &DataStore, role: Role) -> Vec<Identity> {
        let data = store.read().await;
        data.identities
            .iter()
            .filter(|i| i.role == role)
            .cloned()
            .collect()
    }

    /// Insert `identity`, replacing any existing record with the same id.
    pub async fn upsert(store: &DataStore, identity: Identity) -> Identity {
        let identity = identity.normalized();
        let mut data = store.write().await;
        match data.identities.iter_mut().find(|i| i.id == identity.id) {
            Some(existing) => *existing = identity.clone(),
            None => data.identities.push(identity.clone()),
        }
        identity
    }

    /// Merge `update` into an identity. Returns `None` if the id is unknown.
    pub async fn update(store: &DataStore, id: &str, update: &IdentityUpdate) -> Option<Identity> {
        let mut data = store.write().await;
        let identity = data.identities.iter_mut().find(|i| i.id == id)?;
        identity.apply(update);
        Some(identity.clone())
    }
}
