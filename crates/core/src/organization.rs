//! Host organizations where students carry out their work experience.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: EntityId,
    pub name: String,
    pub address: String,
    pub state: String,
    pub lga: String,
    pub contact_person: String,
    pub contact_phone: String,
    pub contact_email: String,
}

/// Look up an organization by id. `None` ids never match.
pub fn find_organization<'a>(
    organizations: &'a [Organization],
    id: Option<&str>,
) -> Option<&'a Organization> {
    let id = id?;
    organizations.iter().find(|org| org.id == id)
}
