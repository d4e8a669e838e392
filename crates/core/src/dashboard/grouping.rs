//! Grouping identities by organization.
//!
//! The key is the identity's `organization_id`, or [`UNASSIGNED_GROUP`]
//! when it has none. Groups iterate in order of first encounter and every
//! input identity lands in exactly one group.

use indexmap::IndexMap;
use serde::Serialize;

use crate::identity::Identity;
use crate::organization::{find_organization, Organization};

/// Key of the bucket holding identities without an organization.
pub const UNASSIGNED_GROUP: &str = "unassigned";

/// Identities placed at one organization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationGroup {
    /// Organization id, or [`UNASSIGNED_GROUP`].
    pub key: String,
    /// Resolved organization details; `None` for the unassigned bucket or an
    /// id missing from the organization set.
    pub organization: Option<Organization>,
    pub members: Vec<Identity>,
}

fn group_key(identity: &Identity) -> &str {
    identity.organization().unwrap_or(UNASSIGNED_GROUP)
}

/// Bucket identities by organization key, preserving first-encounter order.
pub fn group_by_organization<'a, I>(identities: I) -> IndexMap<&'a str, Vec<&'a Identity>>
where
    I: IntoIterator<Item = &'a Identity>,
{
    let mut groups: IndexMap<&'a str, Vec<&'a Identity>> = IndexMap::new();
    for identity in identities {
        groups.entry(group_key(identity)).or_default().push(identity);
    }
    groups
}

/// Resolve buckets into display groups.
///
/// `seed_keys` are inserted first (in order) so that they appear even when
/// empty; remaining keys follow in first-encounter order.
pub(crate) fn resolve_groups<'a, I>(
    identities: I,
    seed_keys: &[&str],
    organizations: &[Organization],
) -> Vec<OrganizationGroup>
where
    I: IntoIterator<Item = &'a Identity>,
{
    let mut groups: IndexMap<String, Vec<Identity>> = seed_keys
        .iter()
        .map(|key| (key.to_string(), Vec::new()))
        .collect();

    for (key, members) in group_by_organization(identities) {
        groups
            .entry(key.to_string())
            .or_default()
            .extend(members.into_iter().cloned());
    }

    groups
        .into_iter()
        .map(|(key, members)| OrganizationGroup {
            organization: if key == UNASSIGNED_GROUP {
                None
            } else {
                find_organization(organizations, Some(key.as_str())).cloned()
            },
            key,
            members,
        })
        .collect()
}
