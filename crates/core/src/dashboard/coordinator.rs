//! Coordinator dashboard summary.

use serde::Serialize;

use super::grouping::{resolve_groups, OrganizationGroup};
use super::{percentage, ratio};
use crate::identity::{Identity, PaymentStatus};
use crate::organization::Organization;
use crate::report::{Report, ReportStatus};
use crate::roles::Role;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub students: usize,
    pub supervisors: usize,
    pub coordinators: usize,
    pub without_role: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentCounts {
    pub verified: usize,
    pub pending: usize,
    pub rejected: usize,
    /// Students with no recorded payment status.
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinatorSummary {
    pub roles: RoleCounts,
    pub organizations: usize,
    pub reports: usize,
    pub pending_reports: usize,
    pub payments: PaymentCounts,
    /// `verified / students`, `0.0` when there are no students.
    pub verified_ratio: f64,
    pub verified_pct: u8,
    /// Students grouped over every known organization, empty ones included.
    pub organization_groups: Vec<OrganizationGroup>,
}

pub fn count_roles(identities: &[Identity]) -> RoleCounts {
    identities
        .iter()
        .fold(RoleCounts::default(), |mut counts, identity| {
            match identity.role {
                Role::Student => counts.students += 1,
                Role::Supervisor => counts.supervisors += 1,
                Role::Coordinator => counts.coordinators += 1,
                Role::None => counts.without_role += 1,
            }
            counts
        })
}

pub fn count_payments<'a, I>(students: I) -> PaymentCounts
where
    I: IntoIterator<Item = &'a Identity>,
{
    students
        .into_iter()
        .fold(PaymentCounts::default(), |mut counts, student| {
            match student.payment_status {
                Some(PaymentStatus::Verified) => counts.verified += 1,
                Some(PaymentStatus::Pending) => counts.pending += 1,
                Some(PaymentStatus::Rejected) => counts.rejected += 1,
                None => counts.missing += 1,
            }
            counts
        })
}

pub fn coordinator_summary(
    identities: &[Identity],
    reports: &[Report],
    organizations: &[Organization],
) -> CoordinatorSummary {
    let students: Vec<&Identity> = identities.iter().filter(|i| i.is_student()).collect();
    let roles = count_roles(identities);
    let payments = count_payments(students.iter().copied());
    let verified_ratio = ratio(payments.verified, students.len());

    let org_keys: Vec<&str> = organizations.iter().map(|org| org.id.as_str()).collect();
    let organization_groups = resolve_groups(students.iter().copied(), &org_keys, organizations);

    CoordinatorSummary {
        roles,
        organizations: organizations.len(),
        reports: reports.len(),
        pending_reports: reports
            .iter()
            .filter(|r| r.status == ReportStatus::Pending)
            .count(),
        payments,
        verified_ratio,
        verified_pct: percentage(verified_ratio),
        organization_groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::UNASSIGNED_GROUP;

    fn org(id: &str) -> Organization {
        Organization {
            id: id.into(),
            name: id.to_uppercase(),
            address: String::new(),
            state: String::new(),
            lga: String::new(),
            contact_person: String::new(),
            contact_phone: String::new(),
            contact_email: String::new(),
        }
    }

    #[test]
    fn zero_students_gives_defined_ratio() {
        let staff = vec![Identity::new("c1", "C", "c@x", Role::Coordinator)];
        let summary = coordinator_summary(&staff, &[], &[]);

        assert_eq!(summary.roles.students, 0);
        assert_eq!(summary.verified_ratio, 0.0);
        assert!(!summary.verified_ratio.is_nan());
        assert_eq!(summary.verified_pct, 0);
        assert!(summary.organization_groups.is_empty());
    }

    #[test]
    fn counts_roles_and_payments() {
        let identities = vec![
            Identity::new("s1", "A", "a@x", Role::Student)
                .with_organization("org1")
                .with_payment_status(PaymentStatus::Verified),
            Identity::new("s2", "B", "b@x", Role::Student)
                .with_organization("org2")
                .with_payment_status(PaymentStatus::Pending),
            Identity::new("s3", "C", "c@x", Role::Student),
            Identity::new("sup", "D", "d@x", Role::Supervisor),
            Identity::new("co", "E", "e@x", Role::Coordinator),
            Identity::new("x", "F", "f@x", Role::None),
        ];
        let summary = coordinator_summary(&identities, &[], &[org("org1"), org("org2")]);

        assert_eq!(
            summary.roles,
            RoleCounts {
                students: 3,
                supervisors: 1,
                coordinators: 1,
                without_role: 1,
            }
        );
        assert_eq!(summary.payments.verified, 1);
        assert_eq!(summary.payments.pending, 1);
        assert_eq!(summary.payments.missing, 1);
        assert!((summary.verified_ratio - 1.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(summary.verified_pct, 33);
    }

    #[test]
    fn groups_cover_every_organization() {
        let identities = vec![
            Identity::new("s1", "A", "a@x", Role::Student).with_organization("org2"),
            Identity::new("s2", "B", "b@x", Role::Student),
            Identity::new("s3", "C", "c@x", Role::Student).with_organization("elsewhere"),
        ];
        let summary =
            coordinator_summary(&identities, &[], &[org("org1"), org("org2"), org("org3")]);

        let keys: Vec<_> = summary
            .organization_groups
            .iter()
            .map(|g| g.key.as_str())
            .collect();
        assert_eq!(keys, vec!["org1", "org2", "org3", UNASSIGNED_GROUP, "elsewhere"]);
        assert!(summary.organization_groups[0].members.is_empty());
        assert_eq!(summary.organization_groups[1].members[0].id, "s1");
        assert!(summary.organization_groups[4].organization.is_none());

        let members: usize = summary
            .organization_groups
            .iter()
            .map(|g| g.members.len())
            .sum();
        assert_eq!(members, 3);
    }
}
