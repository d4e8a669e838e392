//! The authenticated user's profile within the portal.

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::EntityId;

pub const PAYMENT_PENDING: &str = "pending";
pub const PAYMENT_VERIFIED: &str = "verified";
pub const PAYMENT_REJECTED: &str = "rejected";

/// Status of a student's SIWES letter payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Verified,
    Rejected,
}

impl PaymentStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            PAYMENT_PENDING => Ok(Self::Pending),
            PAYMENT_VERIFIED => Ok(Self::Verified),
            PAYMENT_REJECTED => Ok(Self::Rejected),
            _ => Err(format!(
                "Invalid payment status '{s}'. Must be one of: {PAYMENT_PENDING}, \
                 {PAYMENT_VERIFIED}, {PAYMENT_REJECTED}"
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => PAYMENT_PENDING,
            Self::Verified => PAYMENT_VERIFIED,
            Self::Rejected => PAYMENT_REJECTED,
        }
    }
}

/// A portal user.
///
/// `payment_status` and `student_id` only carry meaning for students;
/// [`Identity::normalized`] strips them from every other role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub organization_id: Option<EntityId>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub student_id: Option<String>,
}

impl Identity {
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            organization_id: None,
            payment_status: None,
            student_id: None,
        }
    }

    pub fn with_organization(mut self, organization_id: impl Into<EntityId>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_payment_status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = Some(status);
        self
    }

    pub fn with_student_id(mut self, student_id: impl Into<String>) -> Self {
        self.student_id = Some(student_id.into());
        self
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    /// Organization id, treating an empty string as unset.
    pub fn organization(&self) -> Option<&str> {
        self.organization_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Drop student-only attributes from non-student identities.
    pub fn normalized(mut self) -> Self {
        if !self.is_student() {
            self.payment_status = None;
            self.student_id = None;
        }
        self
    }

    /// Merge the set fields of `update` into this identity.
    pub fn apply(&mut self, update: &IdentityUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(organization_id) = &update.organization_id {
            self.organization_id = Some(organization_id.clone());
        }
        if let Some(status) = update.payment_status {
            self.payment_status = Some(status);
        }
        if let Some(student_id) = &update.student_id {
            self.student_id = Some(student_id.clone());
        }
        if !self.is_student() {
            self.payment_status = None;
            self.student_id = None;
        }
    }

    /// The payment badge shown on a student's dashboard.
    ///
    /// Students without a recorded status are shown as pending; other roles
    /// have no badge.
    pub fn payment_badge(&self) -> Option<PaymentStatus> {
        self.is_student()
            .then(|| self.payment_status.unwrap_or(PaymentStatus::Pending))
    }
}

/// Partial update merged into an [`Identity`]. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub organization_id: Option<EntityId>,
    pub payment_status: Option<PaymentStatus>,
    pub student_id: Option<String>,
}

impl IdentityUpdate {
    pub fn payment(status: PaymentStatus) -> Self {
        Self {
            payment_status: Some(status),
            ..Self::default()
        }
    }

    pub fn organization(organization_id: impl Into<EntityId>) -> Self {
        Self {
            organization_id: Some(organization_id.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Identity {
        Identity::new("student1", "John Doe", "student@aapoly.edu.ng", Role::Student)
            .with_organization("org1")
            .with_student_id("AAP/CS/19/0001")
    }

    #[test]
    fn apply_merges_only_set_fields() {
        let mut identity = student();
        identity.apply(&IdentityUpdate::payment(PaymentStatus::Verified));

        assert_eq!(identity.payment_status, Some(PaymentStatus::Verified));
        assert_eq!(identity.name, "John Doe");
        assert_eq!(identity.organization_id.as_deref(), Some("org1"));
    }

    #[test]
    fn normalized_strips_student_fields_from_staff() {
        let supervisor = Identity::new("sup", "Dr. A", "a@b.c", Role::Supervisor)
            .with_payment_status(PaymentStatus::Verified)
            .with_student_id("X");
        let supervisor = supervisor.normalized();
        assert!(supervisor.payment_status.is_none());
        assert!(supervisor.student_id.is_none());
    }

    #[test]
    fn role_change_away_from_student_drops_payment() {
        let mut identity = student().with_payment_status(PaymentStatus::Pending);
        identity.apply(&IdentityUpdate {
            role: Some(Role::Supervisor),
            ..IdentityUpdate::default()
        });
        assert!(identity.payment_status.is_none());
        assert!(identity.student_id.is_none());
    }

    #[test]
    fn payment_badge_defaults_to_pending_for_students() {
        assert_eq!(student().payment_badge(), Some(PaymentStatus::Pending));
        let coordinator = Identity::new("c", "C", "c@x", Role::Coordinator);
        assert_eq!(coordinator.payment_badge(), None);
    }

    #[test]
    fn empty_organization_counts_as_unset() {
        let identity = student().with_organization("");
        assert_eq!(identity.organization(), None);
    }

    #[test]
    fn payment_status_round_trips_names() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Verified,
            PaymentStatus::Rejected,
        ] {
            assert_eq!(PaymentStatus::from_str_value(status.as_str()), Ok(status));
        }
        assert!(PaymentStatus::from_str_value("paid").is_err());
    }
}
