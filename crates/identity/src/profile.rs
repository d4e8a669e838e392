//! Profile rows as stored by the identity provider.

use serde::{Deserialize, Serialize};
use siwes_core::identity::{Identity, PaymentStatus};
use siwes_core::roles::Role;

/// A row of the provider's `profiles` table.
///
/// Column values are loosely typed: `role` and `payment_status` are plain
/// strings and any of the optional columns may be `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
}

impl Profile {
    /// The profile created for a self-registered student.
    pub fn new_student(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        student_id: impl Into<String>,
    ) -> Self {
        Self {
            id: user_id.into(),
            name: Some(name.into()),
            email: Some(email.into()),
            role: Some(Role::Student.as_str().to_string()),
            organization_id: None,
            payment_status: Some(PaymentStatus::Pending.as_str().to_string()),
            student_id: Some(student_id.into()),
        }
    }

    /// Convert the row into a portal identity.
    ///
    /// Unknown roles become [`Role::None`]; unknown payment statuses are
    /// dropped. Student-only fields are stripped from other roles.
    pub fn into_identity(self) -> Identity {
        let role = Role::from_profile_value(self.role.as_deref());
        let payment_status = self.payment_status.as_deref().and_then(|value| {
            PaymentStatus::from_str_value(value)
                .map_err(|reason| {
                    tracing::warn!(user_id = %self.id, %reason, "Ignoring profile payment status");
                })
                .ok()
        });

        Identity {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            role,
            organization_id: self.organization_id.filter(|id| !id.is_empty()),
            payment_status,
            student_id: self.student_id,
            id: self.id,
        }
        .normalized()
    }
}

impl From<&Identity> for Profile {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            name: Some(identity.name.clone()),
            email: Some(identity.email.clone()),
            role: Some(identity.role.as_str().to_string()),
            organization_id: identity.organization_id.clone(),
            payment_status: identity.payment_status.map(|s| s.as_str().to_string()),
            student_id: identity.student_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_row_converts_with_payment() {
        let row: Profile = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "name": "John Doe",
            "email": "student@aapoly.edu.ng",
            "role": "student",
            "organization_id": "org1",
            "payment_status": "verified",
            "student_id": "AAP/CS/19/0001"
        }))
        .unwrap();

        let identity = row.into_identity();
        assert_eq!(identity.role, Role::Student);
        assert_eq!(identity.payment_status, Some(PaymentStatus::Verified));
        assert_eq!(identity.organization(), Some("org1"));
    }

    #[test]
    fn unknown_role_and_nulls_are_tolerated() {
        let row: Profile = serde_json::from_value(serde_json::json!({
            "id": "u2",
            "name": null,
            "role": "admin",
            "payment_status": "verified"
        }))
        .unwrap();

        let identity = row.into_identity();
        assert_eq!(identity.role, Role::None);
        assert_eq!(identity.name, "");
        assert!(identity.payment_status.is_none());
    }

    #[test]
    fn garbage_payment_status_is_dropped() {
        let mut row = Profile::new_student("u3", "Jane", "j@x", "AAP/1");
        row.payment_status = Some("paid".into());
        assert!(row.into_identity().payment_status.is_none());
    }

    #[test]
    fn new_student_starts_pending() {
        let identity = Profile::new_student("u4", "Jane", "j@x", "AAP/2").into_identity();
        assert_eq!(identity.role, Role::Student);
        assert_eq!(identity.payment_status, Some(PaymentStatus::Pending));
        assert_eq!(identity.student_id.as_deref(), Some("AAP/2"));
    }
}
