//! Portal roles.
//!
//! Role strings are what the identity provider stores in the `profiles`
//! table. Anything the provider returns that is not one of the known names
//! (including a missing value) becomes [`Role::None`].

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_SUPERVISOR: &str = "supervisor";
pub const ROLE_COORDINATOR: &str = "coordinator";
pub const ROLE_NONE: &str = "none";

/// All role names accepted by [`Role::from_str_value`].
pub const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_SUPERVISOR, ROLE_COORDINATOR, ROLE_NONE];

/// The role of an identity within the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Supervisor,
    Coordinator,
    /// No portal role. Never granted access to a guarded destination.
    None,
}

impl Role {
    /// Parse a role name strictly.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_STUDENT => Ok(Self::Student),
            ROLE_SUPERVISOR => Ok(Self::Supervisor),
            ROLE_COORDINATOR => Ok(Self::Coordinator),
            ROLE_NONE => Ok(Self::None),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }

    /// Map a nullable provider role value. Unknown names map to [`Role::None`].
    pub fn from_profile_value(value: Option<&str>) -> Self {
        value
            .and_then(|s| Self::from_str_value(s).ok())
            .unwrap_or(Self::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => ROLE_STUDENT,
            Self::Supervisor => ROLE_SUPERVISOR,
            Self::Coordinator => ROLE_COORDINATOR,
            Self::None => ROLE_NONE,
        }
    }

    /// Landing page after a successful login, if the role has one.
    pub fn dashboard_path(&self) -> Option<&'static str> {
        match self {
            Self::Student => Some("/student/dashboard"),
            Self::Supervisor => Some("/supervisor/dashboard"),
            Self::Coordinator => Some("/coordinator/dashboard"),
            Self::None => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
