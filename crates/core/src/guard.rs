//! Role-based route guard.
//!
//! [`authorize`] is the single access decision for guarded destinations. It
//! is a pure function of the session snapshot and the allowed role set, so
//! it can be re-evaluated on every navigation without side effects.

use serde::Serialize;

use crate::roles::Role;
use crate::session::Session;

/// Where denied navigations go unless a destination says otherwise.
pub const DEFAULT_REDIRECT: &str = "/";

/// Why a navigation was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// Nobody is signed in.
    Unauthenticated,
    /// Signed in, but the role is not allowed (or is [`Role::None`]).
    RoleNotAllowed,
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Access {
    Grant,
    Deny {
        redirect_to: String,
        reason: DenyReason,
    },
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Grant)
    }
}

/// Decide whether `session` may enter a destination open to `allowed_roles`.
///
/// Denies when the session is not authenticated, carries no identity, or the
/// identity's role is not in `allowed_roles`. [`Role::None`] never matches.
pub fn authorize(session: &Session, allowed_roles: &[Role], redirect_to: &str) -> Access {
    let Some(identity) = session.current() else {
        return Access::Deny {
            redirect_to: redirect_to.to_string(),
            reason: DenyReason::Unauthenticated,
        };
    };

    if identity.role != Role::None && allowed_roles.contains(&identity.role) {
        Access::Grant
    } else {
        Access::Deny {
            redirect_to: redirect_to.to_string(),
            reason: DenyReason::RoleNotAllowed,
        }
    }
}
