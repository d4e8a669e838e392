//! The client-local session value.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::roles::Role;

/// Who is using the portal right now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub identity: Option<Identity>,
    pub authenticated: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            authenticated: true,
        }
    }

    /// The signed-in identity, only when the session is authenticated.
    pub fn current(&self) -> Option<&Identity> {
        if self.authenticated {
            self.identity.as_ref()
        } else {
            None
        }
    }

    /// Role of the signed-in identity, [`Role::None`] when anonymous.
    pub fn role(&self) -> Role {
        self.current().map_or(Role::None, |identity| identity.role)
    }

    pub fn is_anonymous(&self) -> bool {
        self.current().is_none()
    }
}

/// Session generation captured before an asynchronous sign-in.
///
/// A sign-in completes only if the generation has not moved since the ticket
/// was issued; any login or logout in between makes the ticket stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionTicket(pub u64);

impl SessionTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}
