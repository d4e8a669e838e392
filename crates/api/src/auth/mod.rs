//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`demo`] -- Demo-mode credential check against the seeded identities.
//! - [`AuthBackend`] -- Which of demo mode or the identity provider is active.

pub mod demo;
pub mod password;

use std::sync::Arc;

use siwes_identity::{AuthEventSender, IdentityProvider};

use self::demo::DemoDirectory;

/// Credential backend selected at startup.
pub enum AuthBackend {
    /// No identity provider configured.
    Demo(DemoDirectory),
    /// Sign-ins go to the provider and reach the session through the
    /// auth event channel.
    Provider {
        provider: Arc<dyn IdentityProvider>,
        events: AuthEventSender,
    },
}

impl AuthBackend {
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Demo(_) => "demo",
            Self::Provider { .. } => "provider",
        }
    }
}
