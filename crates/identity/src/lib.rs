//! External identity provider boundary.
//!
//! - [`IdentityProvider`] -- the async trait the portal consumes for sign-in,
//!   sign-up, sign-out and profile storage.
//! - [`RestIdentityProvider`] -- client for a Supabase-compatible auth and
//!   REST API.
//! - [`AuthEvent`] -- typed sign-in / sign-out notifications delivered to the
//!   session store over a bounded channel.

pub mod config;
pub mod error;
pub mod events;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod profile;
pub mod provider;
pub mod rest;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use events::{auth_channel, AuthEvent, AuthEventReceiver, AuthEventSender, SignInOutcome};
pub use profile::Profile;
pub use provider::{IdentityProvider, ProviderSession};
pub use rest::RestIdentityProvider;
