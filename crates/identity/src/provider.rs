use async_trait::async_trait;

use crate::error::ProviderError;
use crate::profile::Profile;

/// Result of a successful password sign-in.
///
/// Tokens stay inside the provider implementation; callers only learn who
/// signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    pub user_id: String,
    pub email: Option<String>,
}

/// The external identity service the portal delegates authentication and
/// profile storage to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Exchange an email/password pair for a provider session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, ProviderError>;

    /// Register a new account. Returns the new user's id.
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, ProviderError>;

    /// End the provider session. Succeeds when no session is active.
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Read the profile row for `user_id`.
    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, ProviderError>;

    /// Insert a profile row.
    async fn create_profile(&self, profile: &Profile) -> Result<(), ProviderError>;
}
