/// Errors from the identity provider boundary.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No provider endpoint/key configured; the portal runs in demo mode.
    #[error("Identity provider is not configured")]
    ConfigurationMissing,

    /// The provider rejected the email/password pair.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The provider refused to create the account (already registered, weak password, ...).
    #[error("Sign-up rejected: {0}")]
    SignUpRejected(String),

    /// The profile record could not be read or written.
    #[error("Profile lookup failed: {0}")]
    ProfileLookupFailed(String),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Identity provider unreachable: {0}")]
    NetworkUnavailable(#[from] reqwest::Error),

    /// Any other non-2xx response.
    #[error("Identity provider error ({status}): {body}")]
    Api { status: u16, body: String },
}
