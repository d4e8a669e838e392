use siwes_identity::events::ChannelClosed;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A login or logout happened after this sign-in began.
    #[error("Sign-in was superseded by a later login or logout")]
    Stale,

    #[error("Profile lookup failed: {0}")]
    ProfileLookupFailed(String),

    /// The auth event listener is not running.
    #[error("Session listener is not running")]
    ListenerClosed,
}

impl From<ChannelClosed> for SessionError {
    fn from(_: ChannelClosed) -> Self {
        Self::ListenerClosed
    }
}
