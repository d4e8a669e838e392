//! Auth state-change notifications from the identity provider.
//!
//! Sign-in and sign-out notifications travel over a bounded
//! `tokio::sync::mpsc` channel to a single consumer (the session
//! listener). Every sign-in carries the [`SessionTicket`] issued when it
//! began, so a sign-in overtaken by a logout can be recognised and dropped.

use siwes_core::identity::Identity;
use siwes_core::session::SessionTicket;
use tokio::sync::{mpsc, oneshot};

// ---------------------------------------------------------------------------
// AuthEvent
// ---------------------------------------------------------------------------

/// What the consumer did with a sign-in notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The profile was loaded and the session now holds this identity.
    Applied(Identity),
    /// A logout (or newer sign-in) happened after this sign-in began.
    Stale,
    /// The profile could not be loaded; the session was left unchanged.
    ProfileLookupFailed(String),
}

/// A provider auth state change.
#[derive(Debug)]
pub enum AuthEvent {
    SignedIn {
        user_id: String,
        ticket: SessionTicket,
        /// Optional reply channel resolved once the event is processed.
        ack: Option<oneshot::Sender<SignInOutcome>>,
    },
    SignedOut,
}

impl AuthEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SignedIn { .. } => "signed_in",
            Self::SignedOut => "signed_out",
        }
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Default buffer capacity for the auth channel.
pub const DEFAULT_CAPACITY: usize = 64;

/// The receiving end, owned by the session listener.
pub type AuthEventReceiver = mpsc::Receiver<AuthEvent>;

/// The consumer side of the channel has shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Auth event channel is closed")]
pub struct ChannelClosed;

/// Cloneable publishing handle for auth events.
#[derive(Debug, Clone)]
pub struct AuthEventSender {
    sender: mpsc::Sender<AuthEvent>,
}

/// Create a bounded auth event channel.
pub fn auth_channel(capacity: usize) -> (AuthEventSender, AuthEventReceiver) {
    let (sender, receiver) = mpsc::channel(capacity);
    (AuthEventSender { sender }, receiver)
}

impl AuthEventSender {
    /// Queue an event, waiting for buffer space if needed.
    pub async fn publish(&self, event: AuthEvent) -> Result<(), ChannelClosed> {
        self.sender.send(event).await.map_err(|_| ChannelClosed)
    }

    /// Publish a sign-in and wait until the consumer has processed it.
    pub async fn signed_in(
        &self,
        user_id: impl Into<String>,
        ticket: SessionTicket,
    ) -> Result<SignInOutcome, ChannelClosed> {
        let (ack, outcome) = oneshot::channel();
        self.publish(AuthEvent::SignedIn {
            user_id: user_id.into(),
            ticket,
            ack: Some(ack),
        })
        .await?;
        // A dropped ack means the consumer exited mid-event.
        outcome.await.map_err(|_| ChannelClosed)
    }

    /// Publish a sign-out notification.
    pub async fn signed_out(&self) -> Result<(), ChannelClosed> {
        self.publish(AuthEvent::SignedOut).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
