//! Background consumer of provider auth events.

use std::sync::Arc;

use siwes_core::identity::Identity;
use siwes_core::session::SessionTicket;
use siwes_identity::{AuthEvent, AuthEventReceiver, AuthEventSender, IdentityProvider, SignInOutcome};

use crate::error::SessionError;
use crate::store::SessionStore;

/// Applies [`AuthEvent`]s to the [`SessionStore`] in arrival order.
pub struct SessionListener;

impl SessionListener {
    /// Run the listener loop.
    ///
    /// Exits when every [`AuthEventSender`] has been dropped.
    pub async fn run(
        store: Arc<SessionStore>,
        provider: Arc<dyn IdentityProvider>,
        mut receiver: AuthEventReceiver,
    ) {
        loop {
            match receiver.recv().await {
                Some(AuthEvent::SignedIn {
                    user_id,
                    ticket,
                    ack,
                }) => {
                    let outcome = Self::sign_in(&store, provider.as_ref(), &user_id, ticket).await;
                    if let Some(ack) = ack {
                        // The publisher may have given up waiting.
                        let _ = ack.send(outcome);
                    }
                }
                Some(AuthEvent::SignedOut) => store.on_external_sign_out(),
                None => {
                    tracing::info!("Auth event channel closed, session listener shutting down");
                    break;
                }
            }
        }
    }

    async fn sign_in(
        store: &SessionStore,
        provider: &dyn IdentityProvider,
        user_id: &str,
        ticket: SessionTicket,
    ) -> SignInOutcome {
        let profile = match provider.fetch_profile(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!(
                    user_id,
                    provider = provider.name(),
                    error = %e,
                    "Profile lookup failed, session left unchanged"
                );
                return SignInOutcome::ProfileLookupFailed(e.to_string());
            }
        };

        match store.on_external_sign_in(ticket, profile) {
            Ok(identity) => SignInOutcome::Applied(identity),
            Err(_) => {
                // A logout overtook this sign-in. The provider still holds
                // its token; a newer applied sign-in owns the token instead.
                if store.session().is_anonymous() {
                    if let Err(e) = provider.sign_out().await {
                        tracing::warn!(
                            user_id,
                            provider = provider.name(),
                            error = %e,
                            "Failed to revoke superseded provider sign-in"
                        );
                    }
                }
                SignInOutcome::Stale
            }
        }
    }
}

/// Publish a sign-in that began with `ticket` and wait for the listener to
/// apply it.
pub async fn publish_sign_in(
    events: &AuthEventSender,
    user_id: &str,
    ticket: SessionTicket,
) -> Result<Identity, SessionError> {
    match events.signed_in(user_id, ticket).await? {
        SignInOutcome::Applied(identity) => Ok(identity),
        SignInOutcome::Stale => Err(SessionError::Stale),
        SignInOutcome::ProfileLookupFailed(reason) => Err(SessionError::ProfileLookupFailed(reason)),
    }
}
