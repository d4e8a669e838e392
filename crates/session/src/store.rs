//! Generation-fenced session state container.

use std::path::PathBuf;
use std::sync::Arc;

use siwes_core::identity::{Identity, IdentityUpdate};
use siwes_core::session::{Session, SessionTicket};
use siwes_identity::{IdentityProvider, Profile};
use tokio::sync::watch;

use crate::error::SessionError;
use crate::snapshot::SnapshotFile;

/// What subscribers observe: the session plus the generation it belongs to.
///
/// The generation increases on every login, logout and completed external
/// sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub session: Session,
    pub generation: u64,
}

/// Shared owner of the portal's single [`Session`].
///
/// All transitions happen inside one `watch` update, so readers always see a
/// whole `{session, generation}` pair, and the snapshot file is written in
/// transition order.
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    snapshot: Option<SnapshotFile>,
    provider: Option<Arc<dyn IdentityProvider>>,
}

impl SessionStore {
    /// A store that keeps nothing on disk.
    pub fn in_memory() -> Self {
        Self::with_state(Session::anonymous(), None)
    }

    /// A store persisted at `path`, rehydrated from it when possible.
    ///
    /// A missing snapshot starts anonymous. An unreadable or incompatible
    /// one is logged and also starts anonymous.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let snapshot = SnapshotFile::new(path);
        let session = match snapshot.load() {
            Ok(Some(session)) => {
                tracing::info!(
                    path = %snapshot.path().display(),
                    authenticated = !session.is_anonymous(),
                    "Rehydrated session snapshot"
                );
                session
            }
            Ok(None) => Session::anonymous(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding session snapshot, starting anonymous");
                Session::anonymous()
            }
        };
        Self::with_state(session, Some(snapshot))
    }

    fn with_state(session: Session, snapshot: Option<SnapshotFile>) -> Self {
        let (state, _) = watch::channel(SessionState {
            session,
            generation: 0,
        });
        Self {
            state,
            snapshot,
            provider: None,
        }
    }

    /// Attach the identity provider that `logout` signs out of.
    pub fn with_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn session(&self) -> Session {
        self.state.borrow().session.clone()
    }

    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn persist(&self, session: &Session) {
        if let Some(snapshot) = &self.snapshot {
            if let Err(e) = snapshot.save(session) {
                tracing::warn!(error = %e, "Failed to persist session snapshot");
            }
        }
    }

    /// Make `identity` the signed-in user.
    ///
    /// Bumps the generation, so any sign-in still in flight becomes stale.
    pub fn login(&self, identity: Identity) {
        let identity = identity.normalized();
        tracing::info!(user_id = %identity.id, role = %identity.role, "Session login");
        self.state.send_modify(|state| {
            state.session = Session::authenticated(identity);
            state.generation += 1;
            self.persist(&state.session);
        });
    }

    /// Sign out and clear the session. Idempotent.
    ///
    /// The generation is bumped before the provider is contacted, so a
    /// sign-in that completes while the provider call is pending is dropped.
    /// Provider failures are logged and do not keep the session alive.
    pub async fn logout(&self) {
        let mut fence = 0;
        let mut was_authenticated = false;
        self.state.send_modify(|state| {
            state.generation += 1;
            fence = state.generation;
            was_authenticated = !state.session.is_anonymous();
        });

        // The provider may hold a token from a sign-in that never reached
        // the local session, so revoke even when already anonymous.
        if let Some(provider) = &self.provider {
            if let Err(e) = provider.sign_out().await {
                tracing::warn!(
                    provider = provider.name(),
                    error = %e,
                    "Provider sign-out failed, clearing local session anyway"
                );
            }
        }

        self.state.send_if_modified(|state| {
            if state.generation != fence {
                tracing::debug!("Session changed during logout, keeping newer state");
                return false;
            }
            if state.session == Session::anonymous() {
                return false;
            }
            state.session = Session::anonymous();
            self.persist(&state.session);
            true
        });

        if was_authenticated {
            tracing::info!("Session logout");
        }
    }

    /// Merge `update` into the signed-in identity.
    ///
    /// Returns the updated identity, or `None` when nobody is signed in.
    pub fn update_identity(&self, update: &IdentityUpdate) -> Option<Identity> {
        let mut updated = None;
        self.state.send_if_modified(|state| {
            if !state.session.authenticated {
                return false;
            }
            let Some(identity) = state.session.identity.as_mut() else {
                return false;
            };
            if update.is_empty() {
                updated = Some(identity.clone());
                return false;
            }
            identity.apply(update);
            updated = Some(identity.clone());
            self.persist(&state.session);
            true
        });
        updated
    }

    /// Capture the current generation before an asynchronous sign-in.
    pub fn begin_sign_in(&self) -> SessionTicket {
        SessionTicket(self.generation())
    }

    /// Complete a provider sign-in that began with `ticket`.
    ///
    /// Applied only when no login or logout happened since the ticket was
    /// issued; otherwise the profile is discarded.
    pub fn on_external_sign_in(
        &self,
        ticket: SessionTicket,
        profile: Profile,
    ) -> Result<Identity, SessionError> {
        let identity = profile.into_identity();
        let mut applied = false;
        self.state.send_if_modified(|state| {
            if state.generation != ticket.generation() {
                return false;
            }
            state.session = Session::authenticated(identity.clone());
            state.generation += 1;
            self.persist(&state.session);
            applied = true;
            true
        });

        if applied {
            tracing::info!(user_id = %identity.id, role = %identity.role, "External sign-in applied");
            Ok(identity)
        } else {
            tracing::info!(
                user_id = %identity.id,
                ticket = ticket.generation(),
                "Dropping stale external sign-in"
            );
            Err(SessionError::Stale)
        }
    }

    /// The provider reported a sign-out: fence and clear without calling it back.
    pub fn on_external_sign_out(&self) {
        self.state.send_modify(|state| {
            state.generation += 1;
            if state.session != Session::anonymous() {
                state.session = Session::anonymous();
                self.persist(&state.session);
            }
        });
        tracing::info!("External sign-out applied");
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use siwes_core::identity::PaymentStatus;
    use siwes_core::roles::Role;
    use siwes_identity::memory::InMemoryProvider;

    use super::*;

    fn student() -> Identity {
        Identity::new("student1", "John Doe", "student@aapoly.edu.ng", Role::Student)
            .with_organization("org1")
            .with_payment_status(PaymentStatus::Pending)
    }

    fn student_profile() -> Profile {
        Profile::from(&student())
    }

    fn store_with(provider: &Arc<InMemoryProvider>) -> SessionStore {
        SessionStore::in_memory().with_provider(provider.clone())
    }

    // -----------------------------------------------------------------------
    // Login / logout
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn login_then_logout() {
        let store = SessionStore::in_memory();
        store.login(student());
        assert_eq!(store.session().role(), Role::Student);

        store.logout().await;
        assert_eq!(store.session(), Session::anonymous());
    }

    #[tokio::test]
    async fn login_normalizes_staff_identity() {
        let store = SessionStore::in_memory();
        store.login(
            Identity::new("c1", "C", "c@x", Role::Coordinator)
                .with_payment_status(PaymentStatus::Verified),
        );
        assert!(store.session().current().unwrap().payment_status.is_none());
    }

    #[tokio::test]
    async fn double_logout_equals_single_logout() {
        let provider = Arc::new(InMemoryProvider::new());
        let store = store_with(&provider);
        store.login(student());

        store.logout().await;
        let after_one = store.session();
        store.logout().await;

        assert_eq!(store.session(), after_one);
        assert!(provider.active_user().is_none());
    }

    #[tokio::test]
    async fn anonymous_logout_revokes_leftover_provider_session() {
        let provider = Arc::new(InMemoryProvider::new().with_account(
            "student@aapoly.edu.ng",
            "secret",
            student_profile(),
        ));
        let store = store_with(&provider);
        provider
            .sign_in("student@aapoly.edu.ng", "secret")
            .await
            .unwrap();

        store.logout().await;

        assert!(store.session().is_anonymous());
        assert_eq!(provider.sign_out_calls(), 1);
        assert!(provider.active_user().is_none());
    }

    #[tokio::test]
    async fn provider_failure_still_clears_session() {
        let provider = Arc::new(InMemoryProvider::new());
        provider.fail_sign_out(true);
        let store = store_with(&provider);
        store.login(student());

        store.logout().await;
        assert!(store.session().is_anonymous());
    }

    // -----------------------------------------------------------------------
    // Fenced external sign-in
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn external_sign_in_with_current_ticket_applies() {
        let store = SessionStore::in_memory();
        let ticket = store.begin_sign_in();

        let identity = store.on_external_sign_in(ticket, student_profile()).unwrap();
        assert_eq!(identity.id, "student1");
        assert_eq!(store.session().current(), Some(&identity));
        assert!(store.generation() > ticket.generation());
    }

    #[tokio::test]
    async fn sign_in_overtaken_by_logout_is_stale() {
        let store = SessionStore::in_memory();
        let ticket = store.begin_sign_in();

        store.logout().await;
        assert_matches!(
            store.on_external_sign_in(ticket, student_profile()),
            Err(SessionError::Stale)
        );
        assert!(store.session().is_anonymous());
    }

    #[tokio::test]
    async fn second_sign_in_with_same_ticket_is_stale() {
        let store = SessionStore::in_memory();
        let ticket = store.begin_sign_in();
        store.on_external_sign_in(ticket, student_profile()).unwrap();
        assert_matches!(
            store.on_external_sign_in(ticket, student_profile()),
            Err(SessionError::Stale)
        );
    }

    #[tokio::test]
    async fn external_sign_out_clears_without_calling_provider() {
        let provider = Arc::new(InMemoryProvider::new());
        let store = store_with(&provider);
        store.login(student());
        let ticket = store.begin_sign_in();

        store.on_external_sign_out();
        assert!(store.session().is_anonymous());
        assert_eq!(provider.sign_out_calls(), 0);
        assert_matches!(
            store.on_external_sign_in(ticket, student_profile()),
            Err(SessionError::Stale)
        );
    }

    // -----------------------------------------------------------------------
    // Update / subscribe
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn update_identity_merges_and_ignores_anonymous() {
        let store = SessionStore::in_memory();
        assert!(store
            .update_identity(&IdentityUpdate::payment(PaymentStatus::Verified))
            .is_none());

        store.login(student());
        let generation = store.generation();
        let updated = store
            .update_identity(&IdentityUpdate::payment(PaymentStatus::Verified))
            .unwrap();

        assert_eq!(updated.payment_status, Some(PaymentStatus::Verified));
        assert_eq!(updated.organization(), Some("org1"));
        assert_eq!(store.generation(), generation);
    }

    #[tokio::test]
    async fn subscribers_see_transitions() {
        let store = SessionStore::in_memory();
        let mut rx = store.subscribe();

        store.login(student());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().session.role(), Role::Student);

        store.logout().await;
        rx.changed().await.unwrap();
        assert!(rx.borrow().session.is_anonymous());
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-storage.json");

        let store = SessionStore::open(&path);
        store.login(student());
        store.update_identity(&IdentityUpdate::payment(PaymentStatus::Verified));
        drop(store);

        let reopened = SessionStore::open(&path);
        let identity = reopened.session().current().cloned().unwrap();
        assert_eq!(identity.id, "student1");
        assert_eq!(identity.payment_status, Some(PaymentStatus::Verified));

        reopened.logout().await;
        assert!(SessionStore::open(&path).session().is_anonymous());
    }

    #[tokio::test]
    async fn corrupt_snapshot_starts_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = SessionStore::open(&path);
        assert!(store.session().is_anonymous());

        store.login(student());
        assert!(!SessionStore::open(&path).session().is_anonymous());
    }
}
