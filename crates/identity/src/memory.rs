//! Scripted in-memory provider for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::ProviderError;
use crate::profile::Profile;
use crate::provider::{IdentityProvider, ProviderSession};

struct Account {
    user_id: String,
    password: String,
}

/// An [`IdentityProvider`] backed by hash maps, with knobs for failures and
/// for holding a sign-in in flight.
#[derive(Default)]
pub struct InMemoryProvider {
    accounts: Mutex<HashMap<String, Account>>,
    profiles: Mutex<HashMap<String, Profile>>,
    active_user: Mutex<Option<String>>,
    sign_in_gate: Mutex<Option<Arc<Notify>>>,
    held_sign_ins: AtomicUsize,
    fail_sign_out: AtomicBool,
    fail_profile_lookup: AtomicBool,
    sign_out_calls: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account together with its profile row.
    pub fn with_account(self, email: &str, password: &str, profile: Profile) -> Self {
        self.accounts.lock().expect("accounts lock").insert(
            email.to_lowercase(),
            Account {
                user_id: profile.id.clone(),
                password: password.to_string(),
            },
        );
        self.profiles
            .lock()
            .expect("profiles lock")
            .insert(profile.id.clone(), profile);
        self
    }

    /// Make every `sign_out` call fail with a network-style error.
    pub fn fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    /// Make every `fetch_profile` call fail.
    pub fn fail_profile_lookup(&self, fail: bool) {
        self.fail_profile_lookup.store(fail, Ordering::SeqCst);
    }

    /// Block the next `sign_in` calls until the returned handle is notified.
    pub fn hold_sign_in(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.sign_in_gate.lock().expect("gate lock") = Some(gate.clone());
        gate
    }

    /// Number of `sign_in` calls currently waiting on a held gate.
    pub fn held_sign_ins(&self) -> usize {
        self.held_sign_ins.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    pub fn active_user(&self) -> Option<String> {
        self.active_user.lock().expect("active user lock").clone()
    }

    pub fn profile(&self, user_id: &str) -> Option<Profile> {
        self.profiles
            .lock()
            .expect("profiles lock")
            .get(user_id)
            .cloned()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, ProviderError> {
        let gate = self.sign_in_gate.lock().expect("gate lock").take();
        if let Some(gate) = gate {
            self.held_sign_ins.fetch_add(1, Ordering::SeqCst);
            gate.notified().await;
            self.held_sign_ins.fetch_sub(1, Ordering::SeqCst);
        }

        let user_id = {
            let accounts = self.accounts.lock().expect("accounts lock");
            match accounts.get(&email.to_lowercase()) {
                Some(account) if account.password == password => account.user_id.clone(),
                _ => {
                    return Err(ProviderError::InvalidCredentials(
                        "Invalid login credentials".into(),
                    ))
                }
            }
        };

        *self.active_user.lock().expect("active user lock") = Some(user_id.clone());
        Ok(ProviderSession {
            user_id,
            email: Some(email.to_string()),
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<String, ProviderError> {
        let mut accounts = self.accounts.lock().expect("accounts lock");
        let key = email.to_lowercase();
        if accounts.contains_key(&key) {
            return Err(ProviderError::SignUpRejected("User already registered".into()));
        }
        let user_id = format!("user-{}", accounts.len() + 1);
        accounts.insert(
            key,
            Account {
                user_id: user_id.clone(),
                password: password.to_string(),
            },
        );
        Ok(user_id)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.active_user.lock().expect("active user lock").take();
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(ProviderError::Api {
                status: 503,
                body: "provider unavailable".into(),
            });
        }
        Ok(())
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, ProviderError> {
        if self.fail_profile_lookup.load(Ordering::SeqCst) {
            return Err(ProviderError::ProfileLookupFailed("profiles unavailable".into()));
        }
        self.profile(user_id).ok_or_else(|| {
            ProviderError::ProfileLookupFailed(format!("no profile for user '{user_id}'"))
        })
    }

    async fn create_profile(&self, profile: &Profile) -> Result<(), ProviderError> {
        self.profiles
            .lock()
            .expect("profiles lock")
            .insert(profile.id.clone(), profile.clone());
        Ok(())
    }
}
