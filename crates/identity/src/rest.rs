//! REST client for a Supabase-compatible identity provider.
//!
//! Authentication goes through the GoTrue endpoints under `/auth/v1`;
//! profiles live in the `profiles` table exposed under `/rest/v1`.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::events::AuthEventSender;
use crate::profile::Profile;
use crate::provider::{IdentityProvider, ProviderSession};

/// HTTP client for one identity provider project.
pub struct RestIdentityProvider {
    client: reqwest::Client,
    config: ProviderConfig,
    /// Access token of the active provider session, if any.
    access_token: RwLock<Option<String>>,
    /// Receives `SignedOut` when the provider rejects the session token.
    events: Option<AuthEventSender>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: UserRecord,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// `/signup` returns either a bare user or a session wrapping one,
/// depending on whether email confirmation is enabled.
#[derive(Debug, Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    user: Option<UserRecord>,
}

/// Error body shapes used by the auth endpoints.
#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl AuthErrorBody {
    fn parse(body: &str) -> String {
        let parsed: Self = serde_json::from_str(body).unwrap_or_default();
        parsed
            .error_description
            .or(parsed.msg)
            .or(parsed.message)
            .or(parsed.error)
            .unwrap_or_else(|| body.to_string())
    }
}

impl RestIdentityProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(client: reqwest::Client, config: ProviderConfig) -> Self {
        Self {
            client,
            config,
            access_token: RwLock::new(None),
            events: None,
        }
    }

    /// Publish [`AuthEvent::SignedOut`](crate::AuthEvent::SignedOut) on
    /// `events` when an authenticated call comes back 401.
    pub fn with_events(mut self, events: AuthEventSender) -> Self {
        self.events = Some(events);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.url, path)
    }

    /// Bearer for REST calls: the session token when signed in, else the
    /// public key.
    async fn bearer(&self) -> String {
        self.access_token
            .read()
            .await
            .clone()
            .unwrap_or_else(|| self.config.api_key.clone())
    }

    /// A 401 on a call made with the session token means the provider
    /// ended the session: drop the token and notify the listener.
    async fn note_rejected_session(&self, err: &ProviderError) {
        if !matches!(err, ProviderError::Api { status: 401, .. }) {
            return;
        }
        if self.access_token.write().await.take().is_none() {
            return;
        }
        tracing::warn!("Provider rejected the session token");

        if let Some(events) = self.events.clone() {
            // The listener may be the caller; publish off its task.
            tokio::spawn(async move {
                if events.signed_out().await.is_err() {
                    tracing::debug!("Auth event channel closed, sign-out not delivered");
                }
            });
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or return a
    /// [`ProviderError::Api`] carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ProviderError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Client errors from the auth endpoints carry a user-facing message.
fn client_rejection(
    err: ProviderError,
    into: impl FnOnce(String) -> ProviderError,
) -> ProviderError {
    match err {
        ProviderError::Api { status, body } if (400..500).contains(&status) => {
            into(AuthErrorBody::parse(&body))
        }
        other => other,
    }
}

fn profile_failure(err: ProviderError) -> ProviderError {
    match err {
        ProviderError::Api { status, body } => {
            ProviderError::ProfileLookupFailed(format!("status {status}: {body}"))
        }
        other => other,
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    fn name(&self) -> &str {
        "rest"
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, ProviderError> {
        let response = self
            .client
            .post(self.url("/auth/v1/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let token: TokenResponse = Self::parse_response(response)
            .await
            .map_err(|e| client_rejection(e, ProviderError::InvalidCredentials))?;

        *self.access_token.write().await = Some(token.access_token);
        tracing::debug!(user_id = %token.user.id, "Provider sign-in succeeded");

        Ok(ProviderSession {
            user_id: token.user.id,
            email: token.user.email,
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.url("/auth/v1/signup"))
            .header("apikey", &self.config.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let created: SignUpResponse = Self::parse_response(response)
            .await
            .map_err(|e| client_rejection(e, ProviderError::SignUpRejected))?;

        created
            .user
            .map(|user| user.id)
            .or(created.id)
            .ok_or_else(|| ProviderError::Api {
                status: 200,
                body: "sign-up response did not include a user id".into(),
            })
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let Some(token) = self.access_token.write().await.take() else {
            return Ok(());
        };

        let response = self
            .client
            .post(self.url("/auth/v1/logout"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        Self::check_status(response).await
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, ProviderError> {
        let response = self
            .client
            .get(self.url("/rest/v1/profiles"))
            .query(&[("id", format!("eq.{user_id}")), ("select", "*".to_string())])
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.bearer().await)
            .send()
            .await?;

        let rows: Vec<Profile> = match Self::parse_response(response).await {
            Ok(rows) => rows,
            Err(e) => {
                self.note_rejected_session(&e).await;
                return Err(profile_failure(e));
            }
        };

        rows.into_iter().next().ok_or_else(|| {
            ProviderError::ProfileLookupFailed(format!("no profile for user '{user_id}'"))
        })
    }

    async fn create_profile(&self, profile: &Profile) -> Result<(), ProviderError> {
        let response = self
            .client
            .post(self.url("/rest/v1/profiles"))
            .header("apikey", &self.config.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(self.bearer().await)
            .json(profile)
            .send()
            .await?;

        if let Err(e) = Self::check_status(response).await {
            self.note_rejected_session(&e).await;
            return Err(profile_failure(e));
        }
        Ok(())
    }
}
