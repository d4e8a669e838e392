//! Demo-mode sign-in.
//!
//! Without an identity provider, any seeded identity can sign in with the
//! shared demo password. The login form's role, when given, must match the
//! identity's role.

use siwes_core::identity::Identity;
use siwes_core::roles::Role;
use siwes_db::repositories::IdentityRepo;
use siwes_db::DataStore;
use siwes_identity::ProviderError;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

const INVALID_LOGIN: &str = "Invalid email or password";

pub struct DemoDirectory {
    password_hash: String,
}

impl DemoDirectory {
    pub fn new(password: &str) -> Result<Self, argon2::password_hash::Error> {
        Ok(Self {
            password_hash: hash_password(password)?,
        })
    }

    /// Resolve `email` to a seeded identity and check the demo password.
    pub async fn authenticate(
        &self,
        store: &DataStore,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> AppResult<Identity> {
        let invalid = || AppError::Provider(ProviderError::InvalidCredentials(INVALID_LOGIN.into()));

        let identity = IdentityRepo::find_by_email(store, email)
            .await
            .ok_or_else(invalid)?;
        if role.is_some_and(|role| role != identity.role) {
            tracing::debug!(email, expected = ?role, actual = %identity.role, "Demo login role mismatch");
            return Err(invalid());
        }

        let valid = verify_password(password, &self.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !valid {
            return Err(invalid());
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use siwes_db::seed::demo_dataset;

    use super::*;

    #[tokio::test]
    async fn seeded_identity_signs_in_with_demo_password() {
        let store = siwes_db::create_store(demo_dataset());
        let directory = DemoDirectory::new("siwes-demo").unwrap();

        let identity = directory
            .authenticate(&store, "SUPERVISOR@aapoly.edu.ng", "siwes-demo", Some(Role::Supervisor))
            .await
            .unwrap();
        assert_eq!(identity.id, "supervisor1");

        assert_matches!(
            directory
                .authenticate(&store, "supervisor@aapoly.edu.ng", "siwes-demo", Some(Role::Student))
                .await,
            Err(AppError::Provider(ProviderError::InvalidCredentials(_)))
        );
        assert_matches!(
            directory
                .authenticate(&store, "supervisor@aapoly.edu.ng", "nope", None)
                .await,
            Err(AppError::Provider(ProviderError::InvalidCredentials(_)))
        );
        assert_matches!(
            directory
                .authenticate(&store, "nobody@aapoly.edu.ng", "siwes-demo", None)
                .await,
            Err(AppError::Provider(ProviderError::InvalidCredentials(_)))
        );
    }
}
