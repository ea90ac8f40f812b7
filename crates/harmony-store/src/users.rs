//! User accounts: lookup, registration, and credential checks against the
//! `Users` table.

use harmony_core::{NewUser, User, is_valid_email};
use tracing::info;

use crate::StoreError;
use crate::client::RestClient;

/// User storage and authentication checks.
///
/// Passwords are bcrypt-hashed before they leave this process; the store
/// never sees plaintext.
pub struct UserStore {
    rest: RestClient,
}

impl UserStore {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            rest: RestClient::new(base_url, api_key),
        }
    }

    fn url(&self) -> String {
        self.rest.table_url("Users")
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let url = format!("{}?email=eq.{email}&select=*", self.url());
        let users: Vec<User> = self.rest.get_json(&url).await?;
        Ok(users.into_iter().next())
    }

    /// Create an account. Validates the email shape and refuses duplicates
    /// before anything is written.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<User, StoreError> {
        if !is_valid_email(email) {
            return Err(StoreError::InvalidEmail(email.to_string()));
        }
        if self.get_user_by_email(email).await?.is_some() {
            return Err(StoreError::EmailTaken(email.to_string()));
        }

        let new_user = NewUser {
            email: email.to_string(),
            name: name.to_string(),
            password: bcrypt::hash(password, bcrypt::DEFAULT_COST)?,
        };
        let created: Vec<User> = self.rest.post_json(&self.url(), &new_user).await?;
        let user = created.into_iter().next().ok_or(StoreError::NoRows)?;
        info!(email, "registered user");
        Ok(user)
    }

    /// Check credentials and return the account on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, StoreError> {
        let user = self
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| StoreError::UnknownEmail(email.to_string()))?;

        if bcrypt::verify(password, &user.password)? {
            info!(email, "login ok");
            Ok(user)
        } else {
            Err(StoreError::BadCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> UserStore {
        UserStore::new("https://unused.invalid".into(), "key".into())
    }

    #[tokio::test]
    async fn register_rejects_invalid_email_before_any_request() {
        // The base URL is unreachable; validation must fail first.
        let err = store().register("not-an-email", "Alex", "pw").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidEmail(_)));
    }

    #[test]
    fn bcrypt_roundtrip() {
        let hash = bcrypt::hash("correct horse", bcrypt::DEFAULT_COST).unwrap();
        assert!(bcrypt::verify("correct horse", &hash).unwrap());
        assert!(!bcrypt::verify("wrong horse", &hash).unwrap());
    }
}
