//! Authentication service.
//!
//! Password authentication against the `users` collection of the document
//! store. Hashes are argon2id; verification failures and unknown emails both
//! surface as [`AuthError::InvalidCredentials`] so callers cannot tell which
//! field was wrong.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use tillpoint_core::{Email, EmailError, TenantId, UserRole};

use crate::docstore::{DocStoreError, DocumentStore};
use crate::models::UserRecord;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password pair did not match a user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email format is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password does not meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// A user already exists with this email.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Document store operation failed.
    #[error("document store error: {0}")]
    Store(#[from] DocStoreError),

    /// Password hashing failed.
    #[error("password hashing error: {0}")]
    Hash(String),
}

/// Authentication service over the document store's `users` collection.
pub struct AuthService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password pair is
    /// wrong, `AuthError::Store` if the lookup itself fails.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(TenantId, UserRecord), AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (id, user) = self
            .store
            .fetch_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok((id, user))
    }

    /// Create a new user with email, password, and role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email,
    /// `AuthError::WeakPassword` for a short password, and
    /// `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn create_user(
        &self,
        id: &TenantId,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<UserRecord, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        if self.store.fetch_user_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let user = UserRecord {
            email,
            role,
            password_hash: hash_password(password)?,
        };
        self.store.put_user(id, &user).await?;

        Ok(user)
    }
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with argon2id and a fresh salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docstore::MemoryDocumentStore;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("a strong password").expect("hash");
        assert!(verify_password("a strong password", &hash).is_ok());
        assert!(matches!(
            verify_password("a wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }

    #[tokio::test]
    async fn login_round_trips_through_the_store() {
        let store = MemoryDocumentStore::default();
        let auth = AuthService::new(&store);
        let id = TenantId::new("t1");

        auth.create_user(&id, "owner@example.com", "till+point!", UserRole::Owner)
            .await
            .expect("create user");

        let (found, user) = auth
            .login("owner@example.com", "till+point!")
            .await
            .expect("login");
        assert_eq!(found, id);
        assert!(user.role.is_owner());
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let store = MemoryDocumentStore::default();
        let auth = AuthService::new(&store);
        let id = TenantId::new("t1");

        auth.create_user(&id, "owner@example.com", "till+point!", UserRole::Owner)
            .await
            .expect("create user");

        assert!(matches!(
            auth.login("owner@example.com", "nope-nope").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("stranger@example.com", "till+point!").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn duplicate_emails_are_rejected() {
        let store = MemoryDocumentStore::default();
        let auth = AuthService::new(&store);

        auth.create_user(&TenantId::new("t1"), "owner@example.com", "till+point!", UserRole::Owner)
            .await
            .expect("create user");

        assert!(matches!(
            auth.create_user(&TenantId::new("t2"), "owner@example.com", "till+point!", UserRole::Cashier)
                .await,
            Err(AuthError::UserAlreadyExists)
        ));
    }
}
