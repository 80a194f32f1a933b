//! Admin authentication service.
//!
//! Passwords are hashed with Argon2id. Emails are normalized (trimmed and
//! lowercased) before lookup so the stored form is canonical.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use unique_items_core::Email;

use crate::db::RepositoryError;
use crate::db::admins::AdminRepository;
use crate::models::admin::Admin;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Admin authentication service.
///
/// Handles password login and admin account creation.
pub struct AuthService<'a> {
    admins: AdminRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            admins: AdminRepository::new(pool),
        }
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// A malformed email never matches an account, so it maps to the same
    /// error rather than a validation failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Admin, AuthError> {
        let Ok(email) = Email::parse(&normalize_email(email)) else {
            return Err(AuthError::InvalidCredentials);
        };

        let admin = self
            .admins
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &admin.password_hash)?;

        Ok(admin)
    }

    /// Create an admin account with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::AdminAlreadyExists` if the email is already registered.
    pub async fn create_admin(&self, email: &str, password: &str) -> Result<Admin, AuthError> {
        let email = Email::parse(&normalize_email(email))?;

        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let admin = self
            .admins
            .create(&email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AdminAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(admin)
    }

    /// Whether an admin account exists for the given email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn admin_exists(&self, email: &str) -> Result<bool, AuthError> {
        let email = Email::parse(&normalize_email(email))?;
        let admin = self.admins.get_by_email(&email).await?;
        Ok(admin.is_some())
    }
}

/// Canonical form used for storage and lookup.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
