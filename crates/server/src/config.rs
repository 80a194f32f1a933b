//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `UNIQUE_ITEMS_DATABASE_URL` - `PostgreSQL` connection string
//! - `UNIQUE_ITEMS_BASE_URL` - Public URL for the store
//! - `UNIQUE_ITEMS_SESSION_SECRET` - Session secret (min 32 chars, high entropy)
//! - `BLOB_ENDPOINT` - Blob storage upload endpoint URL
//! - `BLOB_READ_WRITE_TOKEN` - Blob storage bearer token
//!
//! ## Optional
//! - `UNIQUE_ITEMS_HOST` - Bind address (default: 127.0.0.1)
//! - `UNIQUE_ITEMS_PORT` - Listen port (default: 3000)
//! - `ADMIN_SEED_SECRET` - Secret gating the admin seed endpoint
//! - `ADMIN_EMAIL` - Email for the seeded admin account
//! - `ADMIN_PASSWORD` - Password for the seeded admin account
//! - `RECEIVER_NAME` - Account name shown for manual payment transfers
//! - `RECEIVER_EASYPAISA` - Easypaisa number shown for manual payment transfers
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Sentry event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry tracing sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the store
    pub base_url: String,
    /// Session secret (deployment contract; sessions are server-side rows)
    pub session_secret: SecretString,
    /// Blob storage configuration for payment-proof uploads
    pub blob: BlobConfig,
    /// Admin seed endpoint configuration
    pub admin_seed: AdminSeedConfig,
    /// Manual-transfer receiver details attached to finalized orders
    pub receiver: Option<PaymentReceiverConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Sentry error event sample rate
    pub sentry_sample_rate: f32,
    /// Sentry performance tracing sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Blob storage configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct BlobConfig {
    /// Upload endpoint the server POSTs files to
    pub endpoint: String,
    /// Bearer token authorizing uploads
    pub read_write_token: SecretString,
}

impl std::fmt::Debug for BlobConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobConfig")
            .field("endpoint", &self.endpoint)
            .field("read_write_token", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for the secret-gated admin seed endpoint.
///
/// Every field is optional at startup; the seed endpoint reports which one is
/// missing when it is called. Implements `Debug` manually to redact secrets.
#[derive(Clone, Default)]
pub struct AdminSeedConfig {
    /// Shared secret the seed request must present
    pub secret: Option<SecretString>,
    /// Email for the admin account the seed creates
    pub email: Option<String>,
    /// Password for the admin account the seed creates
    pub password: Option<SecretString>,
}

impl std::fmt::Debug for AdminSeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeedConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Display details for the manual-transfer payment receiver.
///
/// Shown to shoppers for the advance transfer and stamped onto orders
/// created through checkout finalization. Present only when both variables
/// are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceiverConfig {
    /// Account holder name
    pub name: String,
    /// Easypaisa mobile number
    pub easypaisa_msisdn: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("UNIQUE_ITEMS_DATABASE_URL")?;
        let host = get_env_or_default("UNIQUE_ITEMS_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("UNIQUE_ITEMS_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("UNIQUE_ITEMS_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("UNIQUE_ITEMS_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("UNIQUE_ITEMS_BASE_URL")?;
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("UNIQUE_ITEMS_BASE_URL".to_string(), e.to_string())
        })?;
        let session_secret = get_validated_secret("UNIQUE_ITEMS_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "UNIQUE_ITEMS_SESSION_SECRET")?;

        let blob = BlobConfig::from_env()?;
        let admin_seed = AdminSeedConfig::from_env();
        let receiver = PaymentReceiverConfig::from_env();

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_env_or_default("SENTRY_SAMPLE_RATE", "1.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), e.to_string())
            })?;
        let sentry_traces_sample_rate = get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_TRACES_SAMPLE_RATE".to_string(), e.to_string())
            })?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            blob,
            admin_seed,
            receiver,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BlobConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint = get_required_env("BLOB_ENDPOINT")?;
        Url::parse(&endpoint).map_err(|e| {
            ConfigError::InvalidEnvVar("BLOB_ENDPOINT".to_string(), e.to_string())
        })?;
        Ok(Self {
            endpoint,
            read_write_token: get_validated_secret("BLOB_READ_WRITE_TOKEN")?,
        })
    }
}

impl AdminSeedConfig {
    fn from_env() -> Self {
        Self {
            secret: get_optional_env("ADMIN_SEED_SECRET").map(SecretString::from),
            email: get_optional_env("ADMIN_EMAIL"),
            password: get_optional_env("ADMIN_PASSWORD").map(SecretString::from),
        }
    }
}

impl PaymentReceiverConfig {
    fn from_env() -> Option<Self> {
        let name = get_optional_env("RECEIVER_NAME")?;
        let easypaisa_msisdn = get_optional_env("RECEIVER_EASYPAISA")?;
        Some(Self {
            name,
            easypaisa_msisdn,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    // Try primary key first (e.g., UNIQUE_ITEMS_DATABASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL (set by Fly.io postgres attach)
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
